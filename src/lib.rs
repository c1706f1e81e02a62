pub mod catalog;
pub mod db;
pub mod drive;
pub mod feed;
pub mod mapping;
pub mod media;
pub mod settings;
pub mod storage;
pub mod store;
pub mod sync;
pub mod types;

// --- Library API for embedding ---

/// Convenience re-exports for embedders.
pub mod prelude {
    pub use crate::feed::{FallbackReason, PortfolioLoad, PortfolioOrigin};
    pub use crate::media::{classify_video, resolve_image_url, resolve_video_embed_url, VideoSource};
    pub use crate::settings::Settings;
    pub use crate::sync::SyncError;
    pub use crate::types::{
        AgencyUpdate, ContactUpdate, DriveConfig, DriveUpdate, HeroUpdate, MediaKind, PortfolioFilter, PortfolioItem,
        SiteConfig,
    };
    pub use crate::Showcase;
}

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::Mutex;
use tracing::info;

use crate::db::Database;
use crate::drive::{DriveClient, FolderListing};
use crate::feed::{PortfolioFeed, PortfolioLoad};
use crate::settings::Settings;
use crate::storage::Storage;
use crate::store::{ContentSource, ContentStore, HttpContentSource};
use crate::sync::Synchronizer;
use crate::types::{AgencyUpdate, ContactUpdate, DriveUpdate, HeroUpdate, SiteConfig};

/// Async library entry point. Owns the configuration store and the portfolio feed.
pub struct Showcase {
    store: Mutex<ContentStore>, // single writer; updates run one at a time
    feed: PortfolioFeed,
    content_url: Option<String>,
}

impl Showcase {
    /// Open the database (optionally migrating it) and load the stored configuration.
    pub async fn connect(settings: &Settings, run_migrations: bool) -> Result<Self> {
        let db = Database::connect(settings.database_url.as_deref()).await?;
        if run_migrations { db.run_migrations().await?; }
        let listing = DriveClient::with_endpoint(settings.listing_endpoint())?;
        Ok(Self::from_parts(Arc::new(db), Arc::new(listing), settings).await)
    }

    /// Build from explicit storage and listing backends.
    pub async fn from_parts(storage: Arc<dyn Storage>, listing: Arc<dyn FolderListing>, settings: &Settings) -> Self {
        let store = ContentStore::load(storage.clone()).await;
        let feed = PortfolioFeed::new(Synchronizer::new(listing), storage, settings.portfolio_ttl_secs());
        Self { store: Mutex::new(store), feed, content_url: settings.content_url.clone() }
    }

    /// Fetch the bootstrap document once, if a content url is configured. Returns whether it was applied.
    pub async fn hydrate_from_remote(&self) -> bool {
        let Some(url) = self.content_url.as_deref().filter(|u| !u.trim().is_empty()) else { return false; };
        info!(url, "hydrating site config from remote content");
        match HttpContentSource::new(url) {
            Ok(source) => self.hydrate_with(&source).await,
            Err(e) => self.store.lock().await.apply_remote(Err(e)),
        }
    }

    /// Fetch from `source`, then apply. The store is only locked once the fetch has
    /// finished, so edits made meanwhile go through and take precedence.
    pub async fn hydrate_with(&self, source: &dyn ContentSource) -> bool {
        let fetched = source.fetch().await;
        self.store.lock().await.apply_remote(fetched)
    }

    pub async fn config(&self) -> Arc<SiteConfig> { self.store.lock().await.config() }

    pub async fn hydration_error(&self) -> Option<String> {
        self.store.lock().await.hydration_error().map(str::to_string)
    }

    pub async fn update_agency(&self, update: AgencyUpdate) -> Arc<SiteConfig> {
        self.store.lock().await.update_agency(update).await
    }

    pub async fn update_hero(&self, update: HeroUpdate) -> Arc<SiteConfig> {
        self.store.lock().await.update_hero(update).await
    }

    pub async fn update_contact(&self, update: ContactUpdate) -> Arc<SiteConfig> {
        self.store.lock().await.update_contact(update).await
    }

    pub async fn update_drive_config(&self, update: DriveUpdate) -> Arc<SiteConfig> {
        self.store.lock().await.update_drive_config(update).await
    }

    /// Portfolio for the current drive settings, with fallback.
    pub async fn portfolio(&self) -> PortfolioLoad {
        let drive = self.config().await.drive.clone();
        self.feed.load(&drive).await
    }
}
