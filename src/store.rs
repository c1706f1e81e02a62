//! The site configuration store.
//!
//! Holds the one live [`SiteConfig`] for a session. Two documents are kept: the
//! user-authored base, which is what storage holds, and the live snapshot, which
//! is the base plus any applied remote content. Every update is merged into both
//! and the base is written back before the call returns, so a reload always sees
//! the last edit and never sees remote content. Storage problems are logged and
//! never reach the caller.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, warn};

use crate::storage::Storage;
use crate::types::{AgencyUpdate, ContactUpdate, DriveUpdate, HeroUpdate, SiteConfig, SiteConfigPatch};

/// Storage key for the serialized document.
pub const CONFIG_KEY: &str = "dcp_site_config";

const CONTENT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Where the live document came from at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigOrigin {
    Storage,
    Default,
}

/// Remote source of a partial configuration document.
#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn fetch(&self) -> Result<SiteConfigPatch>;
}

/// Fetches the bootstrap document with a single GET.
pub struct HttpContentSource {
    client: Client,
    url: String,
}

impl HttpContentSource {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("showcase/", env!("CARGO_PKG_VERSION")))
            .timeout(CONTENT_FETCH_TIMEOUT)
            .build()?;
        Ok(Self::with_client(url, client))
    }

    pub fn with_client(url: impl Into<String>, client: Client) -> Self { Self { client, url: url.into() } }
}

#[async_trait]
impl ContentSource for HttpContentSource {
    async fn fetch(&self) -> Result<SiteConfigPatch> {
        let resp = self
            .client
            .get(&self.url)
            .send()
            .await
            .with_context(|| format!("fetching content from {}", self.url))?
            .error_for_status()
            .context("content endpoint returned an error status")?;
        resp.json::<SiteConfigPatch>().await.context("decoding content document")
    }
}

pub struct ContentStore {
    storage: Arc<dyn Storage>,
    // user-authored document; the only thing ever persisted
    base: SiteConfig,
    config: Arc<SiteConfig>,
    origin: ConfigOrigin,
    user_edited: bool,
    hydrated_remote: bool,
    remote_patch: Option<SiteConfigPatch>,
    hydration_error: Option<String>,
}

impl ContentStore {
    /// Loads the stored document, falling back to the compiled-in default.
    pub async fn load(storage: Arc<dyn Storage>) -> Self {
        let (config, origin) = match storage.get_value(CONFIG_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str::<SiteConfig>(&raw) {
                Ok(cfg) => (cfg, ConfigOrigin::Storage),
                Err(e) => {
                    warn!(error = %e, "stored site config is unreadable; using defaults");
                    (SiteConfig::default(), ConfigOrigin::Default)
                }
            },
            Ok(None) => (SiteConfig::default(), ConfigOrigin::Default),
            Err(e) => {
                warn!(error = %e, "failed to read site config from storage; using defaults");
                (SiteConfig::default(), ConfigOrigin::Default)
            }
        };
        debug!(?origin, "site config loaded");
        Self {
            storage,
            config: Arc::new(config.clone()),
            base: config,
            origin,
            user_edited: false,
            hydrated_remote: false,
            remote_patch: None,
            hydration_error: None,
        }
    }

    /// Current snapshot.
    pub fn config(&self) -> Arc<SiteConfig> { self.config.clone() }
    /// The user-authored document, without remote content.
    pub fn base(&self) -> &SiteConfig { &self.base }
    pub fn origin(&self) -> ConfigOrigin { self.origin }
    pub fn user_edited(&self) -> bool { self.user_edited }
    pub fn hydrated_remote(&self) -> bool { self.hydrated_remote }
    /// Last remote document, applied or not.
    pub fn remote_patch(&self) -> Option<&SiteConfigPatch> { self.remote_patch.as_ref() }
    pub fn hydration_error(&self) -> Option<&str> { self.hydration_error.as_deref() }

    pub async fn update_agency(&mut self, update: AgencyUpdate) -> Arc<SiteConfig> {
        self.mutate(|c| c.agency.merge(update.clone())).await
    }

    pub async fn update_hero(&mut self, update: HeroUpdate) -> Arc<SiteConfig> {
        self.mutate(|c| c.hero.merge(update.clone())).await
    }

    pub async fn update_contact(&mut self, update: ContactUpdate) -> Arc<SiteConfig> {
        self.mutate(|c| c.contact.merge(update.clone())).await
    }

    pub async fn update_drive_config(&mut self, update: DriveUpdate) -> Arc<SiteConfig> {
        self.mutate(|c| c.drive.merge(update.clone())).await
    }

    // The same edit lands on the base and on the live snapshot, so edited fields
    // win over remote content while untouched remote fields stay visible.
    async fn mutate(&mut self, f: impl Fn(&mut SiteConfig)) -> Arc<SiteConfig> {
        f(&mut self.base);
        let mut next = (*self.config).clone();
        f(&mut next);
        self.config = Arc::new(next);
        self.user_edited = true;
        self.persist().await;
        self.config.clone()
    }

    /// Writes the user-authored document. Failures are logged only.
    pub async fn persist(&self) {
        let payload = match serde_json::to_string(&self.base) {
            Ok(p) => p,
            Err(e) => {
                warn!(error = %e, "failed to serialize site config");
                return;
            }
        };
        if let Err(e) = self.storage.put_value(CONFIG_KEY, &payload).await {
            warn!(error = %e, "failed to persist site config");
        }
    }

    /// One best-effort fetch of remote content, applied through [`Self::apply_remote`].
    pub async fn hydrate(&mut self, source: &dyn ContentSource) -> bool {
        let fetched = source.fetch().await;
        self.apply_remote(fetched)
    }

    /// Takes the outcome of a remote fetch. The remote document only fills in a
    /// session that started from defaults and has no local edits; otherwise it is
    /// kept aside and the local document wins. Returns whether it was applied.
    pub fn apply_remote(&mut self, fetched: Result<SiteConfigPatch>) -> bool {
        let patch = match fetched {
            Ok(p) => p,
            Err(e) => {
                warn!(error = %format!("{e:#}"), "remote content fetch failed");
                self.hydration_error = Some("Failed to load dynamic content.".to_string());
                return false;
            }
        };
        self.hydrated_remote = true;
        self.hydration_error = None;
        self.remote_patch = Some(patch.clone());
        if !self.remote_may_apply() {
            info!("remote content kept as advisory; local config takes precedence");
            return false;
        }
        let mut next = self.base.clone();
        next.apply(patch);
        self.config = Arc::new(next);
        info!("site config hydrated from remote content");
        true
    }

    fn remote_may_apply(&self) -> bool { self.origin == ConfigOrigin::Default && !self.user_edited }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use crate::types::{AgencyInfo, HeroContent};

    struct StaticSource(Option<SiteConfigPatch>);

    #[async_trait]
    impl ContentSource for StaticSource {
        async fn fetch(&self) -> Result<SiteConfigPatch> {
            self.0.clone().ok_or_else(|| anyhow::anyhow!("unreachable"))
        }
    }

    /// Storage whose every call fails.
    struct BrokenStorage;

    #[async_trait]
    impl Storage for BrokenStorage {
        async fn get_value(&self, _: &str) -> Result<Option<String>> { Err(anyhow::anyhow!("disk gone")) }
        async fn put_value(&self, _: &str, _: &str) -> Result<()> { Err(anyhow::anyhow!("disk gone")) }
        async fn get_cache(&self, _: &str, _: i64) -> Result<Option<String>> { Err(anyhow::anyhow!("disk gone")) }
        async fn put_cache(&self, _: &str, _: &str, _: i64) -> Result<()> { Err(anyhow::anyhow!("disk gone")) }
    }

    fn remote_named(name: &str) -> SiteConfigPatch {
        SiteConfigPatch {
            agency: Some(AgencyUpdate { name: Some(name.to_string()), ..Default::default() }),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn empty_storage_loads_defaults() {
        let store = ContentStore::load(Arc::new(MemoryStorage::new())).await;
        assert_eq!(*store.config(), SiteConfig::default());
        assert_eq!(store.origin(), ConfigOrigin::Default);
    }

    #[tokio::test]
    async fn corrupted_document_loads_defaults() {
        let storage = Arc::new(MemoryStorage::new());
        storage.put_value(CONFIG_KEY, "{not json").await.unwrap();
        let store = ContentStore::load(storage).await;
        assert_eq!(*store.config(), SiteConfig::default());
    }

    #[tokio::test]
    async fn tagline_update_keeps_name() {
        let mut store = ContentStore::load(Arc::new(MemoryStorage::new())).await;
        let cfg = store.update_agency(AgencyUpdate { tagline: Some("New Tagline".into()), ..Default::default() }).await;
        assert_eq!(cfg.agency.name, "Digital Craft Productions");
        assert_eq!(cfg.agency.tagline, "New Tagline");
    }

    #[tokio::test]
    async fn edit_survives_reload() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        let mut store = ContentStore::load(storage.clone()).await;
        store.update_drive_config(DriveUpdate { folder_id: Some(" folder ".into()), ..Default::default() }).await;
        let before = store.config();
        store.update_agency(AgencyUpdate { name: Some("X".into()), ..Default::default() }).await;

        let reloaded = ContentStore::load(storage).await;
        let cfg = reloaded.config();
        assert_eq!(reloaded.origin(), ConfigOrigin::Storage);
        assert_eq!(cfg.agency.name, "X");
        assert_eq!(cfg.agency.tagline, before.agency.tagline);
        assert_eq!(cfg.hero, before.hero);
        assert_eq!(cfg.contact, before.contact);
        assert_eq!(cfg.drive.folder_id, "folder");
    }

    #[tokio::test]
    async fn snapshots_are_immutable() {
        let mut store = ContentStore::load(Arc::new(MemoryStorage::new())).await;
        let old = store.config();
        let new = store.update_hero(HeroUpdate { subtitle: Some("s".into()), ..Default::default() }).await;
        assert!(!Arc::ptr_eq(&old, &new));
        assert_eq!(old.hero.subtitle, HeroContent::default().subtitle);
        assert_eq!(new.hero.subtitle, "s");
    }

    #[tokio::test]
    async fn broken_storage_never_fails_the_caller() {
        let mut store = ContentStore::load(Arc::new(BrokenStorage)).await;
        assert_eq!(store.origin(), ConfigOrigin::Default);
        let cfg = store.update_contact(ContactUpdate { phone: Some("1".into()), ..Default::default() }).await;
        assert_eq!(cfg.contact.phone, "1");
    }

    #[tokio::test]
    async fn remote_fills_a_fresh_session() {
        let mut store = ContentStore::load(Arc::new(MemoryStorage::new())).await;
        assert!(store.hydrate(&StaticSource(Some(remote_named("Remote Name")))).await);
        assert!(store.hydrated_remote());
        assert_eq!(store.config().agency.name, "Remote Name");
        assert_eq!(store.config().agency.tagline, AgencyInfo::default().tagline);
    }

    #[tokio::test]
    async fn local_edit_wins_regardless_of_order() {
        // edit, then remote arrives
        let mut a = ContentStore::load(Arc::new(MemoryStorage::new())).await;
        a.update_agency(AgencyUpdate { name: Some("Local".into()), ..Default::default() }).await;
        assert!(!a.hydrate(&StaticSource(Some(remote_named("Remote")))).await);
        assert_eq!(a.config().agency.name, "Local");
        assert!(a.remote_patch().is_some());

        // remote arrives, then edit
        let mut b = ContentStore::load(Arc::new(MemoryStorage::new())).await;
        b.hydrate(&StaticSource(Some(remote_named("Remote")))).await;
        b.update_agency(AgencyUpdate { name: Some("Local".into()), ..Default::default() }).await;
        assert_eq!(b.config().agency.name, "Local");
    }

    #[tokio::test]
    async fn remote_never_overrides_stored_config() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        let mut first = ContentStore::load(storage.clone()).await;
        first.update_agency(AgencyUpdate { name: Some("Saved".into()), ..Default::default() }).await;

        let mut second = ContentStore::load(storage).await;
        assert!(!second.hydrate(&StaticSource(Some(remote_named("Remote")))).await);
        assert_eq!(second.config().agency.name, "Saved");
        assert!(!second.user_edited());
    }

    #[tokio::test]
    async fn hydrated_content_is_not_persisted() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        let mut store = ContentStore::load(storage.clone()).await;
        store.hydrate(&StaticSource(Some(remote_named("Remote")))).await;
        assert_eq!(storage.get_value(CONFIG_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn edit_after_hydration_persists_only_user_fields() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        let mut store = ContentStore::load(storage.clone()).await;
        let remote = SiteConfigPatch {
            hero: Some(HeroUpdate { subtitle: Some("Remote subtitle".into()), ..Default::default() }),
            ..Default::default()
        };
        assert!(store.hydrate(&StaticSource(Some(remote))).await);
        let cfg = store.update_agency(AgencyUpdate { name: Some("X".into()), ..Default::default() }).await;
        assert_eq!(cfg.agency.name, "X");
        assert_eq!(cfg.hero.subtitle, "Remote subtitle");
        assert_eq!(store.base().hero.subtitle, HeroContent::default().subtitle);

        let stored = storage.get_value(CONFIG_KEY).await.unwrap().unwrap();
        assert!(!stored.contains("Remote subtitle"));
        let reloaded = ContentStore::load(storage).await;
        assert_eq!(reloaded.origin(), ConfigOrigin::Storage);
        assert_eq!(reloaded.config().agency.name, "X");
        assert_eq!(reloaded.config().hero.subtitle, HeroContent::default().subtitle);
    }

    #[tokio::test]
    async fn edit_overrides_hydrated_field() {
        let mut store = ContentStore::load(Arc::new(MemoryStorage::new())).await;
        store.hydrate(&StaticSource(Some(remote_named("Remote")))).await;
        let cfg = store.update_agency(AgencyUpdate { tagline: Some("t".into()), ..Default::default() }).await;
        assert_eq!(cfg.agency.name, "Remote");
        let cfg = store.update_agency(AgencyUpdate { name: Some("Local".into()), ..Default::default() }).await;
        assert_eq!(cfg.agency.name, "Local");
        assert_eq!(cfg.agency.tagline, "t");
    }

    #[tokio::test]
    async fn failed_fetch_is_non_fatal() {
        let mut store = ContentStore::load(Arc::new(MemoryStorage::new())).await;
        assert!(!store.hydrate(&StaticSource(None)).await);
        assert!(!store.hydrated_remote());
        assert_eq!(store.hydration_error(), Some("Failed to load dynamic content."));
        assert_eq!(*store.config(), SiteConfig::default());
    }
}
