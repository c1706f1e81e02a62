use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

use crate::catalog::default_portfolio;
use crate::storage::Storage;
use crate::sync::{SyncError, Synchronizer};
use crate::types::{DriveConfig, PortfolioItem};

/// Default lifetime of a cached remote listing (seconds).
pub const DEFAULT_PORTFOLIO_TTL_SECS: i64 = 24 * 60 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// Remote sync switched off or credentials missing.
    Disabled,
    /// The folder listed fine but held nothing displayable.
    EmptyFolder,
    RemoteFailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortfolioOrigin {
    Remote,
    /// Last good remote listing, served because the live call failed.
    Cached,
    Catalog(FallbackReason),
}

/// What the portfolio view should render, plus an optional non-blocking notice.
#[derive(Debug, Clone)]
pub struct PortfolioLoad {
    pub items: Vec<PortfolioItem>,
    pub origin: PortfolioOrigin,
    pub notice: Option<String>,
}

/// Loads the portfolio from the remote folder with layered fallback.
pub struct PortfolioFeed {
    sync: Synchronizer,
    storage: Arc<dyn Storage>,
    ttl_secs: i64,
}

impl PortfolioFeed {
    pub fn new(sync: Synchronizer, storage: Arc<dyn Storage>, ttl_secs: i64) -> Self {
        Self { sync, storage, ttl_secs }
    }

    pub async fn load(&self, drive: &DriveConfig) -> PortfolioLoad {
        if !drive.is_usable() {
            return catalog(FallbackReason::Disabled, None);
        }

        match self.sync.fetch_portfolio(&drive.folder_id, &drive.api_key).await {
            Ok(items) if items.is_empty() => {
                info!(folder_id = %drive.folder_id, "remote folder has no displayable media");
                // an empty listing replaces the last good one
                if let Err(e) = self.remember(&drive.folder_id, &[]).await {
                    warn!(error = %e, "failed to reset cached portfolio listing");
                }
                catalog(
                    FallbackReason::EmptyFolder,
                    Some("No photos or videos found in the connected folder. Showing featured work instead.".to_string()),
                )
            }
            Ok(items) => {
                if let Err(e) = self.remember(&drive.folder_id, &items).await {
                    warn!(error = %e, "failed to cache portfolio listing");
                }
                PortfolioLoad { items, origin: PortfolioOrigin::Remote, notice: None }
            }
            Err(err) => self.recover(&drive.folder_id, err).await,
        }
    }

    async fn recover(&self, folder_id: &str, err: SyncError) -> PortfolioLoad {
        warn!(error = %err, "portfolio sync failed");
        let notice = format!("Could not load the live portfolio ({err}).");
        match self.recall(folder_id).await {
            Some(items) if !items.is_empty() => PortfolioLoad {
                items,
                origin: PortfolioOrigin::Cached,
                notice: Some(format!("{notice} Showing the last synced items.")),
            },
            _ => catalog(FallbackReason::RemoteFailed, Some(format!("{notice} Showing featured work instead."))),
        }
    }

    async fn remember(&self, folder_id: &str, items: &[PortfolioItem]) -> Result<()> {
        let payload = serde_json::to_string(items)?;
        self.storage.put_cache(&cache_key(folder_id), &payload, current_epoch() + self.ttl_secs).await
    }

    async fn recall(&self, folder_id: &str) -> Option<Vec<PortfolioItem>> {
        let payload = self.storage.get_cache(&cache_key(folder_id), current_epoch()).await.ok().flatten()?;
        serde_json::from_str(&payload).ok()
    }
}

fn catalog(reason: FallbackReason, notice: Option<String>) -> PortfolioLoad {
    PortfolioLoad { items: default_portfolio(), origin: PortfolioOrigin::Catalog(reason), notice }
}

fn cache_key(folder_id: &str) -> String { format!("portfolio|{}", folder_id.trim()) }

fn current_epoch() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}
