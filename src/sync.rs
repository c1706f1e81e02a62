use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use crate::drive::FolderListing;
use crate::mapping::portfolio_item_from_file;
use crate::types::PortfolioItem;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SyncError {
    /// Credentials missing; no request was made.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Transport failure, error status or unreadable payload from the listing API.
    #[error("remote service error: {0}")]
    RemoteService(String),
}

/// Pulls the portfolio from a remote folder listing.
#[derive(Clone)]
pub struct Synchronizer {
    listing: Arc<dyn FolderListing>,
}

impl Synchronizer {
    pub fn new(listing: Arc<dyn FolderListing>) -> Self { Self { listing } }

    /// Lists the folder and maps its image and video files. An empty folder is `Ok(vec![])`.
    /// Single attempt, no retries.
    pub async fn fetch_portfolio(&self, folder_id: &str, api_key: &str) -> Result<Vec<PortfolioItem>, SyncError> {
        let folder_id = folder_id.trim();
        let api_key = api_key.trim();
        if folder_id.is_empty() || api_key.is_empty() {
            return Err(SyncError::Configuration("missing API key or folder id".to_string()));
        }

        let list = self.listing.list_folder(folder_id, api_key).await?;
        let total = list.files.len();
        let items: Vec<PortfolioItem> = list.files.iter().filter_map(portfolio_item_from_file).collect();
        if items.len() < total {
            debug!(dropped = total - items.len(), "skipped files that are neither image nor video");
        }
        info!(folder_id, items = items.len(), "portfolio synced");
        Ok(items)
    }
}
