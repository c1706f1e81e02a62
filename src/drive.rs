use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use crate::sync::SyncError;

pub const DEFAULT_LISTING_ENDPOINT: &str = "https://www.googleapis.com/drive/v3/files";

// Only the first page is read; larger folders are truncated.
const PAGE_SIZE: u32 = 100;
const LISTING_FIELDS: &str =
    "files(id, name, mimeType, thumbnailLink, webContentLink, webViewLink, description), nextPageToken";

/// One file record from the folder listing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveFile {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub mime_type: String,
    pub thumbnail_link: Option<String>,
    pub web_content_link: Option<String>,
    pub web_view_link: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveFileList {
    #[serde(default)]
    pub files: Vec<DriveFile>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: Option<ErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Read-only listing of a remote folder.
#[async_trait]
pub trait FolderListing: Send + Sync {
    async fn list_folder(&self, folder_id: &str, api_key: &str) -> Result<DriveFileList, SyncError>;
}

/// Listing client for the Drive v3 files endpoint.
#[derive(Clone)]
pub struct DriveClient {
    client: Client,
    endpoint: Url,
}

impl DriveClient {
    pub fn new() -> anyhow::Result<Self> { Self::with_endpoint(DEFAULT_LISTING_ENDPOINT) }

    pub fn with_endpoint(endpoint: &str) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("showcase/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Self::with_client(endpoint, client)
    }

    pub fn with_client(endpoint: &str, client: Client) -> anyhow::Result<Self> {
        let endpoint = Url::parse(endpoint).map_err(|e| anyhow::anyhow!("invalid listing endpoint `{}`: {}", endpoint, e))?;
        Ok(Self { client, endpoint })
    }

    /// Full request url for a folder listing.
    pub fn listing_url(&self, folder_id: &str, api_key: &str) -> Url {
        let query = format!("'{}' in parents and trashed = false", quote_literal(folder_id));
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("q", &query)
            .append_pair("key", api_key)
            .append_pair("fields", LISTING_FIELDS)
            .append_pair("pageSize", &PAGE_SIZE.to_string());
        url
    }
}

#[async_trait]
impl FolderListing for DriveClient {
    async fn list_folder(&self, folder_id: &str, api_key: &str) -> Result<DriveFileList, SyncError> {
        let url = self.listing_url(folder_id, api_key);
        debug!(folder_id, "listing drive folder");
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SyncError::RemoteService(format!("listing request failed: {e}")))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| SyncError::RemoteService(format!("reading listing response: {e}")))?;

        if !status.is_success() {
            return Err(SyncError::RemoteService(provider_message(&body).unwrap_or_else(|| {
                format!("Failed to fetch Drive files (HTTP {})", status.as_u16())
            })));
        }

        let list: DriveFileList = serde_json::from_str(&body)
            .map_err(|e| SyncError::RemoteService(format!("malformed listing payload: {e}")))?;
        if list.next_page_token.is_some() {
            warn!(folder_id, shown = list.files.len(), "folder has more than one page of files; only the first page is used");
        }
        Ok(list)
    }
}

// Escapes a value for use inside a single-quoted query string literal.
fn quote_literal(value: &str) -> String { value.replace('\\', "\\\\").replace('\'', "\\'") }

/// `error.message` from a provider error body, if there is one.
fn provider_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()?
        .error?
        .message
        .filter(|m| !m.trim().is_empty())
}
