use serde::{Deserialize, Deserializer, Serialize};

/// The single site configuration document. Defaults come from [`crate::catalog`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteConfig {
    pub agency: AgencyInfo,
    pub hero: HeroContent,
    pub contact: ContactInfo,
    pub drive: DriveConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AgencyInfo {
    pub name: String,
    pub tagline: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeroContent {
    pub title_prefix: String,
    pub subtitle: String,
    pub stats: HeroStats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeroStats {
    pub clients: u32,
    pub projects: u32,
    pub experience: u32,
    pub active_projects: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactInfo {
    pub whatsapp: String,
    pub phone: String,
    pub email: String,
    pub address: String,
}

/// Credentials for the remote portfolio listing. Empty values disable sync.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DriveConfig {
    pub enabled: bool,
    pub api_key: String,
    pub folder_id: String,
}

impl DriveConfig {
    /// Enabled and both credentials present.
    pub fn is_usable(&self) -> bool {
        self.enabled && !self.api_key.trim().is_empty() && !self.folder_id.trim().is_empty()
    }

    /// Browser link to the source folder, for the "open in folder" affordance.
    pub fn folder_url(&self) -> Option<String> {
        let id = self.folder_id.trim();
        if id.is_empty() { return None; }
        Some(format!("https://drive.google.com/drive/folders/{id}"))
    }
}

// --- Partial updates (shallow merge per section) ---

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AgencyUpdate {
    pub name: Option<String>,
    pub tagline: Option<String>,
    /// `Some(None)` (JSON `null`) clears the logo; absent leaves it alone.
    #[serde(default, deserialize_with = "present_or_null", skip_serializing_if = "Option::is_none")]
    pub logo: Option<Option<String>>,
}

// Only runs when the key is present, so `null` becomes `Some(None)`.
fn present_or_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeroUpdate {
    pub title_prefix: Option<String>,
    pub subtitle: Option<String>,
    pub stats: Option<HeroStats>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactUpdate {
    pub whatsapp: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DriveUpdate {
    pub enabled: Option<bool>,
    pub api_key: Option<String>,
    pub folder_id: Option<String>,
}

/// A partial document, as served by the remote content bootstrap URL.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteConfigPatch {
    pub agency: Option<AgencyUpdate>,
    pub hero: Option<HeroUpdate>,
    pub contact: Option<ContactUpdate>,
    pub drive: Option<DriveUpdate>,
}

impl AgencyInfo {
    pub fn merge(&mut self, u: AgencyUpdate) {
        if let Some(v) = u.name { self.name = v; }
        if let Some(v) = u.tagline { self.tagline = v; }
        if let Some(v) = u.logo { self.logo = v.filter(|s| !s.trim().is_empty()); }
    }
}

impl HeroContent {
    pub fn merge(&mut self, u: HeroUpdate) {
        if let Some(v) = u.title_prefix { self.title_prefix = v; }
        if let Some(v) = u.subtitle { self.subtitle = v; }
        if let Some(v) = u.stats { self.stats = v; }
    }
}

impl ContactInfo {
    pub fn merge(&mut self, u: ContactUpdate) {
        if let Some(v) = u.whatsapp { self.whatsapp = v; }
        if let Some(v) = u.phone { self.phone = v; }
        if let Some(v) = u.email { self.email = v; }
        if let Some(v) = u.address { self.address = v; }
    }
}

impl DriveConfig {
    pub fn merge(&mut self, u: DriveUpdate) {
        if let Some(v) = u.enabled { self.enabled = v; }
        if let Some(v) = u.api_key { self.api_key = v.trim().to_string(); }
        if let Some(v) = u.folder_id { self.folder_id = v.trim().to_string(); }
    }
}

impl SiteConfig {
    pub fn apply(&mut self, patch: SiteConfigPatch) {
        if let Some(a) = patch.agency { self.agency.merge(a); }
        if let Some(h) = patch.hero { self.hero.merge(h); }
        if let Some(c) = patch.contact { self.contact.merge(c); }
        if let Some(d) = patch.drive { self.drive.merge(d); }
    }
}

// --- Portfolio ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioItem {
    pub id: String,
    pub title: String,
    pub category: String,
    pub description: String,
    pub image: String,
    #[serde(rename = "type")]
    pub kind: MediaKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
}

impl PortfolioItem {
    /// How the item should be shown. A video without a playable url falls back to its poster.
    pub fn display_kind(&self) -> MediaKind {
        match (&self.kind, self.video_url.as_deref().map(str::trim)) {
            (MediaKind::Video, Some(url)) if !url.is_empty() => MediaKind::Video,
            _ => MediaKind::Image,
        }
    }

    /// Where to send the viewer for a video that cannot be played inline.
    pub fn source_link(&self, drive: &DriveConfig) -> Option<String> {
        if self.kind == MediaKind::Video && self.display_kind() == MediaKind::Image {
            drive.folder_url()
        } else {
            None
        }
    }
}

/// Type filter applied by portfolio consumers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PortfolioFilter {
    #[default]
    All,
    Image,
    Video,
}

impl PortfolioFilter {
    pub fn matches(self, item: &PortfolioItem) -> bool {
        match self {
            PortfolioFilter::All => true,
            PortfolioFilter::Image => item.kind == MediaKind::Image,
            PortfolioFilter::Video => item.kind == MediaKind::Video,
        }
    }

    pub fn apply<'a>(self, items: &'a [PortfolioItem]) -> Vec<&'a PortfolioItem> {
        items.iter().filter(|i| self.matches(i)).collect()
    }
}

impl std::str::FromStr for PortfolioFilter {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "image" | "images" | "photo" => Ok(Self::Image),
            "video" | "videos" => Ok(Self::Video),
            other => Err(anyhow::anyhow!("unknown filter `{}` (expected all, image, video)", other)),
        }
    }
}
