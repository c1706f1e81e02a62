use once_cell::sync::Lazy;
use regex::Regex;

use crate::catalog::PLACEHOLDER_IMAGE;
use crate::drive::DriveFile;
use crate::media::drive_preview_url;
use crate::types::{MediaKind, PortfolioItem};

static THUMB_SIZE: Lazy<Regex> = Lazy::new(|| Regex::new(r"=s\d+$").expect("valid thumbnail size pattern"));
static EXTENSION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.[^/.]+$").expect("valid extension pattern"));

const HIGH_RES_SIZE: &str = "=s1600";

pub fn kind_from_mime(mime: &str) -> Option<MediaKind> {
    if mime.starts_with("video/") {
        Some(MediaKind::Video)
    } else if mime.starts_with("image/") {
        Some(MediaKind::Image)
    } else {
        None
    }
}

pub fn category_for(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Video => "Video Production",
        MediaKind::Image => "Photography",
    }
}

fn fallback_description(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Video => "Cinematic Video Production",
        MediaKind::Image => "Professional Photography",
    }
}

pub fn title_from_name(name: &str) -> String { EXTENSION.replace(name, "").into_owned() }

/// Thumbnail upgraded from the default low-res size token to a high-res one.
pub fn high_res_thumbnail(link: &str) -> String { THUMB_SIZE.replace(link, HIGH_RES_SIZE).into_owned() }

/// Maps a listed file to a portfolio item; files that are neither image nor video yield `None`.
pub fn portfolio_item_from_file(file: &DriveFile) -> Option<PortfolioItem> {
    let kind = kind_from_mime(&file.mime_type)?;
    let image = file
        .thumbnail_link
        .as_deref()
        .filter(|l| !l.trim().is_empty())
        .map(high_res_thumbnail)
        .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string());
    let description = file
        .description
        .clone()
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| fallback_description(kind).to_string());
    Some(PortfolioItem {
        id: file.id.clone(),
        title: title_from_name(&file.name),
        category: category_for(kind).to_string(),
        description,
        image,
        kind,
        video_url: matches!(kind, MediaKind::Video).then(|| drive_preview_url(&file.id)),
    })
}
