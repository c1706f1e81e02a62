//! Media link resolution.
//!
//! Turns the loose media references users paste into the site configuration
//! (drive share links, video-host links, plain urls) into urls that can be used
//! directly in an `<img>` or an embedded player. Every path fails open: when a
//! reference cannot be interpreted it is handed back unchanged.

use once_cell::sync::Lazy;
use regex::Regex;

const DRIVE_HOSTS: &[&str] = &["drive.google.com", "docs.google.com"];
const VIDEO_HOSTS: &[&str] = &["youtube.com", "youtu.be"];

// Any run of 25+ url-safe characters; covers /d/<id>/, ?id=<id> and older share shapes.
static DRIVE_FILE_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"[-A-Za-z0-9_]{25,}").expect("valid drive id pattern"));

/// Outcome of interpreting a reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<'a> {
    Resolved(String),
    Unresolved(&'a str),
}

impl Resolution<'_> {
    pub fn is_resolved(&self) -> bool { matches!(self, Resolution::Resolved(_)) }

    pub fn into_url(self) -> String {
        match self {
            Resolution::Resolved(url) => url,
            Resolution::Unresolved(original) => original.to_string(),
        }
    }
}

/// How a video reference should be played back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoSource {
    /// Embeddable player page, for an iframe.
    Frame(String),
    /// Direct media file, for a native player.
    Native(String),
    Missing,
}

pub fn is_drive_link(reference: &str) -> bool { DRIVE_HOSTS.iter().any(|h| reference.contains(h)) }

pub fn is_video_host_link(reference: &str) -> bool { VIDEO_HOSTS.iter().any(|h| reference.contains(h)) }

pub fn drive_file_id(reference: &str) -> Option<&str> {
    DRIVE_FILE_ID.find(reference).map(|m| m.as_str())
}

pub fn drive_image_url(file_id: &str) -> String { format!("https://lh3.googleusercontent.com/d/{file_id}") }

pub fn drive_preview_url(file_id: &str) -> String { format!("https://drive.google.com/file/d/{file_id}/preview") }

pub fn video_embed_url(video_id: &str) -> String { format!("https://www.youtube.com/embed/{video_id}?autoplay=1&mute=0") }

pub fn resolve_image(reference: &str) -> Resolution<'_> {
    if !is_drive_link(reference) { return Resolution::Unresolved(reference); }
    match drive_file_id(reference) {
        Some(id) => Resolution::Resolved(drive_image_url(id)),
        None => Resolution::Unresolved(reference),
    }
}

pub fn resolve_video_embed(reference: &str) -> Resolution<'_> {
    if is_drive_link(reference) {
        return match drive_file_id(reference) {
            Some(id) => Resolution::Resolved(drive_preview_url(id)),
            None => Resolution::Unresolved(reference),
        };
    }
    if is_video_host_link(reference) && !reference.contains("/embed/") {
        if let Some(id) = video_host_id(reference) {
            return Resolution::Resolved(video_embed_url(id));
        }
    }
    Resolution::Unresolved(reference)
}

/// Directly renderable image url for a reference; `""` when there is none.
pub fn resolve_image_url<'a>(reference: impl Into<Option<&'a str>>) -> String {
    resolve_or_keep(reference.into(), resolve_image)
}

/// Embeddable player url for a reference; `""` when there is none.
pub fn resolve_video_embed_url<'a>(reference: impl Into<Option<&'a str>>) -> String {
    resolve_or_keep(reference.into(), resolve_video_embed)
}

// Surrounding whitespace is ignored for matching only; unresolved input comes back as given.
fn resolve_or_keep(reference: Option<&str>, resolve: fn(&str) -> Resolution<'_>) -> String {
    match reference {
        Some(r) if !r.trim().is_empty() => match resolve(r.trim()) {
            Resolution::Resolved(url) => url,
            Resolution::Unresolved(_) => r.to_string(),
        },
        _ => String::new(),
    }
}

/// Picks between an embedded frame and native playback.
pub fn classify_video<'a>(reference: impl Into<Option<&'a str>>) -> VideoSource {
    let r = match reference.into().map(str::trim) {
        Some(r) if !r.is_empty() => r,
        _ => return VideoSource::Missing,
    };
    if is_drive_link(r) { return VideoSource::Frame(resolve_video_embed(r).into_url()); }
    if is_video_host_link(r) {
        if r.contains("/embed/") { return VideoSource::Frame(r.to_string()); }
        if let Resolution::Resolved(url) = resolve_video_embed(r) { return VideoSource::Frame(url); }
    }
    VideoSource::Native(r.to_string())
}

fn video_host_id(reference: &str) -> Option<&str> {
    let id = if let Some((_, rest)) = reference.split_once("youtu.be/") {
        take_segment(rest)
    } else if let Some((_, rest)) = reference.split_once("/shorts/") {
        take_segment(rest)
    } else {
        query_value(reference, "v")
    };
    id.filter(|s| !s.is_empty())
}

fn take_segment(s: &str) -> Option<&str> {
    s.split(['?', '&', '#', '/']).next()
}

fn query_value<'a>(url: &'a str, key: &str) -> Option<&'a str> {
    let (_, query) = url.split_once('?')?;
    let query = query.split('#').next().unwrap_or_default();
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "1AbCdEfGhIjKlMnOpQrStUvWxYz_-0123";

    #[test]
    fn drive_share_shapes_resolve_to_direct_image() {
        let expected = format!("https://lh3.googleusercontent.com/d/{ID}");
        for shape in [
            format!("https://drive.google.com/file/d/{ID}/view?usp=sharing"),
            format!("https://drive.google.com/file/d/{ID}/view"),
            format!("https://drive.google.com/open?id={ID}"),
            format!("https://drive.google.com/uc?export=view&id={ID}"),
            format!("https://docs.google.com/uc?id={ID}"),
        ] {
            assert_eq!(resolve_image_url(shape.as_str()), expected, "{shape}");
        }
    }

    #[test]
    fn empty_references_resolve_to_empty() {
        assert_eq!(resolve_image_url(""), "");
        assert_eq!(resolve_image_url(None), "");
        assert_eq!(resolve_video_embed_url(""), "");
        assert_eq!(resolve_video_embed_url(None), "");
        assert_eq!(classify_video(None), VideoSource::Missing);
    }

    #[test]
    fn plain_urls_pass_through() {
        let url = "https://images.unsplash.com/photo-1513151233558?w=800";
        assert_eq!(resolve_image_url(url), url);
        assert_eq!(resolve_video_embed_url("https://cdn.example.com/reel.mp4"), "https://cdn.example.com/reel.mp4");
    }

    #[test]
    fn drive_link_without_id_fails_open() {
        let url = "https://drive.google.com/drive/my-drive";
        assert_eq!(resolve_image(url), Resolution::Unresolved(url));
        assert_eq!(resolve_image_url(url), url);
        assert_eq!(resolve_video_embed_url(url), url);
    }

    #[test]
    fn image_resolution_is_idempotent() {
        let once = resolve_image_url(format!("https://drive.google.com/file/d/{ID}/view").as_str());
        assert_eq!(resolve_image_url(once.as_str()), once);
    }

    #[test]
    fn drive_video_becomes_preview() {
        let url = format!("https://drive.google.com/file/d/{ID}/view?usp=drive_link");
        assert_eq!(
            resolve_video_embed_url(url.as_str()),
            format!("https://drive.google.com/file/d/{ID}/preview")
        );
        assert!(matches!(classify_video(url.as_str()), VideoSource::Frame(_)));
    }

    #[test]
    fn video_host_forms_become_embed() {
        let expected = "https://www.youtube.com/embed/dQw4w9WgXcQ?autoplay=1&mute=0";
        assert_eq!(resolve_video_embed_url("https://youtu.be/dQw4w9WgXcQ"), expected);
        assert_eq!(resolve_video_embed_url("https://youtu.be/dQw4w9WgXcQ?t=42"), expected);
        assert_eq!(resolve_video_embed_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ&list=PL1"), expected);
        assert_eq!(resolve_video_embed_url("https://www.youtube.com/watch?feature=share&v=dQw4w9WgXcQ"), expected);
        assert_eq!(resolve_video_embed_url("https://youtube.com/shorts/dQw4w9WgXcQ?si=abc"), expected);
    }

    #[test]
    fn embed_and_idless_video_links_are_unchanged() {
        let embed = "https://www.youtube.com/embed/dQw4w9WgXcQ";
        assert_eq!(resolve_video_embed_url(embed), embed);
        assert_eq!(classify_video(embed), VideoSource::Frame(embed.to_string()));
        let channel = "https://www.youtube.com/@digitalcraft";
        assert_eq!(resolve_video_embed_url(channel), channel);
        assert_eq!(classify_video(channel), VideoSource::Native(channel.to_string()));
    }

    #[test]
    fn direct_files_play_natively() {
        assert_eq!(
            classify_video("https://cdn.example.com/reel.mp4"),
            VideoSource::Native("https://cdn.example.com/reel.mp4".to_string())
        );
    }

    #[test]
    fn unresolved_reference_keeps_its_whitespace() {
        assert_eq!(resolve_image_url(" https://cdn.example.com/a.jpg "), " https://cdn.example.com/a.jpg ");
        assert_eq!(resolve_video_embed_url("\thttps://cdn.example.com/reel.mp4\n"), "\thttps://cdn.example.com/reel.mp4\n");
        assert_eq!(resolve_image_url("   "), "");
        assert_eq!(
            resolve_image_url("  https://drive.google.com/file/d/1AbCdEfGhIjKlMnOpQrStUvWxYz012345/view  "),
            "https://lh3.googleusercontent.com/d/1AbCdEfGhIjKlMnOpQrStUvWxYz012345"
        );
    }
}
