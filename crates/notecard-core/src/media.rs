//! Media link classification and embed-URL resolution.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::fmt;
use url::Url;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "webp", "svg"];
const VIDEO_HOSTS: &[&str] = &["youtube.com", "youtu.be", "facebook.com"];

const YOUTUBE_EMBED: &str = "https://www.youtube.com/embed/";
const FACEBOOK_PLUGIN: &str = "https://www.facebook.com/plugins/video.php";

/// Characters `encodeURIComponent` leaves alone.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// What a media link points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    None,
    Image,
    Video,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::None => "none",
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a media link.
///
/// Returns [`MediaKind::None`] for empty input and for anything that is not
/// an absolute URL. The image-extension check wins over the host check.
pub fn classify(url: &str) -> MediaKind {
    if url.is_empty() {
        return MediaKind::None;
    }
    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(_) => return MediaKind::None,
    };

    if has_image_extension(parsed.path()) {
        return MediaKind::Image;
    }

    let host = parsed.host_str().unwrap_or("").to_ascii_lowercase();
    if VIDEO_HOSTS.iter().any(|h| host.ends_with(*h)) {
        return MediaKind::Video;
    }

    MediaKind::None
}

fn has_image_extension(path: &str) -> bool {
    let path = path.to_ascii_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| {
        path.strip_suffix(*ext)
            .map(|rest| rest.ends_with('.'))
            .unwrap_or(false)
    })
}

/// Rewrite a video link into a URL suitable for an inline playback frame.
///
/// Links that cannot be rewritten, including malformed ones, come back
/// unchanged.
pub fn resolve_embed(url: &str) -> String {
    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(_) => return url.to_string(),
    };

    match parsed.host_str().unwrap_or("") {
        "youtu.be" => {
            let id = parsed.path().trim_start_matches('/');
            if id.is_empty() {
                url.to_string()
            } else {
                format!("{}{}", YOUTUBE_EMBED, id)
            }
        }
        "youtube.com" | "www.youtube.com" => parsed
            .query_pairs()
            .find(|(k, _)| k == "v")
            .map(|(_, v)| format!("{}{}", YOUTUBE_EMBED, v))
            .unwrap_or_else(|| url.to_string()),
        "facebook.com" | "www.facebook.com" => format!(
            "{}?href={}&show_text=0&width=560",
            FACEBOOK_PLUGIN,
            utf8_percent_encode(url, URI_COMPONENT)
        ),
        _ => url.to_string(),
    }
}
