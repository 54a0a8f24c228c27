use url::Url;

/// Width used for video cover thumbnails.
pub const DEFAULT_THUMBNAIL_WIDTH: u32 = 300;
/// Width used for asset tiles.
pub const ASSET_THUMBNAIL_WIDTH: u32 = 200;

/// Append a `w=<width>` resize hint to blob URLs served by `blob_host`
/// (or any of its subdomains). Other URLs are returned unchanged.
pub fn thumbnail_url(url: &str, width: u32, blob_host: &str) -> String {
    let Ok(parsed) = Url::parse(url) else {
        return url.to_string();
    };
    let Some(host) = parsed.host_str() else {
        return url.to_string();
    };

    let blob_host = blob_host.trim_start_matches('.').to_ascii_lowercase();
    let on_blob_host = host == blob_host || host.ends_with(&format!(".{blob_host}"));
    if blob_host.is_empty() || !on_blob_host {
        return url.to_string();
    }

    let separator = if parsed.query().is_some() { '&' } else { '?' };
    format!("{url}{separator}w={width}")
}

/// Whether a MIME type denotes an image.
pub fn is_image(mime_type: &str) -> bool {
    mime_type.starts_with("image/")
}
