use std::path::Path;

/// Recognized image extensions, compared case-insensitively
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "avif", "gif", "bmp", "webp"];

/// Thumbnail name used when a directory holds no image
pub const PLACEHOLDER: &str = "placeholder.svg";

/// Reserved OCR sidecar directory, never listed
pub const OCR_DIR: &str = "_ocr";

/// Check whether a file name carries a recognized image extension
pub fn is_image(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.iter().any(|known| ext.eq_ignore_ascii_case(known)))
        .unwrap_or(false)
}

/// Percent-encode a relative URL path, keeping `/` separators
pub fn quote_path(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Human readable size in 1024 steps with one decimal
pub fn format_size(size: u64) -> String {
    let mut value = size as f64;
    for unit in ["B", "KB", "MB", "GB"] {
        if value < 1024.0 {
            return format!("{:.1} {}", value, unit);
        }
        value /= 1024.0;
    }
    format!("{:.1} TB", value)
}

/// Content type for the stylesheet/script overrides
pub fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|s| s.to_str()).map(|s| s.to_ascii_lowercase()) {
        Some(ref ext) if ext == "css" => "text/css",
        Some(ref ext) if ext == "js" => "text/javascript",
        Some(ref ext) if ext == "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

/// Strip an optional `:port` from a `Host` header value
pub fn host_without_port(host: &str) -> &str {
    if let Some(rest) = host.strip_prefix('[') {
        // IPv6 literal
        return match rest.find(']') {
            Some(end) => &host[..end + 2],
            None => host,
        };
    }
    match host.rsplit_once(':') {
        Some((name, port)) if port.chars().all(|c| c.is_ascii_digit()) => name,
        _ => host,
    }
}
