use std::path::{Component, Path, PathBuf};
use log::{debug, warn};
use crate::errors::GalleryError;

/// A request path mapped beneath the server root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    /// Absolute filesystem path, always the root or a descendant of it
    pub fs_path: PathBuf,
    /// Same location relative to the root; empty for the root itself
    pub relative: PathBuf,
}

/// Maps URL paths onto the confined content root.
///
/// Translation is anchored on the application directory (`internal_base`);
/// the result is then re-rooted onto the content root with [`confine`].
#[derive(Debug, Clone)]
pub struct PathResolver {
    internal_base: PathBuf,
    root: PathBuf,
}

impl PathResolver {
    pub fn new(internal_base: PathBuf, root: PathBuf) -> Self {
        Self { internal_base, root }
    }

    /// Resolve a raw request path (query string allowed) to a confined path
    pub fn resolve(&self, url_path: &str) -> Result<ResolvedPath, GalleryError> {
        let translated = translate(url_path, &self.internal_base)?;
        let fs_path = confine(&translated, &self.internal_base, &self.root)?;
        let relative = fs_path
            .strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .map_err(|_| GalleryError::InvalidPath(url_path.to_string()))?;
        debug!("Resolved '{}' to {:?}", url_path, fs_path);
        Ok(ResolvedPath { fs_path, relative })
    }
}

/// Translate a URL path onto `base` the way a static file server does:
/// drop query and fragment, percent-decode, collapse `.`/`..` lexically and
/// ignore any segment that could name a separate location on its own.
pub fn translate(url_path: &str, base: &Path) -> Result<PathBuf, GalleryError> {
    let path = url_path
        .split(['?', '#'])
        .next()
        .unwrap_or_default();
    let decoded = urlencoding::decode(path)
        .map_err(|e| GalleryError::InvalidPath(format!("{}: {}", url_path, e)))?;

    let mut segments: Vec<&str> = Vec::new();
    for segment in decoded.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s if s.contains('\\') || s.contains('\0') => {
                warn!("Dropping suspicious path segment {:?} in '{}'", s, url_path);
            }
            s => segments.push(s),
        }
    }

    let mut translated = base.to_path_buf();
    for segment in segments {
        translated.push(segment);
    }
    Ok(translated)
}

/// Re-root a path translated against `internal_base` onto `root`.
///
/// Fails when `resolved` is not under `internal_base` or the remainder holds
/// anything other than plain names.
pub fn confine(resolved: &Path, internal_base: &Path, root: &Path) -> Result<PathBuf, GalleryError> {
    let relative = resolved.strip_prefix(internal_base).map_err(|_| {
        GalleryError::InvalidPath(format!("{} is outside {}", resolved.display(), internal_base.display()))
    })?;

    let mut confined = root.to_path_buf();
    for comp in relative.components() {
        match comp {
            Component::Normal(seg) => confined.push(seg),
            Component::CurDir => {}
            _ => {
                return Err(GalleryError::InvalidPath(format!(
                    "{} escapes the content root",
                    relative.display()
                )));
            }
        }
    }
    Ok(confined)
}
