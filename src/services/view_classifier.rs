use std::path::{Component, Path};
use crate::types::{GalleryKind, Route};
use crate::utils::PLACEHOLDER;

/// Gallery kind from the shape of a root-relative path.
/// Two or more segments is a volume; the root or a single series is a series list.
pub fn classify_gallery(relative: &Path) -> GalleryKind {
    let depth = relative
        .components()
        .filter(|c| matches!(c, Component::Normal(_)))
        .count();
    if depth > 1 { GalleryKind::VolumeList } else { GalleryKind::SeriesList }
}

/// Route for a resolved path once asset overrides are ruled out
pub fn classify_target(relative: &Path, is_dir: bool) -> Route {
    if is_dir {
        classify_gallery(relative).into()
    } else {
        Route::PlainFile
    }
}

/// Full routing decision for a request
pub fn classify(url_path: &str, relative: &Path, is_dir: bool) -> Route {
    match asset_name(url_path) {
        Some(name) => Route::Asset(name),
        None => classify_target(relative, is_dir),
    }
}

/// File name of a stylesheet, script or placeholder request, if it is one
pub fn asset_name(url_path: &str) -> Option<String> {
    let path = url_path.split(['?', '#']).next().unwrap_or_default();
    let last = path.rsplit('/').next()?;
    let name = urlencoding::decode(last).ok()?.into_owned();
    if name.is_empty() || name.starts_with('.') || name.contains(['/', '\\']) {
        return None;
    }
    let lower = name.to_ascii_lowercase();
    if lower.ends_with(".css") || lower.ends_with(".js") || name == PLACEHOLDER {
        Some(name)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn depth_decides_kind() {
        assert_eq!(classify_gallery(Path::new("")), GalleryKind::SeriesList);
        assert_eq!(classify_gallery(Path::new(".")), GalleryKind::SeriesList);
        assert_eq!(classify_gallery(Path::new("Series")), GalleryKind::SeriesList);
        assert_eq!(classify_gallery(Path::new("Series/Volume1")), GalleryKind::VolumeList);
        assert_eq!(classify_gallery(Path::new("a/b/c")), GalleryKind::VolumeList);
    }

    #[test]
    fn kind_ignores_filesystem() {
        // paths that do not exist still classify by shape alone
        let missing = PathBuf::from("does-not-exist/nowhere");
        assert_eq!(classify_gallery(&missing), GalleryKind::VolumeList);
    }

    #[test]
    fn files_are_plain() {
        assert_eq!(classify_target(Path::new("A/V1/p1.jpg"), false), Route::PlainFile);
        assert_eq!(classify_target(Path::new("A/V1"), true), Route::VolumeList);
        assert_eq!(classify_target(Path::new("A"), true), Route::SeriesList);
    }

    #[test]
    fn assets_win_over_targets() {
        assert_eq!(
            classify("/A/V1/gallery.css", Path::new("A/V1/gallery.css"), false),
            Route::Asset("gallery.css".into())
        );
        assert_eq!(classify("/gallery.js", Path::new("gallery.js"), false), Route::Asset("gallery.js".into()));
        assert_eq!(
            classify("/B/placeholder.svg", Path::new("B/placeholder.svg"), false),
            Route::Asset(PLACEHOLDER.into())
        );
    }

    #[test]
    fn non_assets() {
        assert_eq!(asset_name("/A/p1.jpg"), None);
        assert_eq!(asset_name("/"), None);
        assert_eq!(asset_name("/A/.js"), None);
        assert_eq!(asset_name("/A/x.css/"), None);
        assert_eq!(asset_name("/..%2Fsecret.js"), None);
    }
}
