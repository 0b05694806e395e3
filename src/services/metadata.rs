//! Display-only facts about content directories.
//!
//! Nothing here fails a request: sizes fall back to zero, dates to
//! [`Stamp::Unavailable`] and thumbnails to [`PLACEHOLDER`].

use std::fs;
use std::io;
use std::path::Path;

use log::{debug, warn};
use time::{OffsetDateTime, UtcOffset, macros::format_description};

use crate::types::Stamp;
use crate::utils::{OCR_DIR, PLACEHOLDER, is_image};

/// Total size of all regular files below `dir`, symlinks skipped. Zero if the walk fails.
pub fn size_of(dir: &Path) -> u64 {
    match walk_size(dir) {
        Ok(total) => total,
        Err(e) => {
            warn!("Size walk failed for {:?}: {}", dir, e);
            0
        }
    }
}

fn walk_size(dir: &Path) -> io::Result<u64> {
    let mut total = 0;
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        if file_type.is_symlink() {
            continue;
        }
        if file_type.is_dir() {
            total += walk_size(&entry.path())?;
        } else if file_type.is_file() {
            total += entry.metadata()?.len();
        }
    }
    Ok(total)
}

/// Last-modified time of `dir` as `YYYY-MM-DD HH:MM:SS` in local time
pub fn date_of(dir: &Path) -> Stamp {
    let modified = match fs::metadata(dir).and_then(|m| m.modified()) {
        Ok(mtime) => mtime,
        Err(e) => {
            warn!("No modification time for {:?}: {}", dir, e);
            return Stamp::Unavailable(e.to_string());
        }
    };

    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    let local = OffsetDateTime::from(modified).to_offset(offset);
    match local.format(format_description!("[year]-[month]-[day] [hour]:[minute]:[second]")) {
        Ok(date) => Stamp::Modified(date),
        Err(e) => {
            warn!("Could not format modification time of {:?}: {}", dir, e);
            Stamp::Unavailable(e.to_string())
        }
    }
}

/// Image file names directly inside `dir`, in plain lexicographic order
pub fn list_images(dir: &Path) -> io::Result<Vec<String>> {
    let mut images: Vec<String> = fs::read_dir(dir)?
        .filter_map(Result::ok)
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| is_image(name))
        .collect();
    images.sort();
    Ok(images)
}

/// Subdirectory names of `dir` except the OCR sidecar, sorted ignoring case
pub fn list_subdirectories(dir: &Path) -> io::Result<Vec<String>> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry in {:?}: {}", dir, e);
                continue;
            }
        };
        let Ok(name) = entry.file_name().into_string() else {
            debug!("Skipping non UTF-8 name {:?} in {:?}", entry.file_name(), dir);
            continue;
        };
        if name == OCR_DIR || !entry.path().is_dir() {
            continue;
        }
        dirs.push(name);
    }
    dirs.sort_by_key(|name| name.to_lowercase());
    Ok(dirs)
}

/// First image in `dir`, or the placeholder name
pub fn first_image(dir: &Path) -> String {
    match list_images(dir) {
        Ok(images) => images.into_iter().next().unwrap_or_else(|| PLACEHOLDER.to_string()),
        Err(e) => {
            warn!("Could not list images in {:?}: {}", dir, e);
            PLACEHOLDER.to_string()
        }
    }
}

/// `<subdir>/<first image>` for the first eligible subdirectory, one level deep only
pub fn first_image_in_subdirectory(dir: &Path) -> String {
    let subdirs = match list_subdirectories(dir) {
        Ok(subdirs) => subdirs,
        Err(e) => {
            warn!("Could not list subdirectories of {:?}: {}", dir, e);
            return PLACEHOLDER.to_string();
        }
    };
    match subdirs.first() {
        Some(subdir) => format!("{}/{}", subdir, first_image(&dir.join(subdir))),
        None => PLACEHOLDER.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str, len: usize) {
        fs::write(dir.join(name), vec![0u8; len]).unwrap();
    }

    #[test]
    fn size_sums_nested_files() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "a.bin", 100);
        fs::create_dir(tmp.path().join("sub")).unwrap();
        touch(&tmp.path().join("sub"), "b.bin", 200);
        touch(&tmp.path().join("sub"), "c.bin", 300);
        assert_eq!(size_of(tmp.path()), 600);
    }

    #[cfg(unix)]
    #[test]
    fn size_skips_symlinks() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "a.bin", 100);
        std::os::unix::fs::symlink(tmp.path().join("a.bin"), tmp.path().join("link.bin")).unwrap();
        std::os::unix::fs::symlink(tmp.path(), tmp.path().join("loop")).unwrap();
        assert_eq!(size_of(tmp.path()), 100);
    }

    #[test]
    fn size_of_missing_dir_is_zero() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(size_of(&tmp.path().join("gone")), 0);
    }

    #[test]
    fn date_has_fixed_shape() {
        let tmp = TempDir::new().unwrap();
        let Stamp::Modified(date) = date_of(tmp.path()) else {
            panic!("expected a date");
        };
        assert_eq!(date.len(), 19);
        assert_eq!(&date[4..5], "-");
        assert_eq!(&date[10..11], " ");
        assert_eq!(&date[13..14], ":");
    }

    #[test]
    fn date_of_missing_dir_is_unavailable() {
        let tmp = TempDir::new().unwrap();
        let stamp = date_of(&tmp.path().join("gone"));
        assert!(!stamp.is_available());
        assert!(stamp.to_string().starts_with("Unavailable: "));
    }

    #[test]
    fn first_image_is_lexicographic() {
        let tmp = TempDir::new().unwrap();
        for name in ["b.png", "a.jpg", "c.gif", "0notes.txt"] {
            touch(tmp.path(), name, 1);
        }
        assert_eq!(first_image(tmp.path()), "a.jpg");
    }

    #[test]
    fn first_image_without_images_is_placeholder() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "readme.txt", 1);
        assert_eq!(first_image(tmp.path()), PLACEHOLDER);
    }

    #[test]
    fn subdirectory_thumbnail_descends_one_level() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("_ocr")).unwrap();
        fs::create_dir_all(tmp.path().join("vol2")).unwrap();
        fs::create_dir_all(tmp.path().join("Vol1/deeper")).unwrap();
        touch(&tmp.path().join("Vol1"), "p2.jpg", 1);
        touch(&tmp.path().join("Vol1"), "p1.jpg", 1);
        touch(&tmp.path().join("Vol1/deeper"), "0.jpg", 1);
        assert_eq!(first_image_in_subdirectory(tmp.path()), "Vol1/p1.jpg");
    }

    #[test]
    fn only_ocr_subdirectory_gives_placeholder() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("_ocr")).unwrap();
        touch(&tmp.path().join("_ocr"), "a.jpg", 1);
        assert_eq!(first_image_in_subdirectory(tmp.path()), PLACEHOLDER);
    }

    #[test]
    fn subdirectories_sort_ignoring_case() {
        let tmp = TempDir::new().unwrap();
        for name in ["beta", "Alpha", "_ocr", "gamma"] {
            fs::create_dir(tmp.path().join(name)).unwrap();
        }
        touch(tmp.path(), "file.jpg", 1);
        assert_eq!(list_subdirectories(tmp.path()).unwrap(), vec!["Alpha", "beta", "gamma"]);
    }
}
