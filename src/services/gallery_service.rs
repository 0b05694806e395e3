use std::path::Path;
use log::{debug, info};

use crate::errors::GalleryError;
use crate::services::metadata;
use crate::types::{DirectoryEntry, ImageEntry, SeriesPage, VolumePage};
use crate::utils::{format_size, host_without_port, quote_path};

/// Builds links into the external reader application
#[derive(Debug, Clone)]
pub struct ReaderLink {
    upload_url: String,
    source: String,
}

impl ReaderLink {
    /// `source` is this server as the browser reaches it: the request host on the advertised port
    pub fn new(reader_url: &str, host_header: Option<&str>, public_port: u16) -> Self {
        let host = host_header.map(host_without_port).unwrap_or("localhost");
        Self {
            upload_url: format!("{}/upload", reader_url.trim_end_matches('/')),
            source: format!("http://{}:{}", host, public_port),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn for_volume(&self, series: &str, volume: &str) -> String {
        format!(
            "{}?manga={}&volume={}&source={}",
            self.upload_url,
            urlencoding::encode(series),
            urlencoding::encode(volume),
            urlencoding::encode(&self.source)
        )
    }
}

/// Builds gallery view-models for directories under the content root
pub struct GalleryService<'a> {
    reader: &'a ReaderLink,
}

impl<'a> GalleryService<'a> {
    pub fn new(reader: &'a ReaderLink) -> Self {
        Self { reader }
    }

    /// Series cards for `dir`. At the root each card links to the series page
    /// and borrows a thumbnail from its first volume; one level down each card
    /// is a volume opening in the reader.
    pub fn series_page(&self, dir: &Path, relative: &Path) -> Result<SeriesPage, GalleryError> {
        let at_root = relative.as_os_str().is_empty();
        let current_dir = relative_display(relative);
        let directories = metadata::list_subdirectories(dir).map_err(|e| {
            GalleryError::NotFound(format!("{}: {}", current_dir, e))
        })?;

        let mut gallery_items = Vec::with_capacity(directories.len());
        for name in directories {
            let dir_path = dir.join(&name);
            let size = metadata::size_of(&dir_path);
            let date = metadata::date_of(&dir_path);

            let (link, thumbnail, images_path, new_tab) = if at_root {
                let thumbnail = metadata::first_image_in_subdirectory(&dir_path);
                (format!("{}/", quote_path(&name)), thumbnail, None, false)
            } else {
                let thumbnail = metadata::first_image(&dir_path);
                let images_path = format!("{}/", quote_path(&name));
                (self.reader.for_volume(&current_dir, &name), thumbnail, Some(images_path), true)
            };

            gallery_items.push(DirectoryEntry {
                image_path: quote_path(&format!("{}/{}", name, thumbnail)),
                title: name,
                link,
                images_path,
                new_tab,
                size,
                formatted_size: format_size(size),
                formatted_date: date.to_string(),
                date_available: date.is_available(),
            });
        }

        info!("Series page for '{}' with {} entries", current_dir, gallery_items.len());
        Ok(SeriesPage {
            manga_title: (!at_root).then_some(current_dir),
            gallery_items,
        })
    }

    /// Image strip for a volume directory
    pub fn volume_page(&self, dir: &Path, relative: &Path) -> Result<VolumePage, GalleryError> {
        let current_dir = relative_display(relative);
        let images = metadata::list_images(dir).map_err(|e| {
            GalleryError::NotFound(format!("{}: {}", current_dir, e))
        })?;
        debug!("Volume '{}' holds {} images", current_dir, images.len());

        Ok(VolumePage {
            current_dir,
            images: images
                .into_iter()
                .map(|name| ImageEntry { url: quote_path(&name), name })
                .collect(),
        })
    }
}

/// Root-relative path with `/` separators, `.` for the root
fn relative_display(relative: &Path) -> String {
    if relative.as_os_str().is_empty() {
        return ".".to_string();
    }
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
