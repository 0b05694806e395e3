use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::components::Templates;
use crate::config::Config;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub templates: Arc<Templates>,
}

impl AppState {
    pub fn new(config: Config, templates: Templates) -> Self {
        Self { config: Arc::new(config), templates: Arc::new(templates) }
    }
}

/// The two gallery page kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalleryKind {
    SeriesList,
    VolumeList,
}

/// Routing decision for one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Stylesheet/script (or placeholder) served from the static directory, by file name
    Asset(String),
    SeriesList,
    VolumeList,
    PlainFile,
}

impl From<GalleryKind> for Route {
    fn from(kind: GalleryKind) -> Self {
        match kind {
            GalleryKind::SeriesList => Route::SeriesList,
            GalleryKind::VolumeList => Route::VolumeList,
        }
    }
}

/// Last-modified stamp of a directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stamp {
    Modified(String),
    Unavailable(String),
}

impl Stamp {
    pub fn is_available(&self) -> bool {
        matches!(self, Stamp::Modified(_))
    }
}

impl fmt::Display for Stamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stamp::Modified(date) => f.write_str(date),
            Stamp::Unavailable(reason) => write!(f, "Unavailable: {}", reason),
        }
    }
}

/// One card on a series gallery page
#[derive(Debug, Clone, Serialize)]
pub struct DirectoryEntry {
    pub title: String,
    pub link: String,
    pub image_path: String,
    pub images_path: Option<String>,
    pub new_tab: bool,
    pub size: u64,
    pub formatted_size: String,
    pub formatted_date: String,
    pub date_available: bool,
}

/// One image on a volume page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageEntry {
    pub name: String,
    pub url: String,
}

/// Template context for `main_gallery.html`
#[derive(Debug, Serialize)]
pub struct SeriesPage {
    pub manga_title: Option<String>,
    pub gallery_items: Vec<DirectoryEntry>,
}

/// Template context for `image_gallery.html`
#[derive(Debug, Serialize)]
pub struct VolumePage {
    pub current_dir: String,
    pub images: Vec<ImageEntry>,
}
