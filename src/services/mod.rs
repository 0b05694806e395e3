pub mod gallery_service;
pub mod metadata;
pub mod path_resolver;
pub mod view_classifier;

pub use gallery_service::{GalleryService, ReaderLink};
pub use path_resolver::{PathResolver, ResolvedPath, confine};
