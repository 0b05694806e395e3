//! Gallery Server - browse a directory tree of manga series and volumes
//!
//! Series directories render as a thumbnail gallery, volume directories as an
//! image strip, and volumes link out to an external reader application.

pub mod components;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod logger;
pub mod services;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use components::Templates;
pub use config::{Args, Config};
pub use errors::GalleryError;
pub use handlers::router;
pub use types::{AppState, DirectoryEntry, GalleryKind, ImageEntry, Route, Stamp};
