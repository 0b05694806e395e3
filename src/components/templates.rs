use std::fs;
use std::path::Path;

use log::{debug, info};
use minijinja::Environment;

use crate::errors::GalleryError;
use crate::types::{SeriesPage, VolumePage};

pub const MAIN_GALLERY: &str = "main_gallery.html";
pub const IMAGE_GALLERY: &str = "image_gallery.html";

/// Compiled page templates, loaded once at startup and shared read-only
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    /// Templates compiled into the binary
    pub fn builtin() -> Result<Self, GalleryError> {
        let mut env = Environment::new();
        env.add_template(MAIN_GALLERY, include_str!("../../templates/main_gallery.html"))?;
        env.add_template(IMAGE_GALLERY, include_str!("../../templates/image_gallery.html"))?;
        debug!("Loaded built-in templates");
        Ok(Self { env })
    }

    /// Templates read from `dir`; both pages must be present
    pub fn from_dir(dir: &Path) -> Result<Self, GalleryError> {
        let mut env = Environment::new();
        for name in [MAIN_GALLERY, IMAGE_GALLERY] {
            let path = dir.join(name);
            let source = fs::read_to_string(&path).map_err(|e| {
                GalleryError::Template(format!("{}: {}", path.display(), e))
            })?;
            env.add_template_owned(name, source)?;
        }
        info!("Loaded templates from {:?}", dir);
        Ok(Self { env })
    }

    /// Templates from in-memory sources
    pub fn from_sources(main_gallery: &str, image_gallery: &str) -> Result<Self, GalleryError> {
        let mut env = Environment::new();
        env.add_template_owned(MAIN_GALLERY, main_gallery.to_string())?;
        env.add_template_owned(IMAGE_GALLERY, image_gallery.to_string())?;
        Ok(Self { env })
    }

    pub fn render_series(&self, page: &SeriesPage) -> Result<String, GalleryError> {
        Ok(self.env.get_template(MAIN_GALLERY)?.render(page)?)
    }

    pub fn render_volume(&self, page: &VolumePage) -> Result<String, GalleryError> {
        Ok(self.env.get_template(IMAGE_GALLERY)?.render(page)?)
    }
}
