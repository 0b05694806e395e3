use std::io;
use axum::{http::StatusCode, response::{IntoResponse, Response}};

/// Error types for the gallery server
#[derive(Debug)]
pub enum GalleryError {
    Io(io::Error),
    NotFound(String),
    InvalidPath(String),
    Template(String),
    Join(String),
}

impl From<io::Error> for GalleryError {
    fn from(err: io::Error) -> Self {
        GalleryError::Io(err)
    }
}

impl From<minijinja::Error> for GalleryError {
    fn from(err: minijinja::Error) -> Self {
        GalleryError::Template(err.to_string())
    }
}

impl From<tokio::task::JoinError> for GalleryError {
    fn from(err: tokio::task::JoinError) -> Self {
        GalleryError::Join(err.to_string())
    }
}

impl std::fmt::Display for GalleryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GalleryError::Io(e) => write!(f, "I/O error: {}", e),
            GalleryError::NotFound(detail) => write!(f, "Not found: {}", detail),
            GalleryError::InvalidPath(detail) => write!(f, "Invalid path: {}", detail),
            GalleryError::Template(e) => write!(f, "Template error: {}", e),
            GalleryError::Join(e) => write!(f, "Worker error: {}", e),
        }
    }
}

impl std::error::Error for GalleryError {}

impl IntoResponse for GalleryError {
    fn into_response(self) -> Response {
        let status = match self {
            GalleryError::NotFound(_) => StatusCode::NOT_FOUND,
            GalleryError::InvalidPath(_) => StatusCode::BAD_REQUEST,
            GalleryError::Io(_) | GalleryError::Template(_) | GalleryError::Join(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        log::warn!("Responding {} ({})", status, self);
        (status, self.to_string()).into_response()
    }
}
