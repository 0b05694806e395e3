use std::path::{Path, PathBuf};

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, HeaderValue, Method, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use log::{debug, info, warn};
use tower::ServiceExt;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeFile,
};

use crate::errors::GalleryError;
use crate::services::{view_classifier, GalleryService, PathResolver, ReaderLink, ResolvedPath};
use crate::types::{AppState, Route};
use crate::utils::content_type_for;

/// Build the application router; every GET path goes through [`handle_request`]
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/", get(handle_request))
        .route("/*path", get(handle_request))
        .layer(cors)
        .with_state(state)
}

/// Resolve, classify and dispatch one request
pub async fn handle_request(
    State(state): State<AppState>,
    req: Request,
) -> Result<Response, GalleryError> {
    let uri_path = req.uri().path().to_string();
    info!("GET {}", uri_path);

    let resolver = PathResolver::new(state.config.app_dir.clone(), state.config.server_root.clone());
    let resolved = resolver.resolve(&uri_path)?;
    let is_dir = resolved.fs_path.is_dir();

    let route = match view_classifier::classify(&uri_path, &resolved.relative, is_dir) {
        Route::Asset(name) => match serve_asset(&state.config.static_dir(), &name)? {
            Some(resp) => return Ok(resp),
            None => {
                debug!("No static override for '{}', serving from content root", name);
                view_classifier::classify_target(&resolved.relative, is_dir)
            }
        },
        route => route,
    };
    debug!("Route for '{}': {:?}", uri_path, route);

    match route {
        Route::PlainFile => serve_file(&resolved.fs_path, req).await,
        Route::SeriesList | Route::VolumeList => {
            if !uri_path.ends_with('/') {
                return Ok(redirect_to_slash(&req));
            }
            if let Some(index) = index_file(&resolved.fs_path) {
                return serve_file(&index, req).await;
            }
            let host = req
                .headers()
                .get(header::HOST)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            let reader = ReaderLink::new(&state.config.reader_url, host.as_deref(), state.config.public_port);
            let html = tokio::task::spawn_blocking(move || render_gallery(&state, &route, &resolved, &reader))
                .await??;
            Ok(Html(html).into_response())
        }
        Route::Asset(_) => Err(GalleryError::NotFound(uri_path)),
    }
}

/// Build the view-model for a gallery route and render it
fn render_gallery(
    state: &AppState,
    route: &Route,
    resolved: &ResolvedPath,
    reader: &ReaderLink,
) -> Result<String, GalleryError> {
    let service = GalleryService::new(reader);
    match route {
        Route::VolumeList => {
            let page = service.volume_page(&resolved.fs_path, &resolved.relative)?;
            state.templates.render_volume(&page)
        }
        _ => {
            let page = service.series_page(&resolved.fs_path, &resolved.relative)?;
            state.templates.render_series(&page)
        }
    }
}

/// Serve a stylesheet/script override; `None` when the static directory lacks it
fn serve_asset(static_dir: &Path, name: &str) -> Result<Option<Response>, GalleryError> {
    let path = static_dir.join(name);
    if !path.is_file() {
        return Ok(None);
    }

    let bytes = std::fs::read(&path)?;
    let mut resp = Response::new(Body::from(bytes));
    resp.headers_mut().insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type_for(&path)));
    debug!("Served static override {:?}", path);
    Ok(Some(resp))
}

/// Stream a file with ranges, conditional requests and a guessed content type
async fn serve_file(path: &Path, req: Request) -> Result<Response, GalleryError> {
    match ServeFile::new(path).oneshot(req).await {
        Ok(resp) => {
            if resp.status() == StatusCode::NOT_FOUND {
                warn!("File not found: {:?}", path);
            }
            Ok(resp.into_response())
        }
        Err(never) => match never {},
    }
}

fn redirect_to_slash(req: &Request) -> Response {
    let mut target = format!("{}/", req.uri().path());
    if let Some(query) = req.uri().query() {
        target.push('?');
        target.push_str(query);
    }
    debug!("Redirecting directory request to {}", target);
    (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, target)]).into_response()
}

fn index_file(dir: &Path) -> Option<PathBuf> {
    ["index.html", "index.htm"]
        .into_iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}
