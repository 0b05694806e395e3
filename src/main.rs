use clap::Parser;
use log::{info, warn};
use tokio::net::TcpListener;

use gallery_server::{router, AppState, Args, Config, GalleryError, Templates};
use gallery_server::logger::Logger;

#[tokio::main]
async fn main() -> Result<(), GalleryError> {
    if let Err(e) = Logger::init() {
        eprintln!("logger already installed: {}", e);
    }

    let config = Config::from_args(Args::parse())?;
    let templates = match &config.templates_dir {
        Some(dir) => Templates::from_dir(dir)?,
        None => Templates::builtin()?,
    };
    if !config.static_dir().is_dir() {
        warn!("Static directory {:?} missing; stylesheet/script overrides disabled", config.static_dir());
    }

    let addr = config.socket_addr();
    info!("Starting server on port {}...", config.port);
    info!("Serving files from: {}", config.server_root.display());
    info!("Reader callback port: {}", config.public_port);

    let app = router(AppState::new(config, templates));
    let listener = TcpListener::bind(addr).await?;
    info!("Gallery listening on http://{}", addr);
    axum::serve(listener, app).await.map_err(GalleryError::from)
}
