use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use clap::Parser;

use crate::errors::GalleryError;

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_READER_URL: &str = "https://reader.mokuro.app";

/// Command line arguments
#[derive(Parser, Debug, Clone)]
#[command(name = "gallery-server", version, about = "Run the Gallery HTTP Server.")]
pub struct Args {
    /// Directory to serve files from (default: application directory)
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// Port to run the server on
    #[arg(long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Address to bind
    #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// Application directory holding `static/` assets
    #[arg(long, default_value = ".")]
    pub app_dir: PathBuf,

    /// Directory with `main_gallery.html` and `image_gallery.html` overriding the built-in templates
    #[arg(long)]
    pub templates: Option<PathBuf>,

    /// Base URL of the external reader application
    #[arg(long, default_value = DEFAULT_READER_URL)]
    pub reader_url: String,

    /// Port advertised to the reader as this server's callback (defaults to --port)
    #[arg(long)]
    pub public_port: Option<u16>,
}

/// Application configuration, fixed once startup completes
#[derive(Debug, Clone)]
pub struct Config {
    pub server_root: PathBuf,
    pub app_dir: PathBuf,
    pub templates_dir: Option<PathBuf>,
    pub reader_url: String,
    pub port: u16,
    pub public_port: u16,
    pub host: IpAddr,
}

impl Config {
    /// Build the configuration from parsed arguments.
    ///
    /// Both the application directory and the content root are canonicalized,
    /// so every later confinement check compares absolute paths.
    pub fn from_args(args: Args) -> Result<Self, GalleryError> {
        let app_dir = canonical_dir(&args.app_dir)?;
        let server_root = match args.dir {
            Some(dir) => canonical_dir(&dir)?,
            None => app_dir.clone(),
        };

        Ok(Self {
            server_root,
            app_dir,
            templates_dir: args.templates,
            reader_url: args.reader_url.trim_end_matches('/').to_string(),
            port: args.port,
            public_port: args.public_port.unwrap_or(args.port),
            host: args.host,
        })
    }

    /// Directory the stylesheet/script overrides are read from
    pub fn static_dir(&self) -> PathBuf {
        self.app_dir.join("static")
    }

    /// Get the socket address for binding
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn canonical_dir(path: &Path) -> Result<PathBuf, GalleryError> {
    let resolved = path.canonicalize().map_err(|e| {
        GalleryError::NotFound(format!("{}: {}", path.display(), e))
    })?;
    if !resolved.is_dir() {
        return Err(GalleryError::InvalidPath(format!("{} is not a directory", resolved.display())));
    }
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_cli_contract() {
        let args = Args::try_parse_from(["gallery-server"]).unwrap();
        assert_eq!(args.port, 8000);
        assert!(args.dir.is_none());
        assert_eq!(args.reader_url, DEFAULT_READER_URL);
    }

    #[test]
    fn root_defaults_to_app_dir_and_public_port_to_port() {
        let tmp = tempfile::tempdir().unwrap();
        let app = tmp.path().to_str().unwrap();
        let args = Args::try_parse_from(["gallery-server", "--app-dir", app, "--port", "9001"]).unwrap();
        let config = Config::from_args(args).unwrap();
        assert_eq!(config.server_root, tmp.path().canonicalize().unwrap());
        assert_eq!(config.public_port, 9001);
        assert_eq!(config.socket_addr().port(), 9001);
    }

    #[test]
    fn explicit_public_port_wins() {
        let tmp = tempfile::tempdir().unwrap();
        let app = tmp.path().to_str().unwrap();
        let args = Args::try_parse_from([
            "gallery-server", "--app-dir", app, "--public-port", "8080", "--reader-url", "https://r.example/",
        ])
        .unwrap();
        let config = Config::from_args(args).unwrap();
        assert_eq!(config.public_port, 8080);
        assert_eq!(config.port, 8000);
        assert_eq!(config.reader_url, "https://r.example");
    }

    #[test]
    fn missing_root_fails_startup() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("nope");
        let args = Args::try_parse_from([
            "gallery-server",
            "--app-dir",
            tmp.path().to_str().unwrap(),
            "--dir",
            missing.to_str().unwrap(),
        ])
        .unwrap();
        assert!(matches!(Config::from_args(args), Err(GalleryError::NotFound(_))));
    }
}
