//! deedboard configuration file.
//!
//! Every field has a default, so an absent or partial file is fine.
//! Resolution: an explicit path (from `--config` or `DEEDBOARD_CONFIG`)
//! must exist; otherwise `<config_dir>/deedboard/config.toml` is used if
//! present, and the built-in defaults if not.

use std::net::{SocketAddr, ToSocketAddrs};
use std::path::{Path, PathBuf};

use deedboard_api::{DEFAULT_MAX_BODY_BYTES, ListingPolicy, ServerConfig};
use deedboard_core::KeyScheme;
use deedboard_core::key::DEFAULT_NAMESPACE;
use serde::{Deserialize, Serialize};

use crate::cli::ServeArgs;
use crate::error::{Error, Result};

/// Log filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,deedboard=debug";

/// Store URL used when nothing else is configured.
pub const DEFAULT_STORE_URL: &str = "redis://127.0.0.1:6379";

/// Listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    /// Interface to bind
    pub host: String,
    /// Port to bind
    pub port: u16,
    /// Largest accepted request body, in bytes
    pub max_body_bytes: usize,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

/// Key-value store settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSection {
    /// `redis://`, `rediss://`, or `memory://`
    pub url: String,
    /// First segment of every record key
    pub namespace: String,
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            url: DEFAULT_STORE_URL.to_string(),
            namespace: DEFAULT_NAMESPACE.to_string(),
        }
    }
}

/// Everything the binary reads from its config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeedboardConfig {
    /// What fetch and export do when listing keys fails
    pub listing_policy: ListingPolicy,
    /// `EnvFilter` directives used when `RUST_LOG` is unset
    pub log_filter: String,
    /// Listener settings
    pub server: ServerSection,
    /// Store settings
    pub store: StoreSection,
}

impl Default for DeedboardConfig {
    fn default() -> Self {
        Self {
            listing_policy: ListingPolicy::default(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            server: ServerSection::default(),
            store: StoreSection::default(),
        }
    }
}

impl DeedboardConfig {
    /// Standard location: `<config_dir>/deedboard/config.toml`.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("deedboard").join("config.toml"))
    }

    /// The path `load` would read: the explicit one, else the standard one.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        match explicit {
            Some(path) => Some(PathBuf::from(path)),
            None => Self::default_config_path(),
        }
    }

    /// Load configuration following the resolution order above.
    pub fn load(explicit: Option<&str>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(Path::new(path));
        }
        match Self::default_config_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Parse and check a specific file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        let config: Self = toml::from_str(&content).map_err(|e| Error::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        config.key_scheme()?;
        Ok(config)
    }

    /// Key layout for `store.namespace`.
    pub fn key_scheme(&self) -> Result<KeyScheme> {
        KeyScheme::new(self.store.namespace.clone())
            .map_err(|e| Error::config(format!("store.namespace: {e}")))
    }

    /// Render as TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Apply command-line overrides for `serve`.
    pub fn apply_serve_args(&mut self, args: &ServeArgs) {
        if let Some(host) = &args.host {
            self.server.host = host.clone();
        }
        if let Some(port) = args.port {
            self.server.port = port;
        }
        if let Some(url) = &args.redis_url {
            self.store.url = url.clone();
        }
    }

    /// Resolve `server.host`/`server.port` to a bindable address.
    pub fn listen_addr(&self) -> Result<SocketAddr> {
        let host = self.server.host.as_str();
        (host, self.server.port)
            .to_socket_addrs()
            .map_err(|e| Error::config(format!("Cannot resolve host '{host}': {e}")))?
            .next()
            .ok_or_else(|| Error::config(format!("Host '{host}' resolved to no address")))
    }

    /// Listener settings for [`deedboard_api::Server`].
    pub fn server_config(&self) -> Result<ServerConfig> {
        Ok(ServerConfig {
            listen_addr: self.listen_addr()?,
            max_body_bytes: self.server.max_body_bytes,
        })
    }
}
