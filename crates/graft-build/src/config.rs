use std::path::Path;

use serde::Deserialize;

use crate::error::BuildError;

/// Name of the per-app configuration file, looked up in the app directory.
pub const CONFIG_FILE: &str = "Graft.toml";

/// Build-time configuration read once before anything is generated.
///
/// Every field has a default; an app with no `Graft.toml` at all builds as a
/// sub-application with stock settings.
#[derive(Debug, Clone, Deserialize)]
pub struct GraftConfig {
    #[serde(default)]
    pub app: AppConfig,
    #[serde(default)]
    pub assets: AssetConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// DOM element the sub-application renders into.
    #[serde(default = "default_mount_element_id")]
    pub mount_element_id: String,
    /// Path-prefix namespace for the duplicated route tree.
    #[serde(default = "default_namespace")]
    pub namespace: String,
    /// Re-export the shared-props context from the crate root.
    #[serde(default)]
    pub register_runtime_key_in_index: bool,
}

fn default_mount_element_id() -> String {
    graft_core::DEFAULT_MOUNT_ELEMENT_ID.into()
}
fn default_namespace() -> String {
    "default".into()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            mount_element_id: default_mount_element_id(),
            namespace: default_namespace(),
            register_runtime_key_in_index: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssetConfig {
    /// Static asset base path, used when no host-injected path is present.
    #[serde(default = "default_public_path")]
    pub public_path: String,
    /// Prefer the host-injected asset path global at runtime.
    #[serde(default = "default_runtime_public_path")]
    pub runtime_public_path: bool,
    /// Routing base. Defaults to `/{app-name}` when unset.
    pub base: Option<String>,
}

fn default_public_path() -> String {
    "/".into()
}
fn default_runtime_public_path() -> bool {
    true
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            public_path: default_public_path(),
            runtime_public_path: default_runtime_public_path(),
            base: None,
        }
    }
}

impl Default for GraftConfig {
    fn default() -> Self {
        Self {
            app: AppConfig::default(),
            assets: AssetConfig::default(),
        }
    }
}

impl GraftConfig {
    pub fn from_file(path: &Path) -> Result<Self, BuildError> {
        let content = std::fs::read_to_string(path).map_err(BuildError::Io)?;
        toml::from_str(&content).map_err(|e| BuildError::ConfigParse(e.to_string()))
    }

    /// Read `Graft.toml` from the app directory, falling back to defaults
    /// when the file does not exist.
    pub fn load_or_default(app_dir: &Path) -> Result<Self, BuildError> {
        let path = app_dir.join(CONFIG_FILE);
        if path.exists() {
            Self::from_file(&path)
        } else {
            tracing::debug!(path = %path.display(), "No config file; using defaults");
            Ok(Self::default())
        }
    }

    /// Routing base for the app: the configured override, or `/{app-name}`.
    pub fn base_for(&self, app_name: &str) -> String {
        self.assets
            .base
            .clone()
            .unwrap_or_else(|| format!("/{app_name}"))
    }
}

/// Address of the development server, read from the environment once.
///
/// Drives the source-map URL rewriting so mapped stack traces in a hosted
/// page point back at this machine.
#[derive(Debug, Clone)]
pub struct DevServer {
    pub protocol: String,
    pub host: String,
    pub port: u16,
}

impl DevServer {
    pub fn new(protocol: impl Into<String>, host: impl Into<String>, port: u16) -> Self {
        Self {
            protocol: protocol.into(),
            host: host.into(),
            port,
        }
    }

    /// Resolve from `HTTPS`, `GRAFT_DEV_HOST`, and `PORT`.
    pub fn from_env() -> Self {
        let protocol = if std::env::var("HTTPS").is_ok_and(|v| matches!(v.trim(), "1" | "true")) {
            "https"
        } else {
            "http"
        };
        let host = std::env::var("GRAFT_DEV_HOST").unwrap_or_else(|_| "127.0.0.1".into());
        let port = std::env::var("PORT")
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(8000);
        Self::new(protocol, host, port)
    }

    pub fn origin(&self) -> String {
        format!("{}://{}:{}", self.protocol, self.host, self.port)
    }
}
