use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::BuildError;

/// The one piece of app metadata every derived identity hangs off: the
/// package name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppManifest {
    pub name: String,
}

impl AppManifest {
    /// Read `[package].name` from the app's `Cargo.toml`.
    ///
    /// A missing or empty name is fatal; without it the build cannot produce
    /// a uniquely identified bundle.
    pub fn load(app_dir: &Path) -> Result<Self, BuildError> {
        let path = app_dir.join("Cargo.toml");
        if !path.exists() {
            return Err(BuildError::ManifestMissing(path));
        }
        let content = std::fs::read_to_string(&path)?;
        let doc: toml::Value =
            toml::from_str(&content).map_err(|e| BuildError::ManifestParse(e.to_string()))?;

        match doc
            .get("package")
            .and_then(|pkg| pkg.get("name"))
            .and_then(|name| name.as_str())
        {
            Some(name) if !name.is_empty() => Ok(Self { name: name.into() }),
            _ => Err(BuildError::MissingPackageName(path)),
        }
    }
}
