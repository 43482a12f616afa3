use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::config::{DevServer, GraftConfig};
use crate::entry::{generate_context, generate_entry};
use crate::error::BuildError;
use crate::identity::BundleIdentity;
use crate::manifest::AppManifest;

/// File name of the generated entry module.
pub const ENTRY_FILE: &str = "graft_entry.rs";
/// File name of the generated shared-props context module.
pub const CONTEXT_FILE: &str = "graft_context.rs";
/// File name of the machine-readable emit report.
pub const REPORT_FILE: &str = "graft-report.json";

/// One generated file, as recorded in the emit report.
#[derive(Debug, Clone, Serialize)]
pub struct EmittedFile {
    pub name: String,
    pub sha256: String,
    /// False when the file on disk already had this exact content.
    pub changed: bool,
}

/// Everything a bundler integration needs from one emit run.
#[derive(Debug, Serialize)]
pub struct EmitReport {
    pub identity: BundleIdentity,
    pub files: Vec<EmittedFile>,
    pub generated_at: DateTime<Utc>,
}

/// Runs the build-time side of the system for one app directory.
///
/// 1. Load the app manifest (fatal without a package name)
/// 2. Load `Graft.toml`, or defaults when absent
/// 3. Derive the bundle identity
/// 4. Generate the entry and context modules into the output directory
/// 5. Write the emit report
///
/// Generated files are only rewritten when their content changed, so
/// watch-mode builds do not loop on their own output.
pub struct Emitter {
    app_dir: PathBuf,
    out_dir: PathBuf,
    dev: Option<DevServer>,
}

impl Emitter {
    pub fn new(app_dir: impl Into<PathBuf>, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            app_dir: app_dir.into(),
            out_dir: out_dir.into(),
            dev: None,
        }
    }

    /// Emit for a dev-server build; enables source-map URL rewriting.
    pub fn with_dev_server(mut self, dev: DevServer) -> Self {
        self.dev = Some(dev);
        self
    }

    pub fn run(&self) -> Result<EmitReport, BuildError> {
        let manifest = AppManifest::load(&self.app_dir)?;
        let config = GraftConfig::load_or_default(&self.app_dir)?;
        let identity = BundleIdentity::derive(&manifest, &config, self.dev.as_ref());
        tracing::info!(app = identity.app_name, out = %self.out_dir.display(), "Emitting");

        std::fs::create_dir_all(&self.out_dir)?;

        let entry = generate_entry(&identity, config.app.register_runtime_key_in_index);
        let context = generate_context(&identity.app_name);
        let files = vec![
            self.write_generated(ENTRY_FILE, &entry)?,
            self.write_generated(CONTEXT_FILE, &context)?,
        ];

        let report = EmitReport {
            identity,
            files,
            generated_at: Utc::now(),
        };
        std::fs::write(
            self.out_dir.join(REPORT_FILE),
            serde_json::to_string_pretty(&report)?,
        )?;
        Ok(report)
    }

    fn write_generated(&self, name: &str, content: &str) -> Result<EmittedFile, BuildError> {
        let path = self.out_dir.join(name);
        let changed = write_if_changed(&path, content)?;
        if changed {
            tracing::debug!(name, "Wrote generated file");
        } else {
            tracing::debug!(name, "Generated file unchanged");
        }
        Ok(EmittedFile {
            name: name.into(),
            sha256: hash_str(content),
            changed,
        })
    }
}

/// Write `content` to `path` unless the file already holds it. Returns
/// whether a write happened.
pub fn write_if_changed(path: &Path, content: &str) -> Result<bool, BuildError> {
    if let Ok(existing) = std::fs::read_to_string(path)
        && existing == content
    {
        return Ok(false);
    }
    std::fs::write(path, content)?;
    Ok(true)
}

pub fn hash_str(content: &str) -> String {
    hex::encode(Sha256::digest(content.as_bytes()))
}
