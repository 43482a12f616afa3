//! Build-time plumbing for GRAFT sub-applications.
//!
//! Everything here runs once per build, before any lifecycle code executes:
//! read the app manifest and `Graft.toml`, derive the per-app
//! [`BundleIdentity`], generate the entry and shared-props modules, and tag
//! entry scripts in emitted HTML. The bundler integration consumes the
//! [`EmitReport`] and applies its strings verbatim.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use graft_build::{BuildError, DevServer, Emitter};
//!
//! # fn run() -> Result<(), BuildError> {
//! let report = Emitter::new("apps/shop", "apps/shop/.graft")
//!     .with_dev_server(DevServer::from_env())
//!     .run()?;
//!
//! for file in &report.files {
//!     println!("{} ({})", file.name, file.sha256);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod emit;
pub mod entry;
pub mod error;
pub mod html;
pub mod identity;
pub mod manifest;

pub use config::{DevServer, GraftConfig};
pub use emit::{EmitReport, Emitter};
pub use error::BuildError;
pub use html::tag_entry_scripts;
pub use identity::BundleIdentity;
pub use manifest::AppManifest;
