//! Core runtime for GRAFT sub-applications.
//!
//! A sub-application is an ordinary single-page app whose entry point has
//! been rewired so a host orchestrator can drive its full lifecycle
//! (bootstrap, mount, unmount, remount) from outside. This crate holds the
//! two pieces of real logic behind that rewiring: the lifecycle handles
//! produced by [`LifecycleFactory`], and [`namespace_routes`], the transform
//! that re-serves an application's route tree under a namespace prefix.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use graft_core::{ExecutionMode, LifecycleFactory, ReadySet, Renderer};
//!
//! # async fn run(renderer: Arc<dyn Renderer>) -> anyhow::Result<()> {
//! let factory = LifecycleFactory::new("root-subapp");
//!
//! let mut ready = ReadySet::new();
//! ready.add(async {
//!     // fetch translations, warm caches, ...
//!     Ok(())
//! });
//!
//! let cycle = factory.assemble(ready, renderer);
//!
//! // Standalone: runs bootstrap then mount. Hosted: exports only.
//! cycle.autostart(ExecutionMode::from_env()).await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod lifecycle;
pub mod mode;
pub mod ready;
pub mod routes;

pub use error::LifecycleError;
pub use lifecycle::{
    Bootstrap, DEFAULT_MOUNT_ELEMENT_ID, LifecycleFactory, Lifecycles, Mount, MountProps,
    MountTarget, Phase, Renderer, StartOutcome, Unmount,
};
pub use mode::ExecutionMode;
pub use ready::ReadySet;
pub use routes::{ROOT_PATH, RouteNode, namespace_routes};
