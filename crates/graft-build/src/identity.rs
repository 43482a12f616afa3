use graft_core::mode::INJECTED_PUBLIC_PATH_GLOBAL;
use serde::Serialize;

use crate::config::{DevServer, GraftConfig};
use crate::manifest::AppManifest;

/// Everything about an app's bundle that must be unique per sub-application
/// on a shared page, derived from the manifest name and the config.
///
/// `library` and `chunk_global` keep bundler placeholders (`[name]`) intact;
/// the bundler substitutes them, this crate only guarantees per-app
/// uniqueness of the surrounding text.
#[derive(Debug, Clone, Serialize)]
pub struct BundleIdentity {
    pub app_name: String,
    pub namespace: String,
    pub mount_element_id: String,
    /// Routing base, `/{app-name}` unless overridden.
    pub base: String,
    /// Global export name for the bundle, `{app-name}-[name]`.
    pub library: String,
    /// Per-app chunk-loading callback, so sibling bundles never clobber
    /// each other's chunk registries.
    pub chunk_global: String,
    /// Asset base path, either a plain string or a runtime expression
    /// preferring the host-injected global.
    pub public_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_map: Option<SourceMapOptions>,
}

/// Source-map emission options for dev builds inside a host page.
#[derive(Debug, Clone, Serialize)]
pub struct SourceMapOptions {
    pub namespace: String,
    /// Comment appended to each emitted file, pointing the map URL at the
    /// dev server rather than the host origin.
    pub append: String,
    pub filename: String,
}

impl BundleIdentity {
    pub fn derive(
        manifest: &AppManifest,
        config: &GraftConfig,
        dev: Option<&DevServer>,
    ) -> Self {
        let name = manifest.name.as_str();
        let identity = Self {
            app_name: name.into(),
            namespace: config.app.namespace.clone(),
            mount_element_id: config.app.mount_element_id.clone(),
            base: config.base_for(name),
            library: format!("{name}-[name]"),
            chunk_global: format!("graftJsonp_{name}"),
            public_path: public_path_expr(config, dev.is_some()),
            source_map: dev.map(|dev| SourceMapOptions {
                namespace: name.into(),
                append: format!("\n//# sourceMappingURL={}/[url]", dev.origin()),
                filename: "[file].map".into(),
            }),
        };
        tracing::debug!(
            app = identity.app_name,
            library = identity.library,
            base = identity.base,
            "Derived bundle identity"
        );
        identity
    }
}

/// The asset base path the bundle resolves at runtime.
///
/// With `runtime_public_path` on, the host-injected global wins and the
/// static path is only a fallback; dev builds fall back to `/` since their
/// assets are served from the dev server root.
fn public_path_expr(config: &GraftConfig, dev: bool) -> String {
    if config.assets.runtime_public_path {
        let fallback = if dev { "/" } else { config.assets.public_path.as_str() };
        format!("window.{INJECTED_PUBLIC_PATH_GLOBAL} || \"{fallback}\"")
    } else {
        config.assets.public_path.clone()
    }
}
