use crate::identity::BundleIdentity;

/// Render the generated entry module for an app.
///
/// The module wires the app's readiness gates and renderer into the
/// lifecycle factory, exports the assembled handles, and performs the
/// conditional self-start. The app side only has to provide
/// `app::ready_gates()` and `app::renderer()`.
pub fn generate_entry(identity: &BundleIdentity, register_runtime_key: bool) -> String {
    let mut out = format!(
        r#"//! Generated by graft for `{name}`; do not edit.

use std::sync::Arc;

use graft_core::{{ExecutionMode, LifecycleFactory, Lifecycles, ReadySet, StartOutcome}};

use crate::app;

pub const MOUNT_ELEMENT_ID: &str = "{element_id}";

/// Assemble the exported lifecycle handles over the app's readiness gates
/// and renderer.
pub fn lifecycles() -> Lifecycles {{
    let factory = LifecycleFactory::new(MOUNT_ELEMENT_ID);
    let mut ready = ReadySet::new();
    for gate in app::ready_gates() {{
        ready.add_boxed(gate);
    }}
    factory.assemble(ready, Arc::new(app::renderer()))
}}

/// Load-time entry point. Standalone mode bootstraps and mounts here;
/// hosted mode exports the handles and waits for the host.
pub async fn start() -> anyhow::Result<StartOutcome> {{
    Ok(lifecycles().autostart(ExecutionMode::from_env()).await?)
}}
"#,
        name = identity.app_name,
        element_id = identity.mount_element_id,
    );

    if register_runtime_key {
        out.push_str(
            "\npub use crate::context::{RUNTIME_KEY, set_shared_props, shared_props};\n",
        );
    }
    out
}

/// Render the shared-props context module.
///
/// Hosts hand props to `mount`; the generated module keeps the latest set in
/// a process-wide slot any app module can read, the runtime-key analogue of
/// exporting host context from the app root.
pub fn generate_context(app_name: &str) -> String {
    format!(
        r#"//! Generated by graft for `{name}`; do not edit.
//!
//! Host-shared props. `mount` publishes what the host supplied; any module
//! may read the latest value here.

use std::sync::RwLock;

use graft_core::MountProps;

/// Key under which the host looks up this app's shared context.
pub const RUNTIME_KEY: &str = "graft";

static SHARED_PROPS: RwLock<Option<MountProps>> = RwLock::new(None);

/// Publish the host-supplied props. Called from `mount`.
pub fn set_shared_props(props: MountProps) {{
    match SHARED_PROPS.write() {{
        Ok(mut slot) => *slot = Some(props),
        Err(poisoned) => *poisoned.into_inner() = Some(props),
    }}
}}

/// The most recent host-supplied props, if any.
pub fn shared_props() -> Option<MountProps> {{
    match SHARED_PROPS.read() {{
        Ok(slot) => slot.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }}
}}
"#,
        name = app_name,
    )
}
