use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::Mutex;

use crate::error::LifecycleError;
use crate::mode::ExecutionMode;
use crate::ready::ReadySet;

/// Default id of the DOM element sub-applications render into.
pub const DEFAULT_MOUNT_ELEMENT_ID: &str = "root-subapp";

/// Where the lifecycle currently is.
///
/// `Unmounting` returns to `Bootstrapped`, permitting remount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    Bootstrapping,
    Bootstrapped,
    Mounting,
    Mounted,
    Unmounting,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Uninitialized => "uninitialized",
            Self::Bootstrapping => "bootstrapping",
            Self::Bootstrapped => "bootstrapped",
            Self::Mounting => "mounting",
            Self::Mounted => "mounted",
            Self::Unmounting => "unmounting",
        };
        write!(f, "{s}")
    }
}

/// Props a host orchestrator may pass to `mount`/`unmount`.
///
/// `container` overrides the configured mount element for this cycle. Any
/// further host-supplied values ride along in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MountProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_route: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// The element a render pass draws into, plus the props that came with the
/// call.
#[derive(Debug, Clone)]
pub struct MountTarget {
    pub element_id: String,
    pub props: MountProps,
}

/// The application's render entry point.
///
/// `render` draws into the target and resolves once the first render pass
/// completes. `teardown` removes whatever `render` produced and releases
/// render-owned resources (listeners, timers, subscriptions) so the element
/// can be reused for a different sub-application.
pub trait Renderer: Send + Sync {
    fn render<'a>(
        &'a self,
        target: &'a MountTarget,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send + 'a>>;

    fn teardown<'a>(
        &'a self,
        target: &'a MountTarget,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send + 'a>>;
}

enum ReadyOutcome {
    NotRun,
    Done,
    Failed(String),
}

struct Inner {
    phase: Phase,
    outcome: ReadyOutcome,
    renderer: Option<Arc<dyn Renderer>>,
    /// Element the active mount rendered into; cleared by a completed
    /// unmount. Teardown must hit this element, not the configured default.
    mounted_element: Option<String>,
}

type Shared = Arc<Mutex<Inner>>;

struct BootstrapPayload {
    ready: ReadySet,
    renderer: Arc<dyn Renderer>,
}

/// Builds the `bootstrap`/`mount`/`unmount` triple over one shared lifecycle
/// state.
///
/// All three handles observe the same phase; a handle may be cloned and
/// called from any task. The factory itself holds no gates or renderer,
/// those are supplied to [`LifecycleFactory::gen_bootstrap`].
pub struct LifecycleFactory {
    element_id: String,
    shared: Shared,
}

impl LifecycleFactory {
    pub fn new(mount_element_id: impl Into<String>) -> Self {
        Self {
            element_id: mount_element_id.into(),
            shared: Arc::new(Mutex::new(Inner {
                phase: Phase::Uninitialized,
                outcome: ReadyOutcome::NotRun,
                renderer: None,
                mounted_element: None,
            })),
        }
    }

    /// Produce the bootstrap handle.
    ///
    /// Bootstrap is preparation only: it waits for every readiness gate and
    /// publishes the renderer for mount, but never renders itself. A host may
    /// bootstrap long before mounting.
    pub fn gen_bootstrap(&self, ready: ReadySet, renderer: Arc<dyn Renderer>) -> Bootstrap {
        Bootstrap {
            shared: self.shared.clone(),
            payload: Arc::new(Mutex::new(Some(BootstrapPayload { ready, renderer }))),
        }
    }

    /// Produce the mount handle, rendering into the factory's configured
    /// element unless the call's props name a different container.
    pub fn gen_mount(&self) -> Mount {
        Mount {
            shared: self.shared.clone(),
            element_id: self.element_id.clone(),
        }
    }

    /// Produce the unmount handle for the given element.
    pub fn gen_unmount(&self, mount_element_id: impl Into<String>) -> Unmount {
        Unmount {
            shared: self.shared.clone(),
            element_id: mount_element_id.into(),
        }
    }

    /// Produce all three handles plus the auto-start helper in one step.
    pub fn assemble(&self, ready: ReadySet, renderer: Arc<dyn Renderer>) -> Lifecycles {
        Lifecycles {
            bootstrap: self.gen_bootstrap(ready, renderer),
            mount: self.gen_mount(),
            unmount: self.gen_unmount(self.element_id.clone()),
            shared: self.shared.clone(),
        }
    }
}

impl Default for LifecycleFactory {
    fn default() -> Self {
        Self::new(DEFAULT_MOUNT_ELEMENT_ID)
    }
}

/// Waits for the readiness gates, then publishes the renderer.
///
/// The outcome is memoized: repeat calls after completion replay it without
/// re-running any gate, and a call arriving while the first is still waiting
/// gets [`LifecycleError::BootstrapInFlight`].
#[derive(Clone)]
pub struct Bootstrap {
    shared: Shared,
    payload: Arc<Mutex<Option<BootstrapPayload>>>,
}

impl Bootstrap {
    pub async fn call(&self) -> Result<(), LifecycleError> {
        {
            let inner = self.shared.lock().await;
            match &inner.outcome {
                ReadyOutcome::Done => return Ok(()),
                ReadyOutcome::Failed(reason) => {
                    return Err(LifecycleError::Readiness(reason.clone()));
                }
                ReadyOutcome::NotRun => {}
            }
        }

        let Some(payload) = self.payload.lock().await.take() else {
            return Err(LifecycleError::BootstrapInFlight);
        };
        {
            let mut inner = self.shared.lock().await;
            inner.phase = Phase::Bootstrapping;
        }
        tracing::info!(gates = payload.ready.len(), "Bootstrap started");

        // The lock is not held across the wait; concurrent callers observe
        // the taken payload instead of blocking behind the gates.
        let waited = payload.ready.wait().await;

        let mut inner = self.shared.lock().await;
        match waited {
            Ok(()) => {
                inner.outcome = ReadyOutcome::Done;
                inner.renderer = Some(payload.renderer);
                inner.phase = Phase::Bootstrapped;
                tracing::info!(phase = %inner.phase, "Bootstrap complete");
                Ok(())
            }
            Err(err) => {
                let reason = match err {
                    LifecycleError::Readiness(reason) => reason,
                    other => other.to_string(),
                };
                inner.outcome = ReadyOutcome::Failed(reason.clone());
                inner.phase = Phase::Uninitialized;
                tracing::warn!(error = %reason, "Bootstrap failed");
                Err(LifecycleError::Readiness(reason))
            }
        }
    }
}

/// Invokes the renderer published by bootstrap.
///
/// Callers sequence mount after bootstrap; calling before the renderer is
/// published fails with [`LifecycleError::RendererMissing`]. Repeat mounts
/// without an intervening unmount are a caller error and simply render
/// again.
#[derive(Clone)]
pub struct Mount {
    shared: Shared,
    element_id: String,
}

impl Mount {
    pub async fn call(&self, props: Option<MountProps>) -> Result<(), LifecycleError> {
        let (renderer, prior) = {
            let mut inner = self.shared.lock().await;
            let Some(renderer) = inner.renderer.clone() else {
                return Err(LifecycleError::RendererMissing);
            };
            let prior = inner.phase;
            inner.phase = Phase::Mounting;
            (renderer, prior)
        };

        let props = props.unwrap_or_default();
        let element_id = props
            .container
            .clone()
            .unwrap_or_else(|| self.element_id.clone());
        let target = MountTarget { element_id, props };
        tracing::info!(element = %target.element_id, "Mount started");

        match renderer.render(&target).await {
            Ok(()) => {
                let mut inner = self.shared.lock().await;
                inner.phase = Phase::Mounted;
                inner.mounted_element = Some(target.element_id.clone());
                tracing::info!(phase = %inner.phase, "Mount complete");
                Ok(())
            }
            Err(err) => {
                let mut inner = self.shared.lock().await;
                inner.phase = prior;
                tracing::warn!(error = %err, "Render failed");
                Err(LifecycleError::Render(err.to_string()))
            }
        }
    }
}

/// Tears down whatever the active mount rendered.
///
/// The target element follows the mount: a `container` prop on the call
/// wins, otherwise the element the mount actually rendered into, then the
/// configured default. A call with nothing mounted is a no-op; hosts call
/// unmount defensively and that must never fail.
#[derive(Clone)]
pub struct Unmount {
    shared: Shared,
    element_id: String,
}

impl Unmount {
    pub async fn call(&self, props: Option<MountProps>) -> Result<(), LifecycleError> {
        let (renderer, mounted) = {
            let mut inner = self.shared.lock().await;
            if inner.phase != Phase::Mounted {
                tracing::debug!(phase = %inner.phase, "Unmount skipped; nothing mounted");
                return Ok(());
            }
            let Some(renderer) = inner.renderer.clone() else {
                return Ok(());
            };
            inner.phase = Phase::Unmounting;
            (renderer, inner.mounted_element.clone())
        };

        let props = props.unwrap_or_default();
        let element_id = props
            .container
            .clone()
            .or(mounted)
            .unwrap_or_else(|| self.element_id.clone());
        let target = MountTarget { element_id, props };
        tracing::info!(element = %target.element_id, "Unmount started");

        match renderer.teardown(&target).await {
            Ok(()) => {
                let mut inner = self.shared.lock().await;
                inner.phase = Phase::Bootstrapped;
                inner.mounted_element = None;
                tracing::info!(phase = %inner.phase, "Unmount complete");
                Ok(())
            }
            Err(err) => {
                let mut inner = self.shared.lock().await;
                inner.phase = Phase::Mounted;
                tracing::warn!(error = %err, "Teardown failed");
                Err(LifecycleError::Teardown(err.to_string()))
            }
        }
    }
}

/// What auto-start decided to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// Standalone mode: bootstrap and mount ran here.
    Started,
    /// Hosted mode: nothing ran; the host drives the handles.
    AwaitingHost,
}

/// The assembled lifecycle triple, as exported by generated entry code.
pub struct Lifecycles {
    pub bootstrap: Bootstrap,
    pub mount: Mount,
    pub unmount: Unmount,
    shared: Shared,
}

impl Lifecycles {
    /// The conditional self-start performed at load time.
    ///
    /// Standalone mode runs `bootstrap` then `mount` exactly once; hosted
    /// mode does nothing and leaves every invocation to the host. The mode
    /// is passed in so the host-detection global is read only at the
    /// composition boundary.
    pub async fn autostart(&self, mode: ExecutionMode) -> Result<StartOutcome, LifecycleError> {
        if mode.is_hosted() {
            tracing::info!(mode = %mode, "Lifecycle handles exported; waiting for host");
            return Ok(StartOutcome::AwaitingHost);
        }
        tracing::info!(mode = %mode, "No host detected; starting standalone");
        self.bootstrap.call().await?;
        self.mount.call(None).await?;
        Ok(StartOutcome::Started)
    }

    pub async fn phase(&self) -> Phase {
        self.shared.lock().await.phase
    }
}
