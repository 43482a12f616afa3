use thiserror::Error;

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("readiness failed: {0}")]
    Readiness(String),

    #[error("bootstrap already in flight")]
    BootstrapInFlight,

    #[error("no renderer bound; bootstrap must complete before mount")]
    RendererMissing,

    #[error("render failed: {0}")]
    Render(String),

    #[error("teardown failed: {0}")]
    Teardown(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}
