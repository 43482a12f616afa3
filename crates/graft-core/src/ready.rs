use std::future::Future;
use std::pin::Pin;

use futures::future::try_join_all;

use crate::error::LifecycleError;

/// A boxed readiness gate. Resolves when its precondition is satisfied.
pub type ReadyGate = Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send>>;

/// Ordered collection of readiness gates contributed by independent parts of
/// the application (data preload, i18n catalogs, feature flags, ...).
///
/// All gates must resolve before rendering may begin. The set is consumed
/// exactly once, by the bootstrap lifecycle; the first gate to fail settles
/// the whole set with that failure and the remaining gates are dropped.
pub struct ReadySet {
    gates: Vec<ReadyGate>,
}

impl ReadySet {
    pub fn new() -> Self {
        Self { gates: Vec::new() }
    }

    /// Add a readiness gate.
    pub fn add<F>(&mut self, gate: F)
    where
        F: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.gates.push(Box::pin(gate));
    }

    /// Add an already-boxed gate, as produced by generated entry code.
    pub fn add_boxed(&mut self, gate: ReadyGate) {
        self.gates.push(gate);
    }

    pub fn len(&self) -> usize {
        self.gates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    /// Wait for every gate. Empty sets resolve immediately.
    pub(crate) async fn wait(self) -> Result<(), LifecycleError> {
        try_join_all(self.gates)
            .await
            .map(|_| ())
            .map_err(|err| LifecycleError::Readiness(err.to_string()))
    }
}

impl Default for ReadySet {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ReadySet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReadySet")
            .field("gates", &self.gates.len())
            .finish()
    }
}
