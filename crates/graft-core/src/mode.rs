use std::fmt;

/// Page global the host orchestrator sets before any sub-application code
/// runs. Generated entry code checks it to pick the execution mode.
pub const POWERED_BY_HOST_GLOBAL: &str = "__POWERED_BY_GRAFT__";

/// Page global carrying the host-injected asset base path. When present it
/// takes priority over the statically configured public path.
pub const INJECTED_PUBLIC_PATH_GLOBAL: &str = "__INJECTED_PUBLIC_PATH_BY_GRAFT__";

/// Process environment variable mirroring [`POWERED_BY_HOST_GLOBAL`] for
/// native harnesses and tests.
pub const HOSTED_ENV: &str = "GRAFT_POWERED_BY_HOST";

/// Whether a host orchestrator is present and driving the lifecycle.
///
/// Resolved exactly once at the composition boundary; everything downstream
/// takes the mode as a plain value instead of re-reading globals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    /// A host orchestrator drives bootstrap/mount/unmount externally.
    Hosted,
    /// No host present; the application starts itself.
    Standalone,
}

impl ExecutionMode {
    /// Resolve the mode from the host-detection flag.
    pub fn from_flag(powered_by_host: bool) -> Self {
        let mode = if powered_by_host {
            Self::Hosted
        } else {
            Self::Standalone
        };
        tracing::debug!(mode = %mode, "execution mode resolved");
        mode
    }

    /// Resolve the mode from [`HOSTED_ENV`]. Unset or non-truthy means
    /// standalone.
    pub fn from_env() -> Self {
        let powered = std::env::var(HOSTED_ENV)
            .map(|v| matches!(v.trim(), "1" | "true"))
            .unwrap_or(false);
        Self::from_flag(powered)
    }

    pub fn is_hosted(self) -> bool {
        matches!(self, Self::Hosted)
    }
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hosted => write!(f, "hosted"),
            Self::Standalone => write!(f, "standalone"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_selects_mode() {
        assert_eq!(ExecutionMode::from_flag(true), ExecutionMode::Hosted);
        assert_eq!(ExecutionMode::from_flag(false), ExecutionMode::Standalone);
        assert!(ExecutionMode::from_flag(true).is_hosted());
        assert!(!ExecutionMode::from_flag(false).is_hosted());
    }

    #[test]
    fn display_is_snake_case() {
        assert_eq!(ExecutionMode::Hosted.to_string(), "hosted");
        assert_eq!(ExecutionMode::Standalone.to_string(), "standalone");
    }
}
