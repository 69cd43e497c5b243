//! Engine configuration.

use serde::{Deserialize, Serialize};

use crate::error::SwapError;
use crate::timeline::DEFAULT_DURATION_MS;

/// How a forced navigation treats a transition that is already running.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForcePolicy {
    /// Cancel the running transition (no commit) and start the new one.
    #[default]
    Restart,
    /// Never interrupt a running transition; `force` has no effect.
    Ignore,
}

/// Configuration for a swap engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwapConfig {
    /// Wrap around the ends of the drawable list.
    pub looping: bool,
    /// Length of one transition.
    pub duration_ms: u32,
    pub force_policy: ForcePolicy,
    /// Maximum dispatched events retained until the host drains them; 0 disables.
    pub event_log_capacity: usize,
}

impl Default for SwapConfig {
    fn default() -> Self {
        Self {
            looping: false,
            duration_ms: DEFAULT_DURATION_MS,
            force_policy: ForcePolicy::default(),
            event_log_capacity: 256,
        }
    }
}

/// Longest transition accepted; anything longer is almost certainly a units mistake.
const MAX_DURATION_MS: u32 = 60_000;

impl SwapConfig {
    /// Parse a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, SwapError> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), SwapError> {
        if self.duration_ms > MAX_DURATION_MS {
            return Err(SwapError::InvalidConfig {
                reason: format!(
                    "duration_ms must be at most {MAX_DURATION_MS}, got {}",
                    self.duration_ms
                ),
            });
        }
        Ok(())
    }

    #[inline]
    pub fn with_looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    #[inline]
    pub fn with_duration_ms(mut self, duration_ms: u32) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    #[inline]
    pub fn with_force_policy(mut self, policy: ForcePolicy) -> Self {
        self.force_policy = policy;
        self
    }

    #[inline]
    pub fn with_event_log_capacity(mut self, capacity: usize) -> Self {
        self.event_log_capacity = capacity;
        self
    }
}
