//! Behavior lifecycle events and the engine's event log.
//!
//! Every call the engine makes into a [`crate::SwapBehavior`] is first
//! described as a [`SwapEvent`] and dispatched by pattern match, then recorded
//! in [`Outputs`] so hosts can observe the lifecycle without a custom behavior.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SwapEvent {
    Attach,
    Reset,
    Start { reversing: bool },
    Update { progress: f32, reversing: bool },
    End { reversing: bool },
    Cancel,
}

impl SwapEvent {
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Attach => "attach",
            Self::Reset => "reset",
            Self::Start { .. } => "start",
            Self::Update { .. } => "update",
            Self::End { .. } => "end",
            Self::Cancel => "cancel",
        }
    }

    /// True for events that close a transition.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::End { .. } | Self::Cancel)
    }
}

/// Events dispatched since the host last drained them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Outputs {
    #[serde(default)]
    pub events: VecDeque<SwapEvent>,
    /// Events dropped because the log was at capacity.
    #[serde(default)]
    pub dropped: usize,
}

impl Outputs {
    #[inline]
    pub fn clear(&mut self) {
        self.events.clear();
        self.dropped = 0;
    }

    /// Append `event`, dropping the oldest entry when `capacity` is reached.
    /// A zero capacity disables recording.
    ///
    /// Overflow is reported once per drain cycle; later drops only bump `dropped`.
    pub fn push_event(&mut self, event: SwapEvent, capacity: usize) {
        if capacity == 0 {
            return;
        }
        while self.events.len() >= capacity {
            self.events.pop_front();
            if self.dropped == 0 {
                log::warn!("swap event log full (capacity {capacity}); dropping oldest");
            }
            self.dropped += 1;
        }
        self.events.push_back(event);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
