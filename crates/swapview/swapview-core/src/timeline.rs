//! Single-progress transition timeline.
//!
//! The timeline is a pure state machine: it owns no thread and never blocks.
//! The host feeds it frame deltas via [`TransitionTimeline::tick`] (or raw
//! progress via [`TransitionTimeline::advance`]) and the commands
//! start/reverse/cancel. Each input returns the lifecycle signals it produced,
//! in order.
//!
//! Invariants:
//! 1. A run emits `Start`, zero or more `Update` with non-decreasing progress,
//!    then exactly one of `End` or `Cancel`.
//! 2. `start`/`reverse` while running are no-ops.
//! 3. Progress is the completion fraction in `[0, 1]` for both directions;
//!    `is_reversing` says which way the run goes.

use serde::{Deserialize, Serialize};

use crate::error::SwapError;

/// Host animator default duration.
pub const DEFAULT_DURATION_MS: u32 = 300;

/// Playback state of the timeline.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimelineState {
    Idle,
    RunningForward,
    RunningReverse,
}

impl TimelineState {
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::RunningForward => "running_forward",
            Self::RunningReverse => "running_reverse",
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        !matches!(self, Self::Idle)
    }
}

/// Lifecycle signal emitted by the timeline.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum TimelineSignal {
    Start,
    Update(f32),
    End,
    Cancel,
}

/// Signals the host frame clock may deliver.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ClockSignal {
    /// A frame elapsed; `dt` in seconds.
    Frame { dt: f32 },
    /// The host asked the current run to repeat. Never legitimate.
    Repeat,
}

#[derive(Clone, Debug)]
pub struct TransitionTimeline {
    state: TimelineState,
    progress: f32,
    duration_ms: u32,
}

impl Default for TransitionTimeline {
    fn default() -> Self {
        Self::new(DEFAULT_DURATION_MS)
    }
}

impl TransitionTimeline {
    pub fn new(duration_ms: u32) -> Self {
        Self {
            state: TimelineState::Idle,
            progress: 0.0,
            duration_ms,
        }
    }

    #[inline]
    pub fn state(&self) -> TimelineState {
        self.state
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    #[inline]
    pub fn is_reversing(&self) -> bool {
        matches!(self.state, TimelineState::RunningReverse)
    }

    /// Completion fraction of the current run. Stale after a cancel.
    #[inline]
    pub fn progress(&self) -> f32 {
        self.progress
    }

    #[inline]
    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    /// Takes effect from the next tick; a running transition keeps its progress.
    pub fn set_duration_ms(&mut self, duration_ms: u32) {
        self.duration_ms = duration_ms;
    }

    /// Begin a forward run. No-op while running.
    pub fn start(&mut self) -> Vec<TimelineSignal> {
        self.begin(TimelineState::RunningForward)
    }

    /// Begin a reverse run. No-op while running.
    pub fn reverse(&mut self) -> Vec<TimelineSignal> {
        self.begin(TimelineState::RunningReverse)
    }

    fn begin(&mut self, state: TimelineState) -> Vec<TimelineSignal> {
        if self.is_running() {
            log::debug!("timeline already {}; {} ignored", self.state.name(), state.name());
            return Vec::new();
        }
        self.state = state;
        self.progress = 0.0;
        vec![TimelineSignal::Start]
    }

    /// Abort the current run without reaching `End`.
    pub fn cancel(&mut self) -> Vec<TimelineSignal> {
        if !self.is_running() {
            return Vec::new();
        }
        self.state = TimelineState::Idle;
        vec![TimelineSignal::Cancel]
    }

    /// Advance by a frame delta in seconds.
    pub fn tick(&mut self, dt: f32) -> Vec<TimelineSignal> {
        if !self.is_running() {
            return Vec::new();
        }
        let delta = if self.duration_ms == 0 {
            1.0
        } else {
            dt * 1000.0 / self.duration_ms as f32
        };
        // a frame longer than the whole run completes it; NaN is left for `advance` to drop
        if delta.is_nan() {
            return self.advance(delta);
        }
        self.advance(delta.min(1.0))
    }

    /// Advance by a raw progress delta. Negative or non-finite deltas are ignored.
    pub fn advance(&mut self, delta: f32) -> Vec<TimelineSignal> {
        if !self.is_running() || !delta.is_finite() || delta < 0.0 {
            return Vec::new();
        }
        self.progress = (self.progress + delta).min(1.0);
        log::trace!("timeline {} progress={}", self.state.name(), self.progress);
        let mut signals = vec![TimelineSignal::Update(self.progress)];
        if self.progress >= 1.0 {
            self.state = TimelineState::Idle;
            signals.push(TimelineSignal::End);
        }
        signals
    }

    /// Route a host clock signal.
    pub fn on_clock(&mut self, signal: ClockSignal) -> Result<Vec<TimelineSignal>, SwapError> {
        match signal {
            ClockSignal::Frame { dt } => Ok(self.tick(dt)),
            ClockSignal::Repeat => Err(SwapError::RepeatUnsupported),
        }
    }
}
