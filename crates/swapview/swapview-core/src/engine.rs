//! Engine: drawable ownership, index bookkeeping and behavior dispatch.
//!
//! Methods:
//! - navigation: show_next, show_previous, cancel
//! - list edits: set_drawables, set_current_index, set_next, set_previous, seed
//! - host feed: tick, on_clock, on_layout, apply
//!
//! Every behavior call flows through `dispatch`, which also records the event in
//! the engine's [`Outputs`].

use std::fmt;

use crate::behavior::{NoopBehavior, SwapBehavior, SwapView};
use crate::config::{ForcePolicy, SwapConfig};
use crate::drawables::DrawableList;
use crate::error::SwapError;
use crate::events::{Outputs, SwapEvent};
use crate::inputs::SwapCommand;
use crate::ring;
use crate::surface::{Extent, Surfaces};
use crate::timeline::{ClockSignal, TimelineSignal, TransitionTimeline};

pub struct SwapEngine<D> {
    cfg: SwapConfig,
    drawables: DrawableList<D>,
    /// `None` until the list holds at least one drawable.
    current: Option<usize>,
    /// Direction of the running (or last) transition.
    reversing: bool,
    /// Index being swapped in. Inserts during a swap shift it with the list.
    target: Option<usize>,
    timeline: TransitionTimeline,
    surfaces: Surfaces<D>,
    behavior: Box<dyn SwapBehavior<D>>,
    outputs: Outputs,
}

impl<D: fmt::Debug> fmt::Debug for SwapEngine<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SwapEngine")
            .field("cfg", &self.cfg)
            .field("drawables", &self.drawables)
            .field("current", &self.current)
            .field("reversing", &self.reversing)
            .field("target", &self.target)
            .field("timeline", &self.timeline)
            .field("behavior", &self.behavior.name())
            .finish_non_exhaustive()
    }
}

impl<D: Clone + fmt::Debug> SwapEngine<D> {
    /// Create an engine with the logging-only default behavior.
    pub fn new(cfg: SwapConfig) -> Self {
        Self::with_behavior(cfg, Box::new(NoopBehavior))
    }

    /// Create an engine and attach `behavior` to it.
    pub fn with_behavior(cfg: SwapConfig, behavior: Box<dyn SwapBehavior<D>>) -> Self {
        let mut engine = Self {
            timeline: TransitionTimeline::new(cfg.duration_ms),
            cfg,
            drawables: DrawableList::new(),
            current: None,
            reversing: false,
            target: None,
            surfaces: Surfaces::default(),
            behavior,
            outputs: Outputs::default(),
        };
        engine.dispatch(SwapEvent::Attach);
        engine
    }

    /// Replace the host surface pair (e.g. when the host recreates its views).
    pub fn with_surfaces(mut self, surfaces: Surfaces<D>) -> Self {
        self.surfaces = surfaces;
        self
    }

    // ----- behavior -----

    /// Swap the active behavior. The new one is attached immediately; the
    /// previous one is dropped without notification.
    pub fn set_behavior(&mut self, behavior: Box<dyn SwapBehavior<D>>) {
        log::info!(
            "swap behavior {} -> {}",
            self.behavior.name(),
            behavior.name()
        );
        self.behavior = behavior;
        self.dispatch(SwapEvent::Attach);
    }

    pub fn behavior_name(&self) -> &'static str {
        self.behavior.name()
    }

    fn dispatch(&mut self, event: SwapEvent) {
        let view = SwapView::new(self.drawables.as_slice(), self.current, self.cfg.looping);
        let surfaces = &mut self.surfaces;
        match event {
            SwapEvent::Attach => self.behavior.on_attach(&view),
            SwapEvent::Reset => self.behavior.on_reset(&view, surfaces),
            SwapEvent::Start { reversing } => self.behavior.on_start(reversing, &view, surfaces),
            SwapEvent::Update {
                progress,
                reversing,
            } => self
                .behavior
                .on_update(progress, reversing, &view, surfaces),
            SwapEvent::End { reversing } => self.behavior.on_end(reversing, &view, surfaces),
            SwapEvent::Cancel => self.behavior.on_cancel(&view, surfaces),
        }
        self.outputs.push_event(event, self.cfg.event_log_capacity);
    }

    // ----- state queries -----

    pub fn config(&self) -> &SwapConfig {
        &self.cfg
    }

    /// Read-only snapshot of the engine state, as behaviors see it.
    pub fn view(&self) -> SwapView<'_, D> {
        SwapView::new(self.drawables.as_slice(), self.current, self.cfg.looping)
    }

    pub fn drawables(&self) -> &[D] {
        self.drawables.as_slice()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current_drawable(&self) -> Option<&D> {
        self.current.and_then(|c| self.drawables.get(c).ok())
    }

    /// Index `show_next` would move to; equals the current index at a non-looping end.
    pub fn next_index(&self) -> Option<usize> {
        let next = self
            .current
            .map(|c| ring::next(c, self.drawables.len(), self.cfg.looping));
        log::debug!("next index: {next:?} (current {:?})", self.current);
        next
    }

    /// Index `show_previous` would move to; equals the current index at a non-looping start.
    pub fn previous_index(&self) -> Option<usize> {
        let previous = self
            .current
            .map(|c| ring::previous(c, self.drawables.len(), self.cfg.looping));
        log::debug!("previous index: {previous:?} (current {:?})", self.current);
        previous
    }

    pub fn is_looping(&self) -> bool {
        self.cfg.looping
    }

    pub fn set_looping(&mut self, looping: bool) {
        log::debug!("looping: {looping}");
        self.cfg.looping = looping;
    }

    /// Takes effect from the next tick.
    pub fn set_duration_ms(&mut self, duration_ms: u32) {
        self.cfg.duration_ms = duration_ms;
        self.timeline.set_duration_ms(duration_ms);
    }

    pub fn is_swapping(&self) -> bool {
        self.timeline.is_running()
    }

    pub fn is_reversing(&self) -> bool {
        self.reversing
    }

    /// Completion fraction of the running transition. Stale when idle.
    pub fn progress(&self) -> f32 {
        self.timeline.progress()
    }

    pub fn surfaces(&self) -> &Surfaces<D> {
        &self.surfaces
    }

    /// Events dispatched since the last [`SwapEngine::take_outputs`].
    pub fn outputs(&self) -> &Outputs {
        &self.outputs
    }

    pub fn take_outputs(&mut self) -> Outputs {
        std::mem::take(&mut self.outputs)
    }

    // ----- list edits -----

    /// Replace the drawable list and move to `index` (clamped).
    pub fn set_drawables<I>(&mut self, index: usize, drawables: I) -> Result<(), SwapError>
    where
        I: IntoIterator<Item = D>,
    {
        self.drawables.replace_all(drawables);
        log::debug!("drawables replaced: {:?}", self.drawables);
        self.set_current_index(index)
    }

    /// Move to `index`, clamped into the list, and reset the behavior.
    pub fn set_current_index(&mut self, index: usize) -> Result<(), SwapError> {
        self.current = match self.drawables.len() {
            0 => None,
            len => Some(index.min(len - 1)),
        };
        log::debug!("current index: {index} -> {:?}", self.current);
        self.reset()
    }

    /// Insert `drawable` right after the current one. Does not start a transition.
    pub fn set_next(&mut self, drawable: D) {
        log::info!("next: {drawable:?}");
        let at = self.current.map_or(0, |c| c + 1);
        let at = self.drawables.insert_at(at, drawable);
        self.shift_target(at);
        self.current = Some(self.current.unwrap_or(0));
        log::debug!("current: {:?} => {:?}", self.current, self.drawables);
    }

    /// Insert `drawable` at the current position, shifting the current one right.
    /// Does not start a transition.
    pub fn set_previous(&mut self, drawable: D) {
        log::info!("previous: {drawable:?}");
        let at = self.current.unwrap_or(0);
        let at = self.drawables.insert_at(at, drawable);
        self.shift_target(at);
        self.current = Some(self.current.map_or(0, |c| c + 1));
        log::debug!("current: {:?} => {:?}", self.current, self.drawables);
    }

    fn shift_target(&mut self, inserted_at: usize) {
        if let Some(t) = self.target.as_mut() {
            if inserted_at <= *t {
                *t += 1;
            }
        }
    }

    /// Initial population: `src`, then optional neighbours on either side.
    pub fn seed(&mut self, src: D, prev: Option<D>, next: Option<D>) -> Result<(), SwapError> {
        self.set_next(src);
        if let Some(prev) = prev {
            self.set_previous(prev);
        }
        if let Some(next) = next {
            self.set_next(next);
        }
        self.reset()
    }

    // ----- host feed -----

    /// Host layout pass: record surface sizes and re-anchor.
    pub fn on_layout(&mut self, primary: Extent, secondary: Extent) -> Result<(), SwapError> {
        log::debug!("layout: primary={primary:?} secondary={secondary:?}");
        self.surfaces.primary.extent = primary;
        self.surfaces.secondary.extent = secondary;
        self.reset()
    }

    fn reset(&mut self) -> Result<(), SwapError> {
        self.surfaces.primary.image = match self.current {
            Some(c) => Some(self.drawables.get(c)?.clone()),
            None => None,
        };
        self.dispatch(SwapEvent::Reset);
        Ok(())
    }

    /// Advance a running transition by `dt` seconds. Returns whether it is still running.
    pub fn tick(&mut self, dt: f32) -> Result<bool, SwapError> {
        let signals = self.timeline.tick(dt);
        self.forward(signals)?;
        Ok(self.timeline.is_running())
    }

    /// Route a host clock signal. A repeat request is a contract violation.
    pub fn on_clock(&mut self, signal: ClockSignal) -> Result<bool, SwapError> {
        let signals = self.timeline.on_clock(signal).inspect_err(|err| {
            log::error!("host clock misuse: {err}");
        })?;
        self.forward(signals)?;
        Ok(self.timeline.is_running())
    }

    pub fn apply(&mut self, cmd: SwapCommand<D>) -> Result<(), SwapError> {
        match cmd {
            SwapCommand::ShowNext { force } => {
                self.show_next(force)?;
            }
            SwapCommand::ShowPrevious { force } => {
                self.show_previous(force)?;
            }
            SwapCommand::Cancel => {
                self.cancel();
            }
            SwapCommand::SetDrawables { index, drawables } => {
                self.set_drawables(index, drawables)?;
            }
            SwapCommand::SetCurrentIndex { index } => self.set_current_index(index)?,
            SwapCommand::SetNext { drawable } => self.set_next(drawable),
            SwapCommand::SetPrevious { drawable } => self.set_previous(drawable),
            SwapCommand::SetLooping { looping } => self.set_looping(looping),
            SwapCommand::Tick { dt } => {
                self.tick(dt)?;
            }
        }
        Ok(())
    }

    // ----- navigation -----

    /// Start swapping to the next drawable. Returns whether a transition started.
    ///
    /// While a transition runs this is ignored unless `force` is set; what
    /// `force` does then is governed by [`SwapConfig::force_policy`].
    pub fn show_next(&mut self, force: bool) -> Result<bool, SwapError> {
        log::info!("show next: force={force}");
        self.show(false, force)
    }

    /// Start swapping to the previous drawable. Returns whether a transition started.
    pub fn show_previous(&mut self, force: bool) -> Result<bool, SwapError> {
        log::info!("show previous: force={force}");
        self.show(true, force)
    }

    /// Tear down a running transition without committing. Returns whether one was running.
    pub fn cancel(&mut self) -> bool {
        let signals = self.timeline.cancel();
        if signals.is_empty() {
            return false;
        }
        self.target = None;
        self.dispatch(SwapEvent::Cancel);
        true
    }

    fn show(&mut self, reversing: bool, force: bool) -> Result<bool, SwapError> {
        if self.timeline.is_running() {
            if !force {
                log::debug!("swap in progress; navigation ignored");
                return Ok(false);
            }
            if self.cfg.force_policy == ForcePolicy::Ignore {
                log::warn!("swap in progress; forced navigation ignored by policy");
                return Ok(false);
            }
        }
        let Some(current) = self.current else {
            return Ok(false);
        };
        let target = if reversing {
            ring::previous(current, self.drawables.len(), self.cfg.looping)
        } else {
            ring::next(current, self.drawables.len(), self.cfg.looping)
        };
        if target == current {
            log::debug!("no movement from {current}");
            return Ok(false);
        }

        self.cancel();
        self.reversing = reversing;
        self.target = Some(target);
        self.surfaces.primary.image = Some(self.drawables.get(current)?.clone());
        self.surfaces.secondary.image = Some(self.drawables.get(target)?.clone());
        let signals = if reversing {
            self.timeline.reverse()
        } else {
            self.timeline.start()
        };
        self.forward(signals)?;
        Ok(true)
    }

    /// Translate timeline signals into behavior events.
    fn forward(&mut self, signals: Vec<TimelineSignal>) -> Result<(), SwapError> {
        let reversing = self.reversing;
        for signal in signals {
            match signal {
                TimelineSignal::Start => self.dispatch(SwapEvent::Start { reversing }),
                TimelineSignal::Update(progress) => self.dispatch(SwapEvent::Update {
                    progress,
                    reversing,
                }),
                TimelineSignal::End => {
                    self.commit();
                    self.dispatch(SwapEvent::End { reversing });
                    self.reset()?;
                }
                TimelineSignal::Cancel => {
                    self.target = None;
                    self.dispatch(SwapEvent::Cancel);
                }
            }
        }
        Ok(())
    }

    /// Move the cursor onto the drawable chosen when the swap started.
    /// A list replaced mid-swap clamps the target into the new list.
    fn commit(&mut self) {
        let target = self.target.take();
        self.current = match self.drawables.len() {
            0 => None,
            len => target.or(self.current).map(|t| t.min(len - 1)),
        };
        log::debug!("committed current index {:?}", self.current);
    }
}
