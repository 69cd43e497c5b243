//! Pluggable swap behaviors.
//!
//! A behavior decides how transition progress maps to surface motion. The
//! engine owns index bookkeeping and calls the behavior at each lifecycle
//! point; the behavior reads engine state through a [`SwapView`] and may only
//! write to the surfaces it is handed.

use crate::ring;
use crate::surface::{Offset, Surfaces};

/// Read-only snapshot of engine state handed to every behavior callback.
#[derive(Clone, Copy, Debug)]
pub struct SwapView<'a, D> {
    drawables: &'a [D],
    current: Option<usize>,
    looping: bool,
}

impl<'a, D> SwapView<'a, D> {
    pub fn new(drawables: &'a [D], current: Option<usize>, looping: bool) -> Self {
        Self {
            drawables,
            current,
            looping,
        }
    }

    #[inline]
    pub fn drawables(&self) -> &'a [D] {
        self.drawables
    }

    #[inline]
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    #[inline]
    pub fn is_looping(&self) -> bool {
        self.looping
    }

    pub fn next_index(&self) -> Option<usize> {
        self.current
            .map(|c| ring::next(c, self.drawables.len(), self.looping))
    }

    pub fn previous_index(&self) -> Option<usize> {
        self.current
            .map(|c| ring::previous(c, self.drawables.len(), self.looping))
    }

    pub fn current_drawable(&self) -> Option<&'a D> {
        self.current.and_then(|c| self.drawables.get(c))
    }
}

/// Visual strategy driven by the swap engine.
///
/// Events for one transition arrive as `on_start`, any number of `on_update`
/// with non-decreasing `progress`, then exactly one of `on_end` or
/// `on_cancel`. After `on_end` the engine has already committed the new index
/// and follows up with `on_reset`.
pub trait SwapBehavior<D> {
    /// Called once when the behavior is installed on an engine.
    fn on_attach(&mut self, view: &SwapView<'_, D>);

    /// Re-anchor both surfaces; the primary surface already shows the current drawable.
    fn on_reset(&mut self, view: &SwapView<'_, D>, surfaces: &mut Surfaces<D>);

    /// A transition begins. The primary surface shows the current drawable and
    /// the secondary surface the one swapping in.
    fn on_start(&mut self, reversing: bool, view: &SwapView<'_, D>, surfaces: &mut Surfaces<D>);

    /// `progress` is the completion fraction in `[0, 1]` for either direction.
    fn on_update(
        &mut self,
        progress: f32,
        reversing: bool,
        view: &SwapView<'_, D>,
        surfaces: &mut Surfaces<D>,
    );

    fn on_end(&mut self, reversing: bool, view: &SwapView<'_, D>, surfaces: &mut Surfaces<D>);

    /// The transition was torn down; the current index was not committed.
    fn on_cancel(&mut self, view: &SwapView<'_, D>, surfaces: &mut Surfaces<D>);

    /// Optional name for debugging/logging.
    fn name(&self) -> &'static str {
        "unnamed"
    }
}

/// Default behavior: logs every callback and leaves surfaces untouched.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopBehavior;

impl<D> SwapBehavior<D> for NoopBehavior {
    fn on_attach(&mut self, view: &SwapView<'_, D>) {
        log::debug!("noop behavior attached at {:?}", view.current_index());
    }

    fn on_reset(&mut self, _view: &SwapView<'_, D>, _surfaces: &mut Surfaces<D>) {
        log::debug!("noop behavior reset");
    }

    fn on_start(&mut self, reversing: bool, _view: &SwapView<'_, D>, _surfaces: &mut Surfaces<D>) {
        log::debug!("noop behavior start: reversing={reversing}");
    }

    fn on_update(
        &mut self,
        progress: f32,
        reversing: bool,
        _view: &SwapView<'_, D>,
        _surfaces: &mut Surfaces<D>,
    ) {
        log::trace!("noop behavior update: progress={progress} reversing={reversing}");
    }

    fn on_end(&mut self, reversing: bool, _view: &SwapView<'_, D>, _surfaces: &mut Surfaces<D>) {
        log::debug!("noop behavior end: reversing={reversing}");
    }

    fn on_cancel(&mut self, _view: &SwapView<'_, D>, _surfaces: &mut Surfaces<D>) {
        log::debug!("noop behavior cancel");
    }

    fn name(&self) -> &'static str {
        "noop"
    }
}

/// Slides the current image out sideways while the next one slides in.
///
/// Forward swaps enter from the right and push the primary surface left;
/// reverse swaps mirror that. Between swaps the secondary surface is parked
/// below the primary one.
#[derive(Clone, Copy, Debug, Default)]
pub struct HorizontalSlide;

impl HorizontalSlide {
    fn anchor<D>(surfaces: &mut Surfaces<D>) {
        surfaces.primary.offset = Offset::ZERO;
        surfaces.secondary.offset = Offset::new(0.0, surfaces.primary.extent.height);
    }
}

impl<D> SwapBehavior<D> for HorizontalSlide {
    fn on_attach(&mut self, _view: &SwapView<'_, D>) {}

    fn on_reset(&mut self, _view: &SwapView<'_, D>, surfaces: &mut Surfaces<D>) {
        Self::anchor(surfaces);
    }

    fn on_start(&mut self, reversing: bool, _view: &SwapView<'_, D>, surfaces: &mut Surfaces<D>) {
        Self::anchor(surfaces);
        let entry = if reversing {
            -surfaces.secondary.extent.width
        } else {
            surfaces.primary.extent.width
        };
        surfaces.secondary.offset = Offset::new(entry, 0.0);
    }

    fn on_update(
        &mut self,
        progress: f32,
        reversing: bool,
        _view: &SwapView<'_, D>,
        surfaces: &mut Surfaces<D>,
    ) {
        let p = progress.clamp(0.0, 1.0);
        // exit direction of the primary surface
        let sign = if reversing { 1.0 } else { -1.0 };
        let primary_w = surfaces.primary.extent.width;
        let secondary_w = surfaces.secondary.extent.width;
        surfaces.primary.offset = Offset::new(sign * primary_w * p, 0.0);
        surfaces.secondary.offset = Offset::new(-sign * secondary_w * (1.0 - p), 0.0);
    }

    fn on_end(&mut self, reversing: bool, _view: &SwapView<'_, D>, _surfaces: &mut Surfaces<D>) {
        log::debug!("horizontal slide end: reversing={reversing}");
    }

    fn on_cancel(&mut self, _view: &SwapView<'_, D>, surfaces: &mut Surfaces<D>) {
        Self::anchor(surfaces);
    }

    fn name(&self) -> &'static str {
        "horizontal_slide"
    }
}
