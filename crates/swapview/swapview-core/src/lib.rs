//! Swapview Core (host-agnostic)
//!
//! Index bookkeeping and transition lifecycle for a view that swaps between an
//! ordered list of images. The crate owns the list, the current position and a
//! progress-driven timeline; the visual effect is delegated to a pluggable
//! [`SwapBehavior`]. Rendering, layout measurement and the frame clock belong
//! to the host, which drives the engine with [`SwapEngine::tick`] and reads
//! [`SwapEngine::surfaces`] back after every frame.

pub mod behavior;
pub mod config;
pub mod drawables;
pub mod engine;
pub mod error;
pub mod events;
pub mod inputs;
pub mod ring;
pub mod surface;
pub mod timeline;

// Re-exports for consumers (host adapters)
pub use behavior::{HorizontalSlide, NoopBehavior, SwapBehavior, SwapView};
pub use config::{ForcePolicy, SwapConfig};
pub use drawables::DrawableList;
pub use engine::SwapEngine;
pub use error::SwapError;
pub use events::{Outputs, SwapEvent};
pub use inputs::SwapCommand;
pub use surface::{Extent, Offset, Surface, SurfaceId, Surfaces};
pub use timeline::{ClockSignal, TimelineSignal, TimelineState, TransitionTimeline};

/// Swapview result type
pub type Result<T> = core::result::Result<T, SwapError>;
