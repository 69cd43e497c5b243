//! Opaque rendering surfaces managed by the host.
//!
//! The engine binds drawables to surfaces and behaviors move them around; the
//! host reads both back after each tick and does the actual drawing.

use serde::{Deserialize, Serialize};

/// Host-chosen surface handle. Never interpreted by the engine.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct SurfaceId(pub u32);

/// Translation applied to a surface, in host units.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Offset {
    pub x: f32,
    pub y: f32,
}

impl Offset {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Measured size reported by the host layout pass.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub width: f32,
    pub height: f32,
}

impl Extent {
    #[inline]
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Surface<D> {
    pub id: SurfaceId,
    pub image: Option<D>,
    pub offset: Offset,
    pub extent: Extent,
}

impl<D> Surface<D> {
    pub fn new(id: SurfaceId) -> Self {
        Self {
            id,
            image: None,
            offset: Offset::ZERO,
            extent: Extent::default(),
        }
    }
}

/// The primary (shown) and secondary (swapping in) surfaces.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Surfaces<D> {
    pub primary: Surface<D>,
    pub secondary: Surface<D>,
}

impl<D> Surfaces<D> {
    pub fn new(primary: SurfaceId, secondary: SurfaceId) -> Self {
        Self {
            primary: Surface::new(primary),
            secondary: Surface::new(secondary),
        }
    }
}

impl<D> Default for Surfaces<D> {
    fn default() -> Self {
        Self::new(SurfaceId(0), SurfaceId(1))
    }
}
