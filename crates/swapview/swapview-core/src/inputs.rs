//! Input contracts for hosts that marshal engine calls as data.
//!
//! Adapters (e.g. a wasm or ECS bridge) deserialize these and hand them to
//! [`crate::SwapEngine::apply`]. Each variant maps onto one public engine method.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SwapCommand<D> {
    ShowNext {
        #[serde(default)]
        force: bool,
    },
    ShowPrevious {
        #[serde(default)]
        force: bool,
    },
    Cancel,
    SetDrawables {
        index: usize,
        drawables: Vec<D>,
    },
    SetCurrentIndex {
        index: usize,
    },
    SetNext {
        drawable: D,
    },
    SetPrevious {
        drawable: D,
    },
    SetLooping {
        looping: bool,
    },
    Tick {
        dt: f32,
    },
}
