//! Single-window runtime loop.
//!
//! Owns the `winit` event loop and the render window, and hands the app a
//! [`FrameCtx`](crate::core::FrameCtx) per redraw.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig, RuntimeCtx};
