//! Contract between the window runtime and the application.
//!
//! An [`App`] receives a [`FrameCtx`] per redraw with the GPU surface, frame
//! timing and a [`RuntimeCtx`](crate::window::RuntimeCtx) for exit requests.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
