//! Recorded 2D draw streams.
//!
//! Responsibilities:
//! - store draw commands for later replay into a [`Renderer2D`](crate::render::Renderer2D)
//! - provide deterministic ordering (z-index + insertion order)
//! - make any reordering beyond that an explicit caller choice ([`ReplayOrder`])

mod cmd;
mod key;
mod list;
mod z_index;

pub use cmd::{DrawCmd, TextureFill};
pub use key::SortKey;
pub use list::{DrawItem, DrawList, ReplayOrder};
pub use z_index::ZIndex;
