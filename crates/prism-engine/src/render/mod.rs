//! Batch rendering engine.
//!
//! Shapes are tessellated into [`Primitive`](tessellate::Primitive)s, staged
//! in a fixed-capacity arena and drawn with one indexed draw per batch.
//! [`Renderer2D`] and [`Renderer3D`] are the public front ends; both sit on a
//! [`Batcher`] over any [`GraphicsDevice`](crate::device::GraphicsDevice).

pub mod arena;
pub mod batch;
pub mod camera;
pub mod limits;
pub mod renderer2d;
pub mod renderer3d;
pub mod slots;
pub mod stats;
pub mod tessellate;
pub mod texture;
pub mod vertex;

pub use arena::{CapacityExceeded, VertexArena};
pub use batch::{BatchState, Batcher};
pub use camera::{Camera, OrthographicCamera, PerspectiveCamera};
pub use limits::{BatchLimits, MAX_TEXTURE_SLOTS};
pub use renderer2d::{Renderer2D, SHADER_2D};
pub use renderer3d::{Renderer3D, SHADER_3D};
pub use slots::{SlotsFull, TextureSlotTable};
pub use stats::{RenderStats, ShapeKind};
pub use texture::Texture;
pub use vertex::{BatchVertex, MeshVertex, QuadVertex};
