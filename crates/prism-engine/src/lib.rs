//! Prism engine crate.
//!
//! A batched immediate-mode renderer: shapes submitted through
//! [`render::Renderer2D`] and [`render::Renderer3D`] are tessellated into a
//! fixed-capacity staging arena and drawn with as few indexed draws as
//! capacity and texture slots allow. The GPU is reached only through
//! [`device::GraphicsDevice`]; [`device::WgpuDevice`] drives a real surface
//! and [`device::HeadlessDevice`] records calls for inspection.

pub mod core;
pub mod device;
pub mod logging;
pub mod paint;
pub mod render;
pub mod scene;
pub mod time;
pub mod window;
