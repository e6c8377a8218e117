//! Color model shared by the batchers and the frame clear.

pub mod color;

pub use color::Color;
