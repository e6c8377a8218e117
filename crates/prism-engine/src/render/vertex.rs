//! Vertex records written by the tessellator and uploaded verbatim at flush.

use std::fmt::Debug;

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};

use crate::device::{VertexAttribute, VertexFormat, VertexLayout};
use crate::paint::Color;

/// A vertex type the batcher can stage and upload.
pub trait BatchVertex: Pod + Debug {
    /// Interleaved attribute layout matching the batch shader's vertex input.
    const LAYOUT: VertexLayout;

    fn tex_index(&self) -> f32;

    /// Points the vertex at a sampler slot of the current batch.
    fn set_tex_index(&mut self, slot: u32);
}

/// 2D batch vertex.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct QuadVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
    pub tex_coord: [f32; 2],
    pub tex_index: f32,
}

impl QuadVertex {
    #[inline]
    pub fn new(position: Vec3, color: Color, tex_coord: Vec2) -> Self {
        Self {
            position: position.to_array(),
            color: color.to_array(),
            tex_coord: tex_coord.to_array(),
            tex_index: 0.0,
        }
    }
}

const QUAD_ATTRIBUTES: &[VertexAttribute] = &[
    VertexAttribute { location: 0, format: VertexFormat::Float32x3, offset: 0 },
    VertexAttribute { location: 1, format: VertexFormat::Float32x4, offset: 12 },
    VertexAttribute { location: 2, format: VertexFormat::Float32x2, offset: 28 },
    VertexAttribute { location: 3, format: VertexFormat::Float32, offset: 36 },
];

impl BatchVertex for QuadVertex {
    const LAYOUT: VertexLayout = VertexLayout {
        stride: std::mem::size_of::<QuadVertex>() as u32,
        attributes: QUAD_ATTRIBUTES,
    };

    #[inline]
    fn tex_index(&self) -> f32 {
        self.tex_index
    }

    #[inline]
    fn set_tex_index(&mut self, slot: u32) {
        self.tex_index = slot as f32;
    }
}

/// 3D batch vertex. Same prefix as [`QuadVertex`] plus a normal.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
    pub tex_coord: [f32; 2],
    pub tex_index: f32,
    pub normal: [f32; 3],
}

impl MeshVertex {
    #[inline]
    pub fn new(position: Vec3, color: Color, tex_coord: Vec2, normal: Vec3) -> Self {
        Self {
            position: position.to_array(),
            color: color.to_array(),
            tex_coord: tex_coord.to_array(),
            tex_index: 0.0,
            normal: normal.to_array(),
        }
    }
}

const MESH_ATTRIBUTES: &[VertexAttribute] = &[
    VertexAttribute { location: 0, format: VertexFormat::Float32x3, offset: 0 },
    VertexAttribute { location: 1, format: VertexFormat::Float32x4, offset: 12 },
    VertexAttribute { location: 2, format: VertexFormat::Float32x2, offset: 28 },
    VertexAttribute { location: 3, format: VertexFormat::Float32, offset: 36 },
    VertexAttribute { location: 4, format: VertexFormat::Float32x3, offset: 40 },
];

impl BatchVertex for MeshVertex {
    const LAYOUT: VertexLayout = VertexLayout {
        stride: std::mem::size_of::<MeshVertex>() as u32,
        attributes: MESH_ATTRIBUTES,
    };

    #[inline]
    fn tex_index(&self) -> f32 {
        self.tex_index
    }

    #[inline]
    fn set_tex_index(&mut self, slot: u32) {
        self.tex_index = slot as f32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_layout_is_packed(layout: VertexLayout) {
        let end = layout
            .attributes
            .iter()
            .map(|a| a.offset + a.format.size())
            .max()
            .unwrap_or(0);
        assert_eq!(end, layout.stride);
    }

    #[test]
    fn quad_vertex_layout_covers_struct() {
        assert_eq!(QuadVertex::LAYOUT.stride, 40);
        assert_layout_is_packed(QuadVertex::LAYOUT);
    }

    #[test]
    fn mesh_vertex_layout_covers_struct() {
        assert_eq!(MeshVertex::LAYOUT.stride, 52);
        assert_layout_is_packed(MeshVertex::LAYOUT);
    }

    #[test]
    fn tex_index_is_written_as_float() {
        let mut v = QuadVertex::new(Vec3::ZERO, Color::WHITE, Vec2::ZERO);
        v.set_tex_index(7);
        assert_eq!(v.tex_index(), 7.0);
    }
}
