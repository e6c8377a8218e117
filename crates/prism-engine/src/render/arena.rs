//! Fixed-capacity CPU staging for one batch.

use super::limits::BatchLimits;
use super::tessellate::Primitive;

/// A primitive did not fit in the remaining arena space.
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "primitive needs {vertices} vertices and {indices} indices, \
     {free_vertices} vertices and {free_indices} indices remain"
)]
pub struct CapacityExceeded {
    pub vertices: usize,
    pub indices: usize,
    pub free_vertices: usize,
    pub free_indices: usize,
}

/// Vertex and index staging with a bounded write cursor.
///
/// Storage is allocated once at construction. `append` never grows it;
/// `reset` rewinds the cursor and keeps the allocation.
#[derive(Debug)]
pub struct VertexArena<V> {
    vertices: Vec<V>,
    indices: Vec<u32>,
    max_vertices: usize,
    max_indices: usize,
}

impl<V: Copy> VertexArena<V> {
    pub fn new(limits: BatchLimits) -> Self {
        Self {
            vertices: Vec::with_capacity(limits.max_vertices()),
            indices: Vec::with_capacity(limits.max_indices()),
            max_vertices: limits.max_vertices(),
            max_indices: limits.max_indices(),
        }
    }

    /// Number of vertices written since the last reset; the write cursor.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    #[inline]
    pub fn vertices(&self) -> &[V] {
        &self.vertices
    }

    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Whether `primitive` fits in the space left in this batch.
    pub fn fits(&self, primitive: &Primitive<V>) -> bool {
        self.vertices.len() + primitive.vertex_count() <= self.max_vertices
            && self.indices.len() + primitive.index_count() <= self.max_indices
    }

    /// Whether `primitive` would fit in an empty arena.
    pub fn fits_empty(&self, primitive: &Primitive<V>) -> bool {
        primitive.vertex_count() <= self.max_vertices && primitive.index_count() <= self.max_indices
    }

    /// Writes `primitive` at the cursor. Nothing is written on error.
    pub fn append(&mut self, primitive: &Primitive<V>) -> Result<(), CapacityExceeded> {
        if !self.fits(primitive) {
            return Err(CapacityExceeded {
                vertices: primitive.vertex_count(),
                indices: primitive.index_count(),
                free_vertices: self.max_vertices - self.vertices.len(),
                free_indices: self.max_indices - self.indices.len(),
            });
        }
        let base = self.vertices.len() as u32;
        primitive.write_into(base, &mut self.vertices, &mut self.indices);
        Ok(())
    }

    /// Rewinds the cursor to the start of the arena.
    pub fn reset(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }
}
