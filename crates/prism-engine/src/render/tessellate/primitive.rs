/// Index pattern of a quad: two triangles sharing the 0-2 diagonal.
pub const QUAD_INDICES: [u32; 6] = [0, 1, 2, 2, 3, 0];

/// One unit of tessellated geometry.
///
/// Each variant knows its own index pattern; indices are relative to the
/// primitive's first vertex and rebased when written into a batch.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive<V> {
    /// Four corners, wound counter-clockwise.
    Quad([V; 4]),
    Triangle([V; 3]),
    /// Quads that must land in the same batch.
    QuadList(Vec<[V; 4]>),
}

impl<V: Copy> Primitive<V> {
    pub fn vertex_count(&self) -> usize {
        match self {
            Primitive::Quad(_) => 4,
            Primitive::Triangle(_) => 3,
            Primitive::QuadList(quads) => 4 * quads.len(),
        }
    }

    pub fn index_count(&self) -> usize {
        match self {
            Primitive::Quad(_) => 6,
            Primitive::Triangle(_) => 3,
            Primitive::QuadList(quads) => 6 * quads.len(),
        }
    }

    /// Applies `f` to every vertex.
    pub fn for_each_vertex_mut(&mut self, f: impl FnMut(&mut V)) {
        match self {
            Primitive::Quad(vs) => vs.iter_mut().for_each(f),
            Primitive::Triangle(vs) => vs.iter_mut().for_each(f),
            Primitive::QuadList(quads) => quads.iter_mut().flatten().for_each(f),
        }
    }

    /// Appends vertices and rebased indices. `base` is the index the first
    /// vertex will occupy.
    pub fn write_into(&self, base: u32, vertices: &mut Vec<V>, indices: &mut Vec<u32>) {
        match self {
            Primitive::Quad(vs) => {
                vertices.extend_from_slice(vs);
                indices.extend(QUAD_INDICES.iter().map(|i| base + i));
            }
            Primitive::Triangle(vs) => {
                vertices.extend_from_slice(vs);
                indices.extend([base, base + 1, base + 2]);
            }
            Primitive::QuadList(quads) => {
                for (q, quad) in quads.iter().enumerate() {
                    let quad_base = base + 4 * q as u32;
                    vertices.extend_from_slice(quad);
                    indices.extend(QUAD_INDICES.iter().map(|i| quad_base + i));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn written(p: &Primitive<u8>, base: u32) -> (Vec<u8>, Vec<u32>) {
        let (mut v, mut i) = (Vec::new(), Vec::new());
        p.write_into(base, &mut v, &mut i);
        (v, i)
    }

    #[test]
    fn quad_uses_fixed_pattern_rebased() {
        let (v, i) = written(&Primitive::Quad([0, 1, 2, 3]), 8);
        assert_eq!(v, vec![0, 1, 2, 3]);
        assert_eq!(i, vec![8, 9, 10, 10, 11, 8]);
    }

    #[test]
    fn triangle_has_no_padding_vertex() {
        let p = Primitive::Triangle([5, 6, 7]);
        assert_eq!((p.vertex_count(), p.index_count()), (3, 3));
        assert_eq!(written(&p, 4).1, vec![4, 5, 6]);
    }

    #[test]
    fn quad_list_counts_every_quad() {
        let p = Primitive::QuadList(vec![[0; 4]; 6]);
        assert_eq!((p.vertex_count(), p.index_count()), (24, 36));
        let (_, i) = written(&p, 0);
        assert_eq!(&i[30..], &[20, 21, 22, 22, 23, 20]);
    }

    #[test]
    fn for_each_vertex_visits_all() {
        let mut p = Primitive::QuadList(vec![[0u8; 4]; 3]);
        let mut n = 0;
        p.for_each_vertex_mut(|v| {
            *v = 1;
            n += 1;
        });
        assert_eq!(n, p.vertex_count());
    }
}
