/// Cumulative renderer counters.
///
/// `draw_calls`, `vertex_count` and `index_count` grow on every successful
/// flush; the shape counters grow once per accepted draw call. Nothing is
/// cleared between batches or scenes; see
/// [`Batcher::reset_stats`](super::batch::Batcher::reset_stats).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub draw_calls: u32,
    pub vertex_count: u32,
    pub index_count: u32,

    pub quad_count: u32,
    pub triangle_count: u32,
    pub line_count: u32,
    pub circle_count: u32,

    pub cube_count: u32,
    pub sphere_count: u32,
    pub plane_count: u32,
    pub cylinder_count: u32,
}

/// Shape kinds with a dedicated counter.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Quad,
    Triangle,
    Line,
    Circle,
    Cube,
    Sphere,
    Plane,
    Cylinder,
}

impl RenderStats {
    pub fn record_shape(&mut self, kind: ShapeKind) {
        let counter = match kind {
            ShapeKind::Quad => &mut self.quad_count,
            ShapeKind::Triangle => &mut self.triangle_count,
            ShapeKind::Line => &mut self.line_count,
            ShapeKind::Circle => &mut self.circle_count,
            ShapeKind::Cube => &mut self.cube_count,
            ShapeKind::Sphere => &mut self.sphere_count,
            ShapeKind::Plane => &mut self.plane_count,
            ShapeKind::Cylinder => &mut self.cylinder_count,
        };
        *counter = counter.saturating_add(1);
    }

    pub(crate) fn record_flush(&mut self, vertices: usize, indices: usize) {
        self.draw_calls = self.draw_calls.saturating_add(1);
        self.vertex_count = self.vertex_count.saturating_add(vertices as u32);
        self.index_count = self.index_count.saturating_add(indices as u32);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flushes_accumulate() {
        let mut stats = RenderStats::default();
        stats.record_flush(4, 6);
        stats.record_flush(8, 12);
        assert_eq!((stats.draw_calls, stats.vertex_count, stats.index_count), (2, 12, 18));
    }

    #[test]
    fn reset_zeroes_everything() {
        let mut stats = RenderStats::default();
        stats.record_flush(4, 6);
        stats.record_shape(ShapeKind::Cylinder);
        stats.reset();
        assert_eq!(stats, RenderStats::default());
    }
}
