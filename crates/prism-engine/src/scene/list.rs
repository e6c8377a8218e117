use crate::device::GraphicsDevice;
use crate::render::{Renderer2D, ShapeKind};

use super::{DrawCmd, SortKey, ZIndex};

/// A single draw item: sort key + command.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub key: SortKey,
    pub cmd: DrawCmd,
}

/// Order in which [`DrawList::replay`] issues commands.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum ReplayOrder {
    /// Ascending z, then insertion order. With a single z layer this is
    /// exactly the order the commands were pushed.
    #[default]
    PaintOrder,
    /// Paint order, then stably regrouped by shape family (quads, triangles,
    /// lines, round shapes).
    ///
    /// **Changes what is painted on top**: a circle pushed before a quad ends
    /// up over it. Only use this when overlapping shapes do not matter.
    GroupByShape,
}

/// Recorded draw stream for a frame.
///
/// Performance characteristics:
/// - `push()` is O(1)
/// - ordering reuses an internal index buffer; no per-frame allocation once warmed
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawItem>,
    next_order: u32,

    sorted_indices: Vec<usize>,
    sorted_dirty: bool,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears recorded items. Keeps allocated capacity for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
        self.next_order = 0;
        self.sorted_dirty = true;
        self.sorted_indices.clear();
    }

    /// Returns items in insertion order.
    #[inline]
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Pushes a draw command with the given z-index.
    #[inline]
    pub fn push(&mut self, z: ZIndex, cmd: DrawCmd) {
        let order = self.next_order;
        self.next_order = self.next_order.wrapping_add(1);

        self.items.push(DrawItem {
            key: SortKey::new(z, order),
            cmd,
        });

        self.sorted_dirty = true;
    }

    /// Returns indices into `items` in paint order (back-to-front).
    pub fn indices_in_paint_order(&mut self) -> &[usize] {
        if self.sorted_dirty {
            self.rebuild_sorted_indices();
        }
        &self.sorted_indices
    }

    /// Iterates items in paint order without cloning draw commands.
    pub fn iter_in_paint_order(&mut self) -> impl Iterator<Item = &DrawItem> {
        if self.sorted_dirty {
            self.rebuild_sorted_indices();
        }

        self.sorted_indices.iter().map(|&i| &self.items[i])
    }

    /// Issues every recorded command into `renderer`, which must have an
    /// active scene. The list itself is left untouched.
    pub fn replay<D: GraphicsDevice>(&mut self, renderer: &mut Renderer2D<D>, order: ReplayOrder) {
        if self.sorted_dirty {
            self.rebuild_sorted_indices();
        }

        match order {
            ReplayOrder::PaintOrder => {
                for &i in &self.sorted_indices {
                    self.items[i].cmd.replay(renderer);
                }
            }
            ReplayOrder::GroupByShape => {
                log::debug!(
                    "replaying {} draw commands grouped by shape; paint order is not preserved",
                    self.items.len()
                );
                let mut grouped = self.sorted_indices.clone();
                grouped.sort_by_key(|&i| shape_rank(self.items[i].cmd.kind()));
                for i in grouped {
                    self.items[i].cmd.replay(renderer);
                }
            }
        }
    }

    fn rebuild_sorted_indices(&mut self) {
        self.sorted_indices.clear();
        self.sorted_indices.extend(0..self.items.len());

        // Stable ordering is ensured by SortKey including insertion order.
        self.sorted_indices
            .sort_by(|&a, &b| self.items[a].key.cmp(&self.items[b].key));

        self.sorted_dirty = false;
    }
}

fn shape_rank(kind: ShapeKind) -> u8 {
    match kind {
        ShapeKind::Quad => 0,
        ShapeKind::Triangle => 1,
        ShapeKind::Line => 2,
        ShapeKind::Circle => 3,
        ShapeKind::Cube | ShapeKind::Sphere | ShapeKind::Plane | ShapeKind::Cylinder => 4,
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::paint::Color;

    #[test]
    fn paint_order_sorts_by_z_then_insertion() {
        let mut list = DrawList::new();
        list.push(ZIndex(1), DrawCmd::quad(Vec2::ZERO, Vec2::ONE, Color::RED));
        list.push(ZIndex(0), DrawCmd::quad(Vec2::ZERO, Vec2::ONE, Color::GREEN));
        list.push(ZIndex(1), DrawCmd::quad(Vec2::ZERO, Vec2::ONE, Color::BLUE));
        assert_eq!(list.indices_in_paint_order(), &[1, 0, 2]);
    }

    #[test]
    fn clear_resets_order() {
        let mut list = DrawList::new();
        list.push(ZIndex(0), DrawCmd::quad(Vec2::ZERO, Vec2::ONE, Color::RED));
        list.clear();
        assert!(list.is_empty());
        list.push(ZIndex(0), DrawCmd::quad(Vec2::ZERO, Vec2::ONE, Color::RED));
        assert_eq!(list.items()[0].key.order, 0);
    }

    #[test]
    fn shape_ranks_group_quads_first() {
        assert!(shape_rank(ShapeKind::Quad) < shape_rank(ShapeKind::Circle));
        assert!(shape_rank(ShapeKind::Triangle) < shape_rank(ShapeKind::Line));
    }
}
