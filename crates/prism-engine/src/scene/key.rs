use super::ZIndex;

/// Paint-order key: layer first, then insertion order within the layer.
///
/// Field order matters; the derived ordering compares `z` before `order`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct SortKey {
    pub z: ZIndex,
    pub order: u32,
}

impl SortKey {
    #[inline]
    pub const fn new(z: ZIndex, order: u32) -> Self {
        Self { z, order }
    }
}
