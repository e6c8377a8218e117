use crate::device::TextureId;

use super::limits::MAX_TEXTURE_SLOTS;

/// Every sampler slot of the current batch is taken.
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
#[error("all {MAX_TEXTURE_SLOTS} texture slots are in use")]
pub struct SlotsFull;

/// Maps texture handles to sampler slots for one batch.
///
/// Slot 0 always holds the white texture. Other slots are only valid until
/// the next [`reset`](Self::reset).
#[derive(Debug, Clone)]
pub struct TextureSlotTable {
    slots: [TextureId; MAX_TEXTURE_SLOTS],
    active: usize,
}

impl TextureSlotTable {
    pub fn new(white: TextureId) -> Self {
        Self {
            slots: [white; MAX_TEXTURE_SLOTS],
            active: 1,
        }
    }

    #[inline]
    pub fn white(&self) -> TextureId {
        self.slots[0]
    }

    /// Number of occupied slots, including slot 0.
    #[inline]
    pub fn active_count(&self) -> usize {
        self.active
    }

    /// Returns the slot already holding `texture`, or claims the next free one.
    ///
    /// Matching is by handle identity. The white texture always resolves to 0.
    pub fn get_or_assign(&mut self, texture: TextureId) -> Result<u32, SlotsFull> {
        if texture == self.white() {
            return Ok(0);
        }
        if let Some(slot) = self.slots[1..self.active].iter().position(|&t| t == texture) {
            return Ok(slot as u32 + 1);
        }
        if self.active == MAX_TEXTURE_SLOTS {
            return Err(SlotsFull);
        }
        let slot = self.active;
        self.slots[slot] = texture;
        self.active += 1;
        Ok(slot as u32)
    }

    pub fn contains(&self, texture: TextureId) -> bool {
        self.slots[..self.active].contains(&texture)
    }

    /// Occupied slots in slot order.
    pub fn iter_active(&self) -> impl Iterator<Item = (u32, TextureId)> + '_ {
        self.slots[..self.active]
            .iter()
            .enumerate()
            .map(|(slot, &texture)| (slot as u32, texture))
    }

    /// Drops every slot except the white texture.
    pub fn reset(&mut self) {
        let white = self.white();
        self.slots[1..].fill(white);
        self.active = 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: TextureId = TextureId(1);

    #[test]
    fn starts_with_white_only() {
        let table = TextureSlotTable::new(WHITE);
        assert_eq!(table.iter_active().collect::<Vec<_>>(), vec![(0, WHITE)]);
    }

    #[test]
    fn same_handle_reuses_slot() {
        let mut table = TextureSlotTable::new(WHITE);
        assert_eq!(table.get_or_assign(TextureId(10)), Ok(1));
        assert_eq!(table.get_or_assign(TextureId(11)), Ok(2));
        assert_eq!(table.get_or_assign(TextureId(10)), Ok(1));
        assert_eq!(table.active_count(), 3);
    }

    #[test]
    fn white_resolves_to_slot_zero() {
        let mut table = TextureSlotTable::new(WHITE);
        assert_eq!(table.get_or_assign(WHITE), Ok(0));
        assert_eq!(table.active_count(), 1);
    }

    #[test]
    fn thirty_second_user_texture_is_refused() {
        let mut table = TextureSlotTable::new(WHITE);
        for i in 0..31 {
            assert_eq!(table.get_or_assign(TextureId(100 + i)), Ok(i + 1));
        }
        assert_eq!(table.get_or_assign(TextureId(500)), Err(SlotsFull));
        // Known handles still resolve when full.
        assert_eq!(table.get_or_assign(TextureId(100)), Ok(1));
    }

    #[test]
    fn reset_keeps_white() {
        let mut table = TextureSlotTable::new(WHITE);
        table.get_or_assign(TextureId(7)).unwrap();
        table.reset();
        assert!(!table.contains(TextureId(7)));
        assert_eq!(table.white(), WHITE);
        assert_eq!(table.get_or_assign(TextureId(8)), Ok(1));
    }
}
