/// Number of sampler slots a batch can reference. Slot 0 is the white texture.
pub const MAX_TEXTURE_SLOTS: usize = 32;

/// Per-batch capacity, fixed for the lifetime of a batcher.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BatchLimits {
    max_quads: usize,
}

impl BatchLimits {
    pub const DEFAULT_MAX_QUADS: usize = 20_000;

    /// Limits sized for `max_quads` quads per batch. At least one quad is always allowed.
    pub const fn new(max_quads: usize) -> Self {
        Self {
            max_quads: if max_quads == 0 { 1 } else { max_quads },
        }
    }

    #[inline]
    pub const fn max_quads(&self) -> usize {
        self.max_quads
    }

    #[inline]
    pub const fn max_vertices(&self) -> usize {
        self.max_quads * 4
    }

    #[inline]
    pub const fn max_indices(&self) -> usize {
        self.max_quads * 6
    }
}

impl Default for BatchLimits {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_QUADS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_capacities() {
        let limits = BatchLimits::default();
        assert_eq!(limits.max_quads(), 20_000);
        assert_eq!(limits.max_vertices(), 80_000);
        assert_eq!(limits.max_indices(), 120_000);
    }

    #[test]
    fn zero_quads_is_raised_to_one() {
        assert_eq!(BatchLimits::new(0).max_quads(), 1);
    }
}
