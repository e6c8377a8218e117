use crate::device::TextureId;

/// A texture created through a renderer.
///
/// Cheap to copy. Identity is the device handle; two textures with the same
/// pixels are still distinct.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Texture {
    id: TextureId,
    width: u32,
    height: u32,
}

impl Texture {
    pub(crate) const fn new(id: TextureId, width: u32, height: u32) -> Self {
        Self { id, width, height }
    }

    #[inline]
    pub const fn id(&self) -> TextureId {
        self.id
    }

    #[inline]
    pub const fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub const fn height(&self) -> u32 {
        self.height
    }
}
