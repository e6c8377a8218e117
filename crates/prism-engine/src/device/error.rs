/// Errors reported by a [`GraphicsDevice`](super::GraphicsDevice) implementation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeviceError {
    /// A handle was used that the device never created or already destroyed.
    #[error("unknown {kind} handle {id}")]
    UnknownHandle { kind: &'static str, id: u32 },

    /// Shader source was rejected by the backend compiler.
    #[error("shader `{label}` failed to compile: {message}")]
    ShaderCompilation { label: String, message: String },

    /// The bound shader does not declare the named uniform.
    #[error("uniform `{0}` is not declared by the bound shader")]
    UnknownUniform(String),

    /// A draw or uniform upload was issued with no shader bound.
    #[error("no shader is bound")]
    NoShaderBound,

    /// Texture bound past the sampler array.
    #[error("texture slot {slot} is outside the {max} sampler slots")]
    SlotOutOfRange { slot: u32, max: u32 },

    /// A buffer write would run past the end of the buffer.
    #[error("write of {len} bytes at offset {offset} overflows a {size}-byte buffer")]
    BufferOverflow { offset: u64, len: u64, size: u64 },

    /// Pixel data does not match the texture extent.
    #[error("texture data is {actual} bytes, expected {expected}")]
    TextureDataSize { expected: usize, actual: usize },

    /// A draw was issued before a render target was attached.
    #[error("no render target is attached")]
    NoRenderTarget,
}

/// High-level response after a surface error.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; rendering may resume next frame.
    Reconfigured,
    /// Transient error; skip the current frame.
    SkipFrame,
    /// Fatal error (commonly OOM); terminate gracefully.
    Fatal,
}
