use thiserror::Error;

use crate::render::mesh::GeometryError;
use crate::render::shaders::ShaderError;
use crate::render::texture::TextureError;

#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("Usage error: {0}")]
    Usage(String),

    #[error("Failed to initialize the window system: {0}")]
    WindowSystemInit(String),

    #[error("Failed to initialize the OpenGL context: {0}")]
    ContextInit(String),

    #[error("Failed to create the window: {0}")]
    WindowCreate(String),

    #[error(transparent)]
    Shader(#[from] ShaderError),

    #[error(transparent)]
    Texture(#[from] TextureError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

impl ViewerError {
    /// Process exit status for this failure. Every kind gets its own code.
    pub fn exit_code(&self) -> u8 {
        match self {
            ViewerError::Usage(_) => 64,
            ViewerError::WindowSystemInit(_) => 2,
            ViewerError::ContextInit(_) => 3,
            ViewerError::WindowCreate(_) => 4,
            ViewerError::Shader(err) if err.is_compile_failure() => 5,
            ViewerError::Shader(_) => 6,
            ViewerError::Texture(_) => 7,
            ViewerError::Geometry(_) => 8,
        }
    }
}

pub type Result<T> = std::result::Result<T, ViewerError>;
