pub mod mesh;
pub mod pipeline;
pub mod shaders;
pub mod texture;

pub use pipeline::ImageRenderer;
pub use shaders::{GlDriver, ShaderDriver, ShaderProgram};
