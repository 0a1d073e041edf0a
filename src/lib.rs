pub mod cli;
pub mod config;
pub mod render;
pub mod utils;
pub mod window;

// Re-export commonly used types
pub use cli::CliArgs;
pub use config::{ViewerConfig, WindowConfig};
pub use render::mesh::{build_quad, compute_quad_extents, QuadExtents, QuadGeometry};
pub use render::shaders::{compile_stage, create_program, ShaderError, ShaderStage};
pub use render::texture::{TextureAsset, TextureError};
pub use render::ImageRenderer;
pub use utils::error::ViewerError;
pub use window::{RedrawTracker, WindowContext};
