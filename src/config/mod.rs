pub mod viewer;

pub use viewer::{load_or_create_config, ViewerConfig, WindowConfig};
