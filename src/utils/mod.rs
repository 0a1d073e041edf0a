pub mod error;

pub use error::ViewerError;
