pub mod context;
pub mod redraw;

pub use context::WindowContext;
pub use redraw::RedrawTracker;
