//! The contract between the runtime loop and a demo.
//!
//! Demos implement [`App`]; each redraw they receive a [`FrameCtx`] carrying
//! the window, GPU, input and timing for that frame.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
