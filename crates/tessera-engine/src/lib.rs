//! Tessera engine crate.
//!
//! Platform runtime, GPU device handling and the batch renderer, plus the
//! curve geometry used by the studio demos.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod math;
pub mod scene;
pub mod curves;
pub mod render;
