mod args;
mod cube;
mod cubes;
mod editor;
mod fps;

use anyhow::Result;
use clap::Parser;
use winit::dpi::LogicalSize;

use tessera_engine::device::GpuInit;
use tessera_engine::logging::{init_logging, LoggingConfig};
use tessera_engine::math::Rng;
use tessera_engine::window::{Runtime, RuntimeConfig};

use crate::args::{Args, Demo};
use crate::cubes::CubesApp;
use crate::editor::CurveEditorApp;

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(LoggingConfig {
        env_filter: args.log.clone(),
        ..LoggingConfig::default()
    });

    let rng = match args.seed {
        Some(seed) => Rng::new(seed),
        None => Rng::from_time(),
    };
    let count = args.count();

    let config = RuntimeConfig {
        title: format!("tessera · {}", args.demo.name()),
        initial_size: LogicalSize::new(args.width, args.height),
    };
    log::info!("starting {} demo with {count} objects", args.demo.name());

    match args.demo {
        Demo::Cubic => Runtime::run(config, GpuInit::default(), CurveEditorApp::cubic(rng, count)),
        Demo::Quadratic => Runtime::run(config, GpuInit::default(), CurveEditorApp::quadratic(rng, count)),
        Demo::Cubes => Runtime::run(config, GpuInit::default(), CubesApp::new(rng, count)),
    }
}
