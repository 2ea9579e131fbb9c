use clap::{Parser, ValueEnum};

/// Which scene the studio opens.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, ValueEnum)]
pub enum Demo {
    /// Editable cubic Bézier ribbons.
    #[default]
    Cubic,
    /// Quadratic Bézier curves filled analytically.
    Quadratic,
    /// Spinning cubes under a perspective camera.
    Cubes,
}

impl Demo {
    pub fn name(self) -> &'static str {
        match self {
            Demo::Cubic => "cubic",
            Demo::Quadratic => "quadratic",
            Demo::Cubes => "cubes",
        }
    }

    /// Object count used when `--count` is not given.
    pub fn default_count(self) -> usize {
        match self {
            Demo::Cubic => 10,
            Demo::Quadratic => 100,
            Demo::Cubes => 2000,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "tessera-studio", version, about = "Batch renderer and Bézier curve demos")]
pub struct Args {
    #[arg(value_enum, default_value_t = Demo::Cubic)]
    pub demo: Demo,

    /// Number of curves or cubes to spawn.
    #[arg(long)]
    pub count: Option<usize>,

    /// RNG seed; the clock is used when omitted.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log filter, e.g. `debug` or `tessera_engine=trace`.
    #[arg(long)]
    pub log: Option<String>,

    #[arg(long, default_value_t = 1280.0)]
    pub width: f64,

    #[arg(long, default_value_t = 720.0)]
    pub height: f64,
}

impl Args {
    pub fn count(&self) -> usize {
        self.count.unwrap_or_else(|| self.demo.default_count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_the_cubic_editor() {
        let args = Args::try_parse_from(["tessera-studio"]).unwrap();
        assert_eq!(args.demo, Demo::Cubic);
        assert_eq!(args.count(), 10);
        assert_eq!(args.seed, None);
        assert_eq!((args.width, args.height), (1280.0, 720.0));
    }

    #[test]
    fn explicit_count_overrides_demo_default() {
        let args = Args::try_parse_from(["tessera-studio", "cubes", "--count", "5", "--seed", "7"]).unwrap();
        assert_eq!(args.demo, Demo::Cubes);
        assert_eq!(args.count(), 5);
        assert_eq!(args.seed, Some(7));
    }

    #[test]
    fn demo_defaults() {
        assert_eq!(Demo::Quadratic.default_count(), 100);
        assert_eq!(Demo::Cubes.default_count(), 2000);
    }

    #[test]
    fn unknown_demo_is_rejected() {
        assert!(Args::try_parse_from(["tessera-studio", "spheres"]).is_err());
    }
}
