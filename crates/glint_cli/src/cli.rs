use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Log levels accepted on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "glint")]
#[command(about = "Progressive ray tracer / path tracer for the lamp room scene")]
pub struct Args {
    /// Image width in pixels
    #[arg(long, default_value_t = 800)]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 600)]
    pub height: u32,

    /// Use Monte Carlo path tracing instead of Whitted ray tracing
    #[arg(short = 'p', long)]
    pub path_trace: bool,

    /// Stop after this many passes
    #[arg(short = 'n', long, default_value_t = 100)]
    pub passes: u64,

    /// Stop after this many seconds, even if passes remain
    #[arg(short = 't', long)]
    pub time: Option<f64>,

    /// Pixels sampled per pass
    #[arg(long, default_value_t = glint_renderer::DEFAULT_PATCH_SIZE)]
    pub patch_size: usize,

    /// Worker threads (0 = one per core)
    #[arg(short = 'j', long, default_value_t = 0)]
    pub threads: usize,

    /// Seed for the sampling streams
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Seed for the randomized object placement in the scene
    #[arg(long, default_value_t = 0)]
    pub scene_seed: u64,

    /// Output PNG path
    #[arg(short, long, default_value = "glint.png")]
    pub output: PathBuf,

    /// Set the logging level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["glint"]);
        assert_eq!(args.width, 800);
        assert_eq!(args.height, 600);
        assert!(!args.path_trace);
        assert_eq!(args.passes, 100);
        assert_eq!(args.patch_size, 50_000);
        assert_eq!(args.output, PathBuf::from("glint.png"));
    }

    #[test]
    fn test_flags() {
        let args = Args::parse_from([
            "glint",
            "--path-trace",
            "--width",
            "320",
            "-n",
            "7",
            "--time",
            "2.5",
            "--log-level",
            "debug",
        ]);
        assert!(args.path_trace);
        assert_eq!(args.width, 320);
        assert_eq!(args.passes, 7);
        assert_eq!(args.time, Some(2.5));
        assert_eq!(LevelFilter::from(args.log_level), LevelFilter::Debug);
    }
}
