//! gridpath-viz — animate Dijkstra / A* searches on an editable 20×20 grid.

mod app;
mod terminal;

use std::fs::File;
use std::time::Duration;

use clap::Parser;
use gridpath_search::Strategy;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

#[derive(Parser)]
#[command(name = "gridpath-viz", about = "Grid pathfinding visualizer")]
struct Args {
    /// Search strategy to start with ("dijkstra" or "aStar"). An
    /// unrecognized name leaves no strategy selected; pick one with the
    /// d / a keys.
    #[arg(short, long, default_value = "dijkstra")]
    algorithm: String,

    /// Delay between visited-cell animation steps, in milliseconds.
    #[arg(long, default_value_t = 10)]
    visit_delay_ms: u64,

    /// Delay between path-cell animation steps, in milliseconds.
    #[arg(long, default_value_t = 50)]
    path_delay_ms: u64,

    /// Write a debug log to gridpath-viz.log in the current directory.
    #[arg(long)]
    log: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if args.log {
        let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
        if let Ok(log_file) = File::create("gridpath-viz.log") {
            let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
        }
    }

    let strategy = Strategy::from_name(&args.algorithm);
    if strategy.is_none() {
        log::warn!("unrecognized algorithm {:?}; starting unselected", args.algorithm);
    }
    log::info!("gridpath-viz starting with strategy {:?}", strategy);

    app::run(
        strategy,
        Duration::from_millis(args.visit_delay_ms),
        Duration::from_millis(args.path_delay_ms),
    )
}
