use std::io;
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{Context, bail};
use burrow_core::{Catalog, Coord, MazeDriver, SelectionMode, Tick};
use clap::{Parser, ValueEnum};

mod render;
mod settings;

use render::{EventWriter, WallModel};
use settings::{MAX_DIMENSION, Settings};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// TOML file with generation settings, flags take precedence
    #[arg(short = 'c', long)]
    settings: Option<PathBuf>,

    #[arg(short = 'W', long, value_parser = clap::value_parser!(u16).range(1..=MAX_DIMENSION as i64))]
    width: Option<Coord>,

    #[arg(short = 'H', long, value_parser = clap::value_parser!(u16).range(1..=MAX_DIMENSION as i64))]
    height: Option<Coord>,

    /// Seconds to wait between steps when animating
    #[arg(short, long)]
    delay: Option<f32>,

    /// Algorithm index or name, see --list
    #[arg(short, long)]
    algorithm: Option<String>,

    /// Cell selection for growing tree
    #[arg(short, long, value_enum)]
    mode: Option<Mode>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Redraw the maze after every step
    #[arg(long)]
    animate: bool,

    /// Print every event as a JSON line instead of the finished maze
    #[arg(long, conflicts_with = "animate")]
    events: bool,

    /// List the available algorithms and exit
    #[arg(long)]
    list: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
    Newest,
    Random,
}

impl From<Mode> for SelectionMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Newest => SelectionMode::Newest,
            Mode::Random => SelectionMode::Random,
        }
    }
}

fn resolve_algorithm(catalog: &Catalog, name: &str) -> anyhow::Result<usize> {
    if let Ok(index) = name.parse::<usize>() {
        catalog.get(index)?;
        return Ok(index);
    }
    match catalog.position(name) {
        Some(index) => Ok(index),
        None => bail!("unknown algorithm {name:?}, use --list to see the available ones"),
    }
}

fn print_catalog(catalog: &Catalog) {
    for (index, entry) in catalog.iter().enumerate() {
        println!("{index}: {}", entry.name);
        println!("   {}", entry.description);
        println!("   {}", entry.use_case);
    }
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let catalog = Catalog::standard();
    if args.list {
        print_catalog(&catalog);
        return Ok(());
    }

    let mut settings = match &args.settings {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    if let Some(width) = args.width {
        settings.width = width;
    }
    if let Some(height) = args.height {
        settings.height = height;
    }
    if let Some(delay) = args.delay {
        settings.generation_delay = delay;
    }
    if let Some(name) = &args.algorithm {
        settings.maze_index = resolve_algorithm(&catalog, name)?;
    }
    if let Some(mode) = args.mode {
        settings.mode = Some(mode.into());
    }
    if args.seed.is_some() {
        settings.seed = args.seed;
    }
    settings.validate()?;

    let mut request = settings.to_request();
    if !args.animate && !args.events {
        // Pauses only matter to someone watching.
        request = request.with_delay(Duration::ZERO);
    } else if args.animate && request.step_delay.is_zero() {
        log::warn!("animating with no delay between steps");
    }

    let mut driver = MazeDriver::new(catalog, time_seed());
    let algorithm = driver.request(request)?;
    let seed = driver.active_request().and_then(|request| request.seed);

    if args.events {
        let mut writer = EventWriter::new(io::stdout().lock());
        driver.run_to_completion(&mut writer);
        writer.finish().context("Could not write events")?;
    } else {
        let mut walls = WallModel::new(request.size);
        while let Tick::Paused(pause) = driver.tick(&mut walls) {
            if args.animate {
                print!("\x1b[2J\x1b[H{walls}");
                thread::sleep(pause);
            }
        }
        if driver.is_complete() {
            walls.open_entrance_and_exit();
        }
        if args.animate {
            print!("\x1b[2J\x1b[H");
        }
        print!("{walls}");
    }

    if let Some(grid) = driver.grid() {
        log::info!(
            "{} carved a {}x{} maze with {} passages (seed {})",
            algorithm.name(),
            grid.width(),
            grid.height(),
            grid.passage_count(),
            seed.unwrap_or_default()
        );
    }
    Ok(())
}
