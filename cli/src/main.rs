use std::{
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};

use anyhow::{Context, Result, bail};
use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use tilefield_core::{Board, CellCount, Coord, Coord2, EventLog, RandomPicker, RevealOutcome};

use crate::config::{FileConfig, Overrides};

mod config;
mod render;

/// Generate a board, open the starting area and print it.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// TOML file with `seed` and a `[map]` table
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Grid width and height
    #[arg(long)]
    size: Option<Coord>,

    /// Number of mines to place
    #[arg(short, long)]
    mines: Option<CellCount>,

    #[arg(long)]
    start_x: Option<Coord>,

    #[arg(long)]
    start_y: Option<Coord>,

    /// RNG seed, taken from the clock when not given anywhere
    #[arg(long)]
    seed: Option<u64>,

    /// Reveal `X,Y` after generation, may be repeated
    #[arg(long = "open", value_name = "X,Y", value_parser = parse_coords)]
    open: Vec<Coord2>,

    /// Let `--open` detonate mines
    #[arg(long)]
    detonate: bool,

    /// Draw hidden mines
    #[arg(long)]
    show_mines: bool,

    /// Print every cell notification as a JSON line
    #[arg(long)]
    events: bool,

    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            seed: self.seed,
            size: self.size,
            mines: self.mines,
            start_x: self.start_x,
            start_y: self.start_y,
        }
    }
}

fn parse_coords(value: &str) -> Result<Coord2> {
    let Some((x, y)) = value.split_once(',') else {
        bail!("expected X,Y but got {value:?}");
    };
    let x = x.trim().parse::<Coord>().with_context(|| format!("bad x in {value:?}"))?;
    let y = y.trim().parse::<Coord>().with_context(|| format!("bad y in {value:?}"))?;
    Ok((x, y))
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos() as u64)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.verbose.tracing_level_filter())
        .with_writer(std::io::stderr)
        .init();

    let file_config = match &cli.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };
    let config = file_config.merge(&cli.overrides());
    let seed = config.seed.unwrap_or_else(clock_seed);
    log::debug!("Using seed {}", seed);

    let mut board = Board::with_parts(RandomPicker::new(seed), EventLog::new());
    let summary = board
        .create_map(config.map)
        .with_context(|| format!("creating map with {:?}", config.map))?;
    if summary.is_short() {
        log::warn!(
            "Only {} of {} mines were placed",
            summary.mines_placed,
            summary.mines_requested
        );
    }

    for &coords in &cli.open {
        let outcome = board
            .reveal(coords, cli.detonate)
            .with_context(|| format!("opening {coords:?}"))?;
        if outcome == RevealOutcome::Detonated {
            log::info!("Hit a mine at {:?}", coords);
            break;
        }
    }

    if cli.events {
        for event in board.observer().events() {
            println!("{}", serde_json::to_string(event)?);
        }
    }

    let grid = board.grid().context("board has no grid after creation")?;
    print!("{}", render::render(grid, cli.show_mines));
    println!(
        "{}",
        render::status_line(
            board.revealed_count(),
            config.map.total_cells(),
            grid.mine_count(),
            board.is_detonated(),
        )
    );

    Ok(())
}
