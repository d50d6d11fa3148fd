//! `grid2rects` — decompose a traversability grid into large axis-aligned
//! rectangles (§4.4-§4.6 of the navmesh spec).

use std::io::{self, Read, Write};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::fmt::SubscriberBuilder;

use navmesh::grid;

#[derive(Copy, Clone, Eq, PartialEq, ValueEnum)]
enum Mode {
    /// Per-cell heuristic score of the best rectangle there (default).
    Heuristic,
    /// Clearance tables and the raw traversability grid.
    Debug,
    /// Per-cell `width,height` of the best rectangle there.
    Rects,
}

#[derive(Parser)]
#[command(name = "grid2rects")]
#[command(about = "Decompose a .map traversability grid into rectangles")]
struct Cmd {
    #[arg(long, value_enum, default_value = "heuristic")]
    mode: Mode,

    /// Run the iterative "consume the global argmax" decomposition and
    /// print the ordered list of consumed rectangles instead of a table.
    #[arg(long)]
    decompose: bool,
}

fn main() {
    SubscriberBuilder::default().with_target(false).init();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cmd = Cmd::parse();

    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("reading map from stdin")?;

    let mut session = grid::parse_map(&input).context("parsing map")?;
    tracing::debug!(height = session.height, width = session.width, "parsed map");
    session.compute_clearance();

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if cmd.decompose {
        let rects = session.decompose();
        tracing::debug!(count = rects.len(), "decomposed grid");
        for rect in rects {
            writeln!(out, "{} {} {} {}", rect.top_y, rect.top_x, rect.width, rect.height)?;
        }
        return Ok(());
    }

    session.compute_best_rects();
    match cmd.mode {
        Mode::Heuristic => grid::write_heuristic(&session, &mut out)?,
        Mode::Rects => grid::write_rects(&session, &mut out)?,
        Mode::Debug => {
            grid::write_traversable(&session, &mut out)?;
            writeln!(out)?;
            grid::write_clearance(&session, &mut out)?;
        }
    }
    Ok(())
}
