//! `meshmerge` — merge a planar convex-polygon mesh across shared edges
//! wherever the result stays convex (§4.7-§4.8 of the navmesh spec).
//!
//! Validation (§4.8) always runs before output; there is no flag to skip
//! it, since an invalid mesh on stdout is worse than a hard failure (§7).

use std::io::{self, Read, Write};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::fmt::SubscriberBuilder;

use navmesh::mesh;
use navmesh::GeomCfg;

#[derive(Parser)]
#[command(name = "meshmerge")]
#[command(about = "Merge a mesh v2 file's convex faces across shared edges")]
struct Cmd;

fn main() {
    SubscriberBuilder::default().with_target(false).init();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    Cmd::parse();

    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("reading mesh from stdin")?;

    let mut session = mesh::parse_mesh(&input).context("parsing mesh")?;
    let cfg = GeomCfg::default();

    tracing::debug!(
        vertices = session.vertices.len(),
        polygons = session.polygons.len(),
        "parsed mesh"
    );
    mesh::merge_mesh(&mut session, &cfg).context("merging mesh")?;
    mesh::validate_mesh(&session, &cfg).context("validating merged mesh")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    mesh::write_mesh(&session, &mut out)?;
    Ok(())
}
