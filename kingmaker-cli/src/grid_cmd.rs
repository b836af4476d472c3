//! Grid command - generate a capital-centric grid and report it
//!
//! ## Architecture
//!
//! - Level 1: run() - orchestration
//! - Level 2: build_grid(), report_grid()
//! - Level 3: tile rows and ring summaries

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use kingmaker_core::{HexCoord, HexGrid, TileKind};

#[derive(Args)]
pub struct GridArgs {
    /// Grid config JSON file (built-in Kingmaker config if omitted)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override the config's radius
    #[arg(long)]
    pub radius: Option<u32>,

    /// Override the config's hex size
    #[arg(long)]
    pub size: Option<f32>,

    /// Output tiles as JSON
    #[arg(long)]
    pub json: bool,
}

/// One tile in the report
#[derive(Clone, Debug, Serialize)]
struct TileRow {
    q: i32,
    r: i32,
    ring: i32,
    name: String,
    kind: TileKind,
    passable: bool,
    movement_cost: u32,
    x: f32,
    y: f32,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

pub fn run(args: GridArgs) -> Result<()> {
    let grid = build_grid(&args)?;
    report_grid(&grid, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn build_grid(args: &GridArgs) -> Result<HexGrid> {
    let config = crate::load_config(args.config.as_ref(), args.radius, args.size)?;
    let mut grid = HexGrid::new(config);
    grid.generate().context("Failed to generate grid")?;
    Ok(grid)
}

fn report_grid(grid: &HexGrid, json: bool) -> Result<()> {
    let rows = tile_rows(grid);

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!(
        "Grid: radius {}, hex size {}, {} tiles",
        grid.config().radius,
        grid.config().hex_size,
        grid.len()
    );
    for ring in 0..=grid.config().radius as i32 {
        let in_ring: Vec<&TileRow> = rows.iter().filter(|row| row.ring == ring).collect();
        println!("  ring {}: {} tiles", ring, in_ring.len());
        for row in in_ring {
            println!(
                "    ({:>3}, {:>3})  {:<22} {:<10} cost {:>2}{}",
                row.q,
                row.r,
                row.name,
                format!("{:?}", row.kind),
                row.movement_cost,
                if row.passable { "" } else { "  impassable" }
            );
        }
    }
    Ok(())
}

// ============================================================================
// LEVEL 3 - ROWS
// ============================================================================

/// Tiles ordered by ring, then in ring-walk order
fn tile_rows(grid: &HexGrid) -> Vec<TileRow> {
    HexCoord::ZERO
        .spiral(grid.config().radius)
        .filter_map(|coord| grid.tile(coord))
        .map(|tile| {
            let coord = tile.coord();
            let pos = grid.world_position(coord);
            let tile_type = tile.tile_type();
            TileRow {
                q: coord.q,
                r: coord.r,
                ring: coord.length(),
                name: tile_type.name.clone(),
                kind: tile_type.kind,
                passable: tile_type.passable,
                movement_cost: tile_type.movement_cost,
                x: pos.x,
                y: pos.y,
            }
        })
        .collect()
}
