//! Field command - flat-top rectangular field and prism mesh

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use kingmaker_core::{axial_to_offset, FieldConfig, HexField, HexPrismMesh};

#[derive(Args)]
pub struct FieldArgs {
    /// Columns
    #[arg(long, default_value = "5")]
    pub width: u32,

    /// Rows
    #[arg(long, default_value = "5")]
    pub height: u32,

    /// Hex radius
    #[arg(long, default_value = "1.0")]
    pub radius: f32,

    /// Write the shared prism mesh as JSON
    #[arg(long, value_name = "FILE")]
    pub mesh_out: Option<PathBuf>,

    /// Output tiles as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct FieldTile {
    col: i32,
    row: i32,
    q: i32,
    r: i32,
    x: f32,
    z: f32,
}

pub fn run(args: FieldArgs) -> Result<()> {
    let mut field = HexField::new(FieldConfig::new(args.width, args.height, args.radius));
    field.generate().context("Failed to generate field")?;

    if let (Some(path), Some(mesh)) = (&args.mesh_out, field.mesh()) {
        write_mesh(path, mesh)?;
    }

    let mut tiles: Vec<FieldTile> = field
        .tiles()
        .map(|tile| {
            let coord = tile.coord();
            let (col, row) = axial_to_offset(coord);
            let pos = field.axial_to_world(coord);
            FieldTile {
                col,
                row,
                q: coord.q,
                r: coord.r,
                x: pos.x,
                z: pos.z,
            }
        })
        .collect();
    tiles.sort_by_key(|t| (t.row, t.col));

    if args.json {
        println!("{}", serde_json::to_string_pretty(&tiles)?);
        return Ok(());
    }

    let bounds = field.bounds();
    println!(
        "Field: {}x{} tiles, radius {}",
        args.width, args.height, args.radius
    );
    println!(
        "  bounds: center ({:.2}, {:.2}, {:.2}) size ({:.2}, {:.2}, {:.2})",
        bounds.center().x,
        bounds.center().y,
        bounds.center().z,
        bounds.size().x,
        bounds.size().y,
        bounds.size().z
    );
    if let Some(mesh) = field.mesh() {
        println!(
            "  mesh: {} vertices, {} triangles",
            mesh.vertex_count(),
            mesh.triangle_count()
        );
    }
    for t in &tiles {
        println!(
            "    [{:>2},{:>2}] -> ({:>3}, {:>3})  at ({:.2}, {:.2})",
            t.col, t.row, t.q, t.r, t.x, t.z
        );
    }
    Ok(())
}

fn write_mesh(path: &PathBuf, mesh: &HexPrismMesh) -> Result<()> {
    let content = serde_json::to_string_pretty(mesh)?;
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write mesh: {}", path.display()))?;
    tracing::info!("Saved prism mesh to {}", path.display());
    Ok(())
}
