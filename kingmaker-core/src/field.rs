//! Flat-top rectangular hex field
//!
//! Tiles are laid out in odd-q offset rows and columns, stored by axial
//! coordinate, and positioned on the y=0 ground plane.

use glam::Vec3;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::ConfigError;
use crate::grid::{GridError, TileStore};
use crate::hex::{offset_to_axial, HexCoord};
use crate::layout::HexLayout;
use crate::mesh::HexPrismMesh;
use crate::tile::{Tile, TileType};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    /// Columns
    pub width: u32,
    /// Rows
    pub height: u32,
    /// Center-to-corner size of a hex
    pub hex_radius: f32,
    pub tile_type: Arc<TileType>,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            width: 5,
            height: 5,
            hex_radius: 1.0,
            tile_type: Arc::new(TileType::plains()),
        }
    }
}

impl FieldConfig {
    pub fn new(width: u32, height: u32, hex_radius: f32) -> Self {
        Self {
            width,
            height,
            hex_radius,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.hex_radius.is_finite() || self.hex_radius <= 0.0 {
            return Err(ConfigError::InvalidSize(self.hex_radius));
        }
        Ok(())
    }
}

/// Axis-aligned box around the field's tile centers
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl Bounds {
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

#[derive(Debug)]
pub struct HexField {
    config: FieldConfig,
    tiles: FxHashMap<HexCoord, Tile>,
    mesh: Option<Arc<HexPrismMesh>>,
}

impl HexField {
    pub fn new(config: FieldConfig) -> Self {
        Self {
            config,
            tiles: FxHashMap::default(),
            mesh: None,
        }
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: FieldConfig) {
        self.config = config;
    }

    /// Rebuild every tile, returning the tile count.
    ///
    /// The prism mesh is built once and reused while the radius is unchanged.
    pub fn generate(&mut self) -> Result<usize, GridError> {
        self.config.validate()?;
        self.clear();

        let stale = self
            .mesh
            .as_ref()
            .map_or(true, |mesh| mesh.radius != self.config.hex_radius);
        if stale {
            self.mesh = Some(Arc::new(HexPrismMesh::flat_top(self.config.hex_radius)));
        }

        for row in 0..self.config.height as i32 {
            for col in 0..self.config.width as i32 {
                let coord = offset_to_axial(col, row);
                let tile_type = self.config.tile_type.clone();
                self.tiles
                    .entry(coord)
                    .or_insert_with(|| Tile::new(coord, tile_type));
            }
        }

        tracing::info!(
            "Generated {} flat-top hex tiles ({}x{})",
            self.tiles.len(),
            self.config.width,
            self.config.height
        );
        Ok(self.tiles.len())
    }

    pub fn clear(&mut self) {
        self.tiles.clear();
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.values()
    }

    pub fn tile(&self, coord: HexCoord) -> Option<&Tile> {
        self.tiles.get(&coord)
    }

    pub fn tile_mut(&mut self, coord: HexCoord) -> Option<&mut Tile> {
        self.tiles.get_mut(&coord)
    }

    /// Shared prism geometry; `None` until the first generate
    pub fn mesh(&self) -> Option<&Arc<HexPrismMesh>> {
        self.mesh.as_ref()
    }

    pub fn layout(&self) -> HexLayout {
        HexLayout::flat(self.config.hex_radius)
    }

    pub fn axial_to_world(&self, coord: HexCoord) -> Vec3 {
        self.layout().hex_to_world_3d(coord)
    }

    pub fn world_to_axial(&self, pos: Vec3) -> HexCoord {
        self.layout().world_3d_to_hex(pos)
    }

    /// Tile centers padded by the hex radius on every axis. A unit box at the
    /// origin when the field is empty.
    pub fn bounds(&self) -> Bounds {
        if self.tiles.is_empty() {
            return Bounds {
                min: Vec3::splat(-0.5),
                max: Vec3::splat(0.5),
            };
        }

        let layout = self.layout();
        let (min, max) = self.tiles.keys().fold(
            (Vec3::splat(f32::MAX), Vec3::splat(f32::MIN)),
            |(min, max), coord| {
                let p = layout.hex_to_world_3d(*coord);
                (min.min(p), max.max(p))
            },
        );
        let pad = Vec3::splat(self.config.hex_radius);
        Bounds {
            min: min - pad,
            max: max + pad,
        }
    }
}

impl TileStore for HexField {
    fn tile(&self, coord: HexCoord) -> Option<&Tile> {
        self.tiles.get(&coord)
    }

    fn tile_mut(&mut self, coord: HexCoord) -> Option<&mut Tile> {
        self.tiles.get_mut(&coord)
    }

    fn layout(&self) -> HexLayout {
        HexLayout::flat(self.config.hex_radius)
    }
}
