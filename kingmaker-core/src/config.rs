//! GridConfig - map shape and terrain assignment

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

use crate::hex::HexCoord;
use crate::layout::{HexLayout, SQRT3};
use crate::tile::TileType;

/// Largest radius accepted by [`GridConfig::validate`]
pub const MAX_RADIUS: u32 = 10;

/// Number of compass sectors around the capital
pub const SECTOR_COUNT: usize = 6;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("hex size must be a positive finite number, got {0}")]
    InvalidSize(f32),

    #[error("radius {0} exceeds the maximum of {max}", max = MAX_RADIUS)]
    RadiusTooLarge(u32),
}

/// How ring tiles get their type
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TilePainting {
    /// Every ring tile uses the default type
    Uniform,
    /// Each tile uses the type of its compass sector around the capital
    #[default]
    Sectors,
}

/// Pointy-top grid configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Rings around the capital
    pub radius: u32,
    /// Center-to-corner size of a hex
    pub hex_size: f32,
    #[serde(default)]
    pub painting: TilePainting,
    #[serde(default)]
    pub capital: Option<Arc<TileType>>,
    #[serde(default)]
    pub default: Option<Arc<TileType>>,
    /// 0 plains-north, 1 forest-east, 2 village-NE, 3 river-west,
    /// 4 mountain-south, 5 wilderness-SE
    #[serde(default)]
    pub sectors: [Option<Arc<TileType>>; SECTOR_COUNT],
}

impl GridConfig {
    /// Config with no tile types assigned
    pub fn new(radius: u32, hex_size: f32) -> Self {
        Self {
            radius,
            hex_size,
            painting: TilePainting::Sectors,
            capital: None,
            default: None,
            sectors: Default::default(),
        }
    }

    /// One capital and six surrounding territories with the built-in terrain
    pub fn kingmaker() -> Self {
        Self {
            radius: 1,
            hex_size: 1.0,
            painting: TilePainting::Sectors,
            capital: Some(Arc::new(TileType::capital())),
            default: Some(Arc::new(TileType::plains())),
            sectors: [
                Some(Arc::new(TileType::plains())),
                Some(Arc::new(TileType::forest())),
                Some(Arc::new(TileType::village())),
                Some(Arc::new(TileType::river())),
                Some(Arc::new(TileType::mountain())),
                Some(Arc::new(TileType::wilderness())),
            ],
        }
    }

    pub fn with_radius(mut self, radius: u32) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_hex_size(mut self, hex_size: f32) -> Self {
        self.hex_size = hex_size;
        self
    }

    pub fn with_painting(mut self, painting: TilePainting) -> Self {
        self.painting = painting;
        self
    }

    pub fn with_capital(mut self, tile_type: TileType) -> Self {
        self.capital = Some(Arc::new(tile_type));
        self
    }

    pub fn with_default(mut self, tile_type: TileType) -> Self {
        self.default = Some(Arc::new(tile_type));
        self
    }

    pub fn with_sector(mut self, sector: usize, tile_type: TileType) -> Self {
        self.sectors[sector % SECTOR_COUNT] = Some(Arc::new(tile_type));
        self
    }

    pub fn layout(&self) -> HexLayout {
        HexLayout::pointy(self.hex_size)
    }

    pub fn hex_width(&self) -> f32 {
        self.layout().hex_width()
    }

    pub fn hex_height(&self) -> f32 {
        self.layout().hex_height()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.hex_size.is_finite() || self.hex_size <= 0.0 {
            return Err(ConfigError::InvalidSize(self.hex_size));
        }
        if self.radius > MAX_RADIUS {
            return Err(ConfigError::RadiusTooLarge(self.radius));
        }
        Ok(())
    }

    /// Tile count of a full hexagon of this radius
    pub fn total_tiles(&self) -> usize {
        total_tiles(self.radius)
    }

    /// Uniform typing: capital at ring 0, default elsewhere
    pub fn tile_type_for_ring(&self, ring: u32) -> Option<&Arc<TileType>> {
        if ring == 0 {
            self.capital.as_ref()
        } else {
            self.default.as_ref()
        }
    }

    /// Sector typing. Unset sectors fall back to the default type.
    pub fn tile_type_for_coord(&self, coord: HexCoord) -> Option<&Arc<TileType>> {
        if coord == HexCoord::ZERO {
            return self.capital.as_ref();
        }
        self.sectors[sector_of(coord)]
            .as_ref()
            .or(self.default.as_ref())
    }

    /// Type for a ring tile under the configured painting mode
    pub fn resolve(&self, coord: HexCoord) -> Option<&Arc<TileType>> {
        match self.painting {
            TilePainting::Uniform => self.tile_type_for_ring(coord.length() as u32),
            TilePainting::Sectors => self.tile_type_for_coord(coord),
        }
    }

    /// Load from JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: GridConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self::kingmaker()
    }
}

/// `1 + 3 * radius * (radius + 1)`
pub fn total_tiles(radius: u32) -> usize {
    let n = radius as usize;
    1 + 3 * n * (n + 1)
}

/// Compass sector (0..6) of a coordinate around the origin.
///
/// Sixty-degree buckets offset by 30 degrees so that boundaries fall between
/// the six directions.
pub fn sector_of(coord: HexCoord) -> usize {
    let q = coord.q as f32;
    let r = coord.r as f32;
    let angle = (r * 1.5).atan2(q * SQRT3 + r * SQRT3 / 2.0);
    let mut degrees = angle.to_degrees();
    if degrees < 0.0 {
        degrees += 360.0;
    }
    ((degrees + 30.0) / 60.0).floor() as usize % SECTOR_COUNT
}
