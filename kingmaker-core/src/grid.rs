//! Pointy-top hex grid: a capital surrounded by concentric rings

use glam::Vec2;
use rustc_hash::FxHashMap;
use std::sync::Arc;

use crate::config::{ConfigError, GridConfig};
use crate::events::{EventBus, SubscriptionId};
use crate::hex::HexCoord;
use crate::layout::HexLayout;
use crate::tile::{Rgba, Tile, TileType};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GridError {
    #[error("invalid grid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("no {0} tile type configured")]
    MissingTileType(&'static str),
}

/// Pointer notifications raised by input collaborators and forwarded by the grid
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TileEvent {
    Clicked(HexCoord),
    Hovered(HexCoord),
    Exited(HexCoord),
}

impl TileEvent {
    pub fn coord(&self) -> HexCoord {
        match *self {
            TileEvent::Clicked(c) | TileEvent::Hovered(c) | TileEvent::Exited(c) => c,
        }
    }
}

/// Tile lookup shared by the pointy-top grid and the flat-top field
pub trait TileStore {
    fn tile(&self, coord: HexCoord) -> Option<&Tile>;

    fn tile_mut(&mut self, coord: HexCoord) -> Option<&mut Tile>;

    fn layout(&self) -> HexLayout;

    fn contains(&self, coord: HexCoord) -> bool {
        self.tile(coord).is_some()
    }

    /// Existing tile that can be entered
    fn is_passable(&self, coord: HexCoord) -> bool {
        self.tile(coord).is_some_and(Tile::is_passable)
    }
}

/// Hexagon-shaped tile map centered on the capital
#[derive(Debug)]
pub struct HexGrid {
    config: GridConfig,
    tiles: FxHashMap<HexCoord, Tile>,
    events: EventBus<TileEvent>,
}

impl HexGrid {
    /// Empty grid; call [`HexGrid::generate`] to build tiles
    pub fn new(config: GridConfig) -> Self {
        Self {
            config,
            tiles: FxHashMap::default(),
            events: EventBus::new(),
        }
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Replace the config. Existing tiles stay until the next generate.
    pub fn set_config(&mut self, config: GridConfig) {
        self.config = config;
    }

    // ========================================================================
    // GENERATION
    // ========================================================================

    /// Rebuild all tiles from the config, returning the tile count.
    ///
    /// Every tile type is resolved before anything is cleared, so a failed
    /// generate leaves the previous grid untouched.
    pub fn generate(&mut self) -> Result<usize, GridError> {
        self.config.validate()?;

        let mut plan: Vec<(HexCoord, Arc<TileType>)> =
            Vec::with_capacity(self.config.total_tiles());

        let capital = self
            .config
            .capital
            .clone()
            .ok_or(GridError::MissingTileType("capital"))?;
        plan.push((HexCoord::ZERO, capital));

        for ring in 1..=self.config.radius {
            for coord in HexCoord::ZERO.ring(ring) {
                let tile_type = self
                    .config
                    .resolve(coord)
                    .cloned()
                    .ok_or(GridError::MissingTileType("default"))?;
                plan.push((coord, tile_type));
            }
        }

        self.clear();
        for (coord, tile_type) in plan {
            self.tiles
                .entry(coord)
                .or_insert_with(|| Tile::new(coord, tile_type));
        }

        tracing::info!(
            "Generated hex grid with {} tiles (radius {})",
            self.tiles.len(),
            self.config.radius
        );
        Ok(self.tiles.len())
    }

    pub fn clear(&mut self) {
        self.tiles.clear();
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.values()
    }

    pub fn tiles_mut(&mut self) -> impl Iterator<Item = &mut Tile> {
        self.tiles.values_mut()
    }

    pub fn coords(&self) -> impl Iterator<Item = HexCoord> + '_ {
        self.tiles.keys().copied()
    }

    pub fn tile(&self, coord: HexCoord) -> Option<&Tile> {
        self.tiles.get(&coord)
    }

    pub fn tile_mut(&mut self, coord: HexCoord) -> Option<&mut Tile> {
        self.tiles.get_mut(&coord)
    }

    pub fn contains(&self, coord: HexCoord) -> bool {
        self.tiles.contains_key(&coord)
    }

    /// The capital tile, present once the grid is generated
    pub fn capital(&self) -> Option<&Tile> {
        self.tile(HexCoord::ZERO)
    }

    pub fn layout(&self) -> HexLayout {
        self.config.layout()
    }

    pub fn world_position(&self, coord: HexCoord) -> Vec2 {
        self.layout().hex_to_world(coord)
    }

    /// Hex under a world point. The hex need not exist in the grid.
    pub fn hex_at_world_position(&self, pos: Vec2) -> HexCoord {
        self.layout().world_to_hex(pos)
    }

    pub fn tile_at_world_position(&self, pos: Vec2) -> Option<&Tile> {
        self.tile(self.hex_at_world_position(pos))
    }

    pub fn ring_coordinates(&self, ring: u32) -> Vec<HexCoord> {
        HexCoord::ZERO.ring(ring).collect()
    }

    /// Existing neighbor tiles in direction order
    pub fn adjacent_tiles(&self, coord: HexCoord) -> Vec<&Tile> {
        coord
            .neighbors()
            .iter()
            .filter_map(|n| self.tiles.get(n))
            .collect()
    }

    pub fn are_adjacent(&self, a: HexCoord, b: HexCoord) -> bool {
        a.distance_to(b) == 1
    }

    // ========================================================================
    // HIGHLIGHTS
    // ========================================================================

    /// Highlight every listed tile that exists; missing coordinates are ignored
    pub fn highlight_tiles<I>(&mut self, coords: I, color: Rgba)
    where
        I: IntoIterator<Item = HexCoord>,
    {
        for coord in coords {
            if let Some(tile) = self.tiles.get_mut(&coord) {
                tile.set_highlight(true, Some(color));
            }
        }
    }

    pub fn clear_all_highlights(&mut self) {
        for tile in self.tiles.values_mut() {
            tile.set_highlight(false, None);
        }
    }

    // ========================================================================
    // TILE NOTIFICATIONS
    // ========================================================================

    pub fn on_tile_event<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&TileEvent) + 'static,
    {
        self.events.subscribe(handler)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    pub fn tile_clicked(&mut self, coord: HexCoord) -> bool {
        self.forward(TileEvent::Clicked(coord))
    }

    pub fn tile_hovered(&mut self, coord: HexCoord) -> bool {
        self.forward(TileEvent::Hovered(coord))
    }

    pub fn tile_exited(&mut self, coord: HexCoord) -> bool {
        self.forward(TileEvent::Exited(coord))
    }

    /// Pass an input notification on to listeners. Events for coordinates
    /// without a tile are dropped.
    fn forward(&mut self, event: TileEvent) -> bool {
        if !self.tiles.contains_key(&event.coord()) {
            return false;
        }
        self.events.emit(&event);
        true
    }
}

impl TileStore for HexGrid {
    fn tile(&self, coord: HexCoord) -> Option<&Tile> {
        self.tiles.get(&coord)
    }

    fn tile_mut(&mut self, coord: HexCoord) -> Option<&mut Tile> {
        self.tiles.get_mut(&coord)
    }

    fn layout(&self) -> HexLayout {
        self.config.layout()
    }
}
