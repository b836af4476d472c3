//! Tile types and per-tile state

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::hex::HexCoord;
use crate::territory::KingdomId;

/// Display color, linear RGBA in 0..=1
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::rgb(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Rgba::WHITE
    }
}

/// Terrain category
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    Capital,
    Plains,
    Forest,
    Mountain,
    River,
    Village,
    Wilderness,
}

/// Shared tile metadata. Tiles hold it behind an `Arc`; it is never mutated
/// after a grid is generated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TileType {
    pub name: String,
    pub kind: TileKind,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub color: Rgba,
    #[serde(default = "default_passable")]
    pub passable: bool,
    #[serde(default = "default_movement_cost")]
    pub movement_cost: u32,
}

fn default_passable() -> bool {
    true
}

fn default_movement_cost() -> u32 {
    1
}

impl TileType {
    pub fn new(name: &str, kind: TileKind, color: Rgba, passable: bool, movement_cost: u32) -> Self {
        Self {
            name: name.to_string(),
            kind,
            description: format!("The {} territory.", name),
            color,
            passable,
            movement_cost,
        }
    }

    pub fn is_capital(&self) -> bool {
        self.kind == TileKind::Capital
    }

    // Built-in Kingmaker terrain
    pub fn capital() -> Self {
        Self::new("Calmafar", TileKind::Capital, Rgba::rgb(1.0, 0.84, 0.0), true, 1)
    }

    pub fn plains() -> Self {
        Self::new("Northern Plains", TileKind::Plains, Rgba::rgb(0.6, 0.8, 0.4), true, 1)
    }

    pub fn forest() -> Self {
        Self::new("Eastern Forest", TileKind::Forest, Rgba::rgb(0.2, 0.5, 0.2), true, 2)
    }

    pub fn mountain() -> Self {
        Self::new("Southern Mountains", TileKind::Mountain, Rgba::rgb(0.5, 0.5, 0.55), false, 99)
    }

    pub fn river() -> Self {
        Self::new("Western River", TileKind::River, Rgba::rgb(0.3, 0.5, 0.8), true, 2)
    }

    pub fn village() -> Self {
        Self::new("Northeast Village", TileKind::Village, Rgba::rgb(0.76, 0.7, 0.5), true, 1)
    }

    pub fn wilderness() -> Self {
        Self::new("Southeast Wilderness", TileKind::Wilderness, Rgba::rgb(0.55, 0.4, 0.3), true, 1)
    }
}

/// A generated tile
#[derive(Clone, Debug)]
pub struct Tile {
    coord: HexCoord,
    tile_type: Arc<TileType>,
    owner: Option<KingdomId>,
    highlight: Option<Rgba>,
    highlighted: bool,
    border_color: Option<Rgba>,
}

impl Tile {
    pub fn new(coord: HexCoord, tile_type: Arc<TileType>) -> Self {
        Self {
            coord,
            tile_type,
            owner: None,
            highlight: None,
            highlighted: false,
            border_color: None,
        }
    }

    pub fn coord(&self) -> HexCoord {
        self.coord
    }

    pub fn tile_type(&self) -> &Arc<TileType> {
        &self.tile_type
    }

    pub fn is_passable(&self) -> bool {
        self.tile_type.passable
    }

    pub fn movement_cost(&self) -> u32 {
        self.tile_type.movement_cost
    }

    pub fn is_capital(&self) -> bool {
        self.tile_type.is_capital()
    }

    /// Owning kingdom, if any
    pub fn owner(&self) -> Option<KingdomId> {
        self.owner
    }

    pub fn is_owned(&self) -> bool {
        self.owner.is_some()
    }

    // Ownership changes go through territory operations so the kingdom's
    // tile set stays mirrored.
    pub(crate) fn set_owner(&mut self, kingdom: KingdomId) {
        self.owner = Some(kingdom);
    }

    pub(crate) fn clear_owner(&mut self) {
        self.owner = None;
    }

    /// Turn the highlight on or off. A `None` color keeps the previous one.
    pub fn set_highlight(&mut self, highlighted: bool, color: Option<Rgba>) {
        self.highlighted = highlighted;
        if color.is_some() {
            self.highlight = color;
        }
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    pub fn highlight_color(&self) -> Option<Rgba> {
        if self.highlighted {
            self.highlight
        } else {
            None
        }
    }

    pub fn set_border_color(&mut self, color: Rgba) {
        self.border_color = Some(color);
    }

    pub fn border_color(&self) -> Option<Rgba> {
        self.border_color
    }

    /// Name used by presentation layers, e.g. `Hex_1_-1_Eastern Forest`
    pub fn display_name(&self) -> String {
        format!("Hex_{}_{}_{}", self.coord.q, self.coord.r, self.tile_type.name)
    }
}
