//! Kingdoms, resources and tile ownership
//!
//! A tile's `owner` and its kingdom's `owned` set always agree:
//! `coord ∈ kingdom.owned ⇔ tile.owner == Some(kingdom.id)`.

use glam::Vec2;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::grid::TileStore;
use crate::hex::HexCoord;
use crate::tile::{Rgba, Tile};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct KingdomId(pub u32);

impl fmt::Display for KingdomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "kingdom#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TerritoryError {
    #[error("unknown kingdom {0}")]
    UnknownKingdom(KingdomId),

    #[error("kingdom {0} is already registered")]
    DuplicateKingdom(KingdomId),

    #[error("no tile at {0}")]
    MissingTile(HexCoord),

    #[error("tile {coord} is owned by {owner}")]
    OwnedByOther { coord: HexCoord, owner: KingdomId },
}

/// Stockpiles. Never negative; changes saturate at zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resources {
    pub gold: u32,
    pub food: u32,
    pub materials: u32,
}

impl Default for Resources {
    fn default() -> Self {
        Self {
            gold: 100,
            food: 50,
            materials: 25,
        }
    }
}

fn apply_delta(value: u32, delta: i64) -> u32 {
    (value as i64).saturating_add(delta).clamp(0, u32::MAX as i64) as u32
}

/// A player's kingdom
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Kingdom {
    id: KingdomId,
    pub name: String,
    pub color: Rgba,
    resources: Resources,
    owned: FxHashSet<HexCoord>,
}

impl Kingdom {
    pub fn new(id: KingdomId, name: &str, color: Rgba) -> Self {
        Self {
            id,
            name: name.to_string(),
            color,
            resources: Resources::default(),
            owned: FxHashSet::default(),
        }
    }

    pub fn id(&self) -> KingdomId {
        self.id
    }

    pub fn resources(&self) -> Resources {
        self.resources
    }

    pub fn gold(&self) -> u32 {
        self.resources.gold
    }

    pub fn food(&self) -> u32 {
        self.resources.food
    }

    pub fn materials(&self) -> u32 {
        self.resources.materials
    }

    pub fn modify_gold(&mut self, delta: i64) {
        self.resources.gold = apply_delta(self.resources.gold, delta);
    }

    pub fn modify_food(&mut self, delta: i64) {
        self.resources.food = apply_delta(self.resources.food, delta);
    }

    pub fn modify_materials(&mut self, delta: i64) {
        self.resources.materials = apply_delta(self.resources.materials, delta);
    }

    pub fn set_resources(&mut self, gold: u32, food: u32, materials: u32) {
        self.resources = Resources { gold, food, materials };
    }

    pub fn owns(&self, coord: HexCoord) -> bool {
        self.owned.contains(&coord)
    }

    pub fn owned_tiles(&self) -> impl Iterator<Item = HexCoord> + '_ {
        self.owned.iter().copied()
    }

    pub fn tile_count(&self) -> usize {
        self.owned.len()
    }

    /// Claim a tile. `Ok(false)` if this kingdom already owns it.
    ///
    /// A tile owned by another kingdom is refused; use
    /// [`Realm::assign_tile`] to move it between kingdoms.
    pub fn assign_tile(&mut self, tile: &mut Tile) -> Result<bool, TerritoryError> {
        match tile.owner() {
            Some(owner) if owner == self.id => Ok(false),
            Some(owner) => Err(TerritoryError::OwnedByOther {
                coord: tile.coord(),
                owner,
            }),
            None => {
                tile.set_owner(self.id);
                self.owned.insert(tile.coord());
                tracing::debug!("{} claimed {}", self.name, tile.coord());
                Ok(true)
            }
        }
    }

    /// Give up a tile. `false` if this kingdom does not own it.
    pub fn release_tile(&mut self, tile: &mut Tile) -> bool {
        if tile.owner() != Some(self.id) {
            return false;
        }
        tile.clear_owner();
        self.owned.remove(&tile.coord());
        tracing::debug!("{} released {}", self.name, tile.coord());
        true
    }

    /// Drop every claim without touching tiles. Used when the tiles
    /// themselves have been discarded.
    pub(crate) fn forget_tiles(&mut self) {
        self.owned.clear();
    }
}

/// Registry of kingdoms
#[derive(Clone, Debug, Default)]
pub struct Realm {
    kingdoms: FxHashMap<KingdomId, Kingdom>,
}

impl Realm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_kingdom(&mut self, kingdom: Kingdom) -> Result<(), TerritoryError> {
        let id = kingdom.id();
        if self.kingdoms.contains_key(&id) {
            return Err(TerritoryError::DuplicateKingdom(id));
        }
        self.kingdoms.insert(id, kingdom);
        Ok(())
    }

    pub fn kingdom(&self, id: KingdomId) -> Option<&Kingdom> {
        self.kingdoms.get(&id)
    }

    pub fn kingdom_mut(&mut self, id: KingdomId) -> Option<&mut Kingdom> {
        self.kingdoms.get_mut(&id)
    }

    pub fn kingdoms(&self) -> impl Iterator<Item = &Kingdom> {
        self.kingdoms.values()
    }

    pub fn len(&self) -> usize {
        self.kingdoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kingdoms.is_empty()
    }

    pub fn owner_of<S: TileStore>(&self, store: &S, coord: HexCoord) -> Option<KingdomId> {
        store.tile(coord).and_then(Tile::owner)
    }

    /// Give a tile to `kingdom`, releasing it from its current owner in the
    /// same call. Returns the previous owner.
    ///
    /// Only kingdoms registered here can lose a tile this way; a tile held by
    /// a kingdom outside the realm is refused with `OwnedByOther`.
    pub fn assign_tile<S: TileStore>(
        &mut self,
        store: &mut S,
        kingdom: KingdomId,
        coord: HexCoord,
    ) -> Result<Option<KingdomId>, TerritoryError> {
        if !self.kingdoms.contains_key(&kingdom) {
            return Err(TerritoryError::UnknownKingdom(kingdom));
        }
        let tile = store
            .tile_mut(coord)
            .ok_or(TerritoryError::MissingTile(coord))?;

        let previous = tile.owner();
        if previous == Some(kingdom) {
            return Ok(previous);
        }
        if let Some(old) = previous {
            let Some(old_kingdom) = self.kingdoms.get_mut(&old) else {
                return Err(TerritoryError::OwnedByOther { coord, owner: old });
            };
            old_kingdom.release_tile(tile);
        }

        if let Some(new_kingdom) = self.kingdoms.get_mut(&kingdom) {
            new_kingdom.assign_tile(tile)?;
        }
        Ok(previous)
    }

    /// `Ok(false)` if `kingdom` does not own the tile
    pub fn release_tile<S: TileStore>(
        &mut self,
        store: &mut S,
        kingdom: KingdomId,
        coord: HexCoord,
    ) -> Result<bool, TerritoryError> {
        let owner = self
            .kingdoms
            .get_mut(&kingdom)
            .ok_or(TerritoryError::UnknownKingdom(kingdom))?;
        let tile = store
            .tile_mut(coord)
            .ok_or(TerritoryError::MissingTile(coord))?;
        Ok(owner.release_tile(tile))
    }

    /// Forget all claims, e.g. after the tiles were regenerated
    pub fn clear_claims(&mut self) {
        for kingdom in self.kingdoms.values_mut() {
            kingdom.forget_tiles();
        }
    }

    /// Owned tiles with at least one neighbor outside the kingdom
    pub fn border_tiles(&self, kingdom: KingdomId) -> Vec<HexCoord> {
        let Some(k) = self.kingdoms.get(&kingdom) else {
            return Vec::new();
        };
        let mut border: Vec<HexCoord> = k
            .owned_tiles()
            .filter(|c| c.neighbors().iter().any(|n| !k.owns(*n)))
            .collect();
        border.sort();
        border
    }

    /// World-space outline of a kingdom: one segment per edge between an
    /// owned tile and a tile (or empty space) it does not own.
    pub fn boundary_segments<S: TileStore>(&self, store: &S, kingdom: KingdomId) -> Vec<(Vec2, Vec2)> {
        let Some(k) = self.kingdoms.get(&kingdom) else {
            return Vec::new();
        };
        let layout = store.layout();
        let eps = layout.size * 1e-3;

        let mut owned: Vec<HexCoord> = k.owned_tiles().collect();
        owned.sort();

        let mut segments = Vec::new();
        for coord in owned {
            let corners = layout.corners(coord);
            for neighbor in coord.neighbors() {
                if k.owns(neighbor) {
                    continue;
                }
                let other = layout.corners(neighbor);
                let mut shared = corners
                    .iter()
                    .filter(|c| other.iter().any(|o| o.distance(**c) < eps));
                if let (Some(a), Some(b)) = (shared.next(), shared.next()) {
                    segments.push((*a, *b));
                }
            }
        }
        segments
    }
}
