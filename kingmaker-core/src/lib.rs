//! Kingmaker Core - hex map engine
//!
//! This crate provides the engine behind the Kingmaker strategy map:
//! - Hex geometry (axial coordinates, rings, cube rounding)
//! - Pointy-top and flat-top layouts with world-space conversion
//! - Capital-centric grid generation and the flat-top rectangular field
//! - Kingdom territory and resources
//! - Party movement driven by an external tick

pub mod config;
pub mod events;
pub mod field;
pub mod grid;
pub mod hex;
pub mod layout;
pub mod mesh;
pub mod party;
pub mod session;
pub mod territory;
pub mod tile;

// Re-exports for convenient access
pub use config::{sector_of, total_tiles, ConfigError, GridConfig, TilePainting};
pub use events::{EventBus, SubscriptionId};
pub use field::{Bounds, FieldConfig, HexField};
pub use grid::{GridError, HexGrid, TileEvent, TileStore};
pub use hex::{axial_to_offset, offset_to_axial, FractionalHex, HexCoord, DIRECTIONS};
pub use layout::{HexLayout, Orientation};
pub use mesh::HexPrismMesh;
pub use party::{MoveState, Party, PartyEvent, Transit};
pub use session::Session;
pub use territory::{Kingdom, KingdomId, Realm, Resources, TerritoryError};
pub use tile::{Rgba, Tile, TileKind, TileType};
