//! Integration tests for the Kingmaker map engine
//!
//! Tests the full stack: grid generation, territory, party movement,
//! the rectangular field, and config persistence

use std::cell::RefCell;
use std::rc::Rc;

use kingmaker_core::{
    offset_to_axial, FieldConfig, GridConfig, HexCoord, HexField, HexGrid, Kingdom, KingdomId,
    Party, PartyEvent, Realm, Rgba, Session, TileEvent, TileKind, TilePainting, TileStore, TileType,
};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// ============================================================================
// TEST FIXTURES
// ============================================================================

const BLUE: KingdomId = KingdomId(1);
const RED: KingdomId = KingdomId(2);

fn started_session(radius: u32) -> Session {
    let mut session = Session::new(GridConfig::kingmaker().with_radius(radius));
    session.start().expect("kingmaker config generates");
    session
}

fn two_kingdoms() -> Realm {
    let mut realm = Realm::new();
    realm
        .add_kingdom(Kingdom::new(BLUE, "Blue", Rgba::rgb(0.0, 0.0, 1.0)))
        .unwrap();
    realm
        .add_kingdom(Kingdom::new(RED, "Red", Rgba::rgb(1.0, 0.0, 0.0)))
        .unwrap();
    realm
}

/// Tick until the current move lands, returning the tick count
fn run_move(session: &mut Session, dt: f32) -> u32 {
    let mut ticks = 0;
    while session.party.is_moving() {
        session.tick(dt);
        ticks += 1;
        assert!(ticks < 10_000, "move never finished");
    }
    ticks
}

// ============================================================================
// GRID
// ============================================================================

#[test]
fn test_grid_counts_per_radius() {
    for radius in 0..=5 {
        let mut grid = HexGrid::new(GridConfig::kingmaker().with_radius(radius));
        let count = grid.generate().unwrap();
        assert_eq!(count, 1 + 3 * radius as usize * (radius as usize + 1));
        assert!(grid.capital().unwrap().is_capital());
    }
}

#[test]
fn test_grid_world_roundtrip() {
    let mut grid = HexGrid::new(GridConfig::kingmaker().with_radius(3).with_hex_size(1.5));
    grid.generate().unwrap();

    for coord in grid.coords().collect::<Vec<_>>() {
        let pos = grid.world_position(coord);
        assert_eq!(grid.hex_at_world_position(pos), coord);
        assert_eq!(grid.tile_at_world_position(pos).unwrap().coord(), coord);
    }
}

#[test]
fn test_grid_forwards_clicks_for_known_tiles() {
    let mut grid = HexGrid::new(GridConfig::kingmaker());
    grid.generate().unwrap();

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    grid.on_tile_event(move |event| sink.borrow_mut().push(*event));

    assert!(grid.tile_clicked(HexCoord::new(1, 0)));
    assert!(!grid.tile_clicked(HexCoord::new(5, 5)));
    assert_eq!(*seen.borrow(), vec![TileEvent::Clicked(HexCoord::new(1, 0))]);
}

#[test]
fn test_uniform_custom_terrain() {
    let swamp = TileType::new("Swamp", TileKind::Wilderness, Rgba::rgb(0.3, 0.4, 0.2), true, 3);
    let config = GridConfig::kingmaker()
        .with_radius(2)
        .with_painting(TilePainting::Uniform)
        .with_default(swamp);
    let mut grid = HexGrid::new(config);
    grid.generate().unwrap();

    for tile in grid.tiles().filter(|t| !t.is_capital()) {
        assert_eq!(tile.tile_type().name, "Swamp");
        assert_eq!(tile.movement_cost(), 3);
    }
}

// ============================================================================
// CONFIG PERSISTENCE
// ============================================================================

#[test]
fn test_config_file_drives_generation() {
    let path = std::env::temp_dir().join(format!("kingmaker-it-{}.json", std::process::id()));
    GridConfig::kingmaker().with_radius(3).save(&path).unwrap();

    let loaded = GridConfig::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    let mut from_file = HexGrid::new(loaded);
    let mut built_in = HexGrid::new(GridConfig::kingmaker().with_radius(3));
    assert_eq!(from_file.generate().unwrap(), built_in.generate().unwrap());

    for tile in built_in.tiles() {
        let other = from_file.tile(tile.coord()).unwrap();
        assert_eq!(other.tile_type(), tile.tile_type());
    }
}

#[test]
fn test_invalid_config_file_rejected() {
    let path = std::env::temp_dir().join(format!("kingmaker-it-bad-{}.json", std::process::id()));
    let mut config = GridConfig::kingmaker();
    config.hex_size = -1.0;
    config.save(&path).unwrap();

    let result = GridConfig::load(&path);
    std::fs::remove_file(&path).ok();
    assert!(result.is_err());
}

// ============================================================================
// TERRITORY
// ============================================================================

#[test]
fn test_contested_tile_moves_between_kingdoms() {
    let mut session = started_session(1);
    session.realm = two_kingdoms();
    let target = HexCoord::new(1, 0);

    assert_eq!(session.realm.assign_tile(&mut session.grid, BLUE, target), Ok(None));
    assert_eq!(session.realm.assign_tile(&mut session.grid, RED, target), Ok(Some(BLUE)));

    assert_eq!(session.realm.owner_of(&session.grid, target), Some(RED));
    assert!(!session.realm.kingdom(BLUE).unwrap().owns(target));
    assert!(session.realm.kingdom(RED).unwrap().owns(target));
}

#[test]
fn test_kingdom_boundary_grows_with_claims() {
    let mut session = started_session(2);
    session.realm = two_kingdoms();

    session.realm.assign_tile(&mut session.grid, BLUE, HexCoord::ZERO).unwrap();
    assert_eq!(session.realm.boundary_segments(&session.grid, BLUE).len(), 6);

    for coord in HexCoord::ZERO.neighbors() {
        session.realm.assign_tile(&mut session.grid, BLUE, coord).unwrap();
    }
    assert_eq!(session.realm.boundary_segments(&session.grid, BLUE).len(), 18);
    assert_eq!(session.realm.border_tiles(BLUE).len(), 6);
    assert!(session.realm.boundary_segments(&session.grid, RED).is_empty());
}

#[test]
fn test_resources_never_underflow() {
    let mut realm = two_kingdoms();
    let blue = realm.kingdom_mut(BLUE).unwrap();
    blue.modify_gold(-1_000);
    blue.modify_food(25);
    assert_eq!(blue.gold(), 0);
    assert_eq!(blue.food(), 75);
}

// ============================================================================
// PARTY MOVEMENT
// ============================================================================

#[test]
fn test_party_event_order() {
    let mut session = started_session(1);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    session.party.on_event(move |event| sink.borrow_mut().push(*event));

    let target = HexCoord::new(1, 0);
    assert!(session.move_party(target));
    run_move(&mut session, 0.05);

    assert_eq!(
        *seen.borrow(),
        vec![
            PartyEvent::MovementStarted(target),
            PartyEvent::MovementCompleted(target),
            PartyEvent::PartyMoved,
        ]
    );
    assert!(session.party.is_on_tile(target));
}

#[test]
fn test_party_respects_terrain() {
    let mut session = started_session(1);
    let mountain = session
        .grid
        .tiles()
        .find(|t| !t.is_passable())
        .map(|t| t.coord())
        .unwrap();

    assert!(!session.move_party(mountain));
    assert!(!session.move_party(HexCoord::new(2, 0)));
    assert!(!session.party.is_moving());

    let options: Vec<HexCoord> = session
        .party
        .moveable_tiles(&session.grid)
        .iter()
        .map(|t| t.coord())
        .collect();
    assert_eq!(options.len(), 5);
    assert!(!options.contains(&mountain));
}

#[test]
fn test_party_ignores_moves_while_moving() {
    let mut session = started_session(2);
    assert!(session.move_party(HexCoord::new(1, 0)));
    session.tick(0.01);
    assert!(!session.move_party(HexCoord::new(0, 1)));

    run_move(&mut session, 0.05);
    assert_eq!(session.party.position(), HexCoord::new(1, 0));
}

#[test]
fn test_random_walk_stays_on_passable_tiles() {
    let mut session = started_session(4);
    let mut rng = ChaCha8Rng::seed_from_u64(12345);

    for _ in 0..50 {
        let options: Vec<HexCoord> = session
            .party
            .moveable_tiles(&session.grid)
            .iter()
            .map(|t| t.coord())
            .collect();
        let Some(&next) = options.choose(&mut rng) else {
            break;
        };
        let from = session.party.position();
        assert!(session.move_party(next));
        run_move(&mut session, 1.0 / 60.0);

        assert!(from.is_adjacent(session.party.position()));
        assert!(session.grid.is_passable(session.party.position()));
    }
}

// ============================================================================
// FIELD
// ============================================================================

#[test]
fn test_field_tiles_follow_offset_rows() {
    let mut field = HexField::new(FieldConfig::new(6, 4, 0.5));
    assert_eq!(field.generate().unwrap(), 24);

    for row in 0..4 {
        for col in 0..6 {
            let coord = offset_to_axial(col, row);
            assert!(field.contains(coord));
            let pos = field.axial_to_world(coord);
            assert_eq!(field.world_to_axial(pos), coord);
        }
    }
    assert_eq!(field.mesh().unwrap().vertex_count(), 38);
}

#[test]
fn test_party_walks_the_field() {
    let mut field = HexField::new(FieldConfig::default());
    field.generate().unwrap();

    let mut party = Party::default();
    let start = offset_to_axial(2, 2);
    assert!(party.set_position(&field, start));

    let next = party.moveable_tiles(&field)[0].coord();
    assert!(party.move_to(&field, next));
    while party.is_moving() {
        party.tick(0.1);
    }
    assert_eq!(party.position(), next);
}
