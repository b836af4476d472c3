//! Session - wires grid, party and realm together
//!
//! Callers own a `Session` and hand out references to its services.

use crate::config::GridConfig;
use crate::grid::{GridError, HexGrid};
use crate::hex::HexCoord;
use crate::party::Party;
use crate::territory::Realm;

#[derive(Debug)]
pub struct Session {
    pub grid: HexGrid,
    pub party: Party,
    pub realm: Realm,
}

impl Session {
    /// Services are created but nothing is generated until [`Session::start`]
    pub fn new(config: GridConfig) -> Self {
        Self {
            grid: HexGrid::new(config),
            party: Party::default(),
            realm: Realm::new(),
        }
    }

    /// Generate the map and put the party at the capital
    pub fn start(&mut self) -> Result<usize, GridError> {
        tracing::info!(
            "Initializing session with {} territories",
            self.total_territories()
        );
        self.rebuild()
    }

    /// Regenerate the map and return the party to the capital
    pub fn reset(&mut self) -> Result<usize, GridError> {
        let count = self.rebuild()?;
        tracing::info!("Session reset");
        Ok(count)
    }

    pub fn total_territories(&self) -> usize {
        self.grid.config().total_tiles()
    }

    /// Advance time-sliced state by one frame
    pub fn tick(&mut self, dt: f32) {
        self.party.tick(dt);
    }

    /// Move the party toward `target` if allowed
    pub fn move_party(&mut self, target: HexCoord) -> bool {
        self.party.move_to(&self.grid, target)
    }

    /// Tiles are rebuilt unowned, so every kingdom's claims are dropped
    /// along with any move in flight.
    fn rebuild(&mut self) -> Result<usize, GridError> {
        let count = self.grid.generate()?;
        self.realm.clear_claims();
        self.party.cancel();
        self.party.set_position(&self.grid, HexCoord::ZERO);
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::territory::{Kingdom, KingdomId};
    use crate::tile::Rgba;

    #[test]
    fn test_start() {
        let mut session = Session::new(GridConfig::kingmaker());
        assert_eq!(session.total_territories(), 7);
        assert_eq!(session.start(), Ok(7));
        assert!(session.party.is_on_tile(HexCoord::ZERO));
    }

    #[test]
    fn test_reset_clears_claims_and_party() {
        let mut session = Session::new(GridConfig::kingmaker().with_radius(2));
        session.start().unwrap();
        session
            .realm
            .add_kingdom(Kingdom::new(KingdomId(1), "Player", Rgba::rgb(0.0, 0.0, 1.0)))
            .unwrap();
        session
            .realm
            .assign_tile(&mut session.grid, KingdomId(1), HexCoord::ZERO)
            .unwrap();

        assert!(session.move_party(HexCoord::new(1, 0)));
        session.tick(10.0);
        assert_eq!(session.party.position(), HexCoord::new(1, 0));

        assert_eq!(session.reset(), Ok(19));
        assert_eq!(session.party.position(), HexCoord::ZERO);
        assert_eq!(session.realm.kingdom(KingdomId(1)).unwrap().tile_count(), 0);
        assert_eq!(session.grid.capital().unwrap().owner(), None);
    }

    #[test]
    fn test_restart_drops_stale_claims() {
        let mut session = Session::new(GridConfig::kingmaker());
        session.start().unwrap();
        session
            .realm
            .add_kingdom(Kingdom::new(KingdomId(1), "Player", Rgba::WHITE))
            .unwrap();
        session
            .realm
            .assign_tile(&mut session.grid, KingdomId(1), HexCoord::ZERO)
            .unwrap();
        assert!(session.move_party(HexCoord::new(1, 0)));

        assert_eq!(session.start(), Ok(7));
        assert!(!session.realm.kingdom(KingdomId(1)).unwrap().owns(HexCoord::ZERO));
        assert_eq!(session.grid.capital().unwrap().owner(), None);
        assert!(session.party.is_on_tile(HexCoord::ZERO));
    }

    #[test]
    fn test_failed_start() {
        let mut config = GridConfig::kingmaker();
        config.capital = None;
        let mut session = Session::new(config);
        assert!(session.start().is_err());
        assert!(session.grid.is_empty());
    }
}
