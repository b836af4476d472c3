//! Party token movement
//!
//! The party is either `Idle` on a hex or `Moving` toward an adjacent one.
//! A move is requested with [`Party::move_to`] and then advanced by the
//! caller's update loop through [`Party::tick`].

use glam::Vec2;

use crate::events::{EventBus, SubscriptionId};
use crate::grid::TileStore;
use crate::hex::HexCoord;
use crate::tile::Tile;

pub const DEFAULT_SPEED: f32 = 5.0;

/// Transits shorter than this use [`FALLBACK_DURATION`] instead
const MIN_DURATION: f32 = 0.01;
const FALLBACK_DURATION: f32 = 0.1;

/// Notifications in firing order: `MovementStarted` when a move is accepted,
/// then `MovementCompleted` and `PartyMoved` once the position is committed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PartyEvent {
    MovementStarted(HexCoord),
    MovementCompleted(HexCoord),
    PartyMoved,
}

/// An in-flight move between two adjacent hexes
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transit {
    pub from: HexCoord,
    pub to: HexCoord,
    pub start: Vec2,
    pub end: Vec2,
    pub elapsed: f32,
    pub duration: f32,
}

impl Transit {
    /// Linear progress in 0..=1
    pub fn progress(&self) -> f32 {
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    /// Token position with smoothstep easing
    pub fn position(&self) -> Vec2 {
        self.start.lerp(self.end, smoothstep(self.progress()))
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MoveState {
    Idle,
    Moving(Transit),
}

/// `t² (3 - 2t)`
pub fn smoothstep(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

#[derive(Debug)]
pub struct Party {
    position: HexCoord,
    state: MoveState,
    speed: f32,
    token: Vec2,
    events: EventBus<PartyEvent>,
}

impl Party {
    /// Idle party at the origin
    pub fn new(speed: f32) -> Self {
        Self {
            position: HexCoord::ZERO,
            state: MoveState::Idle,
            speed,
            token: Vec2::ZERO,
            events: EventBus::new(),
        }
    }

    pub fn position(&self) -> HexCoord {
        self.position
    }

    pub fn state(&self) -> &MoveState {
        &self.state
    }

    pub fn is_moving(&self) -> bool {
        matches!(self.state, MoveState::Moving(_))
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    /// Where the token is drawn; between hexes while moving
    pub fn token_position(&self) -> Vec2 {
        self.token
    }

    /// Progress of the current transit, `None` when idle
    pub fn progress(&self) -> Option<f32> {
        match &self.state {
            MoveState::Moving(transit) => Some(transit.progress()),
            MoveState::Idle => None,
        }
    }

    pub fn is_on_tile(&self, coord: HexCoord) -> bool {
        self.position == coord && !self.is_moving()
    }

    pub fn on_event<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&PartyEvent) + 'static,
    {
        self.events.subscribe(handler)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    // ========================================================================
    // MOVEMENT
    // ========================================================================

    /// Idle, target adjacent, and target tile exists and is passable
    pub fn can_move_to<S: TileStore>(&self, store: &S, target: HexCoord) -> bool {
        !self.is_moving() && self.position.is_adjacent(target) && store.is_passable(target)
    }

    /// Start moving toward an adjacent tile.
    ///
    /// Returns false and changes nothing when the move is not allowed.
    /// Callers are expected to filter with [`Party::moveable_tiles`] first.
    pub fn move_to<S: TileStore>(&mut self, store: &S, target: HexCoord) -> bool {
        if !self.can_move_to(store, target) {
            tracing::debug!("Rejected party move {} -> {}", self.position, target);
            return false;
        }

        let layout = store.layout();
        let start = self.token;
        let end = layout.hex_to_world(target);
        let mut duration = start.distance(end) / self.speed;
        if !(duration >= MIN_DURATION) || !duration.is_finite() {
            duration = FALLBACK_DURATION;
        }

        self.state = MoveState::Moving(Transit {
            from: self.position,
            to: target,
            start,
            end,
            elapsed: 0.0,
            duration,
        });
        self.events.emit(&PartyEvent::MovementStarted(target));
        true
    }

    /// Advance an in-flight move by `dt`. Returns true on the tick that
    /// completes the move. Idle parties ignore ticks.
    pub fn tick(&mut self, dt: f32) -> bool {
        let MoveState::Moving(transit) = &mut self.state else {
            return false;
        };

        transit.elapsed += dt.max(0.0);
        if !transit.is_finished() {
            self.token = transit.position();
            return false;
        }

        let target = transit.to;
        self.token = transit.end;
        self.position = target;
        self.state = MoveState::Idle;

        self.events.emit(&PartyEvent::MovementCompleted(target));
        self.events.emit(&PartyEvent::PartyMoved);
        true
    }

    /// Abort the current move and put the token back at its start.
    /// The committed position is unchanged and no events fire.
    pub fn cancel(&mut self) -> bool {
        let MoveState::Moving(transit) = self.state else {
            return false;
        };
        self.token = transit.start;
        self.state = MoveState::Idle;
        true
    }

    /// Neighbors of the current position that exist and are passable, in
    /// direction order
    pub fn moveable_tiles<'a, S: TileStore>(&self, store: &'a S) -> Vec<&'a Tile> {
        self.position
            .neighbors()
            .iter()
            .filter_map(|n| store.tile(*n))
            .filter(|t| t.is_passable())
            .collect()
    }

    /// Place the party directly, e.g. at the capital on startup.
    /// Ignored while a move is in flight or when `coord` is not an existing
    /// passable tile.
    pub fn set_position<S: TileStore>(&mut self, store: &S, coord: HexCoord) -> bool {
        if self.is_moving() || !store.is_passable(coord) {
            tracing::debug!("Rejected party placement at {}", coord);
            return false;
        }
        self.position = coord;
        self.token = store.layout().hex_to_world(coord);
        self.events.emit(&PartyEvent::PartyMoved);
        true
    }
}

impl Default for Party {
    fn default() -> Self {
        Self::new(DEFAULT_SPEED)
    }
}
