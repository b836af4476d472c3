//! Walk command - random party walk over a generated grid
//!
//! ## Architecture
//!
//! - Level 1: run() - orchestration
//! - Level 2: setup_session(), walk(), report()
//! - Level 3: step(), create_rng()

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use kingmaker_core::{HexCoord, Kingdom, KingdomId, PartyEvent, Rgba, Session};

const PLAYER: KingdomId = KingdomId(1);

/// Ticks allowed per step before the walk gives up
const MAX_TICKS_PER_STEP: u32 = 10_000;

#[derive(Args)]
pub struct WalkArgs {
    /// Grid config JSON file (built-in Kingmaker config if omitted)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override the config's radius
    #[arg(long)]
    pub radius: Option<u32>,

    /// Number of moves
    #[arg(long, default_value = "10")]
    pub steps: u32,

    /// Frame time in seconds
    #[arg(long, default_value = "0.016")]
    pub dt: f32,

    /// Party speed in world units per second
    #[arg(long)]
    pub speed: Option<f32>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Claim each visited tile for the player kingdom
    #[arg(long)]
    pub claim: bool,
}

/// Outcome of a finished walk
#[derive(Debug)]
pub struct WalkSummary {
    pub path: Vec<HexCoord>,
    pub ticks: u32,
    pub claimed: usize,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

pub fn run(args: WalkArgs) -> Result<()> {
    if !(args.dt > 0.0) {
        anyhow::bail!("--dt must be positive, got {}", args.dt);
    }

    let mut session = setup_session(&args)?;
    let mut rng = create_rng(args.seed);
    let summary = walk(&mut session, &mut rng, args.steps, args.dt, args.claim)?;
    report(&session, &summary);
    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn setup_session(args: &WalkArgs) -> Result<Session> {
    let config = crate::load_config(args.config.as_ref(), args.radius, None)?;
    let mut session = Session::new(config);
    if let Some(speed) = args.speed {
        session.party.set_speed(speed);
    }

    session.party.on_event(|event| match event {
        PartyEvent::MovementStarted(target) => tracing::debug!("Party setting out for {}", target),
        PartyEvent::MovementCompleted(target) => tracing::debug!("Party arrived at {}", target),
        PartyEvent::PartyMoved => {}
    });

    let count = session.start().context("Failed to start session")?;
    tracing::info!("Generated {} tiles", count);

    if args.claim {
        session
            .realm
            .add_kingdom(Kingdom::new(PLAYER, "Player", Rgba::rgb(0.2, 0.4, 0.9)))?;
        session
            .realm
            .assign_tile(&mut session.grid, PLAYER, HexCoord::ZERO)?;
    }
    Ok(session)
}

/// Take up to `steps` random moves, ticking each to completion.
/// Stops early if the party is boxed in.
pub fn walk(
    session: &mut Session,
    rng: &mut ChaCha8Rng,
    steps: u32,
    dt: f32,
    claim: bool,
) -> Result<WalkSummary> {
    let mut summary = WalkSummary {
        path: vec![session.party.position()],
        ticks: 0,
        claimed: 0,
    };

    for _ in 0..steps {
        let Some(target) = pick_target(session, rng) else {
            tracing::warn!("Party at {} has nowhere to go", session.party.position());
            break;
        };
        summary.ticks += step(session, target, dt)?;
        summary.path.push(target);

        if claim {
            let previous = session.realm.assign_tile(&mut session.grid, PLAYER, target)?;
            if previous != Some(PLAYER) {
                summary.claimed += 1;
            }
        }
    }
    Ok(summary)
}

fn report(session: &Session, summary: &WalkSummary) {
    let path: Vec<String> = summary.path.iter().map(|c| c.to_string()).collect();
    println!("Walk: {} moves in {} ticks", summary.path.len() - 1, summary.ticks);
    println!("  path: {}", path.join(" -> "));

    if let Some(kingdom) = session.realm.kingdom(PLAYER) {
        println!(
            "  {}: {} tiles ({} newly claimed), {} border tiles",
            kingdom.name,
            kingdom.tile_count(),
            summary.claimed,
            session.realm.border_tiles(PLAYER).len()
        );
    }
}

// ============================================================================
// LEVEL 3 - HELPERS
// ============================================================================

fn pick_target(session: &Session, rng: &mut ChaCha8Rng) -> Option<HexCoord> {
    let options: Vec<HexCoord> = session
        .party
        .moveable_tiles(&session.grid)
        .iter()
        .map(|tile| tile.coord())
        .collect();
    options.choose(rng).copied()
}

/// Start one move and tick until it lands. Returns ticks spent.
fn step(session: &mut Session, target: HexCoord, dt: f32) -> Result<u32> {
    if !session.move_party(target) {
        anyhow::bail!("Party refused move to {}", target);
    }
    for ticks in 1..=MAX_TICKS_PER_STEP {
        if session.party.tick(dt) {
            return Ok(ticks);
        }
    }
    anyhow::bail!("Move to {} did not finish in {} ticks", target, MAX_TICKS_PER_STEP)
}

fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}
