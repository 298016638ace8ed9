//! Lifecycle State Machine and Simulation Tick
//!
//! The per-tick orchestrator that must be 100% deterministic: given a fixed
//! RNG seed and a fixed sequence of `(dt_ms, InputFrame)`, the simulation
//! reproduces bit-exactly on any platform.
//!
//! The host loop integrates entity and player positions from the published
//! velocities, writes positions back, then calls [`tick`] once per frame.

use crate::core::fixed::MAX_TICK_MS;
use crate::core::hash::hash_hex;
use crate::game::collision;
use crate::game::difficulty::{self, DifficultyConfig};
use crate::game::events::GameEvent;
use crate::game::input::{Hold, InputFrame};
use crate::game::powerup::{self, PowerupConfig};
use crate::game::score::{self, ScoreConfig};
use crate::game::spawn::{self, SpawnConfig};
use crate::game::state::{
    DifficultyState, EntityKind, Facing, SessionPhase, SessionState, SpawnTimers,
};
use crate::storage::{self, PersistenceGateway};

/// Result of a tick.
#[derive(Debug, Default)]
pub struct TickResult {
    /// Events generated this tick, for the host's renderer/FX sink
    pub events: Vec<GameEvent>,
    /// Whether the session is in GameOver after this tick
    pub game_over: bool,
}

/// Configuration for a session, aggregated per component.
#[derive(Clone, Copy, Debug, Default)]
pub struct SessionConfig {
    /// Difficulty progression and fall-speed curves
    pub difficulty: DifficultyConfig,
    /// Spawn streams
    pub spawn: SpawnConfig,
    /// Scoring and combo window
    pub score: ScoreConfig,
    /// Shield and magnet effects
    pub powerup: PowerupConfig,
}

/// Clamp a host-supplied frame delta.
///
/// Negative or out-of-range values clamp to 0 rather than moving time
/// backward or fast-forwarding through a multi-second pause.
#[inline]
pub fn clamp_dt(dt_ms: i64) -> u32 {
    if (0..=MAX_TICK_MS).contains(&dt_ms) {
        dt_ms as u32
    } else {
        0
    }
}

/// Create an idle session, loading the persisted high score once.
///
/// A missing, malformed, or unreadable stored value loads as 0 and never
/// surfaces as an error.
pub fn new_session(rng_seed: u64, store: &dyn PersistenceGateway) -> SessionState {
    let high_score = storage::load_high_score(store);
    tracing::info!(rng_seed, high_score, "session created");
    SessionState::new(rng_seed, high_score)
}

/// Start a run from Idle. Any other phase is a no-op.
pub fn start(state: &mut SessionState) {
    if state.phase != SessionPhase::Idle {
        return;
    }
    begin_run(state);
}

/// Restart after GameOver with a fresh run. Any other phase is a no-op.
///
/// The high score, session clock, and RNG stream carry over; everything
/// else resets.
pub fn restart(state: &mut SessionState) {
    if state.phase != SessionPhase::GameOver {
        return;
    }
    begin_run(state);
}

/// Reset gameplay sub-states and enter Playing.
fn begin_run(state: &mut SessionState) {
    state.score.reset();
    state.powerups.reset();
    state.difficulty = DifficultyState::new();
    state.spawn_timers = SpawnTimers::default();
    state.entities.clear();
    state.player = crate::game::state::PlayerState::new();
    state.phase = SessionPhase::Playing;
    tracing::info!(high_score = state.score.high_score, "run started");
}

/// End the run on a fatal hazard.
fn trigger_game_over(state: &mut SessionState) {
    if state.phase != SessionPhase::Playing {
        return;
    }
    state.phase = SessionPhase::GameOver;
    state.push_event(GameEvent::game_over(
        state.clock_ms,
        state.score.score,
        state.score.high_score,
    ));
    tracing::info!(
        score = state.score.score,
        high_score = state.score.high_score,
        state_hash = %hash_hex(&state.compute_hash()),
        "game over"
    );
}

/// Apply lifecycle and steering input for this frame.
fn apply_input(state: &mut SessionState, input: InputFrame) {
    if state.phase == SessionPhase::Playing {
        match input.hold {
            Hold::Left => state.player.facing = Facing::Left,
            Hold::Right => state.player.facing = Facing::Right,
            Hold::None => {}
        }
    }

    if input.primary_pressed() {
        match state.phase {
            SessionPhase::Idle => start(state),
            SessionPhase::GameOver => restart(state),
            // The tap's jump half is the host physics' job; the core owns
            // the direction reversal
            SessionPhase::Playing => {
                state.player.facing = state.player.facing.reversed();
            }
        }
    }
}

/// Run one simulation tick.
///
/// # Arguments
///
/// * `state` - The session state (will be mutated)
/// * `input` - This frame's input signals
/// * `dt_ms` - Frame delta; clamped to `[0, MAX_TICK_MS]`
/// * `config` - Session configuration
/// * `store` - High-score persistence gateway
///
/// # Determinism
///
/// This function is 100% deterministic:
/// - Fixed-point math only
/// - BTreeMap iteration order
/// - Deterministic RNG (state.rng)
/// - No system calls, no timers; all scheduling is clock accumulators
pub fn tick(
    state: &mut SessionState,
    input: InputFrame,
    dt_ms: i64,
    config: &SessionConfig,
    store: &mut dyn PersistenceGateway,
) -> TickResult {
    let mut result = TickResult::default();
    let dt = clamp_dt(dt_ms);

    // Lifecycle triggers come first so a start/restart takes effect on the
    // frame it was pressed
    apply_input(state, input);

    if state.phase != SessionPhase::Playing {
        // Idle and GameOver do nothing per tick: spawning, difficulty, and
        // decay are all gated on Playing. Spawned entities stay visible for
        // the renderer until a restart clears them.
        result.game_over = state.phase == SessionPhase::GameOver;
        result.events = state.take_events();
        return result;
    }

    // 0. Advance the session clock
    state.clock_ms += dt as u64;

    // 1. Difficulty curve
    difficulty::advance(state, &config.difficulty, dt);

    // 2. Scheduled spawns (the host integrated positions before this call)
    spawn::advance(state, config, dt);

    // 3. Power-up deadlines, then magnet velocity overrides
    powerup::advance(state);
    powerup::apply_magnet(state, &config.powerup);

    // 4. Combo decay independent of collection events
    score::on_idle_tick(state, &config.score);

    // 5. First-touch overlaps in entity-id order
    let overlaps = collision::resolve_overlaps(state);

    // 6. Reactions; consumed entities leave the collection, never reused
    let mut consumed = Vec::with_capacity(overlaps.len());
    for overlap in overlaps {
        consumed.push(overlap.entity_id);

        match overlap.kind {
            EntityKind::Ingredient => {
                let points = score::on_collect(state, store, &config.score);
                state.push_event(GameEvent::entity_collected(
                    state.clock_ms,
                    overlap.entity_id,
                    overlap.kind,
                    overlap.position,
                    points,
                    state.score.score,
                ));
            }
            EntityKind::Hazard => {
                let absorbed = powerup::absorb_hazard_hit(state);
                state.push_event(GameEvent::entity_hit(
                    state.clock_ms,
                    overlap.entity_id,
                    overlap.position,
                    absorbed,
                ));
                if !absorbed {
                    trigger_game_over(state);
                    result.game_over = true;
                    break;
                }
            }
            EntityKind::Powerup(kind) => {
                powerup::on_collect(state, kind, &config.powerup);
                state.push_event(GameEvent::entity_collected(
                    state.clock_ms,
                    overlap.entity_id,
                    overlap.kind,
                    overlap.position,
                    0,
                    state.score.score,
                ));
            }
        }
    }
    for entity_id in consumed {
        state.entities.remove(&entity_id);
    }

    // 7. Offscreen sweep, independent of collision results
    let removed = collision::despawn_offscreen(state);
    if removed > 0 {
        tracing::debug!(removed, "despawned offscreen");
    }

    result.events = state.take_events();
    result
}

/// Replay a recorded session from its input trace.
///
/// Runs against an in-memory store (high score starts at 0). Returns the
/// final state and every event; compare `compute_hash()` against the live
/// run to verify the replay.
pub fn replay_session(
    rng_seed: u64,
    frames: &[(i64, InputFrame)],
    config: &SessionConfig,
) -> (SessionState, Vec<GameEvent>) {
    let mut store = storage::MemoryStore::new();
    let mut state = new_session(rng_seed, &store);
    let mut all_events = Vec::new();

    for (dt_ms, input) in frames {
        let result = tick(&mut state, *input, *dt_ms, config, &mut store);
        all_events.extend(result.events);
    }

    (state, all_events)
}
