//! Session State Definitions
//!
//! All state types for one catcher session.
//! Uses BTreeMap for deterministic iteration order.

use std::collections::BTreeMap;
use serde::{Serialize, Deserialize};

use crate::core::fixed::{
    Fixed,
    PLAYFIELD_WIDTH, PLAYER_START_Y,
    PLAYER_HALF_WIDTH, PLAYER_HALF_HEIGHT, ENTITY_HALF_EXTENT,
    INGREDIENT_SPAWN_INTERVAL_MS, INGREDIENT_FALL_BASE, INGREDIENT_FALL_PER_LEVEL,
    LEVEL_START,
};
use crate::core::vec2::FixedVec2;
use crate::core::rng::DeterministicRng;
use crate::core::hash::{StateHash, compute_state_hash};
use crate::game::events::GameEvent;

// =============================================================================
// ENTITY KINDS
// =============================================================================

/// Power-up variety carried by a power-up drop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PowerupKind {
    /// Absorbs hazard hits (3 charges)
    Shield = 0,
    /// Pulls nearby ingredients toward the player (timed)
    Magnet = 1,
}

/// What a falling entity is, known at spawn time.
///
/// A tagged variant instead of dynamic collision-callback typing: the
/// resolver reports the kind with every overlap and reactions match on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// Collectible; catching one scores points
    Ingredient,
    /// Catching one costs a shield charge or ends the session
    Hazard,
    /// Grants the carried power-up
    Powerup(PowerupKind),
}

impl EntityKind {
    /// Check if this is a collectible ingredient.
    #[inline]
    pub fn is_ingredient(self) -> bool {
        matches!(self, EntityKind::Ingredient)
    }

    /// Stable numeric code for hashing.
    #[inline]
    pub fn code(self) -> u8 {
        match self {
            EntityKind::Ingredient => 0,
            EntityKind::Hazard => 1,
            EntityKind::Powerup(PowerupKind::Shield) => 2,
            EntityKind::Powerup(PowerupKind::Magnet) => 3,
        }
    }
}

// =============================================================================
// FALLING ENTITY
// =============================================================================

/// One falling entity on the playfield.
///
/// Owned exclusively by the session's entity collection until despawned
/// (consumed or offscreen); removed then, never reused.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FallingEntity {
    /// Unique entity ID (monotonic counter)
    pub id: u32,

    /// Kind, fixed at spawn time
    pub kind: EntityKind,

    /// Box center position
    pub position: FixedVec2,

    /// Box half-extents
    pub half_extents: FixedVec2,

    /// Current velocity; the host integrates it into position, the core
    /// only writes it (at spawn, and per-tick magnet overrides)
    pub velocity: FixedVec2,

    /// Cleared at first touch; an inactive entity can never produce a
    /// second overlap event
    pub active: bool,
}

impl FallingEntity {
    /// Create a new live entity with the standard drop box.
    pub fn new(id: u32, kind: EntityKind, position: FixedVec2, velocity: FixedVec2) -> Self {
        Self {
            id,
            kind,
            position,
            half_extents: FixedVec2::new(ENTITY_HALF_EXTENT, ENTITY_HALF_EXTENT),
            velocity,
            active: true,
        }
    }
}

// =============================================================================
// PLAYER STATE
// =============================================================================

/// Which way the chef is facing/moving.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum Facing {
    /// Moving left
    Left = 0,
    /// Moving right (initial direction)
    #[default]
    Right = 1,
}

impl Facing {
    /// The opposite direction.
    #[inline]
    pub fn reversed(self) -> Self {
        match self {
            Facing::Left => Facing::Right,
            Facing::Right => Facing::Left,
        }
    }
}

/// The player-controlled chef.
///
/// Position is written by the host (movement and physics are external);
/// the core reads it for overlap tests and magnet steering and owns only
/// the facing flag.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlayerState {
    /// Box center position
    pub position: FixedVec2,

    /// Box half-extents
    pub half_extents: FixedVec2,

    /// Current facing; flipped by the primary action while Playing
    pub facing: Facing,
}

impl PlayerState {
    /// Create a player at the start position (bottom center).
    pub fn new() -> Self {
        Self {
            position: FixedVec2::new(PLAYFIELD_WIDTH / 2, PLAYER_START_Y),
            half_extents: FixedVec2::new(PLAYER_HALF_WIDTH, PLAYER_HALF_HEIGHT),
            facing: Facing::Right,
        }
    }
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// SCORE STATE
// =============================================================================

/// Score, combo streak, and high-score bookkeeping.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScoreState {
    /// Points this run; monotonically non-decreasing within a session
    pub score: u32,

    /// Consecutive catches inside the combo window
    pub combo: u32,

    /// Session clock at the last catch (combo window anchor)
    pub last_combo_at_ms: u64,

    /// Best score ever seen; loaded once at session start, survives restarts
    pub high_score: u32,
}

impl ScoreState {
    /// Create score state with a previously persisted high score.
    pub fn new(high_score: u32) -> Self {
        Self {
            score: 0,
            combo: 0,
            last_combo_at_ms: 0,
            high_score,
        }
    }

    /// Reset for a fresh run; the high score is kept.
    pub fn reset(&mut self) {
        self.score = 0;
        self.combo = 0;
        self.last_combo_at_ms = 0;
    }
}

// =============================================================================
// POWER-UP STATE
// =============================================================================

/// Shield charges and magnet activation.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PowerupState {
    /// Hazard hits absorbed before one is fatal
    pub shield_charges: u32,

    /// Magnet attraction currently active?
    pub magnet_active: bool,

    /// Session clock deadline for the magnet effect
    pub magnet_expires_at_ms: u64,
}

impl PowerupState {
    /// Reset for a fresh run.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

// =============================================================================
// DIFFICULTY STATE
// =============================================================================

/// Difficulty progression, monotonically non-decreasing while Playing.
///
/// `spawn_interval_ms` and `fall_speed_base` are the controller's published
/// outputs, kept current by `difficulty::advance`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DifficultyState {
    /// Total play time accumulated this run
    pub elapsed_play_ms: u64,

    /// Current difficulty level (Q16.16, starts at 1.0, unbounded)
    pub level: Fixed,

    /// Milliseconds accumulated toward the next level step
    pub level_acc_ms: u32,

    /// Current ingredient-stream spawn interval
    pub spawn_interval_ms: u32,

    /// Ingredient fall speed at the current level
    pub fall_speed_base: Fixed,
}

impl DifficultyState {
    /// Create difficulty state at level 1.
    pub fn new() -> Self {
        Self {
            elapsed_play_ms: 0,
            level: LEVEL_START,
            level_acc_ms: 0,
            spawn_interval_ms: INGREDIENT_SPAWN_INTERVAL_MS,
            // Ingredient curve evaluated at level 1.0
            fall_speed_base: INGREDIENT_FALL_BASE.wrapping_add(INGREDIENT_FALL_PER_LEVEL),
        }
    }
}

impl Default for DifficultyState {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// SPAWN TIMERS
// =============================================================================

/// Independent spawn-stream accumulators.
///
/// Scheduled spawns are time-accumulator checks evaluated inside the tick,
/// never free-running timers; gating on the session phase is how they are
/// "cancelled".
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SpawnTimers {
    /// Milliseconds accumulated toward the next ingredient-stream spawn
    pub ingredient_acc_ms: u32,

    /// Milliseconds accumulated toward the next hazard-stream spawn
    pub hazard_acc_ms: u32,
}

// =============================================================================
// SESSION PHASE
// =============================================================================

/// Lifecycle phase of the session; the sole authority for whether the
/// spawner and difficulty curve are live.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum SessionPhase {
    /// Waiting for the first start trigger
    #[default]
    Idle = 0,
    /// Active gameplay
    Playing = 1,
    /// Run ended on a fatal hazard; waiting for a restart trigger
    GameOver = 2,
}

// =============================================================================
// SESSION STATE
// =============================================================================

/// Complete state of one catcher session.
///
/// The single aggregate every component operates on; there is no hidden
/// global state. Uses BTreeMap for deterministic iteration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionState {
    /// Current lifecycle phase
    pub phase: SessionPhase,

    /// Session clock in ms; only advances while Playing
    pub clock_ms: u64,

    /// RNG seed (for verification)
    pub rng_seed: u64,

    /// Deterministic RNG state
    #[serde(skip)]
    pub rng: DeterministicRng,

    /// The player-controlled chef
    pub player: PlayerState,

    /// Score and combo state
    pub score: ScoreState,

    /// Power-up state
    pub powerups: PowerupState,

    /// Difficulty progression
    pub difficulty: DifficultyState,

    /// Spawn-stream accumulators
    pub spawn_timers: SpawnTimers,

    /// All live falling entities (BTreeMap for deterministic iteration)
    pub entities: BTreeMap<u32, FallingEntity>,

    /// Next entity ID (monotonic counter)
    pub next_entity_id: u32,

    /// Events generated this tick (drained each tick)
    #[serde(skip)]
    pub pending_events: Vec<GameEvent>,
}

impl SessionState {
    /// Create a new idle session.
    ///
    /// `high_score` is the previously persisted value; see
    /// `tick::new_session` for the storage-aware constructor.
    pub fn new(rng_seed: u64, high_score: u32) -> Self {
        Self {
            phase: SessionPhase::Idle,
            clock_ms: 0,
            rng_seed,
            rng: DeterministicRng::new(rng_seed),
            player: PlayerState::new(),
            score: ScoreState::new(high_score),
            powerups: PowerupState::default(),
            difficulty: DifficultyState::new(),
            spawn_timers: SpawnTimers::default(),
            entities: BTreeMap::new(),
            next_entity_id: 0,
            pending_events: Vec::new(),
        }
    }

    /// Add a new falling entity and return its ID.
    pub fn spawn_entity(
        &mut self,
        kind: EntityKind,
        position: FixedVec2,
        velocity: FixedVec2,
    ) -> u32 {
        let id = self.next_entity_id;
        self.next_entity_id += 1;
        let entity = FallingEntity::new(id, kind, position, velocity);
        self.entities.insert(id, entity);
        id
    }

    /// Write the player position (host-integrated), clamped to the playfield.
    pub fn set_player_position(&mut self, position: FixedVec2) {
        self.player.position = position.clamp_to_playfield();
    }

    /// Count of entities still eligible for collision.
    pub fn active_entity_count(&self) -> usize {
        self.entities.values().filter(|e| e.active).count()
    }

    /// Compute hash of current state for verification.
    pub fn compute_hash(&self) -> StateHash {
        compute_state_hash(self.clock_ms, self.rng_seed, |hasher| {
            hasher.update_u8(self.phase as u8);

            // Player
            hasher.update_vec2(self.player.position);
            hasher.update_u8(self.player.facing as u8);

            // Score
            hasher.update_u32(self.score.score);
            hasher.update_u32(self.score.combo);
            hasher.update_u64(self.score.last_combo_at_ms);
            hasher.update_u32(self.score.high_score);

            // Power-ups
            hasher.update_u32(self.powerups.shield_charges);
            hasher.update_bool(self.powerups.magnet_active);
            hasher.update_u64(self.powerups.magnet_expires_at_ms);

            // Difficulty
            hasher.update_u64(self.difficulty.elapsed_play_ms);
            hasher.update_fixed(self.difficulty.level);

            // Entities in sorted ID order (BTreeMap guarantees this)
            for (id, entity) in &self.entities {
                hasher.update_u32(*id);
                hasher.update_u8(entity.kind.code());
                hasher.update_vec2(entity.position);
                hasher.update_vec2(entity.velocity);
                hasher.update_bool(entity.active);
            }
            hasher.update_u32(self.next_entity_id);
        })
    }

    /// Take pending events (consumes them).
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Push a game event.
    pub fn push_event(&mut self, event: GameEvent) {
        self.pending_events.push(event);
    }
}

// =============================================================================
// TESTS
// =============================================================================
