//! Difficulty Progression
//!
//! Pure function of elapsed play time: every fixed period the level steps
//! up, and the level feeds the per-kind fall-speed curves and the published
//! spawn cadence. There is no upper bound - unbounded growth over a session
//! is the intended endless-runner shape.

use crate::core::fixed::{
    Fixed, fixed_mul,
    LEVEL_PERIOD_MS, LEVEL_STEP, INGREDIENT_SPAWN_INTERVAL_MS,
    INGREDIENT_FALL_BASE, INGREDIENT_FALL_PER_LEVEL,
    HAZARD_FALL_BASE, HAZARD_FALL_PER_LEVEL,
    POWERUP_FALL_BASE, POWERUP_FALL_PER_LEVEL,
};
use crate::game::state::{EntityKind, SessionState, SessionPhase};

/// Fall-speed curve: `base + level * per_level`.
#[derive(Clone, Copy, Debug)]
pub struct FallCurve {
    /// Speed at level 0
    pub base: Fixed,
    /// Speed gained per difficulty level
    pub per_level: Fixed,
}

impl FallCurve {
    /// Create a curve from base speed and per-level gain.
    pub const fn new(base: Fixed, per_level: Fixed) -> Self {
        Self { base, per_level }
    }

    /// Evaluate the curve at a difficulty level.
    #[inline]
    pub fn at(self, level: Fixed) -> Fixed {
        self.base.wrapping_add(fixed_mul(level, self.per_level))
    }
}

/// Configuration for difficulty progression.
#[derive(Clone, Copy, Debug)]
pub struct DifficultyConfig {
    /// Milliseconds of play per level step
    pub level_period_ms: u32,
    /// Level gained per period
    pub level_step: Fixed,
    /// Ingredient-stream spawn interval published to the spawner
    pub base_spawn_interval_ms: u32,
    /// Ingredient fall-speed curve
    pub ingredient_fall: FallCurve,
    /// Hazard fall-speed curve (faster than ingredients)
    pub hazard_fall: FallCurve,
    /// Power-up fall-speed curve
    pub powerup_fall: FallCurve,
}

impl Default for DifficultyConfig {
    fn default() -> Self {
        Self {
            level_period_ms: LEVEL_PERIOD_MS,
            level_step: LEVEL_STEP,
            base_spawn_interval_ms: INGREDIENT_SPAWN_INTERVAL_MS,
            ingredient_fall: FallCurve::new(INGREDIENT_FALL_BASE, INGREDIENT_FALL_PER_LEVEL),
            hazard_fall: FallCurve::new(HAZARD_FALL_BASE, HAZARD_FALL_PER_LEVEL),
            powerup_fall: FallCurve::new(POWERUP_FALL_BASE, POWERUP_FALL_PER_LEVEL),
        }
    }
}

/// Fall speed for a kind at a level.
#[inline]
pub fn fall_speed(config: &DifficultyConfig, level: Fixed, kind: EntityKind) -> Fixed {
    match kind {
        EntityKind::Ingredient => config.ingredient_fall.at(level),
        EntityKind::Hazard => config.hazard_fall.at(level),
        EntityKind::Powerup(_) => config.powerup_fall.at(level),
    }
}

/// Advance the difficulty curve by one tick.
///
/// Accumulates play time and steps the level once per elapsed period; the
/// published outputs (`spawn_interval_ms`, `fall_speed_base`) are refreshed
/// afterward. Suppressed entirely outside of Playing.
pub fn advance(state: &mut SessionState, config: &DifficultyConfig, dt_ms: u32) {
    if state.phase != SessionPhase::Playing {
        return;
    }

    let difficulty = &mut state.difficulty;
    difficulty.elapsed_play_ms += dt_ms as u64;
    difficulty.level_acc_ms += dt_ms;

    while difficulty.level_acc_ms >= config.level_period_ms {
        difficulty.level_acc_ms -= config.level_period_ms;
        difficulty.level = difficulty.level.wrapping_add(config.level_step);
        tracing::debug!(
            level = crate::core::fixed::to_float(difficulty.level),
            elapsed_ms = difficulty.elapsed_play_ms,
            "difficulty level up"
        );
    }

    // Published controller outputs
    difficulty.spawn_interval_ms = config.base_spawn_interval_ms;
    difficulty.fall_speed_base = config.ingredient_fall.at(difficulty.level);
}
