//! Entity Spawning
//!
//! Deterministic scheduled spawning. Two independent millisecond
//! accumulators (ingredient stream, hazard stream) decide *when* a spawn
//! fires; a single weighted roll decides *what* drops. Power-ups have no
//! stream of their own and only arrive through the roll.

use crate::core::fixed::{SPAWN_Y};
use crate::core::rng::DeterministicRng;
use crate::core::vec2::FixedVec2;
use crate::game::difficulty;
use crate::game::events::GameEvent;
use crate::game::state::{EntityKind, PowerupKind, SessionPhase, SessionState};
use crate::game::tick::SessionConfig;

/// Configuration for entity spawning.
#[derive(Clone, Copy, Debug)]
pub struct SpawnConfig {
    /// Hazard-stream cadence (the ingredient-stream cadence is published by
    /// the difficulty controller)
    pub hazard_interval_ms: u32,
    /// Cap on live entities; spawns are skipped at the cap
    pub max_live_entities: usize,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            hazard_interval_ms: crate::core::fixed::HAZARD_SPAWN_INTERVAL_MS,
            max_live_entities: 64,
        }
    }
}

/// Advance the spawn streams by one tick.
///
/// Accumulators drain in a loop, so one large (clamped) `dt` can emit
/// several spawns in deterministic order. Suppressed entirely outside of
/// Playing - phase gating is how spawn timers are "cancelled".
pub fn advance(state: &mut SessionState, config: &SessionConfig, dt_ms: u32) {
    if state.phase != SessionPhase::Playing {
        return;
    }

    // Ingredient stream: cadence published by the difficulty controller
    let interval = state.difficulty.spawn_interval_ms;
    if interval > 0 {
        state.spawn_timers.ingredient_acc_ms += dt_ms;
        while state.spawn_timers.ingredient_acc_ms >= interval {
            state.spawn_timers.ingredient_acc_ms -= interval;
            spawn_one(state, config);
        }
    }

    // Hazard stream: independent cadence
    let interval = config.spawn.hazard_interval_ms;
    if interval > 0 {
        state.spawn_timers.hazard_acc_ms += dt_ms;
        while state.spawn_timers.hazard_acc_ms >= interval {
            state.spawn_timers.hazard_acc_ms -= interval;
            spawn_one(state, config);
        }
    }
}

/// Spawn one entity above the playfield.
fn spawn_one(state: &mut SessionState, config: &SessionConfig) {
    if state.entities.len() >= config.spawn.max_live_entities {
        return;
    }

    let x = state.rng.random_spawn_x();
    let kind = roll_kind(&mut state.rng);
    let speed = difficulty::fall_speed(&config.difficulty, state.difficulty.level, kind);

    let position = FixedVec2::new(x, SPAWN_Y);
    let velocity = FixedVec2::new(0, speed);
    let entity_id = state.spawn_entity(kind, position, velocity);

    tracing::debug!(entity_id, ?kind, x = crate::core::fixed::to_float(x), "spawned");
    state.push_event(GameEvent::entity_spawned(
        state.clock_ms,
        entity_id,
        kind,
        position,
    ));
}

/// Pick what drops with one weighted roll.
///
/// Roll 1-10: 1-6 ingredient, 7-9 hazard, 10 power-up, the power-up split
/// 50/50 shield vs magnet. Any other roll is a programmer error and fails
/// fast.
fn roll_kind(rng: &mut DeterministicRng) -> EntityKind {
    let roll = rng.next_int_range(1, 10);
    match roll {
        1..=6 => EntityKind::Ingredient,
        7..=9 => EntityKind::Hazard,
        10 => {
            if rng.next_int(2) == 0 {
                EntityKind::Powerup(PowerupKind::Shield)
            } else {
                EntityKind::Powerup(PowerupKind::Magnet)
            }
        }
        _ => unreachable!("spawn roll out of range: {roll}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixed::{SPAWN_MARGIN, PLAYFIELD_WIDTH};

    fn playing_state(seed: u64) -> SessionState {
        let mut state = SessionState::new(seed, 0);
        state.phase = SessionPhase::Playing;
        state
    }

    #[test]
    fn test_spawn_determinism() {
        let config = SessionConfig::default();
        let mut state1 = playing_state(12345);
        let mut state2 = playing_state(12345);

        for _ in 0..300 {
            advance(&mut state1, &config, 16);
            advance(&mut state2, &config, 16);
        }

        assert_eq!(state1.entities.len(), state2.entities.len());
        assert!(!state1.entities.is_empty());

        for (id, entity1) in &state1.entities {
            let entity2 = &state2.entities[id];
            assert_eq!(entity1.position, entity2.position);
            assert_eq!(entity1.kind, entity2.kind);
            assert_eq!(entity1.velocity, entity2.velocity);
        }
    }

    #[test]
    fn test_spawn_cadence() {
        let config = SessionConfig::default();
        let mut state = playing_state(7);

        // One ingredient-stream interval, no hazard-stream interval yet
        advance(&mut state, &config, 800);
        assert_eq!(state.entities.len(), 1);

        // Second ingredient elapse + first hazard elapse
        advance(&mut state, &config, 800);
        assert_eq!(state.entities.len(), 3);
    }

    #[test]
    fn test_spawn_positions_respect_margins() {
        let config = SessionConfig::default();
        let mut state = playing_state(99);

        for _ in 0..100 {
            advance(&mut state, &config, 800);
        }

        for entity in state.entities.values() {
            assert!(entity.position.x >= SPAWN_MARGIN);
            assert!(entity.position.x < PLAYFIELD_WIDTH - SPAWN_MARGIN);
            assert_eq!(entity.position.y, SPAWN_Y);
            // Everything falls straight down until a magnet interferes
            assert_eq!(entity.velocity.x, 0);
            assert!(entity.velocity.y > 0);
        }
    }

    #[test]
    fn test_roll_kind_weights() {
        let mut rng = DeterministicRng::new(4242);
        let mut ingredients = 0u32;
        let mut hazards = 0u32;
        let mut powerups = 0u32;

        for _ in 0..10_000 {
            match roll_kind(&mut rng) {
                EntityKind::Ingredient => ingredients += 1,
                EntityKind::Hazard => hazards += 1,
                EntityKind::Powerup(_) => powerups += 1,
            }
        }

        // Expected 60% / 30% / 10%; allow generous slack
        assert!((5500..=6500).contains(&ingredients), "{ingredients}");
        assert!((2500..=3500).contains(&hazards), "{hazards}");
        assert!((700..=1300).contains(&powerups), "{powerups}");
    }

    #[test]
    fn test_no_spawns_outside_playing() {
        let config = SessionConfig::default();
        let mut state = SessionState::new(1, 0);

        advance(&mut state, &config, 10_000);
        assert!(state.entities.is_empty());

        state.phase = SessionPhase::GameOver;
        advance(&mut state, &config, 10_000);
        assert!(state.entities.is_empty());
        assert_eq!(state.spawn_timers.ingredient_acc_ms, 0);
    }

    #[test]
    fn test_live_entity_cap() {
        let mut config = SessionConfig::default();
        config.spawn.max_live_entities = 5;
        let mut state = playing_state(3);

        for _ in 0..100 {
            advance(&mut state, &config, 800);
        }

        assert_eq!(state.entities.len(), 5);
    }
}
