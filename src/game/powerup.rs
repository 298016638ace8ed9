//! Power-Up Effects
//!
//! Shield charges and the timed magnet. The magnet expiry is a deadline on
//! the session clock checked inside the tick, not a free-running timer;
//! its velocity override supersedes gravity only for entities it touched
//! this tick, so steering must be reapplied every tick while in range.

use crate::core::fixed::{
    Fixed, fixed_sqrt_wide,
    SHIELD_CHARGES, MAGNET_DURATION_MS, MAGNET_RADIUS, MAGNET_PULL_SPEED,
};
use crate::core::vec2::FixedVec2;
use crate::game::state::{PowerupKind, SessionState};

/// Configuration for power-up effects.
#[derive(Clone, Copy, Debug)]
pub struct PowerupConfig {
    /// Charges granted by a shield pickup (flat set, never additive)
    pub shield_charges: u32,
    /// Magnet lifetime from pickup
    pub magnet_duration_ms: u64,
    /// Magnet attraction radius (center-to-center)
    pub magnet_radius: Fixed,
    /// Speed at which attracted ingredients fly at the player
    pub magnet_pull_speed: Fixed,
}

impl Default for PowerupConfig {
    fn default() -> Self {
        Self {
            shield_charges: SHIELD_CHARGES,
            magnet_duration_ms: MAGNET_DURATION_MS,
            magnet_radius: MAGNET_RADIUS,
            magnet_pull_speed: MAGNET_PULL_SPEED,
        }
    }
}

/// Apply a collected power-up.
pub fn on_collect(state: &mut SessionState, kind: PowerupKind, config: &PowerupConfig) {
    match kind {
        PowerupKind::Shield => {
            // Flat set: stacking pickups never exceeds the configured count
            state.powerups.shield_charges = config.shield_charges;
            tracing::info!(charges = config.shield_charges, "shield up");
        }
        PowerupKind::Magnet => {
            state.powerups.magnet_active = true;
            state.powerups.magnet_expires_at_ms = state.clock_ms + config.magnet_duration_ms;
            tracing::info!(expires_at_ms = state.powerups.magnet_expires_at_ms, "magnet on");
        }
    }
}

/// Expire the magnet once its deadline passes.
pub fn advance(state: &mut SessionState) {
    if state.powerups.magnet_active && state.clock_ms >= state.powerups.magnet_expires_at_ms {
        state.powerups.magnet_active = false;
        tracing::debug!("magnet expired");
    }
}

/// Steer in-range ingredients at the player while the magnet is active.
///
/// Every live ingredient within the radius has its velocity overwritten to
/// point straight at the player at the pull speed. Hazards and power-ups
/// are never attracted.
pub fn apply_magnet(state: &mut SessionState, config: &PowerupConfig) {
    if !state.powerups.magnet_active {
        return;
    }

    let target = state.player.position;
    let radius_sq = (config.magnet_radius as i64) * (config.magnet_radius as i64);

    for entity in state.entities.values_mut() {
        if !entity.active || !entity.kind.is_ingredient() {
            continue;
        }

        let dist_sq = entity.position.distance_squared_wide(target);
        if dist_sq > radius_sq {
            continue;
        }

        entity.velocity = steer_toward(entity.position, target, config.magnet_pull_speed);
    }
}

/// Absorb a hazard hit with a shield charge.
///
/// Returns true if a charge was consumed (hit absorbed); false means the
/// caller must end the run.
pub fn absorb_hazard_hit(state: &mut SessionState) -> bool {
    if state.powerups.shield_charges > 0 {
        state.powerups.shield_charges -= 1;
        tracing::debug!(remaining = state.powerups.shield_charges, "shield absorbed hazard");
        true
    } else {
        false
    }
}

/// Velocity of magnitude `speed` pointing from `from` at `to`.
///
/// Widened i64 math throughout: pixel-scale deltas overflow Q16.16
/// products, and `|component| <= speed` keeps the result in range.
fn steer_toward(from: FixedVec2, to: FixedVec2, speed: Fixed) -> FixedVec2 {
    let dx = to.x.wrapping_sub(from.x) as i64;
    let dy = to.y.wrapping_sub(from.y) as i64;

    let dist = fixed_sqrt_wide(dx * dx + dy * dy) as i64;
    if dist == 0 {
        return FixedVec2::ZERO;
    }

    FixedVec2::new(
        ((dx * speed as i64) / dist) as Fixed,
        ((dy * speed as i64) / dist) as Fixed,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixed::{to_fixed, fixed_abs};
    use crate::game::state::EntityKind;

    fn state_with_magnet(clock_ms: u64) -> SessionState {
        let mut state = SessionState::new(1, 0);
        state.clock_ms = clock_ms;
        state.player.position = FixedVec2::from_ints(500, 600);
        on_collect(&mut state, PowerupKind::Magnet, &PowerupConfig::default());
        state
    }

    #[test]
    fn test_shield_flat_set() {
        let mut state = SessionState::new(1, 0);
        let config = PowerupConfig::default();

        on_collect(&mut state, PowerupKind::Shield, &config);
        assert_eq!(state.powerups.shield_charges, 3);

        // One charge spent, then another pickup: back to exactly 3, not 5
        assert!(absorb_hazard_hit(&mut state));
        assert_eq!(state.powerups.shield_charges, 2);
        on_collect(&mut state, PowerupKind::Shield, &config);
        assert_eq!(state.powerups.shield_charges, 3);
    }

    #[test]
    fn test_shield_absorbs_exactly_charges() {
        let mut state = SessionState::new(1, 0);
        on_collect(&mut state, PowerupKind::Shield, &PowerupConfig::default());

        assert!(absorb_hazard_hit(&mut state));
        assert!(absorb_hazard_hit(&mut state));
        assert!(absorb_hazard_hit(&mut state));

        // Fourth hit is fatal
        assert!(!absorb_hazard_hit(&mut state));
        assert_eq!(state.powerups.shield_charges, 0);
    }

    #[test]
    fn test_magnet_expiry_deadline() {
        let mut state = state_with_magnet(10_000);
        assert!(state.powerups.magnet_active);
        assert_eq!(state.powerups.magnet_expires_at_ms, 15_000);

        state.clock_ms = 14_999;
        advance(&mut state);
        assert!(state.powerups.magnet_active);

        // Exactly 5000 ms after activation the effect lapses
        state.clock_ms = 15_000;
        advance(&mut state);
        assert!(!state.powerups.magnet_active);
    }

    #[test]
    fn test_magnet_radius_boundary() {
        let config = PowerupConfig::default();
        let mut state = state_with_magnet(0);

        // 199 px away: attracted. 201 px away: untouched.
        let near = state.spawn_entity(
            EntityKind::Ingredient,
            FixedVec2::from_ints(500 + 199, 600),
            FixedVec2::new(0, to_fixed(230.0)),
        );
        let far = state.spawn_entity(
            EntityKind::Ingredient,
            FixedVec2::from_ints(500 + 201, 600),
            FixedVec2::new(0, to_fixed(230.0)),
        );

        apply_magnet(&mut state, &config);

        let near_velocity = state.entities[&near].velocity;
        let far_velocity = state.entities[&far].velocity;

        // Near ingredient flies straight at the player at pull speed
        assert_eq!(near_velocity.x, -config.magnet_pull_speed);
        assert_eq!(near_velocity.y, 0);

        // Far ingredient keeps falling
        assert_eq!(far_velocity, FixedVec2::new(0, to_fixed(230.0)));
    }

    #[test]
    fn test_magnet_ignores_hazards_and_powerups() {
        let config = PowerupConfig::default();
        let mut state = state_with_magnet(0);

        let hazard = state.spawn_entity(
            EntityKind::Hazard,
            FixedVec2::from_ints(520, 600),
            FixedVec2::new(0, to_fixed(280.0)),
        );
        let powerup = state.spawn_entity(
            EntityKind::Powerup(PowerupKind::Shield),
            FixedVec2::from_ints(480, 600),
            FixedVec2::new(0, to_fixed(225.0)),
        );

        apply_magnet(&mut state, &config);

        assert_eq!(state.entities[&hazard].velocity, FixedVec2::new(0, to_fixed(280.0)));
        assert_eq!(state.entities[&powerup].velocity, FixedVec2::new(0, to_fixed(225.0)));
    }

    #[test]
    fn test_magnet_inactive_leaves_velocities() {
        let config = PowerupConfig::default();
        let mut state = SessionState::new(1, 0);
        state.player.position = FixedVec2::from_ints(500, 600);

        let id = state.spawn_entity(
            EntityKind::Ingredient,
            FixedVec2::from_ints(510, 600),
            FixedVec2::new(0, to_fixed(230.0)),
        );

        apply_magnet(&mut state, &config);
        assert_eq!(state.entities[&id].velocity, FixedVec2::new(0, to_fixed(230.0)));
    }

    #[test]
    fn test_steer_toward_speed_magnitude() {
        let speed = MAGNET_PULL_SPEED;
        let from = FixedVec2::from_ints(400, 500);
        let to = FixedVec2::from_ints(520, 660);

        let velocity = steer_toward(from, to, speed);

        // 3-4-5 direction: components are (0.6, 0.8) * speed
        assert_eq!(velocity.x, to_fixed(180.0));
        assert_eq!(velocity.y, to_fixed(240.0));

        // Degenerate case: already at the target
        assert_eq!(steer_toward(from, from, speed), FixedVec2::ZERO);

        // Magnitude check on an oblique angle, within sqrt rounding
        let oblique = steer_toward(from, FixedVec2::from_ints(417, 613), speed);
        let magnitude = fixed_sqrt_wide(
            oblique.x as i64 * oblique.x as i64 + oblique.y as i64 * oblique.y as i64,
        );
        assert!(fixed_abs(magnitude - speed) < to_fixed(1.0));
    }
}
