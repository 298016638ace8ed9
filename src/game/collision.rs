//! Collision Detection
//!
//! Deterministic first-touch overlap resolution between the player and the
//! live entities, plus the offscreen despawn sweep. Overlap tests are
//! axis-aligned box intersections - pure comparisons, no products, so
//! pixel-scale fixed-point coordinates cannot overflow here.

use serde::{Serialize, Deserialize};

use crate::core::fixed::{PLAYFIELD_HEIGHT, DESPAWN_MARGIN, fixed_abs};
use crate::core::vec2::FixedVec2;
use crate::game::state::{EntityKind, SessionState};

/// Check if two axis-aligned boxes (center + half-extents) overlap.
#[inline]
pub fn aabb_overlap(
    pos_a: FixedVec2,
    half_a: FixedVec2,
    pos_b: FixedVec2,
    half_b: FixedVec2,
) -> bool {
    fixed_abs(pos_a.x.wrapping_sub(pos_b.x)) <= half_a.x.wrapping_add(half_b.x)
        && fixed_abs(pos_a.y.wrapping_sub(pos_b.y)) <= half_a.y.wrapping_add(half_b.y)
}

/// One first-touch overlap between the player and an entity.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Overlap {
    /// The touched entity
    pub entity_id: u32,
    /// Its kind, for reaction dispatch
    pub kind: EntityKind,
    /// Its position at the moment of the touch
    pub position: FixedVec2,
}

/// Resolve all first-touch overlaps for this tick.
///
/// Entities are visited in ID order (BTreeMap). Each reported entity has
/// `active` cleared *before* this returns, so an entity yields at most one
/// overlap event across its lifetime even if its box keeps intersecting the
/// player's on later ticks.
pub fn resolve_overlaps(state: &mut SessionState) -> Vec<Overlap> {
    let player_pos = state.player.position;
    let player_half = state.player.half_extents;

    let mut overlaps = Vec::new();
    for (entity_id, entity) in state.entities.iter_mut() {
        if !entity.active {
            continue;
        }

        if aabb_overlap(player_pos, player_half, entity.position, entity.half_extents) {
            // First touch consumes the entity
            entity.active = false;
            overlaps.push(Overlap {
                entity_id: *entity_id,
                kind: entity.kind,
                position: entity.position,
            });
        }
    }

    overlaps
}

/// Remove entities that fell past the playfield.
///
/// Runs once per tick over the whole collection, independent of collision
/// results, and removes regardless of `active` state. Returns how many
/// entities were removed.
pub fn despawn_offscreen(state: &mut SessionState) -> usize {
    let cutoff = PLAYFIELD_HEIGHT.wrapping_add(DESPAWN_MARGIN);
    let before = state.entities.len();

    state.entities.retain(|_, entity| entity.position.y <= cutoff);

    before - state.entities.len()
}
