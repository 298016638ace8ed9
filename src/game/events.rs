//! Game Events
//!
//! Notifications generated during simulation for the host's renderer/FX
//! sink and for replay verification. The core owns no rendering state;
//! the host drains these from each `TickResult`.

use serde::{Serialize, Deserialize};
use crate::core::vec2::FixedVec2;
use crate::game::state::EntityKind;

/// Priority for event processing order.
///
/// Lower value = processed first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum EventPriority {
    /// Hazard hits processed first
    HazardHit = 0,
    /// Then catches
    Collection = 1,
    /// Then combo milestones
    Combo = 2,
    /// Then spawns
    Spawn = 3,
    /// Then lifecycle transitions
    Lifecycle = 4,
    /// Lowest priority
    Other = 255,
}

/// Game event data.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum GameEventData {
    /// A new entity entered the playfield
    EntitySpawned {
        /// Entity ID
        entity_id: u32,
        /// What was spawned
        kind: EntityKind,
        /// Spawn position
        position: FixedVec2,
    },

    /// The player caught an entity (ingredient or power-up)
    EntityCollected {
        /// Entity ID
        entity_id: u32,
        /// What was caught
        kind: EntityKind,
        /// Position at the moment of the catch
        position: FixedVec2,
        /// Points awarded (0 for power-ups)
        points: u32,
        /// Score after the catch
        new_score: u32,
    },

    /// The player touched a hazard
    EntityHit {
        /// Entity ID
        entity_id: u32,
        /// Position at the moment of the hit
        position: FixedVec2,
        /// Whether a shield charge absorbed it
        absorbed: bool,
    },

    /// The combo streak reached a new count
    ComboAchieved {
        /// Current streak length
        combo: u32,
    },

    /// A fatal hazard ended the run
    GameOver {
        /// Score at the end of the run
        final_score: u32,
        /// Best score including this run
        high_score: u32,
    },

    /// The high score was beaten and written back
    HighScoreUpdated {
        /// The new high score
        high_score: u32,
    },
}

/// A game event with timing and priority.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameEvent {
    /// Session clock when the event occurred
    pub clock_ms: u64,

    /// Processing priority
    pub priority: EventPriority,

    /// Entity involved (for tie-breaking)
    pub entity_id: Option<u32>,

    /// Event data
    pub data: GameEventData,
}

impl GameEvent {
    /// Create a new event.
    pub fn new(clock_ms: u64, priority: EventPriority, data: GameEventData) -> Self {
        let entity_id = match &data {
            GameEventData::EntitySpawned { entity_id, .. } => Some(*entity_id),
            GameEventData::EntityCollected { entity_id, .. } => Some(*entity_id),
            GameEventData::EntityHit { entity_id, .. } => Some(*entity_id),
            _ => None,
        };

        Self {
            clock_ms,
            priority,
            entity_id,
            data,
        }
    }

    /// Create entity spawned event.
    pub fn entity_spawned(
        clock_ms: u64,
        entity_id: u32,
        kind: EntityKind,
        position: FixedVec2,
    ) -> Self {
        Self::new(
            clock_ms,
            EventPriority::Spawn,
            GameEventData::EntitySpawned {
                entity_id,
                kind,
                position,
            },
        )
    }

    /// Create entity collected event.
    pub fn entity_collected(
        clock_ms: u64,
        entity_id: u32,
        kind: EntityKind,
        position: FixedVec2,
        points: u32,
        new_score: u32,
    ) -> Self {
        Self::new(
            clock_ms,
            EventPriority::Collection,
            GameEventData::EntityCollected {
                entity_id,
                kind,
                position,
                points,
                new_score,
            },
        )
    }

    /// Create entity hit event.
    pub fn entity_hit(clock_ms: u64, entity_id: u32, position: FixedVec2, absorbed: bool) -> Self {
        Self::new(
            clock_ms,
            EventPriority::HazardHit,
            GameEventData::EntityHit {
                entity_id,
                position,
                absorbed,
            },
        )
    }

    /// Create combo achieved event.
    pub fn combo_achieved(clock_ms: u64, combo: u32) -> Self {
        Self::new(
            clock_ms,
            EventPriority::Combo,
            GameEventData::ComboAchieved { combo },
        )
    }

    /// Create game over event.
    pub fn game_over(clock_ms: u64, final_score: u32, high_score: u32) -> Self {
        Self::new(
            clock_ms,
            EventPriority::Lifecycle,
            GameEventData::GameOver {
                final_score,
                high_score,
            },
        )
    }

    /// Create high score updated event.
    pub fn high_score_updated(clock_ms: u64, high_score: u32) -> Self {
        Self::new(
            clock_ms,
            EventPriority::Lifecycle,
            GameEventData::HighScoreUpdated { high_score },
        )
    }
}

impl PartialEq for GameEvent {
    fn eq(&self, other: &Self) -> bool {
        self.clock_ms == other.clock_ms
            && self.priority == other.priority
            && self.entity_id == other.entity_id
    }
}

impl Eq for GameEvent {}

impl PartialOrd for GameEvent {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for GameEvent {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Sort by: clock, then priority, then entity id
        self.clock_ms
            .cmp(&other.clock_ms)
            .then(self.priority.cmp(&other.priority))
            .then(self.entity_id.cmp(&other.entity_id))
    }
}
