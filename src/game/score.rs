//! Score and Combo Tracking
//!
//! Points per catch are `base + bonus * combo` on the pre-increment combo;
//! the streak survives as long as catches arrive within the combo window.
//! The high score is loaded once at session start and written back through
//! the persistence gateway whenever it is beaten; gateway failures never
//! reach gameplay.

use crate::core::fixed::{BASE_POINTS, COMBO_BONUS_POINTS, COMBO_TIMEOUT_MS};
use crate::game::events::GameEvent;
use crate::game::state::SessionState;
use crate::storage::{self, PersistenceGateway};

/// Configuration for scoring.
#[derive(Clone, Copy, Debug)]
pub struct ScoreConfig {
    /// Points for a catch at combo 0
    pub base_points: u32,
    /// Extra points per combo step
    pub combo_bonus: u32,
    /// Streak window: a gap longer than this resets the combo
    pub combo_timeout_ms: u64,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            base_points: BASE_POINTS,
            combo_bonus: COMBO_BONUS_POINTS,
            combo_timeout_ms: COMBO_TIMEOUT_MS,
        }
    }
}

/// Apply combo decay once per tick, independent of collection events.
///
/// Keeps the invariant that `combo` is 0 whenever the last catch is older
/// than the window, even if nothing is ever caught again.
pub fn on_idle_tick(state: &mut SessionState, config: &ScoreConfig) {
    let score = &mut state.score;
    if score.combo > 0
        && state.clock_ms.saturating_sub(score.last_combo_at_ms) > config.combo_timeout_ms
    {
        tracing::debug!(combo = score.combo, "combo expired");
        score.combo = 0;
    }
}

/// Register a caught ingredient; returns the points awarded.
///
/// A catch after the window restarts the streak: points are computed on a
/// combo of 0 and the streak count becomes 1.
pub fn on_collect(
    state: &mut SessionState,
    store: &mut dyn PersistenceGateway,
    config: &ScoreConfig,
) -> u32 {
    let now = state.clock_ms;

    if now.saturating_sub(state.score.last_combo_at_ms) > config.combo_timeout_ms {
        state.score.combo = 0;
    }

    let points = config.base_points + config.combo_bonus * state.score.combo;
    state.score.score = state.score.score.saturating_add(points);
    state.score.combo += 1;
    state.score.last_combo_at_ms = now;

    if state.score.combo >= 2 {
        state.push_event(GameEvent::combo_achieved(now, state.score.combo));
    }

    if state.score.score > state.score.high_score {
        state.score.high_score = state.score.score;
        storage::store_high_score(store, state.score.high_score);
        state.push_event(GameEvent::high_score_updated(now, state.score.high_score));
        tracing::info!(high_score = state.score.high_score, "new high score");
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, HIGH_SCORE_KEY};

    fn collect_at(state: &mut SessionState, store: &mut dyn PersistenceGateway, clock_ms: u64) -> u32 {
        state.clock_ms = clock_ms;
        on_collect(state, store, &ScoreConfig::default())
    }

    #[test]
    fn test_points_law() {
        let mut state = SessionState::new(1, 0);
        let mut store = MemoryStore::new();

        // First catch at combo 0: 10 points, combo 1
        assert_eq!(collect_at(&mut state, &mut store, 1000), 10);
        assert_eq!(state.score.score, 10);
        assert_eq!(state.score.combo, 1);

        // 500 ms later: 10 + 2*1 = 12, combo 2
        assert_eq!(collect_at(&mut state, &mut store, 1500), 12);
        assert_eq!(state.score.score, 22);
        assert_eq!(state.score.combo, 2);

        // 2500 ms after that: window blown, back to 10, combo 1
        assert_eq!(collect_at(&mut state, &mut store, 4000), 10);
        assert_eq!(state.score.score, 32);
        assert_eq!(state.score.combo, 1);
    }

    #[test]
    fn test_gap_at_exact_window_keeps_streak() {
        let mut state = SessionState::new(1, 0);
        let mut store = MemoryStore::new();

        collect_at(&mut state, &mut store, 1000);
        // Exactly 2000 ms later is still inside the window
        assert_eq!(collect_at(&mut state, &mut store, 3000), 12);
        assert_eq!(state.score.combo, 2);
    }

    #[test]
    fn test_idle_tick_decay() {
        let mut state = SessionState::new(1, 0);
        let mut store = MemoryStore::new();
        let config = ScoreConfig::default();

        collect_at(&mut state, &mut store, 1000);
        assert_eq!(state.score.combo, 1);

        // Inside the window: streak alive
        state.clock_ms = 2999;
        on_idle_tick(&mut state, &config);
        assert_eq!(state.score.combo, 1);

        // Past the window: streak gone
        state.clock_ms = 3001;
        on_idle_tick(&mut state, &config);
        assert_eq!(state.score.combo, 0);

        // Score untouched by decay
        assert_eq!(state.score.score, 10);
    }

    #[test]
    fn test_combo_event_emitted_from_second_catch() {
        let mut state = SessionState::new(1, 0);
        let mut store = MemoryStore::new();

        collect_at(&mut state, &mut store, 1000);
        let events = state.take_events();
        assert!(events
            .iter()
            .all(|e| !matches!(e.data, crate::game::events::GameEventData::ComboAchieved { .. })));

        collect_at(&mut state, &mut store, 1500);
        let events = state.take_events();
        assert!(events.iter().any(|e| matches!(
            e.data,
            crate::game::events::GameEventData::ComboAchieved { combo: 2 }
        )));
    }

    #[test]
    fn test_high_score_write_through() {
        let mut state = SessionState::new(1, 15);
        let mut store = MemoryStore::new();

        // First catch (10) does not beat 15
        collect_at(&mut state, &mut store, 1000);
        assert_eq!(state.score.high_score, 15);
        assert_eq!(store.get(HIGH_SCORE_KEY).unwrap(), None);

        // Second catch (22 total) does
        collect_at(&mut state, &mut store, 1500);
        assert_eq!(state.score.high_score, 22);
        assert_eq!(store.get(HIGH_SCORE_KEY).unwrap().as_deref(), Some("22"));
    }

    #[test]
    fn test_storage_failure_swallowed() {
        struct FailingStore;

        impl PersistenceGateway for FailingStore {
            fn get(&self, _key: &str) -> Result<Option<String>, crate::storage::StorageError> {
                Err(crate::storage::StorageError::Unavailable)
            }

            fn set(&mut self, _key: &str, _value: &str) -> Result<(), crate::storage::StorageError> {
                Err(crate::storage::StorageError::Unavailable)
            }
        }

        let mut state = SessionState::new(1, 0);
        let mut store = FailingStore;

        // Beats the high score; the set fails but scoring continues
        let points = collect_at(&mut state, &mut store, 1000);
        assert_eq!(points, 10);
        assert_eq!(state.score.high_score, 10);
    }

    #[test]
    fn test_score_monotonic() {
        let mut state = SessionState::new(1, 0);
        let mut store = MemoryStore::new();
        let mut last = 0;

        for i in 0..100u64 {
            // Mix of streaks and blown windows
            let clock = i * if i % 7 == 0 { 3000 } else { 400 };
            let next_clock = state.clock_ms.max(clock);
            collect_at(&mut state, &mut store, next_clock);
            assert!(state.score.score >= last);
            last = state.score.score;
        }
    }
}
