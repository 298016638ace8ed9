//! Game Logic Module
//!
//! All simulation code. 100% deterministic.
//!
//! ## Module Structure
//!
//! - `input`: Input signals (primary action, directional hold)
//! - `state`: Session state aggregate and entity definitions
//! - `tick`: Lifecycle state machine and the per-tick orchestrator
//! - `difficulty`: Difficulty progression and fall-speed curves
//! - `spawn`: Scheduled entity spawning
//! - `collision`: Overlap resolution and offscreen despawn
//! - `score`: Score, combo, and high-score tracking
//! - `powerup`: Shield and magnet effects
//! - `events`: Game events for the renderer/FX sink and replays

pub mod input;
pub mod state;
pub mod tick;
pub mod difficulty;
pub mod spawn;
pub mod collision;
pub mod score;
pub mod powerup;
pub mod events;

// Re-export key types
pub use input::{InputFrame, Hold};
pub use state::{
    SessionState, SessionPhase, PlayerState, FallingEntity, EntityKind, PowerupKind,
};
pub use tick::{tick, replay_session, SessionConfig, TickResult};
pub use events::GameEvent;
