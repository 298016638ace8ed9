//! # Skillet Core
//!
//! Deterministic gameplay core for Skillet, a single-screen catcher game:
//! a chef runs along the bottom of the playfield while ingredients,
//! hazards, and power-ups rain down.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       SKILLET CORE                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Deterministic primitives                  │
//! │  ├── fixed.rs    - Q16.16 fixed-point arithmetic             │
//! │  ├── vec2.rs     - 2D vector with fixed-point                │
//! │  ├── rng.rs      - Deterministic Xorshift128+ PRNG           │
//! │  └── hash.rs     - State hashing for replay verification     │
//! │                                                              │
//! │  game/           - Simulation (deterministic)                │
//! │  ├── input.rs    - Primary action + directional hold         │
//! │  ├── state.rs    - Session, player, entity state             │
//! │  ├── tick.rs     - Lifecycle machine + per-tick orchestrator │
//! │  ├── difficulty.rs - Level curve, fall speeds, spawn cadence │
//! │  ├── spawn.rs    - Scheduled weighted entity drops           │
//! │  ├── collision.rs- First-touch overlaps, offscreen despawn   │
//! │  ├── score.rs    - Score, combo streaks, high score          │
//! │  └── powerup.rs  - Shield charges and magnet steering        │
//! │                                                              │
//! │  storage.rs      - High-score persistence gateway            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Host Contract
//!
//! The crate is a library with no loop of its own. Each frame the host:
//!
//! 1. Integrates entity and player positions from the published velocities
//!    (gravity, bounce, and player movement are host physics).
//! 2. Calls [`game::tick::tick`] with the frame's `dt_ms` and
//!    [`game::input::InputFrame`].
//! 3. Drains [`game::tick::TickResult::events`] into its renderer/FX sink
//!    and reads state back for drawing.
//!
//! ## Determinism Guarantee
//!
//! The simulation is **100% deterministic**:
//! - No floating-point arithmetic in game logic
//! - No HashMap (uses BTreeMap for sorted iteration)
//! - No system time dependencies; all scheduling is clock accumulators
//! - All randomness from seeded Xorshift128+
//!
//! Given an identical RNG seed and an identical `(dt_ms, input)` trace,
//! the session produces **identical state hashes** on any platform.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;
pub mod storage;

// Re-export commonly used types
pub use crate::core::fixed::{Fixed, FIXED_ONE, FIXED_HALF, FIXED_SCALE};
pub use crate::core::vec2::FixedVec2;
pub use crate::core::rng::DeterministicRng;
pub use crate::game::input::{InputFrame, Hold};
pub use crate::game::state::{SessionState, SessionPhase, EntityKind, PowerupKind};
pub use crate::game::tick::{tick, replay_session, SessionConfig, TickResult};
pub use crate::game::events::GameEvent;
pub use crate::storage::{PersistenceGateway, MemoryStore, StorageError};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
