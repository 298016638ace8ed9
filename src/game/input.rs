//! Input Capture and Normalization
//!
//! The core consumes two logical signals and does not care whether they
//! originate from a pointer or a keyboard:
//!
//! - `primary_action`: start (Idle), restart (GameOver), or reverse facing
//!   (Playing).
//! - `directional_hold`: which way the player is currently steering.

use serde::{Serialize, Deserialize};

/// Directional hold signal for a single frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum Hold {
    /// No direction held
    #[default]
    None = 0,
    /// Steering left
    Left = 1,
    /// Steering right
    Right = 2,
}

/// Raw input state for a single frame.
///
/// This is the minimal input that affects game state. Frame timing lives
/// with the host's `dt_ms`, not here.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputFrame {
    /// Directional hold for this frame
    pub hold: Hold,

    /// Action flags (packed bits):
    /// - Bit 0: Primary action pressed this frame
    /// - Bit 1-7: Reserved
    pub flags: u8,
}

impl InputFrame {
    /// Primary action flag bit
    pub const FLAG_PRIMARY: u8 = 0x01;

    /// Create a new empty input frame.
    pub const fn new() -> Self {
        Self {
            hold: Hold::None,
            flags: 0,
        }
    }

    /// Create input with a directional hold.
    pub const fn with_hold(hold: Hold) -> Self {
        Self { hold, flags: 0 }
    }

    /// Create input with the primary action pressed.
    pub const fn with_primary() -> Self {
        Self {
            hold: Hold::None,
            flags: Self::FLAG_PRIMARY,
        }
    }

    /// Check if the primary action was pressed this frame.
    #[inline]
    pub fn primary_pressed(&self) -> bool {
        self.flags & Self::FLAG_PRIMARY != 0
    }

    /// Set the primary action flag.
    #[inline]
    pub fn set_primary(&mut self, pressed: bool) {
        if pressed {
            self.flags |= Self::FLAG_PRIMARY;
        } else {
            self.flags &= !Self::FLAG_PRIMARY;
        }
    }

    /// Check if this is an idle frame (no input).
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.hold == Hold::None && self.flags == 0
    }
}

// =============================================================================
// TESTS
// =============================================================================
