//! Q16.16 Fixed-Point Arithmetic
//!
//! This module provides deterministic fixed-point math for game simulation.
//! All operations use integer arithmetic only - no floats in gameplay logic.
//!
//! ## Format: Q16.16
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Bit Layout: Q16.16 (32-bit signed integer)                 │
//! ├─────────────────────────────────────────────────────────────┤
//! │  [S][IIIIIIIIIIIIIIII][FFFFFFFFFFFFFFFF]                    │
//! │   │  └──── 16 bits ────┘└──── 16 bits ────┘                 │
//! │   └─ Sign bit                                               │
//! │                                                             │
//! │  Range: -32768.0 to +32767.99998 (approx)                   │
//! │  Precision: 1/65536 ≈ 0.000015 units                        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Why Q16.16?
//!
//! - 32k unit range comfortably covers a 1024x768 pixel playfield
//! - Sub-pixel precision (0.00001 units)
//! - Fast integer ops on all platforms
//!
//! Squared pixel distances exceed the Q16.16 product range, so distance
//! comparisons stay in raw i64 (see [`fixed_sqrt_wide`] and
//! `FixedVec2::distance_squared_wide`).

/// Q16.16 fixed-point number stored as i32.
/// 16 bits integer, 16 bits fractional.
pub type Fixed = i32;

/// Number of fractional bits (16)
pub const FIXED_SCALE: i32 = 16;

/// 1.0 in fixed-point (65536)
pub const FIXED_ONE: Fixed = 1 << FIXED_SCALE; // 65536

/// 0.5 in fixed-point (32768)
pub const FIXED_HALF: Fixed = FIXED_ONE >> 1; // 32768

// =============================================================================
// PLAYFIELD GEOMETRY (All as integer literals - NO float conversion!)
// =============================================================================
//
// Screen coordinates: origin at the top-left corner, +y points DOWN.
// Entities spawn above y = 0 and fall toward y = PLAYFIELD_HEIGHT.

/// Playfield width: 1024 px = 1024 * 65536
pub const PLAYFIELD_WIDTH: Fixed = 67108864;

/// Playfield height: 768 px = 768 * 65536
pub const PLAYFIELD_HEIGHT: Fixed = 50331648;

/// Horizontal spawn margin: 50 px = 50 * 65536
pub const SPAWN_MARGIN: Fixed = 3276800;

/// Spawn altitude above the visible top edge: -30 px = -30 * 65536
pub const SPAWN_Y: Fixed = -1966080;

/// Extra travel below the bottom edge before despawn: 40 px = 40 * 65536
pub const DESPAWN_MARGIN: Fixed = 2621440;

/// Player box half-width: 32 px = 32 * 65536
pub const PLAYER_HALF_WIDTH: Fixed = 2097152;

/// Player box half-height: 48 px = 48 * 65536
pub const PLAYER_HALF_HEIGHT: Fixed = 3145728;

/// Player start position y: 668 px (100 px above the bottom edge)
pub const PLAYER_START_Y: Fixed = 43778048;

/// Falling-entity box half-extent: 16 px = 16 * 65536
pub const ENTITY_HALF_EXTENT: Fixed = 1048576;

// =============================================================================
// TIMING (integer milliseconds on the session clock)
// =============================================================================

/// Ingredient spawn-stream cadence
pub const INGREDIENT_SPAWN_INTERVAL_MS: u32 = 800;

/// Hazard spawn-stream cadence
pub const HAZARD_SPAWN_INTERVAL_MS: u32 = 1600;

/// Combo decays after this long without a catch
pub const COMBO_TIMEOUT_MS: u64 = 2000;

/// Magnet power-up lifetime
pub const MAGNET_DURATION_MS: u64 = 5000;

/// Difficulty level increments once per period
pub const LEVEL_PERIOD_MS: u32 = 5000;

/// Largest accepted frame delta; anything outside [0, MAX_TICK_MS] clamps to 0
pub const MAX_TICK_MS: i64 = 1000;

// =============================================================================
// DIFFICULTY
// =============================================================================

/// Starting difficulty level: 1.0
pub const LEVEL_START: Fixed = FIXED_ONE;

/// Per-period level increment: 0.1 = floor(0.1 * 65536)
pub const LEVEL_STEP: Fixed = 6553;

// =============================================================================
// FALL-SPEED CURVES (px/s; speed = base + level * per_level)
// =============================================================================

/// Ingredient base fall speed: 200 px/s
pub const INGREDIENT_FALL_BASE: Fixed = 13107200;

/// Ingredient fall speed gained per difficulty level: 30 px/s
pub const INGREDIENT_FALL_PER_LEVEL: Fixed = 1966080;

/// Hazard base fall speed: 250 px/s
pub const HAZARD_FALL_BASE: Fixed = 16384000;

/// Hazard fall speed gained per difficulty level: 40 px/s
pub const HAZARD_FALL_PER_LEVEL: Fixed = 2621440;

/// Power-up base fall speed: 200 px/s
pub const POWERUP_FALL_BASE: Fixed = 13107200;

/// Power-up fall speed gained per difficulty level: 25 px/s
pub const POWERUP_FALL_PER_LEVEL: Fixed = 1638400;

// =============================================================================
// SCORE & POWER-UPS
// =============================================================================

/// Base points per ingredient caught
pub const BASE_POINTS: u32 = 10;

/// Extra points per active combo step
pub const COMBO_BONUS_POINTS: u32 = 2;

/// Charges granted by a shield pickup (flat set, never additive)
pub const SHIELD_CHARGES: u32 = 3;

/// Magnet attraction radius: 200 px
pub const MAGNET_RADIUS: Fixed = 13107200;

/// Magnet pull speed: 300 px/s
pub const MAGNET_PULL_SPEED: Fixed = 19660800;

// =============================================================================
// CORE OPERATIONS (All deterministic, wrapping semantics)
// =============================================================================

/// Convert a compile-time float to fixed-point.
///
/// # Warning
/// Only use at compile-time or initialization. NEVER in tick logic.
///
/// # Example
/// ```
/// use skillet_core::core::fixed::{to_fixed, FIXED_ONE};
/// const MY_VALUE: i32 = to_fixed(2.5);
/// assert_eq!(MY_VALUE, FIXED_ONE * 2 + FIXED_ONE / 2);
/// ```
#[inline]
pub const fn to_fixed(f: f64) -> Fixed {
    (f * (FIXED_ONE as f64)) as Fixed
}

/// Convert fixed-point to float for display/rendering.
///
/// # Warning
/// Only use for visual output. NEVER use result in game logic.
#[inline]
pub fn to_float(f: Fixed) -> f32 {
    f as f32 / FIXED_ONE as f32
}

/// Multiply two fixed-point numbers.
///
/// Uses i64 intermediate to prevent overflow, then truncates.
///
/// # Determinism
/// - Uses wrapping arithmetic
/// - Truncates toward zero (Rust default for integer division)
#[inline]
pub fn fixed_mul(a: Fixed, b: Fixed) -> Fixed {
    // Widen to i64, multiply, shift back
    let wide = (a as i64) * (b as i64);
    (wide >> FIXED_SCALE) as Fixed
}

/// Divide two fixed-point numbers.
///
/// Pre-shifts numerator to maintain precision.
/// Returns 0 on divide-by-zero.
///
/// # Determinism
/// - Uses wrapping arithmetic
/// - Truncates toward zero
/// - Divide-by-zero returns 0 (not panic)
#[inline]
pub fn fixed_div(a: Fixed, b: Fixed) -> Fixed {
    if b == 0 {
        return 0; // Deterministic: don't panic
    }
    let wide = (a as i64) << FIXED_SCALE;
    (wide / b as i64) as Fixed
}

/// Absolute value of a fixed-point number.
#[inline]
pub fn fixed_abs(x: Fixed) -> Fixed {
    if x < 0 { x.wrapping_neg() } else { x }
}

/// Minimum of two fixed-point numbers.
#[inline]
pub fn fixed_min(a: Fixed, b: Fixed) -> Fixed {
    if a < b { a } else { b }
}

/// Maximum of two fixed-point numbers.
#[inline]
pub fn fixed_max(a: Fixed, b: Fixed) -> Fixed {
    if a > b { a } else { b }
}

/// Clamp a fixed-point number to a range.
#[inline]
pub fn fixed_clamp(value: Fixed, min: Fixed, max: Fixed) -> Fixed {
    fixed_max(min, fixed_min(max, value))
}

/// Square root of a widened (Q32.32) squared distance, yielding Q16.16.
///
/// Squared pixel distances do not fit the Q16.16 product range, so distance
/// math keeps them as raw i64 (`dx*dx + dy*dy` of Q16.16 components). The
/// integer square root of that Q32.32 quantity is the Q16.16 distance.
///
/// Digit-by-digit binary method: no division, exact floor result, identical
/// on every platform. Non-positive inputs return 0.
#[inline]
pub fn fixed_sqrt_wide(x: i64) -> Fixed {
    if x <= 0 {
        return 0;
    }

    let mut n = x as u64;
    let mut result: u64 = 0;
    let mut bit: u64 = 1 << 62;

    while bit > n {
        bit >>= 2;
    }
    while bit != 0 {
        if n >= result + bit {
            n -= result + bit;
            result = (result >> 1) + bit;
        } else {
            result >>= 1;
        }
        bit >>= 2;
    }

    result as Fixed
}

// =============================================================================
// TESTS
// =============================================================================
