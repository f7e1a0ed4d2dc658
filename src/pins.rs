//! GPIO / peripheral pin assignments for the doorbell controller board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers. Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Bell striker (solenoid via low-side MOSFET)
// ---------------------------------------------------------------------------

/// Digital output: HIGH energises the striker.
pub const BELL_GPIO: i32 = 4;

// ---------------------------------------------------------------------------
// Button ring LED
// ---------------------------------------------------------------------------

/// LEDC PWM output for the button ring LED.
pub const LED_GPIO: i32 = 5;

// ---------------------------------------------------------------------------
// PWM configuration
// ---------------------------------------------------------------------------

/// LEDC frequency for the button LED (1 kHz, 10-bit duty).
pub const LED_PWM_FREQ_HZ: u32 = 1_000;
