//! Application-wide constants and compile-time configuration.
//!
//! All hardware pin assignments, timing parameters, and storage layout
//! constants live here so they can be tuned in one place.

// Tick

/// Rate of the fixed tick that drives debounce, roll and LED scan (Hz).
///
/// Every timing constant below is expressed in ticks of this clock; a
/// different rate only scales perceived speed.
pub const TICK_HZ: u32 = 1000;

/// Tick period in microseconds.
pub const TICK_PERIOD_US: u64 = 1_000_000 / TICK_HZ as u64;

// Roll

/// Face changes per second while the button is held.
pub const ROLLING_SPEED_HZ: u8 = 20;

/// Extra binary precision of the rolling speed. Larger values stretch the
/// time from button release to the final stop.
pub const ROLLING_SPEED_PREC: u8 = 2;

// GPIO pin assignments: see `board::Board::new` (firmware only).

// Power

/// Enable automatic deep sleep after inactivity.
pub const POWER_DOWN_ENABLED: bool = true;

/// Idle ticks before the die saves its seed and enters System OFF (60 s).
pub const POWER_DOWN_TIMEOUT_TICKS: u32 = 60 * TICK_HZ;

/// Idle ticks before power-down during which the indicator segment is lit (5 s).
pub const POWER_DOWN_WARNING_TICKS: u32 = 5 * TICK_HZ;

// Tone events

/// Depth of the queue handing `Roll`/`Stop` events to the tone task.
pub const TONE_EVENT_QUEUE_DEPTH: usize = 4;

// Seed storage

/// Flash page index where seed storage starts (4 KB per page on nRF52840).
pub const STORAGE_FLASH_PAGE_START: u32 = 252;

/// Number of flash pages reserved for seed storage.
pub const STORAGE_FLASH_PAGE_COUNT: u32 = 2;
