//! User interface subsystem - one push button and six charlieplexed LEDs.
//!
//! ## Components
//!
//! - **Button**: 8-sample shift-register debounce with 2-bit edge tagging
//! - **LEDs**: round-robin charlieplex scanner over three shared lines
//! - **Lines**: the three-line drive capability the scanner talks to

pub mod button;
pub mod leds;
pub mod lines;


/// Debounced button state, tagged with its edge.
///
/// The discriminant is the 2-bit debounce history: bit 1 is the previous
/// debounced level, bit 0 the current one (1 = pressed).
///
/// ```text
/// UP --press--> DOWN_EDGE --> DOWN --release--> UP_EDGE --> UP
/// ```
///
/// Exactly one transition happens per `read()`, so an edge is always
/// visible for exactly one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ButtonState {
    /// Released and stable.
    #[default]
    Up = 0b00,
    /// First tick of a press.
    DownEdge = 0b01,
    /// Held and stable.
    Down = 0b11,
    /// First tick of a release.
    UpEdge = 0b10,
}

impl ButtonState {
    /// The 2-bit history encoding.
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Decode a history value; only the low two bits are considered.
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0b00 => ButtonState::Up,
            0b01 => ButtonState::DownEdge,
            0b11 => ButtonState::Down,
            _ => ButtonState::UpEdge,
        }
    }

    /// Shift the current debounced level into the history.
    pub const fn next(self, pressed: bool) -> Self {
        Self::from_bits((self.bits() << 1) | pressed as u8)
    }
}
