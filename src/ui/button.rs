//! Push-button debouncing and edge detection.
//!
//! The raw line is sampled once per tick into an 8-bit shift register.
//! The debounced level only flips when the register is all ones (pressed)
//! or all zeros (released); anything in between keeps the previous level,
//! which gives eight ticks of hysteresis in both directions.

use super::ButtonState;
use embedded_hal::digital::InputPin;

/// Shift-register debouncer for a single line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Debouncer {
    filter: u8,
    pressed: bool,
    state: ButtonState,
}

impl Debouncer {
    pub const fn new() -> Self {
        Self {
            filter: 0,
            pressed: false,
            state: ButtonState::Up,
        }
    }

    /// Feed one raw sample (`true` = contact closed) and return the new state.
    pub fn sample(&mut self, raw_pressed: bool) -> ButtonState {
        self.filter = (self.filter << 1) | raw_pressed as u8;
        match self.filter {
            0x00 => self.pressed = false,
            0xFF => self.pressed = true,
            _ => {}
        }

        self.state = self.state.next(self.pressed);
        self.state
    }

    /// Debounced level.
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// State returned by the last `sample()`.
    pub fn state(&self) -> ButtonState {
        self.state
    }

    /// Raw sample history, newest sample in bit 0.
    pub fn filter(&self) -> u8 {
        self.filter
    }
}

/// Active-low button on an `embedded-hal` input pin (internal pull-up).
pub struct Button<P> {
    pin: P,
    debouncer: Debouncer,
}

impl<P: InputPin> Button<P> {
    pub fn new(pin: P) -> Self {
        Self {
            pin,
            debouncer: Debouncer::new(),
        }
    }

    /// Sample the pin once and advance the debouncer.
    ///
    /// A failed pin read counts as released.
    pub fn read(&mut self) -> ButtonState {
        let raw = self.pin.is_low().unwrap_or(false);
        self.debouncer.sample(raw)
    }

    pub fn is_pressed(&self) -> bool {
        self.debouncer.is_pressed()
    }

    pub fn state(&self) -> ButtonState {
        self.debouncer.state()
    }

    /// Give the pin back, e.g. to arm it as a wake-up source.
    pub fn release(self) -> P {
        self.pin
    }
}
