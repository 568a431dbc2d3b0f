//! Device session - the fixed-rate tick handler.
//!
//! Owns every piece of per-device state and runs them in the required
//! order once per tick:
//!
//! 1. sample and debounce the button,
//! 2. turn edges into roll / slowdown requests,
//! 3. advance the roll engine (which draws from the random source),
//! 4. push the face to the display and advance the scanner,
//! 5. float the lines and apply the new drive instruction.

use crate::dice::{DiceEvent, Face, RollEngine};
use crate::rng::{Xoshiro128pp, STATE_BYTES};
use crate::ui::button::Button;
use crate::ui::leds::DiceLeds;
use crate::ui::lines::{apply_signature, DriveSignature, LineDriver};
use crate::ui::ButtonState;
use embedded_hal::digital::InputPin;

/// Everything observable about one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tick {
    pub button: ButtonState,
    pub event: DiceEvent,
    pub face: Face,
    pub drive: DriveSignature,
}

impl Tick {
    /// The event the tone subsystem should hear about, if any.
    pub fn tone_event(&self) -> Option<DiceEvent> {
        match self.event {
            DiceEvent::None => None,
            event => Some(event),
        }
    }
}

/// One die: button, roll engine, display and the lines it drives.
pub struct DiceSession<P, D> {
    button: Button<P>,
    dice: RollEngine,
    leds: DiceLeds,
    lines: D,
    idle_ticks: u32,
}

impl<P: InputPin, D: LineDriver> DiceSession<P, D> {
    /// Fresh power-on session showing the engine's resting face.
    pub fn new(button: Button<P>, lines: D, rng: Xoshiro128pp) -> Self {
        let dice = RollEngine::new(rng);
        let mut leds = DiceLeds::new();
        leds.put(dice.face());

        Self {
            button,
            dice,
            leds,
            lines,
            idle_ticks: 0,
        }
    }

    /// Run one tick.
    pub fn tick(&mut self) -> Tick {
        let button = self.button.read();
        match button {
            ButtonState::DownEdge => {
                self.dice.start_rolling();
                self.leds.stop_blink();
                #[cfg(feature = "defmt")]
                defmt::debug!("Dice: rolling");
            }
            ButtonState::UpEdge => {
                self.dice.start_slowdown();
                self.leds.put(self.dice.face());
                #[cfg(feature = "defmt")]
                defmt::debug!("Dice: slowing down");
            }
            ButtonState::Up | ButtonState::Down => {}
        }

        let event = self.dice.update();
        match event {
            DiceEvent::Roll => self.leds.put(self.dice.face()),
            DiceEvent::Stop => {
                self.leds.put(self.dice.face());
                self.leds.start_blink();
                #[cfg(feature = "defmt")]
                defmt::info!("Dice: stopped on {}", self.dice.face().pips());
            }
            DiceEvent::None => {}
        }

        let drive = self.leds.update();
        apply_signature(&mut self.lines, drive);

        if button == ButtonState::Up && !self.dice.is_rolling() && !self.leds.is_blinking() {
            self.idle_ticks = self.idle_ticks.saturating_add(1);
        } else {
            self.idle_ticks = 0;
        }

        Tick {
            button,
            event,
            face: self.dice.face(),
            drive,
        }
    }

    /// Consecutive ticks with nothing happening.
    pub fn idle_ticks(&self) -> u32 {
        self.idle_ticks
    }

    pub fn face(&self) -> Face {
        self.dice.face()
    }

    pub fn dice(&self) -> &RollEngine {
        &self.dice
    }

    pub fn leds(&self) -> &DiceLeds {
        &self.leds
    }

    /// Light or clear the indicator segment on top of the face.
    pub fn set_indicator(&mut self, on: bool) {
        self.leds.set_indicator(on);
    }

    pub fn lines(&self) -> &D {
        &self.lines
    }

    /// Random state to persist before power loss.
    pub fn rng_state(&self) -> [u8; STATE_BYTES] {
        self.dice.state_bytes()
    }

    /// Tear the session down, returning the button and line hardware.
    pub fn into_parts(self) -> (Button<P>, D) {
        (self.button, self.lines)
    }
}
