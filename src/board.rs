//! nRF52840 board wiring: the pin map and GPIO glue for the three
//! charlieplexed LED lines.
//!
//! Pin map (nRF52840-DK defaults, adjust for your PCB):
//!
//!   Button         → P0.11 (active low, internal pull-up)
//!   LED line X     → P0.13
//!   LED line Y     → P0.14
//!   LED line Z     → P0.15
//!
//! Floating is implemented as a disconnected-pull input, driven as a
//! standard-drive push-pull output.

use embassy_nrf::gpio::{Flex, Input, OutputDrive, Pin, Port, Pull};
use embassy_nrf::nvmc::Nvmc;
use embassy_nrf::Peripherals;
use shapodice::ui::lines::{Level, Line, LineDriver, LineMode};

/// Port and pin number of the button, for arming the System OFF wake-up.
#[derive(Clone, Copy, Debug)]
pub struct WakePin {
    pub port: Port,
    pub pin: u8,
}

/// Every peripheral the firmware uses, taken from one place.
pub struct Board {
    pub flash: Nvmc<'static>,
    pub button: Input<'static>,
    pub lines: FlexLines<'static>,
    pub wake: WakePin,
}

impl Board {
    pub fn new(p: Peripherals) -> Self {
        let wake = WakePin {
            port: p.P0_11.port(),
            pin: p.P0_11.pin(),
        };

        Self {
            flash: Nvmc::new(p.NVMC),
            button: Input::new(p.P0_11, Pull::Up),
            lines: FlexLines::new(Flex::new(p.P0_13), Flex::new(p.P0_14), Flex::new(p.P0_15)),
            wake,
        }
    }
}

/// The three LED lines as flexible GPIOs, indexed X, Y, Z.
pub struct FlexLines<'d> {
    pins: [Flex<'d>; 3],
}

impl<'d> FlexLines<'d> {
    /// Take the three pins and park them floating and low.
    pub fn new(x: Flex<'d>, y: Flex<'d>, z: Flex<'d>) -> Self {
        let mut lines = Self { pins: [x, y, z] };
        for pin in lines.pins.iter_mut() {
            pin.set_low();
            pin.set_as_input(Pull::None);
        }
        lines
    }
}

impl LineDriver for FlexLines<'_> {
    fn set_line_mode(&mut self, line: Line, mode: LineMode) {
        let pin = &mut self.pins[line.index()];
        match mode {
            LineMode::Floating => pin.set_as_input(Pull::None),
            LineMode::Driven => pin.set_as_output(OutputDrive::Standard),
        }
    }

    fn set_line_level(&mut self, line: Line, level: Level) {
        let pin = &mut self.pins[line.index()];
        match level {
            Level::High => pin.set_high(),
            Level::Low => pin.set_low(),
        }
    }
}
