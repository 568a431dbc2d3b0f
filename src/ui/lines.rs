//! Three-line drive capability for the charlieplexed LEDs.
//!
//! Each LED sits between two of the three lines; the third is left
//! floating. One LED is lit by driving its anode line high and its cathode
//! line low:
//!
//! ```text
//! LED   anode  cathode
//!  a      X       Y
//!  b      Y       X
//!  c      Y       Z
//!  d      Z       Y
//!  e      X       Z
//!  f      Z       X
//! ```
//!
//! A [`DriveSignature`] packs one such instruction into a byte:
//! ```text
//! Bit 0-2: line X/Y/Z driven (1) or floating (0)
//! Bit 3  : reserved
//! Bit 4-6: line X/Y/Z level high (1) or low (0)
//! Bit 7  : reserved
//! ```

/// One of the three shared LED lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Line {
    X = 0,
    Y = 1,
    Z = 2,
}

impl Line {
    pub const ALL: [Line; 3] = [Line::X, Line::Y, Line::Z];

    pub const fn index(self) -> usize {
        self as usize
    }

    const fn mask(self) -> u8 {
        1 << (self as u8)
    }
}

/// Whether a line is tri-stated or actively driven.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineMode {
    #[default]
    Floating,
    Driven,
}

/// Output level of a line (only meaningful while driven).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    #[default]
    Low,
    High,
}

/// Drive instruction for all three lines for one scan step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DriveSignature(u8);

impl DriveSignature {
    /// All lines floating; nothing lit.
    pub const FLOATING: Self = Self(0);

    const DRIVE_MASK: u8 = 0x07;
    const LEVEL_SHIFT: u8 = 4;

    /// Light the LED whose anode is on `anode` and cathode on `cathode`.
    pub const fn led(anode: Line, cathode: Line) -> Self {
        Self(anode.mask() | cathode.mask() | (anode.mask() << Self::LEVEL_SHIFT))
    }

    /// Build from the packed representation; reserved bits are dropped.
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & (Self::DRIVE_MASK | (Self::DRIVE_MASK << Self::LEVEL_SHIFT)))
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Driven-line bits (X in bit 0).
    pub const fn drive_bits(self) -> u8 {
        self.0 & Self::DRIVE_MASK
    }

    /// Level bits (X in bit 0).
    pub const fn level_bits(self) -> u8 {
        (self.0 >> Self::LEVEL_SHIFT) & Self::DRIVE_MASK
    }

    pub const fn is_floating(self) -> bool {
        self.drive_bits() == 0
    }

    pub const fn mode(self, line: Line) -> LineMode {
        if self.drive_bits() & line.mask() != 0 {
            LineMode::Driven
        } else {
            LineMode::Floating
        }
    }

    pub const fn level(self, line: Line) -> Level {
        if self.level_bits() & line.mask() != 0 {
            Level::High
        } else {
            Level::Low
        }
    }
}

/// Minimal hardware capability needed to light one LED at a time.
///
/// # Implementations
/// - **Production:** `board::FlexLines` (nRF52840 GPIO)
/// - **Testing / host:** [`LineMirror`] (in-memory)
pub trait LineDriver {
    fn set_line_mode(&mut self, line: Line, mode: LineMode);
    fn set_line_level(&mut self, line: Line, level: Level);
}

impl<D: LineDriver + ?Sized> LineDriver for &mut D {
    fn set_line_mode(&mut self, line: Line, mode: LineMode) {
        (**self).set_line_mode(line, mode)
    }

    fn set_line_level(&mut self, line: Line, level: Level) {
        (**self).set_line_level(line, level)
    }
}

/// Apply one scan step to the hardware.
///
/// All three lines are floated first so the LED lit in the previous step
/// is off before any new line is driven; two signatures overlapping on a
/// shared line would otherwise light a third LED through the unintended
/// path. Each line then gets its level and mode.
pub fn apply_signature<D: LineDriver + ?Sized>(driver: &mut D, signature: DriveSignature) {
    for line in Line::ALL {
        driver.set_line_mode(line, LineMode::Floating);
        driver.set_line_level(line, Level::Low);
    }

    if signature.is_floating() {
        return;
    }

    for line in Line::ALL {
        driver.set_line_level(line, signature.level(line));
        driver.set_line_mode(line, signature.mode(line));
    }
}

/// In-memory copy of the three line states.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LineMirror {
    modes: [LineMode; 3],
    levels: [Level; 3],
}

impl LineMirror {
    pub const fn new() -> Self {
        Self {
            modes: [LineMode::Floating; 3],
            levels: [Level::Low; 3],
        }
    }

    pub fn mode(&self, line: Line) -> LineMode {
        self.modes[line.index()]
    }

    pub fn level(&self, line: Line) -> Level {
        self.levels[line.index()]
    }

    /// Re-pack the mirrored state; levels of floating lines are ignored.
    pub fn signature(&self) -> DriveSignature {
        let mut bits = 0u8;
        for line in Line::ALL {
            if self.mode(line) == LineMode::Driven {
                bits |= line.mask();
                if self.level(line) == Level::High {
                    bits |= line.mask() << DriveSignature::LEVEL_SHIFT;
                }
            }
        }
        DriveSignature(bits)
    }
}

impl LineDriver for LineMirror {
    fn set_line_mode(&mut self, line: Line, mode: LineMode) {
        self.modes[line.index()] = mode;
    }

    fn set_line_level(&mut self, line: Line, level: Level) {
        self.levels[line.index()] = level;
    }
}
