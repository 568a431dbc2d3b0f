//! Charlieplexed pip display.
//!
//! Physical layout of the segments:
//! ```text
//! (a)       (b)
//! (c) (d,e) (c)
//! (b)       (a)
//! ```
//! a-d are white (Vf = 3 V), e and f red (Vf = 1.5 V). Segments a-c
//! light two corner pips each from one line pair; d (white) and e (red)
//! share the centre. Segment f is a spare indicator LED not used by any
//! face.
//!
//! Only one segment is lit per tick; `update()` walks the segments
//! round-robin so all lit segments appear steady at the tick rate.

use super::lines::{DriveSignature, Line};
use crate::dice::Face;

/// Number of segments (a..f) and therefore scan steps per refresh.
pub const NUM_ELEMENTS: usize = 6;

/// Bit of the spare indicator segment (f).
pub const INDICATOR_BIT: u8 = 1 << (NUM_ELEMENTS - 1);

/// Segment bits per face, bit 0 = a ... bit 4 = e.
pub const FACE_PATTERNS: [u8; 6] = [
    0b10000, // 1: e
    0b00001, // 2: a
    0b01001, // 3: a d
    0b00011, // 4: a b
    0b01011, // 5: a b d
    0b00111, // 6: a b c
];

/// Drive instruction per segment index.
pub const SEGMENT_SIGNATURES: [DriveSignature; NUM_ELEMENTS] = [
    DriveSignature::led(Line::X, Line::Y), // a
    DriveSignature::led(Line::Y, Line::X), // b
    DriveSignature::led(Line::Y, Line::Z), // c
    DriveSignature::led(Line::Z, Line::Y), // d
    DriveSignature::led(Line::X, Line::Z), // e
    DriveSignature::led(Line::Z, Line::X), // f
];

/// Number of on/off phases of the finish blink.
pub const BLINK_PHASES: u8 = 5;

/// Scanner state: pattern, scan position and blink overlay.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DiceLeds {
    pattern: u8,
    scan_index: u8,
    blink_timer: u8,
    blink_count: u8,
    indicator: bool,
}

impl DiceLeds {
    pub const fn new() -> Self {
        Self {
            pattern: 0,
            scan_index: 0,
            blink_timer: 0,
            blink_count: 0,
            indicator: false,
        }
    }

    /// Show a face.
    pub fn put(&mut self, face: Face) {
        self.pattern = FACE_PATTERNS[face.index() as usize];
    }

    /// Switch the spare indicator segment on or off.
    pub fn set_indicator(&mut self, on: bool) {
        self.indicator = on;
    }

    /// Start the finish blink: five phases, odd ones dark.
    pub fn start_blink(&mut self) {
        self.blink_count = BLINK_PHASES;
        self.blink_timer = u8::MAX;
    }

    pub fn stop_blink(&mut self) {
        self.blink_count = 0;
        self.blink_timer = 0;
    }

    pub fn is_blinking(&self) -> bool {
        self.blink_count != 0
    }

    /// Remaining blink phases.
    pub fn blink_count(&self) -> u8 {
        self.blink_count
    }

    /// Stored segment bits (without blink or indicator).
    pub fn pattern(&self) -> u8 {
        self.pattern
    }

    /// Segment the next `update()` will address.
    pub fn scan_index(&self) -> usize {
        self.scan_index as usize
    }

    /// Advance one scan step and return the drive instruction for it.
    pub fn update(&mut self) -> DriveSignature {
        let idx = self.scan_index as usize;
        self.scan_index += 1;
        if self.scan_index as usize >= NUM_ELEMENTS {
            self.scan_index = 0;
        }

        let mut lit = self.pattern;

        if self.blink_count != 0 {
            if self.blink_timer == 0 {
                self.blink_count -= 1;
            }
            self.blink_timer = self.blink_timer.wrapping_sub(1);
            if self.blink_count & 1 != 0 {
                lit = 0;
            }
        }

        if self.indicator {
            lit |= INDICATOR_BIT;
        }

        if (lit >> idx) & 1 != 0 {
            SEGMENT_SIGNATURES[idx]
        } else {
            DriveSignature::FLOATING
        }
    }
}
