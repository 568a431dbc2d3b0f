//! Roll engine - the press/release driven face counter.
//!
//! ```text
//! IDLE    --start_rolling()-->  ROLLING   (pressed, speed = ROLLING_SPEED)
//! ROLLING --start_slowdown()--> SLOWING   (face drawn, speed = SLOWDOWN_SPEED)
//! SLOWING --start_rolling()-->  ROLLING
//! SLOWING --speed hits 0-->     IDLE      (reports Stop once)
//! ```
//!
//! The face advances whenever a fixed-point timer, fed by the current
//! speed each tick, overflows `TIMER_PERIOD`. While the button is up the
//! engine burns one random draw per tick so that the final face cannot be
//! predicted from how long the button was held.

use crate::config::{ROLLING_SPEED_HZ, ROLLING_SPEED_PREC, TICK_HZ};
use crate::error::Error;
use crate::rng::{Xoshiro128pp, STATE_BYTES};

/// Number of faces.
pub const PERIOD: u8 = 6;

/// Overflow threshold of the rolling timer.
pub const TIMER_PERIOD: u16 = 32768;

/// Speed while the button is held.
pub const ROLLING_SPEED: u16 =
    (TIMER_PERIOD as u32 * ((ROLLING_SPEED_HZ as u32) << ROLLING_SPEED_PREC) / TICK_HZ) as u16;

/// Speed at the start of a slowdown (half the rolling rate).
pub const SLOWDOWN_SPEED: u16 =
    (TIMER_PERIOD as u32 * (((ROLLING_SPEED_HZ / 2) as u32) << ROLLING_SPEED_PREC) / TICK_HZ)
        as u16;

/// A die face, stored as 0..=5 and shown as 1..=6 pips.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Face(u8);

impl Face {
    pub const ONE: Face = Face(0);
    pub const SIX: Face = Face(PERIOD - 1);

    /// Validate a face index.
    pub const fn new(index: u8) -> Result<Self, Error> {
        if index < PERIOD {
            Ok(Face(index))
        } else {
            Err(Error::InvalidFace(index))
        }
    }

    /// Reduce an arbitrary random word to a face.
    pub const fn from_draw(word: u32) -> Self {
        Face((word % PERIOD as u32) as u8)
    }

    /// Index 0..=5.
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Number of pips shown, 1..=6.
    pub const fn pips(self) -> u8 {
        self.0 + 1
    }

    /// Next face, wrapping six back to one.
    pub const fn succ(self) -> Self {
        if self.0 + 1 >= PERIOD {
            Face(0)
        } else {
            Face(self.0 + 1)
        }
    }
}

impl TryFrom<u8> for Face {
    type Error = Error;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Face::new(index)
    }
}

/// What a single `update()` reports to the display and tone subsystems.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DiceEvent {
    /// Nothing visible changed.
    None,
    /// The face advanced; redraw and click.
    Roll,
    /// The slowdown finished; the face is final.
    Stop,
}

/// Press/release driven roll state machine.
#[derive(Clone, Debug)]
pub struct RollEngine {
    rng: Xoshiro128pp,
    pressed: bool,
    speed: u16,
    timer: u16,
    face: Face,
}

impl RollEngine {
    /// Create an idle engine showing face one.
    pub fn new(rng: Xoshiro128pp) -> Self {
        Self {
            rng,
            pressed: false,
            speed: 0,
            timer: 0,
            face: Face::ONE,
        }
    }

    /// Current face.
    pub fn face(&self) -> Face {
        self.face
    }

    /// `true` while the face is still moving (held or slowing).
    pub fn is_rolling(&self) -> bool {
        self.speed != 0
    }

    /// `true` between `start_rolling()` and `start_slowdown()`.
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn rng(&self) -> &Xoshiro128pp {
        &self.rng
    }

    /// Random state block for the persistence layer.
    pub fn state_bytes(&self) -> [u8; STATE_BYTES] {
        self.rng.to_bytes()
    }

    /// Button pressed: spin at full speed.
    pub fn start_rolling(&mut self) {
        self.pressed = true;
        self.speed = ROLLING_SPEED;
    }

    /// Button released: pick the resting face now and start decelerating.
    ///
    /// Ignored unless the engine is currently held.
    pub fn start_slowdown(&mut self) {
        if !self.pressed {
            return;
        }
        self.pressed = false;
        self.face = Face::from_draw(self.rng.next());
        self.speed = SLOWDOWN_SPEED;
    }

    /// Advance one tick.
    pub fn update(&mut self) -> DiceEvent {
        if !self.pressed {
            self.rng.next();
        }

        if self.speed == 0 {
            self.timer = 0;
            return DiceEvent::None;
        }

        if !self.pressed {
            self.speed -= 1;
            if self.speed == 0 {
                return DiceEvent::Stop;
            }
        }

        // speed >> PREC never exceeds 655, so the sum stays below u16::MAX.
        self.timer += self.speed >> ROLLING_SPEED_PREC;
        if self.timer >= TIMER_PERIOD {
            self.timer -= TIMER_PERIOD;
            self.face = self.face.succ();
            return DiceEvent::Roll;
        }

        DiceEvent::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> RollEngine {
        RollEngine::new(Xoshiro128pp::default())
    }

    #[test]
    fn speed_constants() {
        assert_eq!(ROLLING_SPEED, 2621);
        assert_eq!(SLOWDOWN_SPEED, 1310);
    }

    #[test]
    fn face_validation() {
        assert_eq!(Face::new(5).map(Face::pips), Ok(6));
        assert_eq!(Face::new(6), Err(Error::InvalidFace(6)));
        assert_eq!(Face::try_from(0), Ok(Face::ONE));
        assert_eq!(Face::SIX.succ(), Face::ONE);
    }

    #[test]
    fn idle_engine_reports_none_and_burns_draws() {
        let mut dice = engine();
        let mut shadow = Xoshiro128pp::default();

        for _ in 0..10 {
            assert_eq!(dice.update(), DiceEvent::None);
            shadow.next();
        }
        assert_eq!(dice.rng(), &shadow);
        assert_eq!(dice.face(), Face::ONE);
        assert!(!dice.is_rolling());
    }

    #[test]
    fn held_engine_does_not_draw() {
        let mut dice = engine();
        dice.start_rolling();
        for _ in 0..500 {
            dice.update();
        }
        assert_eq!(dice.rng(), &Xoshiro128pp::default());
    }

    #[test]
    fn held_face_changes_only_on_roll_events() {
        let mut dice = engine();
        dice.start_rolling();

        let mut expected = dice.face();
        for tick in 1..=200 {
            match dice.update() {
                DiceEvent::Roll => expected = expected.succ(),
                DiceEvent::None => {}
                DiceEvent::Stop => panic!("stop while held at tick {}", tick),
            }
            assert_eq!(dice.face(), expected);
        }
    }

    #[test]
    fn first_roll_after_timer_overflow() {
        let mut dice = engine();
        dice.start_rolling();
        for _ in 0..50 {
            assert_eq!(dice.update(), DiceEvent::None);
        }
        assert_eq!(dice.update(), DiceEvent::Roll);
        assert_eq!(dice.face(), Face::new(1).unwrap());
    }

    #[test]
    fn slowdown_draws_face_immediately() {
        let mut dice = engine();
        let mut shadow = Xoshiro128pp::default();
        dice.start_rolling();
        dice.start_slowdown();

        assert_eq!(dice.face(), Face::from_draw(shadow.next()));
        assert!(dice.is_rolling());
        assert!(!dice.is_pressed());
    }

    #[test]
    fn slowdown_without_press_is_ignored() {
        let mut dice = engine();
        dice.start_slowdown();
        assert!(!dice.is_rolling());
        assert_eq!(dice.rng(), &Xoshiro128pp::default());
    }

    #[test]
    fn single_stop_then_quiet() {
        let mut dice = engine();
        dice.start_rolling();
        dice.start_slowdown();

        let mut stops = 0;
        for _ in 0..u32::from(SLOWDOWN_SPEED) {
            if dice.update() == DiceEvent::Stop {
                stops += 1;
            }
        }
        assert_eq!(stops, 1);
        assert!(!dice.is_rolling());

        let face = dice.face();
        for _ in 0..5000 {
            assert_eq!(dice.update(), DiceEvent::None);
        }
        assert_eq!(dice.face(), face);
    }

    #[test]
    fn repress_during_slowdown_resumes_rolling() {
        let mut dice = engine();
        dice.start_rolling();
        dice.start_slowdown();
        for _ in 0..100 {
            dice.update();
        }
        dice.start_rolling();
        assert!(dice.is_pressed());
        for _ in 0..3000 {
            assert_ne!(dice.update(), DiceEvent::Stop);
        }
    }
}
