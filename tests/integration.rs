//! Integration tests for shapodice host-testable logic.

use shapodice::dice::SLOWDOWN_SPEED;
use shapodice::ui::button::Button;
use shapodice::ui::leds::{DiceLeds, FACE_PATTERNS, SEGMENT_SIGNATURES};
use shapodice::ui::lines::LineMirror;
use shapodice::{ButtonState, DiceEvent, DiceSession, Face, RollEngine, Xoshiro128pp};
use std::cell::Cell;
use std::convert::Infallible;
use std::rc::Rc;

/// Active-low push button whose contact the test opens and closes.
#[derive(Clone, Default)]
struct TestButton {
    closed: Rc<Cell<bool>>,
}

impl TestButton {
    fn set(&self, closed: bool) {
        self.closed.set(closed);
    }
}

impl embedded_hal::digital::ErrorType for TestButton {
    type Error = Infallible;
}

impl embedded_hal::digital::InputPin for TestButton {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.closed.get())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(self.closed.get())
    }
}

fn session() -> (TestButton, DiceSession<TestButton, LineMirror>) {
    let pin = TestButton::default();
    let session = DiceSession::new(
        Button::new(pin.clone()),
        LineMirror::new(),
        Xoshiro128pp::from_state([0x1234_5678, 0, 0, 0]),
    );
    (pin, session)
}

#[test]
fn roll_settle_and_blink_end_to_end() {
    let mut dice = RollEngine::new(Xoshiro128pp::from_state([0x1234_5678, 0, 0, 0]));
    let mut shadow = dice.rng().clone();

    dice.start_rolling();
    let mut rolls = 0;
    let mut seen = [false; 6];
    for _ in 0..500 {
        if dice.update() == DiceEvent::Roll {
            rolls += 1;
        }
        seen[dice.face().index() as usize] = true;
    }
    assert_eq!(rolls, 9);
    assert!(seen.iter().all(|&s| s));
    assert_eq!(dice.face(), Face::new(3).unwrap());

    dice.start_slowdown();
    assert_eq!(dice.face(), Face::from_draw(shadow.next()));
    assert_eq!(dice.face(), Face::new(3).unwrap());

    let mut ticks = 0;
    let mut slow_rolls = 0;
    loop {
        ticks += 1;
        match dice.update() {
            DiceEvent::Roll => slow_rolls += 1,
            DiceEvent::Stop => break,
            DiceEvent::None => {}
        }
        assert!(ticks <= u32::from(SLOWDOWN_SPEED));
    }
    assert_eq!(ticks, 1310);
    assert_eq!(slow_rolls, 7);
    assert_eq!(dice.face(), Face::new(4).unwrap());
    assert_eq!(dice.face().pips(), 5);

    let mut leds = DiceLeds::new();
    leds.put(dice.face());
    leds.start_blink();
    let mut phases = 0;
    let mut count = leds.blink_count();
    while leds.is_blinking() {
        leds.update();
        if leds.blink_count() != count {
            phases += 1;
            count = leds.blink_count();
        }
    }
    assert_eq!(phases, 5);
    assert_eq!(leds.pattern(), FACE_PATTERNS[4]);
}

#[test]
fn session_press_and_release_cycle() {
    let (pin, mut session) = session();
    let mut down_edge = None;
    let mut up_edge = None;
    let mut stops = Vec::new();
    let mut rolls = 0;

    pin.set(true);
    for t in 1..=3000u32 {
        if t == 601 {
            pin.set(false);
        }
        let tick = session.tick();
        match tick.button {
            ButtonState::DownEdge => down_edge = Some(t),
            ButtonState::UpEdge => {
                up_edge = Some(t);
                assert!(!session.dice().is_pressed());
            }
            _ => {}
        }
        match tick.event {
            DiceEvent::Roll => rolls += 1,
            DiceEvent::Stop => stops.push(t),
            DiceEvent::None => {}
        }
    }

    // Eight samples of debounce in each direction.
    assert_eq!(down_edge, Some(8));
    assert_eq!(up_edge, Some(608));
    assert_eq!(stops, vec![1917]);
    assert_eq!(rolls, 18);
    assert_eq!(session.face(), Face::new(3).unwrap());
}

#[test]
fn session_shows_face_after_every_roll() {
    let (pin, mut session) = session();
    pin.set(true);
    for _ in 0..400 {
        let tick = session.tick();
        if tick.event == DiceEvent::Roll {
            assert_eq!(
                session.leds().pattern(),
                FACE_PATTERNS[tick.face.index() as usize]
            );
        }
    }
}

#[test]
fn session_lines_mirror_each_drive() {
    let (pin, mut session) = session();
    pin.set(true);
    for t in 0..2000 {
        if t == 300 {
            pin.set(false);
        }
        let tick = session.tick();
        assert_eq!(session.lines().signature(), tick.drive);
    }
}

#[test]
fn session_blinks_after_stop_then_goes_idle() {
    let (pin, mut session) = session();
    pin.set(true);
    for t in 1..=3195u32 {
        if t == 601 {
            pin.set(false);
        }
        let tick = session.tick();
        if t >= 1917 {
            assert!(session.leds().is_blinking(), "blink ended early at {}", t);
        }
        if tick.event == DiceEvent::Stop {
            assert_eq!(session.idle_ticks(), 0);
        }
    }
    assert_eq!(session.idle_ticks(), 0);

    session.tick();
    assert!(!session.leds().is_blinking());
    assert_eq!(session.idle_ticks(), 1);

    for _ in 0..99 {
        session.tick();
    }
    assert_eq!(session.idle_ticks(), 100);
}

#[test]
fn new_press_cancels_blink() {
    let (pin, mut session) = session();
    pin.set(true);
    for t in 1..=2000u32 {
        if t == 601 {
            pin.set(false);
        }
        session.tick();
    }
    assert!(session.leds().is_blinking());

    pin.set(true);
    for _ in 0..8 {
        session.tick();
    }
    assert!(!session.leds().is_blinking());
    assert!(session.dice().is_pressed());
}

#[test]
fn bouncy_contact_yields_one_press() {
    let (pin, mut session) = session();
    let mut presses = 0;

    // Chatter for a few ticks, then a clean hold and release.
    for (t, closed) in [true, false, true, true, false, true]
        .into_iter()
        .chain(std::iter::repeat(true).take(100))
        .chain(std::iter::repeat(false).take(100))
        .enumerate()
    {
        pin.set(closed);
        if session.tick().button == ButtonState::DownEdge {
            presses += 1;
            assert_eq!(t, 12);
        }
    }
    assert_eq!(presses, 1);
}

#[test]
fn idle_session_burns_random_draws() {
    let (_pin, mut session) = session();
    let mut shadow = Xoshiro128pp::from_state([0x1234_5678, 0, 0, 0]);
    for _ in 0..64 {
        session.tick();
        shadow.next();
    }
    assert_eq!(session.rng_state(), shadow.to_bytes());
}

#[test]
fn tone_hears_every_roll_and_the_stop() {
    let (pin, mut session) = session();
    let mut heard = Vec::new();

    pin.set(true);
    for t in 1..=3000u32 {
        if t == 601 {
            pin.set(false);
        }
        let tick = session.tick();
        match tick.tone_event() {
            Some(event) => {
                assert_ne!(event, DiceEvent::None);
                assert_eq!(event, tick.event);
                heard.push((t, event));
            }
            None => assert_eq!(tick.event, DiceEvent::None),
        }
    }

    assert_eq!(heard.len(), 19);
    assert_eq!(heard.iter().filter(|(_, e)| *e == DiceEvent::Roll).count(), 18);
    assert_eq!(heard.last(), Some(&(1917, DiceEvent::Stop)));
}

#[test]
fn indicator_lights_spare_segment_without_waking() {
    let (_pin, mut session) = session();
    let spare = SEGMENT_SIGNATURES[5];

    let dark: Vec<_> = (0..6).map(|_| session.tick().drive).collect();
    assert!(!dark.contains(&spare));

    session.set_indicator(true);
    let lit: Vec<_> = (0..6).map(|_| session.tick().drive).collect();
    assert_eq!(lit.iter().filter(|d| **d == spare).count(), 1);
    assert_eq!(session.idle_ticks(), 12);

    session.set_indicator(false);
    let cleared: Vec<_> = (0..6).map(|_| session.tick().drive).collect();
    assert!(!cleared.contains(&spare));
}
