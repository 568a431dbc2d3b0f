//! shapodice firmware - nRF52840 electronic die.
//!
//! Boot restores the random state from flash, then a 1 kHz ticker runs
//! the dice session until the die has been idle long enough to save the
//! state and power off. Pressing the button wakes (resets) the chip.

#![no_std]
#![no_main]

mod board;
mod power;
mod storage;
mod tone;

use board::Board;
use defmt::{info, warn};
use embassy_embedded_hal::adapter::BlockingAsync;
use embassy_executor::Spawner;
use embassy_time::{Duration, Ticker};
use power::{PowerManager, PowerState};
use shapodice::ui::button::Button;
use shapodice::ui::lines::{apply_signature, DriveSignature};
use shapodice::{config, DiceSession};
use storage::SeedStore;
use {defmt_rtt as _, panic_probe as _};

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let board = Board::new(embassy_nrf::init(Default::default()));
    info!("shapodice starting");

    if let Err(e) = spawner.spawn(tone::tone_task(tone::TONE_EVENTS.receiver())) {
        warn!("Tone task not started: {:?}", defmt::Debug2Format(&e));
    }

    let mut flash = BlockingAsync::new(board.flash);
    let mut seeds = SeedStore::new();
    let rng = seeds.load(&mut flash).await;

    let mut session = DiceSession::new(Button::new(board.button), board.lines, rng);
    let mut power = PowerManager::new();

    let mut ticker = Ticker::every(Duration::from_micros(config::TICK_PERIOD_US));
    loop {
        let tick = session.tick();
        if let Some(event) = tick.tone_event() {
            tone::publish(event);
        }

        match power.update(session.idle_ticks()) {
            PowerState::ShuttingDown => break,
            state => session.set_indicator(state == PowerState::Warning),
        }
        ticker.next().await;
    }

    let state = session.rng_state();
    let (_button, mut lines) = session.into_parts();
    apply_signature(&mut lines, DriveSignature::FLOATING);

    if let Err(e) = seeds.save(&mut flash, state).await {
        warn!("Random state not saved: {}", e);
    }
    power::system_off(board.wake)
}
