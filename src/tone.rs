//! Hand-off of roll events to the tone subsystem.
//!
//! The tick loop must never wait on sound, so events go through a small
//! static channel with `try_send`; when the tone task falls behind the
//! event is dropped. Melody sequencing is not part of this firmware, the
//! task only receives and reports.

use defmt::{debug, warn};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Receiver};
use shapodice::config::TONE_EVENT_QUEUE_DEPTH;
use shapodice::DiceEvent;

/// Roll/Stop events from the tick loop to the tone task.
pub static TONE_EVENTS: Channel<CriticalSectionRawMutex, DiceEvent, TONE_EVENT_QUEUE_DEPTH> =
    Channel::new();

/// Queue an event without blocking.
pub fn publish(event: DiceEvent) {
    if TONE_EVENTS.try_send(event).is_err() {
        warn!("Tone queue full - dropping {:?}", event);
    }
}

/// Consumer side of [`TONE_EVENTS`].
#[embassy_executor::task]
pub async fn tone_task(
    events: Receiver<'static, CriticalSectionRawMutex, DiceEvent, TONE_EVENT_QUEUE_DEPTH>,
) {
    loop {
        match events.receive().await {
            DiceEvent::Roll => debug!("Tone: roll tick"),
            DiceEvent::Stop => debug!("Tone: stop fanfare"),
            DiceEvent::None => {}
        }
    }
}
