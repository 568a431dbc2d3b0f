//! Power management module - deep sleep for battery operation.
//!
//! nRF52840 power modes used here:
//! - System ON: tick loop running, LEDs scanning (~1 mA average)
//! - System OFF: everything stopped, RAM lost, wake on button (~0.4 µA)
//!
//! Waking from System OFF is a reset, so the random state must be saved
//! to flash before going down.

use crate::board::WakePin;
use defmt::info;
use embassy_nrf::gpio::Port;
use embassy_nrf::pac;
use shapodice::{config, power_logic};

/// Power state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, defmt::Format)]
pub enum PowerState {
    /// Normal operation - ticking and scanning.
    Active,
    /// Idle timeout is close - indicator segment lit.
    Warning,
    /// Idle timeout reached - save state and switch off.
    ShuttingDown,
}

/// Power manager turns the session's idle count into a shutdown decision.
pub struct PowerManager {
    state: PowerState,
}

impl PowerManager {
    /// Create a new power manager.
    pub fn new() -> Self {
        Self {
            state: PowerState::Active,
        }
    }

    /// Per-tick update with the session's consecutive idle tick count.
    pub fn update(&mut self, idle_ticks: u32) -> PowerState {
        let new_state = if power_logic::should_power_down(
            config::POWER_DOWN_ENABLED,
            idle_ticks,
            config::POWER_DOWN_TIMEOUT_TICKS,
        ) {
            PowerState::ShuttingDown
        } else if power_logic::should_warn_power_down(
            config::POWER_DOWN_ENABLED,
            idle_ticks,
            config::POWER_DOWN_TIMEOUT_TICKS,
            config::POWER_DOWN_WARNING_TICKS,
        ) {
            PowerState::Warning
        } else {
            PowerState::Active
        };

        if new_state != self.state {
            info!("Power: {:?} -> {:?}", self.state, new_state);
            self.state = new_state;
        }
        self.state
    }
}

/// Arm the button as a wake-up source and enter System OFF.
///
/// The button pin must already be an input with pull-up.
pub fn system_off(wake: WakePin) -> ! {
    info!("Power: entering System OFF");

    let gpio = match wake.port {
        Port::Port0 => pac::P0,
        Port::Port1 => pac::P1,
    };
    gpio.pin_cnf(wake.pin as usize)
        .modify(|w| w.set_sense(pac::gpio::vals::Sense::LOW));

    cortex_m::asm::dsb();
    pac::POWER.systemoff().write(|w| w.set_systemoff(true));

    // System OFF takes effect asynchronously; never return.
    loop {
        cortex_m::asm::wfe();
    }
}
