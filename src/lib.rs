//! Control core of the shapodice electronic die.
//!
//! Everything here is pure `no_std` logic that runs unchanged on the host
//! for testing and on the nRF52840 firmware (`main.rs`):
//!
//! - [`rng`]: xoshiro128++ random source with persistent 128-bit state
//! - [`ui::button`]: 8-sample debounce and edge tagging
//! - [`dice`]: roll / slowdown state machine
//! - [`ui::leds`] and [`ui::lines`]: charlieplexed pip scanner
//! - [`session`]: the per-tick handler wiring the above together
//!
//! Usage: `cargo test` on the host. The embedded binary needs
//! `--features embedded` and a `thumbv7em-none-eabihf` target.

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod dice;
pub mod error;
pub mod power_logic;
pub mod rng;
pub mod session;
pub mod ui;

pub use dice::{DiceEvent, Face, RollEngine};
pub use error::Error;
pub use rng::{RandomState, Xoshiro128pp};
pub use session::{DiceSession, Tick};
pub use ui::ButtonState;
