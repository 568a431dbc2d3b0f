//! Unified error type for shapodice.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` (with the `defmt` feature) for efficient
//! on-target logging.

use core::fmt;

/// Top-level error type used across the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// A face index outside 0..=5 was supplied.
    InvalidFace(u8),

    /// A persisted random state was the wrong size or all zero.
    InvalidSeed,

    /// Flash read/write/erase failed.
    Storage,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidFace(n) => write!(f, "face index {} out of range 0..=5", n),
            Error::InvalidSeed => f.write_str("random state block is malformed or all zero"),
            Error::Storage => f.write_str("flash storage access failed"),
        }
    }
}
