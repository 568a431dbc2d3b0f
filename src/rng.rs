//! xoshiro128++ 1.0 pseudo-random generator.
//!
//! 128 bits of state, 32-bit output. The output function and state update
//! reproduce the reference algorithm by Blackman and Vigna bit for bit,
//! so published test vectors stay valid.
//!
//! State layout when persisted (16 bytes, little endian):
//! ```text
//! Byte  0-3 : s[0]
//! Byte  4-7 : s[1]
//! Byte  8-11: s[2]
//! Byte 12-15: s[3]
//! ```
//!
//! The state must never be all zero; the generator would then output
//! zeros forever.

use crate::error::Error;
use rand_core::{impls, RngCore, SeedableRng};

/// Raw generator state.
pub type RandomState = [u32; 4];

/// Size of a persisted state block in bytes.
pub const STATE_BYTES: usize = 16;

/// Boot seed used when nothing has been persisted yet.
pub const DEFAULT_STATE: RandomState = [0x1234_5678, 0, 0, 0];

/// Polynomial mask equivalent to 2^64 calls to `next()`.
const JUMP: [u32; 4] = [0x8764_000b, 0xf542_d2d3, 0x6fa0_35c3, 0x77f2_db5b];

/// Polynomial mask equivalent to 2^96 calls to `next()`.
const LONG_JUMP: [u32; 4] = [0xb523_952e, 0x0b6f_099f, 0xccf5_a0ef, 0x1c58_0662];

/// xoshiro128++ generator with an exclusively owned state.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Xoshiro128pp {
    state: RandomState,
}

impl Default for Xoshiro128pp {
    fn default() -> Self {
        Self::from_state(DEFAULT_STATE)
    }
}

impl Xoshiro128pp {
    /// Create a generator from raw state words.
    ///
    /// The caller guarantees the state is not all zero.
    pub const fn from_state(state: RandomState) -> Self {
        Self { state }
    }

    /// Restore a generator from a persisted 16-byte block.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() != STATE_BYTES {
            return Err(Error::InvalidSeed);
        }

        let mut state = [0u32; 4];
        for (word, chunk) in state.iter_mut().zip(bytes.chunks_exact(4)) {
            *word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }

        if state.iter().all(|&w| w == 0) {
            return Err(Error::InvalidSeed);
        }
        Ok(Self { state })
    }

    /// Serialise the state for persistence.
    pub fn to_bytes(&self) -> [u8; STATE_BYTES] {
        let mut buf = [0u8; STATE_BYTES];
        for (chunk, word) in buf.chunks_exact_mut(4).zip(self.state) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
        buf
    }

    /// Raw state words.
    pub fn state(&self) -> RandomState {
        self.state
    }

    /// Overwrite the raw state words (explicit reseed).
    pub fn set_state(&mut self, state: RandomState) {
        self.state = state;
    }

    /// Draw the next 32-bit word.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> u32 {
        let s = &mut self.state;
        let result = s[0].wrapping_add(s[3]).rotate_left(7).wrapping_add(s[0]);

        let t = s[1] << 9;

        s[2] ^= s[0];
        s[3] ^= s[1];
        s[1] ^= s[2];
        s[0] ^= s[3];

        s[2] ^= t;

        s[3] = s[3].rotate_left(11);

        result
    }

    /// Advance the state as if `next()` had been called 2^64 times.
    ///
    /// Used to split one seed into non-overlapping streams.
    pub fn jump(&mut self) {
        self.jump_with(&JUMP);
    }

    /// Advance the state as if `next()` had been called 2^96 times.
    pub fn long_jump(&mut self) {
        self.jump_with(&LONG_JUMP);
    }

    /// Advance the state by the jump polynomial `mask`.
    ///
    /// Bit `j` of the mask (word `j / 32`, bit `j % 32`) is the coefficient
    /// of x^j in x^n mod P(x), where P is the characteristic polynomial of
    /// the state transition; the result equals `n` consecutive draws.
    pub fn jump_with(&mut self, mask: &[u32; 4]) {
        let mut acc = [0u32; 4];
        for &word in mask {
            for bit in 0..32 {
                if word & (1 << bit) != 0 {
                    for (a, s) in acc.iter_mut().zip(self.state) {
                        *a ^= s;
                    }
                }
                self.next();
            }
        }
        self.state = acc;
    }
}

impl RngCore for Xoshiro128pp {
    fn next_u32(&mut self) -> u32 {
        self.next()
    }

    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        impls::fill_bytes_via_next(self, dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for Xoshiro128pp {
    type Seed = [u8; STATE_BYTES];

    /// An all-zero seed falls back to [`DEFAULT_STATE`].
    fn from_seed(seed: Self::Seed) -> Self {
        Self::from_bytes(&seed).unwrap_or_default()
    }
}
