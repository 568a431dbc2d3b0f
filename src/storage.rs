//! Persistent storage for the random generator state.
//!
//! Uses the nRF52840's internal flash via `sequential-storage` crate so
//! the die does not replay the same sequence after every power cycle.
//!
//! Storage layout:
//!   - One key-value map with a single key holding the 16-byte state.
//!   - Writes append a new record; `sequential-storage` handles wear
//!     levelling and garbage collection across the reserved pages.

use defmt::{debug, error, info, warn};
use embedded_storage_async::nor_flash::NorFlash;
use shapodice::config::{STORAGE_FLASH_PAGE_COUNT, STORAGE_FLASH_PAGE_START};
use shapodice::rng::STATE_BYTES;
use shapodice::{Error, Xoshiro128pp};

/// Flash page size for nRF52840 (4 KB).
const FLASH_PAGE_SIZE: u32 = 4096;

/// Start address of our storage region.
const STORAGE_START: u32 = STORAGE_FLASH_PAGE_START * FLASH_PAGE_SIZE;

/// End address (exclusive) of our storage region.
const STORAGE_END: u32 = (STORAGE_FLASH_PAGE_START + STORAGE_FLASH_PAGE_COUNT) * FLASH_PAGE_SIZE;

/// Key for the generator state in the map storage.
const KEY_RNG_STATE: u8 = 0x01;

/// Scratch buffer size; state plus map item header with headroom.
const MAX_RECORD_SIZE: usize = 64;

/// Write-through cache of the last persisted state block.
pub struct SeedStore {
    /// What flash currently holds, if known.
    stored: Option<[u8; STATE_BYTES]>,
}

impl SeedStore {
    /// Create a store that has not touched flash yet.
    pub const fn new() -> Self {
        Self { stored: None }
    }

    /// Load the persisted generator, falling back to the boot seed.
    pub async fn load(&mut self, flash: &mut impl NorFlash) -> Xoshiro128pp {
        let mut buf = [0u8; MAX_RECORD_SIZE];

        let fetched = sequential_storage::map::fetch_item::<u8, &[u8], _>(
            flash,
            STORAGE_START..STORAGE_END,
            &mut sequential_storage::cache::NoCache::new(),
            &mut buf,
            &KEY_RNG_STATE,
        )
        .await;

        match fetched {
            Ok(Some(data)) => match Xoshiro128pp::from_bytes(data) {
                Ok(rng) => {
                    info!("Loaded random state from flash");
                    self.stored = Some(rng.to_bytes());
                    rng
                }
                Err(e) => {
                    warn!("Stored random state rejected: {}", e);
                    Xoshiro128pp::default()
                }
            },
            Ok(None) => {
                info!("No random state in flash - using boot seed");
                Xoshiro128pp::default()
            }
            Err(e) => {
                error!("Flash read error: {:?}", defmt::Debug2Format(&e));
                Xoshiro128pp::default()
            }
        }
    }

    /// Persist a state block unless flash already holds it.
    pub async fn save(
        &mut self,
        flash: &mut impl NorFlash,
        state: [u8; STATE_BYTES],
    ) -> Result<(), Error> {
        if self.stored == Some(state) {
            debug!("SeedStore: no changes to save");
            return Ok(());
        }

        let mut buf = [0u8; MAX_RECORD_SIZE];
        let item: &[u8] = &state;

        match sequential_storage::map::store_item::<u8, &[u8], _>(
            flash,
            STORAGE_START..STORAGE_END,
            &mut sequential_storage::cache::NoCache::new(),
            &mut buf,
            &KEY_RNG_STATE,
            &item,
        )
        .await
        {
            Ok(()) => {
                info!("Saved random state to flash");
                self.stored = Some(state);
                Ok(())
            }
            Err(e) => {
                error!("Flash write error: {:?}", defmt::Debug2Format(&e));
                Err(Error::Storage)
            }
        }
    }
}
