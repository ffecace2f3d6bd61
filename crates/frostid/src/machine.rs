use crate::{Error, RandSource, Result, ThreadRandom};

/// The `(data_center_id, worker_id)` pair identifying one generator.
///
/// Both parts are 5-bit values; distinct pairs are what keep IDs unique
/// across concurrently running generators, so assignment is the caller's
/// responsibility. Use [`MachineId::random`] when no stable assignment
/// scheme exists.
///
/// # Example
///
/// ```
/// use frostid::MachineId;
///
/// let machine = MachineId::new(3, 7)?;
/// assert_eq!(machine.worker_id(), 3);
/// assert_eq!(machine.data_center_id(), 7);
///
/// assert!(MachineId::new(32, 0).is_err());
/// # Ok::<(), frostid::Error>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MachineId {
    worker_id: u64,
    data_center_id: u64,
}

impl MachineId {
    /// Maximum worker ID representable in the 5-bit worker field.
    pub const MAX_WORKER_ID: u64 = (1 << 5) - 1;

    /// Maximum data-center ID representable in the 5-bit data-center field.
    pub const MAX_DATA_CENTER_ID: u64 = (1 << 5) - 1;

    /// Creates a machine ID from explicit parts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WorkerIdOutOfRange`] if `worker_id` exceeds
    /// [`Self::MAX_WORKER_ID`], or [`Error::DataCenterIdOutOfRange`] if
    /// `data_center_id` exceeds [`Self::MAX_DATA_CENTER_ID`]. No usable
    /// value is produced on failure.
    pub const fn new(worker_id: u64, data_center_id: u64) -> Result<Self> {
        if worker_id > Self::MAX_WORKER_ID {
            return Err(Error::WorkerIdOutOfRange {
                value: worker_id,
                max: Self::MAX_WORKER_ID,
            });
        }
        if data_center_id > Self::MAX_DATA_CENTER_ID {
            return Err(Error::DataCenterIdOutOfRange {
                value: data_center_id,
                max: Self::MAX_DATA_CENTER_ID,
            });
        }
        Ok(Self {
            worker_id,
            data_center_id,
        })
    }

    /// Draws both parts independently and uniformly from `[0, 31]` using
    /// the thread-local RNG.
    ///
    /// Randomly drawn identities can collide; prefer [`MachineId::new`]
    /// with a deterministic assignment when collisions matter.
    #[must_use]
    pub fn random() -> Self {
        Self::random_with(&ThreadRandom)
    }

    /// Draws both parts from a custom [`RandSource`].
    #[must_use]
    pub fn random_with<R>(rng: &R) -> Self
    where
        R: RandSource<u64>,
    {
        // Masking a full-width sample to 5 bits keeps the draw uniform.
        Self {
            worker_id: rng.rand() & Self::MAX_WORKER_ID,
            data_center_id: rng.rand() & Self::MAX_DATA_CENTER_ID,
        }
    }

    /// Returns the worker part.
    pub const fn worker_id(&self) -> u64 {
        self.worker_id
    }

    /// Returns the data-center part.
    pub const fn data_center_id(&self) -> u64 {
        self.data_center_id
    }
}
