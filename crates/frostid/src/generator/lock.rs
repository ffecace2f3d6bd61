use core::time::Duration;
use std::sync::Arc;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    DEFAULT_EPOCH, DecodedFrostId, FrostId, IdGenStatus, MachineId, Result, TimeSource, WallClock,
    generator::mutex::Mutex,
};

/// A lock-based ID generator suitable for multi-threaded environments.
///
/// Wraps the `(last timestamp, sequence)` state in an [`Arc<Mutex<_>>`], so
/// clones share one sequence state machine and concurrent `generate` calls
/// are serialized. This is the synchronization the basic generator leaves
/// to the caller, made explicit.
///
/// With a std mutex, a thread panicking mid-generation poisons the lock and
/// the fallible methods surface [`Error::LockPoisoned`]. Enable the
/// `parking-lot` feature for a lock that cannot poison, which also unlocks
/// the infallible [`generate`](Self::generate) / [`poll_id`](Self::poll_id)
/// methods.
///
/// ## Recommended when
/// - Several threads issue IDs under one machine identity
///
/// ## See also
/// - [`BasicFrostGenerator`] for single-threaded use
///
/// [`BasicFrostGenerator`]: crate::BasicFrostGenerator
/// [`Error::LockPoisoned`]: crate::Error
pub struct LockFrostGenerator<T = WallClock>
where
    T: TimeSource<u64>,
{
    state: Arc<Mutex<FrostId>>,
    machine_id: MachineId,
    epoch: Duration,
    time: T,
}

impl<T> Clone for LockFrostGenerator<T>
where
    T: TimeSource<u64> + Clone,
{
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            machine_id: self.machine_id,
            epoch: self.epoch,
            time: self.time.clone(),
        }
    }
}

impl LockFrostGenerator<WallClock> {
    /// Creates a generator with the given machine identity and the default
    /// epoch ([`DEFAULT_EPOCH`]).
    ///
    /// # Example
    ///
    /// ```
    /// use frostid::{LockFrostGenerator, MachineId};
    /// use std::thread;
    ///
    /// let generator = LockFrostGenerator::new(MachineId::random());
    ///
    /// let handles: Vec<_> = (0..4)
    ///     .map(|_| {
    ///         let generator = generator.clone();
    ///         thread::spawn(move || generator.try_generate().expect("lock poisoned"))
    ///     })
    ///     .collect();
    ///
    /// let mut ids: Vec<_> = handles
    ///     .into_iter()
    ///     .map(|h| h.join().expect("worker thread panicked"))
    ///     .collect();
    /// ids.sort();
    /// ids.dedup();
    /// assert_eq!(ids.len(), 4);
    /// ```
    #[must_use]
    pub fn new(machine_id: MachineId) -> Self {
        Self::with_epoch(machine_id, DEFAULT_EPOCH)
    }

    /// Creates a generator measuring timestamps from a custom epoch,
    /// specified as a [`Duration`] since 1970-01-01 UTC.
    #[must_use]
    pub fn with_epoch(machine_id: MachineId, epoch: Duration) -> Self {
        Self::with_time_source(machine_id, epoch, WallClock::with_epoch(epoch))
    }
}

impl<T> LockFrostGenerator<T>
where
    T: TimeSource<u64>,
{
    /// Creates a generator backed by a custom [`TimeSource`].
    ///
    /// `time` must report milliseconds elapsed since `epoch`; the epoch
    /// itself is only used by [`Self::decode`] and the [`Self::epoch`]
    /// accessor.
    #[must_use]
    pub fn with_time_source(machine_id: MachineId, epoch: Duration, time: T) -> Self {
        Self::from_components(0, machine_id, 0, epoch, time)
    }

    /// Creates a generator from explicit state-component values.
    ///
    /// Primarily useful for controlling the starting point of the sequence
    /// state machine. In typical use, prefer [`Self::new`] and let the
    /// first generation adopt the current time.
    #[must_use]
    pub fn from_components(
        timestamp: u64,
        machine_id: MachineId,
        sequence: u64,
        epoch: Duration,
        time: T,
    ) -> Self {
        let id = FrostId::from_components(
            timestamp,
            machine_id.data_center_id(),
            machine_id.worker_id(),
            sequence,
        );
        Self {
            state: Arc::new(Mutex::new(id)),
            machine_id,
            epoch,
            time,
        }
    }

    /// The machine identity encoded into every ID this generator issues.
    pub const fn machine_id(&self) -> MachineId {
        self.machine_id
    }

    /// The configured epoch as a duration since 1970-01-01 UTC.
    pub const fn epoch(&self) -> Duration {
        self.epoch
    }

    /// Generates the next ID, blocking if the current millisecond is
    /// exhausted.
    ///
    /// Infallible counterpart of [`Self::try_generate`]; available because
    /// `parking_lot` locks cannot poison.
    #[cfg(feature = "parking-lot")]
    #[must_use]
    pub fn generate(&self) -> FrostId {
        loop {
            match self.poll_id() {
                IdGenStatus::Ready { id } => break id,
                IdGenStatus::Pending { .. } => core::hint::spin_loop(),
            }
        }
    }

    /// Runs one step of the sequence state machine.
    ///
    /// Infallible counterpart of [`Self::try_poll_id`]; available because
    /// `parking_lot` locks cannot poison.
    #[cfg(feature = "parking-lot")]
    pub fn poll_id(&self) -> IdGenStatus {
        match self.try_poll_id() {
            Ok(status) => status,
            // With parking_lot the fallible path never constructs an error.
            Err(_) => unreachable!("parking_lot locks cannot poison"),
        }
    }

    /// Generates the next ID, blocking if the current millisecond is
    /// exhausted.
    ///
    /// IDs issued across all clones of one generator are unique, and the
    /// underlying state never goes backwards. When the sequence for the
    /// current millisecond is spent this spins on the time source (no
    /// sleep) until the clock advances, bounding the wait at roughly one
    /// millisecond of wall-clock progress.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LockPoisoned`] if another thread panicked while
    /// holding the state lock (std mutex only).
    ///
    /// [`Error::LockPoisoned`]: crate::Error
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn try_generate(&self) -> Result<FrostId> {
        loop {
            match self.try_poll_id()? {
                IdGenStatus::Ready { id } => break Ok(id),
                IdGenStatus::Pending { .. } => core::hint::spin_loop(),
            }
        }
    }

    /// Runs one step of the sequence state machine under the lock.
    ///
    /// Same transitions as [`BasicFrostGenerator::poll_id`], applied to the
    /// shared state.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LockPoisoned`] if another thread panicked while
    /// holding the state lock (std mutex only).
    ///
    /// [`BasicFrostGenerator::poll_id`]: crate::BasicFrostGenerator::poll_id
    /// [`Error::LockPoisoned`]: crate::Error
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn try_poll_id(&self) -> Result<IdGenStatus> {
        let now = self.time.current_millis();

        let mut id = {
            #[cfg(feature = "parking-lot")]
            {
                self.state.lock()
            }
            #[cfg(not(feature = "parking-lot"))]
            {
                self.state.lock()?
            }
        };

        let state = *id;
        if now > state.timestamp() {
            *id = state.rollover_to_timestamp(now);
            Ok(IdGenStatus::Ready { id: *id })
        } else if state.has_sequence_room() {
            *id = state.increment_sequence();
            Ok(IdGenStatus::Ready { id: *id })
        } else {
            Ok(IdGenStatus::Pending { yield_for: 1 })
        }
    }

    /// Recovers the fields of an ID issued against this generator's epoch.
    ///
    /// A pure function of the ID and the epoch; the state lock is not
    /// taken, and any bit pattern decodes into a structurally valid record.
    #[must_use]
    pub fn decode(&self, id: FrostId) -> DecodedFrostId {
        DecodedFrostId::new(id, self.epoch)
    }
}
