use core::cell::Cell;
use core::time::Duration;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    DEFAULT_EPOCH, DecodedFrostId, FrostId, IdGenStatus, MachineId, TimeSource, WallClock,
};

/// A non-concurrent ID generator suitable for single-threaded environments.
///
/// This generator is lightweight and fast, but **not thread-safe**: its
/// `(last timestamp, sequence)` state lives in a [`Cell`], so the type is
/// `!Sync` and the compiler rejects shared cross-thread use. Calls on one
/// instance are therefore always sequential, which is exactly what the
/// sequence state machine requires.
///
/// ## Recommended when
/// - You're in a single-threaded environment (no shared access)
/// - You want the fastest generator
///
/// ## See also
/// - [`LockFrostGenerator`] for shared multi-threaded use
///
/// [`LockFrostGenerator`]: crate::LockFrostGenerator
pub struct BasicFrostGenerator<T = WallClock>
where
    T: TimeSource<u64>,
{
    state: Cell<FrostId>,
    machine_id: MachineId,
    epoch: Duration,
    time: T,
}

impl BasicFrostGenerator<WallClock> {
    /// Creates a generator with the given machine identity and the default
    /// epoch ([`DEFAULT_EPOCH`]).
    ///
    /// # Example
    ///
    /// ```
    /// use frostid::{BasicFrostGenerator, MachineId};
    ///
    /// let generator = BasicFrostGenerator::new(MachineId::random());
    ///
    /// let a = generator.generate();
    /// let b = generator.generate();
    /// assert!(a < b);
    /// ```
    #[must_use]
    pub fn new(machine_id: MachineId) -> Self {
        Self::with_epoch(machine_id, DEFAULT_EPOCH)
    }

    /// Creates a generator measuring timestamps from a custom epoch,
    /// specified as a [`Duration`] since 1970-01-01 UTC.
    ///
    /// The 41-bit timestamp field covers roughly 69 years past the epoch;
    /// later instants silently wrap within the field, so pick an epoch near
    /// the deployment date.
    #[must_use]
    pub fn with_epoch(machine_id: MachineId, epoch: Duration) -> Self {
        Self::with_time_source(machine_id, epoch, WallClock::with_epoch(epoch))
    }
}

impl<T> BasicFrostGenerator<T>
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
    /// state machine, e.g. in tests pinning the sequence at its maximum. In
    /// typical use, prefer [`Self::new`] and let the first `generate` call
    /// adopt the current time.
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
            state: Cell::new(id),
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
    /// Returned IDs are strictly increasing as unsigned integers across
    /// sequential calls on one instance. When all 4096 sequence numbers of
    /// a millisecond are spent, this spins on the time source (no sleep,
    /// burning CPU) until the clock advances past the last issued
    /// timestamp, so the wait is bounded by wall-clock progress at roughly
    /// one millisecond. Use [`Self::poll_id`] directly for a non-blocking
    /// variant with custom backoff.
    ///
    /// # Example
    ///
    /// ```
    /// use frostid::{BasicFrostGenerator, MachineId};
    ///
    /// let generator = BasicFrostGenerator::new(MachineId::new(3, 7)?);
    ///
    /// let decoded = generator.decode(generator.generate());
    /// assert_eq!(decoded.worker_id, 3);
    /// assert_eq!(decoded.data_center_id, 7);
    /// # Ok::<(), frostid::Error>(())
    /// ```
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
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
    /// Compares the time source against the last issued timestamp:
    ///
    /// - clock advanced: roll over to the new timestamp, sequence reset to
    ///   zero
    /// - same (or regressed) millisecond with sequence room: increment the
    ///   sequence, timestamp unchanged
    /// - sequence exhausted: [`IdGenStatus::Pending`], state untouched
    ///
    /// A regressed clock keeps issuing from the last timestamp until the
    /// sequence runs out, so output never goes backwards.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn poll_id(&self) -> IdGenStatus {
        let now = self.time.current_millis();
        let state = self.state.get();

        if now > state.timestamp() {
            let updated = state.rollover_to_timestamp(now);
            self.state.set(updated);
            IdGenStatus::Ready { id: updated }
        } else if state.has_sequence_room() {
            let updated = state.increment_sequence();
            self.state.set(updated);
            IdGenStatus::Ready { id: updated }
        } else {
            IdGenStatus::Pending { yield_for: 1 }
        }
    }

    /// Recovers the fields of an ID issued against this generator's epoch.
    ///
    /// A pure function of the ID and the epoch; generator state is not
    /// read or touched, and any bit pattern decodes into a structurally
    /// valid record.
    #[must_use]
    pub fn decode(&self, id: FrostId) -> DecodedFrostId {
        DecodedFrostId::new(id, self.epoch)
    }
}
