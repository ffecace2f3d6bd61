use crate::FrostId;

/// The result of one non-blocking generation step.
///
/// [`IdGenStatus::Ready`] carries a freshly issued ID.
/// [`IdGenStatus::Pending`] means the 4096 sequence numbers of the current
/// millisecond are spent; the caller must wait for the clock to advance
/// before polling again. This is what allows non-blocking generation loops
/// and custom backoff strategies on top of the blocking `generate`.
///
/// # Example
///
/// ```
/// use core::time::Duration;
/// use frostid::{BasicFrostGenerator, FrostId, IdGenStatus, MachineId, TimeSource};
///
/// struct FixedTime;
/// impl TimeSource<u64> for FixedTime {
///     fn current_millis(&self) -> u64 {
///         1
///     }
/// }
///
/// let machine = MachineId::new(0, 1)?;
/// let generator = BasicFrostGenerator::from_components(
///     1,
///     machine,
///     FrostId::max_sequence(),
///     Duration::ZERO,
///     FixedTime,
/// );
///
/// // The millisecond is exhausted and the mock clock never advances.
/// assert!(matches!(generator.poll_id(), IdGenStatus::Pending { .. }));
/// # Ok::<(), frostid::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdGenStatus {
    /// A unique ID was generated and is ready to use.
    Ready {
        /// The generated ID.
        id: FrostId,
    },
    /// No ID could be generated because the sequence is exhausted for the
    /// current millisecond.
    Pending {
        /// How long to wait, in milliseconds, before polling again.
        yield_for: u64,
    },
}
