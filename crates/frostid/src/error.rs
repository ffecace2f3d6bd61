/// A result type defaulting to the crate's [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All error variants that `frostid` can emit.
///
/// Machine-identifier validation happens once, at [`MachineId::new`]; after
/// construction the only fallible operation is locking a shared generator
/// backed by a std mutex. With the `parking-lot` feature the lock cannot
/// poison and the crate is infallible past construction.
///
/// [`MachineId::new`]: crate::MachineId::new
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The supplied worker ID does not fit in the 5-bit worker field.
    #[error("worker ID must be between 0 and {max}, got {value}")]
    WorkerIdOutOfRange { value: u64, max: u64 },

    /// The supplied data-center ID does not fit in the 5-bit data-center
    /// field.
    #[error("data center ID must be between 0 and {max}, got {value}")]
    DataCenterIdOutOfRange { value: u64, max: u64 },

    /// The operation failed because the generator lock was poisoned.
    ///
    /// This occurs when a thread panics while holding the lock. When the
    /// `parking-lot` feature is enabled, mutexes do not poison, so this
    /// variant is not available.
    #[cfg(not(feature = "parking-lot"))]
    #[error("generator lock poisoned")]
    LockPoisoned,
}

#[cfg(not(feature = "parking-lot"))]
use std::sync::{MutexGuard, PoisonError};

// Convert all poisoned lock errors to a simplified `LockPoisoned`.
#[cfg(not(feature = "parking-lot"))]
impl<T> From<PoisonError<MutexGuard<'_, T>>> for Error {
    fn from(_: PoisonError<MutexGuard<'_, T>>) -> Self {
        Self::LockPoisoned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_errors_name_the_bound() {
        let err = Error::WorkerIdOutOfRange { value: 32, max: 31 };
        assert_eq!(err.to_string(), "worker ID must be between 0 and 31, got 32");

        let err = Error::DataCenterIdOutOfRange { value: 99, max: 31 };
        assert_eq!(
            err.to_string(),
            "data center ID must be between 0 and 31, got 99"
        );
    }
}
