//! Distributed, sortable, unique 64-bit IDs without central coordination.
//!
//! Each [`FrostId`] packs a millisecond timestamp, a data-center ID, a worker
//! ID, and a per-millisecond sequence counter into one `u64`, so IDs sort
//! roughly by creation time. Uniqueness relies on distinct
//! `(data_center_id, worker_id)` pairs across concurrently running
//! generators; no network coordination or persistence is involved.
//!
//! ```text
//!  Bit Index:  63           63 62            22 21                17 16            12 11             0
//!              +--------------+----------------+--------------------+---------------+---------------+
//!  Field:      | reserved (1) | timestamp (41) | data center ID (5) | worker ID (5) | sequence (12) |
//!              +--------------+----------------+--------------------+---------------+---------------+
//!              |<----------------------- MSB --------- 64 bits --------- LSB ----------------------->|
//! ```
//!
//! # Quickstart
//!
//! ```
//! use frostid::{BasicFrostGenerator, MachineId};
//!
//! let generator = BasicFrostGenerator::new(MachineId::random());
//!
//! let id = generator.generate();
//! let decoded = generator.decode(id);
//! assert_eq!(decoded.worker_id, generator.machine_id().worker_id());
//! assert_eq!(decoded.data_center_id, generator.machine_id().data_center_id());
//! ```
//!
//! [`BasicFrostGenerator`] is the fastest option but not thread-safe; share a
//! [`LockFrostGenerator`] instead when several threads issue IDs from the
//! same machine identity.

mod decoded;
mod error;
mod generator;
mod id;
mod machine;
mod rand;
mod time;

pub use crate::decoded::*;
pub use crate::error::*;
pub use crate::generator::*;
pub use crate::id::*;
pub use crate::machine::*;
pub use crate::rand::*;
pub use crate::time::*;
