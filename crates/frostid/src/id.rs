use core::fmt;

/// A 64-bit ID packing a timestamp, a machine identity, and a sequence.
///
/// - 1 bit reserved (always zero while the timestamp fits in 41 bits)
/// - 41 bits timestamp (ms since the issuing generator's epoch)
/// - 5 bits data-center ID
/// - 5 bits worker ID
/// - 12 bits sequence
///
/// ```text
///  Bit Index:  63           63 62            22 21                17 16            12 11             0
///              +--------------+----------------+--------------------+---------------+---------------+
///  Field:      | reserved (1) | timestamp (41) | data center ID (5) | worker ID (5) | sequence (12) |
///              +--------------+----------------+--------------------+---------------+---------------+
///              |<----------------------- MSB --------- 64 bits --------- LSB ----------------------->|
/// ```
///
/// Ordering follows the raw integer value, so IDs sort by timestamp first
/// and sequence last.
///
/// # Example
///
/// ```
/// use frostid::FrostId;
///
/// let id = FrostId::from(1000, 2, 3, 1);
/// assert_eq!(id.timestamp(), 1000);
/// assert_eq!(id.data_center_id(), 2);
/// assert_eq!(id.worker_id(), 3);
/// assert_eq!(id.sequence(), 1);
/// ```
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct FrostId {
    id: u64,
}

impl FrostId {
    /// Bitmask for extracting the 41-bit timestamp field. Occupies bits 22
    /// through 62.
    pub const TIMESTAMP_MASK: u64 = (1 << 41) - 1;

    /// Bitmask for extracting the 5-bit data-center ID field. Occupies bits
    /// 17 through 21.
    pub const DATA_CENTER_ID_MASK: u64 = (1 << 5) - 1;

    /// Bitmask for extracting the 5-bit worker ID field. Occupies bits 12
    /// through 16.
    pub const WORKER_ID_MASK: u64 = (1 << 5) - 1;

    /// Bitmask for extracting the 12-bit sequence field. Occupies bits 0
    /// through 11.
    pub const SEQUENCE_MASK: u64 = (1 << 12) - 1;

    /// Number of bits to shift the timestamp to its correct position
    /// (bit 22).
    pub const TIMESTAMP_SHIFT: u64 = 22;

    /// Number of bits to shift the data-center ID to its correct position
    /// (bit 17).
    pub const DATA_CENTER_ID_SHIFT: u64 = 17;

    /// Number of bits to shift the worker ID to its correct position
    /// (bit 12).
    pub const WORKER_ID_SHIFT: u64 = 12;

    /// Number of bits to shift the sequence field (bit 0).
    pub const SEQUENCE_SHIFT: u64 = 0;

    /// Packs the four fields into a single 64-bit value.
    ///
    /// Each field is masked to its width before shifting; out-of-range
    /// input silently wraps within its field. Use [`Self::from_components`]
    /// to catch overflow in debug builds.
    #[must_use]
    pub const fn from(timestamp: u64, data_center_id: u64, worker_id: u64, sequence: u64) -> Self {
        let timestamp = (timestamp & Self::TIMESTAMP_MASK) << Self::TIMESTAMP_SHIFT;
        let data_center_id =
            (data_center_id & Self::DATA_CENTER_ID_MASK) << Self::DATA_CENTER_ID_SHIFT;
        let worker_id = (worker_id & Self::WORKER_ID_MASK) << Self::WORKER_ID_SHIFT;
        let sequence = (sequence & Self::SEQUENCE_MASK) << Self::SEQUENCE_SHIFT;
        Self {
            id: timestamp | data_center_id | worker_id | sequence,
        }
    }

    /// Packs the four fields, asserting in debug builds that each fits its
    /// width.
    #[must_use]
    pub fn from_components(
        timestamp: u64,
        data_center_id: u64,
        worker_id: u64,
        sequence: u64,
    ) -> Self {
        debug_assert!(timestamp <= Self::TIMESTAMP_MASK, "timestamp overflow");
        debug_assert!(
            data_center_id <= Self::DATA_CENTER_ID_MASK,
            "data_center_id overflow"
        );
        debug_assert!(worker_id <= Self::WORKER_ID_MASK, "worker_id overflow");
        debug_assert!(sequence <= Self::SEQUENCE_MASK, "sequence overflow");
        Self::from(timestamp, data_center_id, worker_id, sequence)
    }

    /// Extracts the timestamp from the packed ID.
    #[must_use]
    pub const fn timestamp(&self) -> u64 {
        (self.id >> Self::TIMESTAMP_SHIFT) & Self::TIMESTAMP_MASK
    }

    /// Extracts the data-center ID from the packed ID.
    #[must_use]
    pub const fn data_center_id(&self) -> u64 {
        (self.id >> Self::DATA_CENTER_ID_SHIFT) & Self::DATA_CENTER_ID_MASK
    }

    /// Extracts the worker ID from the packed ID.
    #[must_use]
    pub const fn worker_id(&self) -> u64 {
        (self.id >> Self::WORKER_ID_SHIFT) & Self::WORKER_ID_MASK
    }

    /// Extracts the sequence number from the packed ID.
    #[must_use]
    pub const fn sequence(&self) -> u64 {
        (self.id >> Self::SEQUENCE_SHIFT) & Self::SEQUENCE_MASK
    }

    /// Returns the maximum representable timestamp value.
    #[must_use]
    pub const fn max_timestamp() -> u64 {
        Self::TIMESTAMP_MASK
    }

    /// Returns the maximum representable data-center ID.
    #[must_use]
    pub const fn max_data_center_id() -> u64 {
        Self::DATA_CENTER_ID_MASK
    }

    /// Returns the maximum representable worker ID.
    #[must_use]
    pub const fn max_worker_id() -> u64 {
        Self::WORKER_ID_MASK
    }

    /// Returns the maximum representable sequence value.
    #[must_use]
    pub const fn max_sequence() -> u64 {
        Self::SEQUENCE_MASK
    }

    /// Converts this type into its raw integer representation.
    #[must_use]
    pub const fn to_raw(&self) -> u64 {
        self.id
    }

    /// Converts a raw integer into this type.
    ///
    /// No validation is performed; any bit pattern produces a structurally
    /// valid ID whose fields decode through the same masks.
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self { id: raw }
    }

    /// Returns true if the current sequence value can be incremented.
    #[must_use]
    pub const fn has_sequence_room(&self) -> bool {
        self.sequence() < Self::max_sequence()
    }

    /// Returns the next sequence value.
    #[must_use]
    pub const fn next_sequence(&self) -> u64 {
        self.sequence() + 1
    }

    /// Returns a new ID with the sequence incremented and every other field
    /// unchanged.
    #[must_use]
    pub fn increment_sequence(&self) -> Self {
        Self::from_components(
            self.timestamp(),
            self.data_center_id(),
            self.worker_id(),
            self.next_sequence(),
        )
    }

    /// Returns a new ID for a newer timestamp with the sequence reset to
    /// zero and the machine identity unchanged.
    #[must_use]
    pub fn rollover_to_timestamp(&self, ts: u64) -> Self {
        Self::from_components(ts, self.data_center_id(), self.worker_id(), 0)
    }

    /// Returns the ID as a zero-padded 20-digit string.
    ///
    /// Padded strings compare lexicographically in the same order as the
    /// raw integers.
    #[must_use]
    pub fn to_padded_string(&self) -> String {
        format!("{:020}", self.id)
    }
}

impl From<u64> for FrostId {
    fn from(raw: u64) -> Self {
        Self::from_raw(raw)
    }
}

impl From<FrostId> for u64 {
    fn from(id: FrostId) -> Self {
        id.to_raw()
    }
}

impl fmt::Display for FrostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl fmt::Debug for FrostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrostId")
            .field("id", &format_args!("{} (0x{:016x})", self.id, self.id))
            .field("timestamp", &self.timestamp())
            .field("data_center_id", &self.data_center_id())
            .field("worker_id", &self.worker_id())
            .field("sequence", &self.sequence())
            .finish()
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::FrostId;
    use core::fmt;
    use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

    // 64-bit values exceed the safe integer precision of some interchange
    // hosts, so the wire form is a base-10 digit string.
    impl Serialize for FrostId {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.collect_str(self)
        }
    }

    impl<'de> Deserialize<'de> for FrostId {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            struct IdVisitor;

            impl de::Visitor<'_> for IdVisitor {
                type Value = FrostId;

                fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                    formatter.write_str("a base-10 digit string or an unsigned 64-bit integer")
                }

                fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
                where
                    E: de::Error,
                {
                    v.parse::<u64>()
                        .map(FrostId::from_raw)
                        .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
                }

                fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
                where
                    E: de::Error,
                {
                    Ok(FrostId::from_raw(v))
                }
            }

            deserializer.deserialize_any(IdVisitor)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_and_bounds() {
        let ts = FrostId::max_timestamp();
        let dc = FrostId::max_data_center_id();
        let worker = FrostId::max_worker_id();
        let seq = FrostId::max_sequence();

        let id = FrostId::from(ts, dc, worker, seq);
        assert_eq!(id.timestamp(), ts);
        assert_eq!(id.data_center_id(), dc);
        assert_eq!(id.worker_id(), worker);
        assert_eq!(id.sequence(), seq);
        assert_eq!(FrostId::from_components(ts, dc, worker, seq), id);

        // Every field at its maximum still leaves the reserved bit clear.
        assert_eq!(id.to_raw() >> 63, 0);
    }

    #[test]
    fn low_bit_fields() {
        let id = FrostId::from_components(0, 0, 0, 0);
        assert_eq!(id.to_raw(), 0);

        let id = FrostId::from_components(1, 1, 1, 1);
        assert_eq!(id.timestamp(), 1);
        assert_eq!(id.data_center_id(), 1);
        assert_eq!(id.worker_id(), 1);
        assert_eq!(id.sequence(), 1);
    }

    #[test]
    fn fields_do_not_alias() {
        let id = FrostId::from_components(0, FrostId::max_data_center_id(), 0, 0);
        assert_eq!(id.timestamp(), 0);
        assert_eq!(id.worker_id(), 0);
        assert_eq!(id.sequence(), 0);

        let id = FrostId::from_components(0, 0, FrostId::max_worker_id(), 0);
        assert_eq!(id.timestamp(), 0);
        assert_eq!(id.data_center_id(), 0);
        assert_eq!(id.sequence(), 0);
    }

    #[test]
    #[should_panic(expected = "timestamp overflow")]
    fn timestamp_overflow_panics() {
        let ts = FrostId::max_timestamp() + 1;
        FrostId::from_components(ts, 0, 0, 0);
    }

    #[test]
    #[should_panic(expected = "data_center_id overflow")]
    fn data_center_id_overflow_panics() {
        let dc = FrostId::max_data_center_id() + 1;
        FrostId::from_components(0, dc, 0, 0);
    }

    #[test]
    #[should_panic(expected = "worker_id overflow")]
    fn worker_id_overflow_panics() {
        let worker = FrostId::max_worker_id() + 1;
        FrostId::from_components(0, 0, worker, 0);
    }

    #[test]
    #[should_panic(expected = "sequence overflow")]
    fn sequence_overflow_panics() {
        let seq = FrostId::max_sequence() + 1;
        FrostId::from_components(0, 0, 0, seq);
    }

    #[test]
    fn sequence_helpers() {
        let id = FrostId::from_components(42, 2, 3, 0);
        assert!(id.has_sequence_room());

        let next = id.increment_sequence();
        assert_eq!(next.sequence(), 1);
        assert_eq!(next.timestamp(), 42);
        assert_eq!(next.data_center_id(), 2);
        assert_eq!(next.worker_id(), 3);

        let full = FrostId::from_components(42, 2, 3, FrostId::max_sequence());
        assert!(!full.has_sequence_room());

        let rolled = full.rollover_to_timestamp(43);
        assert_eq!(rolled.timestamp(), 43);
        assert_eq!(rolled.sequence(), 0);
        assert_eq!(rolled.data_center_id(), 2);
        assert_eq!(rolled.worker_id(), 3);
    }

    #[test]
    fn raw_conversions_and_display() {
        let id = FrostId::from_raw(42);
        assert_eq!(id.to_raw(), 42);
        assert_eq!(u64::from(id), 42);
        assert_eq!(FrostId::from_raw(u64::from(id)), id);
        assert_eq!(id.to_string(), "42");
        assert_eq!(id.to_padded_string(), "00000000000000000042");
    }

    #[test]
    fn ordering_follows_raw_value() {
        let older = FrostId::from_components(1, 31, 31, FrostId::max_sequence());
        let newer = FrostId::from_components(2, 0, 0, 0);
        assert!(older < newer);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_as_decimal_string() {
        let id = FrostId::from_raw(u64::MAX);
        let json = serde_json::to_value(id).expect("serialize");
        assert_eq!(json, json!("18446744073709551615"));
    }

    #[test]
    fn string_roundtrip() {
        let id = FrostId::from_components(1234, 2, 3, 7);
        let json = serde_json::to_string(&id).expect("serialize");
        let back: FrostId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, id);
    }

    #[test]
    fn accepts_native_integers() {
        let back: FrostId = serde_json::from_str("42").expect("deserialize");
        assert_eq!(back, FrostId::from_raw(42));
    }

    #[test]
    fn rejects_non_numeric_strings() {
        serde_json::from_str::<FrostId>(r#""not-a-number""#).expect_err("should fail");
    }
}
