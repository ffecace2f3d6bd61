use core::time::Duration;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::FrostId;

/// The fields of a [`FrostId`], recovered by inverting the bit layout.
///
/// Produced by [`decode`]; a pure computation over the ID and the
/// generator's epoch. Decoding never fails: an arbitrary bit pattern yields
/// a structurally valid record whose meaning is up to the caller.
///
/// With the `serde` feature, every integer field serializes as a base-10
/// digit string and `date_time` as a digit string of milliseconds since
/// 1970-01-01 UTC, so values survive interchange hosts whose native numbers
/// cannot hold 64 bits.
///
/// [`decode`]: crate::BasicFrostGenerator::decode
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecodedFrostId {
    /// Milliseconds between the generator's epoch and the instant the ID
    /// was issued.
    #[cfg_attr(feature = "serde", serde(with = "decimal"))]
    pub timestamp: u64,

    /// The issuing generator's data-center ID.
    #[cfg_attr(feature = "serde", serde(with = "decimal"))]
    pub data_center_id: u64,

    /// The issuing generator's worker ID.
    #[cfg_attr(feature = "serde", serde(with = "decimal"))]
    pub worker_id: u64,

    /// Position of the ID within its millisecond.
    #[cfg_attr(feature = "serde", serde(with = "decimal"))]
    pub sequence: u64,

    /// The generator's epoch in milliseconds since 1970-01-01 UTC.
    #[cfg_attr(feature = "serde", serde(with = "decimal"))]
    pub epoch: u64,

    /// Wall-clock instant the ID was issued: epoch + timestamp.
    #[cfg_attr(feature = "serde", serde(with = "unix_millis"))]
    pub date_time: SystemTime,
}

impl DecodedFrostId {
    /// Decodes `id` against the given epoch (a duration since
    /// 1970-01-01 UTC).
    #[must_use]
    pub fn new(id: FrostId, epoch: Duration) -> Self {
        let timestamp = id.timestamp();
        Self {
            timestamp,
            data_center_id: id.data_center_id(),
            worker_id: id.worker_id(),
            sequence: id.sequence(),
            epoch: epoch.as_millis() as u64,
            date_time: UNIX_EPOCH + epoch + Duration::from_millis(timestamp),
        }
    }
}

#[cfg(feature = "serde")]
mod decimal {
    use core::fmt::Display;
    use core::str::FromStr;
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Display,
        S: Serializer,
    {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
    where
        T: FromStr,
        T::Err: Display,
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        text.parse::<T>().map_err(de::Error::custom)
    }
}

#[cfg(feature = "serde")]
mod unix_millis {
    use serde::{Deserialize, Deserializer, Serializer, de};
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    pub fn serialize<S>(value: &SystemTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let millis = value
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::ZERO)
            .as_millis();
        serializer.collect_str(&millis)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<SystemTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        let millis = text.parse::<u64>().map_err(de::Error::custom)?;
        Ok(UNIX_EPOCH + Duration::from_millis(millis))
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn integers_render_as_decimal_strings() {
        let id = FrostId::from_components(1234, 2, 3, 7);
        let decoded = DecodedFrostId::new(id, Duration::from_millis(1000));

        let value = serde_json::to_value(decoded).expect("serialize");
        assert_eq!(
            value,
            json!({
                "timestamp": "1234",
                "data_center_id": "2",
                "worker_id": "3",
                "sequence": "7",
                "epoch": "1000",
                "date_time": "2234",
            })
        );
    }

    #[test]
    fn string_roundtrip() {
        let id = FrostId::from_components(987_654, 31, 0, 4095);
        let decoded = DecodedFrostId::new(id, crate::DEFAULT_EPOCH);

        let json = serde_json::to_string(&decoded).expect("serialize");
        let back: DecodedFrostId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, decoded);
    }
}
