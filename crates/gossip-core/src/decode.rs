//! Snapshot decoding.
//!
//! A snapshot is a JSON array of peer objects. Two modes are supported:
//!
//! - [`DecodeMode::Strict`] treats the snapshot as a unit. Any element of
//!   the wrong shape fails the whole decode.
//! - [`DecodeMode::PerRecord`] only requires a top-level array. Elements
//!   that fail to decode become [`PeerEntry::Error`] at their position.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::peer::{PeerEntry, PeerRecord, RecordError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecodeMode {
    #[default]
    Strict,
    PerRecord,
}

impl DecodeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecodeMode::Strict => "strict",
            DecodeMode::PerRecord => "per_record",
        }
    }
}

impl fmt::Display for DecodeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DecodeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "strict" => Ok(DecodeMode::Strict),
            "per_record" | "per-record" => Ok(DecodeMode::PerRecord),
            other => Err(format!(
                "unknown decode mode {other:?} (expected \"strict\" or \"per_record\")"
            )),
        }
    }
}

/// The snapshot bytes are not a JSON array of the expected shape.
#[derive(Debug, Error)]
#[error("failed to decode snapshot: {0}")]
pub struct DecodeError(#[from] serde_json::Error);

/// Decode a snapshot buffer into an ordered list of entries.
///
/// Order is preserved; position `i` in the result is position `i` in the
/// snapshot array. A `null` element decodes to an all-default record.
/// Invalid UTF-8 is replaced with U+FFFD before parsing, and a key repeated
/// within one object keeps its last value.
pub fn decode_snapshot(bytes: &[u8], mode: DecodeMode) -> Result<Vec<PeerEntry>, DecodeError> {
    let text = String::from_utf8_lossy(bytes);
    let values: Vec<Value> = serde_json::from_str(&text)?;

    match mode {
        DecodeMode::Strict => values
            .into_iter()
            .map(|value| decode_record(value).map(PeerEntry::Record).map_err(DecodeError::from))
            .collect(),
        DecodeMode::PerRecord => Ok(values
            .into_iter()
            .map(|value| match decode_record(value) {
                Ok(record) => PeerEntry::Record(record),
                Err(e) => PeerEntry::Error(RecordError::new(e.to_string())),
            })
            .collect()),
    }
}

fn decode_record(value: Value) -> Result<PeerRecord, serde_json::Error> {
    Ok(serde_json::from_value::<Option<PeerRecord>>(value)?.unwrap_or_default())
}
