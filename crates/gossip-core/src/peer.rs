//! Peer records as they appear in a gossip snapshot.

use serde::{Deserialize, Deserializer, Serialize};

/// One network-visible peer observed in a gossip snapshot.
///
/// Wire keys are camelCase. Missing keys and explicit `null` values fall
/// back to the field's default; unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeerRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub ip_address: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub identity_pubkey: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub gossip_port: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tpu_port: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub version: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rpc_host: String,
}

/// An error tied to a single position in the snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordError {
    pub message: String,
}

impl RecordError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for RecordError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for RecordError {}

/// A decoded snapshot position: either a usable record or the reason it
/// could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeerEntry {
    Record(PeerRecord),
    Error(RecordError),
}

impl PeerEntry {
    pub fn is_error(&self) -> bool {
        matches!(self, PeerEntry::Error(_))
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
