pub mod config;
pub mod decode;
pub mod peer;
pub mod source;

pub use config::{ConfigError, ExporterConfig};
pub use decode::{DecodeError, DecodeMode, decode_snapshot};
pub use peer::{PeerEntry, PeerRecord, RecordError};
pub use source::{FileSource, SnapshotSource, SourceError, StaticSource};
