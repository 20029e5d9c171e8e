//! gossip-metrics — turns gossip snapshots into Prometheus gauges.
//!
//! Every scrape re-reads the snapshot; nothing is cached between scrapes.
//!
//! # Architecture
//!
//! ```text
//! prometheus::Registry
//!   └── gather()
//!         └── PeerCollector (prometheus::core::Collector)
//!               ├── SnapshotSource::fetch()
//!               ├── decode_snapshot()
//!               ├── samples() → six MetricSamples per peer, labelled by index
//!               └── fresh GaugeVecs → MetricFamily
//!
//! Prometheus exposition
//!   └── render_prometheus() → text/plain for /metrics endpoint
//! ```

pub mod collector;
pub mod exposition;
pub mod family;

pub use collector::{ERROR_PORT_VALUE, PeerCollector};
pub use exposition::{CONTENT_TYPE, render_prometheus};
pub use family::{Family, GossipGauges, MetricSample};
