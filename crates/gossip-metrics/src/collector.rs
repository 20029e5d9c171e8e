//! Peer collector: republishes gossip snapshot fields as gauges.
//!
//! Each peer yields six samples labelled with its zero-based position in
//! the snapshot. String fields are carried as label values on a gauge of
//! `0`; the two port fields are the gauge value itself.

use prometheus::core::{Collector, Desc};
use prometheus::proto::MetricFamily;
use tracing::{debug, warn};

use gossip_core::{DecodeMode, PeerEntry, PeerRecord, RecordError, SnapshotSource, decode_snapshot};

use crate::family::{Family, GossipGauges, MetricSample};

/// Port value reported for a position whose record could not be decoded.
pub const ERROR_PORT_VALUE: f64 = -1.0;

/// Reads a snapshot from `S` on every collect and emits six gauges per peer.
pub struct PeerCollector<S> {
    /// Descriptor table; never written to.
    gauges: GossipGauges,
    source: S,
    mode: DecodeMode,
}

impl<S: SnapshotSource> PeerCollector<S> {
    pub fn new(source: S) -> prometheus::Result<Self> {
        Ok(Self {
            gauges: GossipGauges::new()?,
            source,
            mode: DecodeMode::Strict,
        })
    }

    pub fn with_mode(mut self, mode: DecodeMode) -> Self {
        self.mode = mode;
        self
    }

    /// Fetch, decode and translate the current snapshot into samples, in
    /// snapshot order.
    pub fn samples(&self) -> Vec<MetricSample> {
        let mut sink = Vec::new();
        self.collect_into(&mut sink);
        sink
    }

    /// Append this scrape's samples to `sink`.
    pub fn collect_into(&self, sink: &mut Vec<MetricSample>) {
        let entries = self.load();
        let mut errors = 0usize;

        for (i, entry) in entries.iter().enumerate() {
            let index = i.to_string();
            match entry {
                PeerEntry::Record(record) => emit_record(sink, record, &index),
                PeerEntry::Error(err) => {
                    errors += 1;
                    emit_error(sink, err, &index);
                }
            }
        }

        debug!(peers = entries.len(), errors, "gossip snapshot collected");
    }

    /// Fetch and decode the current snapshot. Failures are logged and
    /// degrade to an empty list.
    fn load(&self) -> Vec<PeerEntry> {
        let bytes = match self.source.fetch() {
            Ok(bytes) => bytes,
            Err(e) => {
                debug!(error = %e, "snapshot fetch failed");
                Vec::new()
            }
        };

        match decode_snapshot(&bytes, self.mode) {
            Ok(entries) => entries,
            Err(e) => {
                debug!(
                    error = %e,
                    source = %self.source.describe(),
                    mode = %self.mode,
                    "snapshot decode failed"
                );
                Vec::new()
            }
        }
    }
}

fn emit_record(sink: &mut Vec<MetricSample>, record: &PeerRecord, index: &str) {
    let labelled = |value: &str| vec![value.to_string(), index.to_string()];
    sink.push(MetricSample::new(Family::IpAddress, 0.0, labelled(&record.ip_address)));
    sink.push(MetricSample::new(
        Family::IdentityPubkey,
        0.0,
        labelled(&record.identity_pubkey),
    ));
    sink.push(MetricSample::new(
        Family::GossipPort,
        record.gossip_port as f64,
        vec![index.to_string()],
    ));
    sink.push(MetricSample::new(
        Family::TpuPort,
        record.tpu_port as f64,
        vec![index.to_string()],
    ));
    sink.push(MetricSample::new(Family::Version, 0.0, labelled(&record.version)));
    sink.push(MetricSample::new(Family::RpcHost, 0.0, labelled(&record.rpc_host)));
}

fn emit_error(sink: &mut Vec<MetricSample>, err: &RecordError, index: &str) {
    let text = || vec![err.message.clone(), index.to_string()];
    sink.push(MetricSample::new(Family::IpAddress, 0.0, text()));
    sink.push(MetricSample::new(Family::IdentityPubkey, 0.0, text()));
    sink.push(MetricSample::new(Family::GossipPort, ERROR_PORT_VALUE, vec![index.to_string()]));
    sink.push(MetricSample::new(Family::TpuPort, ERROR_PORT_VALUE, vec![index.to_string()]));
    sink.push(MetricSample::new(Family::Version, 0.0, text()));
    sink.push(MetricSample::new(Family::RpcHost, 0.0, text()));
}

impl<S: SnapshotSource> Collector for PeerCollector<S> {
    fn desc(&self) -> Vec<&Desc> {
        self.gauges.descs()
    }

    fn collect(&self) -> Vec<MetricFamily> {
        let samples = self.samples();
        // Fresh vectors per scrape so concurrent scrapes never share values.
        match GossipGauges::new() {
            Ok(gauges) => gauges.record(&samples),
            Err(e) => {
                warn!(error = %e, "failed to build gossip gauges");
                Vec::new()
            }
        }
    }
}
