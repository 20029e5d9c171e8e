//! The six gossip gauge families and the samples produced for them.

use prometheus::core::{Collector, Desc};
use prometheus::proto::MetricFamily;
use prometheus::{GaugeVec, Opts};

/// One of the six gauge families published per peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    IpAddress,
    IdentityPubkey,
    GossipPort,
    TpuPort,
    Version,
    RpcHost,
}

impl Family {
    /// All families, in emission order.
    pub const ALL: [Family; 6] = [
        Family::IpAddress,
        Family::IdentityPubkey,
        Family::GossipPort,
        Family::TpuPort,
        Family::Version,
        Family::RpcHost,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Family::IpAddress => "gossip_ip_address",
            Family::IdentityPubkey => "gossip_identity_pubkey",
            Family::GossipPort => "gossip_port",
            Family::TpuPort => "gossip_tpu_port",
            Family::Version => "gossip_version",
            Family::RpcHost => "gossip_rpc_host",
        }
    }

    pub fn help(self) -> &'static str {
        match self {
            Family::IpAddress => "IP address",
            Family::IdentityPubkey => "Identity pubkey",
            Family::GossipPort => "Gossip port",
            Family::TpuPort => "TPU port",
            Family::Version => "Gossip version",
            Family::RpcHost => "RPC host",
        }
    }

    /// Label names, positional with `MetricSample::label_values`.
    pub fn label_names(self) -> &'static [&'static str] {
        match self {
            Family::IpAddress => &["ip_address", "index"],
            Family::IdentityPubkey => &["pubkey", "index"],
            Family::GossipPort | Family::TpuPort => &["index"],
            Family::Version => &["version", "index"],
            Family::RpcHost => &["rpc_host", "index"],
        }
    }

    fn gauge_vec(self) -> prometheus::Result<GaugeVec> {
        GaugeVec::new(Opts::new(self.name(), self.help()), self.label_names())
    }
}

/// One gauge vector per family, indexed by `Family`.
pub struct GossipGauges {
    vecs: Vec<GaugeVec>,
}

impl GossipGauges {
    pub fn new() -> prometheus::Result<Self> {
        let vecs = Family::ALL
            .iter()
            .map(|f| f.gauge_vec())
            .collect::<prometheus::Result<Vec<_>>>()?;
        Ok(Self { vecs })
    }

    pub fn get(&self, family: Family) -> &GaugeVec {
        &self.vecs[family as usize]
    }

    pub fn descs(&self) -> Vec<&Desc> {
        self.vecs.iter().flat_map(|v| v.desc()).collect()
    }

    /// Set one gauge per sample and hand back the resulting families.
    pub fn record(self, samples: &[MetricSample]) -> Vec<MetricFamily> {
        for sample in samples {
            let values: Vec<&str> = sample.label_values.iter().map(String::as_str).collect();
            self.get(sample.family)
                .with_label_values(values.as_slice())
                .set(sample.value);
        }
        self.vecs.iter().flat_map(|v| v.collect()).collect()
    }
}

/// One (family, label values, value) triple produced during a collection.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSample {
    pub family: Family,
    pub label_values: Vec<String>,
    pub value: f64,
}

impl MetricSample {
    pub fn new(family: Family, value: f64, label_values: Vec<String>) -> Self {
        debug_assert_eq!(family.label_names().len(), label_values.len());
        Self {
            family,
            label_values,
            value,
        }
    }

    pub fn name(&self) -> &'static str {
        self.family.name()
    }

    /// Label pairs in descriptor order.
    pub fn labels(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.family
            .label_names()
            .iter()
            .copied()
            .zip(self.label_values.iter().map(String::as_str))
    }

    /// Look up one label value by name.
    pub fn label(&self, name: &str) -> Option<&str> {
        self.labels().find(|(n, _)| *n == name).map(|(_, v)| v)
    }
}
