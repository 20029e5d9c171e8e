//! Config resolution: CLI flag > config file > built-in default.

use anyhow::Context;
use gossip_core::ExporterConfig;

use crate::SnapshotArgs;

pub fn load(args: &SnapshotArgs) -> anyhow::Result<ExporterConfig> {
    let mut config = match &args.config {
        Some(path) => ExporterConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => ExporterConfig::default(),
    };

    if let Some(path) = &args.snapshot {
        config.snapshot.path = path.clone();
    }
    if let Some(mode) = args.decode {
        config.snapshot.decode = mode;
    }

    Ok(config)
}
