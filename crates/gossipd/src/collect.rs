//! `gossipd collect`: run one collection and print it to stdout.

use std::io::{Read, Write};

use anyhow::Context;
use gossip_core::{ExporterConfig, FileSource, SnapshotSource, StaticSource};
use gossip_metrics::{PeerCollector, render_prometheus};
use prometheus::Registry;

pub fn run(config: &ExporterConfig, from_stdin: bool) -> anyhow::Result<()> {
    let output = if from_stdin {
        let mut bytes = Vec::new();
        std::io::stdin()
            .read_to_end(&mut bytes)
            .context("reading snapshot from stdin")?;
        render(StaticSource::new(bytes), config)?
    } else {
        render(FileSource::new(&config.snapshot.path), config)?
    };

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

fn render<S>(source: S, config: &ExporterConfig) -> anyhow::Result<String>
where
    S: SnapshotSource + 'static,
{
    let collector = PeerCollector::new(source)?.with_mode(config.snapshot.decode);
    let registry = Registry::new();
    registry.register(Box::new(collector))?;
    Ok(render_prometheus(&registry)?)
}
