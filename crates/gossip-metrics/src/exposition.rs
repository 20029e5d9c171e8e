//! Text exposition of a registry.

use prometheus::{Encoder, Registry, TextEncoder};

/// Content type of the Prometheus text exposition format.
pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Gather every registered collector and encode the result as text.
pub fn render_prometheus(registry: &Registry) -> prometheus::Result<String> {
    let encoder = TextEncoder::new();
    let families = registry.gather();
    let mut buffer = String::new();
    encoder.encode_utf8(&families, &mut buffer)?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gossip_core::{DecodeMode, StaticSource};

    use crate::PeerCollector;

    fn registry_with(bytes: &str, mode: DecodeMode) -> Registry {
        let registry = Registry::new();
        let collector = PeerCollector::new(StaticSource::new(bytes)).unwrap().with_mode(mode);
        registry.register(Box::new(collector)).unwrap();
        registry
    }

    #[test]
    fn content_type_matches_text_format() {
        assert_eq!(TextEncoder::new().format_type(), "text/plain; version=0.0.4");
        assert!(CONTENT_TYPE.starts_with(TextEncoder::new().format_type()));
    }

    #[test]
    fn empty_registry_renders_nothing() {
        assert_eq!(render_prometheus(&Registry::new()).unwrap(), "");
    }

    #[test]
    fn empty_snapshot_renders_nothing() {
        let registry = registry_with("[]", DecodeMode::Strict);
        assert_eq!(render_prometheus(&registry).unwrap(), "");
    }

    #[test]
    fn renders_help_type_and_samples() {
        let registry = registry_with(
            r#"[{"ipAddress":"10.0.0.1","gossipPort":8001,"tpuPort":8003}]"#,
            DecodeMode::Strict,
        );
        let text = render_prometheus(&registry).unwrap();

        assert!(text.contains("# HELP gossip_port Gossip port\n"));
        assert!(text.contains("# TYPE gossip_port gauge\n"));
        assert!(text.contains("gossip_port{index=\"0\"} 8001\n"));
        assert!(text.contains("gossip_tpu_port{index=\"0\"} 8003\n"));
        assert!(text.contains("gossip_ip_address{index=\"0\",ip_address=\"10.0.0.1\"} 0\n"));
        assert!(text.contains("gossip_version{index=\"0\",version=\"\"} 0\n"));
    }

    #[test]
    fn label_values_are_escaped() {
        let registry = registry_with(
            r#"[{"version":"a\"b\\c\nd"}]"#,
            DecodeMode::Strict,
        );
        let text = render_prometheus(&registry).unwrap();
        assert!(
            text.contains(r#"gossip_version{index="0",version="a\"b\\c\nd"} 0"#),
            "{text}"
        );
    }

    #[test]
    fn error_sentinel_renders_negative_ports() {
        let registry = registry_with(r#"[{"gossipPort":"x"}]"#, DecodeMode::PerRecord);
        let text = render_prometheus(&registry).unwrap();
        assert!(text.contains("gossip_port{index=\"0\"} -1\n"), "{text}");
        assert!(text.contains("gossip_tpu_port{index=\"0\"} -1\n"), "{text}");
    }
}
