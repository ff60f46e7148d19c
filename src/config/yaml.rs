//! YAML configuration file loading
//!
//! Every field is optional: the YAML layer only overrides what it names,
//! on top of whatever the environment layer already set.
//!
//! ```yaml
//! server:
//!   host: 0.0.0.0
//!   port: 8000
//! engine:
//!   max_loaded_backends: 3
//!   device: cpu
//!   preload_languages: [english, hindi]
//!   speaking_rate: 1.1
//! segmentation:
//!   soft_limit: 5
//!   hard_limit: 10
//! normalization:
//!   - ["+", " plus "]
//!   - ["=", " equals "]
//! collaborators:
//!   inference_url: http://worker:9000
//!   translator_url: http://translate:5000
//! security:
//!   cors_allowed_origins: "*"
//!   rate_limit_requests_per_second: 60
//!   rate_limit_burst_size: 10
//! tls:
//!   cert_path: /etc/vox/cert.pem
//!   key_path: /etc/vox/key.pem
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::errors::ConfigError;

use super::{ServerConfig, TlsConfig};

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct YamlConfig {
    #[serde(default)]
    server: ServerSection,
    #[serde(default)]
    engine: EngineSection,
    #[serde(default)]
    segmentation: SegmentationSection,
    /// Symbol table entries; replaces the default table when present.
    normalization: Option<Vec<(String, String)>>,
    #[serde(default)]
    collaborators: CollaboratorsSection,
    #[serde(default)]
    security: SecuritySection,
    tls: Option<TlsSection>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ServerSection {
    host: Option<String>,
    port: Option<u16>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct EngineSection {
    max_loaded_backends: Option<usize>,
    device: Option<String>,
    preload_languages: Option<Vec<String>>,
    speaking_rate: Option<f32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SegmentationSection {
    soft_limit: Option<usize>,
    hard_limit: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct CollaboratorsSection {
    inference_url: Option<String>,
    translator_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SecuritySection {
    cors_allowed_origins: Option<String>,
    rate_limit_requests_per_second: Option<u32>,
    rate_limit_burst_size: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TlsSection {
    cert_path: PathBuf,
    key_path: PathBuf,
}

/// Read `path` and layer its settings over `base`.
pub(super) fn apply_yaml_file(base: ServerConfig, path: &Path) -> Result<ServerConfig, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    let yaml: YamlConfig = serde_yaml::from_str(&raw).map_err(|e| ConfigError::Parse {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    Ok(apply(base, yaml))
}

fn apply(mut config: ServerConfig, yaml: YamlConfig) -> ServerConfig {
    if let Some(host) = yaml.server.host {
        config.host = host;
    }
    if let Some(port) = yaml.server.port {
        config.port = port;
    }
    if let Some(n) = yaml.engine.max_loaded_backends {
        config.max_loaded_backends = n;
    }
    if let Some(device) = yaml.engine.device {
        config.device = device;
    }
    if let Some(langs) = yaml.engine.preload_languages {
        config.preload_languages = langs;
    }
    if let Some(rate) = yaml.engine.speaking_rate {
        config.speaking_rate = rate;
    }
    if let Some(n) = yaml.segmentation.soft_limit {
        config.segment_soft_limit = n;
    }
    if let Some(n) = yaml.segmentation.hard_limit {
        config.segment_hard_limit = n;
    }
    if let Some(table) = yaml.normalization {
        config.normalization = table;
    }
    if let Some(url) = yaml.collaborators.inference_url {
        config.inference_url = Some(url);
    }
    if let Some(url) = yaml.collaborators.translator_url {
        config.translator_url = Some(url);
    }
    if let Some(origins) = yaml.security.cors_allowed_origins {
        config.cors_allowed_origins = Some(origins);
    }
    if let Some(rps) = yaml.security.rate_limit_requests_per_second {
        config.rate_limit_requests_per_second = rps;
    }
    if let Some(burst) = yaml.security.rate_limit_burst_size {
        config.rate_limit_burst_size = burst;
    }
    if let Some(tls) = yaml.tls {
        config.tls = Some(TlsConfig {
            cert_path: tls.cert_path,
            key_path: tls.key_path,
        });
    }
    config
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn yaml_overrides_base_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
server:
  port: 9100
engine:
  max_loaded_backends: 5
  preload_languages: [english, hindi]
segmentation:
  soft_limit: 4
  hard_limit: 12
collaborators:
  inference_url: http://worker:9000
"#
        )
        .unwrap();

        let config = apply_yaml_file(ServerConfig::default(), file.path()).unwrap();
        assert_eq!(config.port, 9100);
        assert_eq!(config.max_loaded_backends, 5);
        assert_eq!(config.preload_languages, vec!["english", "hindi"]);
        assert_eq!(config.segment_soft_limit, 4);
        assert_eq!(config.segment_hard_limit, 12);
        assert_eq!(config.inference_url.as_deref(), Some("http://worker:9000"));
        // Untouched fields keep their defaults.
        assert_eq!(config.host, "0.0.0.0");
    }

    #[test]
    fn empty_yaml_changes_nothing() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{}}").unwrap();

        let config = apply_yaml_file(ServerConfig::default(), file.path()).unwrap();
        assert_eq!(config.port, ServerConfig::default().port);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "nonsense: true").unwrap();

        let err = apply_yaml_file(ServerConfig::default(), file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err =
            apply_yaml_file(ServerConfig::default(), Path::new("/nonexistent.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn normalization_table_replaces_default() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
normalization:
  - ["%", " percent"]
"#
        )
        .unwrap();

        let config = apply_yaml_file(ServerConfig::default(), file.path()).unwrap();
        assert_eq!(
            config.normalization,
            vec![("%".to_string(), " percent".to_string())]
        );
    }
}
