//! Configuration module for the Vox Gateway server
//!
//! Handles server configuration from .env files, environment variables, and
//! YAML files. Priority: YAML > ENV vars > defaults. Everything deployments
//! tune lives here rather than in code: backend cache capacity, device
//! selection, pre-warm languages, segmentation thresholds, and the symbol
//! normalization table.

use std::env;
use std::path::{Path, PathBuf};

mod yaml;

use crate::core::normalize::default_symbol_table;
use crate::core::segmenter::SegmenterConfig;
use crate::errors::ConfigError;

/// TLS configuration for HTTPS and WSS
#[derive(Debug, Clone)]
pub struct TlsConfig {
    /// Path to the TLS certificate file (PEM format)
    pub cert_path: PathBuf,
    /// Path to the TLS private key file (PEM format)
    pub key_path: PathBuf,
}

/// Server configuration
///
/// Contains everything needed to run the gateway: server settings, the
/// synthesis engine knobs, external collaborator endpoints, and security
/// settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    // Server settings
    pub host: String,
    pub port: u16,

    // TLS configuration (optional)
    pub tls: Option<TlsConfig>,

    // Synthesis engine settings
    /// Maximum number of simultaneously loaded synthesis backends.
    pub max_loaded_backends: usize,
    /// Device/accelerator hint passed to backends (e.g. "cpu", "cuda:0").
    pub device: String,
    /// Language names to pre-warm at startup, in order.
    pub preload_languages: Vec<String>,
    /// Length-scale applied to streamed segments (> 1.0 is slower/clearer).
    pub speaking_rate: f32,

    // Segmentation thresholds
    pub segment_soft_limit: usize,
    pub segment_hard_limit: usize,

    /// Symbol -> spoken-word normalization table for the native language.
    pub normalization: Vec<(String, String)>,

    // External collaborators
    /// Base URL of the inference worker. When unset the built-in tone
    /// placeholder backend is used.
    pub inference_url: Option<String>,
    /// Base URL of the translation backend. When unset translation is
    /// disabled and original text is synthesized.
    pub translator_url: Option<String>,

    // Security configuration
    /// CORS allowed origins (comma-separated list or "*" for all)
    /// Default: None (CORS disabled, same-origin only)
    pub cors_allowed_origins: Option<String>,

    // Rate limiting configuration
    /// Maximum requests per second per IP address
    pub rate_limit_requests_per_second: u32,
    /// Maximum burst size for rate limiting
    pub rate_limit_burst_size: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            tls: None,
            max_loaded_backends: 3,
            device: "cpu".to_string(),
            preload_languages: Vec::new(),
            speaking_rate: 1.1,
            segment_soft_limit: 5,
            segment_hard_limit: 10,
            normalization: default_symbol_table(),
            inference_url: None,
            translator_url: None,
            cors_allowed_origins: None,
            rate_limit_requests_per_second: 60,
            rate_limit_burst_size: 10,
        }
    }
}

fn env_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

fn parse_env<T: std::str::FromStr>(name: &str) -> Result<Option<T>, ConfigError> {
    match env_var(name) {
        Some(v) => v
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::Invalid(format!("{name} has an invalid value: '{v}'"))),
        None => Ok(None),
    }
}

impl ServerConfig {
    /// Load configuration from environment variables over defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(host) = env_var("HOST") {
            config.host = host;
        }
        if let Some(port) = parse_env::<u16>("PORT")? {
            config.port = port;
        }
        if let Some(n) = parse_env::<usize>("MAX_LOADED_BACKENDS")? {
            config.max_loaded_backends = n;
        }
        if let Some(device) = env_var("MODEL_DEVICE") {
            config.device = device;
        }
        if let Some(langs) = env_var("PRELOAD_LANGUAGES") {
            config.preload_languages = langs
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
        if let Some(rate) = parse_env::<f32>("SPEAKING_RATE")? {
            config.speaking_rate = rate;
        }
        if let Some(n) = parse_env::<usize>("SEGMENT_SOFT_LIMIT")? {
            config.segment_soft_limit = n;
        }
        if let Some(n) = parse_env::<usize>("SEGMENT_HARD_LIMIT")? {
            config.segment_hard_limit = n;
        }
        config.inference_url = env_var("INFERENCE_URL");
        config.translator_url = env_var("TRANSLATOR_URL");
        config.cors_allowed_origins = env_var("CORS_ALLOWED_ORIGINS");
        if let Some(rps) = parse_env::<u32>("RATE_LIMIT_RPS")? {
            config.rate_limit_requests_per_second = rps;
        }
        if let Some(burst) = parse_env::<u32>("RATE_LIMIT_BURST")? {
            config.rate_limit_burst_size = burst;
        }

        if let (Some(cert), Some(key)) = (env_var("TLS_CERT_PATH"), env_var("TLS_KEY_PATH")) {
            config.tls = Some(TlsConfig {
                cert_path: PathBuf::from(cert),
                key_path: PathBuf::from(key),
            });
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file, with environment variables as
    /// the fallback layer for anything the file omits.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let base = Self::from_env()?;
        let config = yaml::apply_yaml_file(base, path)?;
        config.validate()?;
        Ok(config)
    }

    /// Listen address as `host:port`.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn is_tls_enabled(&self) -> bool {
        self.tls.is_some()
    }

    /// Segmenter thresholds as a [`SegmenterConfig`].
    pub fn segmenter(&self) -> SegmenterConfig {
        SegmenterConfig {
            soft_limit: self.segment_soft_limit,
            hard_limit: self.segment_hard_limit,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_loaded_backends == 0 {
            return Err(ConfigError::Invalid(
                "max_loaded_backends must be at least 1".to_string(),
            ));
        }
        if self.segment_soft_limit == 0 || self.segment_hard_limit == 0 {
            return Err(ConfigError::Invalid(
                "segmentation thresholds must be at least 1".to_string(),
            ));
        }
        if self.segment_hard_limit < self.segment_soft_limit {
            return Err(ConfigError::Invalid(format!(
                "segment_hard_limit ({}) must be >= segment_soft_limit ({})",
                self.segment_hard_limit, self.segment_soft_limit
            )));
        }
        if self.speaking_rate <= 0.0 {
            return Err(ConfigError::Invalid(
                "speaking_rate must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
