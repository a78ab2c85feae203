use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::event::{DeviceMetadata, FakeEvent, Telemetry};

pub const DEFAULT_URL: &str = "https://localhost:3000/event";
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Main configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub log_level: LogLevel,
    pub target: TargetConfig,
    pub device: DeviceMetadata,
    pub telemetry: Telemetry,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    Off,
}

impl LogLevel {
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Off => "off",
        }
    }
}

/// How the telemetry fields are encoded in the request body
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BodyEncoding {
    /// application/x-www-form-urlencoded
    #[default]
    Form,
    /// application/json with numeric values
    Json,
}

/// Where and how the event is sent
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TargetConfig {
    pub url: String,
    /// Global request timeout
    pub timeout_secs: u64,
    /// PEM bundle to trust instead of the bundled web roots
    pub ca_cert: Option<PathBuf>,
    /// Skip certificate verification entirely
    pub insecure: bool,
    /// Sent as `Authorization: Basic <token>`
    pub auth_token: Option<String>,
    pub encoding: BodyEncoding,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            ca_cert: None,
            insecure: false,
            auth_token: None,
            encoding: BodyEncoding::Form,
        }
    }
}

impl TargetConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Check FAKE_EVENT_CONFIG env var
        if let Ok(env_path) = std::env::var("FAKE_EVENT_CONFIG") {
            let path = PathBuf::from(env_path);
            if path.exists() {
                match Self::load_from_file(&path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from FAKE_EVENT_CONFIG: {}", e);
                    }
                }
            }
        }

        // Try ~/.config/fake-event/fake-event.yaml
        if let Some(config_dir) = dirs::config_dir() {
            let path = config_dir.join("fake-event").join("fake-event.yaml");
            if path.exists() {
                match Self::load_from_file(&path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from {}: {}", path.display(), e);
                    }
                }
            }
        }

        // Try ./fake-event.yaml (for development)
        let local_config = PathBuf::from("fake-event.yaml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    log::warn!("Failed to load local config: {}", e);
                }
            }
        }

        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        log::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    pub fn event(&self) -> FakeEvent {
        FakeEvent::new(self.device.clone(), self.telemetry.clone())
    }

    /// Expand a path that may contain ~ or env vars
    pub fn expand_path(path: &Path) -> PathBuf {
        let path_str = path.to_string_lossy();
        let expanded = shellexpand::full(&path_str).unwrap_or_else(|_| path_str.clone());
        PathBuf::from(expanded.as_ref())
    }
}
