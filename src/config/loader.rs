//! Configuration file loading with precedence handling.

use crate::transmit::{FrameRate, OutputMode, TransmitMode};
use crate::transport::serial::{default_prefix, DEFAULT_ATTEMPTS, DEFAULT_SCAN_LIMIT};
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "MLTC_CONFIG";

/// Environment variable overriding the frame rate.
pub const FPS_ENV: &str = "MLTC_FPS";

/// Default width of the strobe panel in columns.
pub const DEFAULT_STROBE_WIDTH: u16 = 16;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (permission issues, not a file).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// A field parsed but holds an unusable value.
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue {
        /// TOML key.
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/mltc/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Strobe frame rate in frames per second.
    #[serde(default)]
    pub frame_rate: Option<i64>,

    /// `"interleaved"` or `"blocking"`.
    #[serde(default)]
    pub transmit_mode: Option<TransmitMode>,

    /// `"strobe"` or `"serial"`.
    #[serde(default)]
    pub output: Option<OutputMode>,

    /// Serial device path prefix probed with indices appended.
    #[serde(default)]
    pub device_prefix: Option<String>,

    /// Probe passes before giving up.
    #[serde(default)]
    pub connect_attempts: Option<u32>,

    /// Exclusive upper bound of probed device indices.
    #[serde(default)]
    pub device_scan_limit: Option<u32>,

    /// Columns of the strobe panel; 0 hides it.
    #[serde(default)]
    pub strobe_width: Option<u16>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Strobe frame rate.
    pub frame_rate: FrameRate,
    /// Strobe delivery mode.
    pub transmit_mode: TransmitMode,
    /// Message destination.
    pub output: OutputMode,
    /// Serial device path prefix.
    pub device_prefix: String,
    /// Probe passes.
    pub connect_attempts: u32,
    /// Device index scan bound.
    pub device_scan_limit: u32,
    /// Strobe panel width.
    pub strobe_width: u16,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            frame_rate: FrameRate::default(),
            transmit_mode: TransmitMode::default(),
            output: OutputMode::default(),
            device_prefix: default_prefix().to_string(),
            connect_attempts: DEFAULT_ATTEMPTS,
            device_scan_limit: DEFAULT_SCAN_LIMIT,
            strobe_width: DEFAULT_STROBE_WIDTH,
            log_file_path: default_log_path(),
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/mltc/mltc.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("mltc").join("mltc.log")
    } else {
        PathBuf::from("mltc.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/mltc/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("mltc").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `MLTC_CONFIG` environment variable
/// 3. Default path `~/.config/mltc/config.toml`
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV) {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
///
/// # Errors
///
/// [`ConfigError::InvalidValue`] for a frame rate outside `1..=1000` or a
/// zero attempt count.
pub fn merge_config(config_file: Option<ConfigFile>) -> Result<ResolvedConfig, ConfigError> {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return Ok(defaults);
    };

    let frame_rate = match config.frame_rate {
        Some(fps) => FrameRate::new(fps).map_err(|e| ConfigError::InvalidValue {
            field: "frame_rate",
            reason: e.to_string(),
        })?,
        None => defaults.frame_rate,
    };

    if config.connect_attempts == Some(0) {
        return Err(ConfigError::InvalidValue {
            field: "connect_attempts",
            reason: "must be at least 1".to_string(),
        });
    }

    Ok(ResolvedConfig {
        frame_rate,
        transmit_mode: config.transmit_mode.unwrap_or(defaults.transmit_mode),
        output: config.output.unwrap_or(defaults.output),
        device_prefix: config.device_prefix.unwrap_or(defaults.device_prefix),
        connect_attempts: config.connect_attempts.unwrap_or(defaults.connect_attempts),
        device_scan_limit: config
            .device_scan_limit
            .unwrap_or(defaults.device_scan_limit),
        strobe_width: config.strobe_width.unwrap_or(defaults.strobe_width),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    })
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `MLTC_FPS`: Override frame rate. Unparseable or out-of-range values are
///   logged and ignored.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(value) = std::env::var(FPS_ENV) {
        match value.trim().parse::<i64>().map(FrameRate::new) {
            Ok(Ok(rate)) => config.frame_rate = rate,
            Ok(Err(e)) => warn!(value = %value, error = %e, "Ignoring {}", FPS_ENV),
            Err(e) => warn!(value = %value, error = %e, "Ignoring {}", FPS_ENV),
        }
    }

    config
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    fps_override: Option<FrameRate>,
    output_override: Option<OutputMode>,
    blocking: bool,
) -> ResolvedConfig {
    if let Some(rate) = fps_override {
        config.frame_rate = rate;
    }

    if let Some(output) = output_override {
        config.output = output;
    }

    if blocking {
        config.transmit_mode = TransmitMode::Blocking;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
