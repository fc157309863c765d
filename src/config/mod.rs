//! Configuration module.
//!
//! Settings resolve through defaults → config file → environment → CLI.

pub mod keybindings;
pub mod loader;

pub use keybindings::KeyBindings;
pub use loader::{
    apply_cli_overrides, apply_env_overrides, default_config_path, default_log_path,
    load_config_file, load_config_with_precedence, merge_config, ConfigError, ConfigFile,
    ResolvedConfig,
};

use crate::state::SessionSettings;
use crate::transport::SerialTransport;

impl ResolvedConfig {
    /// Session settings for this configuration.
    pub fn session_settings(&self, debug: bool) -> SessionSettings {
        SessionSettings {
            rate: self.frame_rate,
            transmit_mode: self.transmit_mode,
            output: self.output,
            debug,
        }
    }

    /// Serial transport probing the configured device range.
    pub fn serial_transport(&self) -> SerialTransport {
        SerialTransport::new(
            self.device_prefix.clone(),
            self.connect_attempts,
            self.device_scan_limit,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transmit::{FrameRate, OutputMode, TransmitMode};

    #[test]
    fn session_settings_carry_resolved_values() {
        let config = ResolvedConfig {
            frame_rate: FrameRate::new(20).unwrap(),
            transmit_mode: TransmitMode::Blocking,
            output: OutputMode::Serial,
            ..ResolvedConfig::default()
        };

        let settings = config.session_settings(true);

        assert_eq!(settings.rate.fps(), 20);
        assert_eq!(settings.transmit_mode, TransmitMode::Blocking);
        assert_eq!(settings.output, OutputMode::Serial);
        assert!(settings.debug);
    }
}
