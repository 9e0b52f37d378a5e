//! Inspection limits and display settings

use certscope_common::{ensure, ErrorKind, Result, ResultExt};
use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::der::{DecoderLimits, DEFAULT_MAX_DEPTH, DEFAULT_MAX_INPUT_LEN};

/// Decoder limits and display settings for the inspection entry points
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspectConfig {
    /// Inputs longer than this are rejected before parsing
    #[serde(default = "default_max_input_len")]
    pub max_input_len: usize,
    /// Constructed-node nesting limit
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    /// Remaining lifetime at or under which an active CA shows as expiring
    #[serde(default = "default_expiring_window_days")]
    pub expiring_window_days: u32,
}

fn default_max_input_len() -> usize {
    DEFAULT_MAX_INPUT_LEN // 64 KiB
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

fn default_expiring_window_days() -> u32 {
    30
}

impl Default for InspectConfig {
    fn default() -> Self {
        Self {
            max_input_len: default_max_input_len(),
            max_depth: default_max_depth(),
            expiring_window_days: default_expiring_window_days(),
        }
    }
}

impl InspectConfig {
    /// Parse from JSON; missing fields take their defaults. The result is validated.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .with_context(ErrorKind::Configuration, "invalid inspect configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Reject zero limits
    pub fn validate(&self) -> Result<()> {
        ensure!(self.max_input_len > 0, configuration, "max_input_len must be non-zero");
        ensure!(self.max_depth > 0, configuration, "max_depth must be non-zero");
        Ok(())
    }

    /// The two decode limits as the decoder takes them
    #[must_use]
    pub fn decoder_limits(&self) -> DecoderLimits {
        DecoderLimits {
            max_input_len: self.max_input_len,
            max_depth: self.max_depth,
        }
    }

    /// `expiring_window_days` as a duration
    #[must_use]
    pub fn expiring_window(&self) -> Duration {
        Duration::days(i64::from(self.expiring_window_days))
    }
}
