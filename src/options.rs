//! Conversion options, read from YAML with kebab-case keys:
//!
//! ```yaml
//! name: Clair de Lune
//! max-horizon-ticks: 50000000
//! max-tracks: 256
//! ```

use serde::Deserialize;

use crate::error::{ConvertError, Result};

/// Default cap on the tick horizon of a single conversion
pub const DEFAULT_MAX_HORIZON_TICKS: u64 = 100_000_000;

/// Default cap on the number of output tracks
pub const DEFAULT_MAX_TRACKS: u64 = 65_536;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ConvertOptions {
    /// Copied into `header.name`
    pub name: String,
    /// Largest horizon accepted, `None` disables the check
    pub max_horizon_ticks: Option<u64>,
    /// Largest track count accepted, `None` disables the check
    pub max_tracks: Option<u64>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            name: String::new(),
            max_horizon_ticks: Some(DEFAULT_MAX_HORIZON_TICKS),
            max_tracks: Some(DEFAULT_MAX_TRACKS),
        }
    }
}

impl ConvertOptions {
    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| ConvertError::OptionsError(e.to_string()))
    }
}
