//! # Input Note Sequence
//!
//! The read-only input of a conversion: tempo changes, time and key signatures,
//! notes and controller events, all timed in absolute seconds.
//!
//! ## Type Hierarchy
//! ```text
//! NoteSequence
//!   ├── ticks_per_quarter: u32 (PPQ of the output grid)
//!   ├── total_time: f64 (declared duration in seconds)
//!   ├── Vec<Tempo>          { time, qpm }
//!   ├── Vec<TimeSignature>  { time, numerator, denominator }
//!   ├── Vec<KeySignature>   { time, key, mode }
//!   ├── Vec<Note>           { start_time, end_time, pitch, velocity, instrument_track, program, is_drum }
//!   ├── Vec<ControlChange>  { time, instrument_track, control_number, control_value }
//!   └── Option<Vec<InstrumentInfo>> { track_index, name }
//! ```
//!
//! The JSON form uses camelCase keys. Every list may be omitted and defaults
//! to empty; `instrumentInfos` stays `None` when absent.

use serde::Deserialize;

use crate::error::{ConvertError, Result};

/// A tempo change
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tempo {
    #[serde(default)]
    pub time: f64,
    pub qpm: f64,
}

/// A time signature change (e.g., 3/4 at 12.5s)
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSignature {
    #[serde(default)]
    pub time: f64,
    pub numerator: u32,
    pub denominator: u32,
}

/// A key signature change
///
/// `key` indexes the 12-entry key table, `mode` is 0 for major and 1 for minor.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeySignature {
    #[serde(default)]
    pub time: f64,
    #[serde(default)]
    pub key: u8,
    #[serde(default)]
    pub mode: u8,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    #[serde(default)]
    pub start_time: f64,
    #[serde(default)]
    pub end_time: f64,
    pub pitch: u8,
    #[serde(default)]
    pub velocity: u8,
    #[serde(default, alias = "instrument")]
    pub instrument_track: u32,
    #[serde(default)]
    pub program: u8,
    #[serde(default)]
    pub is_drum: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlChange {
    #[serde(default)]
    pub time: f64,
    #[serde(default, alias = "instrument")]
    pub instrument_track: u32,
    pub control_number: u8,
    #[serde(default)]
    pub control_value: u8,
}

/// Explicit track declaration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentInfo {
    #[serde(default, alias = "instrument")]
    pub track_index: u32,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteSequence {
    pub ticks_per_quarter: u32,
    #[serde(default)]
    pub tempos: Vec<Tempo>,
    #[serde(default)]
    pub time_signatures: Vec<TimeSignature>,
    #[serde(default)]
    pub key_signatures: Vec<KeySignature>,
    #[serde(default)]
    pub notes: Vec<Note>,
    #[serde(default)]
    pub control_changes: Vec<ControlChange>,
    #[serde(default)]
    pub instrument_infos: Option<Vec<InstrumentInfo>>,
    #[serde(default)]
    pub total_time: f64,
}

impl NoteSequence {
    /// Create an empty sequence at the given resolution
    pub fn new(ticks_per_quarter: u32) -> Self {
        Self {
            ticks_per_quarter,
            ..Self::default()
        }
    }

    /// Decode a sequence from its camelCase JSON form.
    pub fn from_json(source: &str) -> Result<Self> {
        serde_json::from_str(source).map_err(|e| ConvertError::ParseError(e.to_string()))
    }

    /// Declared instruments, treating an empty declaration list as absent.
    pub fn declared_instruments(&self) -> Option<&[InstrumentInfo]> {
        self.instrument_infos
            .as_deref()
            .filter(|infos| !infos.is_empty())
    }
}
