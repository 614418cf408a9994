//! Output document types
//!
//! Field names and nesting follow the Tone.js MIDI JSON layout that
//! sequencer front ends consume, so they are serialized in camelCase.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::instruments::Instrument;

/// A tempo change at a tick position
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TempoEvent {
    pub ticks: u64,
    pub bpm: f64,
}

/// A time signature change
///
/// `measures` counts the whole measures elapsed before this change, starting
/// at 0 for the first signature.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSignatureEvent {
    pub ticks: u64,
    pub time_signature: [u32; 2],
    pub measures: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Scale {
    Major,
    Minor,
}

impl Scale {
    pub fn from_mode(mode: u8) -> Self {
        if mode == 0 {
            Scale::Major
        } else {
            Scale::Minor
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeySignatureEvent {
    pub ticks: u64,
    pub key: String,
    pub scale: Scale,
}

/// A note on a track
///
/// # Fields
/// - `time`, `duration`: seconds, copied from the input
/// - `ticks`: start position on the tick grid
/// - `duration_ticks`: the duration converted as an elapsed time from tick 0
/// - `velocity`: normalized to 0.0-1.0
/// - `midi`, `name`: MIDI pitch and its name (`C4` = 60)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteEvent {
    pub time: f64,
    pub duration: f64,
    pub ticks: u64,
    pub duration_ticks: u64,
    pub velocity: f64,
    pub midi: u8,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlChangeEvent {
    pub number: u8,
    pub ticks: u64,
    pub time: f64,
    pub value: f64,
}

/// Controller events grouped by controller number.
/// Serializes with the number as a string key.
pub type ControlChanges = BTreeMap<u8, Vec<ControlChangeEvent>>;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub name: String,
    pub instrument: Instrument,
    pub notes: Vec<NoteEvent>,
    pub control_changes: ControlChanges,
    pub end_of_track_ticks: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    pub tempos: Vec<TempoEvent>,
    pub time_signatures: Vec<TimeSignatureEvent>,
    pub key_signatures: Vec<KeySignatureEvent>,
    pub ppq: u32,
    pub name: String,
    pub meta: Vec<serde_json::Value>,
}

/// The complete timeline document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MidiJson {
    pub header: Header,
    pub tracks: Vec<Track>,
}

impl MidiJson {
    pub fn to_json(&self) -> String {
        // Every field is a plain number, string, list or string-keyed map
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
