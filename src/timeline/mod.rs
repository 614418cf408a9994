//! # Timeline Module
//!
//! Projects a note sequence onto the tick grid and assembles the Tone.js
//! MIDI JSON document.
//!
//! ## Sub-modules
//! - `types` - MidiJson, Header, Track and event type definitions
//! - `projector` - Tick conversion of tempos, signatures, notes and controllers
//! - `document` - Header + tracks packaging
//!
//! ## Pipeline
//! ```text
//! NoteSequence ──► TempoCurve ──► TickTimeMap
//!       │                              │
//!       └────────────► project() ◄─────┘
//!                          │
//!                      assemble() ──► MidiJson
//! ```
//!
//! ## Track Partitioning
//! - With `instrumentInfos`: one track per declared instrument, in declared
//!   order, named after it
//! - Without: `max(note.instrumentTrack) + 1` unnamed tracks
//! - No notes and no declarations: no tracks
//!
//! ## Durations
//! A note's `durationTicks` converts `endTime - startTime` as an elapsed time
//! measured from tick 0. Under a changing tempo this differs from the
//! distance between the start and end ticks.
//!
//! ## Related Modules
//! - `tempo` - Builds the breakpoint curve
//! - `ticks` - Time to tick lookups
//! - `instruments` - Program, drum kit, key and pitch names

mod document;
mod projector;
mod types;

#[cfg(test)]
mod tests;

pub use document::assemble;
pub use projector::{
    project, project_key_signatures, project_tempos, project_time_signatures, project_tracks,
    track_count, Projection,
};
pub use types::{
    ControlChangeEvent, ControlChanges, Header, KeySignatureEvent, MidiJson, NoteEvent, Scale,
    TempoEvent, TimeSignatureEvent, Track,
};
