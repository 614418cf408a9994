//! Timeline projection
//!
//! Re-expresses every timed event of a sequence on the tick grid using a
//! [`TickTimeMap`], accumulates measure counts across time signatures and
//! buckets notes and controller events into tracks.

use log::trace;
use std::collections::HashMap;

use super::types::{
    ControlChangeEvent, ControlChanges, KeySignatureEvent, NoteEvent, Scale, TempoEvent,
    TimeSignatureEvent, Track,
};
use crate::error::{ConvertError, Result};
use crate::instruments::{pitch_name, Instrument, KEY_NAMES};
use crate::sequence::NoteSequence;
use crate::tempo::TempoCurve;
use crate::ticks::TickTimeMap;

const MIDI_MAX: f64 = 127.0;

/// Everything the document assembler needs, in output order
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    pub tempos: Vec<TempoEvent>,
    pub time_signatures: Vec<TimeSignatureEvent>,
    pub key_signatures: Vec<KeySignatureEvent>,
    pub tracks: Vec<Track>,
}

/// Project all categories of a validated sequence.
///
/// `max_tracks` bounds the number of output tracks; `None` leaves it open.
pub fn project(
    seq: &NoteSequence,
    curve: &TempoCurve,
    map: &TickTimeMap,
    max_tracks: Option<u64>,
) -> Result<Projection> {
    let projection = Projection {
        tempos: project_tempos(seq, curve),
        time_signatures: project_time_signatures(seq, map),
        key_signatures: project_key_signatures(seq, map)?,
        tracks: project_tracks(seq, map, max_tracks)?,
    };
    trace!(
        "projected {} tempos, {} time signatures, {} key signatures, {} tracks",
        projection.tempos.len(),
        projection.time_signatures.len(),
        projection.key_signatures.len(),
        projection.tracks.len()
    );
    Ok(projection)
}

/// Pair each tempo with the tick position the curve gave it
pub fn project_tempos(seq: &NoteSequence, curve: &TempoCurve) -> Vec<TempoEvent> {
    seq.tempos
        .iter()
        .zip(curve.tempo_ticks())
        .map(|(tempo, &ticks)| TempoEvent {
            ticks,
            bpm: tempo.qpm,
        })
        .collect()
}

/// Whole measures between two ticks under the earlier signature.
fn elapsed_measures(from: &TimeSignatureEvent, to_ticks: u64, ppq: u32) -> u64 {
    let [numerator, denominator] = from.time_signature;
    let beats = to_ticks.saturating_sub(from.ticks) as f64 / ppq as f64;
    (beats / numerator as f64 / (denominator as f64 / 4.0)).floor() as u64
}

pub fn project_time_signatures(seq: &NoteSequence, map: &TickTimeMap) -> Vec<TimeSignatureEvent> {
    let mut events: Vec<TimeSignatureEvent> = Vec::with_capacity(seq.time_signatures.len());

    for ts in &seq.time_signatures {
        let ticks = map.time_to_tick(ts.time);
        let measures = match events.last() {
            Some(previous) => {
                previous.measures + elapsed_measures(previous, ticks, seq.ticks_per_quarter)
            }
            None => 0,
        };
        events.push(TimeSignatureEvent {
            ticks,
            time_signature: [ts.numerator, ts.denominator],
            measures,
        });
    }

    events
}

pub fn project_key_signatures(
    seq: &NoteSequence,
    map: &TickTimeMap,
) -> Result<Vec<KeySignatureEvent>> {
    seq.key_signatures
        .iter()
        .enumerate()
        .map(|(i, ks)| {
            let key = KEY_NAMES.get(ks.key as usize).ok_or_else(|| {
                ConvertError::invalid(
                    format!("keySignatures[{}].key", i),
                    format!("key index {} is outside 0-{}", ks.key, KEY_NAMES.len() - 1),
                )
            })?;
            Ok(KeySignatureEvent {
                ticks: map.time_to_tick(ks.time),
                key: key.to_string(),
                scale: Scale::from_mode(ks.mode),
            })
        })
        .collect()
}

/// A track under construction
#[derive(Debug, Default)]
struct TrackBuilder {
    name: String,
    instrument: Option<Instrument>,
    notes: Vec<NoteEvent>,
    control_changes: ControlChanges,
    end_of_track_ticks: u64,
}

impl TrackBuilder {
    fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    fn finish(self) -> Track {
        Track {
            name: self.name,
            instrument: self.instrument.unwrap_or_default(),
            notes: self.notes,
            control_changes: self.control_changes,
            end_of_track_ticks: self.end_of_track_ticks,
        }
    }
}

/// Number of output tracks: one per declared instrument, otherwise one per
/// index up to the highest note track.
pub fn track_count(seq: &NoteSequence) -> u64 {
    match seq.declared_instruments() {
        Some(infos) => infos.len() as u64,
        None => seq
            .notes
            .iter()
            .map(|n| n.instrument_track as u64 + 1)
            .max()
            .unwrap_or(0),
    }
}

/// Output track slots and the input track index each one answers to.
///
/// Declared instruments win; otherwise one unnamed track per index up to the
/// highest note track. A repeated declaration keeps its first slot.
fn track_layout(
    seq: &NoteSequence,
    max_tracks: Option<u64>,
) -> Result<(Vec<TrackBuilder>, HashMap<u32, usize>)> {
    let count = track_count(seq);
    if let Some(limit) = max_tracks {
        if count > limit {
            return Err(ConvertError::TooManyTracks {
                tracks: count,
                limit,
            });
        }
    }

    let mut slots = HashMap::new();

    if let Some(infos) = seq.declared_instruments() {
        let builders = infos.iter().map(|info| TrackBuilder::named(&info.name)).collect();
        for (slot, info) in infos.iter().enumerate() {
            slots.entry(info.track_index).or_insert(slot);
        }
        return Ok((builders, slots));
    }

    let count = count as usize;
    for slot in 0..count {
        slots.insert(slot as u32, slot);
    }
    Ok((
        (0..count).map(|_| TrackBuilder::default()).collect(),
        slots,
    ))
}

pub fn project_tracks(
    seq: &NoteSequence,
    map: &TickTimeMap,
    max_tracks: Option<u64>,
) -> Result<Vec<Track>> {
    let (mut builders, slots) = track_layout(seq, max_tracks)?;
    let slot_of = |track: u32| {
        slots
            .get(&track)
            .copied()
            .ok_or(ConvertError::UnknownTrack { track })
    };

    for note in &seq.notes {
        let builder = &mut builders[slot_of(note.instrument_track)?];
        let instrument = Instrument::resolve(note.program, note.is_drum)?;
        builder.instrument.get_or_insert(instrument);

        let ticks = map.time_to_tick(note.start_time);
        let duration = note.end_time - note.start_time;
        // Elapsed-time conversion, not the difference of two positions
        let duration_ticks = map.time_to_tick(duration);

        builder.notes.push(NoteEvent {
            time: note.start_time,
            duration,
            ticks,
            duration_ticks,
            velocity: note.velocity as f64 / MIDI_MAX,
            midi: note.pitch,
            name: pitch_name(note.pitch),
        });
        // Both saturate at u64::MAX for notes far past the horizon
        let end_ticks = ticks.saturating_add(duration_ticks);
        builder.end_of_track_ticks = builder.end_of_track_ticks.max(end_ticks);
    }

    for cc in &seq.control_changes {
        let builder = &mut builders[slot_of(cc.instrument_track)?];
        let ticks = map.time_to_tick(cc.time);

        builder
            .control_changes
            .entry(cc.control_number)
            .or_default()
            .push(ControlChangeEvent {
                number: cc.control_number,
                ticks,
                time: cc.time,
                value: cc.control_value as f64 / MIDI_MAX,
            });
        builder.end_of_track_ticks = builder.end_of_track_ticks.max(ticks);
    }

    Ok(builders.into_iter().map(TrackBuilder::finish).collect())
}
