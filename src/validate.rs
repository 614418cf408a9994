//! # Input Validation
//!
//! Rejects malformed sequences before any tick mapping is built. A sequence
//! that passes here can be converted without the mapper ever seeing a NaN,
//! a negative time or a tempo curve that runs backwards.
//!
//! ## Rules
//! - `ticksPerQuarter` must be positive
//! - `totalTime` and every event time must be finite and non-negative
//! - Tempos need a finite positive `qpm` and non-decreasing times
//! - Time signatures need a positive numerator, a power-of-two denominator
//!   and non-decreasing times
//! - Key signatures need a key inside the 12-entry table, mode 0 or 1 and
//!   non-decreasing times
//! - Notes need `endTime >= startTime` and pitch/velocity/program in 0-127
//! - Controller numbers and values must be in 0-127
//!
//! Programs inside 0-127 that name no table entry (e.g. drum program 1) are
//! not checked here; the instrument tables report them as `UnknownProgram`
//! during projection.

use crate::error::{ConvertError, Result};
use crate::instruments::KEY_NAMES;
use crate::sequence::NoteSequence;

const MIDI_MAX: u8 = 127;

/// Validate a sequence for conversion
pub fn validate(seq: &NoteSequence) -> Result<()> {
    if seq.ticks_per_quarter == 0 {
        return Err(ConvertError::invalid("ticksPerQuarter", "must be positive"));
    }
    check_time("totalTime", seq.total_time)?;

    validate_tempos(seq)?;
    validate_time_signatures(seq)?;
    validate_key_signatures(seq)?;
    validate_notes(seq)?;
    validate_control_changes(seq)?;
    Ok(())
}

fn check_time(field: &str, time: f64) -> Result<()> {
    if !time.is_finite() {
        return Err(ConvertError::invalid(field, format!("time {} is not finite", time)));
    }
    if time < 0.0 {
        return Err(ConvertError::invalid(field, format!("time {} is negative", time)));
    }
    Ok(())
}

/// Times of an ordered list must never decrease
fn check_order(field: &str, previous: Option<f64>, time: f64) -> Result<()> {
    match previous {
        Some(prev) if time < prev => Err(ConvertError::invalid(
            field,
            format!("time {} is earlier than the previous entry at {}", time, prev),
        )),
        _ => Ok(()),
    }
}

fn validate_tempos(seq: &NoteSequence) -> Result<()> {
    let mut previous = None;
    for (i, tempo) in seq.tempos.iter().enumerate() {
        let field = format!("tempos[{}]", i);
        check_time(&format!("{}.time", field), tempo.time)?;
        check_order(&format!("{}.time", field), previous, tempo.time)?;
        if !tempo.qpm.is_finite() || tempo.qpm <= 0.0 {
            return Err(ConvertError::invalid(
                format!("{}.qpm", field),
                format!("qpm {} must be a positive number", tempo.qpm),
            ));
        }
        previous = Some(tempo.time);
    }
    Ok(())
}

fn validate_time_signatures(seq: &NoteSequence) -> Result<()> {
    let mut previous = None;
    for (i, ts) in seq.time_signatures.iter().enumerate() {
        let field = format!("timeSignatures[{}]", i);
        check_time(&format!("{}.time", field), ts.time)?;
        check_order(&format!("{}.time", field), previous, ts.time)?;
        if ts.numerator == 0 {
            return Err(ConvertError::invalid(
                format!("{}.numerator", field),
                "must be positive",
            ));
        }
        if !ts.denominator.is_power_of_two() {
            return Err(ConvertError::invalid(
                format!("{}.denominator", field),
                format!("{} is not a power of two", ts.denominator),
            ));
        }
        previous = Some(ts.time);
    }
    Ok(())
}

fn validate_key_signatures(seq: &NoteSequence) -> Result<()> {
    let mut previous = None;
    for (i, ks) in seq.key_signatures.iter().enumerate() {
        let field = format!("keySignatures[{}]", i);
        check_time(&format!("{}.time", field), ks.time)?;
        check_order(&format!("{}.time", field), previous, ks.time)?;
        if ks.key as usize >= KEY_NAMES.len() {
            return Err(ConvertError::invalid(
                format!("{}.key", field),
                format!("key index {} is outside 0-{}", ks.key, KEY_NAMES.len() - 1),
            ));
        }
        if ks.mode > 1 {
            return Err(ConvertError::invalid(
                format!("{}.mode", field),
                format!("mode {} must be 0 (major) or 1 (minor)", ks.mode),
            ));
        }
        previous = Some(ks.time);
    }
    Ok(())
}

fn validate_notes(seq: &NoteSequence) -> Result<()> {
    for (i, note) in seq.notes.iter().enumerate() {
        let field = format!("notes[{}]", i);
        check_time(&format!("{}.startTime", field), note.start_time)?;
        check_time(&format!("{}.endTime", field), note.end_time)?;
        if note.end_time < note.start_time {
            return Err(ConvertError::invalid(
                format!("{}.endTime", field),
                format!(
                    "note ends at {} before it starts at {}",
                    note.end_time, note.start_time
                ),
            ));
        }
        if note.pitch > MIDI_MAX {
            return Err(ConvertError::invalid(
                format!("{}.pitch", field),
                format!("pitch {} is outside 0-127", note.pitch),
            ));
        }
        if note.program > MIDI_MAX {
            return Err(ConvertError::invalid(
                format!("{}.program", field),
                format!("program {} is outside 0-127", note.program),
            ));
        }
        if note.velocity > MIDI_MAX {
            return Err(ConvertError::invalid(
                format!("{}.velocity", field),
                format!("velocity {} is outside 0-127", note.velocity),
            ));
        }
    }
    Ok(())
}

fn validate_control_changes(seq: &NoteSequence) -> Result<()> {
    for (i, cc) in seq.control_changes.iter().enumerate() {
        let field = format!("controlChanges[{}]", i);
        check_time(&format!("{}.time", field), cc.time)?;
        if cc.control_number > MIDI_MAX {
            return Err(ConvertError::invalid(
                format!("{}.controlNumber", field),
                format!("controller {} is outside 0-127", cc.control_number),
            ));
        }
        if cc.control_value > MIDI_MAX {
            return Err(ConvertError::invalid(
                format!("{}.controlValue", field),
                format!("value {} is outside 0-127", cc.control_value),
            ));
        }
    }
    Ok(())
}
