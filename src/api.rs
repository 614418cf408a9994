//! # Public API
//!
//! Entry points for converting note sequences to Tone.js MIDI JSON.
//!
//! ## Conversion Functions
//!
//! - [`convert()`] - Convert with default options
//! - [`convert_with_options()`] - Custom header name, horizon and track caps
//! - [`convert_json()`] - JSON string in, JSON string out
//!
//! ## Typical Usage
//!
//! ```rust
//! use tonejson::convert_json;
//!
//! let input = r#"{
//!     "ticksPerQuarter": 480,
//!     "tempos": [{"time": 0, "qpm": 120}],
//!     "notes": [{"startTime": 0, "endTime": 0.5, "pitch": 60, "velocity": 127}],
//!     "totalTime": 0.5
//! }"#;
//!
//! let json = convert_json(input)?;
//! assert!(json.contains(r#""durationTicks":480"#));
//! # Ok::<(), tonejson::ConvertError>(())
//! ```

use log::debug;

use crate::error::{ConvertError, Result};
use crate::options::ConvertOptions;
use crate::sequence::NoteSequence;
use crate::tempo::TempoCurve;
use crate::ticks::TickTimeMap;
use crate::timeline::{assemble, project, MidiJson};
use crate::validate::validate;

/// Convert a sequence with default options.
///
/// # Pipeline
/// 1. Validate the sequence
/// 2. Build the tempo curve
/// 3. Compute the tick horizon and build the tick map
/// 4. Project every event onto ticks
/// 5. Assemble the document
///
/// # Example
/// ```rust
/// use tonejson::{convert, NoteSequence};
///
/// let seq = NoteSequence::new(480);
/// let doc = convert(&seq)?;
/// assert_eq!(doc.header.ppq, 480);
/// assert!(doc.tracks.is_empty());
/// # Ok::<(), tonejson::ConvertError>(())
/// ```
///
/// # Errors
/// Returns [`ConvertError`] for malformed input, unknown programs or tracks,
/// or a horizon or track count beyond the default caps.
pub fn convert(seq: &NoteSequence) -> Result<MidiJson> {
    convert_with_options(seq, &ConvertOptions::default())
}

/// Convert a sequence with explicit options.
pub fn convert_with_options(seq: &NoteSequence, options: &ConvertOptions) -> Result<MidiJson> {
    validate(seq)?;

    let ppq = seq.ticks_per_quarter;
    let curve = TempoCurve::build(&seq.tempos, ppq);

    let end_time = sequence_end_time(seq);
    let horizon = curve.horizon(end_time);
    debug!("sequence ends at {}s, horizon {} ticks", end_time, horizon);

    if let Some(limit) = options.max_horizon_ticks {
        if horizon > limit {
            return Err(ConvertError::HorizonTooLarge {
                ticks: horizon,
                limit,
            });
        }
    }

    let map = TickTimeMap::build(&curve, horizon);
    let projection = project(seq, &curve, &map, options.max_tracks)?;
    Ok(assemble(projection, ppq, &options.name))
}

/// Decode a JSON note sequence, convert it and encode the document.
pub fn convert_json(source: &str) -> Result<String> {
    let seq = NoteSequence::from_json(source)?;
    Ok(convert(&seq)?.to_json())
}

/// Latest of the declared total time and the last tempo, time signature and
/// key signature. Empty lists contribute nothing.
fn sequence_end_time(seq: &NoteSequence) -> f64 {
    [
        seq.time_signatures.last().map(|ts| ts.time),
        seq.key_signatures.last().map(|ks| ks.time),
        seq.tempos.last().map(|t| t.time),
    ]
    .into_iter()
    .flatten()
    .fold(seq.total_time, f64::max)
}
