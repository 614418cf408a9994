//! Document assembly: wraps a projection into the header + tracks layout.

use super::projector::Projection;
use super::types::{Header, MidiJson};

/// Package a projection. Ordering is kept exactly as projected.
pub fn assemble(projection: Projection, ppq: u32, name: &str) -> MidiJson {
    MidiJson {
        header: Header {
            tempos: projection.tempos,
            time_signatures: projection.time_signatures,
            key_signatures: projection.key_signatures,
            ppq,
            name: name.to_string(),
            meta: Vec::new(),
        },
        tracks: projection.tracks,
    }
}
