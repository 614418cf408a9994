//! # Reference Tables
//!
//! Static General MIDI lookup data in the vocabulary sequencer consumers
//! expect (lower-case Tone.js names):
//! - program (0-127) -> instrument name
//! - program / 8 -> instrument family
//! - drum program -> drum kit name (only the GS kit slots have entries)
//! - key index (0-11) -> key name
//! - MIDI pitch -> scientific pitch name (`C4` = 60)

use serde::Serialize;

use crate::error::{ConvertError, Result};

/// Key names indexed by key signature `key`
pub const KEY_NAMES: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];

const PITCH_CLASSES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

pub const DRUM_FAMILY: &str = "drums";

const FAMILY_NAMES: [&str; 16] = [
    "piano",
    "chromatic percussion",
    "organ",
    "guitar",
    "bass",
    "strings",
    "ensemble",
    "brass",
    "reed",
    "pipe",
    "synth lead",
    "synth pad",
    "synth effects",
    "world",
    "percussive",
    "sound effects",
];

const INSTRUMENT_NAMES: [&str; 128] = [
    // Piano
    "acoustic grand piano",
    "bright acoustic piano",
    "electric grand piano",
    "honky-tonk piano",
    "electric piano 1",
    "electric piano 2",
    "harpsichord",
    "clavi",
    // Chromatic Percussion
    "celesta",
    "glockenspiel",
    "music box",
    "vibraphone",
    "marimba",
    "xylophone",
    "tubular bells",
    "dulcimer",
    // Organ
    "drawbar organ",
    "percussive organ",
    "rock organ",
    "church organ",
    "reed organ",
    "accordion",
    "harmonica",
    "tango accordion",
    // Guitar
    "acoustic guitar (nylon)",
    "acoustic guitar (steel)",
    "electric guitar (jazz)",
    "electric guitar (clean)",
    "electric guitar (muted)",
    "overdriven guitar",
    "distortion guitar",
    "guitar harmonics",
    // Bass
    "acoustic bass",
    "electric bass (finger)",
    "electric bass (pick)",
    "fretless bass",
    "slap bass 1",
    "slap bass 2",
    "synth bass 1",
    "synth bass 2",
    // Strings
    "violin",
    "viola",
    "cello",
    "contrabass",
    "tremolo strings",
    "pizzicato strings",
    "orchestral harp",
    "timpani",
    // Ensemble
    "string ensemble 1",
    "string ensemble 2",
    "synthstrings 1",
    "synthstrings 2",
    "choir aahs",
    "voice oohs",
    "synth voice",
    "orchestra hit",
    // Brass
    "trumpet",
    "trombone",
    "tuba",
    "muted trumpet",
    "french horn",
    "brass section",
    "synthbrass 1",
    "synthbrass 2",
    // Reed
    "soprano sax",
    "alto sax",
    "tenor sax",
    "baritone sax",
    "oboe",
    "english horn",
    "bassoon",
    "clarinet",
    // Pipe
    "piccolo",
    "flute",
    "recorder",
    "pan flute",
    "blown bottle",
    "shakuhachi",
    "whistle",
    "ocarina",
    // Synth Lead
    "lead 1 (square)",
    "lead 2 (sawtooth)",
    "lead 3 (calliope)",
    "lead 4 (chiff)",
    "lead 5 (charang)",
    "lead 6 (voice)",
    "lead 7 (fifths)",
    "lead 8 (bass + lead)",
    // Synth Pad
    "pad 1 (new age)",
    "pad 2 (warm)",
    "pad 3 (polysynth)",
    "pad 4 (choir)",
    "pad 5 (bowed)",
    "pad 6 (metallic)",
    "pad 7 (halo)",
    "pad 8 (sweep)",
    // Synth Effects
    "fx 1 (rain)",
    "fx 2 (soundtrack)",
    "fx 3 (crystal)",
    "fx 4 (atmosphere)",
    "fx 5 (brightness)",
    "fx 6 (goblins)",
    "fx 7 (echoes)",
    "fx 8 (sci-fi)",
    // World
    "sitar",
    "banjo",
    "shamisen",
    "koto",
    "kalimba",
    "bag pipe",
    "fiddle",
    "shanai",
    // Percussive
    "tinkle bell",
    "agogo",
    "steel drums",
    "woodblock",
    "taiko drum",
    "melodic tom",
    "synth drum",
    "reverse cymbal",
    // Sound Effects
    "guitar fret noise",
    "breath noise",
    "seashore",
    "bird tweet",
    "telephone ring",
    "helicopter",
    "applause",
    "gunshot",
];

/// Drum kit name for a drum program, if that program selects a kit
pub fn drum_kit_name(program: u8) -> Option<&'static str> {
    match program {
        0 => Some("standard kit"),
        8 => Some("room kit"),
        16 => Some("power kit"),
        24 => Some("electronic kit"),
        25 => Some("tr-808 kit"),
        32 => Some("jazz kit"),
        40 => Some("brush kit"),
        48 => Some("orchestra kit"),
        56 => Some("sound fx kit"),
        _ => None,
    }
}

pub fn instrument_name(program: u8) -> Option<&'static str> {
    INSTRUMENT_NAMES.get(program as usize).copied()
}

pub fn family_name(program: u8) -> Option<&'static str> {
    FAMILY_NAMES.get(program as usize / 8).copied()
}

/// Pitch name with octave, e.g. 60 -> "C4", 61 -> "C#4", 0 -> "C-1"
pub fn pitch_name(pitch: u8) -> String {
    let octave = (pitch / 12) as i32 - 1;
    format!("{}{}", PITCH_CLASSES[(pitch % 12) as usize], octave)
}

/// Instrument metadata attached to each output track
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Instrument {
    pub family: String,
    pub number: u8,
    pub name: String,
}

impl Default for Instrument {
    fn default() -> Self {
        Self {
            family: FAMILY_NAMES[0].to_string(),
            number: 0,
            name: INSTRUMENT_NAMES[0].to_string(),
        }
    }
}

impl Instrument {
    /// Resolve a program through the melodic or drum tables.
    ///
    /// There is no fallback: a program without a table entry is an
    /// `UnknownProgram` error.
    pub fn resolve(program: u8, is_drum: bool) -> Result<Self> {
        let unknown = || ConvertError::UnknownProgram { program, is_drum };

        let (family, name) = if is_drum {
            (DRUM_FAMILY, drum_kit_name(program).ok_or_else(unknown)?)
        } else {
            (
                family_name(program).ok_or_else(unknown)?,
                instrument_name(program).ok_or_else(unknown)?,
            )
        };

        Ok(Self {
            family: family.to_string(),
            number: program,
            name: name.to_string(),
        })
    }
}
