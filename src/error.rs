//! # Error Types
//!
//! Every failure of a conversion call is reported as a single [`ConvertError`].
//! There is no partial output: either the whole document is produced or one
//! of these variants explains why not.
//!
//! ## Error Types
//! - `InvalidSequence` - Malformed input (negative times, zero PPQ, unordered tempos, ...)
//! - `UnknownProgram` - A program number with no entry in the instrument tables
//! - `UnknownTrack` - An event referencing a track that does not exist
//! - `TooManyTracks` - The track count exceeds the configured cap
//! - `HorizonTooLarge` - The tick horizon exceeds the configured cap
//! - `ParseError` - The input JSON could not be decoded
//! - `OptionsError` - The YAML options could not be decoded
//!
//! ## Usage
//! ```rust
//! use tonejson::{convert_json, ConvertError};
//!
//! match convert_json(r#"{"ticksPerQuarter": 0}"#) {
//!     Ok(json) => println!("{}", json),
//!     Err(ConvertError::InvalidSequence { field, message }) => {
//!         eprintln!("{}: {}", field, message);
//!     }
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ConvertError {
    /// Malformed input sequence.
    ///
    /// `field` names the offending value using a path such as `tempos[2].time`.
    ///
    /// # Example
    /// ```
    /// # use tonejson::ConvertError;
    /// let err = ConvertError::InvalidSequence {
    ///     field: "ticksPerQuarter".to_string(),
    ///     message: "must be positive".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "Invalid sequence at ticksPerQuarter: must be positive");
    /// ```
    #[error("Invalid sequence at {field}: {message}")]
    InvalidSequence { field: String, message: String },

    /// The instrument tables have no entry for this program.
    ///
    /// Kept apart from `InvalidSequence` since the program number itself may be
    /// a legal MIDI value (e.g. drum program 1, which names no kit).
    ///
    /// # Example
    /// ```
    /// # use tonejson::ConvertError;
    /// let err = ConvertError::UnknownProgram { program: 3, is_drum: true };
    /// assert_eq!(err.to_string(), "Unknown instrument program 3 (drums: true)");
    /// ```
    #[error("Unknown instrument program {program} (drums: {is_drum})")]
    UnknownProgram { program: u8, is_drum: bool },

    /// An event names a track that was neither declared nor inferred.
    #[error("Unknown track {track}")]
    UnknownTrack { track: u32 },

    /// More output tracks than the configured limit.
    #[error("Sequence needs {tracks} tracks, more than the limit of {limit}")]
    TooManyTracks { tracks: u64, limit: u64 },

    /// The tick horizon needed to cover the sequence is larger than allowed.
    #[error("Tick horizon {ticks} exceeds the limit of {limit} ticks")]
    HorizonTooLarge { ticks: u64, limit: u64 },

    /// Invalid JSON input.
    #[error("Invalid input document: {0}")]
    ParseError(String),

    /// Invalid YAML options.
    #[error("Invalid options: {0}")]
    OptionsError(String),
}

pub type Result<T> = std::result::Result<T, ConvertError>;

impl ConvertError {
    pub(crate) fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        ConvertError::InvalidSequence {
            field: field.into(),
            message: message.into(),
        }
    }
}
