pub mod api;
pub mod error;
pub mod instruments;
pub mod options;
pub mod sequence;
pub mod tempo;
pub mod ticks;
pub mod timeline;
pub mod validate;

pub use api::{convert, convert_json, convert_with_options};
pub use error::*;
pub use instruments::Instrument;
pub use options::ConvertOptions;
pub use sequence::*;
pub use tempo::TempoCurve;
pub use ticks::TickTimeMap;
pub use timeline::{MidiJson, Track};
pub use validate::validate;
