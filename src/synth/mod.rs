// Purpose: the sounding side of the core — envelope gestures, instrument
// strategies, and the per-note voices they produce. Everything here talks to
// the audio renderer exclusively through engine commands.

pub mod envelope;
pub mod instrument;
pub mod voice;

pub use envelope::{Envelope, EnvelopePreset};
pub use instrument::Instrument;
pub use voice::Voice;
