//! A voice is one sounding note position: one oscillator bank entry on the
//! renderer plus the envelope that gates it. Voices are built lazily on the
//! first press of a degree, reused across presses, and only torn down when a
//! retune rebuilds them at a new frequency.

use crate::engine::{AudioEngine, EngineCommand, HandleAllocator, OscillatorId};
use crate::synth::envelope::Envelope;
use crate::synth::instrument::Instrument;

pub struct Voice {
    oscillator: OscillatorId,
    envelope: Envelope,
    root: f32,
}

impl Voice {
    /// Create the renderer-side oscillator for this voice and bind its
    /// envelope. Partial frequencies are fixed for the voice's lifetime;
    /// there is no per-note pitch bend.
    pub fn build(
        instrument: &Instrument,
        root: f32,
        handles: &mut HandleAllocator,
        engine: &mut dyn AudioEngine,
    ) -> Self {
        let oscillator = handles.oscillator();
        let signal = handles.signal();

        engine.submit(EngineCommand::CreateOscillator {
            osc: oscillator,
            partials: instrument.partial_frequencies(root),
            waveform: instrument.waveform(),
            amp: signal,
        });

        Self {
            oscillator,
            envelope: Envelope::new(signal, instrument.envelope()),
            root,
        }
    }

    pub fn hit_note(&self, engine: &mut dyn AudioEngine) {
        self.envelope.start_note(engine);
    }

    /// Release targets this voice's own envelope, regardless of which
    /// instrument is currently selected for new voices.
    pub fn rel_note(&self, engine: &mut dyn AudioEngine) {
        self.envelope.rel_note(engine);
    }

    /// Free the renderer-side oscillator. Consumes the voice; a torn-down
    /// voice cannot be restarted.
    pub fn teardown(self, engine: &mut dyn AudioEngine) {
        engine.submit(EngineCommand::FreeOscillator {
            osc: self.oscillator,
        });
    }

    pub fn oscillator(&self) -> OscillatorId {
        self.oscillator
    }

    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    pub fn root_frequency(&self) -> f32 {
        self.root
    }
}
