//! Instrument strategies.
//!
//! An instrument is data, not a subclass: a set of partial-frequency
//! multipliers, a waveform, and an envelope preset. Building a new variant
//! means supplying multipliers and optionally overriding the preset or
//! waveform — nothing in [`Voice`](crate::synth::Voice) branches on which
//! instrument it was given.

use crate::engine::Waveform;
use crate::synth::envelope::EnvelopePreset;

/// The shared preset of the built-in instruments.
const DEFAULT_PRESET: EnvelopePreset = EnvelopePreset::new(0.1, 0.2, 0.6, 0.5, 0.25);

#[derive(Debug, Clone, PartialEq)]
pub struct Instrument {
    name: &'static str,
    multipliers: Vec<f32>,
    waveform: Waveform,
    envelope: EnvelopePreset,
}

impl Instrument {
    /// A custom instrument from partial multipliers (relative to the root
    /// frequency) and an envelope preset.
    pub fn new(name: &'static str, multipliers: Vec<f32>, envelope: EnvelopePreset) -> Self {
        Self {
            name,
            multipliers,
            waveform: Waveform::Sine,
            envelope,
        }
    }

    /// One oscillator at the root frequency.
    pub fn simple() -> Self {
        Self::new("simple", vec![1.0], DEFAULT_PRESET)
    }

    /// Ten harmonics at integer multiples of the root.
    pub fn harmonic() -> Self {
        Self::new("harmonic", (1..=10).map(|n| n as f32).collect(), DEFAULT_PRESET)
    }

    /// Inharmonic pair built around the tritone: root and root * sqrt(2).
    pub fn detuned() -> Self {
        Self::new("detuned", vec![1.0, core::f32::consts::SQRT_2], DEFAULT_PRESET)
    }

    pub fn with_waveform(mut self, waveform: Waveform) -> Self {
        self.waveform = waveform;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    pub fn envelope(&self) -> EnvelopePreset {
        self.envelope
    }

    /// Absolute partial frequencies for a voice rooted at `root` Hz.
    pub fn partial_frequencies(&self, root: f32) -> Vec<f32> {
        self.multipliers.iter().map(|m| root * m).collect()
    }
}
