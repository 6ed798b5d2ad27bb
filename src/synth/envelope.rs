//! Declarative ADSR envelope.
//!
//! Unlike a per-sample envelope generator, this envelope never ticks. It
//! translates the two note gestures into ramp plans on the voice's amplitude
//! control signal and lets the renderer's sample clock do the timing:
//!
//! - note-on ships attack-to-peak with the decay-to-sustain segment queued
//!   behind it in the same plan;
//! - note-off ships a single release-to-zero segment that atomically
//!   replaces whatever the previous plan still had in flight, so a release
//!   during the attack falls from the current level instead of finishing
//!   the climb.

use crate::engine::{AudioEngine, EngineCommand, RampPlan, RampSegment, SignalId};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Envelope timing constants, fixed per instrument.
///
/// Times are seconds; `sustain` is a fraction of `scale`; `scale` is the
/// peak output level. Zero durations jump.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvelopePreset {
    pub attack: f32,
    pub decay: f32,
    pub sustain: f32,
    pub release: f32,
    pub scale: f32,
}

impl EnvelopePreset {
    pub const fn new(attack: f32, decay: f32, sustain: f32, release: f32, scale: f32) -> Self {
        Self {
            attack,
            decay,
            sustain,
            release,
            scale,
        }
    }
}

/// One voice's amplitude envelope, bound to its control signal for life.
#[derive(Debug, Clone, Copy)]
pub struct Envelope {
    preset: EnvelopePreset,
    signal: SignalId,
}

impl Envelope {
    pub fn new(signal: SignalId, preset: EnvelopePreset) -> Self {
        Self { preset, signal }
    }

    pub fn signal(&self) -> SignalId {
        self.signal
    }

    pub fn preset(&self) -> &EnvelopePreset {
        &self.preset
    }

    /// Attack to the peak level, then decay to the sustain level. One plan,
    /// two segments; the renderer sequences them.
    pub fn start_note(&self, engine: &mut dyn AudioEngine) {
        let preset = &self.preset;
        engine.submit(EngineCommand::SetRamp {
            signal: self.signal,
            plan: RampPlan::two_stage(
                RampSegment {
                    target: preset.scale,
                    seconds: preset.attack,
                },
                RampSegment {
                    target: preset.sustain * preset.scale,
                    seconds: preset.decay,
                },
            ),
        });
    }

    /// Release to silence, overriding any attack or decay still in flight.
    pub fn rel_note(&self, engine: &mut dyn AudioEngine) {
        engine.submit(EngineCommand::SetRamp {
            signal: self.signal,
            plan: RampPlan::to_target(0.0, self.preset.release),
        });
    }
}
