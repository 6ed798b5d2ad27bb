//! Render side of the engine boundary.
//!
//! Owns the oscillator bank and the control-signal table, applies
//! [`EngineCommand`]s, and renders mono f32 blocks. This is the collaborator
//! the core only ever talks to through commands; it lives in the crate so the
//! ramp semantics can be verified sample-accurately and so the demo binary
//! has something to play through.
//!
//! Synthesis is deliberately naive (non-bandlimited saw/square/triangle,
//! plain phase-accumulator sine). The interesting part is the command
//! application and the per-sample ramp evaluation, not the waveforms.

use crate::engine::{ramp::ControlRamp, EngineCommand, OscillatorId, SignalId, Waveform};

struct Partial {
    frequency: f32,
    phase: f32,
}

struct BankEntry {
    osc: OscillatorId,
    amp: SignalId,
    waveform: Waveform,
    partials: Vec<Partial>,
}

pub struct RenderEngine {
    sample_rate: f32,
    bank: Vec<BankEntry>,
    signals: Vec<(SignalId, ControlRamp)>,
}

impl RenderEngine {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate,
            bank: Vec::new(),
            signals: Vec::new(),
        }
    }

    /// Apply one command. Typically called while draining the command queue
    /// at the top of a block, before any samples are rendered, so a plan is
    /// never observed half-applied.
    pub fn apply(&mut self, command: EngineCommand) {
        match command {
            EngineCommand::CreateOscillator {
                osc,
                partials,
                waveform,
                amp,
            } => {
                self.signals.push((amp, ControlRamp::new(self.sample_rate)));
                self.bank.push(BankEntry {
                    osc,
                    amp,
                    waveform,
                    partials: partials
                        .into_iter()
                        .map(|frequency| Partial {
                            frequency,
                            phase: 0.0,
                        })
                        .collect(),
                });
            }
            EngineCommand::SetRamp { signal, plan } => {
                if let Some((_, ramp)) = self.signals.iter_mut().find(|(id, _)| *id == signal) {
                    ramp.retarget(plan);
                } else {
                    // Stale command for a signal freed by a retune.
                    log::debug!("ramp for unknown signal {:?} ignored", signal);
                }
            }
            EngineCommand::FreeOscillator { osc } => {
                if let Some(idx) = self.bank.iter().position(|e| e.osc == osc) {
                    let entry = self.bank.swap_remove(idx);
                    self.signals.retain(|(id, _)| *id != entry.amp);
                }
            }
        }
    }

    /// Render one mono block, advancing every ramp once per sample.
    pub fn render_block(&mut self, out: &mut [f32]) {
        for sample in out.iter_mut() {
            for (_, ramp) in &mut self.signals {
                ramp.next_sample();
            }

            let mut mix = 0.0;
            for entry in &mut self.bank {
                let level = self
                    .signals
                    .iter()
                    .find(|(id, _)| *id == entry.amp)
                    .map_or(0.0, |(_, ramp)| ramp.value());

                if entry.partials.is_empty() {
                    continue;
                }

                let norm = level / entry.partials.len() as f32;
                for partial in &mut entry.partials {
                    mix += waveform_sample(entry.waveform, partial.phase) * norm;
                    partial.phase += partial.frequency / self.sample_rate;
                    if partial.phase >= 1.0 {
                        partial.phase -= partial.phase.floor();
                    }
                }
            }

            *sample = mix;
        }
    }

    pub fn oscillator_count(&self) -> usize {
        self.bank.len()
    }
}

/// Evaluate one waveform at a phase in [0, 1).
fn waveform_sample(waveform: Waveform, phase: f32) -> f32 {
    match waveform {
        Waveform::Sine => (core::f32::consts::TAU * phase).sin(),
        Waveform::Saw => 2.0 * phase - 1.0,
        Waveform::Square => {
            if phase < 0.5 {
                1.0
            } else {
                -1.0
            }
        }
        Waveform::Triangle => 1.0 - 4.0 * (phase - 0.5).abs(),
    }
}
