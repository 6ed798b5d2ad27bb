// Purpose: the command boundary between the control side (keyboard routing,
// tuning) and the audio renderer. The control side never touches buffers or
// the audio thread; it submits whole EngineCommand values and the renderer
// applies them at the top of a block.

pub mod ramp;
pub mod render;

#[cfg(feature = "rtrb")]
pub mod link;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Handle for one oscillator bank entry on the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OscillatorId(pub u32);

/// Handle for one control signal (an amplitude ramp) on the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SignalId(pub u32);

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Saw,
    Square,
    Triangle,
}

/// One linear ramp segment: head toward `target` over `seconds`.
///
/// A duration of zero means an instantaneous jump to the target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RampSegment {
    pub target: f32,
    pub seconds: f32,
}

/// A ramp plan: one segment, plus an optional second segment that the
/// renderer starts once the first one's duration has elapsed.
///
/// A plan always replaces the in-flight plan as a whole. That single rule
/// covers both envelope gestures: note-on ships attack plus a queued decay,
/// and note-off ships a lone release segment that cancels whatever the
/// previous plan still had pending.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RampPlan {
    pub first: RampSegment,
    pub then: Option<RampSegment>,
}

impl RampPlan {
    /// Single-segment plan: ramp to `target` over `seconds`.
    pub fn to_target(target: f32, seconds: f32) -> Self {
        Self {
            first: RampSegment { target, seconds },
            then: None,
        }
    }

    /// Two-segment plan: the second segment starts when the first completes.
    pub fn two_stage(first: RampSegment, then: RampSegment) -> Self {
        Self {
            first,
            then: Some(then),
        }
    }
}

/// Commands the control side issues to the audio engine.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCommand {
    /// Register an oscillator with fixed partial frequencies whose summed
    /// output is scaled by the `amp` control signal each sample.
    CreateOscillator {
        osc: OscillatorId,
        partials: Vec<f32>,
        waveform: Waveform,
        amp: SignalId,
    },
    /// Atomically replace the ramp plan of a control signal.
    SetRamp { signal: SignalId, plan: RampPlan },
    /// Drop an oscillator and its amplitude signal from the bank.
    FreeOscillator { osc: OscillatorId },
}

/// The control side's view of the audio engine.
///
/// Implemented by the rtrb sender for live use and by [`CommandLog`] for
/// tests that assert on the exact command sequence.
pub trait AudioEngine {
    fn submit(&mut self, command: EngineCommand);
}

/// Allocates renderer handles on the control side.
///
/// Ids are never reused; the renderer forgets freed ids and a stale ramp
/// command for a freed signal falls on the floor harmlessly.
#[derive(Debug, Default)]
pub struct HandleAllocator {
    next_oscillator: u32,
    next_signal: u32,
}

impl HandleAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn oscillator(&mut self) -> OscillatorId {
        let id = OscillatorId(self.next_oscillator);
        self.next_oscillator += 1;
        id
    }

    pub fn signal(&mut self) -> SignalId {
        let id = SignalId(self.next_signal);
        self.next_signal += 1;
        id
    }
}

/// Records every submitted command. The test double for the engine boundary.
#[derive(Debug, Default)]
pub struct CommandLog {
    pub commands: Vec<EngineCommand>,
}

impl CommandLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ramp plans targeting one control signal, in submission order.
    pub fn ramps_for(&self, signal: SignalId) -> Vec<&RampPlan> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                EngineCommand::SetRamp { signal: s, plan } if *s == signal => Some(plan),
                _ => None,
            })
            .collect()
    }

    pub fn oscillator_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, EngineCommand::CreateOscillator { .. }))
            .count()
    }
}

impl AudioEngine for CommandLog {
    fn submit(&mut self, command: EngineCommand) {
        self.commands.push(command);
    }
}
