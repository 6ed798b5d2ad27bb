use crate::engine::{RampPlan, RampSegment};

/*
Control Ramp
============

The renderer-side primitive behind every amplitude envelope. A control ramp
holds (current value, target value, remaining samples) and steps linearly
toward the target once per sample on the audio clock. The control thread
never advances it; it only replaces the plan.

Retargeting mid-ramp is the whole point:

    value
     1.0 ┐      ╱ ·····            plan A: ramp to 1.0
         │     ╱·
         │    ╱ ╲                  plan B arrives here: ramp to 0.0
         │   ╱   ╲                 — continues from the CURRENT value,
     0.0 └──╱─────╲────→ samples     not from plan A's target
            A      B

A plan can carry a queued second segment. The ramp promotes it when the
first segment's sample count is exhausted. That is how note-on expresses
"attack, then decay" without the control thread ever waiting: both segments
ship in one plan, and the sample clock does the sequencing.

Zero-duration segments jump straight to the target on the next sample.
*/

#[derive(Debug, Clone)]
pub struct ControlRamp {
    value: f32,
    target: f32,
    remaining_samples: u32,
    queued: Option<RampSegment>,
    sample_rate: f32,
}

impl ControlRamp {
    /// A ramp resting at zero (a voice is born silent).
    pub fn new(sample_rate: f32) -> Self {
        Self {
            value: 0.0,
            target: 0.0,
            remaining_samples: 0,
            queued: None,
            sample_rate,
        }
    }

    /// Replace the in-flight plan. The current value is kept; the pending
    /// target and any queued segment are discarded. Last writer wins.
    pub fn retarget(&mut self, plan: RampPlan) {
        self.begin_segment(plan.first);
        self.queued = plan.then;
    }

    fn begin_segment(&mut self, segment: RampSegment) {
        self.target = segment.target;
        self.remaining_samples = if segment.seconds <= 0.0 {
            0
        } else {
            (segment.seconds * self.sample_rate).round().max(1.0) as u32
        };
    }

    /// Advance by one sample and return the new value.
    pub fn next_sample(&mut self) -> f32 {
        if self.remaining_samples == 0 {
            self.value = self.target;
            if let Some(next) = self.queued.take() {
                self.begin_segment(next);
            }
            return self.value;
        }

        let step = (self.target - self.value) / self.remaining_samples as f32;
        self.value += step;
        self.remaining_samples -= 1;

        if self.remaining_samples == 0 {
            // Land exactly on the target; linear steps accumulate error.
            self.value = self.target;
            if let Some(next) = self.queued.take() {
                self.begin_segment(next);
            }
        }

        self.value
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// True while the ramp still has somewhere to go.
    pub fn is_moving(&self) -> bool {
        self.remaining_samples > 0 || self.queued.is_some()
    }
}
