//! SPSC command transport between the control thread and the audio thread.
//!
//! Commands cross the boundary as whole values through an rtrb ring buffer:
//! the renderer either pops a complete command or sees nothing, which is what
//! makes ramp updates atomic with respect to the render loop.

use rtrb::{Consumer, Producer, RingBuffer};

use crate::engine::{AudioEngine, EngineCommand};

pub struct CommandSender {
    tx: Producer<EngineCommand>,
}

impl AudioEngine for CommandSender {
    fn submit(&mut self, command: EngineCommand) {
        if self.tx.push(command).is_err() {
            // The renderer has fallen hopelessly behind (or is gone).
            // Dropping the command beats blocking the input thread.
            log::warn!("engine command queue full, command dropped");
        }
    }
}

/// Create a command link. The sender lives on the control thread; the
/// consumer is drained by the renderer at the top of each block.
pub fn command_link(capacity: usize) -> (CommandSender, Consumer<EngineCommand>) {
    let (tx, rx) = RingBuffer::new(capacity);
    (CommandSender { tx }, rx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{RampPlan, SignalId};

    #[test]
    fn commands_arrive_in_order() {
        let (mut tx, mut rx) = command_link(8);

        tx.submit(EngineCommand::SetRamp {
            signal: SignalId(0),
            plan: RampPlan::to_target(1.0, 0.1),
        });
        tx.submit(EngineCommand::SetRamp {
            signal: SignalId(0),
            plan: RampPlan::to_target(0.0, 0.5),
        });

        let first = rx.pop().unwrap();
        let second = rx.pop().unwrap();
        assert!(rx.pop().is_err());

        match (first, second) {
            (
                EngineCommand::SetRamp { plan: a, .. },
                EngineCommand::SetRamp { plan: b, .. },
            ) => {
                assert_eq!(a.first.target, 1.0);
                assert_eq!(b.first.target, 0.0);
            }
            other => panic!("unexpected commands: {:?}", other),
        }
    }

    #[test]
    fn full_queue_drops_instead_of_blocking() {
        let (mut tx, _rx) = command_link(1);

        tx.submit(EngineCommand::FreeOscillator {
            osc: crate::engine::OscillatorId(0),
        });
        // Queue is full; this must return without blocking.
        tx.submit(EngineCommand::FreeOscillator {
            osc: crate::engine::OscillatorId(1),
        });
    }
}
