pub mod engine; // Audio-engine command boundary and reference renderer
pub mod keyboard; // Key-code routing and the per-degree voice table
pub mod synth; // Envelopes, instrument strategies, voices
pub mod tuning; // Tuning configuration and scale computation

pub const MAX_BLOCK_SIZE: usize = 2048;
