//! Audio output: a cpal stream wrapping the reference renderer.
//!
//! The render callback drains the command queue at the top of every block,
//! so ramp plans are applied between blocks and never half-way through one.

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rtrb::Consumer;

use keytone::engine::{render::RenderEngine, EngineCommand};
use keytone::MAX_BLOCK_SIZE;

pub fn start_stream(mut commands: Consumer<EngineCommand>) -> EyreResult<cpal::Stream> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| eyre!("no default output device available"))?;
    let config = device
        .default_output_config()
        .wrap_err("failed to fetch default output config")?;

    let sample_rate = config.sample_rate().0 as f32;
    let channels = config.channels() as usize;

    let mut engine = RenderEngine::new(sample_rate);
    let mut block = vec![0.0f32; MAX_BLOCK_SIZE];

    let stream = device
        .build_output_stream(
            &config.into(),
            move |data: &mut [f32], _| {
                while let Ok(command) = commands.pop() {
                    engine.apply(command);
                }

                let total_frames = data.len() / channels;
                let mut frames_written = 0;

                while frames_written < total_frames {
                    let frames = (total_frames - frames_written).min(MAX_BLOCK_SIZE);
                    let block = &mut block[..frames];
                    engine.render_block(block);

                    // Mono to all channels.
                    let out_off = frames_written * channels;
                    for (i, &s) in block.iter().enumerate() {
                        for ch in 0..channels {
                            data[out_off + i * channels + ch] = s;
                        }
                    }

                    frames_written += frames;
                }
            },
            |err| log::error!("audio error: {}", err),
            None,
        )
        .wrap_err("failed to build output stream")?;

    stream.play().wrap_err("failed to start output stream")?;
    Ok(stream)
}
