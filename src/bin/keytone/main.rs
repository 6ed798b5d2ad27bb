//! keytone - terminal microtonal keyboard
//!
//! Run with: cargo run
//!
//! The mapped character rows play scale degrees; function keys switch
//! instruments and edit the tuning. Key-release events need a terminal
//! supporting the kitty keyboard protocol; without it, notes release on
//! the next press instead of on lift.

mod app;
mod audio;
mod ui;

use app::App;
use keytone::engine::link::command_link;

/// Plenty for a keyboard: worst case is a full retune of 55 held voices.
const COMMAND_QUEUE: usize = 256;

fn main() -> color_eyre::Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let (sender, commands) = command_link(COMMAND_QUEUE);
    let stream = audio::start_stream(commands)?;

    let result = App::new(sender).run();
    drop(stream);
    result
}
