//! Application state and the terminal event loop.
//!
//! This is the stand-in for the excluded input and configuration surfaces:
//! it turns crossterm key events into raw key codes for the router and
//! function-key presses into tuning-controller edits.

use std::io;
use std::time::Duration;

use color_eyre::Result as EyreResult;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::{execute, terminal};
use ratatui::DefaultTerminal;

use keytone::engine::link::CommandSender;
use keytone::keyboard::{KeyMap, KeyboardRouter};
use keytone::synth::Instrument;
use keytone::tuning::{Scale, Scheme, TuningController};

use crate::ui;

pub struct App {
    router: KeyboardRouter,
    tuning: TuningController,
    engine: CommandSender,
    status: String,
    quit: bool,
}

impl App {
    pub fn new(engine: CommandSender) -> Self {
        let keymap = KeyMap::reference();
        let tuning = TuningController::default();
        let scale = Scale::compute(tuning.config(), keymap.degree_count());

        Self {
            // The reference build boots with the detuned instrument selected.
            router: KeyboardRouter::new(keymap, scale, Instrument::detuned()),
            tuning,
            engine,
            status: String::from("ready"),
            quit: false,
        }
    }

    pub fn router(&self) -> &KeyboardRouter {
        &self.router
    }

    pub fn tuning(&self) -> &TuningController {
        &self.tuning
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn run(mut self) -> EyreResult<()> {
        let mut terminal = ratatui::init();

        let release_events = terminal::supports_keyboard_enhancement().unwrap_or(false);
        if release_events {
            execute!(
                io::stdout(),
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
        } else {
            self.status =
                String::from("terminal reports no key-release events; notes will not release");
        }

        let result = self.event_loop(&mut terminal);

        if release_events {
            let _ = execute!(io::stdout(), PopKeyboardEnhancementFlags);
        }
        ratatui::restore();
        result
    }

    fn event_loop(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.quit {
            terminal.draw(|frame| ui::draw(frame, self))?;
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        // Playable keys first: both press and release matter to the router.
        if let Some(code) = raw_key_code(key.code) {
            match key.kind {
                KeyEventKind::Press => self.router.on_key_down(code, &mut self.engine),
                KeyEventKind::Release => self.router.on_key_up(code, &mut self.engine),
                KeyEventKind::Repeat => {}
            }
            return;
        }

        if key.kind != KeyEventKind::Press {
            return;
        }

        match key.code {
            KeyCode::Esc => self.quit = true,
            KeyCode::F(1) => self.select_instrument(Instrument::simple()),
            KeyCode::F(2) => self.select_instrument(Instrument::harmonic()),
            KeyCode::F(3) => self.select_instrument(Instrument::detuned()),
            KeyCode::F(4) => self.toggle_scheme(),
            KeyCode::F(5) => self.apply_tuning(),
            KeyCode::Up => self.edit(|t| t.set_base_frequency(t.draft().base_frequency + 5.0)),
            KeyCode::Down => self.edit(|t| t.set_base_frequency(t.draft().base_frequency - 5.0)),
            KeyCode::Right => self.edit(|t| t.set_steps(t.draft().steps + 1.0)),
            KeyCode::Left => self.edit(|t| t.set_steps(t.draft().steps - 1.0)),
            KeyCode::PageUp => self.edit(|t| t.set_cents(t.draft().cents + 1.0)),
            KeyCode::PageDown => self.edit(|t| t.set_cents(t.draft().cents - 1.0)),
            _ => {}
        }
    }

    fn select_instrument(&mut self, instrument: Instrument) {
        self.status = format!("instrument: {}", instrument.name());
        self.router.set_instrument(instrument);
    }

    fn toggle_scheme(&mut self) {
        let next = match self.tuning.draft().scheme {
            Some(Scheme::EqualDivision) => "eqcents",
            _ => "eqdiv",
        };
        self.tuning.set_scheme(next);
        self.status = format!("scheme: {} (F5 to apply)", next);
    }

    fn apply_tuning(&mut self) {
        match self.tuning.apply_tuning(&mut self.router, &mut self.engine) {
            Ok(()) => {
                let fallback = if self.router.scale().fallback_applied() {
                    " (12edo fallback)"
                } else {
                    ""
                };
                self.status = format!("tuning applied{}", fallback);
            }
            Err(err) => self.status = format!("rejected: {}", err),
        }
    }

    fn edit(
        &mut self,
        change: impl FnOnce(&mut TuningController) -> Result<(), keytone::tuning::TuningError>,
    ) {
        match change(&mut self.tuning) {
            Ok(()) => self.status = String::from("draft edited (F5 to apply)"),
            Err(err) => self.status = format!("rejected: {}", err),
        }
    }
}

/// Map a crossterm key to the reference table's raw key code. The reference
/// codes for typable keys are their ASCII values with letters uppercased,
/// plus 13 for enter.
fn raw_key_code(code: KeyCode) -> Option<u32> {
    match code {
        KeyCode::Char(c) if c.is_ascii() && c != ' ' => Some(c.to_ascii_uppercase() as u32),
        KeyCode::Enter => Some(13),
        _ => None,
    }
}
