// Purpose: key-event routing. Maps raw key codes to scale degrees, debounces
// OS auto-repeat through per-degree pressed state, and owns the per-degree
// voice table. This is the single mutation point for everything the player
// hears; events arrive serialized from one input loop, so no locking.

pub mod keymap;

pub use keymap::{KeyMap, KeyMapError};

use crate::engine::{AudioEngine, HandleAllocator, Waveform};
use crate::synth::{Instrument, Voice};
use crate::tuning::Scale;

pub struct KeyboardRouter {
    keymap: KeyMap,
    scale: Scale,
    instrument: Instrument,
    pressed: Vec<bool>,
    voices: Vec<Option<Voice>>,
    handles: HandleAllocator,
}

impl KeyboardRouter {
    /// The scale must cover every degree the key map can produce.
    pub fn new(keymap: KeyMap, scale: Scale, instrument: Instrument) -> Self {
        assert_eq!(
            scale.len(),
            keymap.degree_count(),
            "scale length must match the key map's degree count"
        );
        let degrees = keymap.degree_count();
        Self {
            keymap,
            scale,
            instrument,
            pressed: vec![false; degrees],
            voices: (0..degrees).map(|_| None).collect(),
            handles: HandleAllocator::new(),
        }
    }

    pub fn key_exists(&self, code: u32) -> bool {
        self.keymap.contains(code)
    }

    pub fn degree_count(&self) -> usize {
        self.keymap.degree_count()
    }

    pub fn scale(&self) -> &Scale {
        &self.scale
    }

    pub fn instrument(&self) -> &Instrument {
        &self.instrument
    }

    /// Degrees currently held down, lowest first.
    pub fn held_degrees(&self) -> Vec<usize> {
        self.pressed
            .iter()
            .enumerate()
            .filter_map(|(d, held)| held.then_some(d))
            .collect()
    }

    /// Key-down event. Unknown codes are ignored; a code already marked
    /// pressed is OS auto-repeat and is ignored too, so a held key never
    /// re-triggers its envelope. The first genuine press of a degree builds
    /// its voice; later presses reuse it.
    pub fn on_key_down(&mut self, code: u32, engine: &mut dyn AudioEngine) {
        let Some(degree) = self.keymap.degree_of(code) else {
            return;
        };
        if self.pressed[degree] {
            return;
        }
        self.pressed[degree] = true;

        if self.voices[degree].is_none() {
            self.voices[degree] = Some(Voice::build(
                &self.instrument,
                self.scale.frequency(degree),
                &mut self.handles,
                engine,
            ));
        }
        if let Some(voice) = &self.voices[degree] {
            voice.hit_note(engine);
        }
    }

    /// Key-up event. Unknown codes are ignored. Releasing a degree whose
    /// voice does not exist (out-of-order delivery, or a lift that raced a
    /// retune) is a logged diagnostic, never a crash.
    pub fn on_key_up(&mut self, code: u32, engine: &mut dyn AudioEngine) {
        let Some(degree) = self.keymap.degree_of(code) else {
            return;
        };
        self.pressed[degree] = false;

        match &self.voices[degree] {
            Some(voice) => voice.rel_note(engine),
            None => log::debug!("release for degree {} with no voice", degree),
        }
    }

    /// Select the instrument used for voices built from now on. Existing
    /// voices keep the instrument they were built with until a retune
    /// rebuilds them.
    pub fn set_instrument(&mut self, instrument: Instrument) {
        self.instrument = instrument;
    }

    /// Override the waveform for voices built from now on.
    pub fn set_waveform(&mut self, waveform: Waveform) {
        self.instrument = self.instrument.clone().with_waveform(waveform);
    }

    /// Install a new scale and rebuild every existing voice at its new
    /// frequency with the currently selected instrument. Rebuilt voices
    /// restart silent at idle — a held note audibly cuts out, which is the
    /// accepted cost of an in-performance retune. Degrees that never played
    /// stay lazy.
    pub fn retune(&mut self, scale: Scale, engine: &mut dyn AudioEngine) {
        assert_eq!(scale.len(), self.keymap.degree_count());
        self.scale = scale;

        for degree in 0..self.voices.len() {
            if let Some(voice) = self.voices[degree].take() {
                voice.teardown(engine);
                self.voices[degree] = Some(Voice::build(
                    &self.instrument,
                    self.scale.frequency(degree),
                    &mut self.handles,
                    engine,
                ));
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn voice(&self, degree: usize) -> Option<&Voice> {
        self.voices[degree].as_ref()
    }
}
