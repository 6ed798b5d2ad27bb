// Purpose: the mutable tuning surface. A TuningController holds the committed
// configuration plus a draft being edited by the configuration surface;
// applying the draft is all-or-nothing and triggers a full scale
// recomputation and a live retune of the router's voices.

pub mod scale;

pub use scale::Scale;

use thiserror::Error;

use crate::engine::AudioEngine;
use crate::keyboard::KeyboardRouter;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How scale-degree frequencies are derived from the base frequency.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    /// Equal divisions of an interval: `base * unison^(i / steps)`.
    EqualDivision,
    /// A fixed number of cents per step: `base * 2^(i * cents / 1200)`.
    EqualCents,
}

impl Scheme {
    /// Parse a scheme name as supplied by a configuration surface.
    /// Unrecognized names yield `None`, which the scale computation treats
    /// as "fall back to 12edo".
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "eqdiv" => Some(Self::EqualDivision),
            "eqcents" => Some(Self::EqualCents),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::EqualDivision => "eqdiv",
            Self::EqualCents => "eqcents",
        }
    }
}

/// The full set of tuning parameters.
///
/// `scheme == None` records an unrecognized or unset scheme; it is not an
/// error, but every scale computed from it uses the 12edo fallback.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TuningConfig {
    pub base_frequency: f32,
    pub scheme: Option<Scheme>,
    pub steps: f32,
    pub unison: f32,
    pub cents: f32,
}

impl Default for TuningConfig {
    /// The reference build's startup tuning: A2, 12 equal divisions of the
    /// octave, 88-cent steps on the cents scheme.
    fn default() -> Self {
        Self {
            base_frequency: 110.0,
            scheme: Some(Scheme::EqualDivision),
            steps: 12.0,
            unison: 2.0,
            cents: 88.0,
        }
    }
}

impl TuningConfig {
    /// Validate every field. Used by the setters one field at a time and by
    /// `apply_tuning` for the whole draft, so a config assembled by hand
    /// gets the same scrutiny as one built through the setters.
    pub fn validate(&self) -> Result<(), TuningError> {
        check_field("base frequency", self.base_frequency, 0.0)?;
        check_field("steps", self.steps, 0.0)?;
        check_field("unison", self.unison, 1.0)?;
        check_field("cents", self.cents, 0.0)?;
        Ok(())
    }
}

fn check_field(field: &'static str, value: f32, min: f32) -> Result<(), TuningError> {
    if !value.is_finite() {
        return Err(TuningError::NotANumber { field });
    }
    if value <= min {
        return Err(TuningError::OutOfRange { field, min, value });
    }
    Ok(())
}

/// Invalid tuning input. Always recoverable: the previous value is retained.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum TuningError {
    #[error("{field} must be a number")]
    NotANumber { field: &'static str },
    #[error("{field} must be greater than {min}, got {value}")]
    OutOfRange {
        field: &'static str,
        min: f32,
        value: f32,
    },
}

/// Owns the tuning configuration and the apply path.
///
/// Setters edit a draft and reject invalid values one field at a time;
/// nothing the router can observe changes until [`apply_tuning`] commits the
/// whole draft atomically.
///
/// [`apply_tuning`]: TuningController::apply_tuning
#[derive(Debug, Clone)]
pub struct TuningController {
    committed: TuningConfig,
    draft: TuningConfig,
}

impl Default for TuningController {
    fn default() -> Self {
        Self::new(TuningConfig::default())
    }
}

impl TuningController {
    pub fn new(config: TuningConfig) -> Self {
        Self {
            committed: config,
            draft: config,
        }
    }

    /// The configuration the current scale was computed from.
    pub fn config(&self) -> &TuningConfig {
        &self.committed
    }

    /// The draft being edited, including not-yet-applied changes.
    pub fn draft(&self) -> &TuningConfig {
        &self.draft
    }

    pub fn set_base_frequency(&mut self, hz: f32) -> Result<(), TuningError> {
        check_field("base frequency", hz, 0.0)?;
        self.draft.base_frequency = hz;
        Ok(())
    }

    pub fn set_steps(&mut self, steps: f32) -> Result<(), TuningError> {
        check_field("steps", steps, 0.0)?;
        self.draft.steps = steps;
        Ok(())
    }

    pub fn set_unison(&mut self, ratio: f32) -> Result<(), TuningError> {
        check_field("unison", ratio, 1.0)?;
        self.draft.unison = ratio;
        Ok(())
    }

    pub fn set_cents(&mut self, cents: f32) -> Result<(), TuningError> {
        check_field("cents", cents, 0.0)?;
        self.draft.cents = cents;
        Ok(())
    }

    /// Select a scheme by name. An unrecognized name is stored as "unset"
    /// and reported to the caller; scales computed from it use the 12edo
    /// fallback rather than failing.
    pub fn set_scheme(&mut self, name: &str) -> Option<Scheme> {
        let scheme = Scheme::from_name(name);
        if scheme.is_none() {
            log::warn!("unknown tuning scheme {:?}", name);
        }
        self.draft.scheme = scheme;
        scheme
    }

    /// Throw away draft edits, reverting to the committed configuration.
    pub fn revert(&mut self) {
        self.draft = self.committed;
    }

    /// Commit the draft: validate it as a whole, recompute the scale, and
    /// retune the router's live voices. On error nothing changes — not the
    /// committed config, not the scale, not a single voice.
    pub fn apply_tuning(
        &mut self,
        router: &mut KeyboardRouter,
        engine: &mut dyn AudioEngine,
    ) -> Result<(), TuningError> {
        self.draft.validate()?;
        self.committed = self.draft;

        let scale = Scale::compute(&self.committed, router.degree_count());
        router.retune(scale, engine);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheme_names_round_trip() {
        assert_eq!(Scheme::from_name("eqdiv"), Some(Scheme::EqualDivision));
        assert_eq!(Scheme::from_name("eqcents"), Some(Scheme::EqualCents));
        assert_eq!(Scheme::from_name("bohlen-pierce"), None);
        assert_eq!(Scheme::EqualCents.name(), "eqcents");
    }

    #[test]
    fn setters_reject_and_retain() {
        let mut controller = TuningController::default();

        assert!(controller.set_base_frequency(f32::NAN).is_err());
        assert!(controller.set_base_frequency(-3.0).is_err());
        assert_eq!(controller.draft().base_frequency, 110.0);

        assert!(controller.set_unison(1.0).is_err(), "unison must exceed 1");
        assert!(controller.set_steps(0.0).is_err());
        assert!(controller.set_cents(f32::INFINITY).is_err());

        assert_eq!(controller.draft(), controller.config());
    }

    #[test]
    fn valid_edits_stay_in_the_draft_until_applied() {
        let mut controller = TuningController::default();
        controller.set_base_frequency(220.0).unwrap();

        assert_eq!(controller.draft().base_frequency, 220.0);
        assert_eq!(controller.config().base_frequency, 110.0);

        controller.revert();
        assert_eq!(controller.draft().base_frequency, 110.0);
    }

    #[test]
    fn unknown_scheme_is_stored_as_unset() {
        let mut controller = TuningController::default();
        assert_eq!(controller.set_scheme("wendy"), None);
        assert_eq!(controller.draft().scheme, None);

        assert_eq!(
            controller.set_scheme("eqcents"),
            Some(Scheme::EqualCents)
        );
    }

    #[test]
    fn hand_built_config_is_validated_whole() {
        let config = TuningConfig {
            unison: 0.5,
            ..TuningConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(TuningError::OutOfRange { field: "unison", .. })
        ));
    }
}
