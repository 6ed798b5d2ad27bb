//! Scale computation: one frequency per scale degree.

use crate::tuning::{Scheme, TuningConfig};

/// An ordered frequency table, one entry per mappable scale degree.
///
/// Recomputed in full whenever the tuning configuration is applied. For any
/// valid configuration the table is strictly increasing.
#[derive(Debug, Clone, PartialEq)]
pub struct Scale {
    frequencies: Vec<f32>,
    fallback_applied: bool,
}

impl Scale {
    /// Compute `len` degree frequencies from a tuning configuration.
    ///
    /// An unrecognized (or unset) scheme falls back to 12-tone equal
    /// division with an octave unison — ignoring the configured steps and
    /// unison — and records that it did so. The fallback is a diagnostic,
    /// not an error: the caller still gets a playable scale.
    pub fn compute(config: &TuningConfig, len: usize) -> Self {
        let base = config.base_frequency;
        let (frequencies, fallback_applied) = match config.scheme {
            Some(Scheme::EqualDivision) => (
                equal_division(base, config.unison, config.steps, len),
                false,
            ),
            Some(Scheme::EqualCents) => (equal_cents(base, config.cents, len), false),
            None => {
                log::warn!("unrecognized tuning scheme, defaulting to 12edo");
                (equal_division(base, 2.0, 12.0, len), true)
            }
        };

        debug_assert!(
            frequencies.windows(2).all(|w| w[0] < w[1]),
            "scale must be strictly increasing"
        );

        Self {
            frequencies,
            fallback_applied,
        }
    }

    pub fn frequency(&self, degree: usize) -> f32 {
        self.frequencies[degree]
    }

    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// True when this scale came from the 12edo fallback path.
    pub fn fallback_applied(&self) -> bool {
        self.fallback_applied
    }

    pub fn frequencies(&self) -> &[f32] {
        &self.frequencies
    }
}

/// `freq[i] = base * unison^(i / steps)`
fn equal_division(base: f32, unison: f32, steps: f32, len: usize) -> Vec<f32> {
    (0..len)
        .map(|i| base * unison.powf(i as f32 / steps))
        .collect()
}

/// `freq[i] = base * 2^(i * cents / 1200)`
fn equal_cents(base: f32, cents: f32, len: usize) -> Vec<f32> {
    (0..len)
        .map(|i| base * 2.0_f32.powf(i as f32 * cents / 1200.0))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::TuningConfig;

    const LEN: usize = 55;

    #[test]
    fn equal_division_hits_the_unison_at_steps() {
        let config = TuningConfig {
            base_frequency: 110.0,
            scheme: Some(Scheme::EqualDivision),
            steps: 12.0,
            unison: 2.0,
            cents: 88.0,
        };
        let scale = Scale::compute(&config, LEN);

        assert_eq!(scale.len(), LEN);
        assert!((scale.frequency(0) - 110.0).abs() < 1e-4);
        assert!((scale.frequency(12) - 220.0).abs() < 1e-3);
        assert!(!scale.fallback_applied());
    }

    #[test]
    fn equal_cents_at_100_matches_12edo() {
        let config = TuningConfig {
            base_frequency: 110.0,
            scheme: Some(Scheme::EqualCents),
            steps: 12.0,
            unison: 2.0,
            cents: 100.0,
        };
        let scale = Scale::compute(&config, LEN);

        assert!((scale.frequency(12) - 220.0).abs() < 1e-3);
    }

    #[test]
    fn valid_configs_are_strictly_increasing() {
        for config in [
            TuningConfig::default(),
            TuningConfig {
                scheme: Some(Scheme::EqualDivision),
                steps: 19.0,
                unison: 3.0,
                ..TuningConfig::default()
            },
            TuningConfig {
                scheme: Some(Scheme::EqualCents),
                cents: 63.2,
                ..TuningConfig::default()
            },
        ] {
            let scale = Scale::compute(&config, LEN);
            assert!(
                scale.frequencies().windows(2).all(|w| w[0] < w[1]),
                "not monotonic for {:?}",
                config
            );
        }
    }

    #[test]
    fn unknown_scheme_falls_back_to_12edo_observably() {
        let config = TuningConfig {
            base_frequency: 110.0,
            scheme: None,
            // Deliberately absurd values that must be ignored by the fallback.
            steps: 5.0,
            unison: 7.0,
            cents: 1.0,
        };
        let scale = Scale::compute(&config, LEN);

        assert!(scale.fallback_applied());
        assert!((scale.frequency(12) - 220.0).abs() < 1e-3);
    }
}
