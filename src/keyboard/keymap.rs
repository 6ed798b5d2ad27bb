//! The fixed key-code → scale-degree table.
//!
//! Key codes are whatever the input surface delivers (the reference table
//! uses the classic wx codes of the original layout: the number row walks
//! degrees 0–12 from backtick to equals, then the QWERTY rows continue
//! upward, with six numpad codes extending the top range). Degrees must be
//! dense `[0, N)` so they can index the scale and the voice table directly;
//! the codes themselves can be anything.

use std::collections::HashMap;

use thiserror::Error;

/// Reference layout: 55 key codes covering degrees 0 through 54.
const REFERENCE_LAYOUT: [(u32, usize); 55] = [
    (96, 0),
    (49, 1),
    (50, 2),
    (51, 3),
    (52, 4),
    (53, 5),
    (54, 6),
    (55, 7),
    (56, 8),
    (57, 9),
    (48, 10),
    (45, 11),
    (61, 12),
    (81, 13),
    (87, 14),
    (69, 15),
    (82, 16),
    (84, 17),
    (89, 18),
    (85, 19),
    (73, 20),
    (79, 21),
    (80, 22),
    (91, 23),
    (93, 24),
    (92, 25),
    (311, 26),
    (65, 27),
    (83, 28),
    (68, 29),
    (70, 30),
    (71, 31),
    (72, 32),
    (74, 33),
    (75, 34),
    (76, 35),
    (59, 36),
    (39, 37),
    (13, 38),
    (90, 39),
    (88, 40),
    (67, 41),
    (86, 42),
    (66, 43),
    (78, 44),
    (77, 45),
    (44, 46),
    (46, 47),
    (47, 48),
    (324, 49),
    (325, 50),
    (326, 51),
    (327, 52),
    (328, 53),
    (329, 54),
];

/// Invalid key-map construction.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum KeyMapError {
    #[error("key code {0} appears twice")]
    DuplicateKeyCode(u32),
    #[error("degree {0} has more than one key code")]
    DuplicateDegree(usize),
    #[error("degree {0} is outside the dense range")]
    DegreeOutOfRange(usize),
}

#[derive(Debug, Clone)]
pub struct KeyMap {
    degree_of: HashMap<u32, usize>,
    degrees: usize,
}

impl KeyMap {
    /// Build a map from (key code, degree) pairs. Each code maps to exactly
    /// one degree, each degree has exactly one code, and degrees must cover
    /// `[0, pairs.len())` without holes.
    pub fn new(pairs: &[(u32, usize)]) -> Result<Self, KeyMapError> {
        let mut degree_of = HashMap::with_capacity(pairs.len());
        let mut seen = vec![false; pairs.len()];

        for &(code, degree) in pairs {
            if degree >= pairs.len() {
                return Err(KeyMapError::DegreeOutOfRange(degree));
            }
            if seen[degree] {
                return Err(KeyMapError::DuplicateDegree(degree));
            }
            seen[degree] = true;
            if degree_of.insert(code, degree).is_some() {
                return Err(KeyMapError::DuplicateKeyCode(code));
            }
        }

        // With every degree in range and none duplicated, N pairs
        // necessarily cover [0, N) — density needs no separate check.
        Ok(Self {
            degree_of,
            degrees: pairs.len(),
        })
    }

    /// The 55-degree reference layout.
    pub fn reference() -> Self {
        Self::new(&REFERENCE_LAYOUT).expect("reference layout is valid")
    }

    pub fn contains(&self, code: u32) -> bool {
        self.degree_of.contains_key(&code)
    }

    pub fn degree_of(&self, code: u32) -> Option<usize> {
        self.degree_of.get(&code).copied()
    }

    /// Number of mappable degrees; the scale and voice tables share it.
    pub fn degree_count(&self) -> usize {
        self.degrees
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        Self::reference()
    }
}
