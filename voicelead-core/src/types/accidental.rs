//! Chromatic alterations and their arithmetic
//!
//! Accidentals are limited to double-flat..double-sharp. Combining two of them
//! is closed over that range except at the extremes, where the caller has to
//! re-spell the pitch on a neighbouring letter (see `Pitch::add_accidental`).

use std::fmt;

/// A chromatic alteration applied to a diatonic letter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Accidental {
    DoubleFlat,
    Flat,
    #[default]
    Natural,
    Sharp,
    DoubleSharp,
}

impl Accidental {
    /// All accidentals, flattest first
    pub const ALL: [Accidental; 5] = [
        Accidental::DoubleFlat,
        Accidental::Flat,
        Accidental::Natural,
        Accidental::Sharp,
        Accidental::DoubleSharp,
    ];

    /// Signed offset from natural
    pub fn semitones(self) -> i8 {
        match self {
            Accidental::DoubleFlat => -2,
            Accidental::Flat => -1,
            Accidental::Natural => 0,
            Accidental::Sharp => 1,
            Accidental::DoubleSharp => 2,
        }
    }

    /// Inverse of `semitones`; `None` outside [-2, 2]
    pub fn from_semitones(semitones: i8) -> Option<Accidental> {
        match semitones {
            -2 => Some(Accidental::DoubleFlat),
            -1 => Some(Accidental::Flat),
            0 => Some(Accidental::Natural),
            1 => Some(Accidental::Sharp),
            2 => Some(Accidental::DoubleSharp),
            _ => None,
        }
    }

    /// Stack `added` on top of this accidental.
    ///
    /// Returns `None` when the sum would need a triple or quadruple accidental.
    pub fn combine(self, added: Accidental) -> Option<Accidental> {
        Self::from_semitones(self.semitones() + added.semitones())
    }

    /// ASCII suffix used in pitch names: `bb`, `b`, ``, `#`, `##`
    pub fn symbol(self) -> &'static str {
        match self {
            Accidental::DoubleFlat => "bb",
            Accidental::Flat => "b",
            Accidental::Natural => "",
            Accidental::Sharp => "#",
            Accidental::DoubleSharp => "##",
        }
    }
}

impl fmt::Display for Accidental {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Combine an original spelling with the residual alteration found while
/// resolving a scale degree.
///
/// This is the representable part of the table. A natural result is
/// `Some(Accidental::Natural)`; `None` never means natural, it marks the
/// overflow cases (e.g. sharp + double-sharp) that must be re-spelled on
/// another letter.
pub fn combine_accidentals(original: Accidental, added: Accidental) -> Option<Accidental> {
    original.combine(added)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_natural_is_identity() {
        for a in Accidental::ALL {
            assert_eq!(combine_accidentals(a, Accidental::Natural), Some(a));
            assert_eq!(combine_accidentals(Accidental::Natural, a), Some(a));
        }
    }

    #[test]
    fn test_flat_and_sharp_cancel() {
        assert_eq!(
            combine_accidentals(Accidental::Flat, Accidental::Sharp),
            Some(Accidental::Natural)
        );
        assert_eq!(
            combine_accidentals(Accidental::Sharp, Accidental::Flat),
            Some(Accidental::Natural)
        );
    }

    #[test]
    fn test_table_entries() {
        use Accidental::*;
        assert_eq!(combine_accidentals(Flat, Flat), Some(DoubleFlat));
        assert_eq!(combine_accidentals(DoubleFlat, Sharp), Some(Flat));
        assert_eq!(combine_accidentals(Sharp, Sharp), Some(DoubleSharp));
        assert_eq!(combine_accidentals(DoubleSharp, Flat), Some(Sharp));
        assert_eq!(combine_accidentals(DoubleSharp, DoubleFlat), Some(Natural));
    }

    #[test]
    fn test_overflow_is_reported() {
        use Accidental::*;
        assert_eq!(combine_accidentals(DoubleFlat, Flat), None);
        assert_eq!(combine_accidentals(Sharp, DoubleSharp), None);
        assert_eq!(combine_accidentals(DoubleSharp, DoubleSharp), None);
    }

    #[test]
    fn test_all_pairs_defined() {
        // every one of the 25 ordered pairs either lands in range or overflows
        for a in Accidental::ALL {
            for b in Accidental::ALL {
                let sum = a.semitones() + b.semitones();
                match combine_accidentals(a, b) {
                    Some(c) => assert_eq!(c.semitones(), sum),
                    None => assert!(sum.abs() > 2),
                }
            }
        }
    }
}
