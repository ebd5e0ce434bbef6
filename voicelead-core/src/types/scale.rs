//! Scales as ordered degree tables
//!
//! A scale maps 1-based degrees to spelled pitches and back. Heptatonic modes
//! are spelled one letter per degree starting from the tonic; arbitrary tables
//! can be supplied directly with `Scale::from_degrees`.

use crate::error::{Result, VoiceLeadingError};
use crate::types::accidental::Accidental;
use crate::types::pitch::{circular_distance, Letter, Pitch};
use std::fmt;

/// Heptatonic interval patterns, semitones from the tonic per degree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode {
    /// Ionian
    #[default]
    Major,
    /// Natural minor (Aeolian)
    Minor,
    Dorian,
    Phrygian,
    Lydian,
    Mixolydian,
    Locrian,
    HarmonicMinor,
    MelodicMinor,
}

impl Mode {
    /// Semitone intervals from the tonic to degrees 1-7
    pub fn intervals(self) -> [u8; 7] {
        match self {
            Mode::Major => [0, 2, 4, 5, 7, 9, 11],
            Mode::Minor => [0, 2, 3, 5, 7, 8, 10],
            Mode::Dorian => [0, 2, 3, 5, 7, 9, 10],
            Mode::Phrygian => [0, 1, 3, 5, 7, 8, 10],
            Mode::Lydian => [0, 2, 4, 6, 7, 9, 11],
            Mode::Mixolydian => [0, 2, 4, 5, 7, 9, 10],
            Mode::Locrian => [0, 1, 3, 5, 6, 8, 10],
            Mode::HarmonicMinor => [0, 2, 3, 5, 7, 8, 11],
            Mode::MelodicMinor => [0, 2, 3, 5, 7, 9, 11],
        }
    }

    /// Parse mode from string (case-insensitive)
    pub fn from_name(s: &str) -> Option<Mode> {
        match s.to_lowercase().as_str() {
            "major" | "ionian" | "maj" => Some(Mode::Major),
            "minor" | "aeolian" | "min" | "natural minor" => Some(Mode::Minor),
            "dorian" => Some(Mode::Dorian),
            "phrygian" => Some(Mode::Phrygian),
            "lydian" => Some(Mode::Lydian),
            "mixolydian" => Some(Mode::Mixolydian),
            "locrian" => Some(Mode::Locrian),
            "harmonic minor" | "harmonic-minor" => Some(Mode::HarmonicMinor),
            "melodic minor" | "melodic-minor" => Some(Mode::MelodicMinor),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Mode::Major => "major",
            Mode::Minor => "minor",
            Mode::Dorian => "dorian",
            Mode::Phrygian => "phrygian",
            Mode::Lydian => "lydian",
            Mode::Mixolydian => "mixolydian",
            Mode::Locrian => "locrian",
            Mode::HarmonicMinor => "harmonic minor",
            Mode::MelodicMinor => "melodic minor",
        }
    }
}

/// An immutable degree table. Degree 1 is the tonic, in the tonic's register.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "ScaleTable"))]
pub struct Scale {
    degrees: Vec<Pitch>,
    mode: Option<Mode>,
}

/// Unchecked wire form of `Scale`
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct ScaleTable {
    degrees: Vec<Pitch>,
    mode: Option<Mode>,
}

#[cfg(feature = "serde")]
impl TryFrom<ScaleTable> for Scale {
    type Error = VoiceLeadingError;

    fn try_from(table: ScaleTable) -> Result<Self> {
        let mut scale = Scale::from_degrees(table.degrees)?;
        scale.mode = table.mode;
        Ok(scale)
    }
}

impl Scale {
    /// Build a heptatonic scale on `tonic`
    pub fn new(tonic: Pitch, mode: Mode) -> Result<Self> {
        let mut scale = Self::with_intervals(tonic, &mode.intervals())?;
        scale.mode = Some(mode);
        Ok(scale)
    }

    pub fn major(tonic: Pitch) -> Result<Self> {
        Self::new(tonic, Mode::Major)
    }

    pub fn minor(tonic: Pitch) -> Result<Self> {
        Self::new(tonic, Mode::Minor)
    }

    /// Spell one letter per degree above `tonic` with the given semitone
    /// offsets. Fails if a degree would need more than a double accidental.
    pub fn with_intervals(tonic: Pitch, intervals: &[u8; 7]) -> Result<Self> {
        let mut degrees = Vec::with_capacity(intervals.len());
        for (step, &interval) in intervals.iter().enumerate() {
            let (letter, carry) = tonic.letter().step(step as i32);
            let octave = tonic.octave().checked_add(carry).ok_or_else(|| {
                VoiceLeadingError::InvalidScale(format!(
                    "degree {} above {} is out of range",
                    step + 1,
                    tonic
                ))
            })?;
            let natural = Pitch::natural(letter, octave);
            let residual = tonic.midi() + interval as i32 - natural.midi();
            let accidental = i8::try_from(residual)
                .ok()
                .and_then(Accidental::from_semitones)
                .ok_or_else(|| {
                    VoiceLeadingError::InvalidScale(format!(
                        "degree {} above {} cannot be spelled on {}",
                        step + 1,
                        tonic,
                        letter.name()
                    ))
                })?;
            degrees.push(Pitch::new(letter, accidental, natural.octave()));
        }
        Ok(Scale {
            degrees,
            mode: None,
        })
    }

    /// Use an explicit table of spelled degrees (degree 1 first)
    pub fn from_degrees(degrees: Vec<Pitch>) -> Result<Self> {
        if degrees.is_empty() {
            return Err(VoiceLeadingError::InvalidScale(
                "a scale needs at least one degree".to_string(),
            ));
        }
        Ok(Scale {
            degrees,
            mode: None,
        })
    }

    pub fn tonic(&self) -> Pitch {
        self.degrees[0]
    }

    pub fn degrees(&self) -> &[Pitch] {
        &self.degrees
    }

    pub fn len(&self) -> usize {
        self.degrees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.degrees.is_empty()
    }

    /// Whether the pitch class of `pitch` belongs to the scale
    pub fn contains(&self, pitch: &Pitch) -> bool {
        self.degrees
            .iter()
            .any(|d| d.pitch_class() == pitch.pitch_class())
    }

    /// The spelled pitch of a 1-based degree
    pub fn degree_to_pitch(&self, degree: usize) -> Result<Pitch> {
        if degree == 0 || degree > self.degrees.len() {
            return Err(VoiceLeadingError::InvalidDegree {
                degree,
                len: self.degrees.len(),
            });
        }
        Ok(self.degrees[degree - 1])
    }

    /// Resolve a pitch to (1-based degree, residual accidental).
    ///
    /// The degree is the one spelled on the pitch's letter; the residual is
    /// the chromatic distance from that degree. Tables without the letter fall
    /// back to the nearest degree by pitch class (first degree wins ties).
    pub fn pitch_to_degree_and_accidental(&self, pitch: &Pitch) -> Result<(usize, Accidental)> {
        let (index, residual) = match self.degree_for_letter(pitch.letter()) {
            Some(index) => {
                let degree = self.degrees[index];
                (
                    index,
                    pitch.accidental().semitones() - degree.accidental().semitones(),
                )
            }
            None => {
                let index = self.nearest_degree(pitch.pitch_class());
                let mut residual =
                    (pitch.pitch_class() as i8 - self.degrees[index].pitch_class() as i8)
                        .rem_euclid(12);
                if residual > 6 {
                    residual -= 12;
                }
                (index, residual)
            }
        };

        let accidental = Accidental::from_semitones(residual).ok_or_else(|| {
            VoiceLeadingError::UnresolvableDegree {
                pitch: pitch.to_string(),
            }
        })?;
        Ok((index + 1, accidental))
    }

    fn degree_for_letter(&self, letter: Letter) -> Option<usize> {
        self.degrees.iter().position(|d| d.letter() == letter)
    }

    fn nearest_degree(&self, pitch_class: u8) -> usize {
        let mut best = 0;
        let mut best_distance = u8::MAX;
        for (i, degree) in self.degrees.iter().enumerate() {
            let distance = circular_distance(degree.pitch_class(), pitch_class);
            if distance < best_distance {
                best = i;
                best_distance = distance;
            }
        }
        best
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tonic = self.tonic();
        match self.mode {
            Some(mode) => write!(
                f,
                "{}{} {}",
                tonic.letter().name(),
                tonic.accidental(),
                mode.name()
            ),
            None => {
                let names: Vec<String> = self.degrees.iter().map(|d| d.to_string()).collect();
                write!(f, "[{}]", names.join(" "))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(s: &str) -> Pitch {
        s.parse().unwrap()
    }

    fn names(scale: &Scale) -> Vec<String> {
        scale.degrees().iter().map(|d| d.to_string()).collect()
    }

    #[test]
    fn test_major_spelling() {
        let e = Scale::major(p("E4")).unwrap();
        assert_eq!(names(&e), ["E4", "F#4", "G#4", "A4", "B4", "C#5", "D#5"]);

        let f = Scale::major(p("F4")).unwrap();
        assert_eq!(names(&f), ["F4", "G4", "A4", "Bb4", "C5", "D5", "E5"]);
        assert_eq!(f.to_string(), "F major");
    }

    #[test]
    fn test_flat_tonic_spelling() {
        let cb = Scale::major(p("Cb4")).unwrap();
        assert_eq!(cb.degree_to_pitch(2).unwrap(), p("Db4"));
        assert_eq!(cb.degree_to_pitch(7).unwrap(), p("Bb4"));
    }

    #[test]
    fn test_minor_and_modes() {
        let a = Scale::minor(p("A3")).unwrap();
        assert_eq!(names(&a), ["A3", "B3", "C4", "D4", "E4", "F4", "G4"]);

        let d = Scale::new(p("D4"), Mode::Dorian).unwrap();
        assert!(d.contains(&p("B2")));
        assert!(!d.contains(&p("Bb2")));
        assert_eq!(Mode::from_name("Harmonic Minor"), Some(Mode::HarmonicMinor));
    }

    #[test]
    fn test_unspellable_scale() {
        // the leading tone of G## major would be F###
        let err = Scale::major(p("G##4")).unwrap_err();
        assert!(matches!(err, VoiceLeadingError::InvalidScale(_)));
        assert!(Scale::new(p("G#4"), Mode::HarmonicMinor).is_ok());
    }

    #[test]
    fn test_degree_lookup() {
        let c = Scale::major(p("C4")).unwrap();
        assert_eq!(c.degree_to_pitch(1).unwrap(), p("C4"));
        assert_eq!(c.degree_to_pitch(5).unwrap(), p("G4"));
        assert!(matches!(
            c.degree_to_pitch(8),
            Err(VoiceLeadingError::InvalidDegree { degree: 8, len: 7 })
        ));
        assert!(c.degree_to_pitch(0).is_err());
    }

    #[test]
    fn test_pitch_to_degree_uses_letter() {
        let c = Scale::major(p("C4")).unwrap();
        assert_eq!(
            c.pitch_to_degree_and_accidental(&p("E5")).unwrap(),
            (3, Accidental::Natural)
        );
        assert_eq!(
            c.pitch_to_degree_and_accidental(&p("F#3")).unwrap(),
            (4, Accidental::Sharp)
        );
        assert_eq!(
            c.pitch_to_degree_and_accidental(&p("Bb4")).unwrap(),
            (7, Accidental::Flat)
        );

        let e = Scale::major(p("E4")).unwrap();
        // F natural is the second degree (F#) lowered
        assert_eq!(
            e.pitch_to_degree_and_accidental(&p("F4")).unwrap(),
            (2, Accidental::Flat)
        );
        assert_eq!(
            e.pitch_to_degree_and_accidental(&p("Fbb4")).unwrap_err(),
            VoiceLeadingError::UnresolvableDegree {
                pitch: "Fbb4".to_string()
            }
        );
    }

    #[test]
    fn test_custom_table_falls_back_to_nearest() {
        // C major pentatonic has no F or B
        let penta =
            Scale::from_degrees(vec![p("C4"), p("D4"), p("E4"), p("G4"), p("A4")]).unwrap();
        assert_eq!(
            penta.pitch_to_degree_and_accidental(&p("F4")).unwrap(),
            (3, Accidental::Sharp)
        );
        assert_eq!(
            penta.pitch_to_degree_and_accidental(&p("B4")).unwrap(),
            (1, Accidental::Flat)
        );
        assert!(Scale::from_degrees(vec![]).is_err());
    }

    #[test]
    fn test_tonic_at_octave_limit() {
        // B major climbs from B into C#..A# of the next octave
        let err = Scale::major(Pitch::natural(Letter::B, i8::MAX)).unwrap_err();
        assert!(matches!(err, VoiceLeadingError::InvalidScale(_)));

        let c = Scale::major(Pitch::natural(Letter::C, i8::MAX)).unwrap();
        assert_eq!(c.degree_to_pitch(7).unwrap(), Pitch::natural(Letter::B, i8::MAX));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_checks_degrees() {
        let c = Scale::major(p("C4")).unwrap();
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(serde_json::from_str::<Scale>(&json).unwrap(), c);

        let empty = serde_json::from_str::<Scale>(r#"{"degrees":[],"mode":null}"#);
        assert!(empty.is_err());
    }
}
