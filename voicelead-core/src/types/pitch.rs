use crate::error::{Result, VoiceLeadingError};
use crate::types::accidental::Accidental;
use log::debug;
use std::fmt;
use std::ops::Sub;
use std::str::FromStr;

/// Diatonic letter name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Letter {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Letter {
    pub const ALL: [Letter; 7] = [
        Letter::C,
        Letter::D,
        Letter::E,
        Letter::F,
        Letter::G,
        Letter::A,
        Letter::B,
    ];

    /// Position within C D E F G A B (0-6)
    pub fn index(self) -> u8 {
        match self {
            Letter::C => 0,
            Letter::D => 1,
            Letter::E => 2,
            Letter::F => 3,
            Letter::G => 4,
            Letter::A => 5,
            Letter::B => 6,
        }
    }

    /// Pitch class of the unaltered letter (C=0 ... B=11)
    pub fn natural_pitch_class(self) -> u8 {
        match self {
            Letter::C => 0,
            Letter::D => 2,
            Letter::E => 4,
            Letter::F => 5,
            Letter::G => 7,
            Letter::A => 9,
            Letter::B => 11,
        }
    }

    /// Move `steps` letters up (or down when negative).
    ///
    /// Returns the new letter and the octave carry: stepping from B up to C
    /// carries +1, from C down to B carries -1.
    pub fn step(self, steps: i32) -> (Letter, i8) {
        let raw = self.index() as i32 + steps;
        let letter = Self::ALL[raw.rem_euclid(7) as usize];
        (letter, raw.div_euclid(7) as i8)
    }

    pub fn from_char(c: char) -> Option<Letter> {
        match c.to_ascii_uppercase() {
            'C' => Some(Letter::C),
            'D' => Some(Letter::D),
            'E' => Some(Letter::E),
            'F' => Some(Letter::F),
            'G' => Some(Letter::G),
            'A' => Some(Letter::A),
            'B' => Some(Letter::B),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Letter::C => "C",
            Letter::D => "D",
            Letter::E => "E",
            Letter::F => "F",
            Letter::G => "G",
            Letter::A => "A",
            Letter::B => "B",
        }
    }
}

/// A spelled pitch: letter, accidental and octave.
///
/// The octave is attached to the letter (scientific pitch notation), so B#3
/// sounds as C4 and Cb4 sounds as B3. Derived equality compares spelling;
/// use `sounds_like` for enharmonic equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pitch {
    letter: Letter,
    accidental: Accidental,
    octave: i8,
}

impl Pitch {
    /// Octave range accepted by the parser (C-1 is MIDI 0)
    pub const MIN_OCTAVE: i8 = -1;
    pub const MAX_OCTAVE: i8 = 9;

    pub fn new(letter: Letter, accidental: Accidental, octave: i8) -> Self {
        Pitch {
            letter,
            accidental,
            octave,
        }
    }

    pub fn natural(letter: Letter, octave: i8) -> Self {
        Self::new(letter, Accidental::Natural, octave)
    }

    pub fn letter(&self) -> Letter {
        self.letter
    }

    pub fn accidental(&self) -> Accidental {
        self.accidental
    }

    pub fn octave(&self) -> i8 {
        self.octave
    }

    /// MIDI-style sounding value (C4 = 60)
    pub fn midi(&self) -> i32 {
        (self.octave as i32 + 1) * 12
            + self.letter.natural_pitch_class() as i32
            + self.accidental.semitones() as i32
    }

    /// Sounding pitch class (0-11)
    pub fn pitch_class(&self) -> u8 {
        self.midi().rem_euclid(12) as u8
    }

    /// Enharmonic equality: same pitch class in the same sounding octave
    pub fn sounds_like(&self, other: &Pitch) -> bool {
        self.midi() == other.midi()
    }

    /// Same spelling, moved by whole octaves. `None` if the octave number
    /// overflows.
    pub fn transpose_octaves(self, octaves: i8) -> Option<Pitch> {
        let octave = self.octave.checked_add(octaves)?;
        Some(Pitch { octave, ..self })
    }

    /// Same spelling, re-octaved so that it sounds at `midi`.
    ///
    /// Only meaningful when `midi` has this pitch's pitch class.
    pub fn with_midi(self, midi: i32) -> Option<Pitch> {
        debug_assert_eq!((midi - self.midi()).rem_euclid(12), 0);
        let octaves = i8::try_from((midi - self.midi()).div_euclid(12)).ok()?;
        self.transpose_octaves(octaves)
    }

    /// Same letter and accidental in another octave
    pub fn with_octave(self, octave: i8) -> Pitch {
        Pitch { octave, ..self }
    }

    /// Circular semitone distance between the unaltered letters of two
    /// pitches (C to B is 1, C to F# is 5)
    pub fn letter_distance(&self, other: &Pitch) -> u8 {
        circular_distance(
            self.letter.natural_pitch_class(),
            other.letter.natural_pitch_class(),
        )
    }

    /// Add a chromatic alteration on top of the current spelling.
    ///
    /// When the combined alteration fits in double-flat..double-sharp the
    /// letter is kept. Otherwise the letter moves one diatonic step at a time
    /// in the direction of the alteration until the remainder fits, so
    /// A-triple-sharp becomes B# and C-triple-flat becomes Bbb an octave
    /// lower. The sounding pitch never changes; if no spelling fits the
    /// octave range the pitch is returned unaltered.
    pub fn add_accidental(self, added: Accidental) -> Pitch {
        if let Some(accidental) = self.accidental.combine(added) {
            return Pitch { accidental, ..self };
        }

        let target = self.midi() + added.semitones() as i32;
        let direction = (self.accidental.semitones() + added.semitones()).signum() as i32;

        // each step covers one or two semitones, so four steps always suffice
        let respelled = (1..=4).find_map(|steps| {
            let (letter, carry) = self.letter.step(direction * steps);
            let natural = Pitch::natural(letter, self.octave.checked_add(carry)?);
            let residual = i8::try_from(target - natural.midi()).ok()?;
            Accidental::from_semitones(residual)
                .map(|accidental| Pitch { accidental, ..natural })
        });

        match respelled {
            Some(pitch) => {
                debug!("re-spelled {} plus {:?} as {}", self, added, pitch);
                pitch
            }
            None => self,
        }
    }
}

/// Shortest distance between two pitch classes around the octave (0-6)
pub fn circular_distance(a: u8, b: u8) -> u8 {
    let up = (b as i16 - a as i16).rem_euclid(12) as u8;
    up.min(12 - up)
}

impl FromStr for Pitch {
    type Err = VoiceLeadingError;

    /// Parse a single pitch name such as `C`, `F#4`, `Bb3`, `Ebb5` or `Fx2`.
    /// The octave defaults to 4 and must lie in `MIN_OCTAVE..=MAX_OCTAVE`.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let mut chars = s.char_indices().peekable();

        let letter = chars
            .next()
            .and_then(|(_, c)| Letter::from_char(c))
            .ok_or_else(|| VoiceLeadingError::InvalidPitch(s.to_string()))?;

        let mut alteration: i8 = 0;
        let mut octave_start = s.len();
        while let Some(&(idx, c)) = chars.peek() {
            match c {
                '#' => alteration += 1,
                'x' => alteration += 2,
                'b' => alteration -= 1,
                _ => {
                    octave_start = idx;
                    break;
                }
            }
            chars.next();
        }

        let accidental = Accidental::from_semitones(alteration)
            .ok_or_else(|| VoiceLeadingError::InvalidPitch(s.to_string()))?;

        let octave_part = &s[octave_start..];
        let octave = if octave_part.is_empty() {
            4
        } else {
            octave_part
                .parse::<i8>()
                .ok()
                .filter(|o| (Self::MIN_OCTAVE..=Self::MAX_OCTAVE).contains(o))
                .ok_or_else(|| VoiceLeadingError::InvalidPitch(s.to_string()))?
        };

        Ok(Pitch::new(letter, accidental, octave))
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.letter.name(), self.accidental, self.octave)
    }
}

// Signed semitone interval between two pitches
impl Sub<Pitch> for Pitch {
    type Output = i32;

    fn sub(self, other: Pitch) -> Self::Output {
        self.midi() - other.midi()
    }
}
