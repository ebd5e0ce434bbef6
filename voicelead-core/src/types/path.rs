//! Voice-leading descriptions at the pitch-class level

use std::fmt;

/// Size of the octave in semitones
pub const MODULUS: u8 = 12;

/// Largest positive path; paths are reduced to (-6, 6]
pub const HALF_MODULUS: i8 = 6;

/// One voice's motion: a starting pitch class and a signed semitone offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VoiceLeadingPath {
    pub origin: u8,
    pub offset: i8,
}

impl VoiceLeadingPath {
    pub fn new(origin: u8, offset: i8) -> Self {
        VoiceLeadingPath { origin, offset }
    }

    /// Shortest path from `from` to `to`, reduced into (-6, 6]
    pub fn between(from: u8, to: u8) -> Self {
        let mut offset = (to as i16 - from as i16).rem_euclid(MODULUS as i16) as i8;
        if offset > HALF_MODULUS {
            offset -= MODULUS as i8;
        }
        VoiceLeadingPath {
            origin: from % MODULUS,
            offset,
        }
    }

    /// Pitch class this path arrives at
    pub fn destination(&self) -> u8 {
        (self.origin as i16 + self.offset as i16).rem_euclid(MODULUS as i16) as u8
    }

    pub fn size(&self) -> u32 {
        self.offset.unsigned_abs() as u32
    }
}

impl fmt::Display for VoiceLeadingPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:+}", self.origin, self.offset)
    }
}

/// Sum of absolute offsets
pub fn total_movement(paths: &[VoiceLeadingPath]) -> u32 {
    paths.iter().map(|p| p.size()).sum()
}

/// A complete voice leading together with its size
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RankedLeading {
    pub paths: Vec<VoiceLeadingPath>,
    pub cost: u32,
}
