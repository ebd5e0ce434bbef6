//! Error types for the voice-leading engine
//!
//! Every failure is reported synchronously as a typed variant. Nothing is
//! recovered locally; callers decide whether to abort or substitute a fallback.

use thiserror::Error;

/// Failures raised by the matcher, aligner, projector and dispatcher
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VoiceLeadingError {
    /// Bijective matching was requested on sequences of different length
    #[error("bijective voice leading needs equal-sized chords (got {first} and {second} voices)")]
    ArityMismatch { first: usize, second: usize },

    /// A chord was empty after deduplication
    #[error("cannot voice-lead an empty chord")]
    EmptyChord,

    /// A pitch cannot be expressed as a degree of the scale
    #[error("pitch {pitch} cannot be resolved to a scale degree")]
    UnresolvableDegree { pitch: String },

    /// Greedy assignment found no candidate at any cost tier
    #[error("no feasible target pitch for voice {voice}")]
    NoFeasibleAssignment { voice: usize },

    /// Degree outside `1..=len` of the scale
    #[error("scale degree {degree} is out of range (scale has {len} degrees)")]
    InvalidDegree { degree: usize, len: usize },

    #[error("invalid pitch name: {0}")]
    InvalidPitch(String),

    #[error("invalid scale: {0}")]
    InvalidScale(String),

    #[error("unknown voice-leading strategy: {0}")]
    InvalidStrategy(String),
}

pub type Result<T> = std::result::Result<T, VoiceLeadingError>;
