//! # Voicelead
//!
//! Voicelead re-voices musical fragments when the harmony under them changes.
//! A fragment written against one scale is modally transposed into another
//! and its voices are reassigned so the parts move as little as possible.
//!
//! The engine itself lives in `voicelead-core`; this crate re-exports it and
//! adds the caller-facing pieces around it.
//!
//! ## Modules
//!
//! - `types`: Movement analysis of a realized transition (common tones,
//!   per-voice motion, parallels, repeated pitches) with colored terminal
//!   output, and progressions that carry one fragment through a series of
//!   scales.

pub mod types;

// Re-export the engine and commonly used types for convenience
pub use voicelead_core;
pub use voicelead_core::{
    Accidental, Fragment, Mode, Pitch, Scale, Strategy, VoiceLeader, VoiceLeaderConfig,
    VoiceLeadingError,
};
pub use crate::types::{Progression, ProgressionStep, VoiceLeading};
