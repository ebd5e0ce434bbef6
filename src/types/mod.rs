// src/types/mod.rs

pub mod progression;
pub mod voice_leading;

pub use progression::{Progression, ProgressionStep};
pub use voice_leading::{VoiceLeading, VoiceLeadingViolation, VoiceMovement};
