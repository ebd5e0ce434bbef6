// voicelead-core/src/types/mod.rs

pub mod accidental;
pub mod config;
pub mod path;
pub mod pitch;
pub mod scale;

pub use accidental::{combine_accidentals, Accidental};
pub use config::{Strategy, VoiceLeaderConfig};
pub use path::{total_movement, RankedLeading, VoiceLeadingPath};
pub use pitch::{circular_distance, Letter, Pitch};
pub use scale::{Mode, Scale};

/// Pitches of one harmonic event in order of appearance; doublings allowed
pub type Fragment = Vec<Pitch>;
