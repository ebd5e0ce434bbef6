//! # Voicelead Core
//!
//! Voice-leading engine: moves the pitches of a fragment from one harmonic
//! context into another with as little melodic motion as possible.
//! No terminal or audio dependencies; compiles to WASM.
//!
//! ## Features
//!
//! - **serde**: Serialize/Deserialize for the pitch, scale and result types
//! - **wasm**: Enable WASM bindings via wasm-bindgen
//!
//! ## Example
//!
//! ```ignore
//! use voicelead_core::{Scale, Strategy, VoiceLeader};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let from = Scale::major("C4".parse()?)?;
//! let to = Scale::major("F4".parse()?)?;
//! let fragment = vec!["C4".parse()?, "E4".parse()?, "G4".parse()?];
//!
//! let leader = VoiceLeader::with_strategy(Strategy::Greedy);
//! let revoiced = leader.calculate(&fragment, &from, &to, &mut StdRng::seed_from_u64(7))?;
//! // [C4, F4, A4]
//! ```

pub mod error;
pub mod leading;
pub mod types;
pub mod wasm;

pub use error::{Result, VoiceLeadingError};
pub use leading::{
    align_pitches, best_doubled_match, bijective_match, canonicalize, non_bijective_align,
    project_voice_leading, Alignment, BijectiveMatch, NormalForm, VoiceLeader,
};
pub use types::{
    combine_accidentals, total_movement, Accidental, Fragment, Letter, Mode, Pitch,
    RankedLeading, Scale, Strategy, VoiceLeaderConfig, VoiceLeadingPath,
};

pub use wasm::{revoice_fragment, RevoiceRequest, RevoiceResponse};
