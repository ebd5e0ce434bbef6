// voicelead-core/src/leading/mod.rs

pub mod bijective;
pub mod greedy;
pub mod nonbijective;
pub mod normal_form;
pub mod projector;
pub mod strategy;

pub use bijective::{best_doubled_match, bijective_match, BijectiveMatch};
pub use greedy::{greedy_assign, CostMatrix};
pub use nonbijective::{align_pitches, non_bijective_align, Alignment, PitchAlignment};
pub use normal_form::{canonicalize, NormalForm};
pub use projector::project_voice_leading;
pub use strategy::{naive_assign, VoiceLeader};
