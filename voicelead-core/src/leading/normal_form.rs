//! Transposition- and rotation-invariant form of a voice leading
//!
//! Two voice leadings that differ only by transposing every voice, or by the
//! order their voices are listed in, share one normal form. The form is found
//! by left-packing: every rotation of the sorted origins is transposed to
//! start at 0 and the candidate whose origins are smallest, compared from the
//! last voice backwards, wins.

use crate::types::path::{VoiceLeadingPath, MODULUS};

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NormalForm {
    pub paths: Vec<VoiceLeadingPath>,
    /// Semitones added (mod 12) to every origin to reach `paths`
    pub transposition: u8,
}

pub fn canonicalize(paths: &[VoiceLeadingPath]) -> NormalForm {
    let mut sorted: Vec<VoiceLeadingPath> = paths
        .iter()
        .map(|p| VoiceLeadingPath::new(p.origin % MODULUS, p.offset))
        .collect();
    sorted.sort();

    let Some(first) = sorted.first() else {
        return NormalForm {
            paths: Vec::new(),
            transposition: 0,
        };
    };

    let mut best_transposition = (MODULUS - first.origin) % MODULUS;
    let mut best = transpose(&sorted, best_transposition);

    for shift in 1..sorted.len() {
        let mut rotated = sorted.clone();
        rotated.rotate_right(shift);
        let transposition = (MODULUS - rotated[0].origin) % MODULUS;
        let mut candidate = transpose(&rotated, transposition);
        candidate.sort();

        if packs_tighter(&candidate, &best) {
            best = candidate;
            best_transposition = transposition;
        }
    }

    NormalForm {
        paths: best,
        transposition: best_transposition,
    }
}

fn transpose(paths: &[VoiceLeadingPath], amount: u8) -> Vec<VoiceLeadingPath> {
    paths
        .iter()
        .map(|p| VoiceLeadingPath::new((p.origin + amount) % MODULUS, p.offset))
        .collect()
}

/// Whether the first origin that differs, scanning from the last voice,
/// is smaller in `candidate`
fn packs_tighter(candidate: &[VoiceLeadingPath], current: &[VoiceLeadingPath]) -> bool {
    for (c, b) in candidate.iter().zip(current).rev() {
        if c.origin != b.origin {
            return c.origin < b.origin;
        }
    }
    false
}
