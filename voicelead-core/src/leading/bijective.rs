//! Minimal bijective voice leadings between pitch-class multisets
//!
//! Each of the N cyclic rotations of the second chord is paired voice by voice
//! with the first chord. The rotation with the smallest total movement wins;
//! on equal totals the rotation examined last wins, so for an already-sorted
//! pair of chords the unrotated pairing is preferred over its equals.

use crate::error::{Result, VoiceLeadingError};
use crate::types::path::{total_movement, RankedLeading, VoiceLeadingPath, MODULUS};

/// The outcome of one bijective match.
///
/// `ranked` holds every rotation sorted by cost (stable, so equal costs keep
/// rotation order) when ranking was requested, and is empty otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BijectiveMatch {
    pub best: Vec<VoiceLeadingPath>,
    pub cost: u32,
    pub ranked: Vec<RankedLeading>,
}

impl BijectiveMatch {
    /// The `n` cheapest leadings, or just the best one when unranked
    pub fn top(&self, n: usize) -> Vec<&[VoiceLeadingPath]> {
        if self.ranked.is_empty() {
            return vec![self.best.as_slice()];
        }
        self.ranked
            .iter()
            .take(n.max(1))
            .map(|r| r.paths.as_slice())
            .collect()
    }
}

/// Find the cheapest one-to-one leading from `first` to some rotation of
/// `second`. Both inputs are pitch classes; they are not re-sorted.
pub fn bijective_match(first: &[u8], second: &[u8], rank: bool) -> Result<BijectiveMatch> {
    if first.len() != second.len() || first.is_empty() {
        return Err(VoiceLeadingError::ArityMismatch {
            first: first.len(),
            second: second.len(),
        });
    }

    let mut rotated: Vec<u8> = second.iter().map(|pc| pc % MODULUS).collect();
    let mut all = Vec::with_capacity(if rank { first.len() } else { 0 });
    let mut best = Vec::new();
    let mut best_cost = u32::MAX;

    for _ in 0..first.len() {
        rotated.rotate_right(1);
        let paths: Vec<VoiceLeadingPath> = first
            .iter()
            .zip(&rotated)
            .map(|(&from, &to)| VoiceLeadingPath::between(from, to))
            .collect();
        let cost = total_movement(&paths);

        if cost <= best_cost {
            best_cost = cost;
            best = paths.clone();
        }
        if rank {
            all.push(RankedLeading { paths, cost });
        }
    }

    all.sort_by_key(|r| r.cost);

    Ok(BijectiveMatch {
        best,
        cost: best_cost,
        ranked: all,
    })
}

/// Best bijective leading when `target` has fewer distinct pitch classes than
/// `source` has voices: every way of doubling target pitch classes up to the
/// source's size is tried (each target pitch class at least once).
///
/// The first doubling found with the minimal cost wins.
pub fn best_doubled_match(source: &[u8], target: &[u8]) -> Result<BijectiveMatch> {
    let mut distinct: Vec<u8> = target.iter().map(|pc| pc % MODULUS).collect();
    distinct.sort_unstable();
    distinct.dedup();

    if source.is_empty() || distinct.is_empty() {
        return Err(VoiceLeadingError::EmptyChord);
    }
    if distinct.len() > source.len() {
        return Err(VoiceLeadingError::ArityMismatch {
            first: source.len(),
            second: distinct.len(),
        });
    }

    let mut sorted_source: Vec<u8> = source.iter().map(|pc| pc % MODULUS).collect();
    sorted_source.sort_unstable();

    let mut best: Option<BijectiveMatch> = None;
    for doubled in doublings(&distinct, source.len()) {
        let candidate = bijective_match(&sorted_source, &doubled, false)?;
        if best.as_ref().map_or(true, |b| candidate.cost < b.cost) {
            best = Some(candidate);
        }
    }

    best.ok_or(VoiceLeadingError::EmptyChord)
}

/// Sorted multisets of `size` elements drawn from `distinct` that use every
/// element at least once.
fn doublings(distinct: &[u8], size: usize) -> Vec<Vec<u8>> {
    let extra = size - distinct.len();
    let mut out = Vec::new();
    let mut picks = Vec::with_capacity(extra);
    extend_doublings(distinct, extra, 0, &mut picks, &mut out);
    out
}

fn extend_doublings(
    distinct: &[u8],
    remaining: usize,
    start: usize,
    picks: &mut Vec<u8>,
    out: &mut Vec<Vec<u8>>,
) {
    if remaining == 0 {
        let mut chord: Vec<u8> = distinct.iter().chain(picks.iter()).copied().collect();
        chord.sort_unstable();
        out.push(chord);
        return;
    }
    for i in start..distinct.len() {
        picks.push(distinct[i]);
        extend_doublings(distinct, remaining - 1, i, picks, out);
        picks.pop();
    }
}
