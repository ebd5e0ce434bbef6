//! Greedy cost-tier assignment
//!
//! Every source pitch is paired with every transposed target pitch, each
//! target also tried a number of octaves up and down. Voices are then
//! committed in input order, cheapest tier first, steering away from the
//! pitch the previous voice just took.

use crate::error::{Result, VoiceLeadingError};
use crate::types::{Fragment, Pitch};
use log::{trace, warn};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeMap;

/// Distances from each distinct source pitch to its candidate targets,
/// grouped by distance
#[derive(Debug, Clone, Default)]
pub struct CostMatrix {
    tiers: BTreeMap<u32, Vec<(Pitch, Pitch)>>,
}

impl CostMatrix {
    /// Candidates are each target as given, then `octave_span` octaves below
    /// and above it, nearest octaves first.
    pub fn build(sources: &[Pitch], targets: &[Pitch], octave_span: i8) -> Self {
        let mut shifts = vec![0i8];
        for k in 1..=octave_span.max(0) {
            shifts.push(-k);
            shifts.push(k);
        }

        let mut matrix = CostMatrix::default();
        let mut seen: Vec<(Pitch, Pitch)> = Vec::new();
        for source in sources {
            for target in targets {
                for &shift in &shifts {
                    let Some(candidate) = target.transpose_octaves(shift) else {
                        continue;
                    };
                    if seen.contains(&(*source, candidate)) {
                        continue;
                    }
                    seen.push((*source, candidate));
                    matrix
                        .tiers
                        .entry(source.midi().abs_diff(candidate.midi()))
                        .or_default()
                        .push((*source, candidate));
                }
            }
        }
        matrix
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    pub fn max_cost(&self) -> Option<u32> {
        self.tiers.keys().next_back().copied()
    }

    pub fn cost(&self, source: &Pitch, target: &Pitch) -> Option<u32> {
        self.tiers.iter().find_map(|(&cost, entries)| {
            entries
                .iter()
                .any(|(s, t)| s == source && t == target)
                .then_some(cost)
        })
    }

    /// Non-empty tiers for one source pitch, cheapest first
    pub fn tiers_for<'a>(
        &'a self,
        source: &'a Pitch,
    ) -> impl Iterator<Item = (u32, Vec<Pitch>)> + 'a {
        self.tiers.iter().filter_map(move |(&cost, entries)| {
            let candidates: Vec<Pitch> = entries
                .iter()
                .filter(|(s, _)| s == source)
                .map(|&(_, t)| t)
                .collect();
            (!candidates.is_empty()).then_some((cost, candidates))
        })
    }
}

/// Assign a target to every voice of `fragment`.
///
/// A source pitch that occurs more than once is assigned once; later
/// occurrences repeat that choice. Different source pitches may land on the
/// same target.
pub fn greedy_assign<R>(
    fragment: &[Pitch],
    targets: &[Pitch],
    octave_span: i8,
    rng: &mut R,
) -> Result<Fragment>
where
    R: Rng + ?Sized,
{
    let matrix = CostMatrix::build(fragment, targets, octave_span);
    let mut assigned: Vec<(Pitch, Pitch)> = Vec::new();
    let mut previous: Option<Pitch> = None;
    let mut output = Vec::with_capacity(fragment.len());

    for (voice, source) in fragment.iter().enumerate() {
        if let Some(&(_, target)) = assigned.iter().find(|(s, _)| s == source) {
            output.push(target);
            continue;
        }

        let target = choose(&matrix, source, previous, rng)
            .ok_or(VoiceLeadingError::NoFeasibleAssignment { voice })?;
        trace!("voice {}: {} -> {}", voice, source, target);

        assigned.push((*source, target));
        previous = Some(target);
        output.push(target);
    }
    Ok(output)
}

/// Pick a target for `source`, cheapest tier first.
///
/// Within a tier, candidates sounding at the previous output are dropped
/// (unless nothing else is left) and the choice is made at random among those
/// nearest to the previous output.
fn choose<R>(matrix: &CostMatrix, source: &Pitch, previous: Option<Pitch>, rng: &mut R) -> Option<Pitch>
where
    R: Rng + ?Sized,
{
    let mut skipped: Option<Pitch> = None;

    for (cost, candidates) in matrix.tiers_for(source) {
        let pick = match previous {
            None => candidates.choose(rng).copied(),
            Some(prev) => {
                let mut by_distance: BTreeMap<u32, Vec<Pitch>> = BTreeMap::new();
                for candidate in candidates {
                    by_distance
                        .entry(prev.midi().abs_diff(candidate.midi()))
                        .or_default()
                        .push(candidate);
                }
                if by_distance.len() > 1 {
                    by_distance.remove(&0);
                }
                by_distance
                    .values()
                    .next()
                    .and_then(|closest| closest.choose(rng).copied())
            }
        };

        let Some(pick) = pick else { continue };
        if previous.is_some_and(|prev| prev.sounds_like(&pick)) {
            trace!("{} repeats the previous pitch at cost {}", pick, cost);
            skipped.get_or_insert(pick);
            continue;
        }
        return Some(pick);
    }

    if let Some(pick) = skipped {
        warn!("no alternative to repeating {} for {}", pick, source);
    }
    skipped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Letter;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn p(s: &str) -> Pitch {
        s.parse().unwrap()
    }

    fn pitches(names: &[&str]) -> Vec<Pitch> {
        names.iter().map(|n| p(n)).collect()
    }

    #[test]
    fn test_matrix_expands_octaves() {
        let matrix = CostMatrix::build(&[p("C4")], &[p("F4")], 1);
        assert_eq!(matrix.cost(&p("C4"), &p("F4")), Some(5));
        assert_eq!(matrix.cost(&p("C4"), &p("F3")), Some(7));
        assert_eq!(matrix.cost(&p("C4"), &p("F5")), Some(17));
        assert_eq!(matrix.cost(&p("C4"), &p("F2")), None);
        assert_eq!(matrix.max_cost(), Some(17));

        let tiers: Vec<u32> = matrix.tiers_for(&p("C4")).map(|(c, _)| c).collect();
        assert_eq!(tiers, vec![5, 7, 17]);
    }

    #[test]
    fn test_matrix_without_span() {
        let matrix = CostMatrix::build(&[p("C4"), p("E4")], &[p("F4")], 0);
        assert_eq!(matrix.cost(&p("E4"), &p("F4")), Some(1));
        assert_eq!(matrix.cost(&p("E4"), &p("F3")), None);
        assert!(CostMatrix::build(&[p("C4")], &[], 1).is_empty());
    }

    #[test]
    fn test_c_major_to_f_major() {
        for seed in 0..10 {
            let mut rng = StdRng::seed_from_u64(seed);
            let result = greedy_assign(
                &pitches(&["C4", "E4", "G4"]),
                &pitches(&["F4", "A4", "C5"]),
                1,
                &mut rng,
            )
            .unwrap();
            assert_eq!(result, pitches(&["C4", "F4", "A4"]));
        }
    }

    #[test]
    fn test_avoids_repeating_previous_pitch() {
        // B#3 sounds like C4; the C4 tier is skipped for an octave leap
        for seed in 0..10 {
            let mut rng = StdRng::seed_from_u64(seed);
            let result =
                greedy_assign(&pitches(&["C4", "B#3"]), &pitches(&["C4"]), 1, &mut rng).unwrap();
            assert_eq!(result[0], p("C4"));
            assert!(result[1] == p("C3") || result[1] == p("C5"), "{:?}", result);
        }
    }

    #[test]
    fn test_drops_repeat_within_tier() {
        // D4 and F#4 are both a whole tone from E4; D4 was just played
        for seed in 0..32 {
            let mut rng = StdRng::seed_from_u64(seed);
            let result =
                greedy_assign(&pitches(&["D4", "E4"]), &pitches(&["D4", "F#4"]), 1, &mut rng)
                    .unwrap();
            assert_eq!(result, pitches(&["D4", "F#4"]), "seed {}", seed);
        }
    }

    #[test]
    fn test_tie_goes_to_nearest_previous() {
        // D4 and F#4 tie for E4; D4 sits closer to the C4 before it
        for seed in 0..64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let result = greedy_assign(
                &pitches(&["C4", "E4"]),
                &pitches(&["C4", "D4", "F#4"]),
                1,
                &mut rng,
            )
            .unwrap();
            assert_eq!(result, pitches(&["C4", "D4"]), "seed {}", seed);
        }
    }

    #[test]
    fn test_skips_octaves_past_the_top() {
        let top = Pitch::natural(Letter::C, i8::MAX);
        let matrix = CostMatrix::build(&[top], &[top], 1);
        let tiers: Vec<u32> = matrix.tiers_for(&top).map(|(c, _)| c).collect();
        assert_eq!(tiers, vec![0, 12]);

        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(greedy_assign(&[top], &[top], 1, &mut rng).unwrap(), vec![top]);
    }

    #[test]
    fn test_accepts_repeat_when_nothing_else_fits() {
        let mut rng = StdRng::seed_from_u64(3);
        let result =
            greedy_assign(&pitches(&["C4", "B#3"]), &pitches(&["C4"]), 0, &mut rng).unwrap();
        assert_eq!(result, pitches(&["C4", "C4"]));
    }

    #[test]
    fn test_doubled_source_reuses_assignment() {
        let mut rng = StdRng::seed_from_u64(7);
        let result = greedy_assign(
            &pitches(&["E4", "G4", "E4"]),
            &pitches(&["F4", "A4"]),
            1,
            &mut rng,
        )
        .unwrap();
        assert_eq!(result[0], p("F4"));
        assert_eq!(result[2], result[0]);
    }

    #[test]
    fn test_no_candidates() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            greedy_assign(&[p("C4")], &[], 1, &mut rng).unwrap_err(),
            VoiceLeadingError::NoFeasibleAssignment { voice: 0 }
        );
        assert!(greedy_assign(&[], &[], 1, &mut rng).unwrap().is_empty());
    }
}
