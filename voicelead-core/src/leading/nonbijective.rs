//! Non-bijective voice leadings, where voices may be doubled
//!
//! Alignment of two sorted chords is a monotone path through a grid of
//! distances, rows indexed by target notes and columns by source notes. For
//! pitch classes each chord is extended by its own first note so the path can
//! wrap around the octave, and every rotation of the target is tried.

use crate::error::{Result, VoiceLeadingError};
use crate::types::path::MODULUS;
use crate::types::pitch::circular_distance;
use log::trace;

/// A many-to-many correspondence as (source, target) pairs, in path order
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Alignment {
    pub cost: u32,
    pub pairs: Vec<(u8, u8)>,
}

/// Row-major distance grid with its accumulated costs
#[derive(Debug, Clone)]
struct Grid {
    rows: usize,
    cols: usize,
    local: Vec<u32>,
    total: Vec<u32>,
}

impl Grid {
    fn build<F>(rows: usize, cols: usize, distance: F) -> Self
    where
        F: Fn(usize, usize) -> u32,
    {
        let mut local = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            for j in 0..cols {
                local.push(distance(i, j));
            }
        }

        let mut total = local.clone();
        for j in 1..cols {
            total[j] += total[j - 1];
        }
        for i in 1..rows {
            total[i * cols] += total[(i - 1) * cols];
        }
        for i in 1..rows {
            for j in 1..cols {
                let up = total[(i - 1) * cols + j];
                let left = total[i * cols + j - 1];
                let diag = total[(i - 1) * cols + j - 1];
                total[i * cols + j] += up.min(left).min(diag);
            }
        }

        Grid {
            rows,
            cols,
            local,
            total,
        }
    }

    fn total_at(&self, i: usize, j: usize) -> u32 {
        self.total[i * self.cols + j]
    }

    fn last(&self) -> (usize, usize) {
        (self.rows - 1, self.cols - 1)
    }

    /// Accumulated cost at the corner minus the corner's own distance
    fn wrapped_cost(&self) -> u32 {
        let (i, j) = self.last();
        self.total_at(i, j) - self.local[i * self.cols + j]
    }

    fn full_cost(&self) -> u32 {
        let (i, j) = self.last();
        self.total_at(i, j)
    }

    /// Walk back from the corner to the origin, returning (row, col) cells in
    /// forward order. The diagonal is preferred; a vertical or horizontal step
    /// only wins when strictly cheaper.
    fn backtrace(&self) -> Vec<(usize, usize)> {
        let (mut i, mut j) = self.last();
        let mut cells = vec![(i, j)];
        while i > 0 || j > 0 {
            if i > 0 && j > 0 {
                let (mut next_i, mut next_j) = (i - 1, j - 1);
                let mut cheapest = self.total_at(i - 1, j - 1);
                if self.total_at(i - 1, j) < cheapest {
                    cheapest = self.total_at(i - 1, j);
                    next_j = j;
                }
                if self.total_at(i, j - 1) < cheapest {
                    next_i = i;
                    next_j = j - 1;
                }
                i = next_i;
                j = next_j;
            } else if i > 0 {
                i -= 1;
            } else {
                j -= 1;
            }
            cells.push((i, j));
        }
        cells.reverse();
        cells
    }
}

fn sorted_set(values: &[u8]) -> Vec<u8> {
    let mut set: Vec<u8> = values.iter().map(|v| v % MODULUS).collect();
    set.sort_unstable();
    set.dedup();
    set
}

/// Cheapest voice leading between two pitch-class sets of any sizes,
/// allowing doublings in either direction.
///
/// Inputs are reduced mod 12, deduplicated and sorted. Each rotation of the
/// target is aligned against the source; the first strictly cheapest
/// rotation wins. The wraparound anchor pair is not part of the result.
pub fn non_bijective_align(source: &[u8], target: &[u8]) -> Result<Alignment> {
    let source = sorted_set(source);
    let target = sorted_set(target);
    if source.is_empty() || target.is_empty() {
        return Err(VoiceLeadingError::EmptyChord);
    }

    let mut extended_source = source.clone();
    extended_source.push(source[0]);

    let mut best: Option<(u32, Vec<(u8, u8)>)> = None;
    for shift in 0..target.len() {
        let mut rotated = target.clone();
        rotated.rotate_left(shift);
        rotated.push(rotated[0]);

        let grid = Grid::build(rotated.len(), extended_source.len(), |i, j| {
            circular_distance(rotated[i], extended_source[j]) as u32
        });
        let cost = grid.wrapped_cost();
        trace!("target rotation {} aligns at cost {}", shift, cost);

        if best.as_ref().map_or(true, |(c, _)| cost < *c) {
            let pairs = grid
                .backtrace()
                .into_iter()
                .map(|(i, j)| (extended_source[j], rotated[i]))
                .collect();
            best = Some((cost, pairs));
        }
    }

    let (cost, mut pairs) = best.ok_or(VoiceLeadingError::EmptyChord)?;
    pairs.pop();
    Ok(Alignment { cost, pairs })
}

/// A register alignment as (source, target) MIDI pairs
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PitchAlignment {
    pub cost: u32,
    pub pairs: Vec<(i32, i32)>,
}

/// Register alignment of two pitch sets given as MIDI values.
///
/// No rotation and no wraparound; distance is the absolute interval and the
/// cost is the whole accumulated path.
pub fn align_pitches(source: &[i32], target: &[i32]) -> Result<PitchAlignment> {
    let mut source = source.to_vec();
    source.sort_unstable();
    source.dedup();
    let mut target = target.to_vec();
    target.sort_unstable();
    target.dedup();
    if source.is_empty() || target.is_empty() {
        return Err(VoiceLeadingError::EmptyChord);
    }

    let grid = Grid::build(target.len(), source.len(), |i, j| {
        target[i].abs_diff(source[j])
    });
    let pairs = grid
        .backtrace()
        .into_iter()
        .map(|(i, j)| (source[j], target[i]))
        .collect();
    Ok(PitchAlignment {
        cost: grid.full_cost(),
        pairs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leading::bijective::best_doubled_match;

    #[test]
    fn test_seventh_to_triad() {
        let a = non_bijective_align(&[0, 4, 7, 11], &[0, 4, 7]).unwrap();
        assert_eq!(a.cost, 1);
        assert_eq!(a.pairs, vec![(0, 0), (4, 4), (7, 7), (11, 0)]);
    }

    #[test]
    fn test_not_worse_than_doubled_bijective() {
        let a = non_bijective_align(&[0, 4, 7, 11], &[0, 4, 7]).unwrap();
        let b = best_doubled_match(&[0, 4, 7, 11], &[0, 4, 7]).unwrap();
        assert!(a.cost <= b.cost);
    }

    #[test]
    fn test_equal_sizes() {
        let a = non_bijective_align(&[0, 4, 7], &[5, 9, 0]).unwrap();
        assert_eq!(a.cost, 3);
        assert_eq!(a.pairs, vec![(0, 0), (4, 5), (7, 9)]);
    }

    #[test]
    fn test_doubling_beats_bijective() {
        let a = non_bijective_align(&[0, 4, 7, 11], &[4, 8, 11, 3]).unwrap();
        assert_eq!(a.cost, 3);
        assert_eq!(a.pairs, vec![(0, 11), (4, 3), (4, 4), (7, 8), (11, 11)]);
    }

    #[test]
    fn test_inputs_are_deduplicated() {
        let a = non_bijective_align(&[0, 12, 4, 16, 7], &[7, 0, 4, 4]).unwrap();
        assert_eq!(a.cost, 0);
        assert_eq!(a.pairs, vec![(0, 0), (4, 4), (7, 7)]);
    }

    #[test]
    fn test_empty_chord() {
        assert_eq!(
            non_bijective_align(&[], &[0, 4, 7]).unwrap_err(),
            VoiceLeadingError::EmptyChord
        );
        assert_eq!(
            align_pitches(&[60], &[]).unwrap_err(),
            VoiceLeadingError::EmptyChord
        );
    }

    #[test]
    fn test_grid_accumulation() {
        // distances 1 2 / 3 4
        let grid = Grid::build(2, 2, |i, j| (i * 2 + j + 1) as u32);
        assert_eq!(grid.total, vec![1, 3, 4, 5]);
        assert_eq!(grid.wrapped_cost(), 1);
        assert_eq!(grid.full_cost(), 5);
        assert_eq!(grid.backtrace(), vec![(0, 0), (1, 1)]);
    }

    #[test]
    fn test_backtrace_single_row() {
        let grid = Grid::build(1, 3, |_, j| j as u32);
        assert_eq!(grid.backtrace(), vec![(0, 0), (0, 1), (0, 2)]);
    }

    #[test]
    fn test_register_alignment() {
        // C4 E4 G4 to B3 E4 G4: the C moves down a semitone
        let a = align_pitches(&[67, 60, 64], &[59, 64, 67]).unwrap();
        assert_eq!(a.cost, 1);
        assert_eq!(a.pairs, vec![(60, 59), (64, 64), (67, 67)]);
    }

    #[test]
    fn test_register_alignment_doubles() {
        // two source notes collapse onto one target
        let a = align_pitches(&[60, 62], &[61]).unwrap();
        assert_eq!(a.cost, 2);
        assert_eq!(a.pairs, vec![(60, 61), (62, 61)]);
    }
}
