//! Voice leading analysis of realized fragments
//!
//! Compares a source fragment with its re-voiced counterpart voice by voice:
//! how far each voice moved, which tones were kept, where the realization
//! repeats a pitch between consecutive voices, and which moves break
//! traditional part-writing rules.

use colored::*;
use std::fmt;
use voicelead_core::Pitch;

/// Movement of a single voice from source to realization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceMovement {
    pub from: Pitch,
    pub to: Pitch,
    pub semitones: i32,
    pub voice_index: usize,
}

/// Rule breaks between a pair of voices or within one voice
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceLeadingViolation {
    ParallelFifths { voice1: usize, voice2: usize },
    ParallelOctaves { voice1: usize, voice2: usize },
    LargeLeap { voice: usize, semitones: i32 },
}

/// Analysis of one transition between two fragments of equal length
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceLeading {
    pub common_tones: Vec<Pitch>,
    pub movements: Vec<VoiceMovement>,
    pub total_movement: u32,
    pub repeated_pitches: usize,
    pub violations: Vec<VoiceLeadingViolation>,
}

/// Leaps wider than this many semitones are flagged
pub const LARGE_LEAP: i32 = 7;

impl VoiceLeading {
    /// Analyze `from` against its realization `to`, voice by voice.
    ///
    /// Extra voices on either side are ignored.
    pub fn analyze(from: &[Pitch], to: &[Pitch]) -> Self {
        let movements: Vec<VoiceMovement> = from
            .iter()
            .zip(to)
            .enumerate()
            .map(|(voice_index, (&from, &to))| VoiceMovement {
                from,
                to,
                semitones: to - from,
                voice_index,
            })
            .collect();

        let common_tones: Vec<Pitch> = movements
            .iter()
            .filter(|m| m.semitones == 0)
            .map(|m| m.to)
            .collect();

        let total_movement = movements.iter().map(|m| m.semitones.unsigned_abs()).sum();

        let repeated_pitches = to
            .windows(2)
            .filter(|pair| pair[0].sounds_like(&pair[1]))
            .count();

        let violations = Self::detect_violations(&movements);

        VoiceLeading {
            common_tones,
            movements,
            total_movement,
            repeated_pitches,
            violations,
        }
    }

    fn detect_violations(movements: &[VoiceMovement]) -> Vec<VoiceLeadingViolation> {
        let mut violations = Vec::new();

        for i in 0..movements.len() {
            for j in (i + 1)..movements.len() {
                let (a, b) = (&movements[i], &movements[j]);
                let same_direction = (a.semitones > 0 && b.semitones > 0)
                    || (a.semitones < 0 && b.semitones < 0);
                if !same_direction {
                    continue;
                }

                let before = (b.from - a.from).rem_euclid(12);
                let after = (b.to - a.to).rem_euclid(12);
                if before != after {
                    continue;
                }
                match after {
                    0 => violations.push(VoiceLeadingViolation::ParallelOctaves {
                        voice1: a.voice_index,
                        voice2: b.voice_index,
                    }),
                    7 => violations.push(VoiceLeadingViolation::ParallelFifths {
                        voice1: a.voice_index,
                        voice2: b.voice_index,
                    }),
                    _ => {}
                }
            }
        }

        for movement in movements {
            if movement.semitones.abs() > LARGE_LEAP {
                violations.push(VoiceLeadingViolation::LargeLeap {
                    voice: movement.voice_index,
                    semitones: movement.semitones,
                });
            }
        }

        violations
    }

    /// No parallels, no large leaps and no repeated pitch between voices
    pub fn is_smooth(&self) -> bool {
        self.violations.is_empty() && self.repeated_pitches == 0
    }
}

impl fmt::Display for VoiceLeading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.common_tones.is_empty() {
            let common: Vec<String> = self
                .common_tones
                .iter()
                .map(|p| p.to_string().green().bold().to_string())
                .collect();
            write!(f, "Common: [{}] ", common.join(", "))?;
        } else {
            write!(f, "No common tones ")?;
        }

        if !self.movements.is_empty() {
            write!(f, "Movements: ")?;
            for (i, movement) in self.movements.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                let text = if movement.semitones == 0 {
                    format!("{}={}", movement.from, movement.to).bright_blue()
                } else {
                    let text = format!(
                        "{}→{}({:+})",
                        movement.from, movement.to, movement.semitones
                    );
                    match movement.semitones.abs() {
                        1..=2 => text.green(),
                        3..=4 => text.yellow(),
                        _ => text.red(),
                    }
                };
                write!(f, "{}", text)?;
            }
        }

        if !self.violations.is_empty() {
            let markers: Vec<String> = self
                .violations
                .iter()
                .map(|v| match v {
                    VoiceLeadingViolation::ParallelFifths { .. } => "‖5".red().bold().to_string(),
                    VoiceLeadingViolation::ParallelOctaves { .. } => "‖8".red().bold().to_string(),
                    VoiceLeadingViolation::LargeLeap { .. } => "leap".yellow().to_string(),
                })
                .collect();
            write!(f, " [{}]", markers.join(" "))?;
        }

        let indicator = if self.is_smooth() {
            "✓".green().bold()
        } else if self.violations.is_empty() {
            "~".yellow().bold()
        } else {
            "✗".red().bold()
        };

        write!(
            f,
            " [Total: {}, Repeats: {}] {}",
            self.total_movement, self.repeated_pitches, indicator
        )
    }
}
