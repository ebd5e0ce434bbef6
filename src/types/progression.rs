use crate::types::voice_leading::VoiceLeading;
use anyhow::{Context, Result};
use colored::*;
use log::debug;
use rand::Rng;
use std::fmt;
use voicelead_core::{Fragment, Pitch, Scale, VoiceLeader};

/// A sequence of harmonic contexts a fragment travels through
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Progression {
    scales: Vec<Scale>,
}

/// One realized transition of a progression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressionStep {
    pub from: Scale,
    pub to: Scale,
    pub fragment: Fragment,
    pub analysis: VoiceLeading,
}

impl Progression {
    /// Create a new empty progression
    pub fn new() -> Self {
        Progression { scales: Vec::new() }
    }

    pub fn from_scales(scales: Vec<Scale>) -> Self {
        Progression { scales }
    }

    /// Build from (tonic, mode) names, e.g. `[("C4", "major"), ("A3", "minor")]`
    pub fn from_names(names: &[(&str, &str)]) -> Result<Self> {
        let mut scales = Vec::with_capacity(names.len());
        for (tonic, mode) in names {
            let tonic: Pitch = tonic
                .parse()
                .with_context(|| format!("bad tonic '{}'", tonic))?;
            let mode = voicelead_core::Mode::from_name(mode)
                .with_context(|| format!("unknown mode '{}'", mode))?;
            scales.push(Scale::new(tonic, mode).with_context(|| {
                format!("cannot build {} {}", tonic, mode.name())
            })?);
        }
        Ok(Self::from_scales(scales))
    }

    pub fn len(&self) -> usize {
        self.scales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scales.is_empty()
    }

    /// Carry `start` (written in the first scale) through every later scale.
    ///
    /// Each transition re-voices the previous realization, so the result has
    /// one step per adjacent pair of scales.
    pub fn realize<R>(
        &self,
        leader: &VoiceLeader,
        start: &[Pitch],
        rng: &mut R,
    ) -> Result<Vec<ProgressionStep>>
    where
        R: Rng + ?Sized,
    {
        let mut steps = Vec::with_capacity(self.scales.len().saturating_sub(1));
        let mut current: Fragment = start.to_vec();

        for (index, pair) in self.scales.windows(2).enumerate() {
            let (from, to) = (&pair[0], &pair[1]);
            let next = leader
                .calculate(&current, from, to, rng)
                .with_context(|| format!("step {} ({} -> {}) failed", index + 1, from, to))?;
            let analysis = VoiceLeading::analyze(&current, &next);
            debug!("step {}: {}", index + 1, analysis.total_movement);

            steps.push(ProgressionStep {
                from: from.clone(),
                to: to.clone(),
                fragment: next.clone(),
                analysis,
            });
            current = next;
        }

        Ok(steps)
    }

    /// `realize` with the thread-local random source
    pub fn realize_with_thread_rng(
        &self,
        leader: &VoiceLeader,
        start: &[Pitch],
    ) -> Result<Vec<ProgressionStep>> {
        self.realize(leader, start, &mut rand::thread_rng())
    }
}

impl fmt::Display for Progression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.scales.iter().map(|s| s.to_string()).collect();
        write!(f, "{}", names.join(" → "))
    }
}

impl fmt::Display for ProgressionStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let notes: Vec<String> = self.fragment.iter().map(|p| p.to_string()).collect();
        write!(
            f,
            "{} → {}: [{}] {}",
            self.from,
            self.to.to_string().cyan(),
            notes.join(" "),
            self.analysis
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use voicelead_core::Strategy;

    fn pitches(names: &[&str]) -> Vec<Pitch> {
        names.iter().map(|n| n.parse().unwrap()).collect()
    }

    #[test]
    fn test_from_names() {
        let progression = Progression::from_names(&[("C4", "major"), ("A3", "minor")]).unwrap();
        assert_eq!(progression.len(), 2);
        assert_eq!(progression.to_string(), "C major → A minor");

        assert!(Progression::from_names(&[("C4", "bebop")]).is_err());
        assert!(Progression::from_names(&[("H4", "major")]).is_err());
    }

    #[test]
    fn test_realize_chains_steps() {
        let progression =
            Progression::from_names(&[("C4", "major"), ("F4", "major"), ("C4", "major")]).unwrap();
        let leader = VoiceLeader::with_strategy(Strategy::Direct);
        let mut rng = StdRng::seed_from_u64(0);
        let steps = progression
            .realize(&leader, &pitches(&["C4", "E4", "G4"]), &mut rng)
            .unwrap();

        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].fragment, pitches(&["F4", "A4", "C5"]));
        // the second step starts from the first realization
        assert_eq!(steps[1].fragment, pitches(&["C4", "E4", "G4"]));
        assert_eq!(steps[0].analysis.total_movement, 15);
    }

    #[test]
    fn test_realize_greedy_is_smooth() {
        let progression =
            Progression::from_names(&[("C4", "major"), ("F4", "major")]).unwrap();
        let leader = VoiceLeader::with_strategy(Strategy::Greedy);
        let steps = progression
            .realize_with_thread_rng(&leader, &pitches(&["C4", "E4", "G4"]))
            .unwrap();
        assert_eq!(steps[0].fragment, pitches(&["C4", "F4", "A4"]));
        assert!(steps[0].analysis.is_smooth());
    }

    #[test]
    fn test_single_scale_has_no_steps() {
        let progression = Progression::from_names(&[("D4", "dorian")]).unwrap();
        let leader = VoiceLeader::default();
        let steps = progression
            .realize_with_thread_rng(&leader, &pitches(&["D4"]))
            .unwrap();
        assert!(steps.is_empty());
    }

    #[test]
    fn test_failure_names_the_step() {
        let progression = Progression::from_names(&[("E4", "major"), ("C4", "major")]).unwrap();
        let leader = VoiceLeader::default();
        // Fbb4 is three semitones below the F# of E major
        let err = progression
            .realize_with_thread_rng(&leader, &pitches(&["Fbb4"]))
            .unwrap_err();
        assert!(err.to_string().contains("step 1"));
    }
}
