//! Strategy dispatch: modal transposition of a fragment followed by the
//! configured reassignment of voices.

use crate::error::Result;
use crate::leading::greedy::greedy_assign;
use crate::leading::projector::project_voice_leading;
use crate::types::pitch::circular_distance;
use crate::types::{Fragment, Pitch, Scale, Strategy, VoiceLeaderConfig};
use log::{debug, trace};
use rand::Rng;

/// Re-voices fragments from one scale into another.
///
/// ```ignore
/// use voicelead_core::{Scale, Strategy, VoiceLeader, VoiceLeaderConfig};
///
/// let c = Scale::major("C4".parse()?)?;
/// let f = Scale::major("F4".parse()?)?;
/// let leader = VoiceLeader::new(VoiceLeaderConfig::new(Strategy::Greedy, true));
/// let fragment = vec!["C4".parse()?, "E4".parse()?, "G4".parse()?];
/// let revoiced = leader.calculate_with_thread_rng(&fragment, &c, &f)?;
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VoiceLeader {
    config: VoiceLeaderConfig,
}

impl VoiceLeader {
    pub fn new(config: VoiceLeaderConfig) -> Self {
        VoiceLeader { config }
    }

    pub fn with_strategy(strategy: Strategy) -> Self {
        Self::new(VoiceLeaderConfig {
            strategy,
            ..VoiceLeaderConfig::default()
        })
    }

    /// Modally transpose `fragment` from `from` to `to` and assign the
    /// results to voices with the configured strategy. Random tie-breaks
    /// draw from `rng`.
    pub fn calculate<R>(
        &self,
        fragment: &[Pitch],
        from: &Scale,
        to: &Scale,
        rng: &mut R,
    ) -> Result<Fragment>
    where
        R: Rng + ?Sized,
    {
        debug!(
            "voice-leading {} pitches from {} to {} ({})",
            fragment.len(),
            from,
            to,
            self.config.strategy
        );
        if fragment.is_empty() {
            return Ok(Vec::new());
        }

        let targets = self.modal_targets(fragment, from, to)?;

        let result = match self.config.strategy {
            Strategy::Direct => targets,
            Strategy::Naive => naive_assign(fragment, &targets),
            Strategy::Tymoczko => {
                project_voice_leading(fragment, &targets, self.config.top_n, rng)?
            }
            Strategy::Greedy => greedy_assign(fragment, &targets, self.config.octave_span, rng)?,
        };

        for (voice, (source, target)) in fragment.iter().zip(&result).enumerate() {
            trace!("voice {}: {} -> {}", voice, source, target);
        }
        Ok(result)
    }

    /// `calculate` with the thread-local random source
    pub fn calculate_with_thread_rng(
        &self,
        fragment: &[Pitch],
        from: &Scale,
        to: &Scale,
    ) -> Result<Fragment> {
        self.calculate(fragment, from, to, &mut rand::thread_rng())
    }

    /// Degree-preserving transposition of every pitch, in input order.
    ///
    /// Each pitch's degree in `from` is looked up in `to`; with
    /// `map_accidentals` the residual alteration is re-applied on top.
    pub fn modal_targets(&self, fragment: &[Pitch], from: &Scale, to: &Scale) -> Result<Fragment> {
        fragment
            .iter()
            .map(|pitch| {
                let (degree, residual) = from.pitch_to_degree_and_accidental(pitch)?;
                let base = to.degree_to_pitch(degree)?;
                Ok(if self.config.map_accidentals {
                    base.add_accidental(residual)
                } else {
                    base
                })
            })
            .collect()
    }
}

/// Each voice takes the target nearest in pitch class (letter distance breaks
/// ties, then the first target wins), kept in the voice's own octave.
pub fn naive_assign(fragment: &[Pitch], targets: &[Pitch]) -> Fragment {
    fragment
        .iter()
        .filter_map(|source| {
            let mut best: Option<(&Pitch, u8, u8)> = None;
            for target in targets {
                let chromatic = circular_distance(source.pitch_class(), target.pitch_class());
                let letters = source.letter_distance(target);
                let closer = match best {
                    None => true,
                    Some((_, c, l)) => chromatic < c || (chromatic == c && letters < l),
                };
                if closer {
                    best = Some((target, chromatic, letters));
                }
            }
            best.map(|(target, _, _)| target.with_octave(source.octave()))
        })
        .collect()
}
