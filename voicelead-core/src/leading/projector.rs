//! Lifting a pitch-class voice leading back into register

use crate::error::{Result, VoiceLeadingError};
use crate::leading::bijective::bijective_match;
use crate::types::path::MODULUS;
use crate::types::{Fragment, Pitch};
use log::trace;
use rand::Rng;

/// Move each source pitch along one of the `top_n` cheapest bijective voice
/// leadings to `targets`.
///
/// With `top_n <= 1` the best leading is used and `rng` is untouched;
/// otherwise one of the cheapest `top_n` is picked uniformly. The result keeps
/// the source order. Spellings are borrowed from `targets` (or `source` when a
/// voice holds still), re-octaved if the leading lands in another register.
pub fn project_voice_leading<R>(
    source: &[Pitch],
    targets: &[Pitch],
    top_n: usize,
    rng: &mut R,
) -> Result<Fragment>
where
    R: Rng + ?Sized,
{
    let mut source_pcs: Vec<u8> = source.iter().map(Pitch::pitch_class).collect();
    source_pcs.sort_unstable();
    let mut target_pcs: Vec<u8> = targets.iter().map(Pitch::pitch_class).collect();
    target_pcs.sort_unstable();

    let matched = bijective_match(&source_pcs, &target_pcs, top_n > 1)?;
    let options = matched.top(top_n);
    let pick = if options.len() > 1 {
        rng.gen_range(0..options.len())
    } else {
        0
    };
    trace!("picked leading {} of {}", pick, options.len());
    let mut remaining = options[pick].to_vec();

    let mut output = Vec::with_capacity(source.len());
    for (voice, pitch) in source.iter().enumerate() {
        let index = remaining
            .iter()
            .position(|path| path.origin == pitch.pitch_class())
            .ok_or(VoiceLeadingError::NoFeasibleAssignment { voice })?;
        let path = remaining.remove(index);
        let midi = pitch.midi() + path.offset as i32;
        let spelled = respell(midi, source, targets)
            .ok_or(VoiceLeadingError::NoFeasibleAssignment { voice })?;
        output.push(spelled);
    }
    Ok(output)
}

/// Find a spelling for `midi`: a target sounding there, then a source pitch
/// sounding there, then a target of the same pitch class moved into register.
fn respell(midi: i32, source: &[Pitch], targets: &[Pitch]) -> Option<Pitch> {
    targets
        .iter()
        .chain(source)
        .find(|p| p.midi() == midi)
        .copied()
        .or_else(|| {
            let pitch_class = midi.rem_euclid(MODULUS as i32) as u8;
            targets
                .iter()
                .find(|t| t.pitch_class() == pitch_class)
                .and_then(|t| t.with_midi(midi))
        })
}
