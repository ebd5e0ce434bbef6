//! Voice-leading configuration types
//!
//! Pure data passed through from the caller's style configuration: which
//! strategy reassigns the transposed pitches, whether chromatic alterations
//! survive the transposition, and the knobs of the randomized strategies.

use crate::error::VoiceLeadingError;
use std::fmt;
use std::str::FromStr;

/// How transposed pitches are assigned to the source voices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strategy {
    /// Degree-preserving transposition, no reordering
    #[default]
    Direct,
    /// Each voice independently takes the closest transposed pitch class
    Naive,
    /// Sample among the best bijective voice leadings
    Tymoczko,
    /// Cost-tier greedy assignment that avoids repeating the previous pitch
    Greedy,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::Direct,
        Strategy::Naive,
        Strategy::Tymoczko,
        Strategy::Greedy,
    ];

    /// Parse strategy from string (case-insensitive)
    pub fn from_name(s: &str) -> Option<Strategy> {
        match s.trim().to_lowercase().as_str() {
            "direct" | "none" => Some(Strategy::Direct),
            "naive" => Some(Strategy::Naive),
            "tymoczko" | "bijective" => Some(Strategy::Tymoczko),
            "greedy" | "shiihs" => Some(Strategy::Greedy),
            _ => None,
        }
    }

    /// Get display name
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Direct => "direct",
            Strategy::Naive => "naive",
            Strategy::Tymoczko => "tymoczko",
            Strategy::Greedy => "greedy",
        }
    }
}

impl FromStr for Strategy {
    type Err = VoiceLeadingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Strategy::from_name(s).ok_or_else(|| VoiceLeadingError::InvalidStrategy(s.to_string()))
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Settings for one `VoiceLeader`
///
/// - `map_accidentals`: re-apply a source pitch's alteration relative to its
///   scale degree on top of the transposed degree
/// - `top_n`: how many of the cheapest bijective leadings TYMOCZKO samples from
/// - `octave_span`: octaves above and below each transposed pitch that GREEDY
///   considers as candidates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VoiceLeaderConfig {
    pub strategy: Strategy,
    pub map_accidentals: bool,
    pub top_n: usize,
    pub octave_span: i8,
}

impl VoiceLeaderConfig {
    pub fn new(strategy: Strategy, map_accidentals: bool) -> Self {
        VoiceLeaderConfig {
            strategy,
            map_accidentals,
            ..Self::default()
        }
    }

    pub fn with_top_n(self, top_n: usize) -> Self {
        VoiceLeaderConfig {
            top_n: top_n.max(1),
            ..self
        }
    }

    pub fn with_octave_span(self, octave_span: i8) -> Self {
        VoiceLeaderConfig {
            octave_span: octave_span.max(0),
            ..self
        }
    }
}

impl Default for VoiceLeaderConfig {
    fn default() -> Self {
        VoiceLeaderConfig {
            strategy: Strategy::Direct,
            map_accidentals: true,
            top_n: 2,
            octave_span: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_names() {
        for strategy in Strategy::ALL {
            assert_eq!(Strategy::from_name(strategy.name()), Some(strategy));
        }
        assert_eq!("GREEDY".parse::<Strategy>().unwrap(), Strategy::Greedy);
        assert_eq!(Strategy::from_name("bijective"), Some(Strategy::Tymoczko));
        assert_eq!(
            "random".parse::<Strategy>().unwrap_err(),
            VoiceLeadingError::InvalidStrategy("random".to_string())
        );
    }

    #[test]
    fn test_config_defaults() {
        let config = VoiceLeaderConfig::default();
        assert_eq!(config.strategy, Strategy::Direct);
        assert!(config.map_accidentals);
        assert_eq!(config.top_n, 2);
        assert_eq!(config.octave_span, 1);

        let config = VoiceLeaderConfig::new(Strategy::Greedy, false).with_top_n(0);
        assert_eq!(config.top_n, 1);
        assert!(!config.map_accidentals);
        assert_eq!(config.with_octave_span(-3).octave_span, 0);
    }
}
