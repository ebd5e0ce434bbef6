//! WASM bindings for voicelead-core
//!
//! Exposes re-voicing to JavaScript with pitch and scale names as plain
//! strings. The request/response types are usable from Rust as well.

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

use crate::error::{Result, VoiceLeadingError};
use crate::leading::VoiceLeader;
use crate::types::{Mode, Pitch, Scale, Strategy, VoiceLeaderConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// One re-voicing job, e.g.
/// `{ pitches: ["C4","E4","G4"], from_tonic: "C4", from_mode: "major", ... }`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RevoiceRequest {
    pub pitches: Vec<String>,
    pub from_tonic: String,
    pub from_mode: String,
    pub to_tonic: String,
    pub to_mode: String,
    pub strategy: String,
    pub map_accidentals: bool,
    pub seed: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RevoiceResponse {
    pub success: bool,
    pub pitches: Vec<String>,
    pub error: Option<String>,
}

fn scale_from_names(tonic: &str, mode: &str) -> Result<Scale> {
    let tonic: Pitch = tonic.parse()?;
    let mode = Mode::from_name(mode)
        .ok_or_else(|| VoiceLeadingError::InvalidScale(format!("unknown mode '{}'", mode)))?;
    Scale::new(tonic, mode)
}

fn run(request: &RevoiceRequest) -> Result<Vec<String>> {
    let fragment = request
        .pitches
        .iter()
        .map(|name| name.parse::<Pitch>())
        .collect::<Result<Vec<_>>>()?;
    let from = scale_from_names(&request.from_tonic, &request.from_mode)?;
    let to = scale_from_names(&request.to_tonic, &request.to_mode)?;
    let strategy: Strategy = request.strategy.parse()?;

    let leader = VoiceLeader::new(VoiceLeaderConfig::new(strategy, request.map_accidentals));
    let mut rng = StdRng::seed_from_u64(request.seed);
    let result = leader.calculate(&fragment, &from, &to, &mut rng)?;
    Ok(result.iter().map(|p| p.to_string()).collect())
}

/// Re-voice a fragment given by name; failures are reported in the response
pub fn revoice_fragment(request: &RevoiceRequest) -> RevoiceResponse {
    match run(request) {
        Ok(pitches) => RevoiceResponse {
            success: true,
            pitches,
            error: None,
        },
        Err(e) => RevoiceResponse {
            success: false,
            pitches: Vec::new(),
            error: Some(e.to_string()),
        },
    }
}

// ============================================================================
// WASM Bindings
// ============================================================================

#[cfg(feature = "wasm")]
#[wasm_bindgen]
pub fn revoice(request: JsValue) -> JsValue {
    let response = match serde_wasm_bindgen::from_value::<RevoiceRequest>(request) {
        Ok(request) => revoice_fragment(&request),
        Err(e) => RevoiceResponse {
            success: false,
            pitches: Vec::new(),
            error: Some(e.to_string()),
        },
    };
    serde_wasm_bindgen::to_value(&response).unwrap_or(JsValue::NULL)
}

#[cfg(feature = "wasm")]
#[wasm_bindgen]
pub fn strategy_names() -> JsValue {
    let names: Vec<&str> = Strategy::ALL.iter().map(|s| s.name()).collect();
    serde_wasm_bindgen::to_value(&names).unwrap_or(JsValue::NULL)
}
