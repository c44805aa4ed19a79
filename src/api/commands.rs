//! Tauri Commands - API for the Frontend
//!
//! Form schema, default input, prediction, raw-record preview, and engine
//! status. Every error crosses the boundary as a plain-language string;
//! fatal artifact failures surface as a halted status, recoverable scoring
//! failures as per-request messages.

use serde::{Deserialize, Serialize};

use crate::logic::artifacts;
use crate::logic::features::form::{self, ApplicantInput, FormSchema, ProfileDefaults};
use crate::logic::features::layout::{layout_hash, FIELD_COUNT, FIELD_VERSION};
use crate::logic::model::inference;
use crate::logic::risk::types::RiskAssessment;
use super::engine_status::{EngineStatus, ModelStatus};

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Verdict banner payload for the frontend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerdictInfo {
    /// "low_risk" or "high_risk"
    pub verdict: String,
    /// "approve" or "reject"
    pub recommendation: String,
    /// Probability of default, 0.0 - 1.0
    pub probability: f32,
    /// One decimal place, e.g. "23.4%"
    pub probability_pct: String,
    /// Banner color hint
    pub banner_color: String,
    pub threshold: f32,
    pub inference_time_us: u64,
}

impl From<RiskAssessment> for VerdictInfo {
    fn from(assessment: RiskAssessment) -> Self {
        Self {
            verdict: assessment.verdict.as_str().to_string(),
            recommendation: assessment.recommendation.as_str().to_string(),
            probability: assessment.probability,
            probability_pct: assessment.probability_pct.clone(),
            banner_color: assessment.verdict.color().to_string(),
            threshold: assessment.threshold,
            inference_time_us: assessment.inference_time_us,
        }
    }
}

/// "Models not loaded" message with the recorded halt reason
fn halted_message() -> String {
    match artifacts::halt_reason() {
        Some(reason) => format!("Models not loaded: {}", reason),
        None => "Models not loaded. Please check the model path.".to_string(),
    }
}

// ============================================================================
// STATUS COMMANDS
// ============================================================================

/// Engine status for the header banner and the settings view
#[tauri::command]
pub async fn get_engine_status() -> Result<EngineStatus, String> {
    let (avg_latency_ms, inference_count) = inference::latency_stats();
    let paths = artifacts::loaded_paths();

    Ok(EngineStatus {
        field_version: FIELD_VERSION,
        layout_hash: layout_hash(),
        field_count: FIELD_COUNT,
        model: ModelStatus {
            loaded: artifacts::is_ready(),
            halted_reason: artifacts::halt_reason(),
            model_path: paths
                .as_ref()
                .map(|p| p.model.display().to_string()),
            preprocessor_path: paths
                .as_ref()
                .map(|p| p.preprocessor.display().to_string()),
            loaded_at: artifacts::loaded_at().map(|t| t.to_rfc3339()),
            checksum_sha256: artifacts::model_checksum(),
            threshold: artifacts::engine().map(|e| e.threshold()),
            avg_latency_ms,
            inference_count,
        },
    })
}

/// Re-hash the model file and compare against the checksum at load
#[tauri::command]
pub async fn verify_model_checksum() -> Result<bool, String> {
    artifacts::verify_model_checksum().map_err(|e| e.to_string())
}

// ============================================================================
// FORM COMMANDS
// ============================================================================

/// Bounded control descriptions for the sidebar form
#[tauri::command]
pub async fn get_form_schema() -> Result<FormSchema, String> {
    Ok(FormSchema::current())
}

/// Default values for every form control
#[tauri::command]
pub async fn get_default_input() -> Result<ApplicantInput, String> {
    Ok(ApplicantInput::default())
}

/// The assembled record as named values ("Show raw input data")
#[tauri::command]
pub async fn preview_record(input: ApplicantInput) -> Result<serde_json::Value, String> {
    let record = form::collect(&input, &ProfileDefaults::default());
    Ok(record.to_log_entry())
}

// ============================================================================
// PREDICTION COMMANDS
// ============================================================================

/// Score one application and return the verdict banner payload.
///
/// Recoverable scoring errors come back as `Err(message)` and leave the
/// session fully usable for the next attempt.
#[tauri::command]
pub async fn predict_risk(input: ApplicantInput) -> Result<VerdictInfo, String> {
    let engine = artifacts::engine().ok_or_else(halted_message)?;

    let record = form::collect(&input, &ProfileDefaults::default());

    // Inference is synchronous; keep it off the async runtime
    let assessment = tokio::task::spawn_blocking(move || engine.assess(&record))
        .await
        .map_err(|e| format!("Prediction task failed: {}", e))?
        .map_err(|e| format!("Error during prediction: {}", e))?;

    Ok(assessment.into())
}

// ============================================================================
// TESTS
// ============================================================================
