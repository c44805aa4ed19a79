use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineStatus {
    pub field_version: u8,
    pub layout_hash: u32,
    pub field_count: usize,

    pub model: ModelStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelStatus {
    pub loaded: bool,
    /// Set when artifact loading failed; scoring is halted for the session
    pub halted_reason: Option<String>,
    pub model_path: Option<String>,
    pub preprocessor_path: Option<String>,
    pub loaded_at: Option<String>,
    pub checksum_sha256: Option<String>,
    pub threshold: Option<f32>,
    pub avg_latency_ms: f32,
    pub inference_count: u64,
}
