//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! To change default artifact locations, only edit this file.

/// Default classifier artifact path, relative to the working directory
pub const DEFAULT_MODEL_PATH: &str = "models/credit_model.onnx";

/// Default preprocessor artifact path, relative to the working directory
pub const DEFAULT_PREPROCESSOR_PATH: &str = "models/preprocessor.json";

/// Directory name under the platform data dir holding installed artifacts
pub const APP_DATA_DIR: &str = "CreditScorer";

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "Credit Scorer";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Explicit classifier path from the environment, if set
pub fn model_path_override() -> Option<String> {
    std::env::var("CREDIT_MODEL_PATH").ok().filter(|s| !s.is_empty())
}

/// Explicit preprocessor path from the environment, if set
pub fn preprocessor_path_override() -> Option<String> {
    std::env::var("CREDIT_PREPROCESSOR_PATH").ok().filter(|s| !s.is_empty())
}
