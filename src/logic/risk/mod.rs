//! Risk Module - Verdict Mapping & Scoring Orchestration
//!
//! Turns a FeatureRecord into a user-facing risk assessment:
//! preprocess -> classify -> threshold decision -> verdict.

pub mod engine;
pub mod types;

// Re-export common types
pub use engine::{ScoringEngine, ScoringError};
pub use types::{Recommendation, RiskAssessment, RiskClass};
