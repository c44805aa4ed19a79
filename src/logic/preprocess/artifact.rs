//! Preprocessor Artifact - Fitted Parameters from Training
//!
//! JSON schema of the preprocessor file. Mirrors what the training pipeline
//! exports: per-numeric scaler parameters, per-categorical vocabularies in
//! fitted order, and the decision metadata for the classifier.

use std::collections::HashMap;
use serde::{Deserialize, Serialize};

use crate::logic::features::layout::{FieldKind, FIELD_LAYOUT};
use crate::logic::model::decision::DecisionMetadata;

/// Current artifact schema version this build understands
pub const ARTIFACT_SCHEMA_VERSION: u8 = 1;

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Standardization parameters for one numeric field: (x - mean) / scale
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NumericScaler {
    pub mean: f64,
    pub scale: f64,
}

impl NumericScaler {
    pub fn apply(&self, value: f64) -> f32 {
        // Guard against a degenerate fitted scale
        let scale = if self.scale.abs() < 1e-12 { 1.0 } else { self.scale };
        ((value - self.mean) / scale) as f32
    }
}

/// The fitted preprocessor as exported by training
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreprocessorArtifact {
    /// Artifact schema version (not the field layout version)
    pub schema_version: u8,
    /// Field layout version the preprocessor was fitted on
    pub field_version: u8,
    /// Field layout hash the preprocessor was fitted on
    pub layout_hash: u32,
    /// Scaler per numeric field
    pub numeric: HashMap<String, NumericScaler>,
    /// Vocabulary per categorical field, in fitted one-hot order
    pub categorical: HashMap<String, Vec<String>>,
    /// Dense output width the classifier expects
    pub output_dim: usize,
    /// Classifier decision metadata (threshold, class ordering)
    pub decision: DecisionMetadata,
}

impl PreprocessorArtifact {
    /// Parse from the artifact file's JSON text
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Dense width implied by the fitted parameters:
    /// one column per numeric field, one per vocabulary entry.
    pub fn computed_output_dim(&self) -> usize {
        FIELD_LAYOUT
            .iter()
            .map(|field| match field.kind {
                FieldKind::Numeric => 1,
                FieldKind::Categorical => self
                    .categorical
                    .get(field.name)
                    .map(|vocab| vocab.len())
                    .unwrap_or(0),
            })
            .sum()
    }

    /// Fields of the layout this artifact has no parameters for
    pub fn uncovered_fields(&self) -> Vec<&'static str> {
        FIELD_LAYOUT
            .iter()
            .filter(|field| match field.kind {
                FieldKind::Numeric => !self.numeric.contains_key(field.name),
                FieldKind::Categorical => self
                    .categorical
                    .get(field.name)
                    .map(|vocab| vocab.is_empty())
                    .unwrap_or(true),
            })
            .map(|field| field.name)
            .collect()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaler_apply() {
        let scaler = NumericScaler { mean: 10.0, scale: 5.0 };
        assert!((scaler.apply(20.0) - 2.0).abs() < 1e-6);
        assert!((scaler.apply(10.0) - 0.0).abs() < 1e-6);
    }

    #[test]
    fn test_scaler_degenerate_scale() {
        let scaler = NumericScaler { mean: 3.0, scale: 0.0 };
        // Falls back to unit scale instead of dividing by zero
        assert!((scaler.apply(5.0) - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_artifact_roundtrip() {
        let json = r#"{
            "schema_version": 1,
            "field_version": 1,
            "layout_hash": 123,
            "numeric": {"duration": {"mean": 20.9, "scale": 12.1}},
            "categorical": {"housing": ["own", "rent", "free"]},
            "output_dim": 4,
            "decision": {"threshold": 0.5, "classes": [0, 1], "positive_class": 1}
        }"#;

        let artifact = PreprocessorArtifact::from_json(json).unwrap();
        assert_eq!(artifact.schema_version, 1);
        assert_eq!(artifact.numeric["duration"].mean, 20.9);
        assert_eq!(artifact.categorical["housing"].len(), 3);
        assert_eq!(artifact.decision.positive_class, 1);
    }

    #[test]
    fn test_uncovered_fields_on_partial_artifact() {
        let json = r#"{
            "schema_version": 1,
            "field_version": 1,
            "layout_hash": 123,
            "numeric": {"duration": {"mean": 0.0, "scale": 1.0}},
            "categorical": {},
            "output_dim": 1,
            "decision": {"threshold": 0.5, "classes": [0, 1], "positive_class": 1}
        }"#;

        let artifact = PreprocessorArtifact::from_json(json).unwrap();
        let uncovered = artifact.uncovered_fields();
        assert!(uncovered.contains(&"age"));
        assert!(uncovered.contains(&"housing"));
        assert!(!uncovered.contains(&"duration"));
    }
}
