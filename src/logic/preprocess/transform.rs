//! Transform - Dense Encoding of a Feature Record
//!
//! Walks the field layout in order: numeric fields become one standardized
//! column, categorical fields become a one-hot block over the fitted
//! vocabulary. Anything the preprocessor was not fitted on is a recoverable
//! TransformError, never a silent guess.

use crate::logic::features::layout::{FieldKind, FIELD_LAYOUT};
use crate::logic::features::record::FeatureRecord;
use super::artifact::PreprocessorArtifact;

// ============================================================================
// ERROR HANDLING
// ============================================================================

/// Recoverable per-request transform failure
#[derive(Debug, Clone, PartialEq)]
pub enum TransformError {
    /// Record does not match the layout the preprocessor was fitted on
    LayoutMismatch(String),
    /// A layout field has no value in the record
    MissingField(String),
    /// A numeric field holds a non-numeric value
    NotNumeric { field: String, value: String },
    /// A categorical field holds a numeric value
    NotCategorical { field: String },
    /// A categorical value was never seen during fitting
    UnknownCategory { field: String, value: String },
}

impl std::fmt::Display for TransformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransformError::LayoutMismatch(msg) => {
                write!(f, "Record layout mismatch: {}", msg)
            }
            TransformError::MissingField(field) => {
                write!(f, "Missing value for field '{}'", field)
            }
            TransformError::NotNumeric { field, value } => {
                write!(f, "Field '{}' expects a number, got '{}'", field, value)
            }
            TransformError::NotCategorical { field } => {
                write!(f, "Field '{}' expects a category, got a number", field)
            }
            TransformError::UnknownCategory { field, value } => {
                write!(
                    f,
                    "Value '{}' for field '{}' was not seen during training",
                    value, field
                )
            }
        }
    }
}

impl std::error::Error for TransformError {}

// ============================================================================
// PREPROCESSOR
// ============================================================================

/// The fitted preprocessor, ready to transform records
#[derive(Debug, Clone)]
pub struct Preprocessor {
    artifact: PreprocessorArtifact,
}

impl Preprocessor {
    pub fn from_artifact(artifact: PreprocessorArtifact) -> Self {
        Self { artifact }
    }

    /// Dense output width
    pub fn output_dim(&self) -> usize {
        self.artifact.output_dim
    }

    pub fn artifact(&self) -> &PreprocessorArtifact {
        &self.artifact
    }

    /// Encode one record into the dense row the classifier expects.
    ///
    /// Deterministic: same record, same output. Field order comes from
    /// FIELD_LAYOUT, never from the record itself.
    pub fn transform(&self, record: &FeatureRecord) -> Result<Vec<f32>, TransformError> {
        record
            .validate()
            .map_err(|e| TransformError::LayoutMismatch(e.to_string()))?;

        let mut row = Vec::with_capacity(self.artifact.output_dim);

        for field in FIELD_LAYOUT {
            let value = record
                .get_by_name(field.name)
                .ok_or_else(|| TransformError::MissingField(field.name.to_string()))?;

            match field.kind {
                FieldKind::Numeric => {
                    let number = value.as_number().ok_or_else(|| TransformError::NotNumeric {
                        field: field.name.to_string(),
                        value: value.to_string(),
                    })?;
                    let scaler = self.artifact.numeric.get(field.name).ok_or_else(|| {
                        TransformError::MissingField(field.name.to_string())
                    })?;
                    row.push(scaler.apply(number));
                }
                FieldKind::Categorical => {
                    let text = value.as_text().ok_or_else(|| TransformError::NotCategorical {
                        field: field.name.to_string(),
                    })?;
                    let vocab = self.artifact.categorical.get(field.name).ok_or_else(|| {
                        TransformError::MissingField(field.name.to_string())
                    })?;
                    let hit = vocab.iter().position(|v| v == text).ok_or_else(|| {
                        TransformError::UnknownCategory {
                            field: field.name.to_string(),
                            value: text.to_string(),
                        }
                    })?;
                    // One-hot block in fitted vocabulary order
                    for i in 0..vocab.len() {
                        row.push(if i == hit { 1.0 } else { 0.0 });
                    }
                }
            }
        }

        Ok(row)
    }
}

// ============================================================================
// TESTS
// ============================================================================
