//! Decision Metadata - Threshold and Class Ordering
//!
//! Carries what the training pipeline decided: the probability cutoff and
//! the classifier's class ordering. The positive ("bad credit") class must
//! sit at index 1; that assumption is asserted at artifact load, not at
//! prediction time.

use serde::{Deserialize, Serialize};

/// Default probability cutoff when the artifact does not override it
pub const DEFAULT_THRESHOLD: f32 = 0.5;

/// Index the positive class must occupy in the probability output
pub const POSITIVE_CLASS_INDEX: usize = 1;

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Classifier decision metadata from the preprocessor artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionMetadata {
    /// Probability cutoff: label 1 iff p > threshold
    #[serde(default = "default_threshold")]
    pub threshold: f32,
    /// Class labels in the classifier's output order
    pub classes: Vec<i64>,
    /// The label meaning "high risk"
    pub positive_class: i64,
}

fn default_threshold() -> f32 {
    DEFAULT_THRESHOLD
}

impl Default for DecisionMetadata {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            classes: vec![0, 1],
            positive_class: 1,
        }
    }
}

impl DecisionMetadata {
    /// Verify the fixed positive-index assumption against the fitted
    /// ordering. Called once at artifact load; a violation is fatal.
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(format!(
                "Decision threshold {} outside [0, 1]",
                self.threshold
            ));
        }
        if self.classes.len() != 2 {
            return Err(format!(
                "Expected binary classifier, artifact lists {} classes",
                self.classes.len()
            ));
        }
        match self.classes.get(POSITIVE_CLASS_INDEX) {
            Some(&label) if label == self.positive_class => Ok(()),
            Some(&label) => Err(format!(
                "Positive class {} is at the wrong index (index {} holds {})",
                self.positive_class, POSITIVE_CLASS_INDEX, label
            )),
            None => Err("Class ordering missing the positive index".to_string()),
        }
    }

    /// Index of the positive class in the probability output
    pub fn positive_index(&self) -> usize {
        POSITIVE_CLASS_INDEX
    }

    /// Apply the cutoff: 1 = high risk, 0 = low risk
    pub fn label_for(&self, probability: f32) -> u8 {
        if probability > self.threshold {
            1
        } else {
            0
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_metadata_is_valid() {
        let meta = DecisionMetadata::default();
        assert!(meta.validate().is_ok());
        assert_eq!(meta.threshold, DEFAULT_THRESHOLD);
    }

    #[test]
    fn test_label_follows_threshold() {
        let meta = DecisionMetadata::default();
        assert_eq!(meta.label_for(0.49), 0);
        assert_eq!(meta.label_for(0.51), 1);
        // Exactly at the cutoff is not "exceeds"
        assert_eq!(meta.label_for(0.5), 0);
    }

    #[test]
    fn test_custom_threshold() {
        let meta = DecisionMetadata {
            threshold: 0.3,
            ..DecisionMetadata::default()
        };
        assert!(meta.validate().is_ok());
        assert_eq!(meta.label_for(0.4), 1);
        assert_eq!(meta.label_for(0.2), 0);
    }

    #[test]
    fn test_reversed_class_ordering_rejected() {
        let meta = DecisionMetadata {
            classes: vec![1, 0],
            ..DecisionMetadata::default()
        };
        let err = meta.validate().unwrap_err();
        assert!(err.contains("wrong index"));
    }

    #[test]
    fn test_non_binary_classes_rejected() {
        let meta = DecisionMetadata {
            classes: vec![0, 1, 2],
            ..DecisionMetadata::default()
        };
        assert!(meta.validate().is_err());
    }

    #[test]
    fn test_bad_threshold_rejected() {
        let meta = DecisionMetadata {
            threshold: 1.5,
            ..DecisionMetadata::default()
        };
        assert!(meta.validate().is_err());
    }

    #[test]
    fn test_metadata_deserializes_without_threshold() {
        let meta: DecisionMetadata =
            serde_json::from_str(r#"{"classes": [0, 1], "positive_class": 1}"#).unwrap();
        assert_eq!(meta.threshold, DEFAULT_THRESHOLD);
    }
}
