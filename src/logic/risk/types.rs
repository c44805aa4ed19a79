//! Risk Types
//!
//! Data structures for the verdict surface. No logic beyond the fixed
//! label -> verdict -> recommendation mapping.

use serde::{Deserialize, Serialize};

use crate::logic::model::inference::Prediction;

// ============================================================================
// RISK CLASS
// ============================================================================

/// Final risk category shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskClass {
    /// Model predicts repayment
    LowRisk,
    /// Model predicts default
    HighRisk,
}

impl RiskClass {
    /// 0 = low risk, 1 = high risk
    pub fn from_label(label: u8) -> Self {
        if label == 1 {
            RiskClass::HighRisk
        } else {
            RiskClass::LowRisk
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskClass::LowRisk => "low_risk",
            RiskClass::HighRisk => "high_risk",
        }
    }

    pub fn label(&self) -> u8 {
        match self {
            RiskClass::LowRisk => 0,
            RiskClass::HighRisk => 1,
        }
    }

    /// Banner color hint for the frontend
    pub fn color(&self) -> &'static str {
        match self {
            RiskClass::LowRisk => "#10b981",  // Green
            RiskClass::HighRisk => "#ef4444", // Red
        }
    }
}

impl std::fmt::Display for RiskClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// RECOMMENDATION
// ============================================================================

/// What the bank should do with the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    Approve,
    Reject,
}

impl Recommendation {
    pub fn for_class(class: RiskClass) -> Self {
        match class {
            RiskClass::LowRisk => Recommendation::Approve,
            RiskClass::HighRisk => Recommendation::Reject,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Recommendation::Approve => "approve",
            Recommendation::Reject => "reject",
        }
    }
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// RISK ASSESSMENT
// ============================================================================

/// Result of scoring one application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub verdict: RiskClass,
    pub recommendation: Recommendation,
    /// Probability of default, 0.0 - 1.0
    pub probability: f32,
    /// Probability as a percentage with one decimal place, e.g. "23.4%"
    pub probability_pct: String,
    /// Cutoff the verdict was derived with
    pub threshold: f32,
    /// Microseconds
    pub inference_time_us: u64,
}

impl RiskAssessment {
    pub fn from_prediction(prediction: &Prediction) -> Self {
        let verdict = RiskClass::from_label(prediction.label);
        Self {
            verdict,
            recommendation: Recommendation::for_class(verdict),
            probability: prediction.probability,
            probability_pct: format_pct(prediction.probability),
            threshold: prediction.threshold,
            inference_time_us: prediction.inference_time_us,
        }
    }
}

/// One decimal place, matching the banner format
pub fn format_pct(probability: f32) -> String {
    format!("{:.1}%", probability * 100.0)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn prediction(label: u8, probability: f32) -> Prediction {
        Prediction {
            label,
            probability,
            threshold: 0.5,
            inference_time_us: 100,
        }
    }

    #[test]
    fn test_high_risk_maps_to_reject() {
        let assessment = RiskAssessment::from_prediction(&prediction(1, 0.82));
        assert_eq!(assessment.verdict, RiskClass::HighRisk);
        assert_eq!(assessment.recommendation, Recommendation::Reject);
        assert_eq!(assessment.probability_pct, "82.0%");
    }

    #[test]
    fn test_low_risk_maps_to_approve() {
        let assessment = RiskAssessment::from_prediction(&prediction(0, 0.12));
        assert_eq!(assessment.verdict, RiskClass::LowRisk);
        assert_eq!(assessment.recommendation, Recommendation::Approve);
        assert_eq!(assessment.probability_pct, "12.0%");
    }

    #[test]
    fn test_pct_formatting_one_decimal() {
        assert_eq!(format_pct(0.0), "0.0%");
        assert_eq!(format_pct(0.2345), "23.4%");
        assert_eq!(format_pct(1.0), "100.0%");
    }

    #[test]
    fn test_label_round_trip() {
        assert_eq!(RiskClass::from_label(0).label(), 0);
        assert_eq!(RiskClass::from_label(1).label(), 1);
        // Only 0 and 1 exist; anything else would be a classifier bug,
        // mapped conservatively to low risk by from_label's contract
        assert_eq!(RiskClass::from_label(0), RiskClass::LowRisk);
    }

    #[test]
    fn test_class_colors_differ() {
        assert_ne!(RiskClass::LowRisk.color(), RiskClass::HighRisk.color());
    }
}
