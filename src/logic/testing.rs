//! Shared test fixtures
//!
//! A fitted preprocessor artifact with realistic vocabularies so tests
//! across modules exercise the same artifact shape the training pipeline
//! exports. Compiled only for tests.

use std::collections::HashMap;

use crate::logic::features::layout::{layout_hash, FIELD_VERSION};
use crate::logic::model::decision::DecisionMetadata;
use crate::logic::preprocess::artifact::{
    NumericScaler, PreprocessorArtifact, ARTIFACT_SCHEMA_VERSION,
};

/// Fitted vocabularies per categorical field, in fitted one-hot order
pub fn fitted_vocabularies() -> HashMap<String, Vec<String>> {
    let entries: &[(&str, &[&str])] = &[
        (
            "credit_history",
            &[
                "critical/other existing credit",
                "existing paid",
                "delayed previously",
                "no credits/all paid",
                "all paid",
            ],
        ),
        (
            "purpose",
            &[
                "radio/tv",
                "education",
                "furniture/equipment",
                "new car",
                "used car",
                "business",
                "domestic appliance",
                "repairs",
                "other",
                "retraining",
            ],
        ),
        (
            "savings_status",
            &["<100", "100<=X<500", "500<=X<1000", ">=1000", "no known savings"],
        ),
        ("employment", &["unemployed", "<1", "1<=X<4", "4<=X<7", ">=7"]),
        ("sex", &["male", "female"]),
        ("other_parties", &["none", "guarantor", "co applicant"]),
        (
            "property_magnitude",
            &["real estate", "life insurance", "car", "no known property"],
        ),
        ("other_payment_plans", &["none", "bank", "stores"]),
        ("housing", &["own", "rent", "free"]),
        (
            "job",
            &[
                "unemp/unskilled non res",
                "unskilled resident",
                "skilled",
                "high qualif/self emp/mgmt",
            ],
        ),
        ("own_telephone", &["none", "yes"]),
        ("foreign_worker", &["yes", "no"]),
    ];

    entries
        .iter()
        .map(|(name, vocab)| {
            (
                name.to_string(),
                vocab.iter().map(|v| v.to_string()).collect(),
            )
        })
        .collect()
}

/// Fitted scalers per numeric field
pub fn fitted_scalers() -> HashMap<String, NumericScaler> {
    let entries: &[(&str, f64, f64)] = &[
        ("checking_account", 250.0, 1200.0),
        ("duration", 20.9, 12.1),
        ("credit_amount", 3271.3, 2822.7),
        ("installment_commitment", 3.0, 1.1),
        ("residence_since", 2.8, 1.1),
        ("age", 35.5, 11.4),
        ("existing_credits", 1.4, 0.6),
        ("num_dependents", 1.2, 0.4),
    ];

    entries
        .iter()
        .map(|(name, mean, scale)| {
            (
                name.to_string(),
                NumericScaler {
                    mean: *mean,
                    scale: *scale,
                },
            )
        })
        .collect()
}

/// Complete artifact fitted against the current field layout
pub fn fitted_preprocessor_artifact() -> PreprocessorArtifact {
    let numeric = fitted_scalers();
    let categorical = fitted_vocabularies();

    // 8 numeric columns + one column per vocabulary entry
    let output_dim = numeric.len()
        + categorical.values().map(|vocab| vocab.len()).sum::<usize>();

    PreprocessorArtifact {
        schema_version: ARTIFACT_SCHEMA_VERSION,
        field_version: FIELD_VERSION,
        layout_hash: layout_hash(),
        numeric,
        categorical,
        output_dim,
        decision: DecisionMetadata::default(),
    }
}
