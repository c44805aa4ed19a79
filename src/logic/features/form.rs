//! Form Collector - Applicant Input Assembly
//!
//! Merges the six user-exposed form controls with the constant applicant
//! profile into one complete FeatureRecord. Control bounds live here so the
//! frontend and the backend clamp against the same numbers.

use serde::{Deserialize, Serialize};
use super::record::{FeatureRecord, FeatureRecordBuilder};

// ============================================================================
// CONTROL BOUNDS
// ============================================================================

/// Checking account balance (DM); negative = overdrawn
pub const CHECKING_ACCOUNT_MIN: f64 = -2000.0;
pub const CHECKING_ACCOUNT_MAX: f64 = 20000.0;
pub const CHECKING_ACCOUNT_DEFAULT: f64 = 0.0;

/// Loan duration (months)
pub const DURATION_MIN: f64 = 4.0;
pub const DURATION_MAX: f64 = 72.0;
pub const DURATION_DEFAULT: f64 = 24.0;

/// Requested credit amount (DM)
pub const CREDIT_AMOUNT_MIN: f64 = 250.0;
pub const CREDIT_AMOUNT_MAX: f64 = 20000.0;
pub const CREDIT_AMOUNT_DEFAULT: f64 = 5000.0;

/// Applicant age (years)
pub const AGE_MIN: f64 = 18.0;
pub const AGE_MAX: f64 = 75.0;
pub const AGE_DEFAULT: f64 = 30.0;

/// Enumerated choices for the two categorical controls
pub const SEX_CHOICES: &[&str] = &["male", "female"];
pub const HOUSING_CHOICES: &[&str] = &["own", "rent", "free"];

// ============================================================================
// APPLICANT INPUT (user-variable fields)
// ============================================================================

/// The six fields exposed as sidebar controls
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicantInput {
    #[serde(default = "default_checking_account")]
    pub checking_account: f64,
    #[serde(default = "default_duration")]
    pub duration: f64,
    #[serde(default = "default_credit_amount")]
    pub credit_amount: f64,
    #[serde(default = "default_age")]
    pub age: f64,
    #[serde(default = "default_sex")]
    pub sex: String,
    #[serde(default = "default_housing")]
    pub housing: String,
}

fn default_checking_account() -> f64 {
    CHECKING_ACCOUNT_DEFAULT
}

fn default_duration() -> f64 {
    DURATION_DEFAULT
}

fn default_credit_amount() -> f64 {
    CREDIT_AMOUNT_DEFAULT
}

fn default_age() -> f64 {
    AGE_DEFAULT
}

fn default_sex() -> String {
    SEX_CHOICES[0].to_string()
}

fn default_housing() -> String {
    HOUSING_CHOICES[0].to_string()
}

impl Default for ApplicantInput {
    fn default() -> Self {
        Self {
            checking_account: CHECKING_ACCOUNT_DEFAULT,
            duration: DURATION_DEFAULT,
            credit_amount: CREDIT_AMOUNT_DEFAULT,
            age: AGE_DEFAULT,
            sex: default_sex(),
            housing: default_housing(),
        }
    }
}

// ============================================================================
// PROFILE DEFAULTS (constant fields, not exposed in the form)
// ============================================================================

/// Constant values for the 14 fields the form does not expose.
///
/// Kept separate from ApplicantInput so it is always visible which fields a
/// user can vary and which are pinned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileDefaults {
    /// Past repayment record
    pub credit_history: String,
    /// What the loan is for
    pub purpose: String,
    /// Savings bracket
    pub savings_status: String,
    /// Employment duration bracket
    pub employment: String,
    /// Installment rate as % of disposable income
    pub installment_commitment: f64,
    /// Co-applicant / guarantor
    pub other_parties: String,
    /// Years at current residence
    pub residence_since: f64,
    /// Most valuable property owned
    pub property_magnitude: String,
    /// Other installment plans
    pub other_payment_plans: String,
    /// Number of existing credits at this bank
    pub existing_credits: f64,
    /// Job qualification bracket
    pub job: String,
    /// Number of people maintained
    pub num_dependents: f64,
    /// Telephone registered under the applicant's name
    pub own_telephone: String,
    /// Foreign worker flag
    pub foreign_worker: String,
}

impl Default for ProfileDefaults {
    fn default() -> Self {
        Self {
            credit_history: "existing paid".to_string(),
            purpose: "radio/tv".to_string(),
            savings_status: "<100".to_string(),
            employment: "1<=X<4".to_string(),
            installment_commitment: 4.0,
            other_parties: "none".to_string(),
            residence_since: 4.0,
            property_magnitude: "real estate".to_string(),
            other_payment_plans: "none".to_string(),
            existing_credits: 1.0,
            job: "skilled".to_string(),
            num_dependents: 1.0,
            own_telephone: "yes".to_string(),
            foreign_worker: "yes".to_string(),
        }
    }
}

// ============================================================================
// FORM SCHEMA (served to the frontend)
// ============================================================================

/// One bounded numeric control
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NumericFieldSpec {
    pub name: String,
    pub label: String,
    pub min: f64,
    pub max: f64,
    pub default: f64,
}

/// One enumerated-choice control
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChoiceFieldSpec {
    pub name: String,
    pub label: String,
    pub choices: Vec<String>,
    pub default: String,
}

/// Machine-readable description of the whole form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormSchema {
    pub numeric: Vec<NumericFieldSpec>,
    pub choice: Vec<ChoiceFieldSpec>,
}

impl FormSchema {
    pub fn current() -> Self {
        Self {
            numeric: vec![
                NumericFieldSpec {
                    name: "checking_account".to_string(),
                    label: "Checking Account (DM)".to_string(),
                    min: CHECKING_ACCOUNT_MIN,
                    max: CHECKING_ACCOUNT_MAX,
                    default: CHECKING_ACCOUNT_DEFAULT,
                },
                NumericFieldSpec {
                    name: "duration".to_string(),
                    label: "Duration (Months)".to_string(),
                    min: DURATION_MIN,
                    max: DURATION_MAX,
                    default: DURATION_DEFAULT,
                },
                NumericFieldSpec {
                    name: "credit_amount".to_string(),
                    label: "Credit Amount (DM)".to_string(),
                    min: CREDIT_AMOUNT_MIN,
                    max: CREDIT_AMOUNT_MAX,
                    default: CREDIT_AMOUNT_DEFAULT,
                },
                NumericFieldSpec {
                    name: "age".to_string(),
                    label: "Age".to_string(),
                    min: AGE_MIN,
                    max: AGE_MAX,
                    default: AGE_DEFAULT,
                },
            ],
            choice: vec![
                ChoiceFieldSpec {
                    name: "sex".to_string(),
                    label: "Sex".to_string(),
                    choices: SEX_CHOICES.iter().map(|s| s.to_string()).collect(),
                    default: default_sex(),
                },
                ChoiceFieldSpec {
                    name: "housing".to_string(),
                    label: "Housing".to_string(),
                    choices: HOUSING_CHOICES.iter().map(|s| s.to_string()).collect(),
                    default: default_housing(),
                },
            ],
        }
    }
}

// ============================================================================
// COLLECT
// ============================================================================

/// Assemble one complete record from form input plus the constant profile.
///
/// Numeric inputs are clamped to their control bounds; the controls already
/// enforce them, so clamping never changes an in-range value.
pub fn collect(input: &ApplicantInput, defaults: &ProfileDefaults) -> FeatureRecord {
    FeatureRecordBuilder::new()
        .checking_account(input.checking_account.clamp(CHECKING_ACCOUNT_MIN, CHECKING_ACCOUNT_MAX))
        .duration(input.duration.clamp(DURATION_MIN, DURATION_MAX))
        .credit_amount(input.credit_amount.clamp(CREDIT_AMOUNT_MIN, CREDIT_AMOUNT_MAX))
        .age(input.age.clamp(AGE_MIN, AGE_MAX))
        .sex(&input.sex)
        .housing(&input.housing)
        .set("credit_history", defaults.credit_history.as_str())
        .set("purpose", defaults.purpose.as_str())
        .set("savings_status", defaults.savings_status.as_str())
        .set("employment", defaults.employment.as_str())
        .set("installment_commitment", defaults.installment_commitment)
        .set("other_parties", defaults.other_parties.as_str())
        .set("residence_since", defaults.residence_since)
        .set("property_magnitude", defaults.property_magnitude.as_str())
        .set("other_payment_plans", defaults.other_payment_plans.as_str())
        .set("existing_credits", defaults.existing_credits)
        .set("job", defaults.job.as_str())
        .set("num_dependents", defaults.num_dependents)
        .set("own_telephone", defaults.own_telephone.as_str())
        .set("foreign_worker", defaults.foreign_worker.as_str())
        .build()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::features::record::FieldValue;

    #[test]
    fn test_collect_is_complete() {
        let record = collect(&ApplicantInput::default(), &ProfileDefaults::default());
        assert!(record.is_complete());
        assert!(record.missing_fields().is_empty());
    }

    #[test]
    fn test_collect_merges_input_and_defaults() {
        let input = ApplicantInput {
            duration: 36.0,
            credit_amount: 8000.0,
            age: 45.0,
            sex: "female".to_string(),
            housing: "rent".to_string(),
            ..ApplicantInput::default()
        };
        let record = collect(&input, &ProfileDefaults::default());

        assert_eq!(record.get_by_name("duration"), Some(&FieldValue::Number(36.0)));
        assert_eq!(record.get_by_name("sex"), Some(&FieldValue::Text("female".to_string())));
        assert_eq!(record.get_by_name("housing"), Some(&FieldValue::Text("rent".to_string())));
        // Constant profile fields come from defaults
        assert_eq!(
            record.get_by_name("purpose"),
            Some(&FieldValue::Text("radio/tv".to_string()))
        );
        assert_eq!(
            record.get_by_name("installment_commitment"),
            Some(&FieldValue::Number(4.0))
        );
    }

    #[test]
    fn test_collect_clamps_out_of_range_numerics() {
        let input = ApplicantInput {
            duration: 500.0,
            credit_amount: 1.0,
            age: 12.0,
            ..ApplicantInput::default()
        };
        let record = collect(&input, &ProfileDefaults::default());

        assert_eq!(record.get_by_name("duration"), Some(&FieldValue::Number(DURATION_MAX)));
        assert_eq!(
            record.get_by_name("credit_amount"),
            Some(&FieldValue::Number(CREDIT_AMOUNT_MIN))
        );
        assert_eq!(record.get_by_name("age"), Some(&FieldValue::Number(AGE_MIN)));
    }

    #[test]
    fn test_collect_deterministic() {
        let input = ApplicantInput::default();
        let defaults = ProfileDefaults::default();
        let a = collect(&input, &defaults);
        let b = collect(&input, &defaults);
        assert_eq!(a.values, b.values);
    }

    #[test]
    fn test_input_defaults_match_schema() {
        let schema = FormSchema::current();
        let input = ApplicantInput::default();

        let duration = schema.numeric.iter().find(|f| f.name == "duration").unwrap();
        assert_eq!(duration.default, input.duration);
        assert_eq!(duration.min, DURATION_MIN);
        assert_eq!(duration.max, DURATION_MAX);

        let housing = schema.choice.iter().find(|f| f.name == "housing").unwrap();
        assert_eq!(housing.default, input.housing);
        assert!(housing.choices.contains(&"rent".to_string()));
    }

    #[test]
    fn test_input_deserializes_with_partial_fields() {
        // Frontend may send only the fields the user touched
        let input: ApplicantInput = serde_json::from_str(r#"{"age": 52}"#).unwrap();
        assert_eq!(input.age, 52.0);
        assert_eq!(input.duration, DURATION_DEFAULT);
        assert_eq!(input.sex, "male");
    }
}
