//! Field Layout - Centralized Applicant Schema Definition
//!
//! **CRITICAL: This file controls the applicant field schema**
//!
//! ## Rules (NEVER break these):
//! 1. Add field → increment FIELD_VERSION
//! 2. Change order or kind → increment FIELD_VERSION
//! 3. Remove field → increment FIELD_VERSION
//!
//! ## Why versioning matters:
//! - Preprocessor artifact compatibility
//! - Classifier input compatibility
//! - Cross-version migrations

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

// ============================================================================
// FIELD VERSION
// ============================================================================

/// Current field layout version
/// MUST be incremented when layout changes
pub const FIELD_VERSION: u8 = 1;

// ============================================================================
// FIELD KIND
// ============================================================================

/// How a field is encoded by the fitted preprocessor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldKind {
    /// Scaled to a single dense column
    Numeric,
    /// One-hot encoded over the fitted vocabulary
    Categorical,
}

/// One entry of the applicant schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    pub name: &'static str,
    pub kind: FieldKind,
}

// ============================================================================
// FIELD LAYOUT (Authoritative source)
// ============================================================================

/// Applicant fields in exact record order
/// This is the SINGLE SOURCE OF TRUTH for the field layout
pub const FIELD_LAYOUT: &[FieldDef] = &[
    // === Account standing (0-1) ===
    FieldDef { name: "checking_account", kind: FieldKind::Numeric },      // 0: Checking balance (DM)
    FieldDef { name: "duration", kind: FieldKind::Numeric },              // 1: Loan duration (months)

    // === Credit history (2-4) ===
    FieldDef { name: "credit_history", kind: FieldKind::Categorical },    // 2: Past repayment record
    FieldDef { name: "purpose", kind: FieldKind::Categorical },           // 3: What the loan is for
    FieldDef { name: "credit_amount", kind: FieldKind::Numeric },         // 4: Requested amount (DM)

    // === Means (5-7) ===
    FieldDef { name: "savings_status", kind: FieldKind::Categorical },    // 5: Savings bracket
    FieldDef { name: "employment", kind: FieldKind::Categorical },        // 6: Employment duration bracket
    FieldDef { name: "installment_commitment", kind: FieldKind::Numeric },// 7: Installment rate (% of income)

    // === Personal (8-12) ===
    FieldDef { name: "sex", kind: FieldKind::Categorical },               // 8: Applicant sex
    FieldDef { name: "other_parties", kind: FieldKind::Categorical },     // 9: Co-applicant / guarantor
    FieldDef { name: "residence_since", kind: FieldKind::Numeric },       // 10: Years at current residence
    FieldDef { name: "property_magnitude", kind: FieldKind::Categorical },// 11: Most valuable property
    FieldDef { name: "age", kind: FieldKind::Numeric },                   // 12: Age (years)

    // === Obligations (13-15) ===
    FieldDef { name: "other_payment_plans", kind: FieldKind::Categorical },// 13: Other installment plans
    FieldDef { name: "housing", kind: FieldKind::Categorical },            // 14: Housing situation
    FieldDef { name: "existing_credits", kind: FieldKind::Numeric },       // 15: Credits at this bank

    // === Status (16-19) ===
    FieldDef { name: "job", kind: FieldKind::Categorical },               // 16: Job qualification bracket
    FieldDef { name: "num_dependents", kind: FieldKind::Numeric },        // 17: People maintained
    FieldDef { name: "own_telephone", kind: FieldKind::Categorical },     // 18: Registered telephone
    FieldDef { name: "foreign_worker", kind: FieldKind::Categorical },    // 19: Foreign worker flag
];

/// Total number of fields
/// IMPORTANT: Must match FIELD_LAYOUT.len()!
pub const FIELD_COUNT: usize = 20;

// ============================================================================
// LAYOUT HASH
// ============================================================================

/// Compute CRC32 hash of the field layout
/// Used to detect layout mismatches against preprocessor artifacts
pub fn compute_layout_hash() -> u32 {
    let mut hasher = Hasher::new();

    // Include version in hash
    hasher.update(&[FIELD_VERSION]);

    // Hash all field names and kinds in order
    for field in FIELD_LAYOUT {
        hasher.update(field.name.as_bytes());
        hasher.update(&[match field.kind {
            FieldKind::Numeric => 1,
            FieldKind::Categorical => 2,
        }]);
        hasher.update(&[0]); // Separator
    }

    hasher.finalize()
}

/// Get layout hash (inputs are const, so this is stable per build)
pub fn layout_hash() -> u32 {
    compute_layout_hash()
}

// ============================================================================
// LAYOUT INFO
// ============================================================================

/// Complete layout information for serialization/logging
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutInfo {
    pub version: u8,
    pub hash: u32,
    pub field_count: usize,
    pub field_names: Vec<String>,
}

impl LayoutInfo {
    pub fn current() -> Self {
        Self {
            version: FIELD_VERSION,
            hash: layout_hash(),
            field_count: FIELD_COUNT,
            field_names: FIELD_LAYOUT.iter().map(|f| f.name.to_string()).collect(),
        }
    }
}

impl Default for LayoutInfo {
    fn default() -> Self {
        Self::current()
    }
}

// ============================================================================
// LAYOUT VALIDATION
// ============================================================================

/// Error when a record or artifact doesn't match the current layout
#[derive(Debug, Clone)]
pub struct LayoutMismatchError {
    pub expected_version: u8,
    pub expected_hash: u32,
    pub actual_version: u8,
    pub actual_hash: u32,
}

impl std::fmt::Display for LayoutMismatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Field layout mismatch: expected v{} (hash: {:08x}), got v{} (hash: {:08x})",
            self.expected_version,
            self.expected_hash,
            self.actual_version,
            self.actual_hash
        )
    }
}

impl std::error::Error for LayoutMismatchError {}

/// Validate that incoming data matches current layout
pub fn validate_layout(incoming_version: u8, incoming_hash: u32) -> Result<(), LayoutMismatchError> {
    let current_hash = layout_hash();

    if incoming_version != FIELD_VERSION || incoming_hash != current_hash {
        return Err(LayoutMismatchError {
            expected_version: FIELD_VERSION,
            expected_hash: current_hash,
            actual_version: incoming_version,
            actual_hash: incoming_hash,
        });
    }

    Ok(())
}

/// Check if layout is compatible (same version, same hash)
pub fn is_layout_compatible(version: u8, hash: u32) -> bool {
    version == FIELD_VERSION && hash == layout_hash()
}

// ============================================================================
// FIELD LOOKUP
// ============================================================================

/// Get field index by name (O(n) but fields are few)
pub fn field_index(name: &str) -> Option<usize> {
    FIELD_LAYOUT.iter().position(|f| f.name == name)
}

/// Get field name by index
pub fn field_name(index: usize) -> Option<&'static str> {
    FIELD_LAYOUT.get(index).map(|f| f.name)
}

/// Get field kind by index
pub fn field_kind(index: usize) -> Option<FieldKind> {
    FIELD_LAYOUT.get(index).map(|f| f.kind)
}

/// Get field kind by name
pub fn field_kind_by_name(name: &str) -> Option<FieldKind> {
    field_index(name).and_then(field_kind)
}

/// Count of numeric fields in the layout
pub fn numeric_field_count() -> usize {
    FIELD_LAYOUT.iter().filter(|f| f.kind == FieldKind::Numeric).count()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_count() {
        assert_eq!(FIELD_COUNT, 20);
        assert_eq!(FIELD_LAYOUT.len(), FIELD_COUNT);
    }

    #[test]
    fn test_numeric_fields() {
        // duration, credit_amount, age, checking_account plus the four
        // fixed-integer fields are the only numeric columns
        assert_eq!(numeric_field_count(), 8);
        assert_eq!(field_kind_by_name("checking_account"), Some(FieldKind::Numeric));
        assert_eq!(field_kind_by_name("duration"), Some(FieldKind::Numeric));
        assert_eq!(field_kind_by_name("credit_amount"), Some(FieldKind::Numeric));
        assert_eq!(field_kind_by_name("age"), Some(FieldKind::Numeric));
        assert_eq!(field_kind_by_name("housing"), Some(FieldKind::Categorical));
        assert_eq!(field_kind_by_name("sex"), Some(FieldKind::Categorical));
    }

    #[test]
    fn test_layout_hash_consistency() {
        // Hash should be consistent across calls
        let hash1 = compute_layout_hash();
        let hash2 = compute_layout_hash();
        assert_eq!(hash1, hash2);
    }

    #[test]
    fn test_layout_hash_non_zero() {
        let hash = layout_hash();
        assert_ne!(hash, 0);
    }

    #[test]
    fn test_validate_layout_success() {
        let result = validate_layout(FIELD_VERSION, layout_hash());
        assert!(result.is_ok());
    }

    #[test]
    fn test_validate_layout_version_mismatch() {
        let result = validate_layout(FIELD_VERSION + 1, layout_hash());
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_layout_hash_mismatch() {
        let result = validate_layout(FIELD_VERSION, layout_hash().wrapping_add(1));
        assert!(result.is_err());
    }

    #[test]
    fn test_field_index() {
        assert_eq!(field_index("checking_account"), Some(0));
        assert_eq!(field_index("credit_history"), Some(2));
        assert_eq!(field_index("foreign_worker"), Some(19));
        assert_eq!(field_index("nonexistent"), None);
    }

    #[test]
    fn test_field_name() {
        assert_eq!(field_name(0), Some("checking_account"));
        assert_eq!(field_name(19), Some("foreign_worker"));
        assert_eq!(field_name(100), None);
    }

    #[test]
    fn test_layout_info() {
        let info = LayoutInfo::current();
        assert_eq!(info.version, FIELD_VERSION);
        assert_eq!(info.field_count, FIELD_COUNT);
        assert_eq!(info.field_names.len(), FIELD_COUNT);
    }
}
