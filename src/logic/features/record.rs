//! Feature Record - Core data structure for model input
//!
//! **Versioned applicant record with layout validation**
//!
//! Uses centralized layout from `layout.rs` for:
//! - Consistent field ordering
//! - Version tracking
//! - Layout hash for compatibility checks

use serde::{Deserialize, Serialize};
use super::layout::{
    FIELD_COUNT, FIELD_VERSION, FIELD_LAYOUT,
    layout_hash, validate_layout, LayoutMismatchError,
};

// ============================================================================
// FIELD VALUE
// ============================================================================

/// One applicant field value, numeric or categorical
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

impl FieldValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Number(_) => None,
            FieldValue::Text(s) => Some(s.as_str()),
        }
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Number(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Text(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Text(v)
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Text(s) => write!(f, "{}", s),
        }
    }
}

// ============================================================================
// VERSIONED FEATURE RECORD
// ============================================================================

/// Versioned applicant record with layout metadata
///
/// This struct MUST be used for all applicant data going to the
/// preprocessor. Never pass loose maps or tuples of values around.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureRecord {
    /// Field layout version
    pub version: u8,
    /// CRC32 hash of the field layout (for mismatch detection)
    pub layout_hash: u32,
    /// Field values in order defined by FIELD_LAYOUT; None = not yet set
    pub values: Vec<Option<FieldValue>>,
}

impl FeatureRecord {
    /// Create a new empty record with current version
    pub fn new() -> Self {
        Self {
            version: FIELD_VERSION,
            layout_hash: layout_hash(),
            values: vec![None; FIELD_COUNT],
        }
    }

    /// Get value by index
    pub fn get(&self, index: usize) -> Option<&FieldValue> {
        self.values.get(index).and_then(|v| v.as_ref())
    }

    /// Get value by field name
    pub fn get_by_name(&self, name: &str) -> Option<&FieldValue> {
        super::layout::field_index(name).and_then(|i| self.get(i))
    }

    /// Set value by index
    pub fn set(&mut self, index: usize, value: FieldValue) {
        if index < FIELD_COUNT {
            self.values[index] = Some(value);
        }
    }

    /// Set value by field name
    pub fn set_by_name(&mut self, name: &str, value: impl Into<FieldValue>) -> bool {
        if let Some(index) = super::layout::field_index(name) {
            self.set(index, value.into());
            true
        } else {
            false
        }
    }

    /// True when every field in the layout has a value
    pub fn is_complete(&self) -> bool {
        self.values.iter().all(|v| v.is_some())
    }

    /// Names of fields that have no value yet
    pub fn missing_fields(&self) -> Vec<&'static str> {
        self.values
            .iter()
            .enumerate()
            .filter(|(_, v)| v.is_none())
            .filter_map(|(i, _)| super::layout::field_name(i))
            .collect()
    }

    /// Validate that this record is compatible with current layout
    pub fn validate(&self) -> Result<(), LayoutMismatchError> {
        validate_layout(self.version, self.layout_hash)
    }

    /// Check if this record is compatible with current layout
    pub fn is_compatible(&self) -> bool {
        self.validate().is_ok()
    }

    /// Convert to JSON object keyed by field name (raw-input debug view)
    pub fn to_log_entry(&self) -> serde_json::Value {
        serde_json::json!({
            "field_version": self.version,
            "layout_hash": self.layout_hash,
            "named_values": FIELD_LAYOUT.iter()
                .zip(self.values.iter())
                .map(|(field, value)| {
                    let v = match value {
                        Some(v) => serde_json::to_value(v).unwrap_or(serde_json::Value::Null),
                        None => serde_json::Value::Null,
                    };
                    (field.name.to_string(), v)
                })
                .collect::<serde_json::Map<_, _>>(),
        })
    }
}

impl Default for FeatureRecord {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// BUILDER PATTERN
// ============================================================================

/// Builder for creating FeatureRecord with named setters
pub struct FeatureRecordBuilder {
    record: FeatureRecord,
}

impl FeatureRecordBuilder {
    pub fn new() -> Self {
        Self { record: FeatureRecord::new() }
    }

    // User-variable fields
    pub fn checking_account(mut self, value: f64) -> Self {
        self.record.set_by_name("checking_account", value);
        self
    }

    pub fn duration(mut self, value: f64) -> Self {
        self.record.set_by_name("duration", value);
        self
    }

    pub fn credit_amount(mut self, value: f64) -> Self {
        self.record.set_by_name("credit_amount", value);
        self
    }

    pub fn age(mut self, value: f64) -> Self {
        self.record.set_by_name("age", value);
        self
    }

    pub fn sex(mut self, value: &str) -> Self {
        self.record.set_by_name("sex", value);
        self
    }

    pub fn housing(mut self, value: &str) -> Self {
        self.record.set_by_name("housing", value);
        self
    }

    /// Set any field by name dynamically
    pub fn set(mut self, name: &str, value: impl Into<FieldValue>) -> Self {
        self.record.set_by_name(name, value);
        self
    }

    pub fn build(self) -> FeatureRecord {
        self.record
    }
}

impl Default for FeatureRecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_new() {
        let record = FeatureRecord::new();
        assert_eq!(record.version, FIELD_VERSION);
        assert_eq!(record.layout_hash, layout_hash());
        assert_eq!(record.values.len(), FIELD_COUNT);
        assert!(!record.is_complete());
        assert_eq!(record.missing_fields().len(), FIELD_COUNT);
    }

    #[test]
    fn test_record_builder() {
        let record = FeatureRecordBuilder::new()
            .duration(24.0)
            .credit_amount(5000.0)
            .housing("own")
            .build();

        assert_eq!(record.get_by_name("duration"), Some(&FieldValue::Number(24.0)));
        assert_eq!(
            record.get_by_name("housing"),
            Some(&FieldValue::Text("own".to_string()))
        );
        assert!(record.get_by_name("age").is_none());
    }

    #[test]
    fn test_record_set_by_name() {
        let mut record = FeatureRecord::new();
        assert!(record.set_by_name("age", 30.0));
        assert_eq!(record.get_by_name("age"), Some(&FieldValue::Number(30.0)));

        assert!(!record.set_by_name("nonexistent", 0.0));
    }

    #[test]
    fn test_missing_fields() {
        let mut record = FeatureRecord::new();
        record.set_by_name("duration", 24.0);

        let missing = record.missing_fields();
        assert_eq!(missing.len(), FIELD_COUNT - 1);
        assert!(!missing.contains(&"duration"));
        assert!(missing.contains(&"age"));
    }

    #[test]
    fn test_record_validation() {
        let record = FeatureRecord::new();
        assert!(record.is_compatible());
        assert!(record.validate().is_ok());

        let stale = FeatureRecord {
            version: FIELD_VERSION + 1,
            ..FeatureRecord::new()
        };
        assert!(!stale.is_compatible());
    }

    #[test]
    fn test_field_value_accessors() {
        let n = FieldValue::Number(42.0);
        let t = FieldValue::Text("own".to_string());

        assert_eq!(n.as_number(), Some(42.0));
        assert_eq!(n.as_text(), None);
        assert_eq!(t.as_text(), Some("own"));
        assert_eq!(t.as_number(), None);
    }

    #[test]
    fn test_to_log_entry() {
        let record = FeatureRecordBuilder::new()
            .duration(24.0)
            .sex("male")
            .build();

        let log = record.to_log_entry();
        assert_eq!(log["field_version"], FIELD_VERSION);
        assert_eq!(log["named_values"]["duration"], 24.0);
        assert_eq!(log["named_values"]["sex"], "male");
        assert!(log["named_values"]["purpose"].is_null());
    }
}
