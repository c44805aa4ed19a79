//! Features Module - Applicant Record Assembly
//!
//! The field schema, the record type, and the form collector that turns
//! bounded user input plus the constant profile into one complete record.

pub mod form;
pub mod layout;
pub mod record;


// Re-export common types
pub use form::{ApplicantInput, FormSchema, ProfileDefaults};
pub use layout::{FIELD_COUNT, FIELD_VERSION};
pub use record::{FeatureRecord, FieldValue};
