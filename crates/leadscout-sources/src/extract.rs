//! Field-fallback extraction for loosely shaped provider items.
//!
//! Providers disagree on key names. Each helper walks an ordered list of
//! candidate keys and returns the first non-empty value.

use serde_json::{Map, Value};

/// Candidate keys for the company name.
pub const NAME_FIELDS: &[&str] = &["company_name", "name", "company", "organization"];
/// Candidate keys for the company web address.
pub const DOMAIN_FIELDS: &[&str] = &["website", "url", "homepage", "domain"];
/// Candidate keys for the contact email.
pub const EMAIL_FIELDS: &[&str] = &["email", "contact_email", "primary_email"];
/// Candidate keys for the industry.
pub const INDUSTRY_FIELDS: &[&str] = &["industry", "sector", "business_type", "category"];
/// Candidate keys for the company identifier.
pub const ID_FIELDS: &[&str] = &["company_id", "id"];

/// First non-empty value among `fields`, rendered as a string.
///
/// Strings are trimmed; numbers and booleans are formatted. Nulls, empty
/// strings, arrays and objects are skipped.
#[must_use]
pub fn first_present(item: &Map<String, Value>, fields: &[&str]) -> Option<String> {
    fields.iter().find_map(|field| match item.get(*field)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

/// Company name of an item.
#[must_use]
pub fn extract_name(item: &Map<String, Value>) -> Option<String> {
    first_present(item, NAME_FIELDS)
}

/// Company web address of an item.
#[must_use]
pub fn extract_domain(item: &Map<String, Value>) -> Option<String> {
    first_present(item, DOMAIN_FIELDS)
}

/// Contact email of an item.
#[must_use]
pub fn extract_email(item: &Map<String, Value>) -> Option<String> {
    first_present(item, EMAIL_FIELDS)
}

/// Industry of an item.
#[must_use]
pub fn extract_industry(item: &Map<String, Value>) -> Option<String> {
    first_present(item, INDUSTRY_FIELDS)
}

/// Company identifier of an item.
#[must_use]
pub fn extract_id(item: &Map<String, Value>) -> Option<String> {
    first_present(item, ID_FIELDS)
}
