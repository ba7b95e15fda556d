//! Null value checks.
//!
//! Flags every record carrying a checked field with a null value. A record
//! that does not carry the field at all is not flagged.

use lqa_model::{Issue, Record};

/// Check fields for null values, field by field in record order.
pub fn check<S: AsRef<str>>(records: &[Record], fields: &[S]) -> Vec<Issue> {
    let mut issues = Vec::new();

    for field in fields {
        let field = field.as_ref();
        let before = issues.len();

        for record in records {
            if record.get(field).is_some_and(|value| value.is_null()) {
                issues.push(Issue::null_value(field, &record.id));
            }
        }

        let null_count = issues.len() - before;
        if null_count == 0 {
            tracing::debug!(field, "no null values");
        } else {
            tracing::debug!(field, null_count, "null values found");
        }
    }

    issues
}
