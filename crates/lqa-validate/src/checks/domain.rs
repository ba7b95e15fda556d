//! Coded-value domain checks.
//!
//! Only fields with a coded domain are checked; the rest are skipped.

use lqa_model::{FieldCatalog, Issue, Record};

/// Check domain fields (catalog order) for values outside the code set.
pub fn check(records: &[Record], catalog: &FieldCatalog) -> Vec<Issue> {
    let mut issues = Vec::new();

    for (field, domain) in catalog.domain_fields() {
        let before = issues.len();

        for record in records {
            let Some(value) = record.get(&field.name) else {
                continue;
            };
            if value.is_null() || domain.contains(value) {
                continue;
            }
            issues.push(Issue::invalid_domain_value(
                &field.name,
                &record.id,
                value,
                domain,
            ));
        }

        let invalid_count = issues.len() - before;
        if invalid_count == 0 {
            tracing::debug!(field = %field.name, "all domain values valid");
        } else {
            tracing::debug!(
                field = %field.name,
                invalid_count,
                codes = %domain.describe_codes(),
                "invalid coded values found"
            );
        }
    }

    issues
}
