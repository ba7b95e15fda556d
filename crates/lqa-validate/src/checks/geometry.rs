//! Missing geometry checks.

use lqa_model::{GeometryRecord, Issue};

/// Flag geometry feed records without a shape, in record order.
pub fn check(records: &[GeometryRecord]) -> Vec<Issue> {
    let issues: Vec<Issue> = records
        .iter()
        .filter(|record| !record.geometry_present)
        .map(|record| Issue::missing_geometry(&record.id))
        .collect();

    if issues.is_empty() {
        tracing::debug!("all features have geometry");
    } else {
        tracing::debug!(missing = issues.len(), "missing geometry found");
    }

    issues
}

#[cfg(test)]
mod tests {
    use lqa_model::GEOMETRY_FIELD;

    use super::*;

    #[test]
    fn test_flags_only_missing() {
        let records = vec![
            GeometryRecord::new(1, false),
            GeometryRecord::new(2, true),
            GeometryRecord::new(3, false),
        ];

        let issues = check(&records);
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().all(|issue| issue.field_name == GEOMETRY_FIELD));
        assert_eq!(issues[1].object_id.to_string(), "3");
    }
}
