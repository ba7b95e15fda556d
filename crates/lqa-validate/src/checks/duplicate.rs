//! Duplicate value checks.
//!
//! Groups records by value per field and flags every member of a group with
//! two or more members. Nulls never group with each other.

use std::collections::HashMap;

use lqa_model::{Issue, Record, TextMatching, ValueKey};

/// Check fields for repeated non-null values.
///
/// Groups are emitted in the order their value is first seen; members follow
/// record order. The caller removes exempt fields before calling.
pub fn check<S: AsRef<str>>(
    records: &[Record],
    fields: &[S],
    matching: TextMatching,
) -> Vec<Issue> {
    let mut issues = Vec::new();

    for field in fields {
        let field = field.as_ref();
        let groups = group_by_value(records, field, matching);

        let mut duplicate_values = 0usize;
        for members in groups.iter().filter(|members| members.len() > 1) {
            duplicate_values += 1;
            for record in members {
                if let Some(value) = record.get(field) {
                    issues.push(Issue::duplicate_value(field, &record.id, value));
                }
            }
        }

        if duplicate_values == 0 {
            tracing::debug!(field, "no duplicates");
        } else {
            tracing::debug!(field, duplicate_values, "duplicates found");
        }
    }

    issues
}

/// Group records by value key, preserving first-encounter order.
fn group_by_value<'a>(
    records: &'a [Record],
    field: &str,
    matching: TextMatching,
) -> Vec<Vec<&'a Record>> {
    let mut index: HashMap<ValueKey, usize> = HashMap::new();
    let mut groups: Vec<Vec<&Record>> = Vec::new();

    for record in records {
        let Some(key) = record.get(field).and_then(|value| value.key_with(matching)) else {
            continue;
        };

        match index.get(&key) {
            Some(&slot) => groups[slot].push(record),
            None => {
                index.insert(key, groups.len());
                groups.push(vec![record]);
            }
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use lqa_model::Value;

    use super::*;

    fn ids(issues: &[Issue]) -> Vec<String> {
        issues.iter().map(|issue| issue.object_id.to_string()).collect()
    }

    #[test]
    fn test_groups_in_first_encounter_order() {
        let records = vec![
            Record::new(1).with("Name", "B"),
            Record::new(2).with("Name", "A"),
            Record::new(3).with("Name", "B"),
            Record::new(4).with("Name", "A"),
            Record::new(5).with("Name", "C"),
        ];

        let issues = check(&records, &["Name"], TextMatching::CaseSensitive);
        assert_eq!(ids(&issues), vec!["1", "3", "2", "4"]);
        assert_eq!(issues[0].value, Value::from("B"));
        assert_eq!(issues[2].value, Value::from("A"));
    }

    #[test]
    fn test_nulls_are_not_duplicates() {
        let records = vec![
            Record::new(1).with("Name", Value::Null),
            Record::new(2).with("Name", Value::Null),
            Record::new(3),
            Record::new(4),
        ];
        assert!(check(&records, &["Name"], TextMatching::CaseSensitive).is_empty());
    }

    #[test]
    fn test_numeric_equality_is_semantic() {
        let records = vec![
            Record::new(1).with("Parcel", 12_i64),
            Record::new(2).with("Parcel", 12.0),
        ];
        assert_eq!(
            check(&records, &["Parcel"], TextMatching::CaseSensitive).len(),
            2
        );
    }

    #[test]
    fn test_case_insensitive_matching() {
        let records = vec![
            Record::new(1).with("Street", "Main St"),
            Record::new(2).with("Street", "MAIN ST"),
        ];
        assert!(check(&records, &["Street"], TextMatching::CaseSensitive).is_empty());

        let issues = check(&records, &["Street"], TextMatching::CaseInsensitive);
        assert_eq!(ids(&issues), vec!["1", "2"]);
        // Each issue keeps the record's own spelling.
        assert_eq!(issues[1].value, Value::from("MAIN ST"));
    }
}
