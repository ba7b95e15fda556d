//! Integration tests for the validation engine.

use lqa_model::{
    CodedDomain, Diagnostic, Field, FieldCatalog, FieldType, GEOMETRY_FIELD, GeometryRecord,
    Issue, IssueKind, Record, RecordId, RuleKind, TextMatching, Value,
};
use lqa_validate::{
    Feed, ValidationConfig, ValidationEngine, ValidationError, ValidationInput, validate,
};

fn text_catalog(names: &[&str]) -> FieldCatalog {
    FieldCatalog::new(
        names
            .iter()
            .map(|name| Field::new(*name, FieldType::Text))
            .collect(),
    )
    .unwrap()
}

fn summarize(issues: &[Issue]) -> Vec<(IssueKind, String, String)> {
    issues
        .iter()
        .map(|issue| {
            (
                issue.kind,
                issue.field_name.clone(),
                issue.object_id.to_string(),
            )
        })
        .collect()
}

#[test]
fn scenario_null_status() {
    let catalog = FieldCatalog::new(vec![
        Field::new("ID", FieldType::Integer),
        Field::new("Status", FieldType::Text),
    ])
    .unwrap();
    let records = vec![
        Record::new(1).with("ID", 1_i64).with("Status", Value::Null),
        Record::new(2).with("ID", 2_i64).with("Status", "Active"),
    ];

    let outcome = validate(&catalog, &records, None, ValidationConfig::default()).unwrap();

    assert_eq!(
        outcome.report.issues(),
        &[Issue::null_value("Status", &RecordId::from(1))]
    );
}

#[test]
fn scenario_invalid_domain_code() {
    let domain = CodedDomain::new(vec![Value::from("A"), Value::from("B")]).unwrap();
    let catalog =
        FieldCatalog::new(vec![Field::new("Code", FieldType::Text).with_domain(domain)]).unwrap();
    let records = vec![
        Record::new(1).with("Code", "C"),
        Record::new(2).with("Code", "A"),
    ];

    let outcome = validate(&catalog, &records, None, ValidationConfig::default()).unwrap();
    let issues = outcome.report.issues();

    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].kind, IssueKind::InvalidDomainValue);
    assert_eq!(issues[0].field_name, "Code");
    assert_eq!(issues[0].object_id, RecordId::from(1));
    assert_eq!(issues[0].value, Value::from("C"));
    assert_eq!(
        issues[0].notes.as_deref(),
        Some("Not in valid domain list: ['A', 'B']")
    );
}

#[test]
fn scenario_duplicate_name() {
    let catalog = text_catalog(&["Name"]);
    let records = vec![
        Record::new(1).with("Name", "X"),
        Record::new(2).with("Name", "X"),
        Record::new(3).with("Name", "Y"),
    ];

    let outcome = validate(&catalog, &records, None, ValidationConfig::default()).unwrap();

    assert_eq!(
        summarize(outcome.report.issues()),
        vec![
            (IssueKind::DuplicateValue, "Name".into(), "1".into()),
            (IssueKind::DuplicateValue, "Name".into(), "2".into()),
        ]
    );
    assert!(
        outcome
            .report
            .iter()
            .all(|issue| issue.value == Value::from("X"))
    );
}

#[test]
fn scenario_missing_geometry() {
    let catalog = text_catalog(&["Name"]);
    let records = vec![
        Record::new(1).with("Name", "a"),
        Record::new(2).with("Name", "b"),
    ];
    let shapes = vec![GeometryRecord::new(1, false), GeometryRecord::new(2, true)];

    let outcome = validate(
        &catalog,
        &records,
        Some(shapes.as_slice()),
        ValidationConfig::default(),
    )
    .unwrap();

    assert_eq!(
        summarize(outcome.report.issues()),
        vec![(IssueKind::MissingGeometry, GEOMETRY_FIELD.into(), "1".into())]
    );
}

#[test]
fn scenario_empty_record_set() {
    let catalog = text_catalog(&["Name", "Status"]);
    let outcome = validate(&catalog, &[], Some(&[][..]), ValidationConfig::default()).unwrap();

    assert!(outcome.report.is_empty());
    assert!(outcome.diagnostics.is_empty());
    assert_eq!(outcome.rules_run, RuleKind::all());
}

#[test]
fn rules_run_in_fixed_order() {
    let domain = CodedDomain::new(vec![Value::from("A")]).unwrap();
    let catalog = FieldCatalog::new(vec![
        Field::new("Name", FieldType::Text),
        Field::new("Code", FieldType::Text).with_domain(domain),
    ])
    .unwrap();
    let records = vec![
        Record::new(1).with("Name", "X").with("Code", "Z"),
        Record::new(2).with("Name", "X").with("Code", Value::Null),
    ];
    let shapes = vec![GeometryRecord::new(1, false), GeometryRecord::new(2, true)];

    let outcome = validate(
        &catalog,
        &records,
        Some(shapes.as_slice()),
        ValidationConfig::default(),
    )
    .unwrap();

    let kinds: Vec<IssueKind> = outcome.report.iter().map(|issue| issue.kind).collect();
    assert_eq!(
        kinds,
        vec![
            IssueKind::NullValue,
            IssueKind::DuplicateValue,
            IssueKind::DuplicateValue,
            IssueKind::InvalidDomainValue,
            IssueKind::MissingGeometry,
        ]
    );
    assert_eq!(outcome.report.count(IssueKind::DuplicateValue), 2);
}

#[test]
fn absent_geometry_feed_skips_rule() {
    let catalog = text_catalog(&["Name"]);
    let records = vec![Record::new(1).with("Name", "a")];

    let without = validate(&catalog, &records, None, ValidationConfig::default()).unwrap();
    assert_eq!(
        without.rules_run,
        vec![RuleKind::Null, RuleKind::Duplicate, RuleKind::Domain]
    );

    let shapes = vec![GeometryRecord::new(1, false)];
    let with = validate(
        &catalog,
        &records,
        Some(shapes.as_slice()),
        ValidationConfig::default(),
    )
    .unwrap();
    assert_eq!(with.report.count(IssueKind::MissingGeometry), 1);
}

#[test]
fn exempt_fields_are_never_duplicate_checked() {
    let catalog = text_catalog(&["City", "Name"]);
    let records = vec![
        Record::new(1).with("City", "Springfield").with("Name", "a"),
        Record::new(2).with("City", "Springfield").with("Name", "b"),
    ];
    let config = ValidationConfig::default().with_duplicate_exemptions(["city"]);

    let outcome = validate(&catalog, &records, None, config).unwrap();

    assert!(outcome.report.is_empty());
    assert!(outcome.diagnostics.is_empty());
}

#[test]
fn unknown_configured_fields_become_diagnostics() {
    let catalog = text_catalog(&["Name", "Status"]);
    let records = vec![
        Record::new(1).with("Name", Value::Null).with("Status", Value::Null),
    ];
    let config = ValidationConfig::default()
        .with_checked_fields(["Name", "Owner"])
        .with_duplicate_exemptions(["Zip_Code"]);

    let outcome = validate(&catalog, &records, None, config).unwrap();

    // Only Name is checked; Owner is skipped rather than aborting the run.
    assert_eq!(
        summarize(outcome.report.issues()),
        vec![(IssueKind::NullValue, "Name".into(), "1".into())]
    );
    assert_eq!(
        outcome.diagnostics,
        vec![
            Diagnostic::UnknownField {
                rule: RuleKind::Null,
                field: "Owner".into()
            },
            Diagnostic::UnknownField {
                rule: RuleKind::Duplicate,
                field: "Owner".into()
            },
            Diagnostic::UnknownField {
                rule: RuleKind::Duplicate,
                field: "Zip_Code".into()
            },
        ]
    );
}

#[test]
fn undeclared_attributes_are_reported_once() {
    let catalog = text_catalog(&["Name"]);
    let records = vec![
        Record::new(1).with("Name", "a").with("Extra", Value::Null),
        Record::new(2).with("Name", "b").with("Extra", Value::Null),
    ];

    let outcome = validate(&catalog, &records, None, ValidationConfig::default()).unwrap();

    assert!(outcome.report.is_empty());
    assert_eq!(
        outcome.diagnostics,
        vec![Diagnostic::UndeclaredAttribute {
            field: "Extra".into()
        }]
    );
}

#[test]
fn case_insensitive_duplicates_from_config() {
    let catalog = text_catalog(&["Street"]);
    let records = vec![
        Record::new(1).with("Street", "Elm"),
        Record::new(2).with("Street", "ELM"),
    ];
    let config =
        ValidationConfig::default().with_duplicate_text_matching(TextMatching::CaseInsensitive);

    let outcome = validate(&catalog, &records, None, config).unwrap();
    assert_eq!(outcome.report.count(IssueKind::DuplicateValue), 2);
}

#[test]
fn geometry_length_mismatch_is_fatal() {
    let catalog = text_catalog(&["Name"]);
    let records = vec![Record::new(1), Record::new(2)];
    let shapes = vec![GeometryRecord::new(1, true)];

    let err = validate(
        &catalog,
        &records,
        Some(shapes.as_slice()),
        ValidationConfig::default(),
    )
    .unwrap_err();
    assert_eq!(
        err,
        ValidationError::FeedLengthMismatch {
            attributes: 2,
            geometry: 1
        }
    );
}

#[test]
fn repeated_record_id_is_fatal() {
    let catalog = text_catalog(&["Name"]);
    let records = vec![Record::new(1), Record::new(1)];

    let err = validate(&catalog, &records, None, ValidationConfig::default()).unwrap_err();
    assert_eq!(
        err,
        ValidationError::DuplicateRecordId {
            feed: Feed::Attributes,
            id: RecordId::from(1)
        }
    );
}

#[test]
fn orphan_geometry_record_is_fatal() {
    let catalog = text_catalog(&["Name"]);
    let records = vec![Record::new(1), Record::new(2)];
    let shapes = vec![GeometryRecord::new(1, true), GeometryRecord::new(3, true)];

    let err = validate(
        &catalog,
        &records,
        Some(shapes.as_slice()),
        ValidationConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, ValidationError::UnknownGeometryRecord { .. }));
}

#[test]
fn engine_is_reusable_across_runs() {
    let catalog = text_catalog(&["Name"]);
    let records = vec![
        Record::new("a").with("Name", "X"),
        Record::new("b").with("Name", "X"),
    ];
    let engine = ValidationEngine::new(ValidationConfig::default());
    let input = ValidationInput::new(&catalog, &records);

    let first = engine.run(&input).unwrap();
    let second = engine.run(&input).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.report.len(), 2);
}
