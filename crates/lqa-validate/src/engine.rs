//! Validation engine.
//!
//! Runs the four checks in fixed order (null, duplicate, domain, geometry)
//! over one immutable input snapshot and returns a fresh report per run.

use std::collections::{BTreeSet, HashSet};

use lqa_model::{Diagnostic, FieldCatalog, GeometryRecord, Record, RecordId, RuleKind};
use tracing::{info, info_span, warn};

use crate::checks;
use crate::config::{FieldSelection, ValidationConfig};
use crate::error::{Feed, Result, ValidationError};
use crate::report::QaReport;
use crate::sink::IssueSink;
use crate::util::FieldLookup;

/// Input feeds for one run.
///
/// The geometry feed is optional: `None` skips the geometry check, while an
/// empty feed is validated like any other.
#[derive(Debug, Clone, Copy)]
pub struct ValidationInput<'a> {
    pub catalog: &'a FieldCatalog,
    pub records: &'a [Record],
    pub geometry: Option<&'a [GeometryRecord]>,
}

impl<'a> ValidationInput<'a> {
    pub fn new(catalog: &'a FieldCatalog, records: &'a [Record]) -> Self {
        Self {
            catalog,
            records,
            geometry: None,
        }
    }

    #[must_use]
    pub fn with_geometry(mut self, geometry: &'a [GeometryRecord]) -> Self {
        self.geometry = Some(geometry);
        self
    }
}

/// Result of a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationOutcome {
    pub report: QaReport,
    /// Non-fatal findings about configuration and input.
    pub diagnostics: Vec<Diagnostic>,
    /// Rules that actually ran, in order.
    pub rules_run: Vec<RuleKind>,
}

/// Runs QA checks with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct ValidationEngine {
    config: ValidationConfig,
}

impl ValidationEngine {
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validate one input snapshot.
    ///
    /// # Errors
    ///
    /// Fails without producing a report when the feeds are inconsistent:
    /// repeated record ids, or a geometry feed that does not line up with the
    /// attribute feed.
    pub fn run(&self, input: &ValidationInput<'_>) -> Result<ValidationOutcome> {
        let span = info_span!(
            "validate",
            records = input.records.len(),
            fields = input.catalog.len(),
            geometry = input.geometry.is_some()
        );
        let _guard = span.enter();

        check_feeds(input)?;

        let mut diagnostics = Vec::new();
        let plan = RulePlan::resolve(&self.config, input.catalog, &mut diagnostics);
        diagnostics.extend(undeclared_attributes(input.catalog, input.records));
        for diagnostic in &diagnostics {
            warn!(field = diagnostic.field(), "{}", diagnostic.message());
        }

        let mut sink = IssueSink::new();
        let mut rules_run = Vec::with_capacity(RuleKind::all().len());

        let before = sink.len();
        sink.extend(checks::null::check(input.records, &plan.null_fields));
        rules_run.push(RuleKind::Null);
        info!(rule = %RuleKind::Null, issues = sink.len() - before, "rule finished");

        let before = sink.len();
        sink.extend(checks::duplicate::check(
            input.records,
            &plan.duplicate_fields,
            self.config.duplicate_text_matching,
        ));
        rules_run.push(RuleKind::Duplicate);
        info!(rule = %RuleKind::Duplicate, issues = sink.len() - before, "rule finished");

        let before = sink.len();
        sink.extend(checks::domain::check(input.records, input.catalog));
        rules_run.push(RuleKind::Domain);
        info!(rule = %RuleKind::Domain, issues = sink.len() - before, "rule finished");

        if let Some(geometry) = input.geometry {
            let before = sink.len();
            sink.extend(checks::geometry::check(geometry));
            rules_run.push(RuleKind::Geometry);
            info!(rule = %RuleKind::Geometry, issues = sink.len() - before, "rule finished");
        } else {
            info!("no geometry feed supplied; geometry check skipped");
        }

        let report = sink.finish();
        info!(
            issues = report.len(),
            diagnostics = diagnostics.len(),
            "validation complete"
        );

        Ok(ValidationOutcome {
            report,
            diagnostics,
            rules_run,
        })
    }
}

/// Fields each configurable rule scans, in catalog order.
#[derive(Debug, Default)]
struct RulePlan {
    null_fields: Vec<String>,
    duplicate_fields: Vec<String>,
}

impl RulePlan {
    fn resolve(
        config: &ValidationConfig,
        catalog: &FieldCatalog,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Self {
        let lookup = FieldLookup::from_iter(catalog.names());

        let checked: Option<BTreeSet<String>> = match &config.checked_fields {
            FieldSelection::All => None,
            FieldSelection::Only(names) => Some(resolve_names(
                names,
                &lookup,
                &[RuleKind::Null, RuleKind::Duplicate],
                diagnostics,
            )),
        };
        let exempt = resolve_names(
            &config.duplicate_exemptions,
            &lookup,
            &[RuleKind::Duplicate],
            diagnostics,
        );

        let null_fields: Vec<String> = catalog
            .names()
            .filter(|name| checked.as_ref().is_none_or(|set| set.contains(*name)))
            .map(str::to_string)
            .collect();
        let duplicate_fields = null_fields
            .iter()
            .filter(|name| !exempt.contains(*name))
            .cloned()
            .collect();

        Self {
            null_fields,
            duplicate_fields,
        }
    }
}

/// Map configured names to catalog spelling, reporting the ones that miss.
fn resolve_names(
    names: &BTreeSet<String>,
    lookup: &FieldLookup,
    rules: &[RuleKind],
    diagnostics: &mut Vec<Diagnostic>,
) -> BTreeSet<String> {
    let mut resolved = BTreeSet::new();
    for name in names {
        match lookup.resolve(name) {
            Some(canonical) => {
                resolved.insert(canonical.to_string());
            }
            None => {
                for rule in rules {
                    diagnostics.push(Diagnostic::UnknownField {
                        rule: *rule,
                        field: name.clone(),
                    });
                }
            }
        }
    }
    resolved
}

/// Attribute keys carried by records but missing from the catalog.
fn undeclared_attributes(catalog: &FieldCatalog, records: &[Record]) -> Vec<Diagnostic> {
    let declared: HashSet<&str> = catalog.names().collect();
    let undeclared: BTreeSet<&str> = records
        .iter()
        .flat_map(|record| record.attributes.keys())
        .map(String::as_str)
        .filter(|name| !declared.contains(name))
        .collect();

    undeclared
        .into_iter()
        .map(|field| Diagnostic::UndeclaredAttribute {
            field: field.to_string(),
        })
        .collect()
}

/// Reject inconsistent feeds before any rule runs.
fn check_feeds(input: &ValidationInput<'_>) -> Result<()> {
    let attribute_ids = unique_ids(input.records.iter().map(|r| &r.id), Feed::Attributes)?;

    let Some(geometry) = input.geometry else {
        return Ok(());
    };

    if geometry.len() != input.records.len() {
        return Err(ValidationError::FeedLengthMismatch {
            attributes: input.records.len(),
            geometry: geometry.len(),
        });
    }

    unique_ids(geometry.iter().map(|r| &r.id), Feed::Geometry)?;
    if let Some(orphan) = geometry.iter().find(|r| !attribute_ids.contains(&r.id)) {
        return Err(ValidationError::UnknownGeometryRecord {
            id: orphan.id.clone(),
        });
    }

    Ok(())
}

fn unique_ids<'a>(
    ids: impl Iterator<Item = &'a RecordId>,
    feed: Feed,
) -> Result<HashSet<&'a RecordId>> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(ValidationError::DuplicateRecordId {
                feed,
                id: id.clone(),
            });
        }
    }
    Ok(seen)
}
