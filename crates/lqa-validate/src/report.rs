//! QA report produced by one engine run.

use std::collections::BTreeMap;

use lqa_model::{Issue, IssueKind};
use serde::Serialize;

/// Ordered issues from one validation run.
///
/// Issues appear in production order: null, duplicate, domain, geometry, each
/// in record order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QaReport {
    issues: Vec<Issue>,
}

impl QaReport {
    pub(crate) fn new(issues: Vec<Issue>) -> Self {
        Self { issues }
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Issue> {
        self.issues.iter()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Number of issues of one kind.
    pub fn count(&self, kind: IssueKind) -> usize {
        self.issues.iter().filter(|issue| issue.kind == kind).count()
    }

    /// Issue counts per kind (kinds with zero issues included).
    pub fn counts(&self) -> BTreeMap<IssueKind, usize> {
        let mut counts: BTreeMap<IssueKind, usize> =
            IssueKind::all().iter().map(|kind| (*kind, 0)).collect();
        for issue in &self.issues {
            *counts.entry(issue.kind).or_default() += 1;
        }
        counts
    }

    /// Issues reported for one field.
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a Issue> + 'a {
        self.issues
            .iter()
            .filter(move |issue| issue.field_name == field)
    }
}

impl<'a> IntoIterator for &'a QaReport {
    type Item = &'a Issue;
    type IntoIter = std::slice::Iter<'a, Issue>;

    fn into_iter(self) -> Self::IntoIter {
        self.issues.iter()
    }
}
