//! Append-only issue accumulator.

use lqa_model::Issue;

use crate::report::QaReport;

/// Collects issues for one engine run.
///
/// Issues can only be appended; [`IssueSink::finish`] hands them over as an
/// immutable [`QaReport`] in insertion order.
#[derive(Debug, Default)]
pub struct IssueSink {
    issues: Vec<Issue>,
}

impl IssueSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Close the sink and produce the report.
    pub fn finish(self) -> QaReport {
        QaReport::new(self.issues)
    }
}

impl Extend<Issue> for IssueSink {
    fn extend<T: IntoIterator<Item = Issue>>(&mut self, iter: T) {
        self.issues.extend(iter);
    }
}
