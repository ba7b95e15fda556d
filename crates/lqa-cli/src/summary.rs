use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use lqa_model::{Issue, IssueKind, RuleKind};

use crate::commands::{CheckResult, ExportStatus};

pub fn print_check_summary(result: &CheckResult) {
    let run = &result.run;
    println!("Layer: {}", run.layer_name);
    println!("Records: {}", run.record_count);
    let rules: Vec<&str> = run.outcome.rules_run.iter().map(RuleKind::label).collect();
    println!("Rules: {}", rules.join(", "));

    if !run.diagnostics.is_empty() {
        eprintln!("Diagnostics:");
        for diagnostic in &run.diagnostics {
            eprintln!("- {diagnostic}");
        }
    }

    print_count_table(result);

    if run.outcome.report.is_empty() {
        println!("No issues found. No CSV created.");
        return;
    }

    print_issue_table(run.outcome.report.issues());
    match &result.export {
        ExportStatus::DryRun => println!("Dry run: report not written."),
        ExportStatus::Written(path) => println!("Report: {}", path.display()),
        ExportStatus::Skipped => {}
        ExportStatus::Failed(error) => eprintln!("error: report export failed: {error}"),
    }
}

fn print_count_table(result: &CheckResult) {
    let report = &result.run.outcome.report;
    let counts = report.counts();

    let mut table = Table::new();
    table.set_header(vec![header_cell("Issue Type"), header_cell("Count")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);

    for kind in IssueKind::all() {
        let count = counts.get(kind).copied().unwrap_or_default();
        table.add_row(vec![Cell::new(kind.label()), count_cell(count, kind_color(*kind))]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        count_cell(report.len(), Color::Red).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
}

fn print_issue_table(issues: &[Issue]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Issue Type"),
        header_cell("Field"),
        header_cell("ObjectID"),
        header_cell("Value"),
        header_cell("Notes"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);

    for issue in issues {
        let value = if issue.value.is_null() {
            dim_cell("-")
        } else {
            Cell::new(&issue.value)
        };
        table.add_row(vec![
            Cell::new(issue.kind.label()).fg(kind_color(issue.kind)),
            Cell::new(&issue.field_name),
            Cell::new(&issue.object_id),
            value,
            issue
                .notes
                .as_deref()
                .map_or_else(|| dim_cell("-"), Cell::new),
        ]);
    }
    println!();
    println!("Issues:");
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn kind_color(kind: IssueKind) -> Color {
    match kind {
        IssueKind::NullValue => Color::Yellow,
        IssueKind::DuplicateValue => Color::Magenta,
        IssueKind::InvalidDomainValue => Color::Red,
        IssueKind::MissingGeometry => Color::Blue,
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

pub fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
