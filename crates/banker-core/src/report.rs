//! Human-readable report formatting.

use crate::types::{
    CellDiff, ComparisonMetrics, DiffStatus, Issue, ScenarioDiff, Severity, ValidationSummary,
};

pub fn format_issues(issues: &[Issue]) -> String {
    let mut out = String::new();

    let count = |severity: Severity| issues.iter().filter(|i| i.severity == severity).count();
    let errors = count(Severity::Error);
    let verdict = if errors == 0 { "VALID" } else { "INVALID" };

    out.push_str("\n╔══════════════════════════════════════════╗\n");
    out.push_str("║  Banker's Algorithm Scenario Validation  ║\n");
    out.push_str("╠══════════════════════════════════════════╣\n");
    out.push_str(&format!("║  Verdict:  {verdict:<30}║\n"));
    out.push_str("╚══════════════════════════════════════════╝\n\n");

    out.push_str(&format!("Issues ({} total):\n", issues.len()));
    out.push_str(&format!("  ❌ {errors} errors\n"));
    out.push_str(&format!("  ⚠️  {} warnings\n", count(Severity::Warning)));
    out.push_str(&format!("  ℹ️  {} notes\n\n", count(Severity::Info)));

    for (n, issue) in issues.iter().enumerate() {
        out.push_str(&format!(
            "  {}. {} {} at {}\n",
            n + 1,
            issue.severity.symbol(),
            issue.mistake_type.as_str(),
            issue.location
        ));
        out.push_str(&format!("     {}\n", issue.message));
        out.push_str(&format!("     Fix: {}\n\n", issue.suggestion));
    }

    out
}

/// Pass/fail view: verdict plus the messages grouped by severity.
pub fn format_summary(summary: &ValidationSummary) -> String {
    let mut out = String::new();
    let verdict = if summary.is_valid { "VALID" } else { "INVALID" };

    out.push_str(&format!("Scenario is {verdict}
"));
    let groups = [
        (Severity::Error, &summary.errors),
        (Severity::Warning, &summary.warnings),
        (Severity::Info, &summary.notes),
    ];
    for (severity, messages) in groups {
        if messages.is_empty() {
            continue;
        }
        out.push_str(&format!("\n{} ({}):\n", severity.label(), messages.len()));
        for message in messages {
            out.push_str(&format!("  {} {message}\n", severity.symbol()));
        }
    }

    out
}

pub fn format_comparison(m: &ComparisonMetrics) -> String {
    let mut out = String::new();

    out.push_str("\n╔══════════════════════════════════════════╗\n");
    out.push_str("║  Banker's Algorithm Scenario Comparison  ║\n");
    out.push_str("╚══════════════════════════════════════════╝\n\n");

    out.push_str(&format!("  {:<16}{:>10}{:>10}{:>10}\n", "metric", "A", "B", "B - A"));
    let rows = [
        ("utilization %", m.utilization_a, m.utilization_b, m.utilization_diff),
        ("safety margin %", m.safety_margin_a, m.safety_margin_b, m.safety_margin_diff),
        ("resource slack %", m.resource_slack_a, m.resource_slack_b, m.resource_slack_diff),
    ];
    for (name, a, b, diff) in rows {
        out.push_str(&format!("  {name:<16}{a:>10.2}{b:>10.2}{diff:>+10.2}\n"));
    }
    out.push_str(&format!(
        "  {:<16}{:>10}{:>10}\n\n",
        "safe",
        yes_no(m.is_safe_a),
        yes_no(m.is_safe_b)
    ));
    out.push_str(&format!("Divergence score: {:.2}\n", m.total_divergence_score));

    out
}

pub fn format_diff(d: &ScenarioDiff) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Scenario diff ({} processes x {} resources)\n\n",
        d.processes, d.resources
    ));

    for (name, matrix) in [("allocation", &d.allocation), ("max", &d.max), ("need", &d.need)] {
        out.push_str(&format!("{name}:\n"));
        for (i, row) in matrix.iter().enumerate() {
            let cells: Vec<String> = row.iter().map(cell).collect();
            out.push_str(&format!("  P{i:<3}{}\n", cells.join(" ")));
        }
        out.push('\n');
    }

    let cells: Vec<String> = d.available.iter().map(cell).collect();
    out.push_str(&format!("available:\n      {}\n", cells.join(" ")));

    out
}

fn cell(c: &CellDiff) -> String {
    match c.status {
        DiffStatus::Same => format!("{:>6}", "="),
        _ => format!("{:>+6}", c.value),
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}
