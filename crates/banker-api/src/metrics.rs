//! Request counters and Prometheus text exposition.
//!
//! Counters are plain atomics; handlers bump them on every call and
//! `/metrics` renders a point-in-time snapshot.

use std::sync::atomic::{AtomicU64, Ordering};

use banker_core::{Issue, Severity};

/// An analysis endpoint, used as the `operation` label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Validate,
    Summary,
    Compare,
    Diff,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Validate,
        Operation::Summary,
        Operation::Compare,
        Operation::Diff,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Operation::Validate => "validate",
            Operation::Summary => "summary",
            Operation::Compare => "compare",
            Operation::Diff => "diff",
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

const SEVERITIES: [Severity; 3] = [Severity::Error, Severity::Warning, Severity::Info];

fn severity_index(severity: Severity) -> usize {
    match severity {
        Severity::Error => 0,
        Severity::Warning => 1,
        Severity::Info => 2,
    }
}

/// Process-wide request counters.
#[derive(Debug, Default)]
pub struct RequestMetrics {
    /// Requests received, per operation.
    requests: [AtomicU64; 4],
    /// Requests whose scenario failed the shape check, per operation.
    rejected: [AtomicU64; 4],
    /// Issues emitted by the validator, per severity.
    issues: [AtomicU64; 3],
}

impl RequestMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_request(&self, op: Operation) {
        self.requests[op.index()].fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rejected(&self, op: Operation) {
        self.rejected[op.index()].fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_issues(&self, issues: &[Issue]) {
        for issue in issues {
            self.issues[severity_index(issue.severity)].fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let load = |counters: &[AtomicU64]| -> Vec<u64> {
            counters.iter().map(|c| c.load(Ordering::Relaxed)).collect()
        };
        MetricsSnapshot {
            requests: load(&self.requests),
            rejected: load(&self.rejected),
            issues: load(&self.issues),
        }
    }
}

/// Counter values at one point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsSnapshot {
    requests: Vec<u64>,
    rejected: Vec<u64>,
    issues: Vec<u64>,
}

impl MetricsSnapshot {
    pub fn requests(&self, op: Operation) -> u64 {
        self.requests[op.index()]
    }

    pub fn rejected(&self, op: Operation) -> u64 {
        self.rejected[op.index()]
    }

    pub fn issues(&self, severity: Severity) -> u64 {
        self.issues[severity_index(severity)]
    }
}

/// Render a snapshot in the Prometheus text exposition format.
pub fn render_prometheus(snapshot: &MetricsSnapshot) -> String {
    let mut out = String::new();

    out.push_str("# HELP banker_requests_total Analysis requests received.\n");
    out.push_str("# TYPE banker_requests_total counter\n");
    for op in Operation::ALL {
        out.push_str(&format!(
            "banker_requests_total{{operation=\"{}\"}} {}\n",
            op.label(),
            snapshot.requests(op)
        ));
    }

    out.push_str("# HELP banker_rejected_scenarios_total Scenarios rejected as malformed.\n");
    out.push_str("# TYPE banker_rejected_scenarios_total counter\n");
    for op in Operation::ALL {
        out.push_str(&format!(
            "banker_rejected_scenarios_total{{operation=\"{}\"}} {}\n",
            op.label(),
            snapshot.rejected(op)
        ));
    }

    out.push_str("# HELP banker_issues_total Validation issues emitted.\n");
    out.push_str("# TYPE banker_issues_total counter\n");
    for severity in SEVERITIES {
        out.push_str(&format!(
            "banker_issues_total{{severity=\"{}\"}} {}\n",
            severity.label(),
            snapshot.issues(severity)
        ));
    }

    out
}
