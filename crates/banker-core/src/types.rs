//! Shared types for scenario analysis.
//!
//! Field names follow the wire format used by the visual frontend: the
//! scenario itself is camelCase, analysis results are snake_case.

use serde::{Deserialize, Serialize};

/// P×R matrix of resource units (allocation, max).
pub type Matrix = Vec<Vec<u32>>;

/// P×R matrix of remaining demand. Signed, since an allocation above its
/// declared maximum yields a negative need.
pub type NeedMatrix = Vec<Vec<i64>>;

// ── Scenario ───────────────────────────────────────────────────────

/// A Banker's Algorithm state: who holds what, who may ask for what, and
/// what is left in the pool.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub num_processes: usize,
    pub num_resources: usize,
    /// Units currently held, per process and resource.
    pub allocation: Matrix,
    /// Maximum cumulative demand, per process and resource.
    pub max: Matrix,
    /// Unallocated units per resource.
    pub available: Vec<u32>,
    /// Precomputed need. Derived from `max - allocation` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub need: Option<NeedMatrix>,
    /// Outcome of a safety run performed by the caller.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safety_result: Option<SafetyResult>,
}

/// Externally computed safety verdict.
///
/// Only `isSafe` is interpreted; everything else the caller attached
/// (safe sequence, step log, ...) is carried through untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SafetyResult {
    #[serde(default)]
    pub is_safe: bool,
    #[serde(flatten)]
    pub details: serde_json::Map<String, serde_json::Value>,
}

// ── Validation ─────────────────────────────────────────────────────

/// How serious a detected issue is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Severity::Error => "❌",
            Severity::Warning => "⚠️",
            Severity::Info => "ℹ️",
        }
    }
}

/// The kind of mistake a validator check detects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MistakeType {
    AllocationExceedsMax,
    NegativeNeed,
    LowAvailableResources,
    AllocationWithoutMax,
    AllProcessesCompleted,
}

impl MistakeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MistakeType::AllocationExceedsMax => "allocation_exceeds_max",
            MistakeType::NegativeNeed => "negative_need",
            MistakeType::LowAvailableResources => "low_available_resources",
            MistakeType::AllocationWithoutMax => "allocation_without_max",
            MistakeType::AllProcessesCompleted => "all_processes_completed",
        }
    }
}

/// A single detected mistake, with a pointer to where it is and how to fix it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub mistake_type: MistakeType,
    pub severity: Severity,
    /// Human-readable coordinate, e.g. `allocation[2][1]` or `system`.
    pub location: String,
    pub message: String,
    pub suggestion: String,
}

/// Validator output folded into pass/fail plus message lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationSummary {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub notes: Vec<String>,
}

// ── Comparison ─────────────────────────────────────────────────────

/// Paired metrics for two scenarios. Every float is rounded to 2 decimals;
/// `*_diff` fields are signed `b - a`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonMetrics {
    pub utilization_a: f64,
    pub utilization_b: f64,
    pub utilization_diff: f64,
    pub safety_margin_a: f64,
    pub safety_margin_b: f64,
    pub safety_margin_diff: f64,
    pub resource_slack_a: f64,
    pub resource_slack_b: f64,
    pub resource_slack_diff: f64,
    pub is_safe_a: bool,
    pub is_safe_b: bool,
    pub total_divergence_score: f64,
}

/// Direction of change for one cell between two scenarios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffStatus {
    Increased,
    Decreased,
    Same,
}

/// Change of a single cell from scenario A to scenario B.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellDiff {
    /// `b - a`.
    pub value: i64,
    /// Relative change in percent, one decimal.
    pub percent_change: f64,
    pub status: DiffStatus,
}

/// Cell-wise differences between two equally shaped scenarios.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioDiff {
    pub processes: usize,
    pub resources: usize,
    pub allocation: Vec<Vec<CellDiff>>,
    pub max: Vec<Vec<CellDiff>>,
    pub need: Vec<Vec<CellDiff>>,
    pub available: Vec<CellDiff>,
}
