//! Scenario comparator: paired metrics and a divergence score.
//!
//! # Metrics
//!
//! ```text
//! utilization    = 100 * ΣΣ allocation / ΣΣ max        (0 when ΣΣ max == 0)
//! safety_margin  = 100 * avg(available) / avg(need)    (100 when avg(need) <= 0)
//! resource_slack = 100 * Σ available / ΣΣ max          (0 when ΣΣ max == 0)
//! ```
//!
//! # Divergence
//!
//! ```text
//! D = (|ΔU| + |ΔM| + |ΔK| + 50 * [safe_a != safe_b]) / 4
//! ```
//!
//! A disagreement on the safety flag weighs as much as a 50 point swing in
//! any single metric.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ScenarioResult;
use crate::types::{ComparisonMetrics, Matrix, Scenario};

/// Divergence contribution of a safety-flag mismatch.
pub const SAFETY_MISMATCH_PENALTY: f64 = 50.0;

/// Unrounded metrics for a single scenario.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioMetrics {
    pub utilization: f64,
    pub safety_margin: f64,
    pub resource_slack: f64,
    pub is_safe: bool,
}

impl ScenarioMetrics {
    pub fn of(scenario: &Scenario) -> Self {
        Self {
            utilization: utilization(scenario),
            safety_margin: safety_margin(scenario),
            resource_slack: resource_slack(scenario),
            is_safe: is_safe(scenario),
        }
    }
}

/// Compare two scenarios. They may differ in size.
pub fn compare(a: &Scenario, b: &Scenario) -> ScenarioResult<ComparisonMetrics> {
    a.check_shape()?;
    b.check_shape()?;

    let ma = ScenarioMetrics::of(a);
    let mb = ScenarioMetrics::of(b);
    let divergence = divergence_score(&ma, &mb);

    debug!(
        utilization_a = ma.utilization,
        utilization_b = mb.utilization,
        divergence,
        "scenarios compared"
    );

    Ok(ComparisonMetrics {
        utilization_a: round2(ma.utilization),
        utilization_b: round2(mb.utilization),
        utilization_diff: round2(mb.utilization - ma.utilization),
        safety_margin_a: round2(ma.safety_margin),
        safety_margin_b: round2(mb.safety_margin),
        safety_margin_diff: round2(mb.safety_margin - ma.safety_margin),
        resource_slack_a: round2(ma.resource_slack),
        resource_slack_b: round2(mb.resource_slack),
        resource_slack_diff: round2(mb.resource_slack - ma.resource_slack),
        is_safe_a: ma.is_safe,
        is_safe_b: mb.is_safe,
        total_divergence_score: round2(divergence),
    })
}

/// Unrounded divergence between two metric sets.
pub fn divergence_score(a: &ScenarioMetrics, b: &ScenarioMetrics) -> f64 {
    let safety = if a.is_safe != b.is_safe {
        SAFETY_MISMATCH_PENALTY
    } else {
        0.0
    };

    ((b.utilization - a.utilization).abs()
        + (b.safety_margin - a.safety_margin).abs()
        + (b.resource_slack - a.resource_slack).abs()
        + safety)
        / 4.0
}

/// Share of declared maximum demand that is currently allocated.
pub fn utilization(scenario: &Scenario) -> f64 {
    let total_max = matrix_total(&scenario.max);
    if total_max == 0 {
        return 0.0;
    }
    matrix_total(&scenario.allocation) as f64 / total_max as f64 * 100.0
}

/// Average available units relative to average remaining need.
pub fn safety_margin(scenario: &Scenario) -> f64 {
    let avg_available = if scenario.num_resources > 0 {
        vector_total(&scenario.available) as f64 / scenario.num_resources as f64
    } else {
        0.0
    };

    let need = scenario.need_or_derived();
    let total_need: i64 = need.iter().flatten().sum();
    let cells = scenario.num_processes * scenario.num_resources;
    let avg_need = if cells > 0 {
        total_need as f64 / cells as f64
    } else {
        0.0
    };

    if avg_need > 0.0 {
        avg_available / avg_need * 100.0
    } else {
        100.0
    }
}

/// Unallocated units relative to declared ceilings.
pub fn resource_slack(scenario: &Scenario) -> f64 {
    let total_max = matrix_total(&scenario.max);
    if total_max == 0 {
        return 0.0;
    }
    vector_total(&scenario.available) as f64 / total_max as f64 * 100.0
}

/// Safety flag as reported by the caller; unsafe when absent.
pub fn is_safe(scenario: &Scenario) -> bool {
    scenario.safety_result.as_ref().is_some_and(|r| r.is_safe)
}

/// Round to 2 decimals on the stored binary value. Exact ties go to the
/// even digit, so `0.125` becomes `0.12`.
pub fn round2(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}

fn matrix_total(matrix: &Matrix) -> u64 {
    matrix.iter().map(|row| vector_total(row)).sum()
}

fn vector_total(values: &[u32]) -> u64 {
    values.iter().map(|&v| u64::from(v)).sum()
}
