//! Cell-wise differences between two scenarios of the same shape.

use tracing::debug;

use crate::error::ScenarioResult;
use crate::shape::check_same_shape;
use crate::types::{CellDiff, DiffStatus, Scenario, ScenarioDiff};

/// Diff every matrix cell and available entry from `a` to `b`.
///
/// Need follows the same derive-if-absent rule as the comparator.
pub fn diff(a: &Scenario, b: &Scenario) -> ScenarioResult<ScenarioDiff> {
    a.check_shape()?;
    b.check_shape()?;
    check_same_shape(a, b)?;

    let need_a = a.need_or_derived();
    let need_b = b.need_or_derived();

    let result = ScenarioDiff {
        processes: a.num_processes,
        resources: a.num_resources,
        allocation: diff_matrix(&a.allocation, &b.allocation, |&v| i64::from(v)),
        max: diff_matrix(&a.max, &b.max, |&v| i64::from(v)),
        need: diff_matrix(need_a.as_slice(), need_b.as_slice(), |&v| v),
        available: diff_row(&a.available, &b.available, |&v| i64::from(v)),
    };

    debug!(
        changed = count_changed(&result),
        processes = result.processes,
        resources = result.resources,
        "scenarios diffed"
    );

    Ok(result)
}

/// Diff a single pair of values.
///
/// A change from zero counts as +100% when it increases and 0% otherwise.
pub fn cell_diff(a: i64, b: i64) -> CellDiff {
    let value = b - a;
    let percent_change = if a == 0 {
        if value > 0 { 100.0 } else { 0.0 }
    } else {
        round1(value as f64 / a as f64 * 100.0)
    };
    let status = match value {
        v if v > 0 => DiffStatus::Increased,
        v if v < 0 => DiffStatus::Decreased,
        _ => DiffStatus::Same,
    };

    CellDiff {
        value,
        percent_change,
        status,
    }
}

/// Round a percentage to 1 decimal on its stored binary value, with exact
/// ties going away from zero (`6.25` becomes `6.3`, `0.35` stays `0.3`
/// because it is stored below the tie).
fn round1(value: f64) -> f64 {
    let scaled = value * 10.0;
    // The product is exact iff the fused residual is zero.
    let exact = value.mul_add(10.0, -scaled) == 0.0;
    if exact && scaled.fract().abs() == 0.5 {
        return scaled.round() / 10.0;
    }
    format!("{value:.1}").parse().unwrap_or(value)
}

fn diff_matrix<T>(a: &[Vec<T>], b: &[Vec<T>], widen: impl Fn(&T) -> i64 + Copy) -> Vec<Vec<CellDiff>> {
    a.iter()
        .zip(b)
        .map(|(row_a, row_b)| diff_row(row_a, row_b, widen))
        .collect()
}

fn diff_row<T>(a: &[T], b: &[T], widen: impl Fn(&T) -> i64) -> Vec<CellDiff> {
    a.iter()
        .zip(b)
        .map(|(x, y)| cell_diff(widen(x), widen(y)))
        .collect()
}

fn count_changed(result: &ScenarioDiff) -> usize {
    let matrices = [&result.allocation, &result.max, &result.need];
    matrices
        .iter()
        .flat_map(|m| m.iter().flatten())
        .chain(&result.available)
        .filter(|c| c.status != DiffStatus::Same)
        .count()
}
