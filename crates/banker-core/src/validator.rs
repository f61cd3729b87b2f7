//! Scenario validator: detects inconsistencies and common mistakes.
//!
//! Checks run as an ordered pipeline. Output order is part of the contract:
//! check order first, then row-major `(i, j)` within a check. Every matching
//! cell yields its own issue; nothing is deduplicated.
//!
//! ```text
//! 1. allocation_exceeds_max   error    allocation[i][j] > max[i][j]
//! 2. negative_need            error    need[i][j] < 0
//! 3. low_available_resources  warning  available[j] < 0.2 * Σ_i need[i][j]
//! 4. allocation_without_max   warning  max[i][j] == 0 && allocation[i][j] > 0
//! 5. all_processes_completed  info     allocation == max everywhere
//! ```

use tracing::debug;

use crate::error::ScenarioResult;
use crate::need::derive_need;
use crate::types::{Issue, MistakeType, NeedMatrix, Scenario, Severity};

/// Available units below this fraction of total need trigger a warning.
pub const LOW_AVAILABLE_RATIO: f64 = 0.2;

/// Everything a check may read. Need is derived once and shared.
struct CheckContext<'a> {
    scenario: &'a Scenario,
    need: NeedMatrix,
}

type Check = fn(&CheckContext<'_>, &mut Vec<Issue>);

const CHECKS: [Check; 5] = [
    allocation_exceeds_max,
    negative_need,
    low_available_resources,
    allocation_without_max,
    all_processes_completed,
];

/// Validate a scenario and return every detected issue in check order.
///
/// Fails only if the scenario's matrices disagree with its declared
/// dimensions.
pub fn validate(scenario: &Scenario) -> ScenarioResult<Vec<Issue>> {
    scenario.check_shape()?;

    let ctx = CheckContext {
        scenario,
        need: derive_need(&scenario.allocation, &scenario.max),
    };

    let mut issues = Vec::new();
    for check in CHECKS {
        check(&ctx, &mut issues);
    }

    debug!(
        processes = scenario.num_processes,
        resources = scenario.num_resources,
        issues = issues.len(),
        "scenario validated"
    );

    Ok(issues)
}

/// Row-major walk over `(i, j, allocation, max)`.
fn cells(scenario: &Scenario) -> impl Iterator<Item = (usize, usize, u32, u32)> + '_ {
    scenario
        .allocation
        .iter()
        .zip(&scenario.max)
        .enumerate()
        .flat_map(|(i, (alloc_row, max_row))| {
            alloc_row
                .iter()
                .zip(max_row)
                .enumerate()
                .map(move |(j, (&a, &m))| (i, j, a, m))
        })
}

fn allocation_exceeds_max(ctx: &CheckContext<'_>, issues: &mut Vec<Issue>) {
    for (i, j, allocated, max) in cells(ctx.scenario) {
        if allocated > max {
            issues.push(Issue {
                mistake_type: MistakeType::AllocationExceedsMax,
                severity: Severity::Error,
                location: format!("allocation[{i}][{j}]"),
                message: format!(
                    "Process P{i} has allocated {allocated} of resource R{j}, but max is {max}"
                ),
                suggestion: format!("Set allocation[{i}][{j}] to a value ≤ {max}"),
            });
        }
    }
}

fn negative_need(ctx: &CheckContext<'_>, issues: &mut Vec<Issue>) {
    for (i, row) in ctx.need.iter().enumerate() {
        for (j, &need) in row.iter().enumerate() {
            if need < 0 {
                issues.push(Issue {
                    mistake_type: MistakeType::NegativeNeed,
                    severity: Severity::Error,
                    location: format!("need[{i}][{j}]"),
                    message: format!("Process P{i} has negative need ({need}) for resource R{j}"),
                    suggestion: format!("Reduce allocation[{i}][{j}] to match max[{i}][{j}]"),
                });
            }
        }
    }
}

fn low_available_resources(ctx: &CheckContext<'_>, issues: &mut Vec<Issue>) {
    for (j, &available) in ctx.scenario.available.iter().enumerate() {
        let total_need: i64 = ctx.need.iter().map(|row| row[j]).sum();
        if f64::from(available) < total_need as f64 * LOW_AVAILABLE_RATIO {
            issues.push(Issue {
                mistake_type: MistakeType::LowAvailableResources,
                severity: Severity::Warning,
                location: format!("available[{j}]"),
                message: format!(
                    "Resource R{j} availability ({available}) is low compared to total need ({total_need})"
                ),
                suggestion: "Consider increasing available resources or reducing process requirements"
                    .to_string(),
            });
        }
    }
}

fn allocation_without_max(ctx: &CheckContext<'_>, issues: &mut Vec<Issue>) {
    for (i, j, allocated, max) in cells(ctx.scenario) {
        if max == 0 && allocated > 0 {
            issues.push(Issue {
                mistake_type: MistakeType::AllocationWithoutMax,
                severity: Severity::Warning,
                location: format!("P{i}, R{j}"),
                message: format!("Process P{i} has allocation but max is 0 for resource R{j}"),
                suggestion: "Either increase max or reduce allocation to 0".to_string(),
            });
        }
    }
}

fn all_processes_completed(ctx: &CheckContext<'_>, issues: &mut Vec<Issue>) {
    // Vacuously true for an empty scenario.
    if cells(ctx.scenario).all(|(_, _, allocated, max)| allocated == max) {
        issues.push(Issue {
            mistake_type: MistakeType::AllProcessesCompleted,
            severity: Severity::Info,
            location: "system".to_string(),
            message: "All processes have reached their maximum allocation".to_string(),
            suggestion:
                "System is at completion state. Consider terminating processes or starting new scenario."
                    .to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScenarioError;
    use crate::types::Matrix;

    fn scenario(allocation: Matrix, max: Matrix, available: Vec<u32>) -> Scenario {
        Scenario {
            num_processes: allocation.len(),
            num_resources: available.len(),
            allocation,
            max,
            available,
            need: None,
            safety_result: None,
        }
    }

    /// The classic five-process, three-resource textbook state.
    fn textbook() -> Scenario {
        scenario(
            vec![vec![0, 1, 0], vec![2, 0, 0], vec![3, 0, 2], vec![2, 1, 1], vec![0, 0, 2]],
            vec![vec![7, 5, 3], vec![3, 2, 2], vec![9, 0, 2], vec![2, 2, 2], vec![4, 3, 3]],
            vec![3, 3, 2],
        )
    }

    fn types(issues: &[Issue]) -> Vec<MistakeType> {
        issues.iter().map(|i| i.mistake_type).collect()
    }

    #[test]
    fn textbook_state_only_warns_on_scarce_resource() {
        // R0 has 3 available against a total need of 18.
        let issues = validate(&textbook()).unwrap();
        assert_eq!(types(&issues), vec![MistakeType::LowAvailableResources]);
        assert_eq!(issues[0].location, "available[0]");
        assert_eq!(
            issues[0].message,
            "Resource R0 availability (3) is low compared to total need (18)"
        );
    }

    #[test]
    fn over_allocation_reports_both_errors() {
        let issues = validate(&scenario(vec![vec![5]], vec![vec![3]], vec![0])).unwrap();
        assert_eq!(
            types(&issues),
            vec![MistakeType::AllocationExceedsMax, MistakeType::NegativeNeed]
        );

        assert_eq!(issues[0].severity, Severity::Error);
        assert_eq!(issues[0].location, "allocation[0][0]");
        assert_eq!(
            issues[0].message,
            "Process P0 has allocated 5 of resource R0, but max is 3"
        );
        assert_eq!(issues[0].suggestion, "Set allocation[0][0] to a value ≤ 3");

        assert_eq!(issues[1].severity, Severity::Error);
        assert_eq!(issues[1].location, "need[0][0]");
        assert_eq!(issues[1].message, "Process P0 has negative need (-2) for resource R0");
        assert_eq!(issues[1].suggestion, "Reduce allocation[0][0] to match max[0][0]");
    }

    #[test]
    fn one_issue_per_offending_cell_in_row_major_order() {
        let issues = validate(&scenario(
            vec![vec![4, 0], vec![3, 9]],
            vec![vec![2, 1], vec![1, 9]],
            vec![5, 5],
        ))
        .unwrap();

        let exceeds: Vec<&str> = issues
            .iter()
            .filter(|i| i.mistake_type == MistakeType::AllocationExceedsMax)
            .map(|i| i.location.as_str())
            .collect();
        assert_eq!(exceeds, vec!["allocation[0][0]", "allocation[1][0]"]);

        let negative: Vec<&str> = issues
            .iter()
            .filter(|i| i.mistake_type == MistakeType::NegativeNeed)
            .map(|i| i.location.as_str())
            .collect();
        assert_eq!(negative, vec!["need[0][0]", "need[1][0]"]);
    }

    #[test]
    fn low_available_uses_strict_twenty_percent_threshold() {
        // Total need for R0 is 10: 2 is exactly 20% and passes, 1 warns.
        let at_threshold = scenario(vec![vec![0]], vec![vec![10]], vec![2]);
        assert!(validate(&at_threshold).unwrap().is_empty());

        let below = scenario(vec![vec![0]], vec![vec![10]], vec![1]);
        let issues = validate(&below).unwrap();
        assert_eq!(types(&issues), vec![MistakeType::LowAvailableResources]);
        assert_eq!(issues[0].severity, Severity::Warning);
        assert_eq!(issues[0].location, "available[0]");
        assert_eq!(
            issues[0].message,
            "Resource R0 availability (1) is low compared to total need (10)"
        );
    }

    #[test]
    fn low_available_sums_need_per_resource_column() {
        // R0 need = 4 + 4, R1 need = 0.
        let s = scenario(vec![vec![0, 1], vec![0, 1]], vec![vec![4, 1], vec![4, 1]], vec![1, 0]);
        let issues = validate(&s).unwrap();
        assert_eq!(types(&issues), vec![MistakeType::LowAvailableResources]);
        assert_eq!(issues[0].location, "available[0]");
    }

    #[test]
    fn allocation_without_max_is_a_warning_after_errors() {
        let issues = validate(&scenario(vec![vec![0, 2]], vec![vec![1, 0]], vec![1, 1])).unwrap();
        assert_eq!(
            types(&issues),
            vec![
                MistakeType::AllocationExceedsMax,
                MistakeType::NegativeNeed,
                MistakeType::AllocationWithoutMax,
            ]
        );
        let last = &issues[2];
        assert_eq!(last.severity, Severity::Warning);
        assert_eq!(last.location, "P0, R1");
        assert_eq!(last.message, "Process P0 has allocation but max is 0 for resource R1");
    }

    #[test]
    fn completion_emits_single_info_at_system() {
        let issues = validate(&scenario(
            vec![vec![1, 2], vec![3, 0]],
            vec![vec![1, 2], vec![3, 0]],
            vec![0, 0],
        ))
        .unwrap();
        assert_eq!(types(&issues), vec![MistakeType::AllProcessesCompleted]);
        assert_eq!(issues[0].severity, Severity::Info);
        assert_eq!(issues[0].location, "system");
    }

    #[test]
    fn partial_completion_emits_no_info() {
        let issues = validate(&scenario(vec![vec![1, 1]], vec![vec![1, 2]], vec![1, 1])).unwrap();
        assert!(issues.iter().all(|i| i.severity != Severity::Info));
    }

    #[test]
    fn empty_scenario_is_vacuously_complete() {
        let issues = validate(&scenario(vec![], vec![], vec![])).unwrap();
        assert_eq!(types(&issues), vec![MistakeType::AllProcessesCompleted]);
    }

    #[test]
    fn supplied_need_is_ignored() {
        let mut s = textbook();
        s.need = Some(vec![vec![-1, 0, 0]; 5]);
        assert_eq!(validate(&s).unwrap(), validate(&textbook()).unwrap());
    }

    #[test]
    fn malformed_scenario_is_rejected() {
        let mut s = textbook();
        s.allocation.truncate(3);
        assert!(matches!(validate(&s), Err(ScenarioError::Malformed(_))));
    }
}
