//! Pass/fail view over validator output.

use crate::error::ScenarioResult;
use crate::types::{Issue, Scenario, Severity, ValidationSummary};
use crate::validator::validate;

/// Validate and fold the issues into error, warning and note messages.
pub fn summarize(scenario: &Scenario) -> ScenarioResult<ValidationSummary> {
    Ok(summarize_issues(&validate(scenario)?))
}

/// A scenario is valid when no error-severity issue was found.
pub fn summarize_issues(issues: &[Issue]) -> ValidationSummary {
    let messages = |severity: Severity| -> Vec<String> {
        issues
            .iter()
            .filter(|i| i.severity == severity)
            .map(|i| i.message.clone())
            .collect()
    };

    let errors = messages(Severity::Error);
    ValidationSummary {
        is_valid: errors.is_empty(),
        errors,
        warnings: messages(Severity::Warning),
        notes: messages(Severity::Info),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario(allocation: Vec<Vec<u32>>, max: Vec<Vec<u32>>, available: Vec<u32>) -> Scenario {
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

    #[test]
    fn warnings_do_not_invalidate() {
        let summary = summarize(&scenario(vec![vec![0]], vec![vec![10]], vec![1])).unwrap();
        assert!(summary.is_valid);
        assert!(summary.errors.is_empty());
        assert_eq!(summary.warnings.len(), 1);
    }

    #[test]
    fn errors_invalidate_in_emission_order() {
        let summary = summarize(&scenario(vec![vec![5]], vec![vec![3]], vec![0])).unwrap();
        assert!(!summary.is_valid);
        assert_eq!(
            summary.errors,
            vec![
                "Process P0 has allocated 5 of resource R0, but max is 3".to_string(),
                "Process P0 has negative need (-2) for resource R0".to_string(),
            ]
        );
    }

    #[test]
    fn completion_is_a_note() {
        let summary = summarize(&scenario(vec![vec![2]], vec![vec![2]], vec![0])).unwrap();
        assert!(summary.is_valid);
        assert_eq!(summary.notes.len(), 1);
    }
}
