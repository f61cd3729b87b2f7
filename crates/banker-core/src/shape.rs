//! Dimension checks run before any analysis touches the matrices.

use crate::error::{ScenarioError, ScenarioResult};
use crate::types::Scenario;

impl Scenario {
    /// Verify that every matrix and vector agrees with `numProcesses` and
    /// `numResources`. Reports the first offending field.
    pub fn check_shape(&self) -> ScenarioResult<()> {
        check_rows("allocation", &self.allocation, self.num_processes, self.num_resources)?;
        check_rows("max", &self.max, self.num_processes, self.num_resources)?;

        if self.available.len() != self.num_resources {
            return Err(ScenarioError::Malformed(format!(
                "available has {} entries, expected {}",
                self.available.len(),
                self.num_resources
            )));
        }

        if let Some(need) = self.need.as_ref().filter(|n| !n.is_empty()) {
            check_rows("need", need, self.num_processes, self.num_resources)?;
        }

        Ok(())
    }
}

fn check_rows<T>(field: &str, rows: &[Vec<T>], processes: usize, resources: usize) -> ScenarioResult<()> {
    if rows.len() != processes {
        return Err(ScenarioError::Malformed(format!(
            "{field} has {} rows, expected {processes}",
            rows.len()
        )));
    }
    if let Some((i, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != resources) {
        return Err(ScenarioError::Malformed(format!(
            "{field}[{i}] has {} columns, expected {resources}",
            row.len()
        )));
    }
    Ok(())
}

/// Two scenarios can be diffed cell by cell only if P and R agree.
pub fn check_same_shape(a: &Scenario, b: &Scenario) -> ScenarioResult<()> {
    if a.num_processes != b.num_processes || a.num_resources != b.num_resources {
        return Err(ScenarioError::ShapeMismatch(format!(
            "{}x{} vs {}x{}",
            a.num_processes, a.num_resources, b.num_processes, b.num_resources
        )));
    }
    Ok(())
}
