//! Need matrix derivation, shared by every analysis.

use std::borrow::Cow;

use crate::types::{Matrix, NeedMatrix, Scenario};

/// `need[i][j] = max[i][j] - allocation[i][j]`.
///
/// Rows and columns are zipped, so the result is as large as the smaller of
/// the two inputs; callers pass shape-checked matrices.
pub fn derive_need(allocation: &Matrix, max: &Matrix) -> NeedMatrix {
    allocation
        .iter()
        .zip(max)
        .map(|(alloc_row, max_row)| {
            alloc_row
                .iter()
                .zip(max_row)
                .map(|(&a, &m)| i64::from(m) - i64::from(a))
                .collect()
        })
        .collect()
}

impl Scenario {
    /// The caller-supplied need, or one derived from `max - allocation`.
    ///
    /// An empty supplied matrix counts as absent.
    pub fn need_or_derived(&self) -> Cow<'_, NeedMatrix> {
        match &self.need {
            Some(need) if !need.is_empty() => Cow::Borrowed(need),
            _ => Cow::Owned(derive_need(&self.allocation, &self.max)),
        }
    }
}
