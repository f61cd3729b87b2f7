//! banker-core: analysis of Banker's Algorithm resource-allocation scenarios.
//!
//! Two stateless components operate on a caller-supplied [`Scenario`]:
//!
//! - [`validate`] walks an ordered set of checks and reports every
//!   inconsistency or common mistake as an [`Issue`].
//! - [`compare`] derives utilization, safety margin, and resource slack for
//!   two scenarios and scores how far apart they are.
//!
//! Both share [`derive_need`] and run [`Scenario::check_shape`] first, so a
//! scenario whose matrices disagree with its declared dimensions fails with
//! [`ScenarioError::Malformed`] instead of reaching the analysis.
//!
//! Whether a scenario is *safe* is not computed here; the caller supplies it
//! in `safetyResult`.

pub mod comparator;
pub mod diff;
pub mod error;
pub mod need;
pub mod report;
pub mod shape;
pub mod summary;
pub mod types;
pub mod validator;

pub use comparator::{compare, ScenarioMetrics};
pub use diff::diff;
pub use error::{ScenarioError, ScenarioResult};
pub use need::derive_need;
pub use summary::summarize;
pub use types::*;
pub use validator::validate;
