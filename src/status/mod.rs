//! Status engine: divergence, merge feasibility and recommendations
//!
//! 1. Divergence - ahead/behind counts (read-only)
//! 2. Feasibility - trial merge, always reverted
//! 3. Recommend - pure quadrant mapping
//! 4. Report - composes the three for one branch pair

mod divergence;
mod feasibility;
mod recommend;
mod report;

pub use divergence::compute_divergence;
pub use feasibility::{check_merge_feasibility, get_merge_feasibility};
pub use recommend::recommend;
pub use report::{DEFAULT_REFERENCE_BRANCH, StatusOptions, get_status_report};
