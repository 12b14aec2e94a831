use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::enums::project_status::ProjectStatus;

/// The dashboard's single aggregate state, recomputed from each completed
/// analysis and replaced wholesale, never patched incrementally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub code_quality: u8,
    pub productivity: u8,
    pub project_status: ProjectStatus,
}

impl DashboardSnapshot {
    /// Initial state shown before any analysis has completed.
    pub fn initial() -> Self {
        Self {
            code_quality: 90,
            productivity: 85,
            project_status: ProjectStatus::OnTrack,
        }
    }

    /// Recompute from the issue count of the analysis that just finished.
    ///
    /// Productivity is a bounded placeholder signal in [80, 99], not derived
    /// from the analysis itself.
    pub fn compute(total_issues: usize) -> Self {
        let penalty = total_issues.saturating_mul(2).min(100) as u8;
        Self {
            code_quality: 100 - penalty,
            productivity: rand::thread_rng().gen_range(80..=99),
            project_status: if total_issues > 5 {
                ProjectStatus::NeedsImprovement
            } else {
                ProjectStatus::OnTrack
            },
        }
    }
}
