//! Shared status conversions for HiGHS integration.

use deferlp_engine::StatusCode;
use highs::HighsModelStatus;

pub(crate) fn highs_to_status(status: HighsModelStatus) -> StatusCode {
    match status {
        HighsModelStatus::Optimal => StatusCode::Optimal,
        HighsModelStatus::Infeasible => StatusCode::Infeasible,
        HighsModelStatus::Unbounded => StatusCode::Unbounded,
        HighsModelStatus::UnboundedOrInfeasible => StatusCode::InfOrUnbd,
        HighsModelStatus::ReachedTimeLimit => StatusCode::TimeLimit,
        HighsModelStatus::ReachedIterationLimit => StatusCode::IterationLimit,
        _ => StatusCode::Numeric,
    }
}

/// Statuses after which the primal values may be read.
pub(crate) fn may_have_solution(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::Optimal
            | StatusCode::Suboptimal
            | StatusCode::TimeLimit
            | StatusCode::IterationLimit
            | StatusCode::NodeLimit
            | StatusCode::SolutionLimit
    )
}

/// Outcome of a feasibility check during IIS search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Feasibility {
    Feasible,
    Infeasible,
    Undecided,
}

/// Classify a solve of a zero-objective feasibility check. With no objective an
/// "unbounded or infeasible" answer can only mean infeasible.
pub(crate) fn classify_feasibility(status: HighsModelStatus) -> Feasibility {
    match status {
        HighsModelStatus::Optimal => Feasibility::Feasible,
        HighsModelStatus::Infeasible | HighsModelStatus::UnboundedOrInfeasible => {
            Feasibility::Infeasible
        }
        _ => Feasibility::Undecided,
    }
}
