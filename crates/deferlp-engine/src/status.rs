//! Optimization status enumeration.

/// Status codes an engine model reports through the `Status` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum StatusCode {
    /// Model loaded, no solve attempted yet.
    Loaded = 1,
    Optimal = 2,
    Infeasible = 3,
    /// Infeasible or unbounded; the engine could not tell which.
    InfOrUnbd = 4,
    Unbounded = 5,
    Cutoff = 6,
    IterationLimit = 7,
    NodeLimit = 8,
    TimeLimit = 9,
    SolutionLimit = 10,
    /// Stopped by a termination request.
    Interrupted = 11,
    Numeric = 12,
    Suboptimal = 13,
    InProgress = 14,
    UserObjLimit = 15,
}

impl StatusCode {
    pub const ALL: [StatusCode; 15] = [
        StatusCode::Loaded,
        StatusCode::Optimal,
        StatusCode::Infeasible,
        StatusCode::InfOrUnbd,
        StatusCode::Unbounded,
        StatusCode::Cutoff,
        StatusCode::IterationLimit,
        StatusCode::NodeLimit,
        StatusCode::TimeLimit,
        StatusCode::SolutionLimit,
        StatusCode::Interrupted,
        StatusCode::Numeric,
        StatusCode::Suboptimal,
        StatusCode::InProgress,
        StatusCode::UserObjLimit,
    ];

    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.code() == code)
    }

    /// Symbolic lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            StatusCode::Loaded => "loaded",
            StatusCode::Optimal => "optimal",
            StatusCode::Infeasible => "infeasible",
            StatusCode::InfOrUnbd => "inf_or_unbd",
            StatusCode::Unbounded => "unbounded",
            StatusCode::Cutoff => "cutoff",
            StatusCode::IterationLimit => "iteration_limit",
            StatusCode::NodeLimit => "node_limit",
            StatusCode::TimeLimit => "time_limit",
            StatusCode::SolutionLimit => "solution_limit",
            StatusCode::Interrupted => "interrupted",
            StatusCode::Numeric => "numeric",
            StatusCode::Suboptimal => "suboptimal",
            StatusCode::InProgress => "inprogress",
            StatusCode::UserObjLimit => "user_obj_limit",
        }
    }

    /// Whether the engine may hold a feasible solution in this state.
    pub fn may_have_solution(self) -> bool {
        matches!(
            self,
            StatusCode::Optimal
                | StatusCode::Suboptimal
                | StatusCode::IterationLimit
                | StatusCode::NodeLimit
                | StatusCode::TimeLimit
                | StatusCode::SolutionLimit
                | StatusCode::Interrupted
                | StatusCode::UserObjLimit
        )
    }
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
