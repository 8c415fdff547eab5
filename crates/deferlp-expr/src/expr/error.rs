//! Expression construction errors.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExprError {
    /// A sense token outside `=`, `==`, `===`, `<`, `<=`, `>`, `>=` and the engine codes.
    InvalidSense(String),
    /// Product of two non-constant operands.
    NonLinear,
}

impl ExprError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            ExprError::InvalidSense(_) => "EXPR_INVALID_SENSE",
            ExprError::NonLinear => "EXPR_NON_LINEAR",
        }
    }
}

impl std::fmt::Display for ExprError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExprError::InvalidSense(token) => {
                write!(f, "[{}] invalid sense: {token:?}", self.code())
            }
            ExprError::NonLinear => write!(
                f,
                "[{}] only multiplication by a number is supported",
                self.code()
            ),
        }
    }
}

impl std::error::Error for ExprError {}
