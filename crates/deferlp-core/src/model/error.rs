//! Model error types.

use deferlp_engine::{AttrType, EngineError};
use deferlp_expr::{ConstrId, ExprError, VarId};

/// Entity class named in lifecycle errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Variable,
    Constraint,
}

impl Entity {
    pub fn as_str(self) -> &'static str {
        match self {
            Entity::Variable => "variable",
            Entity::Constraint => "constraint",
        }
    }
}

/// Coarse classification of a [`ModelError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    AlreadyMaterialized,
    NotYetMaterialized,
    SessionAlreadySet,
    SessionMissing,
    EngineFailure,
    Unreachable,
}

/// Errors that can occur during model operations
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    /// Malformed expression or sense token
    Expr(ExprError),
    /// Name does not match the identifier pattern
    InvalidName { name: String },
    /// Unrecognized variable type token
    InvalidVarType { token: String },
    /// Unrecognized objective sense token
    InvalidObjSense { token: String },
    /// Variable ID not declared in this model
    InvalidVariableId(VarId),
    /// Constraint ID not declared in this model
    InvalidConstraintId(ConstrId),
    /// Attribute name unknown to every engine namespace, or accessor not in a table
    UnknownAttribute { name: String },
    /// Write to a read-only attribute
    AttributeNotSettable { name: &'static str },
    /// Value cannot be stored in the attribute's storage class
    InvalidAttributeValue {
        name: &'static str,
        expected: AttrType,
        found: AttrType,
    },
    /// Parameter name unknown to every engine namespace
    UnknownParameter { name: String },
    /// Value cannot be cast to the parameter's storage class
    InvalidParameterValue { name: String, value: String },
    /// Configuration document could not be parsed
    InvalidConfig { reason: String },
    AlreadyMaterialized { entity: Entity, index: u32 },
    NotYetMaterialized { entity: Entity, index: u32 },
    SessionAlreadySet,
    SessionMissing,
    /// Failure reported by the engine
    Engine(EngineError),
    /// State that earlier validation should have made impossible
    Invariant { reason: String },
}

impl ModelError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            ModelError::Expr(err) => err.code(),
            ModelError::InvalidName { .. } => "NAME_INVALID",
            ModelError::InvalidVarType { .. } => "VARIABLE_INVALID_TYPE",
            ModelError::InvalidObjSense { .. } => "OBJECTIVE_INVALID_SENSE",
            ModelError::InvalidVariableId(_) => "VARIABLE_INVALID_ID",
            ModelError::InvalidConstraintId(_) => "CONSTRAINT_INVALID_ID",
            ModelError::UnknownAttribute { .. } => "ATTRIBUTE_UNKNOWN",
            ModelError::AttributeNotSettable { .. } => "ATTRIBUTE_NOT_SETTABLE",
            ModelError::InvalidAttributeValue { .. } => "ATTRIBUTE_INVALID_VALUE",
            ModelError::UnknownParameter { .. } => "PARAMETER_UNKNOWN",
            ModelError::InvalidParameterValue { .. } => "PARAMETER_INVALID_VALUE",
            ModelError::InvalidConfig { .. } => "CONFIG_INVALID",
            ModelError::AlreadyMaterialized { .. } => "ENTITY_ALREADY_MATERIALIZED",
            ModelError::NotYetMaterialized { .. } => "ENTITY_NOT_MATERIALIZED",
            ModelError::SessionAlreadySet => "SESSION_ALREADY_SET",
            ModelError::SessionMissing => "SESSION_MISSING",
            ModelError::Engine(err) => err.kind().code(),
            ModelError::Invariant { .. } => "INVARIANT_VIOLATED",
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ModelError::Expr(_)
            | ModelError::InvalidName { .. }
            | ModelError::InvalidVarType { .. }
            | ModelError::InvalidObjSense { .. }
            | ModelError::InvalidVariableId(_)
            | ModelError::InvalidConstraintId(_)
            | ModelError::UnknownAttribute { .. }
            | ModelError::AttributeNotSettable { .. }
            | ModelError::InvalidAttributeValue { .. }
            | ModelError::UnknownParameter { .. }
            | ModelError::InvalidParameterValue { .. }
            | ModelError::InvalidConfig { .. } => ErrorKind::InvalidArgument,
            ModelError::AlreadyMaterialized { .. } => ErrorKind::AlreadyMaterialized,
            ModelError::NotYetMaterialized { .. } => ErrorKind::NotYetMaterialized,
            ModelError::SessionAlreadySet => ErrorKind::SessionAlreadySet,
            ModelError::SessionMissing => ErrorKind::SessionMissing,
            ModelError::Engine(_) => ErrorKind::EngineFailure,
            ModelError::Invariant { .. } => ErrorKind::Unreachable,
        }
    }

    pub(crate) fn attr_type_mismatch(name: &str, expected: AttrType, found: AttrType) -> Self {
        ModelError::Invariant {
            reason: format!(
                "attribute {name} read as {} but engine returned {}",
                expected.as_str(),
                found.as_str()
            ),
        }
    }
}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelError::Expr(err) => write!(f, "{err}"),
            ModelError::InvalidName { name } => {
                write!(f, "[{}] invalid name: {name:?}", self.code())
            }
            ModelError::InvalidVarType { token } => {
                write!(f, "[{}] invalid vtype: {token:?}", self.code())
            }
            ModelError::InvalidObjSense { token } => {
                write!(f, "[{}] invalid sense: {token:?}", self.code())
            }
            ModelError::InvalidVariableId(id) => write!(
                f,
                "[{}] Variable ID {} does not exist",
                self.code(),
                id.inner()
            ),
            ModelError::InvalidConstraintId(id) => write!(
                f,
                "[{}] Constraint ID {} does not exist",
                self.code(),
                id.inner()
            ),
            ModelError::UnknownAttribute { name } => {
                write!(f, "[{}] invalid attribute name: {name:?}", self.code())
            }
            ModelError::AttributeNotSettable { name } => {
                write!(f, "[{}] attribute {name} is read-only", self.code())
            }
            ModelError::InvalidAttributeValue {
                name,
                expected,
                found,
            } => write!(
                f,
                "[{}] attribute {name} stores {} values, got {}",
                self.code(),
                expected.as_str(),
                found.as_str()
            ),
            ModelError::UnknownParameter { name } => {
                write!(f, "[{}] invalid parameter name: {name:?}", self.code())
            }
            ModelError::InvalidParameterValue { name, value } => write!(
                f,
                "[{}] invalid param value for {name}: {value}",
                self.code()
            ),
            ModelError::InvalidConfig { reason } => {
                write!(f, "[{}] invalid solver config: {reason}", self.code())
            }
            ModelError::AlreadyMaterialized { entity, index } => write!(
                f,
                "[{}] {} {index} is already materialized",
                self.code(),
                entity.as_str()
            ),
            ModelError::NotYetMaterialized { entity, index } => write!(
                f,
                "[{}] {} {index} is not yet materialized",
                self.code(),
                entity.as_str()
            ),
            ModelError::SessionAlreadySet => {
                write!(f, "[{}] session is already set", self.code())
            }
            ModelError::SessionMissing => write!(f, "[{}] session is not set", self.code()),
            ModelError::Engine(err) => write!(f, "{err}"),
            ModelError::Invariant { reason } => {
                write!(f, "[{}] must not happen: {reason}", self.code())
            }
        }
    }
}

impl std::error::Error for ModelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ModelError::Expr(err) => Some(err),
            ModelError::Engine(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ExprError> for ModelError {
    fn from(err: ExprError) -> Self {
        ModelError::Expr(err)
    }
}

impl From<EngineError> for ModelError {
    fn from(err: EngineError) -> Self {
        ModelError::Engine(err)
    }
}
