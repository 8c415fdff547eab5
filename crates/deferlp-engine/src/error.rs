//! Engine error type.
//!
//! Engines report failures as a native integer code plus a message. The code
//! is translated into a named kind through a fixed table; codes outside the
//! table are `Unknown`.

/// Named classes of native engine error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineErrorKind {
    OutOfMemory,
    NullArgument,
    InvalidArgument,
    UnknownAttribute,
    DataNotAvailable,
    IndexOutOfRange,
    UnknownParameter,
    ValueOutOfRange,
    NoLicense,
    SizeLimitExceeded,
    Callback,
    FileRead,
    FileWrite,
    Numeric,
    IisNotInfeasible,
    NotForMip,
    OptimizationInProgress,
    Duplicates,
    Nodefile,
    QNotPsd,
    NotSupported,
    NotInModel,
    Unknown,
}

const KIND_TABLE: &[(i32, EngineErrorKind)] = &[
    (EngineError::OUT_OF_MEMORY, EngineErrorKind::OutOfMemory),
    (EngineError::NULL_ARGUMENT, EngineErrorKind::NullArgument),
    (EngineError::INVALID_ARGUMENT, EngineErrorKind::InvalidArgument),
    (EngineError::UNKNOWN_ATTRIBUTE, EngineErrorKind::UnknownAttribute),
    (EngineError::DATA_NOT_AVAILABLE, EngineErrorKind::DataNotAvailable),
    (EngineError::INDEX_OUT_OF_RANGE, EngineErrorKind::IndexOutOfRange),
    (EngineError::UNKNOWN_PARAMETER, EngineErrorKind::UnknownParameter),
    (EngineError::VALUE_OUT_OF_RANGE, EngineErrorKind::ValueOutOfRange),
    (EngineError::NO_LICENSE, EngineErrorKind::NoLicense),
    (EngineError::SIZE_LIMIT_EXCEEDED, EngineErrorKind::SizeLimitExceeded),
    (EngineError::CALLBACK, EngineErrorKind::Callback),
    (EngineError::FILE_READ, EngineErrorKind::FileRead),
    (EngineError::FILE_WRITE, EngineErrorKind::FileWrite),
    (EngineError::NUMERIC, EngineErrorKind::Numeric),
    (EngineError::IIS_NOT_INFEASIBLE, EngineErrorKind::IisNotInfeasible),
    (EngineError::NOT_FOR_MIP, EngineErrorKind::NotForMip),
    (
        EngineError::OPTIMIZATION_IN_PROGRESS,
        EngineErrorKind::OptimizationInProgress,
    ),
    (EngineError::DUPLICATES, EngineErrorKind::Duplicates),
    (EngineError::NODEFILE, EngineErrorKind::Nodefile),
    (EngineError::Q_NOT_PSD, EngineErrorKind::QNotPsd),
    (EngineError::NOT_SUPPORTED, EngineErrorKind::NotSupported),
    (EngineError::NOT_IN_MODEL, EngineErrorKind::NotInModel),
];

impl EngineErrorKind {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(self) -> &'static str {
        match self {
            EngineErrorKind::OutOfMemory => "ENGINE_OUT_OF_MEMORY",
            EngineErrorKind::NullArgument => "ENGINE_NULL_ARGUMENT",
            EngineErrorKind::InvalidArgument => "ENGINE_INVALID_ARGUMENT",
            EngineErrorKind::UnknownAttribute => "ENGINE_UNKNOWN_ATTRIBUTE",
            EngineErrorKind::DataNotAvailable => "ENGINE_DATA_NOT_AVAILABLE",
            EngineErrorKind::IndexOutOfRange => "ENGINE_INDEX_OUT_OF_RANGE",
            EngineErrorKind::UnknownParameter => "ENGINE_UNKNOWN_PARAMETER",
            EngineErrorKind::ValueOutOfRange => "ENGINE_VALUE_OUT_OF_RANGE",
            EngineErrorKind::NoLicense => "ENGINE_NO_LICENSE",
            EngineErrorKind::SizeLimitExceeded => "ENGINE_SIZE_LIMIT_EXCEEDED",
            EngineErrorKind::Callback => "ENGINE_CALLBACK",
            EngineErrorKind::FileRead => "ENGINE_FILE_READ",
            EngineErrorKind::FileWrite => "ENGINE_FILE_WRITE",
            EngineErrorKind::Numeric => "ENGINE_NUMERIC",
            EngineErrorKind::IisNotInfeasible => "ENGINE_IIS_NOT_INFEASIBLE",
            EngineErrorKind::NotForMip => "ENGINE_NOT_FOR_MIP",
            EngineErrorKind::OptimizationInProgress => "ENGINE_OPTIMIZATION_IN_PROGRESS",
            EngineErrorKind::Duplicates => "ENGINE_DUPLICATES",
            EngineErrorKind::Nodefile => "ENGINE_NODEFILE",
            EngineErrorKind::QNotPsd => "ENGINE_Q_NOT_PSD",
            EngineErrorKind::NotSupported => "ENGINE_NOT_SUPPORTED",
            EngineErrorKind::NotInModel => "ENGINE_NOT_IN_MODEL",
            EngineErrorKind::Unknown => "ENGINE_UNKNOWN",
        }
    }
}

/// A failure reported by the engine: native code plus message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineError {
    code: i32,
    message: String,
}

impl EngineError {
    pub const OUT_OF_MEMORY: i32 = 10001;
    pub const NULL_ARGUMENT: i32 = 10002;
    pub const INVALID_ARGUMENT: i32 = 10003;
    pub const UNKNOWN_ATTRIBUTE: i32 = 10004;
    pub const DATA_NOT_AVAILABLE: i32 = 10005;
    pub const INDEX_OUT_OF_RANGE: i32 = 10006;
    pub const UNKNOWN_PARAMETER: i32 = 10007;
    pub const VALUE_OUT_OF_RANGE: i32 = 10008;
    pub const NO_LICENSE: i32 = 10009;
    pub const SIZE_LIMIT_EXCEEDED: i32 = 10010;
    pub const CALLBACK: i32 = 10011;
    pub const FILE_READ: i32 = 10012;
    pub const FILE_WRITE: i32 = 10013;
    pub const NUMERIC: i32 = 10014;
    pub const IIS_NOT_INFEASIBLE: i32 = 10015;
    pub const NOT_FOR_MIP: i32 = 10016;
    pub const OPTIMIZATION_IN_PROGRESS: i32 = 10017;
    pub const DUPLICATES: i32 = 10018;
    pub const NODEFILE: i32 = 10019;
    pub const Q_NOT_PSD: i32 = 10020;
    pub const NOT_SUPPORTED: i32 = 10024;
    pub const NOT_IN_MODEL: i32 = 20001;

    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Native error code as reported by the engine.
    pub fn code(&self) -> i32 {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Translate the native code; unrecognized codes map to `Unknown`.
    pub fn kind(&self) -> EngineErrorKind {
        KIND_TABLE
            .iter()
            .find(|(code, _)| *code == self.code)
            .map_or(EngineErrorKind::Unknown, |(_, kind)| *kind)
    }
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] {} (code {})",
            self.kind().code(),
            self.message,
            self.code
        )
    }
}

impl std::error::Error for EngineError {}

#[cfg(test)]
mod tests {
    use super::{EngineError, EngineErrorKind};

    #[test]
    fn known_codes_translate() {
        assert_eq!(
            EngineError::new(10004, "bad attr").kind(),
            EngineErrorKind::UnknownAttribute
        );
        assert_eq!(
            EngineError::new(EngineError::IIS_NOT_INFEASIBLE, "feasible").kind(),
            EngineErrorKind::IisNotInfeasible
        );
        assert_eq!(
            EngineError::new(EngineError::NOT_IN_MODEL, "pending").kind(),
            EngineErrorKind::NotInModel
        );
    }

    #[test]
    fn unknown_code_falls_back() {
        let err = EngineError::new(42, "mystery");
        assert_eq!(err.kind(), EngineErrorKind::Unknown);
        assert_eq!(err.code(), 42);
    }

    #[test]
    fn display_carries_kind_code_and_message() {
        let msg = EngineError::new(EngineError::FILE_WRITE, "cannot write x.mps").to_string();
        assert!(msg.contains("ENGINE_FILE_WRITE"));
        assert!(msg.contains("cannot write x.mps"));
        assert!(msg.contains("10013"));
    }
}
