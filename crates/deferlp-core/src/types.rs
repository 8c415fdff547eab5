use crate::model::ModelError;
use deferlp_engine::ENGINE_INFINITY;

/// Variable type, carried to the engine as a single character code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VarType {
    #[default]
    Continuous,
    Binary,
    Integer,
    SemiContinuous,
    SemiInteger,
}

impl VarType {
    pub const ALL: [VarType; 5] = [
        VarType::Continuous,
        VarType::Binary,
        VarType::Integer,
        VarType::SemiContinuous,
        VarType::SemiInteger,
    ];

    /// Engine type code.
    pub fn code(self) -> char {
        match self {
            VarType::Continuous => 'C',
            VarType::Binary => 'B',
            VarType::Integer => 'I',
            VarType::SemiContinuous => 'S',
            VarType::SemiInteger => 'N',
        }
    }

    pub fn from_code(code: char) -> Option<Self> {
        Self::ALL.into_iter().find(|ty| ty.code() == code)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            VarType::Continuous => "CONTINUOUS",
            VarType::Binary => "BINARY",
            VarType::Integer => "INTEGER",
            VarType::SemiContinuous => "SEMICONT",
            VarType::SemiInteger => "SEMIINT",
        }
    }

    /// Parse a type code or name, case-insensitively.
    pub fn parse(token: &str) -> Result<Self, ModelError> {
        let upper = token.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|ty| upper == ty.as_str() || upper.chars().eq(std::iter::once(ty.code())))
            .ok_or_else(|| ModelError::InvalidVarType {
                token: token.to_string(),
            })
    }

    pub fn is_integral(self) -> bool {
        matches!(
            self,
            VarType::Binary | VarType::Integer | VarType::SemiInteger
        )
    }
}

impl std::str::FromStr for VarType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VarType::parse(s)
    }
}

impl TryFrom<char> for VarType {
    type Error = ModelError;

    fn try_from(code: char) -> Result<Self, Self::Error> {
        VarType::parse(code.encode_utf8(&mut [0; 4]))
    }
}

impl std::fmt::Display for VarType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Optimization sense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ObjSense {
    #[default]
    Minimize,
    Maximize,
}

impl ObjSense {
    /// Engine `ModelSense` code.
    pub fn code(self) -> i32 {
        match self {
            ObjSense::Minimize => 1,
            ObjSense::Maximize => -1,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(ObjSense::Minimize),
            -1 => Some(ObjSense::Maximize),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ObjSense::Minimize => "minimize",
            ObjSense::Maximize => "maximize",
        }
    }

    /// Parse `minimize`/`min`/`maximize`/`max` or an engine code.
    pub fn parse(token: &str) -> Result<Self, ModelError> {
        let token_lower = token.trim().to_ascii_lowercase();
        match token_lower.as_str() {
            "minimize" | "min" => Ok(ObjSense::Minimize),
            "maximize" | "max" => Ok(ObjSense::Maximize),
            other => other
                .parse::<i32>()
                .ok()
                .and_then(ObjSense::from_code)
                .ok_or_else(|| ModelError::InvalidObjSense {
                    token: token.to_string(),
                }),
        }
    }
}

impl std::str::FromStr for ObjSense {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ObjSense::parse(s)
    }
}

/// Bounds for a variable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub lower: f64,
    pub upper: f64,
}

impl Bounds {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// `[0, +inf)`, the default for every variable type but binary.
    pub fn non_negative() -> Self {
        Self::new(0.0, ENGINE_INFINITY)
    }

    pub fn binary() -> Self {
        Self::new(0.0, 1.0)
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::non_negative()
    }
}

impl From<std::ops::RangeInclusive<f64>> for Bounds {
    fn from(range: std::ops::RangeInclusive<f64>) -> Self {
        Self::new(*range.start(), *range.end())
    }
}

/// Map platform infinities onto the engine sentinel.
pub fn normalize_bound(value: f64) -> f64 {
    if value == f64::INFINITY {
        ENGINE_INFINITY
    } else if value == f64::NEG_INFINITY {
        -ENGINE_INFINITY
    } else {
        value
    }
}
