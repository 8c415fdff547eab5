//! Typed parameter descriptors and the three parameter namespaces.

use crate::ENGINE_INFINITY;

/// Storage class of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamType {
    Double,
    Int,
    String,
}

impl ParamType {
    pub fn as_str(self) -> &'static str {
        match self {
            ParamType::Double => "double",
            ParamType::Int => "int",
            ParamType::String => "string",
        }
    }
}

/// A resolved parameter: engine name plus storage class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Param {
    name: &'static str,
    ty: ParamType,
}

impl Param {
    pub const fn new(name: &'static str, ty: ParamType) -> Self {
        Self { name, ty }
    }

    pub fn name(self) -> &'static str {
        self.name
    }

    pub fn ty(self) -> ParamType {
        self.ty
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Double(f64),
    Int(i32),
    Str(String),
}

impl ParamValue {
    pub fn ty(&self) -> ParamType {
        match self {
            ParamValue::Double(_) => ParamType::Double,
            ParamValue::Int(_) => ParamType::Int,
            ParamValue::Str(_) => ParamType::String,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParamValue::Double(v) => Some(*v),
            ParamValue::Int(v) => Some(f64::from(*v)),
            ParamValue::Str(_) => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            ParamValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl std::fmt::Display for ParamValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamValue::Double(v) => write!(f, "{v}"),
            ParamValue::Int(v) => write!(f, "{v}"),
            ParamValue::Str(s) => f.write_str(s),
        }
    }
}

/// Current value plus range and default of a parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamInfo {
    pub param: Param,
    pub current: ParamValue,
    pub min: Option<ParamValue>,
    pub max: Option<ParamValue>,
    pub default: ParamValue,
}

/// Static definition of a parameter. String parameters ignore the range.
#[derive(Debug, Clone, Copy)]
pub struct ParamDef {
    pub name: &'static str,
    pub default: f64,
    pub min: f64,
    pub max: f64,
    pub default_str: &'static str,
}

impl ParamDef {
    const fn numeric(name: &'static str, default: f64, min: f64, max: f64) -> Self {
        Self {
            name,
            default,
            min,
            max,
            default_str: "",
        }
    }

    const fn string(name: &'static str, default_str: &'static str) -> Self {
        Self {
            name,
            default: 0.0,
            min: 0.0,
            max: 0.0,
            default_str,
        }
    }
}

/// One parameter namespace: a storage class and its definitions.
#[derive(Debug, Clone, Copy)]
pub struct ParamNamespace {
    ty: ParamType,
    defs: &'static [ParamDef],
}

impl ParamNamespace {
    pub fn ty(&self) -> ParamType {
        self.ty
    }

    pub fn defs(&self) -> &'static [ParamDef] {
        self.defs
    }

    pub fn lookup(&self, name: &str) -> Option<Param> {
        self.def(name).map(|def| Param::new(def.name, self.ty))
    }

    pub fn def(&self, name: &str) -> Option<&'static ParamDef> {
        self.defs.iter().find(|def| def.name == name)
    }

    /// Default value typed for this namespace.
    pub fn default_value(&self, def: &ParamDef) -> ParamValue {
        match self.ty {
            ParamType::Double => ParamValue::Double(def.default),
            ParamType::Int => ParamValue::Int(def.default as i32),
            ParamType::String => ParamValue::Str(def.default_str.to_string()),
        }
    }

    pub fn range(&self, def: &ParamDef) -> (Option<ParamValue>, Option<ParamValue>) {
        match self.ty {
            ParamType::Double => (
                Some(ParamValue::Double(def.min)),
                Some(ParamValue::Double(def.max)),
            ),
            ParamType::Int => (
                Some(ParamValue::Int(def.min as i32)),
                Some(ParamValue::Int(def.max as i32)),
            ),
            ParamType::String => (None, None),
        }
    }
}

const INT_MAX: f64 = 2_000_000_000.0;

pub const DOUBLE_PARAMS: ParamNamespace = ParamNamespace {
    ty: ParamType::Double,
    defs: &[
        ParamDef::numeric("TimeLimit", ENGINE_INFINITY, 0.0, ENGINE_INFINITY),
        ParamDef::numeric("MIPGap", 1e-4, 0.0, ENGINE_INFINITY),
        ParamDef::numeric("FeasibilityTol", 1e-6, 1e-9, 1e-2),
        ParamDef::numeric("OptimalityTol", 1e-6, 1e-9, 1e-2),
        ParamDef::numeric("IntFeasTol", 1e-5, 1e-9, 1e-1),
        ParamDef::numeric("Cutoff", ENGINE_INFINITY, -ENGINE_INFINITY, ENGINE_INFINITY),
        ParamDef::numeric("NodeLimit", ENGINE_INFINITY, 0.0, ENGINE_INFINITY),
        ParamDef::numeric("IterationLimit", ENGINE_INFINITY, 0.0, ENGINE_INFINITY),
    ],
};

pub const INT_PARAMS: ParamNamespace = ParamNamespace {
    ty: ParamType::Int,
    defs: &[
        ParamDef::numeric("Threads", 0.0, 0.0, 1024.0),
        ParamDef::numeric("OutputFlag", 1.0, 0.0, 1.0),
        ParamDef::numeric("LogToConsole", 1.0, 0.0, 1.0),
        ParamDef::numeric("Presolve", -1.0, -1.0, 2.0),
        ParamDef::numeric("Method", -1.0, -1.0, 5.0),
        ParamDef::numeric("MIPFocus", 0.0, 0.0, 3.0),
        ParamDef::numeric("Seed", 0.0, 0.0, INT_MAX),
        ParamDef::numeric("SolutionLimit", INT_MAX, 1.0, INT_MAX),
    ],
};

pub const STRING_PARAMS: ParamNamespace = ParamNamespace {
    ty: ParamType::String,
    defs: &[
        ParamDef::string("LogFile", ""),
        ParamDef::string("ResultFile", ""),
    ],
};

pub const NAMESPACES: [ParamNamespace; 3] = [DOUBLE_PARAMS, INT_PARAMS, STRING_PARAMS];

/// Resolve a name across every namespace.
pub fn resolve(name: &str) -> Option<Param> {
    NAMESPACES.iter().find_map(|ns| ns.lookup(name))
}

/// Namespace and definition for a resolved parameter.
pub fn definition(param: Param) -> Option<(ParamNamespace, &'static ParamDef)> {
    NAMESPACES
        .iter()
        .find(|ns| ns.ty == param.ty)
        .and_then(|ns| ns.def(param.name).map(|def| (*ns, def)))
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::{ParamType, ParamValue, definition, resolve};

    #[test]
    fn resolves_each_storage_class() {
        assert_eq!(resolve("TimeLimit").map(|p| p.ty()), Some(ParamType::Double));
        assert_eq!(resolve("Threads").map(|p| p.ty()), Some(ParamType::Int));
        assert_eq!(resolve("LogFile").map(|p| p.ty()), Some(ParamType::String));
        assert!(resolve("Nope").is_none());
    }

    #[test]
    fn defaults_are_typed_by_namespace() {
        let param = resolve("OutputFlag").expect("known param");
        let (ns, def) = definition(param).expect("definition");
        assert_eq!(ns.default_value(def), ParamValue::Int(1));
        let (min, max) = ns.range(def);
        assert_eq!(min, Some(ParamValue::Int(0)));
        assert_eq!(max, Some(ParamValue::Int(1)));
    }

    #[test]
    fn string_params_have_no_range() {
        let param = resolve("ResultFile").expect("known param");
        let (ns, def) = definition(param).expect("definition");
        assert_eq!(ns.range(def), (None, None));
        assert_eq!(ns.default_value(def), ParamValue::Str(String::new()));
    }
}
