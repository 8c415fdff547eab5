//! Typed attribute descriptors and the four attribute namespaces.
//!
//! Every attribute an engine exposes lives in exactly one namespace, which
//! fixes its storage class. Lookups are by the engine's symbolic name.

/// Storage class of an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AttrType {
    Char,
    Double,
    Int,
    String,
}

impl AttrType {
    pub fn as_str(self) -> &'static str {
        match self {
            AttrType::Char => "char",
            AttrType::Double => "double",
            AttrType::Int => "int",
            AttrType::String => "string",
        }
    }
}

/// A resolved attribute: engine name plus storage class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Attr {
    name: &'static str,
    ty: AttrType,
}

impl Attr {
    pub const fn new(name: &'static str, ty: AttrType) -> Self {
        Self { name, ty }
    }

    pub fn name(self) -> &'static str {
        self.name
    }

    pub fn ty(self) -> AttrType {
        self.ty
    }
}

impl std::fmt::Display for Attr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.ty.as_str())
    }
}

/// A value read from or written to an attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Char(char),
    Double(f64),
    Int(i32),
    Str(String),
}

impl AttrValue {
    pub fn ty(&self) -> AttrType {
        match self {
            AttrValue::Char(_) => AttrType::Char,
            AttrValue::Double(_) => AttrType::Double,
            AttrValue::Int(_) => AttrType::Int,
            AttrValue::Str(_) => AttrType::String,
        }
    }

    /// Numeric view; chars and strings have none.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttrValue::Double(v) => Some(*v),
            AttrValue::Int(v) => Some(f64::from(*v)),
            AttrValue::Char(_) | AttrValue::Str(_) => None,
        }
    }

    pub fn as_char(&self) -> Option<char> {
        match self {
            AttrValue::Char(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl std::fmt::Display for AttrValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttrValue::Char(c) => write!(f, "{c}"),
            AttrValue::Double(v) => write!(f, "{v}"),
            AttrValue::Int(v) => write!(f, "{v}"),
            AttrValue::Str(s) => f.write_str(s),
        }
    }
}

/// One attribute namespace: a storage class and the names it holds.
#[derive(Debug, Clone, Copy)]
pub struct AttrNamespace {
    ty: AttrType,
    names: &'static [&'static str],
}

impl AttrNamespace {
    pub fn ty(&self) -> AttrType {
        self.ty
    }

    pub fn names(&self) -> &'static [&'static str] {
        self.names
    }

    pub fn lookup(&self, name: &str) -> Option<Attr> {
        self.names
            .iter()
            .find(|candidate| **candidate == name)
            .map(|found| Attr::new(*found, self.ty))
    }

    pub fn iter(&self) -> impl Iterator<Item = Attr> + '_ {
        self.names.iter().map(|name| Attr::new(*name, self.ty))
    }
}

pub const CHAR_ATTRS: AttrNamespace = AttrNamespace {
    ty: AttrType::Char,
    names: &["VType", "Sense"],
};

pub const DOUBLE_ATTRS: AttrNamespace = AttrNamespace {
    ty: AttrType::Double,
    names: &[
        // columns
        "LB",
        "UB",
        "Obj",
        "X",
        "Xn",
        "RC",
        "Start",
        "PStart",
        "SAObjLow",
        "SAObjUp",
        "SALBLow",
        "SALBUp",
        "SAUBLow",
        "SAUBUp",
        "UnbdRay",
        // rows
        "RHS",
        "Pi",
        "Slack",
        "DStart",
        "SARHSLow",
        "SARHSUp",
        "FarkasDual",
        // model
        "ObjCon",
        "ObjVal",
        "ObjBound",
        "MIPGap",
        "Runtime",
        "IterCount",
        "NodeCount",
        "MaxCoeff",
        "MinCoeff",
        "MaxBound",
        "MinBound",
        "MaxObjCoeff",
        "MinObjCoeff",
        "MaxRHS",
        "MinRHS",
        "Kappa",
        "KappaExact",
        "FarkasProof",
    ],
};

pub const INT_ATTRS: AttrNamespace = AttrNamespace {
    ty: AttrType::Int,
    names: &[
        "BranchPriority",
        "VBasis",
        "IISLB",
        "IISUB",
        "CBasis",
        "IISConstr",
        "NumConstrs",
        "NumVars",
        "NumSOS",
        "NumQConstrs",
        "NumNZs",
        "NumQNZs",
        "NumQCNZs",
        "NumIntVars",
        "NumBinVars",
        "ModelSense",
        "Status",
        "SolCount",
        "BarIterCount",
        "IsMIP",
        "IsQP",
        "IsQCP",
        "IISMinimal",
    ],
};

pub const STRING_ATTRS: AttrNamespace = AttrNamespace {
    ty: AttrType::String,
    names: &["VarName", "ConstrName", "ModelName"],
};

/// All namespaces, searched in this order.
pub const NAMESPACES: [AttrNamespace; 4] = [CHAR_ATTRS, DOUBLE_ATTRS, INT_ATTRS, STRING_ATTRS];

/// Resolve a name across every namespace.
pub fn resolve(name: &str) -> Option<Attr> {
    NAMESPACES.iter().find_map(|ns| ns.lookup(name))
}
