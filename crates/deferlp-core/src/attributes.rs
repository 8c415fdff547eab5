//! Attribute registry.
//!
//! Each entity type declares a static table of `(engine name, accessor,
//! settable)` rows. The registry resolves every engine name against the
//! engine's attribute namespaces once per process; an unresolvable name
//! fails the whole table rather than a later call.

use crate::model::ModelError;
use crate::model::views::{CONSTR_ATTR_SPECS, MODEL_ATTR_SPECS, VAR_ATTR_SPECS};
use deferlp_engine::{Attr, AttrType, AttrValue, attrs};
use std::collections::HashMap;
use std::sync::OnceLock;

/// One declarative table row.
#[derive(Debug, Clone, Copy)]
pub struct AttrSpec {
    pub engine_name: &'static str,
    pub accessor: &'static str,
    pub settable: bool,
}

impl AttrSpec {
    pub const fn new(engine_name: &'static str, accessor: &'static str, settable: bool) -> Self {
        Self {
            engine_name,
            accessor,
            settable,
        }
    }
}

/// A table row with its engine name resolved to a typed descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttrRow {
    attr: Attr,
    accessor: &'static str,
    settable: bool,
}

impl AttrRow {
    pub fn attr(&self) -> Attr {
        self.attr
    }

    pub fn accessor(&self) -> &'static str {
        self.accessor
    }

    pub fn settable(&self) -> bool {
        self.settable
    }

    /// Query accessors (`is_*`) read the value as a nonzero test.
    pub fn is_query(&self) -> bool {
        self.accessor.starts_with("is_")
    }
}

#[derive(Debug, Clone)]
pub struct AttributeTable {
    entity: &'static str,
    rows: Vec<AttrRow>,
    by_accessor: HashMap<&'static str, usize>,
}

impl AttributeTable {
    pub fn build(entity: &'static str, specs: &[AttrSpec]) -> Result<Self, ModelError> {
        let mut rows = Vec::with_capacity(specs.len());
        let mut by_accessor = HashMap::with_capacity(specs.len());
        for spec in specs {
            let attr = lookup_attr(spec.engine_name)?;
            by_accessor.insert(spec.accessor, rows.len());
            rows.push(AttrRow {
                attr,
                accessor: spec.accessor,
                settable: spec.settable,
            });
        }
        tracing::trace!(
            component = "attributes",
            operation = "build_table",
            status = "success",
            entity,
            rows = rows.len(),
            "Resolved attribute table"
        );
        Ok(Self {
            entity,
            rows,
            by_accessor,
        })
    }

    pub fn entity(&self) -> &'static str {
        self.entity
    }

    pub fn rows(&self) -> &[AttrRow] {
        &self.rows
    }

    pub fn row(&self, accessor: &str) -> Result<&AttrRow, ModelError> {
        self.by_accessor
            .get(accessor)
            .map(|&index| &self.rows[index])
            .ok_or_else(|| ModelError::UnknownAttribute {
                name: format!("{}.{accessor}", self.entity),
            })
    }
}

/// The resolved tables for every entity type.
#[derive(Debug, Clone)]
pub struct Tables {
    pub var: AttributeTable,
    pub constr: AttributeTable,
    pub model: AttributeTable,
}

static ATTR_INDEX: OnceLock<HashMap<&'static str, Attr>> = OnceLock::new();
static TABLES: OnceLock<Result<Tables, ModelError>> = OnceLock::new();

fn attr_index() -> &'static HashMap<&'static str, Attr> {
    ATTR_INDEX.get_or_init(|| {
        attrs::NAMESPACES
            .iter()
            .flat_map(|ns| ns.iter())
            .map(|attr| (attr.name(), attr))
            .collect()
    })
}

/// Resolve an engine attribute name across all namespaces.
pub fn lookup_attr(name: &str) -> Result<Attr, ModelError> {
    attr_index()
        .get(name)
        .copied()
        .ok_or_else(|| ModelError::UnknownAttribute {
            name: name.to_string(),
        })
}

/// Resolved tables, built at most once per process.
pub fn tables() -> Result<&'static Tables, ModelError> {
    TABLES
        .get_or_init(|| {
            Ok(Tables {
                var: AttributeTable::build("variable", VAR_ATTR_SPECS)?,
                constr: AttributeTable::build("constraint", CONSTR_ATTR_SPECS)?,
                model: AttributeTable::build("model", MODEL_ATTR_SPECS)?,
            })
        })
        .as_ref()
        .map_err(Clone::clone)
}

/// Fit `value` to the row's storage class. Integral doubles and ints
/// convert into each other; any other mismatch is rejected.
pub(crate) fn coerce_value(row: &AttrRow, value: AttrValue) -> Result<AttrValue, ModelError> {
    let expected = row.attr().ty();
    let found = value.ty();
    match (expected, value) {
        (AttrType::Double, AttrValue::Int(v)) => Ok(AttrValue::Double(f64::from(v))),
        (AttrType::Int, AttrValue::Double(v))
            if v.fract() == 0.0 && v >= f64::from(i32::MIN) && v <= f64::from(i32::MAX) =>
        {
            Ok(AttrValue::Int(v as i32))
        }
        (expected, value) if value.ty() == expected => Ok(value),
        _ => Err(ModelError::InvalidAttributeValue {
            name: row.attr().name(),
            expected,
            found,
        }),
    }
}

/// Conversion between accessor types and engine attribute values.
pub trait AttrScalar: Sized {
    const TYPE: AttrType;

    fn into_attr_value(self) -> AttrValue;

    fn from_attr_value(name: &str, value: AttrValue) -> Result<Self, ModelError>;
}

impl AttrScalar for f64 {
    const TYPE: AttrType = AttrType::Double;

    fn into_attr_value(self) -> AttrValue {
        AttrValue::Double(self)
    }

    fn from_attr_value(name: &str, value: AttrValue) -> Result<Self, ModelError> {
        value
            .as_f64()
            .ok_or_else(|| ModelError::attr_type_mismatch(name, Self::TYPE, value.ty()))
    }
}

impl AttrScalar for i32 {
    const TYPE: AttrType = AttrType::Int;

    fn into_attr_value(self) -> AttrValue {
        AttrValue::Int(self)
    }

    fn from_attr_value(name: &str, value: AttrValue) -> Result<Self, ModelError> {
        match value {
            AttrValue::Int(v) => Ok(v),
            other => Err(ModelError::attr_type_mismatch(name, Self::TYPE, other.ty())),
        }
    }
}

impl AttrScalar for char {
    const TYPE: AttrType = AttrType::Char;

    fn into_attr_value(self) -> AttrValue {
        AttrValue::Char(self)
    }

    fn from_attr_value(name: &str, value: AttrValue) -> Result<Self, ModelError> {
        value
            .as_char()
            .ok_or_else(|| ModelError::attr_type_mismatch(name, Self::TYPE, value.ty()))
    }
}

impl AttrScalar for String {
    const TYPE: AttrType = AttrType::String;

    fn into_attr_value(self) -> AttrValue {
        AttrValue::Str(self)
    }

    fn from_attr_value(name: &str, value: AttrValue) -> Result<Self, ModelError> {
        match value {
            AttrValue::Str(s) => Ok(s),
            other => Err(ModelError::attr_type_mismatch(name, Self::TYPE, other.ty())),
        }
    }
}

impl AttrScalar for bool {
    const TYPE: AttrType = AttrType::Int;

    fn into_attr_value(self) -> AttrValue {
        AttrValue::Int(i32::from(self))
    }

    fn from_attr_value(name: &str, value: AttrValue) -> Result<Self, ModelError> {
        value
            .as_f64()
            .map(|v| v != 0.0)
            .ok_or_else(|| ModelError::attr_type_mismatch(name, Self::TYPE, value.ty()))
    }
}
