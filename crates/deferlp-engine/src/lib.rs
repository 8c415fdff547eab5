//! The external solver-engine surface consumed by the modeling layer.
//!
//! Engine implementations (like `deferlp-highs`) implement [`Session`] and
//! [`EngineModel`]; the modeling layer never talks to a solver any other way.
//!
//! # Overview
//!
//! - [`Session`] / [`EngineModel`] / [`Terminate`]: engine traits
//! - [`Attr`] / [`AttrType`] / [`AttrValue`]: typed attribute descriptors
//! - [`Param`] / [`ParamType`] / [`ParamValue`]: typed parameter descriptors
//! - [`StatusCode`]: optimization status enumeration
//! - [`NativeLinExpr`]: engine-side linear expression builder
//! - [`EngineError`]: native error code plus message

pub mod attrs;
mod error;
mod handles;
mod native;
pub mod params;
mod status;
mod traits;

pub use attrs::{Attr, AttrNamespace, AttrType, AttrValue};
pub use error::{EngineError, EngineErrorKind};
pub use handles::{ConstrHandle, VarHandle};
pub use native::{NativeLinExpr, NativeRhs};
pub use params::{Param, ParamDef, ParamInfo, ParamNamespace, ParamType, ParamValue};
pub use status::StatusCode;
pub use traits::{EngineModel, Session, Terminate};

/// Engine representation of an infinite bound.
pub const ENGINE_INFINITY: f64 = 1e100;

/// Value reported for attributes that have no defined value.
pub const UNDEFINED: f64 = 1e101;
