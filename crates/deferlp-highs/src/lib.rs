//! HiGHS engine for deferlp.
//!
//! [`HighsSession`] and [`HighsModel`] implement the engine traits from
//! `deferlp-engine` on top of the `highs` crate. Columns and rows are kept
//! in memory and lowered to a HiGHS problem for every solve, so the model can
//! be edited freely between solves.

pub mod ffi;
mod iis;
mod lp;
mod model;
mod params;
mod problem;
mod session;
mod solve;
mod status;

pub use ffi::highs_version;
pub use model::{HighsModel, HighsTerminator};
pub use session::HighsSession;
