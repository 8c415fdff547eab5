//! Raw HiGHS info queries the safe wrapper does not expose.
//!
//! This module contains unsafe code for interacting with the C library.
#![allow(unsafe_code)]

use highs::SolvedModel;
use std::ffi::{CStr, CString};
use tracing::debug;

/// Return the HiGHS solver version string, if available.
pub fn highs_version() -> Option<String> {
    unsafe {
        let ptr = highs_sys::Highs_version();
        if ptr.is_null() {
            None
        } else {
            CStr::from_ptr(ptr).to_str().ok().map(|s| s.to_string())
        }
    }
}

/// Read an integer info value from a solved model.
pub(crate) fn int_info(solved: &SolvedModel, name: &str) -> Option<i64> {
    let c_name = CString::new(name).ok()?;
    let mut value: highs_sys::HighsInt = 0;
    let status = unsafe {
        highs_sys::Highs_getIntInfoValue(solved.as_ptr(), c_name.as_ptr(), &raw mut value)
    };
    if status != highs_sys::STATUS_OK {
        debug!(
            component = "solver",
            operation = "solve_info",
            info = name,
            status_code = status,
            "Integer info value not available"
        );
        return None;
    }
    Some(i64::from(value))
}

/// Read a 64-bit integer info value (node counts) from a solved model.
pub(crate) fn int64_info(solved: &SolvedModel, name: &str) -> Option<i64> {
    let c_name = CString::new(name).ok()?;
    let mut value: i64 = 0;
    let status = unsafe {
        highs_sys::Highs_getInt64InfoValue(solved.as_ptr(), c_name.as_ptr(), &raw mut value)
    };
    (status == highs_sys::STATUS_OK).then_some(value)
}

/// Read a double info value from a solved model.
pub(crate) fn double_info(solved: &SolvedModel, name: &str) -> Option<f64> {
    let c_name = CString::new(name).ok()?;
    let mut value: f64 = 0.0;
    let status = unsafe {
        highs_sys::Highs_getDoubleInfoValue(solved.as_ptr(), c_name.as_ptr(), &raw mut value)
    };
    (status == highs_sys::STATUS_OK).then_some(value)
}

/// HiGHS reports a usable primal solution with status 2 (feasible).
pub(crate) fn has_primal_solution(solved: &SolvedModel) -> bool {
    int_info(solved, "primal_solution_status") == Some(2)
}
