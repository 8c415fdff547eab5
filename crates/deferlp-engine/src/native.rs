//! Engine-native linear expressions.

use crate::handles::VarHandle;
use std::collections::HashMap;

/// Accumulated `(coefficient, column)` terms plus a constant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NativeLinExpr {
    terms: Vec<(f64, VarHandle)>,
    constant: f64,
}

impl NativeLinExpr {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_term(&mut self, coeff: f64, var: VarHandle) {
        self.terms.push((coeff, var));
    }

    pub fn add_constant(&mut self, value: f64) {
        self.constant += value;
    }

    pub fn terms(&self) -> &[(f64, VarHandle)] {
        &self.terms
    }

    pub fn constant(&self) -> f64 {
        self.constant
    }

    /// Coefficients summed per column, in first-appearance order.
    pub fn merged_terms(&self) -> Vec<(VarHandle, f64)> {
        let mut position: HashMap<VarHandle, usize> = HashMap::with_capacity(self.terms.len());
        let mut merged: Vec<(VarHandle, f64)> = Vec::with_capacity(self.terms.len());
        for &(coeff, var) in &self.terms {
            match position.get(&var) {
                Some(&at) => merged[at].1 += coeff,
                None => {
                    position.insert(var, merged.len());
                    merged.push((var, coeff));
                }
            }
        }
        merged
    }
}

/// Right-hand side of a native constraint.
#[derive(Debug, Clone, PartialEq)]
pub enum NativeRhs {
    Const(f64),
    Expr(NativeLinExpr),
}
