//! Column and row storage, and lowering to a HiGHS `RowProblem`.

use deferlp_engine::UNDEFINED;
use highs::{Col, RowProblem};

/// Bounds at or beyond this magnitude are infinite.
pub(crate) const INFINITE_BOUND: f64 = 1e20;

pub(crate) fn is_infinite(value: f64) -> bool {
    value.abs() >= INFINITE_BOUND
}

/// Map sentinel infinities onto IEEE infinities.
pub(crate) fn highs_bound(value: f64) -> f64 {
    if value >= INFINITE_BOUND {
        f64::INFINITY
    } else if value <= -INFINITE_BOUND {
        f64::NEG_INFINITY
    } else {
        value
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Column {
    pub(crate) lb: f64,
    pub(crate) ub: f64,
    pub(crate) obj: f64,
    pub(crate) vtype: char,
    pub(crate) name: String,
    pub(crate) start: f64,
    pub(crate) pstart: f64,
    pub(crate) branch_priority: i32,
    pub(crate) vbasis: Option<i32>,
}

impl Column {
    pub(crate) fn new(lb: f64, ub: f64, obj: f64, vtype: char, name: String) -> Self {
        Self {
            lb,
            ub,
            obj,
            vtype,
            name,
            start: UNDEFINED,
            pstart: UNDEFINED,
            branch_priority: 0,
            vbasis: None,
        }
    }

    pub(crate) fn is_integral(&self) -> bool {
        matches!(self.vtype, 'B' | 'I')
    }

    /// Bounds as HiGHS sees them; binaries are clipped to `[0, 1]`.
    pub(crate) fn effective_bounds(&self) -> (f64, f64) {
        let (lb, ub) = (highs_bound(self.lb), highs_bound(self.ub));
        if self.vtype == 'B' {
            (lb.max(0.0), ub.min(1.0))
        } else {
            (lb, ub)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Row {
    /// `(column index, coefficient)`, one entry per column.
    pub(crate) terms: Vec<(usize, f64)>,
    pub(crate) sense: char,
    pub(crate) rhs: f64,
    pub(crate) name: String,
    pub(crate) cbasis: Option<i32>,
    pub(crate) dstart: f64,
}

impl Row {
    pub(crate) fn new(terms: Vec<(usize, f64)>, sense: char, rhs: f64, name: String) -> Self {
        Self {
            terms,
            sense,
            rhs,
            name,
            cbasis: None,
            dstart: UNDEFINED,
        }
    }

    pub(crate) fn bounds(&self) -> (f64, f64) {
        let rhs = highs_bound(self.rhs);
        match self.sense {
            '<' => (f64::NEG_INFINITY, rhs),
            '>' => (rhs, f64::INFINITY),
            _ => (rhs, rhs),
        }
    }

    pub(crate) fn activity(&self, x: &[f64]) -> f64 {
        self.terms
            .iter()
            .map(|&(col, coeff)| coeff * x.get(col).copied().unwrap_or_default())
            .sum()
    }
}

/// Which rows and finite bounds take part in a solve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Mask {
    pub(crate) rows: Vec<bool>,
    pub(crate) lb: Vec<bool>,
    pub(crate) ub: Vec<bool>,
}

impl Mask {
    pub(crate) fn full(num_cols: usize, num_rows: usize) -> Self {
        Self {
            rows: vec![true; num_rows],
            lb: vec![true; num_cols],
            ub: vec![true; num_cols],
        }
    }
}

/// Lower columns and rows to a HiGHS problem.
///
/// Without `objective` every cost is zero, which turns the solve into a
/// pure feasibility check. Masked-out bounds become infinite and
/// masked-out rows are omitted.
pub(crate) fn build(
    columns: &[Column],
    rows: &[Row],
    mask: Option<&Mask>,
    objective: bool,
) -> RowProblem {
    let mut problem = RowProblem::default();
    let mut cols: Vec<Col> = Vec::with_capacity(columns.len());
    for (index, column) in columns.iter().enumerate() {
        let (mut lb, mut ub) = column.effective_bounds();
        if let Some(mask) = mask {
            if !mask.lb.get(index).copied().unwrap_or(true) {
                lb = f64::NEG_INFINITY;
            }
            if !mask.ub.get(index).copied().unwrap_or(true) {
                ub = f64::INFINITY;
            }
        }
        let cost = if objective { column.obj } else { 0.0 };
        let col = if column.is_integral() {
            problem.add_integer_column(cost, lb..=ub)
        } else {
            problem.add_column(cost, lb..=ub)
        };
        cols.push(col);
    }
    for (index, row) in rows.iter().enumerate() {
        if let Some(mask) = mask {
            if !mask.rows.get(index).copied().unwrap_or(true) {
                continue;
            }
        }
        let (lb, ub) = row.bounds();
        let factors: Vec<(Col, f64)> = row
            .terms
            .iter()
            .filter_map(|&(col, coeff)| cols.get(col).map(|c| (*c, coeff)))
            .collect();
        problem.add_row(lb..=ub, factors);
    }
    problem
}

/// A start value inside the column bounds, as close to zero as possible.
pub(crate) fn default_primal_value(lower: f64, upper: f64) -> f64 {
    if lower.is_finite() && upper.is_finite() {
        if lower <= 0.0 && 0.0 <= upper {
            0.0
        } else if 0.0 < lower {
            lower
        } else {
            upper
        }
    } else if lower.is_finite() {
        if 0.0 < lower { lower } else { 0.0 }
    } else if upper.is_finite() {
        if 0.0 > upper { upper } else { 0.0 }
    } else {
        0.0
    }
}
