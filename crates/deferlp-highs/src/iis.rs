//! Irreducible inconsistent subsystems by deletion filtering.
//!
//! Starting from the full (infeasible) model, each row and then each finite
//! bound is dropped in turn. If the rest stays infeasible the element is
//! left out for good, otherwise it is restored. What survives is an IIS.

use crate::params::ParamStore;
use crate::problem::{Column, Mask, Row};
use crate::solve;
use crate::status::Feasibility;
use deferlp_engine::EngineError;
use tracing::{debug, trace};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Iis {
    pub(crate) rows: Vec<bool>,
    pub(crate) lb: Vec<bool>,
    pub(crate) ub: Vec<bool>,
    /// False when the search stopped early.
    pub(crate) minimal: bool,
}

#[derive(Debug, Clone, Copy)]
enum Element {
    Row(usize),
    Lower(usize),
    Upper(usize),
}

impl Element {
    fn slot<'a>(&self, mask: &'a mut Mask) -> Option<&'a mut bool> {
        match *self {
            Element::Row(i) => mask.rows.get_mut(i),
            Element::Lower(i) => mask.lb.get_mut(i),
            Element::Upper(i) => mask.ub.get_mut(i),
        }
    }
}

/// Run the deletion filter. `stop` is polled before every feasibility check.
pub(crate) fn deletion_filter(
    columns: &[Column],
    rows: &[Row],
    params: &ParamStore,
    mut stop: impl FnMut() -> bool,
) -> Result<Iis, EngineError> {
    let mut mask = Mask::full(columns.len(), rows.len());
    for (index, column) in columns.iter().enumerate() {
        let (lb, ub) = column.effective_bounds();
        mask.lb[index] = lb.is_finite();
        mask.ub[index] = ub.is_finite();
    }

    match solve::check_feasible(columns, rows, &mask, params) {
        Feasibility::Infeasible => {}
        Feasibility::Feasible => {
            return Err(EngineError::new(
                EngineError::IIS_NOT_INFEASIBLE,
                "cannot compute IIS on a feasible model",
            ));
        }
        Feasibility::Undecided => {
            return Err(EngineError::new(
                EngineError::NUMERIC,
                "could not decide feasibility of the full model",
            ));
        }
    }

    let candidates: Vec<Element> = (0..rows.len())
        .map(Element::Row)
        .chain((0..columns.len()).filter(|&i| mask.lb[i]).map(Element::Lower))
        .chain((0..columns.len()).filter(|&i| mask.ub[i]).map(Element::Upper))
        .collect();

    let mut minimal = true;
    let mut checks = 0usize;
    for element in &candidates {
        if stop() {
            minimal = false;
            debug!(
                component = "iis",
                operation = "deletion_filter",
                status = "warn",
                checks,
                "IIS search stopped early"
            );
            break;
        }
        if let Some(slot) = element.slot(&mut mask) {
            *slot = false;
        }
        checks += 1;
        let verdict = solve::check_feasible(columns, rows, &mask, params);
        let keep_out = verdict == Feasibility::Infeasible;
        if !keep_out {
            if let Some(slot) = element.slot(&mut mask) {
                *slot = true;
            }
        }
        trace!(
            component = "iis",
            operation = "iis_check",
            status = "success",
            element = ?element,
            dropped = keep_out,
            "Checked IIS candidate"
        );
    }

    let iis = Iis {
        rows: mask.rows,
        lb: mask.lb,
        ub: mask.ub,
        minimal,
    };
    debug!(
        component = "iis",
        operation = "deletion_filter",
        status = "success",
        checks,
        rows = iis.rows.iter().filter(|in_iis| **in_iis).count(),
        bounds = iis.lb.iter().chain(&iis.ub).filter(|in_iis| **in_iis).count(),
        minimal,
        "Computed IIS"
    );
    Ok(iis)
}
