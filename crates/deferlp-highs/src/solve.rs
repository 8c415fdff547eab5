//! Running HiGHS on the stored columns and rows.

use crate::ffi;
use crate::params::ParamStore;
use crate::problem::{self, Column, INFINITE_BOUND, Mask, Row};
use crate::status::{
    Feasibility, classify_feasibility, highs_to_status, may_have_solution,
};
use deferlp_engine::{StatusCode, UNDEFINED};
use highs::Sense as HighsSense;
use std::time::Instant;
use tracing::{debug, trace, warn};

/// Primal and dual values of the latest solve.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Primal {
    pub(crate) x: Vec<f64>,
    pub(crate) obj_val: f64,
    /// Absent for MIPs.
    pub(crate) rc: Option<Vec<f64>>,
    pub(crate) pi: Option<Vec<f64>>,
}

/// Everything a solve reports.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Outcome {
    pub(crate) status: StatusCode,
    pub(crate) runtime: f64,
    pub(crate) iter_count: f64,
    pub(crate) bar_iter_count: i32,
    pub(crate) node_count: f64,
    pub(crate) mip_gap: Option<f64>,
    pub(crate) obj_bound: Option<f64>,
    pub(crate) primal: Option<Primal>,
}

impl Outcome {
    pub(crate) fn interrupted() -> Self {
        Self::without_solution(StatusCode::Interrupted, 0.0)
    }

    fn without_solution(status: StatusCode, runtime: f64) -> Self {
        Self {
            status,
            runtime,
            iter_count: 0.0,
            bar_iter_count: 0,
            node_count: 0.0,
            mip_gap: None,
            obj_bound: None,
            primal: None,
        }
    }
}

/// Map the parameter store onto HiGHS options.
fn apply_params(solver: &mut highs::Model, params: &ParamStore) {
    if params.int("OutputFlag") == 0 {
        solver.make_quiet();
    } else {
        solver.set_option("output_flag", true);
        solver.set_option("log_to_console", params.int("LogToConsole") != 0);
    }
    let time_limit = params.double("TimeLimit");
    if time_limit < INFINITE_BOUND {
        solver.set_option("time_limit", time_limit);
    }
    solver.set_option("mip_rel_gap", params.double("MIPGap"));
    let threads = params.int("Threads");
    if threads > 0 {
        solver.set_option("threads", threads);
    }
    let presolve = match params.int("Presolve") {
        0 => "off",
        1 | 2 => "on",
        _ => "choose",
    };
    solver.set_option("presolve", presolve);
    solver.set_option(
        "primal_feasibility_tolerance",
        params.double("FeasibilityTol"),
    );
    solver.set_option("dual_feasibility_tolerance", params.double("OptimalityTol"));
    solver.set_option("mip_feasibility_tolerance", params.double("IntFeasTol"));
    solver.set_option("random_seed", params.int("Seed"));
    let log_file = params.string("LogFile");
    if !log_file.is_empty() {
        solver.set_option("log_file", log_file);
    }
    if let Some(limit) = int_limit(params.double("IterationLimit")) {
        solver.set_option("simplex_iteration_limit", limit);
    }
    if let Some(limit) = int_limit(params.double("NodeLimit")) {
        solver.set_option("mip_max_nodes", limit);
    }
}

fn int_limit(value: f64) -> Option<i32> {
    (value < INFINITE_BOUND).then(|| value.min(f64::from(i32::MAX)) as i32)
}

/// Start values for every column, or `None` when no column has one.
fn start_values(columns: &[Column]) -> Option<Vec<f64>> {
    if columns.iter().all(|column| column.start >= UNDEFINED) {
        return None;
    }
    Some(
        columns
            .iter()
            .map(|column| {
                if column.start >= UNDEFINED {
                    let (lb, ub) = column.effective_bounds();
                    problem::default_primal_value(lb, ub)
                } else {
                    column.start
                }
            })
            .collect(),
    )
}

/// Evaluate a model with no columns directly: every row has zero activity.
fn solve_empty(rows: &[Row], obj_con: f64) -> Outcome {
    let feasible = rows.iter().all(|row| {
        let (lb, ub) = row.bounds();
        lb <= 0.0 && 0.0 <= ub
    });
    if !feasible {
        return Outcome::without_solution(StatusCode::Infeasible, 0.0);
    }
    let mut outcome = Outcome::without_solution(StatusCode::Optimal, 0.0);
    outcome.primal = Some(Primal {
        x: Vec::new(),
        obj_val: obj_con,
        rc: Some(Vec::new()),
        pi: Some(vec![0.0; rows.len()]),
    });
    outcome
}

/// Solve the full model. `sense` is `1` to minimize and `-1` to maximize.
pub(crate) fn run(
    columns: &[Column],
    rows: &[Row],
    sense: i32,
    obj_con: f64,
    params: &ParamStore,
) -> Outcome {
    if columns.is_empty() {
        return solve_empty(rows, obj_con);
    }
    let is_mip = columns.iter().any(Column::is_integral);
    let started = Instant::now();
    let highs_sense = if sense < 0 {
        HighsSense::Maximise
    } else {
        HighsSense::Minimise
    };

    let mut solver = problem::build(columns, rows, None, true).optimise(highs_sense);
    apply_params(&mut solver, params);
    if let Some(cols) = start_values(columns) {
        if let Err(err) = solver.try_set_solution(Some(cols.as_slice()), None, None, None) {
            warn!(
                component = "solver",
                operation = "set_start",
                status = "warn",
                ?err,
                "Failed to set start solution; continuing without it"
            );
        }
    }
    trace!(
        component = "solver",
        operation = "solve",
        status = "success",
        num_cols = columns.len(),
        num_rows = rows.len(),
        is_mip,
        "Handing model to HiGHS"
    );

    let solved = solver.solve();
    let runtime = started.elapsed().as_secs_f64();
    let status = highs_to_status(solved.status());
    let iter_count = ffi::int_info(&solved, "simplex_iteration_count").unwrap_or(0);
    let bar_iter_count = ffi::int_info(&solved, "ipm_iteration_count").unwrap_or(0);
    let node_count = if is_mip {
        ffi::int64_info(&solved, "mip_node_count").unwrap_or(0)
    } else {
        0
    };

    let primal = (may_have_solution(status) && ffi::has_primal_solution(&solved)).then(|| {
        let solution = solved.get_solution();
        let x = solution.columns().to_vec();
        let obj_val = obj_con
            + columns
                .iter()
                .zip(&x)
                .map(|(column, value)| column.obj * value)
                .sum::<f64>();
        let (rc, pi) = if is_mip {
            (None, None)
        } else {
            (
                Some(solution.dual_columns().to_vec()),
                Some(solution.dual_rows().to_vec()),
            )
        };
        Primal {
            x,
            obj_val,
            rc,
            pi,
        }
    });

    let outcome = Outcome {
        status,
        runtime,
        iter_count: iter_count as f64,
        bar_iter_count: i32::try_from(bar_iter_count).unwrap_or(i32::MAX),
        node_count: node_count as f64,
        mip_gap: is_mip.then(|| solved.mip_gap()),
        obj_bound: if is_mip {
            ffi::double_info(&solved, "mip_dual_bound").map(|bound| bound + obj_con)
        } else {
            None
        },
        primal,
    };
    debug!(
        component = "solver",
        operation = "solve",
        status = "success",
        solver = "highs",
        solver_status = outcome.status.name(),
        objective_value = outcome.primal.as_ref().map_or(f64::NAN, |p| p.obj_val),
        simplex_iterations = iter_count,
        barrier_iterations = bar_iter_count,
        node_count,
        duration_ms = runtime * 1000.0,
        "HiGHS solve completed"
    );
    outcome
}

/// Decide whether the masked subsystem is feasible.
pub(crate) fn check_feasible(
    columns: &[Column],
    rows: &[Row],
    mask: &Mask,
    params: &ParamStore,
) -> Feasibility {
    if columns.is_empty() {
        let feasible = rows.iter().zip(&mask.rows).all(|(row, active)| {
            let (lb, ub) = row.bounds();
            !*active || (lb <= 0.0 && 0.0 <= ub)
        });
        return if feasible {
            Feasibility::Feasible
        } else {
            Feasibility::Infeasible
        };
    }
    let mut solver = problem::build(columns, rows, Some(mask), false).optimise(HighsSense::Minimise);
    apply_params(&mut solver, params);
    solver.make_quiet();
    classify_feasibility(solver.solve().status())
}
