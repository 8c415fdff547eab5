#![allow(clippy::float_cmp)]

use deferlp_core::{
    Bounds, EngineErrorKind, Env, ErrorKind, LinExpr, Model, ModelError, ObjSense, ParamValue,
    SolverConfig, VarId, VarType,
};
use deferlp_highs::HighsSession;
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

fn quiet_env() -> Env {
    let env = Env::from_session(HighsSession::new());
    env.set("OutputFlag", 0).expect("OutputFlag is an int parameter");
    env
}

fn scratch_path(file: &str) -> PathBuf {
    std::env::temp_dir().join(format!("deferlp-{}-{file}", std::process::id()))
}

/// maximize x + y subject to x + y <= 1, x and y binary
#[test]
fn test_pick_one_of_two_binaries() {
    let mut model = Model::with_env(quiet_env());
    let x = model.add_binary_var(1.0, Some("x")).unwrap();
    let y = model.add_binary_var(1.0, Some("y")).unwrap();
    model
        .add_constr((x + y).less_equal(1.0), Some("pick"))
        .unwrap();
    model
        .set_objective(x + y, Some(ObjSense::Maximize))
        .unwrap();

    model.optimize().unwrap();

    assert_eq!(model.status().unwrap(), Some("optimal"));
    assert!(model.status_optimal().unwrap());
    let xv = model.var_attrs(x).unwrap().x().unwrap().unwrap();
    let yv = model.var_attrs(y).unwrap().x().unwrap().unwrap();
    assert!((xv + yv - 1.0).abs() < 1e-6, "x = {xv}, y = {yv}");
    assert!(xv.round() == 1.0 || yv.round() == 1.0);
    let obj = model.attrs().unwrap().obj_val().unwrap().unwrap();
    assert!((obj - 1.0).abs() < 1e-6);
}

#[test]
fn test_unnamed_variable_takes_engine_name() {
    let mut model = Model::with_env(quiet_env());
    let n = model
        .add_integer_var(Bounds::new(0.0, 5.0), 0.0, None)
        .unwrap();
    assert_eq!(model.var(n).unwrap().name(), None);

    model.update().unwrap();

    assert_eq!(model.var(n).unwrap().name(), Some("C0"));
    assert!(model.var(n).unwrap().is_materialized());
    assert_eq!(model.attrs().unwrap().num_int_vars().unwrap(), Some(1));
}

/// minimize 2x + 3y subject to x + y >= 5, x, y >= 0
#[test]
fn test_lp_duals_and_slack() {
    let mut model = Model::with_env(quiet_env());
    let x = model
        .add_continuous_var(Bounds::non_negative(), 0.0, Some("x"))
        .unwrap();
    let y = model
        .add_continuous_var(Bounds::non_negative(), 0.0, Some("y"))
        .unwrap();
    let demand = model
        .add_constr((x + y).greater_equal(5.0), Some("demand"))
        .unwrap();
    model
        .set_objective(2.0 * x + 3.0 * y, Some(ObjSense::Minimize))
        .unwrap();

    model.optimize().unwrap();

    assert_eq!(model.status().unwrap(), Some("optimal"));
    let obj = model.attrs().unwrap().obj_val().unwrap().unwrap();
    assert!((obj - 10.0).abs() < 1e-6, "objective {obj}");
    let xv = model.var_attrs(x).unwrap().x().unwrap().unwrap();
    assert!((xv - 5.0).abs() < 1e-6);
    let pi = model.constr_attrs(demand).unwrap().pi().unwrap().unwrap();
    assert!((pi - 2.0).abs() < 1e-6, "dual {pi}");
    let slack = model.constr_attrs(demand).unwrap().slack().unwrap().unwrap();
    assert!(slack.abs() < 1e-6);
    assert_eq!(model.attrs().unwrap().is_mip().unwrap(), Some(false));
}

#[test]
fn test_objective_constant_is_reported() {
    let mut model = Model::with_env(quiet_env());
    let x = model
        .add_continuous_var(Bounds::new(1.0, 4.0), 0.0, Some("x"))
        .unwrap();
    model
        .set_objective(x + 7.0, Some(ObjSense::Maximize))
        .unwrap();

    model.optimize().unwrap();

    let obj = model.attrs().unwrap().obj_val().unwrap().unwrap();
    assert!((obj - 11.0).abs() < 1e-6, "objective {obj}");
}

#[test]
fn test_infeasible_model_yields_iis() {
    let mut model = Model::with_env(quiet_env());
    let x = model
        .add_continuous_var(Bounds::new(0.0, 10.0), 1.0, Some("x"))
        .unwrap();
    let y = model
        .add_continuous_var(Bounds::non_negative(), 1.0, Some("y"))
        .unwrap();
    let lo = model.add_constr(x.greater_equal(3.0), Some("lo")).unwrap();
    let hi = model.add_constr(x.less_equal(1.0), Some("hi")).unwrap();
    let cap = model
        .add_constr((x + y).less_equal(20.0), Some("cap"))
        .unwrap();

    model.optimize().unwrap();
    assert!(model.status_infeasible().unwrap() || model.status_inf_or_unbd().unwrap());
    let err = model.constr_in_iis(lo).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EngineFailure);

    model.compute_iis().unwrap();

    assert_eq!(model.constr_in_iis(lo).unwrap(), Some(true));
    assert_eq!(model.constr_in_iis(hi).unwrap(), Some(true));
    assert_eq!(model.constr_in_iis(cap).unwrap(), Some(false));
    assert_eq!(model.var_in_iis(y).unwrap(), Some(false));
    assert_eq!(model.attrs().unwrap().iis_minimal().unwrap(), Some(1));
}

#[test]
fn test_iis_on_feasible_model_fails() {
    let mut model = Model::with_env(quiet_env());
    let x = model
        .add_continuous_var(Bounds::new(0.0, 10.0), 1.0, Some("x"))
        .unwrap();
    model.add_constr(x.greater_equal(3.0), Some("lo")).unwrap();

    let err = model.compute_iis().unwrap_err();

    assert_eq!(err.kind(), ErrorKind::EngineFailure);
    match err {
        ModelError::Engine(inner) => assert_eq!(inner.kind(), EngineErrorKind::IisNotInfeasible),
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn test_reoptimize_after_adding_a_cut() {
    let mut model = Model::with_env(quiet_env());
    let x = model
        .add_continuous_var(Bounds::new(0.0, 10.0), 0.0, Some("x"))
        .unwrap();
    model.set_objective(x, Some(ObjSense::Maximize)).unwrap();
    model.optimize().unwrap();
    let first = model.attrs().unwrap().obj_val().unwrap().unwrap();
    assert!((first - 10.0).abs() < 1e-6);

    model.add_constr(x.less_equal(4.0), Some("cut")).unwrap();
    assert_eq!(model.pending_constrs().len(), 1);
    model.optimize().unwrap();

    assert!(model.pending_constrs().is_empty());
    let second = model.attrs().unwrap().obj_val().unwrap().unwrap();
    assert!((second - 4.0).abs() < 1e-6, "objective {second}");
    assert_eq!(model.attrs().unwrap().num_constrs().unwrap(), Some(1));
}

#[test]
fn test_start_value_round_trips_through_engine() {
    let mut model = Model::with_env(quiet_env());
    let n = model
        .add_var(Bounds::new(0.0, 9.0), -1.0, VarType::Integer, Some("n"))
        .unwrap();
    model.var_attrs(n).unwrap().set_start(3.0).unwrap();
    assert_eq!(model.var_attrs(n).unwrap().start().unwrap(), Some(3.0));

    model.update().unwrap();

    assert_eq!(model.var_attrs(n).unwrap().start().unwrap(), Some(3.0));
    model.optimize().unwrap();
    assert_eq!(model.var_attrs(n).unwrap().x().unwrap().map(f64::round), Some(9.0));
}

#[test]
fn test_write_lp_file() {
    let mut model = Model::with_env(quiet_env());
    let x = model.add_binary_var(2.0, Some("x")).unwrap();
    let y = model
        .add_continuous_var(Bounds::new(0.0, 3.0), 1.0, Some("y"))
        .unwrap();
    model
        .add_constr((x + y).less_equal(2.0), Some("room"))
        .unwrap();
    let path = scratch_path("model.lp");

    model.write(&path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let _ = std::fs::remove_file(&path);
    assert!(text.contains("Minimize"));
    assert!(text.contains(" room: x + y <= 2"));
    assert!(text.contains("Binaries\n x\n"));
    assert!(model.pending_vars().is_empty());
}

#[test]
fn test_unknown_file_extension_is_rejected() {
    let mut model = Model::with_env(quiet_env());
    model.add_binary_var(1.0, Some("x")).unwrap();

    let err = model.write(scratch_path("model.xyz")).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::EngineFailure);
}

#[test]
fn test_params_written_and_read_back() {
    let env = quiet_env();
    SolverConfig::new()
        .with_time_limit(30.0)
        .with_mip_gap(0.05)
        .with_verbosity(0)
        .apply(&env)
        .unwrap();
    assert_eq!(env.get("TimeLimit").unwrap(), ParamValue::Double(30.0));
    assert_eq!(env.get("OutputFlag").unwrap(), ParamValue::Int(0));
    let path = scratch_path("settings.prm");

    env.write_params(&path).unwrap();
    env.reset_params().unwrap();
    assert_eq!(env.get("OutputFlag").unwrap(), ParamValue::Int(1));
    env.read_params(&path).unwrap();
    let _ = std::fs::remove_file(&path);

    assert_eq!(env.get("TimeLimit").unwrap(), ParamValue::Double(30.0));
    assert_eq!(env.get("MIPGap").unwrap(), ParamValue::Double(0.05));
    assert_eq!(env.get("OutputFlag").unwrap(), ParamValue::Int(0));
}

#[test]
fn test_cancel_without_running_call_is_ignored() {
    let mut model = Model::with_env(quiet_env());
    let x = model.add_binary_var(1.0, Some("x")).unwrap();
    model.set_objective(x, Some(ObjSense::Maximize)).unwrap();
    let token = model.cancel_token();

    assert!(!token.cancel());
    model.optimize().unwrap();

    assert_eq!(model.status().unwrap(), Some("optimal"));
    assert!(!token.is_armed());
}

#[test]
fn test_semi_continuous_is_rejected_by_highs() {
    let mut model = Model::with_env(quiet_env());
    model
        .add_var(
            Bounds::new(0.0, 5.0),
            1.0,
            VarType::SemiContinuous,
            Some("s"),
        )
        .unwrap();

    let err = model.optimize().unwrap_err();

    match err {
        ModelError::Engine(inner) => assert_eq!(inner.kind(), EngineErrorKind::NotSupported),
        other => panic!("unexpected error {other:?}"),
    }
}

/// Market split: each row of pseudo-random weights must sum to half its
/// total over the chosen binaries. Hard for branch and bound.
fn market_split(model: &mut Model, rows: usize, cols: usize) {
    let mut seed: u64 = 7;
    let mut weight = move || {
        seed = seed
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        ((seed >> 33) % 100) as f64
    };
    let vars: Vec<VarId> = (0..cols)
        .map(|j| model.add_binary_var(0.0, Some(&format!("x{j}"))).unwrap())
        .collect();
    for i in 0..rows {
        let weights: Vec<f64> = (0..cols).map(|_| weight()).collect();
        let half = (weights.iter().sum::<f64>() / 2.0).floor();
        let lhs: LinExpr = vars.iter().zip(&weights).map(|(v, w)| *w * *v).sum();
        model
            .add_constr(lhs.equal(half), Some(&format!("split{i}")))
            .unwrap();
    }
}

#[test]
fn test_cancel_reaches_a_running_solve() {
    let env = quiet_env();
    env.set("TimeLimit", 2.0).unwrap();
    let mut model = Model::with_env(env);
    market_split(&mut model, 4, 40);
    let token = model.cancel_token();

    let canceller = thread::spawn({
        let token = token.clone();
        move || {
            let deadline = Instant::now() + Duration::from_secs(10);
            while !token.is_armed() && Instant::now() < deadline {
                thread::sleep(Duration::from_millis(1));
            }
            thread::sleep(Duration::from_millis(200));
            token.cancel()
        }
    });
    model.optimize().unwrap();
    let delivered = canceller.join().unwrap();

    assert!(delivered, "solve finished before the cancel arrived");
    assert_eq!(model.status().unwrap(), Some("interrupted"));
    assert!(model.status_interrupted().unwrap());
    assert!(!token.is_armed());

    model.optimize().unwrap();
    assert_ne!(model.status().unwrap(), Some("interrupted"));
}

#[test]
fn test_model_param_overrides_session_copy() {
    let env = Env::from_session(HighsSession::new());
    let mut model = Model::with_env(env.clone());
    let x = model
        .add_continuous_var(Bounds::new(0.0, 3.0), 1.0, Some("x"))
        .unwrap();
    model.set_objective(x, Some(ObjSense::Maximize)).unwrap();

    model.set_param("OutputFlag", 0).unwrap();
    model.optimize().unwrap();

    assert_eq!(model.status().unwrap(), Some("optimal"));
    assert_eq!(env.get("OutputFlag").unwrap(), ParamValue::Int(1));
    let err = model.set_param("Presolve", 7).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EngineFailure);
}
