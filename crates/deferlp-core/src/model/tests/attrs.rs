use super::support::recording_env;
use super::*;
use crate::types::Bounds;
use deferlp_engine::{AttrValue, EngineErrorKind};

#[test]
fn test_pending_start_round_trips_through_materialization() {
    let (env, recorder) = recording_env();
    let mut model = Model::with_env(env);
    let x = model.add_continuous_var(Bounds::new(0.0, 10.0), 1.0, Some("x")).unwrap();

    model.var_attrs(x).unwrap().set_start(2.5).unwrap();
    assert_eq!(model.var_attrs(x).unwrap().start(), Ok(Some(2.5)));
    assert_eq!(recorder.count("set_var_attr Start"), 0);

    model.update().unwrap();
    assert_eq!(recorder.count("set_var_attr Start"), 1);
    assert_eq!(model.var_attrs(x).unwrap().start(), Ok(Some(2.5)));
}

#[test]
fn test_read_only_attribute_is_absent_before_materialization() {
    let mut model = Model::new();
    let x = model.add_binary_var(0.0, Some("x")).unwrap();
    let attrs = model.var_attrs(x).unwrap();
    assert_eq!(attrs.x(), Ok(None));
    assert_eq!(attrs.start(), Ok(None));
    assert_eq!(attrs.iis_lb(), Ok(None));
}

#[test]
fn test_bound_reads_go_live() {
    let (env, _) = recording_env();
    let mut model = Model::with_env(env);
    let x = model.add_continuous_var(Bounds::new(1.0, 3.0), 0.0, Some("x")).unwrap();
    model.update().unwrap();

    let err = model.var_attrs(x).unwrap().x().unwrap_err();
    match err {
        ModelError::Engine(inner) => assert_eq!(inner.kind(), EngineErrorKind::DataNotAvailable),
        other => panic!("unexpected {other:?}"),
    }

    model.optimize().unwrap();
    assert_eq!(model.var_attrs(x).unwrap().x(), Ok(Some(1.0)));
}

#[test]
fn test_bound_writes_push_immediately() {
    let (env, recorder) = recording_env();
    let mut model = Model::with_env(env);
    let x = model.add_binary_var(0.0, Some("x")).unwrap();
    model.update().unwrap();

    let mut attrs = model.var_attrs(x).unwrap();
    attrs.set_branch_priority(3).unwrap();
    attrs.set("v_basis", AttrValue::Double(-1.0)).unwrap();
    assert_eq!(attrs.branch_priority(), Ok(Some(3)));
    assert_eq!(attrs.v_basis(), Ok(Some(-1)));
    assert_eq!(recorder.count("set_var_attr BranchPriority"), 1);
    assert_eq!(recorder.count("set_var_attr VBasis"), 1);
}

#[test]
fn test_constraint_attributes_follow_the_same_policy() {
    let (env, recorder) = recording_env();
    let mut model = Model::with_env(env);
    let x = model.add_binary_var(0.0, Some("x")).unwrap();
    let c = model.add_constr(x.less_equal(1.0), Some("c")).unwrap();

    let mut attrs = model.constr_attrs(c).unwrap();
    attrs.set_d_start(0.5).unwrap();
    attrs.set_c_basis(0).unwrap();
    assert_eq!(attrs.d_start(), Ok(Some(0.5)));
    assert_eq!(attrs.pi(), Ok(None));

    model.update().unwrap();
    assert_eq!(recorder.count("set_constr_attr DStart"), 1);
    assert_eq!(recorder.count("set_constr_attr CBasis"), 1);
    assert_eq!(model.constr_attrs(c).unwrap().c_basis(), Ok(Some(0)));

    model.set_constr_sense(c, deferlp_expr::ConstrSense::GreaterEqual).unwrap();
    assert_eq!(recorder.count("set_constr_attr Sense"), 1);
}

#[test]
fn test_model_attributes_need_a_session() {
    let mut model = Model::new();
    assert_eq!(model.attrs().err(), Some(ModelError::SessionMissing));
}

#[test]
fn test_model_attributes_read_live() {
    let (env, _) = recording_env();
    let mut model = Model::with_env(env);
    let x = model.add_binary_var(0.0, Some("x")).unwrap();
    model.add_continuous_var(Bounds::default(), 0.0, Some("y")).unwrap();
    model.set_objective(LinExpr::var(x) + 4.0, None).unwrap();
    model.update().unwrap();

    let mut attrs = model.attrs().unwrap();
    assert_eq!(attrs.num_vars(), Ok(Some(2)));
    assert_eq!(attrs.num_constrs(), Ok(Some(0)));
    assert_eq!(attrs.is_mip(), Ok(Some(true)));
    assert_eq!(attrs.obj_con(), Ok(Some(4.0)));

    attrs.set_model_name("diet".to_string()).unwrap();
    assert_eq!(attrs.model_name(), Ok(Some("diet".to_string())));

    let err = attrs.set("num_vars", AttrValue::Int(3)).unwrap_err();
    assert_eq!(err.code(), "ATTRIBUTE_NOT_SETTABLE");
}

#[test]
fn test_model_attributes_create_the_engine_lazily() {
    let (env, recorder) = recording_env();
    let mut model = Model::with_env(env);
    assert!(!model.is_materialized());
    let attrs = model.attrs().unwrap();
    assert_eq!(attrs.num_vars(), Ok(Some(0)));
    assert_eq!(recorder.calls(), vec!["new_model", "set_model_attr ModelSense"]);
}

#[test]
fn test_iis_membership() {
    let (env, _) = recording_env();
    let mut model = Model::with_env(env);
    let x = model.add_binary_var(0.0, Some("x")).unwrap();
    let c = model.add_constr(x.greater_equal(2.0), Some("c")).unwrap();
    assert_eq!(model.var_in_iis(x), Ok(None));
    assert_eq!(model.constr_in_iis(c), Ok(None));

    model.compute_iis().unwrap();
    assert_eq!(model.var_in_iis(x), Ok(Some(false)));
    assert_eq!(model.constr_in_iis(c), Ok(Some(true)));
    assert_eq!(model.attrs().unwrap().iis_minimal(), Ok(Some(1)));
}
