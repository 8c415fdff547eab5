use super::*;
use crate::types::{Bounds, VarType};
use deferlp_expr::ConstrSense;

fn name_of(model: &Model, id: VarId) -> Option<&str> {
    model.var(id).expect("declared").name()
}

#[test]
fn test_duplicate_var_names_get_serial_suffix() {
    let mut model = Model::new();
    let first = model.add_continuous_var(Bounds::default(), 0.0, Some("x")).unwrap();
    let second = model.add_continuous_var(Bounds::default(), 0.0, Some("x")).unwrap();
    let third = model.add_binary_var(0.0, Some("x")).unwrap();

    assert_eq!(name_of(&model, first), Some("x"));
    assert_eq!(name_of(&model, second), Some("x_s1"));
    assert_eq!(name_of(&model, third), Some("x_s2"));
}

#[test]
fn test_unnamed_vars_skip_the_policy() {
    let mut model = Model::new();
    let a = model.add_var(Bounds::default(), 0.0, VarType::Integer, None).unwrap();
    let b = model.add_var(Bounds::default(), 0.0, VarType::Integer, None).unwrap();
    assert_eq!(name_of(&model, a), None);
    assert_eq!(name_of(&model, b), None);
}

#[test]
fn test_prefix_applies_to_vars_only() {
    let mut model = Model::new().with_var_name_prefix("p_");
    let x = model.add_binary_var(0.0, Some("x")).unwrap();
    let x2 = model.add_binary_var(0.0, Some("x")).unwrap();
    let c = model
        .add_constr(LinExpr::var(x).less_equal(1.0), Some("cap"))
        .unwrap();

    assert_eq!(name_of(&model, x), Some("p_x"));
    assert_eq!(name_of(&model, x2), Some("p_x_s1"));
    assert_eq!(model.constr(c).unwrap().name(), Some("cap"));
}

#[test]
fn test_malformed_var_name_is_rejected_without_side_effects() {
    let mut model = Model::new();
    for bad in ["a b", "x-1", "", "q[0]"] {
        let err = model.add_binary_var(0.0, Some(bad)).unwrap_err();
        assert_eq!(err.code(), "NAME_INVALID", "{bad:?}");
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }
    assert_eq!(model.num_declared_vars(), 0);
    assert!(model.pending_vars().is_empty());

    let x = model.add_binary_var(0.0, Some("x")).unwrap();
    assert_eq!(name_of(&model, x), Some("x"));
}

#[test]
fn test_constraint_names_dedupe_when_non_empty() {
    let mut model = Model::new();
    let x = model.add_binary_var(0.0, Some("x")).unwrap();
    let first = model
        .add_constr(LinExpr::var(x).less_equal(1.0), Some("limit"))
        .unwrap();
    let second = model
        .add_constr(LinExpr::var(x).greater_equal(0.0), Some("limit"))
        .unwrap();
    let blank = model
        .add_constr(LinExpr::var(x).less_equal(1.0), Some(""))
        .unwrap();

    assert_eq!(model.constr(first).unwrap().name(), Some("limit"));
    assert_eq!(model.constr(second).unwrap().name(), Some("limit_s1"));
    assert_eq!(model.constr(blank).unwrap().name(), None);
    assert_eq!(model.constr(second).unwrap().sense(), ConstrSense::GreaterEqual);
}

#[test]
fn test_malformed_constraint_name_is_rejected() {
    let mut model = Model::new();
    let x = model.add_binary_var(0.0, Some("x")).unwrap();
    let err = model
        .add_constr(LinExpr::var(x).less_equal(1.0), Some("bad name"))
        .unwrap_err();
    assert_eq!(err, ModelError::InvalidName { name: "bad name".into() });
    assert!(model.pending_constrs().is_empty());
}

#[test]
fn test_vars_and_constraints_share_counters() {
    let mut model = Model::new();
    let x = model.add_binary_var(0.0, Some("x")).unwrap();
    let c = model
        .add_constr(LinExpr::var(x).less_equal(1.0), Some("x"))
        .unwrap();
    assert_eq!(model.constr(c).unwrap().name(), Some("x_s1"));
}

#[test]
fn test_renames_are_verbatim() {
    let mut model = Model::new();
    let x = model.add_binary_var(0.0, Some("x")).unwrap();
    let y = model.add_binary_var(0.0, Some("y")).unwrap();
    model.set_var_name(y, "x").unwrap();
    assert_eq!(name_of(&model, x), Some("x"));
    assert_eq!(name_of(&model, y), Some("x"));
}
