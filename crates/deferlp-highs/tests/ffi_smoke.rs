#![allow(clippy::float_cmp)]

use deferlp_engine::{
    AttrValue, EngineModel, NativeLinExpr, NativeRhs, ParamValue, Session, StatusCode, attrs,
    params,
};
use deferlp_highs::{HighsSession, highs_version};

#[test]
fn test_version_is_reported() {
    let version = highs_version().expect("HiGHS reports a version");
    assert!(!version.is_empty());
    assert!(version.contains('.'), "unexpected version {version}");
}

#[test]
fn test_minimize_single_column() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();

    let session = HighsSession::new();
    let flag = params::resolve("OutputFlag").expect("known parameter");
    session.set_param(flag, ParamValue::Int(0)).unwrap();
    let mut model = session.new_model("smoke").unwrap();

    // minimize x subject to x >= 1
    let x = model.add_var(0.0, 1e100, 1.0, 'C', Some("x")).unwrap();
    let mut lhs = NativeLinExpr::new();
    lhs.add_term(1.0, x);
    model
        .add_constr(
            &lhs,
            '>',
            &NativeRhs::Const(1.0),
            Some("floor"),
        )
        .unwrap();
    model.optimize().unwrap();

    let status = model
        .get_model_attr(attrs::resolve("Status").unwrap())
        .unwrap();
    assert_eq!(status, AttrValue::Int(StatusCode::Optimal.code()));
    let value = model
        .get_var_attr(x, attrs::resolve("X").unwrap())
        .unwrap()
        .as_f64()
        .unwrap();
    assert!((value - 1.0).abs() < 1e-6, "x = {value}");

    session.dispose();
    assert!(session.new_model("late").is_err());
}
