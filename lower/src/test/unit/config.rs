use tacit_ir::IndexExpr;
use test_case::test_case;

use super::{ijk, tensor};
use crate::config::{AvailableExprConfig, is_trivial_expr};

#[test]
fn test_builder_defaults_match_default() {
    let built = AvailableExprConfig::builder().build();
    let default = AvailableExprConfig::default();
    assert!(!built.elide_trivial);
    assert_eq!(built.elide_trivial, default.elide_trivial);
}

#[test]
fn test_builder_enables_elision() {
    let config = AvailableExprConfig::builder().elide_trivial(true).build();
    assert!(config.elide_trivial);
    assert!(config.elides(&IndexExpr::int(1)));
}

#[test]
fn test_default_elides_nothing() {
    let config = AvailableExprConfig::default();
    assert!(!config.elides(&IndexExpr::int(1)));
    assert!(!config.elides(&IndexExpr::undefined()));
}

#[test]
fn test_with_predicate_turns_elision_on() {
    fn always(_: &IndexExpr) -> bool {
        true
    }

    let (i, _, _) = ijk();
    let v = tensor("v", &[4]).access([&i]).unwrap();
    let config = AvailableExprConfig::default().with_predicate(always);
    assert!(config.elide_trivial);
    assert!(config.elides(&(&v).into()));
}

#[test_case(IndexExpr::int(3), true ; "integer literal")]
#[test_case(IndexExpr::float(0.5), true ; "float literal")]
#[test_case(IndexExpr::int(1) + 2, false ; "literal arithmetic")]
#[test_case(-IndexExpr::int(1), false ; "negated literal")]
#[test_case(IndexExpr::undefined(), false ; "undefined")]
fn test_is_trivial_literal(expr: IndexExpr, expected: bool) {
    assert_eq!(is_trivial_expr(&expr), expected);
}

#[test]
fn test_is_trivial_access() {
    let (i, _, _) = ijk();
    let s = tensor("s", &[]).access([]).unwrap();
    let v = tensor("v", &[4]).access([&i]).unwrap();
    assert!(is_trivial_expr(&(&s).into()));
    assert!(!is_trivial_expr(&(&v).into()));
}
