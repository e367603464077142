use tacit_ir::{IndexExpr, equals, get_accesses};

use super::{ijk, tensor};
use crate::available::get_available_expressions;
use crate::sub_expr::get_sub_expr;

#[test]
fn test_matrix_multiply_scenario() {
    let (i, j, k) = ijk();
    let b = tensor("B", &[3, 5]).access([&i, &k]).unwrap();
    let c = tensor("C", &[5, 4]).access([&k, &j]).unwrap();
    let expr = &b * &c;

    let sub = get_sub_expr(&expr, &[j.clone()]);
    assert!(sub.ptr_eq(&(&c).into()), "only C(k,j) depends on j");

    let sub = get_sub_expr(&expr, &[k]);
    assert!(sub.ptr_eq(&expr), "both operands depend on k");

    assert!(!get_sub_expr(&expr, &[]).defined());
}

#[test]
fn test_binary_keeps_both_filtered_operands() {
    let (i, j, _) = ijk();
    let a = tensor("A", &[4]).access([&i]).unwrap();
    let b = tensor("B", &[4]).access([&j]).unwrap();
    let c = tensor("C", &[4]).access([&j]).unwrap();

    // (A(i) + B(j)) * C(j) filtered by j drops A(i) and flattens the sum.
    let expr = (&a + &b) * &c;
    let sub = get_sub_expr(&expr, &[j]);
    assert!(equals(&sub, &(&b * &c)));
}

#[test]
fn test_unary_follows_operand() {
    let (i, j, _) = ijk();
    let a = tensor("A", &[4]).access([&i]).unwrap();
    let b = tensor("B", &[4]).access([&j]).unwrap();

    let negated = -&a;
    assert!(get_sub_expr(&negated, &[i.clone()]).ptr_eq(&negated));
    assert!(!get_sub_expr(&negated, &[j.clone()]).defined());

    // A kept unary node is returned whole, even when its operand only partly depends.
    let root = (&a + &b).sqrt();
    let sub = get_sub_expr(&root, &[j]);
    assert!(sub.ptr_eq(&root));
    assert_eq!(sub.to_string(), "sqrt(A(i) + B(j))");
}

#[test]
fn test_immediates_are_dropped() {
    let (i, _, _) = ijk();
    let a = tensor("A", &[4]).access([&i]).unwrap();

    assert!(!get_sub_expr(&IndexExpr::int(1), &[i.clone()]).defined());
    let sub = get_sub_expr(&(&a * 2.0), &[i]);
    assert!(sub.ptr_eq(&(&a).into()));
}

#[test]
fn test_scalar_access_never_depends() {
    let (i, _, _) = ijk();
    let s = tensor("s", &[]).access([]).unwrap();
    assert!(!get_sub_expr(&(&s).into(), &[i]).defined());
}

#[test]
fn test_undefined_input() {
    let (i, _, _) = ijk();
    assert!(!get_sub_expr(&IndexExpr::undefined(), &[i]).defined());
}

#[test]
fn test_dependent_child_is_not_available_for_the_complement() {
    let (i, j, k) = ijk();
    let b = tensor("B", &[4, 4]).access([&i, &k]).unwrap();
    let c = tensor("C", &[4]).access([&j]).unwrap();
    let d = tensor("D", &[4]).access([&i]).unwrap();

    // The dependent side itself contains a unary node.
    let dependent = -&b * &d;
    let expr = &dependent / &c;

    let sub = get_sub_expr(&expr, &[i.clone()]);
    assert!(sub.ptr_eq(&dependent), "got {sub}");

    let dependent_accesses = get_accesses(&dependent);
    for available in get_available_expressions(&expr, &[j.clone(), k.clone()]) {
        for access in get_accesses(&available) {
            assert!(!dependent_accesses.contains(&access), "{access} of {dependent} is available in {available}");
        }
    }
    assert_eq!(
        get_available_expressions(&expr, &[j, k]).iter().map(ToString::to_string).collect::<Vec<_>>(),
        ["C(j)"]
    );
}
