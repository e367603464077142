use super::{ijk, tensor};
use crate::equals::equals;
use crate::expr::IndexExpr;
use crate::index_var::IndexVar;

#[test]
fn test_undefined_equality() {
    let a = tensor("a", &[]).access([]).unwrap();

    assert!(equals(&IndexExpr::undefined(), &IndexExpr::undefined()));
    assert!(!equals(&a.clone().into(), &IndexExpr::undefined()));
    assert!(!equals(&IndexExpr::undefined(), &a.into()));
}

#[test]
fn test_access_equality_is_by_entity() {
    let (i, j, _) = ijk();
    let a = tensor("A", &[4, 4]);

    let first: IndexExpr = a.access([&i, &j]).unwrap().into();
    let second: IndexExpr = a.access([&i, &j]).unwrap().into();
    assert!(equals(&first, &second));
    assert!(!first.ptr_eq(&second));

    let transposed: IndexExpr = a.access([&j, &i]).unwrap().into();
    assert!(!equals(&first, &transposed));

    // Same name, different entity.
    let other = tensor("A", &[4, 4]);
    assert!(!equals(&first, &other.access([&i, &j]).unwrap().into()));

    // Same name, different variable.
    let i2 = IndexVar::named("i");
    assert!(!equals(&first, &a.access([&i2, &j]).unwrap().into()));
}

#[test]
fn test_binary_equality_is_order_sensitive() {
    let (i, _, _) = ijk();
    let a = tensor("A", &[4]).access([&i]).unwrap();
    let b = tensor("B", &[4]).access([&i]).unwrap();

    assert!(equals(&(&a + &b), &(&a + &b)));
    assert!(!equals(&(&a + &b), &(&b + &a)));
    assert!(equals(&(&a + &a), &(&a + &a)));
    assert!(!equals(&(&a + &b), &(&a * &b)));
    assert!(!equals(&(&a + &b), &(&a).into()));
}

#[test]
fn test_unary_equality() {
    let a = tensor("a", &[]).access([]).unwrap();
    let b = tensor("b", &[]).access([]).unwrap();

    assert!(equals(&-&a, &-&a));
    assert!(!equals(&-&a, &-&b));
    assert!(!equals(&-&a, &IndexExpr::from(&a).sqrt()));
}

#[test]
fn test_immediate_equality() {
    assert!(equals(&IndexExpr::int(1), &IndexExpr::int(1)));
    assert!(!equals(&IndexExpr::int(1), &IndexExpr::int(2)));
    assert!(!equals(&IndexExpr::int(1), &IndexExpr::uint(1)));
    assert!(!equals(&IndexExpr::int(1), &IndexExpr::float(1.0)));
    assert!(equals(&IndexExpr::float(f64::NAN), &IndexExpr::float(f64::NAN)));
    assert!(!equals(&IndexExpr::float(0.0), &IndexExpr::float(-0.0)));
    assert!(equals(&IndexExpr::complex(1.0, 2.0), &IndexExpr::complex(1.0, 2.0)));
    assert!(!equals(&IndexExpr::complex(1.0, 2.0), &IndexExpr::complex(2.0, 1.0)));
}
