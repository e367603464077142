use super::{ijk, tensor};
use crate::expr::IndexExpr;
use crate::index_var::IndexVar;
use crate::schedule::{OperatorSplit, Schedule};

#[test]
fn test_split_is_recorded_on_node() {
    let (i, _, _) = ijk();
    let a = tensor("A", &[4]).access([&i]).unwrap();
    let b = tensor("B", &[4]).access([&i]).unwrap();
    let (i0, i1) = (IndexVar::named("i0"), IndexVar::named("i1"));

    let expr = &a + &b;
    expr.split_operator(i.clone(), i0.clone(), i1.clone());

    let splits = expr.operator_splits();
    assert_eq!(splits.len(), 1);
    assert_eq!(splits[0].expr_id(), expr.node().unwrap().id);
    assert_eq!(splits[0].old(), &i);
    assert_eq!(splits[0].left(), &i0);
    assert_eq!(splits[0].right(), &i1);

    // Clones alias the node, so the split is visible through them.
    assert_eq!(expr.clone().operator_splits().len(), 1);
}

#[test]
fn test_tensor_schedule_collects_nested_splits() {
    let (i, _, _) = ijk();
    let result = tensor("R", &[4]);
    let a = tensor("A", &[4]).access([&i]).unwrap();
    let b = tensor("B", &[4]).access([&i]).unwrap();
    let c = tensor("C", &[4]).access([&i]).unwrap();

    let inner = &b * &c;
    let outer = &a + &inner;
    let (l0, r0, l1, r1) = (IndexVar::new(), IndexVar::new(), IndexVar::new(), IndexVar::new());
    outer.split_operator(i.clone(), l0.clone(), r0.clone());
    inner.split_operator(i.clone(), l1.clone(), r1.clone());

    result.access([&i]).unwrap().assign(&outer).unwrap();

    let schedule = result.schedule();
    let lefts: Vec<_> = schedule.operator_splits().iter().map(|s| s.left().clone()).collect();
    assert_eq!(lefts, vec![l0, l1]);
}

#[test]
fn test_unbound_tensor_has_empty_schedule() {
    assert!(tensor("R", &[4]).schedule().is_empty());
}

#[test]
fn test_undefined_expression_has_no_splits() {
    assert!(IndexExpr::undefined().operator_splits().is_empty());
}

#[test]
#[should_panic(expected = "undefined expression")]
fn test_split_on_undefined_panics() {
    IndexExpr::undefined().split_operator(IndexVar::new(), IndexVar::new(), IndexVar::new());
}

#[test]
fn test_schedule_editing() {
    let (i, _, _) = ijk();
    let split = OperatorSplit::new(7, i.clone(), IndexVar::named("i0"), IndexVar::named("i1"));
    assert_eq!(split.to_string(), "split(i -> i0, i1) @ node 7");

    let mut schedule = Schedule::new();
    schedule.add_operator_split(split.clone());
    assert_eq!(schedule.operator_splits(), &[split]);
    schedule.clear_operator_splits();
    assert!(schedule.is_empty());
}
