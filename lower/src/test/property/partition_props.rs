use std::collections::{HashMap, HashSet};

use proptest::prelude::*;
use tacit_ir::test::property::generators::{Fixture, arb_expr_spec, arb_var_mask};
use tacit_ir::{Access, ExprKind, ExprRef, IndexExpr, IndexVar, get_accesses};

use crate::test::unit::{NamedIterators, PathGraph};
use crate::{get_available_expressions, get_sub_expr, lower_to_scalar_expression};

fn vars(fx: &Fixture, mask: &[bool]) -> Vec<IndexVar> {
    let set = fx.var_set(mask);
    fx.vars.iter().filter(|var| set.contains(*var)).cloned().collect()
}

fn is_available(access: &Access, visited: &HashSet<IndexVar>) -> bool {
    access.index_vars().iter().all(|var| visited.contains(var))
}

fn depends(access: &Access, selected: &HashSet<IndexVar>) -> bool {
    access.index_vars().iter().any(|var| selected.contains(var))
}

/// Accesses a sub-expression filtered by `selected` keeps: dependent accesses, and
/// every access under a unary node whose operand keeps something.
fn kept_accesses(node: &ExprRef, selected: &HashSet<IndexVar>) -> Option<Vec<Access>> {
    match node.kind() {
        ExprKind::Access(_) => {
            let access = Access::from_node(node.clone());
            depends(&access, selected).then(|| vec![access])
        }
        ExprKind::Unary(_, a) => kept_accesses(a, selected).map(|_| get_accesses(&IndexExpr::from(a))),
        ExprKind::Binary(_, a, b) => match (kept_accesses(a, selected), kept_accesses(b, selected)) {
            (Some(mut a), Some(b)) => {
                a.extend(b);
                Some(a)
            }
            (a, b) => a.or(b),
        },
        ExprKind::Immediate(_) => None,
    }
}

proptest! {
    #[test]
    fn available_expressions_only_use_visited_vars(spec in arb_expr_spec(), mask in arb_var_mask()) {
        let fx = Fixture::new();
        let expr = fx.build(&spec);
        let visited = fx.var_set(&mask);

        for available in get_available_expressions(&expr, &vars(&fx, &mask)) {
            for access in get_accesses(&available) {
                prop_assert!(is_available(&access, &visited), "{access} in {available}");
            }
        }
    }

    #[test]
    fn available_expressions_cover_each_available_access_once(spec in arb_expr_spec(), mask in arb_var_mask()) {
        let fx = Fixture::new();
        let expr = fx.build(&spec);
        let visited = fx.var_set(&mask);

        let mut covered: HashMap<Access, usize> = HashMap::new();
        for available in get_available_expressions(&expr, &vars(&fx, &mask)) {
            for access in get_accesses(&available) {
                *covered.entry(access).or_default() += 1;
            }
        }

        for access in get_accesses(&expr) {
            let expected = usize::from(is_available(&access, &visited));
            prop_assert_eq!(covered.get(&access).copied().unwrap_or(0), expected, "coverage of {}", access);
        }
    }

    #[test]
    fn everything_is_available_once_all_vars_are_visited(spec in arb_expr_spec()) {
        let fx = Fixture::new();
        let expr = fx.build(&spec);

        let available = get_available_expressions(&expr, &fx.vars);
        prop_assert_eq!(available.len(), 1);
        prop_assert!(available[0].ptr_eq(&expr));
    }

    #[test]
    fn sub_expr_keeps_the_dependent_parts(spec in arb_expr_spec(), mask in arb_var_mask()) {
        let fx = Fixture::new();
        let expr = fx.build(&spec);
        let selected = fx.var_set(&mask);

        let expected = expr.node().and_then(|node| kept_accesses(node, &selected)).unwrap_or_default();
        let sub = get_sub_expr(&expr, &vars(&fx, &mask));
        prop_assert_eq!(sub.defined(), !expected.is_empty());
        prop_assert_eq!(get_accesses(&sub), expected);

        for access in get_accesses(&expr) {
            if depends(&access, &selected) {
                prop_assert!(get_accesses(&sub).contains(&access), "{} dropped from {}", access, sub);
            }
        }
    }

    #[test]
    fn lowering_loads_every_access(spec in arb_expr_spec()) {
        let fx = Fixture::new();
        let expr = fx.build(&spec);

        let code = lower_to_scalar_expression(&expr, &NamedIterators, &PathGraph::new(&expr), &HashMap::new());
        prop_assert!(code.is_some());
        let loads = code.map(|code| code.to_string().matches(".values[").count()).unwrap_or_default();
        prop_assert_eq!(loads, get_accesses(&expr).len());
    }
}
