use tacit_dtype::DType;
use tacit_ir::{Format, Immediate};

use crate::scalar::{ScalarExpr, ScalarVar, Stmt, TensorProperty};

fn var(name: &str) -> ScalarExpr {
    ScalarExpr::var(ScalarVar::new(name, DType::Int32))
}

#[test]
fn test_expression_display() {
    let tensor = ScalarVar::tensor("A", DType::Float64, Format::dense(2));
    let values = ScalarExpr::get_property(ScalarExpr::var(tensor), TensorProperty::Values);
    let load = ScalarExpr::load(values, var("A2_ptr"));
    assert_eq!(load.to_string(), "A.values[A2_ptr]");

    let sum = ScalarExpr::add(load.clone(), ScalarExpr::literal(Immediate::Float(1.0)));
    assert_eq!(sum.to_string(), "(A.values[A2_ptr] + 1.0)");
    assert_eq!(ScalarExpr::neg(ScalarExpr::sqrt(var("x"))).to_string(), "-sqrt(x)");
    assert_eq!(ScalarExpr::div(ScalarExpr::sub(var("a"), var("b")), var("c")).to_string(), "((a - b) / c)");
    assert_eq!(ScalarExpr::min([var("iB"), var("iC")]).to_string(), "min(iB, iC)");
}

#[test]
#[should_panic(expected = "min needs at least one operand")]
fn test_empty_min_panics() {
    ScalarExpr::min([]);
}

#[test]
fn test_var_properties() {
    let plain = ScalarVar::new("i", DType::Int32);
    assert!(!plain.is_tensor());
    assert_eq!(plain.format(), None);

    let tensor = ScalarVar::tensor("B", DType::Float32, Format::csr());
    assert!(tensor.is_tensor());
    assert_eq!(tensor.format(), Some(&Format::csr()));
    assert_eq!(tensor.dtype(), DType::Float32);

    assert_eq!(ScalarExpr::var(plain.clone()).as_var(), Some(&plain));
    assert_eq!(ScalarExpr::literal(Immediate::Int(0)).as_var(), None);
}

#[test]
fn test_statement_display() {
    let m = ScalarVar::new("m", DType::Int32);
    let min = ScalarExpr::min([var("iB"), var("iC")]);
    assert_eq!(Stmt::declare(m.clone(), min.clone()).to_string(), "int32_t m = min(iB, iC);");
    assert_eq!(Stmt::assign(m, min).to_string(), "m = min(iB, iC);");

    let print = Stmt::print("(i) = (%d)\\n", vec![var("i")]);
    assert_eq!(print.to_string(), r#"printf("(i) = (%d)\n", i);"#);
    assert_eq!(Stmt::print("done", vec![]).to_string(), r#"printf("done");"#);
}
