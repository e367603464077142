//! Expression constructors: immediates and arithmetic operators.
//!
//! Operators accept anything convertible into an [`IndexExpr`] (expressions,
//! accesses, Rust literals), so `&b * &c + 1.0` builds `Add(Mul(b, c), 1.0)`.
//! Building a node from an undefined operand is a caller bug and panics.

use std::ops;

use super::{Access, BinaryOp, Complex, ExprKind, ExprNode, ExprRef, Immediate, IndexExpr, UnaryOp};

impl IndexExpr {
    pub fn int(value: i64) -> Self {
        Self::immediate(Immediate::Int(value))
    }

    pub fn uint(value: u64) -> Self {
        Self::immediate(Immediate::UInt(value))
    }

    pub fn float(value: f64) -> Self {
        Self::immediate(Immediate::Float(value))
    }

    pub fn complex(re: f64, im: f64) -> Self {
        Self::immediate(Immediate::Complex(Complex::new(re, im)))
    }

    pub fn immediate(value: Immediate) -> Self {
        ExprNode::new(ExprKind::Immediate(value)).into()
    }

    /// Build a unary node.
    ///
    /// # Panics
    ///
    /// Panics if `a` is undefined.
    #[track_caller]
    pub fn unary(op: UnaryOp, a: impl Into<IndexExpr>) -> Self {
        ExprNode::unary(op, operand(a.into(), op.as_ref())).into()
    }

    /// Build a binary node.
    ///
    /// # Panics
    ///
    /// Panics if either operand is undefined.
    #[track_caller]
    pub fn binary(op: BinaryOp, a: impl Into<IndexExpr>, b: impl Into<IndexExpr>) -> Self {
        ExprNode::binary(op, operand(a.into(), op.as_ref()), operand(b.into(), op.as_ref())).into()
    }

    #[track_caller]
    pub fn sqrt(&self) -> Self {
        Self::unary(UnaryOp::Sqrt, self)
    }
}

#[track_caller]
fn operand(expr: IndexExpr, op: &str) -> ExprRef {
    match expr.into_node() {
        Some(node) => node,
        None => panic!("cannot build {op} from an undefined operand"),
    }
}

impl From<i64> for IndexExpr {
    fn from(value: i64) -> Self {
        Self::int(value)
    }
}

impl From<i32> for IndexExpr {
    fn from(value: i32) -> Self {
        Self::int(value.into())
    }
}

impl From<u64> for IndexExpr {
    fn from(value: u64) -> Self {
        Self::uint(value)
    }
}

impl From<f64> for IndexExpr {
    fn from(value: f64) -> Self {
        Self::float(value)
    }
}

impl From<Complex> for IndexExpr {
    fn from(value: Complex) -> Self {
        Self::immediate(Immediate::Complex(value))
    }
}

/// Implement the arithmetic operator traits for an expression-like type.
macro_rules! expr_ops {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl<R: Into<IndexExpr>> ops::Add<R> for $ty {
                type Output = IndexExpr;

                #[track_caller]
                fn add(self, rhs: R) -> IndexExpr {
                    IndexExpr::binary(BinaryOp::Add, self, rhs)
                }
            }

            impl<R: Into<IndexExpr>> ops::Sub<R> for $ty {
                type Output = IndexExpr;

                #[track_caller]
                fn sub(self, rhs: R) -> IndexExpr {
                    IndexExpr::binary(BinaryOp::Sub, self, rhs)
                }
            }

            impl<R: Into<IndexExpr>> ops::Mul<R> for $ty {
                type Output = IndexExpr;

                #[track_caller]
                fn mul(self, rhs: R) -> IndexExpr {
                    IndexExpr::binary(BinaryOp::Mul, self, rhs)
                }
            }

            impl<R: Into<IndexExpr>> ops::Div<R> for $ty {
                type Output = IndexExpr;

                #[track_caller]
                fn div(self, rhs: R) -> IndexExpr {
                    IndexExpr::binary(BinaryOp::Div, self, rhs)
                }
            }

            impl ops::Neg for $ty {
                type Output = IndexExpr;

                #[track_caller]
                fn neg(self) -> IndexExpr {
                    IndexExpr::unary(UnaryOp::Neg, self)
                }
            }
        )+
    };
}

expr_ops!(IndexExpr, &IndexExpr, Access, &Access);
