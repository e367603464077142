//! Infix printing of index expressions.
//!
//! Parentheses are emitted only where precedence requires them, except that a
//! right operand of equal precedence is always parenthesized so the printed form
//! keeps the tree shape (`a + (b + c)`).

use std::fmt;

use itertools::Itertools;

use super::{Access, BinaryOp, ExprKind, ExprNode, Immediate, IndexExpr, UnaryOp};

const PREC_ADD: u8 = 1;
const PREC_MUL: u8 = 2;
const PREC_NEG: u8 = 3;
const PREC_ATOM: u8 = 4;

fn precedence(node: &ExprNode) -> u8 {
    match &node.kind {
        ExprKind::Binary(BinaryOp::Add | BinaryOp::Sub, ..) => PREC_ADD,
        ExprKind::Binary(BinaryOp::Mul | BinaryOp::Div, ..) => PREC_MUL,
        ExprKind::Unary(UnaryOp::Neg, _) => PREC_NEG,
        ExprKind::Unary(UnaryOp::Sqrt, _) | ExprKind::Access(_) | ExprKind::Immediate(_) => PREC_ATOM,
    }
}

fn write_operand(f: &mut fmt::Formatter<'_>, node: &ExprNode, parenthesize: bool) -> fmt::Result {
    if parenthesize { write!(f, "({node})") } else { write!(f, "{node}") }
}

impl fmt::Display for Immediate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::UInt(v) => write!(f, "{v}u"),
            Self::Float(v) => write!(f, "{v:?}"),
            Self::Complex(c) if c.im.is_sign_negative() => write!(f, "({:?}-{:?}i)", c.re, -c.im),
            Self::Complex(c) => write!(f, "({:?}+{:?}i)", c.re, c.im),
        }
    }
}

impl fmt::Display for ExprNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Access(access) => {
                write!(f, "{}", access.tensor.name())?;
                if !access.index_vars.is_empty() {
                    write!(f, "({})", access.index_vars.iter().join(","))?;
                }
                Ok(())
            }
            ExprKind::Unary(UnaryOp::Neg, a) => {
                f.write_str("-")?;
                write_operand(f, a, precedence(a) < PREC_NEG)
            }
            ExprKind::Unary(UnaryOp::Sqrt, a) => write!(f, "sqrt({a})"),
            ExprKind::Binary(op, a, b) => {
                let prec = precedence(self);
                write_operand(f, a, precedence(a) < prec)?;
                write!(f, " {} ", op.symbol())?;
                write_operand(f, b, precedence(b) <= prec)
            }
            ExprKind::Immediate(imm) => write!(f, "{imm}"),
        }
    }
}

impl fmt::Display for IndexExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.node() {
            Some(node) => write!(f, "{node}"),
            None => f.write_str("undefined"),
        }
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.node())
    }
}
