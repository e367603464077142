//! Scalar instruction trees produced by lowering.
//!
//! This is the narrow surface of the scalar IR the partitioning and lowering passes
//! build against: variables, literals, storage loads, arithmetic, `min`, variable
//! assignment and printing. `Display` renders C-like text for diagnostics.

use std::fmt;

use itertools::Itertools;
use tacit_dtype::DType;
use tacit_ir::{Format, Immediate};

/// Named scalar-IR variable. Tensor variables also carry their storage format.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarVar {
    name: String,
    dtype: DType,
    format: Option<Format>,
}

impl ScalarVar {
    pub fn new(name: impl Into<String>, dtype: DType) -> Self {
        Self { name: name.into(), dtype, format: None }
    }

    /// Variable standing for a whole tensor (its storage arrays and properties).
    pub fn tensor(name: impl Into<String>, dtype: DType, format: Format) -> Self {
        Self { name: name.into(), dtype, format: Some(format) }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dtype(&self) -> DType {
        self.dtype
    }

    pub fn format(&self) -> Option<&Format> {
        self.format.as_ref()
    }

    pub fn is_tensor(&self) -> bool {
        self.format.is_some()
    }
}

impl fmt::Display for ScalarVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Storage array of a tensor variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum TensorProperty {
    /// Array of stored component values.
    Values,
}

/// Scalar expression.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarExpr {
    Literal(Immediate),
    Var(ScalarVar),
    GetProperty { tensor: Box<ScalarExpr>, property: TensorProperty },
    Load { array: Box<ScalarExpr>, index: Box<ScalarExpr> },
    Neg(Box<ScalarExpr>),
    Sqrt(Box<ScalarExpr>),
    Add(Box<ScalarExpr>, Box<ScalarExpr>),
    Sub(Box<ScalarExpr>, Box<ScalarExpr>),
    Mul(Box<ScalarExpr>, Box<ScalarExpr>),
    Div(Box<ScalarExpr>, Box<ScalarExpr>),
    Min(Vec<ScalarExpr>),
}

impl ScalarExpr {
    pub fn literal(value: Immediate) -> Self {
        Self::Literal(value)
    }

    pub fn var(var: ScalarVar) -> Self {
        Self::Var(var)
    }

    pub fn get_property(tensor: ScalarExpr, property: TensorProperty) -> Self {
        Self::GetProperty { tensor: Box::new(tensor), property }
    }

    pub fn load(array: ScalarExpr, index: ScalarExpr) -> Self {
        Self::Load { array: Box::new(array), index: Box::new(index) }
    }

    pub fn neg(a: ScalarExpr) -> Self {
        Self::Neg(Box::new(a))
    }

    pub fn sqrt(a: ScalarExpr) -> Self {
        Self::Sqrt(Box::new(a))
    }

    pub fn add(a: ScalarExpr, b: ScalarExpr) -> Self {
        Self::Add(Box::new(a), Box::new(b))
    }

    pub fn sub(a: ScalarExpr, b: ScalarExpr) -> Self {
        Self::Sub(Box::new(a), Box::new(b))
    }

    pub fn mul(a: ScalarExpr, b: ScalarExpr) -> Self {
        Self::Mul(Box::new(a), Box::new(b))
    }

    pub fn div(a: ScalarExpr, b: ScalarExpr) -> Self {
        Self::Div(Box::new(a), Box::new(b))
    }

    /// Minimum of all `operands`.
    ///
    /// # Panics
    ///
    /// Panics if `operands` is empty.
    #[track_caller]
    pub fn min(operands: impl IntoIterator<Item = ScalarExpr>) -> Self {
        let operands: Vec<_> = operands.into_iter().collect();
        assert!(!operands.is_empty(), "min needs at least one operand");
        Self::Min(operands)
    }

    /// The variable, if this expression is a plain variable reference.
    pub fn as_var(&self) -> Option<&ScalarVar> {
        match self {
            Self::Var(var) => Some(var),
            _ => None,
        }
    }
}

impl fmt::Display for ScalarExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => write!(f, "{value}"),
            Self::Var(var) => write!(f, "{var}"),
            Self::GetProperty { tensor, property } => write!(f, "{tensor}.{property}"),
            Self::Load { array, index } => write!(f, "{array}[{index}]"),
            Self::Neg(a) => write!(f, "-{a}"),
            Self::Sqrt(a) => write!(f, "sqrt({a})"),
            Self::Add(a, b) => write!(f, "({a} + {b})"),
            Self::Sub(a, b) => write!(f, "({a} - {b})"),
            Self::Mul(a, b) => write!(f, "({a} * {b})"),
            Self::Div(a, b) => write!(f, "({a} / {b})"),
            Self::Min(operands) => write!(f, "min({})", operands.iter().join(", ")),
        }
    }
}

/// Scalar statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// `var = value`, declaring `var` first when `declare` is set.
    VarAssign { var: ScalarVar, value: ScalarExpr, declare: bool },
    /// `printf`-style print of `args` with a C format string.
    Print { format: String, args: Vec<ScalarExpr> },
}

impl Stmt {
    pub fn assign(var: ScalarVar, value: ScalarExpr) -> Self {
        Self::VarAssign { var, value, declare: false }
    }

    pub fn declare(var: ScalarVar, value: ScalarExpr) -> Self {
        Self::VarAssign { var, value, declare: true }
    }

    pub fn print(format: impl Into<String>, args: Vec<ScalarExpr>) -> Self {
        Self::Print { format: format.into(), args }
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VarAssign { var, value, declare: true } => {
                write!(f, "{} {var} = {value};", var.dtype().c_style())
            }
            Self::VarAssign { var, value, declare: false } => write!(f, "{var} = {value};"),
            Self::Print { format, args } if args.is_empty() => write!(f, "printf(\"{format}\");"),
            Self::Print { format, args } => write!(f, "printf(\"{format}\", {});", args.iter().join(", ")),
        }
    }
}
