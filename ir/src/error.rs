use snafu::Snafu;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// User-facing failures when building or binding index expressions.
///
/// Internal-consistency violations are not represented here; they panic.
#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    /// The tensor already has a bound index expression.
    #[snafu(display("cannot reassign {tensor}: an index expression is already bound to it"))]
    Reassignment { tensor: String },

    /// Binding an undefined expression.
    #[snafu(display("cannot bind an undefined index expression to {tensor}"))]
    UndefinedExpression { tensor: String },

    /// The expression reads the tensor it is bound to, directly or through
    /// another tensor's bound expression.
    #[snafu(display("cannot bind an index expression that reads {tensor} to {tensor}"))]
    SelfReference { tensor: String },

    /// Index variables index modes of different sizes.
    #[snafu(display("dimension size mismatch in assignment to {tensor}: {details}"))]
    DimensionMismatch { tensor: String, details: String },

    /// The computation iterates some tensor against its storage order.
    #[snafu(display("computations with transpositions are not supported (assignment to {tensor})"))]
    Transposition { tensor: String },

    /// Free variables missing from the right hand side.
    #[snafu(display(
        "free variables of {tensor} that do not appear on the right hand side are not supported: {vars}"
    ))]
    Distribution { tensor: String, vars: String },

    /// Number of index variables differs from the tensor order.
    #[snafu(display(
        "a tensor of order {order} must be indexed with {order} variables, but {tensor} is indexed with {got}: ({vars})"
    ))]
    OrderMismatch { tensor: String, order: usize, got: usize, vars: String },
}
