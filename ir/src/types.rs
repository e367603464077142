//! Tensor type, shape and storage format descriptions.
//!
//! These are the narrow type/shape utilities the expression core consumes: tensor
//! order, per-mode dimension, component data type, and the storage mode ordering
//! used when checking for transpositions.

use itertools::Itertools;
use smallvec::SmallVec;
use tacit_dtype::DType;

/// Size of one tensor mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    /// Size only known at run time.
    Variable,
    /// Size fixed at compile time.
    Fixed(usize),
}

impl Dimension {
    pub const fn is_variable(&self) -> bool {
        matches!(self, Self::Variable)
    }

    pub const fn size(&self) -> Option<usize> {
        match self {
            Self::Variable => None,
            Self::Fixed(size) => Some(*size),
        }
    }
}

impl From<usize> for Dimension {
    fn from(size: usize) -> Self {
        Self::Fixed(size)
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Variable => f.write_str("?"),
            Self::Fixed(size) => write!(f, "{size}"),
        }
    }
}

/// Ordered list of mode dimensions. The order of a tensor is its shape length.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Shape {
    dims: SmallVec<[Dimension; 4]>,
}

impl Shape {
    pub fn new(dims: impl IntoIterator<Item = Dimension>) -> Self {
        Self { dims: dims.into_iter().collect() }
    }

    /// Shape with every mode fixed to the given size.
    pub fn fixed(sizes: &[usize]) -> Self {
        Self::new(sizes.iter().copied().map(Dimension::Fixed))
    }

    /// Zero-order shape.
    pub fn scalar() -> Self {
        Self::default()
    }

    pub fn order(&self) -> usize {
        self.dims.len()
    }

    /// Dimension of `mode`, or `None` past the tensor order.
    pub fn dimension(&self, mode: usize) -> Option<Dimension> {
        self.dims.get(mode).copied()
    }

    pub fn dims(&self) -> &[Dimension] {
        &self.dims
    }
}

impl FromIterator<Dimension> for Shape {
    fn from_iter<T: IntoIterator<Item = Dimension>>(iter: T) -> Self {
        Self::new(iter)
    }
}

/// Component type plus shape of a tensor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Type {
    dtype: DType,
    shape: Shape,
}

impl Type {
    pub fn new(dtype: DType, shape: Shape) -> Self {
        Self { dtype, shape }
    }

    pub fn scalar(dtype: DType) -> Self {
        Self::new(dtype, Shape::scalar())
    }

    pub fn dtype(&self) -> DType {
        self.dtype
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn order(&self) -> usize {
        self.shape.order()
    }
}

impl std::fmt::Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.dtype)?;
        if self.shape.order() > 0 {
            write!(f, "[{}]", self.shape.dims().iter().join(","))?;
        }
        Ok(())
    }
}

/// Storage kind of a single mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum ModeType {
    /// Every coordinate is stored.
    Dense,
    /// Only non-zero coordinates are stored.
    Compressed,
}

/// Per-mode storage kinds plus the order in which modes are stored.
///
/// `mode_ordering[k]` is the tensor mode stored at level `k`; the identity ordering
/// stores modes in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Format {
    mode_types: SmallVec<[ModeType; 4]>,
    mode_ordering: SmallVec<[usize; 4]>,
}

impl Format {
    /// Create a format from mode types and a storage ordering.
    ///
    /// # Panics
    ///
    /// Panics if `mode_ordering` is not a permutation of `0..mode_types.len()`.
    pub fn new(mode_types: impl IntoIterator<Item = ModeType>, mode_ordering: impl IntoIterator<Item = usize>) -> Self {
        let mode_types: SmallVec<[ModeType; 4]> = mode_types.into_iter().collect();
        let mode_ordering: SmallVec<[usize; 4]> = mode_ordering.into_iter().collect();
        assert!(
            mode_ordering.len() == mode_types.len() && mode_ordering.iter().sorted().copied().eq(0..mode_types.len()),
            "mode ordering {mode_ordering:?} is not a permutation of 0..{}",
            mode_types.len()
        );
        Self { mode_types, mode_ordering }
    }

    /// Format storing every mode in the natural order.
    pub fn with_mode_types(mode_types: impl IntoIterator<Item = ModeType>) -> Self {
        let mode_types: SmallVec<[ModeType; 4]> = mode_types.into_iter().collect();
        let order = mode_types.len();
        Self::new(mode_types, 0..order)
    }

    /// All-dense format of the given order.
    pub fn dense(order: usize) -> Self {
        Self::with_mode_types(std::iter::repeat_n(ModeType::Dense, order))
    }

    /// Compressed sparse row matrix format.
    pub fn csr() -> Self {
        Self::with_mode_types([ModeType::Dense, ModeType::Compressed])
    }

    /// Compressed sparse column matrix format.
    pub fn csc() -> Self {
        Self::new([ModeType::Dense, ModeType::Compressed], [1, 0])
    }

    /// Sparse vector format.
    pub fn sparse_vector() -> Self {
        Self::with_mode_types([ModeType::Compressed])
    }

    pub fn order(&self) -> usize {
        self.mode_types.len()
    }

    pub fn mode_types(&self) -> &[ModeType] {
        &self.mode_types
    }

    pub fn mode_ordering(&self) -> &[usize] {
        &self.mode_ordering
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}; {})", self.mode_types.iter().join(","), self.mode_ordering.iter().join(","))
    }
}
