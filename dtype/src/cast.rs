use super::*;
use enumset::EnumSet;

impl DType {
    const fn promotion_lattice(self) -> &'static [Self] {
        use DType::*;
        match self {
            Bool => &[Int8, UInt8],
            Int8 => &[Int16],
            Int16 => &[Int32],
            Int32 => &[Int64],
            Int64 => &[Float32],
            UInt8 => &[Int16, UInt16],
            UInt16 => &[Int32, UInt32],
            UInt32 => &[Int64, UInt64],
            UInt64 => &[Float32],
            Float32 => &[Float64, Complex64],
            Float64 => &[Complex128],
            Complex64 => &[Complex128],
            Complex128 => &[],
        }
    }

    fn get_recursive_parents(self) -> EnumSet<Self> {
        self.promotion_lattice()
            .iter()
            .fold(EnumSet::only(self), |dtypes, &parent| dtypes.union(parent.get_recursive_parents()))
    }

    /// Find the least upper bound type for a set of dtypes.
    ///
    /// Returns the smallest type that all input types can be promoted to, or `None`
    /// for an empty slice.
    pub fn least_upper_dtype(dtypes: &[Self]) -> Option<Self> {
        dtypes
            .iter()
            .map(|d| d.get_recursive_parents())
            .reduce(|lhs, rhs| lhs.intersection(rhs))?
            .iter()
            .min() // min by discriminant (= priority: lower = more specific)
    }

    /// Data type of a binary operation over operands of type `lhs` and `rhs`.
    ///
    /// Every pair of types has a common upper bound (`Complex128` at worst).
    pub fn max_type(lhs: Self, rhs: Self) -> Self {
        Self::least_upper_dtype(&[lhs, rhs]).unwrap_or(Self::Complex128)
    }
}
