//! Data type tags and the element types that back them.

use std::fmt;
use std::str::FromStr;

use num_complex::{Complex32, Complex64};

use crate::{NdarrayError, Result};

/// Tag identifying the element type of an ndarray.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DType {
    Float64,
    Float32,
    Int32,
    Int16,
    Int8,
    Uint32,
    Uint16,
    Uint8,
    /// Unsigned 8-bit integers which saturate on conversion.
    Uint8c,
    /// Double-precision complex numbers.
    Complex128,
    /// Single-precision complex numbers.
    Complex64,
    Bool,
    /// Any element type.
    Generic,
}

impl DType {
    /// Every supported dtype, in canonical order.
    pub const ALL: [DType; 13] = [
        DType::Float64,
        DType::Float32,
        DType::Int32,
        DType::Int16,
        DType::Int8,
        DType::Uint32,
        DType::Uint16,
        DType::Uint8,
        DType::Uint8c,
        DType::Complex128,
        DType::Complex64,
        DType::Bool,
        DType::Generic,
    ];

    /// Canonical string name.
    pub fn as_str(&self) -> &'static str {
        match self {
            DType::Float64 => "float64",
            DType::Float32 => "float32",
            DType::Int32 => "int32",
            DType::Int16 => "int16",
            DType::Int8 => "int8",
            DType::Uint32 => "uint32",
            DType::Uint16 => "uint16",
            DType::Uint8 => "uint8",
            DType::Uint8c => "uint8c",
            DType::Complex128 => "complex128",
            DType::Complex64 => "complex64",
            DType::Bool => "bool",
            DType::Generic => "generic",
        }
    }

    /// Size of one element in bytes, or `None` for `generic`.
    pub fn byte_size(&self) -> Option<usize> {
        match self {
            DType::Float64 => Some(8),
            DType::Float32 => Some(4),
            DType::Int32 | DType::Uint32 => Some(4),
            DType::Int16 | DType::Uint16 => Some(2),
            DType::Int8 | DType::Uint8 | DType::Uint8c | DType::Bool => Some(1),
            DType::Complex128 => Some(16),
            DType::Complex64 => Some(8),
            DType::Generic => None,
        }
    }

    #[inline]
    pub fn is_complex(&self) -> bool {
        matches!(self, DType::Complex128 | DType::Complex64)
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DType {
    type Err = NdarrayError;

    fn from_str(s: &str) -> Result<Self> {
        DType::ALL
            .iter()
            .copied()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| NdarrayError::InvalidDType(s.to_string()))
    }
}

/// Returns true if `s` names a supported dtype.
pub fn is_dtype(s: &str) -> bool {
    s.parse::<DType>().is_ok()
}

/// Element types storable in an ndarray.
///
/// `NATIVE` is the dtype an element type maps to; a container over `T` may be
/// tagged with any dtype `T` [`accepts`](Element::accepts).
pub trait Element: Clone + Send + Sync + fmt::Debug + 'static {
    const NATIVE: DType;

    #[inline]
    fn accepts(dtype: DType) -> bool {
        dtype == Self::NATIVE || dtype == DType::Generic
    }
}

macro_rules! impl_element {
    ($ty:ty => $dtype:expr) => {
        impl Element for $ty {
            const NATIVE: DType = $dtype;
        }
    };
}

impl_element!(f64 => DType::Float64);
impl_element!(f32 => DType::Float32);
impl_element!(i32 => DType::Int32);
impl_element!(i16 => DType::Int16);
impl_element!(i8 => DType::Int8);
impl_element!(u32 => DType::Uint32);
impl_element!(u16 => DType::Uint16);
impl_element!(Complex64 => DType::Complex128);
impl_element!(Complex32 => DType::Complex64);
impl_element!(bool => DType::Bool);
impl_element!(i64 => DType::Generic);
impl_element!(u64 => DType::Generic);
impl_element!(isize => DType::Generic);
impl_element!(usize => DType::Generic);
impl_element!(String => DType::Generic);

impl Element for u8 {
    const NATIVE: DType = DType::Uint8;

    #[inline]
    fn accepts(dtype: DType) -> bool {
        matches!(dtype, DType::Uint8 | DType::Uint8c | DType::Generic)
    }
}

/// Check that elements of type `T` may be tagged with `dtype`.
pub(crate) fn ensure_compatible<T: Element>(dtype: DType) -> Result<()> {
    if T::accepts(dtype) {
        Ok(())
    } else {
        Err(NdarrayError::DTypeMismatch {
            dtype,
            native: T::NATIVE,
        })
    }
}
