//! Memory/iteration order and contiguous stride computation.

use std::fmt;
use std::str::FromStr;

use crate::{IndexError, Result};

/// Iteration order of an array.
///
/// Governs which dimension varies fastest when elements are visited by a
/// single linear index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Order {
    /// C order: the last dimension varies fastest.
    #[default]
    RowMajor,
    /// Fortran order: the first dimension varies fastest.
    ColumnMajor,
}

impl Order {
    /// Canonical string name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Order::RowMajor => "row-major",
            Order::ColumnMajor => "column-major",
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Order {
    type Err = IndexError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "row-major" => Ok(Order::RowMajor),
            "column-major" => Ok(Order::ColumnMajor),
            other => Err(IndexError::InvalidOrder(other.to_string())),
        }
    }
}

/// Returns true if `s` names a supported order.
pub fn is_order(s: &str) -> bool {
    s.parse::<Order>().is_ok()
}

/// Contiguous strides for `shape` in the given `order`.
///
/// A zero-dimensional shape yields `[0]`, the single stride such arrays carry.
/// Extents after a zero extent get stride zero.
///
/// # Errors
/// Returns [`IndexError::OffsetOverflow`] if a stride does not fit in `isize`.
/// The product of all extents may overflow as long as no stride needs it.
///
/// # Example
/// ```rust
/// use strided_index::{shape_to_strides, Order};
///
/// assert_eq!(shape_to_strides(&[2, 3, 4], Order::RowMajor).unwrap(), vec![12, 4, 1]);
/// assert_eq!(shape_to_strides(&[2, 3, 4], Order::ColumnMajor).unwrap(), vec![1, 2, 6]);
/// ```
pub fn shape_to_strides(shape: &[usize], order: Order) -> Result<Vec<isize>> {
    let ndims = shape.len();
    if ndims == 0 {
        return Ok(vec![0]);
    }
    let mut strides = vec![0isize; ndims];
    // fastest dimension first
    let dims: Box<dyn Iterator<Item = usize>> = match order {
        Order::RowMajor => Box::new((0..ndims).rev()),
        Order::ColumnMajor => Box::new(0..ndims),
    };
    let mut acc = Some(1isize);
    for i in dims {
        strides[i] = acc.ok_or(IndexError::OffsetOverflow)?;
        acc = isize::try_from(shape[i])
            .ok()
            .and_then(|n| strides[i].checked_mul(n));
    }
    Ok(strides)
}

/// Infer the order implied by a stride array.
///
/// Returns `Some(RowMajor)` when |strides| are non-increasing, `Some(ColumnMajor)`
/// when non-decreasing, and `None` when neither holds. Strides satisfying both
/// (zero or one dimension, or all equal) report `RowMajor`.
pub fn strides_to_order(strides: &[isize]) -> Option<Order> {
    let abs: Vec<usize> = strides.iter().map(|s| s.unsigned_abs()).collect();
    let row = abs.windows(2).all(|w| w[0] >= w[1]);
    if row {
        return Some(Order::RowMajor);
    }
    let col = abs.windows(2).all(|w| w[0] <= w[1]);
    if col {
        return Some(Order::ColumnMajor);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_to_strides() {
        assert_eq!(shape_to_strides(&[3, 4], Order::RowMajor).unwrap(), vec![4, 1]);
        assert_eq!(shape_to_strides(&[3, 4], Order::ColumnMajor).unwrap(), vec![1, 3]);
        assert_eq!(shape_to_strides(&[2, 0, 3], Order::RowMajor).unwrap(), vec![0, 3, 1]);
    }

    #[test]
    fn test_shape_to_strides_zero_dim() {
        assert_eq!(shape_to_strides(&[], Order::RowMajor).unwrap(), vec![0]);
        assert_eq!(shape_to_strides(&[], Order::ColumnMajor).unwrap(), vec![0]);
    }

    #[test]
    fn test_shape_to_strides_overflow() {
        let big = 1usize << 40;
        // the full product overflows, the strides themselves do not
        let strides = shape_to_strides(&[big, big], Order::RowMajor).unwrap();
        assert_eq!(strides, vec![big as isize, 1]);
        assert_eq!(
            shape_to_strides(&[big, big, 2], Order::ColumnMajor),
            Err(IndexError::OffsetOverflow)
        );
    }

    #[test]
    fn test_strides_to_order() {
        assert_eq!(strides_to_order(&[12, 4, 1]), Some(Order::RowMajor));
        assert_eq!(strides_to_order(&[1, -2, 6]), Some(Order::ColumnMajor));
        assert_eq!(strides_to_order(&[4, 1, 2]), None);
        assert_eq!(strides_to_order(&[3]), Some(Order::RowMajor));
    }

    #[test]
    fn test_order_parse() {
        assert_eq!("column-major".parse::<Order>().unwrap(), Order::ColumnMajor);
        assert_eq!(Order::RowMajor.to_string(), "row-major");
        assert!(is_order("row-major"));
        assert!(!is_order("C"));
    }
}
