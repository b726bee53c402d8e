//! Fresh arrays shaped like an existing one.

use num_traits::Zero;

use crate::dtype::Element;
use crate::{Ndarray, Result};

/// Zero-filled contiguous array with the dtype, shape and order of `x`.
///
/// The result owns a new buffer and uses default index modes; strides and
/// offset of `x` are not carried over.
///
/// # Example
/// ```rust
/// use strided_ndarray::{slice_from, zeros_like, DType, Ndarray, Order};
///
/// let data = vec![1, 2, 3, 4];
/// let x = Ndarray::from_vec(DType::Int32, data, &[2, 2], Order::ColumnMajor).unwrap();
/// let view = slice_from(&x, &[Some(1), None], true, false).unwrap();
/// let z = zeros_like(&view).unwrap();
/// assert_eq!(z.shape(), &[1, 2]);
/// assert_eq!(z.strides(), &[1, 1]);
/// assert_eq!(z.to_vec(), vec![0, 0]);
/// ```
pub fn zeros_like<T: Element + Zero>(x: &Ndarray<T>) -> Result<Ndarray<T>> {
    Ndarray::zeros(x.dtype(), x.shape(), x.order())
}

/// Contiguous array with the dtype, shape and order of `x`, filled with
/// `T::default()`.
pub fn empty_like<T: Element + Default>(x: &Ndarray<T>) -> Result<Ndarray<T>> {
    Ndarray::filled(x.dtype(), x.shape(), x.order(), T::default())
}
