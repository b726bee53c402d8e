//! Conversions between view linear indices, subscripts and buffer indices.
//!
//! Three index spaces are involved:
//! - *subscripts*: one index per dimension
//! - *view linear index*: position of an element when the view is flattened
//!   in its [`Order`]
//! - *buffer index*: physical position in the underlying flat storage,
//!   `offset + sum(sub_i * stride_i)`

use smallvec::SmallVec;

use crate::mode::{ind, IndexMode};
use crate::order::Order;
use crate::validate::{minmax_view_buffer_index, validate_strides};
use crate::{IndexError, Result};

type Subscripts = SmallVec<[usize; 8]>;

/// Number of elements in a view of the given shape, or `None` if it does not
/// fit in `usize`.
///
/// Any zero extent makes the count zero, whatever the other extents are. A
/// zero-dimensional shape holds exactly one element.
pub fn checked_numel(shape: &[usize]) -> Option<usize> {
    if shape.contains(&0) {
        return Some(0);
    }
    shape.iter().try_fold(1usize, |acc, &dim| acc.checked_mul(dim))
}

/// Number of elements in a view of the given shape, saturating at `usize::MAX`.
///
/// Broadcast views (zero strides) may describe more elements than `usize`
/// can count; use [`checked_numel`] to detect that case.
#[inline]
pub fn numel(shape: &[usize]) -> usize {
    checked_numel(shape).unwrap_or(usize::MAX)
}

#[inline]
fn step(pos: isize, sub: usize, stride: isize) -> Result<isize> {
    (sub as isize)
        .checked_mul(stride)
        .and_then(|d| pos.checked_add(d))
        .ok_or(IndexError::OffsetOverflow)
}

#[inline]
fn to_buffer_index(pos: isize) -> Result<usize> {
    usize::try_from(pos).map_err(|_| IndexError::OffsetOverflow)
}

#[inline]
fn base(offset: usize) -> Result<isize> {
    isize::try_from(offset).map_err(|_| IndexError::OffsetOverflow)
}

/// Convert a view linear index to a buffer index.
///
/// `idx` is first resolved against `numel(shape) - 1` using `mode`, then split
/// into subscripts with the last (row-major) or first (column-major)
/// dimension varying fastest.
///
/// # Errors
/// - [`IndexError::EmptyExtent`] if the view has no elements
/// - [`IndexError::LengthOverflow`] if the element count overflows `usize`
/// - [`IndexError::OutOfBounds`] for an out-of-range `idx` under `throw` mode
pub fn vind2bind(
    shape: &[usize],
    strides: &[isize],
    offset: usize,
    order: Order,
    idx: isize,
    mode: IndexMode,
) -> Result<usize> {
    validate_strides(shape, strides)?;
    let len = checked_numel(shape).ok_or(IndexError::LengthOverflow)?;
    if len == 0 {
        return Err(IndexError::EmptyExtent);
    }
    let mut rem = ind(idx, len - 1, mode)?;
    let mut pos = base(offset)?;
    let ndims = shape.len();
    match order {
        Order::RowMajor => {
            for i in (0..ndims).rev() {
                let s = rem % shape[i];
                rem /= shape[i];
                pos = step(pos, s, strides[i])?;
            }
        }
        Order::ColumnMajor => {
            for i in 0..ndims {
                let s = rem % shape[i];
                rem /= shape[i];
                pos = step(pos, s, strides[i])?;
            }
        }
    }
    to_buffer_index(pos)
}

/// Convert subscripts to a buffer index.
///
/// Each subscript is resolved with `modes[i % modes.len()]`.
///
/// # Errors
/// - [`IndexError::RankMismatch`] if `subs.len() != shape.len()`
/// - [`IndexError::EmptyModes`] if `modes` is empty
/// - [`IndexError::EmptyExtent`] if a dimension has extent zero
pub fn sub2ind(
    shape: &[usize],
    strides: &[isize],
    offset: usize,
    subs: &[isize],
    modes: &[IndexMode],
) -> Result<usize> {
    validate_strides(shape, strides)?;
    if subs.len() != shape.len() {
        return Err(IndexError::RankMismatch(shape.len(), subs.len()));
    }
    if modes.is_empty() {
        return Err(IndexError::EmptyModes);
    }
    let mut pos = base(offset)?;
    for (i, (&sub, &dim)) in subs.iter().zip(shape.iter()).enumerate() {
        if dim == 0 {
            return Err(IndexError::EmptyExtent);
        }
        let k = ind(sub, dim - 1, modes[i % modes.len()])?;
        pos = step(pos, k, strides[i])?;
    }
    to_buffer_index(pos)
}

/// Dimension visiting order for peeling a buffer index apart: largest
/// |stride| first, ties broken so the slower dimension of `order` comes first.
fn peel_order(shape: &[usize], strides: &[isize], order: Order) -> Subscripts {
    let ndims = shape.len();
    let mut dims: Subscripts = match order {
        Order::RowMajor => (0..ndims).collect(),
        Order::ColumnMajor => (0..ndims).rev().collect(),
    };
    dims.sort_by(|&a, &b| strides[b].unsigned_abs().cmp(&strides[a].unsigned_abs()));
    dims
}

/// Convert a buffer index to subscripts, writing them into `out`.
///
/// `idx` is resolved with `mode` against the span of buffer indices the view
/// reaches, so negative values count back from the largest reachable index.
///
/// # Errors
/// - [`IndexError::RankMismatch`] if `out.len() != shape.len()`
/// - [`IndexError::EmptyExtent`] if the view has no elements
/// - [`IndexError::Unreachable`] if the resolved index lies inside the span
///   but no subscript tuple addresses it
pub fn ind2sub_into(
    shape: &[usize],
    strides: &[isize],
    offset: usize,
    order: Order,
    idx: isize,
    mode: IndexMode,
    out: &mut [usize],
) -> Result<()> {
    validate_strides(shape, strides)?;
    if out.len() != shape.len() {
        return Err(IndexError::RankMismatch(shape.len(), out.len()));
    }
    if numel(shape) == 0 {
        return Err(IndexError::EmptyExtent);
    }
    let (min, max) = minmax_view_buffer_index(shape, strides, offset)?;
    let rel_idx = idx
        .checked_sub(base(min)?)
        .ok_or(IndexError::OffsetOverflow)?;
    let resolved = min + ind(rel_idx, max - min, mode)?;
    let mut rel = resolved - min;

    for i in peel_order(shape, strides, order) {
        let a = strides[i].unsigned_abs();
        if shape[i] == 1 || a == 0 {
            out[i] = 0;
            continue;
        }
        let q = rel / a;
        if q >= shape[i] {
            return Err(IndexError::Unreachable(resolved));
        }
        rel -= q * a;
        out[i] = if strides[i] < 0 { shape[i] - 1 - q } else { q };
    }
    if rel != 0 {
        return Err(IndexError::Unreachable(resolved));
    }
    Ok(())
}

/// Convert a buffer index to subscripts.
///
/// See [`ind2sub_into`].
///
/// # Example
/// ```rust
/// use strided_index::{ind2sub, IndexMode, Order};
///
/// let subs = ind2sub(&[2, 2], &[-2, 1], 2, Order::RowMajor, 1, IndexMode::Throw).unwrap();
/// assert_eq!(subs, vec![1, 1]);
/// ```
pub fn ind2sub(
    shape: &[usize],
    strides: &[isize],
    offset: usize,
    order: Order,
    idx: isize,
    mode: IndexMode,
) -> Result<Vec<usize>> {
    let mut out = vec![0usize; shape.len()];
    ind2sub_into(shape, strides, offset, order, idx, mode, &mut out)?;
    Ok(out)
}

/// Convert a buffer index to a view linear index.
///
/// Inverse of [`vind2bind`] for buffer indices the view reaches.
pub fn bind2vind(
    shape: &[usize],
    strides: &[isize],
    offset: usize,
    order: Order,
    idx: isize,
    mode: IndexMode,
) -> Result<usize> {
    let mut subs: Subscripts = SmallVec::from_elem(0, shape.len());
    ind2sub_into(shape, strides, offset, order, idx, mode, &mut subs)?;
    let mut pairs = subs.iter().zip(shape.iter());
    let linearize = |v: usize, (&s, &dim): (&usize, &usize)| {
        v.checked_mul(dim)
            .and_then(|v| v.checked_add(s))
            .ok_or(IndexError::LengthOverflow)
    };
    match order {
        Order::RowMajor => pairs.try_fold(0, linearize),
        Order::ColumnMajor => pairs.rev().try_fold(0, linearize),
    }
}
