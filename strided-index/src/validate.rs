//! Metadata validation: stride arity, reachable buffer span, contiguity.

use crate::{IndexError, Result};

/// Check that `strides` is shaped correctly for `shape`.
///
/// An n-dimensional shape needs exactly n strides; a zero-dimensional shape
/// needs exactly `[0]`.
pub fn validate_strides(shape: &[usize], strides: &[isize]) -> Result<()> {
    if shape.is_empty() {
        if strides != [0] {
            return Err(IndexError::ZeroDimStrides(strides.to_vec()));
        }
        return Ok(());
    }
    if shape.len() != strides.len() {
        return Err(IndexError::StrideLengthMismatch {
            ndims: shape.len(),
            strides: strides.len(),
        });
    }
    Ok(())
}

/// Minimum and maximum buffer indices reachable from a view.
///
/// Views with no elements report `(offset, offset)`.
pub fn minmax_view_buffer_index(
    shape: &[usize],
    strides: &[isize],
    offset: usize,
) -> Result<(usize, usize)> {
    validate_strides(shape, strides)?;
    let base = isize::try_from(offset).map_err(|_| IndexError::OffsetOverflow)?;
    if shape.contains(&0) {
        return Ok((offset, offset));
    }
    let mut min_offset = base;
    let mut max_offset = base;
    for (&dim, &stride) in shape.iter().zip(strides.iter()) {
        if dim > 1 {
            let end = stride
                .checked_mul(dim as isize - 1)
                .ok_or(IndexError::OffsetOverflow)?;
            if end >= 0 {
                max_offset = max_offset
                    .checked_add(end)
                    .ok_or(IndexError::OffsetOverflow)?;
            } else {
                min_offset = min_offset
                    .checked_add(end)
                    .ok_or(IndexError::OffsetOverflow)?;
            }
        }
    }
    if min_offset < 0 {
        return Err(IndexError::OffsetOverflow);
    }
    Ok((min_offset as usize, max_offset as usize))
}

/// Returns true if a buffer of `len` elements covers every index the view reaches.
///
/// Empty views are compatible with any buffer.
pub fn is_buffer_length_compatible(
    len: usize,
    shape: &[usize],
    strides: &[isize],
    offset: usize,
) -> bool {
    if validate_strides(shape, strides).is_err() {
        return false;
    }
    if shape.contains(&0) {
        return true;
    }
    match minmax_view_buffer_index(shape, strides, offset) {
        Ok((_, max)) => max < len,
        Err(_) => false,
    }
}

fn is_contiguous_along(
    shape: &[usize],
    strides: &[isize],
    dims: impl Iterator<Item = usize>,
) -> bool {
    // `None` once the running extent product overflows; no stride can match it
    let mut expected = Some(1isize);
    for i in dims {
        if shape[i] <= 1 {
            continue;
        }
        if expected != Some(strides[i]) {
            return false;
        }
        expected = isize::try_from(shape[i])
            .ok()
            .and_then(|n| strides[i].checked_mul(n));
    }
    true
}

/// Check if the view is contiguous in memory in row-major order.
///
/// Dimensions of extent one are ignored.
pub fn is_row_major_contiguous(shape: &[usize], strides: &[isize]) -> bool {
    if shape.len() != strides.len() {
        return shape.is_empty();
    }
    is_contiguous_along(shape, strides, (0..shape.len()).rev())
}

/// Check if the view is contiguous in memory in column-major order.
pub fn is_column_major_contiguous(shape: &[usize], strides: &[isize]) -> bool {
    if shape.len() != strides.len() {
        return shape.is_empty();
    }
    is_contiguous_along(shape, strides, 0..shape.len())
}
