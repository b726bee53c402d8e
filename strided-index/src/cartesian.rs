//! Stepping through subscript tuples in iteration order.

use crate::order::Order;

fn normalize_dim(dim: isize, ndims: usize) -> Option<usize> {
    let n = ndims as isize;
    let d = if dim < 0 { dim + n } else { dim };
    if d < 0 || d >= n {
        return None;
    }
    Some(d as usize)
}

/// Advance `idx` by one step at dimension `dim`, writing the result into `out`.
///
/// Row-major order carries from `dim` towards dimension 0; column-major order
/// carries from `dim` towards the last dimension. Dimensions varying faster than
/// `dim` are reset to zero. Past the last index the tuple wraps to all zeros.
///
/// Returns `None` for a zero-dimensional shape, a `dim` outside
/// `[-ndims, ndims-1]`, or `idx`/`out` whose length differs from `shape`.
pub fn next_cartesian_index_assign<'a>(
    shape: &[usize],
    order: Order,
    idx: &[usize],
    dim: isize,
    out: &'a mut [usize],
) -> Option<&'a mut [usize]> {
    let ndims = shape.len();
    if ndims == 0 || idx.len() != ndims || out.len() != ndims {
        return None;
    }
    let d = normalize_dim(dim, ndims)?;
    out.copy_from_slice(idx);
    match order {
        Order::RowMajor => {
            out[d + 1..].fill(0);
            for i in (0..=d).rev() {
                let next = out[i] + 1;
                if next < shape[i] {
                    out[i] = next;
                    break;
                }
                out[i] = 0;
            }
        }
        Order::ColumnMajor => {
            out[..d].fill(0);
            for i in d..ndims {
                let next = out[i] + 1;
                if next < shape[i] {
                    out[i] = next;
                    break;
                }
                out[i] = 0;
            }
        }
    }
    Some(out)
}

/// Advance `idx` by one step at dimension `dim`.
///
/// See [`next_cartesian_index_assign`].
///
/// # Example
/// ```rust
/// use strided_index::{next_cartesian_index, Order};
///
/// let next = next_cartesian_index(&[2, 2, 2], Order::RowMajor, &[0, 0, 1], -1);
/// assert_eq!(next, Some(vec![0, 1, 0]));
/// let wrapped = next_cartesian_index(&[2, 2, 2], Order::RowMajor, &[1, 1, 1], -1);
/// assert_eq!(wrapped, Some(vec![0, 0, 0]));
/// ```
pub fn next_cartesian_index(
    shape: &[usize],
    order: Order,
    idx: &[usize],
    dim: isize,
) -> Option<Vec<usize>> {
    let mut out = vec![0usize; shape.len()];
    next_cartesian_index_assign(shape, order, idx, dim, &mut out)?;
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_row_major_sequence() {
        let shape = [2, 3];
        let mut idx = vec![0, 0];
        let mut seen = vec![idx.clone()];
        for _ in 0..5 {
            idx = next_cartesian_index(&shape, Order::RowMajor, &idx, -1).unwrap();
            seen.push(idx.clone());
        }
        assert_eq!(
            seen,
            vec![vec![0, 0], vec![0, 1], vec![0, 2], vec![1, 0], vec![1, 1], vec![1, 2]]
        );
    }

    #[test]
    fn test_next_column_major_sequence() {
        let shape = [2, 3];
        let mut idx = vec![0, 0];
        let mut seen = vec![idx.clone()];
        for _ in 0..5 {
            idx = next_cartesian_index(&shape, Order::ColumnMajor, &idx, 0).unwrap();
            seen.push(idx.clone());
        }
        assert_eq!(
            seen,
            vec![vec![0, 0], vec![1, 0], vec![0, 1], vec![1, 1], vec![0, 2], vec![1, 2]]
        );
    }

    #[test]
    fn test_next_wraps() {
        assert_eq!(
            next_cartesian_index(&[2, 2, 2], Order::RowMajor, &[1, 1, 1], -1),
            Some(vec![0, 0, 0])
        );
        assert_eq!(
            next_cartesian_index(&[2, 2, 2], Order::ColumnMajor, &[1, 1, 1], 0),
            Some(vec![0, 0, 0])
        );
    }

    #[test]
    fn test_next_from_inner_dim() {
        // incrementing dim 1 resets the faster dim 2
        assert_eq!(
            next_cartesian_index(&[2, 3, 4], Order::RowMajor, &[0, 1, 3], 1),
            Some(vec![0, 2, 0])
        );
        assert_eq!(
            next_cartesian_index(&[4, 3, 2], Order::ColumnMajor, &[3, 1, 0], 1),
            Some(vec![0, 2, 0])
        );
    }

    #[test]
    fn test_next_invalid() {
        assert_eq!(next_cartesian_index(&[], Order::RowMajor, &[], 0), None);
        assert_eq!(next_cartesian_index(&[2, 2], Order::RowMajor, &[0, 0], 2), None);
        assert_eq!(next_cartesian_index(&[2, 2], Order::RowMajor, &[0, 0], -3), None);
        assert_eq!(next_cartesian_index(&[2, 2], Order::RowMajor, &[0], 0), None);
    }

    #[test]
    fn test_next_assign() {
        let mut out = [7usize; 2];
        let res = next_cartesian_index_assign(&[2, 2], Order::RowMajor, &[0, 1], -1, &mut out);
        assert_eq!(res.map(|o| o.to_vec()), Some(vec![1, 0]));
        assert_eq!(out, [1, 0]);
    }
}
