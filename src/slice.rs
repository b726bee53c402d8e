//! View transformers: new ndarrays over the same buffer selecting a strided
//! range or a single index per dimension.
//!
//! [`slice`] is the general form. [`slice_from`] and [`slice_to`] (and their
//! single-dimension variants) shift the start or truncate the end of each
//! dimension and are expressed through it.

use smallvec::SmallVec;

use crate::config::trace_enabled;
use crate::dtype::Element;
use crate::{
    checked_numel, next_cartesian_index_assign, IndexError, Ndarray, NdarrayError, Order, Result,
};

// ============================================================================
// Slice arguments
// ============================================================================

/// A `start..stop` range with a step, resolved against one dimension.
///
/// `start` is inclusive and `stop` exclusive; negative values count from the
/// end of the dimension. A missing `start` begins at the first element in the
/// direction of `step`, a missing `stop` runs past the last one, so
/// `Slice::new(None, None, -1)` reverses a dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slice {
    start: Option<isize>,
    stop: Option<isize>,
    step: isize,
}

impl Slice {
    /// # Errors
    /// Returns [`NdarrayError::ZeroSliceStep`] if `step` is zero.
    pub fn new(start: Option<isize>, stop: Option<isize>, step: isize) -> Result<Self> {
        if step == 0 {
            return Err(NdarrayError::ZeroSliceStep);
        }
        Ok(Self { start, stop, step })
    }

    /// The whole dimension.
    pub const fn full() -> Self {
        Self {
            start: None,
            stop: None,
            step: 1,
        }
    }

    /// `start..stop` with unit step.
    pub const fn range(start: isize, stop: isize) -> Self {
        Self {
            start: Some(start),
            stop: Some(stop),
            step: 1,
        }
    }

    #[inline]
    pub fn start(&self) -> Option<isize> {
        self.start
    }

    #[inline]
    pub fn stop(&self) -> Option<isize> {
        self.stop
    }

    #[inline]
    pub fn step(&self) -> isize {
        self.step
    }
}

impl Default for Slice {
    fn default() -> Self {
        Self::full()
    }
}

/// Per-dimension argument to [`slice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SliceArg {
    /// Keep the dimension unchanged.
    Full,
    /// Select one element and drop the dimension.
    Index(isize),
    /// Select a strided range.
    Range(Slice),
}

impl From<Slice> for SliceArg {
    fn from(s: Slice) -> Self {
        SliceArg::Range(s)
    }
}

impl From<isize> for SliceArg {
    fn from(index: isize) -> Self {
        SliceArg::Index(index)
    }
}

// ============================================================================
// Resolution
// ============================================================================

fn out_of_bounds(dim: usize, index: isize, extent: usize) -> NdarrayError {
    NdarrayError::SliceOutOfBounds { dim, index, extent }
}

#[inline]
fn signed_extent(extent: usize) -> Result<isize> {
    isize::try_from(extent).map_err(|_| IndexError::OffsetOverflow.into())
}

#[inline]
fn advance(pos: isize, index: isize, stride: isize) -> Result<isize> {
    index
        .checked_mul(stride)
        .and_then(|d| pos.checked_add(d))
        .ok_or_else(|| IndexError::OffsetOverflow.into())
}

/// Resolve an explicit range endpoint.
///
/// Under `strict` the raw value must lie in `[-extent, upper]`. The value is
/// then made non-negative and clamped into `[lo, hi]`.
fn endpoint(
    dim: usize,
    value: isize,
    extent: usize,
    bounds: (isize, isize, isize),
    strict: bool,
) -> Result<isize> {
    let (upper, lo, hi) = bounds;
    let n = signed_extent(extent)?;
    if value < -n || value > upper {
        if strict {
            return Err(out_of_bounds(dim, value, extent));
        }
        log::debug!("slice endpoint {value} clamped along dimension {dim} (extent {extent})");
    }
    let v = if value < 0 { value + n } else { value };
    Ok(v.clamp(lo, hi))
}

/// First index and element count of a range along one dimension.
fn resolve_range(dim: usize, s: &Slice, extent: usize, strict: bool) -> Result<(isize, usize)> {
    let n = signed_extent(extent)?;
    let (start, stop) = if s.step > 0 {
        let bounds = (n, 0, n);
        let start = match s.start {
            Some(v) => endpoint(dim, v, extent, bounds, strict)?,
            None => 0,
        };
        let stop = match s.stop {
            Some(v) => endpoint(dim, v, extent, bounds, strict)?,
            None => n,
        };
        (start, stop)
    } else {
        // -1 stands for "before the first element"
        let bounds = (n - 1, -1, n - 1);
        let start = match s.start {
            Some(v) => endpoint(dim, v, extent, bounds, strict)?,
            None => n - 1,
        };
        let stop = match s.stop {
            Some(v) => endpoint(dim, v, extent, bounds, strict)?,
            None => -1,
        };
        (start, stop)
    };
    let span = if s.step > 0 { stop - start } else { start - stop };
    let len = if span > 0 {
        (span as usize - 1) / s.step.unsigned_abs() + 1
    } else {
        0
    };
    Ok((start, len))
}

// ============================================================================
// Views
// ============================================================================

/// View of `x` selecting, per dimension, the whole extent, a single index
/// (dropping that dimension) or a strided range.
///
/// Strides of ranged dimensions are multiplied by the range step and the
/// offset moves to the first selected element. The result shares `x`'s buffer
/// and is writable only when `writable` is set and `x` itself is writable.
///
/// Under `strict`, explicit range endpoints outside the dimension fail;
/// otherwise they are clamped. Single indices are always bounds-checked.
///
/// # Errors
/// - [`NdarrayError::Index`] if `args.len() != x.ndims()`
/// - [`NdarrayError::SliceOutOfBounds`] for an out-of-range index or, under
///   `strict`, range endpoint
///
/// # Example
/// ```rust
/// use strided_ndarray::{slice, DType, Ndarray, Order, Slice, SliceArg};
///
/// let data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
/// let x = Ndarray::from_vec(DType::Float64, data, &[3, 2], Order::RowMajor).unwrap();
///
/// let s0 = Slice::new(None, None, -2).unwrap();
/// let s1 = Slice::new(None, None, -1).unwrap();
/// let y = slice(&x, &[s0.into(), s1.into()], true, false).unwrap();
/// assert_eq!(y.shape(), &[2, 2]);
/// assert_eq!(y.to_vec(), vec![6.0, 5.0, 2.0, 1.0]);
///
/// // a single index drops the dimension
/// let row = slice(&x, &[SliceArg::Index(1), SliceArg::Full], true, false).unwrap();
/// assert_eq!(row.to_vec(), vec![3.0, 4.0]);
/// ```
pub fn slice<T: Element>(
    x: &Ndarray<T>,
    args: &[SliceArg],
    strict: bool,
    writable: bool,
) -> Result<Ndarray<T>> {
    let ndims = x.ndims();
    if args.len() != ndims {
        return Err(IndexError::RankMismatch(ndims, args.len()).into());
    }
    let mut shape: SmallVec<[usize; 8]> = SmallVec::new();
    let mut strides: SmallVec<[isize; 8]> = SmallVec::new();
    let mut pos = signed_extent(x.offset())?;
    for (i, arg) in args.iter().enumerate() {
        let extent = x.shape()[i];
        let stride = x.strides()[i];
        match *arg {
            SliceArg::Full => {
                shape.push(extent);
                strides.push(stride);
            }
            SliceArg::Index(k) => {
                let n = signed_extent(extent)?;
                if k < -n || k >= n {
                    return Err(out_of_bounds(i, k, extent));
                }
                pos = advance(pos, if k < 0 { k + n } else { k }, stride)?;
            }
            SliceArg::Range(s) => {
                let (start, len) = resolve_range(i, &s, extent, strict)?;
                if len > 0 {
                    pos = advance(pos, start, stride)?;
                }
                shape.push(len);
                strides.push(stride.checked_mul(s.step).ok_or(IndexError::OffsetOverflow)?);
            }
        }
    }
    if shape.is_empty() {
        strides.push(0);
    }
    // an empty view never dereferences its offset
    let offset = if shape.contains(&0) {
        x.offset()
    } else {
        pos as usize
    };
    let readonly = x.is_readonly() || !writable;
    if trace_enabled() {
        log::trace!(
            "slice: shape {:?} -> {shape:?}, strides {:?} -> {strides:?}, \
             offset {} -> {offset}, readonly={readonly}",
            x.shape(),
            x.strides(),
            x.offset()
        );
    }
    x.derive(&shape, &strides, offset, readonly)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bound {
    /// Inclusive starting index.
    Start,
    /// Exclusive ending index.
    Stop,
}

/// Resolve a start/stop argument against `extent`.
///
/// Negative values count from the end. Starts must lie in `[-extent, extent-1]`
/// and stops in `[-extent, extent]` under `strict`; otherwise they are clamped
/// into `[0, extent]`.
fn resolve(dim: usize, value: isize, extent: usize, bound: Bound, strict: bool) -> Result<isize> {
    let n = signed_extent(extent)?;
    let upper = match bound {
        Bound::Start => n - 1,
        Bound::Stop => n,
    };
    if value < -n || value > upper {
        if strict {
            return Err(out_of_bounds(dim, value, extent));
        }
        let clamped = if value < 0 { 0 } else { n };
        log::debug!(
            "slice {bound:?} {value} clamped to {clamped} along dimension {dim} (extent {extent})"
        );
        return Ok(clamped);
    }
    Ok(if value < 0 { value + n } else { value })
}

fn normalize_dim(dim: isize, ndims: usize) -> Result<usize> {
    let n = ndims as isize;
    let d = if dim < 0 { dim + n } else { dim };
    if d < 0 || d >= n {
        return Err(NdarrayError::InvalidDimension { dim, ndims });
    }
    Ok(d as usize)
}

fn slice_bounded<T: Element>(
    x: &Ndarray<T>,
    args: &[Option<isize>],
    bound: Bound,
    strict: bool,
    writable: bool,
) -> Result<Ndarray<T>> {
    let ndims = x.ndims();
    if args.len() != ndims {
        return Err(IndexError::RankMismatch(ndims, args.len()).into());
    }
    let mut ranges: SmallVec<[SliceArg; 8]> = SmallVec::with_capacity(ndims);
    for (i, (arg, &extent)) in args.iter().zip(x.shape()).enumerate() {
        let Some(value) = *arg else {
            ranges.push(SliceArg::Full);
            continue;
        };
        let r = resolve(i, value, extent, bound, strict)?;
        let range = match bound {
            Bound::Start => Slice {
                start: Some(r),
                stop: None,
                step: 1,
            },
            Bound::Stop => Slice {
                start: None,
                stop: Some(r),
                step: 1,
            },
        };
        ranges.push(SliceArg::Range(range));
    }
    slice(x, &ranges, true, writable)
}

/// View of `x` starting at `start[i]` along each dimension `i`.
///
/// `None` keeps a dimension whole; negative starts count from the end (`-1` is
/// the last element). Strides are unchanged and the offset moves to the new
/// first element. The result shares `x`'s buffer and is writable only when
/// `writable` is set and `x` itself is writable.
///
/// # Errors
/// - [`NdarrayError::Index`] if `start.len() != x.ndims()`
/// - [`NdarrayError::SliceOutOfBounds`] under `strict` for a start outside
///   `[-extent, extent-1]` (non-strict starts are clamped)
///
/// # Example
/// ```rust
/// use strided_ndarray::{slice_from, DType, Ndarray, Order};
///
/// let data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
/// let x = Ndarray::from_vec(DType::Float64, data, &[3, 2], Order::RowMajor).unwrap();
/// let y = slice_from(&x, &[Some(1), None], false, false).unwrap();
/// assert_eq!(y.shape(), &[2, 2]);
/// assert_eq!(y.to_vec(), vec![3.0, 4.0, 5.0, 6.0]);
/// ```
pub fn slice_from<T: Element>(
    x: &Ndarray<T>,
    start: &[Option<isize>],
    strict: bool,
    writable: bool,
) -> Result<Ndarray<T>> {
    slice_bounded(x, start, Bound::Start, strict, writable)
}

/// View of `x` ending before `stop[i]` along each dimension `i`.
///
/// `None` keeps a dimension whole; negative stops count from the end. Offset
/// and strides are unchanged.
///
/// # Errors
/// - [`NdarrayError::Index`] if `stop.len() != x.ndims()`
/// - [`NdarrayError::SliceOutOfBounds`] under `strict` for a stop outside
///   `[-extent, extent]`
pub fn slice_to<T: Element>(
    x: &Ndarray<T>,
    stop: &[Option<isize>],
    strict: bool,
    writable: bool,
) -> Result<Ndarray<T>> {
    slice_bounded(x, stop, Bound::Stop, strict, writable)
}

fn single_dim_args(x_ndims: usize, dim: isize, value: isize) -> Result<Vec<Option<isize>>> {
    let d = normalize_dim(dim, x_ndims)?;
    let mut args = vec![None; x_ndims];
    args[d] = Some(value);
    Ok(args)
}

/// [`slice_from`] along a single dimension. `dim` may be negative.
pub fn slice_dimension_from<T: Element>(
    x: &Ndarray<T>,
    dim: isize,
    start: isize,
    strict: bool,
    writable: bool,
) -> Result<Ndarray<T>> {
    let args = single_dim_args(x.ndims(), dim, start)?;
    slice_bounded(x, &args, Bound::Start, strict, writable)
}

/// [`slice_to`] along a single dimension. `dim` may be negative.
pub fn slice_dimension_to<T: Element>(
    x: &Ndarray<T>,
    dim: isize,
    stop: isize,
    strict: bool,
    writable: bool,
) -> Result<Ndarray<T>> {
    let args = single_dim_args(x.ndims(), dim, stop)?;
    slice_bounded(x, &args, Bound::Stop, strict, writable)
}

// ============================================================================
// Assignment
// ============================================================================

/// Write `src` into the view of `dst` selected by `args`.
///
/// `src` is broadcast to the view's shape: dimensions are aligned from the
/// right and a source extent of one repeats along the target dimension. Every
/// source element is read before the first write, so `src` may alias `dst`.
///
/// # Errors
/// - Any error of [`slice`] for `args`
/// - [`NdarrayError::ReadOnly`] if `dst` is read-only
/// - [`NdarrayError::BroadcastMismatch`] if `src` cannot be broadcast
pub fn slice_assign<T: Element>(
    src: &Ndarray<T>,
    dst: &Ndarray<T>,
    args: &[SliceArg],
    strict: bool,
) -> Result<()> {
    let view = slice(dst, args, strict, true)?;
    if view.is_readonly() {
        return Err(NdarrayError::ReadOnly);
    }
    let shape = view.shape();
    let src_shape = src.shape();
    let mismatch = || NdarrayError::BroadcastMismatch {
        shape: src_shape.to_vec(),
        target: shape.to_vec(),
    };
    let lead = shape.len().checked_sub(src_shape.len()).ok_or_else(mismatch)?;
    let incompatible = src_shape
        .iter()
        .zip(&shape[lead..])
        .any(|(&s, &t)| s != 1 && s != t);
    if incompatible {
        return Err(mismatch());
    }
    if view.is_empty() {
        return Ok(());
    }

    let count = checked_numel(shape).ok_or(IndexError::LengthOverflow)?;
    let order = view.order();
    let dim = match order {
        Order::RowMajor => -1,
        Order::ColumnMajor => 0,
    };
    let mut subs: SmallVec<[usize; 8]> = SmallVec::from_elem(0, shape.len());
    let mut src_subs: SmallVec<[isize; 8]> = SmallVec::from_elem(0, src_shape.len());
    let mut pending = Vec::with_capacity(count);
    for k in 0..count {
        for (j, &extent) in src_shape.iter().enumerate() {
            src_subs[j] = if extent == 1 { 0 } else { subs[lead + j] as isize };
        }
        let at: SmallVec<[isize; 8]> = subs.iter().map(|&s| s as isize).collect();
        pending.push((at, src.get(&src_subs)?));
        if k + 1 < count {
            let current = subs.clone();
            if next_cartesian_index_assign(shape, order, &current, dim, &mut subs).is_none() {
                break;
            }
        }
    }
    for (at, value) in pending {
        view.set(&at, value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Buffer, DType, NdarrayOptions, Order};

    fn matrix() -> Ndarray<f64> {
        Ndarray::from_vec(
            DType::Float64,
            vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
            &[3, 2],
            Order::RowMajor,
        )
        .unwrap()
    }

    #[test]
    fn test_slice_from_rows() {
        let x = matrix();
        let y = slice_from(&x, &[Some(1), None], false, false).unwrap();
        assert_eq!(y.shape(), &[2, 2]);
        assert_eq!(y.strides(), &[2, 1]);
        assert_eq!(y.offset(), 2);
        assert_eq!(y.to_vec(), vec![3.0, 4.0, 5.0, 6.0]);
        assert_eq!(y.get(&[0, 0]).unwrap(), 3.0);
        assert!(y.is_readonly());
        assert!(y.data().shares_with(x.data()));
    }

    #[test]
    fn test_slice_to_rows() {
        let x = matrix();
        let y = slice_to(&x, &[Some(2), None], false, false).unwrap();
        assert_eq!(y.shape(), &[2, 2]);
        assert_eq!(y.offset(), 0);
        assert_eq!(y.to_vec(), vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_negative_arguments() {
        let x = matrix();
        let y = slice_from(&x, &[Some(-1), Some(-1)], true, false).unwrap();
        assert_eq!(y.shape(), &[1, 1]);
        assert_eq!(y.get(&[0, 0]).unwrap(), 6.0);
        let z = slice_to(&x, &[Some(-1), Some(-1)], true, false).unwrap();
        assert_eq!(z.shape(), &[2, 1]);
        assert_eq!(z.to_vec(), vec![1.0, 3.0]);
    }

    #[test]
    fn test_strict_bounds() {
        let x = matrix();
        assert!(matches!(
            slice_from(&x, &[Some(3), None], true, false),
            Err(NdarrayError::SliceOutOfBounds {
                dim: 0,
                index: 3,
                extent: 3
            })
        ));
        assert!(slice_from(&x, &[None, Some(-3)], true, false).is_err());
        assert!(slice_to(&x, &[Some(4), None], true, false).is_err());
        // a stop equal to the extent is in range
        assert_eq!(
            slice_to(&x, &[Some(3), None], true, false).unwrap().shape(),
            &[3, 2]
        );
    }

    #[test]
    fn test_non_strict_clamps() {
        let x = matrix();
        let y = slice_from(&x, &[Some(10), None], false, false).unwrap();
        assert_eq!(y.shape(), &[0, 2]);
        assert!(y.is_empty());
        assert_eq!(y.offset(), x.offset());
        let z = slice_from(&x, &[Some(-10), None], false, false).unwrap();
        assert_eq!(z.shape(), &[3, 2]);
        let w = slice_to(&x, &[Some(-10), Some(10)], false, false).unwrap();
        assert_eq!(w.shape(), &[0, 2]);
    }

    #[test]
    fn test_argument_count() {
        let x = matrix();
        assert!(matches!(
            slice_from(&x, &[Some(1)], false, false),
            Err(NdarrayError::Index(IndexError::RankMismatch(2, 1)))
        ));
        assert!(slice_to(&x, &[None, None, None], false, false).is_err());
    }

    #[test]
    fn test_writable_slice_mutates_parent() {
        let x = matrix();
        let y = slice_from(&x, &[Some(1), Some(1)], false, true).unwrap();
        assert!(!y.is_readonly());
        y.set(&[1, 0], 60.0).unwrap();
        assert_eq!(x.get(&[2, 1]).unwrap(), 60.0);
        let ro = slice_from(&x, &[Some(1), None], false, false).unwrap();
        assert!(matches!(ro.set(&[0, 0], 0.0), Err(NdarrayError::ReadOnly)));
        assert_eq!(x.get(&[1, 0]).unwrap(), 3.0);
    }

    #[test]
    fn test_readonly_source_stays_readonly() {
        let x = Ndarray::new(
            DType::Float64,
            Buffer::from_vec(vec![1.0, 2.0, 3.0, 4.0]),
            &[2, 2],
            &[2, 1],
            0,
            Order::RowMajor,
            NdarrayOptions::new().readonly(true),
        )
        .unwrap();
        let y = slice_to(&x, &[None, Some(1)], false, true).unwrap();
        assert!(y.is_readonly());
    }

    #[test]
    fn test_preserves_modes_and_order() {
        let x = Ndarray::new(
            DType::Float64,
            Buffer::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]),
            &[2, 3],
            &[1, 2],
            0,
            Order::ColumnMajor,
            NdarrayOptions::new()
                .mode(crate::IndexMode::Wrap)
                .submode(vec![crate::IndexMode::Clamp]),
        )
        .unwrap();
        let y = slice_from(&x, &[None, Some(1)], false, true).unwrap();
        assert_eq!(y.order(), Order::ColumnMajor);
        assert_eq!(y.mode(), crate::IndexMode::Wrap);
        assert_eq!(y.submode(), &[crate::IndexMode::Clamp]);
        assert_eq!(y.offset(), 2);
        assert_eq!(y.to_vec(), vec![3.0, 4.0, 5.0, 6.0]);
        assert_eq!(y.get(&[5, 5]).unwrap(), 6.0);
    }

    #[test]
    fn test_negative_strides() {
        // rows reversed
        let x = Ndarray::new(
            DType::Float64,
            Buffer::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]),
            &[3, 2],
            &[-2, 1],
            4,
            Order::RowMajor,
            NdarrayOptions::default(),
        )
        .unwrap();
        let y = slice_from(&x, &[Some(1), None], true, false).unwrap();
        assert_eq!(y.offset(), 2);
        assert_eq!(y.to_vec(), vec![3.0, 4.0, 1.0, 2.0]);
    }

    #[test]
    fn test_slice_dimension() {
        let x = matrix();
        let y = slice_dimension_from(&x, -1, 1, true, false).unwrap();
        assert_eq!(y.shape(), &[3, 1]);
        assert_eq!(y.to_vec(), vec![2.0, 4.0, 6.0]);
        let z = slice_dimension_to(&x, 0, 1, true, false).unwrap();
        assert_eq!(z.to_vec(), vec![1.0, 2.0]);
        assert!(matches!(
            slice_dimension_from(&x, 2, 0, true, false),
            Err(NdarrayError::InvalidDimension { dim: 2, ndims: 2 })
        ));
        assert!(slice_dimension_to(&x, -3, 0, true, false).is_err());
    }

    #[test]
    fn test_zero_dimensional() {
        let x = Ndarray::new(
            DType::Float64,
            Buffer::from_vec(vec![7.0]),
            &[],
            &[0],
            0,
            Order::RowMajor,
            NdarrayOptions::default(),
        )
        .unwrap();
        let y = slice_from(&x, &[], true, true).unwrap();
        assert_eq!(y.ndims(), 0);
        assert_eq!(y.get(&[]).unwrap(), 7.0);
        assert!(slice_dimension_from(&x, 0, 0, true, true).is_err());
    }

    fn range(start: Option<isize>, stop: Option<isize>, step: isize) -> SliceArg {
        SliceArg::Range(Slice::new(start, stop, step).unwrap())
    }

    fn vector(n: i32) -> Ndarray<i32> {
        Ndarray::from_vec(DType::Int32, (0..n).collect(), &[n as usize], Order::RowMajor).unwrap()
    }

    #[test]
    fn test_slice_negative_steps() {
        let x = matrix();
        let y = slice(&x, &[range(None, None, -2), range(None, None, -1)], true, false).unwrap();
        assert_eq!(y.shape(), &[2, 2]);
        assert_eq!(y.strides(), &[-4, -1]);
        assert_eq!(y.offset(), 5);
        assert_eq!(y.to_vec(), vec![6.0, 5.0, 2.0, 1.0]);
        assert!(y.data().shares_with(x.data()));
    }

    #[test]
    fn test_slice_steps() {
        let x = vector(10);
        let y = slice(&x, &[range(Some(1), Some(8), 3)], true, false).unwrap();
        assert_eq!(y.to_vec(), vec![1, 4, 7]);
        let y = slice(&x, &[range(Some(-2), None, -3)], true, false).unwrap();
        assert_eq!(y.to_vec(), vec![8, 5, 2]);
        let y = slice(&x, &[range(Some(7), Some(2), -2)], true, false).unwrap();
        assert_eq!(y.to_vec(), vec![7, 5, 3]);
        // step pointing away from stop
        let y = slice(&x, &[range(Some(2), Some(7), -1)], true, false).unwrap();
        assert_eq!(y.shape(), &[0]);
        assert_eq!(y.offset(), x.offset());
    }

    #[test]
    fn test_slice_zero_step() {
        assert_eq!(Slice::new(None, None, 0), Err(NdarrayError::ZeroSliceStep));
        assert_eq!(Slice::default(), Slice::full());
        let s = Slice::range(1, 3);
        assert_eq!((s.start(), s.stop(), s.step()), (Some(1), Some(3), 1));
    }

    #[test]
    fn test_slice_index_drops_dimension() {
        let x = matrix();
        let row = slice(&x, &[SliceArg::Index(1), SliceArg::Full], true, false).unwrap();
        assert_eq!(row.shape(), &[2]);
        assert_eq!(row.to_vec(), vec![3.0, 4.0]);
        let col = slice(&x, &[SliceArg::Full, SliceArg::Index(-1)], true, false).unwrap();
        assert_eq!(col.shape(), &[3]);
        assert_eq!(col.strides(), &[2]);
        assert_eq!(col.to_vec(), vec![2.0, 4.0, 6.0]);

        let scalar = slice(&x, &[2.into(), 0.into()], true, false).unwrap();
        assert_eq!(scalar.ndims(), 0);
        assert_eq!(scalar.strides(), &[0]);
        assert_eq!(scalar.get(&[]).unwrap(), 5.0);
    }

    #[test]
    fn test_slice_index_always_checked() {
        let x = matrix();
        for strict in [true, false] {
            assert!(matches!(
                slice(&x, &[SliceArg::Index(3), SliceArg::Full], strict, false),
                Err(NdarrayError::SliceOutOfBounds { dim: 0, index: 3, .. })
            ));
            assert!(slice(&x, &[SliceArg::Full, SliceArg::Index(-3)], strict, false).is_err());
        }
    }

    #[test]
    fn test_slice_range_bounds() {
        let x = vector(3);
        assert!(slice(&x, &[range(Some(4), None, 1)], true, false).is_err());
        assert!(slice(&x, &[range(Some(3), None, -1)], true, false).is_err());
        assert!(slice(&x, &[range(None, Some(-4), 1)], true, false).is_err());

        let y = slice(&x, &[range(Some(4), None, 1)], false, false).unwrap();
        assert!(y.is_empty());
        let y = slice(&x, &[range(Some(10), None, -1)], false, false).unwrap();
        assert_eq!(y.to_vec(), vec![2, 1, 0]);
        let y = slice(&x, &[range(Some(-10), Some(10), 1)], false, false).unwrap();
        assert_eq!(y.to_vec(), vec![0, 1, 2]);
    }

    #[test]
    fn test_slice_writable_reversed_view() {
        let x = vector(4);
        let y = slice(&x, &[range(None, None, -1)], true, true).unwrap();
        assert!(!y.is_readonly());
        y.set(&[0], 30).unwrap();
        assert_eq!(x.get(&[3]).unwrap(), 30);
        assert!(matches!(
            slice(&x, &[SliceArg::Full, SliceArg::Full], true, true),
            Err(NdarrayError::Index(IndexError::RankMismatch(1, 2)))
        ));
    }

    #[test]
    fn test_slice_assign_broadcasts_rows() {
        let dst = Ndarray::<i32>::zeros(DType::Int32, &[3, 3], Order::RowMajor).unwrap();
        let src = Ndarray::from_vec(DType::Int32, vec![1, 2, 3], &[3], Order::RowMajor).unwrap();
        slice_assign(&src, &dst, &[range(Some(0), Some(2), 1), SliceArg::Full], true).unwrap();
        assert_eq!(dst.to_vec(), vec![1, 2, 3, 1, 2, 3, 0, 0, 0]);

        let nine = Ndarray::from_vec(DType::Int32, vec![9], &[], Order::RowMajor).unwrap();
        slice_assign(&nine, &dst, &[SliceArg::Full, range(None, None, 2)], true).unwrap();
        assert_eq!(dst.to_vec(), vec![9, 2, 9, 9, 2, 9, 9, 0, 9]);

        let column =
            Ndarray::from_vec(DType::Int32, vec![4, 5, 6], &[3, 1], Order::RowMajor).unwrap();
        slice_assign(&column, &dst, &[SliceArg::Full, range(Some(1), Some(3), 1)], true).unwrap();
        assert_eq!(dst.to_vec(), vec![9, 4, 4, 9, 5, 5, 9, 6, 6]);
    }

    #[test]
    fn test_slice_assign_errors() {
        let dst = Ndarray::<i32>::zeros(DType::Int32, &[2, 3], Order::RowMajor).unwrap();
        let src = Ndarray::from_vec(DType::Int32, vec![1, 2], &[2], Order::RowMajor).unwrap();
        assert_eq!(
            slice_assign(&src, &dst, &[SliceArg::Full, SliceArg::Full], true),
            Err(NdarrayError::BroadcastMismatch {
                shape: vec![2],
                target: vec![2, 3]
            })
        );
        let row = slice(&dst, &[SliceArg::Index(0), SliceArg::Full], true, true).unwrap();
        assert!(matches!(
            slice_assign(&dst, &row, &[SliceArg::Full], true),
            Err(NdarrayError::BroadcastMismatch { .. })
        ));
        let frozen = slice(&dst, &[SliceArg::Index(0), SliceArg::Full], true, false).unwrap();
        assert_eq!(
            slice_assign(&src, &frozen, &[range(None, Some(2), 1)], true),
            Err(NdarrayError::ReadOnly)
        );
        assert!(dst.to_vec().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_slice_assign_aliasing_source() {
        let x = vector(5);
        let reversed = slice(&x, &[range(None, None, -1)], true, false).unwrap();
        slice_assign(&reversed, &x, &[SliceArg::Full], true).unwrap();
        assert_eq!(x.to_vec(), vec![4, 3, 2, 1, 0]);
    }

    #[test]
    fn test_slice_assign_column_major() {
        let dst = Ndarray::<i32>::zeros(DType::Int32, &[2, 2], Order::ColumnMajor).unwrap();
        let src =
            Ndarray::from_vec(DType::Int32, vec![1, 2, 3, 4], &[2, 2], Order::RowMajor).unwrap();
        slice_assign(&src, &dst, &[SliceArg::Full, SliceArg::Full], true).unwrap();
        assert_eq!(dst.get(&[0, 1]).unwrap(), 2);
        assert_eq!(dst.get(&[1, 0]).unwrap(), 3);
        // empty selection is a no-op
        let row = Ndarray::from_vec(DType::Int32, vec![7, 8], &[2], Order::RowMajor).unwrap();
        slice_assign(&row, &dst, &[range(Some(1), Some(1), 1), SliceArg::Full], true).unwrap();
        assert_eq!(dst.to_vec(), vec![1, 3, 2, 4]);
    }
}
