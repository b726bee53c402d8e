//! The ndarray container: a strided, n-dimensional view over a shared buffer.
//!
//! An [`Ndarray`] owns its metadata (shape, strides, offset, order, index modes)
//! and shares its element storage. Element access resolves indices through
//! the per-dimension [`IndexMode`]s, so out-of-range indices either fail or are
//! clamped/wrapped depending on how the array was constructed.

use std::fmt;
use std::sync::Arc;

use num_traits::Zero;
use smallvec::SmallVec;

use crate::buffer::Buffer;
use crate::config::{trace_enabled, NdarrayOptions};
use crate::dtype::{ensure_compatible, DType, Element};
use crate::{
    checked_numel, is_buffer_length_compatible, is_column_major_contiguous,
    is_row_major_contiguous, next_cartesian_index_assign, numel, shape_to_strides, sub2ind,
    validate_strides, vind2bind, IndexError, IndexMode, NdarrayError, Order, Result,
};

/// Contiguity and writability flags of an ndarray.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flags {
    /// Elements are laid out contiguously in row-major order.
    pub row_major_contiguous: bool,
    /// Elements are laid out contiguously in column-major order.
    pub column_major_contiguous: bool,
    /// Writes are refused.
    pub readonly: bool,
}

/// A strided n-dimensional array view.
///
/// Cloning an `Ndarray` produces another view of the same buffer.
///
/// # Example
/// ```rust
/// use strided_ndarray::{Buffer, DType, Ndarray, NdarrayOptions, Order};
///
/// let buffer = Buffer::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
/// let x = Ndarray::new(
///     DType::Float64,
///     buffer,
///     &[3, 2],
///     &[2, 1],
///     0,
///     Order::RowMajor,
///     NdarrayOptions::default(),
/// )
/// .unwrap();
///
/// assert_eq!(x.get(&[1, 1]).unwrap(), 4.0);
/// assert_eq!(x.get(&[-1, 0]).unwrap(), 5.0);
/// x.set(&[0, 0], 10.0).unwrap();
/// assert_eq!(x.iget(0).unwrap(), 10.0);
/// ```
pub struct Ndarray<T> {
    dtype: DType,
    buffer: Buffer<T>,
    shape: Arc<[usize]>,
    strides: Arc<[isize]>,
    offset: usize,
    order: Order,
    mode: IndexMode,
    submode: Arc<[IndexMode]>,
    readonly: bool,
}

impl<T> Clone for Ndarray<T> {
    fn clone(&self) -> Self {
        Self {
            dtype: self.dtype,
            buffer: self.buffer.clone(),
            shape: self.shape.clone(),
            strides: self.strides.clone(),
            offset: self.offset,
            order: self.order,
            mode: self.mode,
            submode: self.submode.clone(),
            readonly: self.readonly,
        }
    }
}

impl<T> fmt::Debug for Ndarray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ndarray")
            .field("dtype", &self.dtype)
            .field("shape", &self.shape)
            .field("strides", &self.strides)
            .field("offset", &self.offset)
            .field("order", &self.order)
            .field("mode", &self.mode)
            .field("submode", &self.submode)
            .field("readonly", &self.readonly)
            .finish()
    }
}

impl<T: Element> Ndarray<T> {
    /// Create an ndarray over `buffer`.
    ///
    /// Validation happens in this order and stops at the first failure:
    /// dtype against the element type, strides against shape, buffer length
    /// against shape/strides/offset, then options.
    ///
    /// `shape` and `strides` are copied; the buffer is shared.
    ///
    /// # Errors
    /// - [`NdarrayError::DTypeMismatch`] if `T` cannot carry `dtype`
    /// - [`NdarrayError::Index`] for malformed strides
    /// - [`NdarrayError::IncompatibleBuffer`] if the buffer is too small
    /// - [`NdarrayError::EmptySubmode`] for an empty `submode` option
    pub fn new(
        dtype: DType,
        buffer: Buffer<T>,
        shape: &[usize],
        strides: &[isize],
        offset: usize,
        order: Order,
        options: NdarrayOptions,
    ) -> Result<Self> {
        ensure_compatible::<T>(dtype)?;
        validate_strides(shape, strides)?;
        let len = buffer.len();
        if !is_buffer_length_compatible(len, shape, strides, offset) {
            return Err(NdarrayError::IncompatibleBuffer {
                len,
                shape: shape.to_vec(),
                strides: strides.to_vec(),
                offset,
            });
        }
        let submode = options.get_submode();
        if submode.is_empty() {
            return Err(NdarrayError::EmptySubmode);
        }
        if submode.len() > 1 && submode.len() != shape.len() {
            log::debug!(
                "submode of length {} applied cyclically over {} dimensions",
                submode.len(),
                shape.len()
            );
        }
        if trace_enabled() {
            log::trace!(
                "ndarray: dtype={dtype} shape={shape:?} strides={strides:?} \
                 offset={offset} order={order} buffer_len={len}"
            );
        }
        Ok(Self {
            dtype,
            buffer,
            shape: Arc::from(shape),
            strides: Arc::from(strides),
            offset,
            order,
            mode: options.get_mode(),
            submode: Arc::from(submode),
            readonly: options.is_readonly(),
        })
    }

    /// Create a contiguous ndarray taking ownership of `data`.
    ///
    /// # Errors
    /// Fails as [`Ndarray::new`] does, e.g. when `data.len()` is smaller than
    /// the number of elements implied by `shape`.
    pub fn from_vec(dtype: DType, data: Vec<T>, shape: &[usize], order: Order) -> Result<Self> {
        let strides = shape_to_strides(shape, order)?;
        Self::new(
            dtype,
            Buffer::from_vec(data),
            shape,
            &strides,
            0,
            order,
            NdarrayOptions::default(),
        )
    }

    /// Create a contiguous zero-filled ndarray.
    ///
    /// # Errors
    /// Returns [`IndexError::LengthOverflow`] if the element count does not fit in `usize`.
    pub fn zeros(dtype: DType, shape: &[usize], order: Order) -> Result<Self>
    where
        T: Zero,
    {
        Self::filled(dtype, shape, order, T::zero())
    }

    /// Contiguous ndarray with every element set to `value`.
    pub(crate) fn filled(dtype: DType, shape: &[usize], order: Order, value: T) -> Result<Self> {
        let len = checked_numel(shape).ok_or(IndexError::LengthOverflow)?;
        Self::from_vec(dtype, vec![value; len], shape, order)
    }

    /// New view over the same buffer with replaced geometry.
    ///
    /// Mode and submode carry over; the buffer is shared, never copied.
    pub(crate) fn derive(
        &self,
        shape: &[usize],
        strides: &[isize],
        offset: usize,
        readonly: bool,
    ) -> Result<Self> {
        let options = NdarrayOptions::new()
            .mode(self.mode)
            .submode(self.submode.to_vec())
            .readonly(readonly);
        Self::new(
            self.dtype,
            self.buffer.clone(),
            shape,
            strides,
            offset,
            self.order,
            options,
        )
    }
}

impl<T> Ndarray<T> {
    #[inline]
    pub fn dtype(&self) -> DType {
        self.dtype
    }

    /// The shared underlying buffer.
    #[inline]
    pub fn data(&self) -> &Buffer<T> {
        &self.buffer
    }

    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Strides in elements. Zero-dimensional arrays report `[0]`.
    #[inline]
    pub fn strides(&self) -> &[isize] {
        &self.strides
    }

    /// Buffer index of the first logical element.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub fn order(&self) -> Order {
        self.order
    }

    #[inline]
    pub fn ndims(&self) -> usize {
        self.shape.len()
    }

    /// Number of elements.
    ///
    /// Saturates at `usize::MAX` for broadcast views (zero strides) whose
    /// element count does not fit in `usize`.
    #[inline]
    pub fn len(&self) -> usize {
        numel(&self.shape)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.shape.contains(&0)
    }

    /// Size of the viewed elements in bytes.
    ///
    /// `None` for `generic` arrays and when the size does not fit in `usize`.
    pub fn byte_length(&self) -> Option<usize> {
        let size = self.dtype.byte_size()?;
        checked_numel(&self.shape)?.checked_mul(size)
    }

    /// Bounds handling for linear indices.
    #[inline]
    pub fn mode(&self) -> IndexMode {
        self.mode
    }

    /// Bounds handling for subscripts, one entry per dimension (cyclic).
    #[inline]
    pub fn submode(&self) -> &[IndexMode] {
        &self.submode
    }

    #[inline]
    pub fn is_readonly(&self) -> bool {
        self.readonly
    }

    pub fn flags(&self) -> Flags {
        Flags {
            row_major_contiguous: is_row_major_contiguous(&self.shape, &self.strides),
            column_major_contiguous: is_column_major_contiguous(&self.shape, &self.strides),
            readonly: self.readonly,
        }
    }

    fn ensure_writable(&self) -> Result<()> {
        if self.readonly {
            return Err(NdarrayError::ReadOnly);
        }
        Ok(())
    }

    /// Buffer index of a resolved subscript tuple.
    #[inline]
    fn address(&self, subs: &[usize]) -> usize {
        let mut pos = self.offset as isize;
        for (&s, &stride) in subs.iter().zip(self.strides.iter()) {
            pos += s as isize * stride;
        }
        pos as usize
    }
}

impl<T: Clone> Ndarray<T> {
    #[inline]
    fn read_at(&self, index: usize) -> Result<T> {
        self.buffer.read(index).ok_or(NdarrayError::BufferIndex {
            index,
            len: self.buffer.len(),
        })
    }

    /// Element at the given subscripts.
    ///
    /// Exactly [`ndims`](Ndarray::ndims) indices are required (none for a
    /// zero-dimensional array). Index `i` is resolved with
    /// `submode[i % submode.len()]`.
    ///
    /// # Errors
    /// - [`NdarrayError::Index`] with `RankMismatch` for a wrong index count
    /// - [`NdarrayError::Index`] with `OutOfBounds` under `throw` mode
    pub fn get(&self, indices: &[isize]) -> Result<T> {
        let idx = sub2ind(&self.shape, &self.strides, self.offset, indices, &self.submode)?;
        self.read_at(idx)
    }

    /// Store `value` at the given subscripts.
    ///
    /// # Errors
    /// As [`get`](Ndarray::get), plus [`NdarrayError::ReadOnly`].
    pub fn set(&self, indices: &[isize], value: T) -> Result<&Self> {
        self.ensure_writable()?;
        let idx = sub2ind(&self.shape, &self.strides, self.offset, indices, &self.submode)?;
        self.buffer.write(idx, value)?;
        Ok(self)
    }

    /// Element at a linear index in iteration [`order`](Ndarray::order),
    /// resolved with [`mode`](Ndarray::mode).
    pub fn iget(&self, idx: isize) -> Result<T> {
        let b = vind2bind(
            &self.shape,
            &self.strides,
            self.offset,
            self.order,
            idx,
            self.mode,
        )?;
        self.read_at(b)
    }

    /// Store `value` at a linear index in iteration order.
    pub fn iset(&self, idx: isize, value: T) -> Result<&Self> {
        self.ensure_writable()?;
        let b = vind2bind(
            &self.shape,
            &self.strides,
            self.offset,
            self.order,
            idx,
            self.mode,
        )?;
        self.buffer.write(b, value)?;
        Ok(self)
    }

    /// Iterate over elements in iteration order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            array: self,
            subs: SmallVec::from_elem(0, self.ndims()),
            remaining: self.len(),
        }
    }

    /// Copy the viewed elements out in iteration order.
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().collect()
    }
}

/// Iterator over the elements of an [`Ndarray`] in its iteration order.
pub struct Iter<'a, T> {
    array: &'a Ndarray<T>,
    subs: SmallVec<[usize; 8]>,
    remaining: usize,
}

impl<T: Clone> Iterator for Iter<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let value = self.array.buffer.read(self.array.address(&self.subs))?;
        if self.remaining > 0 {
            let dim = match self.array.order {
                Order::RowMajor => -1,
                Order::ColumnMajor => 0,
            };
            let current = self.subs.clone();
            next_cartesian_index_assign(
                &self.array.shape,
                self.array.order,
                &current,
                dim,
                &mut self.subs,
            )?;
        }
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T: Clone> ExactSizeIterator for Iter<'_, T> {}

impl<T: Clone + fmt::Debug> fmt::Display for Ndarray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ndarray('{}', {:?}, shape={:?}, strides={:?}, offset={}, order='{}')",
            self.dtype,
            self.to_vec(),
            self.shape,
            self.strides,
            self.offset,
            self.order
        )
    }
}
