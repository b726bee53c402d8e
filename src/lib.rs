//! Strided n-dimensional array views over shared buffers.
//!
//! An [`Ndarray`] is a view described by a data type, a shared [`Buffer`],
//! a shape, per-dimension strides, a starting offset and an iteration
//! [`Order`]. Elements are reached either by subscripts ([`Ndarray::get`] /
//! [`Ndarray::set`]) or by a linear index in iteration order
//! ([`Ndarray::iget`] / [`Ndarray::iset`]). Out-of-range indices are handled
//! according to the array's [`IndexMode`]s.
//!
//! # Core Types
//!
//! - [`Ndarray`]: the strided view, with [`NdarrayOptions`] for index modes and
//!   read-only views
//! - [`Buffer`]: shared element storage, either a plain vector or an
//!   [`Accessor`] such as [`ComplexBuffer`]
//! - [`DType`] and the [`Element`] trait: data type tags
//!
//! # View Transformers
//!
//! - [`slice`]: general per-dimension selection with [`Slice`] ranges
//!   (including negative steps) and dimension-dropping indices
//! - [`slice_from`], [`slice_dimension_from`]: drop leading elements
//! - [`slice_to`], [`slice_dimension_to`]: drop trailing elements
//! - [`slice_assign`]: write an array into a selected view, broadcasting
//!
//! [`zeros_like`] and [`empty_like`] allocate a fresh contiguous array with
//! the dtype, shape and order of an existing one.
//!
//! Index arithmetic on bare metadata lives in the `strided-index` crate and is
//! re-exported here.
//!
//! # Example
//!
//! ```rust
//! use strided_ndarray::{slice_from, DType, Ndarray, Order};
//!
//! let x = Ndarray::from_vec(
//!     DType::Float64,
//!     vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
//!     &[3, 2],
//!     Order::RowMajor,
//! )
//! .unwrap();
//! assert_eq!(x.get(&[2, 1]).unwrap(), 6.0);
//!
//! // zero-copy view of the last two rows, writable
//! let tail = slice_from(&x, &[Some(1), None], false, true).unwrap();
//! tail.set(&[0, 0], 30.0).unwrap();
//! assert_eq!(x.get(&[1, 0]).unwrap(), 30.0);
//! ```
//!
//! # Tracing
//!
//! Construction and view derivation emit [`log`] records. Metadata-heavy
//! `trace` records are only produced with `STRIDED_ND_TRACE=1` set.

pub mod buffer;
pub mod config;
mod create;
pub mod dtype;
mod ndarray;
mod slice;

pub use buffer::{Accessor, Buffer, Complex128Buffer, Complex64Buffer, ComplexBuffer};
pub use config::{trace_enabled, NdarrayOptions, TRACE_ENV};
pub use create::{empty_like, zeros_like};
pub use dtype::{is_dtype, DType, Element};
pub use ndarray::{Flags, Iter, Ndarray};
pub use slice::{
    slice, slice_assign, slice_dimension_from, slice_dimension_to, slice_from, slice_to, Slice,
    SliceArg,
};

pub use strided_index::{
    bind2vind, checked_numel, ind, ind2sub, ind2sub_into, is_buffer_length_compatible,
    is_column_major_contiguous, is_index_mode, is_order, is_row_major_contiguous,
    minmax_view_buffer_index, next_cartesian_index, next_cartesian_index_assign, numel,
    shape_to_strides, strides_to_order, sub2ind, validate_strides, vind2bind, IndexError,
    IndexMode, Order,
};

// ============================================================================
// Error types
// ============================================================================

/// Errors that can occur when building or accessing an ndarray.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NdarrayError {
    /// Index arithmetic failed.
    #[error(transparent)]
    Index(#[from] IndexError),

    /// Unrecognized dtype string.
    #[error("invalid dtype `{0}`")]
    InvalidDType(String),

    /// The element type cannot be tagged with the requested dtype.
    #[error("dtype {dtype} is incompatible with element type of dtype {native}")]
    DTypeMismatch { dtype: DType, native: DType },

    /// The buffer does not cover every index reachable by the view.
    #[error(
        "buffer of length {len} is incompatible with shape {shape:?}, \
         strides {strides:?} and offset {offset}"
    )]
    IncompatibleBuffer {
        len: usize,
        shape: Vec<usize>,
        strides: Vec<isize>,
        offset: usize,
    },

    /// The list of per-dimension index modes is empty.
    #[error("submode must contain at least one index mode")]
    EmptySubmode,

    /// Write attempted through a read-only view.
    #[error("cannot write to a read-only array")]
    ReadOnly,

    /// Buffer index past the end of storage.
    #[error("buffer index {index} out of bounds for buffer of length {len}")]
    BufferIndex { index: usize, len: usize },

    /// Interleaved complex storage needs an even number of parts.
    #[error("interleaved complex storage requires an even length, got {0}")]
    OddInterleavedLength(usize),

    /// A slice argument lies outside the dimension under strict checking.
    #[error("slice index {index} out of bounds for dimension {dim} of extent {extent}")]
    SliceOutOfBounds {
        dim: usize,
        index: isize,
        extent: usize,
    },

    /// A slice step of zero.
    #[error("slice step cannot be zero")]
    ZeroSliceStep,

    /// An array cannot be broadcast to the target shape.
    #[error("cannot broadcast shape {shape:?} to shape {target:?}")]
    BroadcastMismatch {
        shape: Vec<usize>,
        target: Vec<usize>,
    },

    /// Dimension index outside `[-ndims, ndims-1]`.
    #[error("invalid dimension {dim} for {ndims}-dimensional array")]
    InvalidDimension { dim: isize, ndims: usize },
}

/// Result type for ndarray operations.
pub type Result<T> = std::result::Result<T, NdarrayError>;
