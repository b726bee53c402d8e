//! Device-agnostic index arithmetic for strided n-dimensional arrays.
//!
//! Everything in this crate operates on array *metadata* only (shape, strides,
//! offset, order) and never touches element data.
//!
//! # Core Items
//!
//! - [`Order`]: row-major (C) or column-major (Fortran) iteration order
//! - [`IndexMode`] and [`ind`]: resolve a possibly out-of-range index into bounds
//! - [`vind2bind`] / [`bind2vind`]: convert between view linear indices and
//!   buffer indices
//! - [`sub2ind`] / [`ind2sub`]: convert between subscripts and buffer indices
//! - [`next_cartesian_index`]: step a subscript tuple in iteration order
//!
//! # Example
//!
//! ```rust
//! use strided_index::{vind2bind, IndexMode, Order};
//!
//! // 2x2 row-major view whose first dimension runs backwards through the buffer
//! let idx = vind2bind(&[2, 2], &[-2, 1], 2, Order::RowMajor, 2, IndexMode::Throw).unwrap();
//! assert_eq!(idx, 0);
//! ```

mod cartesian;
mod linear;
mod mode;
mod order;
mod validate;

pub use cartesian::{next_cartesian_index, next_cartesian_index_assign};
pub use linear::{bind2vind, checked_numel, ind2sub, ind2sub_into, numel, sub2ind, vind2bind};
pub use mode::{ind, is_index_mode, IndexMode};
pub use order::{is_order, shape_to_strides, strides_to_order, Order};
pub use validate::{
    is_buffer_length_compatible, is_column_major_contiguous, is_row_major_contiguous,
    minmax_view_buffer_index, validate_strides,
};

// ============================================================================
// Error types
// ============================================================================

/// Errors that can occur during index arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IndexError {
    /// Index lies outside `[-(max+1), max]` under `throw` mode.
    #[error("index {index} out of bounds for maximum index {max}")]
    OutOfBounds { index: isize, max: usize },

    /// A dimension (or the whole view) has no elements to index.
    #[error("cannot index into an empty extent")]
    EmptyExtent,

    /// Number of subscripts does not match the number of dimensions.
    #[error("rank mismatch: expected {0} indices, got {1}")]
    RankMismatch(usize, usize),

    /// Stride array length doesn't match dimensions.
    #[error("stride and shape length mismatch: {strides} strides for {ndims} dimensions")]
    StrideLengthMismatch { ndims: usize, strides: usize },

    /// Zero-dimensional arrays require exactly one stride equal to zero.
    #[error("zero-dimensional arrays require strides [0], got {0:?}")]
    ZeroDimStrides(Vec<isize>),

    /// Integer overflow (or underflow below zero) while computing a buffer offset.
    #[error("offset overflow while computing buffer index")]
    OffsetOverflow,

    /// The number of elements in a view does not fit in `usize`.
    #[error("number of elements overflows usize")]
    LengthOverflow,

    /// A buffer index which no subscript tuple of the view reaches.
    #[error("buffer index {0} is not reachable from the view")]
    Unreachable(usize),

    /// Unrecognized order string.
    #[error("invalid order `{0}`, expected `row-major` or `column-major`")]
    InvalidOrder(String),

    /// Unrecognized index mode string.
    #[error("invalid index mode `{0}`, expected `throw`, `clamp` or `wrap`")]
    InvalidMode(String),

    /// The list of per-dimension modes is empty.
    #[error("at least one index mode is required")]
    EmptyModes,
}

/// Result type for index arithmetic.
pub type Result<T> = std::result::Result<T, IndexError>;
