//! Shared element storage.
//!
//! An ndarray never owns its data exclusively: every view derived from it
//! holds a clone of the same [`Buffer`] handle, so writes through one view are
//! visible through all others. Storage comes in two flavours:
//!
//! - [`Buffer::Indexed`]: a plain `Vec<T>`, read and written directly
//! - [`Buffer::Accessor`]: any [`Accessor`] implementation, e.g. boxed or
//!   packed element representations such as [`ComplexBuffer`]

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use bytemuck::Pod;
use num_complex::Complex;
use num_traits::Zero;

use crate::{NdarrayError, Result};

#[inline]
fn read_lock<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

#[inline]
fn write_lock<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

/// Element access through `get`/`set` methods rather than direct indexing.
pub trait Accessor<T>: Send + Sync {
    /// Number of elements.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element at `index`, or `None` past the end.
    fn get(&self, index: usize) -> Option<T>;

    /// Store `value` at `index`. Returns false past the end.
    fn set(&self, index: usize, value: T) -> bool;
}

/// Shared handle to flat element storage.
///
/// Cloning a `Buffer` aliases the storage; it never copies elements.
pub enum Buffer<T> {
    /// Directly indexable storage.
    Indexed(Arc<RwLock<Vec<T>>>),
    /// Storage reached through an [`Accessor`].
    Accessor(Arc<dyn Accessor<T>>),
}

impl<T> Clone for Buffer<T> {
    fn clone(&self) -> Self {
        match self {
            Buffer::Indexed(data) => Buffer::Indexed(Arc::clone(data)),
            Buffer::Accessor(acc) => Buffer::Accessor(Arc::clone(acc)),
        }
    }
}

impl<T> fmt::Debug for Buffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.is_accessor() { "accessor" } else { "indexed" };
        f.debug_struct("Buffer")
            .field("kind", &kind)
            .field("len", &self.len())
            .finish()
    }
}

impl<T> From<Vec<T>> for Buffer<T> {
    fn from(data: Vec<T>) -> Self {
        Buffer::Indexed(Arc::new(RwLock::new(data)))
    }
}

impl<T> Buffer<T> {
    /// Wrap a vector as directly indexable storage.
    pub fn from_vec(data: Vec<T>) -> Self {
        data.into()
    }

    /// Wrap an accessor-style storage object.
    pub fn from_accessor<A: Accessor<T> + 'static>(accessor: A) -> Self {
        Buffer::Accessor(Arc::new(accessor))
    }

    #[inline]
    pub fn len(&self) -> usize {
        match self {
            Buffer::Indexed(data) => read_lock(data).len(),
            Buffer::Accessor(acc) => acc.len(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true for accessor-style storage.
    #[inline]
    pub fn is_accessor(&self) -> bool {
        matches!(self, Buffer::Accessor(_))
    }

    /// Returns true if both handles refer to the same storage.
    pub fn shares_with(&self, other: &Buffer<T>) -> bool {
        match (self, other) {
            (Buffer::Indexed(a), Buffer::Indexed(b)) => Arc::ptr_eq(a, b),
            (Buffer::Accessor(a), Buffer::Accessor(b)) => {
                std::ptr::eq(Arc::as_ptr(a) as *const (), Arc::as_ptr(b) as *const ())
            }
            _ => false,
        }
    }
}

impl<T: Clone> Buffer<T> {
    /// Read the element at `index`.
    #[inline]
    pub fn read(&self, index: usize) -> Option<T> {
        match self {
            Buffer::Indexed(data) => read_lock(data).get(index).cloned(),
            Buffer::Accessor(acc) => acc.get(index),
        }
    }

    /// Write `value` at `index`.
    ///
    /// # Errors
    /// Returns [`NdarrayError::BufferIndex`] if `index` is past the end.
    #[inline]
    pub fn write(&self, index: usize, value: T) -> Result<()> {
        let stored = match self {
            Buffer::Indexed(data) => match write_lock(data).get_mut(index) {
                Some(slot) => {
                    *slot = value;
                    true
                }
                None => false,
            },
            Buffer::Accessor(acc) => acc.set(index, value),
        };
        if stored {
            Ok(())
        } else {
            Err(NdarrayError::BufferIndex {
                index,
                len: self.len(),
            })
        }
    }

    /// Copy the whole storage out in buffer order.
    pub fn to_vec(&self) -> Vec<T> {
        match self {
            Buffer::Indexed(data) => read_lock(data).clone(),
            Buffer::Accessor(acc) => (0..acc.len()).filter_map(|i| acc.get(i)).collect(),
        }
    }
}

// ============================================================================
// Complex storage
// ============================================================================

/// Complex numbers stored as interleaved `[re0, im0, re1, im1, ...]` parts.
pub struct ComplexBuffer<F> {
    parts: RwLock<Vec<F>>,
}

/// Storage for `complex128` arrays.
pub type Complex128Buffer = ComplexBuffer<f64>;

/// Storage for `complex64` arrays.
pub type Complex64Buffer = ComplexBuffer<f32>;

impl<F: Copy + Zero> ComplexBuffer<F> {
    /// `len` complex zeros.
    pub fn zeros(len: usize) -> Self {
        Self {
            parts: RwLock::new(vec![F::zero(); 2 * len]),
        }
    }

    /// Take ownership of interleaved real/imaginary parts.
    ///
    /// # Errors
    /// Returns [`NdarrayError::OddInterleavedLength`] if `parts` has odd length.
    pub fn from_interleaved(parts: Vec<F>) -> Result<Self> {
        if parts.len() % 2 != 0 {
            return Err(NdarrayError::OddInterleavedLength(parts.len()));
        }
        Ok(Self {
            parts: RwLock::new(parts),
        })
    }

    /// Copy of the interleaved parts.
    pub fn to_interleaved(&self) -> Vec<F> {
        read_lock(&self.parts).clone()
    }
}

impl<F: Pod + Zero> ComplexBuffer<F> {
    /// Pack a slice of complex values.
    pub fn from_complex(values: &[Complex<F>]) -> Self {
        let parts: &[F] = bytemuck::cast_slice(values);
        Self {
            parts: RwLock::new(parts.to_vec()),
        }
    }
}

impl<F: Copy + Send + Sync> Accessor<Complex<F>> for ComplexBuffer<F> {
    fn len(&self) -> usize {
        read_lock(&self.parts).len() / 2
    }

    fn get(&self, index: usize) -> Option<Complex<F>> {
        let re_at = index.checked_mul(2)?;
        let parts = read_lock(&self.parts);
        match parts.get(re_at..)? {
            [re, im, ..] => Some(Complex::new(*re, *im)),
            _ => None,
        }
    }

    fn set(&self, index: usize, value: Complex<F>) -> bool {
        let Some(re_at) = index.checked_mul(2) else {
            return false;
        };
        let mut parts = write_lock(&self.parts);
        match parts.get_mut(re_at..) {
            Some([re, im, ..]) => {
                *re = value.re;
                *im = value.im;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;

    #[test]
    fn test_indexed_read_write() {
        let buf = Buffer::from_vec(vec![1.0, 2.0, 3.0]);
        assert_eq!(buf.len(), 3);
        assert!(!buf.is_accessor());
        assert_eq!(buf.read(1), Some(2.0));
        assert_eq!(buf.read(3), None);
        buf.write(2, 9.0).unwrap();
        assert_eq!(buf.to_vec(), vec![1.0, 2.0, 9.0]);
        assert!(matches!(
            buf.write(3, 0.0),
            Err(NdarrayError::BufferIndex { index: 3, len: 3 })
        ));
    }

    #[test]
    fn test_clone_aliases_storage() {
        let a = Buffer::from_vec(vec![0i32; 4]);
        let b = a.clone();
        b.write(0, 5).unwrap();
        assert_eq!(a.read(0), Some(5));
        assert!(a.shares_with(&b));
        assert!(!a.shares_with(&Buffer::from_vec(vec![0i32; 4])));
    }

    #[test]
    fn test_complex_accessor() {
        let buf = Buffer::from_accessor(Complex128Buffer::from_complex(&[
            Complex64::new(1.0, 2.0),
            Complex64::new(3.0, 4.0),
        ]));
        assert!(buf.is_accessor());
        assert_eq!(buf.len(), 2);
        assert_eq!(buf.read(1), Some(Complex64::new(3.0, 4.0)));
        buf.write(0, Complex64::new(-1.0, 0.5)).unwrap();
        assert_eq!(
            buf.to_vec(),
            vec![Complex64::new(-1.0, 0.5), Complex64::new(3.0, 4.0)]
        );
        assert!(buf.write(2, Complex64::new(0.0, 0.0)).is_err());
        let alias = buf.clone();
        assert!(alias.shares_with(&buf));
    }

    #[test]
    fn test_complex_interleaved() {
        let cb = Complex64Buffer::from_interleaved(vec![1.0f32, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(Accessor::<Complex<f32>>::len(&cb), 2);
        assert_eq!(cb.get(1), Some(Complex::new(3.0f32, 4.0)));
        assert!(cb.set(0, Complex::new(5.0, 6.0)));
        assert_eq!(cb.to_interleaved(), vec![5.0, 6.0, 3.0, 4.0]);
        assert!(matches!(
            Complex64Buffer::from_interleaved(vec![1.0f32]),
            Err(NdarrayError::OddInterleavedLength(1))
        ));
        assert_eq!(Accessor::<Complex64>::len(&Complex128Buffer::zeros(3)), 3);
    }

    #[test]
    fn test_complex_index_overflow() {
        let buf = Buffer::from_accessor(Complex128Buffer::zeros(2));
        assert_eq!(buf.read(usize::MAX), None);
        assert_eq!(buf.read(usize::MAX / 2 + 1), None);
        assert_eq!(buf.read(2), None);
        assert!(matches!(
            buf.write(usize::MAX, Complex64::new(1.0, 1.0)),
            Err(NdarrayError::BufferIndex { .. })
        ));
        assert_eq!(buf.to_vec(), vec![Complex64::new(0.0, 0.0); 2]);
    }
}
