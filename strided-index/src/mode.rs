//! Out-of-bounds index handling.

use std::fmt;
use std::str::FromStr;

use crate::{IndexError, Result};

/// Policy for resolving an index which may fall outside `[0, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IndexMode {
    /// Reject indices outside `[-(max+1), max]`; negative indices count from the end.
    #[default]
    Throw,
    /// Saturate to `0` or `max`.
    Clamp,
    /// Wrap around modulo `max+1`.
    Wrap,
}

impl IndexMode {
    /// Canonical string name.
    pub fn as_str(&self) -> &'static str {
        match self {
            IndexMode::Throw => "throw",
            IndexMode::Clamp => "clamp",
            IndexMode::Wrap => "wrap",
        }
    }
}

impl fmt::Display for IndexMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IndexMode {
    type Err = IndexError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "throw" => Ok(IndexMode::Throw),
            "clamp" => Ok(IndexMode::Clamp),
            "wrap" => Ok(IndexMode::Wrap),
            other => Err(IndexError::InvalidMode(other.to_string())),
        }
    }
}

/// Returns true if `s` names a supported index mode.
pub fn is_index_mode(s: &str) -> bool {
    s.parse::<IndexMode>().is_ok()
}

/// Resolve `idx` to an index in `[0, max]` according to `mode`.
///
/// # Errors
/// Under [`IndexMode::Throw`], returns [`IndexError::OutOfBounds`] when
/// `idx < -(max+1)` or `idx > max`.
///
/// # Example
/// ```rust
/// use strided_index::{ind, IndexMode};
///
/// assert_eq!(ind(-1, 9, IndexMode::Throw).unwrap(), 9);
/// assert_eq!(ind(12, 9, IndexMode::Wrap).unwrap(), 2);
/// assert_eq!(ind(12, 9, IndexMode::Clamp).unwrap(), 9);
/// assert!(ind(10, 9, IndexMode::Throw).is_err());
/// ```
#[inline]
pub fn ind(idx: isize, max: usize, mode: IndexMode) -> Result<usize> {
    let span = max as i128 + 1;
    let i = idx as i128;
    match mode {
        IndexMode::Clamp => Ok(i.clamp(0, max as i128) as usize),
        IndexMode::Wrap => Ok(i.rem_euclid(span) as usize),
        IndexMode::Throw => {
            if i < -span || i > max as i128 {
                return Err(IndexError::OutOfBounds { index: idx, max });
            }
            if i < 0 {
                Ok((i + span) as usize)
            } else {
                Ok(i as usize)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ind_wrap() {
        let max = 9;
        assert_eq!(ind(max as isize + 1, max, IndexMode::Wrap).unwrap(), 0);
        assert_eq!(ind(-1, max, IndexMode::Wrap).unwrap(), max);
        assert_eq!(ind(-11, max, IndexMode::Wrap).unwrap(), max);
        assert_eq!(ind(25, max, IndexMode::Wrap).unwrap(), 5);
        assert_eq!(ind(3, max, IndexMode::Wrap).unwrap(), 3);
    }

    #[test]
    fn test_ind_clamp() {
        let max = 9;
        assert_eq!(ind(max as isize + 100, max, IndexMode::Clamp).unwrap(), max);
        assert_eq!(ind(-100, max, IndexMode::Clamp).unwrap(), 0);
        assert_eq!(ind(4, max, IndexMode::Clamp).unwrap(), 4);
    }

    #[test]
    fn test_ind_throw() {
        let max = 9;
        assert_eq!(
            ind(max as isize + 1, max, IndexMode::Throw),
            Err(IndexError::OutOfBounds { index: 10, max })
        );
        assert!(ind(-(max as isize + 2), max, IndexMode::Throw).is_err());
        assert_eq!(ind(-(max as isize + 1), max, IndexMode::Throw).unwrap(), 0);
        assert_eq!(ind(-1, max, IndexMode::Throw).unwrap(), max);
        assert_eq!(ind(max as isize, max, IndexMode::Throw).unwrap(), max);
    }

    #[test]
    fn test_ind_max_zero() {
        assert_eq!(ind(5, 0, IndexMode::Wrap).unwrap(), 0);
        assert_eq!(ind(-5, 0, IndexMode::Clamp).unwrap(), 0);
        assert_eq!(ind(-1, 0, IndexMode::Throw).unwrap(), 0);
        assert!(ind(1, 0, IndexMode::Throw).is_err());
    }

    #[test]
    fn test_mode_parse() {
        assert_eq!("wrap".parse::<IndexMode>().unwrap(), IndexMode::Wrap);
        assert_eq!(IndexMode::Clamp.to_string(), "clamp");
        assert!(is_index_mode("throw"));
        assert!(!is_index_mode("normalise"));
        assert_eq!(
            "bogus".parse::<IndexMode>(),
            Err(IndexError::InvalidMode("bogus".into()))
        );
    }
}
