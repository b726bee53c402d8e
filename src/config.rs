//! Constructor options and environment configuration.

use std::sync::OnceLock;

use crate::IndexMode;

/// Environment variable which, when set to `1`, enables metadata trace records.
pub const TRACE_ENV: &str = "STRIDED_ND_TRACE";

/// Whether verbose metadata tracing is enabled (`STRIDED_ND_TRACE=1`).
///
/// Read once per process.
#[inline]
pub fn trace_enabled() -> bool {
    static ENABLED: OnceLock<bool> = OnceLock::new();
    *ENABLED.get_or_init(|| matches!(std::env::var(TRACE_ENV), Ok(ref v) if v == "1"))
}

/// Optional ndarray constructor settings.
///
/// # Example
/// ```rust
/// use strided_ndarray::{IndexMode, NdarrayOptions};
///
/// let opts = NdarrayOptions::new()
///     .mode(IndexMode::Clamp)
///     .submode(vec![IndexMode::Wrap, IndexMode::Throw])
///     .readonly(true);
/// assert_eq!(opts.get_submode(), &[IndexMode::Wrap, IndexMode::Throw]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NdarrayOptions {
    mode: IndexMode,
    submode: Option<Vec<IndexMode>>,
    readonly: bool,
}

impl NdarrayOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bounds handling for linear indices (`iget`/`iset`).
    pub fn mode(mut self, mode: IndexMode) -> Self {
        self.mode = mode;
        self
    }

    /// Per-dimension bounds handling for subscripts (`get`/`set`), applied
    /// cyclically when shorter than the number of dimensions.
    pub fn submode(mut self, submode: Vec<IndexMode>) -> Self {
        self.submode = Some(submode);
        self
    }

    pub fn readonly(mut self, readonly: bool) -> Self {
        self.readonly = readonly;
        self
    }

    #[inline]
    pub fn get_mode(&self) -> IndexMode {
        self.mode
    }

    /// Explicit submode, or `[mode]` when none was given.
    pub fn get_submode(&self) -> &[IndexMode] {
        match &self.submode {
            Some(s) => s,
            None => std::slice::from_ref(&self.mode),
        }
    }

    #[inline]
    pub fn is_readonly(&self) -> bool {
        self.readonly
    }
}
