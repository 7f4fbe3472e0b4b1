//! Stable machine-readable codes for crate errors.
//!
//! Every error enum in the crate implements [`ErrorCode`] so the host can map
//! failures to UI signals without matching on display strings.

/// Machine-readable classification of an error.
pub trait ErrorCode: std::fmt::Display {
    /// Stable code such as `"E_NOT_FOUND"`.
    fn error_code(&self) -> &'static str;

    /// Whether repeating the same call may succeed.
    fn retryable(&self) -> bool {
        false
    }
}
