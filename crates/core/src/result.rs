//! Result type definition and extension traits.
//!
//! Best-effort handling of Results without unwrap/expect/panic.

use crate::error::Error;

/// The standard Result type for core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for any Result type.
pub trait ResultExt<T, E> {
    /// Discard the error after logging it at warn level.
    ///
    /// Use only for best-effort work whose failure must not change control flow.
    fn ok_logged(self, context: &str) -> Option<T>
    where
        E: std::fmt::Display;
}

impl<T, E> ResultExt<T, E> for std::result::Result<T, E> {
    fn ok_logged(self, context: &str) -> Option<T>
    where
        E: std::fmt::Display,
    {
        match self {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(error = %e, "{context} failed; continuing");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_logged() {
        let ok: Result<i32> = Ok(42);
        assert_eq!(ok.ok_logged("read"), Some(42));

        let err: Result<i32> = Err(Error::json_encode_failed("bad"));
        assert_eq!(err.ok_logged("encode"), None);
    }
}
