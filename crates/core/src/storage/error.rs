use thiserror::Error;

/// Errors produced by a record store.
///
/// Decorators forward these untouched; they never wrap or reclassify a store
/// failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Write failed: {0}")]
    WriteFailed(String),
    #[error("Read failed: {0}")]
    ReadFailed(String),
    /// The background task carrying a write was cancelled before it finished.
    #[error("Write aborted: {0}")]
    Aborted(String),
}

/// Result type for record store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_failed_display() {
        let error = StoreError::WriteFailed("disk full".to_string());
        assert_eq!(error.to_string(), "Write failed: disk full");
    }

    #[test]
    fn test_read_failed_display() {
        let error = StoreError::ReadFailed("underlying failure".to_string());
        assert_eq!(error.to_string(), "Read failed: underlying failure");
    }

    #[test]
    fn test_aborted_display() {
        let error = StoreError::Aborted("runtime shutting down".to_string());
        assert_eq!(error.to_string(), "Write aborted: runtime shutting down");
    }
}
