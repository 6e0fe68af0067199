//! Error types for the alignment pipeline

use thiserror::Error;

/// Errors that can occur while packing, aligning or printing a sequence pair
#[derive(Debug, Error)]
pub enum AlignError {
    #[error("Invalid symbol '{symbol}' at position {position}")]
    InvalidSymbol { symbol: char, position: usize },

    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    #[error("Edit path exceeds buffer capacity of {capacity} operations")]
    PathOverflow { capacity: usize },

    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AlignResult<T> = Result<T, AlignError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = AlignError::InvalidSymbol { symbol: 'X', position: 3 };
        assert_eq!(err.to_string(), "Invalid symbol 'X' at position 3");

        let err = AlignError::PathOverflow { capacity: 12 };
        assert_eq!(err.to_string(), "Edit path exceeds buffer capacity of 12 operations");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed");
        let err: AlignError = io_err.into();
        assert!(matches!(err, AlignError::Io(_)));
    }
}
