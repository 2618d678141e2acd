// ============================================================================
// Numeric Errors
// Error types for fixed-point conversions
// ============================================================================

use std::fmt;

/// Errors that can occur while converting between decimal and fixed-point values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericError {
    /// Result exceeded the 128-bit encoding range
    Overflow,
    /// Attempted division by zero
    DivisionByZero,
    /// Input string or value is invalid
    InvalidInput,
    /// Input was negative where only non-negative values make sense
    NegativeInput,
    /// A required input was absent or zero
    MissingInput(&'static str),
    /// Input fell outside its permitted range
    OutOfRange(&'static str),
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::Overflow => {
                write!(f, "arithmetic overflow: result exceeded maximum value")
            },
            NumericError::DivisionByZero => write!(f, "division by zero"),
            NumericError::InvalidInput => write!(f, "invalid input: could not parse value"),
            NumericError::NegativeInput => write!(f, "invalid input: value must not be negative"),
            NumericError::MissingInput(field) => write!(f, "missing input: {field}"),
            NumericError::OutOfRange(field) => write!(f, "input out of range: {field}"),
        }
    }
}

impl std::error::Error for NumericError {}

/// Result type alias for numeric operations
pub type NumericResult<T> = Result<T, NumericError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            NumericError::Overflow.to_string(),
            "arithmetic overflow: result exceeded maximum value"
        );
        assert_eq!(NumericError::DivisionByZero.to_string(), "division by zero");
        assert_eq!(
            NumericError::MissingInput("ltv").to_string(),
            "missing input: ltv"
        );
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(NumericError::Overflow, NumericError::Overflow);
        assert_ne!(
            NumericError::MissingInput("ltv"),
            NumericError::MissingInput("oracle_price")
        );
    }
}
