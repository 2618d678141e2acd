// ============================================================================
// Numeric Module
// Exact fixed-point encodings for ledger arguments
// ============================================================================
//
// This module provides:
// - FixedPoint: integer encoding of a scaled quantity
// - scale(): exact decimal × 10^k / divisor without floating point
// - NumericError: Error types for conversions
//
// Design principles:
// - No floating-point operations
// - All arithmetic returns Result (no panics)
// - Truncation unless a caller asks for rounding

mod errors;
mod fixed_point;

pub use errors::{NumericError, NumericResult};
pub use fixed_point::{pow10, scale, FixedPoint, Rounding};
