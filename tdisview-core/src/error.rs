//! Error types for tdisview-core.

use std::fmt;

use thiserror::Error;

/// Result type alias for tdisview operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Which pad-plane index a geometry error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
    /// Concentric ring index (0 is the innermost ring).
    Ring,
    /// Pad index within a ring.
    Pad,
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexKind::Ring => write!(f, "ring"),
            IndexKind::Pad => write!(f, "pad"),
        }
    }
}

/// Core error types for tdisview operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Ring or pad index outside the pad plane.
    #[error("{kind} index {value} out of range, must be between 0 and {}", .limit - 1)]
    InvalidIndex {
        kind: IndexKind,
        value: i64,
        limit: i32,
    },

    /// Ring or pad field that is not a whole number (NaN, infinite or fractional).
    #[error("{kind} field {value} is not an integral index")]
    NonIntegralIndex { kind: IndexKind, value: f64 },

    /// Hit line with fewer fields than its layout needs.
    #[error("hit has {found} fields, layout requires {required}")]
    TruncatedHit { found: usize, required: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_index_message() {
        let err = Error::InvalidIndex {
            kind: IndexKind::Ring,
            value: 21,
            limit: 21,
        };
        assert_eq!(
            err.to_string(),
            "ring index 21 out of range, must be between 0 and 20"
        );
    }

    #[test]
    fn test_truncated_hit_message() {
        let err = Error::TruncatedHit {
            found: 4,
            required: 6,
        };
        assert_eq!(err.to_string(), "hit has 4 fields, layout requires 6");
    }
}
