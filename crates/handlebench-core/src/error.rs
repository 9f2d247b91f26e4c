//! Error types for the allocator bridge.
//!
//! Missing or non-integer arguments never reach this layer; the host
//! binding rejects them first. What remains is the size policy and
//! allocator refusal.

use std::error::Error;
use std::fmt;

/// Errors from [`Bridge::create_sized_handle`](crate::Bridge::create_sized_handle).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HandleError {
    /// The requested size was negative.
    NegativeSize {
        /// The size the caller passed.
        requested: i64,
    },
    /// The requested size exceeds the configured ceiling.
    SizeTooLarge {
        /// The size the caller passed.
        requested: i64,
        /// `BridgeConfig::max_block_size` at the time of the call.
        max: usize,
    },
    /// The allocator could not provide the block.
    AllocationFailed {
        /// Number of bytes requested.
        requested: usize,
    },
}

impl HandleError {
    /// Whether the caller can fix this by passing a different size.
    pub fn is_size_error(&self) -> bool {
        matches!(self, Self::NegativeSize { .. } | Self::SizeTooLarge { .. })
    }
}

impl fmt::Display for HandleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeSize { requested } => {
                write!(f, "block size must be non-negative, got {requested}")
            }
            Self::SizeTooLarge { requested, max } => {
                write!(f, "block size {requested} exceeds maximum of {max} bytes")
            }
            Self::AllocationFailed { requested } => {
                write!(f, "allocation of {requested} bytes failed")
            }
        }
    }
}

impl Error for HandleError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_mentions_requested_size() {
        let e = HandleError::NegativeSize { requested: -5 };
        assert!(e.to_string().contains("-5"));

        let e = HandleError::SizeTooLarge {
            requested: 1 << 40,
            max: 1024,
        };
        let msg = e.to_string();
        assert!(msg.contains("1099511627776"));
        assert!(msg.contains("1024"));

        let e = HandleError::AllocationFailed { requested: 64 };
        assert!(e.to_string().contains("64 bytes"));
    }

    #[test]
    fn size_errors_are_classified() {
        assert!(HandleError::NegativeSize { requested: -1 }.is_size_error());
        assert!(HandleError::SizeTooLarge {
            requested: 2,
            max: 1
        }
        .is_size_error());
        assert!(!HandleError::AllocationFailed { requested: 1 }.is_size_error());
    }
}
