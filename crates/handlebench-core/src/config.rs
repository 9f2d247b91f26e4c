//! Bridge configuration parameters.

/// Configuration for a [`Bridge`](crate::Bridge).
///
/// Immutable once the bridge is constructed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BridgeConfig {
    /// Largest block, in bytes, that `create_sized_handle` will request.
    ///
    /// Default: `isize::MAX`, the largest allocation Rust permits. Sizes
    /// above this fail with `HandleError::SizeTooLarge` before the
    /// allocator is touched.
    pub max_block_size: usize,
}

impl BridgeConfig {
    /// Default size ceiling: the language-level allocation limit.
    pub const DEFAULT_MAX_BLOCK_SIZE: usize = isize::MAX as usize;

    /// The default configuration, usable in `const` and `static` contexts.
    pub const DEFAULT: Self = Self::new();

    /// Create a config with default values.
    pub const fn new() -> Self {
        Self {
            max_block_size: Self::DEFAULT_MAX_BLOCK_SIZE,
        }
    }

    /// Replace the size ceiling.
    pub const fn with_max_block_size(mut self, max_block_size: usize) -> Self {
        self.max_block_size = max_block_size;
        self
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_ceiling_is_isize_max() {
        assert_eq!(BridgeConfig::default().max_block_size, isize::MAX as usize);
        assert_eq!(BridgeConfig::DEFAULT, BridgeConfig::default());
    }

    #[test]
    fn with_max_block_size_overrides() {
        let config = BridgeConfig::new().with_max_block_size(4096);
        assert_eq!(config.max_block_size, 4096);
    }
}
