//! Dispatch configuration.

/// Default limit on nested group resolution.
pub const DEFAULT_MAX_GROUP_DEPTH: usize = 32;

/// Settings applied to matching and publishing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchConfig {
    /// How many levels of group indirection are followed before resolution
    /// stops descending. Direct listeners are always at depth zero.
    pub max_group_depth: usize,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl DispatchConfig {
    /// Create the default configuration.
    pub const fn new() -> Self {
        Self {
            max_group_depth: DEFAULT_MAX_GROUP_DEPTH,
        }
    }

    /// Set the group resolution depth limit.
    pub const fn with_max_group_depth(mut self, depth: usize) -> Self {
        self.max_group_depth = depth;
        self
    }
}
