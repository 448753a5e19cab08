//! How an engine reacts to names missing from its registry.

/// Policy applied when `handle` or `force_change_state` meets a state or
/// handle name the registry does not know.
///
/// The policy is fixed at construction and applies to every operation of
/// that engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NamePolicy {
    /// Report the unknown name to the caller as an error.
    #[default]
    Strict,

    /// Log a warning and leave the state untouched.
    WarnAndIgnore,
}

impl NamePolicy {
    pub fn is_strict(self) -> bool {
        matches!(self, Self::Strict)
    }
}
