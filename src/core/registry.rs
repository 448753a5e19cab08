//! Registry of the state names and handle names an engine currently accepts.

use super::state::Name;
use std::collections::HashSet;

/// The live vocabularies of a state-pattern engine.
///
/// Both sets keep insertion order for listing and answer membership from a
/// hash index. Removal is a plain set difference: it
/// never touches the transition table, which the engine prunes separately.
///
/// # Example
///
/// ```rust
/// use storeparts::core::NameRegistry;
///
/// let mut registry = NameRegistry::new(vec!["idle", "busy"], vec!["start"]);
/// assert!(registry.is_valid_state(&"idle"));
/// assert!(!registry.is_valid_handle(&"stop"));
///
/// registry.add_handle("stop");
/// assert!(registry.is_valid_handle(&"stop"));
///
/// registry.remove_state(&"busy");
/// assert_eq!(registry.state_names(), &["idle"]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct NameRegistry<N: Name, H: Name> {
    states: Vec<N>,
    handles: Vec<H>,
    state_index: HashSet<N>,
    handle_index: HashSet<H>,
}

impl<N: Name, H: Name> NameRegistry<N, H> {
    /// Create a registry from the initial vocabularies. Duplicates collapse.
    pub fn new(
        states: impl IntoIterator<Item = N>,
        handles: impl IntoIterator<Item = H>,
    ) -> Self {
        let mut registry = Self {
            states: Vec::new(),
            handles: Vec::new(),
            state_index: HashSet::new(),
            handle_index: HashSet::new(),
        };
        for state in states {
            registry.add_state(state);
        }
        for handle in handles {
            registry.add_handle(handle);
        }
        registry
    }

    pub fn is_valid_state(&self, name: &N) -> bool {
        self.state_index.contains(name)
    }

    pub fn is_valid_handle(&self, name: &H) -> bool {
        self.handle_index.contains(name)
    }

    /// Register a state name. Returns `false` if it was already known.
    pub fn add_state(&mut self, name: N) -> bool {
        if !self.state_index.insert(name.clone()) {
            return false;
        }
        self.states.push(name);
        true
    }

    /// Register a handle name. Returns `false` if it was already known.
    pub fn add_handle(&mut self, name: H) -> bool {
        if !self.handle_index.insert(name.clone()) {
            return false;
        }
        self.handles.push(name);
        true
    }

    /// Forget a state name. Unknown names are a no-op.
    pub fn remove_state(&mut self, name: &N) -> bool {
        if !self.state_index.remove(name) {
            return false;
        }
        self.states.retain(|s| s != name);
        true
    }

    /// Forget a handle name. Unknown names are a no-op.
    pub fn remove_handle(&mut self, name: &H) -> bool {
        if !self.handle_index.remove(name) {
            return false;
        }
        self.handles.retain(|h| h != name);
        true
    }

    pub fn state_names(&self) -> &[N] {
        &self.states
    }

    pub fn handle_names(&self) -> &[H] {
        &self.handles
    }
}
