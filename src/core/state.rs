//! Naming and state-item traits for the state-pattern engine.
//!
//! State names and handle names are opaque identifiers. They can be plain
//! strings (fully open vocabularies that grow at runtime) or enums generated
//! with [`name_enum!`](crate::name_enum) when the vocabulary is closed.

use std::fmt::Debug;
use std::hash::Hash;

/// Identifier for a state or a handle (transition trigger).
///
/// # Required Traits
///
/// - `Clone` + `Eq` + `Hash`: names key the registry and the transition table
/// - `Debug`: names show up in diagnostics
/// - `Send` + `Sync` + `'static`: engines may move across tasks
///
/// # Example
///
/// ```rust
/// use storeparts::core::Name;
///
/// let state: String = "step-1".to_string();
/// assert_eq!(state.as_str(), "step-1");
///
/// let handle: &'static str = "nextStep";
/// assert_eq!(Name::as_str(&handle), "nextStep");
/// ```
pub trait Name: Clone + Eq + Hash + Debug + Send + Sync + 'static {
    /// Get the name as a string for display/logging.
    fn as_str(&self) -> &str;
}

impl Name for String {
    fn as_str(&self) -> &str {
        self
    }
}

impl Name for &'static str {
    fn as_str(&self) -> &str {
        self
    }
}

/// Snapshot of a workflow, always tagged with its state name.
///
/// Everything besides the state name is domain payload carried by the
/// implementor's own fields.
///
/// # Example
///
/// ```rust
/// use storeparts::core::StateItem;
///
/// #[derive(Clone, Debug, PartialEq)]
/// struct Person {
///     state_name: String,
///     age: u32,
/// }
///
/// impl StateItem for Person {
///     type Name = String;
///
///     fn state_name(&self) -> &String {
///         &self.state_name
///     }
/// }
///
/// let young = Person { state_name: "young".into(), age: 18 };
/// assert_eq!(young.state_name(), "young");
/// ```
pub trait StateItem: Clone + Debug + Send + Sync + 'static {
    /// Vocabulary of state names this item is tagged with.
    type Name: Name;

    /// The state name this snapshot is tagged with.
    fn state_name(&self) -> &Self::Name;
}
