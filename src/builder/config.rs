//! Declarative configuration items for the transition table.

use crate::core::{Name, StateItem};
use crate::effects::{TransitionError, TransitionFn};
use std::sync::Arc;
use stillwater::effect::BoxedEffect;

/// All transitions leaving one state, keyed by handle name.
///
/// # Example
///
/// ```rust
/// use storeparts::builder::StateConfigItem;
/// use storeparts::core::StateItem;
/// use stillwater::prelude::*;
///
/// #[derive(Clone, Debug)]
/// struct Light {
///     state_name: &'static str,
/// }
///
/// impl StateItem for Light {
///     type Name = &'static str;
///     fn state_name(&self) -> &&'static str {
///         &self.state_name
///     }
/// }
///
/// let red: StateConfigItem<Light, &'static str, (), ()> = StateConfigItem::new("red")
///     .on("tick", |_s: &Light, _o: ()| pure(Some(Light { state_name: "green" })).boxed());
/// assert_eq!(red.handles().len(), 1);
/// ```
pub struct StateConfigItem<S: StateItem, H: Name, O, Env> {
    name: S::Name,
    handles: Vec<(H, TransitionFn<S, O, Env>)>,
}

impl<S: StateItem, H: Name, O, Env> StateConfigItem<S, H, O, Env> {
    pub fn new(name: S::Name) -> Self {
        Self {
            name,
            handles: Vec::new(),
        }
    }

    /// Declare the transition fired by `handle` in this state.
    pub fn on<F>(mut self, handle: H, transition: F) -> Self
    where
        F: Fn(&S, O) -> BoxedEffect<Option<S>, TransitionError, Env> + Send + Sync + 'static,
    {
        self.handles.push((handle, Arc::new(transition)));
        self
    }

    /// Declare a transition from an already shared function.
    pub fn on_fn(mut self, handle: H, transition: TransitionFn<S, O, Env>) -> Self {
        self.handles.push((handle, transition));
        self
    }

    pub fn name(&self) -> &S::Name {
        &self.name
    }

    pub fn handles(&self) -> &[(H, TransitionFn<S, O, Env>)] {
        &self.handles
    }

    pub(crate) fn into_parts(self) -> (S::Name, Vec<(H, TransitionFn<S, O, Env>)>) {
        (self.name, self.handles)
    }
}

/// All transitions fired by one handle, keyed by the state they leave.
pub struct HandleConfigItem<S: StateItem, H: Name, O, Env> {
    name: H,
    states: Vec<(S::Name, TransitionFn<S, O, Env>)>,
}

impl<S: StateItem, H: Name, O, Env> HandleConfigItem<S, H, O, Env> {
    pub fn new(name: H) -> Self {
        Self {
            name,
            states: Vec::new(),
        }
    }

    /// Declare the transition this handle fires from `state`.
    pub fn from<F>(mut self, state: S::Name, transition: F) -> Self
    where
        F: Fn(&S, O) -> BoxedEffect<Option<S>, TransitionError, Env> + Send + Sync + 'static,
    {
        self.states.push((state, Arc::new(transition)));
        self
    }

    pub fn from_fn(mut self, state: S::Name, transition: TransitionFn<S, O, Env>) -> Self {
        self.states.push((state, transition));
        self
    }

    pub fn name(&self) -> &H {
        &self.name
    }

    pub fn states(&self) -> &[(S::Name, TransitionFn<S, O, Env>)] {
        &self.states
    }

    pub(crate) fn into_parts(self) -> (H, Vec<(S::Name, TransitionFn<S, O, Env>)>) {
        (self.name, self.states)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stillwater::prelude::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Step {
        state_name: String,
    }

    impl StateItem for Step {
        type Name = String;

        fn state_name(&self) -> &String {
            &self.state_name
        }
    }

    fn goto(target: &str) -> TransitionFn<Step, (), ()> {
        let target = target.to_string();
        Arc::new(move |_s: &Step, _o: ()| {
            pure(Some(Step {
                state_name: target.clone(),
            }))
            .boxed()
        })
    }

    #[test]
    fn state_config_keeps_declaration_order() {
        let item: StateConfigItem<Step, &'static str, (), ()> =
            StateConfigItem::new("one".to_string())
                .on_fn("next", goto("two"))
                .on_fn("back", goto("zero"))
                .on("stay", |s: &Step, _o: ()| pure(Some(s.clone())).boxed());

        assert_eq!(item.name(), "one");
        let handles: Vec<&str> = item.handles().iter().map(|(h, _)| *h).collect();
        assert_eq!(handles, vec!["next", "back", "stay"]);
    }

    #[test]
    fn handle_config_collects_states() {
        let item: HandleConfigItem<Step, &'static str, (), ()> = HandleConfigItem::new("reset")
            .from_fn("two".to_string(), goto("one"))
            .from("three".to_string(), |_s: &Step, _o: ()| pure(None).boxed());

        assert_eq!(*item.name(), "reset");
        let (name, states) = item.into_parts();
        assert_eq!(name, "reset");
        assert_eq!(states.len(), 2);
        assert_eq!(states[0].0, "two");
    }
}
