//! Builder for constructing state parts.

use crate::builder::config::{HandleConfigItem, StateConfigItem};
use crate::builder::error::BuildError;
use crate::core::{Name, NamePolicy, StateItem};
use crate::effects::{StatePart, StatePartError, StatePartOptions};

/// Builder for constructing a [`StatePart`] with a fluent API.
pub struct StatePartBuilder<S: StateItem, H: Name, O, Env = ()> {
    initial: Option<S>,
    state_names: Vec<S::Name>,
    handle_names: Vec<H>,
    state_configs: Vec<StateConfigItem<S, H, O, Env>>,
    handle_configs: Vec<HandleConfigItem<S, H, O, Env>>,
    policy: NamePolicy,
    env: Env,
}

impl<S, H, O, Env> StatePartBuilder<S, H, O, Env>
where
    S: StateItem,
    H: Name,
    O: Send + 'static,
    Env: Clone + Send + Sync + Default + 'static,
{
    /// Create a new builder with a default environment.
    pub fn new() -> Self {
        Self::with_env(Env::default())
    }
}

impl<S, H, O, Env> StatePartBuilder<S, H, O, Env>
where
    S: StateItem,
    H: Name,
    O: Send + 'static,
    Env: Clone + Send + Sync + 'static,
{
    /// Create a new builder around an explicit environment.
    pub fn with_env(env: Env) -> Self {
        Self {
            initial: None,
            state_names: Vec::new(),
            handle_names: Vec::new(),
            state_configs: Vec::new(),
            handle_configs: Vec::new(),
            policy: NamePolicy::default(),
            env,
        }
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    /// Extend the registered state names.
    pub fn state_names(mut self, names: impl IntoIterator<Item = S::Name>) -> Self {
        self.state_names.extend(names);
        self
    }

    /// Extend the registered handle names.
    pub fn handle_names(mut self, names: impl IntoIterator<Item = H>) -> Self {
        self.handle_names.extend(names);
        self
    }

    pub fn state_config(mut self, item: StateConfigItem<S, H, O, Env>) -> Self {
        self.state_configs.push(item);
        self
    }

    pub fn state_configs(
        mut self,
        items: impl IntoIterator<Item = StateConfigItem<S, H, O, Env>>,
    ) -> Self {
        self.state_configs.extend(items);
        self
    }

    /// Add a handle-keyed config. Applied after the state configs, and
    /// registers its handle name like
    /// [`StatePart::set_handle_config_item`] does.
    pub fn handle_config(mut self, item: HandleConfigItem<S, H, O, Env>) -> Self {
        self.handle_configs.push(item);
        self
    }

    pub fn policy(mut self, policy: NamePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn env(mut self, env: Env) -> Self {
        self.env = env;
        self
    }

    /// Build the state part.
    /// Returns an error if the initial state is missing or unregistered.
    pub fn build(self) -> Result<StatePart<S, H, O, Env>, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        let mut part = StatePart::new(StatePartOptions {
            init_state: initial,
            state_config_items: self.state_configs,
            state_name_list: self.state_names,
            handle_name_list: self.handle_names,
            policy: self.policy,
            env: self.env,
        })
        .map_err(|error| match error {
            StatePartError::InvalidStateName { name } => BuildError::UnknownInitialState { name },
            other => BuildError::StatePart(other),
        })?;

        for item in self.handle_configs {
            part.set_handle_config_item(item);
        }

        Ok(part)
    }
}

impl<S, H, O, Env> Default for StatePartBuilder<S, H, O, Env>
where
    S: StateItem,
    H: Name,
    O: Send + 'static,
    Env: Clone + Send + Sync + Default + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::HandleOutcome;
    use stillwater::prelude::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Ticket {
        state_name: String,
        assignee: Option<String>,
    }

    impl StateItem for Ticket {
        type Name = String;

        fn state_name(&self) -> &String {
            &self.state_name
        }
    }

    fn ticket(state_name: &str) -> Ticket {
        Ticket {
            state_name: state_name.to_string(),
            assignee: None,
        }
    }

    type Builder = StatePartBuilder<Ticket, String, String, ()>;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn builder_validates_required_fields() {
        let result = Builder::new().build();
        assert!(matches!(result, Err(BuildError::MissingInitialState)));
    }

    #[test]
    fn builder_rejects_unregistered_initial_state() {
        let result = Builder::new()
            .initial(ticket("open"))
            .state_names(names(&["closed"]))
            .build();
        assert_eq!(
            result.err(),
            Some(BuildError::UnknownInitialState {
                name: "open".to_string()
            })
        );
    }

    #[test]
    fn engine_errors_convert_transparently() {
        let error: BuildError = StatePartError::InvalidHandleName {
            name: "close".to_string(),
        }
        .into();
        assert_eq!(
            error,
            BuildError::StatePart(StatePartError::InvalidHandleName {
                name: "close".to_string()
            })
        );
        assert_eq!(error.to_string(), "Handle name 'close' is not registered");
    }

    #[tokio::test]
    async fn fluent_api_builds_working_part() {
        let mut part = Builder::new()
            .initial(ticket("open"))
            .state_names(names(&["open", "assigned"]))
            .handle_names(names(&["assign"]))
            .state_config(StateConfigItem::new("open".to_string()).on(
                "assign".to_string(),
                |_s: &Ticket, who: String| {
                    pure(Some(Ticket {
                        state_name: "assigned".to_string(),
                        assignee: Some(who),
                    }))
                    .boxed()
                },
            ))
            .policy(NamePolicy::WarnAndIgnore)
            .build()
            .unwrap();

        assert_eq!(part.policy(), NamePolicy::WarnAndIgnore);
        let outcome = part
            .handle("assign".to_string(), "kim".to_string())
            .await
            .unwrap();
        assert!(outcome.is_transitioned());
        assert_eq!(part.get_state().assignee.as_deref(), Some("kim"));
    }

    #[tokio::test]
    async fn handle_configs_register_their_handle() {
        let mut part = Builder::new()
            .initial(ticket("assigned"))
            .state_names(names(&["open", "assigned"]))
            .handle_config(HandleConfigItem::new("unassign".to_string()).from(
                "assigned".to_string(),
                |_s: &Ticket, _o: String| pure(Some(ticket("open"))).boxed(),
            ))
            .build()
            .unwrap();

        assert!(part.registry().is_valid_handle(&"unassign".to_string()));
        let outcome = part
            .handle("unassign".to_string(), String::new())
            .await
            .unwrap();
        assert!(matches!(outcome, HandleOutcome::Transitioned));
        assert_eq!(part.get_state().state_name, "open");
    }

    #[test]
    fn explicit_environment_is_kept() {
        let part = StatePartBuilder::<Ticket, String, String, u8>::with_env(7)
            .initial(ticket("open"))
            .state_names(names(&["open"]))
            .build()
            .unwrap();
        assert_eq!(*part.env(), 7);
    }
}
