//! Strategy dispatcher: one named behaviour active at a time.

use crate::core::Name;
use crate::parts::observer::{Observer, Subscription};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised by [`StrategyPart`].
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StrategyError {
    #[error("Strategy '{name}' is not registered")]
    UnknownStrategy { name: String },

    #[error("Strategy '{name}' is active and cannot be removed")]
    ActiveStrategy { name: String },
}

/// One strategy implementation.
pub type StrategyFn<I, O> = Arc<dyn Fn(I) -> O + Send + Sync>;

/// Dispatches inputs to the currently selected strategy.
///
/// # Example
///
/// ```rust
/// use storeparts::parts::StrategyPart;
///
/// let mut render = StrategyPart::new("plain", [("plain", |n: u32| n.to_string())]).unwrap();
/// render.set_strategy("padded", |n: u32| format!("{n:04}"));
///
/// assert_eq!(render.handle(7), "7");
/// render.change_strategy("padded").unwrap();
/// assert_eq!(render.handle(7), "0007");
/// ```
pub struct StrategyPart<N: Name, I, O> {
    current: N,
    active: StrategyFn<I, O>,
    strategies: HashMap<N, StrategyFn<I, O>>,
    observer: Observer,
}

impl<N: Name, I, O> StrategyPart<N, I, O> {
    /// Build from named strategies. The initial name must be among them.
    pub fn new<F>(
        initial: N,
        strategies: impl IntoIterator<Item = (N, F)>,
    ) -> Result<Self, StrategyError>
    where
        F: Fn(I) -> O + Send + Sync + 'static,
    {
        let strategies: HashMap<N, StrategyFn<I, O>> = strategies
            .into_iter()
            .map(|(name, f)| (name, Arc::new(f) as StrategyFn<I, O>))
            .collect();
        let Some(active) = strategies.get(&initial).map(Arc::clone) else {
            return Err(StrategyError::UnknownStrategy {
                name: initial.as_str().to_string(),
            });
        };
        Ok(Self {
            current: initial,
            active,
            strategies,
            observer: Observer::new(),
        })
    }

    /// Run the active strategy.
    pub fn handle(&self, input: I) -> O {
        (self.active)(input)
    }

    /// Switch strategies and notify subscribers.
    pub fn change_strategy(&mut self, name: N) -> Result<(), StrategyError> {
        let Some(active) = self.strategies.get(&name).map(Arc::clone) else {
            return Err(StrategyError::UnknownStrategy {
                name: name.as_str().to_string(),
            });
        };
        tracing::debug!(from = self.current.as_str(), to = name.as_str(), "strategy changed");
        self.current = name;
        self.active = active;
        self.observer.notify();
        Ok(())
    }

    pub fn get_strategy_name(&self) -> &N {
        &self.current
    }

    pub fn has_strategy(&self, name: &N) -> bool {
        self.strategies.contains_key(name)
    }

    /// Register or replace a strategy. Replacing the active one takes effect
    /// on the next `handle`.
    pub fn set_strategy<F>(&mut self, name: N, strategy: F)
    where
        F: Fn(I) -> O + Send + Sync + 'static,
    {
        let strategy: StrategyFn<I, O> = Arc::new(strategy);
        if name == self.current {
            self.active = Arc::clone(&strategy);
        }
        self.strategies.insert(name, strategy);
    }

    pub fn remove_strategy(&mut self, name: &N) -> Result<bool, StrategyError> {
        if *name == self.current {
            return Err(StrategyError::ActiveStrategy {
                name: name.as_str().to_string(),
            });
        }
        Ok(self.strategies.remove(name).is_some())
    }

    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.observer.subscribe(callback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    type Render = Box<dyn Fn(i64) -> String + Send + Sync>;

    fn part() -> StrategyPart<&'static str, i64, String> {
        let strategies: Vec<(&'static str, Render)> = vec![
            ("a", Box::new(|value: i64| format!("{value}")) as Render),
            ("b", Box::new(|value: i64| format!("<{value}>")) as Render),
        ];
        StrategyPart::new("a", strategies).unwrap()
    }

    #[test]
    fn handle_uses_active_strategy() {
        let mut part = part();
        assert_eq!(*part.get_strategy_name(), "a");
        assert_eq!(part.handle(1), "1");

        part.change_strategy("b").unwrap();
        assert_eq!(*part.get_strategy_name(), "b");
        assert_eq!(part.handle(1), "<1>");
    }

    #[test]
    fn unknown_initial_strategy_is_rejected() {
        let strategies: Vec<(&'static str, Render)> =
            vec![("a", Box::new(|v: i64| v.to_string()) as Render)];
        let result = StrategyPart::new("z", strategies);
        assert!(matches!(
            result,
            Err(StrategyError::UnknownStrategy { ref name }) if name == "z"
        ));
    }

    #[test]
    fn change_to_unknown_strategy_keeps_current() {
        let mut part = part();
        let result = part.change_strategy("c");
        assert!(matches!(result, Err(StrategyError::UnknownStrategy { .. })));
        assert_eq!(*part.get_strategy_name(), "a");
    }

    #[test]
    fn change_notifies_subscribers() {
        let mut part = part();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        part.subscribe(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        part.change_strategy("b").unwrap();
        let _ = part.change_strategy("nope");
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn active_strategy_cannot_be_removed() {
        let mut part = part();
        assert!(matches!(
            part.remove_strategy(&"a"),
            Err(StrategyError::ActiveStrategy { .. })
        ));
        assert_eq!(part.remove_strategy(&"b"), Ok(true));
        assert_eq!(part.remove_strategy(&"b"), Ok(false));
        assert!(!part.has_strategy(&"b"));
    }

    #[test]
    fn replacing_active_strategy_takes_effect() {
        let mut part = part();
        part.set_strategy("a", |value: i64| format!("[{value}]"));
        assert_eq!(part.handle(3), "[3]");
    }

    #[test]
    fn set_strategy_adds_new_behaviour() {
        let mut part = part();
        part.set_strategy("c", |value: i64| format!("{}", value * 10));
        part.change_strategy("c").unwrap();
        assert_eq!(part.handle(4), "40");
    }
}
