//! Sparse state x handle dispatch matrix.

use crate::core::{Name, StateItem};
use crate::effects::transition::{TransitionFn, TransitionKey};
use std::collections::HashMap;
use std::sync::Arc;

/// Two-level mapping from state name, then handle name, to a transition.
///
/// A missing cell means "this handle is ignored in this state". Rows left
/// empty by removals are pruned.
pub struct TransitionTable<S: StateItem, H: Name, O, Env> {
    rows: HashMap<S::Name, HashMap<H, TransitionFn<S, O, Env>>>,
}

impl<S: StateItem, H: Name, O, Env> TransitionTable<S, H, O, Env> {
    pub fn new() -> Self {
        Self {
            rows: HashMap::new(),
        }
    }

    /// Insert or overwrite one cell.
    pub fn put(&mut self, state: S::Name, handle: H, transition: TransitionFn<S, O, Env>) {
        self.rows
            .entry(state)
            .or_default()
            .insert(handle, transition);
    }

    pub fn lookup(&self, state: &S::Name, handle: &H) -> Option<TransitionFn<S, O, Env>> {
        self.rows
            .get(state)
            .and_then(|row| row.get(handle))
            .map(Arc::clone)
    }

    pub fn contains(&self, state: &S::Name, handle: &H) -> bool {
        self.rows
            .get(state)
            .is_some_and(|row| row.contains_key(handle))
    }

    /// Delete every cell of a state. Returns the number of cells removed.
    pub fn remove_state(&mut self, state: &S::Name) -> usize {
        self.rows.remove(state).map_or(0, |row| row.len())
    }

    /// Delete every cell of a handle across all states. Returns the number
    /// of cells removed.
    pub fn remove_handle(&mut self, handle: &H) -> usize {
        let mut removed = 0;
        self.rows.retain(|_, row| {
            if row.remove(handle).is_some() {
                removed += 1;
            }
            !row.is_empty()
        });
        removed
    }

    pub fn len(&self) -> usize {
        self.rows.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Addresses of every defined cell, in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = TransitionKey<S::Name, H>> + '_ {
        self.rows.iter().flat_map(|(state, row)| {
            row.keys()
                .map(move |handle| TransitionKey::new(state.clone(), handle.clone()))
        })
    }
}

impl<S: StateItem, H: Name, O, Env> Default for TransitionTable<S, H, O, Env> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::transition::transition_fn;
    use stillwater::prelude::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Door {
        state_name: &'static str,
    }

    impl StateItem for Door {
        type Name = &'static str;

        fn state_name(&self) -> &&'static str {
            &self.state_name
        }
    }

    fn to(target: &'static str) -> TransitionFn<Door, (), ()> {
        transition_fn(move |_s: &Door, _o: ()| {
            pure(Some(Door {
                state_name: target,
            }))
            .boxed()
        })
    }

    fn table() -> TransitionTable<Door, &'static str, (), ()> {
        let mut table = TransitionTable::new();
        table.put("open", "close", to("closed"));
        table.put("closed", "open", to("open"));
        table.put("closed", "lock", to("locked"));
        table.put("locked", "unlock", to("closed"));
        table
    }

    #[test]
    fn lookup_finds_defined_cells_only() {
        let table = table();
        assert!(table.lookup(&"open", &"close").is_some());
        assert!(table.lookup(&"open", &"lock").is_none());
        assert!(table.lookup(&"missing", &"close").is_none());
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn put_overwrites_existing_cell() {
        let mut table = table();
        table.put("open", "close", to("locked"));
        assert_eq!(table.len(), 4);
        assert!(table.contains(&"open", &"close"));
    }

    #[test]
    fn remove_state_drops_whole_row() {
        let mut table = table();
        assert_eq!(table.remove_state(&"closed"), 2);
        assert!(!table.contains(&"closed", &"open"));
        assert!(!table.contains(&"closed", &"lock"));
        assert_eq!(table.len(), 2);
        assert_eq!(table.remove_state(&"closed"), 0);
    }

    #[test]
    fn remove_handle_drops_column_and_prunes_rows() {
        let mut table = table();
        assert_eq!(table.remove_handle(&"close"), 1);
        assert!(!table.contains(&"open", &"close"));
        assert_eq!(table.keys().filter(|k| k.state == "open").count(), 0);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn keys_list_every_cell() {
        let table = table();
        let mut keys: Vec<String> = table.keys().map(|k| k.to_string()).collect();
        keys.sort();
        assert_eq!(
            keys,
            vec![
                "closed -[lock]->",
                "closed -[open]->",
                "locked -[unlock]->",
                "open -[close]->",
            ]
        );
    }

    #[test]
    fn empty_table_reports_empty() {
        let mut table = TransitionTable::<Door, &'static str, (), ()>::default();
        assert!(table.is_empty());
        table.put("open", "close", to("closed"));
        table.remove_handle(&"close");
        assert!(table.is_empty());
    }
}
