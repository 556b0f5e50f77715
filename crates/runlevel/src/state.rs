//! # Accumulated State
//!
//! The accumulator threaded through a staged run. Every action receives a
//! snapshot of the state produced by the levels before it and may contribute
//! a partial state of its own; the engine merges contributions level by level.
//!
//! Values are live handles (a connection pool, a server handle, a channel),
//! not serializable data, so the map is keyed by name and type-erased via
//! [`Any`]. Retrieval is type-checked at the call site: [`State::get`]
//! returns `None` both for a missing key and for a type mismatch.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A string-keyed map of shared, type-erased values.
///
/// Cloning is shallow: the clone shares the stored values (each value lives
/// behind an [`Arc`]). The engine never mutates a state in place across a
/// level boundary; it builds the next accumulator by merging and replaces
/// the previous one wholesale.
#[derive(Clone, Default)]
pub struct State {
    entries: HashMap<String, Arc<dyn Any + Send + Sync>>,
}

impl State {
    /// Creates an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under `name`, replacing any previous entry.
    pub fn insert<T: Send + Sync + 'static>(&mut self, name: impl Into<String>, value: T) {
        self.entries.insert(name.into(), Arc::new(value));
    }

    /// Builder-style [`State::insert`].
    pub fn with<T: Send + Sync + 'static>(mut self, name: impl Into<String>, value: T) -> Self {
        self.insert(name, value);
        self
    }

    /// Borrows the value stored under `name`.
    ///
    /// Returns `None` when the key is absent *or* when the stored value is
    /// not a `T`.
    pub fn get<T: Send + Sync + 'static>(&self, name: &str) -> Option<&T> {
        self.entries.get(name).and_then(|value| value.downcast_ref::<T>())
    }

    /// Returns a shared handle to the value stored under `name`.
    ///
    /// Useful when a handle must outlive the state snapshot it was read
    /// from, e.g. to move it into a spawned task.
    pub fn get_arc<T: Send + Sync + 'static>(&self, name: &str) -> Option<Arc<T>> {
        self.entries
            .get(name)
            .cloned()
            .and_then(|value| value.downcast::<T>().ok())
    }

    /// Whether an entry named `name` exists, regardless of its type.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Iterates over the entry names in unspecified order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the state holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Shallow merge: entries of `other` overwrite same-named entries of
    /// `self`. Within one level the engine merges contributions in launch
    /// order, so on a key collision the last-launched contributor wins.
    pub fn merge(&mut self, other: State) {
        self.entries.extend(other.entries);
    }
}

impl fmt::Debug for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.keys().collect();
        names.sort_unstable();
        f.debug_struct("State").field("keys", &names).finish()
    }
}

/// Builds single-entry partial states, curried over the value.
///
/// `keyed("router")` returns a closure that wraps a value into a state
/// containing exactly one entry named `router` — convenient for actions that
/// contribute one named handle:
///
/// ```rust
/// use runlevel::{keyed, State};
///
/// let state: State = keyed("port")(8080u16);
/// assert_eq!(state.get::<u16>("port"), Some(&8080));
/// assert_eq!(state.len(), 1);
/// ```
pub fn keyed<T: Send + Sync + 'static>(name: impl Into<String>) -> impl Fn(T) -> State {
    let name = name.into();
    move |value: T| State::new().with(name.clone(), value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyed_associates_a_value_with_a_name() {
        let state = keyed("foo")(42u32);
        assert_eq!(state.get::<u32>("foo"), Some(&42));
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn get_with_wrong_type_returns_none() {
        let state = State::new().with("foo", 42u32);
        assert!(state.get::<String>("foo").is_none());
        assert!(state.get::<u32>("missing").is_none());
        assert!(state.contains("foo"));
    }

    #[test]
    fn merge_overwrites_colliding_names() {
        let mut state = State::new().with("a", 1u32).with("b", 1u32);
        state.merge(State::new().with("b", 2u32).with("c", 3u32));

        assert_eq!(state.get::<u32>("a"), Some(&1));
        assert_eq!(state.get::<u32>("b"), Some(&2));
        assert_eq!(state.get::<u32>("c"), Some(&3));
        assert_eq!(state.len(), 3);
    }

    #[test]
    fn get_arc_shares_ownership() {
        #[derive(Debug, PartialEq)]
        struct Handle(u8);

        let state = State::new().with("handle", Handle(7));
        let first = state.get_arc::<Handle>("handle").unwrap();
        let second = state.get_arc::<Handle>("handle").unwrap();
        assert_eq!(*first, Handle(7));
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn clones_share_values() {
        let state = State::new().with("n", 5i64);
        let copy = state.clone();
        assert_eq!(copy.get::<i64>("n"), Some(&5));
        assert_eq!(state.len(), copy.len());
    }
}
