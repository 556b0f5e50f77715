//! # System Descriptors
//!
//! A [`SystemSpec`] describes one system participating in orchestration:
//! an integer run level (RC, default 0) plus optional `up` and `down`
//! actions. The engine only ever reads these three fields.
//!
//! # Action Shape
//! An action is any `Fn(args, state)` returning a future. What the future
//! resolves to is deliberately polymorphic — some actions only perform side
//! effects, some contribute state, some fail — and every accepted shape is
//! normalized through a single coercion step, [`IntoContribution`],
//! immediately after the future resolves:
//!
//! | return shape             | normalized to                   |
//! |--------------------------|---------------------------------|
//! | `()`                     | no contribution                 |
//! | `State`                  | partial-state contribution      |
//! | `Option<State>`          | either of the above             |
//! | `Result<_, E>` over them | contribution or action failure  |
//!
//! The generic parameter `A` stands in for the caller's arguments; use a
//! tuple or a config struct when an action needs more than one value. Every
//! invocation receives its own clone of `A` and its own snapshot of the
//! accumulator.

use crate::error::{ActionError, BoxError};
use crate::state::State;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Boxed future produced by invoking an action, already normalized.
pub type ActionFuture = Pin<Box<dyn Future<Output = Result<Option<State>, ActionError>> + Send>>;

/// Shared, invocable bring-up or tear-down step.
pub(crate) type ActionFn<A> = Arc<dyn Fn(A, State) -> ActionFuture + Send + Sync>;

/// Normalizes the value an action resolved with.
///
/// Implemented for the accepted return shapes (see the module docs); foreign
/// value types are rejected at compile time rather than silently dropped.
pub trait IntoContribution {
    /// Coerce into an optional partial state or a failure.
    fn into_contribution(self) -> Result<Option<State>, ActionError>;
}

impl IntoContribution for () {
    fn into_contribution(self) -> Result<Option<State>, ActionError> {
        Ok(None)
    }
}

impl IntoContribution for State {
    fn into_contribution(self) -> Result<Option<State>, ActionError> {
        Ok(Some(self))
    }
}

impl IntoContribution for Option<State> {
    fn into_contribution(self) -> Result<Option<State>, ActionError> {
        Ok(self)
    }
}

impl<T, E> IntoContribution for Result<T, E>
where
    T: IntoContribution,
    E: Into<BoxError>,
{
    fn into_contribution(self) -> Result<Option<State>, ActionError> {
        match self {
            Ok(value) => value.into_contribution(),
            Err(err) => Err(ActionError::new(err)),
        }
    }
}

/// Wraps a plain async closure into the boxed, normalized action form.
pub(crate) fn boxed_action<A, F, Fut, O>(action: F) -> ActionFn<A>
where
    F: Fn(A, State) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = O> + Send + 'static,
    O: IntoContribution,
{
    Arc::new(move |args, state| {
        let fut = action(args, state);
        Box::pin(async move { fut.await.into_contribution() })
    })
}

/// Descriptor for one orchestrated system.
///
/// Built with a fluent API; a descriptor that defines neither action is
/// legal and simply contributes nothing in either direction.
///
/// ```rust
/// use runlevel::{keyed, State, SystemSpec};
///
/// let database = SystemSpec::new()
///     .rc(1)
///     .up(|url: String, _state: State| async move { keyed("db")(url) })
///     .down(|_url: String, _state: State| async move {});
/// ```
pub struct SystemSpec<A> {
    pub(crate) rc: i64,
    pub(crate) up: Option<ActionFn<A>>,
    pub(crate) down: Option<ActionFn<A>>,
}

impl<A> SystemSpec<A> {
    /// Creates a descriptor at run level 0 with no actions.
    pub fn new() -> Self {
        Self {
            rc: 0,
            up: None,
            down: None,
        }
    }

    /// Sets the run level. Lower levels start first on bring-up and stop
    /// last on tear-down; negative levels are valid.
    pub fn rc(mut self, rc: i64) -> Self {
        self.rc = rc;
        self
    }

    /// Sets the bring-up action.
    pub fn up<F, Fut, O>(mut self, action: F) -> Self
    where
        F: Fn(A, State) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = O> + Send + 'static,
        O: IntoContribution,
    {
        self.up = Some(boxed_action(action));
        self
    }

    /// Sets the tear-down action.
    pub fn down<F, Fut, O>(mut self, action: F) -> Self
    where
        F: Fn(A, State) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = O> + Send + 'static,
        O: IntoContribution,
    {
        self.down = Some(boxed_action(action));
        self
    }
}

impl<A> Default for SystemSpec<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Clone for SystemSpec<A> {
    fn clone(&self) -> Self {
        Self {
            rc: self.rc,
            up: self.up.clone(),
            down: self.down.clone(),
        }
    }
}

impl<A> fmt::Debug for SystemSpec<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SystemSpec")
            .field("rc", &self.rc)
            .field("up", &self.up.is_some())
            .field("down", &self.down.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::keyed;

    #[derive(Debug, PartialEq, thiserror::Error)]
    #[error("refused")]
    struct Refused;

    #[test]
    fn unit_coerces_to_no_contribution() {
        assert!(().into_contribution().unwrap().is_none());
    }

    #[test]
    fn state_coerces_to_a_contribution() {
        let partial = keyed("n")(1u8).into_contribution().unwrap().unwrap();
        assert_eq!(partial.get::<u8>("n"), Some(&1));
    }

    #[test]
    fn result_err_coerces_to_a_failure_preserving_the_source() {
        let failure = Err::<State, _>(Refused).into_contribution().unwrap_err();
        assert_eq!(failure.downcast_ref::<Refused>(), Some(&Refused));
    }

    #[test]
    fn result_ok_unit_coerces_to_no_contribution() {
        let outcome = Ok::<(), Refused>(()).into_contribution().unwrap();
        assert!(outcome.is_none());
    }

    #[tokio::test]
    async fn boxed_action_normalizes_on_invocation() {
        let action: ActionFn<u32> =
            boxed_action(|n: u32, _state: State| async move { keyed("n")(n * 2) });
        let partial = action(21, State::new()).await.unwrap().unwrap();
        assert_eq!(partial.get::<u32>("n"), Some(&42));
    }
}
