//! # Staged Executor
//!
//! Runs an ordered list of levels against a shared, evolving accumulator:
//! strictly serial across levels, concurrent within a level.
//!
//! # Ordering Guarantees
//! - Level N+1 never starts until every action in level N has settled
//!   (success or failure) — the level barrier is a plain join, never a
//!   cancel-on-error join.
//! - Within a level, launch order equals descriptor definition order;
//!   completion order is unconstrained.
//! - A level's contributions are merged onto the pre-level accumulator only
//!   after the barrier is crossed, so no action ever observes a sibling's
//!   contribution.
//!
//! Concurrency is cooperative: one join future polls the level's actions
//! inside the caller's task. Actions interleave at their own await points;
//! a synchronous action runs to completion without yielding.

use crate::error::ActionError;
use crate::plan::Direction;
use crate::state::State;
use crate::system::ActionFn;
use futures::future;
use tracing::{debug, warn};

/// Runs `levels` in order, threading the accumulator from `seed`.
///
/// Each action is invoked with a clone of `args` and a snapshot of the
/// pre-level accumulator. On failure the run rejects with the first failing
/// action's error (first in launch order when several siblings fail); the
/// level is still drained before the rejection propagates, so sibling side
/// effects complete, but their contributions are discarded.
pub(crate) async fn apply_serially<A: Clone>(
    direction: Direction,
    levels: &[Vec<ActionFn<A>>],
    args: A,
    seed: State,
) -> Result<State, ActionError> {
    let mut state = seed;

    for (index, level) in levels.iter().enumerate() {
        if level.is_empty() {
            debug!(%direction, level = index, "level carries no actions, passing state through");
            continue;
        }

        debug!(%direction, level = index, actions = level.len(), "starting level");

        // Invoke every action before awaiting any of them.
        let launched: Vec<_> = level
            .iter()
            .map(|action| action(args.clone(), state.clone()))
            .collect();

        // Barrier: all siblings settle, none are cancelled on a neighbour's
        // failure. Outcomes come back in launch order.
        let outcomes = future::join_all(launched).await;

        let mut contributions = Vec::with_capacity(outcomes.len());
        for outcome in outcomes {
            match outcome {
                Ok(contribution) => contributions.push(contribution),
                Err(err) => {
                    warn!(%direction, level = index, error = %err, "action failed, aborting run");
                    return Err(err);
                }
            }
        }

        // Merge onto the pre-level accumulator in launch order; a colliding
        // key goes to the last-launched contributor.
        for partial in contributions.into_iter().flatten() {
            state.merge(partial);
        }

        debug!(%direction, level = index, state_entries = state.len(), "level settled");
    }

    Ok(state)
}
