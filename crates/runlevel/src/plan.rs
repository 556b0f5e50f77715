//! # Grouping & Orientation
//!
//! Turns an ordered list of [`SystemSpec`]s into an ordered list of levels
//! and wraps the result in a runnable [`Plan`].
//!
//! Grouping is a pure transformation: descriptors are bucketed by RC
//! (insertion order preserved within a bucket), the distinct RC values are
//! walked in numeric order — ascending for [`up`], descending for [`down`] —
//! and each bucket yields the selected action of every descriptor that
//! defines it. Descriptors lacking the selected action are skipped; they
//! contribute no entry, not a no-op action.

use crate::error::ActionError;
use crate::executor::apply_serially;
use crate::state::State;
use crate::system::{ActionFn, SystemSpec};
use std::collections::BTreeMap;
use std::fmt;

/// Orientation of a staged run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Direction {
    Up,
    Down,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => f.write_str("up"),
            Direction::Down => f.write_str("down"),
        }
    }
}

/// Plans a bring-up: levels in ascending RC order, `up` actions selected.
///
/// The returned [`Plan`] borrows nothing; descriptors can be reused for a
/// matching [`down`] plan afterwards.
pub fn up<A>(systems: &[SystemSpec<A>]) -> Plan<A> {
    let levels = collect_by_rc(systems)
        .values()
        .map(|group| group.iter().filter_map(|system| system.up.clone()).collect())
        .collect();
    Plan {
        direction: Direction::Up,
        levels,
    }
}

/// Plans a tear-down: levels in descending RC order, `down` actions selected.
pub fn down<A>(systems: &[SystemSpec<A>]) -> Plan<A> {
    let levels = collect_by_rc(systems)
        .values()
        .rev()
        .map(|group| group.iter().filter_map(|system| system.down.clone()).collect())
        .collect();
    Plan {
        direction: Direction::Down,
        levels,
    }
}

// BTreeMap keeps the RC keys numerically sorted; bucket order is insertion
// order because groups are built by a single forward pass.
fn collect_by_rc<A>(systems: &[SystemSpec<A>]) -> BTreeMap<i64, Vec<&SystemSpec<A>>> {
    let mut groups: BTreeMap<i64, Vec<&SystemSpec<A>>> = BTreeMap::new();
    for system in systems {
        groups.entry(system.rc).or_default().push(system);
    }
    groups
}

/// A prepared staged run over one orientation of a descriptor set.
///
/// Holds the derived level list; running it does not consume it, and a plan
/// is safe to run any number of times — each run threads its own
/// accumulator.
pub struct Plan<A> {
    direction: Direction,
    levels: Vec<Vec<ActionFn<A>>>,
}

impl<A: Clone> Plan<A> {
    /// Runs the plan with an empty seed state.
    ///
    /// Resolves with the final accumulator once every level has settled, or
    /// with the first action failure; no partial state is ever exposed.
    pub async fn run(&self, args: A) -> Result<State, ActionError> {
        self.run_seeded(args, State::new()).await
    }

    /// Runs the plan starting from a caller-supplied accumulator.
    ///
    /// The seed is visible to the first level exactly as a previous level's
    /// output would be — useful for handing a bring-up's final state to the
    /// matching tear-down.
    pub async fn run_seeded(&self, args: A, seed: State) -> Result<State, ActionError> {
        apply_serially(self.direction, &self.levels, args, seed).await
    }
}

impl<A> Plan<A> {
    /// Number of selected actions per level, in execution order.
    ///
    /// Levels whose descriptors all lack the selected action show up as `0`.
    pub fn level_sizes(&self) -> Vec<usize> {
        self.levels.iter().map(Vec::len).collect()
    }

    /// Whether no level carries any action.
    pub fn is_empty(&self) -> bool {
        self.levels.iter().all(Vec::is_empty)
    }
}

impl<A> fmt::Debug for Plan<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Plan")
            .field("direction", &self.direction)
            .field("levels", &self.level_sizes())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{keyed, State};

    fn noop(spec: SystemSpec<()>) -> SystemSpec<()> {
        spec.up(|_: (), _state: State| async {})
    }

    #[test]
    fn groups_by_rc_in_numeric_order() {
        let systems = vec![
            noop(SystemSpec::new().rc(2)),
            noop(SystemSpec::new()),
            noop(SystemSpec::new().rc(5)),
            noop(SystemSpec::new().rc(5)),
        ];

        assert_eq!(up(&systems).level_sizes(), vec![1, 1, 2]);
    }

    #[test]
    fn numeric_ordering_holds_past_single_digits() {
        // rc 10 must sort after rc 2, not between 1 and 2.
        let systems = vec![
            noop(SystemSpec::new().rc(10)),
            noop(SystemSpec::new().rc(2)),
            noop(SystemSpec::new().rc(1)),
        ];

        let plan = up(&systems);
        assert_eq!(plan.level_sizes(), vec![1, 1, 1]);

        let grouped = collect_by_rc(&systems);
        let keys: Vec<i64> = grouped.keys().copied().collect();
        assert_eq!(keys, vec![1, 2, 10]);
    }

    #[test]
    fn descriptors_lacking_the_selected_action_are_skipped() {
        let systems = vec![
            noop(SystemSpec::new()),
            SystemSpec::new()
                .rc(1)
                .down(|_: (), _state: State| async {}),
            noop(SystemSpec::new().rc(2)),
        ];

        // The rc-1 descriptor has no `up`, so its level is empty.
        assert_eq!(up(&systems).level_sizes(), vec![1, 0, 1]);
        assert_eq!(down(&systems).level_sizes(), vec![0, 1, 0]);
    }

    #[test]
    fn down_reverses_level_order() {
        let label = |rc: i64| {
            SystemSpec::new()
                .rc(rc)
                .down(move |_: (), _state: State| async move { keyed("last")(rc) })
        };
        let systems = vec![label(-2), label(5), label(2)];

        let grouped = collect_by_rc(&systems);
        let keys: Vec<i64> = grouped.keys().rev().copied().collect();
        assert_eq!(keys, vec![5, 2, -2]);
        assert_eq!(down(&systems).level_sizes(), vec![1, 1, 1]);
    }

    #[test]
    fn empty_descriptor_list_yields_an_empty_plan() {
        let systems: Vec<SystemSpec<()>> = Vec::new();
        assert!(up(&systems).is_empty());
        assert!(up(&systems).level_sizes().is_empty());
    }
}
