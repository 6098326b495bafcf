//! Generic finite-state controller.
//!
//! The controller owns a current-state name and a table of named state
//! handlers, and is driven once per render tick via [`StateMachine::step`].
//! Transitions returned from `execute` are resolved synchronously: the loop
//! keeps executing the new state within the same `step` call until a state
//! settles, so callers never observe an intermediate state of a transition
//! chain.
//!
//! Enter and exit hooks run synchronously, exit-then-enter. There is no
//! fire-and-forget variant: by the time `execute` runs on the new state, the
//! old state's exit work has completed.

use log::trace;
use std::collections::HashMap;

/// Name a state is registered under.
pub type StateId = &'static str;

/// Upper bound on synchronous transitions resolved within a single `step`.
/// A chain this long means two states are routing to each other without an
/// intervening "no transition" result, which is a defect in the state table.
pub const MAX_TRANSITION_CHAIN: usize = 32;

/// A transition request returned from [`State::execute`].
#[derive(Debug, Clone, PartialEq)]
pub struct Transition<A> {
    /// Name of the state to enter.
    pub target: StateId,
    /// Payload handed to the target's enter handler.
    pub args: Option<A>,
}

impl<A> Transition<A> {
    /// Transition without an enter payload.
    pub fn to(target: StateId) -> Self {
        Self { target, args: None }
    }

    /// Transition carrying an enter payload.
    pub fn with(target: StateId, args: A) -> Self {
        Self {
            target,
            args: Some(args),
        }
    }
}

/// One mode of behavior registered with a [`StateMachine`].
///
/// The context `C` is passed into every callback by the machine's caller;
/// states hold no reference back to the machine. Transient per-state data
/// (drag origins and the like) lives in the state struct itself, populated
/// from the enter payload and discarded on exit.
pub trait State<C, A> {
    /// Called when the machine enters this state.
    fn handle_entered(&mut self, _ctx: &mut C, _args: Option<A>) {}

    /// Called when the machine leaves this state.
    fn handle_exited(&mut self, _ctx: &mut C) {}

    /// Called once per tick while this state is current. Returning a
    /// [`Transition`] switches states immediately.
    fn execute(&mut self, _ctx: &mut C) -> Option<Transition<A>> {
        None
    }
}

/// Drives enter/exit/execute over a closed table of
/// named states.
pub struct StateMachine<C, A> {
    initial: StateId,
    current: Option<StateId>,
    states: HashMap<StateId, Box<dyn State<C, A>>>,
}

impl<C, A> StateMachine<C, A> {
    /// Create a machine from an initial-state name and a state table.
    ///
    /// # Panics
    ///
    /// Panics if the initial state is not in the table.
    pub fn new(initial: StateId, states: Vec<(StateId, Box<dyn State<C, A>>)>) -> Self {
        let states: HashMap<_, _> = states.into_iter().collect();
        assert!(
            states.contains_key(initial),
            "initial state `{initial}` is not registered"
        );
        Self {
            initial,
            current: None,
            states,
        }
    }

    /// Name of the current state, or `None` before the first `step`.
    pub fn current(&self) -> Option<StateId> {
        self.current
    }

    /// Advance the machine by one tick.
    ///
    /// The first call performs implicit entry into the initial state. Each
    /// call then executes the current state, following any returned
    /// transitions (exit old, enter new, execute new) until a state returns
    /// no transition.
    ///
    /// # Panics
    ///
    /// Panics if a transition chain exceeds [`MAX_TRANSITION_CHAIN`] hops,
    /// or if a transition targets an unregistered state.
    pub fn step(&mut self, ctx: &mut C) {
        if self.current.is_none() {
            self.enter(self.initial, None, ctx);
        }

        let mut chain = 0;
        while let Some(id) = self.current {
            let Some(transition) = self.state_mut(id).execute(ctx) else {
                break;
            };
            chain += 1;
            assert!(
                chain <= MAX_TRANSITION_CHAIN,
                "transition chain exceeded {MAX_TRANSITION_CHAIN} hops without settling \
                 (last hop `{id}` -> `{}`)",
                transition.target
            );
            self.transition(transition.target, transition.args, ctx);
        }
    }

    /// Perform an exit-then-enter transition immediately.
    ///
    /// This is also the entrypoint for transitions requested from outside the
    /// machine's own `execute` loop, e.g. switching tools from a panel
    /// callback.
    ///
    /// # Panics
    ///
    /// Panics if `target` is not a registered state name.
    pub fn transition(&mut self, target: StateId, args: Option<A>, ctx: &mut C) {
        assert!(
            self.states.contains_key(target),
            "transition to unregistered state `{target}`"
        );
        if let Some(current) = self.current {
            trace!("state transition: {current} -> {target}");
            self.state_mut(current).handle_exited(ctx);
        }
        self.enter(target, args, ctx);
    }

    fn enter(&mut self, id: StateId, args: Option<A>, ctx: &mut C) {
        self.current = Some(id);
        self.state_mut(id).handle_entered(ctx, args);
    }

    fn state_mut(&mut self, id: StateId) -> &mut Box<dyn State<C, A>> {
        self.states
            .get_mut(id)
            .unwrap_or_else(|| panic!("unknown state `{id}`"))
    }
}
