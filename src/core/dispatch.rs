//! Table-driven state dispatch.
//!
//! A machine is described by three [`DispatchMap`]s keyed by its state enum:
//! one for state entry, one for the per-tick update and one for contacts. Each
//! map can also hold a wildcard reaction which runs after the state-specific
//! one on every dispatch, whatever the current state is. A missing reaction is
//! simply a no-op.

use std::fmt;
use std::marker::PhantomData;

use bevy::log::debug;

/// A state enum usable as a dispatch key.
pub trait StateKey: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    /// Dense index of the state inside its machine's table.
    fn slot(self) -> usize;
}

/// Reaction run on state entry or on tick.
pub type Reaction<T, C> = fn(&mut T, &mut C);

/// Reaction run on contact, receiving the contact classification explicitly.
pub type ContactReaction<T, C, K> = fn(&mut T, &mut C, K);

/// Mapping from state to an optional reaction, plus the wildcard reaction.
pub struct DispatchMap<S, R> {
    slots: Vec<Option<R>>,
    any: Option<R>,
    _state: PhantomData<fn(S)>,
}

impl<S: StateKey, R: Copy> DispatchMap<S, R> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            any: None,
            _state: PhantomData,
        }
    }

    /// Register the reaction for `state`, replacing any previous one.
    pub fn on(mut self, state: S, reaction: R) -> Self {
        let slot = state.slot();
        if self.slots.len() <= slot {
            self.slots.resize(slot + 1, None);
        }
        self.slots[slot] = Some(reaction);
        self
    }

    /// Register the wildcard reaction.
    pub fn on_any(mut self, reaction: R) -> Self {
        self.any = Some(reaction);
        self
    }

    pub fn reaction(&self, state: S) -> Option<R> {
        self.slots.get(state.slot()).copied().flatten()
    }

    /// Reactions to run for `state`, specific one first.
    pub fn chain(&self, state: S) -> impl Iterator<Item = R> {
        self.reaction(state).into_iter().chain(self.any)
    }
}

impl<S: StateKey, R: Copy> Default for DispatchMap<S, R> {
    fn default() -> Self {
        Self::new()
    }
}

/// The three event categories of a machine.
pub struct Reactions<M: Machine> {
    pub enter: DispatchMap<M::State, Reaction<M, M::Ctx>>,
    pub tick: DispatchMap<M::State, Reaction<M, M::Ctx>>,
    pub intersect: DispatchMap<M::State, ContactReaction<M, M::Ctx, M::Contact>>,
}

impl<M: Machine> Reactions<M> {
    pub fn new() -> Self {
        Self {
            enter: DispatchMap::new(),
            tick: DispatchMap::new(),
            intersect: DispatchMap::new(),
        }
    }

    pub fn on_enter(mut self, state: M::State, reaction: Reaction<M, M::Ctx>) -> Self {
        self.enter = self.enter.on(state, reaction);
        self
    }

    pub fn on_enter_any(mut self, reaction: Reaction<M, M::Ctx>) -> Self {
        self.enter = self.enter.on_any(reaction);
        self
    }

    pub fn on_tick(mut self, state: M::State, reaction: Reaction<M, M::Ctx>) -> Self {
        self.tick = self.tick.on(state, reaction);
        self
    }

    pub fn on_tick_any(mut self, reaction: Reaction<M, M::Ctx>) -> Self {
        self.tick = self.tick.on_any(reaction);
        self
    }

    pub fn on_intersect(
        mut self,
        state: M::State,
        reaction: ContactReaction<M, M::Ctx, M::Contact>,
    ) -> Self {
        self.intersect = self.intersect.on(state, reaction);
        self
    }

    pub fn on_intersect_any(mut self, reaction: ContactReaction<M, M::Ctx, M::Contact>) -> Self {
        self.intersect = self.intersect.on_any(reaction);
        self
    }
}

impl<M: Machine> Default for Reactions<M> {
    fn default() -> Self {
        Self::new()
    }
}

/// Something driven by a static reaction table.
pub trait Machine: Sized + 'static {
    type State: StateKey;
    /// Shared mutable context handed to every reaction.
    type Ctx;
    /// Contact classification handed to intersect reactions.
    type Contact: Copy;

    fn reactions(&self) -> &'static Reactions<Self>;

    fn state(&self) -> Self::State;

    /// Store `next` as the current state and reset the state-entry timer.
    fn enter(&mut self, next: Self::State);
}

/// Transition to `next`, running its entry reactions.
///
/// Re-entering the current state does nothing, not even a timer reset.
/// Returns whether a transition happened.
pub fn set_state<M: Machine>(machine: &mut M, ctx: &mut M::Ctx, next: M::State) -> bool {
    let current = machine.state();
    if current == next {
        return false;
    }
    debug!("{:?} -> {:?}", current, next);
    machine.enter(next);
    run_enter(machine, ctx, next);
    true
}

/// Enter `initial` unconditionally. Used once, when a machine is created.
pub fn start<M: Machine>(machine: &mut M, ctx: &mut M::Ctx, initial: M::State) {
    machine.enter(initial);
    run_enter(machine, ctx, initial);
}

fn run_enter<M: Machine>(machine: &mut M, ctx: &mut M::Ctx, state: M::State) {
    for reaction in machine.reactions().enter.chain(state) {
        reaction(machine, ctx);
    }
}

/// Run the per-tick reactions for the current state.
pub fn tick<M: Machine>(machine: &mut M, ctx: &mut M::Ctx) {
    let state = machine.state();
    for reaction in machine.reactions().tick.chain(state) {
        reaction(machine, ctx);
    }
}

/// Run the contact reactions for the current state.
pub fn intersect<M: Machine>(machine: &mut M, ctx: &mut M::Ctx, contact: M::Contact) {
    let state = machine.state();
    for reaction in machine.reactions().intersect.chain(state) {
        reaction(machine, ctx, contact);
    }
}
