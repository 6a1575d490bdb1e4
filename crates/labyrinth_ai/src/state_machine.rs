//! Finite State Machine (FSM) implementation

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// A state in the state machine
pub trait State: Clone + Eq + Hash {}

/// Transition condition
pub type TransitionCondition<C> = Box<dyn Fn(&C) -> bool + Send + Sync>;

/// A state transition
pub struct Transition<S, C> {
    /// Target state
    pub to: S,
    /// Condition function
    pub condition: TransitionCondition<C>,
}

impl<S, C> Transition<S, C> {
    pub fn new<F>(to: S, condition: F) -> Self
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        Self {
            to,
            condition: Box::new(condition),
        }
    }

    pub fn should_transition(&self, context: &C) -> bool {
        (self.condition)(context)
    }
}

/// Finite State Machine driven by explicit evaluation.
///
/// Conditions are only looked at when [`StateMachine::evaluate`] is called,
/// and at most one transition fires per evaluation. Transitions out of a
/// state are tried in the order they were added.
pub struct StateMachine<S, C>
where
    S: State,
{
    current: S,
    transitions: HashMap<S, Vec<Transition<S, C>>>,
}

impl<S, C> StateMachine<S, C>
where
    S: State,
{
    pub fn new(initial: S) -> Self {
        Self {
            current: initial,
            transitions: HashMap::new(),
        }
    }

    pub fn add_transition<F>(&mut self, from: S, to: S, condition: F)
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        self.transitions
            .entry(from)
            .or_default()
            .push(Transition::new(to, condition));
    }

    pub fn current(&self) -> &S {
        &self.current
    }

    /// Check the current state's transitions against `context`.
    ///
    /// Returns the new state if one fired.
    pub fn evaluate(&mut self, context: &C) -> Option<&S> {
        let next = self
            .transitions
            .get(&self.current)?
            .iter()
            .find(|t| t.to != self.current && t.should_transition(context))
            .map(|t| t.to.clone())?;

        self.current = next;
        Some(&self.current)
    }

    pub fn is_in(&self, state: &S) -> bool {
        &self.current == state
    }
}

impl<S, C> fmt::Debug for StateMachine<S, C>
where
    S: State + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateMachine")
            .field("current", &self.current)
            .field(
                "transitions",
                &self.transitions.values().map(Vec::len).sum::<usize>(),
            )
            .finish()
    }
}
