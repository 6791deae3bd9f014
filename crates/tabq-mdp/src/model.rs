use std::fmt;

use rand::Rng;

use crate::{DDist, Interner, Key, MdpError};

type TransitionFn<S, A> = Box<dyn Fn(&S, &A) -> DDist<S>>;
type RewardFn<S, A> = Box<dyn Fn(&S, &A) -> f64>;
type TerminalFn<S> = Box<dyn Fn(&S) -> bool>;

/// Markov decision process over finite state and action sets.
///
/// The transition model and reward function are caller-supplied closures.
/// A terminal state still pays `reward(s, a)` for the step that leaves it,
/// but its successor is drawn from the start distribution.
pub struct Mdp<S, A>
where
    S: Key,
    A: Key,
{
    states: Vec<S>,
    actions: Vec<A>,
    transition_model: TransitionFn<S, A>,
    reward_fn: RewardFn<S, A>,
    terminal_fn: Option<TerminalFn<S>>,
    discount_factor: f64,
    start: DDist<S>,
}

impl<S, A> Mdp<S, A>
where
    S: Key,
    A: Key,
{
    /// Create an MDP with a uniform start distribution and no terminal states.
    ///
    /// Fails if either domain is empty or `discount_factor` is outside `(0, 1]`.
    pub fn new<T, R>(
        states: impl IntoIterator<Item = S>,
        actions: impl IntoIterator<Item = A>,
        transition_model: T,
        reward_fn: R,
        discount_factor: f64,
    ) -> Result<Self, MdpError>
    where
        T: Fn(&S, &A) -> DDist<S> + 'static,
        R: Fn(&S, &A) -> f64 + 'static,
    {
        if discount_factor.is_nan() || discount_factor <= 0.0 || discount_factor > 1.0 {
            return Err(MdpError::InvalidDiscount {
                value: discount_factor,
            });
        }

        let states = states.into_iter().collect::<Interner<S>>().items().to_vec();
        let actions = actions.into_iter().collect::<Interner<A>>().items().to_vec();
        if states.is_empty() {
            return Err(MdpError::EmptyStates);
        }
        if actions.is_empty() {
            return Err(MdpError::EmptyActions);
        }

        let start = DDist::uniform(states.iter().cloned())?;

        Ok(Self {
            states,
            actions,
            transition_model: Box::new(transition_model),
            reward_fn: Box::new(reward_fn),
            terminal_fn: None,
            discount_factor,
            start,
        })
    }

    /// Replace the start distribution. Every outcome must be a declared state.
    pub fn with_start(mut self, start: DDist<S>) -> Result<Self, MdpError> {
        if let Some((unknown, _)) = start.support().find(|(s, _)| !self.states.contains(s)) {
            return Err(MdpError::UnknownState {
                state: format!("{unknown:?}"),
            });
        }
        self.start = start;
        Ok(self)
    }

    /// Mark states as terminal with a predicate.
    pub fn with_terminal<F>(mut self, terminal_fn: F) -> Self
    where
        F: Fn(&S) -> bool + 'static,
    {
        self.terminal_fn = Some(Box::new(terminal_fn));
        self
    }

    pub fn states(&self) -> &[S] {
        &self.states
    }

    pub fn actions(&self) -> &[A] {
        &self.actions
    }

    pub fn discount_factor(&self) -> f64 {
        self.discount_factor
    }

    /// Borrow the start-state distribution.
    pub fn start(&self) -> &DDist<S> {
        &self.start
    }

    /// Immediate reward for taking `action` in `state`.
    pub fn reward(&self, state: &S, action: &A) -> f64 {
        (self.reward_fn)(state, action)
    }

    /// Next-state distribution for taking `action` in `state`.
    pub fn transition(&self, state: &S, action: &A) -> DDist<S> {
        (self.transition_model)(state, action)
    }

    /// Return whether `state` is terminal. Nothing is terminal by default.
    pub fn terminal(&self, state: &S) -> bool {
        self.terminal_fn.as_ref().is_some_and(|f| f(state))
    }

    /// Draw a state from the start distribution.
    pub fn init_state<R>(&self, rng: &mut R) -> S
    where
        R: Rng + ?Sized,
    {
        self.start.draw(rng).clone()
    }

    /// Simulate one step, returning `(reward, next_state)`.
    /// Terminal states restart from the start distribution.
    pub fn sim_transition<R>(&self, state: &S, action: &A, rng: &mut R) -> (f64, S)
    where
        R: Rng + ?Sized,
    {
        let reward = self.reward(state, action);
        let next = if self.terminal(state) {
            self.init_state(rng)
        } else {
            self.transition(state, action).draw(rng).clone()
        };
        (reward, next)
    }
}

impl<S, A> fmt::Debug for Mdp<S, A>
where
    S: Key,
    A: Key,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mdp")
            .field("states", &self.states)
            .field("actions", &self.actions)
            .field("discount_factor", &self.discount_factor)
            .field("start", &self.start)
            .field("has_terminal_fn", &self.terminal_fn.is_some())
            .finish_non_exhaustive()
    }
}
