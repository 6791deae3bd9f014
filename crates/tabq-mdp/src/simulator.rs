use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::{Key, Mdp, MdpError};

/// One simulated step.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition<S, A> {
    pub state: S,
    pub action: A,
    pub reward: f64,
    pub next_state: S,
}

#[derive(Debug)]
/// Seeded simulator over an MDP.
pub struct MdpSimulator<S, A>
where
    S: Key,
    A: Key,
{
    mdp: Mdp<S, A>,
    rng: ChaCha8Rng,
}

impl<S, A> MdpSimulator<S, A>
where
    S: Key,
    A: Key,
{
    /// Create a simulator with deterministic RNG seed.
    pub fn new(mdp: Mdp<S, A>, seed: u64) -> Self {
        Self {
            mdp,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Borrow the underlying MDP.
    pub fn mdp(&self) -> &Mdp<S, A> {
        &self.mdp
    }

    /// Borrow the RNG, e.g. to drive an exploration policy from the same stream.
    pub fn rng_mut(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    /// Draw a fresh start state.
    pub fn reset(&mut self) -> S {
        self.mdp.init_state(&mut self.rng)
    }

    /// Sample one `(reward, next_state)` transition.
    pub fn step(&mut self, state: &S, action: &A) -> (f64, S) {
        self.mdp.sim_transition(state, action, &mut self.rng)
    }

    /// Follow `policy` for `steps` transitions from `start`.
    /// Terminal states restart from the start distribution rather than ending the run.
    pub fn run<FPolicy>(
        &mut self,
        start: S,
        steps: usize,
        mut policy: FPolicy,
    ) -> Result<Vec<Transition<S, A>>, MdpError>
    where
        FPolicy: FnMut(&S, &mut ChaCha8Rng) -> Result<A, MdpError>,
    {
        let mut trajectory = Vec::with_capacity(steps);
        let mut state = start;

        for _ in 0..steps {
            let action = policy(&state, &mut self.rng)?;
            let (reward, next_state) = self.step(&state, &action);
            trajectory.push(Transition {
                state,
                action,
                reward,
                next_state: next_state.clone(),
            });
            state = next_state;
        }

        Ok(trajectory)
    }
}
