use rand::Rng;

use crate::{Key, MdpError, TabularQ};

/// Default exploration rate for [`epsilon_greedy`].
pub const DEFAULT_EPSILON: f64 = 0.5;

/// State value under `q`: the maximum Q value over the table's actions.
pub fn value<S, A>(q: &TabularQ<S, A>, state: &S) -> Result<f64, MdpError>
where
    S: Key,
    A: Key,
{
    if q.states().is_empty() {
        return Err(MdpError::EmptyStates);
    }

    let mut best: Option<f64> = None;
    for action in q.actions() {
        let candidate = q.get(state, action)?;
        best = match best {
            Some(best_q) if best_q >= candidate => Some(best_q),
            _ => Some(candidate),
        };
    }
    best.ok_or(MdpError::EmptyActions)
}

/// Greedy action under `q`.
/// Ties go to the action declared first in the table.
pub fn greedy<S, A>(q: &TabularQ<S, A>, state: &S) -> Result<A, MdpError>
where
    S: Key,
    A: Key,
{
    if q.states().is_empty() {
        return Err(MdpError::EmptyStates);
    }

    let mut best: Option<(&A, f64)> = None;
    for action in q.actions() {
        let candidate = q.get(state, action)?;
        best = match best {
            Some((best_action, best_q)) if best_q >= candidate => Some((best_action, best_q)),
            _ => Some((action, candidate)),
        };
    }
    best.map(|(action, _)| action.clone()).ok_or(MdpError::EmptyActions)
}

/// With probability `eps` pick a uniformly random action, otherwise act greedily.
pub fn epsilon_greedy<S, A, R>(
    q: &TabularQ<S, A>,
    state: &S,
    eps: f64,
    rng: &mut R,
) -> Result<A, MdpError>
where
    S: Key,
    A: Key,
    R: Rng + ?Sized,
{
    if !(0.0..=1.0).contains(&eps) {
        return Err(MdpError::InvalidEpsilon { value: eps });
    }

    if q.states().is_empty() {
        return Err(MdpError::EmptyStates);
    }
    let actions = q.actions();
    if actions.is_empty() {
        return Err(MdpError::EmptyActions);
    }
    q.get(state, &actions[0])?;

    if rng.gen_bool(eps) {
        let index = rng.gen_range(0..actions.len());
        Ok(actions[index].clone())
    } else {
        greedy(q, state)
    }
}
