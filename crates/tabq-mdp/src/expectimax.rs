use crate::{Key, Mdp, MdpError};

/// Finite-horizon Q estimate of `action` in `state` by exhaustive lookahead.
///
/// Alternates an expectation over the transition support with a max over
/// actions, `horizon` levels deep. Nothing is cached, so the cost grows as
/// `(|actions| * support size)^horizon`.
pub fn q_em<S, A>(mdp: &Mdp<S, A>, state: &S, action: &A, horizon: usize) -> f64
where
    S: Key,
    A: Key,
{
    if horizon == 0 {
        return 0.0;
    }

    let lookahead = mdp.transition(state, action).expectation(|next| {
        mdp.actions()
            .iter()
            .map(|next_action| q_em(mdp, next, next_action, horizon - 1))
            .fold(f64::NEG_INFINITY, f64::max)
    });

    mdp.reward(state, action) + mdp.discount_factor() * lookahead
}

/// Action maximizing [`q_em`] at `horizon`; ties go to the first declared action.
pub fn greedy_em<S, A>(mdp: &Mdp<S, A>, state: &S, horizon: usize) -> Result<A, MdpError>
where
    S: Key,
    A: Key,
{
    let mut best: Option<(&A, f64)> = None;
    for action in mdp.actions() {
        let candidate = q_em(mdp, state, action, horizon);
        best = match best {
            Some((best_action, best_q)) if best_q >= candidate => Some((best_action, best_q)),
            _ => Some((action, candidate)),
        };
    }

    best.map(|(action, _)| action.clone()).ok_or(MdpError::EmptyActions)
}
