mod expectimax_tests;
mod value_iteration_tests;

use crate::{DDist, Mdp};

/// Two states, two deterministic actions: `stay` keeps the state, `move` flips it.
/// Every action taken in state 1 pays 1.0.
pub(crate) fn two_state_mdp(gamma: f64) -> Mdp<u8, &'static str> {
    Mdp::new(
        [0_u8, 1],
        ["stay", "move"],
        |state: &u8, action: &&str| match *action {
            "stay" => DDist::delta(*state),
            _ => DDist::delta(1 - *state),
        },
        |state: &u8, _action: &&str| if *state == 1 { 1.0 } else { 0.0 },
        gamma,
    )
    .expect("two-state mdp should be valid")
}
