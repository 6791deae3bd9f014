use crate::{
    MdpBuilder, SolverConfig, TabularQ, greedy_em, q_em, tests::two_state_mdp, value_iteration,
};

#[test]
fn zero_horizon_is_zero() {
    let mdp = two_state_mdp(0.9);
    for state in mdp.states() {
        for action in mdp.actions() {
            assert_eq!(q_em(&mdp, state, action, 0), 0.0);
        }
    }
}

#[test]
fn unit_horizon_is_immediate_reward() {
    let mdp = two_state_mdp(0.9);
    assert_eq!(q_em(&mdp, &1, &"move", 1), 1.0);
    assert_eq!(q_em(&mdp, &0, &"stay", 1), 0.0);
}

#[test]
fn horizon_matches_value_iteration_from_zero() {
    let mut builder = MdpBuilder::new();
    builder
        .add_state("low", false)
        .add_state("high", false)
        .add_state("done", true)
        .add_action("wait")
        .add_action("push")
        .set_discount(0.8);
    builder
        .add_outcome("low", "wait", "low", 1.0)
        .expect("declared pair")
        .add_outcome("low", "push", "high", 0.6)
        .expect("declared pair")
        .add_outcome("low", "push", "low", 0.4)
        .expect("declared pair")
        .add_outcome("high", "wait", "high", 0.5)
        .expect("declared pair")
        .add_outcome("high", "wait", "low", 0.5)
        .expect("declared pair")
        .add_outcome("high", "push", "done", 1.0)
        .expect("declared pair")
        .set_reward("low", "push", -0.5)
        .expect("declared pair")
        .set_reward("high", "wait", 1.0)
        .expect("declared pair")
        .set_reward("high", "push", 3.0)
        .expect("declared pair");
    let mdp = builder.build().expect("valid mdp");

    let horizon = 4;
    let q = TabularQ::new(mdp.states().to_vec(), mdp.actions().to_vec());
    let config = SolverConfig {
        eps: 1e-12,
        max_iters: horizon,
    };
    let solution = value_iteration(&mdp, q, &config).expect("solver should succeed");
    assert_eq!(solution.metrics.sweeps_completed, horizon);

    for state in mdp.states() {
        for action in mdp.actions() {
            let lookahead = q_em(&mdp, state, action, horizon);
            let swept = solution.q.get(state, action).expect("declared pair");
            assert!(
                (lookahead - swept).abs() < 1e-9,
                "Q({state}, {action}): expectimax {lookahead} vs sweep {swept}"
            );
        }
    }
}

#[test]
fn greedy_em_prefers_long_term_reward() {
    let mdp = two_state_mdp(0.9);

    // One step ahead both actions from state 0 pay nothing; two steps ahead `move` wins.
    assert_eq!(greedy_em(&mdp, &0, 1).expect("actions exist"), "stay");
    assert_eq!(greedy_em(&mdp, &0, 2).expect("actions exist"), "move");
    assert_eq!(greedy_em(&mdp, &1, 3).expect("actions exist"), "stay");
}
