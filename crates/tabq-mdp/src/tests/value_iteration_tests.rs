use crate::{
    MdpError, SolverConfig, TabularQ, bellman_sweep, greedy, tests::two_state_mdp, value,
    value_iteration, value_iteration_with_hook,
};

const TOL: f64 = 1e-12;

#[test]
fn converges_to_known_optimum() {
    let mdp = two_state_mdp(0.9);
    let q = TabularQ::new(mdp.states().to_vec(), mdp.actions().to_vec());
    let config = SolverConfig {
        eps: 1e-6,
        max_iters: 10_000,
    };

    let solution = value_iteration(&mdp, q, &config).expect("solver should succeed");

    assert!(solution.metrics.converged);
    assert!(solution.metrics.final_delta < config.eps);
    assert!(solution.metrics.sweeps_completed < config.max_iters);

    let q = &solution.q;
    let expected = [
        (0_u8, "stay", 8.1),
        (0, "move", 9.0),
        (1, "stay", 10.0),
        (1, "move", 9.1),
    ];
    for (state, action, target) in expected {
        let got = q.get(&state, &action).expect("declared pair");
        assert!((got - target).abs() < 1e-4, "Q({state}, {action}) = {got}");
    }

    assert_eq!(greedy(q, &0).expect("actions exist"), "move");
    assert_eq!(greedy(q, &1).expect("actions exist"), "stay");
    assert!((value(q, &1).expect("actions exist") - 10.0).abs() < 1e-4);
}

#[test]
fn sweeps_read_only_the_previous_table() {
    let mdp = two_state_mdp(0.9);
    let q = TabularQ::new(mdp.states().to_vec(), mdp.actions().to_vec());

    let (first, delta_1) = bellman_sweep(&mdp, &q).expect("sweep should succeed");
    assert!((delta_1 - 1.0).abs() < TOL);
    assert_eq!(q.get(&1, &"stay").expect("declared pair"), 0.0);

    let (second, delta_2) = bellman_sweep(&mdp, &first).expect("sweep should succeed");
    assert!((delta_2 - 0.9).abs() < TOL);

    // An in-place update would already see Q(0, move) = 0.9 here and give 1.81.
    assert!((second.get(&1, &"move").expect("declared pair") - 1.0).abs() < TOL);
    assert!((second.get(&1, &"stay").expect("declared pair") - 1.9).abs() < TOL);
    assert!((second.get(&0, &"move").expect("declared pair") - 0.9).abs() < TOL);
}

#[test]
fn observer_sees_each_completed_sweep_once() {
    let mdp = two_state_mdp(0.5);
    let q = TabularQ::new(mdp.states().to_vec(), mdp.actions().to_vec());
    let config = SolverConfig {
        eps: 1e-3,
        max_iters: 1_000,
    };

    let mut seen: Vec<(usize, f64, TabularQ<u8, &'static str>)> = Vec::new();
    let solution = value_iteration_with_hook(&mdp, q, &config, |table, sweep| {
        seen.push((sweep.sweep, sweep.delta, table.clone()));
    })
    .expect("solver should succeed");

    assert_eq!(seen.len(), solution.metrics.sweeps_completed);
    for (expected_index, (sweep, _, _)) in seen.iter().enumerate() {
        assert_eq!(*sweep, expected_index);
    }
    assert!(
        seen.windows(2).all(|w| w[1].1 <= w[0].1 + 1e-12),
        "deltas should not grow for discount below one"
    );

    let (_, last_delta, last_table) = seen.last().expect("at least one sweep");
    assert_eq!(*last_delta, solution.metrics.final_delta);
    assert_eq!(
        last_table.max_abs_diff(&solution.q).expect("same domain"),
        0.0
    );
}

#[test]
fn budget_exhaustion_returns_last_table_without_error() {
    let mdp = two_state_mdp(0.9);
    let q = TabularQ::new(mdp.states().to_vec(), mdp.actions().to_vec());
    let config = SolverConfig {
        eps: 1e-9,
        max_iters: 3,
    };

    let solution = value_iteration(&mdp, q, &config).expect("solver should succeed");

    assert!(!solution.metrics.converged);
    assert_eq!(solution.metrics.sweeps_requested, 3);
    assert_eq!(solution.metrics.sweeps_completed, 3);
    assert!((solution.metrics.final_delta - 0.81).abs() < TOL);
    assert!((solution.q.get(&1, &"stay").expect("declared pair") - 2.71).abs() < TOL);
    assert!((solution.q.get(&0, &"stay").expect("declared pair") - 0.81).abs() < TOL);
}

#[test]
fn deterministic_across_runs() {
    let mdp = two_state_mdp(0.8);
    let config = SolverConfig::default();

    let run = || {
        let q = TabularQ::new(mdp.states().to_vec(), mdp.actions().to_vec());
        value_iteration(&mdp, q, &config).expect("solver should succeed")
    };
    let a = run();
    let b = run();

    assert_eq!(a.metrics, b.metrics);
    assert_eq!(a.q.max_abs_diff(&b.q).expect("same domain"), 0.0);
}

#[test]
fn table_missing_mdp_states_is_reported() {
    let mdp = two_state_mdp(0.9);
    let q = TabularQ::new([0_u8], ["stay", "move"]);

    let err = value_iteration(&mdp, q, &SolverConfig::default()).expect_err("state 1 is missing");
    assert!(matches!(err, MdpError::MissingEntry { .. }));
}

#[test]
fn default_config_yaml_parses() {
    let config = SolverConfig::from_default_yaml().expect("default yaml should parse");
    assert_eq!(config, SolverConfig::default());
}

#[test]
fn config_yaml_overrides_and_validation() {
    let config = SolverConfig::from_yaml_str("eps: 0.5\n").expect("partial yaml should parse");
    assert_eq!(config.eps, 0.5);
    assert_eq!(config.max_iters, SolverConfig::default().max_iters);

    let err = SolverConfig::from_yaml_str("eps: 0.0\n").expect_err("eps must be positive");
    assert!(err.to_string().contains("eps"));

    let err = SolverConfig::from_yaml_str("max_iters: 0\n").expect_err("budget must be nonzero");
    assert!(err.to_string().contains("max_iters"));

    let err = SolverConfig::from_yaml_str("eps: [").expect_err("broken yaml");
    assert!(err.to_string().starts_with("failed to parse config YAML"));
}
