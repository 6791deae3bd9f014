use tracing::{debug, info, warn};

use crate::{Key, Mdp, MdpError, TabularQ, policy::value, solver::SolverConfig};

/// Metrics for one completed sweep over every `(state, action)` pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepMetrics {
    /// Zero-based sweep number.
    pub sweep: usize,
    /// Sup-norm change from the previous table.
    pub delta: f64,
}

/// Aggregate metrics for a complete solver run.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveMetrics {
    pub sweeps_requested: usize,
    pub sweeps_completed: usize,
    /// Delta of the last sweep, `f64::INFINITY` if no sweep ran.
    pub final_delta: f64,
    pub converged: bool,
}

impl SolveMetrics {
    fn new(sweeps_requested: usize) -> Self {
        SolveMetrics {
            sweeps_requested,
            sweeps_completed: 0,
            final_delta: f64::INFINITY,
            converged: false,
        }
    }

    fn record(&mut self, metrics: SweepMetrics) {
        self.sweeps_completed += 1;
        self.final_delta = metrics.delta;
    }
}

/// Final table of a solver run plus how it got there.
#[derive(Debug, Clone)]
pub struct Solution<S, A>
where
    S: Key,
    A: Key,
{
    pub q: TabularQ<S, A>,
    pub metrics: SolveMetrics,
}

/// Compute one synchronous Bellman optimality backup of `q`.
///
/// Every cell of the returned table is computed from `q` alone; `q` is never
/// written. Returns the new table and its sup-norm distance from `q`.
pub fn bellman_sweep<S, A>(
    mdp: &Mdp<S, A>,
    q: &TabularQ<S, A>,
) -> Result<(TabularQ<S, A>, f64), MdpError>
where
    S: Key,
    A: Key,
{
    let mut new_q = q.clone();
    let mut delta = 0.0_f64;
    let gamma = mdp.discount_factor();

    for state in mdp.states() {
        for action in mdp.actions() {
            let expected_value = mdp
                .transition(state, action)
                .try_expectation(|next| value(q, next))?;
            let target = mdp.reward(state, action) + gamma * expected_value;
            new_q.set(state, action, target)?;
            delta = delta.max((target - q.get(state, action)?).abs());
        }
    }

    Ok((new_q, delta))
}

/// Run value iteration from `q` until the sweep delta drops below `config.eps`
/// or `config.max_iters` sweeps have run.
///
/// Running out of sweeps is not an error; check `metrics.converged`.
pub fn value_iteration<S, A>(
    mdp: &Mdp<S, A>,
    q: TabularQ<S, A>,
    config: &SolverConfig,
) -> Result<Solution<S, A>, MdpError>
where
    S: Key,
    A: Key,
{
    value_iteration_with_hook(mdp, q, config, |_, _| {})
}

/// Run value iteration and invoke a callback once per completed sweep,
/// with the fully built table of that sweep.
pub fn value_iteration_with_hook<S, A, FHook>(
    mdp: &Mdp<S, A>,
    mut q: TabularQ<S, A>,
    config: &SolverConfig,
    mut on_sweep: FHook,
) -> Result<Solution<S, A>, MdpError>
where
    S: Key,
    A: Key,
    FHook: FnMut(&TabularQ<S, A>, &SweepMetrics),
{
    let mut metrics = SolveMetrics::new(config.max_iters);

    for sweep in 0..config.max_iters {
        let (new_q, delta) = bellman_sweep(mdp, &q)?;
        let sweep_metrics = SweepMetrics { sweep, delta };
        debug!(sweep, delta, "value iteration sweep");

        on_sweep(&new_q, &sweep_metrics);
        metrics.record(sweep_metrics);

        if delta < config.eps {
            metrics.converged = true;
            info!(
                sweeps = metrics.sweeps_completed,
                delta, "value iteration converged"
            );
            return Ok(Solution { q: new_q, metrics });
        }
        q = new_q;
    }

    warn!(
        sweeps = metrics.sweeps_completed,
        delta = metrics.final_delta,
        eps = config.eps,
        "value iteration stopped without converging"
    );
    Ok(Solution { q, metrics })
}
