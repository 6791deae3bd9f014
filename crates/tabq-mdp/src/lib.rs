mod builder;
mod dist;
mod error;
pub mod expectimax;
mod interner;
mod model;
pub mod policy;
mod q_table;
mod simulator;
pub mod solver;

#[cfg(test)]
mod tests;

pub use builder::MdpBuilder;
pub use dist::{DDist, PROB_TOLERANCE};
pub use error::MdpError;
pub use expectimax::{greedy_em, q_em};
pub use interner::{Interner, Key};
pub use model::Mdp;
pub use policy::{DEFAULT_EPSILON, epsilon_greedy, greedy, value};
pub use q_table::TabularQ;
pub use simulator::{MdpSimulator, Transition};
pub use solver::{
    Solution, SolveMetrics, SolverConfig, SolverConfigError, SweepMetrics, bellman_sweep,
    value_iteration, value_iteration_with_hook,
};
