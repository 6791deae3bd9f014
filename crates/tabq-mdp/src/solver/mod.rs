pub mod config;
pub mod value_iteration;

pub use config::{SolverConfig, SolverConfigError};
pub use value_iteration::{
    Solution, SolveMetrics, SweepMetrics, bellman_sweep, value_iteration,
    value_iteration_with_hook,
};
