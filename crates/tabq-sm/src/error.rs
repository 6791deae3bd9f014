use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Error type for state-machine construction and fallible transduction.
pub enum SmError {
    #[error("parameter '{name}' must have shape {expected:?}, got {actual:?}")]
    DimensionMismatch {
        name: &'static str,
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("input {step} must have shape {expected:?}, got {actual:?}")]
    InputShape {
        step: usize,
        expected: (usize, usize),
        actual: (usize, usize),
    },
}
