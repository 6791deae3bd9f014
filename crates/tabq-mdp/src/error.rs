use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
/// Error type for distributions, Q-tables, MDP construction, and builder operations.
pub enum MdpError {
    #[error("no Q entry for state {state}, action {action}")]
    MissingEntry { state: String, action: String },

    #[error("state set is empty")]
    EmptyStates,

    #[error("action set is empty")]
    EmptyActions,

    #[error("distribution must contain at least one outcome")]
    EmptyDistribution,

    #[error("invalid probability for outcome {index}: {value}")]
    InvalidProbability { index: usize, value: f64 },

    #[error("probability sum must be within {tolerance} of 1.0, got {sum}")]
    ProbabilitySum { sum: f64, tolerance: f64 },

    #[error("discount factor must be in (0, 1], got {value}")]
    InvalidDiscount { value: f64 },

    #[error("exploration rate must be in [0, 1], got {value}")]
    InvalidEpsilon { value: f64 },

    #[error("duplicate state id '{id}'")]
    DuplicateStateId { id: String },

    #[error("duplicate action id '{id}'")]
    DuplicateActionId { id: String },

    #[error("builder referenced unknown state '{state}'")]
    UnknownState { state: String },

    #[error("builder referenced unknown action '{action}'")]
    UnknownAction { action: String },

    #[error("state '{state}' action '{action}' must contain at least one outcome")]
    EmptyOutcomes { state: String, action: String },

    #[error("invalid reward in state '{state}', action '{action}': {value}")]
    InvalidReward {
        state: String,
        action: String,
        value: f64,
    },

    #[error("transition for state '{state}', action '{action}' is invalid: {source}")]
    InvalidTransition {
        state: String,
        action: String,
        #[source]
        source: Box<MdpError>,
    },
}

impl MdpError {
    pub(crate) fn missing_entry<S, A>(state: &S, action: &A) -> Self
    where
        S: std::fmt::Debug,
        A: std::fmt::Debug,
    {
        MdpError::MissingEntry {
            state: format!("{state:?}"),
            action: format!("{action:?}"),
        }
    }
}
