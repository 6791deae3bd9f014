use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use crate::{DDist, Mdp, MdpError};

type EdgeTable = HashMap<String, HashMap<String, Edge>>;

#[derive(Debug, Clone)]
struct StateDecl {
    id: String,
    terminal: bool,
    edges: Vec<EdgeDecl>,
}

#[derive(Debug, Clone)]
struct EdgeDecl {
    action: String,
    reward: f64,
    outcomes: Vec<(String, f64)>,
}

#[derive(Debug, Clone)]
struct Edge {
    reward: f64,
    next: DDist<String>,
}

#[derive(Debug, Clone, Default)]
/// Struct to build tabular MDPs from string ids
///
/// Every declared action is available in every state. Terminal states may
/// omit outcomes, in which case they loop back to themselves.
pub struct MdpBuilder {
    start: Option<String>,
    discount: Option<f64>,
    states: Vec<StateDecl>,
    actions: Vec<String>,
}

impl MdpBuilder {
    /// Create a new MdpBuilder
    pub fn new() -> Self {
        Self::default()
    }

    /// Start every episode in `state` instead of a uniformly drawn one
    pub fn set_start(&mut self, state: impl Into<String>) -> &mut Self {
        self.start = Some(state.into());
        self
    }

    /// Discount factor, 1.0 if never set
    pub fn set_discount(&mut self, discount: f64) -> &mut Self {
        self.discount = Some(discount);
        self
    }

    /// Add a new state
    /// Terminal flag if episodes restart after leaving this state
    pub fn add_state(&mut self, id: impl Into<String>, terminal: bool) -> &mut Self {
        self.states.push(StateDecl {
            id: id.into(),
            terminal,
            edges: Vec::new(),
        });
        self
    }

    /// Add an action, available in every state
    pub fn add_action(&mut self, id: impl Into<String>) -> &mut Self {
        self.actions.push(id.into());
        self
    }

    fn edge_mut(&mut self, state_id: &str, action_id: &str) -> Result<&mut EdgeDecl, MdpError> {
        if !self.actions.iter().any(|a| a == action_id) {
            return Err(MdpError::UnknownAction {
                action: action_id.to_string(),
            });
        }

        let state = self
            .states
            .iter_mut()
            .find(|s| s.id == state_id)
            .ok_or_else(|| MdpError::UnknownState {
                state: state_id.to_string(),
            })?;

        let index = match state.edges.iter().position(|e| e.action == action_id) {
            Some(index) => index,
            None => {
                state.edges.push(EdgeDecl {
                    action: action_id.to_string(),
                    reward: 0.0,
                    outcomes: Vec::new(),
                });
                state.edges.len() - 1
            }
        };
        Ok(&mut state.edges[index])
    }

    /// Add an outcome to a `(state, action)` pair
    /// Actions can be stochastic so one pair may collect several outcomes
    pub fn add_outcome(
        &mut self,
        state_id: impl AsRef<str>,
        action_id: impl AsRef<str>,
        next: impl Into<String>,
        prob: f64,
    ) -> Result<&mut Self, MdpError> {
        let edge = self.edge_mut(state_id.as_ref(), action_id.as_ref())?;
        edge.outcomes.push((next.into(), prob));
        Ok(self)
    }

    /// Set the immediate reward of a `(state, action)` pair (0.0 if never set)
    pub fn set_reward(
        &mut self,
        state_id: impl AsRef<str>,
        action_id: impl AsRef<str>,
        reward: f64,
    ) -> Result<&mut Self, MdpError> {
        let edge = self.edge_mut(state_id.as_ref(), action_id.as_ref())?;
        edge.reward = reward;
        Ok(self)
    }

    fn validate_ids(&self) -> Result<HashSet<&str>, MdpError> {
        let mut state_ids = HashSet::with_capacity(self.states.len());
        for state in &self.states {
            if !state_ids.insert(state.id.as_str()) {
                return Err(MdpError::DuplicateStateId {
                    id: state.id.clone(),
                });
            }
        }

        let mut action_ids = HashSet::with_capacity(self.actions.len());
        for action in &self.actions {
            if !action_ids.insert(action.as_str()) {
                return Err(MdpError::DuplicateActionId { id: action.clone() });
            }
        }

        if let Some(start) = &self.start {
            if !state_ids.contains(start.as_str()) {
                return Err(MdpError::UnknownState {
                    state: start.clone(),
                });
            }
        }

        Ok(state_ids)
    }

    fn compile_edge(
        state: &StateDecl,
        action: &str,
        known_states: &HashSet<&str>,
    ) -> Result<Edge, MdpError> {
        let decl = state.edges.iter().find(|e| e.action == action);
        let (reward, outcomes) = match decl {
            Some(decl) => (decl.reward, decl.outcomes.as_slice()),
            None => (0.0, &[][..]),
        };

        if !reward.is_finite() {
            return Err(MdpError::InvalidReward {
                state: state.id.clone(),
                action: action.to_string(),
                value: reward,
            });
        }

        if outcomes.is_empty() {
            if state.terminal {
                return Ok(Edge {
                    reward,
                    next: DDist::delta(state.id.clone()),
                });
            }
            return Err(MdpError::EmptyOutcomes {
                state: state.id.clone(),
                action: action.to_string(),
            });
        }

        if let Some((next, _)) = outcomes
            .iter()
            .find(|(next, _)| !known_states.contains(next.as_str()))
        {
            return Err(MdpError::UnknownState {
                state: next.clone(),
            });
        }

        let next = DDist::new(outcomes.iter().cloned()).map_err(|err| {
            MdpError::InvalidTransition {
                state: state.id.clone(),
                action: action.to_string(),
                source: Box::new(err),
            }
        })?;

        Ok(Edge { reward, next })
    }

    /// Validate the declarations and produce the MDP
    pub fn build(&self) -> Result<Mdp<String, String>, MdpError> {
        let known_states = self.validate_ids()?;

        let mut table: EdgeTable = HashMap::with_capacity(self.states.len());
        for state in &self.states {
            let mut row = HashMap::with_capacity(self.actions.len());
            for action in &self.actions {
                let edge = Self::compile_edge(state, action, &known_states)?;
                row.insert(action.clone(), edge);
            }
            table.insert(state.id.clone(), row);
        }

        let terminal: HashSet<String> = self
            .states
            .iter()
            .filter(|s| s.terminal)
            .map(|s| s.id.clone())
            .collect();

        let table = Rc::new(table);
        let transitions = Rc::clone(&table);
        let rewards = table;

        // Undeclared pairs only arise from direct caller queries; they stay put.
        let mdp = Mdp::new(
            self.states.iter().map(|s| s.id.clone()),
            self.actions.iter().cloned(),
            move |state: &String, action: &String| {
                transitions
                    .get(state)
                    .and_then(|row| row.get(action))
                    .map_or_else(|| DDist::delta(state.clone()), |edge| edge.next.clone())
            },
            move |state: &String, action: &String| {
                rewards
                    .get(state)
                    .and_then(|row| row.get(action))
                    .map_or(0.0, |edge| edge.reward)
            },
            self.discount.unwrap_or(1.0),
        )?
        .with_terminal(move |state: &String| terminal.contains(state));

        match &self.start {
            Some(start) => mdp.with_start(DDist::delta(start.clone())),
            None => Ok(mdp),
        }
    }
}
