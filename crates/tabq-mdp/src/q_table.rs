use crate::{Interner, Key, MdpError};

#[derive(Debug, Clone)]
/// Dense Q table over every declared `(state, action)` pair.
///
/// Values live in one flat row-major buffer (`state * |actions| + action`).
/// `clone()` yields a fully independent snapshot, which the solver relies on
/// to read the previous sweep while writing the next one.
pub struct TabularQ<S, A>
where
    S: Key,
    A: Key,
{
    states: Interner<S>,
    actions: Interner<A>,
    values: Vec<f64>,
}

impl<S, A> TabularQ<S, A>
where
    S: Key,
    A: Key,
{
    /// Create a table with every entry set to 0.0.
    pub fn new(states: impl IntoIterator<Item = S>, actions: impl IntoIterator<Item = A>) -> Self {
        Self::with_initial(states, actions, 0.0)
    }

    /// Create a table with every entry set to `initial`.
    /// Repeated states or actions collapse into a single row or column.
    pub fn with_initial(
        states: impl IntoIterator<Item = S>,
        actions: impl IntoIterator<Item = A>,
        initial: f64,
    ) -> Self {
        let states: Interner<S> = states.into_iter().collect();
        let actions: Interner<A> = actions.into_iter().collect();
        let values = vec![initial; states.len() * actions.len()];
        Self {
            states,
            actions,
            values,
        }
    }

    fn slot(&self, state: &S, action: &A) -> Result<usize, MdpError> {
        match (self.states.index_of(state), self.actions.index_of(action)) {
            (Some(s), Some(a)) => Ok(s * self.actions.len() + a),
            _ => Err(MdpError::missing_entry(state, action)),
        }
    }

    /// Look up the current value of `(state, action)`.
    pub fn get(&self, state: &S, action: &A) -> Result<f64, MdpError> {
        let slot = self.slot(state, action)?;
        Ok(self.values[slot])
    }

    /// Overwrite the value of a declared `(state, action)` pair.
    pub fn set(&mut self, state: &S, action: &A, value: f64) -> Result<(), MdpError> {
        let slot = self.slot(state, action)?;
        self.values[slot] = value;
        Ok(())
    }

    /// Declared states in enumeration order.
    pub fn states(&self) -> &[S] {
        self.states.items()
    }

    /// Declared actions in enumeration order.
    pub fn actions(&self) -> &[A] {
        self.actions.items()
    }

    /// Number of entries in the table.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate `(state, action, value)` in row-major enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = (&S, &A, f64)> + '_ {
        let width = self.actions.len();
        self.values.iter().enumerate().filter_map(move |(slot, value)| {
            let state = self.states.get(slot / width)?;
            let action = self.actions.get(slot % width)?;
            Some((state, action, *value))
        })
    }

    /// Sup-norm distance to `other`, over this table's entries.
    pub fn max_abs_diff(&self, other: &Self) -> Result<f64, MdpError> {
        let mut delta = 0.0_f64;
        for (state, action, value) in self.iter() {
            delta = delta.max((value - other.get(state, action)?).abs());
        }
        Ok(delta)
    }
}
