/// Deterministic transducer from an input sequence to an output sequence.
///
/// Implementors only describe one step; [`StateMachine::transduce`] threads
/// the state through the whole sequence.
pub trait StateMachine {
    type State;
    type Input;
    type Output;

    /// State before any input has been consumed.
    fn start_state(&self) -> Self::State;

    /// Consume one input and return the next state.
    fn transition(&self, state: Self::State, input: Self::Input) -> Self::State;

    /// Output emitted in `state`.
    fn output(&self, state: &Self::State) -> Self::Output;

    /// Feed `inputs` left to right, one transition per input, collecting the
    /// output of each new state. The result has exactly one output per input.
    fn transduce<I>(&self, inputs: I) -> Vec<Self::Output>
    where
        I: IntoIterator<Item = Self::Input>,
    {
        let mut state = self.start_state();
        let mut outputs = Vec::new();

        for input in inputs {
            state = self.transition(state, input);
            outputs.push(self.output(&state));
        }

        outputs
    }
}
