use std::marker::PhantomData;

use crate::StateMachine;

/// Input to [`Reverser`]: a symbol to remember, or the end-of-input marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReverserInput<T> {
    Symbol(T),
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Reading,
    Replaying,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReverserState<T> {
    pub symbols: Vec<T>,
    pub mode: Mode,
}

/// Echoes the symbols seen before `End` in reverse order.
///
/// Emits `None` while reading. After `End`, each further input (of any kind)
/// drops the most recent symbol, and the machine emits the newest remaining
/// symbol until none are left.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reverser<T> {
    _symbol: PhantomData<T>,
}

impl<T> Reverser<T> {
    pub fn new() -> Self {
        Reverser {
            _symbol: PhantomData,
        }
    }
}

impl<T> StateMachine for Reverser<T>
where
    T: Clone,
{
    type State = ReverserState<T>;
    type Input = ReverserInput<T>;
    type Output = Option<T>;

    fn start_state(&self) -> ReverserState<T> {
        ReverserState {
            symbols: Vec::new(),
            mode: Mode::Reading,
        }
    }

    fn transition(&self, mut state: ReverserState<T>, input: ReverserInput<T>) -> ReverserState<T> {
        match (input, state.mode) {
            (ReverserInput::End, _) => state.mode = Mode::Replaying,
            (ReverserInput::Symbol(symbol), Mode::Reading) => state.symbols.push(symbol),
            (ReverserInput::Symbol(_), Mode::Replaying) => {
                state.symbols.pop();
            }
        }
        state
    }

    fn output(&self, state: &ReverserState<T>) -> Option<T> {
        match state.mode {
            Mode::Replaying => state.symbols.last().cloned(),
            Mode::Reading => None,
        }
    }
}
