use std::marker::PhantomData;
use std::ops::Add;

use crate::StateMachine;

/// Running sum of its inputs, starting from `T::default()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Accumulator<T> {
    _value: PhantomData<T>,
}

impl<T> Accumulator<T> {
    pub fn new() -> Self {
        Accumulator {
            _value: PhantomData,
        }
    }
}

impl<T> StateMachine for Accumulator<T>
where
    T: Copy + Default + Add<Output = T>,
{
    type State = T;
    type Input = T;
    type Output = T;

    fn start_state(&self) -> T {
        T::default()
    }

    fn transition(&self, state: T, input: T) -> T {
        state + input
    }

    fn output(&self, state: &T) -> T {
        *state
    }
}
