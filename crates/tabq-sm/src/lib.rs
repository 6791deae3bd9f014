mod activation;
mod error;
mod machine;
pub mod machines;

#[cfg(test)]
mod tests;

pub use activation::Activation;
pub use error::SmError;
pub use machine::StateMachine;
pub use machines::{
    Accumulator, BinaryAddition, Mode, Reverser, ReverserInput, ReverserState, Rnn,
};
