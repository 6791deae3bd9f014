mod accumulator;
mod binary_addition;
mod reverser;
mod rnn;

pub use accumulator::Accumulator;
pub use binary_addition::BinaryAddition;
pub use reverser::{Mode, Reverser, ReverserInput, ReverserState};
pub use rnn::Rnn;
