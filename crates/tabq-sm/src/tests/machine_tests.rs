use crate::{
    Accumulator, BinaryAddition, Mode, Reverser, ReverserInput, ReverserState, StateMachine,
};

#[test]
fn accumulator_emits_running_sums() {
    let outputs = Accumulator::<i64>::new().transduce([-1, 2, 3, -2, 5, 6]);
    assert_eq!(outputs, vec![-1, 1, 4, 2, 7, 13]);

    let floats = Accumulator::<f64>::new().transduce([0.5, 0.25]);
    assert_eq!(floats, vec![0.5, 0.75]);
}

#[test]
fn binary_addition_carries() {
    let outputs = BinaryAddition.transduce([(1, 1), (1, 0), (0, 0)]);
    assert_eq!(outputs, vec![0, 0, 1]);

    // 0b0111 + 0b0101 = 0b1100, least significant bit first.
    let outputs = BinaryAddition.transduce([(1, 1), (1, 0), (1, 1), (0, 0)]);
    assert_eq!(outputs, vec![0, 0, 1, 1]);
}

#[test]
fn binary_addition_accepts_non_bit_inputs() {
    let outputs = BinaryAddition.transduce([(255, 1), (0, 0), (2, 3)]);
    assert_eq!(outputs, vec![0, 1, 1]);

    let state = BinaryAddition.transition((1, 0), (u8::MAX, u8::MAX));
    assert_eq!(state, (1, 1));
}

#[test]
fn reverser_replays_symbols_backwards() {
    let inputs = ["foo", " ", "bar"]
        .into_iter()
        .map(ReverserInput::Symbol)
        .chain([ReverserInput::End])
        .chain(["0", "1", "2", "3", "4"].into_iter().map(ReverserInput::Symbol));

    let outputs = Reverser::new().transduce(inputs);
    assert_eq!(
        outputs,
        vec![
            None,
            None,
            None,
            Some("bar"),
            Some(" "),
            Some("foo"),
            None,
            None,
            None
        ]
    );
}

#[test]
fn reverser_end_while_replaying_keeps_symbols() {
    let reverser = Reverser::new();
    let state = ReverserState {
        symbols: vec![1, 2],
        mode: Mode::Replaying,
    };

    let next = reverser.transition(state.clone(), ReverserInput::End);
    assert_eq!(next, state);
    assert_eq!(reverser.output(&next), Some(2));
}

#[test]
fn empty_input_gives_empty_output() {
    assert!(Accumulator::<i64>::new().transduce([]).is_empty());
    assert!(BinaryAddition.transduce([]).is_empty());
    assert!(Reverser::<char>::new().transduce([]).is_empty());
}
