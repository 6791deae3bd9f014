use crate::StateMachine;

/// Serial adder over pairs of bits, least significant pair first.
///
/// State is `(carry, digit)`; each step emits the sum digit for that position.
/// Non-bit inputs follow the same rule: carry when the total exceeds one,
/// emit the parity of the total.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinaryAddition;

impl StateMachine for BinaryAddition {
    type State = (u8, u8);
    type Input = (u8, u8);
    type Output = u8;

    fn start_state(&self) -> (u8, u8) {
        (0, 0)
    }

    fn transition(&self, (carry, _digit): (u8, u8), (i0, i1): (u8, u8)) -> (u8, u8) {
        let total = u32::from(i0) + u32::from(i1) + u32::from(carry);
        (u8::from(total > 1), u8::from(total % 2 == 1))
    }

    fn output(&self, &(_carry, digit): &(u8, u8)) -> u8 {
        digit
    }
}
