use ndarray::Array2;
use tracing::debug;

use crate::{Activation, SmError, StateMachine};

/// Single-layer recurrent network run as a state machine.
///
/// With input size `l`, state size `m` and output size `n`:
/// - `w_sx` is `m x l`, `w_ss` is `m x m`, `w_ss_0` is `m x 1`
/// - `w_o` is `n x m`, `w_o_0` is `n x 1`
///
/// The state starts at zero and evolves as `s' = f1(w_sx x + w_ss s + w_ss_0)`;
/// each step emits `f2(w_o s' + w_o_0)`.
#[derive(Debug, Clone)]
pub struct Rnn {
    w_sx: Array2<f64>,
    w_ss: Array2<f64>,
    w_o: Array2<f64>,
    w_ss_0: Array2<f64>,
    w_o_0: Array2<f64>,
    f1: Activation,
    f2: Activation,
}

fn expect_shape(
    name: &'static str,
    matrix: &Array2<f64>,
    expected: (usize, usize),
) -> Result<(), SmError> {
    let actual = matrix.dim();
    if actual != expected {
        return Err(SmError::DimensionMismatch {
            name,
            expected,
            actual,
        });
    }
    Ok(())
}

impl Rnn {
    /// Create a network, checking that all parameter shapes agree.
    /// The state size is taken from `w_ss`, which must be square.
    pub fn new(
        w_sx: Array2<f64>,
        w_ss: Array2<f64>,
        w_o: Array2<f64>,
        w_ss_0: Array2<f64>,
        w_o_0: Array2<f64>,
        f1: Activation,
        f2: Activation,
    ) -> Result<Self, SmError> {
        let m = w_ss.ncols();
        let l = w_sx.ncols();
        let n = w_o.nrows();

        expect_shape("w_ss", &w_ss, (m, m))?;
        expect_shape("w_sx", &w_sx, (m, l))?;
        expect_shape("w_o", &w_o, (n, m))?;
        expect_shape("w_ss_0", &w_ss_0, (m, 1))?;
        expect_shape("w_o_0", &w_o_0, (n, 1))?;

        Ok(Self {
            w_sx,
            w_ss,
            w_o,
            w_ss_0,
            w_o_0,
            f1,
            f2,
        })
    }

    /// Input size `l`.
    pub fn input_dim(&self) -> usize {
        self.w_sx.ncols()
    }

    /// State size `m`.
    pub fn state_dim(&self) -> usize {
        self.w_ss.ncols()
    }

    /// Output size `n`.
    pub fn output_dim(&self) -> usize {
        self.w_o.nrows()
    }

    /// Like [`StateMachine::transduce`], but rejects inputs that are not `l x 1`
    /// column vectors instead of panicking inside the matrix product.
    pub fn try_transduce<I>(&self, inputs: I) -> Result<Vec<Array2<f64>>, SmError>
    where
        I: IntoIterator<Item = Array2<f64>>,
    {
        let inputs: Vec<Array2<f64>> = inputs.into_iter().collect();
        let expected = (self.input_dim(), 1);

        for (step, input) in inputs.iter().enumerate() {
            let actual = input.dim();
            if actual != expected {
                debug!(step, ?expected, ?actual, "rejecting mis-shaped rnn input");
                return Err(SmError::InputShape {
                    step,
                    expected,
                    actual,
                });
            }
        }

        Ok(self.transduce(inputs))
    }
}

impl StateMachine for Rnn {
    type State = Array2<f64>;
    type Input = Array2<f64>;
    type Output = Array2<f64>;

    fn start_state(&self) -> Array2<f64> {
        Array2::zeros((self.state_dim(), 1))
    }

    /// # Panics
    /// If `input` is not an `l x 1` column vector; see [`Rnn::try_transduce`].
    fn transition(&self, state: Array2<f64>, input: Array2<f64>) -> Array2<f64> {
        let pre = self.w_sx.dot(&input) + self.w_ss.dot(&state) + &self.w_ss_0;
        self.f1.apply(&pre)
    }

    fn output(&self, state: &Array2<f64>) -> Array2<f64> {
        let pre = self.w_o.dot(state) + &self.w_o_0;
        self.f2.apply(&pre)
    }
}
