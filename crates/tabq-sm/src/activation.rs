use ndarray::{Array2, Axis};

/// Element-wise (or column-wise, for softmax) nonlinearity applied by [`crate::Rnn`].
#[derive(Debug, Clone, Copy)]
pub enum Activation {
    Identity,
    Tanh,
    Sigmoid,
    Relu,
    /// Normalizes each column to a probability vector.
    Softmax,
    Custom(fn(&Array2<f64>) -> Array2<f64>),
}

impl Activation {
    pub fn apply(&self, z: &Array2<f64>) -> Array2<f64> {
        match self {
            Activation::Identity => z.clone(),
            Activation::Tanh => z.mapv(f64::tanh),
            Activation::Sigmoid => z.mapv(|v| 1.0 / (1.0 + (-v).exp())),
            Activation::Relu => z.mapv(|v| v.max(0.0)),
            Activation::Softmax => {
                let exp = z.mapv(f64::exp);
                let sums = exp.sum_axis(Axis(0));
                exp / &sums
            }
            Activation::Custom(f) => f(z),
        }
    }
}
