use rand::Rng;

use crate::{Key, MdpError};

/// Floating point tolerance used when validating probability sums.
pub const PROB_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq)]
/// Discrete distribution over a finite set of outcomes.
///
/// Outcomes keep their insertion order, duplicates are merged into the first
/// occurrence and zero-probability outcomes are dropped, so the stored
/// outcomes are exactly the support. A `DDist` is never empty.
pub struct DDist<T> {
    outcomes: Vec<(T, f64)>,
    cdf: Vec<f64>,
}

impl<T> DDist<T>
where
    T: Key,
{
    /// Build a distribution from `(outcome, probability)` pairs.
    ///
    /// Probabilities must be finite, non-negative and sum to 1 within
    /// [`PROB_TOLERANCE`]. Nothing is renormalized.
    pub fn new(pairs: impl IntoIterator<Item = (T, f64)>) -> Result<Self, MdpError> {
        let pairs: Vec<(T, f64)> = pairs.into_iter().collect();
        if pairs.is_empty() {
            return Err(MdpError::EmptyDistribution);
        }

        let mut sum = 0.0_f64;
        for (index, (_, prob)) in pairs.iter().enumerate() {
            if !prob.is_finite() || *prob < 0.0 {
                return Err(MdpError::InvalidProbability {
                    index,
                    value: *prob,
                });
            }
            sum += prob;
        }

        if (sum - 1.0).abs() > PROB_TOLERANCE {
            return Err(MdpError::ProbabilitySum {
                sum,
                tolerance: PROB_TOLERANCE,
            });
        }

        let mut outcomes: Vec<(T, f64)> = Vec::with_capacity(pairs.len());
        for (outcome, prob) in pairs {
            if prob == 0.0 {
                continue;
            }
            match outcomes.iter_mut().find(|(existing, _)| *existing == outcome) {
                Some((_, total)) => *total += prob,
                None => outcomes.push((outcome, prob)),
            }
        }

        Ok(Self::from_support(outcomes))
    }

    /// Point mass on a single outcome.
    pub fn delta(outcome: T) -> Self {
        Self::from_support(vec![(outcome, 1.0)])
    }

    /// Uniform distribution over `items`. Repeated items accumulate weight.
    pub fn uniform(items: impl IntoIterator<Item = T>) -> Result<Self, MdpError> {
        let items: Vec<T> = items.into_iter().collect();
        if items.is_empty() {
            return Err(MdpError::EmptyDistribution);
        }

        let prob = 1.0 / items.len() as f64;
        Self::new(items.into_iter().map(|item| (item, prob)))
    }

    /// Weighted combination of sub-distributions.
    /// Weights follow the same rules as outcome probabilities.
    pub fn mixture(
        components: impl IntoIterator<Item = (DDist<T>, f64)>,
    ) -> Result<Self, MdpError> {
        let components: Vec<(DDist<T>, f64)> = components.into_iter().collect();
        if components.is_empty() {
            return Err(MdpError::EmptyDistribution);
        }

        let mut sum = 0.0_f64;
        for (index, (_, weight)) in components.iter().enumerate() {
            if !weight.is_finite() || *weight < 0.0 {
                return Err(MdpError::InvalidProbability {
                    index,
                    value: *weight,
                });
            }
            sum += weight;
        }

        if (sum - 1.0).abs() > PROB_TOLERANCE {
            return Err(MdpError::ProbabilitySum {
                sum,
                tolerance: PROB_TOLERANCE,
            });
        }

        let pairs = components.into_iter().flat_map(|(dist, weight)| {
            dist.outcomes
                .into_iter()
                .map(move |(outcome, prob)| (outcome, prob * weight))
        });
        Self::new(pairs)
    }

    /// Two-component mixture: `p` weight on `first`, `1 - p` on `second`.
    pub fn mix(first: DDist<T>, second: DDist<T>, p: f64) -> Result<Self, MdpError> {
        if !(0.0..=1.0).contains(&p) {
            return Err(MdpError::InvalidProbability { index: 0, value: p });
        }
        Self::mixture([(first, p), (second, 1.0 - p)])
    }

    fn from_support(outcomes: Vec<(T, f64)>) -> Self {
        let mut cdf = Vec::with_capacity(outcomes.len());
        let mut cumulative = 0.0_f64;
        for (_, prob) in &outcomes {
            cumulative += prob;
            cdf.push(cumulative);
        }
        Self { outcomes, cdf }
    }

    /// Probability assigned to `outcome` (zero outside the support).
    pub fn prob(&self, outcome: &T) -> f64 {
        self.outcomes
            .iter()
            .find(|(existing, _)| existing == outcome)
            .map_or(0.0, |(_, prob)| *prob)
    }

    /// Iterate `(outcome, probability)` over outcomes with nonzero probability.
    pub fn support(&self) -> impl Iterator<Item = (&T, f64)> + '_ {
        self.outcomes.iter().map(|(outcome, prob)| (outcome, *prob))
    }

    /// Number of outcomes in the support.
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Always `false`; kept for parity with `len`.
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Sample one outcome using a uniform sample in `[0, 1)` from `rng`.
    pub fn draw<R>(&self, rng: &mut R) -> &T
    where
        R: Rng + ?Sized,
    {
        let sample: f64 = rng.gen_range(0.0..1.0);
        let mut chosen_idx = self.cdf.partition_point(|c| *c <= sample);
        // Rounding can leave the last cumulative value just below 1.0.
        if chosen_idx >= self.outcomes.len() {
            chosen_idx = self.outcomes.len() - 1;
        }
        &self.outcomes[chosen_idx].0
    }

    /// Weighted sum of `f(outcome)` over the support.
    pub fn expectation<F>(&self, mut f: F) -> f64
    where
        F: FnMut(&T) -> f64,
    {
        self.outcomes
            .iter()
            .map(|(outcome, prob)| prob * f(outcome))
            .sum()
    }

    /// Fallible variant of [`DDist::expectation`]; stops at the first error.
    pub fn try_expectation<F, E>(&self, mut f: F) -> Result<f64, E>
    where
        F: FnMut(&T) -> Result<f64, E>,
    {
        let mut total = 0.0;
        for (outcome, prob) in &self.outcomes {
            total += prob * f(outcome)?;
        }
        Ok(total)
    }
}
