use thiserror::Error;

use crate::{Reps, Weight, WeightError};

#[derive(Error, Debug, PartialEq)]
pub enum CalculatorError {
    #[error("one-rep max is undefined for {0} repetitions")]
    UnsupportedRepetitions(Reps),
    #[error("set has no explicit weight to estimate from")]
    MissingWeight,
    #[error("set has no repetition count to estimate from")]
    MissingRepetitions,
    #[error(transparent)]
    Weight(#[from] WeightError),
}

/// Strategy for estimating a one-repetition max from a performed set.
pub trait OneRmCalculator {
    fn name(&self) -> &'static str;
    fn one_rm(&self, repetitions: Reps, weight: Weight) -> Result<Weight, CalculatorError>;
}

/// Brzycki formula: `weight * 36 / (37 - reps)`. Repetition counts of zero
/// or 37 and above are rejected, never clamped.
#[derive(Debug, Default, Clone, Copy)]
pub struct Brzycki1RmCalculator;

impl OneRmCalculator for Brzycki1RmCalculator {
    fn name(&self) -> &'static str {
        "Brzycki"
    }

    fn one_rm(&self, repetitions: Reps, weight: Weight) -> Result<Weight, CalculatorError> {
        let reps = u32::from(repetitions);
        if reps == 0 || reps >= 37 {
            return Err(CalculatorError::UnsupportedRepetitions(repetitions));
        }

        #[allow(clippy::cast_precision_loss)]
        let estimate = f32::from(weight) * 36.0 / (37.0 - reps as f32);
        Ok(Weight::new(estimate)?)
    }
}

/// Configuration of the compute pass.
pub struct ComputeConfig {
    pub one_rm_calculator: Box<dyn OneRmCalculator>,
}

impl Default for ComputeConfig {
    fn default() -> Self {
        Self {
            one_rm_calculator: Box::new(Brzycki1RmCalculator),
        }
    }
}
