use std::ops::Mul;

use derive_more::{Display, Into};
use thiserror::Error;

#[derive(Debug, Default, Display, Clone, Copy, Into, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Reps(u32);

impl Reps {
    pub fn new(value: u32) -> Result<Self, RepsError> {
        if !(0..1000).contains(&value) {
            return Err(RepsError::OutOfRange);
        }

        Ok(Self(value))
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum RepsError {
    #[error("Reps must be in the range 0 to 999")]
    OutOfRange,
}

#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct Weight(f32);

impl Weight {
    pub fn new(value: f32) -> Result<Self, WeightError> {
        if !value.is_finite() {
            return Err(WeightError::NotFinite);
        }

        if value < 0.0 {
            return Err(WeightError::Negative);
        }

        Ok(Self(value))
    }
}

impl Mul<Percentage> for Weight {
    type Output = Weight;

    fn mul(self, rhs: Percentage) -> Self::Output {
        Weight(self.0 * rhs.0)
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum WeightError {
    #[error("Weight must not be negative")]
    Negative,
    #[error("Weight must be a finite number")]
    NotFinite,
}

/// Fraction of a baseline, e.g. 0.8 for 80 %.
#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct Percentage(f32);

impl Percentage {
    pub fn new(value: f32) -> Result<Self, PercentageError> {
        if !value.is_finite() {
            return Err(PercentageError::NotFinite);
        }

        if value < 0.0 {
            return Err(PercentageError::Negative);
        }

        Ok(Self(value))
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum PercentageError {
    #[error("Percentage must not be negative")]
    Negative,
    #[error("Percentage must be a finite number")]
    NotFinite,
}

#[derive(Debug, Default, Display, Clone, Copy, Into, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Rpe(u8);

impl Rpe {
    pub fn new(value: u8) -> Result<Self, RpeError> {
        if value > 10 {
            return Err(RpeError::OutOfRange);
        }

        Ok(Self(value))
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum RpeError {
    #[error("RPE must be in the range 0 to 10")]
    OutOfRange,
}

/// Time in seconds, used for set durations and rest intervals.
#[derive(Debug, Default, Display, Clone, Copy, Into, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Time(u32);

impl Time {
    pub fn new(value: u32) -> Result<Self, TimeError> {
        if value > 86400 {
            return Err(TimeError::OutOfRange);
        }

        Ok(Self(value))
    }
}

impl From<Time> for i64 {
    fn from(value: Time) -> Self {
        i64::from(value.0)
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum TimeError {
    #[error("Time must be in the range 0 to 86400 s")]
    OutOfRange,
}
