use std::fmt::{self, Display};

use derive_more::AsRef;
use thiserror::Error;

use crate::{Percentage, Reps, Rpe, SetError, SetKind, Time, Weight, WorkingSet};

#[derive(AsRef, Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Name(String);

impl Name {
    pub fn new(name: &str) -> Result<Self, NameError> {
        let trimmed_name = name.trim();

        if trimmed_name.is_empty() {
            return Err(NameError::Empty);
        }

        let len = trimmed_name.len();

        if len > 64 {
            return Err(NameError::TooLong(len));
        }

        Ok(Name(trimmed_name.to_string()))
    }
}

impl Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum NameError {
    #[error("Name must not be empty")]
    Empty,
    #[error("Name must be 64 characters or fewer ({0} > 64)")]
    TooLong(usize),
}

/// A kind of exercise, fixed to exactly one set shape. Identity is the pair
/// of variant tag and name, which is what makes an exercise usable as a map
/// key for baselines and registry entries.
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Exercise {
    Reps { name: Name },
    RepsAndWeight { name: Name },
    OlyWeightLifting { name: Name },
    RepsRpe { name: Name },
    Duration { name: Name },
}

impl Exercise {
    pub fn reps(name: &str) -> Result<Self, NameError> {
        Ok(Self::Reps {
            name: Name::new(name)?,
        })
    }

    pub fn reps_and_weight(name: &str) -> Result<Self, NameError> {
        Ok(Self::RepsAndWeight {
            name: Name::new(name)?,
        })
    }

    pub fn oly_weight_lifting(name: &str) -> Result<Self, NameError> {
        Ok(Self::OlyWeightLifting {
            name: Name::new(name)?,
        })
    }

    pub fn reps_rpe(name: &str) -> Result<Self, NameError> {
        Ok(Self::RepsRpe {
            name: Name::new(name)?,
        })
    }

    pub fn duration(name: &str) -> Result<Self, NameError> {
        Ok(Self::Duration {
            name: Name::new(name)?,
        })
    }

    #[must_use]
    pub fn name(&self) -> &Name {
        match self {
            Exercise::Reps { name }
            | Exercise::RepsAndWeight { name }
            | Exercise::OlyWeightLifting { name }
            | Exercise::RepsRpe { name }
            | Exercise::Duration { name } => name,
        }
    }

    #[must_use]
    pub fn set_kind(&self) -> SetKind {
        match self {
            Exercise::Reps { .. } => SetKind::Reps,
            Exercise::RepsAndWeight { .. } => SetKind::RepsAndWeight,
            Exercise::OlyWeightLifting { .. } => SetKind::OlyWeightLifting,
            Exercise::RepsRpe { .. } => SetKind::RepsRpe,
            Exercise::Duration { .. } => SetKind::Duration,
        }
    }

    /// Deterministic serialized reference and registry key.
    #[must_use]
    pub fn canonical_key(&self) -> String {
        format!("{}/{}", self.set_kind().key(), self.name())
    }

    fn expect_kind(&self, kind: SetKind) -> Result<(), SetError> {
        if self.set_kind() == kind {
            Ok(())
        } else {
            Err(SetError::TypeMismatch {
                expected: self.set_kind(),
            })
        }
    }

    pub fn create_reps_set(&self, repetitions: Reps) -> Result<WorkingSet, SetError> {
        self.expect_kind(SetKind::Reps)?;
        Ok(WorkingSet::reps(repetitions))
    }

    pub fn create_reps_and_weight_set(
        &self,
        repetitions: Reps,
        weight: Option<Weight>,
        absolute_percentage: Option<Percentage>,
        relative_percentage: Option<Percentage>,
    ) -> Result<WorkingSet, SetError> {
        self.expect_kind(SetKind::RepsAndWeight)?;
        WorkingSet::reps_and_weight(repetitions, weight, absolute_percentage, relative_percentage)
    }

    pub fn create_oly_set(
        &self,
        repetitions: Reps,
        weight: Option<Weight>,
        absolute_percentage: Option<Percentage>,
    ) -> Result<WorkingSet, SetError> {
        self.expect_kind(SetKind::OlyWeightLifting)?;
        WorkingSet::oly_weight_lifting(repetitions, weight, absolute_percentage)
    }

    pub fn create_reps_rpe_set(&self, repetitions: Reps, rpe: Rpe) -> Result<WorkingSet, SetError> {
        self.expect_kind(SetKind::RepsRpe)?;
        Ok(WorkingSet::reps_rpe(repetitions, rpe))
    }

    pub fn create_duration_set(&self, duration: Time) -> Result<WorkingSet, SetError> {
        self.expect_kind(SetKind::Duration)?;
        Ok(WorkingSet::duration(duration))
    }
}

impl Display for Exercise {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
