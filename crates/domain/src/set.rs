use std::{
    collections::BTreeMap,
    fmt::{self, Display},
};

use chrono::Duration;
use log::debug;
use thiserror::Error;

use crate::{ComputeError, Exercise, Percentage, Reps, Rpe, Time, Weight};

/// One tag per concrete set shape. Every exercise is fixed to exactly one
/// of these, and every set carries the tag of the variant it was built as.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum SetKind {
    Reps,
    RepsAndWeight,
    OlyWeightLifting,
    RepsRpe,
    Duration,
}

impl SetKind {
    /// Stable slug used in canonical exercise keys and serialized tags.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            SetKind::Reps => "reps",
            SetKind::RepsAndWeight => "reps_and_weight",
            SetKind::OlyWeightLifting => "oly_weight_lifting",
            SetKind::RepsRpe => "reps_rpe",
            SetKind::Duration => "duration",
        }
    }
}

impl Display for SetKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                SetKind::Reps => "reps",
                SetKind::RepsAndWeight => "reps and weight",
                SetKind::OlyWeightLifting => "olympic weightlifting",
                SetKind::RepsRpe => "reps and RPE",
                SetKind::Duration => "duration",
            }
        )
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum SetError {
    #[error("at least one of weight, absolute percentage and relative percentage must be provided")]
    MissingWeightSpecification,
    #[error("set/exercise type mismatch: expected a {expected} set")]
    TypeMismatch { expected: SetKind },
}

/// A single prescribed or performed unit of work. Immutable once built;
/// resolution produces a new set with the weight filled in so the authored
/// prescription stays auditable.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkingSet {
    Reps {
        repetitions: Reps,
        rest_between: Option<Time>,
    },
    RepsAndWeight {
        repetitions: Reps,
        weight: Option<Weight>,
        absolute_percentage: Option<Percentage>,
        relative_percentage: Option<Percentage>,
        rest_between: Option<Time>,
    },
    OlyWeightLifting {
        repetitions: Reps,
        weight: Option<Weight>,
        absolute_percentage: Option<Percentage>,
        rest_between: Option<Time>,
    },
    RepsRpe {
        repetitions: Reps,
        rpe: Rpe,
        rest_between: Option<Time>,
    },
    Duration {
        duration: Time,
        rest_between: Option<Time>,
    },
}

impl WorkingSet {
    #[must_use]
    pub fn reps(repetitions: Reps) -> Self {
        Self::Reps {
            repetitions,
            rest_between: None,
        }
    }

    pub fn reps_and_weight(
        repetitions: Reps,
        weight: Option<Weight>,
        absolute_percentage: Option<Percentage>,
        relative_percentage: Option<Percentage>,
    ) -> Result<Self, SetError> {
        if weight.is_none() && absolute_percentage.is_none() && relative_percentage.is_none() {
            return Err(SetError::MissingWeightSpecification);
        }

        Ok(Self::RepsAndWeight {
            repetitions,
            weight,
            absolute_percentage,
            relative_percentage,
            rest_between: None,
        })
    }

    pub fn oly_weight_lifting(
        repetitions: Reps,
        weight: Option<Weight>,
        absolute_percentage: Option<Percentage>,
    ) -> Result<Self, SetError> {
        if weight.is_none() && absolute_percentage.is_none() {
            return Err(SetError::MissingWeightSpecification);
        }

        Ok(Self::OlyWeightLifting {
            repetitions,
            weight,
            absolute_percentage,
            rest_between: None,
        })
    }

    #[must_use]
    pub fn reps_rpe(repetitions: Reps, rpe: Rpe) -> Self {
        Self::RepsRpe {
            repetitions,
            rpe,
            rest_between: None,
        }
    }

    #[must_use]
    pub fn duration(duration: Time) -> Self {
        Self::Duration {
            duration,
            rest_between: None,
        }
    }

    #[must_use]
    pub fn with_rest(mut self, rest: Time) -> Self {
        match &mut self {
            WorkingSet::Reps { rest_between, .. }
            | WorkingSet::RepsAndWeight { rest_between, .. }
            | WorkingSet::OlyWeightLifting { rest_between, .. }
            | WorkingSet::RepsRpe { rest_between, .. }
            | WorkingSet::Duration { rest_between, .. } => *rest_between = Some(rest),
        }
        self
    }

    #[must_use]
    pub fn kind(&self) -> SetKind {
        match self {
            WorkingSet::Reps { .. } => SetKind::Reps,
            WorkingSet::RepsAndWeight { .. } => SetKind::RepsAndWeight,
            WorkingSet::OlyWeightLifting { .. } => SetKind::OlyWeightLifting,
            WorkingSet::RepsRpe { .. } => SetKind::RepsRpe,
            WorkingSet::Duration { .. } => SetKind::Duration,
        }
    }

    #[must_use]
    pub fn repetitions(&self) -> Option<Reps> {
        match self {
            WorkingSet::Reps { repetitions, .. }
            | WorkingSet::RepsAndWeight { repetitions, .. }
            | WorkingSet::OlyWeightLifting { repetitions, .. }
            | WorkingSet::RepsRpe { repetitions, .. } => Some(*repetitions),
            WorkingSet::Duration { .. } => None,
        }
    }

    #[must_use]
    pub fn weight(&self) -> Option<Weight> {
        match self {
            WorkingSet::RepsAndWeight { weight, .. }
            | WorkingSet::OlyWeightLifting { weight, .. } => *weight,
            _ => None,
        }
    }

    #[must_use]
    pub fn absolute_percentage(&self) -> Option<Percentage> {
        match self {
            WorkingSet::RepsAndWeight {
                absolute_percentage,
                ..
            }
            | WorkingSet::OlyWeightLifting {
                absolute_percentage,
                ..
            } => *absolute_percentage,
            _ => None,
        }
    }

    #[must_use]
    pub fn relative_percentage(&self) -> Option<Percentage> {
        match self {
            WorkingSet::RepsAndWeight {
                relative_percentage,
                ..
            } => *relative_percentage,
            _ => None,
        }
    }

    #[must_use]
    pub fn rest_between(&self) -> Option<Time> {
        match self {
            WorkingSet::Reps { rest_between, .. }
            | WorkingSet::RepsAndWeight { rest_between, .. }
            | WorkingSet::OlyWeightLifting { rest_between, .. }
            | WorkingSet::RepsRpe { rest_between, .. }
            | WorkingSet::Duration { rest_between, .. } => *rest_between,
        }
    }

    /// Copy of this set with the weight filled in. The authored percentages
    /// are kept. Identity for variants without a weight field.
    #[must_use]
    pub fn resolved_with(&self, resolved: Weight) -> Self {
        let mut set = self.clone();
        match &mut set {
            WorkingSet::RepsAndWeight { weight, .. }
            | WorkingSet::OlyWeightLifting { weight, .. } => *weight = Some(resolved),
            _ => {}
        }
        set
    }

    /// Resolution step of the compute pass. Explicit weights always win,
    /// percentages resolve against the owning exercise's baseline.
    pub fn resolved_against(
        &self,
        exercise: &Exercise,
        best_exercise_values: &BTreeMap<Exercise, Weight>,
    ) -> Result<Self, ComputeError> {
        match self.kind() {
            SetKind::Reps | SetKind::RepsRpe | SetKind::Duration => return Ok(self.clone()),
            SetKind::RepsAndWeight | SetKind::OlyWeightLifting => {}
        }

        if self.weight().is_some() {
            return Ok(self.clone());
        }

        let percentage = self
            .absolute_percentage()
            .or_else(|| self.relative_percentage())
            .ok_or_else(|| ComputeError::MissingPrescription(exercise.name().clone()))?;
        let baseline = best_exercise_values
            .get(exercise)
            .copied()
            .ok_or_else(|| ComputeError::UnresolvedBaseline(exercise.name().clone()))?;

        debug!("resolving {percentage} of {baseline} for {exercise}");
        Ok(self.resolved_with(baseline * percentage))
    }

    /// Rough wall-clock estimate of performing the set, rest included.
    /// A repetition is assumed to take four seconds.
    #[must_use]
    pub fn estimated_duration(&self) -> Duration {
        let work = match self {
            WorkingSet::Duration { duration, .. } => Duration::seconds(i64::from(*duration)),
            _ => {
                let repetitions = self.repetitions().unwrap_or_default();
                let r = if repetitions > Reps::default() {
                    u32::from(repetitions)
                } else {
                    1
                };
                Duration::seconds(i64::from(r * 4))
            }
        };
        let rest = self
            .rest_between()
            .map_or_else(Duration::zero, |t| Duration::seconds(i64::from(t)));
        work + rest
    }
}

impl Display for WorkingSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            WorkingSet::Reps { repetitions, .. } => write!(f, "{repetitions} reps")?,
            WorkingSet::RepsAndWeight {
                repetitions,
                weight,
                absolute_percentage,
                relative_percentage,
                ..
            } => {
                write!(f, "{repetitions} reps")?;
                if let Some(weight) = weight {
                    write!(f, " at {weight} kg")?;
                }
                if let Some(percentage) = absolute_percentage {
                    write!(f, " ({percentage} absolute)")?;
                }
                if let Some(percentage) = relative_percentage {
                    write!(f, " ({percentage} relative)")?;
                }
            }
            WorkingSet::OlyWeightLifting {
                repetitions,
                weight,
                absolute_percentage,
                ..
            } => {
                write!(f, "{repetitions} reps")?;
                if let Some(weight) = weight {
                    write!(f, " at {weight} kg")?;
                }
                if let Some(percentage) = absolute_percentage {
                    write!(f, " ({percentage} absolute)")?;
                }
            }
            WorkingSet::RepsRpe {
                repetitions, rpe, ..
            } => write!(f, "{repetitions} reps at RPE {rpe}")?,
            WorkingSet::Duration { duration, .. } => write!(f, "{duration} s")?,
        }
        if let Some(rest) = self.rest_between() {
            write!(f, ", {rest} s rest")?;
        }
        Ok(())
    }
}
