use std::collections::{BTreeMap, BTreeSet};

use chrono::Duration;
use thiserror::Error;

use crate::{ComputeError, Exercise, Name, SetError, Weight, WorkingSet};

#[derive(Error, Debug, PartialEq)]
pub enum ComponentError {
    #[error(transparent)]
    Set(#[from] SetError),
    #[error("exercise {0} is not part of this group")]
    ExerciseNotInGroup(Name),
    #[error("exercise {0} appears more than once in the group")]
    DuplicateExerciseInGroup(Name),
    #[error("expected {expected} sets (one for each exercise), got {actual}")]
    GroupSetCardinalityMismatch { expected: usize, actual: usize },
}

/// One prescription within a session: either a single exercise with its
/// sets, or a group of exercises performed together (superset/circuit).
#[derive(Debug, Clone, PartialEq)]
pub enum WorkoutComponent {
    Single(SingleExercise),
    Group(ExerciseGroup),
}

impl WorkoutComponent {
    #[must_use]
    pub fn notes(&self) -> Option<&str> {
        match self {
            WorkoutComponent::Single(single) => single.notes(),
            WorkoutComponent::Group(group) => group.notes(),
        }
    }

    #[must_use]
    pub fn exercises(&self) -> BTreeSet<&Exercise> {
        match self {
            WorkoutComponent::Single(single) => BTreeSet::from([single.exercise()]),
            WorkoutComponent::Group(group) => group.exercises().iter().collect(),
        }
    }

    #[must_use]
    pub fn estimated_duration(&self) -> Duration {
        match self {
            WorkoutComponent::Single(single) => single.estimated_duration(),
            WorkoutComponent::Group(group) => group.estimated_duration(),
        }
    }

    pub(crate) fn compute_values(
        &mut self,
        best_exercise_values: &BTreeMap<Exercise, Weight>,
    ) -> Result<(), ComputeError> {
        match self {
            WorkoutComponent::Single(single) => single.compute_values(best_exercise_values),
            WorkoutComponent::Group(group) => group.compute_values(best_exercise_values),
        }
    }
}

impl From<SingleExercise> for WorkoutComponent {
    fn from(value: SingleExercise) -> Self {
        Self::Single(value)
    }
}

impl From<ExerciseGroup> for WorkoutComponent {
    fn from(value: ExerciseGroup) -> Self {
        Self::Group(value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SingleExercise {
    exercise: Exercise,
    notes: Option<String>,
    sets: Vec<WorkingSet>,
}

impl SingleExercise {
    #[must_use]
    pub fn new(exercise: Exercise) -> Self {
        Self {
            exercise,
            notes: None,
            sets: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_notes(mut self, notes: &str) -> Self {
        self.notes = Some(notes.to_string());
        self
    }

    #[must_use]
    pub fn exercise(&self) -> &Exercise {
        &self.exercise
    }

    #[must_use]
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    #[must_use]
    pub fn sets(&self) -> &[WorkingSet] {
        &self.sets
    }

    /// Appends a set after checking it has the shape the exercise requires.
    /// The set list is unchanged on failure.
    pub fn add_set(&mut self, set: WorkingSet) -> Result<&mut Self, ComponentError> {
        self.check_set(&set)?;
        self.sets.push(set);
        Ok(self)
    }

    /// Appends the same set value `n_repeats` times. Zero repeats is a
    /// no-op, not an error.
    pub fn add_repeating_set(
        &mut self,
        n_repeats: u32,
        set: WorkingSet,
    ) -> Result<&mut Self, ComponentError> {
        if n_repeats == 0 {
            return Ok(self);
        }

        self.check_set(&set)?;
        self.sets
            .extend(std::iter::repeat_n(set, n_repeats as usize));
        Ok(self)
    }

    fn check_set(&self, set: &WorkingSet) -> Result<(), ComponentError> {
        if set.kind() == self.exercise.set_kind() {
            Ok(())
        } else {
            Err(SetError::TypeMismatch {
                expected: self.exercise.set_kind(),
            }
            .into())
        }
    }

    #[must_use]
    pub fn estimated_duration(&self) -> Duration {
        self.sets.iter().map(WorkingSet::estimated_duration).sum()
    }

    pub(crate) fn compute_values(
        &mut self,
        best_exercise_values: &BTreeMap<Exercise, Weight>,
    ) -> Result<(), ComputeError> {
        for set in &mut self.sets {
            *set = set.resolved_against(&self.exercise, best_exercise_values)?;
        }
        Ok(())
    }
}

/// Exercises performed together. The atomic group helpers keep the
/// per-exercise set lists aligned round by round; `add_set` appends to a
/// single list and may leave lengths unequal, which is legal.
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseGroup {
    exercises: Vec<Exercise>,
    notes: Option<String>,
    sets: BTreeMap<Exercise, Vec<WorkingSet>>,
}

impl ExerciseGroup {
    pub fn new(exercises: Vec<Exercise>) -> Result<Self, ComponentError> {
        let mut sets = BTreeMap::new();
        for exercise in &exercises {
            if sets.insert(exercise.clone(), Vec::new()).is_some() {
                return Err(ComponentError::DuplicateExerciseInGroup(
                    exercise.name().clone(),
                ));
            }
        }

        Ok(Self {
            exercises,
            notes: None,
            sets,
        })
    }

    #[must_use]
    pub fn with_notes(mut self, notes: &str) -> Self {
        self.notes = Some(notes.to_string());
        self
    }

    #[must_use]
    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    #[must_use]
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    #[must_use]
    pub fn sets_for(&self, exercise: &Exercise) -> Option<&[WorkingSet]> {
        self.sets.get(exercise).map(Vec::as_slice)
    }

    /// Appends a set to one member's list only.
    pub fn add_set(
        &mut self,
        set: WorkingSet,
        exercise: &Exercise,
    ) -> Result<&mut Self, ComponentError> {
        if !self.sets.contains_key(exercise) {
            return Err(ComponentError::ExerciseNotInGroup(exercise.name().clone()));
        }
        Self::check_set(&set, exercise)?;
        if let Some(sets) = self.sets.get_mut(exercise) {
            sets.push(set);
        }
        Ok(self)
    }

    /// Appends one set to every member's list. The mapping must cover
    /// exactly the group's exercises; either all lists gain one entry or
    /// none change.
    pub fn add_group_sets(
        &mut self,
        exercise_sets: BTreeMap<Exercise, WorkingSet>,
    ) -> Result<&mut Self, ComponentError> {
        if exercise_sets.len() != self.exercises.len() {
            return Err(ComponentError::GroupSetCardinalityMismatch {
                expected: self.exercises.len(),
                actual: exercise_sets.len(),
            });
        }

        for (exercise, set) in &exercise_sets {
            if !self.sets.contains_key(exercise) {
                return Err(ComponentError::ExerciseNotInGroup(exercise.name().clone()));
            }
            Self::check_set(set, exercise)?;
        }

        for (exercise, set) in exercise_sets {
            if let Some(sets) = self.sets.get_mut(&exercise) {
                sets.push(set);
            }
        }
        Ok(self)
    }

    /// Repeats the atomic group append `n_repeats` times. Zero repeats is a
    /// no-op, not an error.
    pub fn add_repeating_group_sets(
        &mut self,
        n_repeats: u32,
        exercise_sets: BTreeMap<Exercise, WorkingSet>,
    ) -> Result<&mut Self, ComponentError> {
        for _ in 0..n_repeats {
            self.add_group_sets(exercise_sets.clone())?;
        }
        Ok(self)
    }

    fn check_set(set: &WorkingSet, exercise: &Exercise) -> Result<(), ComponentError> {
        if set.kind() == exercise.set_kind() {
            Ok(())
        } else {
            Err(SetError::TypeMismatch {
                expected: exercise.set_kind(),
            }
            .into())
        }
    }

    #[must_use]
    pub fn estimated_duration(&self) -> Duration {
        self.sets
            .values()
            .flatten()
            .map(WorkingSet::estimated_duration)
            .sum()
    }

    pub(crate) fn compute_values(
        &mut self,
        best_exercise_values: &BTreeMap<Exercise, Weight>,
    ) -> Result<(), ComputeError> {
        for exercise in &self.exercises {
            if let Some(sets) = self.sets.get_mut(exercise) {
                for set in sets {
                    *set = set.resolved_against(exercise, best_exercise_values)?;
                }
            }
        }
        Ok(())
    }
}
