use std::{
    collections::{BTreeMap, BTreeSet},
    fmt::{self, Display},
};

use chrono::Duration;
use derive_more::AsRef;
use thiserror::Error;

use crate::{ComputeError, Exercise, SingleExercise, Weight, WorkoutComponent};

#[derive(AsRef, Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: &str) -> Result<Self, SessionIdError> {
        let trimmed_id = id.trim();

        if trimmed_id.is_empty() {
            return Err(SessionIdError::Empty);
        }

        Ok(SessionId(trimmed_id.to_string()))
    }
}

impl Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum SessionIdError {
    #[error("Session id must not be empty")]
    Empty,
}

/// One training day: an ordered sequence of workout components. Attached to
/// exactly one program, which checks the id for uniqueness on insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutSession {
    id: SessionId,
    notes: Option<String>,
    components: Vec<WorkoutComponent>,
}

impl WorkoutSession {
    #[must_use]
    pub fn new(id: SessionId) -> Self {
        Self {
            id,
            notes: None,
            components: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_notes(mut self, notes: &str) -> Self {
        self.notes = Some(notes.to_string());
        self
    }

    #[must_use]
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    #[must_use]
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    #[must_use]
    pub fn components(&self) -> &[WorkoutComponent] {
        &self.components
    }

    pub fn add_component(&mut self, component: impl Into<WorkoutComponent>) -> &mut Self {
        self.components.push(component.into());
        self
    }

    /// Appends an empty single-exercise component for `exercise`.
    pub fn add_single_exercise(&mut self, exercise: Exercise) -> &mut Self {
        self.add_component(SingleExercise::new(exercise))
    }

    /// All exercises referenced by this session.
    #[must_use]
    pub fn exercises(&self) -> BTreeSet<&Exercise> {
        self.components
            .iter()
            .flat_map(WorkoutComponent::exercises)
            .collect()
    }

    #[must_use]
    pub fn estimated_duration(&self) -> Duration {
        self.components
            .iter()
            .map(WorkoutComponent::estimated_duration)
            .sum()
    }

    pub(crate) fn compute_values(
        &mut self,
        best_exercise_values: &BTreeMap<Exercise, Weight>,
    ) -> Result<(), ComputeError> {
        for component in &mut self.components {
            component.compute_values(best_exercise_values)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::{ExerciseGroup, Reps, WorkingSet};

    use super::*;

    #[rstest]
    #[case("W1D1", Ok(SessionId("W1D1".to_string())))]
    #[case("  W1D2  ", Ok(SessionId("W1D2".to_string())))]
    #[case("", Err(SessionIdError::Empty))]
    fn test_session_id_new(#[case] id: &str, #[case] expected: Result<SessionId, SessionIdError>) {
        assert_eq!(SessionId::new(id), expected);
    }

    #[test]
    fn test_add_component_preserves_order() {
        let pullup = Exercise::reps("Pullup").unwrap();
        let pushup = Exercise::reps("Pushup").unwrap();
        let mut session = WorkoutSession::new(SessionId::new("W1D1").unwrap());
        session
            .add_single_exercise(pullup.clone())
            .add_single_exercise(pushup.clone());
        assert_eq!(session.components().len(), 2);
        assert_eq!(
            session.components()[0].exercises(),
            BTreeSet::from([&pullup])
        );
        assert_eq!(
            session.components()[1].exercises(),
            BTreeSet::from([&pushup])
        );
    }

    #[test]
    fn test_exercises_spans_all_components() {
        let pullup = Exercise::reps("Pullup").unwrap();
        let pushup = Exercise::reps("Pushup").unwrap();
        let dip = Exercise::reps("Dip").unwrap();
        let mut session = WorkoutSession::new(SessionId::new("W1D1").unwrap());
        session.add_single_exercise(pullup.clone());
        session.add_component(ExerciseGroup::new(vec![pushup.clone(), dip.clone()]).unwrap());
        assert_eq!(session.exercises(), BTreeSet::from([&pullup, &pushup, &dip]));
    }

    #[test]
    fn test_estimated_duration_sums_components() {
        let pullup = Exercise::reps("Pullup").unwrap();
        let mut component = SingleExercise::new(pullup);
        component
            .add_repeating_set(2, WorkingSet::reps(Reps::new(10).unwrap()))
            .unwrap();
        let mut session = WorkoutSession::new(SessionId::new("W1D1").unwrap());
        session.add_component(component);
        assert_eq!(session.estimated_duration(), Duration::seconds(80));
    }
}
