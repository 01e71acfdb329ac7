use std::collections::{BTreeMap, BTreeSet};

use log::debug;
use thiserror::Error;

use crate::{
    CalculatorError, ComputeConfig, Exercise, Name, SessionId, Weight, WorkingSet, WorkoutSession,
};

#[derive(Error, Debug, PartialEq)]
pub enum ProgramError {
    #[error("workout session id {0} already exists")]
    DuplicateSessionId(SessionId),
}

#[derive(Error, Debug, PartialEq)]
pub enum ComputeError {
    #[error("no baseline for exercise {0}")]
    UnresolvedBaseline(Name),
    #[error("no weight prescription on a set for exercise {0}")]
    MissingPrescription(Name),
}

/// A full training program: per-exercise baselines and an ordered sequence
/// of workout sessions. Owns the compute pass that turns percentage
/// prescriptions into concrete weights.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    name: Name,
    best_exercise_values: BTreeMap<Exercise, Weight>,
    workout_sessions: Vec<WorkoutSession>,
}

impl Program {
    #[must_use]
    pub fn new(name: Name) -> Self {
        Self {
            name,
            best_exercise_values: BTreeMap::new(),
            workout_sessions: Vec::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &Name {
        &self.name
    }

    #[must_use]
    pub fn best_exercise_values(&self) -> &BTreeMap<Exercise, Weight> {
        &self.best_exercise_values
    }

    #[must_use]
    pub fn best_exercise_value(&self, exercise: &Exercise) -> Option<Weight> {
        self.best_exercise_values.get(exercise).copied()
    }

    #[must_use]
    pub fn workout_sessions(&self) -> &[WorkoutSession] {
        &self.workout_sessions
    }

    #[must_use]
    pub fn session(&self, id: &SessionId) -> Option<&WorkoutSession> {
        self.workout_sessions.iter().find(|s| s.id() == id)
    }

    /// All exercises referenced by any session.
    #[must_use]
    pub fn exercises(&self) -> BTreeSet<&Exercise> {
        self.workout_sessions
            .iter()
            .flat_map(WorkoutSession::exercises)
            .collect()
    }

    /// Appends a session. Session ids are unique within a program; the
    /// session list is unchanged on failure.
    pub fn add_workout_session(
        &mut self,
        workout_session: WorkoutSession,
    ) -> Result<&mut Self, ProgramError> {
        if self
            .workout_sessions
            .iter()
            .any(|s| s.id() == workout_session.id())
        {
            return Err(ProgramError::DuplicateSessionId(
                workout_session.id().clone(),
            ));
        }
        self.workout_sessions.push(workout_session);
        Ok(self)
    }

    /// Inserts or overwrites the baseline for an exercise. Last write wins.
    pub fn add_best_exercise_value(&mut self, exercise: Exercise, value: Weight) -> &mut Self {
        self.best_exercise_values.insert(exercise, value);
        self
    }

    /// Derives the baseline from a logged performance using the configured
    /// one-rep-max calculator, instead of entering it by hand.
    pub fn add_best_exercise_value_from_set(
        &mut self,
        exercise: Exercise,
        performed: &WorkingSet,
        config: &ComputeConfig,
    ) -> Result<&mut Self, CalculatorError> {
        let repetitions = performed
            .repetitions()
            .ok_or(CalculatorError::MissingRepetitions)?;
        let weight = performed.weight().ok_or(CalculatorError::MissingWeight)?;
        let estimate = config.one_rm_calculator.one_rm(repetitions, weight)?;
        debug!(
            "estimated baseline for {exercise}: {estimate} ({} calculator)",
            config.one_rm_calculator.name()
        );
        Ok(self.add_best_exercise_value(exercise, estimate))
    }

    /// Resolves every percentage prescription in every session against the
    /// program's baselines, in document order. Explicit weights are left as
    /// authored, so re-running the pass is idempotent. The program is
    /// unchanged if any set fails to resolve.
    pub fn compute_values(&mut self, config: &ComputeConfig) -> Result<(), ComputeError> {
        debug!(
            "computing values for program {} ({} calculator)",
            self.name,
            config.one_rm_calculator.name()
        );
        let mut workout_sessions = self.workout_sessions.clone();
        for session in &mut workout_sessions {
            session.compute_values(&self.best_exercise_values)?;
        }
        self.workout_sessions = workout_sessions;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use pretty_assertions::assert_eq;

    use crate::{Percentage, Reps, SingleExercise, WorkingSet};

    use super::*;

    fn backsquat() -> Exercise {
        Exercise::reps_and_weight("Backsquat").unwrap()
    }

    fn deadlift() -> Exercise {
        Exercise::reps_and_weight("Deadlift").unwrap()
    }

    fn program() -> Program {
        Program::new(Name::new("Test program").unwrap())
    }

    fn session(id: &str) -> WorkoutSession {
        WorkoutSession::new(SessionId::new(id).unwrap())
    }

    fn percentage_set(absolute: f32) -> WorkingSet {
        WorkingSet::reps_and_weight(
            Reps::new(5).unwrap(),
            None,
            Some(Percentage::new(absolute).unwrap()),
            None,
        )
        .unwrap()
    }

    fn session_with_percentage_set(id: &str, exercise: Exercise, absolute: f32) -> WorkoutSession {
        let mut component = SingleExercise::new(exercise);
        component.add_set(percentage_set(absolute)).unwrap();
        let mut session = session(id);
        session.add_component(component);
        session
    }

    fn first_set_weight(program: &Program, session_index: usize) -> Option<Weight> {
        let component = &program.workout_sessions()[session_index].components()[0];
        match component {
            crate::WorkoutComponent::Single(single) => single.sets()[0].weight(),
            crate::WorkoutComponent::Group(_) => None,
        }
    }

    #[test]
    fn test_add_workout_session_rejects_duplicate_ids() {
        let mut program = program();
        program.add_workout_session(session("W1D1")).unwrap();
        program.add_workout_session(session("W1D2")).unwrap();
        assert_eq!(
            program.add_workout_session(session("W1D1")).unwrap_err(),
            ProgramError::DuplicateSessionId(SessionId::new("W1D1").unwrap())
        );
        assert_eq!(program.workout_sessions().len(), 2);
        assert_eq!(program.workout_sessions()[1].id(), &SessionId::new("W1D2").unwrap());
    }

    #[test]
    fn test_add_best_exercise_value_last_write_wins() {
        let mut program = program();
        program.add_best_exercise_value(backsquat(), Weight::new(100.0).unwrap());
        program.add_best_exercise_value(backsquat(), Weight::new(105.0).unwrap());
        assert_eq!(
            program.best_exercise_value(&backsquat()),
            Some(Weight::new(105.0).unwrap())
        );
    }

    #[test]
    fn test_baseline_derived_from_another_exercise() {
        let mut program = program();
        program.add_best_exercise_value(deadlift(), Weight::new(90.0).unwrap());
        let derived = program.best_exercise_value(&deadlift()).unwrap()
            * Percentage::new(0.6).unwrap();
        program.add_best_exercise_value(Exercise::reps_and_weight("Row").unwrap(), derived);
        assert_approx_eq!(
            f32::from(
                program
                    .best_exercise_value(&Exercise::reps_and_weight("Row").unwrap())
                    .unwrap()
            ),
            54.0
        );
    }

    #[test]
    fn test_compute_values_resolves_absolute_percentages() {
        let mut program = program();
        program.add_best_exercise_value(backsquat(), Weight::new(100.0).unwrap());
        program
            .add_workout_session(session_with_percentage_set("W1D1", backsquat(), 0.8))
            .unwrap();
        program.compute_values(&ComputeConfig::default()).unwrap();
        assert_approx_eq!(f32::from(first_set_weight(&program, 0).unwrap()), 80.0);
    }

    #[test]
    fn test_compute_values_is_idempotent() {
        let mut program = program();
        program.add_best_exercise_value(backsquat(), Weight::new(100.0).unwrap());
        program
            .add_workout_session(session_with_percentage_set("W1D1", backsquat(), 0.8))
            .unwrap();
        program.compute_values(&ComputeConfig::default()).unwrap();
        let resolved = program.clone();
        program.compute_values(&ComputeConfig::default()).unwrap();
        assert_eq!(program, resolved);
    }

    #[test]
    fn test_compute_values_leaves_explicit_weights_as_authored() {
        let mut program = program();
        program.add_best_exercise_value(backsquat(), Weight::new(100.0).unwrap());
        let mut component = SingleExercise::new(backsquat());
        component
            .add_set(
                WorkingSet::reps_and_weight(
                    Reps::new(5).unwrap(),
                    Some(Weight::new(77.5).unwrap()),
                    Some(Percentage::new(0.8).unwrap()),
                    None,
                )
                .unwrap(),
            )
            .unwrap();
        let mut s = session("W1D1");
        s.add_component(component);
        program.add_workout_session(s).unwrap();
        program.compute_values(&ComputeConfig::default()).unwrap();
        assert_eq!(
            first_set_weight(&program, 0),
            Some(Weight::new(77.5).unwrap())
        );
    }

    #[test]
    fn test_compute_values_resolves_relative_percentages_against_the_owning_exercise() {
        let mut program = program();
        program.add_best_exercise_value(backsquat(), Weight::new(100.0).unwrap());
        let mut component = SingleExercise::new(backsquat());
        component
            .add_set(
                WorkingSet::reps_and_weight(
                    Reps::new(5).unwrap(),
                    None,
                    None,
                    Some(Percentage::new(0.6).unwrap()),
                )
                .unwrap(),
            )
            .unwrap();
        let mut s = session("W1D1");
        s.add_component(component);
        program.add_workout_session(s).unwrap();
        program.compute_values(&ComputeConfig::default()).unwrap();
        assert_approx_eq!(f32::from(first_set_weight(&program, 0).unwrap()), 60.0);
    }

    #[test]
    fn test_compute_values_fails_without_a_baseline() {
        let mut program = program();
        program.add_best_exercise_value(backsquat(), Weight::new(100.0).unwrap());
        program
            .add_workout_session(session_with_percentage_set("W1D1", backsquat(), 0.8))
            .unwrap();
        program
            .add_workout_session(session_with_percentage_set("W1D2", deadlift(), 0.7))
            .unwrap();
        let authored = program.clone();
        assert_eq!(
            program.compute_values(&ComputeConfig::default()).unwrap_err(),
            ComputeError::UnresolvedBaseline(Name::new("Deadlift").unwrap())
        );
        assert_eq!(program, authored);
    }

    #[test]
    fn test_compute_values_reports_a_set_without_any_prescription() {
        let mut program = program();
        program.add_best_exercise_value(backsquat(), Weight::new(100.0).unwrap());
        let mut component = SingleExercise::new(backsquat());
        component
            .add_set(
                // Bypasses the validating constructor on purpose.
                WorkingSet::RepsAndWeight {
                    repetitions: Reps::new(5).unwrap(),
                    weight: None,
                    absolute_percentage: None,
                    relative_percentage: None,
                    rest_between: None,
                },
            )
            .unwrap();
        let mut s = session("W1D1");
        s.add_component(component);
        program.add_workout_session(s).unwrap();
        assert_eq!(
            program.compute_values(&ComputeConfig::default()).unwrap_err(),
            ComputeError::MissingPrescription(Name::new("Backsquat").unwrap())
        );
    }

    #[test]
    fn test_add_best_exercise_value_from_set() {
        let mut program = program();
        let performed = WorkingSet::reps_and_weight(
            Reps::new(10).unwrap(),
            Some(Weight::new(100.0).unwrap()),
            None,
            None,
        )
        .unwrap();
        program
            .add_best_exercise_value_from_set(backsquat(), &performed, &ComputeConfig::default())
            .unwrap();
        assert_approx_eq!(
            f32::from(program.best_exercise_value(&backsquat()).unwrap()),
            100.0 * 36.0 / 27.0
        );
    }

    #[test]
    fn test_exercises_spans_all_sessions() {
        let mut program = program();
        program
            .add_workout_session(session_with_percentage_set("W1D1", backsquat(), 0.8))
            .unwrap();
        program
            .add_workout_session(session_with_percentage_set("W1D2", deadlift(), 0.7))
            .unwrap();
        assert_eq!(
            program.exercises(),
            std::collections::BTreeSet::from([&backsquat(), &deadlift()])
        );
    }

    #[test]
    fn test_session_lookup() {
        let mut program = program();
        program.add_workout_session(session("W1D1")).unwrap();
        assert!(program.session(&SessionId::new("W1D1").unwrap()).is_some());
        assert!(program.session(&SessionId::new("W2D1").unwrap()).is_none());
    }
}
