use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use repforge_domain as domain;

use crate::StorageError;

/// Persisted form of a program. Exercise references are canonical key
/// strings, never inline definitions; loading resolves them through an
/// [`domain::ExerciseRegistry`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProgramDoc {
    pub name: String,
    pub best_exercise_values: BTreeMap<String, f32>,
    pub workout_sessions: Vec<SessionDoc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionDoc {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub workout_components: Vec<ComponentDoc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ComponentDoc {
    #[serde(rename_all = "camelCase")]
    SingleExercise {
        exercise: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        notes: Option<String>,
        sets: Vec<SetDoc>,
    },
    #[serde(rename_all = "camelCase")]
    ExerciseGroup {
        exercises: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        notes: Option<String>,
        exercise_sets: BTreeMap<String, Vec<SetDoc>>,
    },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SetDoc {
    #[serde(rename_all = "camelCase")]
    Reps {
        repetitions: u32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        rest_between: Option<u32>,
    },
    #[serde(rename_all = "camelCase")]
    RepsAndWeight {
        repetitions: u32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        weight: Option<f32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        absolute_percentage: Option<f32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        relative_percentage: Option<f32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        rest_between: Option<u32>,
    },
    #[serde(rename_all = "camelCase")]
    OlyWeightLifting {
        repetitions: u32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        weight: Option<f32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        absolute_percentage: Option<f32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        rest_between: Option<u32>,
    },
    #[serde(rename_all = "camelCase")]
    RepsRpe {
        repetitions: u32,
        rpe: u8,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        rest_between: Option<u32>,
    },
    #[serde(rename_all = "camelCase")]
    Duration {
        duration: u32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        rest_between: Option<u32>,
    },
}

impl From<&domain::Program> for ProgramDoc {
    fn from(value: &domain::Program) -> Self {
        Self {
            name: value.name().to_string(),
            best_exercise_values: value
                .best_exercise_values()
                .iter()
                .map(|(exercise, weight)| (exercise.canonical_key(), f32::from(*weight)))
                .collect(),
            workout_sessions: value.workout_sessions().iter().map(SessionDoc::from).collect(),
        }
    }
}

impl ProgramDoc {
    pub fn to_domain(
        &self,
        registry: &domain::ExerciseRegistry,
    ) -> Result<domain::Program, StorageError> {
        let mut program = domain::Program::new(domain::Name::new(&self.name)?);
        for (key, value) in &self.best_exercise_values {
            let exercise = registry.resolve(key)?.clone();
            program.add_best_exercise_value(exercise, domain::Weight::new(*value)?);
        }
        for session in &self.workout_sessions {
            program.add_workout_session(session.to_domain(registry)?)?;
        }
        Ok(program)
    }
}

impl From<&domain::WorkoutSession> for SessionDoc {
    fn from(value: &domain::WorkoutSession) -> Self {
        Self {
            id: value.id().to_string(),
            notes: value.notes().map(ToString::to_string),
            workout_components: value.components().iter().map(ComponentDoc::from).collect(),
        }
    }
}

impl SessionDoc {
    fn to_domain(
        &self,
        registry: &domain::ExerciseRegistry,
    ) -> Result<domain::WorkoutSession, StorageError> {
        let mut session = domain::WorkoutSession::new(domain::SessionId::new(&self.id)?);
        if let Some(notes) = &self.notes {
            session = session.with_notes(notes);
        }
        for component in &self.workout_components {
            session.add_component(component.to_domain(registry)?);
        }
        Ok(session)
    }
}

impl From<&domain::WorkoutComponent> for ComponentDoc {
    fn from(value: &domain::WorkoutComponent) -> Self {
        match value {
            domain::WorkoutComponent::Single(single) => ComponentDoc::SingleExercise {
                exercise: single.exercise().canonical_key(),
                notes: single.notes().map(ToString::to_string),
                sets: single.sets().iter().map(SetDoc::from).collect(),
            },
            domain::WorkoutComponent::Group(group) => ComponentDoc::ExerciseGroup {
                exercises: group
                    .exercises()
                    .iter()
                    .map(domain::Exercise::canonical_key)
                    .collect(),
                notes: group.notes().map(ToString::to_string),
                exercise_sets: group
                    .exercises()
                    .iter()
                    .map(|exercise| {
                        (
                            exercise.canonical_key(),
                            group
                                .sets_for(exercise)
                                .unwrap_or_default()
                                .iter()
                                .map(SetDoc::from)
                                .collect(),
                        )
                    })
                    .collect(),
            },
        }
    }
}

impl ComponentDoc {
    fn to_domain(
        &self,
        registry: &domain::ExerciseRegistry,
    ) -> Result<domain::WorkoutComponent, StorageError> {
        match self {
            ComponentDoc::SingleExercise {
                exercise,
                notes,
                sets,
            } => {
                let mut single =
                    domain::SingleExercise::new(registry.resolve(exercise)?.clone());
                if let Some(notes) = notes {
                    single = single.with_notes(notes);
                }
                for set in sets {
                    single.add_set(set.to_domain()?)?;
                }
                Ok(domain::WorkoutComponent::Single(single))
            }
            ComponentDoc::ExerciseGroup {
                exercises,
                notes,
                exercise_sets,
            } => {
                let members = exercises
                    .iter()
                    .map(|key| registry.resolve(key).cloned())
                    .collect::<Result<Vec<_>, _>>()?;
                let mut group = domain::ExerciseGroup::new(members)?;
                if let Some(notes) = notes {
                    group = group.with_notes(notes);
                }
                for (key, sets) in exercise_sets {
                    let exercise = registry.resolve(key)?.clone();
                    for set in sets {
                        group.add_set(set.to_domain()?, &exercise)?;
                    }
                }
                Ok(domain::WorkoutComponent::Group(group))
            }
        }
    }
}

impl From<&domain::WorkingSet> for SetDoc {
    fn from(value: &domain::WorkingSet) -> Self {
        let rest_between = value.rest_between().map(u32::from);
        match value {
            domain::WorkingSet::Reps { repetitions, .. } => SetDoc::Reps {
                repetitions: u32::from(*repetitions),
                rest_between,
            },
            domain::WorkingSet::RepsAndWeight {
                repetitions,
                weight,
                absolute_percentage,
                relative_percentage,
                ..
            } => SetDoc::RepsAndWeight {
                repetitions: u32::from(*repetitions),
                weight: weight.map(f32::from),
                absolute_percentage: absolute_percentage.map(f32::from),
                relative_percentage: relative_percentage.map(f32::from),
                rest_between,
            },
            domain::WorkingSet::OlyWeightLifting {
                repetitions,
                weight,
                absolute_percentage,
                ..
            } => SetDoc::OlyWeightLifting {
                repetitions: u32::from(*repetitions),
                weight: weight.map(f32::from),
                absolute_percentage: absolute_percentage.map(f32::from),
                rest_between,
            },
            domain::WorkingSet::RepsRpe {
                repetitions, rpe, ..
            } => SetDoc::RepsRpe {
                repetitions: u32::from(*repetitions),
                rpe: u8::from(*rpe),
                rest_between,
            },
            domain::WorkingSet::Duration { duration, .. } => SetDoc::Duration {
                duration: u32::from(*duration),
                rest_between,
            },
        }
    }
}

impl SetDoc {
    fn to_domain(&self) -> Result<domain::WorkingSet, StorageError> {
        let set = match *self {
            SetDoc::Reps { repetitions, .. } => {
                domain::WorkingSet::reps(domain::Reps::new(repetitions)?)
            }
            SetDoc::RepsAndWeight {
                repetitions,
                weight,
                absolute_percentage,
                relative_percentage,
                ..
            } => domain::WorkingSet::reps_and_weight(
                domain::Reps::new(repetitions)?,
                weight.map(domain::Weight::new).transpose()?,
                absolute_percentage
                    .map(domain::Percentage::new)
                    .transpose()?,
                relative_percentage
                    .map(domain::Percentage::new)
                    .transpose()?,
            )?,
            SetDoc::OlyWeightLifting {
                repetitions,
                weight,
                absolute_percentage,
                ..
            } => domain::WorkingSet::oly_weight_lifting(
                domain::Reps::new(repetitions)?,
                weight.map(domain::Weight::new).transpose()?,
                absolute_percentage
                    .map(domain::Percentage::new)
                    .transpose()?,
            )?,
            SetDoc::RepsRpe {
                repetitions, rpe, ..
            } => domain::WorkingSet::reps_rpe(
                domain::Reps::new(repetitions)?,
                domain::Rpe::new(rpe)?,
            ),
            SetDoc::Duration { duration, .. } => {
                domain::WorkingSet::duration(domain::Time::new(duration)?)
            }
        };
        match self.rest_between() {
            Some(rest) => Ok(set.with_rest(domain::Time::new(rest)?)),
            None => Ok(set),
        }
    }

    fn rest_between(&self) -> Option<u32> {
        match self {
            SetDoc::Reps { rest_between, .. }
            | SetDoc::RepsAndWeight { rest_between, .. }
            | SetDoc::OlyWeightLifting { rest_between, .. }
            | SetDoc::RepsRpe { rest_between, .. }
            | SetDoc::Duration { rest_between, .. } => *rest_between,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_set_doc_tags_match_canonical_key_slugs() {
        let set = domain::WorkingSet::reps_rpe(
            domain::Reps::new(8).unwrap(),
            domain::Rpe::new(7).unwrap(),
        );
        let value = serde_json::to_value(SetDoc::from(&set)).unwrap();
        assert_eq!(value["kind"], "reps_rpe");
    }

    #[test]
    fn test_absent_optional_fields_are_omitted() {
        let set = domain::WorkingSet::reps(domain::Reps::new(10).unwrap());
        let value = serde_json::to_value(SetDoc::from(&set)).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "kind": "reps", "repetitions": 10 })
        );
    }

    #[test]
    fn test_set_doc_rejects_invalid_values_on_load() {
        let doc = SetDoc::RepsRpe {
            repetitions: 8,
            rpe: 11,
            rest_between: None,
        };
        assert!(matches!(
            doc.to_domain().unwrap_err(),
            StorageError::Rpe(domain::RpeError::OutOfRange)
        ));
    }
}
