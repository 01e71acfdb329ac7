use thiserror::Error;

use crate::{Exercise, ExerciseRegistry, NameError, RegistryError};

#[derive(Error, Debug, PartialEq)]
pub enum CatalogError {
    #[error(transparent)]
    Name(#[from] NameError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Common exercise definitions. Register them once at startup so serialized
/// programs referencing them can be loaded.
pub fn common_exercises() -> Result<Vec<Exercise>, NameError> {
    Ok(vec![
        Exercise::reps("Pullup")?,
        Exercise::reps("Pushup")?,
        Exercise::reps("Dip")?,
        Exercise::reps_and_weight("Backsquat")?,
        Exercise::reps_and_weight("Front Squat")?,
        Exercise::reps_and_weight("Deadlift")?,
        Exercise::reps_and_weight("Bench Press")?,
        Exercise::reps_and_weight("Overhead Press")?,
        Exercise::reps_and_weight("Split Squat")?,
        Exercise::reps_and_weight("Row")?,
        Exercise::reps_and_weight("Pendlay Row")?,
        Exercise::reps_and_weight("Hip Thrust")?,
        Exercise::oly_weight_lifting("Snatch")?,
        Exercise::oly_weight_lifting("Clean and Jerk")?,
        Exercise::duration("Plank")?,
    ])
}

pub fn register_common(registry: &mut ExerciseRegistry) -> Result<(), CatalogError> {
    for exercise in common_exercises()? {
        registry.register(exercise)?;
    }
    Ok(())
}
