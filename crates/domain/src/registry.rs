use std::collections::BTreeMap;

use log::debug;
use thiserror::Error;

use crate::Exercise;

#[derive(Error, Debug, PartialEq)]
pub enum RegistryError {
    #[error("duplicate registry key {0}")]
    DuplicateKey(String),
    #[error("unknown registry key {0}")]
    UnknownKey(String),
}

/// Keyed store of exercise definitions, consulted when a serialized program
/// is loaded. In-memory program construction never needs it; only the
/// serialize/deserialize boundary does. Constructed explicitly and passed by
/// reference, so tests and callers can hold isolated registries.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ExerciseRegistry {
    exercises: BTreeMap<String, Exercise>,
}

impl ExerciseRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an exercise under its canonical key. Re-registering the
    /// identical definition is an idempotent no-op.
    pub fn register(&mut self, exercise: Exercise) -> Result<(), RegistryError> {
        let key = exercise.canonical_key();
        match self.exercises.get(&key) {
            Some(existing) if *existing == exercise => {
                debug!("exercise {key} is already registered");
                Ok(())
            }
            Some(_) => Err(RegistryError::DuplicateKey(key)),
            None => {
                self.exercises.insert(key, exercise);
                Ok(())
            }
        }
    }

    pub fn resolve(&self, key: &str) -> Result<&Exercise, RegistryError> {
        self.exercises
            .get(key)
            .ok_or_else(|| RegistryError::UnknownKey(key.to_string()))
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.exercises.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    pub fn exercises(&self) -> impl Iterator<Item = &Exercise> {
        self.exercises.values()
    }
}
