#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod document;

use log::debug;
use repforge_domain as domain;
use thiserror::Error;

pub use document::{ComponentDoc, ProgramDoc, SessionDoc, SetDoc};

#[derive(Error, Debug)]
pub enum StorageError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Registry(#[from] domain::RegistryError),
    #[error(transparent)]
    Name(#[from] domain::NameError),
    #[error(transparent)]
    SessionId(#[from] domain::SessionIdError),
    #[error(transparent)]
    Reps(#[from] domain::RepsError),
    #[error(transparent)]
    Weight(#[from] domain::WeightError),
    #[error(transparent)]
    Percentage(#[from] domain::PercentageError),
    #[error(transparent)]
    Rpe(#[from] domain::RpeError),
    #[error(transparent)]
    Time(#[from] domain::TimeError),
    #[error(transparent)]
    Set(#[from] domain::SetError),
    #[error(transparent)]
    Component(#[from] domain::ComponentError),
    #[error(transparent)]
    Program(#[from] domain::ProgramError),
}

/// Serializes a program to pretty-printed JSON. Exercises are written as
/// canonical key strings.
pub fn serialize_program(program: &domain::Program) -> Result<String, StorageError> {
    debug!("serializing program {}", program.name());
    Ok(serde_json::to_string_pretty(&ProgramDoc::from(program))?)
}

/// Loads a program from JSON, resolving every exercise reference through
/// the registry. Fails as a whole on the first unknown key or violated
/// invariant; no partially built program is ever returned.
pub fn deserialize_program(
    json: &str,
    registry: &domain::ExerciseRegistry,
) -> Result<domain::Program, StorageError> {
    debug!("deserializing program");
    let doc: ProgramDoc = serde_json::from_str(json)?;
    doc.to_domain(registry)
}
