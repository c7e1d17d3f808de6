//! The Elm Architecture (TEA) pattern for the Koi & Fox client
//!
//! State lives in [`Model`], changes only through [`update`], and side effects
//! are described as [`Command`]s that the [`CommandExecutor`] runs.

pub mod command;
pub mod message;
pub mod model;
pub mod update;

pub use command::{Command, CommandExecutor};
pub use message::Message;
pub use model::Model;
pub use update::update;

/// Result of processing a TEA update cycle
#[derive(Debug)]
pub struct UpdateResult<M> {
    pub model: M,
    pub commands: Vec<Command>,
}

impl<M> UpdateResult<M> {
    pub fn new(model: M, commands: Vec<Command>) -> Self {
        Self { model, commands }
    }

    pub fn just_model(model: M) -> Self {
        Self {
            model,
            commands: Vec::new(),
        }
    }

    pub fn with_command(model: M, command: Command) -> Self {
        Self {
            model,
            commands: vec![command],
        }
    }
}
