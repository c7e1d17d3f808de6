//! Command system for TEA pattern
//!
//! Commands represent side effects produced by model updates. Network commands
//! run as spawned tasks and report back through the message channel, so the
//! UI keeps drawing while a request is in flight.

use crate::api::client::Backend;
use crate::clipboard::ClipboardSink;
use crate::submission::Submission;
use crate::tea::message::{AnalyzeMessage, Message, OptionsMessage, PersonaMessage};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use uuid::Uuid;

/// Command that can be executed to perform side effects
#[derive(Debug)]
pub enum Command {
    /// Backend requests
    Network(NetworkCommand),

    /// Host system operations
    System(SystemCommand),
}

/// Backend request commands
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkCommand {
    /// `GET /personas`
    LoadPersonas,

    /// `POST /analyze` or `POST /v2/analyze`
    Analyze {
        request_id: Uuid,
        submission: Submission,
    },
}

/// Host system commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SystemCommand {
    /// Copy an option's raw text; `tag` names it in the status line
    CopyToClipboard { tag: String, text: String },
}

/// Command executor that runs side effects and feeds results back as messages
pub struct CommandExecutor {
    backend: Arc<dyn Backend>,
    clipboard: Box<dyn ClipboardSink>,
    message_sender: mpsc::UnboundedSender<Message>,
}

impl CommandExecutor {
    /// Create a new command executor
    pub fn new(
        backend: Arc<dyn Backend>,
        clipboard: Box<dyn ClipboardSink>,
        message_sender: mpsc::UnboundedSender<Message>,
    ) -> Self {
        Self {
            backend,
            clipboard,
            message_sender,
        }
    }

    /// Execute a command; returns the handle of a spawned network task
    pub fn execute(&mut self, command: Command) -> Option<JoinHandle<()>> {
        match command {
            Command::Network(net_command) => Some(self.spawn_network(net_command)),
            Command::System(sys_command) => {
                self.execute_system_command(sys_command);
                None
            }
        }
    }

    fn send(&self, message: Message) {
        if let Err(e) = self.message_sender.send(message) {
            tracing::error!("Failed to send message: {}", e);
        }
    }

    /// Spawn a backend request
    fn spawn_network(&self, command: NetworkCommand) -> JoinHandle<()> {
        let backend = Arc::clone(&self.backend);
        let sender = self.message_sender.clone();

        tokio::spawn(async move {
            let message = match command {
                NetworkCommand::LoadPersonas => match backend.list_personas().await {
                    Ok(personas) => Message::Personas(PersonaMessage::Loaded(personas)),
                    Err(error) => {
                        tracing::warn!("Persona load failed: {}", error);
                        Message::Personas(PersonaMessage::LoadFailed(error))
                    }
                },
                NetworkCommand::Analyze {
                    request_id,
                    submission,
                } => {
                    tracing::info!(
                        "Analysis {} started against {}",
                        request_id,
                        submission.endpoint.path()
                    );
                    match backend
                        .analyze(submission.endpoint, &submission.request)
                        .await
                    {
                        Ok(response) => Message::Analyze(AnalyzeMessage::Completed {
                            request_id,
                            response: Box::new(response),
                        }),
                        Err(error) => {
                            tracing::warn!("Analysis {} failed: {}", request_id, error);
                            Message::Analyze(AnalyzeMessage::Failed { request_id, error })
                        }
                    }
                }
            };

            if let Err(e) = sender.send(message) {
                tracing::debug!("Dropping network result, update loop is gone: {}", e);
            }
        })
    }

    /// Execute system command
    fn execute_system_command(&mut self, command: SystemCommand) {
        match command {
            SystemCommand::CopyToClipboard { tag, text } => {
                let message = match self.clipboard.copy(&text) {
                    Ok(()) => OptionsMessage::Copied(tag),
                    Err(error) => OptionsMessage::CopyFailed(error),
                };
                self.send(Message::Options(message));
            }
        }
    }
}

/// Helper functions for creating common commands
impl Command {
    /// Create a network command
    pub fn network(command: NetworkCommand) -> Self {
        Command::Network(command)
    }

    /// Create a system command
    pub fn system(command: SystemCommand) -> Self {
        Command::System(command)
    }
}
