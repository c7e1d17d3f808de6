//! Central message type for the client following TEA pattern
//!
//! All user interactions and async operation results flow through this
//! message system for centralized state management.

use crate::api::types::{AnalyzeResponse, Persona, PersonaModule};
use crate::error::KoiFoxError;
use crate::goal::{GoalMode, WizardField};
use crate::text_field::EditOp;
use crate::tone::ToneSlider;
use uuid::Uuid;

/// Main application message type
#[derive(Debug, Clone)]
pub enum Message {
    /// System-level messages
    System(SystemMessage),

    /// Persona catalog messages
    Personas(PersonaMessage),

    /// Input form messages
    Form(FormMessage),

    /// Goal mode and wizard messages
    Goal(GoalMessage),

    /// Analysis request lifecycle
    Analyze(AnalyzeMessage),

    /// Reply option card actions
    Options(OptionsMessage),
}

/// System-level messages for application lifecycle
#[derive(Debug, Clone)]
pub enum SystemMessage {
    /// Start up: load the persona catalog
    Initialize,

    /// Application should quit
    Quit,
}

/// Direction for cycling through a selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cycle {
    Next,
    Previous,
}

#[derive(Debug, Clone)]
pub enum PersonaMessage {
    /// Catalog loaded successfully
    Loaded(Vec<Persona>),

    /// Catalog request failed
    LoadFailed(KoiFoxError),

    /// Move the selection of one selector
    Select(PersonaModule, Cycle),
}

/// Text inputs that can be edited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextTarget {
    Conversation,
    Draft,
    Wizard(WizardField),
}

#[derive(Debug, Clone)]
pub enum FormMessage {
    FocusNext,
    FocusPrevious,

    /// Edit a text input
    Edit(TextTarget, EditOp),

    /// Move a tone slider by a number of steps (negative moves down)
    StepTone(ToneSlider, i32),

    /// Set a tone slider directly
    SetTone(ToneSlider, f64),

    /// Reset conversation, draft and results
    Clear,
}

#[derive(Debug, Clone)]
pub enum GoalMessage {
    SetMode(GoalMode),
    ToggleMode,
    WizardNext,
    WizardBack,
    CycleGoalType(Cycle),
}

#[derive(Debug, Clone)]
pub enum AnalyzeMessage {
    /// User asked for an analysis
    Submit,

    /// Backend answered with a result
    Completed {
        request_id: Uuid,
        response: Box<AnalyzeResponse>,
    },

    /// Request failed (transport, status or decode)
    Failed { request_id: Uuid, error: KoiFoxError },
}

#[derive(Debug, Clone)]
pub enum OptionsMessage {
    SelectNext,
    SelectPrevious,

    /// Copy the option at index to the clipboard
    Copy(usize),

    /// Replace the draft with the option at index
    UseAsDraft(usize),

    /// Clipboard write finished; carries the option tag
    Copied(String),

    CopyFailed(KoiFoxError),
}

impl From<SystemMessage> for Message {
    fn from(msg: SystemMessage) -> Self {
        Message::System(msg)
    }
}

impl From<PersonaMessage> for Message {
    fn from(msg: PersonaMessage) -> Self {
        Message::Personas(msg)
    }
}

impl From<FormMessage> for Message {
    fn from(msg: FormMessage) -> Self {
        Message::Form(msg)
    }
}

impl From<GoalMessage> for Message {
    fn from(msg: GoalMessage) -> Self {
        Message::Goal(msg)
    }
}

impl From<AnalyzeMessage> for Message {
    fn from(msg: AnalyzeMessage) -> Self {
        Message::Analyze(msg)
    }
}

impl From<OptionsMessage> for Message {
    fn from(msg: OptionsMessage) -> Self {
        Message::Options(msg)
    }
}
