//! Update function for TEA pattern
//!
//! Central update function that handles all messages and updates the model
//! accordingly. This is the only place client state changes.

use crate::error::KoiFoxError;
use crate::goal::WizardTransition;
use crate::render::{fox_summary, format_koi, OptionsView};
use crate::submission;
use crate::tea::command::{NetworkCommand, SystemCommand};
use crate::tea::message::{
    AnalyzeMessage, Cycle, FormMessage, GoalMessage, OptionsMessage, PersonaMessage,
    SystemMessage,
};
use crate::tea::{Command, Message, Model, UpdateResult};
use uuid::Uuid;

/// Main update function that processes messages and returns updated model with commands
pub fn update(model: Model, message: Message) -> UpdateResult<Model> {
    match message {
        Message::System(msg) => update_system(model, msg),
        Message::Personas(msg) => update_personas(model, msg),
        Message::Form(msg) => update_form(model, msg),
        Message::Goal(msg) => update_goal(model, msg),
        Message::Analyze(msg) => update_analyze(model, msg),
        Message::Options(msg) => update_options(model, msg),
    }
}

/// Handle system messages
fn update_system(mut model: Model, message: SystemMessage) -> UpdateResult<Model> {
    match message {
        SystemMessage::Initialize => {
            model.status = "Loading personas...".to_string();
            UpdateResult::with_command(model, Command::network(NetworkCommand::LoadPersonas))
        }

        SystemMessage::Quit => {
            model.should_quit = true;
            UpdateResult::just_model(model)
        }
    }
}

/// Handle persona catalog messages
fn update_personas(mut model: Model, message: PersonaMessage) -> UpdateResult<Model> {
    match message {
        PersonaMessage::Loaded(personas) => {
            model.personas.load(personas);
            model.status = "Ready.".to_string();
        }

        PersonaMessage::LoadFailed(error) => {
            model.status = match error {
                KoiFoxError::Status { status, .. } => {
                    format!("Failed to load personas: {}", status)
                }
                other => format!("Error: {}", other),
            };
        }

        PersonaMessage::Select(module, cycle) => {
            let selector = model.personas.selector_mut(module);
            match cycle {
                Cycle::Next => selector.select_next(),
                Cycle::Previous => selector.select_previous(),
            }
        }
    }
    UpdateResult::just_model(model)
}

/// Handle form input messages
fn update_form(mut model: Model, message: FormMessage) -> UpdateResult<Model> {
    match message {
        FormMessage::FocusNext => model.focus_next(),
        FormMessage::FocusPrevious => model.focus_previous(),
        FormMessage::Edit(target, op) => model.text_field_mut(target).apply(op),

        FormMessage::StepTone(slider, steps) => {
            let delta = steps as f64 * model.tone_step;
            model.tone.adjust(slider, delta);
        }

        FormMessage::SetTone(slider, value) => model.tone.set(slider, value),

        // Tone, personas and the wizard are kept
        FormMessage::Clear => {
            model.conversation.clear();
            model.draft.clear();
            model.results.clear();
            model.status = "Cleared.".to_string();
            model.ensure_focus_visible();
        }
    }
    UpdateResult::just_model(model)
}

/// Handle goal mode and wizard messages
fn update_goal(mut model: Model, message: GoalMessage) -> UpdateResult<Model> {
    match message {
        GoalMessage::SetMode(mode) => model.goal_mode = mode,
        GoalMessage::ToggleMode => model.goal_mode = model.goal_mode.toggled(),

        GoalMessage::WizardNext => {
            if let WizardTransition::Advanced(step) = model.wizard.next() {
                tracing::debug!("Wizard moved to step {}", step.number());
            }
        }

        GoalMessage::WizardBack => model.wizard.back(),

        GoalMessage::CycleGoalType(cycle) => {
            model.wizard.goal_type = match cycle {
                Cycle::Next => model.wizard.goal_type.next(),
                Cycle::Previous => model.wizard.goal_type.previous(),
            };
        }
    }
    model.ensure_focus_visible();
    UpdateResult::just_model(model)
}

/// Handle the analysis request lifecycle
fn update_analyze(mut model: Model, message: AnalyzeMessage) -> UpdateResult<Model> {
    match message {
        AnalyzeMessage::Submit => {
            if let Some(pending) = model.pending_analysis {
                tracing::debug!("Ignoring analyze while {} is in flight", pending);
                return UpdateResult::just_model(model);
            }

            if let Some(hint) = model.analyze_hint() {
                model.status = hint.to_string();
                return UpdateResult::just_model(model);
            }

            let submission = match submission::prepare(model.snapshot()) {
                Ok(submission) => submission,
                Err(error) => {
                    model.status = error.to_string();
                    return UpdateResult::just_model(model);
                }
            };

            let request_id = Uuid::new_v4();
            model.status = format!("Analyzing ({})...", model.goal_mode);
            model.results.clear();
            model.pending_analysis = Some(request_id);
            model.ensure_focus_visible();

            UpdateResult::with_command(
                model,
                Command::network(NetworkCommand::Analyze {
                    request_id,
                    submission,
                }),
            )
        }

        AnalyzeMessage::Completed {
            request_id,
            response,
        } => {
            if model.pending_analysis != Some(request_id) {
                tracing::debug!("Dropping stale analysis result {}", request_id);
                return UpdateResult::just_model(model);
            }
            model.pending_analysis = None;

            let response = *response;
            model.results.koi_output = format_koi(response.koi.as_ref());
            model.results.fox_summary = fox_summary(&response.fox);
            model.results.options = OptionsView::from_options(response.fox.reply_options);
            model.results.selected = 0;
            model.status = "Done.".to_string();
            UpdateResult::just_model(model)
        }

        AnalyzeMessage::Failed { request_id, error } => {
            if model.pending_analysis != Some(request_id) {
                tracing::debug!("Dropping stale analysis failure {}", request_id);
                return UpdateResult::just_model(model);
            }
            model.pending_analysis = None;

            model.status = match error {
                KoiFoxError::Status { body, .. } => format!("Error: {}", body),
                other => format!("Failed: {}", other),
            };
            UpdateResult::just_model(model)
        }
    }
}

/// Handle reply option card actions
fn update_options(mut model: Model, message: OptionsMessage) -> UpdateResult<Model> {
    let count = model.results.options.cards().len();

    match message {
        OptionsMessage::SelectNext => {
            if count > 0 {
                model.results.selected = (model.results.selected + 1) % count;
            }
            UpdateResult::just_model(model)
        }

        OptionsMessage::SelectPrevious => {
            if count > 0 {
                model.results.selected = (model.results.selected + count - 1) % count;
            }
            UpdateResult::just_model(model)
        }

        OptionsMessage::Copy(index) => match model.results.options.get(index).cloned() {
            Some(option) => UpdateResult::with_command(
                model,
                Command::system(SystemCommand::CopyToClipboard {
                    tag: option.tag,
                    text: option.text,
                }),
            ),
            None => UpdateResult::just_model(model),
        },

        OptionsMessage::UseAsDraft(index) => {
            if let Some(option) = model.results.options.get(index).cloned() {
                model.draft.set(&option.text);
                model.status = format!("Draft replaced with: {}", option.tag);
            }
            UpdateResult::just_model(model)
        }

        OptionsMessage::Copied(tag) => {
            model.status = format!("Copied: {}", tag);
            UpdateResult::just_model(model)
        }

        OptionsMessage::CopyFailed(error) => {
            model.status = format!("Copy failed: {}", error);
            UpdateResult::just_model(model)
        }
    }
}
