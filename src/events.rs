use crate::api::types::PersonaModule;
use crate::goal::{GoalMode, WizardField};
use crate::tea::message::{
    AnalyzeMessage, Cycle, FormMessage, GoalMessage, Message, OptionsMessage, PersonaMessage,
    SystemMessage, TextTarget,
};
use crate::tea::model::Focus;
use crate::tea::Model;
use crate::text_field::EditOp;
use crate::tone::ToneSlider;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Key binding summary shown in the footer
pub const KEY_HINTS: &str =
    "Tab focus · ^R analyze · ^L clear · ^G goal mode · ^N/^B wizard · ^Q quit";

/// Translate a key press into a message for the current model
pub fn key_to_message(key: KeyEvent, model: &Model) -> Option<Message> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return control_key(key.code, model);
    }

    match key.code {
        KeyCode::Tab => return Some(FormMessage::FocusNext.into()),
        KeyCode::BackTab => return Some(FormMessage::FocusPrevious.into()),
        _ => {}
    }

    if key.modifiers.contains(KeyModifiers::ALT) {
        return None;
    }

    match model.focus {
        Focus::Conversation => text_key(key.code, TextTarget::Conversation, model),
        Focus::Draft => text_key(key.code, TextTarget::Draft, model),
        Focus::Wizard(field) => text_key(key.code, TextTarget::Wizard(field), model),
        Focus::KoiPersona => persona_key(key.code, PersonaModule::Koi),
        Focus::FoxPersona => persona_key(key.code, PersonaModule::Fox),
        Focus::Tone(slider) => tone_key(key.code, slider),
        Focus::GoalMode => match key.code {
            KeyCode::Left => Some(GoalMessage::SetMode(GoalMode::Guided).into()),
            KeyCode::Right => Some(GoalMessage::SetMode(GoalMode::Infer).into()),
            KeyCode::Char(' ') => Some(GoalMessage::ToggleMode.into()),
            _ => None,
        },
        Focus::GoalType => match key.code {
            KeyCode::Left | KeyCode::Up => Some(GoalMessage::CycleGoalType(Cycle::Previous).into()),
            KeyCode::Right | KeyCode::Down | KeyCode::Char(' ') => {
                Some(GoalMessage::CycleGoalType(Cycle::Next).into())
            }
            _ => None,
        },
        Focus::ReplyOptions => options_key(key.code, model.results.selected),
    }
}

/// Bracketed paste goes into the focused text input
pub fn paste_to_message(text: String, model: &Model) -> Option<Message> {
    let target = match model.focus {
        Focus::Conversation => TextTarget::Conversation,
        Focus::Draft => TextTarget::Draft,
        Focus::Wizard(field) => TextTarget::Wizard(field),
        _ => return None,
    };
    Some(FormMessage::Edit(target, EditOp::InsertStr(text)).into())
}

fn control_key(code: KeyCode, model: &Model) -> Option<Message> {
    let message: Message = match code {
        KeyCode::Char('c') | KeyCode::Char('q') => SystemMessage::Quit.into(),
        KeyCode::Char('r') => AnalyzeMessage::Submit.into(),
        KeyCode::Char('l') => FormMessage::Clear.into(),
        KeyCode::Char('g') => GoalMessage::ToggleMode.into(),
        KeyCode::Char('n') if model.wizard_visible() => GoalMessage::WizardNext.into(),
        KeyCode::Char('b') if model.wizard_visible() => GoalMessage::WizardBack.into(),
        _ => return None,
    };
    Some(message)
}

fn text_key(code: KeyCode, target: TextTarget, model: &Model) -> Option<Message> {
    let op = match code {
        KeyCode::Char(c) => EditOp::Insert(c),
        KeyCode::Enter => {
            if model.text_field(target).is_multiline() {
                EditOp::Newline
            } else if matches!(
                target,
                TextTarget::Wizard(WizardField::Goal)
                    | TextTarget::Wizard(WizardField::Relationship)
            ) {
                return Some(GoalMessage::WizardNext.into());
            } else {
                return None;
            }
        }
        KeyCode::Backspace => EditOp::Backspace,
        KeyCode::Delete => EditOp::Delete,
        KeyCode::Left => EditOp::Left,
        KeyCode::Right => EditOp::Right,
        KeyCode::Home => EditOp::Home,
        KeyCode::End => EditOp::End,
        _ => return None,
    };
    Some(FormMessage::Edit(target, op).into())
}

fn persona_key(code: KeyCode, module: PersonaModule) -> Option<Message> {
    match code {
        KeyCode::Left | KeyCode::Up => Some(PersonaMessage::Select(module, Cycle::Previous).into()),
        KeyCode::Right | KeyCode::Down => Some(PersonaMessage::Select(module, Cycle::Next).into()),
        _ => None,
    }
}

fn tone_key(code: KeyCode, slider: ToneSlider) -> Option<Message> {
    let message = match code {
        KeyCode::Left | KeyCode::Down => FormMessage::StepTone(slider, -1),
        KeyCode::Right | KeyCode::Up => FormMessage::StepTone(slider, 1),
        KeyCode::Home => FormMessage::SetTone(slider, 0.0),
        KeyCode::End => FormMessage::SetTone(slider, 1.0),
        _ => return None,
    };
    Some(message.into())
}

fn options_key(code: KeyCode, selected: usize) -> Option<Message> {
    let message = match code {
        KeyCode::Up | KeyCode::Char('k') => OptionsMessage::SelectPrevious,
        KeyCode::Down | KeyCode::Char('j') => OptionsMessage::SelectNext,
        KeyCode::Char('c') => OptionsMessage::Copy(selected),
        KeyCode::Char('u') | KeyCode::Enter => OptionsMessage::UseAsDraft(selected),
        _ => return None,
    };
    Some(message.into())
}
