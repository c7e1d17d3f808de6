//! Client model following TEA pattern
//!
//! Contains all popup state in one structure that is only changed by the
//! update function in response to messages.

use crate::config::AppConfig;
use crate::goal::{GoalMode, Wizard, WizardField, WizardStep};
use crate::personas::PersonaCatalog;
use crate::render::OptionsView;
use crate::submission::FormSnapshot;
use crate::tea::message::TextTarget;
use crate::text_field::TextField;
use crate::tone::{ToneParameters, ToneSlider};
use uuid::Uuid;

/// Input that currently receives key presses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Conversation,
    Draft,
    KoiPersona,
    FoxPersona,
    Tone(ToneSlider),
    GoalMode,
    Wizard(WizardField),
    GoalType,
    ReplyOptions,
}

/// Rendered analysis output
#[derive(Debug, Clone, Default)]
pub struct ResultsState {
    /// Pretty-printed Koi commentary
    pub koi_output: String,

    /// Fox signal summary line
    pub fox_summary: Option<String>,

    pub options: OptionsView,

    /// Highlighted card
    pub selected: usize,
}

impl ResultsState {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Main client model containing all state
#[derive(Debug, Clone)]
pub struct Model {
    pub should_quit: bool,

    /// Session id sent with every analysis
    pub session_id: String,

    /// Slider movement per key press
    pub tone_step: f64,

    pub conversation: TextField,
    pub draft: TextField,
    pub tone: ToneParameters,
    pub personas: PersonaCatalog,
    pub goal_mode: GoalMode,
    pub wizard: Wizard,
    pub results: ResultsState,

    /// Status line text
    pub status: String,

    /// Id of the analysis currently in flight
    pub pending_analysis: Option<Uuid>,

    pub focus: Focus,
}

impl Model {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            should_quit: false,
            session_id: config.backend.session_id.clone(),
            tone_step: config.tone.step,
            conversation: TextField::multi_line(),
            draft: TextField::multi_line(),
            tone: config.tone.initial(),
            personas: PersonaCatalog::default(),
            goal_mode: config.goal.default_mode,
            wizard: Wizard::new(),
            results: ResultsState::default(),
            status: String::new(),
            pending_analysis: None,
            focus: Focus::Conversation,
        }
    }

    /// Analyze is disabled in guided mode until the goal is long enough
    pub fn analyze_enabled(&self) -> bool {
        match self.goal_mode {
            GoalMode::Guided => self.wizard.is_complete(),
            GoalMode::Infer => true,
        }
    }

    /// Explanation shown next to a disabled analyze action
    pub fn analyze_hint(&self) -> Option<&'static str> {
        if self.analyze_enabled() {
            None
        } else {
            Some("Complete the wizard (Step 1 goal is required).")
        }
    }

    pub fn is_analyzing(&self) -> bool {
        self.pending_analysis.is_some()
    }

    pub fn wizard_visible(&self) -> bool {
        self.goal_mode == GoalMode::Guided
    }

    /// Current inputs as a request snapshot
    pub fn snapshot(&self) -> FormSnapshot<'_> {
        FormSnapshot {
            session_id: &self.session_id,
            conversation: self.conversation.value(),
            user_draft: self.draft.value(),
            koi_persona_id: self.personas.koi.selected_id(),
            fox_persona_id: self.personas.fox.selected_id(),
            tone: self.tone,
            mode: self.goal_mode,
            goal_spec: match self.goal_mode {
                GoalMode::Guided if self.wizard.is_complete() => Some(self.wizard.goal_spec()),
                _ => None,
            },
        }
    }

    pub fn text_field(&self, target: TextTarget) -> &TextField {
        match target {
            TextTarget::Conversation => &self.conversation,
            TextTarget::Draft => &self.draft,
            TextTarget::Wizard(field) => self.wizard.field(field),
        }
    }

    pub fn text_field_mut(&mut self, target: TextTarget) -> &mut TextField {
        match target {
            TextTarget::Conversation => &mut self.conversation,
            TextTarget::Draft => &mut self.draft,
            TextTarget::Wizard(field) => self.wizard.field_mut(field),
        }
    }

    /// Focusable inputs in tab order, given the goal mode and wizard step
    pub fn focus_order(&self) -> Vec<Focus> {
        let mut order = vec![
            Focus::Conversation,
            Focus::Draft,
            Focus::KoiPersona,
            Focus::FoxPersona,
            Focus::Tone(ToneSlider::Aggressiveness),
            Focus::Tone(ToneSlider::Interruptiveness),
            Focus::Tone(ToneSlider::StructureStrength),
            Focus::GoalMode,
        ];

        if self.wizard_visible() {
            match self.wizard.step() {
                WizardStep::Goal => order.push(Focus::Wizard(WizardField::Goal)),
                WizardStep::Context => {
                    order.push(Focus::Wizard(WizardField::Relationship));
                    order.push(Focus::GoalType);
                }
                WizardStep::Boundaries => {
                    order.push(Focus::Wizard(WizardField::Constraints));
                    order.push(Focus::Wizard(WizardField::SuccessCriteria));
                }
            }
        }

        if !self.results.options.cards().is_empty() {
            order.push(Focus::ReplyOptions);
        }
        order
    }

    /// Move focus back to a visible input if the current one disappeared
    pub fn ensure_focus_visible(&mut self) {
        if !self.focus_order().contains(&self.focus) {
            self.focus = Focus::GoalMode;
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = Self::step_focus(&self.focus_order(), self.focus, 1);
    }

    pub fn focus_previous(&mut self) {
        self.focus = Self::step_focus(&self.focus_order(), self.focus, -1);
    }

    fn step_focus(order: &[Focus], current: Focus, delta: isize) -> Focus {
        let len = order.len() as isize;
        match order.iter().position(|f| *f == current) {
            Some(idx) => order[((idx as isize + delta).rem_euclid(len)) as usize],
            None => order[0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_model_defaults() {
        let model = Model::new(&AppConfig::default());
        assert_eq!(model.goal_mode, GoalMode::Guided);
        assert_eq!(model.wizard.step(), WizardStep::Goal);
        assert_eq!(model.session_id, "demo");
        assert!(!model.analyze_enabled());
        assert!(model.results.options.is_empty());
    }

    #[test]
    fn test_focus_order_follows_wizard_step() {
        let mut model = Model::new(&AppConfig::default());
        assert!(model.focus_order().contains(&Focus::Wizard(WizardField::Goal)));

        model.wizard.goal.set("Close the deal");
        model.wizard.next();
        let order = model.focus_order();
        assert!(order.contains(&Focus::GoalType));
        assert!(!order.contains(&Focus::Wizard(WizardField::Goal)));

        model.goal_mode = GoalMode::Infer;
        assert_eq!(*model.focus_order().last().unwrap(), Focus::GoalMode);
    }

    #[test]
    fn test_focus_wraps() {
        let mut model = Model::new(&AppConfig::default());
        model.focus_previous();
        assert_eq!(model.focus, Focus::Wizard(WizardField::Goal));
        model.focus_next();
        assert_eq!(model.focus, Focus::Conversation);
    }

    #[test]
    fn test_snapshot_omits_incomplete_goal() {
        let mut model = Model::new(&AppConfig::default());
        model.wizard.goal.set("ok");
        assert!(model.snapshot().goal_spec.is_none());

        model.wizard.goal.set("okay");
        assert_eq!(model.snapshot().goal_spec.unwrap().goal, "okay");
    }
}
