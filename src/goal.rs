//! Goal mode and the three-step goal wizard
//!
//! The wizard is strictly linear (1 → 2 → 3, no skipping), so its state is a
//! step counter plus the field buffers. Every transition is a method on
//! [`Wizard`] that mutates nothing outside it.

use crate::api::types::{GoalSpec, GoalType};
use crate::text_field::TextField;
use serde::{Deserialize, Serialize};

/// Minimum goal length (in characters, after trimming) for guided analysis
pub const MIN_GOAL_LEN: usize = 3;

pub const GOAL_REQUIRED_MESSAGE: &str = "Please enter a goal (one sentence).";
pub const WIZARD_COMPLETE_MESSAGE: &str = "Wizard complete ✓ You can analyze now.";

/// Whether the user supplies the goal or the backend infers it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalMode {
    #[default]
    Guided,
    Infer,
}

impl GoalMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalMode::Guided => "guided",
            GoalMode::Infer => "infer",
        }
    }

    /// Hint shown under the mode selector
    pub fn hint(&self) -> &'static str {
        match self {
            GoalMode::Guided => "Guided mode: Koi/Fox will follow your explicit goal spec.",
            GoalMode::Infer => "Infer mode: Koi will infer the goal from context (V1).",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            GoalMode::Guided => GoalMode::Infer,
            GoalMode::Infer => GoalMode::Guided,
        }
    }
}

impl std::fmt::Display for GoalMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wizard page
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WizardStep {
    /// Step 1: the goal sentence
    Goal,
    /// Step 2: relationship and goal type
    Context,
    /// Step 3: constraints and success criteria
    Boundaries,
}

impl WizardStep {
    pub fn number(&self) -> u8 {
        match self {
            WizardStep::Goal => 1,
            WizardStep::Context => 2,
            WizardStep::Boundaries => 3,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::Goal => "What do you want out of this conversation?",
            WizardStep::Context => "Who are you talking to?",
            WizardStep::Boundaries => "Boundaries and success",
        }
    }

    fn previous(self) -> Self {
        match self {
            WizardStep::Goal | WizardStep::Context => WizardStep::Goal,
            WizardStep::Boundaries => WizardStep::Context,
        }
    }
}

/// Outcome of pressing "Next"/"Finish"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardTransition {
    Advanced(WizardStep),
    Blocked,
    Finished,
}

/// Editable wizard fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardField {
    Goal,
    Relationship,
    Constraints,
    SuccessCriteria,
}

/// Goal wizard state
#[derive(Debug, Clone)]
pub struct Wizard {
    step: WizardStep,
    pub goal: TextField,
    pub relationship: TextField,
    pub goal_type: GoalType,
    pub constraints: TextField,
    pub success_criteria: TextField,
    status: String,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}

impl Wizard {
    pub fn new() -> Self {
        Self {
            step: WizardStep::Goal,
            goal: TextField::single_line(),
            relationship: TextField::single_line(),
            goal_type: GoalType::default(),
            constraints: TextField::multi_line(),
            success_criteria: TextField::multi_line(),
            status: String::new(),
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    /// Inline status line (validation or completion message)
    pub fn status(&self) -> &str {
        &self.status
    }

    /// "Step N / 3"
    pub fn step_label(&self) -> String {
        format!("Step {} / 3", self.step.number())
    }

    pub fn back_enabled(&self) -> bool {
        self.step != WizardStep::Goal
    }

    pub fn next_label(&self) -> &'static str {
        if self.step == WizardStep::Boundaries {
            "Finish"
        } else {
            "Next"
        }
    }

    pub fn field(&self, field: WizardField) -> &TextField {
        match field {
            WizardField::Goal => &self.goal,
            WizardField::Relationship => &self.relationship,
            WizardField::Constraints => &self.constraints,
            WizardField::SuccessCriteria => &self.success_criteria,
        }
    }

    pub fn field_mut(&mut self, field: WizardField) -> &mut TextField {
        match field {
            WizardField::Goal => &mut self.goal,
            WizardField::Relationship => &mut self.relationship,
            WizardField::Constraints => &mut self.constraints,
            WizardField::SuccessCriteria => &mut self.success_criteria,
        }
    }

    /// Step back one page; no-op on step 1
    pub fn back(&mut self) {
        if self.back_enabled() {
            self.show(self.step.previous());
        }
    }

    /// Advance, validate, or finish depending on the current step
    pub fn next(&mut self) -> WizardTransition {
        match self.step {
            WizardStep::Goal => {
                if self.goal.value().trim().is_empty() {
                    self.status = GOAL_REQUIRED_MESSAGE.to_string();
                    return WizardTransition::Blocked;
                }
                self.show(WizardStep::Context);
                WizardTransition::Advanced(WizardStep::Context)
            }
            WizardStep::Context => {
                self.show(WizardStep::Boundaries);
                WizardTransition::Advanced(WizardStep::Boundaries)
            }
            WizardStep::Boundaries => {
                self.status = WIZARD_COMPLETE_MESSAGE.to_string();
                WizardTransition::Finished
            }
        }
    }

    fn show(&mut self, step: WizardStep) {
        self.step = step;
        self.status.clear();
    }

    /// A goal of at least [`MIN_GOAL_LEN`] characters is required for guided analysis
    pub fn is_complete(&self) -> bool {
        self.goal.value().trim().chars().count() >= MIN_GOAL_LEN
    }

    /// Snapshot the wizard fields as a goal spec
    pub fn goal_spec(&self) -> GoalSpec {
        GoalSpec {
            goal: self.goal.value().trim().to_string(),
            goal_type: self.goal_type,
            relationship: self.relationship.value().to_string(),
            constraints: parse_lines(self.constraints.value()),
            success_criteria: parse_lines(self.success_criteria.value()),
        }
    }
}

/// Split free text into trimmed, non-empty lines
pub fn parse_lines(text: &str) -> Vec<String> {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}
