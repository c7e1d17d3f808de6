//! Building an analysis request from the current inputs

use crate::api::types::{AnalyzeEndpoint, AnalyzeRequest, GoalSpec};
use crate::error::ValidationError;
use crate::goal::GoalMode;
use crate::tone::ToneParameters;

/// Placeholder session id used until real sessions exist
pub const DEFAULT_SESSION_ID: &str = "demo";

/// Borrowed view of everything that goes into a request
#[derive(Debug, Clone)]
pub struct FormSnapshot<'a> {
    pub session_id: &'a str,
    pub conversation: &'a str,
    pub user_draft: &'a str,
    pub koi_persona_id: &'a str,
    pub fox_persona_id: &'a str,
    pub tone: ToneParameters,
    pub mode: GoalMode,
    /// Goal spec from the wizard; only consulted in guided mode
    pub goal_spec: Option<GoalSpec>,
}

/// A validated request and the route it goes to
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub endpoint: AnalyzeEndpoint,
    pub request: AnalyzeRequest,
}

/// Route for a goal mode
pub fn endpoint_for(mode: GoalMode) -> AnalyzeEndpoint {
    match mode {
        GoalMode::Guided => AnalyzeEndpoint::V2,
        GoalMode::Infer => AnalyzeEndpoint::Legacy,
    }
}

/// Validate the inputs and build the request
///
/// Conversation and draft are trimmed; both must be non-empty. `goal_spec` is
/// attached only in guided mode.
pub fn prepare(snapshot: FormSnapshot<'_>) -> Result<Submission, ValidationError> {
    let conversation = snapshot.conversation.trim();
    let user_draft = snapshot.user_draft.trim();

    if conversation.is_empty() || user_draft.is_empty() {
        return Err(ValidationError::MissingInput);
    }

    let goal_spec = match snapshot.mode {
        GoalMode::Guided => Some(snapshot.goal_spec.ok_or(ValidationError::IncompleteGoal)?),
        GoalMode::Infer => None,
    };

    Ok(Submission {
        endpoint: endpoint_for(snapshot.mode),
        request: AnalyzeRequest {
            session_id: snapshot.session_id.to_string(),
            conversation: conversation.to_string(),
            user_draft: user_draft.to_string(),
            koi_persona_id: snapshot.koi_persona_id.to_string(),
            fox_persona_id: snapshot.fox_persona_id.to_string(),
            aggressiveness: snapshot.tone.aggressiveness,
            interruptiveness: snapshot.tone.interruptiveness,
            structure_strength: snapshot.tone.structure_strength,
            goal_spec,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::GoalType;

    fn snapshot<'a>(conversation: &'a str, draft: &'a str, mode: GoalMode) -> FormSnapshot<'a> {
        FormSnapshot {
            session_id: DEFAULT_SESSION_ID,
            conversation,
            user_draft: draft,
            koi_persona_id: "koi_entrepreneur_driver",
            fox_persona_id: "fox_workplace_leader",
            tone: ToneParameters::default(),
            mode,
            goal_spec: None,
        }
    }

    #[test]
    fn test_missing_input_is_rejected() {
        assert_eq!(
            prepare(snapshot("  ", "Sure", GoalMode::Infer)),
            Err(ValidationError::MissingInput)
        );
        assert_eq!(
            prepare(snapshot("Hi", "\n", GoalMode::Infer)),
            Err(ValidationError::MissingInput)
        );
    }

    #[test]
    fn test_infer_mode_targets_legacy_without_goal() {
        let submission = prepare(snapshot(" Hi ", "Sure", GoalMode::Infer)).unwrap();
        assert_eq!(submission.endpoint, AnalyzeEndpoint::Legacy);
        assert_eq!(submission.request.conversation, "Hi");

        let body = serde_json::to_value(&submission.request).unwrap();
        assert!(body.get("goal_spec").is_none());
        assert_eq!(body["session_id"], "demo");
        assert_eq!(body["aggressiveness"], 0.5);
    }

    #[test]
    fn test_guided_mode_attaches_goal() {
        let mut form = snapshot("Hi", "Sure", GoalMode::Guided);
        form.goal_spec = Some(GoalSpec {
            goal: "Resolve the billing dispute".to_string(),
            goal_type: GoalType::ConflictResolution,
            relationship: "client".to_string(),
            constraints: vec![],
            success_criteria: vec![],
        });

        let submission = prepare(form).unwrap();
        assert_eq!(submission.endpoint, AnalyzeEndpoint::V2);

        let body = serde_json::to_value(&submission.request).unwrap();
        assert_eq!(body["goal_spec"]["goal"], "Resolve the billing dispute");
        assert_eq!(body["goal_spec"]["goal_type"], "conflict_resolution");
        assert_eq!(body["goal_spec"]["constraints"], serde_json::json!([]));
    }

    #[test]
    fn test_guided_mode_without_goal_is_rejected() {
        assert_eq!(
            prepare(snapshot("Hi", "Sure", GoalMode::Guided)),
            Err(ValidationError::IncompleteGoal)
        );
    }
}
