//! Wire types exchanged with the Koi & Fox backend

use serde::{Deserialize, Serialize};

/// Which analysis module a persona belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersonaModule {
    /// Goal and direction commentary
    Koi,
    /// Strategy and tone, produces reply options
    Fox,
}

impl std::fmt::Display for PersonaModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PersonaModule::Koi => write!(f, "koi"),
            PersonaModule::Fox => write!(f, "fox"),
        }
    }
}

/// Persona entry from the backend catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Persona {
    pub id: String,
    pub name: String,
    pub module: PersonaModule,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// `GET /personas` response body
#[derive(Debug, Clone, Deserialize)]
pub struct PersonaListResponse {
    pub personas: Vec<Persona>,
}

/// Conversation goal categories accepted by the v2 endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalType {
    Business,
    Relationship,
    ConflictResolution,
    SmallTalk,
    #[default]
    Other,
}

impl GoalType {
    pub const ALL: [GoalType; 5] = [
        GoalType::Business,
        GoalType::Relationship,
        GoalType::ConflictResolution,
        GoalType::SmallTalk,
        GoalType::Other,
    ];

    /// Wire name of the goal type
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalType::Business => "business",
            GoalType::Relationship => "relationship",
            GoalType::ConflictResolution => "conflict_resolution",
            GoalType::SmallTalk => "small_talk",
            GoalType::Other => "other",
        }
    }

    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            GoalType::Business => "Business",
            GoalType::Relationship => "Relationship",
            GoalType::ConflictResolution => "Conflict resolution",
            GoalType::SmallTalk => "Small talk",
            GoalType::Other => "Other",
        }
    }

    /// Next goal type in display order, wrapping around
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|g| *g == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous goal type in display order, wrapping around
    pub fn previous(self) -> Self {
        let idx = Self::ALL.iter().position(|g| *g == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl std::str::FromStr for GoalType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GoalType::ALL
            .iter()
            .copied()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "unknown goal type '{}', expected one of: business, relationship, conflict_resolution, small_talk, other",
                    s
                )
            })
    }
}

/// Explicit goal attached to guided-mode requests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalSpec {
    pub goal: String,
    pub goal_type: GoalType,
    pub relationship: String,
    pub constraints: Vec<String>,
    pub success_criteria: Vec<String>,
}

/// Body for `POST /analyze` and `POST /v2/analyze`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyzeRequest {
    pub session_id: String,
    pub conversation: String,
    pub user_draft: String,
    pub koi_persona_id: String,
    pub fox_persona_id: String,
    pub aggressiveness: f64,
    pub interruptiveness: f64,
    pub structure_strength: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal_spec: Option<GoalSpec>,
}

/// Which analyze route a request targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyzeEndpoint {
    /// `POST /analyze`, goal inferred by the backend
    Legacy,
    /// `POST /v2/analyze`, explicit goal spec
    V2,
}

impl AnalyzeEndpoint {
    /// Path relative to the backend base address
    pub fn path(&self) -> &'static str {
        match self {
            AnalyzeEndpoint::Legacy => "/analyze",
            AnalyzeEndpoint::V2 => "/v2/analyze",
        }
    }
}

/// One candidate reply produced by the Fox persona
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplyOption {
    pub tag: String,
    pub text: String,
    pub why: String,
}

/// Fox half of the analysis
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FoxOutput {
    #[serde(default)]
    pub reply_options: Vec<ReplyOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detected_emotion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power_dynamic: Option<String>,
    #[serde(default)]
    pub risk_flags: Vec<String>,
}

/// Analysis response; `koi` is kept opaque and shown as formatted JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub koi: Option<serde_json::Value>,
    #[serde(default)]
    pub fox: FoxOutput,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_persona_module_parsing() {
        let persona: Persona = serde_json::from_value(json!({
            "id": "koi_coach_clarifier",
            "name": "Koi · Coach Clarifier",
            "module": "koi",
            "description": "Gentle and Socratic."
        }))
        .unwrap();

        assert_eq!(persona.module, PersonaModule::Koi);
        assert_eq!(persona.description.as_deref(), Some("Gentle and Socratic."));
    }

    #[test]
    fn test_response_without_reply_options() {
        let response: AnalyzeResponse = serde_json::from_value(json!({
            "koi": {"goal": "close the deal"},
            "fox": {"detected_emotion": "calm"}
        }))
        .unwrap();

        assert!(response.fox.reply_options.is_empty());
        assert_eq!(response.fox.detected_emotion.as_deref(), Some("calm"));
    }

    #[test]
    fn test_response_without_fox() {
        let response: AnalyzeResponse =
            serde_json::from_value(json!({"koi": {"goal": "x"}})).unwrap();
        assert_eq!(response.fox, FoxOutput::default());
    }

    #[test]
    fn test_response_without_koi() {
        let response: AnalyzeResponse =
            serde_json::from_value(json!({"fox": {"risk_flags": ["vague"]}})).unwrap();
        assert!(response.koi.is_none());
        assert_eq!(serde_json::to_value(&response).unwrap().get("koi"), None);
    }

    #[test]
    fn test_goal_type_wire_names() {
        assert_eq!(
            serde_json::to_value(GoalType::ConflictResolution).unwrap(),
            json!("conflict_resolution")
        );
        assert_eq!("small_talk".parse::<GoalType>().unwrap(), GoalType::SmallTalk);
        assert!("chit_chat".parse::<GoalType>().is_err());
    }

    #[test]
    fn test_goal_type_cycles() {
        assert_eq!(GoalType::Other.next(), GoalType::Business);
        assert_eq!(GoalType::Business.previous(), GoalType::Other);
    }

    #[test]
    fn test_endpoint_paths() {
        assert_eq!(AnalyzeEndpoint::Legacy.path(), "/analyze");
        assert_eq!(AnalyzeEndpoint::V2.path(), "/v2/analyze");
    }
}
