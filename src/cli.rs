use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;

use crate::api::client::{Backend, HttpBackend};
use crate::api::types::{GoalSpec, GoalType, PersonaModule};
use crate::config::AppConfig;
use crate::error::KoiFoxError;
use crate::goal::{GoalMode, MIN_GOAL_LEN};
use crate::personas::{PersonaCatalog, PersonaSelector};
use crate::render::{
    format_koi, fox_summary, render_options, HtmlTarget, OptionsView, PlainTextTarget,
};
use crate::submission::{self, FormSnapshot};
use crate::tone::ToneParameters;

/// koifox - conversation coaching client for the Koi & Fox backend
#[derive(Parser, Debug)]
#[command(name = "koifox")]
#[command(about = "Get Koi commentary and Fox reply options for a conversation draft")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Configuration file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend base address (overrides the config file)
    #[arg(long, global = true)]
    pub api_base: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List Koi and Fox personas offered by the backend
    Personas,

    /// Analyze a conversation and draft without the interactive popup
    Analyze(AnalyzeArgs),

    /// Print the effective configuration as TOML
    Config(ConfigArgs),
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Also write the effective configuration to this file
    #[arg(long)]
    pub write: Option<PathBuf>,
}

/// Output format for `analyze`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Html,
    Json,
}

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Conversation context as text
    #[arg(long, conflicts_with = "conversation_file")]
    pub conversation: Option<String>,

    /// Read the conversation context from a file
    #[arg(long)]
    pub conversation_file: Option<PathBuf>,

    /// Your draft reply
    #[arg(long)]
    pub draft: String,

    /// Koi persona id (defaults to the first Koi persona)
    #[arg(long)]
    pub koi: Option<String>,

    /// Fox persona id (defaults to the first Fox persona)
    #[arg(long)]
    pub fox: Option<String>,

    /// Aggressiveness in [0, 1]
    #[arg(long, value_parser = parse_unit_interval)]
    pub aggressiveness: Option<f64>,

    /// Interruptiveness in [0, 1]
    #[arg(long, value_parser = parse_unit_interval)]
    pub interruptiveness: Option<f64>,

    /// Structure strength in [0, 1]
    #[arg(long, value_parser = parse_unit_interval)]
    pub structure_strength: Option<f64>,

    /// Explicit goal; selects guided mode and the v2 endpoint
    #[arg(long)]
    pub goal: Option<String>,

    /// Goal type (business, relationship, conflict_resolution, small_talk, other)
    #[arg(long, requires = "goal")]
    pub goal_type: Option<GoalType>,

    /// Who you are talking to
    #[arg(long, requires = "goal")]
    pub relationship: Option<String>,

    /// Constraint for the reply (repeatable)
    #[arg(long = "constraint", requires = "goal")]
    pub constraints: Vec<String>,

    /// Success criterion (repeatable)
    #[arg(long = "success", requires = "goal")]
    pub success_criteria: Vec<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl AnalyzeArgs {
    fn goal_mode(&self) -> GoalMode {
        if self.goal.is_some() {
            GoalMode::Guided
        } else {
            GoalMode::Infer
        }
    }

    fn goal_spec(&self) -> Option<GoalSpec> {
        self.goal.as_ref().map(|goal| GoalSpec {
            goal: goal.trim().to_string(),
            goal_type: self.goal_type.unwrap_or_default(),
            relationship: self.relationship.clone().unwrap_or_default(),
            constraints: self.constraints.clone(),
            success_criteria: self.success_criteria.clone(),
        })
    }

    fn tone(&self, base: ToneParameters) -> ToneParameters {
        ToneParameters {
            aggressiveness: self.aggressiveness.unwrap_or(base.aggressiveness),
            interruptiveness: self.interruptiveness.unwrap_or(base.interruptiveness),
            structure_strength: self.structure_strength.unwrap_or(base.structure_strength),
        }
    }

    fn read_conversation(&self) -> Result<String> {
        match (&self.conversation, &self.conversation_file) {
            (Some(text), _) => Ok(text.clone()),
            (None, Some(path)) => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read conversation from {}", path.display())),
            (None, None) => Ok(String::new()),
        }
    }
}

/// Accept a tone value in [0, 1]
pub fn parse_unit_interval(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a number", s))?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{} is outside the range 0.0 to 1.0", value))
    }
}

/// Requested persona id, or the first catalog entry
fn pick_persona(selector: &mut PersonaSelector, requested: Option<&str>) -> String {
    match requested {
        Some(id) => {
            if !selector.personas().is_empty() && !selector.select_id(id) {
                tracing::warn!("Persona '{}' is not in the backend catalog", id);
            }
            id.to_string()
        }
        None => selector.selected_id().to_string(),
    }
}

/// Keep the response body of non-success replies in the message
fn backend_error(error: KoiFoxError) -> anyhow::Error {
    match error {
        KoiFoxError::Status { status, body } => {
            anyhow!("Backend returned {}: {}", status, body)
        }
        other => other.into(),
    }
}

/// Command-line interface handler
pub struct CliHandler {
    config: AppConfig,
    backend: Arc<dyn Backend>,
}

impl CliHandler {
    /// Create a handler talking to the configured backend
    pub fn new(config: AppConfig) -> Result<Self> {
        let backend = HttpBackend::new(&config.backend.base_url)?;
        Ok(Self::with_backend(config, Arc::new(backend)))
    }

    pub fn with_backend(config: AppConfig, backend: Arc<dyn Backend>) -> Self {
        Self { config, backend }
    }

    /// Handle CLI commands
    pub async fn handle_command(&self, command: Commands) -> Result<()> {
        let output = match command {
            Commands::Personas => self.handle_personas().await?,
            Commands::Analyze(args) => self.handle_analyze(args).await?,
            Commands::Config(args) => self.handle_config(args)?,
        };
        println!("{}", output);
        Ok(())
    }

    /// Persona listing grouped by module
    pub async fn handle_personas(&self) -> Result<String> {
        let mut catalog = PersonaCatalog::default();
        catalog.load(self.backend.list_personas().await.map_err(backend_error)?);

        let mut lines = Vec::new();
        for (heading, module) in [("Koi", PersonaModule::Koi), ("Fox", PersonaModule::Fox)] {
            lines.push(format!("{} personas:", heading));
            let personas = catalog.selector(module).personas();
            if personas.is_empty() {
                lines.push("  (none)".to_string());
            }
            for persona in personas {
                match &persona.description {
                    Some(description) if !description.is_empty() => lines.push(format!(
                        "  {:<28} {} - {}",
                        persona.id, persona.name, description
                    )),
                    _ => lines.push(format!("  {:<28} {}", persona.id, persona.name)),
                }
            }
        }
        Ok(lines.join("\n"))
    }

    /// Run one analysis and render it in the requested format
    pub async fn handle_analyze(&self, args: AnalyzeArgs) -> Result<String> {
        let conversation = args.read_conversation()?;

        let mut catalog = PersonaCatalog::default();
        if args.koi.is_none() || args.fox.is_none() {
            catalog.load(self.backend.list_personas().await.map_err(backend_error)?);
        }
        let koi_id = pick_persona(&mut catalog.koi, args.koi.as_deref());
        let fox_id = pick_persona(&mut catalog.fox, args.fox.as_deref());

        let mode = args.goal_mode();
        let submission = submission::prepare(FormSnapshot {
            session_id: &self.config.backend.session_id,
            conversation: &conversation,
            user_draft: &args.draft,
            koi_persona_id: &koi_id,
            fox_persona_id: &fox_id,
            tone: args.tone(self.config.tone.initial()),
            mode,
            goal_spec: args
                .goal_spec()
                .filter(|spec| spec.goal.chars().count() >= MIN_GOAL_LEN),
        })?;

        tracing::info!(
            "Analyzing in {} mode via {}",
            mode,
            submission.endpoint.path()
        );
        let response = self
            .backend
            .analyze(submission.endpoint, &submission.request)
            .await
            .map_err(backend_error)?;

        let output = match args.format {
            OutputFormat::Json => serde_json::to_string_pretty(&response)
                .map_err(|e| anyhow!("Failed to encode response: {}", e))?,
            OutputFormat::Html => {
                let view = OptionsView::from_options(response.fox.reply_options.clone());
                render_options(&view, HtmlTarget::new())
            }
            OutputFormat::Text => {
                let view = OptionsView::from_options(response.fox.reply_options.clone());
                let mut sections = vec![format!("Koi:\n{}", format_koi(response.koi.as_ref()))];
                if let Some(summary) = fox_summary(&response.fox) {
                    sections.push(format!("Fox: {}", summary));
                }
                sections.push(format!(
                    "Reply options:\n{}",
                    render_options(&view, PlainTextTarget::new())
                ));
                sections.join("\n\n")
            }
        };
        Ok(output)
    }

    /// Effective configuration as TOML
    pub fn handle_config(&self, args: ConfigArgs) -> Result<String> {
        if let Some(path) = &args.write {
            self.config.save_to_file(path)?;
            tracing::info!("Configuration written to {}", path.display());
        }

        let mut output = String::new();
        if let Some(path) = AppConfig::default_path() {
            output.push_str(&format!("# default location: {}\n", path.display()));
        }
        output.push_str(&self.config.to_toml()?);
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{AnalyzeEndpoint, AnalyzeRequest, AnalyzeResponse, Persona};
    use crate::error::KoiFoxResult;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeBackend {
        calls: Mutex<Vec<(AnalyzeEndpoint, AnalyzeRequest)>>,
        response: Option<AnalyzeResponse>,
    }

    #[async_trait]
    impl Backend for FakeBackend {
        async fn list_personas(&self) -> KoiFoxResult<Vec<Persona>> {
            Ok(vec![
                Persona {
                    id: "fox_a".to_string(),
                    name: "Fox A".to_string(),
                    module: PersonaModule::Fox,
                    description: None,
                },
                Persona {
                    id: "koi_a".to_string(),
                    name: "Koi A".to_string(),
                    module: PersonaModule::Koi,
                    description: Some("Calm".to_string()),
                },
            ])
        }

        async fn analyze(
            &self,
            endpoint: AnalyzeEndpoint,
            request: &AnalyzeRequest,
        ) -> KoiFoxResult<AnalyzeResponse> {
            self.calls
                .lock()
                .unwrap()
                .push((endpoint, request.clone()));
            self.response
                .clone()
                .ok_or_else(|| KoiFoxError::status(500, "boom"))
        }
    }

    fn handler(backend: Arc<FakeBackend>) -> CliHandler {
        CliHandler::with_backend(AppConfig::default(), backend)
    }

    fn parse_analyze(args: &[&str]) -> AnalyzeArgs {
        let mut argv = vec!["koifox", "analyze"];
        argv.extend_from_slice(args);
        match Cli::parse_from(argv).command {
            Some(Commands::Analyze(args)) => args,
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_unit_interval_parser() {
        assert_eq!(parse_unit_interval("0.25"), Ok(0.25));
        assert!(parse_unit_interval("1.5").is_err());
        assert!(parse_unit_interval("abc").is_err());
    }

    #[test]
    fn test_goal_flags_require_goal() {
        let result = Cli::try_parse_from([
            "koifox",
            "analyze",
            "--draft",
            "hi",
            "--relationship",
            "boss",
        ]);
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_personas_listing_groups_by_module() {
        let output = handler(Arc::new(FakeBackend::default()))
            .handle_personas()
            .await
            .unwrap();
        let koi_pos = output.find("Koi personas:").unwrap();
        let fox_pos = output.find("Fox personas:").unwrap();
        assert!(koi_pos < output.find("koi_a").unwrap());
        assert!(fox_pos < output.find("fox_a").unwrap());
        assert!(output.contains("Koi A - Calm"));
    }

    #[tokio::test]
    async fn test_infer_analysis_uses_defaults() {
        let backend = Arc::new(FakeBackend {
            response: Some(AnalyzeResponse {
                koi: Some(serde_json::json!({"goal": "agree on a date"})),
                fox: Default::default(),
            }),
            ..Default::default()
        });
        let args = parse_analyze(&["--conversation", "A: hi", "--draft", " sure "]);

        let output = handler(backend.clone()).handle_analyze(args).await.unwrap();
        assert!(output.contains("No reply options returned."));

        let calls = backend.calls.lock().unwrap();
        let (endpoint, request) = &calls[0];
        assert_eq!(*endpoint, AnalyzeEndpoint::Legacy);
        assert_eq!(request.koi_persona_id, "koi_a");
        assert_eq!(request.fox_persona_id, "fox_a");
        assert_eq!(request.user_draft, "sure");
        assert_eq!(request.aggressiveness, 0.5);
        assert!(request.goal_spec.is_none());
    }

    #[tokio::test]
    async fn test_goal_selects_guided_endpoint() {
        let backend = Arc::new(FakeBackend {
            response: Some(AnalyzeResponse {
                koi: Some(serde_json::json!({})),
                fox: Default::default(),
            }),
            ..Default::default()
        });
        let args = parse_analyze(&[
            "--conversation",
            "A: hi",
            "--draft",
            "hello",
            "--koi",
            "koi_x",
            "--fox",
            "fox_x",
            "--goal",
            "Agree on Friday",
            "--goal-type",
            "business",
            "--constraint",
            "no pressure",
            "--format",
            "json",
        ]);

        handler(backend.clone()).handle_analyze(args).await.unwrap();

        let calls = backend.calls.lock().unwrap();
        let (endpoint, request) = &calls[0];
        assert_eq!(*endpoint, AnalyzeEndpoint::V2);
        let spec = request.goal_spec.as_ref().unwrap();
        assert_eq!(spec.goal, "Agree on Friday");
        assert_eq!(spec.goal_type, GoalType::Business);
        assert_eq!(spec.constraints, vec!["no pressure".to_string()]);
        assert_eq!(request.koi_persona_id, "koi_x");
    }

    #[tokio::test]
    async fn test_missing_draft_text_is_rejected_before_request() {
        let backend = Arc::new(FakeBackend::default());
        let args = parse_analyze(&["--conversation", "A: hi", "--draft", "   "]);

        let err = handler(backend.clone())
            .handle_analyze(args)
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Please paste conversation context and write a draft."
        );
        assert!(backend.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_short_goal_is_rejected_before_request() {
        let backend = Arc::new(FakeBackend::default());
        let args = parse_analyze(&[
            "--conversation",
            "A: hi",
            "--draft",
            "hello",
            "--goal",
            " ab ",
        ]);

        let err = handler(backend.clone())
            .handle_analyze(args)
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Complete the wizard (Step 1 goal is required)."
        );
        assert!(backend.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_config_write_round_trips() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("koifox").join("config.toml");
        let mut config = AppConfig::default();
        config.backend.session_id = "team".to_string();

        let handler = CliHandler::with_backend(config, Arc::new(FakeBackend::default()));
        let output = handler
            .handle_config(ConfigArgs {
                write: Some(path.clone()),
            })
            .unwrap();
        assert!(output.contains("session_id = \"team\""));

        let loaded = AppConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded.backend.session_id, "team");
    }

    #[tokio::test]
    async fn test_status_error_keeps_body() {
        let backend = Arc::new(FakeBackend::default());
        let args = parse_analyze(&["--conversation", "A: hi", "--draft", "ok"]);

        let err = handler(backend).handle_analyze(args).await.unwrap_err();
        assert_eq!(err.to_string(), "Backend returned 500: boom");
    }
}
