use anyhow::Result;
use crossterm::{
    event::{self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::time::Duration;

use crate::api::client::{Backend, HttpBackend};
use crate::clipboard::{ClipboardManager, ClipboardSink};
use crate::config::AppConfig;
use crate::events::{key_to_message, paste_to_message};
use crate::tea::message::SystemMessage;
use crate::tea::{update, CommandExecutor, Message, Model, UpdateResult};
use crate::ui::UI;

/// Interactive popup: owns the view, the executor and the message channel
pub struct App {
    initial_model: Option<Model>,
    ui: UI,
    executor: CommandExecutor,
    receiver: mpsc::UnboundedReceiver<Message>,
}

impl App {
    /// Build the popup against the configured backend and the system clipboard
    pub fn new(config: &AppConfig) -> Result<Self> {
        let backend = HttpBackend::new(&config.backend.base_url)?;
        tracing::info!("Using backend at {}", backend.base_url());
        Ok(Self::with_parts(
            config,
            Arc::new(backend),
            Box::new(ClipboardManager::new()),
        ))
    }

    pub fn with_parts(
        config: &AppConfig,
        backend: Arc<dyn Backend>,
        clipboard: Box<dyn ClipboardSink>,
    ) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            initial_model: Some(Model::new(config)),
            ui: UI::new(),
            executor: CommandExecutor::new(backend, clipboard, sender),
            receiver,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        if !io::stdout().is_tty() {
            return Err(anyhow::anyhow!(
                "koifox needs a terminal (TTY) for the interactive popup. Use `koifox analyze` for scripted use."
            ));
        }

        enable_raw_mode().map_err(|e| anyhow::anyhow!("Failed to enable raw mode: {}", e))?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)
            .map_err(|e| anyhow::anyhow!("Failed to setup terminal: {}", e))?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)
            .map_err(|e| anyhow::anyhow!("Failed to create terminal: {}", e))?;

        let result = self.run_loop(&mut terminal).await;

        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableBracketedPaste
        )?;
        terminal.show_cursor()?;

        result
    }

    async fn run_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> Result<()> {
        let tick_rate = Duration::from_millis(50);
        let mut model = self
            .initial_model
            .take()
            .ok_or_else(|| anyhow::anyhow!("The popup has already run"))?;

        model = self.dispatch(model, SystemMessage::Initialize.into());

        loop {
            terminal.draw(|f| self.ui.render(f, &model))?;

            if event::poll(tick_rate)? {
                let message = match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        key_to_message(key, &model)
                    }
                    Event::Paste(text) => paste_to_message(text, &model),
                    // Resizes need no message; the next draw uses the new frame size
                    _ => None,
                };
                if let Some(message) = message {
                    model = self.dispatch(model, message);
                }
            }

            // Results of commands that finished since the last frame
            while let Ok(message) = self.receiver.try_recv() {
                model = self.dispatch(model, message);
            }

            if model.should_quit {
                tracing::info!("Quit requested");
                break;
            }

            tokio::task::yield_now().await;
        }

        Ok(())
    }

    /// Run one update cycle and hand its commands to the executor
    fn dispatch(&mut self, model: Model, message: Message) -> Model {
        tracing::debug!("Dispatching {:?}", message);
        let UpdateResult { model, commands } = update(model, message);
        for command in commands {
            // Spawned tasks report back through the channel
            drop(self.executor.execute(command));
        }
        model
    }
}
