use crate::events::KEY_HINTS;
use crate::tea::Model;
use crate::ui::theme::Theme;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// How the status line should be colored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Busy,
    Error,
}

impl StatusKind {
    /// Classify a status message by its prefix
    pub fn of(model: &Model) -> Self {
        if model.is_analyzing() || model.status.ends_with("...") {
            StatusKind::Busy
        } else if model.status.starts_with("Error")
            || model.status.starts_with("Failed")
            || model.status.starts_with("Copy failed")
        {
            StatusKind::Error
        } else {
            StatusKind::Info
        }
    }

    fn component(&self) -> &'static str {
        match self {
            StatusKind::Info => "text",
            StatusKind::Busy => "warning",
            StatusKind::Error => "error",
        }
    }
}

/// Status message line and the key hint line
pub fn render_status_bar(f: &mut Frame, area: Rect, model: &Model, theme: &Theme) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(area);

    let kind = StatusKind::of(model);
    let status = Line::from(vec![
        Span::styled(" ", theme.get_component_style("muted", false)),
        Span::styled(model.status.clone(), theme.get_component_style(kind.component(), false)),
    ]);
    f.render_widget(Paragraph::new(status), rows[0]);

    f.render_widget(
        Paragraph::new(Line::styled(
            format!(" {}", KEY_HINTS),
            theme.get_component_style("muted", false),
        )),
        rows[1],
    );
}
