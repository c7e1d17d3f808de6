use crate::goal::{WizardField, WizardStep};
use crate::tea::model::Focus;
use crate::tea::Model;
use crate::ui::form::render_text_field;
use crate::ui::theme::Theme;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Goal wizard panel, only drawn in guided mode
pub fn render_wizard(f: &mut Frame, area: Rect, model: &Model, theme: &Theme) {
    let wizard = &model.wizard;
    let focused = matches!(model.focus, Focus::Wizard(_) | Focus::GoalType);

    let block = Block::default()
        .title(format!("Goal wizard · {}", wizard.step_label()))
        .borders(Borders::ALL)
        .border_style(theme.get_component_style("border", focused));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // step title
            Constraint::Min(3),    // fields
            Constraint::Length(1), // inline status
            Constraint::Length(1), // navigation
        ])
        .split(inner);

    f.render_widget(
        Paragraph::new(Line::styled(
            wizard.step().title(),
            theme.get_component_style("title", false),
        )),
        chunks[0],
    );

    match wizard.step() {
        WizardStep::Goal => {
            render_field(f, chunks[1], "Goal (one sentence)", WizardField::Goal, model, theme);
        }
        WizardStep::Context => {
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(3), Constraint::Min(1)])
                .split(chunks[1]);
            render_field(f, rows[0], "Relationship", WizardField::Relationship, model, theme);
            render_goal_type(f, rows[1], model, theme);
        }
        WizardStep::Boundaries => {
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(chunks[1]);
            render_field(
                f,
                columns[0],
                "Constraints (one per line)",
                WizardField::Constraints,
                model,
                theme,
            );
            render_field(
                f,
                columns[1],
                "Success criteria (one per line)",
                WizardField::SuccessCriteria,
                model,
                theme,
            );
        }
    }

    let status_style = if wizard.is_complete() {
        theme.get_component_style("success", false)
    } else {
        theme.get_component_style("error", false)
    };
    f.render_widget(
        Paragraph::new(Line::styled(wizard.status().to_string(), status_style)),
        chunks[2],
    );

    let back_style = theme.get_component_style("button", wizard.back_enabled());
    let nav = Line::from(vec![
        Span::styled("[^B] Back", back_style),
        Span::raw("  "),
        Span::styled(
            format!("[^N] {}", wizard.next_label()),
            theme.get_component_style("button", true),
        ),
    ]);
    f.render_widget(Paragraph::new(nav), chunks[3]);
}

fn render_field(
    f: &mut Frame,
    area: Rect,
    title: &str,
    field: WizardField,
    model: &Model,
    theme: &Theme,
) {
    render_text_field(
        f,
        area,
        title,
        model.wizard.field(field),
        model.focus == Focus::Wizard(field),
        theme,
    );
}

fn render_goal_type(f: &mut Frame, area: Rect, model: &Model, theme: &Theme) {
    let focused = model.focus == Focus::GoalType;
    let value_style = if focused {
        theme.get_component_style("selection", true)
    } else {
        theme.get_component_style("text", false)
    };
    let line = Line::from(vec![
        Span::styled("Goal type: ", theme.get_component_style("muted", false)),
        Span::styled(format!("◀ {} ▶", model.wizard.goal_type.label()), value_style),
    ]);
    f.render_widget(Paragraph::new(line), area);
}
