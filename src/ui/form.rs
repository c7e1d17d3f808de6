use crate::api::types::PersonaModule;
use crate::goal::GoalMode;
use crate::personas::PersonaSelector;
use crate::tea::model::Focus;
use crate::tea::Model;
use crate::text_field::TextField;
use crate::tone::ToneSlider;
use crate::ui::theme::Theme;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

/// Bordered text input; the focused field shows a `|` cursor
pub fn render_text_field(
    f: &mut Frame,
    area: Rect,
    title: &str,
    field: &TextField,
    focused: bool,
    theme: &Theme,
) {
    let block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_style(theme.get_component_style("border", focused));

    let inner_height = block.inner(area).height as usize;

    let display_value = if focused {
        let mut chars: Vec<char> = field.value().chars().collect();
        let cursor = field.cursor().min(chars.len());
        chars.insert(cursor, '|');
        chars.into_iter().collect()
    } else {
        field.value().to_string()
    };

    // Keep the cursor line in view
    let cursor_line = field
        .value()
        .chars()
        .take(field.cursor())
        .filter(|c| *c == '\n')
        .count();
    let scroll = cursor_line.saturating_sub(inner_height.saturating_sub(1)) as u16;

    let paragraph = Paragraph::new(Text::from(display_value))
        .style(theme.get_component_style("text", focused))
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    f.render_widget(paragraph, area);
}

/// Conversation and draft inputs
pub fn render_inputs(f: &mut Frame, conversation: Rect, draft: Rect, model: &Model, theme: &Theme) {
    render_text_field(
        f,
        conversation,
        "Conversation",
        &model.conversation,
        model.focus == Focus::Conversation,
        theme,
    );
    render_text_field(
        f,
        draft,
        "Your draft",
        &model.draft,
        model.focus == Focus::Draft,
        theme,
    );
}

/// Koi and Fox persona selectors side by side
pub fn render_personas(f: &mut Frame, area: Rect, model: &Model, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    for (chunk, module, focus) in [
        (chunks[0], PersonaModule::Koi, Focus::KoiPersona),
        (chunks[1], PersonaModule::Fox, Focus::FoxPersona),
    ] {
        let title = match module {
            PersonaModule::Koi => "Koi persona",
            PersonaModule::Fox => "Fox persona",
        };
        render_selector(
            f,
            chunk,
            title,
            model.personas.selector(module),
            model.focus == focus,
            theme,
        );
    }
}

fn render_selector(
    f: &mut Frame,
    area: Rect,
    title: &str,
    selector: &PersonaSelector,
    focused: bool,
    theme: &Theme,
) {
    let block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_style(theme.get_component_style("border", focused));

    let lines = match selector.selected() {
        Some(persona) => {
            let position = format!(
                " ({}/{})",
                selector.selected_index().map(|i| i + 1).unwrap_or(0),
                selector.personas().len()
            );
            vec![
                Line::from(vec![
                    Span::raw("◀ "),
                    Span::styled(persona.name.clone(), theme.get_component_style("title", false)),
                    Span::raw(" ▶"),
                    Span::styled(position, theme.get_component_style("muted", false)),
                ]),
                Line::styled(
                    persona.description.clone().unwrap_or_default(),
                    theme.get_component_style("muted", false),
                ),
            ]
        }
        None => vec![Line::styled(
            "No personas loaded",
            theme.get_component_style("muted", false),
        )],
    };

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

/// Tone sliders as labelled gauges
pub fn render_tone(f: &mut Frame, area: Rect, model: &Model, theme: &Theme) {
    let focused = matches!(model.focus, Focus::Tone(_));
    let block = Block::default()
        .title("Tone")
        .borders(Borders::ALL)
        .border_style(theme.get_component_style("border", focused));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    for (row, slider) in rows.iter().zip(ToneSlider::ALL) {
        let slider_focused = model.focus == Focus::Tone(slider);
        let gauge_style = if slider_focused {
            theme.get_component_style("selection", true)
        } else {
            theme.get_component_style("muted", false)
        };
        let gauge = Gauge::default()
            .gauge_style(gauge_style)
            .ratio(model.tone.get(slider))
            .label(format!("{:<20}{}", slider.label(), model.tone.label(slider)));
        f.render_widget(gauge, *row);
    }
}

/// Goal mode radio and its hint
pub fn render_goal_mode(f: &mut Frame, area: Rect, model: &Model, theme: &Theme) {
    let focused = model.focus == Focus::GoalMode;
    let block = Block::default()
        .title("Goal mode")
        .borders(Borders::ALL)
        .border_style(theme.get_component_style("border", focused));

    let radio = |mode: GoalMode, label: &str| {
        let marker = if model.goal_mode == mode { "(•) " } else { "( ) " };
        let style = if model.goal_mode == mode {
            theme.get_component_style("title", false)
        } else {
            theme.get_component_style("muted", false)
        };
        Span::styled(format!("{}{}   ", marker, label), style)
    };

    let lines = vec![
        Line::from(vec![radio(GoalMode::Guided, "Guided"), radio(GoalMode::Infer, "Infer")]),
        Line::styled(model.goal_mode.hint(), theme.get_component_style("muted", false)),
    ];

    f.render_widget(Paragraph::new(lines).block(block), area);
}

/// Analyze action with its enabled/disabled/busy state
pub fn render_analyze_button(f: &mut Frame, area: Rect, model: &Model, theme: &Theme) {
    let (label, style) = if model.is_analyzing() {
        ("[ Analyzing… ]", theme.get_component_style("warning", false))
    } else if model.analyze_enabled() {
        ("[ Analyze  ^R ]", theme.get_component_style("button", true))
    } else {
        ("[ Analyze  ^R ]", theme.get_component_style("button", false))
    };

    let mut spans = vec![Span::styled(label, style)];
    if let Some(hint) = model.analyze_hint() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(hint, theme.get_component_style("muted", false)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.get_component_style("border", false)),
    );
    f.render_widget(paragraph, area);
}
