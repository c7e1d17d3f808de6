use crate::api::types::ReplyOption;
use crate::render::{render_options, RenderTarget};
use crate::tea::model::Focus;
use crate::tea::Model;
use crate::ui::theme::Theme;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

/// Builds one list item per reply option card
pub struct ListItemsTarget<'t> {
    theme: &'t Theme,
    width: usize,
    items: Vec<ListItem<'static>>,
}

impl<'t> ListItemsTarget<'t> {
    pub fn new(theme: &'t Theme, width: u16) -> Self {
        Self {
            theme,
            width: width.max(10) as usize,
            items: Vec::new(),
        }
    }

    fn wrapped(&self, text: &str, style: Style, indent: &str) -> Vec<Line<'static>> {
        let width = self.width.saturating_sub(indent.len()).max(1);
        let mut lines = Vec::new();
        for paragraph in text.lines() {
            let mut current = String::new();
            for word in paragraph.split_whitespace() {
                if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > width
                {
                    lines.push(Line::styled(format!("{}{}", indent, current), style));
                    current.clear();
                }
                if !current.is_empty() {
                    current.push(' ');
                }
                current.push_str(word);
            }
            lines.push(Line::styled(format!("{}{}", indent, current), style));
        }
        lines
    }
}

impl RenderTarget for ListItemsTarget<'_> {
    type Output = Vec<ListItem<'static>>;

    fn placeholder(&mut self, message: &str) {
        self.items.push(ListItem::new(Line::styled(
            message.to_string(),
            self.theme.get_component_style("muted", false),
        )));
    }

    fn card(&mut self, index: usize, option: &ReplyOption) {
        let mut lines = vec![Line::from(vec![
            Span::styled(
                format!("{}. ", index + 1),
                self.theme.get_component_style("muted", false),
            ),
            Span::styled(
                option.tag.clone(),
                self.theme.get_component_style("title", false),
            ),
        ])];
        lines.extend(self.wrapped(
            &option.text,
            self.theme.get_component_style("text", false),
            "   ",
        ));
        lines.extend(self.wrapped(
            &format!("Why: {}", option.why),
            self.theme.get_component_style("muted", false),
            "   ",
        ));
        lines.push(Line::raw(""));
        self.items.push(ListItem::new(lines));
    }

    fn finish(self) -> Self::Output {
        self.items
    }
}

/// Koi output above, reply option cards below
pub fn render_results(f: &mut Frame, area: Rect, model: &Model, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    render_koi(f, chunks[0], model, theme);
    render_reply_options(f, chunks[1], model, theme);
}

fn render_koi(f: &mut Frame, area: Rect, model: &Model, theme: &Theme) {
    let block = Block::default()
        .title("Koi")
        .borders(Borders::ALL)
        .border_style(theme.get_component_style("border", false));

    let mut lines: Vec<Line> = Vec::new();
    if let Some(summary) = &model.results.fox_summary {
        lines.push(Line::styled(
            summary.clone(),
            theme.get_component_style("warning", false),
        ));
        lines.push(Line::raw(""));
    }
    lines.extend(
        model
            .results
            .koi_output
            .lines()
            .map(|l| Line::raw(l.to_string())),
    );

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn render_reply_options(f: &mut Frame, area: Rect, model: &Model, theme: &Theme) {
    let focused = model.focus == Focus::ReplyOptions;
    let title = if focused {
        "Reply options · c copy · u/Enter use as draft"
    } else {
        "Reply options"
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(theme.get_component_style("border", focused));

    let width = block.inner(area).width.saturating_sub(2);
    let items = render_options(&model.results.options, ListItemsTarget::new(theme, width));

    let has_cards = !model.results.options.cards().is_empty();
    let list = List::new(items)
        .block(block)
        .highlight_style(theme.get_component_style("selection", focused))
        .highlight_symbol("▶ ");

    let mut state = ListState::default().with_selected(if has_cards {
        Some(model.results.selected)
    } else {
        None
    });
    f.render_stateful_widget(list, area, &mut state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::OptionsView;

    #[test]
    fn test_list_items_one_per_card() {
        let theme = Theme::default();
        let view = OptionsView::from_options(vec![
            ReplyOption {
                tag: "firm".to_string(),
                text: "Not this week.".to_string(),
                why: "protects time".to_string(),
            },
            ReplyOption {
                tag: "soft".to_string(),
                text: "Maybe next week?".to_string(),
                why: "keeps rapport".to_string(),
            },
        ]);
        let items = render_options(&view, ListItemsTarget::new(&theme, 40));
        assert_eq!(items.len(), 2);
        // tag line, text, why, spacer
        assert_eq!(items[0].height(), 4);
    }

    #[test]
    fn test_placeholder_item() {
        let theme = Theme::default();
        let items = render_options(&OptionsView::Placeholder, ListItemsTarget::new(&theme, 40));
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_long_text_wraps() {
        let theme = Theme::default();
        let target = ListItemsTarget::new(&theme, 13);
        let lines = target.wrapped("one two three four", Style::default(), "   ");
        assert_eq!(lines.len(), 2);
    }
}
