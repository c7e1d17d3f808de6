pub mod form;
pub mod layout;
pub mod results;
pub mod status_bar;
pub mod theme;
pub mod wizard;

use crate::tea::Model;
use ratatui::{
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use self::{layout::PopupLayout, theme::Theme};

pub use layout::PopupAreas;

/// Terminal view of the popup; stateless apart from layout and colors
pub struct UI {
    layout: PopupLayout,
    theme: Theme,
}

impl UI {
    pub fn new() -> Self {
        Self {
            layout: PopupLayout::new(),
            theme: Theme::default(),
        }
    }

    /// Draw the whole popup for the current model
    pub fn render(&self, frame: &mut Frame, model: &Model) {
        let areas = self
            .layout
            .calculate_layout(frame.size(), model.wizard_visible());
        let theme = &self.theme;

        let title = Line::from(vec![
            Span::styled("Koi / Fox", theme.get_component_style("title", false)),
            Span::styled(
                format!("  session {}", model.session_id),
                theme.get_component_style("muted", false),
            ),
        ]);
        frame.render_widget(Paragraph::new(title), areas.title);

        form::render_inputs(frame, areas.conversation, areas.draft, model, theme);
        form::render_personas(frame, areas.personas, model, theme);
        form::render_tone(frame, areas.tone, model, theme);
        form::render_goal_mode(frame, areas.goal_mode, model, theme);
        if model.wizard_visible() {
            wizard::render_wizard(frame, areas.wizard, model, theme);
        }
        form::render_analyze_button(frame, areas.analyze, model, theme);

        results::render_results(frame, areas.results, model, theme);
        status_bar::render_status_bar(frame, areas.status, model, theme);
    }
}

impl Default for UI {
    fn default() -> Self {
        Self::new()
    }
}
