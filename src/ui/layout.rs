use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Screen areas of the popup
#[derive(Debug, Clone, Copy)]
pub struct PopupAreas {
    pub title: Rect,
    pub conversation: Rect,
    pub draft: Rect,
    pub personas: Rect,
    pub tone: Rect,
    pub goal_mode: Rect,
    /// Zero-height when the wizard is hidden
    pub wizard: Rect,
    pub analyze: Rect,
    pub results: Rect,
    pub status: Rect,
}

pub struct PopupLayout {
    form_width_ratio: u16,
}

impl PopupLayout {
    pub fn new() -> Self {
        Self {
            form_width_ratio: 55,
        }
    }

    pub fn calculate_layout(&self, area: Rect, wizard_visible: bool) -> PopupAreas {
        let vertical_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Min(10),   // Form and results
                Constraint::Length(2), // Status and key hints
            ])
            .split(area);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(self.form_width_ratio),
                Constraint::Percentage(100 - self.form_width_ratio),
            ])
            .split(vertical_chunks[1]);

        let wizard_height = if wizard_visible { 11 } else { 0 };
        let form = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(5),                // Conversation
                Constraint::Length(6),             // Draft
                Constraint::Length(4),             // Personas
                Constraint::Length(5),             // Tone
                Constraint::Length(4),             // Goal mode
                Constraint::Length(wizard_height), // Wizard
                Constraint::Length(3),             // Analyze
            ])
            .split(columns[0]);

        PopupAreas {
            title: vertical_chunks[0],
            conversation: form[0],
            draft: form[1],
            personas: form[2],
            tone: form[3],
            goal_mode: form[4],
            wizard: form[5],
            analyze: form[6],
            results: columns[1],
            status: vertical_chunks[2],
        }
    }
}

impl Default for PopupLayout {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wizard_collapses_in_infer_mode() {
        let layout = PopupLayout::new();
        let area = Rect::new(0, 0, 120, 50);

        let guided = layout.calculate_layout(area, true);
        assert_eq!(guided.wizard.height, 11);

        let infer = layout.calculate_layout(area, false);
        assert_eq!(infer.wizard.height, 0);
        assert!(infer.conversation.height > guided.conversation.height);
    }

    #[test]
    fn test_results_take_right_column() {
        let areas = PopupLayout::new().calculate_layout(Rect::new(0, 0, 100, 40), true);
        assert_eq!(areas.results.x, areas.conversation.x + areas.conversation.width);
        assert_eq!(areas.status.height, 2);
    }
}
