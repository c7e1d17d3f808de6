use ratatui::style::{Color, Modifier, Style};

/// Colors used by the terminal views
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub text_primary: Color,
    pub text_muted: Color,
    pub border: Color,
    pub border_focused: Color,
    pub accent: Color,
    pub selection: Color,
    pub selection_text: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub disabled: Color,
}

impl Theme {
    /// Retro groove dark theme with warm, earthy colors
    pub fn gruvbox_dark() -> Self {
        Self {
            name: "Gruvbox Dark".to_string(),
            text_primary: Color::Rgb(235, 219, 178),
            text_muted: Color::Rgb(146, 131, 116),
            border: Color::Rgb(80, 73, 69),
            border_focused: Color::Rgb(250, 189, 47),
            accent: Color::Rgb(131, 165, 152),
            selection: Color::Rgb(80, 73, 69),
            selection_text: Color::Rgb(251, 241, 199),
            success: Color::Rgb(184, 187, 38),
            warning: Color::Rgb(254, 128, 25),
            error: Color::Rgb(251, 73, 52),
            disabled: Color::Rgb(102, 92, 84),
        }
    }

    /// Get style for a specific UI component
    pub fn get_component_style(&self, component: &str, focused: bool) -> Style {
        match component {
            "border" if focused => Style::default()
                .fg(self.border_focused)
                .add_modifier(Modifier::BOLD),
            "border" => Style::default().fg(self.border),
            "title" => Style::default()
                .fg(self.accent)
                .add_modifier(Modifier::BOLD),
            "muted" => Style::default().fg(self.text_muted),
            "selection" => Style::default()
                .bg(self.selection)
                .fg(self.selection_text)
                .add_modifier(Modifier::BOLD),
            "button" if focused => Style::default()
                .fg(self.selection_text)
                .bg(self.success)
                .add_modifier(Modifier::BOLD),
            "button" => Style::default().fg(self.disabled),
            "success" => Style::default().fg(self.success),
            "error" => Style::default().fg(self.error),
            "warning" => Style::default().fg(self.warning),
            _ => Style::default().fg(self.text_primary),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::gruvbox_dark()
    }
}
