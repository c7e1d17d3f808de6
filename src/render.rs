//! Toolkit-independent rendering of analysis results
//!
//! The model keeps an [`OptionsView`]; concrete outputs (terminal list, plain
//! text, HTML fragment) implement [`RenderTarget`] and are driven by
//! [`render_options`].

use crate::api::types::{FoxOutput, ReplyOption};

pub const NO_OPTIONS_MESSAGE: &str = "No reply options returned.";

/// Reply options as currently shown
#[derive(Debug, Clone, Default, PartialEq)]
pub enum OptionsView {
    /// Nothing rendered (initial state, after Clear, during a request)
    #[default]
    Empty,
    /// The backend returned no options
    Placeholder,
    /// One card per option
    Cards(Vec<ReplyOption>),
}

impl OptionsView {
    pub fn from_options(options: Vec<ReplyOption>) -> Self {
        if options.is_empty() {
            OptionsView::Placeholder
        } else {
            OptionsView::Cards(options)
        }
    }

    pub fn cards(&self) -> &[ReplyOption] {
        match self {
            OptionsView::Cards(cards) => cards,
            _ => &[],
        }
    }

    pub fn get(&self, index: usize) -> Option<&ReplyOption> {
        self.cards().get(index)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, OptionsView::Empty)
    }
}

/// Something reply options can be drawn into
pub trait RenderTarget {
    type Output;

    /// Called once when there are no options to show
    fn placeholder(&mut self, message: &str);

    /// Called once per option, in order
    fn card(&mut self, index: usize, option: &ReplyOption);

    fn finish(self) -> Self::Output;
}

/// Drive a target with the current options view
pub fn render_options<T: RenderTarget>(view: &OptionsView, mut target: T) -> T::Output {
    match view {
        OptionsView::Empty => {}
        OptionsView::Placeholder => target.placeholder(NO_OPTIONS_MESSAGE),
        OptionsView::Cards(options) => {
            for (index, option) in options.iter().enumerate() {
                target.card(index, option);
            }
        }
    }
    target.finish()
}

/// Escape `&`, `<` and `>` for markup output; everything else is left alone
pub fn escape_markup(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Pretty-print the opaque Koi object with two-space indentation; empty when absent
pub fn format_koi(koi: Option<&serde_json::Value>) -> String {
    match koi {
        Some(koi) => serde_json::to_string_pretty(koi).unwrap_or_else(|_| koi.to_string()),
        None => String::new(),
    }
}

/// One-line summary of the Fox signals, if the backend sent any
pub fn fox_summary(fox: &FoxOutput) -> Option<String> {
    let mut parts = Vec::new();
    if let Some(emotion) = fox.detected_emotion.as_deref().filter(|s| !s.is_empty()) {
        parts.push(format!("Emotion: {}", emotion));
    }
    if let Some(power) = fox.power_dynamic.as_deref().filter(|s| !s.is_empty()) {
        parts.push(format!("Power: {}", power));
    }
    if !fox.risk_flags.is_empty() {
        parts.push(format!("Risks: {}", fox.risk_flags.join(", ")));
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" · "))
    }
}

/// HTML fragment in the shape of the browser popup's option cards
#[derive(Debug, Default)]
pub struct HtmlTarget {
    html: String,
}

impl HtmlTarget {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RenderTarget for HtmlTarget {
    type Output = String;

    fn placeholder(&mut self, message: &str) {
        self.html
            .push_str(&format!("<div class=\"hint\">{}</div>\n", escape_markup(message)));
    }

    fn card(&mut self, _index: usize, option: &ReplyOption) {
        self.html.push_str("<div class=\"option\">\n");
        self.html
            .push_str(&format!("  <div class=\"tag\">{}</div>\n", escape_markup(&option.tag)));
        self.html
            .push_str(&format!("  <div class=\"text\">{}</div>\n", escape_markup(&option.text)));
        self.html
            .push_str(&format!("  <div class=\"why\">Why: {}</div>\n", escape_markup(&option.why)));
        self.html.push_str("</div>\n");
    }

    fn finish(self) -> String {
        self.html
    }
}

/// Plain text listing for terminals and pipes
#[derive(Debug, Default)]
pub struct PlainTextTarget {
    lines: Vec<String>,
}

impl PlainTextTarget {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RenderTarget for PlainTextTarget {
    type Output = String;

    fn placeholder(&mut self, message: &str) {
        self.lines.push(message.to_string());
    }

    fn card(&mut self, index: usize, option: &ReplyOption) {
        if index > 0 {
            self.lines.push(String::new());
        }
        self.lines.push(format!("[{}] {}", index + 1, option.tag));
        self.lines.push(option.text.clone());
        self.lines.push(format!("Why: {}", option.why));
    }

    fn finish(self) -> String {
        self.lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn option(tag: &str, text: &str, why: &str) -> ReplyOption {
        ReplyOption {
            tag: tag.to_string(),
            text: text.to_string(),
            why: why.to_string(),
        }
    }

    #[test]
    fn test_escape_markup() {
        assert_eq!(
            escape_markup("<script>&</script>"),
            "&lt;script&gt;&amp;&lt;/script&gt;"
        );
        assert_eq!(escape_markup("\"quoted\" 'single' é"), "\"quoted\" 'single' é");
        assert_eq!(escape_markup("&amp;"), "&amp;amp;");
    }

    #[test]
    fn test_format_koi_uses_two_space_indent() {
        let koi = json!({"goal": "close", "missing_info": ["budget"]});
        assert_eq!(
            format_koi(Some(&koi)),
            "{\n  \"goal\": \"close\",\n  \"missing_info\": [\n    \"budget\"\n  ]\n}"
        );
        assert_eq!(format_koi(None), "");
    }

    #[test]
    fn test_empty_options_render_placeholder() {
        let view = OptionsView::from_options(vec![]);
        assert_eq!(view, OptionsView::Placeholder);
        assert_eq!(render_options(&view, PlainTextTarget::new()), NO_OPTIONS_MESSAGE);
        assert_eq!(
            render_options(&view, HtmlTarget::new()),
            "<div class=\"hint\">No reply options returned.</div>\n"
        );
    }

    #[test]
    fn test_empty_view_renders_nothing() {
        assert_eq!(render_options(&OptionsView::Empty, HtmlTarget::new()), "");
    }

    #[test]
    fn test_html_cards_are_escaped() {
        let view = OptionsView::from_options(vec![option("<b>firm</b>", "A & B", "x > y")]);
        let html = render_options(&view, HtmlTarget::new());
        assert!(html.contains("<div class=\"tag\">&lt;b&gt;firm&lt;/b&gt;</div>"));
        assert!(html.contains("<div class=\"text\">A &amp; B</div>"));
        assert!(html.contains("<div class=\"why\">Why: x &gt; y</div>"));
    }

    #[test]
    fn test_plain_text_keeps_raw_text() {
        let view = OptionsView::from_options(vec![
            option("firm", "No <way>", "boundary"),
            option("soft", "Maybe later", "keeps rapport"),
        ]);
        let text = render_options(&view, PlainTextTarget::new());
        assert_eq!(
            text,
            "[1] firm\nNo <way>\nWhy: boundary\n\n[2] soft\nMaybe later\nWhy: keeps rapport"
        );
    }

    #[test]
    fn test_fox_summary() {
        let mut fox = FoxOutput::default();
        assert_eq!(fox_summary(&fox), None);

        fox.detected_emotion = Some("frustrated".to_string());
        fox.risk_flags = vec!["escalation".to_string(), "blame".to_string()];
        assert_eq!(
            fox_summary(&fox).as_deref(),
            Some("Emotion: frustrated · Risks: escalation, blame")
        );
    }
}
