//! Text generation from preview trees

use crate::format::{Style, StyledText};
use crate::model::ButtonType;
use crate::preview::{ButtonPreview, HeaderBlock, Preview};

use super::TextConfig;

const RESET: &str = "\x1b[0m";
const DIM: &str = "\x1b[2m";

fn ansi_code(style: Style) -> Option<&'static str> {
    match style {
        Style::Plain => None,
        Style::Bold => Some("\x1b[1m"),
        Style::Italic => Some("\x1b[3m"),
        Style::Strikethrough => Some("\x1b[9m"),
        Style::Monospace => Some("\x1b[36m"),
    }
}

/// Build terminal output incrementally
pub struct TextBuilder {
    config: TextConfig,
    lines: Vec<String>,
}

impl TextBuilder {
    /// Create a new text builder
    pub fn new(config: TextConfig) -> Self {
        Self {
            config,
            lines: vec![],
        }
    }

    fn styled(&self, text: &StyledText) -> String {
        text.segments
            .iter()
            .map(|seg| match ansi_code(seg.style).filter(|_| self.config.ansi) {
                Some(code) => format!("{}{}{}", code, seg.text, RESET),
                None => seg.text.clone(),
            })
            .collect()
    }

    /// Add the header block
    pub fn add_header(&mut self, header: &HeaderBlock) {
        let line = match header {
            HeaderBlock::Text { content } => {
                let text = self.styled(content);
                if self.config.ansi {
                    format!("\x1b[1m{}{}", text, RESET)
                } else {
                    text
                }
            }
            HeaderBlock::Media { format, url } => format!("[{}] {}", format, url),
            HeaderBlock::Placeholder { format } => format!("[{}]", format),
        };
        self.lines.push(line);
    }

    /// Add the message body
    pub fn add_body(&mut self, body: &StyledText) {
        let text = self.styled(body);
        self.lines.extend(text.lines().map(str::to_string));
    }

    /// Add the footer line
    pub fn add_footer(&mut self, footer: &StyledText) {
        let text = footer.plain_text();
        if self.config.ansi {
            self.lines.push(format!("{}{}{}", DIM, text, RESET));
        } else {
            self.lines.push(text);
        }
    }

    /// Add the button list under a rule
    pub fn add_buttons(&mut self, buttons: &[ButtonPreview]) {
        if !self.config.show_buttons || buttons.is_empty() {
            return;
        }
        self.lines.push("-".repeat(self.config.rule_width));
        for button in buttons {
            let line = match (&button.kind, &button.target) {
                (ButtonType::QuickReply, _) | (_, None) => format!("[{}]", button.text),
                (_, Some(target)) => format!("[{}] -> {}", button.text, target),
            };
            self.lines.push(line);
        }
    }

    /// Finish and return the rendered text
    pub fn finish(self) -> String {
        self.lines.join("\n")
    }
}

/// Render a preview tree to text.
pub fn render_text(preview: &Preview, config: &TextConfig) -> String {
    let mut builder = TextBuilder::new(config.clone());
    if let Some(header) = &preview.header {
        builder.add_header(header);
    }
    builder.add_body(&preview.body);
    if let Some(footer) = &preview.footer {
        builder.add_footer(footer);
    }
    builder.add_buttons(&preview.buttons);
    builder.finish()
}
