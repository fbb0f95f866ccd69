//! Configuration for text rendering

/// Configuration options for terminal output
#[derive(Debug, Clone)]
pub struct TextConfig {
    /// Emit ANSI escape codes for styled segments
    pub ansi: bool,

    /// Width of the rule separating the message from its buttons
    pub rule_width: usize,

    /// Whether to render the button list
    pub show_buttons: bool,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            ansi: false,
            rule_width: 32,
            show_buttons: true,
        }
    }
}

impl TextConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether ANSI styling is emitted
    pub fn with_ansi(mut self, ansi: bool) -> Self {
        self.ansi = ansi;
        self
    }

    /// Set the separator width
    pub fn with_rule_width(mut self, width: usize) -> Self {
        self.rule_width = width;
        self
    }

    /// Set whether buttons are rendered
    pub fn with_buttons(mut self, show: bool) -> Self {
        self.show_buttons = show;
        self
    }
}
