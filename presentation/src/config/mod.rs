//! Presentation-level configuration
//!
//! Resolved output settings: the command line wins over the config file.

use orchestra_domain::OutputFormat;

/// Output configuration for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Enable colored terminal output
    pub color: bool,
    /// Show progress indicators
    pub show_progress: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            color: true,
            show_progress: true,
        }
    }
}

impl OutputConfig {
    pub fn with_format(mut self, format: Option<OutputFormat>) -> Self {
        if let Some(format) = format {
            self.format = format;
        }
        self
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Progress is also suppressed for machine-readable output
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Force colors off process-wide when disabled
    pub fn apply_color_override(&self) {
        if !self.color {
            colored::control::set_override(false);
        }
    }

    pub fn shows_progress(&self) -> bool {
        self.show_progress && self.format != OutputFormat::Json
    }
}
