//! Text rendering options.

/// Options for the plain-text views.
#[derive(Debug, Clone)]
pub struct TextOptions {
    /// Truncate paragraph texts to this many characters (0 = no limit)
    pub max_text_width: usize,

    /// Marker printed for placeholder paragraphs
    pub placeholder_marker: String,

    /// Print the row index before each row
    pub show_index: bool,

    /// Append the per-language repair summary
    pub show_repairs: bool,
}

impl TextOptions {
    /// Create new text options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum text width.
    pub fn with_max_width(mut self, width: usize) -> Self {
        self.max_text_width = width;
        self
    }

    /// Set the placeholder marker.
    pub fn with_placeholder_marker(mut self, marker: impl Into<String>) -> Self {
        self.placeholder_marker = marker.into();
        self
    }

    /// Enable or disable row indices.
    pub fn with_index(mut self, show: bool) -> Self {
        self.show_index = show;
        self
    }

    /// Enable or disable the repair summary.
    pub fn with_repairs(mut self, show: bool) -> Self {
        self.show_repairs = show;
        self
    }

    /// Apply the width limit to a text.
    pub(crate) fn clip(&self, text: &str) -> String {
        if self.max_text_width == 0 || text.chars().count() <= self.max_text_width {
            return text.to_string();
        }
        let mut clipped: String = text.chars().take(self.max_text_width).collect();
        clipped.push('…');
        clipped
    }
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            max_text_width: 0,
            placeholder_marker: "<missing>".to_string(),
            show_index: true,
            show_repairs: false,
        }
    }
}
