//! Inline Style
//!
//! Minimal `style` attribute parsing: only the display and visibility
//! properties matter for focusability.

/// Display property subset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Display {
    #[default]
    Other,
    None,
}

/// Visibility property subset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Visible,
    Hidden,
    Collapse,
}

/// Parsed inline style declarations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InlineStyle {
    pub display: Display,
    pub visibility: Visibility,
}

impl InlineStyle {
    /// Parse a `style` attribute value. Unknown declarations are ignored;
    /// later declarations win, as in CSS.
    pub fn parse(text: &str) -> Self {
        let mut style = Self::default();
        for decl in text.split(';') {
            let Some((name, value)) = decl.split_once(':') else {
                continue;
            };
            let name = name.trim().to_ascii_lowercase();
            let value = value.trim().to_ascii_lowercase();
            match name.as_str() {
                "display" => {
                    style.display = if value == "none" {
                        Display::None
                    } else {
                        Display::Other
                    };
                }
                "visibility" => {
                    style.visibility = match value.as_str() {
                        "hidden" => Visibility::Hidden,
                        "collapse" => Visibility::Collapse,
                        _ => Visibility::Visible,
                    };
                }
                _ => {}
            }
        }
        style
    }

    /// Check whether these declarations make the element invisible
    pub fn is_hidden(&self) -> bool {
        self.display == Display::None || self.visibility != Visibility::Visible
    }
}
