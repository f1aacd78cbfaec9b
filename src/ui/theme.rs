//! Color schemes and ANSI escape sequence generation.
//!
//! Two Catppuccin palettes ship with the plugin (`catppuccin-mocha`, the
//! default, and `catppuccin-latte`). A custom palette can be loaded from a TOML
//! file with the same layout:
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#cdd6f4"
//! selection_fg = "#1e1e2e"
//! selection_bg = "#cba6f7"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! search_bar_border = "#cba6f7"
//! match_highlight_fg = "#1e1e2e"
//! match_highlight_bg = "#f9e2af"
//! empty_state_fg = "#89b4fa"
//! status_active_fg = "#a6e3a1"
//! status_held_fg = "#f9e2af"
//! status_ended_fg = "#f38ba8"
//! info_fg = "#89dceb"
//! error_fg = "#f38ba8"
//! overlay_border = "#b4befe"
//! ```

use crate::domain::{AdminError, Result};
use crate::ui::viewmodel::StatusTone;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Color scheme for UI rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Hex color strings (e.g. `"#cdd6f4"`) for every UI element.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    pub selection_fg: String,
    pub selection_bg: String,

    pub text_normal: String,
    /// Footer, status line and secondary columns.
    pub text_dim: String,

    pub border: String,

    pub search_bar_border: String,
    pub match_highlight_fg: String,
    pub match_highlight_bg: String,

    pub empty_state_fg: String,

    /// Status column, by [`StatusTone`].
    pub status_active_fg: String,
    pub status_held_fg: String,
    pub status_ended_fg: String,

    /// Notification banner.
    pub info_fg: String,
    pub error_fg: String,

    /// Frame of modal overlays.
    pub overlay_border: String,
}

impl Theme {
    /// Loads a built-in theme by name.
    ///
    /// # Parameters
    ///
    /// * `name` - `catppuccin-mocha` or `catppuccin-latte`
    ///
    /// # Returns
    ///
    /// The embedded palette, or `None` if the name is unknown.
    ///
    /// # Example
    ///
    /// ```
    /// use zadmin::Theme;
    ///
    /// let latte = Theme::from_name("catppuccin-latte").unwrap();
    /// assert_eq!(latte.name, "catppuccin-latte");
    /// assert!(Theme::from_name("neon").is_none());
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "catppuccin-mocha" => include_str!("../../themes/catppuccin-mocha.toml"),
            "catppuccin-latte" => include_str!("../../themes/catppuccin-latte.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Theme`] if the file cannot be read or does not
    /// parse into a complete palette.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref()).map_err(|e| {
            AdminError::Theme(format!("failed to read {}: {e}", path.as_ref().display()))
        })?;

        toml::from_str(&contents).map_err(|e| AdminError::Theme(format!("failed to parse theme TOML: {e}")))
    }

    /// Foreground color for a status column entry.
    #[must_use]
    pub fn status_color(&self, tone: StatusTone) -> &str {
        match tone {
            StatusTone::Active => &self.colors.status_active_fg,
            StatusTone::Held => &self.colors.status_held_fg,
            StatusTone::Ended => &self.colors.status_ended_fg,
        }
    }

    /// Returns `(255, 255, 255)` when the hex string is malformed.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// ANSI 24-bit foreground sequence for a hex color.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// ANSI 24-bit background sequence for a hex color.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    /// ANSI bold.
    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    /// ANSI faint, used for secondary text.
    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    /// Clears all styling.
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Catppuccin Mocha.
    ///
    /// # Panics
    ///
    /// Panics if the bundled palette fails to parse, which the tests below rule out.
    fn default() -> Self {
        Self::from_name("catppuccin-mocha").expect("bundled catppuccin-mocha theme should parse")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn bundled_themes_parse() {
        assert_eq!(Theme::from_name("catppuccin-mocha").map(|t| t.name).as_deref(), Some("catppuccin-mocha"));
        assert_eq!(Theme::from_name("catppuccin-latte").map(|t| t.name).as_deref(), Some("catppuccin-latte"));
        assert!(Theme::from_name("solarized").is_none());
    }

    #[test]
    fn fg_emits_truecolor_sequence() {
        assert_eq!(Theme::fg("#ff8000"), "\u{1b}[38;2;255;128;0m");
        assert_eq!(Theme::bg("00ff00"), "\u{1b}[48;2;0;255;0m");
    }

    #[test]
    fn malformed_hex_falls_back_to_white() {
        assert_eq!(Theme::fg("#abc"), "\u{1b}[38;2;255;255;255m");
        assert_eq!(Theme::fg("#zzzzzz"), "\u{1b}[38;2;255;255;255m");
    }

    #[test]
    fn status_color_follows_tone() {
        let theme = Theme::default();
        assert_eq!(theme.status_color(StatusTone::Active), theme.colors.status_active_fg);
        assert_eq!(theme.status_color(StatusTone::Ended), theme.colors.status_ended_fg);
    }

    #[test]
    fn from_file_reads_custom_palette() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        let mut custom = include_str!("../../themes/catppuccin-latte.toml").replace("catppuccin-latte", "custom");
        custom.push('\n');
        file.write_all(custom.as_bytes()).expect("write theme");

        let theme = Theme::from_file(file.path()).expect("parse theme");
        assert_eq!(theme.name, "custom");
    }

    #[test]
    fn from_file_reports_incomplete_palette() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(b"name = \"broken\"\n[colors]\nheader_fg = \"#ffffff\"\n").expect("write theme");

        let err = Theme::from_file(file.path()).expect_err("missing colors");
        assert!(matches!(err, AdminError::Theme(_)));
    }
}
