//! Material Design 3 theme with tonal surfaces.
//!
//! The theme is a single TOML file containing both dark and light variants.

mod catalog;
mod colors;

// Re-export everything so `crate::theme::*` paths remain unchanged.
pub use catalog::*;
pub use colors::*;

use iced::Theme;

/// Embedded default theme TOML source (contains both dark and light).
pub(crate) const DEFAULT_THEME_TOML: &str = include_str!("../assets/themes/default.toml");

/// A fully loaded theme with both appearance variants.
#[derive(Debug, Clone)]
pub struct AppTheme {
    pub name: String,
    pub dark: ColorScheme,
    pub light: ColorScheme,
}

impl AppTheme {
    /// Load a theme from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        let file: ThemeFile =
            toml::from_str(toml_str).map_err(|e| format!("theme parse error: {e}"))?;
        Ok(Self {
            name: file.meta.name.clone(),
            dark: ColorScheme::from_variant(&file.dark),
            light: ColorScheme::from_variant(&file.light),
        })
    }

    /// Load the embedded default theme.
    pub fn default_theme() -> Self {
        Self::from_toml(DEFAULT_THEME_TOML).expect("embedded default theme is valid TOML")
    }

    /// Get the color scheme for a resolved mode (Dark or Light).
    pub fn colors(&self, mode: ThemeMode) -> &ColorScheme {
        match mode {
            ThemeMode::Light => &self.light,
            // Dark is the fallback for both Dark and System.
            _ => &self.dark,
        }
    }

    /// Build the iced Theme for a given mode.
    pub fn iced_theme(&self, mode: ThemeMode) -> Theme {
        build_theme(&self.name, self.colors(mode))
    }
}

/// Resolve `ThemeMode::System` to a concrete Dark or Light.
pub fn resolve_mode(mode: ThemeMode) -> ThemeMode {
    match mode {
        ThemeMode::System => match dark_light::detect() {
            Ok(dark_light::Mode::Light) => ThemeMode::Light,
            _ => ThemeMode::Dark,
        },
        other => other,
    }
}

/// Build the iced Theme from a ColorScheme.
pub fn build_theme(name: &str, cs: &ColorScheme) -> Theme {
    use iced::theme::Palette;

    Theme::custom(
        name.to_string(),
        Palette {
            background: cs.surface,
            text: cs.on_surface,
            primary: cs.primary,
            success: cs.tertiary,
            warning: cs.tertiary,
            danger: cs.error,
        },
    )
}
