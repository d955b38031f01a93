//! Semantic color tokens for the application.
//!
//! A trimmed MD3 tonal surface hierarchy, deserialized from the TOML theme
//! file via hex color strings.

use iced::Color;
use serde::Deserialize;

// ── Hex color serde ─────────────────────────────────────────────────

mod hex_color {
    use iced::Color;
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Color, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_hex_color(&s).map_err(serde::de::Error::custom)
    }

    pub(super) fn parse_hex_color(s: &str) -> Result<Color, String> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        let channel = |range: std::ops::Range<usize>| {
            hex.get(range)
                .ok_or_else(|| format!("invalid hex color: {s}"))
                .and_then(|h| u8::from_str_radix(h, 16).map_err(|e| e.to_string()))
        };
        match hex.len() {
            6 => Ok(Color::from_rgb8(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            8 => Ok(Color::from_rgba8(
                channel(0..2)?,
                channel(2..4)?,
                channel(4..6)?,
                channel(6..8)? as f32 / 255.0,
            )),
            _ => Err(format!("invalid hex color: {s}")),
        }
    }
}

// ── TOML intermediate structs ──────────────────────────────────────

/// Raw TOML theme file structure with both dark and light variants.
#[derive(Debug, Deserialize)]
pub struct ThemeFile {
    pub meta: ThemeMeta,
    pub dark: ThemeVariant,
    pub light: ThemeVariant,
}

#[derive(Debug, Deserialize)]
pub struct ThemeMeta {
    pub name: String,
}

/// A single appearance variant (dark or light) within a theme.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThemeVariant {
    pub surface: SurfaceColors,
    pub text: TextColors,
    pub primary: PrimaryColors,
    pub tertiary: TertiaryColors,
    pub error: ErrorColors,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SurfaceColors {
    #[serde(with = "hex_color")]
    pub container_lowest: Color,
    #[serde(with = "hex_color")]
    pub base: Color,
    #[serde(with = "hex_color")]
    pub container: Color,
    #[serde(with = "hex_color")]
    pub container_high: Color,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TextColors {
    #[serde(with = "hex_color")]
    pub on_surface: Color,
    #[serde(with = "hex_color")]
    pub on_surface_variant: Color,
    #[serde(with = "hex_color")]
    pub outline: Color,
    #[serde(with = "hex_color")]
    pub outline_variant: Color,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PrimaryColors {
    #[serde(with = "hex_color")]
    pub base: Color,
    #[serde(with = "hex_color")]
    pub container: Color,
    #[serde(with = "hex_color")]
    pub on_container: Color,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TertiaryColors {
    #[serde(with = "hex_color")]
    pub base: Color,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ErrorColors {
    #[serde(with = "hex_color")]
    pub base: Color,
}

// Re-export ThemeMode from core so there's a single source of truth.
pub use animetrends_core::config::ThemeMode;

// ── ColorScheme ────────────────────────────────────────────────────

/// All semantic color tokens for the application.
#[derive(Debug, Clone)]
pub struct ColorScheme {
    // Surfaces (low -> high elevation)
    pub surface_container_lowest: Color,
    pub surface: Color,
    pub surface_container: Color,
    pub surface_container_high: Color,

    // Text hierarchy
    pub on_surface: Color,
    pub on_surface_variant: Color,
    pub outline: Color,
    pub outline_variant: Color,

    // Primary accent
    pub primary: Color,
    pub primary_container: Color,
    pub on_primary_container: Color,

    // Tertiary (scores)
    pub tertiary: Color,

    // Error
    pub error: Color,
}

impl ColorScheme {
    /// Build a ColorScheme from a single theme variant.
    pub fn from_variant(v: &ThemeVariant) -> Self {
        Self {
            surface_container_lowest: v.surface.container_lowest,
            surface: v.surface.base,
            surface_container: v.surface.container,
            surface_container_high: v.surface.container_high,

            on_surface: v.text.on_surface,
            on_surface_variant: v.text.on_surface_variant,
            outline: v.text.outline,
            outline_variant: v.text.outline_variant,

            primary: v.primary.base,
            primary_container: v.primary.container,
            on_primary_container: v.primary.on_container,

            tertiary: v.tertiary.base,

            error: v.error.base,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::hex_color::parse_hex_color;

    #[test]
    fn test_parse_rgb_and_rgba() {
        let c = parse_hex_color("#FF8000").unwrap();
        assert_eq!((c.r, c.a), (1.0, 1.0));

        let c = parse_hex_color("00000080").unwrap();
        assert!((c.a - 128.0 / 255.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_hex_color("#12345").is_err());
        assert!(parse_hex_color("#GGGGGG").is_err());
        assert!(parse_hex_color("#ééé").is_err());
    }
}
