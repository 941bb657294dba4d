//! Theme system for the browser widget
//!
//! Provides YAML-based theming with a compile-time embedded default palette.
//! Hosts can override colors by loading a theme file at startup; every color
//! used by the renderer is named here so layout math stays free of visuals.

use std::path::Path;

use serde::Deserialize;

/// Embedded default theme, compiled into the binary
pub const DEFAULT_DARK_YAML: &str = include_str!("../themes/dark.yaml");

/// RGBA color (0-255 per channel)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Create a new color from RGB values (alpha defaults to 255)
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a new color from RGBA values
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Convert to ARGB u32 for the software canvas
    pub fn to_argb_u32(&self) -> u32 {
        ((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
    }

    /// Return a new color with the specified alpha value
    pub const fn with_alpha(&self, a: u8) -> Self {
        Self {
            r: self.r,
            g: self.g,
            b: self.b,
            a,
        }
    }

    /// Parse from "#RRGGBB" or "#RRGGBBAA" hex string
    pub fn from_hex(s: &str) -> Result<Self, String> {
        let s = s.trim_start_matches('#');
        match s.len() {
            6 => Ok(Color {
                r: u8::from_str_radix(&s[0..2], 16).map_err(|e| e.to_string())?,
                g: u8::from_str_radix(&s[2..4], 16).map_err(|e| e.to_string())?,
                b: u8::from_str_radix(&s[4..6], 16).map_err(|e| e.to_string())?,
                a: 255,
            }),
            8 => Ok(Color {
                r: u8::from_str_radix(&s[0..2], 16).map_err(|e| e.to_string())?,
                g: u8::from_str_radix(&s[2..4], 16).map_err(|e| e.to_string())?,
                b: u8::from_str_radix(&s[4..6], 16).map_err(|e| e.to_string())?,
                a: u8::from_str_radix(&s[6..8], 16).map_err(|e| e.to_string())?,
            }),
            _ => Err(format!("Invalid color format: {}", s)),
        }
    }
}

/// Raw theme data as parsed from YAML
#[derive(Debug, Clone, Deserialize)]
pub struct ThemeData {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub browser: BrowserThemeData,
}

/// Browser colors (raw strings from YAML)
#[derive(Debug, Clone, Deserialize)]
pub struct BrowserThemeData {
    pub background: String,
    pub top_bar: String,
    pub chip: String,
    #[serde(default)]
    pub chip_hover: Option<String>,
    pub chip_selected: String,
    pub text: String,
    #[serde(default)]
    pub headers: Option<String>,
    pub scrollbar_track: String,
    pub scrollbar_thumb: String,
}

/// Resolved theme with parsed colors
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    /// Grid-area background fill
    pub background: Color,
    /// Strip behind the header/preview area
    pub top_bar: Color,
    /// Unselected chip fill
    pub chip: Color,
    pub chip_hover: Color,
    /// Selected chip fill, also the selection border color
    pub chip_selected: Color,
    /// Label and preview text
    pub text: Color,
    /// Column-header summary text
    pub headers: Color,
    pub scrollbar_track: Color,
    pub scrollbar_thumb: Color,
}

impl Theme {
    /// Parse a theme from YAML content
    pub fn from_yaml(yaml: &str) -> Result<Self, String> {
        let data: ThemeData =
            serde_yaml::from_str(yaml).map_err(|e| format!("Failed to parse theme: {}", e))?;
        if data.version != 1 {
            return Err(format!("Unsupported theme version: {}", data.version));
        }
        Self::resolve(data)
    }

    /// Load a theme from a YAML file
    pub fn from_file(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read theme file {}: {}", path.display(), e))?;
        Self::from_yaml(&content)
    }

    fn resolve(data: ThemeData) -> Result<Self, String> {
        let b = &data.browser;
        let chip = Color::from_hex(&b.chip)?;
        let text = Color::from_hex(&b.text)?;
        Ok(Self {
            name: data.name,
            background: Color::from_hex(&b.background)?,
            top_bar: Color::from_hex(&b.top_bar)?,
            chip,
            chip_hover: match &b.chip_hover {
                Some(s) => Color::from_hex(s)?,
                None => chip,
            },
            chip_selected: Color::from_hex(&b.chip_selected)?,
            text,
            headers: match &b.headers {
                Some(s) => Color::from_hex(s)?,
                None => text,
            },
            scrollbar_track: Color::from_hex(&b.scrollbar_track)?,
            scrollbar_thumb: Color::from_hex(&b.scrollbar_thumb)?,
        })
    }
}

impl Default for Theme {
    fn default() -> Self {
        // The embedded theme is validated by tests; a parse failure here is a
        // build defect, not a runtime condition.
        Self::from_yaml(DEFAULT_DARK_YAML).expect("embedded default theme must parse")
    }
}
