use std::collections::HashMap;

use ratatui::style::Color;

use crate::model::{Category, CategoryStyle, UiConfig};

/// Parsed color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    /// Fill of the detail overlay panel
    pub panel_bg: Color,
    /// Fill drawn over the list while the overlay is open
    pub backdrop: Color,
    pub text: Color,
    pub text_bright: Color,
    pub highlight: Color,
    pub dim: Color,
    pub red: Color,
    pub yellow: Color,
    pub green: Color,
    pub cyan: Color,
    pub purple: Color,
    pub blue: Color,
    pub gray: Color,
    pub selection_bg: Color,
    pub badge_bg: Color,
    /// Per-category badge colors, keyed by category key
    pub category_colors: HashMap<String, Color>,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Rgb(0x0C, 0x00, 0x1B),
            panel_bg: Color::Rgb(0x16, 0x0A, 0x2A),
            backdrop: Color::Rgb(0x06, 0x00, 0x0E),
            text: Color::Rgb(0xB0, 0xAA, 0xFF),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            highlight: Color::Rgb(0xFB, 0x41, 0x96),
            dim: Color::Rgb(0x7D, 0x78, 0xBF),
            red: Color::Rgb(0xFF, 0x44, 0x44),
            yellow: Color::Rgb(0xFF, 0xD7, 0x00),
            green: Color::Rgb(0x44, 0xFF, 0x88),
            cyan: Color::Rgb(0x44, 0xDD, 0xFF),
            purple: Color::Rgb(0xCC, 0x66, 0xFF),
            blue: Color::Rgb(0x44, 0x88, 0xFF),
            gray: Color::Rgb(0x9A, 0x96, 0xB0),
            selection_bg: Color::Rgb(0x3D, 0x14, 0x38),
            badge_bg: Color::Rgb(0x2A, 0x1E, 0x44),
            category_colors: HashMap::new(),
        }
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

impl Theme {
    /// Create a theme from UI config, falling back to defaults
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();

        // Apply color overrides from [ui.colors]
        for (key, value) in &ui.colors {
            let Some(color) = parse_hex_color(value) else {
                log::warn!("ignoring invalid color {:?} for ui.colors.{}", value, key);
                continue;
            };
            match key.as_str() {
                "background" => theme.background = color,
                "panel_bg" => theme.panel_bg = color,
                "backdrop" => theme.backdrop = color,
                "text" => theme.text = color,
                "text_bright" => theme.text_bright = color,
                "highlight" => theme.highlight = color,
                "dim" => theme.dim = color,
                "red" => theme.red = color,
                "yellow" => theme.yellow = color,
                "green" => theme.green = color,
                "cyan" => theme.cyan = color,
                "purple" => theme.purple = color,
                "blue" => theme.blue = color,
                "gray" => theme.gray = color,
                "selection_bg" => theme.selection_bg = color,
                "badge_bg" => theme.badge_bg = color,
                _ => log::warn!("unknown theme color ui.colors.{}", key),
            }
        }

        // Apply category overrides from [ui.category_colors]; known keys only
        for (key, value) in &ui.category_colors {
            if !Category::parse(key).is_known() {
                log::warn!("ignoring color for unknown category {:?}", key);
                continue;
            }
            if let Some(color) = parse_hex_color(value) {
                theme.category_colors.insert(key.clone(), color);
            }
        }

        theme
    }

    /// Color for a style token
    pub fn style_color(&self, style: CategoryStyle) -> Color {
        match style {
            CategoryStyle::Blue => self.blue,
            CategoryStyle::Green => self.green,
            CategoryStyle::Purple => self.purple,
            CategoryStyle::Yellow => self.yellow,
            CategoryStyle::Gray => self.gray,
        }
    }

    /// Badge color for a category: a configured override, else its style token
    pub fn category_color(&self, category: &Category) -> Color {
        if category.is_known()
            && let Some(color) = self.category_colors.get(category.key())
        {
            return *color;
        }
        self.style_color(category.style_token())
    }
}
