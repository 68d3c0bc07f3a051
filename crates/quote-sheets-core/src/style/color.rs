//! Color representation

use std::fmt;

/// Color representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    /// Automatic/default color
    #[default]
    Auto,

    /// RGB color (no alpha)
    Rgb { r: u8, g: u8, b: u8 },
}

impl Color {
    /// Light green fill used for the cheapest cells
    pub const LIGHT_GREEN: Color = Color::rgb(0xC6, 0xEF, 0xCE);
    /// Dark green text used for the cheapest cells
    pub const DARK_GREEN: Color = Color::rgb(0x00, 0x61, 0x00);
    /// Light red fill
    pub const LIGHT_RED: Color = Color::rgb(0xFF, 0xC7, 0xCE);
    /// Dark red text
    pub const DARK_RED: Color = Color::rgb(0x9C, 0x00, 0x06);
    /// Light orange fill
    pub const LIGHT_ORANGE: Color = Color::rgb(0xFF, 0xEB, 0x9C);
    /// Dark orange text
    pub const DARK_ORANGE: Color = Color::rgb(0x9C, 0x65, 0x00);

    /// Create an RGB color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Rgb { r, g, b }
    }

    /// Create from a hex string (e.g., "#C6EFCE" or "C6EFCE")
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 {
            return None;
        }

        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Color::Rgb { r, g, b })
    }

    /// Convert to hex string (without # prefix)
    pub fn to_hex(&self) -> String {
        let (r, g, b) = self.to_rgb();
        format!("{:02X}{:02X}{:02X}", r, g, b)
    }

    /// Convert to RGB tuple
    pub fn to_rgb(&self) -> (u8, u8, u8) {
        match self {
            Color::Auto => (0, 0, 0),
            Color::Rgb { r, g, b } => (*r, *g, *b),
        }
    }

    /// Pack as `0xRRGGBB`, the form spreadsheet writers take
    pub fn to_rgb_u32(&self) -> u32 {
        let (r, g, b) = self.to_rgb();
        (r as u32) << 16 | (g as u32) << 8 | b as u32
    }

    /// Check if this is the automatic color
    pub fn is_auto(&self) -> bool {
        matches!(self, Color::Auto)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Auto => write!(f, "auto"),
            _ => write!(f, "#{}", self.to_hex()),
        }
    }
}
