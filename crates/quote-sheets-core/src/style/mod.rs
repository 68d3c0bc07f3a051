//! Cell styling types
//!
//! Only the formatting the quotation sheets use is modelled:
//! - [`Style`] - Complete cell style
//! - [`Color`] - Color representation
//! - [`BorderLineStyle`] - Border applied to all four edges
//! - [`HorizontalAlignment`] / [`VerticalAlignment`] - Text alignment

mod color;

pub use color::Color;

/// Complete cell style
///
/// Also used as the differential format of a conditional formatting rule,
/// where only `font_color` and `fill` are meaningful.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Style {
    /// Bold font
    pub bold: bool,
    /// Font color
    pub font_color: Color,
    /// Solid background fill, if any
    pub fill: Option<Color>,
    /// Border applied to all four edges
    pub border: BorderLineStyle,
    /// Horizontal alignment
    pub horizontal: HorizontalAlignment,
    /// Vertical alignment
    pub vertical: VerticalAlignment,
}

impl Style {
    /// Create a new default style
    pub fn new() -> Self {
        Self::default()
    }

    /// Set font to bold
    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    /// Set font color
    pub fn font_color(mut self, color: Color) -> Self {
        self.font_color = color;
        self
    }

    /// Set fill color (solid fill)
    pub fn fill_color(mut self, color: Color) -> Self {
        self.fill = Some(color);
        self
    }

    /// Set the border on all edges
    pub fn border(mut self, border: BorderLineStyle) -> Self {
        self.border = border;
        self
    }

    /// Set horizontal alignment
    pub fn horizontal_alignment(mut self, align: HorizontalAlignment) -> Self {
        self.horizontal = align;
        self
    }

    /// Set vertical alignment
    pub fn vertical_alignment(mut self, align: VerticalAlignment) -> Self {
        self.vertical = align;
        self
    }

    /// Check if this is the default style
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// Border line styles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BorderLineStyle {
    /// No border
    #[default]
    None,
    /// Thin line
    Thin,
    /// Medium line
    Medium,
    /// Thick line
    Thick,
}

/// Horizontal alignment options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HorizontalAlignment {
    /// General alignment (text left, numbers right)
    #[default]
    General,
    /// Left aligned
    Left,
    /// Center aligned
    Center,
    /// Right aligned
    Right,
}

/// Vertical alignment options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VerticalAlignment {
    /// Top aligned
    Top,
    /// Center aligned
    Center,
    /// Bottom aligned (Excel default)
    #[default]
    Bottom,
}
