//! Paragraph and table styles of the report.

use super::fonts::Font;

/// 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Colour from a `0xRRGGBB` value.
    pub const fn hex(rgb: u32) -> Self {
        Self {
            r: (rgb >> 16) as u8,
            g: (rgb >> 8) as u8,
            b: rgb as u8,
        }
    }

    /// Components scaled to 0..=1 for `rg`/`RG` operators.
    pub fn components(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }

    pub const BLACK: Color = Color::hex(0x000000);
    pub const GREY: Color = Color::hex(0x808080);
    pub const WHITESMOKE: Color = Color::hex(0xF5F5F5);
    pub const BEIGE: Color = Color::hex(0xF5F5DC);
}

/// Horizontal alignment of paragraph lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    /// Stretch every line but the last to the frame width
    Justify,
}

/// Style of a block of text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font: Font,
    pub font_size: f32,
    pub leading: f32,
    pub color: Color,
    pub space_before: f32,
    pub space_after: f32,
    pub alignment: Alignment,
}

/// Level-1 heading.
pub const TITLE: TextStyle = TextStyle {
    font: Font::Bold,
    font_size: 20.0,
    leading: 24.0,
    color: Color::hex(0x1A1A1A),
    space_before: 10.0,
    space_after: 12.0,
    alignment: Alignment::Left,
};

/// Level-2 heading.
pub const SECTION: TextStyle = TextStyle {
    font: Font::Bold,
    font_size: 14.0,
    leading: 18.0,
    color: Color::hex(0x2C3E50),
    space_before: 10.0,
    space_after: 10.0,
    alignment: Alignment::Left,
};

/// Level-3 heading.
pub const SUBSECTION: TextStyle = TextStyle {
    font: Font::Bold,
    font_size: 12.0,
    leading: 15.0,
    color: Color::hex(0x34495E),
    space_before: 8.0,
    space_after: 8.0,
    alignment: Alignment::Left,
};

/// Body text, bullets and metadata lines.
pub const BODY: TextStyle = TextStyle {
    font: Font::Regular,
    font_size: 10.0,
    leading: 12.0,
    color: Color::hex(0x2C3E50),
    space_before: 0.0,
    space_after: 8.0,
    alignment: Alignment::Justify,
};

/// Height of the spacer after images and tables, and for rules.
pub const SPACER: f32 = 12.0;

/// Heading style for a level (1..=3).
pub fn heading_style(level: u8) -> TextStyle {
    match level {
        1 => TITLE,
        2 => SECTION,
        _ => SUBSECTION,
    }
}

/// Cell style of one table row kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellStyle {
    pub font: Font,
    pub font_size: f32,
    pub text_color: Color,
    pub background: Color,
    pub padding_top: f32,
    pub padding_bottom: f32,
}

impl CellStyle {
    /// Line height of cell text.
    pub fn leading(&self) -> f32 {
        self.font_size * 1.2
    }
}

/// Table grid and cell styles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableStyle {
    pub header: CellStyle,
    pub body: CellStyle,
    pub padding_left: f32,
    pub padding_right: f32,
    pub grid_width: f32,
    pub grid_color: Color,
}

/// Grey header with whitesmoke bold text, beige body, black 1pt grid.
pub const REPORT_TABLE: TableStyle = TableStyle {
    header: CellStyle {
        font: Font::Bold,
        font_size: 10.0,
        text_color: Color::WHITESMOKE,
        background: Color::GREY,
        padding_top: 3.0,
        padding_bottom: 12.0,
    },
    body: CellStyle {
        font: Font::Regular,
        font_size: 9.0,
        text_color: Color::BLACK,
        background: Color::BEIGE,
        padding_top: 3.0,
        padding_bottom: 3.0,
    },
    padding_left: 6.0,
    padding_right: 6.0,
    grid_width: 1.0,
    grid_color: Color::BLACK,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color() {
        let c = Color::hex(0xFF8000);
        assert_eq!((c.r, c.g, c.b), (255, 128, 0));
        let [r, g, b] = c.components();
        assert_eq!(r, 1.0);
        assert!((g - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(b, 0.0);
    }

    #[test]
    fn test_heading_styles() {
        assert_eq!(heading_style(1).font_size, 20.0);
        assert_eq!(heading_style(2).font_size, 14.0);
        assert_eq!(heading_style(3).font_size, 12.0);
        assert_eq!(BODY.alignment, Alignment::Justify);
    }
}
