//! Standard Type1 fonts, their advance widths and WinAnsi encoding.
//!
//! Only Helvetica and Helvetica-Bold are used. Both are part of the base
//! fourteen fonts, so nothing is embedded and the widths below (from the
//! Adobe AFM files, 1/1000 em) are all that is needed to measure text.

use unicode_normalization::UnicodeNormalization;

/// Fonts available to the PDF emitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Font {
    /// Helvetica
    Regular,
    /// Helvetica-Bold
    Bold,
}

/// WinAnsi code of the bullet glyph.
pub const BULLET: u8 = 0x95;

impl Font {
    /// Resource name used in content streams.
    pub fn resource_name(self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
        }
    }

    /// PostScript name of the base font.
    pub fn base_font(self) -> &'static str {
        match self {
            Font::Regular => "Helvetica",
            Font::Bold => "Helvetica-Bold",
        }
    }

    /// Advance width of one WinAnsi code, in 1/1000 em.
    pub fn char_width(self, code: u8) -> u16 {
        match code {
            32..=126 => {
                let table = match self {
                    Font::Regular => &HELVETICA_WIDTHS,
                    Font::Bold => &HELVETICA_BOLD_WIDTHS,
                };
                table[(code - 32) as usize]
            }
            BULLET => 350,
            0x85 | 0x89 | 0x97 => 1000,
            0x91 | 0x92 | 0x82 => match self {
                Font::Regular => 222,
                Font::Bold => 278,
            },
            0x93 | 0x94 | 0x84 => match self {
                Font::Regular => 333,
                Font::Bold => 500,
            },
            0x99 => 1000,
            _ => 556,
        }
    }

    /// Width of encoded text at the given size, in points.
    pub fn text_width(self, text: &[u8], size: f32) -> f32 {
        let units: u32 = text.iter().map(|&c| self.char_width(c) as u32).sum();
        units as f32 * size / 1000.0
    }
}

/// Encode text as WinAnsi bytes after NFC normalisation.
///
/// Characters with no WinAnsi code become `?`; tabs and other control
/// characters become spaces.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.nfc().map(win_ansi_code).collect()
}

fn win_ansi_code(c: char) -> u8 {
    match c as u32 {
        0x00..=0x1F | 0x7F => b' ',
        0x20..=0x7E => c as u8,
        0xA0..=0xFF => c as u8,
        _ => match c {
            '\u{20AC}' => 0x80,
            '\u{201A}' => 0x82,
            '\u{0192}' => 0x83,
            '\u{201E}' => 0x84,
            '\u{2026}' => 0x85,
            '\u{2020}' => 0x86,
            '\u{2021}' => 0x87,
            '\u{02C6}' => 0x88,
            '\u{2030}' => 0x89,
            '\u{0160}' => 0x8A,
            '\u{2039}' => 0x8B,
            '\u{0152}' => 0x8C,
            '\u{017D}' => 0x8E,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2022}' => BULLET,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            '\u{02DC}' => 0x98,
            '\u{2122}' => 0x99,
            '\u{0161}' => 0x9A,
            '\u{203A}' => 0x9B,
            '\u{0153}' => 0x9C,
            '\u{017E}' => 0x9E,
            '\u{0178}' => 0x9F,
            _ => b'?',
        },
    }
}

#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];
