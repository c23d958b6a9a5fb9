//! Flowables, line breaking and pagination.
//!
//! Flowables are stacked top-down inside the page frame. The gap between
//! two flowables is the larger of the previous space-after and the next
//! space-before, and no gap is added at the top of a page. Text blocks
//! split between lines, tables between rows; an image that does not fit
//! moves to the next page whole.

use lopdf::content::Operation;
use lopdf::{Object, StringFormat};

use super::fonts::Font;
use super::style::{Alignment, CellStyle, Color, TableStyle, TextStyle};
use crate::render::PageSetup;

/// Encoded text in one font.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub font: Font,
    pub text: Vec<u8>,
}

impl Span {
    pub fn new(font: Font, text: Vec<u8>) -> Self {
        Self { font, text }
    }
}

/// One laid-out line of text.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// Spans with adjacent same-font text merged
    pub spans: Vec<Span>,
    /// Natural width in points
    pub width: f32,
    /// Number of inter-word spaces, for justification
    pub spaces: usize,
}

impl Line {
    /// Text of the line with font changes dropped.
    pub fn bytes(&self) -> Vec<u8> {
        self.spans.iter().flat_map(|s| s.text.iter().copied()).collect()
    }
}

/// Break styled text into lines no wider than `max_width`.
///
/// Runs of spaces collapse to one. A word wider than the line is placed
/// on a line of its own and allowed to overflow.
pub fn break_lines(spans: &[Span], size: f32, max_width: f32) -> Vec<Line> {
    let words = split_words(spans);
    let space = Font::Regular.char_width(b' ') as f32 * size / 1000.0;

    let mut lines = Vec::new();
    let mut current: Vec<&Vec<Span>> = Vec::new();
    let mut width = 0.0;

    for word in &words {
        let word_width: f32 = word.iter().map(|s| s.font.text_width(&s.text, size)).sum();
        let needed = if current.is_empty() {
            word_width
        } else {
            width + space + word_width
        };
        if needed > max_width && !current.is_empty() {
            lines.push(build_line(&current, width));
            current.clear();
            width = word_width;
        } else {
            width = needed;
        }
        current.push(word);
    }
    if !current.is_empty() {
        lines.push(build_line(&current, width));
    }
    lines
}

fn split_words(spans: &[Span]) -> Vec<Vec<Span>> {
    let mut words: Vec<Vec<Span>> = Vec::new();
    let mut word: Vec<Span> = Vec::new();

    for span in spans {
        for &code in &span.text {
            if code == b' ' {
                if !word.is_empty() {
                    words.push(std::mem::take(&mut word));
                }
                continue;
            }
            match word.last_mut() {
                Some(last) if last.font == span.font => last.text.push(code),
                _ => word.push(Span::new(span.font, vec![code])),
            }
        }
    }
    if !word.is_empty() {
        words.push(word);
    }
    words
}

fn build_line(words: &[&Vec<Span>], width: f32) -> Line {
    let mut spans: Vec<Span> = Vec::new();
    for (i, word) in words.iter().enumerate() {
        for (j, frag) in word.iter().enumerate() {
            let mut text = Vec::with_capacity(frag.text.len() + 1);
            if i > 0 && j == 0 {
                text.push(b' ');
            }
            text.extend_from_slice(&frag.text);
            match spans.last_mut() {
                Some(last) if last.font == frag.font => last.text.extend(text),
                _ => spans.push(Span::new(frag.font, text)),
            }
        }
    }
    Line {
        spans,
        width,
        spaces: words.len().saturating_sub(1),
    }
}

/// A paragraph laid out to the frame width.
#[derive(Debug, Clone)]
pub struct TextBlock {
    pub lines: Vec<Line>,
    pub style: TextStyle,
    pub width: f32,
}

impl TextBlock {
    pub fn new(spans: &[Span], style: TextStyle, width: f32) -> Self {
        Self {
            lines: break_lines(spans, style.font_size, width),
            style,
            width,
        }
    }

    pub fn height(&self) -> f32 {
        self.lines.len() as f32 * self.style.leading
    }
}

/// An image placed through its XObject index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageBlock {
    /// Index into the document's image list
    pub index: usize,
    pub width: f32,
    pub height: f32,
}

impl ImageBlock {
    /// Fit `pixel_width` x `pixel_height` proportionally into a box.
    pub fn fitted(index: usize, pixel_width: u32, pixel_height: u32, bounds: (f32, f32)) -> Self {
        let (w, h) = (pixel_width.max(1) as f32, pixel_height.max(1) as f32);
        let scale = (bounds.0 / w).min(bounds.1 / h);
        Self {
            index,
            width: w * scale,
            height: h * scale,
        }
    }
}

/// One table row with its wrapped cell text.
#[derive(Debug, Clone)]
pub struct RowLayout {
    pub cells: Vec<Vec<Line>>,
    pub header: bool,
    pub height: f32,
}

/// A table laid out with fixed column widths.
#[derive(Debug, Clone)]
pub struct TableBlock {
    pub rows: Vec<RowLayout>,
    pub column_widths: Vec<f32>,
    pub style: TableStyle,
}

impl TableBlock {
    /// Lay out rows of encoded cell text; the first row is the header when
    /// `has_header` is set. Cells past the last configured width reuse it.
    pub fn new(
        rows: &[Vec<Vec<u8>>],
        has_header: bool,
        column_widths: Vec<f32>,
        style: TableStyle,
    ) -> Self {
        let mut block = Self {
            rows: Vec::with_capacity(rows.len()),
            column_widths,
            style,
        };
        for (i, cells) in rows.iter().enumerate() {
            let header = has_header && i == 0;
            let cell_style = block.cell_style(header);
            let lines: Vec<Vec<Line>> = cells
                .iter()
                .enumerate()
                .map(|(col, text)| {
                    let inner = block.column_width(col) - style.padding_left - style.padding_right;
                    let span = Span::new(cell_style.font, text.clone());
                    break_lines(&[span], cell_style.font_size, inner.max(1.0))
                })
                .collect();
            let max_lines = lines.iter().map(Vec::len).max().unwrap_or(0).max(1);
            let height = cell_style.padding_top
                + max_lines as f32 * cell_style.leading()
                + cell_style.padding_bottom;
            block.rows.push(RowLayout {
                cells: lines,
                header,
                height,
            });
        }
        block
    }

    pub fn column_width(&self, col: usize) -> f32 {
        self.column_widths
            .get(col)
            .or_else(|| self.column_widths.last())
            .copied()
            .unwrap_or(0.0)
    }

    /// Width of the widest row.
    pub fn width(&self) -> f32 {
        let columns = self.rows.iter().map(|r| r.cells.len()).max().unwrap_or(0);
        (0..columns).map(|c| self.column_width(c)).sum()
    }

    fn cell_style(&self, header: bool) -> CellStyle {
        if header {
            self.style.header
        } else {
            self.style.body
        }
    }
}

/// A layout element placed in the page frame.
#[derive(Debug, Clone)]
pub enum Flowable {
    Text(TextBlock),
    Spacer(f32),
    Image(ImageBlock),
    Table(TableBlock),
}

/// Stacks flowables onto pages and records their drawing operations.
pub struct Paginator {
    setup: PageSetup,
    pages: Vec<Vec<Operation>>,
    ops: Vec<Operation>,
    y: f32,
    pending_space: f32,
    at_top: bool,
}

impl Paginator {
    pub fn new(setup: PageSetup) -> Self {
        Self {
            setup,
            pages: Vec::new(),
            ops: Vec::new(),
            y: setup.frame_top(),
            pending_space: 0.0,
            at_top: true,
        }
    }

    /// Place one flowable.
    pub fn add(&mut self, flowable: &Flowable) {
        match flowable {
            Flowable::Text(block) => self.add_text(block),
            Flowable::Spacer(height) => self.add_spacer(*height),
            Flowable::Image(image) => self.add_image(image),
            Flowable::Table(table) => self.add_table(table),
        }
    }

    /// Close the last page and return every page's operations.
    ///
    /// A document with no flowables still yields one empty page.
    pub fn finish(mut self) -> Vec<Vec<Operation>> {
        if !self.ops.is_empty() || self.pages.is_empty() {
            self.pages.push(std::mem::take(&mut self.ops));
        }
        self.pages
    }

    fn remaining(&self) -> f32 {
        self.y - self.setup.margin_bottom
    }

    fn new_page(&mut self) {
        self.pages.push(std::mem::take(&mut self.ops));
        self.y = self.setup.frame_top();
        self.pending_space = 0.0;
        self.at_top = true;
        log::debug!("page break, starting page {}", self.pages.len() + 1);
    }

    fn gap(&self, space_before: f32) -> f32 {
        if self.at_top {
            0.0
        } else {
            self.pending_space.max(space_before)
        }
    }

    /// Advance past the gap, or break the page when `needed` would not fit.
    fn reserve(&mut self, space_before: f32, needed: f32) {
        let gap = self.gap(space_before);
        if !self.at_top && gap + needed > self.remaining() + 0.01 {
            self.new_page();
        } else {
            self.y -= gap;
        }
    }

    fn add_text(&mut self, block: &TextBlock) {
        let style = block.style;
        self.reserve(style.space_before, style.leading);

        let total = block.lines.len();
        let mut index = 0;
        while index < total {
            let mut fit = ((self.remaining() + 0.01) / style.leading).floor() as usize;
            if fit == 0 {
                if !self.at_top {
                    self.new_page();
                    continue;
                }
                fit = 1;
            }
            let end = (index + fit).min(total);
            for i in index..end {
                let last = i + 1 == total;
                self.draw_line(&block.lines[i], &style, block.width, last);
                self.y -= style.leading;
            }
            self.at_top = false;
            index = end;
            if index < total {
                self.new_page();
            }
        }
        self.pending_space = style.space_after;
    }

    fn add_spacer(&mut self, height: f32) {
        if self.at_top {
            return;
        }
        let gap = self.pending_space;
        if gap + height > self.remaining() {
            self.new_page();
            return;
        }
        self.y -= gap + height;
        self.pending_space = 0.0;
    }

    fn add_image(&mut self, image: &ImageBlock) {
        let mut width = image.width;
        let mut height = image.height;
        let frame_height = self.setup.frame_height();
        if height > frame_height {
            width *= frame_height / height;
            height = frame_height;
        }

        self.reserve(0.0, height);
        let x = self.setup.margin_left + ((self.setup.frame_width() - width) / 2.0).max(0.0);
        let bottom = self.y - height;
        self.ops.push(Operation::new("q", vec![]));
        self.ops.push(Operation::new(
            "cm",
            vec![
                width.into(),
                Object::Integer(0),
                Object::Integer(0),
                height.into(),
                x.into(),
                bottom.into(),
            ],
        ));
        self.ops.push(Operation::new(
            "Do",
            vec![Object::Name(image_name(image.index).into_bytes())],
        ));
        self.ops.push(Operation::new("Q", vec![]));

        self.y = bottom;
        self.at_top = false;
        self.pending_space = 0.0;
    }

    fn add_table(&mut self, table: &TableBlock) {
        let first = table.rows.first().map_or(0.0, |r| r.height);
        self.reserve(0.0, first);

        let x0 =
            self.setup.margin_left + ((self.setup.frame_width() - table.width()) / 2.0).max(0.0);
        for row in &table.rows {
            if row.height > self.remaining() + 0.01 && !self.at_top {
                self.new_page();
            }
            self.draw_row(table, row, x0);
            self.y -= row.height;
            self.at_top = false;
        }
        self.pending_space = 0.0;
    }

    fn draw_line(&mut self, line: &Line, style: &TextStyle, width: f32, last: bool) {
        let baseline = self.y - style.font_size;
        let word_spacing = match style.alignment {
            Alignment::Justify if !last && line.spaces > 0 => {
                ((width - line.width) / line.spaces as f32).max(0.0)
            }
            _ => 0.0,
        };

        self.ops.push(Operation::new("BT", vec![]));
        set_fill(&mut self.ops, style.color);
        self.ops.push(Operation::new(
            "Td",
            vec![self.setup.margin_left.into(), baseline.into()],
        ));
        if word_spacing > 0.0 {
            self.ops.push(Operation::new("Tw", vec![word_spacing.into()]));
        }
        show_spans(&mut self.ops, &line.spans, style.font_size);
        if word_spacing > 0.0 {
            self.ops.push(Operation::new("Tw", vec![Object::Integer(0)]));
        }
        self.ops.push(Operation::new("ET", vec![]));
    }

    fn draw_row(&mut self, table: &TableBlock, row: &RowLayout, x0: f32) {
        let cell_style = table.cell_style(row.header);
        let top = self.y;
        let bottom = top - row.height;

        let mut x = x0;
        set_fill(&mut self.ops, cell_style.background);
        for col in 0..row.cells.len() {
            let w = table.column_width(col);
            self.ops.push(rect(x, bottom, w, row.height));
            self.ops.push(Operation::new("f", vec![]));
            x += w;
        }

        x = x0;
        for (col, lines) in row.cells.iter().enumerate() {
            let mut baseline = top - cell_style.padding_top - cell_style.font_size;
            for line in lines {
                self.ops.push(Operation::new("BT", vec![]));
                set_fill(&mut self.ops, cell_style.text_color);
                self.ops.push(Operation::new(
                    "Td",
                    vec![(x + table.style.padding_left).into(), baseline.into()],
                ));
                show_spans(&mut self.ops, &line.spans, cell_style.font_size);
                self.ops.push(Operation::new("ET", vec![]));
                baseline -= cell_style.leading();
            }
            x += table.column_width(col);
        }

        let [r, g, b] = table.style.grid_color.components();
        self.ops.push(Operation::new("RG", vec![r.into(), g.into(), b.into()]));
        self.ops
            .push(Operation::new("w", vec![table.style.grid_width.into()]));
        x = x0;
        for col in 0..row.cells.len() {
            let w = table.column_width(col);
            self.ops.push(rect(x, bottom, w, row.height));
            self.ops.push(Operation::new("S", vec![]));
            x += w;
        }
    }
}

/// XObject resource name of the image at `index`.
pub fn image_name(index: usize) -> String {
    format!("Im{}", index + 1)
}

fn set_fill(ops: &mut Vec<Operation>, color: Color) {
    let [r, g, b] = color.components();
    ops.push(Operation::new("rg", vec![r.into(), g.into(), b.into()]));
}

fn rect(x: f32, y: f32, w: f32, h: f32) -> Operation {
    Operation::new("re", vec![x.into(), y.into(), w.into(), h.into()])
}

fn show_spans(ops: &mut Vec<Operation>, spans: &[Span], size: f32) {
    for span in spans {
        ops.push(Operation::new(
            "Tf",
            vec![
                Object::Name(span.font.resource_name().as_bytes().to_vec()),
                size.into(),
            ],
        ));
        ops.push(Operation::new(
            "Tj",
            vec![Object::String(span.text.clone(), StringFormat::Literal)],
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::pdf::style::{BODY, REPORT_TABLE};

    fn regular(text: &str) -> Span {
        Span::new(Font::Regular, text.as_bytes().to_vec())
    }

    fn shown_text(ops: &[Operation]) -> Vec<Vec<u8>> {
        ops.iter()
            .filter(|op| op.operator == "Tj")
            .filter_map(|op| match op.operands.first() {
                Some(Object::String(bytes, _)) => Some(bytes.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_break_lines_wraps_and_collapses_spaces() {
        // "aaa" = 3 * 556 = 1668 units -> 16.68pt at 10pt; space = 2.78pt
        let lines = break_lines(&[regular("aaa   aaa aaa")], 10.0, 40.0);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].bytes(), b"aaa aaa".to_vec());
        assert_eq!(lines[0].spaces, 1);
        assert!((lines[0].width - (16.68 * 2.0 + 2.78)).abs() < 1e-3);
        assert_eq!(lines[1].bytes(), b"aaa".to_vec());
    }

    #[test]
    fn test_break_lines_keeps_fonts() {
        let spans = [
            Span::new(Font::Bold, b"Date:".to_vec()),
            regular(" 1 May"),
        ];
        let lines = break_lines(&spans, 10.0, 500.0);
        assert_eq!(lines.len(), 1);
        assert_eq!(
            lines[0].spans,
            vec![
                Span::new(Font::Bold, b"Date:".to_vec()),
                regular(" 1 May"),
            ]
        );
    }

    #[test]
    fn test_overlong_word_gets_own_line() {
        let lines = break_lines(&[regular("a wwwwwwwwww b")], 10.0, 20.0);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].bytes(), b"wwwwwwwwww".to_vec());
    }

    #[test]
    fn test_image_fitted_proportionally() {
        let img = ImageBlock::fitted(0, 800, 400, (100.0, 100.0));
        assert!((img.width - 100.0).abs() < 1e-4);
        assert!((img.height - 50.0).abs() < 1e-4);

        let small = ImageBlock::fitted(0, 10, 20, (100.0, 100.0));
        assert!((small.height - 100.0).abs() < 1e-4);
    }

    #[test]
    fn test_paragraph_splits_across_pages() {
        let setup = PageSetup::a4();
        let lines_per_page = (setup.frame_height() / BODY.leading).floor() as usize;
        // "word" is 21.67pt wide at 10pt, so a 25pt frame holds one per line
        let text = vec!["word"; lines_per_page + 5].join(" ");
        let block = TextBlock::new(&[regular(&text)], BODY, 25.0);
        assert_eq!(block.lines.len(), lines_per_page + 5);

        let mut paginator = Paginator::new(setup);
        paginator.add(&Flowable::Text(block));
        let pages = paginator.finish();

        assert_eq!(pages.len(), 2);
        assert_eq!(shown_text(&pages[0]).len(), lines_per_page);
        assert_eq!(shown_text(&pages[1]).len(), 5);
    }

    #[test]
    fn test_image_moves_to_next_page() {
        let setup = PageSetup::a4();
        let mut paginator = Paginator::new(setup);
        paginator.add(&Flowable::Spacer(1.0));
        let filler = TextBlock::new(&[regular("x")], BODY, 100.0);
        paginator.add(&Flowable::Text(filler));
        paginator.add(&Flowable::Image(ImageBlock {
            index: 0,
            width: 100.0,
            height: setup.frame_height() - 5.0,
        }));
        let pages = paginator.finish();

        assert_eq!(pages.len(), 2);
        assert!(pages[1].iter().any(|op| op.operator == "Do"));
        assert!(!pages[0].iter().any(|op| op.operator == "Do"));
    }

    #[test]
    fn test_table_rows_and_ragged_widths() {
        let rows = vec![
            vec![b"Item".to_vec(), b"Cost".to_vec()],
            vec![b"Camera".to_vec(), b"120".to_vec(), b"extra".to_vec(), b"more".to_vec()],
        ];
        let table = TableBlock::new(&rows, true, vec![10.0, 20.0, 5.0], REPORT_TABLE);

        assert!(table.rows[0].header);
        assert_eq!(table.column_width(3), 5.0);
        assert_eq!(table.width(), 40.0);
        // header: 3 + 12 + 12 padding-bottom
        assert!((table.rows[0].height - 27.0).abs() < 1e-4);

        let mut paginator = Paginator::new(PageSetup::a4());
        paginator.add(&Flowable::Table(table));
        let pages = paginator.finish();
        assert_eq!(pages.len(), 1);
        let fills = pages[0].iter().filter(|op| op.operator == "f").count();
        assert_eq!(fills, 6);
    }

    #[test]
    fn test_empty_document_has_one_page() {
        let pages = Paginator::new(PageSetup::a4()).finish();
        assert_eq!(pages.len(), 1);
        assert!(pages[0].is_empty());
    }
}
