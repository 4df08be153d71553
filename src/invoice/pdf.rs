//! Paints [`Block`]s onto A4 pages.

use printpdf::{
    BuiltinFont,
    IndirectFontRef,
    Line,
    Mm,
    PdfDocument,
    PdfDocumentReference,
    PdfLayerReference,
    Point,
    Pt,
};

use crate::{
    invoice::layout::{Alignment, Block, Edge, Row, Table},
    prelude::*,
};

pub const PAGE_WIDTH: f32 = 595.0;
pub const PAGE_HEIGHT: f32 = 842.0;
pub const MARGIN: f32 = 30.0;
pub const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;

const LAYER_NAME: &str = "Layer 1";

const CELL_PADDING_LEFT: f32 = 6.0;
const CELL_PADDING_RIGHT: f32 = 6.0;
const CELL_PADDING_TOP: f32 = 3.0;
const CELL_PADDING_BOTTOM: f32 = 5.0;

#[derive(Copy, Clone)]
struct TextStyle {
    font_size: f32,
    leading: f32,
    space_before: f32,
    space_after: f32,
    is_bold: bool,
}

const TITLE: TextStyle = TextStyle {
    font_size: 18.0,
    leading: 22.0,
    space_before: 10.0,
    space_after: 30.0,
    is_bold: true,
};

const HEADING: TextStyle = TextStyle {
    font_size: 12.0,
    leading: 14.4,
    space_before: 10.0,
    space_after: 15.0,
    is_bold: true,
};

const BODY: TextStyle = TextStyle {
    font_size: 10.0,
    leading: 12.0,
    space_before: 0.0,
    space_after: 0.0,
    is_bold: false,
};

/// Render the blocks into a PDF document.
#[instrument(skip_all, fields(title = title, n_blocks = blocks.len()))]
pub fn render(title: &str, blocks: &[Block]) -> Result<Vec<u8>> {
    let (document, page, layer) = PdfDocument::new(
        title,
        Mm::from(Pt(PAGE_WIDTH)),
        Mm::from(Pt(PAGE_HEIGHT)),
        LAYER_NAME,
    );
    let fonts = Fonts {
        regular: document
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|error| anyhow!("failed to add the regular font: {error:?}"))?,
        bold: document
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|error| anyhow!("failed to add the bold font: {error:?}"))?,
    };

    let mut painter = Painter {
        layer: document.get_page(page).get_layer(layer),
        document: &document,
        fonts,
        y: PAGE_HEIGHT - MARGIN,
        n_pages: 1,
    };
    for block in blocks {
        painter.paint(block);
    }
    debug!(n_pages = painter.n_pages, "painted");
    drop(painter);

    document.save_to_bytes().map_err(|error| anyhow!("failed to serialize the PDF: {error:?}"))
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

impl Fonts {
    const fn get(&self, is_bold: bool) -> &IndirectFontRef {
        if is_bold { &self.bold } else { &self.regular }
    }
}

struct Painter<'a> {
    document: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    fonts: Fonts,

    /// Current vertical position from the page bottom, in points.
    y: f32,

    n_pages: usize,
}

impl Painter<'_> {
    fn paint(&mut self, block: &Block) {
        match block {
            Block::Title(text) => self.paint_text(text, TITLE),
            Block::Heading(text) => self.paint_text(text, HEADING),
            Block::Paragraph(text) => self.paint_text(text, BODY),
            Block::Spacer(height) => self.y -= height,
            Block::Table(table) => self.paint_table(table),
        }
    }

    fn paint_text(&mut self, text: &str, style: TextStyle) {
        self.y -= style.space_before;
        for line in wrap(text, style.font_size, style.is_bold, CONTENT_WIDTH) {
            self.reserve(style.leading);
            self.write(&line, MARGIN, self.y - style.font_size, style.font_size, style.is_bold);
            self.y -= style.leading;
        }
        self.y -= style.space_after;
    }

    /// Paint the table, repeating the header on every page it spans.
    fn paint_table(&mut self, table: &Table) {
        let mut column_edges: Vec<f32> = table
            .column_widths
            .iter()
            .scan(MARGIN, |x, width| {
                let left = *x;
                *x += width * CONTENT_WIDTH;
                Some(left)
            })
            .collect();
        let right = MARGIN + table.column_widths.iter().sum::<f32>() * CONTENT_WIDTH;
        column_edges.push(right);

        let Some(header) = table.header() else { return };
        self.paint_row(header, &column_edges, &table.alignments);
        for row in table.body() {
            if self.reserve(row_height(row)) {
                self.paint_row(header, &column_edges, &table.alignments);
            }
            self.paint_row(row, &column_edges, &table.alignments);
        }
    }

    fn paint_row(&mut self, row: &Row, column_edges: &[f32], alignments: &[Alignment]) {
        let height = row_height(row);
        self.reserve(height);

        let baseline = self.y - CELL_PADDING_TOP - row.font_size;
        for (column, cell) in row.cells.iter().enumerate() {
            let (Some(left), Some(right)) = (column_edges.get(column), column_edges.get(column + 1))
            else {
                break;
            };
            let x = match alignments.get(column).copied().unwrap_or(Alignment::Left) {
                Alignment::Left => left + CELL_PADDING_LEFT,
                Alignment::Right => {
                    right - CELL_PADDING_RIGHT - text_width(cell, row.font_size, row.is_bold)
                }
            };
            self.write(cell, x, baseline, row.font_size, row.is_bold);
        }

        for rule in &row.rules {
            let (Some(left), Some(right)) =
                (column_edges.get(rule.columns.start), column_edges.get(rule.columns.end))
            else {
                continue;
            };
            let y = match rule.edge {
                Edge::Top => self.y,
                Edge::Bottom => self.y - height,
            };
            self.stroke(*left, *right, y, rule.thickness);
        }

        self.y -= height;
    }

    /// Start a new page unless the current one has the room left.
    ///
    /// Returns whether the new page has been started.
    fn reserve(&mut self, height: f32) -> bool {
        if self.y - height >= MARGIN {
            return false;
        }
        let (page, layer) = self.document.add_page(
            Mm::from(Pt(PAGE_WIDTH)),
            Mm::from(Pt(PAGE_HEIGHT)),
            LAYER_NAME,
        );
        self.layer = self.document.get_page(page).get_layer(layer);
        self.y = PAGE_HEIGHT - MARGIN;
        self.n_pages += 1;
        true
    }

    fn write(&self, text: &str, x: f32, y: f32, font_size: f32, is_bold: bool) {
        if text.is_empty() {
            return;
        }
        self.layer.use_text(
            text,
            font_size,
            Mm::from(Pt(x)),
            Mm::from(Pt(y)),
            self.fonts.get(is_bold),
        );
    }

    fn stroke(&self, left: f32, right: f32, y: f32, thickness: f32) {
        self.layer.set_outline_thickness(thickness);
        self.layer.add_line(Line {
            points: vec![
                (Point::new(Mm::from(Pt(left)), Mm::from(Pt(y))), false),
                (Point::new(Mm::from(Pt(right)), Mm::from(Pt(y))), false),
            ],
            is_closed: false,
        });
    }
}

fn row_height(row: &Row) -> f32 {
    row.font_size * 1.2 + CELL_PADDING_TOP + CELL_PADDING_BOTTOM
}

/// Greedily break the text into lines that fit into the width.
///
/// A single word wider than the line is left alone on its own line.
fn wrap(text: &str, font_size: f32, is_bold: bool, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if line.is_empty() {
            line.push_str(word);
            continue;
        }
        let candidate = format!("{line} {word}");
        if text_width(&candidate, font_size, is_bold) > max_width {
            lines.push(std::mem::replace(&mut line, word.to_owned()));
        } else {
            line = candidate;
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Approximate Helvetica advance width of the text, in points.
#[expect(clippy::cast_precision_loss)]
fn text_width(text: &str, font_size: f32, is_bold: bool) -> f32 {
    let units: u32 = text.chars().map(|c| u32::from(glyph_width(c, is_bold))).sum();
    units as f32 * font_size / 1000.0
}

/// Helvetica glyph widths in thousandths of an em, from the standard AFM metrics.
///
/// Anything not listed is assumed to be as wide as a digit.
const fn glyph_width(c: char, is_bold: bool) -> u16 {
    let (regular, bold) = match c {
        ' ' | ',' | '.' | '/' | ':' | ';' => (278, 278),
        'i' | 'j' | 'l' => (222, 278),
        'f' | 't' | 'I' => (278, 333),
        '-' | '(' | ')' | 'r' => (333, 389),
        'c' | 'k' | 's' | 'v' | 'x' | 'y' | 'z' | 'J' => (500, 556),
        'a' | 'b' | 'd' | 'e' | 'g' | 'h' | 'n' | 'o' | 'p' | 'q' | 'u' | 'å' | 'L' => (556, 611),
        'F' | 'T' | 'Z' | 'ø' => (611, 611),
        'A' | 'B' | 'E' | 'K' | 'P' | 'S' | 'V' | 'X' | 'Y' => (667, 667),
        'C' | 'D' | 'H' | 'N' | 'R' | 'U' | 'w' => (722, 722),
        'G' | 'O' | 'Q' | 'Ø' => (778, 778),
        'M' | 'm' => (833, 833),
        '%' | 'æ' | 'Æ' => (889, 889),
        'W' => (944, 944),
        _ => (556, 556),
    };
    if is_bold { bold } else { regular }
}

/// Strings painted by the text operators, page by page.
#[cfg(test)]
pub fn extract_text(bytes: &[u8]) -> Result<Vec<String>> {
    use lopdf::{Document, Object, content::Content};

    let document = Document::load_mem(bytes)?;
    let mut texts = Vec::new();
    for page_id in document.get_pages().into_values() {
        let content = Content::decode(&document.get_page_content(page_id)?)?;
        let operations = content.operations.into_iter();
        for operation in operations.filter(|operation| operation.operator == "Tj") {
            for operand in operation.operands {
                // WinAnsi agrees with Latin-1 on the Norwegian letters.
                if let Object::String(bytes, _) = operand {
                    texts.push(bytes.into_iter().map(char::from).collect());
                }
            }
        }
    }
    Ok(texts)
}
