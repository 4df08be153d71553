//! Structure of a rendered document, independent of the page description format.

use std::ops::Range;

#[derive(Clone, Debug, PartialEq)]
pub enum Block {
    Title(String),
    Heading(String),
    Paragraph(String),

    /// Vertical gap in points.
    Spacer(f32),

    Table(Table),
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Alignment {
    Left,
    Right,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Table {
    /// Fractions of the content width, one per column.
    pub column_widths: Vec<f32>,

    pub alignments: Vec<Alignment>,

    /// The first row is the header.
    pub rows: Vec<Row>,
}

impl Table {
    #[must_use]
    pub fn header(&self) -> Option<&Row> {
        self.rows.first()
    }

    /// Rows below the header.
    #[must_use]
    pub fn body(&self) -> &[Row] {
        self.rows.get(1..).unwrap_or_default()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Row {
    pub cells: Vec<String>,
    pub font_size: f32,
    pub is_bold: bool,
    pub rules: Vec<Rule>,
}

impl Row {
    pub const FONT_SIZE: f32 = 10.0;

    pub fn new<C: Into<String>>(cells: impl IntoIterator<Item = C>) -> Self {
        Self {
            cells: cells.into_iter().map(Into::into).collect(),
            font_size: Self::FONT_SIZE,
            is_bold: false,
            rules: Vec::new(),
        }
    }

    #[must_use]
    pub const fn bold(mut self) -> Self {
        self.is_bold = true;
        self
    }

    #[must_use]
    pub const fn with_font_size(mut self, font_size: f32) -> Self {
        self.font_size = font_size;
        self
    }

    #[must_use]
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }
}

/// Horizontal line along the row's top or bottom edge.
#[derive(Clone, Debug, PartialEq)]
pub struct Rule {
    pub edge: Edge,
    pub columns: Range<usize>,
    pub thickness: f32,
}

impl Rule {
    pub const fn above(columns: Range<usize>, thickness: f32) -> Self {
        Self { edge: Edge::Top, columns, thickness }
    }

    pub const fn below(columns: Range<usize>, thickness: f32) -> Self {
        Self { edge: Edge::Bottom, columns, thickness }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Edge {
    Top,
    Bottom,
}
