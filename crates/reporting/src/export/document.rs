//! Paginated report layout.
//!
//! Content flows down a running cursor: every block measures its own height,
//! advances the cursor by that much and breaks to a new page when it would
//! cross the bottom margin. Nothing is placed at a fixed offset, so a long
//! status breakdown pushes the activity table down instead of under it.
//! Units are millimetres from the top-left corner of the page.

use serde::Serialize;

use crate::engine::ReportSnapshot;

/// Points to millimetres.
pub const PT_TO_MM: f32 = 25.4 / 72.0;
const LINE_SPACING: f32 = 1.15;
/// Average Helvetica glyph advance as a fraction of the font size.
const AVG_GLYPH_WIDTH: f32 = 0.5;
const CELL_PADDING: f32 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageSetup {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
}

impl PageSetup {
    pub fn content_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }

    pub fn bottom(&self) -> f32 {
        self.height - self.margin
    }
}

impl Default for PageSetup {
    /// A4 portrait.
    fn default() -> Self {
        Self {
            width: 210.0,
            height: 297.0,
            margin: 20.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TextStyle {
    pub size: f32,
    pub bold: bool,
}

impl TextStyle {
    pub const TITLE: Self = Self { size: 20.0, bold: true };
    pub const SUBTITLE: Self = Self { size: 12.0, bold: false };
    pub const HEADING: Self = Self { size: 14.0, bold: true };
    pub const BODY: Self = Self { size: 10.0, bold: false };
    pub const TABLE_HEAD: Self = Self { size: 9.0, bold: true };
    pub const TABLE_BODY: Self = Self { size: 9.0, bold: false };

    pub fn line_height(&self) -> f32 {
        self.size * PT_TO_MM * LINE_SPACING
    }

    fn ascent(&self) -> f32 {
        self.size * PT_TO_MM * 0.8
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Element {
    /// `y` is the text baseline.
    Text {
        x: f32,
        y: f32,
        style: TextStyle,
        text: String,
    },
    Rule { x1: f32, y1: f32, x2: f32, y2: f32 },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Page {
    pub elements: Vec<Element>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportDocument {
    pub setup: PageSetup,
    pub pages: Vec<Page>,
}

impl ReportDocument {
    pub fn texts(&self) -> impl Iterator<Item = (usize, f32, &str)> + '_ {
        self.pages.iter().enumerate().flat_map(|(index, page)| {
            page.elements.iter().filter_map(move |e| match e {
                Element::Text { y, text, .. } => Some((index, *y, text.as_str())),
                Element::Rule { .. } => None,
            })
        })
    }
}

/// Estimated rendered width of `text` in millimetres.
pub fn text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * PT_TO_MM * AVG_GLYPH_WIDTH
}

/// Greedy word wrap. Words longer than a line are split by characters.
pub fn wrap(text: &str, size: f32, max_width: f32) -> Vec<String> {
    let per_line = ((max_width / (size * PT_TO_MM * AVG_GLYPH_WIDTH)).floor() as usize).max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > per_line {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let rest = word.split_off(per_line);
            lines.push(word.into_iter().collect());
            word = rest;
        }
        let word: String = word.into_iter().collect();
        let needed = current.chars().count() + usize::from(!current.is_empty()) + word.chars().count();
        if needed > per_line && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

pub struct DocumentBuilder {
    setup: PageSetup,
    pages: Vec<Page>,
    cursor: f32,
}

impl DocumentBuilder {
    pub fn new(setup: PageSetup) -> Self {
        Self {
            setup,
            pages: vec![Page::default()],
            cursor: setup.margin,
        }
    }

    pub fn cursor(&self) -> f32 {
        self.cursor
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page(&mut self) -> &mut Page {
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    fn at_top(&self) -> bool {
        self.cursor <= self.setup.margin
    }

    pub fn new_page(&mut self) {
        self.pages.push(Page::default());
        self.cursor = self.setup.margin;
    }

    /// Breaks the page unless `height` still fits above the bottom margin.
    /// A block taller than a whole page is placed at the top of a fresh one.
    pub fn ensure_room(&mut self, height: f32) {
        if self.cursor + height > self.setup.bottom() && !self.at_top() {
            self.new_page();
        }
    }

    pub fn gap(&mut self, height: f32) -> f32 {
        self.cursor += height;
        if self.cursor > self.setup.bottom() {
            self.new_page();
        }
        self.cursor
    }

    /// Wrapped paragraph at the left margin. Returns the new cursor.
    pub fn text(&mut self, text: &str, style: TextStyle) -> f32 {
        let x = self.setup.margin;
        for line in wrap(text, style.size, self.setup.content_width()) {
            self.ensure_room(style.line_height());
            let y = self.cursor + style.ascent();
            self.page().elements.push(Element::Text {
                x,
                y,
                style,
                text: line,
            });
            self.cursor += style.line_height();
        }
        self.cursor
    }

    /// Heading kept on the same page as the first line that follows it.
    pub fn heading(&mut self, text: &str, style: TextStyle) -> f32 {
        self.ensure_room(style.line_height() + TextStyle::BODY.line_height());
        self.text(text, style)
    }

    /// Gridded table with equal-width columns. The header row is repeated at
    /// the top of every page the table continues onto.
    pub fn table(&mut self, headers: &[&str], rows: &[Vec<String>]) -> f32 {
        if headers.is_empty() {
            return self.cursor;
        }
        let col_width = self.setup.content_width() / headers.len() as f32;
        let header: Vec<Vec<String>> = headers
            .iter()
            .map(|h| wrap(h, TextStyle::TABLE_HEAD.size, col_width - 2.0 * CELL_PADDING))
            .collect();
        let header_height = row_height(&header, TextStyle::TABLE_HEAD);

        let first_row = rows
            .first()
            .map(|r| row_height(&self.wrap_row(r, col_width), TextStyle::TABLE_BODY))
            .unwrap_or(0.0);
        self.ensure_room(header_height + first_row);
        self.draw_row(&header, TextStyle::TABLE_HEAD, col_width, header_height);

        let line = TextStyle::TABLE_BODY.line_height();
        let fresh_page_lines = lines_fitting(self.setup.bottom() - self.setup.margin - header_height, line);

        for row in rows {
            let cells = self.wrap_row(row, col_width);
            let total = cells.iter().map(Vec::len).max().unwrap_or(1).max(1);

            // A row that cannot fit on any page is split line-wise; others
            // move to the next page whole.
            let mut start = 0;
            while start < total {
                let remaining = total - start;
                let mut room = lines_fitting(self.setup.bottom() - self.cursor, line);
                if room < remaining && (room == 0 || remaining <= fresh_page_lines) {
                    self.new_page();
                    self.draw_row(&header, TextStyle::TABLE_HEAD, col_width, header_height);
                    room = lines_fitting(self.setup.bottom() - self.cursor, line).max(1);
                }
                let take = remaining.min(room);
                let chunk: Vec<Vec<String>> = cells
                    .iter()
                    .map(|lines| lines.iter().skip(start).take(take).cloned().collect())
                    .collect();
                let height = take as f32 * line + 2.0 * CELL_PADDING;
                self.draw_row(&chunk, TextStyle::TABLE_BODY, col_width, height);
                start += take;
            }
        }
        self.cursor
    }

    fn wrap_row(&self, row: &[String], col_width: f32) -> Vec<Vec<String>> {
        row.iter()
            .map(|cell| wrap(cell, TextStyle::TABLE_BODY.size, col_width - 2.0 * CELL_PADDING))
            .collect()
    }

    fn draw_row(&mut self, cells: &[Vec<String>], style: TextStyle, col_width: f32, height: f32) {
        let left = self.setup.margin;
        let right = left + col_width * cells.len() as f32;
        let top = self.cursor;
        let bottom = top + height;

        let mut elements = vec![
            Element::Rule { x1: left, y1: top, x2: right, y2: top },
            Element::Rule { x1: left, y1: bottom, x2: right, y2: bottom },
        ];
        for col in 0..=cells.len() {
            let x = left + col_width * col as f32;
            elements.push(Element::Rule { x1: x, y1: top, x2: x, y2: bottom });
        }
        for (col, lines) in cells.iter().enumerate() {
            let x = left + col_width * col as f32 + CELL_PADDING;
            for (i, line) in lines.iter().enumerate() {
                elements.push(Element::Text {
                    x,
                    y: top + CELL_PADDING + style.ascent() + i as f32 * style.line_height(),
                    style,
                    text: line.clone(),
                });
            }
        }

        self.page().elements.extend(elements);
        self.cursor = bottom;
    }

    pub fn finish(self) -> ReportDocument {
        ReportDocument {
            setup: self.setup,
            pages: self.pages,
        }
    }
}

/// Whole body lines that fit in `space` millimetres of a table cell.
fn lines_fitting(space: f32, line_height: f32) -> usize {
    ((space - 2.0 * CELL_PADDING) / line_height).floor().max(0.0) as usize
}

fn row_height(cells: &[Vec<String>], style: TextStyle) -> f32 {
    let lines = cells.iter().map(Vec::len).max().unwrap_or(1).max(1);
    lines as f32 * style.line_height() + 2.0 * CELL_PADDING
}

pub const ACTIVITY_COLUMNS: [&str; 5] = ["Name", "Phone", "Outcome", "Duration", "Status"];

/// Lays out the analytics report. Section order: title, period, summary,
/// calls by status, recent activity table. The snapshot is only read.
pub fn render_report(
    snapshot: &ReportSnapshot,
    range_code: &str,
    title: &str,
    setup: PageSetup,
) -> ReportDocument {
    let mut doc = DocumentBuilder::new(setup);

    doc.text(title, TextStyle::TITLE);
    doc.gap(3.0);
    doc.text(&format!("Report Period: Last {range_code}"), TextStyle::SUBTITLE);
    doc.gap(5.0);

    doc.heading("Summary Statistics", TextStyle::HEADING);
    doc.gap(2.0);
    doc.text(&format!("Total Leads: {}", snapshot.total_leads), TextStyle::BODY);
    doc.text(&format!("Total Calls: {}", snapshot.total_calls), TextStyle::BODY);
    doc.text(&format!("Success Rate: {}%", snapshot.success_rate), TextStyle::BODY);
    doc.text(
        &format!("Average Call Duration: {}s", snapshot.average_call_duration),
        TextStyle::BODY,
    );
    doc.gap(5.0);

    doc.heading("Calls by Status", TextStyle::HEADING);
    doc.gap(2.0);
    for (status, count) in &snapshot.calls_by_status {
        doc.text(&format!("{status}: {count}"), TextStyle::BODY);
    }
    doc.gap(5.0);

    doc.heading("Recent Call Activity", TextStyle::HEADING);
    doc.gap(2.0);
    let rows: Vec<Vec<String>> = snapshot
        .recent_activity
        .iter()
        .map(|a| {
            vec![
                a.name.clone(),
                a.phone.clone(),
                a.outcome.clone(),
                format!("{}s", a.duration_seconds),
                a.status.label().to_string(),
            ]
        })
        .collect();
    doc.table(&ACTIVITY_COLUMNS, &rows);

    doc.finish()
}
