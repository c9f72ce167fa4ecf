//! Pagination engine — pass 1 of brochure composition.
//!
//! # State machine
//! The engine owns a single write cursor `(page, y)` that starts at the content
//! top of page 1 and only ever moves down the page:
//! - a line is placed where the cursor is if at least one line height remains
//!   above the content floor, otherwise a new page is started first;
//! - a heading requires the heading reserve instead of one line height;
//! - gaps after items, paragraphs and itinerary steps move the cursor without
//!   any check, the next placement decides whether a break is due.
//!
//! A page break never revisits the previous page: whatever triggered it is
//! placed at the top of the fresh page. There is no look-ahead, so a heading
//! can end a page with its body starting on the next one.
//!
//! Furniture (header, footer, page numbers) is not drawn here; the page count
//! is only known once this pass finishes. See `furniture`.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::layout::error::LayoutError;
use crate::layout::font_metrics::{FontMetrics, FontWeight};
use crate::layout::geometry::{LayoutStyle, PageGeometry};
use crate::layout::model::{Block, DrawInstruction, Document, Line, Page};
use crate::layout::wrap::{wrap, wrap_styled};

/// Write position. Lives only for the duration of one layout run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor {
    /// 1-based index of the page being written.
    pub page: usize,
    /// Baseline of the next placement.
    pub y: f32,
}

/// Result of pass 1: every page with its content instructions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub pages: Vec<Page>,
}

impl Layout {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Content instructions across all pages in document order.
    pub fn instructions(&self) -> impl Iterator<Item = &DrawInstruction> {
        self.pages.iter().flat_map(|p| p.instructions.iter())
    }
}

/// Lays a document out onto pages.
///
/// Geometry is validated before any page is created.
pub fn layout(
    document: &Document,
    geometry: &PageGeometry,
    style: &LayoutStyle,
    metrics: &dyn FontMetrics,
) -> Result<Layout, LayoutError> {
    geometry.validate(style.tallest_step(geometry))?;
    style.validate(geometry)?;

    let mut engine = PaginationEngine::new(*geometry, style, metrics);
    engine.place_title(&document.title)?;
    for block in &document.blocks {
        engine.place_block(block)?;
    }

    let layout = engine.finish();
    debug!(
        pages = layout.page_count(),
        blocks = document.blocks.len(),
        instructions = layout.instructions().count(),
        "Pagination pass complete"
    );
    Ok(layout)
}

struct PaginationEngine<'a> {
    geometry: PageGeometry,
    style: &'a LayoutStyle,
    metrics: &'a dyn FontMetrics,
    pages: Vec<Page>,
    cursor: Cursor,
}

impl<'a> PaginationEngine<'a> {
    fn new(geometry: PageGeometry, style: &'a LayoutStyle, metrics: &'a dyn FontMetrics) -> Self {
        Self {
            geometry,
            style,
            metrics,
            pages: vec![Page::new(1, geometry)],
            cursor: Cursor {
                page: 1,
                y: geometry.content_top(),
            },
        }
    }

    /// Hands back the pages; the cursor is dropped.
    fn finish(self) -> Layout {
        Layout { pages: self.pages }
    }

    // ── Cursor primitives ───────────────────────────────────────────────────

    fn remaining(&self) -> f32 {
        self.cursor.y - self.geometry.content_floor()
    }

    fn new_page(&mut self) {
        let index = self.cursor.page + 1;
        debug!(page = index, "Starting new page");
        self.pages.push(Page::new(index, self.geometry));
        self.cursor = Cursor {
            page: index,
            y: self.geometry.content_top(),
        };
    }

    fn ensure_room(&mut self, required: f32) {
        if self.remaining() < required {
            self.new_page();
        }
    }

    fn advance(&mut self, amount: f32) {
        self.cursor.y -= amount;
    }

    fn emit(&mut self, x: f32, text: &str, font_size: f32, font_weight: FontWeight) {
        let instruction = DrawInstruction::Text {
            page_index: self.cursor.page,
            x,
            y: self.cursor.y,
            text: text.to_string(),
            font_size,
            font_weight,
        };
        // The current page is always the last one pushed.
        if let Some(page) = self.pages.last_mut() {
            page.instructions.push(instruction);
        }
    }

    // ── Placement rules ─────────────────────────────────────────────────────

    /// Places one line at the cursor, breaking first if fewer than `advance`
    /// units remain.
    fn place_line_with(&mut self, line: &Line, advance: f32) {
        self.ensure_room(advance);
        let x = self.geometry.margin_left + line.indent;
        self.emit(x, &line.text, line.font_size, line.weight);
        self.advance(advance);
    }

    fn place_line(&mut self, line: &Line) {
        self.place_line_with(line, self.geometry.line_height);
    }

    /// Wraps `text` against the width left after `indent` and places every line.
    fn place_text(
        &mut self,
        text: &str,
        font_size: f32,
        indent: f32,
    ) -> Result<(), LayoutError> {
        let width = self.geometry.usable_width() - indent;
        for line in wrap(text, font_size, width, self.metrics)? {
            self.place_line(&line.indented(indent));
        }
        Ok(())
    }

    fn place_title(&mut self, title: &str) -> Result<(), LayoutError> {
        let lines = wrap_styled(
            title,
            self.style.title_size,
            FontWeight::Bold,
            self.geometry.usable_width(),
            self.metrics,
        )?;
        if lines.is_empty() {
            return Ok(());
        }
        for line in &lines {
            self.place_line_with(line, self.style.title_leading);
        }
        self.advance(self.style.title_gap);
        Ok(())
    }

    fn place_heading(&mut self, text: &str) {
        let required = self.style.heading_reserve.max(self.style.heading_lead);
        self.ensure_room(required);
        self.advance(self.style.heading_lead);
        self.emit(
            self.geometry.margin_left,
            text,
            self.style.heading_size,
            FontWeight::Bold,
        );
        self.advance(self.style.heading_advance);
    }

    fn place_block(&mut self, block: &Block) -> Result<(), LayoutError> {
        let style = self.style;
        match block {
            Block::Heading { text } => self.place_heading(text),

            Block::Paragraph { text } => {
                self.place_text(text, style.body_size, 0.0)?;
                self.advance(style.paragraph_gap);
            }

            Block::BulletList { items } => {
                for item in items {
                    let bulleted = format!("{} {item}", style.bullet_glyph);
                    self.place_text(&bulleted, style.body_size, style.list_indent)?;
                    self.advance(style.item_gap);
                }
            }

            Block::KeyValueLine { text } => {
                self.place_text(text, style.body_size, style.key_value_indent)?;
            }

            Block::Headline { text } => {
                self.place_text(text, style.headline_size, style.key_value_indent)?;
            }

            Block::ItineraryStep {
                index,
                unit,
                title,
                description,
            } => {
                let heading = format!("{} {index}: {title}", unit.label());
                self.place_text(heading.trim_end(), style.step_title_size, 0.0)?;
                self.place_text(description, style.body_size, style.step_indent)?;
                self.advance(style.step_gap);
            }
        }
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
