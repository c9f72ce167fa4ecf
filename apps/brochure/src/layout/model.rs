//! Document model shared by the normalizer, the pagination engine and the
//! furniture pass.

use serde::{Deserialize, Serialize};

use crate::layout::font_metrics::FontWeight;
use crate::layout::geometry::PageGeometry;

// ────────────────────────────────────────────────────────────────────────────
// Content
// ────────────────────────────────────────────────────────────────────────────

/// Whether itinerary entries are counted in days or in generic steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepUnit {
    Day,
    Step,
}

impl StepUnit {
    pub fn label(self) -> &'static str {
        match self {
            StepUnit::Day => "Day",
            StepUnit::Step => "Step",
        }
    }
}

/// One atomic unit of layout input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    Heading { text: String },
    Paragraph { text: String },
    /// Items carry no glyph; the engine prefixes one when placing them.
    BulletList { items: Vec<String> },
    KeyValueLine { text: String },
    /// Emphasised single statement, e.g. the "From: …" price line.
    Headline { text: String },
    ItineraryStep {
        index: usize,
        unit: StepUnit,
        title: String,
        description: String,
    },
}

impl Block {
    pub fn heading(text: impl Into<String>) -> Self {
        Block::Heading { text: text.into() }
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Block::Paragraph { text: text.into() }
    }

    pub fn key_value(text: impl Into<String>) -> Self {
        Block::KeyValueLine { text: text.into() }
    }

    pub fn headline(text: impl Into<String>) -> Self {
        Block::Headline { text: text.into() }
    }
}

/// Normalized brochure content, immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub title: String,
    pub blocks: Vec<Block>,
}

/// A wrapped run of text, the smallest unit the engine places.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub text: String,
    pub font_size: f32,
    pub weight: FontWeight,
    /// Horizontal offset from the left margin.
    pub indent: f32,
}

impl Line {
    pub fn indented(mut self, indent: f32) -> Self {
        self.indent = indent;
        self
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Output
// ────────────────────────────────────────────────────────────────────────────

/// A fully resolved drawing operation. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawInstruction {
    Text {
        page_index: usize,
        x: f32,
        /// Baseline, measured up from the bottom edge of the page.
        y: f32,
        text: String,
        font_size: f32,
        font_weight: FontWeight,
    },
    /// Horizontal stroke from `x_start` to `x_end`.
    Rule {
        page_index: usize,
        x_start: f32,
        x_end: f32,
        y: f32,
        thickness: f32,
    },
}

impl DrawInstruction {
    pub fn page_index(&self) -> usize {
        match self {
            DrawInstruction::Text { page_index, .. } | DrawInstruction::Rule { page_index, .. } => {
                *page_index
            }
        }
    }

    #[cfg(test)]
    pub fn y(&self) -> f32 {
        match self {
            DrawInstruction::Text { y, .. } | DrawInstruction::Rule { y, .. } => *y,
        }
    }

    /// The drawn string, for text instructions.
    #[cfg(test)]
    pub fn text(&self) -> Option<&str> {
        match self {
            DrawInstruction::Text { text, .. } => Some(text),
            DrawInstruction::Rule { .. } => None,
        }
    }
}

/// A page produced by the pagination pass, holding its content instructions
/// in reading order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// 1-based.
    pub index: usize,
    pub geometry: PageGeometry,
    pub instructions: Vec<DrawInstruction>,
}

impl Page {
    pub fn new(index: usize, geometry: PageGeometry) -> Self {
        Self {
            index,
            geometry,
            instructions: Vec::new(),
        }
    }
}
