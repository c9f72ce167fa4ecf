//! Page geometry and typographic constants.
//!
//! All lengths are PDF points with the origin at the bottom-left corner, so the
//! write cursor moves *down* the page by decreasing `y`.

use serde::{Deserialize, Serialize};

use crate::layout::error::LayoutError;

// ────────────────────────────────────────────────────────────────────────────
// Page geometry
// ────────────────────────────────────────────────────────────────────────────

/// Fixed page dimensions. Every field is required; the engine assumes no
/// defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub page_width: f32,
    pub page_height: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
    pub margin_left: f32,
    pub margin_right: f32,
    /// Space kept free below the top margin for the site header.
    pub header_reserve: f32,
    /// Space kept free above the bottom margin for the footer.
    pub footer_reserve: f32,
    pub line_height: f32,
}

impl PageGeometry {
    pub fn usable_width(&self) -> f32 {
        self.page_width - self.margin_left - self.margin_right
    }

    /// Cursor position at the top of a fresh page.
    pub fn content_top(&self) -> f32 {
        self.page_height - self.margin_top - self.header_reserve
    }

    /// Lowest baseline content may occupy.
    pub fn content_floor(&self) -> f32 {
        self.margin_bottom + self.footer_reserve
    }

    pub fn usable_height(&self) -> f32 {
        self.content_top() - self.content_floor()
    }

    /// Rejects geometry that leaves no room to write.
    ///
    /// `tallest_step` is the largest vertical space a single placement may
    /// require; a fresh page must always accommodate it or pagination would
    /// never make progress.
    pub fn validate(&self, tallest_step: f32) -> Result<(), LayoutError> {
        let fields = [
            ("page_width", self.page_width),
            ("page_height", self.page_height),
            ("margin_top", self.margin_top),
            ("margin_bottom", self.margin_bottom),
            ("margin_left", self.margin_left),
            ("margin_right", self.margin_right),
            ("header_reserve", self.header_reserve),
            ("footer_reserve", self.footer_reserve),
            ("line_height", self.line_height),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(LayoutError::GeometryInvalid(format!(
                    "{name} must be a finite, non-negative number (got {value})"
                )));
            }
        }

        if self.line_height <= 0.0 {
            return Err(LayoutError::GeometryInvalid(
                "line_height must be positive".to_string(),
            ));
        }
        if self.usable_width() <= 0.0 {
            return Err(LayoutError::GeometryInvalid(format!(
                "usable width is {} (page width {} minus margins {} + {})",
                self.usable_width(),
                self.page_width,
                self.margin_left,
                self.margin_right
            )));
        }
        if self.usable_height() <= 0.0 {
            return Err(LayoutError::GeometryInvalid(format!(
                "usable height is {} after margins and header/footer reserves",
                self.usable_height()
            )));
        }
        if self.usable_height() < tallest_step {
            return Err(LayoutError::GeometryInvalid(format!(
                "usable height {} cannot hold a single {} pt placement",
                self.usable_height(),
                tallest_step
            )));
        }
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Typography
// ────────────────────────────────────────────────────────────────────────────

/// Sizes, indents and gaps used while flowing content.
///
/// Defaults reproduce the printed brochure: Helvetica body at 13pt, 21pt bold
/// section headings, 26pt bold document title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutStyle {
    pub title_size: f32,
    /// Vertical advance per wrapped title line.
    pub title_leading: f32,
    /// Extra space after the last title line.
    pub title_gap: f32,

    pub heading_size: f32,
    /// Space above a heading baseline.
    pub heading_lead: f32,
    /// Space below a heading baseline.
    pub heading_advance: f32,
    /// Minimum remaining space before a heading may start on the current page.
    pub heading_reserve: f32,

    pub body_size: f32,
    pub headline_size: f32,
    pub key_value_indent: f32,

    pub list_indent: f32,
    pub bullet_glyph: String,
    pub item_gap: f32,
    pub paragraph_gap: f32,

    pub step_title_size: f32,
    pub step_indent: f32,
    pub step_gap: f32,
}

impl Default for LayoutStyle {
    fn default() -> Self {
        Self {
            title_size: 26.0,
            title_leading: 30.0,
            title_gap: 20.0,
            heading_size: 21.0,
            heading_lead: 20.0,
            heading_advance: 40.0,
            heading_reserve: 40.0,
            body_size: 13.0,
            headline_size: 16.0,
            key_value_indent: 10.0,
            list_indent: 10.0,
            bullet_glyph: "\u{2022}".to_string(),
            item_gap: 2.0,
            paragraph_gap: 8.0,
            step_title_size: 16.0,
            step_indent: 10.0,
            step_gap: 15.0,
        }
    }
}

impl LayoutStyle {
    /// Largest space a single placement can demand of a fresh page.
    pub fn tallest_step(&self, geometry: &PageGeometry) -> f32 {
        geometry
            .line_height
            .max(self.heading_reserve)
            .max(self.heading_lead)
            .max(self.title_leading)
    }

    /// Rejects styles that would move the cursor up the page, set text at a
    /// non-positive size or indent it past the right margin.
    pub fn validate(&self, geometry: &PageGeometry) -> Result<(), LayoutError> {
        let sizes = [
            ("title_size", self.title_size),
            ("heading_size", self.heading_size),
            ("body_size", self.body_size),
            ("headline_size", self.headline_size),
            ("step_title_size", self.step_title_size),
        ];
        for (name, value) in sizes {
            if !value.is_finite() || value <= 0.0 {
                return Err(LayoutError::GeometryInvalid(format!(
                    "{name} must be a finite, positive number (got {value})"
                )));
            }
        }

        let spacing = [
            ("title_leading", self.title_leading),
            ("title_gap", self.title_gap),
            ("heading_lead", self.heading_lead),
            ("heading_advance", self.heading_advance),
            ("heading_reserve", self.heading_reserve),
            ("item_gap", self.item_gap),
            ("paragraph_gap", self.paragraph_gap),
            ("step_gap", self.step_gap),
        ];
        for (name, value) in spacing {
            if !value.is_finite() || value < 0.0 {
                return Err(LayoutError::GeometryInvalid(format!(
                    "{name} must be a finite, non-negative number (got {value})"
                )));
            }
        }

        let usable_width = geometry.usable_width();
        let indents = [
            ("key_value_indent", self.key_value_indent),
            ("list_indent", self.list_indent),
            ("step_indent", self.step_indent),
        ];
        for (name, value) in indents {
            if !value.is_finite() || value < 0.0 || value >= usable_width {
                return Err(LayoutError::GeometryInvalid(format!(
                    "{name} must be non-negative and below the usable width {usable_width} (got {value})"
                )));
            }
        }
        Ok(())
    }
}
