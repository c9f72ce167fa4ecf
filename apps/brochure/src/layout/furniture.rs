//! Page furniture — pass 2 of brochure composition.
//!
//! The footer reads "Page i of N", and N is only known once pagination has
//! finished, so furniture is stamped in a separate pass over the finished
//! page sequence. Each page receives exactly one stamp:
//! - the site identity, left-aligned at the top margin;
//! - in [`HeaderMode::Titled`], the document title centred below it;
//! - a thin rule across the content width just above the footer text;
//! - a copyright line, left-aligned on the bottom margin;
//! - the page marker, right-aligned on the bottom margin.

use serde::{Deserialize, Serialize};

use crate::layout::error::LayoutError;
use crate::layout::font_metrics::{checked_width, FontMetrics, FontWeight};
use crate::layout::model::{DrawInstruction, Page};

/// Which header variant every page carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderMode {
    /// Site identity only.
    #[default]
    Site,
    /// Site identity plus the centred document title.
    Titled,
}

/// Identity printed on every page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Masthead {
    pub title: String,
    pub site_label: String,
    pub company_name: String,
    pub year: i32,
    pub mode: HeaderMode,
}

impl Masthead {
    pub fn copyright(&self) -> String {
        format!(
            "\u{00A9} {} {}. All rights reserved.",
            self.year, self.company_name
        )
    }
}

/// Sizes and offsets of the furniture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FurnitureStyle {
    pub header_size: f32,
    pub title_size: f32,
    /// Distance of the title baseline below the header baseline.
    pub title_drop: f32,
    pub footer_size: f32,
    /// Height of the rule above the bottom margin.
    pub rule_offset: f32,
    pub rule_thickness: f32,
}

impl Default for FurnitureStyle {
    fn default() -> Self {
        Self {
            header_size: 10.0,
            title_size: 14.0,
            title_drop: 20.0,
            footer_size: 8.0,
            rule_offset: 12.0,
            rule_thickness: 0.5,
        }
    }
}

pub fn page_marker(index: usize, total: usize) -> String {
    format!("Page {index} of {total}")
}

/// Produces the furniture instructions for every page, in page order.
///
/// `N` is the index of the last page, which pass 1 guarantees equals the
/// number of pages.
pub fn stamp_furniture(
    pages: &[Page],
    masthead: &Masthead,
    style: &FurnitureStyle,
    metrics: &dyn FontMetrics,
) -> Result<Vec<DrawInstruction>, LayoutError> {
    let total = pages.last().map(|p| p.index).unwrap_or(0);
    let copyright = masthead.copyright();
    let mut stamped = Vec::with_capacity(pages.len() * 5);

    for page in pages {
        stamped.extend(stamp_page(page, total, masthead, &copyright, style, metrics)?);
    }

    Ok(stamped)
}

fn stamp_page(
    page: &Page,
    total: usize,
    masthead: &Masthead,
    copyright: &str,
    style: &FurnitureStyle,
    metrics: &dyn FontMetrics,
) -> Result<Vec<DrawInstruction>, LayoutError> {
    let g = &page.geometry;
    let left = g.margin_left;
    let right = g.page_width - g.margin_right;
    let header_y = g.page_height - g.margin_top;

    let text = |x: f32, y: f32, text: &str, font_size: f32, font_weight: FontWeight| {
        DrawInstruction::Text {
            page_index: page.index,
            x,
            y,
            text: text.to_string(),
            font_size,
            font_weight,
        }
    };

    let mut out = Vec::with_capacity(5);

    if !masthead.site_label.is_empty() {
        out.push(text(
            left,
            header_y,
            &masthead.site_label,
            style.header_size,
            FontWeight::Regular,
        ));
    }

    if masthead.mode == HeaderMode::Titled && !masthead.title.is_empty() {
        let width = checked_width(metrics, &masthead.title, style.title_size, FontWeight::Bold)?;
        let x = ((g.page_width - width) / 2.0).max(left);
        out.push(text(
            x,
            header_y - style.title_drop,
            &masthead.title,
            style.title_size,
            FontWeight::Bold,
        ));
    }

    out.push(DrawInstruction::Rule {
        page_index: page.index,
        x_start: left,
        x_end: right,
        y: g.margin_bottom + style.rule_offset,
        thickness: style.rule_thickness,
    });

    out.push(text(
        left,
        g.margin_bottom,
        copyright,
        style.footer_size,
        FontWeight::Regular,
    ));

    let marker = page_marker(page.index, total);
    let marker_width = checked_width(metrics, &marker, style.footer_size, FontWeight::Regular)?;
    out.push(text(
        (right - marker_width).max(left),
        g.margin_bottom,
        &marker,
        style.footer_size,
        FontWeight::Regular,
    ));

    Ok(out)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
