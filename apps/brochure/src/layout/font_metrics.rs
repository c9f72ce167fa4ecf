//! Font metrics for the layout engine.
//!
//! The engine never guesses widths: every measurement goes through a
//! [`FontMetrics`] provider, and a provider failure aborts the layout run.
//!
//! The bundled provider carries the Adobe Font Metrics advance widths of the
//! two standard PDF faces the brochure uses (Helvetica and Helvetica-Bold).
//! Widths are stored in AFM units (1/1000 em) and scaled by the font size.
//! Tables cover ASCII 0x20..=0x7E; index = (char as usize) - 32. A short list
//! of typographic characters (bullet, copyright, dashes, curly quotes) is
//! carried separately; anything else falls back to the face's average width.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::layout::error::LayoutError;

// ────────────────────────────────────────────────────────────────────────────
// Provider boundary
// ────────────────────────────────────────────────────────────────────────────

/// Stroke weight of a run of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Regular,
    Bold,
}

/// Error reported by a metrics provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct MetricsError(pub String);

/// Measures rendered text widths.
///
/// Implementations must be stateless and reentrant: independent documents are
/// laid out concurrently against one shared provider.
pub trait FontMetrics: Send + Sync {
    /// Width of `text` set at `font_size` points, in page units.
    fn measure_width(
        &self,
        text: &str,
        font_size: f32,
        weight: FontWeight,
    ) -> Result<f32, MetricsError>;
}

/// Measures `text` and rejects failures and non-finite or negative widths.
pub fn checked_width(
    metrics: &dyn FontMetrics,
    text: &str,
    font_size: f32,
    weight: FontWeight,
) -> Result<f32, LayoutError> {
    let unavailable = |reason: String| LayoutError::MetricsUnavailable {
        text: text.to_string(),
        font_size,
        reason,
    };

    let width = metrics
        .measure_width(text, font_size, weight)
        .map_err(|e| unavailable(e.to_string()))?;

    if !width.is_finite() {
        return Err(unavailable(format!("provider returned non-finite width {width}")));
    }
    if width < 0.0 {
        return Err(unavailable(format!("provider returned negative width {width}")));
    }
    Ok(width)
}

// ────────────────────────────────────────────────────────────────────────────
// AFM width tables
// ────────────────────────────────────────────────────────────────────────────

/// Static advance-width table for one face.
///
/// Width array slot layout:
/// ```text
/// [0]=sp  [1]=!   [2]="   [3]=#   [4]=$   [5]=%   [6]=&   [7]='
/// [8]=(   [9]=)   [10]=*  [11]=+  [12]=,  [13]=-  [14]=.  [15]=/
/// [16..25]=0-9
/// [26]=:  [27]=;  [28]=<  [29]==  [30]=>  [31]=?  [32]=@
/// [33..58]=A-Z
/// [59]=[  [60]=\  [61]=]  [62]=^  [63]=_  [64]=`
/// [65..90]=a-z
/// [91]={  [92]=|  [93]=}  [94]=~
/// ```
pub struct AfmTable {
    pub name: &'static str,
    widths: [u16; 95],
    /// Width used for characters outside the table and the extended list.
    pub fallback_width: u16,
    bold: bool,
}

/// Typographic characters outside ASCII: `(char, regular, bold)`.
const EXTENDED_WIDTHS: &[(char, u16, u16)] = &[
    ('\u{00A0}', 278, 278), // no-break space
    ('\u{00A9}', 737, 737), // ©
    ('\u{00B0}', 400, 400), // °
    ('\u{2013}', 556, 556), // –
    ('\u{2014}', 1000, 1000), // —
    ('\u{2018}', 222, 278), // ‘
    ('\u{2019}', 222, 278), // ’
    ('\u{201C}', 333, 500), // “
    ('\u{201D}', 333, 500), // ”
    ('\u{2022}', 350, 350), // •
    ('\u{2026}', 1000, 1000), // …
];

impl AfmTable {
    /// Advance width of a single character in AFM units.
    pub fn char_units(&self, c: char) -> u16 {
        let code = c as usize;
        if (32..=126).contains(&code) {
            return self.widths[code - 32];
        }
        EXTENDED_WIDTHS
            .iter()
            .find(|(ch, _, _)| *ch == c)
            .map(|(_, regular, bold)| if self.bold { *bold } else { *regular })
            .unwrap_or(self.fallback_width)
    }

    /// Total advance width of a string in AFM units.
    pub fn measure_units(&self, s: &str) -> u32 {
        s.chars().map(|c| u32::from(self.char_units(c))).sum()
    }
}

static HELVETICA: AfmTable = AfmTable {
    name: "Helvetica",
    #[rustfmt::skip]
    widths: [
        // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
        // 0    1    2    3    4    5    6    7    8    9
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
        // :    ;    <    =    >    ?    @
        278, 278, 584, 584, 584, 556, 1015,
        // A    B    C    D    E    F    G    H    I    J    K    L    M
        667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
        // N    O    P    Q    R    S    T    U    V    W    X    Y    Z
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
        // [    \    ]    ^    _    `
        278, 278, 278, 469, 556, 333,
        // a    b    c    d    e    f    g    h    i    j    k    l    m
        556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
        // n    o    p    q    r    s    t    u    v    w    x    y    z
        556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
        // {    |    }    ~
        334, 260, 334, 584,
    ],
    fallback_width: 556,
    bold: false,
};

static HELVETICA_BOLD: AfmTable = AfmTable {
    name: "Helvetica-Bold",
    #[rustfmt::skip]
    widths: [
        // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
        // 0    1    2    3    4    5    6    7    8    9
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
        // :    ;    <    =    >    ?    @
        333, 333, 584, 584, 584, 611, 975,
        // A    B    C    D    E    F    G    H    I    J    K    L    M
        722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
        // N    O    P    Q    R    S    T    U    V    W    X    Y    Z
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
        // [    \    ]    ^    _    `
        333, 278, 333, 584, 556, 333,
        // a    b    c    d    e    f    g    h    i    j    k    l    m
        556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
        // n    o    p    q    r    s    t    u    v    w    x    y    z
        611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
        // {    |    }    ~
        389, 280, 389, 584,
    ],
    fallback_width: 611,
    bold: true,
};

/// Returns the static table for a weight of the standard Helvetica family.
pub fn helvetica_table(weight: FontWeight) -> &'static AfmTable {
    match weight {
        FontWeight::Regular => &HELVETICA,
        FontWeight::Bold => &HELVETICA_BOLD,
    }
}

/// Metrics provider backed by the standard Helvetica AFM tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardHelvetica;

impl FontMetrics for StandardHelvetica {
    fn measure_width(
        &self,
        text: &str,
        font_size: f32,
        weight: FontWeight,
    ) -> Result<f32, MetricsError> {
        let table = helvetica_table(weight);
        if !font_size.is_finite() || font_size <= 0.0 {
            return Err(MetricsError(format!(
                "{}: unusable font size {font_size}",
                table.name
            )));
        }
        let units = table.measure_units(text);
        Ok(units as f32 / 1000.0 * font_size)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Test providers
// ────────────────────────────────────────────────────────────────────────────


// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::testing::{NotANumber, Unavailable};
    use super::*;

    #[test]
    fn test_measure_empty_is_zero() {
        let width = StandardHelvetica
            .measure_width("", 12.0, FontWeight::Regular)
            .unwrap();
        assert_eq!(width, 0.0);
    }

    #[test]
    fn test_measure_ascii_word() {
        // "Trek" = T(611) + r(333) + e(556) + k(500) = 2000 units → 20pt at 10pt
        let width = StandardHelvetica
            .measure_width("Trek", 10.0, FontWeight::Regular)
            .unwrap();
        assert!((width - 20.0).abs() < 1e-4, "got {width}");
    }

    #[test]
    fn test_bold_is_wider_than_regular() {
        let text = "Detailed Itinerary";
        let regular = StandardHelvetica
            .measure_width(text, 21.0, FontWeight::Regular)
            .unwrap();
        let bold = StandardHelvetica
            .measure_width(text, 21.0, FontWeight::Bold)
            .unwrap();
        assert!(bold > regular, "bold {bold} should exceed regular {regular}");
    }

    #[test]
    fn test_extended_characters_use_their_own_widths() {
        let table = helvetica_table(FontWeight::Regular);
        assert_eq!(table.char_units('\u{2022}'), 350);
        assert_eq!(table.char_units('\u{00A9}'), 737);
        // Not listed → average fallback
        assert_eq!(table.char_units('\u{00E9}'), table.fallback_width);
    }

    #[test]
    fn test_width_scales_linearly_with_size() {
        let small = StandardHelvetica
            .measure_width("Lodging", 10.0, FontWeight::Regular)
            .unwrap();
        let large = StandardHelvetica
            .measure_width("Lodging", 20.0, FontWeight::Regular)
            .unwrap();
        assert!((large - 2.0 * small).abs() < 1e-3);
    }

    #[test]
    fn test_non_finite_font_size_is_rejected() {
        let result = checked_width(&StandardHelvetica, "x", f32::NAN, FontWeight::Regular);
        assert!(matches!(result, Err(LayoutError::MetricsUnavailable { .. })));
    }

    #[test]
    fn test_checked_width_propagates_provider_failure() {
        let err = checked_width(&Unavailable, "Meals", 13.0, FontWeight::Regular).unwrap_err();
        match err {
            LayoutError::MetricsUnavailable { text, reason, .. } => {
                assert_eq!(text, "Meals");
                assert!(reason.contains("offline"));
            }
            other => panic!("expected MetricsUnavailable, got {other:?}"),
        }
    }

    #[test]
    fn test_checked_width_rejects_nan() {
        let result = checked_width(&NotANumber, "Meals", 13.0, FontWeight::Regular);
        assert!(matches!(result, Err(LayoutError::MetricsUnavailable { .. })));
    }
}
