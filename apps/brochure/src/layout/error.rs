use thiserror::Error;

/// Failures that abort a layout run.
///
/// Missing content is never an error here: the normalizer substitutes empty
/// text and keeps going. Only conditions that would silently corrupt
/// pagination are reported.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// The metrics provider failed, or returned a width that is not a finite,
    /// non-negative number.
    #[error("font metrics unavailable for {text:?} at {font_size}pt: {reason}")]
    MetricsUnavailable {
        text: String,
        font_size: f32,
        reason: String,
    },

    /// Page geometry leaves no room for content. Raised before any page exists.
    #[error("invalid page geometry: {0}")]
    GeometryInvalid(String),
}
