// Brochure layout: text measurement, wrapping, content normalization,
// pagination (pass 1) and page furniture (pass 2).
// Composition is CPU-bound; handlers run it inside tokio::task::spawn_blocking.

pub mod compose;
pub mod engine;
pub mod error;
pub mod font_metrics;
pub mod furniture;
pub mod geometry;
pub mod markup;
pub mod model;
pub mod normalize;
pub mod wrap;

// Re-export the public API consumed by the handlers.
pub use compose::{compose, ComposeSettings, ComposedDocument};
pub use error::LayoutError;
pub use font_metrics::{FontMetrics, StandardHelvetica};
pub use furniture::{FurnitureStyle, HeaderMode, Masthead};
pub use geometry::{LayoutStyle, PageGeometry};
pub use model::Document;
pub use normalize::{normalize, NormalizeOptions};
