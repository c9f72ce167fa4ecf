//! Two-pass composition: content layout, then furniture over the finished
//! page sequence. The output is what a fixed-page emitter consumes.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::layout::engine::layout;
use crate::layout::error::LayoutError;
use crate::layout::font_metrics::FontMetrics;
use crate::layout::furniture::{stamp_furniture, FurnitureStyle, Masthead};
use crate::layout::geometry::{LayoutStyle, PageGeometry};
use crate::layout::model::{DrawInstruction, Document};

/// One finished page: content first, then furniture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComposedPage {
    pub index: usize,
    pub instructions: Vec<DrawInstruction>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComposedDocument {
    pub geometry: PageGeometry,
    pub page_count: usize,
    pub pages: Vec<ComposedPage>,
}

/// Everything besides the document that shapes the printed result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComposeSettings {
    pub geometry: PageGeometry,
    #[serde(default)]
    pub style: LayoutStyle,
    #[serde(default)]
    pub furniture: FurnitureStyle,
}

pub fn compose(
    document: &Document,
    settings: &ComposeSettings,
    masthead: &Masthead,
    metrics: &dyn FontMetrics,
) -> Result<ComposedDocument, LayoutError> {
    let pass_one = layout(document, &settings.geometry, &settings.style, metrics)?;
    let furniture = stamp_furniture(&pass_one.pages, masthead, &settings.furniture, metrics)?;

    let page_count = pass_one.page_count();
    let mut pages: Vec<ComposedPage> = pass_one
        .pages
        .into_iter()
        .map(|page| ComposedPage {
            index: page.index,
            instructions: page.instructions,
        })
        .collect();

    // Furniture arrives grouped by page in ascending order.
    for instruction in furniture {
        if let Some(page) = pages.get_mut(instruction.page_index() - 1) {
            page.instructions.push(instruction);
        }
    }

    info!(
        title = %document.title,
        pages = page_count,
        "Brochure composed"
    );

    Ok(ComposedDocument {
        geometry: settings.geometry,
        page_count,
        pages,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::font_metrics::StandardHelvetica;
    use crate::layout::furniture::HeaderMode;
    use crate::layout::normalize::{normalize, NormalizeOptions};
    use crate::models::{ItineraryEntry, PackageData, PriceTier};

    fn settings() -> ComposeSettings {
        ComposeSettings {
            geometry: PageGeometry {
                page_width: 595.28,
                page_height: 841.89,
                margin_top: 30.0,
                margin_bottom: 30.0,
                margin_left: 50.0,
                margin_right: 50.0,
                header_reserve: 50.0,
                footer_reserve: 20.0,
                line_height: 20.0,
            },
            style: LayoutStyle::default(),
            furniture: FurnitureStyle::default(),
        }
    }

    fn masthead(title: &str) -> Masthead {
        Masthead {
            title: title.to_string(),
            site_label: "www.example-treks.com".to_string(),
            company_name: "Example Treks".to_string(),
            year: 2026,
            mode: HeaderMode::Titled,
        }
    }

    fn everest_package(days: usize) -> PackageData {
        PackageData {
            title: Some("Everest Base Camp".to_string()),
            duration_type: Some("days".to_string()),
            price: Some(1450.0),
            pricegroup: vec![PriceTier {
                min_people: 2,
                max_people: 5,
                unit_price: 1300.0,
                ..PriceTier::default()
            }],
            itinerary: (1..=days)
                .map(|d| ItineraryEntry {
                    itinerary_title: Some(format!("Trek stage {d}")),
                    itinerary_description: Some(
                        "<p>Walk along the Dudh Koshi river through pine forest, cross \
                         suspension bridges and climb steadily to the next village where \
                         the tea house overlooks the valley.</p>"
                            .to_string(),
                    ),
                })
                .collect(),
            const_include: Some("<ul><li>Meals</li><li>Lodging</li></ul>".to_string()),
            ..PackageData::default()
        }
    }

    #[test]
    fn test_page_markers_use_final_count() {
        let package = everest_package(20);
        let document = normalize(&package, &NormalizeOptions::default());
        let composed = compose(
            &document,
            &settings(),
            &masthead(&document.title),
            &StandardHelvetica,
        )
        .unwrap();

        assert!(composed.page_count > 1);
        assert_eq!(composed.pages.len(), composed.page_count);
        for page in &composed.pages {
            let markers: Vec<&str> = page
                .instructions
                .iter()
                .filter_map(|i| i.text())
                .filter(|t| t.starts_with("Page "))
                .collect();
            assert_eq!(
                markers,
                vec![format!("Page {} of {}", page.index, composed.page_count)]
            );
        }
    }

    #[test]
    fn test_furniture_follows_content_on_each_page() {
        let document = normalize(&everest_package(2), &NormalizeOptions::default());
        let composed = compose(
            &document,
            &settings(),
            &masthead(&document.title),
            &StandardHelvetica,
        )
        .unwrap();
        let page = &composed.pages[0];
        assert_eq!(page.instructions.first().and_then(|i| i.text()), Some("Everest Base Camp"));
        assert!(page
            .instructions
            .last()
            .and_then(|i| i.text())
            .is_some_and(|t| t == "Page 1 of 1"));
        assert!(page.instructions.iter().all(|i| i.page_index() == 1));
    }

    #[test]
    fn test_compose_is_idempotent() {
        let document = normalize(&everest_package(12), &NormalizeOptions::default());
        let first = compose(&document, &settings(), &masthead("x"), &StandardHelvetica).unwrap();
        let second = compose(&document, &settings(), &masthead("x"), &StandardHelvetica).unwrap();
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_invalid_geometry_surfaces() {
        let mut bad = settings();
        bad.geometry.page_height = 100.0;
        let result = compose(
            &Document::default(),
            &bad,
            &masthead(""),
            &StandardHelvetica,
        );
        assert!(matches!(result, Err(LayoutError::GeometryInvalid(_))));
    }
}
