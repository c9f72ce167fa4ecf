//! Content normalization: package data → ordered, typed layout blocks.
//!
//! # Section order
//! Package Overview → Package Information → Pricing Information → Highlights →
//! Overview → Detailed Itinerary → What's Included → What's Not Included →
//! Good to Know Before. A section without content emits nothing, not even its
//! heading.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::layout::markup::{classify, strip_tags, FreeText};
use crate::layout::model::{Block, Document, StepUnit};
use crate::models::{NamedRef, PackageData, PriceTier, Scalar};

pub const DEFAULT_CURRENCY: &str = "US$";

/// Caller-chosen presentation details for the normalized text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeOptions {
    /// Label printed before every amount.
    pub currency: String,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

/// Builds the brochure document for a package.
pub fn normalize(package: &PackageData, options: &NormalizeOptions) -> Document {
    let mut blocks = Vec::new();

    push_section(
        &mut blocks,
        "Package Overview",
        free_text_blocks(package.package_abstract.as_deref()),
    );
    push_section(
        &mut blocks,
        "Package Information",
        package_info_blocks(package),
    );
    push_section(
        &mut blocks,
        "Pricing Information",
        pricing_blocks(package, &options.currency),
    );
    push_section(
        &mut blocks,
        "Highlights",
        free_text_blocks(package.package_highlights.as_deref()),
    );
    push_section(
        &mut blocks,
        "Overview",
        free_text_blocks(package.package_details.as_deref()),
    );
    push_section(&mut blocks, "Detailed Itinerary", itinerary_blocks(package));
    push_section(
        &mut blocks,
        "What's Included",
        free_text_blocks(package.const_include.as_deref()),
    );
    push_section(
        &mut blocks,
        "What's Not Included",
        free_text_blocks(package.cost_exclude.as_deref()),
    );
    push_section(
        &mut blocks,
        "Good to Know Before",
        free_text_blocks(package.package_trip_info.as_deref()),
    );

    Document {
        title: package.title.clone().unwrap_or_default(),
        blocks,
    }
}

fn push_section(blocks: &mut Vec<Block>, heading: &str, content: Vec<Block>) {
    if content.is_empty() {
        return;
    }
    blocks.push(Block::heading(heading));
    blocks.extend(content);
}

// ────────────────────────────────────────────────────────────────────────────
// Section builders
// ────────────────────────────────────────────────────────────────────────────

fn free_text_blocks(raw: Option<&str>) -> Vec<Block> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    let classified = classify(raw);
    if classified.is_empty() {
        return Vec::new();
    }

    match classified {
        FreeText::List(items) => vec![Block::BulletList { items }],
        FreeText::Paragraphs(paragraphs) => {
            paragraphs.into_iter().map(Block::paragraph).collect()
        }
    }
}

fn package_info_blocks(package: &PackageData) -> Vec<Block> {
    let duration_unit = package.duration_type.as_deref().unwrap_or("").trim();

    let lines = [
        NamedRef::present(&package.destination).map(|d| format!("Destination: {d}")),
        Scalar::present(&package.package_duration)
            .map(|d| format!("Duration: {d} {duration_unit}").trim_end().to_string()),
        NamedRef::present(&package.grade).map(|g| format!("Trip Difficulty: {g}")),
        NamedRef::present(&package.style).map(|s| format!("Activity: {s}")),
        NamedRef::present(&package.accommodation).map(|a| format!("Accommodation: {a}")),
        Scalar::present(&package.package_max_altitude).map(|a| format!("Max Elevation: {a}m")),
        NamedRef::present(&package.transportation).map(|t| format!("Transportation: {t}")),
        Scalar::present(&package.package_group_size)
            .map(|g| format!("Group Size: Min. {g} Pax")),
        non_blank(package.bestseason.as_deref()).map(|s| format!("Best Season: {s}")),
    ];

    lines.into_iter().flatten().map(Block::key_value).collect()
}

fn pricing_blocks(package: &PackageData, currency: &str) -> Vec<Block> {
    let mut blocks = Vec::new();

    if let Some(price) = package.price.filter(|p| p.is_finite() && *p > 0.0) {
        blocks.push(Block::headline(format!(
            "From: {currency} {price} per person"
        )));
    }

    if !package.pricegroup.is_empty() {
        blocks.push(Block::key_value("Group Discount Available:"));
        blocks.extend(
            package
                .pricegroup
                .iter()
                .map(|tier| Block::key_value(tier_line(tier, currency))),
        );
    }

    blocks
}

/// `"1 Person: US$ 100"`, `"2-5 People: US$ 80"`, with an offer suffix when the
/// tier is discounted.
pub fn tier_line(tier: &PriceTier, currency: &str) -> String {
    let people = if tier.min_people == tier.max_people {
        if tier.min_people == 1 {
            "1 Person".to_string()
        } else {
            format!("{} People", tier.min_people)
        }
    } else {
        format!("{}-{} People", tier.min_people, tier.max_people)
    };

    let mut line = format!("{people}: {currency} {}", tier.unit_price);

    if let Some(offer) = tier
        .offer_unit_price
        .filter(|o| o.is_finite() && *o > 0.0 && *o < tier.unit_price)
    {
        line.push_str(&format!(" (offer {currency} {offer}"));
        if let Some(label) = non_blank(tier.offer_label.as_deref()) {
            line.push_str(&format!(" \u{2013} {label}"));
        }
        line.push(')');
    }

    line
}

fn itinerary_blocks(package: &PackageData) -> Vec<Block> {
    let unit = match package.duration_type.as_deref().map(str::trim) {
        Some(t) if t.eq_ignore_ascii_case("days") || t.eq_ignore_ascii_case("day") => {
            StepUnit::Day
        }
        _ => StepUnit::Step,
    };

    let incomplete = incomplete_step_count(package);
    if incomplete > 0 {
        warn!(
            incomplete,
            total = package.itinerary.len(),
            "Itinerary steps missing a title or description"
        );
    }

    package
        .itinerary
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let index = i + 1;
            let title = entry.itinerary_title.as_deref().map(strip_tags);
            let description = entry.itinerary_description.as_deref().map(strip_tags);
            if title.is_none() || description.is_none() {
                debug!(
                    step = index,
                    missing_title = title.is_none(),
                    missing_description = description.is_none(),
                    "Itinerary step incomplete; substituting empty text"
                );
            }
            Block::ItineraryStep {
                index,
                unit,
                title: title.map(|t| t.trim().to_string()).unwrap_or_default(),
                description: description.map(|d| d.trim().to_string()).unwrap_or_default(),
            }
        })
        .collect()
}

/// Steps whose title or description will be substituted with empty text.
fn incomplete_step_count(package: &PackageData) -> usize {
    package
        .itinerary
        .iter()
        .filter(|e| e.itinerary_title.is_none() || e.itinerary_description.is_none())
        .count()
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ItineraryEntry;

    fn headings(doc: &Document) -> Vec<&str> {
        doc.blocks
            .iter()
            .filter_map(|b| match b {
                Block::Heading { text } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    fn named(title: &str) -> Option<NamedRef> {
        Some(NamedRef {
            title: Some(title.to_string()),
        })
    }

    fn tier(min: u32, max: u32, price: f64) -> PriceTier {
        PriceTier {
            min_people: min,
            max_people: max,
            unit_price: price,
            ..PriceTier::default()
        }
    }

    #[test]
    fn test_empty_package_yields_empty_document() {
        let doc = normalize(&PackageData::default(), &NormalizeOptions::default());
        assert_eq!(doc.title, "");
        assert!(doc.blocks.is_empty());
    }

    #[test]
    fn test_inclusions_list_becomes_bullet_list() {
        let package = PackageData {
            const_include: Some("<ul><li>Meals</li><li>Lodging</li></ul>".to_string()),
            ..PackageData::default()
        };
        let doc = normalize(&package, &NormalizeOptions::default());
        assert_eq!(
            doc.blocks,
            vec![
                Block::heading("What's Included"),
                Block::BulletList {
                    items: vec!["Meals".to_string(), "Lodging".to_string()]
                },
            ]
        );
    }

    #[test]
    fn test_pricing_tiers_render_verbatim() {
        let package = PackageData {
            pricegroup: vec![tier(1, 1, 100.0), tier(2, 5, 80.0)],
            ..PackageData::default()
        };
        let doc = normalize(&package, &NormalizeOptions::default());
        assert_eq!(
            doc.blocks,
            vec![
                Block::heading("Pricing Information"),
                Block::key_value("Group Discount Available:"),
                Block::key_value("1 Person: US$ 100"),
                Block::key_value("2-5 People: US$ 80"),
            ]
        );
    }

    #[test]
    fn test_price_headline_precedes_tiers() {
        let package = PackageData {
            price: Some(1450.0),
            pricegroup: vec![tier(1, 1, 1450.0)],
            ..PackageData::default()
        };
        let options = NormalizeOptions {
            currency: "EUR".to_string(),
        };
        let doc = normalize(&package, &options);
        assert_eq!(doc.blocks[1], Block::headline("From: EUR 1450 per person"));
        assert_eq!(doc.blocks[3], Block::key_value("1 Person: EUR 1450"));
    }

    #[test]
    fn test_zero_price_without_tiers_omits_section() {
        let package = PackageData {
            price: Some(0.0),
            ..PackageData::default()
        };
        assert!(normalize(&package, &NormalizeOptions::default())
            .blocks
            .is_empty());
    }

    #[test]
    fn test_collapsed_multi_person_tier() {
        assert_eq!(tier_line(&tier(4, 4, 70.0), "US$"), "4 People: US$ 70");
    }

    #[test]
    fn test_discounted_tier_carries_offer() {
        let discounted = PriceTier {
            offer_unit_price: Some(90.0),
            offer_label: Some("Spring deal".to_string()),
            ..tier(2, 3, 100.0)
        };
        assert_eq!(
            tier_line(&discounted, "US$"),
            "2-3 People: US$ 100 (offer US$ 90 \u{2013} Spring deal)"
        );

        let not_cheaper = PriceTier {
            offer_unit_price: Some(120.0),
            ..tier(2, 3, 100.0)
        };
        assert_eq!(tier_line(&not_cheaper, "US$"), "2-3 People: US$ 100");
    }

    #[test]
    fn test_package_info_fixed_order_and_omissions() {
        let package = PackageData {
            bestseason: Some("Spring, Autumn".to_string()),
            destination: named("Nepal"),
            package_duration: Some(Scalar::Number(14.0)),
            duration_type: Some("days".to_string()),
            grade: named(""),
            package_max_altitude: Some(Scalar::Number(5545.0)),
            package_group_size: Some(Scalar::Number(0.0)),
            accommodation: named("Tea house"),
            ..PackageData::default()
        };
        let doc = normalize(&package, &NormalizeOptions::default());
        assert_eq!(
            doc.blocks,
            vec![
                Block::heading("Package Information"),
                Block::key_value("Destination: Nepal"),
                Block::key_value("Duration: 14 days"),
                Block::key_value("Accommodation: Tea house"),
                Block::key_value("Max Elevation: 5545m"),
                Block::key_value("Best Season: Spring, Autumn"),
            ]
        );
    }

    #[test]
    fn test_full_package_section_order() {
        let package = PackageData {
            title: Some("Everest Base Camp".to_string()),
            package_abstract: Some("<p>Classic trek.</p>".to_string()),
            destination: named("Nepal"),
            price: Some(1450.0),
            package_highlights: Some("<ul><li>Kala Patthar sunrise</li></ul>".to_string()),
            package_details: Some("Long form.\n\nSecond part.".to_string()),
            itinerary: vec![ItineraryEntry {
                itinerary_title: Some("Arrival".to_string()),
                itinerary_description: Some("Transfer to hotel.".to_string()),
            }],
            const_include: Some("<ul><li>Meals</li></ul>".to_string()),
            cost_exclude: Some("<ul><li>Tips</li></ul>".to_string()),
            package_trip_info: Some("Bring layers.".to_string()),
            ..PackageData::default()
        };
        let doc = normalize(&package, &NormalizeOptions::default());
        assert_eq!(doc.title, "Everest Base Camp");
        assert_eq!(
            headings(&doc),
            vec![
                "Package Overview",
                "Package Information",
                "Pricing Information",
                "Highlights",
                "Overview",
                "Detailed Itinerary",
                "What's Included",
                "What's Not Included",
                "Good to Know Before",
            ]
        );
    }

    #[test]
    fn test_details_split_into_paragraphs() {
        let package = PackageData {
            package_details: Some("<p>First.</p>\n\n<p>Second.</p>".to_string()),
            ..PackageData::default()
        };
        let doc = normalize(&package, &NormalizeOptions::default());
        assert_eq!(
            doc.blocks,
            vec![
                Block::heading("Overview"),
                Block::paragraph("First."),
                Block::paragraph("Second."),
            ]
        );
    }

    #[test]
    fn test_itinerary_numbered_by_day() {
        let package = PackageData {
            duration_type: Some("Days".to_string()),
            itinerary: vec![
                ItineraryEntry {
                    itinerary_title: Some("Arrival".to_string()),
                    itinerary_description: Some("<p>Welcome dinner.</p>".to_string()),
                },
                ItineraryEntry {
                    itinerary_title: Some("Fly to Lukla".to_string()),
                    itinerary_description: None,
                },
            ],
            ..PackageData::default()
        };
        let doc = normalize(&package, &NormalizeOptions::default());
        assert_eq!(
            doc.blocks[1..],
            [
                Block::ItineraryStep {
                    index: 1,
                    unit: StepUnit::Day,
                    title: "Arrival".to_string(),
                    description: "Welcome dinner.".to_string(),
                },
                Block::ItineraryStep {
                    index: 2,
                    unit: StepUnit::Day,
                    title: "Fly to Lukla".to_string(),
                    description: String::new(),
                },
            ]
        );
    }

    #[test]
    fn test_itinerary_numbered_by_step_for_other_units() {
        let package = PackageData {
            duration_type: Some("hours".to_string()),
            itinerary: vec![ItineraryEntry::default()],
            ..PackageData::default()
        };
        let doc = normalize(&package, &NormalizeOptions::default());
        assert!(matches!(
            doc.blocks[1],
            Block::ItineraryStep {
                index: 1,
                unit: StepUnit::Step,
                ..
            }
        ));
    }

    #[test]
    fn test_incomplete_steps_counted_and_substituted() {
        let package = PackageData {
            itinerary: vec![
                ItineraryEntry {
                    itinerary_title: Some("Arrive in Kathmandu".to_string()),
                    itinerary_description: Some("<p>Transfer to hotel.</p>".to_string()),
                },
                ItineraryEntry {
                    itinerary_title: Some("Fly to Lukla".to_string()),
                    itinerary_description: None,
                },
                ItineraryEntry::default(),
            ],
            ..PackageData::default()
        };
        assert_eq!(incomplete_step_count(&package), 2);

        let doc = normalize(&package, &NormalizeOptions::default());
        assert!(matches!(
            &doc.blocks[2],
            Block::ItineraryStep { title, description, .. }
                if title == "Fly to Lukla" && description.is_empty()
        ));
    }

    #[test]
    fn test_list_section_without_items_is_omitted() {
        let package = PackageData {
            cost_exclude: Some("<ul></ul>".to_string()),
            ..PackageData::default()
        };
        assert!(normalize(&package, &NormalizeOptions::default())
            .blocks
            .is_empty());
    }
}
