use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Travel package as delivered by the package catalogue API.
///
/// Every field is optional; a missing title renders as an empty string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageData {
    pub title: Option<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub itinerary: Vec<ItineraryEntry>,
    /// HTML: what the price includes.
    pub const_include: Option<String>,
    /// HTML: what the price excludes.
    pub cost_exclude: Option<String>,
    pub price: Option<f64>,
    /// Unit of `package_duration`, e.g. "days".
    pub duration_type: Option<String>,
    pub package_abstract: Option<String>,
    pub destination: Option<NamedRef>,
    pub package_duration: Option<Scalar>,
    pub grade: Option<NamedRef>,
    pub style: Option<NamedRef>,
    pub accommodation: Option<NamedRef>,
    pub package_max_altitude: Option<Scalar>,
    pub transportation: Option<NamedRef>,
    pub package_group_size: Option<Scalar>,
    pub package_highlights: Option<String>,
    pub package_details: Option<String>,
    pub package_trip_info: Option<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub pricegroup: Vec<PriceTier>,
    pub bestseason: Option<String>,
}

/// The catalogue sends `null` for empty collections.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ItineraryEntry {
    pub itinerary_title: Option<String>,
    /// HTML.
    pub itinerary_description: Option<String>,
}

/// Reference to a catalogue entity (destination, grade, …) of which only the
/// display title matters here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NamedRef {
    pub title: Option<String>,
}

impl NamedRef {
    /// The title, when it is non-blank.
    pub fn present(reference: &Option<NamedRef>) -> Option<&str> {
        reference
            .as_ref()
            .and_then(|r| r.title.as_deref())
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

/// Group pricing tier.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceTier {
    pub id: Option<i64>,
    pub min_people: u32,
    pub max_people: u32,
    pub unit_price: f64,
    pub offer_unit_price: Option<f64>,
    pub offer_label: Option<String>,
}

/// A value the catalogue sends either as a JSON number or as a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(f64),
    Text(String),
}

impl Scalar {
    /// Zero and blank values count as absent.
    pub fn is_present(&self) -> bool {
        match self {
            Scalar::Number(n) => *n != 0.0 && n.is_finite(),
            Scalar::Text(s) => !s.trim().is_empty(),
        }
    }

    pub fn present(value: &Option<Scalar>) -> Option<&Scalar> {
        value.as_ref().filter(|v| v.is_present())
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Number(n) => write!(f, "{n}"),
            Scalar::Text(s) => f.write_str(s.trim()),
        }
    }
}
