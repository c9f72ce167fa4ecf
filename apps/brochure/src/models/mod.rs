pub mod package;

pub use package::{ItineraryEntry, NamedRef, PackageData, PriceTier, Scalar};
