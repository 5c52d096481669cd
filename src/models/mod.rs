use serde::{Deserialize, Serialize};

/// One normalized property-auction record.
///
/// Normalization guarantees that `title`, `city` and `property_type` are
/// non-empty and that every numeric field holds a parsed value (0 when the
/// source cell was missing or unreadable). Rows that cannot meet this are
/// dropped before a `Listing` ever exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: String,
    pub title: String,
    pub city: String,
    pub property_type: String,
    pub area_sqm: f64,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub discount_percent: f64,
    /// Price in COP major units.
    pub base_price: i64,
    /// ISO-8601 calendar date, e.g. "2025-09-05". Kept as text; parsed
    /// only for sorting and display.
    pub auction_date: String,
    pub address: String,
    pub image_url: String,
}
