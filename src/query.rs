use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::Listing;

/// Filter value meaning "no restriction on this facet".
pub const ALL: &str = "all";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortKey {
    DateAsc,
    DateDesc,
    PriceAsc,
    PriceDesc,
    DiscountDesc,
}

#[derive(Debug, Clone)]
pub struct QueryParams {
    pub search_text: String,
    pub city: String,
    pub property_type: String,
    pub sort: SortKey,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            city: ALL.to_string(),
            property_type: ALL.to_string(),
            sort: SortKey::DateAsc,
        }
    }
}

/// Facet choices plus the visible, ordered listings for one render.
#[derive(Debug, Clone)]
pub struct View {
    pub cities: Vec<String>,
    pub property_types: Vec<String>,
    pub listings: Vec<Listing>,
}

/// Derive the visible catalog from a dataset snapshot and the current
/// query parameters. Pure and synchronous; safe to rerun on every
/// parameter or dataset change.
pub fn compute_view(dataset: &[Listing], params: &QueryParams) -> View {
    let cities = facet_values(dataset, |l| l.city.clone());
    let property_types = facet_values(dataset, |l| l.property_type.clone());

    // A selected filter value that no longer exists in the active dataset
    // (e.g. after a sheet replaced the catalog) behaves as "all" instead
    // of silently matching nothing.
    let city = effective_filter(&params.city, &cities);
    let property_type = effective_filter(&params.property_type, &property_types);

    let mut listings: Vec<Listing> = dataset.to_vec();

    if !params.search_text.is_empty() {
        let needle = params.search_text.to_lowercase();
        listings.retain(|l| matches_text(l, &needle));
    }
    if city != ALL {
        listings.retain(|l| l.city == city);
    }
    if property_type != ALL {
        listings.retain(|l| l.property_type == property_type);
    }

    sort_listings(&mut listings, params.sort);

    View { cities, property_types, listings }
}

/// "all" plus the sorted distinct values of one field.
fn facet_values<F>(dataset: &[Listing], field: F) -> Vec<String>
where
    F: Fn(&Listing) -> String,
{
    let mut values: Vec<String> = dataset.iter().map(|l| field(l)).collect();
    values.sort();
    values.dedup();

    let mut facet = Vec::with_capacity(values.len() + 1);
    facet.push(ALL.to_string());
    facet.extend(values);
    facet
}

fn effective_filter<'a>(selected: &'a str, facet: &[String]) -> &'a str {
    if selected == ALL || !facet.iter().any(|v| v == selected) {
        ALL
    } else {
        selected
    }
}

/// Case-insensitive substring match over the text fields a visitor sees.
fn matches_text(listing: &Listing, needle: &str) -> bool {
    listing.title.to_lowercase().contains(needle)
        || listing.city.to_lowercase().contains(needle)
        || listing.property_type.to_lowercase().contains(needle)
        || listing.address.to_lowercase().contains(needle)
}

/// Auction dates that fail to parse sort as the Unix epoch: first in
/// ascending order, last in descending order.
fn sort_date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap_or_default()
}

/// Stable sort; listings with equal keys keep their relative input order.
fn sort_listings(listings: &mut [Listing], key: SortKey) {
    match key {
        SortKey::DateAsc => {
            listings.sort_by_key(|l| sort_date(&l.auction_date));
        }
        SortKey::DateDesc => {
            listings.sort_by(|a, b| sort_date(&b.auction_date).cmp(&sort_date(&a.auction_date)));
        }
        SortKey::PriceAsc => {
            listings.sort_by_key(|l| l.base_price);
        }
        SortKey::PriceDesc => {
            listings.sort_by(|a, b| b.base_price.cmp(&a.base_price));
        }
        SortKey::DiscountDesc => {
            listings.sort_by(|a, b| {
                b.discount_percent
                    .partial_cmp(&a.discount_percent)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
        }
    }
}
