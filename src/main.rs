mod catalog;
mod format;
mod ingest;
mod models;
mod query;
mod sources;
mod state;

use format::FormatOptions;
use ingest::IngestError;
use query::QueryParams;
use sources::{SheetsSource, TableSource};
use state::ActiveDataset;
use tracing::{info, warn, Level};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    info!("🏠 Remates Catalog");
    info!("==================");
    info!("");

    let mut dataset = ActiveDataset::new(catalog::seed_listings());

    // Optional: replace the seed catalog with a published Google Sheet.
    // Usage: remates-catalog [SHEET_ID] [TAB_NAME]
    let mut args = std::env::args().skip(1);
    if let Some(sheet_id) = args.next() {
        let table_name = args.next().unwrap_or_else(|| "Listado".to_string());
        let source = SheetsSource::new()?;

        info!("Loading catalog from {} (tab '{}')...", source.source_name(), table_name);

        let token = dataset.begin_request();
        match ingest::ingest(&source, &sheet_id, &table_name).await {
            Ok(listings) => {
                dataset.commit(token, listings);
            }
            Err(IngestError::SourceUnavailable(reason)) => {
                warn!("Couldn't reach the sheet ({}); keeping current catalog", reason);
            }
            Err(IngestError::MalformedResponse(reason)) => {
                warn!("Sheet response wasn't a readable table ({}); keeping current catalog", reason);
            }
            Err(IngestError::EmptyResult) => {
                warn!("Sheet reached but no usable rows; keeping current catalog");
            }
        }
    }

    let params = QueryParams::default();
    let view = query::compute_view(dataset.snapshot(), &params);
    let fmt = FormatOptions::default();

    info!("Active dataset: {:?}", dataset.origin());
    info!("Cities: {}", view.cities.join(", "));
    info!("Types: {}", view.property_types.join(", "));
    info!("");
    info!("✅ {} listings in view", view.listings.len());
    info!("");

    for (i, listing) in view.listings.iter().enumerate() {
        println!(
            "{}. {} ({})",
            i + 1,
            listing.title,
            format::format_currency(listing.base_price, &fmt)
        );
        println!(
            "   {} · {} · {} m²",
            listing.city, listing.property_type, listing.area_sqm
        );
        println!(
            "   {} hab, {} baños, -{}%",
            listing.bedrooms, listing.bathrooms, listing.discount_percent
        );
        println!("   Subasta: {}", format::format_date(&listing.auction_date, &fmt));
        println!("   ID: {}", listing.id);
        println!();
    }

    // Save the visible catalog to JSON
    let json = serde_json::to_string_pretty(&view.listings)?;
    tokio::fs::write("catalog.json", json).await?;
    info!("💾 Saved visible listings to catalog.json");

    Ok(())
}
