use std::collections::{HashMap, HashSet};

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use crate::models::Listing;
use crate::sources::{FetchError, RawTable, TableSource};

/// Ordered column-name aliases per field. Lookup is exact (case- and
/// accent-sensitive); the first alias holding a non-empty cell wins.
const ID_ALIASES: &[&str] = &["id"];
const TITLE_ALIASES: &[&str] = &["titulo", "Titulo", "TÍTULO"];
const CITY_ALIASES: &[&str] = &["ciudad", "Ciudad"];
const TYPE_ALIASES: &[&str] = &["tipo", "Tipo"];
const AREA_ALIASES: &[&str] = &["area", "Area"];
const BEDROOM_ALIASES: &[&str] = &["habitaciones", "Habitaciones"];
const BATHROOM_ALIASES: &[&str] = &["banos", "Baños", "Banos"];
const DISCOUNT_ALIASES: &[&str] = &["descuento", "Descuento"];
const PRICE_ALIASES: &[&str] = &["precioBase", "PrecioBase", "Precio"];
const DATE_ALIASES: &[&str] = &["fecha", "Fecha"];
const ADDRESS_ALIASES: &[&str] = &["direccion", "Dirección", "Direccion"];
const IMAGE_ALIASES: &[&str] = &["imagen", "Imagen"];

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("source unavailable: {0}")]
    SourceUnavailable(String),
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    /// The table parsed fine but zero rows survived normalization.
    #[error("no usable rows in the fetched table")]
    EmptyResult,
}

impl From<FetchError> for IngestError {
    fn from(e: FetchError) -> Self {
        match e {
            FetchError::SourceUnavailable(msg) => IngestError::SourceUnavailable(msg),
            FetchError::MalformedResponse(msg) => IngestError::MalformedResponse(msg),
        }
    }
}

/// Fetch one table and normalize it into a candidate dataset.
///
/// Never returns a partial dataset: on any error the caller keeps its
/// previously active listings untouched.
pub async fn ingest(
    source: &dyn TableSource,
    source_id: &str,
    table_name: &str,
) -> Result<Vec<Listing>, IngestError> {
    let table = source.fetch_table(source_id, table_name).await?;

    info!(
        "Fetched {} rows x {} columns from {}",
        table.rows.len(),
        table.column_labels.len(),
        source.source_name()
    );

    let listings = normalize_table(&table);
    if listings.is_empty() {
        return Err(IngestError::EmptyResult);
    }
    Ok(listings)
}

/// Map heterogeneous rows into canonical listings.
///
/// Individual rows never error: a row missing title, city or type is
/// dropped, and a later row reusing an already seen id is dropped
/// (first occurrence wins).
pub fn normalize_table(table: &RawTable) -> Vec<Listing> {
    let mut seen_ids = HashSet::new();
    let mut listings = Vec::new();

    for (index, row) in table.rows.iter().enumerate() {
        let cells = row_map(&table.column_labels, row);
        let Some(listing) = normalize_row(&cells, index) else {
            debug!("Dropping row {}: missing title, city or type", index);
            continue;
        };
        if !seen_ids.insert(listing.id.clone()) {
            debug!("Dropping row {}: duplicate id {}", index, listing.id);
            continue;
        }
        listings.push(listing);
    }

    listings
}

/// Key each cell by its trimmed column label; an unlabeled column falls
/// back to its index rendered as text.
fn row_map<'a>(labels: &[String], row: &'a [Value]) -> HashMap<String, &'a Value> {
    row.iter()
        .enumerate()
        .map(|(i, cell)| {
            let label = labels.get(i).map(|l| l.trim()).unwrap_or("");
            let key = if label.is_empty() { i.to_string() } else { label.to_string() };
            (key, cell)
        })
        .collect()
}

fn normalize_row(cells: &HashMap<String, &Value>, index: usize) -> Option<Listing> {
    let title = resolve_text(cells, TITLE_ALIASES);
    let city = resolve_text(cells, CITY_ALIASES);
    let property_type = resolve_text(cells, TYPE_ALIASES);

    if title.is_empty() || city.is_empty() || property_type.is_empty() {
        return None;
    }

    let id = match resolve_text(cells, ID_ALIASES) {
        s if s.is_empty() => format!("GS-{}", index),
        s => s,
    };

    Some(Listing {
        id,
        title,
        city,
        property_type,
        area_sqm: resolve_number(cells, AREA_ALIASES),
        bedrooms: resolve_number(cells, BEDROOM_ALIASES).max(0.0) as u32,
        bathrooms: resolve_number(cells, BATHROOM_ALIASES).max(0.0) as u32,
        discount_percent: resolve_number(cells, DISCOUNT_ALIASES).max(0.0),
        base_price: resolve_number(cells, PRICE_ALIASES).max(0.0) as i64,
        auction_date: resolve_text(cells, DATE_ALIASES),
        address: resolve_text(cells, ADDRESS_ALIASES),
        image_url: resolve_text(cells, IMAGE_ALIASES),
    })
}

/// First alias with a non-empty text value, else "".
fn resolve_text(cells: &HashMap<String, &Value>, aliases: &[&str]) -> String {
    for alias in aliases {
        let Some(value) = cells.get(*alias) else { continue };
        let text = match value {
            Value::String(s) => s.trim().to_string(),
            Value::Number(n) => n.to_string(),
            _ => String::new(),
        };
        if !text.is_empty() {
            return text;
        }
    }
    String::new()
}

/// First alias with a non-empty cell, numerically coerced. Unparseable or
/// non-finite content yields 0; this never fails.
fn resolve_number(cells: &HashMap<String, &Value>, aliases: &[&str]) -> f64 {
    for alias in aliases {
        let Some(value) = cells.get(*alias) else { continue };
        match value {
            Value::Number(n) => return n.as_f64().unwrap_or(0.0),
            Value::String(s) if !s.trim().is_empty() => {
                return s
                    .trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .unwrap_or(0.0);
            }
            _ => {}
        }
    }
    0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::seed_listings;
    use crate::state::ActiveDataset;
    use async_trait::async_trait;
    use serde_json::json;

    fn table(labels: &[&str], rows: Vec<Vec<Value>>) -> RawTable {
        RawTable {
            column_labels: labels.iter().map(|l| l.to_string()).collect(),
            rows,
        }
    }

    struct FixedSource(RawTable);

    #[async_trait]
    impl TableSource for FixedSource {
        async fn fetch_table(&self, _: &str, _: &str) -> Result<RawTable, FetchError> {
            Ok(self.0.clone())
        }

        fn source_name(&self) -> &'static str {
            "fixed"
        }
    }

    struct DownSource;

    #[async_trait]
    impl TableSource for DownSource {
        async fn fetch_table(&self, _: &str, _: &str) -> Result<RawTable, FetchError> {
            Err(FetchError::SourceUnavailable("connection refused".to_string()))
        }

        fn source_name(&self) -> &'static str {
            "down"
        }
    }

    #[test]
    fn maps_aliased_columns_with_defaults() {
        let raw = table(
            &["Titulo", "Ciudad", "tipo", "Precio"],
            vec![vec![json!("Casa X"), json!("Bogotá"), json!("Casa"), json!("150000000")]],
        );

        let listings = normalize_table(&raw);
        assert_eq!(listings.len(), 1);

        let l = &listings[0];
        assert_eq!(l.id, "GS-0");
        assert_eq!(l.title, "Casa X");
        assert_eq!(l.city, "Bogotá");
        assert_eq!(l.property_type, "Casa");
        assert_eq!(l.base_price, 150_000_000);
        assert_eq!(l.area_sqm, 0.0);
        assert_eq!(l.bedrooms, 0);
        assert_eq!(l.bathrooms, 0);
        assert_eq!(l.discount_percent, 0.0);
        assert_eq!(l.auction_date, "");
        assert_eq!(l.address, "");
        assert_eq!(l.image_url, "");
    }

    #[test]
    fn round_trips_canonical_field_names() {
        let original = seed_listings().remove(0);
        let raw = table(
            &[
                "id", "titulo", "ciudad", "tipo", "area", "habitaciones", "banos",
                "descuento", "precioBase", "fecha", "direccion", "imagen",
            ],
            vec![vec![
                json!(original.id),
                json!(original.title),
                json!(original.city),
                json!(original.property_type),
                json!(original.area_sqm),
                json!(original.bedrooms),
                json!(original.bathrooms),
                json!(original.discount_percent),
                json!(original.base_price),
                json!(original.auction_date),
                json!(original.address),
                json!(original.image_url),
            ]],
        );

        assert_eq!(normalize_table(&raw), vec![original]);
    }

    #[test]
    fn drops_row_without_resolvable_title() {
        let raw = table(
            &["titulo", "ciudad", "tipo", "precioBase"],
            vec![
                vec![json!(""), json!("Bogotá"), json!("Casa"), json!(999)],
                vec![json!(null), json!("Cali"), json!("Lote"), json!(999)],
                vec![json!("Casa real"), json!("Bogotá"), json!("Casa"), json!(999)],
            ],
        );

        let listings = normalize_table(&raw);
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].title, "Casa real");
    }

    #[test]
    fn synthesized_id_uses_raw_row_index() {
        let raw = table(
            &["titulo", "ciudad", "tipo"],
            vec![
                vec![json!(""), json!("Bogotá"), json!("Casa")],
                vec![json!("Con todo"), json!("Cali"), json!("Lote")],
            ],
        );

        let listings = normalize_table(&raw);
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].id, "GS-1");
    }

    #[test]
    fn duplicate_ids_keep_first_occurrence() {
        let raw = table(
            &["id", "titulo", "ciudad", "tipo"],
            vec![
                vec![json!("RM-1"), json!("Primera"), json!("Bogotá"), json!("Casa")],
                vec![json!("RM-1"), json!("Segunda"), json!("Cali"), json!("Lote")],
            ],
        );

        let listings = normalize_table(&raw);
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].title, "Primera");
    }

    #[test]
    fn coerces_unparseable_numbers_to_zero() {
        let raw = table(
            &["titulo", "ciudad", "tipo", "area", "habitaciones", "precioBase"],
            vec![vec![
                json!("Casa"),
                json!("Bogotá"),
                json!("Casa"),
                json!(" 72.5 "),
                json!("dos"),
                json!("NaN"),
            ]],
        );

        let listings = normalize_table(&raw);
        assert_eq!(listings[0].area_sqm, 72.5);
        assert_eq!(listings[0].bedrooms, 0);
        assert_eq!(listings[0].base_price, 0);
    }

    #[test]
    fn empty_alias_falls_through_to_next() {
        // precioBase present but empty, Precio carries the value.
        let raw = table(
            &["titulo", "ciudad", "tipo", "precioBase", "Precio"],
            vec![vec![json!("Casa"), json!("Bogotá"), json!("Casa"), json!(""), json!(88)]],
        );

        let listings = normalize_table(&raw);
        assert_eq!(listings[0].base_price, 88);
    }

    #[tokio::test]
    async fn all_invalid_rows_classify_as_empty_result() {
        let raw = table(
            &["titulo", "precioBase"],
            vec![
                vec![json!("Sin ciudad"), json!(1)],
                vec![json!("Tampoco"), json!(2)],
            ],
        );

        let mut dataset = ActiveDataset::new(seed_listings());
        let before = dataset.snapshot().to_vec();
        let token = dataset.begin_request();

        let err = ingest(&FixedSource(raw), "sheet-id", "Listado").await.unwrap_err();
        assert!(matches!(err, IngestError::EmptyResult));

        // The failed ingestion never reaches commit.
        assert_eq!(dataset.snapshot(), before.as_slice());
        let _ = token;
    }

    #[tokio::test]
    async fn transport_failure_maps_to_source_unavailable() {
        let err = ingest(&DownSource, "sheet-id", "Listado").await.unwrap_err();
        assert!(matches!(err, IngestError::SourceUnavailable(_)));
    }

    #[tokio::test]
    async fn successful_ingest_returns_all_kept_rows() {
        let raw = table(
            &["titulo", "ciudad", "tipo"],
            vec![
                vec![json!("Uno"), json!("Bogotá"), json!("Casa")],
                vec![json!("Dos"), json!("Cali"), json!("Lote")],
            ],
        );

        let listings = ingest(&FixedSource(raw), "sheet-id", "Listado").await.unwrap();
        assert_eq!(listings.len(), 2);
    }
}
