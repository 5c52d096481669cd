use crate::sources::traits::TableSource;
use crate::sources::types::{FetchError, RawTable};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Published-spreadsheet source using the Google Visualization endpoint.
///
/// The endpoint answers with a JSONP envelope
/// (`google.visualization.Query.setResponse({...});`) around a JSON body
/// whose `table` member carries column metadata and row cells.
pub struct SheetsSource {
    client: Client,
}

impl SheetsSource {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("remates-catalog/0.1")
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }
}

#[async_trait]
impl TableSource for SheetsSource {
    async fn fetch_table(&self, source_id: &str, table_name: &str)
        -> Result<RawTable, FetchError>
    {
        let url = format!(
            "https://docs.google.com/spreadsheets/d/{}/gviz/tq",
            source_id
        );

        debug!("Fetching URL: {} (sheet {})", url, table_name);

        let response = self
            .client
            .get(&url)
            .query(&[("tqx", "out:json"), ("sheet", table_name)])
            .send()
            .await
            .map_err(|e| FetchError::SourceUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            warn!("Sheets endpoint returned status: {}", response.status());
            return Err(FetchError::SourceUnavailable(format!(
                "http status {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::SourceUnavailable(e.to_string()))?;

        debug!("Downloaded {} bytes", body.len());

        parse_gviz_table(&body)
    }

    fn source_name(&self) -> &'static str {
        "Google Sheets"
    }
}

/// Extract the table from a gviz JSONP response.
///
/// The JSON body is taken as the text between the first `{` and the last
/// `}`; anything that fails to yield a `table` with `cols` and `rows`
/// inside is a malformed response, never a partial table.
pub fn parse_gviz_table(body: &str) -> Result<RawTable, FetchError> {
    let start = body
        .find('{')
        .ok_or_else(|| FetchError::MalformedResponse("no JSON body in response".to_string()))?;
    let end = body
        .rfind('}')
        .ok_or_else(|| FetchError::MalformedResponse("no JSON body in response".to_string()))?;
    if end < start {
        return Err(FetchError::MalformedResponse(
            "no JSON body in response".to_string(),
        ));
    }

    let doc: Value = serde_json::from_str(&body[start..=end])
        .map_err(|e| FetchError::MalformedResponse(e.to_string()))?;

    let table = doc
        .get("table")
        .ok_or_else(|| FetchError::MalformedResponse("missing table".to_string()))?;
    let cols = table
        .get("cols")
        .and_then(Value::as_array)
        .ok_or_else(|| FetchError::MalformedResponse("missing table.cols".to_string()))?;
    let raw_rows = table
        .get("rows")
        .and_then(Value::as_array)
        .ok_or_else(|| FetchError::MalformedResponse("missing table.rows".to_string()))?;

    let column_labels = cols
        .iter()
        .map(|c| c.get("label").and_then(Value::as_str).unwrap_or("").to_string())
        .collect();

    // A null row body or null cell becomes an empty row / empty cell;
    // only the envelope itself is allowed to fail.
    let rows = raw_rows
        .iter()
        .map(|r| match r.get("c").and_then(Value::as_array) {
            Some(cells) => cells
                .iter()
                .map(|c| c.get("v").cloned().unwrap_or(Value::Null))
                .collect(),
            None => Vec::new(),
        })
        .collect();

    Ok(RawTable { column_labels, rows })
}
