//! Fetches the published sheet and decodes it into records.

use async_trait::async_trait;
use log::{debug, info};
use reqwest::header::CONTENT_TYPE;
use std::collections::HashMap;
use std::time::Duration;

use crate::errors::LoadError;
use crate::sheet::sheet_model::{columns, SheetRecord};
use crate::sheet::sheet_traits::SheetSource;

/// HTTP source for published spreadsheet exports.
pub struct HttpSheetSource {
    client: reqwest::Client,
}

impl HttpSheetSource {
    pub fn new(timeout: Duration) -> Result<Self, LoadError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LoadError::Client(e.to_string()))?;
        Ok(Self { client })
    }
}

fn is_text_content_type(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime.starts_with("text/") || mime.contains("csv")
}

#[async_trait]
impl SheetSource for HttpSheetSource {
    async fn fetch_text(&self, url: &str) -> Result<String, LoadError> {
        let http_error = |e: reqwest::Error| LoadError::Http {
            url: url.to_string(),
            message: e.to_string(),
        };

        let response = self.client.get(url).send().await.map_err(http_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        // A missing content type is tolerated; an explicit binary one is not.
        if let Some(content_type) = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
        {
            if !is_text_content_type(content_type) {
                return Err(LoadError::NotText {
                    url: url.to_string(),
                    content_type: content_type.to_string(),
                });
            }
        }

        response.text().await.map_err(http_error)
    }
}

/// Column positions resolved from the header row.
struct ColumnIndex {
    positions: HashMap<String, usize>,
}

impl ColumnIndex {
    fn from_headers(headers: &csv::StringRecord) -> Self {
        let mut positions = HashMap::new();
        for (i, header) in headers.iter().enumerate() {
            // First occurrence wins for duplicated headers
            positions
                .entry(header.trim().to_lowercase())
                .or_insert(i);
        }
        Self { positions }
    }

    fn cell(&self, row: &csv::StringRecord, column: &str) -> String {
        self.positions
            .get(&column.to_lowercase())
            .and_then(|&i| row.get(i))
            .unwrap_or_default()
            .to_string()
    }
}

/// Decode comma-separated text with a header row into records, in file order.
///
/// Empty lines and rows whose every cell is blank are skipped.
pub fn parse_sheet(text: &str) -> Result<Vec<SheetRecord>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| LoadError::Decode(e.to_string()))?
        .clone();
    let index = ColumnIndex::from_headers(&headers);

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| LoadError::Decode(e.to_string()))?;
        if row.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        records.push(SheetRecord {
            date: index.cell(&row, columns::DATE),
            app_name: index.cell(&row, columns::APP_NAME),
            platform: index.cell(&row, columns::PLATFORM),
            ad_name: index.cell(&row, columns::AD_NAME),
            impressions: index.cell(&row, columns::IMPRESSIONS),
            clicks: index.cell(&row, columns::CLICKS),
            installs: index.cell(&row, columns::INSTALLS),
            customers: index.cell(&row, columns::CUSTOMERS),
            revenue: index.cell(&row, columns::REVENUE),
            spend: index.cell(&row, columns::SPEND),
        });
    }

    debug!(
        "Parsed {} sheet records across {} columns",
        records.len(),
        headers.len()
    );
    Ok(records)
}

/// Fetch and decode in one step. No retry: the caller decides when to reload.
pub async fn load_sheet<S: SheetSource + ?Sized>(
    source: &S,
    url: &str,
) -> Result<Vec<SheetRecord>, LoadError> {
    let text = source.fetch_text(url).await?;
    let records = parse_sheet(&text)?;
    info!("Loaded {} records from {}", records.len(), url);
    Ok(records)
}
