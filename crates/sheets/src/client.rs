use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::a1::{cell_range, column_range};
use crate::api_types::{
    BatchUpdateRequest, SpreadsheetMeta, ValueRange, ValueRangeResponse, cell_text,
};
use crate::error::SheetError;
use crate::gateway::{RowIndex, SheetConnector, SheetTable};

/// Values are stored verbatim. Client-supplied text must never be parsed as a
/// formula, number or date.
const VALUE_INPUT_OPTION: &str = "RAW";

/// Where the OAuth bearer token comes from. Minting the token is done
/// outside this crate.
#[derive(Clone)]
pub enum TokenSource {
    Static(String),
    /// Re-read on every `connect()` so an external refresher can rotate it.
    File(PathBuf),
}

impl std::fmt::Debug for TokenSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Static(_) => f.write_str("Static(***)"),
            Self::File(path) => f.debug_tuple("File").field(path).finish(),
        }
    }
}

/// Connection settings for the Google Sheets v4 API.
#[derive(Debug, Clone)]
pub struct SheetsConfig {
    pub api_url: String,
    pub spreadsheet_id: String,
    /// Worksheet title; the first worksheet is used when `None`.
    pub sheet_name: Option<String>,
    pub timeout: Duration,
    pub token: TokenSource,
}

struct SheetsApi {
    client: reqwest::Client,
    base_url: String,
    spreadsheet_id: String,
}

impl SheetsApi {
    fn endpoint(&self, segments: &[&str]) -> Result<reqwest::Url, SheetError> {
        let mut url = reqwest::Url::parse(&self.base_url).map_err(|e| {
            SheetError::Connection(format!("invalid API URL {}: {e}", self.base_url))
        })?;
        url.path_segments_mut()
            .map_err(|()| SheetError::Connection(format!("unusable API URL {}", self.base_url)))?
            .pop_if_empty()
            .extend(["v4", "spreadsheets", self.spreadsheet_id.as_str()])
            .extend(segments);
        Ok(url)
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        context: &str,
    ) -> Result<T, SheetError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(SheetError::HttpStatus {
                code: status.as_u16(),
                body: truncate(&body, 500).to_owned(),
            });
        }

        serde_json::from_str(&body).map_err(|e| SheetError::JsonParse {
            context: format!("{context} (body: {})", truncate(&body, 200)),
            source: e,
        })
    }
}

/// Connector for a Google spreadsheet.
pub struct GoogleSheetsClient {
    api: Arc<SheetsApi>,
    sheet_name: Option<String>,
    token: TokenSource,
}

impl std::fmt::Debug for GoogleSheetsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleSheetsClient")
            .field("base_url", &self.api.base_url)
            .field("spreadsheet_id", &self.api.spreadsheet_id)
            .field("sheet_name", &self.sheet_name)
            .field("token", &self.token)
            .finish()
    }
}

impl GoogleSheetsClient {
    /// Builds the client. No network traffic happens until `connect()`.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built (TLS backend failure).
    pub fn new(config: SheetsConfig) -> Result<Self, SheetError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SheetError::Connection(format!("client initialization failed: {e}")))?;
        let base_url = config.api_url.trim_end_matches('/').to_owned();
        Ok(Self {
            api: Arc::new(SheetsApi { client, base_url, spreadsheet_id: config.spreadsheet_id }),
            sheet_name: config.sheet_name,
            token: config.token,
        })
    }

    async fn bearer_token(&self) -> Result<String, SheetError> {
        let token = match &self.token {
            TokenSource::Static(token) => token.trim().to_owned(),
            TokenSource::File(path) => tokio::fs::read_to_string(path)
                .await
                .map_err(|e| SheetError::Credentials(format!("{}: {e}", path.display())))?
                .trim()
                .to_owned(),
        };
        if token.is_empty() {
            return Err(SheetError::Credentials("bearer token is empty".to_owned()));
        }
        Ok(token)
    }

    async fn resolve_title(&self, token: &str) -> Result<String, SheetError> {
        let url = self.api.endpoint(&[])?;
        let request = self
            .api
            .client
            .get(url)
            .bearer_auth(token)
            .query(&[("fields", "sheets.properties.title")]);
        let meta: SpreadsheetMeta = self.api.execute(request, "spreadsheet metadata").await?;
        let mut titles = meta.sheets.into_iter().map(|s| s.properties.title);

        match &self.sheet_name {
            Some(wanted) => titles
                .find(|t| t == wanted)
                .ok_or_else(|| SheetError::MissingWorksheet(wanted.clone())),
            None => titles
                .next()
                .ok_or_else(|| SheetError::MissingWorksheet("<first worksheet>".to_owned())),
        }
    }
}

#[async_trait]
impl SheetConnector for GoogleSheetsClient {
    async fn connect(&self) -> Result<Box<dyn SheetTable>, SheetError> {
        let token = self.bearer_token().await?;
        let title = self.resolve_title(&token).await.map_err(|e| match e {
            SheetError::MissingWorksheet(_) => e,
            other => SheetError::Connection(other.to_string()),
        })?;
        tracing::debug!(spreadsheet = %self.api.spreadsheet_id, worksheet = %title, "sheet session opened");
        Ok(Box::new(GoogleSheet { api: Arc::clone(&self.api), title, token }))
    }
}

/// One worksheet reached through an open session.
struct GoogleSheet {
    api: Arc<SheetsApi>,
    title: String,
    token: String,
}

impl GoogleSheet {
    async fn get_range(&self, range: &str, dimension: &str) -> Result<ValueRangeResponse, SheetError> {
        let url = self.api.endpoint(&["values", range])?;
        let request = self
            .api
            .client
            .get(url)
            .bearer_auth(&self.token)
            .query(&[("majorDimension", dimension)]);
        self.api.execute(request, range).await
    }
}

#[async_trait]
impl SheetTable for GoogleSheet {
    async fn find_row_by_key(
        &self,
        key: &str,
        column: u32,
    ) -> Result<Option<RowIndex>, SheetError> {
        let range = column_range(&self.title, column)?;
        let response = self.get_range(&range, "COLUMNS").await?;
        let Some(cells) = response.values.into_iter().next() else {
            return Ok(None);
        };

        for (idx, cell) in cells.iter().enumerate() {
            if cell_text(cell) == key {
                let row = u32::try_from(idx + 1)
                    .map_err(|_| SheetError::InvalidCoordinate { row: u32::MAX, column })?;
                return Ok(Some(row));
            }
        }
        Ok(None)
    }

    async fn read_cell(&self, row: RowIndex, column: u32) -> Result<String, SheetError> {
        let range = cell_range(&self.title, row, column)?;
        let response = self.get_range(&range, "ROWS").await?;
        Ok(response
            .values
            .first()
            .and_then(|r| r.first())
            .map(cell_text)
            .unwrap_or_default())
    }

    async fn write_cell(&self, row: RowIndex, column: u32, value: &str) -> Result<(), SheetError> {
        let range = cell_range(&self.title, row, column)?;
        let url = self.api.endpoint(&["values", range.as_str()])?;
        let body = ValueRange {
            range: range.clone(),
            major_dimension: "ROWS",
            values: vec![vec![value.to_owned()]],
        };
        let request = self
            .api
            .client
            .put(url)
            .bearer_auth(&self.token)
            .query(&[("valueInputOption", VALUE_INPUT_OPTION)])
            .json(&body);
        let _: serde_json::Value = self.api.execute(request, &range).await?;
        tracing::debug!(%range, "cell written");
        Ok(())
    }

    async fn write_cells(&self, row: RowIndex, cells: &[(u32, String)]) -> Result<(), SheetError> {
        if cells.is_empty() {
            return Ok(());
        }
        let mut data = Vec::with_capacity(cells.len());
        for (column, value) in cells {
            data.push(ValueRange {
                range: cell_range(&self.title, row, *column)?,
                major_dimension: "ROWS",
                values: vec![vec![value.clone()]],
            });
        }
        let url = self.api.endpoint(&["values:batchUpdate"])?;
        let body = BatchUpdateRequest { value_input_option: VALUE_INPUT_OPTION, data };
        let request = self.api.client.post(url).bearer_auth(&self.token).json(&body);
        let _: serde_json::Value = self.api.execute(request, "values batch update").await?;
        tracing::debug!(row, cells = cells.len(), "row cells written");
        Ok(())
    }
}

/// Truncates a string to the given maximum length at a char boundary.
#[must_use]
pub(crate) fn truncate(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        s
    } else {
        let mut end = max_len;
        while end > 0 && !s.is_char_boundary(end) {
            end = end.saturating_sub(1);
        }
        s.get(..end).unwrap_or("")
    }
}
