//! REST client for the Google Sheets and Drive endpoints this service uses.
//!
//! Only three calls are needed: find a spreadsheet by name (Drive), read its
//! worksheet list (Sheets), and append one row (Sheets `values:append`).

use reqwest::Url;
use serde::Deserialize;
use serde_json::json;

use crate::credentials::ServiceAccountKey;
use crate::error::SheetsError;
use crate::token::TokenSource;

pub const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4";
pub const DRIVE_API_BASE: &str = "https://www.googleapis.com/drive/v3";

const SPREADSHEET_MIME_TYPE: &str = "application/vnd.google-apps.spreadsheet";

/// Base URLs of the Google APIs. Overridable so tests can point the client
/// at a local fake.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub sheets: String,
    pub drive: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            sheets: SHEETS_API_BASE.to_string(),
            drive: DRIVE_API_BASE.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct FileList {
    #[serde(default)]
    files: Vec<DriveFile>,
}

#[derive(Debug, Deserialize)]
struct DriveFile {
    id: String,
}

#[derive(Debug, Deserialize)]
struct SpreadsheetMetadata {
    #[serde(default)]
    sheets: Vec<SheetEntry>,
}

#[derive(Debug, Deserialize)]
struct SheetEntry {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
struct SheetProperties {
    title: String,
}

/// Authenticated client for one service account.
pub struct SheetsClient {
    http: reqwest::Client,
    tokens: TokenSource,
    endpoints: Endpoints,
}

impl SheetsClient {
    /// Create a client talking to the real Google endpoints.
    pub fn new(key: ServiceAccountKey) -> Self {
        Self::with_endpoints(reqwest::Client::new(), key, Endpoints::default())
    }

    /// Create a client reusing an existing [`reqwest::Client`] and custom
    /// base URLs.
    pub fn with_endpoints(
        http: reqwest::Client,
        key: ServiceAccountKey,
        endpoints: Endpoints,
    ) -> Self {
        Self {
            tokens: TokenSource::new(http.clone(), key),
            http,
            endpoints,
        }
    }

    /// Resolve a spreadsheet's id from its title.
    ///
    /// The spreadsheet must be shared with the service account. When several
    /// share the title, the first one Drive returns wins.
    pub async fn open_by_name(&self, name: &str) -> Result<String, SheetsError> {
        let token = self.tokens.access_token().await?;
        let query = format!(
            "name = '{}' and mimeType = '{SPREADSHEET_MIME_TYPE}' and trashed = false",
            escape_query_literal(name)
        );

        let response = self
            .http
            .get(format!("{}/files", self.endpoints.drive))
            .bearer_auth(&token)
            .query(&[
                ("q", query.as_str()),
                ("fields", "files(id,name)"),
                ("pageSize", "1"),
                ("supportsAllDrives", "true"),
                ("includeItemsFromAllDrives", "true"),
            ])
            .send()
            .await?;

        let list: FileList = parse_response(response).await?;
        list.files
            .into_iter()
            .next()
            .map(|f| f.id)
            .ok_or_else(|| SheetsError::SpreadsheetNotFound {
                name: name.to_string(),
            })
    }

    /// Title of the spreadsheet's first worksheet.
    pub async fn first_worksheet(&self, spreadsheet_id: &str) -> Result<String, SheetsError> {
        let token = self.tokens.access_token().await?;
        let url = self.sheets_url(&["spreadsheets", spreadsheet_id])?;

        let response = self
            .http
            .get(url)
            .bearer_auth(&token)
            .query(&[("fields", "sheets.properties")])
            .send()
            .await?;

        let metadata: SpreadsheetMetadata = parse_response(response).await?;
        metadata
            .sheets
            .into_iter()
            .next()
            .map(|s| s.properties.title)
            .ok_or_else(|| SheetsError::NoWorksheet {
                spreadsheet_id: spreadsheet_id.to_string(),
            })
    }

    /// Append `row` after the last row of the worksheet's data table.
    ///
    /// Values are written `RAW`: strings are stored as typed, never parsed as
    /// formulas or dates.
    pub async fn append_row(
        &self,
        spreadsheet_id: &str,
        sheet_title: &str,
        row: &[serde_json::Value],
    ) -> Result<(), SheetsError> {
        let token = self.tokens.access_token().await?;
        let range = format!("{}:append", a1_range(sheet_title));
        let url = self.sheets_url(&["spreadsheets", spreadsheet_id, "values", &range])?;

        let body = json!({
            "majorDimension": "ROWS",
            "values": [row],
        });

        let response = self
            .http
            .post(url)
            .bearer_auth(&token)
            .query(&[
                ("valueInputOption", "RAW"),
                ("insertDataOption", "INSERT_ROWS"),
            ])
            .json(&body)
            .send()
            .await?;

        check_status(response).await
    }

    fn sheets_url(&self, segments: &[&str]) -> Result<Url, SheetsError> {
        let base = &self.endpoints.sheets;
        let mut url =
            Url::parse(base).map_err(|e| SheetsError::InvalidEndpoint(format!("{base}: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| SheetsError::InvalidEndpoint(base.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

/// A1 reference to the top-left cell of `sheet_title`, quoted so titles with
/// spaces or punctuation are accepted.
fn a1_range(sheet_title: &str) -> String {
    format!("'{}'!A1", sheet_title.replace('\'', "''"))
}

/// Escape a value for a single-quoted Drive query string literal.
fn escape_query_literal(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

// ---- response helpers ----

/// Ensure the response has a success status code. Returns the response
/// unchanged on success, or a [`SheetsError::Api`] containing the status and
/// body text on failure.
async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, SheetsError> {
    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        return Err(SheetsError::Api {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response)
}

/// Parse a successful JSON response body into the expected type.
pub(crate) async fn parse_response<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, SheetsError> {
    let response = ensure_success(response).await?;
    Ok(response.json::<T>().await?)
}

/// Assert the response has a success status code, discarding the body.
async fn check_status(response: reqwest::Response) -> Result<(), SheetsError> {
    ensure_success(response).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a1_range_quotes_title() {
        assert_eq!(a1_range("Sheet1"), "'Sheet1'!A1");
        assert_eq!(a1_range("Bob's answers"), "'Bob''s answers'!A1");
    }

    #[test]
    fn query_literal_escapes_quotes_and_backslashes() {
        assert_eq!(
            escape_query_literal("(DWG) Pre-Survey Responses"),
            "(DWG) Pre-Survey Responses"
        );
        assert_eq!(escape_query_literal(r"it's a\b"), r"it\'s a\\b");
    }
}
