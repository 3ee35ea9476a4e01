use std::path::PathBuf;

/// Errors from resolving credentials and talking to the Google APIs.
///
/// Every variant is fatal during session setup. Once the worksheet handle
/// exists, append failures are converted to
/// [`presurvey_core::error::CoreError::Append`] at the handle.
#[derive(Debug, thiserror::Error)]
pub enum SheetsError {
    /// The credential file could not be read.
    #[error("Cannot read credentials from {path}: {source}")]
    CredentialsIo {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The service-account key JSON is malformed or missing fields.
    #[error("Invalid service account key: {0}")]
    InvalidKey(#[from] serde_json::Error),

    /// The secrets file is not valid TOML, or the entry does not parse.
    #[error("Invalid secrets file: {0}")]
    InvalidSecrets(#[from] toml::de::Error),

    /// The secrets file has no entry under the expected key.
    #[error("Secret '{key}' not found in {path}")]
    MissingSecret { key: String, path: PathBuf },

    /// Signing the token assertion failed (usually a bad private key).
    #[error("Cannot sign token assertion: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),

    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// A Google endpoint returned a non-2xx status code.
    #[error("Google API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    #[error("Spreadsheet '{name}' not found or not shared with the service account")]
    SpreadsheetNotFound { name: String },

    #[error("Spreadsheet {spreadsheet_id} has no worksheets")]
    NoWorksheet { spreadsheet_id: String },

    #[error("Invalid endpoint URL: {0}")]
    InvalidEndpoint(String),
}
