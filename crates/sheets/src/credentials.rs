//! Service-account credential resolution.
//!
//! Two sources are supported, chosen once at startup by [`select_provider`]:
//! a key file on local disk (development machines), or an entry in a TOML
//! secrets file mounted by the hosting platform (deployments).

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::SheetsError;

/// Key of the service-account table inside the secrets file.
pub const SECRET_KEY: &str = "gcp_service_account";

/// Google's OAuth2 token endpoint, used when a key omits `token_uri`.
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// The fields of a Google service-account key this service needs.
///
/// Accepts the JSON downloaded from the Cloud console as-is; unknown fields
/// are ignored.
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    /// PEM-encoded RSA private key.
    pub private_key: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
    #[serde(default)]
    pub project_id: Option<String>,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("private_key", &"<redacted>")
            .field("private_key_id", &self.private_key_id)
            .field("token_uri", &self.token_uri)
            .field("project_id", &self.project_id)
            .finish()
    }
}

/// A strategy for obtaining the service-account key.
pub trait CredentialProvider: Send + Sync {
    /// Short name for logs.
    fn kind(&self) -> &'static str;

    fn resolve(&self) -> Result<ServiceAccountKey, SheetsError>;
}

/// Reads a service-account JSON key file.
#[derive(Debug, Clone)]
pub struct LocalFileProvider {
    path: PathBuf,
}

impl LocalFileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CredentialProvider for LocalFileProvider {
    fn kind(&self) -> &'static str {
        "local_file"
    }

    fn resolve(&self) -> Result<ServiceAccountKey, SheetsError> {
        let raw = read(&self.path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

/// Reads the `[gcp_service_account]` table from a TOML secrets file.
#[derive(Debug, Clone)]
pub struct SecretStoreProvider {
    path: PathBuf,
}

impl SecretStoreProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CredentialProvider for SecretStoreProvider {
    fn kind(&self) -> &'static str {
        "secret_store"
    }

    fn resolve(&self) -> Result<ServiceAccountKey, SheetsError> {
        let raw = read(&self.path)?;
        let mut table: toml::Table = toml::from_str(&raw)?;

        let entry = table
            .remove(SECRET_KEY)
            .ok_or_else(|| SheetsError::MissingSecret {
                key: SECRET_KEY.to_string(),
                path: self.path.clone(),
            })?;

        Ok(entry.try_into::<ServiceAccountKey>()?)
    }
}

fn read(path: &Path) -> Result<String, SheetsError> {
    std::fs::read_to_string(path).map_err(|source| SheetsError::CredentialsIo {
        path: path.to_path_buf(),
        source,
    })
}

/// Pick the credential source for this process.
///
/// A key file at `local_path` wins when it exists; otherwise the secrets file
/// at `secrets_path` is used. The choice is made once; a missing or broken
/// secrets file surfaces later, when the provider is resolved.
pub fn select_provider(local_path: &Path, secrets_path: &Path) -> Box<dyn CredentialProvider> {
    if local_path.exists() {
        Box::new(LocalFileProvider::new(local_path))
    } else {
        Box::new(SecretStoreProvider::new(secrets_path))
    }
}
