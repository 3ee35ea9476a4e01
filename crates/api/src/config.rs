use std::path::PathBuf;

/// File name of the local service-account key, looked up next to the
/// executable unless `GOOGLE_CREDENTIALS_PATH` overrides it.
pub const CREDENTIALS_FILE_NAME: &str = "google-credentials.json";

/// Secrets file read when no local key file exists. Matches the layout
/// hosted deployments already mount.
pub const DEFAULT_SECRETS_PATH: &str = ".streamlit/secrets.toml";

/// Title of the spreadsheet responses are appended to.
pub const DEFAULT_SPREADSHEET_NAME: &str = "(DWG) Pre-Survey Responses";

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Local service-account key file; used when it exists.
    pub credentials_path: PathBuf,
    /// Hosted secrets file; used when the local key file is absent.
    pub secrets_path: PathBuf,
    /// Spreadsheet looked up by title at startup.
    pub spreadsheet_name: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                               |
    /// |---------------------------|---------------------------------------|
    /// | `HOST`                    | `0.0.0.0`                             |
    /// | `PORT`                    | `3000`                                |
    /// | `CORS_ORIGINS`            | `http://localhost:3000`               |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                                  |
    /// | `GOOGLE_CREDENTIALS_PATH` | `<exe dir>/google-credentials.json`   |
    /// | `SECRETS_PATH`            | `.streamlit/secrets.toml`             |
    /// | `SPREADSHEET_NAME`        | `(DWG) Pre-Survey Responses`          |
    ///
    /// # Panics
    ///
    /// Panics if `PORT` or `REQUEST_TIMEOUT_SECS` is set but not a number.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = parse_origins(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:3000".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let credentials_path = std::env::var("GOOGLE_CREDENTIALS_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_credentials_path());

        let secrets_path = std::env::var("SECRETS_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_SECRETS_PATH));

        let spreadsheet_name =
            std::env::var("SPREADSHEET_NAME").unwrap_or_else(|_| DEFAULT_SPREADSHEET_NAME.into());

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            credentials_path,
            secrets_path,
            spreadsheet_name,
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// `google-credentials.json` in the executable's directory, falling back to
/// the working directory when the executable path is unavailable.
fn default_credentials_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(CREDENTIALS_FILE_NAME)))
        .unwrap_or_else(|| PathBuf::from(CREDENTIALS_FILE_NAME))
}
