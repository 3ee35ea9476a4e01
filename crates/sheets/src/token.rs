//! OAuth2 access tokens for a service account (JWT-bearer grant).
//!
//! A short-lived RS256 assertion signed with the account's private key is
//! exchanged at the key's `token_uri` for a bearer token. Tokens are cached
//! and refreshed shortly before they expire.

use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::client::parse_response;
use crate::credentials::ServiceAccountKey;
use crate::error::SheetsError;

/// Scopes requested for every token: appending to sheets, and finding a
/// spreadsheet by name through Drive.
pub const SCOPES: [&str; 2] = [
    "https://www.googleapis.com/auth/spreadsheets",
    "https://www.googleapis.com/auth/drive",
];

const GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Lifetime of a signed assertion; Google caps this at one hour.
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// Refresh a cached token this many seconds before it expires.
const REFRESH_MARGIN_SECS: i64 = 60;

/// Claims of the assertion sent to the token endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct AssertionClaims {
    /// Issuer -- the service account's email.
    pub iss: String,
    /// Space-separated scopes.
    pub scope: String,
    /// Audience -- the token endpoint.
    pub aud: String,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
}

/// Sign an RS256 assertion for `key`, issued at `now`.
pub fn sign_assertion(key: &ServiceAccountKey, now: i64) -> Result<String, SheetsError> {
    let mut header = Header::new(Algorithm::RS256);
    header.kid = key.private_key_id.clone();

    let claims = AssertionClaims {
        iss: key.client_email.clone(),
        scope: SCOPES.join(" "),
        aud: key.token_uri.clone(),
        iat: now,
        exp: now + ASSERTION_LIFETIME_SECS,
    };

    let signing_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())?;
    Ok(encode(&header, &claims, &signing_key)?)
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: i64,
}

fn default_expires_in() -> i64 {
    ASSERTION_LIFETIME_SECS
}

struct CachedToken {
    value: String,
    expires_at: i64,
}

impl CachedToken {
    fn is_fresh(&self, now: i64) -> bool {
        now < self.expires_at - REFRESH_MARGIN_SECS
    }
}

/// Hands out bearer tokens for one service account.
pub struct TokenSource {
    http: reqwest::Client,
    key: ServiceAccountKey,
    cached: Mutex<Option<CachedToken>>,
}

impl TokenSource {
    pub fn new(http: reqwest::Client, key: ServiceAccountKey) -> Self {
        Self {
            http,
            key,
            cached: Mutex::new(None),
        }
    }

    /// A valid access token, fetching a new one if none is cached or the
    /// cached one is about to expire.
    pub async fn access_token(&self) -> Result<String, SheetsError> {
        let now = chrono::Utc::now().timestamp();
        let mut cached = self.cached.lock().await;

        if let Some(token) = cached.as_ref().filter(|t| t.is_fresh(now)) {
            return Ok(token.value.clone());
        }

        let fresh = self.fetch(now).await?;
        let value = fresh.value.clone();
        *cached = Some(fresh);
        Ok(value)
    }

    async fn fetch(&self, now: i64) -> Result<CachedToken, SheetsError> {
        let assertion = sign_assertion(&self.key, now)?;

        let response = self
            .http
            .post(&self.key.token_uri)
            .form(&[("grant_type", GRANT_TYPE), ("assertion", assertion.as_str())])
            .send()
            .await?;

        let body: TokenResponse = parse_response(response).await?;

        tracing::debug!(
            client_email = %self.key.client_email,
            expires_in = body.expires_in,
            "Obtained access token",
        );

        Ok(CachedToken {
            value: body.access_token,
            expires_at: now + body.expires_in,
        })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use jsonwebtoken::{decode, decode_header, DecodingKey, Validation};

    use super::*;

    const TEST_PRIVATE_KEY: &str = include_str!("../tests/fixtures/test-key.pem");
    const TEST_PUBLIC_KEY: &str = include_str!("../tests/fixtures/test-key.pub.pem");

    fn test_key() -> ServiceAccountKey {
        ServiceAccountKey {
            client_email: "survey@dwg-survey.iam.gserviceaccount.com".to_string(),
            private_key: TEST_PRIVATE_KEY.to_string(),
            private_key_id: Some("key-1".to_string()),
            token_uri: "https://oauth2.googleapis.com/token".to_string(),
            project_id: None,
        }
    }

    #[test]
    fn assertion_carries_issuer_scope_and_audience() {
        let now = chrono::Utc::now().timestamp();
        let jwt = sign_assertion(&test_key(), now).expect("signing should succeed");

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&["https://oauth2.googleapis.com/token"]);
        let data = decode::<AssertionClaims>(
            &jwt,
            &DecodingKey::from_rsa_pem(TEST_PUBLIC_KEY.as_bytes()).unwrap(),
            &validation,
        )
        .expect("assertion should verify with the public key");

        assert_eq!(data.claims.iss, "survey@dwg-survey.iam.gserviceaccount.com");
        assert_eq!(
            data.claims.scope,
            "https://www.googleapis.com/auth/spreadsheets https://www.googleapis.com/auth/drive"
        );
        assert_eq!(data.claims.iat, now);
        assert_eq!(data.claims.exp - data.claims.iat, 3600);
    }

    #[test]
    fn assertion_header_names_the_key() {
        let jwt = sign_assertion(&test_key(), 1_700_000_000).unwrap();
        let header = decode_header(&jwt).unwrap();

        assert_eq!(header.alg, Algorithm::RS256);
        assert_eq!(header.kid.as_deref(), Some("key-1"));
    }

    #[test]
    fn garbage_private_key_fails_to_sign() {
        let key = ServiceAccountKey {
            private_key: "not a pem".to_string(),
            ..test_key()
        };
        assert_matches!(sign_assertion(&key, 0), Err(SheetsError::Signing(_)));
    }

    #[test]
    fn cached_token_refreshes_inside_margin() {
        let token = CachedToken {
            value: "t".to_string(),
            expires_at: 1_000,
        };
        assert!(token.is_fresh(900));
        assert!(!token.is_fresh(940));
        assert!(!token.is_fresh(1_001));
    }
}
