//! Google Sheets access for the pre-survey service.
//!
//! Resolves service-account credentials, exchanges them for OAuth2 access
//! tokens, and exposes a [`Worksheet`] handle implementing
//! [`presurvey_core::submission::RowAppender`].

pub mod client;
pub mod credentials;
pub mod error;
pub mod token;
pub mod worksheet;

pub use client::{Endpoints, SheetsClient};
pub use credentials::{select_provider, CredentialProvider};
pub use error::SheetsError;
pub use worksheet::{connect, Worksheet};
