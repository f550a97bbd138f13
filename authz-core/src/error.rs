//! Error taxonomy for the authorization page.
//!
//! `Display` output is the exact text shown to the user.

/// Message used when a submission result carries neither `message` nor `result`.
pub const GENERAL_ERROR: &str = "General error.";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthorizeError {
    // Input validation: terminal, nothing else happens on the page.
    #[error("Invalid authorization.")]
    InvalidAuthorization,
    #[error("Invalid tenant.")]
    InvalidTenant,

    // Detail fetch: terminal for this load.
    #[error("Requested authorization not found, maybe it is expired. Please try again.")]
    NotFound,
    #[error("Requested authorization fetch failed with status: {0}")]
    FetchFailed(u16),
    #[error("Error fetching authorization data: {0}")]
    BackendError(String),
    #[error("Request failed: {0}")]
    Transport(String),
    #[error("Failed to parse JSON: {0}")]
    MalformedResponse(String),

    // Ceremony: the user may press Authorize again.
    #[error("FIDO2 authentication options fetch failed with status: {0}")]
    OptionsFetchFailed(u16),
    #[error("FIDO2 authentication failed with status: {0}")]
    AssertionSubmitFailed(u16),
    #[error("FIDO2 credential verification failed.")]
    CredentialVerificationFailed,
    #[error("Authorization failed. {0}")]
    AuthorizationRejected(String),
}

/// The request never produced an HTTP response (network, CORS, abort).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// The platform credential API rejected the ceremony.
///
/// Kept for diagnostics only; the page shows
/// [`AuthorizeError::CredentialVerificationFailed`] instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlatformError {
    #[error("{name}: {message}")]
    Rejected { name: String, message: String },
    #[error("credential API unavailable: {0}")]
    Unavailable(String),
    #[error("unexpected credential shape: {0}")]
    UnexpectedCredential(String),
}
