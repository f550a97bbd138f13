//! FIDO2 authorization flow shared by the web frontend and native tests
//!
//! Everything that decides *what* happens lives here:
//! - request context derivation from the page query string
//! - the backend REST contract (paths, envelopes, status handling)
//! - the WebAuthn assertion ceremony state machine
//! - page state and its view projection
//!
//! Browser specifics (fetch, `navigator.credentials`, DOM) sit behind the
//! [`AuthorizationBackend`] and [`CredentialAuthenticator`] traits.

pub mod ceremony;
pub mod codec;
pub mod context;
pub mod details;
pub mod error;
pub mod page;
pub mod transport;
pub mod types;

pub use ceremony::{authorize, Ceremony, CeremonyState, Completion, CredentialAuthenticator};
pub use context::{resolve_context, AuthorizationRequestContext, ContextTracker};
pub use details::load_authorization;
pub use error::{AuthorizeError, PlatformError, TransportError};
pub use page::{CeremonyTicket, PageState, PageView};
pub use transport::{AuthorizationBackend, CorrelationId, Endpoints, HttpReply};
pub use types::*;
