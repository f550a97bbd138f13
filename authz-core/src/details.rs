//! Authorization detail fetch: `GET /{tenant}/auth/{authid}`.

use tracing::{debug, warn};

use crate::context::AuthorizationRequestContext;
use crate::error::AuthorizeError;
use crate::transport::{AuthorizationBackend, Endpoints};
use crate::types::{AuthorizationPayload, ResultEnvelope, RESULT_NOT_FOUND};

/// Fetch the pending authorization payload for display.
pub async fn load_authorization<B>(
    backend: &B,
    ctx: &AuthorizationRequestContext,
) -> Result<AuthorizationPayload, AuthorizeError>
where
    B: AuthorizationBackend + ?Sized,
{
    let path = Endpoints::for_tenant(&ctx.tenant_id)
        .authorization(&ctx.authorization_id, ctx.next_url.as_deref());
    debug!(tenant = %ctx.tenant_id, "fetching authorization details");

    let reply = backend
        .get(&path)
        .await
        .map_err(|e| AuthorizeError::Transport(e.to_string()))?;

    match reply.status {
        200 => {}
        404 => return Err(AuthorizeError::NotFound),
        status => {
            warn!(status, "authorization fetch failed");
            return Err(AuthorizeError::FetchFailed(status));
        }
    }

    let envelope: ResultEnvelope = reply
        .json()
        .map_err(|e| AuthorizeError::MalformedResponse(e.to_string()))?;

    if envelope.is_ok() {
        Ok(envelope.data.unwrap_or(AuthorizationPayload::Null))
    } else if envelope.result_is(RESULT_NOT_FOUND) {
        Err(AuthorizeError::NotFound)
    } else {
        let result = envelope.result.unwrap_or_default();
        warn!(%result, "authorization fetch returned error result");
        Err(AuthorizeError::BackendError(result))
    }
}
