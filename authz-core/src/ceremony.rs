//! WebAuthn authorization ceremony.
//!
//! Idle -> OptionsRequested -> CeremonyPending -> AssertionSubmitted ->
//! Completed | Failed. Each [`Ceremony`] owns its correlation id and is
//! consumed by a single run; a retry is a new `Ceremony`.

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::context::AuthorizationRequestContext;
use crate::error::{AuthorizeError, PlatformError};
use crate::transport::{AuthorizationBackend, CorrelationId, Endpoints, HttpReply};
use crate::types::{
    ActionDescriptor, AssertionRequest, CredentialChallengeOptions, PlatformAssertion,
    ResultEnvelope, SignedAssertion,
};

/// The platform's public-key credential assertion API.
#[async_trait(?Send)]
pub trait CredentialAuthenticator {
    async fn get_assertion(
        &self,
        request: AssertionRequest,
    ) -> Result<PlatformAssertion, PlatformError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CeremonyState {
    Idle,
    OptionsRequested,
    CeremonyPending,
    AssertionSubmitted,
    Completed,
    Failed(AuthorizeError),
}

/// Successful outcome. `redirect` is where the page should go next, if anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub redirect: Option<String>,
}

pub struct Ceremony<'a, B: ?Sized, A: ?Sized> {
    ctx: &'a AuthorizationRequestContext,
    backend: &'a B,
    authenticator: &'a A,
    correlation: CorrelationId,
    state: CeremonyState,
}

impl<'a, B, A> Ceremony<'a, B, A>
where
    B: AuthorizationBackend + ?Sized,
    A: CredentialAuthenticator + ?Sized,
{
    pub fn new(ctx: &'a AuthorizationRequestContext, backend: &'a B, authenticator: &'a A) -> Self {
        Self {
            ctx,
            backend,
            authenticator,
            correlation: CorrelationId::new(),
            state: CeremonyState::Idle,
        }
    }

    pub fn correlation(&self) -> &CorrelationId {
        &self.correlation
    }

    pub fn state(&self) -> &CeremonyState {
        &self.state
    }

    fn transition(&mut self, next: CeremonyState) {
        debug!(r = %self.correlation, from = ?self.state, to = ?next, "ceremony transition");
        self.state = next;
    }

    /// Drive the ceremony to a terminal state.
    pub async fn run(mut self) -> (CeremonyState, Result<Completion, AuthorizeError>) {
        let outcome = self.execute().await;
        match &outcome {
            Ok(_) => self.transition(CeremonyState::Completed),
            Err(e) => {
                warn!(r = %self.correlation, error = %e, "authorization ceremony failed");
                self.transition(CeremonyState::Failed(e.clone()));
            }
        }
        (self.state, outcome)
    }

    async fn execute(&mut self) -> Result<Completion, AuthorizeError> {
        let ctx = self.ctx;
        let endpoints = Endpoints::for_tenant(&ctx.tenant_id);

        self.transition(CeremonyState::OptionsRequested);
        let reply = self
            .backend
            .get(&endpoints.authentication_options(&self.correlation))
            .await
            .map_err(|e| guard_failure("options transport", e))?;
        if reply.status != 200 {
            return Err(AuthorizeError::OptionsFetchFailed(reply.status));
        }
        let options: CredentialChallengeOptions = reply
            .json()
            .map_err(|e| guard_failure("options body", e))?;
        let request =
            AssertionRequest::try_from(options).map_err(|e| guard_failure("options decode", e))?;

        self.transition(CeremonyState::CeremonyPending);
        let assertion = self
            .authenticator
            .get_assertion(request)
            .await
            .map_err(|e| guard_failure("platform ceremony", e))?;

        let signed = SignedAssertion::new(
            assertion,
            ActionDescriptor::authorize(ctx.authorization_id.clone()),
        );
        let body = serde_json::to_value(&signed).map_err(|e| guard_failure("assertion body", e))?;

        self.transition(CeremonyState::AssertionSubmitted);
        let reply = self
            .backend
            .put_json(&endpoints.authentication(&self.correlation), &body)
            .await
            .map_err(|e| guard_failure("submit transport", e))?;
        interpret_submission(&reply)?;

        Ok(Completion {
            redirect: ctx.next_url.clone(),
        })
    }
}

fn interpret_submission(reply: &HttpReply) -> Result<(), AuthorizeError> {
    if reply.status != 200 {
        return Err(AuthorizeError::AssertionSubmitFailed(reply.status));
    }
    let envelope: ResultEnvelope = reply
        .json()
        .map_err(|e| guard_failure("submit body", e))?;
    if envelope.is_ok() {
        Ok(())
    } else {
        Err(AuthorizeError::AuthorizationRejected(
            envelope.failure_reason(),
        ))
    }
}

/// Anything that goes wrong inside the ceremony guard surfaces as the same
/// opaque error; the detail only reaches the debug log.
fn guard_failure(step: &str, detail: impl std::fmt::Display) -> AuthorizeError {
    debug!(step, %detail, "ceremony step failed");
    AuthorizeError::CredentialVerificationFailed
}

/// Run one authorization attempt with a fresh correlation id.
pub async fn authorize<B, A>(
    ctx: &AuthorizationRequestContext,
    backend: &B,
    authenticator: &A,
) -> Result<Completion, AuthorizeError>
where
    B: AuthorizationBackend + ?Sized,
    A: CredentialAuthenticator + ?Sized,
{
    let (_, outcome) = Ceremony::new(ctx, backend, authenticator).run().await;
    outcome
}
