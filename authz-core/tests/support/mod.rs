//! In-memory backend and authenticator used by the integration tests.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;

use async_trait::async_trait;
use authz_core::{
    AssertionRequest, AuthorizationBackend, AuthorizationRequestContext, CredentialAuthenticator,
    HttpReply, PlatformAssertion, PlatformAssertionResponse, PlatformError, TransportError,
};

pub const AUTHID: &str = "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";

pub fn context(next: Option<&str>) -> AuthorizationRequestContext {
    AuthorizationRequestContext {
        authorization_id: AUTHID.to_string(),
        tenant_id: "acme".to_string(),
        next_url: next.map(str::to_string),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Get(String),
    Put(String, serde_json::Value),
}

/// Replies are handed out in order, one per request.
#[derive(Default)]
pub struct FakeBackend {
    replies: RefCell<VecDeque<Result<HttpReply, TransportError>>>,
    pub calls: RefCell<Vec<Call>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, status: u16, body: serde_json::Value) -> Self {
        self.replies
            .borrow_mut()
            .push_back(Ok(HttpReply::new(status, body.to_string())));
        self
    }

    pub fn reply_raw(self, status: u16, body: &str) -> Self {
        self.replies
            .borrow_mut()
            .push_back(Ok(HttpReply::new(status, body)));
        self
    }

    pub fn fail(self, message: &str) -> Self {
        self.replies
            .borrow_mut()
            .push_back(Err(TransportError(message.to_string())));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn next_reply(&self) -> Result<HttpReply, TransportError> {
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError("no scripted reply".to_string())))
    }
}

#[async_trait(?Send)]
impl AuthorizationBackend for FakeBackend {
    async fn get(&self, path: &str) -> Result<HttpReply, TransportError> {
        self.calls.borrow_mut().push(Call::Get(path.to_string()));
        self.next_reply()
    }

    async fn put_json(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<HttpReply, TransportError> {
        self.calls
            .borrow_mut()
            .push(Call::Put(path.to_string(), body.clone()));
        self.next_reply()
    }
}

pub struct FakeAuthenticator {
    outcome: Result<PlatformAssertion, PlatformError>,
    pub requests: RefCell<Vec<AssertionRequest>>,
}

impl FakeAuthenticator {
    pub fn succeeding() -> Self {
        Self {
            outcome: Ok(sample_assertion()),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn rejecting() -> Self {
        Self {
            outcome: Err(PlatformError::Rejected {
                name: "NotAllowedError".to_string(),
                message: "The operation either timed out or was not allowed.".to_string(),
            }),
            requests: RefCell::new(Vec::new()),
        }
    }
}

#[async_trait(?Send)]
impl CredentialAuthenticator for FakeAuthenticator {
    async fn get_assertion(
        &self,
        request: AssertionRequest,
    ) -> Result<PlatformAssertion, PlatformError> {
        self.requests.borrow_mut().push(request);
        self.outcome.clone()
    }
}

pub fn sample_assertion() -> PlatformAssertion {
    PlatformAssertion {
        id: "Y3JlZA".to_string(),
        raw_id: b"cred".to_vec(),
        credential_type: "public-key".to_string(),
        authenticator_attachment: Some("platform".to_string()),
        response: PlatformAssertionResponse {
            authenticator_data: vec![0x49, 0x96, 0x0d],
            client_data_json: br#"{"type":"webauthn.get"}"#.to_vec(),
            signature: vec![0x30, 0x45, 0x02],
            user_handle: Some(b"user-1".to_vec()),
        },
    }
}
