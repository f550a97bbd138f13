//! Wire types exchanged with the authorization backend and the platform
//! credential API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::codec::{self, DecodeError};
use crate::error::GENERAL_ERROR;

pub const RESULT_OK: &str = "OK";
pub const RESULT_NOT_FOUND: &str = "NOT_FOUND";

// ============================================================================
// Backend envelopes
// ============================================================================

/// `{ result?, data?, message? }` - shared by the detail read and the
/// assertion submission. Non-string `result`/`message` values read as absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ResultEnvelope {
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub result: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub message: Option<String>,
}

impl ResultEnvelope {
    pub fn is_ok(&self) -> bool {
        self.result.as_deref() == Some(RESULT_OK)
    }

    pub fn result_is(&self, expected: &str) -> bool {
        self.result.as_deref() == Some(expected)
    }

    /// Human-readable failure reason: `message`, then `result`, then a generic text.
    pub fn failure_reason(&self) -> String {
        [self.message.as_deref(), self.result.as_deref()]
            .into_iter()
            .flatten()
            .find(|s| !s.is_empty())
            .unwrap_or(GENERAL_ERROR)
            .to_string()
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

/// Opaque description of what is being authorized. Displayed as-is.
pub type AuthorizationPayload = Value;

// ============================================================================
// Ceremony options (server -> platform)
// ============================================================================

/// Credential descriptor as sent by the backend, id text-encoded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EncodedCredentialDescriptor {
    pub id: String,
    #[serde(rename = "type")]
    pub credential_type: String,
}

/// Server-issued `PublicKeyCredentialRequestOptions`, binary fields text-encoded.
///
/// Fields other than `challenge` and `allowCredentials` are carried in
/// `extra` and handed to the platform unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CredentialChallengeOptions {
    pub challenge: String,
    #[serde(default)]
    pub allow_credentials: Vec<EncodedCredentialDescriptor>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialDescriptor {
    pub id: Vec<u8>,
    pub credential_type: String,
}

/// Options ready for the platform ceremony, binary fields decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct AssertionRequest {
    pub challenge: Vec<u8>,
    pub allow_credentials: Vec<CredentialDescriptor>,
    pub extra: Map<String, Value>,
}

impl TryFrom<CredentialChallengeOptions> for AssertionRequest {
    type Error = DecodeError;

    fn try_from(options: CredentialChallengeOptions) -> Result<Self, Self::Error> {
        let allow_credentials = options
            .allow_credentials
            .into_iter()
            .map(|c| {
                Ok(CredentialDescriptor {
                    id: codec::decode(&c.id)?,
                    credential_type: c.credential_type,
                })
            })
            .collect::<Result<Vec<_>, DecodeError>>()?;

        Ok(Self {
            challenge: codec::decode(&options.challenge)?,
            allow_credentials,
            extra: options.extra,
        })
    }
}

// ============================================================================
// Assertion (platform -> server)
// ============================================================================

/// Raw output of `navigator.credentials.get`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformAssertion {
    pub id: String,
    pub raw_id: Vec<u8>,
    pub credential_type: String,
    pub authenticator_attachment: Option<String>,
    pub response: PlatformAssertionResponse,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformAssertionResponse {
    pub authenticator_data: Vec<u8>,
    pub client_data_json: Vec<u8>,
    pub signature: Vec<u8>,
    pub user_handle: Option<Vec<u8>>,
}

/// What the submitted assertion is meant to do on the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActionDescriptor {
    pub method: String,
    pub authid: String,
}

impl ActionDescriptor {
    pub fn authorize(authid: impl Into<String>) -> Self {
        Self {
            method: "authorize".to_string(),
            authid: authid.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SignedAssertionResponse {
    pub authenticator_data: String,
    #[serde(rename = "clientDataJSON")]
    pub client_data_json: String,
    pub signature: String,
    pub user_handle: Option<String>,
}

/// Body of `PUT /{tenant}/fido2/authentication`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SignedAssertion {
    pub id: String,
    pub raw_id: String,
    #[serde(rename = "type")]
    pub credential_type: String,
    pub authenticator_attachment: Option<String>,
    pub response: SignedAssertionResponse,
    pub action: ActionDescriptor,
}

impl SignedAssertion {
    pub fn new(assertion: PlatformAssertion, action: ActionDescriptor) -> Self {
        let r = assertion.response;
        Self {
            id: assertion.id,
            raw_id: codec::encode(&assertion.raw_id),
            credential_type: assertion.credential_type,
            authenticator_attachment: assertion.authenticator_attachment,
            response: SignedAssertionResponse {
                authenticator_data: codec::encode(&r.authenticator_data),
                client_data_json: codec::encode(&r.client_data_json),
                signature: codec::encode(&r.signature),
                user_handle: r.user_handle.as_deref().map(codec::encode),
            },
            action,
        }
    }
}
