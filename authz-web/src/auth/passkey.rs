//! WebAuthn assertion ceremony via `navigator.credentials.get`.
//!
//! Binary fields cross the JS boundary as `Uint8Array`/`ArrayBuffer`;
//! text encoding for the backend happens in `authz-core`.

use async_trait::async_trait;
use authz_core::{
    AssertionRequest, CredentialAuthenticator, PlatformAssertion, PlatformAssertionResponse,
    PlatformError,
};
use js_sys::{Array, Object, Reflect, Uint8Array};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AuthenticatorAssertionResponse, CredentialRequestOptions, PublicKeyCredential};

/// The browser's platform credential API.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserAuthenticator;

#[async_trait(?Send)]
impl CredentialAuthenticator for BrowserAuthenticator {
    async fn get_assertion(
        &self,
        request: AssertionRequest,
    ) -> Result<PlatformAssertion, PlatformError> {
        let options = request_options(&request)?;
        let credentials = web_sys::window()
            .ok_or_else(|| PlatformError::Unavailable("no global `window`".to_string()))?
            .navigator()
            .credentials();

        let promise = credentials
            .get_with_options(&options)
            .map_err(describe_js_error)?;
        let credential = JsFuture::from(promise).await.map_err(describe_js_error)?;
        read_assertion(credential)
    }
}

/// `{ publicKey: { ...extra, challenge, allowCredentials } }`
fn request_options(request: &AssertionRequest) -> Result<CredentialRequestOptions, PlatformError> {
    let extra = serde_json::to_string(&request.extra)
        .map_err(|e| PlatformError::Unavailable(format!("options not serializable: {e}")))?;
    let public_key: Object = js_sys::JSON::parse(&extra)
        .map_err(describe_js_error)?
        .unchecked_into();

    set(
        &public_key,
        "challenge",
        &Uint8Array::from(request.challenge.as_slice()),
    )?;

    let allow = Array::new();
    for descriptor in &request.allow_credentials {
        let entry = Object::new();
        set(&entry, "id", &Uint8Array::from(descriptor.id.as_slice()))?;
        set(&entry, "type", &JsValue::from_str(&descriptor.credential_type))?;
        allow.push(&entry);
    }
    set(&public_key, "allowCredentials", &allow)?;

    let options = Object::new();
    set(&options, "publicKey", &public_key)?;
    Ok(options.unchecked_into())
}

fn read_assertion(value: JsValue) -> Result<PlatformAssertion, PlatformError> {
    let credential: PublicKeyCredential = value.dyn_into().map_err(|_| {
        PlatformError::UnexpectedCredential("not a PublicKeyCredential".to_string())
    })?;
    let response: AuthenticatorAssertionResponse =
        credential.response().dyn_into().map_err(|_| {
            PlatformError::UnexpectedCredential("response is not an assertion".to_string())
        })?;

    // Not every browser exposes this yet.
    let authenticator_attachment =
        Reflect::get(&credential, &JsValue::from_str("authenticatorAttachment"))
            .ok()
            .and_then(|v| v.as_string());

    Ok(PlatformAssertion {
        id: credential.id(),
        raw_id: Uint8Array::new(&credential.raw_id()).to_vec(),
        credential_type: credential.type_(),
        authenticator_attachment,
        response: PlatformAssertionResponse {
            authenticator_data: Uint8Array::new(&response.authenticator_data()).to_vec(),
            client_data_json: Uint8Array::new(&response.client_data_json()).to_vec(),
            signature: Uint8Array::new(&response.signature()).to_vec(),
            user_handle: response
                .user_handle()
                .map(|handle| Uint8Array::new(&handle).to_vec()),
        },
    })
}

fn set(target: &Object, key: &str, value: &JsValue) -> Result<(), PlatformError> {
    Reflect::set(target, &JsValue::from_str(key), value)
        .map(|_| ())
        .map_err(describe_js_error)
}

/// Extract .name + .message from a DOMException if possible
fn describe_js_error(e: JsValue) -> PlatformError {
    let field = |key: &str| {
        Reflect::get(&e, &JsValue::from_str(key))
            .ok()
            .and_then(|v| v.as_string())
            .unwrap_or_default()
    };
    let name = field("name");
    let message = field("message");
    if name.is_empty() && message.is_empty() {
        return PlatformError::Rejected {
            name: "Error".to_string(),
            message: e.as_string().unwrap_or_else(|| format!("{e:?}")),
        };
    }
    PlatformError::Rejected { name, message }
}
