//! Authorization ceremony against a scripted backend and authenticator.
//!
//! Run with: cargo test -p authz-core --test ceremony_test

mod support;

use authz_core::{
    authorize, codec, AuthorizeError, Ceremony, CeremonyState, Completion, PageState,
};
use serde_json::json;
use support::{context, sample_assertion, Call, FakeAuthenticator, FakeBackend, AUTHID};

fn options() -> serde_json::Value {
    json!({
        "challenge": codec::encode(b"challenge-bytes"),
        "allowCredentials": [
            { "id": codec::encode(b"cred-a"), "type": "public-key" },
            { "id": codec::encode(b"cred-b"), "type": "public-key" }
        ],
        "timeout": 60000,
        "userVerification": "preferred"
    })
}

fn correlation_of(path: &str) -> &str {
    path.split_once("?r=").map(|(_, r)| r).unwrap_or_default()
}

#[tokio::test]
async fn successful_ceremony_submits_encoded_assertion() {
    let backend = FakeBackend::new()
        .reply(200, options())
        .reply(200, json!({ "result": "OK" }));
    let authenticator = FakeAuthenticator::succeeding();
    let ctx = context(None);

    let ceremony = Ceremony::new(&ctx, &backend, &authenticator);
    let corr = ceremony.correlation().to_string();
    assert_eq!(ceremony.state(), &CeremonyState::Idle);

    let (state, outcome) = ceremony.run().await;
    assert_eq!(state, CeremonyState::Completed);
    assert_eq!(outcome, Ok(Completion { redirect: None }));

    let requests = authenticator.requests.borrow();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].challenge, b"challenge-bytes");
    assert_eq!(requests[0].allow_credentials.len(), 2);
    assert_eq!(requests[0].allow_credentials[1].id, b"cred-b");
    assert_eq!(requests[0].allow_credentials[1].credential_type, "public-key");
    assert_eq!(requests[0].extra.get("userVerification"), Some(&json!("preferred")));

    let calls = backend.calls();
    assert_eq!(calls.len(), 2);
    let Call::Get(options_path) = &calls[0] else {
        panic!("expected options GET, got {:?}", calls[0]);
    };
    let Call::Put(submit_path, body) = &calls[1] else {
        panic!("expected assertion PUT, got {:?}", calls[1]);
    };
    assert_eq!(
        options_path,
        &format!("/acme/fido2/authentication_options?r={corr}")
    );
    assert_eq!(submit_path, &format!("/acme/fido2/authentication?r={corr}"));

    let expected = sample_assertion();
    assert_eq!(body["id"], json!(expected.id));
    assert_eq!(body["rawId"], json!(codec::encode(&expected.raw_id)));
    assert_eq!(body["type"], json!("public-key"));
    assert_eq!(body["authenticatorAttachment"], json!("platform"));
    assert_eq!(
        body["response"]["clientDataJSON"],
        json!(codec::encode(&expected.response.client_data_json))
    );
    assert_eq!(
        body["response"]["userHandle"],
        json!(codec::encode(b"user-1"))
    );
    assert_eq!(body["action"], json!({ "method": "authorize", "authid": AUTHID }));
}

#[tokio::test]
async fn each_attempt_gets_a_fresh_correlation_id() {
    let backend = FakeBackend::new()
        .reply_raw(500, "")
        .reply_raw(500, "");
    let authenticator = FakeAuthenticator::succeeding();
    let ctx = context(None);

    let _ = authorize(&ctx, &backend, &authenticator).await;
    let _ = authorize(&ctx, &backend, &authenticator).await;

    let calls = backend.calls();
    let (Call::Get(a), Call::Get(b)) = (&calls[0], &calls[1]) else {
        panic!("expected two option fetches: {calls:?}");
    };
    assert_ne!(correlation_of(a), correlation_of(b));
}

#[tokio::test]
async fn options_status_failure_is_distinguishable() {
    let backend = FakeBackend::new().reply_raw(502, "");
    let authenticator = FakeAuthenticator::succeeding();

    let err = authorize(&context(None), &backend, &authenticator)
        .await
        .unwrap_err();

    assert_eq!(err, AuthorizeError::OptionsFetchFailed(502));
    assert!(authenticator.requests.borrow().is_empty());
    assert_eq!(backend.calls().len(), 1);
}

#[tokio::test]
async fn platform_rejection_is_opaque_and_nothing_is_submitted() {
    let backend = FakeBackend::new().reply(200, options());
    let authenticator = FakeAuthenticator::rejecting();
    let ctx = context(Some("https://example.com/next"));

    let (state, outcome) = Ceremony::new(&ctx, &backend, &authenticator).run().await;

    assert_eq!(
        state,
        CeremonyState::Failed(AuthorizeError::CredentialVerificationFailed)
    );
    let mut page = PageState::new();
    page.apply_details(Ok(json!({})));
    let ticket = page.begin_ceremony().unwrap();
    let nav = page.finish_ceremony(ticket, outcome);
    assert_eq!(nav, None);
    assert_eq!(page.view().error, "FIDO2 credential verification failed.");

    assert!(backend
        .calls()
        .iter()
        .all(|call| matches!(call, Call::Get(_))));
}

#[tokio::test]
async fn malformed_options_collapse_to_verification_failure() {
    let backend = FakeBackend::new().reply(200, json!({ "challenge": "%%%" }));
    let authenticator = FakeAuthenticator::succeeding();

    let err = authorize(&context(None), &backend, &authenticator)
        .await
        .unwrap_err();

    assert_eq!(err, AuthorizeError::CredentialVerificationFailed);
    assert!(authenticator.requests.borrow().is_empty());
}

#[tokio::test]
async fn submit_transport_failure_collapses_to_verification_failure() {
    let backend = FakeBackend::new().reply(200, options()).fail("network down");
    let authenticator = FakeAuthenticator::succeeding();

    let err = authorize(&context(None), &backend, &authenticator)
        .await
        .unwrap_err();
    assert_eq!(err, AuthorizeError::CredentialVerificationFailed);
}

#[tokio::test]
async fn submit_status_failure_is_distinguishable() {
    let backend = FakeBackend::new().reply(200, options()).reply_raw(401, "");
    let authenticator = FakeAuthenticator::succeeding();

    let err = authorize(&context(None), &backend, &authenticator)
        .await
        .unwrap_err();
    assert_eq!(err, AuthorizeError::AssertionSubmitFailed(401));
}

#[tokio::test]
async fn rejected_submission_shows_backend_message() {
    let backend = FakeBackend::new()
        .reply(200, options())
        .reply(200, json!({ "result": "ERROR", "message": "bad signature" }));
    let authenticator = FakeAuthenticator::succeeding();

    let mut page = PageState::new();
    page.apply_details(Ok(json!({})));
    let ticket = page.begin_ceremony().unwrap();
    let outcome = authorize(&context(Some("/next")), &backend, &authenticator).await;
    let nav = page.finish_ceremony(ticket, outcome);

    assert_eq!(nav, None);
    assert!(page.view().error.contains("bad signature"));
}

#[tokio::test]
async fn submission_without_result_falls_back_to_message_then_generic_text() {
    for (body, expected) in [
        (
            json!({ "message": "bad signature" }),
            "Authorization failed. bad signature",
        ),
        (json!({}), "Authorization failed. General error."),
        (json!({ "result": null }), "Authorization failed. General error."),
    ] {
        let backend = FakeBackend::new().reply(200, options()).reply(200, body.clone());
        let authenticator = FakeAuthenticator::succeeding();

        let err = authorize(&context(None), &backend, &authenticator)
            .await
            .unwrap_err();
        assert!(
            matches!(err, AuthorizeError::AuthorizationRejected(_)),
            "body {body}: {err:?}"
        );
        assert_eq!(err.to_string(), expected, "body {body}");
    }
}

#[tokio::test]
async fn success_with_redirect_navigates_exactly_once() {
    let backend = FakeBackend::new()
        .reply(200, options())
        .reply(200, json!({ "result": "OK" }));
    let authenticator = FakeAuthenticator::succeeding();

    let mut page = PageState::new();
    page.apply_details(Ok(json!({})));
    let ticket = page.begin_ceremony().unwrap();
    let outcome = authorize(
        &context(Some("https://example.com/next")),
        &backend,
        &authenticator,
    )
    .await;

    let mut navigations = Vec::new();
    navigations.extend(page.finish_ceremony(ticket, outcome));
    assert_eq!(navigations, vec!["https://example.com/next".to_string()]);
    assert!(!page.view().show_error);
}

#[tokio::test]
async fn success_without_redirect_stays_put_without_error() {
    let backend = FakeBackend::new()
        .reply(200, options())
        .reply(200, json!({ "result": "OK" }));
    let authenticator = FakeAuthenticator::succeeding();

    let mut page = PageState::new();
    page.apply_details(Ok(json!({})));
    let ticket = page.begin_ceremony().unwrap();
    let outcome = authorize(&context(None), &backend, &authenticator).await;
    let nav = page.finish_ceremony(ticket, outcome);

    assert_eq!(nav, None);
    let view = page.view();
    assert!(!view.show_error);
    assert!(view.show_status);
}
