mod common;

use common::{client, FakeTransport};
use lc_api_types::{CollectPaymentRequest, CustomerForm};
use lc_core::client::endpoints;
use lc_core::error::NOT_LOGGED_IN;
use lc_core::transport::{FilePart, Method, RequestBody};
use lc_core::ApiError;
use serde_json::json;

#[tokio::test]
async fn missing_token_never_reaches_transport() {
    let fake = FakeTransport::new();
    fake.reply(Method::Get, endpoints::LOANS, 200, json!([]));
    let api = client(&fake, None);

    assert_eq!(api.list_loans().await, Err(ApiError::NotAuthenticated));
    assert_eq!(api.schedule_board().await, Err(ApiError::NotAuthenticated));
    assert_eq!(
        api.assign_schedule(5, 3).await.unwrap_err(),
        ApiError::NotAuthenticated
    );
    assert_eq!(fake.call_count(), 0);
    assert_eq!(
        ApiError::NotAuthenticated.fetch_message("whatever"),
        NOT_LOGGED_IN
    );
}

#[tokio::test]
async fn blank_token_counts_as_missing() {
    let fake = FakeTransport::new();
    let api = client(&fake, Some("   "));
    assert_eq!(api.list_agents().await, Err(ApiError::NotAuthenticated));
    assert_eq!(fake.call_count(), 0);
}

#[tokio::test]
async fn token_header_format() {
    let fake = FakeTransport::new();
    fake.reply(Method::Get, endpoints::AGENTS, 200, json!([{"id": 3, "username": "ravi_agent"}]));
    let api = client(&fake, Some("x"));

    let agents = api.list_agents().await.unwrap();
    assert_eq!(agents.len(), 1);

    let calls = fake.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].url, "http://api.test/api/auth/agents/");
    assert_eq!(calls[0].header_value("authorization"), Some("Token x"));
    assert_eq!(calls[0].header_value("Accept"), Some("application/json"));
}

#[tokio::test]
async fn non_2xx_carries_server_reason() {
    let fake = FakeTransport::new();
    fake.reply(
        Method::Post,
        &endpoints::assign_schedule(5),
        400,
        json!({"error": "Agent is inactive"}),
    );
    let api = client(&fake, Some("x"));

    let err = api.assign_schedule(5, 3).await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Status {
            status: 400,
            reason: Some("Agent is inactive".into())
        }
    );
    assert_eq!(err.action_message("Failed to assign agent."), "Agent is inactive");
}

#[tokio::test]
async fn unscripted_path_is_404_without_reason_leak() {
    let fake = FakeTransport::new();
    let api = client(&fake, Some("x"));
    let err = api.list_customers().await.unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 404, .. }));
    assert_eq!(err.fetch_message("Failed to fetch customers."), "Failed to fetch customers.");
}

#[tokio::test]
async fn transport_failure_maps_to_transport_error() {
    let fake = FakeTransport::new();
    fake.refuse(Method::Get, endpoints::LOANS);
    let api = client(&fake, Some("x"));
    assert!(matches!(api.list_loans().await, Err(ApiError::Transport(_))));
}

#[tokio::test]
async fn malformed_body_is_decode_error() {
    let fake = FakeTransport::new();
    fake.reply_raw(Method::Get, endpoints::LOANS, 200, "<html>oops</html>");
    let api = client(&fake, Some("x"));
    assert!(matches!(api.list_loans().await, Err(ApiError::Decode(_))));
}

#[tokio::test]
async fn empty_success_body_decodes_as_object() {
    let fake = FakeTransport::new();
    fake.reply_raw(Method::Post, &endpoints::assign_schedule(5), 200, "");
    let api = client(&fake, Some("x"));
    let response = api.assign_schedule(5, 3).await.unwrap();
    assert_eq!(response.message, None);
    assert_eq!(response.assigned_to, None);
}

#[tokio::test]
async fn composite_fetch_fails_if_either_half_fails() {
    let fake = FakeTransport::new();
    fake.reply(Method::Get, endpoints::LOAN_SCHEDULES, 200, json!([]));
    fake.reply(Method::Get, endpoints::AGENTS, 500, json!({}));
    let api = client(&fake, Some("x"));

    let err = api.schedule_board().await.unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 500, .. }));
}

#[tokio::test]
async fn assign_posts_agent_id() {
    let fake = FakeTransport::new();
    fake.reply(
        Method::Post,
        &endpoints::assign_schedule(5),
        200,
        json!({"message": "ok", "assigned_to": 3}),
    );
    let api = client(&fake, Some("x"));
    api.assign_schedule(5, 3).await.unwrap();

    let calls = fake.calls();
    assert_eq!(calls[0].url, "http://api.test/api/auth/loan-schedules/5/assign/");
    assert_eq!(calls[0].body, RequestBody::Json(json!({"assigned_to": 3})));
}

#[tokio::test]
async fn collect_posts_method_and_amount() {
    let fake = FakeTransport::new();
    fake.reply(
        Method::Post,
        &endpoints::collect_payment(9),
        200,
        json!({"message": "Payment recorded"}),
    );
    let api = client(&fake, Some("x"));
    let response = api
        .collect_payment(
            9,
            &CollectPaymentRequest {
                payment_method: "upi".into(),
                paid_amount: "250".into(),
            },
        )
        .await
        .unwrap();
    assert_eq!(response.message.as_deref(), Some("Payment recorded"));
    assert_eq!(
        fake.calls()[0].body,
        RequestBody::Json(json!({"payment_method": "upi", "paid_amount": "250"}))
    );
}

#[tokio::test]
async fn upload_sends_one_part_per_file_plus_customer_id() {
    let fake = FakeTransport::new();
    fake.reply(Method::Post, endpoints::UPLOAD_DOCUMENTS, 201, json!({"message": "stored"}));
    let api = client(&fake, Some("x"));

    api.upload_documents(
        42,
        vec![
            FilePart::new("id.pdf", b"%PDF".to_vec()),
            FilePart::new("photo.png", vec![0x89, 0x50]).with_content_type("image/png"),
        ],
    )
    .await
    .unwrap();

    let calls = fake.calls();
    let RequestBody::Multipart(form) = &calls[0].body else {
        panic!("expected multipart body, got {:?}", calls[0].body);
    };
    assert_eq!(form.files.len(), 2);
    assert!(form.files.iter().all(|(name, _)| name == "documents"));
    assert_eq!(form.fields, vec![("customer_id".to_string(), "42".to_string())]);
}

#[tokio::test]
async fn login_needs_no_token() {
    let fake = FakeTransport::new();
    fake.reply(
        Method::Post,
        endpoints::LOGIN,
        200,
        json!({"token": "abc", "user": {"id": 1, "username": "admin", "email": "a@b.c", "role": "admin"}}),
    );
    let api = client(&fake, None);

    let login = api.login("a@b.c", "pw").await.unwrap();
    assert_eq!(login.token, "abc");
    assert_eq!(login.user.username, "admin");
    assert_eq!(fake.calls()[0].header_value("Authorization"), None);
}

#[tokio::test]
async fn customer_edit_is_a_put_to_its_own_path() {
    let fake = FakeTransport::new();
    fake.reply(
        Method::Put,
        &endpoints::customer(9),
        200,
        json!({"customer_id": 9, "full_name": "Asha Rao", "phone": "999"}),
    );
    let api = client(&fake, Some("x"));

    let form = CustomerForm {
        full_name: "Asha Rao".into(),
        phone: "999".into(),
        ..CustomerForm::default()
    };
    let updated = api.update_customer(9, &form).await.unwrap();
    assert_eq!(updated.phone, "999");

    let calls = fake.calls();
    assert_eq!(calls[0].method, Method::Put);
    assert_eq!(calls[0].url, "http://api.test/api/auth/customers/9/");
    assert_eq!(calls[0].header_value("authorization"), Some("Token x"));
    let RequestBody::Json(body) = &calls[0].body else {
        panic!("expected json body, got {:?}", calls[0].body);
    };
    assert_eq!(body["full_name"], "Asha Rao");
    assert_eq!(body["aadhar_number"], "");
}

#[tokio::test]
async fn loan_form_options_need_both_lists() {
    let fake = FakeTransport::new();
    fake.reply(Method::Get, endpoints::CUSTOMERS, 200, json!([]));
    fake.refuse(Method::Get, endpoints::LOAN_TYPES);
    let api = client(&fake, Some("x"));
    assert!(matches!(
        api.loan_form_options().await,
        Err(ApiError::Transport(_))
    ));

    let anonymous = client(&fake, None);
    let before = fake.call_count();
    assert_eq!(anonymous.loan_form_options().await, Err(ApiError::NotAuthenticated));
    assert_eq!(anonymous.create_customer(&CustomerForm::default()).await, Err(ApiError::NotAuthenticated));
    assert_eq!(fake.call_count(), before);
}
