mod common;

use reqwest::StatusCode;
use serde_json::{Value, json};

fn valid_safari_payload() -> Value {
    json!({
        "formType": "safari-form",
        "name": "A",
        "phone": "123",
        "date": "2024-01-01",
        "safari": "Desert Safari",
        "zone": "North",
        "timing": "2 days",
        "agree": true,
    })
}

fn entry_keys(record: &uktourism::models::Submission) -> Vec<String> {
    record
        .form_data
        .as_array()
        .expect("form_data is an array")
        .iter()
        .map(|e| e["key"].as_str().unwrap().to_string())
        .collect()
}

fn entry_value(record: &uktourism::models::Submission, key: &str) -> Value {
    record
        .form_data
        .as_array()
        .expect("form_data is an array")
        .iter()
        .find(|e| e["key"] == key)
        .unwrap_or_else(|| panic!("no entry for {key}"))
        .get("value")
        .unwrap()
        .clone()
}

// ── Welcome ─────────────────────────────────────────────────────

#[tokio::test]
async fn welcome_route_greets() {
    let app = common::spawn_app().await;

    let resp = app.client.get(app.url("/api/test")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.unwrap(), "Welcome to the UKTOURISM");
}

// ── Rejected payloads ───────────────────────────────────────────

#[tokio::test]
async fn empty_json_object_rejected() {
    let app = common::spawn_app().await;

    let (body, status) = app.submit_json(&json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No form data received");

    assert!(app.store.records().is_empty());
    assert_eq!(app.renderer.calls(), 0);
    assert!(app.mailer.sent().is_empty());
}

#[tokio::test]
async fn empty_body_rejected() {
    let app = common::spawn_app().await;

    let (body, status) = app.submit_raw(None, Vec::new()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No form data received");
}

#[tokio::test]
async fn field_less_payload_rejected() {
    let app = common::spawn_app().await;

    let (body, status) = app
        .submit_raw(Some("application/json"), b"[1, 2]".to_vec())
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No form data received");
}

#[tokio::test]
async fn missing_discriminator_rejected() {
    let app = common::spawn_app().await;

    let (body, status) = app.submit_json(&json!({ "name": "A" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Unknown form type");

    assert!(app.store.records().is_empty());
}

#[tokio::test]
async fn unknown_discriminator_rejected() {
    let app = common::spawn_app().await;

    let (body, status) = app
        .submit_json(&json!({ "formType": "trek-form", "name": "A" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Unknown form type");
}

#[tokio::test]
async fn malformed_json_rejected() {
    let app = common::spawn_app().await;

    let (body, status) = app
        .submit_raw(Some("application/json"), b"{not json".to_vec())
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid JSON"));
}

#[tokio::test]
async fn safari_missing_fields_listed_in_order() {
    let app = common::spawn_app().await;

    // phone and date absent; safari falls back to its default and so is
    // never reported missing.
    let (body, status) = app
        .submit_json(&json!({
            "formType": "safari-form",
            "name": "Amit",
            "zone": "North",
            "timing": "Morning",
        }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing fields: phone, date");

    assert!(app.store.records().is_empty());
    assert!(app.mailer.sent().is_empty());
}

#[tokio::test]
async fn customized_tour_requires_agreement() {
    let app = common::spawn_app().await;

    let (body, status) = app
        .submit_json(&json!({
            "formType": "customized-tour-form",
            "fullName": "Bob",
            "mobileNumber": "123",
        }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing fields: agree");
}

// ── Accepted submissions ────────────────────────────────────────

#[tokio::test]
async fn safari_submission_stores_ordered_record() {
    let app = common::spawn_app().await;

    let (body, status) = app.submit_json(&valid_safari_payload()).await;
    assert_eq!(status, StatusCode::OK, "unexpected response: {body}");
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Form submitted successfully");

    let records = app.store.records();
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.form_type, "safari-form");
    assert_eq!(
        entry_keys(record),
        vec![
            "name", "phone", "email", "safari", "zone", "date", "timing", "persons", "message",
            "agree", "formType"
        ]
    );
    assert_eq!(entry_value(record, "name"), "A");
    assert_eq!(entry_value(record, "email"), "");
    assert_eq!(entry_value(record, "persons"), 1);
    assert_eq!(entry_value(record, "formType"), "safari-form");

    assert_eq!(app.renderer.calls(), 1);
    let sent = app.mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].subject, "New Safari Enquiry");
    assert_eq!(sent[0].attachment_name, "safari-form-Enquiry.pdf");
    assert_eq!(sent[0].pdf, common::STUB_PDF);
    assert!(sent[0].html_body.contains("<h2>New Safari Enquiry</h2>"));
}

#[tokio::test]
async fn customized_submission_stores_ordered_record() {
    let app = common::spawn_app().await;

    let (body, status) = app
        .submit_json(&json!({
            "formType": "customized-tour-form",
            "fullName": "Bob",
            "mobileNumber": "99",
            "departureCity": "Delhi",
            "numberOfDays": 4,
            "agree": true,
        }))
        .await;
    assert_eq!(status, StatusCode::OK, "unexpected response: {body}");

    let records = app.store.records();
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.form_type, "customized-tour-form");
    assert_eq!(
        entry_keys(record),
        vec![
            "fullName",
            "mobileNumber",
            "email",
            "departureCity",
            "location",
            "numberOfPersons",
            "date",
            "numberOfDays",
            "textarea",
            "agree",
            "tourTitle",
            "formType"
        ]
    );
    assert_eq!(entry_value(record, "numberOfPersons"), 1);
    assert_eq!(entry_value(record, "numberOfDays"), 4);
    assert_eq!(entry_value(record, "tourTitle"), "Customized Tour");
    assert!(entry_value(record, "date").is_null());

    let sent = app.mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].subject, "New Customized Tour Enquiry");
    assert_eq!(sent[0].attachment_name, "customized-tour-form-Enquiry.pdf");
}

#[tokio::test]
async fn fallback_keys_fill_canonical_fields() {
    let app = common::spawn_app().await;

    let (_, status) = app
        .submit_json(&json!({
            "formType": "safari-form",
            "fullName": "Riya",
            "mobileNumber": "55",
            "tourTitle": "Tiger Safari",
            "location": "Ranthambore",
            "numberOfDays": "3 days",
            "date": "2024-05-05",
        }))
        .await;
    assert_eq!(status, StatusCode::OK);

    let records = app.store.records();
    let record = &records[0];
    assert_eq!(entry_value(record, "name"), "Riya");
    assert_eq!(entry_value(record, "phone"), "55");
    assert_eq!(entry_value(record, "safari"), "Tiger Safari");
    assert_eq!(entry_value(record, "zone"), "Ranthambore");
    assert_eq!(entry_value(record, "timing"), "3 days");
}

#[tokio::test]
async fn primary_key_wins_over_fallback() {
    let app = common::spawn_app().await;

    let mut payload = valid_safari_payload();
    payload["fullName"] = json!("Someone Else");
    let (_, status) = app.submit_json(&payload).await;
    assert_eq!(status, StatusCode::OK);

    let records = app.store.records();
    assert_eq!(entry_value(&records[0], "name"), "A");
}

#[tokio::test]
async fn string_values_are_trimmed() {
    let app = common::spawn_app().await;

    let mut payload = valid_safari_payload();
    payload["name"] = json!("  Bob  ");
    let (_, status) = app.submit_json(&payload).await;
    assert_eq!(status, StatusCode::OK);

    let records = app.store.records();
    assert_eq!(entry_value(&records[0], "name"), "Bob");
}

#[tokio::test]
async fn urlencoded_submission_accepted() {
    let app = common::spawn_app().await;

    let (body, status) = app
        .submit_form(&[
            ("formType", "safari-form"),
            ("name", "Meera"),
            ("phone", "777"),
            ("date", "2024-02-02"),
            ("zone", "South"),
            ("timing", "Evening"),
        ])
        .await;
    assert_eq!(status, StatusCode::OK, "unexpected response: {body}");

    let records = app.store.records();
    assert_eq!(records.len(), 1);
    assert_eq!(entry_value(&records[0], "name"), "Meera");
    // No persons key submitted, so the default applies.
    assert_eq!(entry_value(&records[0], "persons"), 1);
}

#[tokio::test]
async fn multipart_submission_accepted() {
    let app = common::spawn_app().await;

    let boundary = "------------------------forminput42";
    let mut body = String::new();
    for (name, value) in [
        ("formType", "safari-form"),
        ("name", "Meera"),
        ("phone", "777"),
        ("date", "2024-02-02"),
        ("zone", "South"),
        ("timing", "Evening"),
    ] {
        body.push_str(&format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        ));
    }
    body.push_str(&format!("--{boundary}--\r\n"));

    let (resp, status) = app
        .submit_raw(
            Some(&format!("multipart/form-data; boundary={boundary}")),
            body.into_bytes(),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "unexpected response: {resp}");

    let records = app.store.records();
    assert_eq!(records.len(), 1);
    assert_eq!(entry_value(&records[0], "zone"), "South");
}

#[tokio::test]
async fn json_body_with_plain_content_type_still_parses() {
    let app = common::spawn_app().await;

    let (_, status) = app
        .submit_raw(
            Some("text/plain"),
            valid_safari_payload().to_string().into_bytes(),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn repeat_submissions_stack_records() {
    let app = common::spawn_app().await;

    let (_, first) = app.submit_json(&valid_safari_payload()).await;
    let (_, second) = app.submit_json(&valid_safari_payload()).await;
    assert_eq!(first, StatusCode::OK);
    assert_eq!(second, StatusCode::OK);

    assert_eq!(app.store.records().len(), 2);
    assert_eq!(app.mailer.sent().len(), 2);
}

// ── Downstream failures ─────────────────────────────────────────

#[tokio::test]
async fn render_failure_keeps_record_and_returns_500() {
    let app = common::spawn_app().await;
    app.renderer.set_failing(true);

    let (body, status) = app.submit_json(&valid_safari_payload()).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Server error while processing submission");

    // The record was persisted before rendering; no mail went out.
    assert_eq!(app.store.records().len(), 1);
    assert!(app.mailer.sent().is_empty());
}

#[tokio::test]
async fn mail_failure_keeps_record_and_returns_500() {
    let app = common::spawn_app().await;
    app.mailer.set_failing(true);

    let (body, status) = app.submit_json(&valid_safari_payload()).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Server error while processing submission");

    assert_eq!(app.store.records().len(), 1);
    assert_eq!(app.renderer.calls(), 1);
}

#[tokio::test]
async fn store_failure_returns_500_without_rendering() {
    let app = common::spawn_app().await;
    app.store.set_failing(true);

    let (body, status) = app.submit_json(&valid_safari_payload()).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Server error while processing submission");

    assert_eq!(app.renderer.calls(), 0);
    assert!(app.mailer.sent().is_empty());
}

#[tokio::test]
async fn missing_mailer_returns_500_after_persisting() {
    let app = common::spawn_app_without_mailer().await;

    let (body, status) = app.submit_json(&valid_safari_payload()).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Server error while processing submission");

    assert_eq!(app.store.records().len(), 1);
    assert_eq!(app.renderer.calls(), 1);
}

// ── CORS & response headers ─────────────────────────────────────

#[tokio::test]
async fn cors_preflight_allows_configured_origin() {
    let app = common::spawn_app().await;

    let resp = app
        .client
        .request(reqwest::Method::OPTIONS, app.url("/api/form/submit"))
        .header("origin", "http://localhost:3000")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "content-type")
        .send()
        .await
        .unwrap();

    assert_eq!(
        resp.headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("http://localhost:3000")
    );
    let methods = resp
        .headers()
        .get("access-control-allow-methods")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    for method in ["GET", "POST", "PUT", "DELETE"] {
        assert!(methods.contains(method), "methods missing {method}: {methods}");
    }
    let headers = resp
        .headers()
        .get("access-control-allow-headers")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase();
    assert!(headers.contains("content-type"), "headers: {headers}");
    assert!(headers.contains("authorization"), "headers: {headers}");
}

#[tokio::test]
async fn unlisted_origin_gets_no_cors_allowance() {
    let app = common::spawn_app().await;

    let resp = app
        .client
        .get(app.url("/api/test"))
        .header("origin", "http://evil.example")
        .send()
        .await
        .unwrap();

    assert!(
        resp.headers().get("access-control-allow-origin").is_none(),
        "unlisted origin must not be allowed"
    );

    // The configured origin is still mirrored back on plain requests.
    let resp = app
        .client
        .get(app.url("/api/test"))
        .header("origin", "http://localhost:3000")
        .send()
        .await
        .unwrap();

    assert_eq!(
        resp.headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("http://localhost:3000")
    );
}

#[tokio::test]
async fn security_headers_present() {
    let app = common::spawn_app().await;

    let resp = app.client.get(app.url("/api/test")).send().await.unwrap();
    let headers = resp.headers();
    assert_eq!(
        headers.get("x-content-type-options").unwrap(),
        "nosniff"
    );
    assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
    assert_eq!(
        headers.get("referrer-policy").unwrap(),
        "strict-origin-when-cross-origin"
    );
}
