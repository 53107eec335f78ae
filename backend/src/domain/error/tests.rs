//! Tests for the error payload constructors and serialisation contract.

use super::*;
use crate::domain::trace_id::TraceId;
use rstest::rstest;
use serde_json::json;

const FIXTURE_TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[rstest]
#[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(Error::unauthorized("who"), ErrorCode::Unauthorized)]
#[case(Error::forbidden("no"), ErrorCode::Forbidden)]
#[case(Error::not_found("gone"), ErrorCode::NotFound)]
#[case(Error::conflict("raced"), ErrorCode::Conflict)]
#[case(Error::service_unavailable("down"), ErrorCode::ServiceUnavailable)]
#[case(Error::internal("boom"), ErrorCode::InternalError)]
fn constructors_set_codes(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
fn try_new_rejects_empty_messages() {
    let result = Error::try_new(ErrorCode::InvalidRequest, "   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyMessage)));
}

#[rstest]
fn trace_id_is_none_out_of_scope() {
    let error = Error::internal("boom");
    assert!(error.trace_id().is_none());
}

#[rstest]
#[tokio::test]
async fn constructor_captures_trace_id_in_scope() {
    let trace_id: TraceId = FIXTURE_TRACE_ID.parse().expect("valid fixture UUID");
    let error = TraceId::scope(trace_id, async move { Error::internal("boom") }).await;

    assert_eq!(error.trace_id(), Some(FIXTURE_TRACE_ID));
}

#[rstest]
fn serialises_to_camel_case_and_skips_absent_fields() {
    let error = Error::invalid_request("bad");
    let value = serde_json::to_value(&error).expect("serialise error");

    assert_eq!(value.get("code"), Some(&json!("invalid_request")));
    assert_eq!(value.get("message"), Some(&json!("bad")));
    assert!(value.get("details").is_none());
    assert!(value.get("traceId").is_none());
}

#[rstest]
fn serialises_details_and_trace_id_when_present() {
    let error = Error::invalid_request("bad")
        .with_details(json!({ "field": "iban" }))
        .with_trace_id(FIXTURE_TRACE_ID.to_owned());
    let value = serde_json::to_value(&error).expect("serialise error");

    assert_eq!(
        value.get("details").and_then(|d| d.get("field")),
        Some(&json!("iban"))
    );
    assert_eq!(value.get("traceId"), Some(&json!(FIXTURE_TRACE_ID)));
}

#[rstest]
fn deserialisation_round_trips() {
    let original = Error::not_found("vendor missing").with_details(json!({ "id": "x" }));
    let payload = serde_json::to_string(&original).expect("serialise error");
    let decoded: Error = serde_json::from_str(&payload).expect("deserialise error");

    assert_eq!(decoded, original);
}

#[rstest]
fn deserialisation_rejects_empty_message() {
    let payload = json!({ "code": "not_found", "message": "  " }).to_string();
    let result: Result<Error, _> = serde_json::from_str(&payload);
    assert!(result.is_err());
}

#[rstest]
#[tokio::test]
async fn dto_without_trace_id_does_not_adopt_ambient_scope() {
    let trace_id: TraceId = FIXTURE_TRACE_ID.parse().expect("valid fixture UUID");
    let payload = json!({ "code": "not_found", "message": "gone" }).to_string();

    let decoded = TraceId::scope(trace_id, async move {
        serde_json::from_str::<Error>(&payload).expect("deserialise error")
    })
    .await;

    assert!(decoded.trace_id().is_none());
}
