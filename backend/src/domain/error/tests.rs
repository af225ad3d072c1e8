//! Regression coverage for the domain error payload.

use super::*;
use rstest::rstest;
use serde_json::json;
use uuid::Uuid;

#[rstest]
#[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(Error::unauthorized("who"), ErrorCode::Unauthorized)]
#[case(Error::forbidden("nope"), ErrorCode::Forbidden)]
#[case(Error::not_found("gone"), ErrorCode::NotFound)]
#[case(Error::conflict("taken"), ErrorCode::Conflict)]
#[case(Error::service_unavailable("down"), ErrorCode::ServiceUnavailable)]
#[case(Error::internal("boom"), ErrorCode::InternalError)]
fn constructors_set_expected_code(#[case] error: Error, #[case] code: ErrorCode) {
    assert_eq!(error.code(), code);
}

#[test]
fn serialises_with_camel_case_and_snake_case_code() {
    let error = Error::not_found("missing")
        .with_trace_id("abc")
        .with_details(json!({ "field": "studentId" }));

    let value = serde_json::to_value(&error).expect("serialise error");
    assert_eq!(value["code"], "not_found");
    assert_eq!(value["traceId"], "abc");
    assert_eq!(value["details"]["field"], "studentId");
}

#[test]
fn omits_optional_fields_when_absent() {
    let value = serde_json::to_value(Error::conflict("taken")).expect("serialise error");
    assert!(value.get("traceId").is_none());
    assert!(value.get("details").is_none());
}

#[tokio::test]
async fn captures_trace_id_in_scope() {
    let trace_id = TraceId::from_uuid(Uuid::new_v4());
    let error = TraceId::scope(trace_id, async { Error::internal("boom") }).await;
    assert_eq!(error.trace_id(), Some(trace_id.to_string().as_str()));
}

#[test]
fn has_no_trace_id_outside_scope() {
    assert!(Error::forbidden("nope").trace_id().is_none());
}
