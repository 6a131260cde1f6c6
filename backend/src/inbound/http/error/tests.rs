//! Tests for HTTP error mapping.

use super::*;
use crate::domain::{CONFIGURATION_MISSING_MESSAGE, Error};
use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use actix_web::http::header::CONTENT_TYPE;
use rstest::{fixture, rstest};
use rstest_bdd_macros::{given, then, when};
use serde_json::{Value, json};

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

async fn render(error: Error) -> (StatusCode, Option<String>, Option<String>, Value) {
    let response = ResponseError::error_response(&error);
    let status = response.status();
    let header = |name| {
        response
            .headers()
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned)
    };
    let trace_id = header(TRACE_ID_HEADER);
    let content_type = header(CONTENT_TYPE.as_str());
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let body = serde_json::from_slice(&bytes).expect("error body is JSON");
    (status, trace_id, content_type, body)
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] error: Error, #[case] expected: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), expected);
}

#[rstest]
#[actix_web::test]
async fn internal_errors_keep_message_and_drop_details(expected_trace_id: String) {
    let error = Error::internal(CONFIGURATION_MISSING_MESSAGE)
        .with_trace_id(expected_trace_id.clone())
        .with_details(json!({ "missing": ["PRODUCTS_TABLE_NAME"] }));

    let (status, trace_id, content_type, body) = render(error).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(trace_id.as_deref(), Some(expected_trace_id.as_str()));
    assert_eq!(content_type.as_deref(), Some("application/json"));
    assert_eq!(
        body,
        json!({
            "code": "internal_error",
            "message": CONFIGURATION_MISSING_MESSAGE,
            "traceId": TRACE_ID,
        })
    );
}

#[rstest]
#[actix_web::test]
async fn invalid_request_details_reach_the_client() {
    let error = Error::invalid_request("bad").with_details(json!({ "field": "price" }));

    let (status, trace_id, _, body) = render(error).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(trace_id.is_none());
    assert_eq!(body["message"], "bad");
    assert_eq!(body["details"], json!({ "field": "price" }));
}

#[given("an invalid request error code")]
fn an_invalid_request_error_code() -> ErrorCode {
    ErrorCode::InvalidRequest
}

#[when("the adapter maps the code to an HTTP status")]
fn the_adapter_maps_the_code_to_an_http_status(code: ErrorCode) -> StatusCode {
    super::status_for(code)
}

#[then("the status is 400 Bad Request")]
fn the_status_is_400_bad_request(status: StatusCode) {
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[rstest]
fn invalid_request_maps_to_bad_request() {
    let code = an_invalid_request_error_code();
    let status = the_adapter_maps_the_code_to_an_http_status(code);
    the_status_is_400_bad_request(status);
}

#[test]
fn from_actix_error_is_generic_internal_error() {
    let err: Error = actix_web::error::ErrorBadRequest("boom").into();

    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), "Internal server error");
    assert_eq!(err.details(), None);
}
