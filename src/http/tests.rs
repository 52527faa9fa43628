//! Tests for the HTTP module

use super::mock::MockTransport;
use super::*;
use crate::config::ClientConfig;
use crate::error::Error;
use crate::types::{Domain, HttpMethod};
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use std::sync::Arc;
use test_case::test_case;
use wiremock::matchers::{body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn get(path: &str) -> Request {
    Request::new(HttpMethod::GET, "https://api.example.com", path, "AC123")
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ============================================================================
// Parameter Encoding Tests
// ============================================================================

#[test]
fn test_query_params_keep_insertion_order() {
    let mut request = get("/Calls.json");
    request.add_query_param("To", "+14155551212");
    request.add_query_param("Status", "completed");
    request.add_query_param("To", "+14155550000");

    assert_eq!(
        request.encode_query_params(),
        "To=%2B14155551212&To=%2B14155550000&Status=completed"
    );
}

#[test]
fn test_repeated_post_params_are_not_overwritten() {
    let mut request = Request::new(HttpMethod::POST, "https://api.example.com", "/Messages.json", "AC123");
    request.add_post_param("MediaUrl", "https://a.example/1.png");
    request.add_post_param("MediaUrl", "https://a.example/2.png");

    assert_eq!(
        request.post_params().get("MediaUrl").unwrap(),
        ["https://a.example/1.png", "https://a.example/2.png"]
    );
    assert_eq!(
        request.encode_form_body(),
        "MediaUrl=https%3A%2F%2Fa.example%2F1.png&MediaUrl=https%3A%2F%2Fa.example%2F2.png"
    );
    assert!(request.encode_query_params().is_empty());
}

#[test_case("FriendlyName", "my phone", "FriendlyName=my+phone" ; "space becomes plus")]
#[test_case("Body", "a&b=c", "Body=a%26b%3Dc" ; "separators are escaped")]
#[test_case("Date>", "2020-01-01", "Date%3E=2020-01-01" ; "key is escaped too")]
#[test_case("Name", "caf\u{e9}", "Name=caf%C3%A9" ; "utf8 bytes")]
#[test_case("Safe", "a-b_c.d*e", "Safe=a-b_c.d*e" ; "unreserved characters pass")]
fn test_param_encoding(name: &str, value: &str, expected: &str) {
    let mut request = get("/Things.json");
    request.add_query_param(name, value);
    assert_eq!(request.encode_query_params(), expected);
}

#[test]
fn test_param_map_equality_ignores_key_order() {
    let mut a = ParamMap::new();
    a.add("A", "1");
    a.add("B", "2");

    let mut b = ParamMap::new();
    b.add("B", "2");
    b.add("A", "1");
    assert_eq!(a, b);

    b.add("A", "3");
    assert_ne!(a, b);
}

// ============================================================================
// Date Range Tests
// ============================================================================

#[test]
fn test_date_range_lower_bound_only() {
    let mut request = get("/Calls.json");
    request.add_query_date_range("StartTime", date(2020, 1, 1)..);

    assert_eq!(request.query_params().get("StartTime>").unwrap(), ["2020-01-01"]);
    assert!(request.query_params().get("StartTime<").is_none());
}

#[test]
fn test_date_range_both_bounds() {
    let mut request = get("/Calls.json");
    request.add_query_date_range("StartTime", date(2020, 1, 1)..=date(2020, 2, 29));

    assert_eq!(request.query_params().get("StartTime>").unwrap(), ["2020-01-01"]);
    assert_eq!(request.query_params().get("StartTime<").unwrap(), ["2020-02-29"]);
    assert_eq!(
        request.encode_query_params(),
        "StartTime%3E=2020-01-01&StartTime%3C=2020-02-29"
    );
}

#[test]
fn test_date_range_upper_bound_only() {
    let mut request = get("/Calls.json");
    request.add_query_date_range("EndTime", ..date(2021, 12, 31));

    assert!(request.query_params().get("EndTime>").is_none());
    assert_eq!(request.query_params().get("EndTime<").unwrap(), ["2021-12-31"]);
}

#[test]
fn test_date_range_unbounded_adds_nothing() {
    let mut request = get("/Calls.json");
    request.add_query_date_range::<std::ops::RangeFull>("StartTime", ..);

    assert!(request.query_params().is_empty());
}

// ============================================================================
// Auth Tests
// ============================================================================

#[test]
fn test_requires_authentication() {
    let mut request = get("/Calls.json");
    assert!(!request.requires_authentication());

    request.set_auth("", "");
    assert!(request.requires_authentication());
}

#[test]
fn test_requires_authentication_with_one_half() {
    let mut request = get("/Calls.json");
    request.set_username(Some(""));
    request.set_password(None::<String>);
    assert!(request.requires_authentication());
    assert_eq!(request.username(), Some(""));
    assert_eq!(request.password(), None);
    assert_eq!(request.auth_string().unwrap(), "Basic Og==");

    let mut request = get("/Calls.json");
    request.set_username(None::<String>);
    request.set_password(Some("token"));
    assert!(request.requires_authentication());
    assert_eq!(request.auth_string().unwrap(), "Basic OnRva2Vu");
}

#[test]
fn test_cleared_credentials_do_not_require_authentication() {
    let mut request = get("/Calls.json");
    request.set_auth("a", "b");
    request.set_username(None::<String>);
    request.set_password(None::<String>);

    assert!(!request.requires_authentication());
    assert_eq!(request.username(), None);
    assert_eq!(request.password(), None);
}

#[test]
fn test_auth_string() {
    let mut request = get("/Calls.json");
    request.set_auth("a", "b");
    assert_eq!(request.auth_string().unwrap(), "Basic YTpi");
}

#[test]
fn test_auth_string_rejects_non_ascii() {
    let mut request = get("/Calls.json");
    request.set_auth("user", "pässword");

    let err = request.auth_string().unwrap_err();
    assert!(matches!(err, Error::Configuration { .. }));
}

// ============================================================================
// URL Construction Tests
// ============================================================================

#[test]
fn test_construct_url_without_query() {
    let request = get("/2010-04-01/Accounts/AC123/Calls.json");
    assert_eq!(
        request.construct_url().unwrap().as_str(),
        "https://api.example.com/2010-04-01/Accounts/AC123/Calls.json"
    );
}

#[test]
fn test_construct_url_with_query() {
    let mut request = get("/Calls.json");
    request.add_query_param("PageSize", "20");
    request.add_query_param("Status", "in progress");

    assert_eq!(
        request.construct_url().unwrap().as_str(),
        "https://api.example.com/Calls.json?PageSize=20&Status=in+progress"
    );
}

#[test]
fn test_construct_url_invalid() {
    let request = Request::new(HttpMethod::GET, "not a url", "/Calls.json", "AC123");
    let err = request.construct_url().unwrap_err();
    assert!(matches!(err, Error::InvalidUrl(_)));
}

#[test]
fn test_absolute_path_is_used_verbatim() {
    let request = get("https://other.example.com/Calls.json?Page=1&PageToken=PAabc");
    assert_eq!(request.url(), "https://other.example.com/Calls.json?Page=1&PageToken=PAabc");
    assert_eq!(
        request.construct_url().unwrap().as_str(),
        "https://other.example.com/Calls.json?Page=1&PageToken=PAabc"
    );
}

#[test]
fn test_base_and_path_are_joined_once() {
    let request = Request::new(HttpMethod::GET, "https://api.example.com/", "Calls.json", "AC123");
    assert_eq!(request.url(), "https://api.example.com/Calls.json");
    assert_eq!(request.account_sid(), "AC123");
}

// ============================================================================
// Response Tests
// ============================================================================

#[test]
fn test_response_json() {
    let response = Response::new(200, r#"{"sid": "CA1"}"#);
    assert_eq!(response.status(), 200);

    let value: serde_json::Value = response.json().unwrap();
    assert_eq!(value["sid"], "CA1");
}

#[test]
fn test_response_malformed_json() {
    let response = Response::new(200, "{not json");
    let err = response.json::<serde_json::Value>().unwrap_err();
    assert!(matches!(err, Error::JsonParse(_)));
}

// ============================================================================
// RestClient Tests
// ============================================================================

#[tokio::test]
async fn test_client_applies_account_credentials() {
    let mock = Arc::new(MockTransport::new());
    mock.push_json(200, &serde_json::json!({}));

    let client = RestClient::with_transport(ClientConfig::new("AC123", "token"), mock.clone());
    let request = client.new_request(HttpMethod::GET, Domain::Api, "/Calls.json");
    client.request(request).await.unwrap();

    let sent = mock.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].username(), Some("AC123"));
    assert_eq!(sent[0].password(), Some("token"));
    assert_eq!(sent[0].url(), "https://api.twilio.com/Calls.json");
}

#[tokio::test]
async fn test_client_keeps_request_credentials() {
    let mock = Arc::new(MockTransport::new());
    mock.push_json(200, &serde_json::json!({}));

    let client = RestClient::with_transport(ClientConfig::new("AC123", "token"), mock.clone());
    let mut request = client.new_request(HttpMethod::GET, Domain::Api, "/Calls.json");
    request.set_auth("SK456", "secret");
    client.request(request).await.unwrap();

    assert_eq!(mock.sent()[0].username(), Some("SK456"));
}

#[tokio::test]
async fn test_client_keeps_partial_request_credentials() {
    let mock = Arc::new(MockTransport::new());
    mock.push_json(200, &serde_json::json!({}));

    let client = RestClient::with_transport(ClientConfig::new("AC123", "token"), mock.clone());
    let mut request = client.new_request(HttpMethod::GET, Domain::Api, "/Calls.json");
    request.set_username(Some(""));
    client.request(request).await.unwrap();

    let sent = mock.sent();
    assert_eq!(sent[0].username(), Some(""));
    assert_eq!(sent[0].password(), None);
}

// ============================================================================
// HttpTransport Tests
// ============================================================================

fn client_for(server: &MockServer) -> RestClient {
    let config = ClientConfig::builder("AC123", "token")
        .base_url(server.uri())
        .build();
    RestClient::new(config).unwrap()
}

#[tokio::test]
async fn test_http_transport_get_with_query_and_auth() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/2010-04-01/Accounts/AC123/Calls.json"))
        .and(query_param("PageSize", "2"))
        .and(query_param("To", "+14155551212"))
        .and(header("Authorization", "Basic QUMxMjM6dG9rZW4="))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"calls": []})))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let mut request = client.new_request(
        HttpMethod::GET,
        Domain::Api,
        "/2010-04-01/Accounts/AC123/Calls.json",
    );
    request.add_query_param("To", "+14155551212");
    request.add_query_param("PageSize", "2");

    let response = client.request(request).await.unwrap().unwrap();
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_http_transport_posts_form_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/Credentials.json"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string("Username=alice&Password=p+w"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({"sid": "CR1"})))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let mut request = client.new_request(HttpMethod::POST, Domain::Api, "/Credentials.json");
    request.add_post_param("Username", "alice");
    request.add_post_param("Password", "p w");

    let response = client.request(request).await.unwrap().unwrap();
    assert_eq!(response.status(), 201);

    let body: serde_json::Value = response.json().unwrap();
    assert_eq!(body["sid"], "CR1");
}

#[tokio::test]
async fn test_http_transport_returns_error_status_as_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/Missing.json"))
        .respond_with(ResponseTemplate::new(404).set_body_string("nope"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let request = client.new_request(HttpMethod::GET, Domain::Api, "/Missing.json");

    let response = client.request(request).await.unwrap().unwrap();
    assert_eq!(response.status(), 404);
    assert_eq!(response.text(), "nope");
}

#[tokio::test]
async fn test_http_transport_connection_failure_is_no_response() {
    let config = ClientConfig::builder("AC123", "token")
        .base_url("http://127.0.0.1:1")
        .build();
    let client = RestClient::new(config).unwrap();
    let request = client.new_request(HttpMethod::GET, Domain::Api, "/Calls.json");

    let response = client.request(request).await.unwrap();
    assert!(response.is_none());
}

#[tokio::test]
async fn test_http_transport_rejects_bad_credentials_before_sending() {
    let config = ClientConfig::builder("AC123", "tökén")
        .base_url("http://127.0.0.1:1")
        .build();
    let client = RestClient::new(config).unwrap();
    let request = client.new_request(HttpMethod::GET, Domain::Api, "/Calls.json");

    let err = client.request(request).await.unwrap_err();
    assert!(matches!(err, Error::Configuration { .. }));
}

#[test]
fn test_http_transport_rate_limit_flag() {
    let config = ClientConfig::builder("AC123", "token")
        .rate_limit(RateLimiterConfig::new(5, 5))
        .build();
    assert!(HttpTransport::new(&config).unwrap().has_rate_limiter());

    let config = ClientConfig::new("AC123", "token");
    assert!(!HttpTransport::new(&config).unwrap().has_rate_limiter());
}

#[tokio::test]
async fn test_http_transport_throttles_per_host() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let config = ClientConfig::builder("AC123", "token")
        .base_url(mock_server.uri())
        .rate_limit(RateLimiterConfig::new(1, 1))
        .build();
    let client = RestClient::new(config).unwrap();
    let request = client.new_request(HttpMethod::GET, Domain::Api, "/Calls.json");

    client.request(request.clone()).await.unwrap().unwrap();
    let second = client.request(request);
    assert!(
        tokio::time::timeout(std::time::Duration::from_millis(300), second)
            .await
            .is_err(),
        "second request to the same host must wait for budget"
    );
}
