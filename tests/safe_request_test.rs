use api_explorer_cli::config::{ApiKeys, Endpoints};
use api_explorer_cli::retry::{RetryPolicy, SafeResponse};
use api_explorer_cli::ApiClient;
use httpmock::prelude::*;
use serde_json::json;
use std::time::Duration;

fn client_for(base_url: &str) -> ApiClient {
    ApiClient::new(Endpoints::all(base_url), ApiKeys::default()).unwrap()
}

fn no_delay(attempts: u32) -> RetryPolicy {
    RetryPolicy::new(attempts, Duration::ZERO)
}

#[test]
fn test_safe_get_wraps_data() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/posts/1");
        then.status(200).json_body(json!({"id": 1, "title": "hello"}));
    });

    let api = client_for(&server.base_url());
    let result = api.safe_get(&server.url("/posts/1"), Duration::from_secs(5));
    assert_eq!(result, SafeResponse::ok(json!({"id": 1, "title": "hello"})));
}

#[test]
fn test_safe_get_reports_http_status() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/posts/99999");
        then.status(404).json_body(json!({}));
    });

    let api = client_for(&server.base_url());
    let result = api.safe_get(&server.url("/posts/99999"), Duration::from_secs(5));
    assert_eq!(result, SafeResponse::err("HTTP error 404"));
}

#[test]
fn test_safe_get_rejects_non_json_body() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/html");
        then.status(200).body("<html>not json</html>");
    });

    let api = client_for(&server.base_url());
    let result = api.safe_get(&server.url("/html"), Duration::from_secs(5));
    assert_eq!(result, SafeResponse::err("Request failed"));
}

#[test]
fn test_safe_get_reports_connection_problem() {
    // Nothing listens on port 1.
    let api = client_for("http://127.0.0.1:1");
    let result = api.safe_get("http://127.0.0.1:1/posts/1", Duration::from_secs(5));
    assert_eq!(result, SafeResponse::err("Internet connection problem"));
}

#[test]
fn test_safe_get_reports_timeout() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/slow");
        then.status(200)
            .delay(Duration::from_millis(1500))
            .json_body(json!({}));
    });

    let api = client_for(&server.base_url());
    let result = api.safe_get(&server.url("/slow"), Duration::from_millis(200));
    assert_eq!(result, SafeResponse::err("Request timed out"));
}

#[test]
fn test_retry_stops_after_fixed_attempts() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/v1/tickers/btc-bitcoin");
        then.status(503);
    });

    let result = client_for(&server.base_url()).ticker_with_retry("bitcoin", &no_delay(3));
    mock.assert_hits(3);
    assert!(!result.success);
    assert_eq!(result.error.as_deref(), Some("Failed after retries"));
}

#[test]
fn test_retry_returns_first_success() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/v1/tickers/sol-solana");
        then.status(200).json_body(json!({
            "name": "Solana",
            "symbol": "SOL",
            "quotes": {"USD": {"price": 142.3}}
        }));
    });

    let result = client_for(&server.base_url()).ticker_with_retry("solana", &no_delay(3));
    mock.assert_hits(1);
    let data = result.into_result().unwrap();
    assert!(api_explorer_cli::api::validate_crypto_data(&data));
    assert_eq!(
        api_explorer_cli::report::safe_crypto(&data),
        vec!["Coin: Solana", "Price: 142.3"]
    );
}

#[test]
fn test_retry_keeps_invalid_shape_for_validation() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/v1/tickers/weird-coin");
        then.status(200).json_body(json!({"name": "Weird", "quotes": {}}));
    });

    let data = client_for(&server.base_url())
        .ticker_with_retry("weird-coin", &no_delay(3))
        .into_result()
        .unwrap();
    assert!(!api_explorer_cli::api::validate_crypto_data(&data));
    assert_eq!(
        api_explorer_cli::report::safe_crypto(&data),
        vec!["Invalid crypto data format"]
    );
}
