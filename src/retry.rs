// The success/error wrapper returned by the "safe" requests and the fixed
// count retry helper built on top of it.

use serde::Serialize;
use serde_json::Value;
use std::thread;
use std::time::Duration;

pub const RETRY_EXHAUSTED: &str = "Failed after retries";

/// `{"success": true, "data": ...}` or `{"success": false, "error": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SafeResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SafeResponse {
    pub fn ok(data: Value) -> Self {
        SafeResponse {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        SafeResponse {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }

    /// Convert into a plain `Result`, with the error text as the error.
    pub fn into_result(self) -> Result<Value, String> {
        match (self.success, self.data, self.error) {
            (true, Some(data), _) => Ok(data),
            (true, None, _) => Ok(Value::Null),
            (false, _, error) => Err(error.unwrap_or_else(|| "Request failed".into())),
        }
    }
}

/// Fixed attempt count with a fixed pause between attempts. No backoff.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            attempts: 3,
            delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    pub fn new(attempts: u32, delay: Duration) -> Self {
        RetryPolicy { attempts, delay }
    }
}

/// Run `request` until it succeeds or the policy's attempts are used up.
/// `request` receives the 1-based attempt number.
pub fn with_retry<F>(policy: &RetryPolicy, mut request: F) -> SafeResponse
where
    F: FnMut(u32) -> SafeResponse,
{
    for attempt in 1..=policy.attempts {
        println!("Attempt {}", attempt);
        let result = request(attempt);
        if result.success {
            return result;
        }

        if attempt < policy.attempts {
            tracing::warn!(
                "Retrying... ({})",
                result.error.as_deref().unwrap_or("unknown error")
            );
            thread::sleep(policy.delay);
        }
    }

    SafeResponse::err(RETRY_EXHAUSTED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn quick(attempts: u32) -> RetryPolicy {
        RetryPolicy::new(attempts, Duration::ZERO)
    }

    #[test]
    fn stops_at_first_success() {
        let mut calls = 0;
        let result = with_retry(&quick(3), |attempt| {
            calls += 1;
            if attempt == 2 {
                SafeResponse::ok(json!({"id": 1}))
            } else {
                SafeResponse::err("Request timed out")
            }
        });
        assert_eq!(calls, 2);
        assert_eq!(result, SafeResponse::ok(json!({"id": 1})));
    }

    #[test]
    fn gives_up_after_fixed_count() {
        let mut calls = 0;
        let result = with_retry(&quick(3), |_| {
            calls += 1;
            SafeResponse::err("HTTP error 503")
        });
        assert_eq!(calls, 3);
        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("Failed after retries"));
    }

    #[test]
    fn no_pause_after_the_last_attempt() {
        let delay = Duration::from_millis(300);
        let started = std::time::Instant::now();
        let result = with_retry(&RetryPolicy::new(2, delay), |_| SafeResponse::err("x"));
        let elapsed = started.elapsed();

        assert_eq!(result.error.as_deref(), Some(RETRY_EXHAUSTED));
        assert!(elapsed >= delay, "expected one pause, took {:?}", elapsed);
        assert!(elapsed < delay * 2, "paused after the final attempt: {:?}", elapsed);
    }

    #[test]
    fn zero_attempts_never_calls() {
        let mut calls = 0;
        let result = with_retry(&quick(0), |_| {
            calls += 1;
            SafeResponse::ok(Value::Null)
        });
        assert_eq!(calls, 0);
        assert_eq!(result.into_result().unwrap_err(), RETRY_EXHAUSTED);
    }

    #[test]
    fn serializes_as_two_field_wrapper() {
        let ok = serde_json::to_value(SafeResponse::ok(json!([1, 2]))).unwrap();
        assert_eq!(ok, json!({"success": true, "data": [1, 2]}));
        let err = serde_json::to_value(SafeResponse::err("Request failed")).unwrap();
        assert_eq!(err, json!({"success": false, "error": "Request failed"}));
    }

    #[test]
    fn default_policy_is_three_attempts_one_second() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.attempts, 3);
        assert_eq!(policy.delay, Duration::from_secs(1));
    }
}
