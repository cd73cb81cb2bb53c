//! Decorator pipeline tests against a deterministic mock wire.

mod support;

use fluent_wire::retry::RetryOnStatus;
use fluent_wire::{headers, AuthWire, Error, RetryWire, Wire};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use support::{status, MockWire};

const DELAY: Duration = Duration::from_millis(10);

fn ok_mock() -> Arc<MockWire> {
    Arc::new(MockWire::new(|_, _, _, _, _| Ok(status(200))))
}

#[tokio::test]
async fn retry_returns_on_first_success() {
    let mock = ok_mock();
    let wire = RetryWire::with_policy(mock.clone(), 3, DELAY);

    let response = wire
        .send("GET", "https://api.example.com", &HashMap::new(), None)
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(mock.attempts(), 1);
}

#[tokio::test]
async fn retry_recovers_from_server_errors() {
    let mock = Arc::new(MockWire::new(|attempt, _, _, _, _| {
        if attempt < 3 {
            Ok(status(500))
        } else {
            Ok(status(200))
        }
    }));
    let wire = RetryWire::with_policy(mock.clone(), 3, DELAY);

    let response = wire
        .send("GET", "https://api.example.com", &HashMap::new(), None)
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(mock.attempts(), 3);
}

#[tokio::test]
async fn retry_recovers_from_too_many_requests() {
    let mock = Arc::new(MockWire::new(|attempt, _, _, _, _| {
        if attempt < 2 {
            Ok(status(429))
        } else {
            Ok(status(200))
        }
    }));
    let wire = RetryWire::with_policy(mock.clone(), 3, DELAY);

    let response = wire
        .send("GET", "https://api.example.com", &HashMap::new(), None)
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(mock.attempts(), 2);
}

#[tokio::test]
async fn retry_leaves_client_errors_alone() {
    let mock = Arc::new(MockWire::new(|_, _, _, _, _| Ok(status(400))));
    let wire = RetryWire::with_policy(mock.clone(), 3, DELAY);

    let response = wire
        .send("GET", "https://api.example.com", &HashMap::new(), None)
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(mock.attempts(), 1);
}

#[tokio::test]
async fn exhausted_attempts_return_last_response() {
    let mock = Arc::new(MockWire::new(|_, _, _, _, _| Ok(status(500))));
    let wire = RetryWire::with_policy(mock.clone(), 2, DELAY);

    let response = wire
        .send("GET", "https://api.example.com", &HashMap::new(), None)
        .await
        .unwrap();

    // The status path never throws on exhaustion; the caller gets the
    // last 500 to interpret.
    assert_eq!(response.status().as_u16(), 500);
    assert_eq!(mock.attempts(), 3);
}

#[tokio::test]
async fn retry_recovers_from_timeouts() {
    let mock = Arc::new(MockWire::new(|attempt, _, _, _, _| {
        if attempt < 3 {
            Err(Error::Timeout)
        } else {
            Ok(status(200))
        }
    }));
    let wire = RetryWire::with_policy(mock.clone(), 3, DELAY);

    let response = wire
        .send("GET", "https://api.example.com", &HashMap::new(), None)
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(mock.attempts(), 3);
}

#[tokio::test]
async fn retry_recovers_from_cancellation() {
    let mock = Arc::new(MockWire::new(|attempt, _, _, _, _| {
        if attempt < 2 {
            Err(Error::Cancelled)
        } else {
            Ok(status(200))
        }
    }));
    let wire = RetryWire::with_policy(mock.clone(), 3, DELAY);

    let response = wire
        .send("GET", "https://api.example.com", &HashMap::new(), None)
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(mock.attempts(), 2);
}

#[tokio::test]
async fn persistent_failure_exhausts_into_distinct_error() {
    let mock = Arc::new(MockWire::new(|_, _, _, _, _| Err(Error::Timeout)));
    let wire = RetryWire::with_policy(mock.clone(), 2, DELAY);

    let result = wire
        .send("GET", "https://api.example.com", &HashMap::new(), None)
        .await;

    match result {
        Err(Error::RetriesExhausted { attempts, last }) => {
            assert_eq!(attempts, 3);
            assert!(matches!(*last, Error::Timeout));
        }
        other => panic!("expected RetriesExhausted, got {other:?}"),
    }
    assert_eq!(mock.attempts(), 3);
}

#[tokio::test]
async fn unretryable_failure_propagates_immediately() {
    let mock = Arc::new(MockWire::new(|_, _, _, _, _| {
        Err(Error::Serialization("bad payload".to_string()))
    }));
    let wire = RetryWire::with_policy(mock.clone(), 3, DELAY);

    let result = wire
        .send("POST", "https://api.example.com", &HashMap::new(), None)
        .await;

    assert!(matches!(result, Err(Error::Serialization(_))));
    assert_eq!(mock.attempts(), 1);
}

#[tokio::test]
async fn custom_predicate_retries_its_own_statuses() {
    let mock = Arc::new(MockWire::new(|attempt, _, _, _, _| {
        if attempt < 2 {
            Ok(status(404))
        } else {
            Ok(status(200))
        }
    }));
    let wire = RetryWire::with_policy(mock.clone(), 3, DELAY)
        .retry_predicate(Box::new(RetryOnStatus::new([404])));

    let response = wire
        .send("GET", "https://api.example.com", &HashMap::new(), None)
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(mock.attempts(), 2);
}

#[tokio::test]
async fn custom_predicate_fully_replaces_default() {
    // With a 404-only predicate, a 500 must not be retried.
    let mock = Arc::new(MockWire::new(|_, _, _, _, _| Ok(status(500))));
    let wire = RetryWire::with_policy(mock.clone(), 3, DELAY)
        .retry_if(|r: &fluent_wire::WireResponse| r.status().as_u16() == 404);

    let response = wire
        .send("GET", "https://api.example.com", &HashMap::new(), None)
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 500);
    assert_eq!(mock.attempts(), 1);
}

#[tokio::test]
async fn zero_budget_makes_exactly_one_attempt_on_response() {
    let mock = Arc::new(MockWire::new(|_, _, _, _, _| Ok(status(500))));
    let wire = RetryWire::with_policy(mock.clone(), 0, DELAY);

    let response = wire
        .send("GET", "https://api.example.com", &HashMap::new(), None)
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 500);
    assert_eq!(mock.attempts(), 1);
}

#[tokio::test]
async fn zero_budget_makes_exactly_one_attempt_on_failure() {
    let mock = Arc::new(MockWire::new(|_, _, _, _, _| Err(Error::Timeout)));
    let wire = RetryWire::with_policy(mock.clone(), 0, DELAY);

    let result = wire
        .send("GET", "https://api.example.com", &HashMap::new(), None)
        .await;

    match result {
        Err(Error::RetriesExhausted { attempts, .. }) => assert_eq!(attempts, 1),
        other => panic!("expected RetriesExhausted, got {other:?}"),
    }
    assert_eq!(mock.attempts(), 1);
}

#[tokio::test]
async fn auth_injects_authorization_header() {
    let seen = Arc::new(Mutex::new(None));
    let seen_in_handler = seen.clone();
    let mock = MockWire::new(move |_, _, _, headers, _| {
        *seen_in_handler.lock().unwrap() = Some(headers.clone());
        Ok(status(200))
    });
    let wire = AuthWire::new(mock, "Bearer test-token");

    let response = wire
        .send("GET", "https://api.example.com", &HashMap::new(), None)
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    let delegated = seen.lock().unwrap().clone().unwrap();
    assert_eq!(
        delegated.get(headers::AUTHORIZATION).map(String::as_str),
        Some("Bearer test-token")
    );
}

#[tokio::test]
async fn auth_never_mutates_caller_headers() {
    let wire = AuthWire::new(ok_mock(), "Bearer test-token");

    let mut caller_headers = HashMap::new();
    caller_headers.insert("X-Custom".to_string(), "Value".to_string());

    wire.send("GET", "https://api.example.com", &caller_headers, None)
        .await
        .unwrap();

    assert_eq!(caller_headers.len(), 1);
    assert!(!caller_headers.contains_key(headers::AUTHORIZATION));
    assert_eq!(caller_headers.get("X-Custom").map(String::as_str), Some("Value"));
}

#[tokio::test]
async fn auth_preserves_other_headers_and_overrides_caller_credential() {
    let seen = Arc::new(Mutex::new(None));
    let seen_in_handler = seen.clone();
    let mock = MockWire::new(move |_, _, _, headers, _| {
        *seen_in_handler.lock().unwrap() = Some(headers.clone());
        Ok(status(200))
    });
    let wire = AuthWire::new(mock, "Bearer fresh-token");

    let mut caller_headers = HashMap::new();
    caller_headers.insert(headers::AUTHORIZATION.to_string(), "Bearer stale".to_string());
    caller_headers.insert("X-Custom".to_string(), "Value".to_string());

    wire.send("GET", "https://api.example.com", &caller_headers, None)
        .await
        .unwrap();

    let delegated = seen.lock().unwrap().clone().unwrap();
    assert_eq!(delegated.len(), 2);
    assert_eq!(
        delegated.get(headers::AUTHORIZATION).map(String::as_str),
        Some("Bearer fresh-token")
    );
    assert_eq!(delegated.get("X-Custom").map(String::as_str), Some("Value"));
    // The caller's own credential entry is untouched.
    assert_eq!(
        caller_headers.get(headers::AUTHORIZATION).map(String::as_str),
        Some("Bearer stale")
    );
}

#[tokio::test]
async fn auth_passes_method_uri_and_body_through() {
    let mock = MockWire::new(|_, method, uri, _, body| {
        assert_eq!(method, "POST");
        assert_eq!(uri, "https://api.example.com/items");
        assert_eq!(body, Some(r#"{"data":"test"}"#));
        Ok(status(201))
    });
    let wire = AuthWire::new(mock, "Bearer test-token");

    let response = wire
        .send(
            "POST",
            "https://api.example.com/items",
            &HashMap::new(),
            Some(r#"{"data":"test"}"#),
        )
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 201);
}

#[tokio::test]
async fn retry_around_auth_reinjects_header_every_attempt() {
    let mock = Arc::new(MockWire::new(|attempt, _, _, headers, _| {
        assert_eq!(
            headers.get(headers::AUTHORIZATION).map(String::as_str),
            Some("Bearer test-token")
        );
        if attempt < 2 {
            Ok(status(500))
        } else {
            Ok(status(200))
        }
    }));
    let wire = RetryWire::with_policy(
        AuthWire::new(mock.clone(), "Bearer test-token"),
        3,
        DELAY,
    );

    let response = wire
        .send("GET", "https://api.example.com", &HashMap::new(), None)
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(mock.attempts(), 2);
}

#[tokio::test]
async fn auth_around_retry_delivers_header_every_attempt() {
    let mock = Arc::new(MockWire::new(|attempt, _, _, headers, _| {
        assert_eq!(
            headers.get(headers::AUTHORIZATION).map(String::as_str),
            Some("Bearer test-token")
        );
        if attempt < 2 {
            Ok(status(500))
        } else {
            Ok(status(200))
        }
    }));
    let wire = AuthWire::new(
        RetryWire::with_policy(mock.clone(), 3, DELAY),
        "Bearer test-token",
    );

    let response = wire
        .send("GET", "https://api.example.com", &HashMap::new(), None)
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(mock.attempts(), 2);
}

#[tokio::test]
async fn nested_retry_wires_compound_attempts() {
    let mock = Arc::new(MockWire::new(|attempt, _, _, _, _| {
        if attempt < 3 {
            Ok(status(500))
        } else {
            Ok(status(200))
        }
    }));
    // Inner budget exhausts into a 500 response, which the outer wire then
    // retries; two failures and one success fit inside 2 x 2 attempts.
    let wire = RetryWire::with_policy(
        RetryWire::with_policy(mock.clone(), 1, Duration::from_millis(5)),
        1,
        Duration::from_millis(5),
    );

    let response = wire
        .send("GET", "https://api.example.com", &HashMap::new(), None)
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(mock.attempts(), 3);
}

#[tokio::test(flavor = "multi_thread")]
async fn shared_wire_serves_concurrent_calls() {
    let mock = Arc::new(MockWire::new(|_, _, uri, _, _| {
        if uri.ends_with("/flaky") {
            Ok(status(503))
        } else {
            Ok(status(200))
        }
    }));
    let wire = Arc::new(RetryWire::with_policy(mock.clone(), 2, DELAY));

    let a = {
        let wire = wire.clone();
        tokio::spawn(async move {
            wire.send("GET", "https://api.example.com/ok", &HashMap::new(), None)
                .await
        })
    };
    let b = {
        let wire = wire.clone();
        tokio::spawn(async move {
            wire.send("GET", "https://api.example.com/flaky", &HashMap::new(), None)
                .await
        })
    };

    let fast = a.await.unwrap().unwrap();
    let slow = b.await.unwrap().unwrap();

    assert_eq!(fast.status().as_u16(), 200);
    // The flaky call burned its whole budget and still hands back the 503.
    assert_eq!(slow.status().as_u16(), 503);
    assert_eq!(mock.attempts(), 4);
}

#[test]
fn blocking_send_matches_async_behavior() {
    let mock = Arc::new(MockWire::new(|attempt, _, _, _, _| {
        if attempt < 2 {
            Ok(status(500))
        } else {
            Ok(status(200))
        }
    }));
    let wire = RetryWire::with_policy(mock.clone(), 3, DELAY);

    let response = wire
        .send_blocking("GET", "https://api.example.com", &HashMap::new(), None)
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(mock.attempts(), 2);
}

#[test]
fn blocking_send_surfaces_failures() {
    let mock = Arc::new(MockWire::new(|_, _, _, _, _| Err(Error::Timeout)));
    let wire = RetryWire::with_policy(mock.clone(), 1, DELAY);

    let result = wire.send_blocking("GET", "https://api.example.com", &HashMap::new(), None);

    match result {
        Err(Error::RetriesExhausted { attempts, .. }) => assert_eq!(attempts, 2),
        other => panic!("expected RetriesExhausted, got {other:?}"),
    }
}
