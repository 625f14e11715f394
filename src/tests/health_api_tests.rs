#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};

    use crate::tests::{empty_request, json_request, send, send_raw, setup_test_app};

    #[tokio::test]
    async fn test_healthz_endpoint() {
        let (app, _) = setup_test_app();
        let (status, headers, body) = send_raw(&app, empty_request(Method::GET, "/healthz")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(&body[..], b"ok");
        assert_eq!(headers["x-frame-options"], "DENY");
    }

    #[tokio::test]
    async fn test_version_endpoint() {
        let (app, _) = setup_test_app();
        let (status, _, v) = send(&app, empty_request(Method::GET, "/version")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(v["name"], "userguard");
        assert!(!v["version"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_metrics_endpoint() {
        let (app, _) = setup_test_app();
        send(&app, json_request(Method::POST, "/users", r#"{"name":"Alice"}"#)).await;
        send(&app, json_request(Method::POST, "/users", r#"{"name":"<i>"}"#)).await;

        let (status, _, v) = send(&app, empty_request(Method::GET, "/metrics")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(v["users_created"], 1);
        assert_eq!(v["payloads_scanned"], 2);
        assert_eq!(v["payloads_rejected"], 1);
        assert_eq!(v["users_deleted"], 0);
    }

    #[tokio::test]
    async fn test_metrics_prometheus_endpoint() {
        let (app, _) = setup_test_app();
        let (status, headers, body) = send_raw(&app, empty_request(Method::GET, "/metrics/prometheus")).await;

        assert_eq!(status, StatusCode::OK);
        assert!(headers["content-type"].to_str().unwrap().starts_with("text/plain"));
        let body_str = String::from_utf8(body).unwrap();
        assert!(body_str.contains("userguard_users_created 0"));
        assert!(body_str.contains("userguard_users_stored 0"));
        assert!(body_str.contains("# TYPE userguard_uptime_seconds gauge"));
    }
}
