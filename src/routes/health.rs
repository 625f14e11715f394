use crate::state::AppState;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

/// Plain-text `ok` while the server accepts connections.
pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

/// User and scanner counters as JSON.
pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    let snapshot = state.metrics.get_snapshot();
    Json(snapshot)
}

/// Same counters plus the stored-user gauge, in Prometheus text format.
pub async fn metrics_prometheus(State(state): State<AppState>) -> impl IntoResponse {
    let m = state.metrics.get_snapshot();
    let stored = state.store.len();
    let body = format!(
        "# HELP userguard_users_created Total users created\n# TYPE userguard_users_created counter\nuserguard_users_created {}\n\
# HELP userguard_users_updated Total users updated\n# TYPE userguard_users_updated counter\nuserguard_users_updated {}\n\
# HELP userguard_users_deleted Total users deleted\n# TYPE userguard_users_deleted counter\nuserguard_users_deleted {}\n\
# HELP userguard_users_stored Users currently stored\n# TYPE userguard_users_stored gauge\nuserguard_users_stored {}\n\
# HELP userguard_payloads_scanned Write payloads scanned\n# TYPE userguard_payloads_scanned counter\nuserguard_payloads_scanned {}\n\
# HELP userguard_payloads_rejected Write payloads rejected as malicious\n# TYPE userguard_payloads_rejected counter\nuserguard_payloads_rejected {}\n\
# HELP userguard_uptime_seconds Uptime seconds\n# TYPE userguard_uptime_seconds gauge\nuserguard_uptime_seconds {}\n",
        m.users_created,
        m.users_updated,
        m.users_deleted,
        stored,
        m.payloads_scanned,
        m.payloads_rejected,
        m.uptime_seconds,
    );
    ([(header::CONTENT_TYPE, "text/plain; version=0.0.4")], body)
}

pub async fn version() -> impl IntoResponse {
    let body = serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "package": {
            "description": env!("CARGO_PKG_DESCRIPTION"),
            "authors": env!("CARGO_PKG_AUTHORS"),
            "license": env!("CARGO_PKG_LICENSE"),
        },
        "build": {
            "profile": if cfg!(debug_assertions) { "debug" } else { "release" },
            "os": std::env::consts::OS,
            "arch": std::env::consts::ARCH,
        }
    });
    (StatusCode::OK, Json(body))
}
