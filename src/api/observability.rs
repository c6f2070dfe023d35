use crate::api::AppState;
use axum::{
    extract::{MatchedPath, Request, State},
    http::Method,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{Instrument, info, info_span};
use uuid::Uuid;

pub async fn get_metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.prometheus_handle.as_ref().map_or_else(
        || "Metrics not enabled or failed to initialize".to_string(),
        metrics_exporter_prometheus::PrometheusHandle::render,
    )
}

pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let request_id = Uuid::new_v4().to_string();

    let is_write = req.method() != Method::GET;
    let method = req.method().to_string();
    let uri = req.uri().path().to_string();

    let matched_path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|mp| mp.as_str().to_string());

    let span = info_span!(
        "request",
        request_id = %request_id,
        method = %method,
        path = %uri,
        route = matched_path.clone(),
        user_id = tracing::field::Empty,
    );

    async move {
        let response = next.run(req).await;

        let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        let status = response.status().as_u16();

        let outcome = match status {
            500.. => "error",
            400..=499 => "client_error",
            _ => "success",
        };

        // Matched route keeps label cardinality bounded.
        let metrics_path = matched_path.as_deref().unwrap_or(&uri);

        let labels = [
            ("method", method.clone()),
            ("path", metrics_path.to_string()),
            ("status", status.to_string()),
        ];

        metrics::counter!("catalog_http_requests_total", &labels).increment(1);
        metrics::histogram!("catalog_http_request_duration_seconds", &labels)
            .record(start.elapsed().as_secs_f64());

        if is_write && outcome == "success" {
            let resource = catalog_resource(metrics_path).to_string();
            metrics::counter!("catalog_writes_total", "resource" => resource).increment(1);
        }

        info!(
            event = "http_request_finished",
            duration_ms,
            status_code = status,
            outcome,
            "Request finished"
        );

        response
    }
    .instrument(span)
    .await
}

/// First path segment under `/api`, e.g. `movies` for `/api/movies/{id}`.
fn catalog_resource(path: &str) -> &str {
    path.trim_start_matches("/api")
        .trim_start_matches('/')
        .split('/')
        .next()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::catalog_resource;

    #[test]
    fn resource_is_first_segment() {
        assert_eq!(catalog_resource("/api/movies/{id}"), "movies");
        assert_eq!(catalog_resource("/api/shows/{id}/seasons"), "shows");
        assert_eq!(catalog_resource("/health"), "health");
    }
}
