//! Prometheus request metrics served on `/metrics`.

use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use prometheus::Registry;

/// Prefix for every exported metric name.
pub(crate) const METRICS_NAMESPACE: &str = "civicflow";
pub(crate) const METRICS_ENDPOINT: &str = "/metrics";

/// Build the request metrics middleware.
///
/// Each call registers into a fresh [`Registry`]. Probe traffic is excluded
/// so orchestrator polling does not drown out real request rates.
///
/// # Errors
/// Returns [`std::io::Error`] when metric registration fails.
pub(crate) fn build_metrics() -> std::io::Result<PrometheusMetrics> {
    PrometheusMetricsBuilder::new(METRICS_NAMESPACE)
        .registry(Registry::new())
        .endpoint(METRICS_ENDPOINT)
        .exclude("/health/ready")
        .exclude("/health/live")
        .build()
        .map_err(|err| std::io::Error::other(format!("metrics registration failed: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};
    use rstest::rstest;

    #[rstest]
    #[actix_web::test]
    async fn counts_requests_under_namespace() {
        let app = test::init_service(
            App::new()
                .wrap(build_metrics().expect("metrics"))
                .route("/ping", web::get().to(HttpResponse::Ok)),
        )
        .await;
        let ping = test::TestRequest::get().uri("/ping").to_request();
        assert_eq!(test::call_service(&app, ping).await.status(), StatusCode::OK);

        let scrape = test::TestRequest::get().uri(METRICS_ENDPOINT).to_request();
        let res = test::call_service(&app, scrape).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = test::read_body(res).await;
        let text = std::str::from_utf8(&body).expect("utf8");
        assert!(text.contains("civicflow_http_requests"));
    }
}
