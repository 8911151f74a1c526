//! Browses login audit logs from a running admin service.
//!
//! ```text
//! AUDIT_ENDPOINT=http://localhost:3000 audit-browser [search] [status]
//! ```
//!
//! Metrics are served on `METRICS_ADDR` (default `127.0.0.1:9100`).
use std::env;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use tracing::{info, warn};

use listq_core::{ListQuery, ListSource};
use listq_model::{Filters, LoginLog, QueryState};
use listq_observe::{LoggerConfig, logger_init};
use listq_prometheus::PrometheusMetrics;
use listq_remote::{HttpListSource, RemoteConfig};

const LOGIN_LOGS_PATH: &str = "/api/admin/logs/login";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1) Logger
    logger_init(&LoggerConfig::from_env()?)?;

    let endpoint = env::var("AUDIT_ENDPOINT").unwrap_or_else(|_| "http://localhost:3000".into());
    let metrics_addr = env::var("METRICS_ADDR").unwrap_or_else(|_| "127.0.0.1:9100".into());
    let mut args = env::args().skip(1);
    let search = args.next();
    let status = args.next();

    // 2) Metrics
    let metrics = PrometheusMetrics::new()?;
    serve_metrics(&metrics_addr, metrics.clone()).await?;

    // 3) Source + controller
    let mut remote = RemoteConfig::new(endpoint, LOGIN_LOGS_PATH);
    if let Ok(token) = env::var("AUDIT_TOKEN") {
        remote = remote.with_header("authorization", format!("Bearer {token}"));
    }
    let source = HttpListSource::<LoginLog>::for_resource(remote)?;
    info!(url = %source.config().endpoint, "login log source ready");

    let logs = ListQuery::builder(source)
        .with_name("login-logs")
        .with_page_size(20)
        .with_timeout_ms(10_000)
        .with_metrics(Arc::new(metrics))
        .build()?;

    // 4) Initial load
    logs.refresh().wait().await;
    print_page(&logs.snapshot());

    // 5) Type the search term one key at a time; only the final value is fetched.
    if let Some(term) = search.filter(|t| !t.is_empty()) {
        for end in term.char_indices().map(|(i, c)| i + c.len_utf8()) {
            logs.set_filters(Filters::new().with("search", &term[..end]));
            tokio::time::sleep(Duration::from_millis(80)).await;
        }
        print_page(&settled(&logs).await);
    }

    if let Some(status) = status {
        logs.set_filters(Filters::new().with("status", status)).wait().await;
        print_page(&logs.snapshot());
    }

    if logs.pagination().has_next_page() {
        logs.set_page(2, None).wait().await;
        print_page(&logs.snapshot());
    }

    info!("press Ctrl+C to stop");
    tokio::signal::ctrl_c().await?;
    logs.shutdown();
    Ok(())
}

/// Waits until neither a debounced search nor a fetch is pending.
async fn settled<S: ListSource>(logs: &ListQuery<S>) -> QueryState<S::Item> {
    let mut rx = logs.subscribe();
    loop {
        {
            let state = rx.borrow_and_update();
            if !logs.has_pending_search() && state.status.is_settled() {
                return state.clone();
            }
        }
        if tokio::time::timeout(Duration::from_secs(1), rx.changed())
            .await
            .is_ok_and(|r| r.is_err())
        {
            return logs.snapshot();
        }
    }
}

fn print_page(state: &QueryState<LoginLog>) {
    let p = &state.pagination;
    if let Some(msg) = &state.error_message {
        warn!(status = ?state.status, "{msg}");
    }
    println!(
        "-- page {}/{} ({} total, status {:?})",
        p.page_index,
        p.total_pages.max(1),
        p.total_items,
        state.status
    );
    for log in &state.items {
        println!(
            "{:<26} {:<32} {:<8} {}",
            log.id,
            log.email.as_deref().unwrap_or("-"),
            log.status,
            log.created_at
        );
    }
}

async fn serve_metrics(addr: &str, metrics: PrometheusMetrics) -> anyhow::Result<()> {
    let app = Router::new()
        .route("/metrics", get(render_metrics))
        .with_state(metrics);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "metrics endpoint listening");
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            warn!(error = %e, "metrics endpoint stopped");
        }
    });
    Ok(())
}

async fn render_metrics(State(metrics): State<PrometheusMetrics>) -> Result<String, StatusCode> {
    metrics.render().map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}
