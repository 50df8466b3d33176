//! HTTP surface: the dashboard page and the three chart images.

use super::page;
use crate::charts::ChartKind;
use crate::pipeline::DashboardContext;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;

type SharedContext = Arc<DashboardContext>;

pub fn router(ctx: SharedContext) -> Router {
    Router::new()
        .route("/", get(dashboard))
        .route("/static/:file", get(chart_image))
        .with_state(ctx)
}

/// Serve until the process is stopped.
pub async fn serve(addr: SocketAddr, ctx: SharedContext) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("Dashboard available at http://{}", addr);
    axum::serve(listener, router(ctx)).await?;
    Ok(())
}

async fn dashboard(State(ctx): State<SharedContext>) -> Html<String> {
    Html(page::render_dashboard(&ctx))
}

async fn chart_image(State(ctx): State<SharedContext>, Path(file): Path<String>) -> Response {
    let Some(kind) = ChartKind::from_file_name(&file) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let path = ctx.charts.path(kind);
    match tokio::fs::read(&path).await {
        Ok(bytes) => ([(header::CONTENT_TYPE, "image/png")], bytes).into_response(),
        Err(e) => {
            log::error!("Failed to read {}: {}", path.display(), e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
