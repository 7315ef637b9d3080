//! HTTP server for the heatmap service.
//!
//! Provides endpoints for:
//! - `GET /health` - Health check
//! - `GET /heatmap.svg` - Chart surface, including the tooltip overlay
//! - `GET /legend.svg` - Legend surface
//! - `GET /cells` - Plotted cells and their attributes
//! - `GET /tooltip` - Current tooltip state
//! - `POST /pointer` - Move the pointer or leave the chart

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Extension, Json},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};
use tracing::{debug, error, info};

use renderer::{render_chart_svg, Cell, HoverTransition, PointerEvent, Tooltip};

use crate::state::AppState;

const SVG_CONTENT_TYPE: &str = "image/svg+xml";

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub cells: usize,
}

/// One plotted cell, with the same attributes the SVG rect carries.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct CellResponse {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: String,
    pub year: i32,
    /// Zero-based month.
    pub month: u32,
    pub temp: f64,
}

impl From<&Cell> for CellResponse {
    fn from(cell: &Cell) -> Self {
        Self {
            x: cell.x,
            y: cell.y,
            width: cell.width,
            height: cell.height,
            fill: cell.fill.to_string(),
            year: cell.year,
            month: cell.month_index(),
            temp: cell.temperature,
        }
    }
}

/// Request body for /pointer.
///
/// Either `{"x": .., "y": ..}` or `{"leave": true}`.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
pub enum PointerRequest {
    Move { x: f64, y: f64 },
    Leave { leave: bool },
}

impl PointerRequest {
    fn event(self) -> Option<PointerEvent> {
        match self {
            PointerRequest::Move { x, y } => Some(PointerEvent::Move { x, y }),
            PointerRequest::Leave { leave: true } => Some(PointerEvent::Leave),
            PointerRequest::Leave { leave: false } => None,
        }
    }
}

/// Response body for /pointer.
#[derive(Debug, Serialize)]
pub struct PointerResponse {
    /// `entered`, `left` or `unchanged`.
    pub transition: &'static str,
    /// Index into /cells of the hovered cell.
    pub hovered: Option<usize>,
    pub tooltip: Tooltip,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn transition_name(transition: HoverTransition) -> &'static str {
    match transition {
        HoverTransition::Entered(_) => "entered",
        HoverTransition::Left => "left",
        HoverTransition::Unchanged => "unchanged",
    }
}

fn svg_response(svg: String) -> Response {
    ([(header::CONTENT_TYPE, SVG_CONTENT_TYPE)], svg).into_response()
}

/// GET /health - Health check
async fn health_handler(Extension(state): Extension<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: "heatmap".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        cells: state.heatmap.cells().len(),
    })
}

/// GET /heatmap.svg - Chart with the current tooltip overlay
async fn heatmap_svg_handler(Extension(state): Extension<Arc<AppState>>) -> Response {
    let tooltip = state.hover.lock().await.tooltip().clone();

    match render_chart_svg(&state.heatmap, Some(&tooltip)) {
        Ok(svg) => svg_response(svg),
        Err(e) => {
            error!(error = %e, "Failed to render chart");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// GET /legend.svg - Legend
async fn legend_svg_handler(Extension(state): Extension<Arc<AppState>>) -> Response {
    svg_response(state.legend_svg.clone())
}

/// GET /cells - Plotted cells in drawing order
async fn cells_handler(Extension(state): Extension<Arc<AppState>>) -> impl IntoResponse {
    let cells: Vec<CellResponse> = state.heatmap.cells().iter().map(CellResponse::from).collect();
    Json(cells)
}

/// GET /tooltip - Current tooltip
async fn tooltip_handler(Extension(state): Extension<Arc<AppState>>) -> impl IntoResponse {
    let hover = state.hover.lock().await;
    Json(hover.tooltip().clone())
}

/// POST /pointer - Apply one pointer event to the shared tooltip
async fn pointer_handler(
    Extension(state): Extension<Arc<AppState>>,
    Json(request): Json<PointerRequest>,
) -> impl IntoResponse {
    let mut hover = state.hover.lock().await;

    let transition = match request.event() {
        Some(event) => hover.handle(&state.heatmap, event),
        None => HoverTransition::Unchanged,
    };
    debug!(?request, ?transition, "Pointer event");

    Json(PointerResponse {
        transition: transition_name(transition),
        hovered: hover.hovered(),
        tooltip: hover.tooltip().clone(),
    })
}

/// Build the HTTP router.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/heatmap.svg", get(heatmap_svg_handler))
        .route("/legend.svg", get(legend_svg_handler))
        .route("/cells", get(cells_handler))
        .route("/tooltip", get(tooltip_handler))
        .route("/pointer", post(pointer_handler))
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
}

/// Start the HTTP server.
pub async fn start_server(state: Arc<AppState>, addr: SocketAddr) -> anyhow::Result<()> {
    let app = build_router(state);

    info!(%addr, "Starting heatmap HTTP server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
