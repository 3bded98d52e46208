//! HTTP route handlers.

use std::sync::Arc;

use askama::Template;
use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use tower_http::services::ServeDir;
use tracing::{error, info, warn};

use crate::planner::{PlanError, Planner, RefuelPlan};
use crate::routing::{Route, RouteProvider, RouteServiceError};
use crate::stations::StationError;

use super::dto::*;
use super::state::AppState;
use super::templates::*;

const MISSING_ENDPOINTS: &str = "Both origin and destination are required.";

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router<P>(state: AppState<P>, static_dir: &str) -> Router
where
    P: RouteProvider + 'static,
{
    Router::new()
        .route("/", get(index_page::<P>))
        .route("/health", get(health))
        .route("/plan", get(plan_from_query::<P>).post(plan_from_body::<P>))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Index page with the trip form.
async fn index_page<P>(State(state): State<AppState<P>>) -> impl IntoResponse {
    let vehicle = state.config.vehicle;
    Html(
        IndexTemplate {
            max_range_miles: format!("{:.0}", vehicle.max_range_miles),
            miles_per_gallon: format!("{:.0}", vehicle.miles_per_gallon),
        }
        .render()
        .unwrap_or_else(|e| format!("Template error: {}", e)),
    )
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// `GET /plan?origin=..&destination=..`
async fn plan_from_query<P: RouteProvider + 'static>(
    State(state): State<AppState<P>>,
    headers: HeaderMap,
    Query(req): Query<PlanRequest>,
) -> Response {
    let result = plan_trip(&state, &req).await;
    respond(&headers, result)
}

/// `POST /plan` with a JSON body.
async fn plan_from_body<P: RouteProvider + 'static>(
    State(state): State<AppState<P>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    // Parse JSON manually so we can log the body on failure
    let result = match serde_json::from_slice::<PlanRequest>(&body) {
        Ok(req) => plan_trip(&state, &req).await,
        Err(e) => {
            warn!(body = %String::from_utf8_lossy(&body), "invalid plan request JSON: {e}");
            Err(AppError::BadRequest {
                message: format!("Invalid JSON: {e}"),
            })
        }
    };
    respond(&headers, result)
}

/// Render a plan outcome as an HTML fragment or JSON, errors included.
fn respond(headers: &HeaderMap, result: Result<(Arc<Route>, RefuelPlan), AppError>) -> Response {
    let html = accepts_html(headers);
    match result.and_then(|(route, plan)| render_plan(html, &route, &plan)) {
        Ok(response) => response,
        Err(e) if html => e.into_html_response(),
        Err(e) => e.into_response(),
    }
}

/// Fetch the route and run the planner against the current catalog.
pub async fn plan_trip<P: RouteProvider>(
    state: &AppState<P>,
    req: &PlanRequest,
) -> Result<(Arc<Route>, RefuelPlan), AppError> {
    let (origin, destination) = req.endpoints().ok_or_else(|| AppError::BadRequest {
        message: MISSING_ENDPOINTS.to_string(),
    })?;

    let route = state.routes.fetch_route(origin, destination).await?;
    let stations = state.catalog.stations().await;

    let plan = Planner::new(&state.config).plan(&route.path, &stations)?;

    info!(
        origin = %route.origin,
        destination = %route.destination,
        miles = plan.total_distance_miles,
        stops = plan.stops.len(),
        cost_cents = plan.total_cost_cents(),
        "planned trip"
    );

    Ok((route, plan))
}

fn render_plan(html: bool, route: &Route, plan: &RefuelPlan) -> Result<Response, AppError> {
    if html {
        let template = PlanResultsTemplate {
            plan: PlanView::from_plan(route, plan),
        };
        let html = template.render().map_err(|e| AppError::Internal {
            message: format!("Template error: {}", e),
        })?;

        Ok(Html(html).into_response())
    } else {
        Ok(Json(PlanResponse::from_plan(route, plan)).into_response())
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    /// The request was understood but no plan exists for it.
    Unprocessable { message: String },
    /// An upstream service failed.
    BadGateway { message: String },
    Internal { message: String },
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Unprocessable { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::BadGateway { .. } => StatusCode::BAD_GATEWAY,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            AppError::BadRequest { message }
            | AppError::NotFound { message }
            | AppError::Unprocessable { message }
            | AppError::BadGateway { message }
            | AppError::Internal { message } => message,
        }
    }
}

impl AppError {
    fn title(&self) -> &'static str {
        match self {
            AppError::BadRequest { .. } => "Check your trip",
            AppError::NotFound { .. } => "Place not found",
            AppError::Unprocessable { .. } => "No plan possible",
            AppError::BadGateway { .. } => "Routing service unavailable",
            AppError::Internal { .. } => "Something went wrong",
        }
    }

    fn log(&self) {
        let status = self.status();
        if status.is_server_error() {
            error!(%status, "{}", self.message());
        } else {
            warn!(%status, "{}", self.message());
        }
    }

    /// Error as an HTML fragment with the same status code.
    pub fn into_html_response(self) -> Response {
        self.log();
        let template = ErrorTemplate {
            title: self.title().to_string(),
            message: self.message().to_string(),
        };
        match template.render() {
            Ok(html) => (self.status(), Html(html)).into_response(),
            Err(e) => (self.status(), format!("Template error: {}", e)).into_response(),
        }
    }
}

impl From<PlanError> for AppError {
    fn from(e: PlanError) -> Self {
        match e {
            PlanError::EmptyRoute | PlanError::NoFeasiblePath { .. } => AppError::Unprocessable {
                message: e.to_string(),
            },
            // Profiles come from server configuration, not the request.
            PlanError::InvalidProfile(_) => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl From<RouteServiceError> for AppError {
    fn from(e: RouteServiceError) -> Self {
        if e.is_not_found() {
            return AppError::NotFound {
                message: e.to_string(),
            };
        }
        match e {
            RouteServiceError::Fixture(_) => AppError::Internal {
                message: e.to_string(),
            },
            _ => AppError::BadGateway {
                message: e.to_string(),
            },
        }
    }
}

impl From<StationError> for AppError {
    fn from(e: StationError) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.log();
        let status = self.status();
        let body = Json(ErrorResponse {
            error: self.message().to_string(),
        });
        (status, body).into_response()
    }
}
