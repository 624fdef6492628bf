// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use clap::Parser;
use park_slot::{Engine, ParkingReport};
use park_slot_api::{
    ApiError, CancelResponse, CheckoutRequest, CheckoutResponse, CitiesResponse,
    CreateSlotRequest, MaintenanceRequest, NearbyResponse, ParkRequest, ParkResponse,
    QuoteRequest, QuoteResponse, SearchResponse, SlotListResponse, StatisticsResponse,
    UpdateSlotRequest, UserBookingsResponse, cancel_booking, checkout_vehicle, create_slot,
    delete_slot, fee_quote, get_slot, list_cities, list_slots, nearby_slots, park_vehicle,
    parking_report, remove_vehicle, search_vehicle, set_slot_maintenance, slot_statistics,
    toggle_slot_availability, update_slot, user_bookings,
};
use park_slot_audit::Actor;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use time::{Duration, OffsetDateTime};
use tracing::{error, info};

/// ParkSlot Server - HTTP server for the ParkSlot system
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Grace window in minutes for requested start times in the past
    #[arg(short, long, default_value_t = 5)]
    grace_minutes: i64,

    /// JSON file of slots to create at startup (an array of slot
    /// creation requests, the same shape POST /api/slots accepts)
    #[arg(long)]
    seed_file: Option<std::path::PathBuf>,
}

/// Application state shared across handlers.
///
/// The engine is internally synchronized; handlers only need a shared
/// reference.
#[derive(Clone)]
struct AppState {
    /// The slot reservation and tariff engine.
    engine: Arc<Engine>,
}

/// Query parameters for the proximity search endpoint.
#[derive(Debug, Deserialize)]
struct NearbyQuery {
    /// Latitude of the query point in degrees.
    latitude: f64,
    /// Longitude of the query point in degrees.
    longitude: f64,
    /// Search radius in kilometres.
    radius_km: f64,
}

/// Query parameters for the slot listing endpoint.
#[derive(Debug, Deserialize)]
struct SlotListQuery {
    /// Keep only slots of this type (SMALL, MEDIUM, LARGE).
    slot_type: Option<String>,
    /// Keep only slots on this floor.
    floor_number: Option<u16>,
    /// Keep only slots in this city.
    city: Option<String>,
    /// Keep only slots that could accept a vehicle right now.
    only_free: Option<bool>,
}

/// Query parameters for the operator report endpoint.
#[derive(Debug, Deserialize)]
struct ReportQuery {
    /// Narrow the report to one customer's bookings.
    user_id: Option<i64>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct HealthResponse {
    /// Service status indicator.
    status: String,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::InvalidInput { .. } | ApiError::PaymentPolicyViolation { .. } => Self {
                status: StatusCode::BAD_REQUEST,
                message: err.to_string(),
            },
            ApiError::ResourceNotFound { .. } => Self {
                status: StatusCode::NOT_FOUND,
                message: err.to_string(),
            },
            ApiError::DomainRuleViolation { .. } => Self {
                status: StatusCode::CONFLICT,
                message: err.to_string(),
            },
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: err.to_string(),
                }
            }
        }
    }
}

/// Builds the audit actor for customer-initiated parking operations.
fn customer_actor(user_id: Option<i64>) -> Actor {
    let id: String = user_id.map_or_else(|| String::from("walk-in"), |id| format!("customer-{id}"));
    Actor::new(id, String::from("customer"))
}

/// Builds the audit actor for operator-initiated operations.
fn operator_actor() -> Actor {
    Actor::new(String::from("operator"), String::from("admin"))
}

/// Handler for GET `/api/parking/health`.
async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: String::from("ok"),
    })
}

/// Handler for POST `/api/parking/park`.
///
/// Parks a vehicle in a slot and opens a booking.
async fn handle_park(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<ParkRequest>,
) -> Result<(StatusCode, Json<ParkResponse>), HttpError> {
    info!(
        slot_id = req.slot_id,
        license_plate = %req.license_plate,
        "Handling park request"
    );
    let actor: Actor = customer_actor(req.user_id);
    let now: OffsetDateTime = OffsetDateTime::now_utc();
    let response: ParkResponse = park_vehicle(&app_state.engine, req, actor, now).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for POST `/api/parking/checkout`.
///
/// Checks a vehicle out by plate and reports the fee.
async fn handle_checkout(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CheckoutRequest>,
) -> Result<Json<CheckoutResponse>, HttpError> {
    info!(license_plate = %req.license_plate, "Handling checkout request");
    let actor: Actor = customer_actor(None);
    let now: OffsetDateTime = OffsetDateTime::now_utc();
    let response: CheckoutResponse =
        checkout_vehicle(&app_state.engine, req, actor, now).await?;
    Ok(Json(response))
}

/// Handler for DELETE `/api/parking/remove/{license_plate}`.
///
/// Force-removes a vehicle that never checked out itself.
async fn handle_remove(
    AxumState(app_state): AxumState<AppState>,
    Path(license_plate): Path<String>,
) -> Result<Json<CheckoutResponse>, HttpError> {
    info!(license_plate = %license_plate, "Handling remove request");
    let now: OffsetDateTime = OffsetDateTime::now_utc();
    let response: CheckoutResponse =
        remove_vehicle(&app_state.engine, &license_plate, operator_actor(), now).await?;
    Ok(Json(response))
}

/// Handler for POST `/api/parking/cancel/{booking_id}`.
///
/// Cancels an active booking without a fee.
async fn handle_cancel(
    AxumState(app_state): AxumState<AppState>,
    Path(booking_id): Path<i64>,
) -> Result<Json<CancelResponse>, HttpError> {
    info!(booking_id, "Handling cancel request");
    let now: OffsetDateTime = OffsetDateTime::now_utc();
    let response: CancelResponse =
        cancel_booking(&app_state.engine, booking_id, operator_actor(), now).await?;
    Ok(Json(response))
}

/// Handler for GET `/api/parking/search/{license_plate}`.
///
/// Reports where a vehicle is parked.
async fn handle_search(
    AxumState(app_state): AxumState<AppState>,
    Path(license_plate): Path<String>,
) -> Result<Json<SearchResponse>, HttpError> {
    let response: SearchResponse = search_vehicle(&app_state.engine, &license_plate).await?;
    Ok(Json(response))
}

/// Handler for GET `/api/parking/report`.
///
/// Returns the operator report, narrowed to one customer when the
/// `user_id` query parameter is given.
async fn handle_report(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ReportQuery>,
) -> Json<ParkingReport> {
    let now: OffsetDateTime = OffsetDateTime::now_utc();
    Json(parking_report(&app_state.engine, query.user_id, now).await)
}

/// Handler for GET `/api/parking/user/{user_id}/bookings`.
///
/// Lists a customer's bookings, newest first.
async fn handle_user_bookings(
    AxumState(app_state): AxumState<AppState>,
    Path(user_id): Path<i64>,
) -> Json<UserBookingsResponse> {
    Json(user_bookings(&app_state.engine, user_id).await)
}

/// Handler for GET `/api/parking/quote`.
///
/// Quotes a fee without creating a booking.
async fn handle_quote(
    Query(req): Query<QuoteRequest>,
) -> Result<Json<QuoteResponse>, HttpError> {
    let response: QuoteResponse = fee_quote(&req)?;
    Ok(Json(response))
}

/// Handler for GET `/api/parking/nearby`.
///
/// Finds slots within range of a point, nearest first.
async fn handle_nearby(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<NearbyQuery>,
) -> Result<Json<NearbyResponse>, HttpError> {
    let response: NearbyResponse = nearby_slots(
        &app_state.engine,
        query.latitude,
        query.longitude,
        query.radius_km,
    )
    .await?;
    Ok(Json(response))
}

/// Handler for POST `/api/slots`.
///
/// Creates a slot; the engine assigns the slot number.
async fn handle_create_slot(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateSlotRequest>,
) -> Result<(StatusCode, Json<park_slot::SlotView>), HttpError> {
    info!(slot_type = %req.slot_type, floor_number = req.floor_number, "Handling create_slot request");
    let now: OffsetDateTime = OffsetDateTime::now_utc();
    let view = create_slot(&app_state.engine, req, now).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// Handler for GET `/api/slots`.
///
/// Lists slots matching the query filters.
async fn handle_list_slots(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<SlotListQuery>,
) -> Result<Json<SlotListResponse>, HttpError> {
    let response: SlotListResponse = list_slots(
        &app_state.engine,
        query.slot_type.as_deref(),
        query.floor_number,
        query.city,
        query.only_free.unwrap_or(false),
    )
    .await?;
    Ok(Json(response))
}

/// Handler for GET `/api/slots/{slot_id}`.
async fn handle_get_slot(
    AxumState(app_state): AxumState<AppState>,
    Path(slot_id): Path<i64>,
) -> Result<Json<park_slot::SlotView>, HttpError> {
    let view = get_slot(&app_state.engine, slot_id).await?;
    Ok(Json(view))
}

/// Handler for PUT `/api/slots/{slot_id}`.
///
/// Applies a partial update to a slot.
async fn handle_update_slot(
    AxumState(app_state): AxumState<AppState>,
    Path(slot_id): Path<i64>,
    Json(req): Json<UpdateSlotRequest>,
) -> Result<Json<park_slot::SlotView>, HttpError> {
    info!(slot_id, "Handling update_slot request");
    let view = update_slot(&app_state.engine, slot_id, req).await?;
    Ok(Json(view))
}

/// Handler for DELETE `/api/slots/{slot_id}`.
async fn handle_delete_slot(
    AxumState(app_state): AxumState<AppState>,
    Path(slot_id): Path<i64>,
) -> Result<StatusCode, HttpError> {
    info!(slot_id, "Handling delete_slot request");
    delete_slot(&app_state.engine, slot_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for PUT `/api/slots/{slot_id}/toggle-availability`.
async fn handle_toggle_availability(
    AxumState(app_state): AxumState<AppState>,
    Path(slot_id): Path<i64>,
) -> Result<Json<park_slot::SlotView>, HttpError> {
    info!(slot_id, "Handling toggle_availability request");
    let view = toggle_slot_availability(&app_state.engine, slot_id).await?;
    Ok(Json(view))
}

/// Handler for PUT `/api/slots/{slot_id}/maintenance`.
///
/// Sets or clears a slot's maintenance reason.
async fn handle_maintenance(
    AxumState(app_state): AxumState<AppState>,
    Path(slot_id): Path<i64>,
    Json(req): Json<MaintenanceRequest>,
) -> Result<Json<park_slot::SlotView>, HttpError> {
    info!(slot_id, "Handling maintenance request");
    let view = set_slot_maintenance(&app_state.engine, slot_id, req).await?;
    Ok(Json(view))
}

/// Handler for GET `/api/slots/statistics`.
async fn handle_statistics(
    AxumState(app_state): AxumState<AppState>,
) -> Json<StatisticsResponse> {
    Json(slot_statistics(&app_state.engine).await)
}

/// Handler for GET `/api/slots/cities`.
async fn handle_cities(AxumState(app_state): AxumState<AppState>) -> Json<CitiesResponse> {
    Json(list_cities(&app_state.engine).await)
}

/// Builds the application router with all routes configured.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/api/parking/health", get(handle_health))
        .route("/api/parking/park", post(handle_park))
        .route("/api/parking/checkout", post(handle_checkout))
        .route("/api/parking/remove/{license_plate}", delete(handle_remove))
        .route("/api/parking/cancel/{booking_id}", post(handle_cancel))
        .route("/api/parking/search/{license_plate}", get(handle_search))
        .route("/api/parking/report", get(handle_report))
        .route("/api/parking/user/{user_id}/bookings", get(handle_user_bookings))
        .route("/api/parking/quote", get(handle_quote))
        .route("/api/parking/nearby", get(handle_nearby))
        .route("/api/slots", post(handle_create_slot))
        .route("/api/slots", get(handle_list_slots))
        .route("/api/slots/statistics", get(handle_statistics))
        .route("/api/slots/cities", get(handle_cities))
        .route("/api/slots/{slot_id}", get(handle_get_slot))
        .route("/api/slots/{slot_id}", put(handle_update_slot))
        .route("/api/slots/{slot_id}", delete(handle_delete_slot))
        .route(
            "/api/slots/{slot_id}/toggle-availability",
            put(handle_toggle_availability),
        )
        .route("/api/slots/{slot_id}/maintenance", put(handle_maintenance))
        .with_state(app_state)
}

/// Creates every slot listed in a JSON seed file.
///
/// The file holds an array of slot creation requests; the engine
/// assigns the slot numbers in file order.
async fn seed_slots(
    engine: &Engine,
    path: &std::path::Path,
) -> Result<usize, Box<dyn std::error::Error>> {
    let contents: String = std::fs::read_to_string(path)?;
    let requests: Vec<CreateSlotRequest> = serde_json::from_str(&contents)?;
    let count: usize = requests.len();
    let now: OffsetDateTime = OffsetDateTime::now_utc();
    for request in requests {
        create_slot(engine, request, now).await?;
    }
    Ok(count)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing ParkSlot Server");

    let engine: Engine = Engine::new(Duration::minutes(args.grace_minutes));
    if let Some(seed_file) = args.seed_file.as_deref() {
        let seeded: usize = seed_slots(&engine, seed_file).await?;
        info!(count = seeded, path = %seed_file.display(), "Seeded slots");
    }
    let app_state: AppState = AppState {
        engine: Arc::new(engine),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode as HttpStatusCode},
    };
    use time::format_description::well_known::Rfc3339;
    use tower::ServiceExt;

    /// The slot fields the router tests care about.
    #[derive(Debug, Deserialize)]
    struct CreatedSlot {
        id: i64,
        floor_number: u16,
    }

    fn create_test_app_state() -> AppState {
        AppState {
            engine: Arc::new(Engine::default()),
        }
    }

    fn create_slot_body() -> String {
        serde_json::to_string(&CreateSlotRequest {
            slot_type: String::from("MEDIUM"),
            floor_number: 1,
            latitude: Some(18.9230),
            longitude: Some(72.8350),
            location_name: None,
            address: None,
            city: Some(String::from("Mumbai")),
            region: None,
        })
        .unwrap()
    }

    fn park_body(slot_id: i64, plate: &str) -> String {
        let now: OffsetDateTime = OffsetDateTime::now_utc();
        let start: String = now.format(&Rfc3339).unwrap();
        let end: String = (now + Duration::hours(2)).format(&Rfc3339).unwrap();
        format!(
            r#"{{"slot_id":{slot_id},"license_plate":"{plate}","vehicle_type":"CAR","owner_name":"Asha Rao","phone_number":"9876543210","start_time":"{start}","end_time":"{end}","payment_method":"cash","payment_reference":null,"user_id":null}}"#
        )
    }

    fn park_body_for_user(slot_id: i64, plate: &str, user_id: i64) -> String {
        park_body(slot_id, plate).replace("\"user_id\":null", &format!("\"user_id\":{user_id}"))
    }

    async fn post_json(app: &Router, uri: &str, body: String) -> axum::response::Response {
        app.clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn put_json(app: &Router, uri: &str, body: String) -> axum::response::Response {
        app.clone()
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn get_uri(app: &Router, uri: &str) -> axum::response::Response {
        app.clone()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn body_of<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn create_slot_via_http(app: &Router) -> CreatedSlot {
        let response = post_json(app, "/api/slots", create_slot_body()).await;
        assert_eq!(response.status(), HttpStatusCode::CREATED);
        body_of(response).await
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app: Router = build_router(create_test_app_state());

        let response = get_uri(&app, "/api/parking/health").await;

        assert_eq!(response.status(), HttpStatusCode::OK);
        let health: HealthResponse = body_of(response).await;
        assert_eq!(health.status, "ok");
    }

    #[tokio::test]
    async fn test_park_and_checkout_round_trip() {
        let app: Router = build_router(create_test_app_state());
        let slot: CreatedSlot = create_slot_via_http(&app).await;

        let park_response = post_json(
            &app,
            "/api/parking/park",
            park_body(slot.id, "MH12AB1234"),
        )
        .await;
        assert_eq!(park_response.status(), HttpStatusCode::CREATED);
        let parked: ParkResponse = body_of(park_response).await;
        assert_eq!(parked.booking_number, "BK-000001");
        assert_eq!(parked.slot_number, 1);

        let checkout_response = post_json(
            &app,
            "/api/parking/checkout",
            String::from(r#"{"license_plate":"MH12AB1234"}"#),
        )
        .await;
        assert_eq!(checkout_response.status(), HttpStatusCode::OK);
        let checked_out: CheckoutResponse = body_of(checkout_response).await;
        assert_eq!(checked_out.hours, 1);
        assert!((checked_out.total_amount - 23.6).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_park_conflicts_return_409() {
        let app: Router = build_router(create_test_app_state());
        let slot: CreatedSlot = create_slot_via_http(&app).await;

        let first = post_json(&app, "/api/parking/park", park_body(slot.id, "MH12AB1234")).await;
        assert_eq!(first.status(), HttpStatusCode::CREATED);

        let second = post_json(&app, "/api/parking/park", park_body(slot.id, "KA05CD5678")).await;
        assert_eq!(second.status(), HttpStatusCode::CONFLICT);
        let error: ErrorResponse = body_of(second).await;
        assert!(error.error);
        assert!(error.message.contains("occupied"));
    }

    #[tokio::test]
    async fn test_park_validation_errors_return_400() {
        let app: Router = build_router(create_test_app_state());
        let slot: CreatedSlot = create_slot_via_http(&app).await;

        let response = post_json(&app, "/api/parking/park", park_body(slot.id, "NOPE")).await;

        assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_checkout_unknown_vehicle_returns_404() {
        let app: Router = build_router(create_test_app_state());

        let response = post_json(
            &app,
            "/api/parking/checkout",
            String::from(r#"{"license_plate":"MH12AB1234"}"#),
        )
        .await;

        assert_eq!(response.status(), HttpStatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_search_reports_parked_vehicle() {
        let app: Router = build_router(create_test_app_state());
        let slot: CreatedSlot = create_slot_via_http(&app).await;
        post_json(&app, "/api/parking/park", park_body(slot.id, "MH12AB1234")).await;

        let response = get_uri(&app, "/api/parking/search/MH12AB1234").await;

        assert_eq!(response.status(), HttpStatusCode::OK);
        let found: SearchResponse = body_of(response).await;
        assert_eq!(found.slot_number, 1);
        assert_eq!(found.status, "ACTIVE");
    }

    #[tokio::test]
    async fn test_remove_and_cancel_endpoints() {
        let app: Router = build_router(create_test_app_state());
        let first: CreatedSlot = create_slot_via_http(&app).await;
        let second: CreatedSlot = create_slot_via_http(&app).await;

        post_json(&app, "/api/parking/park", park_body(first.id, "MH12AB1234")).await;
        let parked: ParkResponse =
            body_of(post_json(&app, "/api/parking/park", park_body(second.id, "KA05CD5678")).await)
                .await;

        let remove_response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/api/parking/remove/MH12AB1234")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(remove_response.status(), HttpStatusCode::OK);

        let cancel_response = post_json(
            &app,
            &format!("/api/parking/cancel/{}", parked.booking_id),
            String::new(),
        )
        .await;
        assert_eq!(cancel_response.status(), HttpStatusCode::OK);
        let cancelled: CancelResponse = body_of(cancel_response).await;
        assert_eq!(cancelled.status, "CANCELLED");
    }

    #[tokio::test]
    async fn test_quote_endpoint() {
        let app: Router = build_router(create_test_app_state());

        let response = get_uri(
            &app,
            "/api/parking/quote?vehicle_type=SUV&duration_minutes=120",
        )
        .await;

        assert_eq!(response.status(), HttpStatusCode::OK);
        let quote: QuoteResponse = body_of(response).await;
        assert_eq!(quote.hours, 2);
        assert!((quote.total - 70.8).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_nearby_endpoint_filters_by_radius() {
        let app: Router = build_router(create_test_app_state());
        create_slot_via_http(&app).await;

        let hit = get_uri(
            &app,
            "/api/parking/nearby?latitude=18.9220&longitude=72.8347&radius_km=5",
        )
        .await;
        assert_eq!(hit.status(), HttpStatusCode::OK);

        let bad = get_uri(
            &app,
            "/api/parking/nearby?latitude=18.9220&longitude=72.8347&radius_km=0",
        )
        .await;
        assert_eq!(bad.status(), HttpStatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_slot_crud_over_http() {
        let app: Router = build_router(create_test_app_state());
        let slot: CreatedSlot = create_slot_via_http(&app).await;

        let update_response = put_json(
            &app,
            &format!("/api/slots/{}", slot.id),
            String::from(r#"{"floor_number":3}"#),
        )
        .await;
        assert_eq!(update_response.status(), HttpStatusCode::OK);
        let updated: CreatedSlot = body_of(update_response).await;
        assert_eq!(updated.floor_number, 3);

        let toggle_response = put_json(
            &app,
            &format!("/api/slots/{}/toggle-availability", slot.id),
            String::new(),
        )
        .await;
        assert_eq!(toggle_response.status(), HttpStatusCode::OK);

        let delete_response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/api/slots/{}", slot.id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(delete_response.status(), HttpStatusCode::NO_CONTENT);

        let missing = get_uri(&app, &format!("/api/slots/{}", slot.id)).await;
        assert_eq!(missing.status(), HttpStatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_statistics_and_cities_endpoints() {
        let app: Router = build_router(create_test_app_state());
        create_slot_via_http(&app).await;

        let stats_response = get_uri(&app, "/api/slots/statistics").await;
        assert_eq!(stats_response.status(), HttpStatusCode::OK);

        let cities_response = get_uri(&app, "/api/slots/cities").await;
        assert_eq!(cities_response.status(), HttpStatusCode::OK);
        let cities: CitiesResponse = body_of(cities_response).await;
        assert_eq!(cities.cities, vec![String::from("Mumbai")]);
    }

    #[tokio::test]
    async fn test_maintenance_endpoint_blocks_parking() {
        let app: Router = build_router(create_test_app_state());
        let slot: CreatedSlot = create_slot_via_http(&app).await;

        let maintenance_response = put_json(
            &app,
            &format!("/api/slots/{}/maintenance", slot.id),
            String::from(r#"{"reason":"resurfacing"}"#),
        )
        .await;
        assert_eq!(maintenance_response.status(), HttpStatusCode::OK);

        let park_response =
            post_json(&app, "/api/parking/park", park_body(slot.id, "MH12AB1234")).await;
        assert_eq!(park_response.status(), HttpStatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_report_endpoint_lists_bookings() {
        let app: Router = build_router(create_test_app_state());
        let slot: CreatedSlot = create_slot_via_http(&app).await;
        post_json(&app, "/api/parking/park", park_body(slot.id, "MH12AB1234")).await;

        let response = get_uri(&app, "/api/parking/report").await;

        assert_eq!(response.status(), HttpStatusCode::OK);
        let report: serde_json::Value = body_of(response).await;
        assert_eq!(report["total_bookings"], 1);
        assert_eq!(report["active"], 1);
    }

    #[tokio::test]
    async fn test_report_filter_and_user_bookings_endpoint() {
        let app: Router = build_router(create_test_app_state());
        let first: CreatedSlot = create_slot_via_http(&app).await;
        let second: CreatedSlot = create_slot_via_http(&app).await;
        post_json(
            &app,
            "/api/parking/park",
            park_body_for_user(first.id, "MH12AB1234", 7),
        )
        .await;
        post_json(&app, "/api/parking/park", park_body(second.id, "KA05CD5678")).await;

        let filtered = get_uri(&app, "/api/parking/report?user_id=7").await;
        assert_eq!(filtered.status(), HttpStatusCode::OK);
        let report: serde_json::Value = body_of(filtered).await;
        assert_eq!(report["total_bookings"], 1);
        assert_eq!(report["bookings"][0]["user_id"], 7);

        let bookings_response = get_uri(&app, "/api/parking/user/7/bookings").await;
        assert_eq!(bookings_response.status(), HttpStatusCode::OK);
        let bookings: serde_json::Value = body_of(bookings_response).await;
        assert_eq!(bookings["user_id"], 7);
        assert_eq!(bookings["bookings"].as_array().unwrap().len(), 1);

        let empty = get_uri(&app, "/api/parking/user/8/bookings").await;
        let none: serde_json::Value = body_of(empty).await;
        assert!(none["bookings"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_seed_slots_from_file() {
        let path: std::path::PathBuf =
            std::env::temp_dir().join(format!("park-slot-seed-{}.json", std::process::id()));
        std::fs::write(&path, format!("[{}]", create_slot_body())).unwrap();

        let app_state: AppState = create_test_app_state();
        let seeded: usize = seed_slots(&app_state.engine, &path).await.unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(seeded, 1);

        let app: Router = build_router(app_state);
        let response = get_uri(&app, "/api/slots").await;
        assert_eq!(response.status(), HttpStatusCode::OK);
        let listed: serde_json::Value = body_of(response).await;
        assert_eq!(listed["slots"].as_array().unwrap().len(), 1);
    }
}
