use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use seatline_shared::{Passenger, Route};
use serde::Serialize;

use crate::{error::AppError, middleware::Caller, state::AppState};

#[derive(Debug, Serialize)]
struct RoutesResponse {
    routes: Vec<Route>,
}

#[derive(Debug, Serialize)]
struct SeatEntry {
    seat: u32,
    user: Passenger,
}

#[derive(Debug, Serialize)]
struct SeatsResponse {
    seats: Vec<SeatEntry>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/routes", get(list_routes))
        .route("/v1/routes/{route}/sections/{section}/seats", get(list_section_seats))
}

/// Routes in configuration order; the position is the route index.
async fn list_routes(State(state): State<AppState>) -> Json<RoutesResponse> {
    Json(RoutesResponse {
        routes: state.engine.list_routes().to_vec(),
    })
}

async fn list_section_seats(
    State(state): State<AppState>,
    Caller(claims): Caller,
    Path((route, section)): Path<(usize, String)>,
) -> Result<Json<SeatsResponse>, AppError> {
    let ctx = state.call_context();
    let seats = state
        .engine
        .list_occupants(&ctx, &claims, route, &section)
        .await?
        .into_iter()
        .map(|a| SeatEntry {
            seat: a.seat,
            user: a.passenger,
        })
        .collect();

    Ok(Json(SeatsResponse { seats }))
}
