use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Json, Router,
};
use chrono::{DateTime, Utc};
use seatline_order::PurchaseRequest;
use seatline_shared::Passenger;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{error::AppError, middleware::Caller, state::AppState};

#[derive(Debug, Deserialize)]
struct PurchaseBody {
    user: Passenger,
    from: String,
    to: String,
    price: u32,
}

#[derive(Debug, Serialize)]
struct PurchaseResponse {
    ticket_id: Uuid,
    /// Index into `GET /v1/routes`.
    route: usize,
    section: String,
    seat: u32,
    message: &'static str,
}

#[derive(Debug, Serialize)]
struct ReceiptResponse {
    ticket_id: Uuid,
    user: Passenger,
    from: String,
    to: String,
    price: u32,
    section: String,
    seat: u32,
    purchased_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
struct RemovalResponse {
    route: usize,
    section: String,
    seat: u32,
    message: &'static str,
}

#[derive(Debug, Deserialize)]
struct RelocateBody {
    seat: u32,
}

#[derive(Debug, Serialize)]
struct MessageResponse {
    message: &'static str,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/tickets", post(purchase))
        .route("/v1/tickets/{email}", get(get_receipt).delete(remove_user))
        .route("/v1/tickets/{email}/seat", put(relocate))
}

async fn purchase(
    State(state): State<AppState>,
    Caller(claims): Caller,
    Json(body): Json<PurchaseBody>,
) -> Result<Json<PurchaseResponse>, AppError> {
    let ctx = state.call_context();
    let request = PurchaseRequest {
        passenger: body.user,
        origin: body.from,
        destination: body.to,
        offered_price: body.price,
    };
    let ticket = state.engine.purchase(&ctx, &claims, request).await?;

    Ok(Json(PurchaseResponse {
        ticket_id: ticket.ticket_id,
        route: ticket.route_index,
        section: ticket.section,
        seat: ticket.seat,
        message: "Ticket purchased successfully",
    }))
}

async fn get_receipt(
    State(state): State<AppState>,
    Caller(claims): Caller,
    Path(email): Path<String>,
) -> Result<Json<ReceiptResponse>, AppError> {
    let ctx = state.call_context();
    let receipt = state
        .engine
        .get_receipt(&ctx, &claims, &email)
        .await?
        .ok_or_else(|| AppError::NotFoundError(format!("no receipt found for email: {}", email)))?;

    Ok(Json(ReceiptResponse {
        ticket_id: receipt.ticket_id,
        user: receipt.passenger,
        from: receipt.route.origin,
        to: receipt.route.destination,
        price: receipt.route.price,
        section: receipt.section,
        seat: receipt.seat,
        purchased_at: receipt.purchased_at,
    }))
}

async fn remove_user(
    State(state): State<AppState>,
    Caller(claims): Caller,
    Path(email): Path<String>,
) -> Result<Json<RemovalResponse>, AppError> {
    let ctx = state.call_context();
    let removal = state.engine.remove(&ctx, &claims, &email).await?;

    Ok(Json(RemovalResponse {
        route: removal.route_index,
        section: removal.section,
        seat: removal.seat,
        message: "User removed successfully",
    }))
}

async fn relocate(
    State(state): State<AppState>,
    Caller(claims): Caller,
    Path(email): Path<String>,
    Json(body): Json<RelocateBody>,
) -> Result<Json<MessageResponse>, AppError> {
    let ctx = state.call_context();
    state.engine.relocate(&ctx, &claims, &email, body.seat).await?;

    Ok(Json(MessageResponse {
        message: "Seat modified successfully",
    }))
}
