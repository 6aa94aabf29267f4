//! Order routes.
//!
//! Order submission with notification fan-out, plus the read endpoints for
//! an employee's own orders and the all-orders listing. Every endpoint
//! requires a bearer token.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use officebar_core::{OrderId, OrderStatus, Price};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::error::AppError;
use crate::middleware::{ApiJson, RequireAuth};
use crate::models::{LineItem, Order, OrderHistoryEntry};
use crate::notify::NotificationReport;
use crate::state::AppState;

// ============================================================================
// Create
// ============================================================================

/// Request to place an order.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateOrderRequest {
    pub items: Vec<LineItem>,
}

/// Order view embedded in the creation response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedOrderView {
    pub id: OrderId,
    pub status: OrderStatus,
    pub items: Vec<LineItem>,
    pub created_at: DateTime<Utc>,
}

/// Response from a successful order creation.
///
/// Notification outcomes ride along so the client can show which channels
/// were actually reached; they never affect the status code.
#[derive(Debug, Serialize)]
pub struct CreateOrderResponse {
    pub message: &'static str,
    pub order: CreatedOrderView,
    pub notifications: NotificationReport,
}

/// Place an order and fan out notifications.
///
/// POST /api/orders/create
///
/// Notification delivery is best effort. A fully failed fan-out still
/// returns 201; the per-channel outcomes are embedded in the response.
///
/// # Errors
///
/// Returns 400 when the item list is empty.
#[instrument(skip(state, claims, req), fields(user_id = %claims.id))]
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(claims): RequireAuth,
    ApiJson(req): ApiJson<CreateOrderRequest>,
) -> Result<(StatusCode, Json<CreateOrderResponse>), AppError> {
    if req.items.is_empty() {
        return Err(AppError::BadRequest("Cart cannot be empty".to_string()));
    }

    let total = Order::total_of(&req.items);
    let order = state
        .orders()
        .create(claims.id, claims.name.clone(), req.items, total)
        .await;

    let entry = OrderHistoryEntry {
        order_id: order.id,
        timestamp: order.created_at,
        items: order.items.clone(),
        total_price: order.total_price,
    };
    if !state.users().record_order(claims.id, entry).await {
        // The token outlived the account; the order itself still stands.
        warn!(user_id = %claims.id, "Order placed by a user missing from the store");
    }

    let notifications = state.notifier().notify(&order).await;

    info!(
        order_id = %order.id,
        total_sent = notifications.total_sent,
        "Order created",
    );

    Ok((
        StatusCode::CREATED,
        Json(CreateOrderResponse {
            message: "Order created successfully",
            order: CreatedOrderView {
                id: order.id,
                status: order.status,
                items: order.items,
                created_at: order.created_at,
            },
            notifications,
        }),
    ))
}

// ============================================================================
// Own orders
// ============================================================================

/// Order view returned from the own-orders listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnOrderView {
    pub id: OrderId,
    pub status: OrderStatus,
    pub items: Vec<LineItem>,
    pub total_price: Price,
    pub created_at: DateTime<Utc>,
}

/// Response listing the caller's orders.
#[derive(Debug, Serialize)]
pub struct MyOrdersResponse {
    pub orders: Vec<OwnOrderView>,
}

/// List the caller's own orders, oldest first.
///
/// GET /api/orders/my-orders
pub async fn my_orders(
    State(state): State<AppState>,
    RequireAuth(claims): RequireAuth,
) -> Json<MyOrdersResponse> {
    let orders = state
        .orders()
        .find_by_user(claims.id)
        .await
        .into_iter()
        .map(|order| OwnOrderView {
            id: order.id,
            status: order.status,
            items: order.items,
            total_price: order.total_price,
            created_at: order.created_at,
        })
        .collect();

    Json(MyOrdersResponse { orders })
}

// ============================================================================
// Detail
// ============================================================================

/// Response wrapping one full order.
#[derive(Debug, Serialize)]
pub struct OrderDetailResponse {
    pub order: Order,
}

/// Fetch a single order by id.
///
/// GET /api/orders/{order_id}
///
/// # Errors
///
/// Returns 404 when the id is unknown (or not numeric at all), 403 when the
/// order belongs to someone else.
pub async fn detail(
    State(state): State<AppState>,
    RequireAuth(claims): RequireAuth,
    Path(order_id): Path<String>,
) -> Result<Json<OrderDetailResponse>, AppError> {
    let id = order_id
        .parse::<u64>()
        .map(OrderId::new)
        .map_err(|_| AppError::NotFound("Order not found".to_string()))?;
    let order = state
        .orders()
        .find_by_id(id)
        .await
        .ok_or_else(|| AppError::NotFound("Order not found".to_string()))?;

    if order.user_id != claims.id {
        return Err(AppError::Forbidden("Unauthorized".to_string()));
    }

    Ok(Json(OrderDetailResponse { order }))
}

// ============================================================================
// All orders
// ============================================================================

/// Order view returned from the all-orders listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminOrderView {
    pub id: OrderId,
    pub user_name: String,
    pub status: OrderStatus,
    pub items: Vec<LineItem>,
    pub total_price: Price,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub summary: String,
}

/// Response listing every order in the system.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminOrdersResponse {
    pub total_orders: usize,
    pub orders: Vec<AdminOrderView>,
}

/// List every order, newest first.
///
/// GET /api/orders/admin/all
pub async fn admin_all(
    State(state): State<AppState>,
    RequireAuth(_claims): RequireAuth,
) -> Json<AdminOrdersResponse> {
    let orders: Vec<AdminOrderView> = state
        .orders()
        .list_all()
        .await
        .into_iter()
        .map(|order| {
            let summary = order.summary();
            AdminOrderView {
                id: order.id,
                user_name: order.user_name,
                status: order.status,
                items: order.items,
                total_price: order.total_price,
                created_at: order.created_at,
                updated_at: order.updated_at,
                summary,
            }
        })
        .collect();

    Json(AdminOrdersResponse {
        total_orders: orders.len(),
        orders,
    })
}
