//! Orders routes: paginated listing, creation form data, and creation.
//!
//! Handlers normalize the Directory API's responses into flat view models;
//! every fetch is a fresh transaction with no retries, and upstream errors
//! surface as page-level messages carrying the HTTP status when available.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Json, Redirect};
use axum::Extension;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
use tracing::{error, warn};

use crate::directory::models::{ClientOption, Order, OrderDraft, format_date, status_variant};
use crate::directory::pagination::Pagination;
use crate::routes::ErrorResponse;
use crate::server::AppState;
use crate::session::models::CurrentSession;

#[derive(Debug, Deserialize)]
pub struct ListOrdersQuery {
    /// Raw page value; anything unparseable degrades to the first page
    pub page: Option<String>,
}

/// One row of the orders table
#[derive(Debug, Serialize)]
pub struct OrderRow {
    pub id: i64,
    pub delivery_address: String,
    pub fuel_amount: String,
    pub status: String,
    pub status_variant: &'static str,
    pub created_at: String,
    pub delivered_at: String,
}

impl From<&Order> for OrderRow {
    fn from(order: &Order) -> Self {
        OrderRow {
            id: order.id,
            delivery_address: order.delivery_address.clone(),
            fuel_amount: order.fuel_amount.clone(),
            status: order.status.clone(),
            status_variant: status_variant(&order.status),
            created_at: format_date(order.created_at.as_deref()),
            delivered_at: format_date(order.delivered_at.as_deref()),
        }
    }
}

/// Orders listing view model
#[derive(Debug, Serialize)]
pub struct OrdersPageView {
    pub items: Vec<OrderRow>,
    pub total_items: u64,
    pub pagination: Pagination,
}

pub async fn list_orders(
    State(app_state): State<AppState>,
    Extension(session): Extension<CurrentSession>,
    Query(query): Query<ListOrdersQuery>,
) -> Result<Json<OrdersPageView>, (StatusCode, Json<ErrorResponse>)> {
    let page = query
        .page
        .as_deref()
        .and_then(|p| p.parse::<u32>().ok())
        .filter(|p| *p >= 1)
        .unwrap_or(1);

    let collection = app_state
        .directory
        .list_orders(session.access_token(), page)
        .await
        .map_err(|e| {
            error!("Failed to load orders: {}", e);
            let message = match e.status() {
                Some(status) => format!("Failed to load orders ({})", status),
                None => "Failed to load orders".to_string(),
            };
            (StatusCode::BAD_GATEWAY, Json(ErrorResponse { error: message }))
        })?;

    let pagination = Pagination::resolve(collection.view.as_ref(), page);
    let items = collection.member.iter().map(OrderRow::from).collect();

    Ok(Json(OrdersPageView {
        items,
        total_items: collection.total_items,
        pagination,
    }))
}

/// Reference data for the order-creation form
#[derive(Debug, Serialize)]
pub struct NewOrderView {
    pub clients: Vec<ClientOption>,
}

pub async fn new_order_form(
    State(app_state): State<AppState>,
    Extension(session): Extension<CurrentSession>,
) -> Result<Json<NewOrderView>, (StatusCode, Json<ErrorResponse>)> {
    let clients = app_state
        .directory
        .list_clients(session.access_token())
        .await
        .map_err(|e| {
            warn!("Failed to load clients: {}", e);
            let message = match e.status() {
                Some(status) => format!("Failed to load clients ({})", status),
                None => "Failed to load clients".to_string(),
            };
            (StatusCode::BAD_GATEWAY, Json(ErrorResponse { error: message }))
        })?;

    Ok(Json(NewOrderView {
        clients: clients.into_iter().map(|record| record.normalize()).collect(),
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    #[serde(default)]
    pub client: String,
    #[serde(default)]
    pub fuel_amount: String,
    #[serde(default)]
    pub delivery_address: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Per-field validation errors, surfaced inline by the form
#[derive(Debug, Serialize)]
pub struct ValidationErrors {
    pub errors: BTreeMap<&'static str, &'static str>,
}

/// Create-order failure: either field errors or an upstream message
#[derive(Debug)]
pub enum CreateOrderError {
    Invalid(ValidationErrors),
    Upstream { status: StatusCode, message: String },
    Unauthenticated,
}

impl axum::response::IntoResponse for CreateOrderError {
    fn into_response(self) -> axum::response::Response {
        match self {
            CreateOrderError::Invalid(errors) => {
                (StatusCode::UNPROCESSABLE_ENTITY, Json(errors)).into_response()
            }
            CreateOrderError::Upstream { status, message } => {
                (status, Json(ErrorResponse { error: message })).into_response()
            }
            CreateOrderError::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse {
                    error: "You're not signed in".to_string(),
                }),
            )
                .into_response(),
        }
    }
}

fn validate(payload: &CreateOrderRequest) -> Result<OrderDraft, ValidationErrors> {
    let mut errors = BTreeMap::new();

    if payload.client.is_empty() {
        errors.insert("client", "Client is required");
    }
    if payload.fuel_amount.is_empty() {
        errors.insert("fuelAmount", "Fuel amount is required");
    } else if Decimal::from_str(payload.fuel_amount.trim()).is_err() {
        errors.insert("fuelAmount", "Enter a valid number");
    }
    if payload.delivery_address.is_empty() {
        errors.insert("deliveryAddress", "Delivery address is required");
    }

    if !errors.is_empty() {
        return Err(ValidationErrors { errors });
    }

    Ok(OrderDraft {
        client: payload.client.clone(),
        fuel_amount: payload.fuel_amount.clone(),
        delivery_address: payload.delivery_address.clone(),
        status: "scheduled".to_string(),
        notes: payload.notes.clone().filter(|notes| !notes.is_empty()),
    })
}

/// Submit a new order and bounce back to the listing, which re-fetches.
/// On upstream failure the response body text is reported verbatim and no
/// navigation happens.
pub async fn create_order(
    State(app_state): State<AppState>,
    session: Option<Extension<CurrentSession>>,
    Json(payload): Json<CreateOrderRequest>,
) -> Result<Redirect, CreateOrderError> {
    let Some(Extension(session)) = session else {
        return Err(CreateOrderError::Unauthenticated);
    };

    let draft = validate(&payload).map_err(CreateOrderError::Invalid)?;

    app_state
        .directory
        .create_order(session.access_token(), &draft)
        .await
        .map_err(|e| {
            warn!("Failed to create order: {}", e);
            match e {
                crate::directory::DirectoryError::Upstream { status, body } => {
                    let message = if body.trim().is_empty() {
                        format!("Failed to create order ({})", status)
                    } else {
                        body
                    };
                    CreateOrderError::Upstream {
                        status: StatusCode::from_u16(status)
                            .unwrap_or(StatusCode::BAD_GATEWAY),
                        message,
                    }
                }
                other => CreateOrderError::Upstream {
                    status: StatusCode::BAD_GATEWAY,
                    message: other.to_string(),
                },
            }
        })?;

    Ok(Redirect::to("/dashboard/orders"))
}
