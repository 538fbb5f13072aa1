use crate::config::Config;
use crate::customers::CustomerStore;
use crate::errors::AppError;
use crate::models::*;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: PgPool,
    /// Application configuration.
    pub config: Config,
}

/// Health check endpoint.
///
/// Returns the service status. Mounted outside the rate limiter so load
/// balancer probes are never throttled.
///
/// # Returns
///
/// * `(StatusCode, Json<serde_json::Value>)` - HTTP 200 OK with health status JSON.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "birthday-club-api"
        })),
    )
}

/// POST /api/customers/signup
///
/// Initial customer signup with the minimal field set. Issues the account
/// number and creates the record in the signup state.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `signup` - JSON body with name, phone, email, date of birth and category.
///
/// # Returns
///
/// * `Result<Json<CustomerResponse>, AppError>` - The created customer or an error.
pub async fn customer_signup(
    State(state): State<Arc<AppState>>,
    Json(signup): Json<CustomerSignup>,
) -> Result<Json<CustomerResponse>, AppError> {
    tracing::info!(
        "POST /api/customers/signup - category: {}",
        signup.customer_category
    );

    let store = CustomerStore::new(state.db.clone());
    let customer = store.signup(signup).await?;

    Ok(Json(CustomerResponse::from(customer)))
}

/// POST /api/customers/:account_number/profile
///
/// Completes the extended customer profile. Idempotent with respect to the
/// profile number: repeated completions keep the number issued the first time.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `account_number` - Account number from the path.
/// * `profile` - JSON body with the full profile field set.
///
/// # Returns
///
/// * `Result<Json<CustomerResponse>, AppError>` - The updated customer or an error.
pub async fn complete_customer_profile(
    State(state): State<Arc<AppState>>,
    Path(account_number): Path<String>,
    Json(profile): Json<CustomerProfile>,
) -> Result<Json<CustomerResponse>, AppError> {
    tracing::info!("POST /api/customers/{}/profile", account_number);

    let store = CustomerStore::new(state.db.clone());
    let customer = store.complete_profile(&account_number, profile).await?;

    Ok(Json(CustomerResponse::from(customer)))
}

/// GET /api/customers
///
/// Lists customers with optional category and completion filters, newest
/// first, with skip/limit paging.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `params` - Query parameters (customer_type, profile_completed, limit, skip).
///
/// # Returns
///
/// * `Result<Json<Vec<CustomerResponse>>, AppError>` - Matching customers or an error.
pub async fn get_customers(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CustomerQueryParams>,
) -> Result<Json<Vec<CustomerResponse>>, AppError> {
    tracing::info!("GET /api/customers - params: {:?}", params);

    let store = CustomerStore::new(state.db.clone());
    let customers = store.list(&params).await?;

    Ok(Json(
        customers.into_iter().map(CustomerResponse::from).collect(),
    ))
}

/// GET /api/customers/:account_number
///
/// Retrieves a single customer by account number.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `account_number` - Account number from the path.
///
/// # Returns
///
/// * `Result<Json<CustomerResponse>, AppError>` - The customer or an error.
pub async fn get_customer(
    State(state): State<Arc<AppState>>,
    Path(account_number): Path<String>,
) -> Result<Json<CustomerResponse>, AppError> {
    tracing::info!("GET /api/customers/{}", account_number);

    let store = CustomerStore::new(state.db.clone());
    let customer = store.get_by_account_number(&account_number).await?;

    Ok(Json(CustomerResponse::from(customer)))
}

/// GET /api/customers/:account_number/profile
///
/// Retrieves the full profile record, including the extended fields. Fails
/// with a 404 when the account is unknown or the profile is not completed.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `account_number` - Account number from the path.
///
/// # Returns
///
/// * `Result<Json<Customer>, AppError>` - The full customer record or an error.
pub async fn get_customer_profile(
    State(state): State<Arc<AppState>>,
    Path(account_number): Path<String>,
) -> Result<Json<Customer>, AppError> {
    tracing::info!("GET /api/customers/{}/profile", account_number);

    let store = CustomerStore::new(state.db.clone());
    let customer = store.get_profile(&account_number).await?;

    Ok(Json(customer))
}

/// GET /api/stats
///
/// Aggregate customer statistics: totals, per-category counts and the
/// profile completion rate.
///
/// # Arguments
///
/// * `state` - The application state.
///
/// # Returns
///
/// * `Result<Json<StatsResponse>, AppError>` - Aggregate counts or an error.
pub async fn get_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatsResponse>, AppError> {
    tracing::info!("GET /api/stats");

    let store = CustomerStore::new(state.db.clone());
    let stats = store.stats().await?;

    Ok(Json(stats))
}
