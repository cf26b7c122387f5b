//! Handlers under `/payment-service/api/payments`.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use commerce_types::{CollectionResponse, PaymentDto, PaymentId, PaymentRepository};

use super::{ApiError, parse_id};
use crate::PaymentService;

/// List all payments.
#[tracing::instrument(skip(service))]
pub async fn find_all<R: PaymentRepository>(
    State(service): State<Arc<PaymentService<R>>>,
) -> Result<impl IntoResponse, ApiError> {
    let payments = service.find_all().await?;
    Ok(Json(CollectionResponse::from(payments)))
}

/// Get payment by ID.
#[tracing::instrument(skip(service))]
pub async fn find_by_id<R: PaymentRepository>(
    State(service): State<Arc<PaymentService<R>>>,
    Path(payment_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id: PaymentId = parse_id(&payment_id, "payment")?;
    let payment = service.find_by_id(id).await?;
    Ok(Json(payment))
}

/// Create a payment.
#[tracing::instrument(skip(service, dto))]
pub async fn save<R: PaymentRepository>(
    State(service): State<Arc<PaymentService<R>>>,
    Json(dto): Json<PaymentDto>,
) -> Result<impl IntoResponse, ApiError> {
    let payment = service.save(dto).await?;
    Ok((StatusCode::CREATED, Json(payment)))
}

/// Update the payment named by the body's `paymentId`.
#[tracing::instrument(skip(service, dto))]
pub async fn update<R: PaymentRepository>(
    State(service): State<Arc<PaymentService<R>>>,
    Json(dto): Json<PaymentDto>,
) -> Result<impl IntoResponse, ApiError> {
    let payment = service.update(dto).await?;
    Ok(Json(payment))
}

/// Update the payment named in the path.
#[tracing::instrument(skip(service, dto))]
pub async fn update_by_id<R: PaymentRepository>(
    State(service): State<Arc<PaymentService<R>>>,
    Path(payment_id): Path<String>,
    Json(dto): Json<PaymentDto>,
) -> Result<impl IntoResponse, ApiError> {
    let id: PaymentId = parse_id(&payment_id, "payment")?;
    let payment = service.update_by_id(id, dto).await?;
    Ok(Json(payment))
}

/// Delete a payment.
#[tracing::instrument(skip(service))]
pub async fn delete_by_id<R: PaymentRepository>(
    State(service): State<Arc<PaymentService<R>>>,
    Path(payment_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id: PaymentId = parse_id(&payment_id, "payment")?;
    service.delete_by_id(id).await?;
    Ok(Json(true))
}
