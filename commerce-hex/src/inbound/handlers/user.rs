//! Handlers under `/user-service/api/users`.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use commerce_types::{CollectionResponse, UserDto, UserId, UserRepository};

use super::{ApiError, parse_id};
use crate::UserService;

/// List all users.
#[tracing::instrument(skip(service))]
pub async fn find_all<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
) -> Result<impl IntoResponse, ApiError> {
    let users = service.find_all().await?;
    Ok(Json(CollectionResponse::from(users)))
}

#[tracing::instrument(skip(service))]
pub async fn find_by_id<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id: UserId = parse_id(&user_id, "user")?;
    let user = service.find_by_id(id).await?;
    Ok(Json(user))
}

#[tracing::instrument(skip(service))]
pub async fn find_by_username<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    Path(username): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let user = service.find_by_username(&username).await?;
    Ok(Json(user))
}

/// Create a user with its credential.
#[tracing::instrument(skip(service, dto))]
pub async fn save<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    Json(dto): Json<UserDto>,
) -> Result<impl IntoResponse, ApiError> {
    let user = service.save(dto).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

#[tracing::instrument(skip(service, dto))]
pub async fn update<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    Json(dto): Json<UserDto>,
) -> Result<impl IntoResponse, ApiError> {
    let user = service.update(dto).await?;
    Ok(Json(user))
}

#[tracing::instrument(skip(service, dto))]
pub async fn update_by_id<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    Path(user_id): Path<String>,
    Json(dto): Json<UserDto>,
) -> Result<impl IntoResponse, ApiError> {
    let id: UserId = parse_id(&user_id, "user")?;
    let user = service.update_by_id(id, dto).await?;
    Ok(Json(user))
}

/// Delete a user and its credential.
#[tracing::instrument(skip(service))]
pub async fn delete_by_id<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id: UserId = parse_id(&user_id, "user")?;
    service.delete_by_id(id).await?;
    Ok(Json(true))
}
