use axum::{
    async_trait,
    extract::{FromRequest, Path, Request, State},
    routing::{get, post},
    Json, Router,
};
use serde::de::DeserializeOwned;
use tracing::instrument;
use uuid::Uuid;

use crate::auth::extractors::Requester;
use crate::auth::token::Token;
use crate::error::AppError;
use crate::state::AppState;
use crate::users::dto::{SuccessBody, UserCreate, UserLogin, UserUpdate};
use crate::users::model::User;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users/register", post(register))
        .route("/users/login", post(login))
        .route("/users/", get(get_all_users))
        .route(
            "/users/:id",
            get(get_user).patch(update_user).delete(delete_user),
        )
}

/// JSON body extractor whose rejection is the invalid-request envelope.
struct AppJson<T>(T);

#[async_trait]
impl<S, T> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::invalid_request(rejection.body_text()))?;
        Ok(AppJson(value))
    }
}

fn parse_user_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::invalid_request("invalid user id"))
}

#[instrument(skip(state, payload))]
async fn register(
    State(state): State<AppState>,
    AppJson(payload): AppJson<UserCreate>,
) -> Result<Json<SuccessBody<Uuid>>, AppError> {
    let id = state.users.register(payload).await?;
    Ok(Json(SuccessBody::new(id)))
}

#[instrument(skip(state, payload))]
async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<UserLogin>,
) -> Result<Json<SuccessBody<Token>>, AppError> {
    let token = state.users.login(payload).await?;
    Ok(Json(SuccessBody::new(token)))
}

#[instrument(skip(state))]
async fn get_all_users(
    State(state): State<AppState>,
) -> Result<Json<SuccessBody<Vec<User>>>, AppError> {
    let users = state.users.get_all_users().await?;
    Ok(Json(SuccessBody::new(users)))
}

// Self-profile endpoint: always returns the requester's own record, the path
// id is not consulted.
#[instrument(skip(state, _id))]
async fn get_user(
    State(state): State<AppState>,
    requester: Requester,
    Path(_id): Path<String>,
) -> Result<Json<SuccessBody<User>>, AppError> {
    let user = state.users.get_user_by_id(requester.user_id).await?;
    Ok(Json(SuccessBody::new(user)))
}

#[instrument(skip(state, changes))]
async fn update_user(
    State(state): State<AppState>,
    requester: Requester,
    Path(id): Path<String>,
    AppJson(changes): AppJson<UserUpdate>,
) -> Result<Json<SuccessBody<bool>>, AppError> {
    let id = parse_user_id(&id)?;

    // A caller may only update their own record.
    if requester.user_id != id {
        return Err(AppError::unauthorized("id does not match"));
    }

    state.users.update_user(id, changes).await?;
    Ok(Json(SuccessBody::new(true)))
}

#[instrument(skip(state))]
async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SuccessBody<bool>>, AppError> {
    let id = parse_user_id(&id)?;
    state.users.delete_user(id).await?;
    Ok(Json(SuccessBody::new(true)))
}
