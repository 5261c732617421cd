use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Extension, Json,
};
use serde::Deserialize;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::models::{Account, AccountChanges, DeletedAccount};
use crate::services::AccountError;

type Caller = Option<Extension<AuthUser>>;

fn caller(auth: &Caller) -> Option<&AuthUser> {
    auth.as_ref().map(|Extension(user)| user)
}

#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    pub text: Option<String>,
}

/// GET /api/accounts - records owned by the caller
pub async fn list(
    State(state): State<AppState>,
    auth: Caller,
) -> Result<Json<Vec<Account>>, ApiError> {
    let accounts = state.accounts.list(caller(&auth)).await?;
    Ok(Json(accounts))
}

/// POST /api/accounts - create a record owned by the caller
pub async fn create(
    State(state): State<AppState>,
    auth: Caller,
    payload: Result<Json<CreateAccountRequest>, JsonRejection>,
) -> Result<Json<Account>, ApiError> {
    let Json(request) = payload?;
    let account = state.accounts.create(caller(&auth), request.text).await?;
    Ok(Json(account))
}

/// PUT /api/accounts/:id - overwrite the mutable fields of a record
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    auth: Caller,
    payload: Result<Json<AccountChanges>, JsonRejection>,
) -> Result<Json<Account>, ApiError> {
    let account = state
        .accounts
        .update(caller(&auth), &id, changes_from(payload))
        .await?;
    Ok(Json(account))
}

/// A request without a JSON body carries no changes
fn changes_from(
    payload: Result<Json<AccountChanges>, JsonRejection>,
) -> Result<AccountChanges, AccountError> {
    match payload {
        Ok(Json(changes)) => Ok(changes),
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(AccountChanges::default()),
        Err(rejection) => Err(AccountError::InvalidBody(rejection.body_text())),
    }
}

/// DELETE /api/accounts/:id - remove a record, answering with its id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    auth: Caller,
) -> Result<Json<DeletedAccount>, ApiError> {
    let deleted = state.accounts.delete(caller(&auth), &id).await?;
    Ok(Json(deleted))
}
