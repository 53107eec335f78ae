//! User administration API handlers.
//!
//! ```text
//! GET    /api/user
//! POST   /api/user {"email":"ada@example.com","password":"...","roles":["manager"]}
//! DELETE /api/user/{id}
//! ```
//!
//! Every endpoint here requires the admin role. Responses carry the
//! credential-free [`UserSummary`] shape; password hashes never leave the
//! domain.

use actix_web::http::header;
use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::ports::UserSummary;
use crate::domain::{AccountValidationError, Error, NewUser, Role};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_roles;

/// Account fields accepted on create.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserCreateRequest {
    pub email: String,
    pub password: String,
    pub roles: Vec<String>,
}

fn map_account_validation_error(err: AccountValidationError) -> Error {
    let (field, code) = match &err {
        AccountValidationError::EmptyEmail => ("email", "empty_email"),
        AccountValidationError::InvalidEmail => ("email", "invalid_email"),
        AccountValidationError::PasswordTooShort { .. } => ("password", "password_too_short"),
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field, "code": code }))
}

/// List every account without credential material.
#[utoipa::path(
    get,
    path = "/api/user",
    responses(
        (status = 200, description = "Accounts", body = [UserSummary]),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/user")]
pub async fn list_users(
    auth: AuthContext,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<UserSummary>>> {
    auth.require_any_role(&[Role::Admin])?;
    Ok(web::Json(state.users_query.list_users().await?))
}

/// Create an account with the given roles.
#[utoipa::path(
    post,
    path = "/api/user",
    request_body = UserCreateRequest,
    responses(
        (
            status = 201,
            description = "Account created",
            body = UserSummary,
            headers(("Location" = String, description = "URL of the created account"))
        ),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/user")]
pub async fn create_user(
    auth: AuthContext,
    state: web::Data<HttpState>,
    payload: web::Json<UserCreateRequest>,
) -> ApiResult<HttpResponse> {
    auth.require_any_role(&[Role::Admin])?;
    let body = payload.into_inner();
    let roles = parse_roles(body.roles)?;
    let new_user = NewUser::try_from_parts(&body.email, &body.password, roles)
        .map_err(map_account_validation_error)?;
    let summary = state.users.create_user(new_user).await?;
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/api/user/{}", summary.id)))
        .json(summary))
}

/// Delete an account.
#[utoipa::path(
    delete,
    path = "/api/user/{id}",
    params(("id" = Uuid, Path, description = "Account identifier")),
    responses(
        (status = 204, description = "Account deleted"),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/user/{id}")]
pub async fn delete_user(
    auth: AuthContext,
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    auth.require_any_role(&[Role::Admin])?;
    state.users.delete_user(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
