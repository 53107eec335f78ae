//! Bearer-token authentication for the REST surface.
//!
//! [`AuthContext`] is an extractor: naming it in a handler signature makes
//! the endpoint require a verified token, and [`AuthContext::require_any_role`]
//! layers the role check on top. The login and refresh handlers live here as
//! well because they are the only anonymous endpoints.
//!
//! ```text
//! POST /api/auth/login {"email":"admin@example.com","password":"password"}
//! POST /api/auth/refresh-token {"accessToken":"..."}
//! ```

use std::future::{Ready, ready};

use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, dev::Payload, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::ports::{IssuedToken, Principal, TokenError};
use crate::domain::{Error, LoginCredentials, LoginValidationError, Role};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Verified caller identity for protected endpoints.
#[derive(Debug, Clone)]
pub struct AuthContext {
    principal: Principal,
}

impl AuthContext {
    /// The principal extracted from the verified token.
    #[must_use]
    pub fn principal(&self) -> &Principal {
        &self.principal
    }

    /// Require at least one of the listed roles or fail with `403 Forbidden`.
    pub fn require_any_role(&self, required: &[Role]) -> Result<(), Error> {
        if self.principal.has_any_role(required) {
            return Ok(());
        }
        let names = required
            .iter()
            .map(Role::as_str)
            .collect::<Vec<_>>()
            .join(" or ");
        Err(Error::forbidden(format!(
            "this action requires the {names} role"
        )))
    }
}

fn bearer_token(req: &HttpRequest) -> Result<&str, Error> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| Error::unauthorized("missing bearer token"))
}

fn verify_request(req: &HttpRequest) -> Result<AuthContext, Error> {
    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| Error::internal("HttpState is not registered on the app"))?;
    let token = bearer_token(req)?;
    let principal = state.tokens.verify(token).map_err(|err| match err {
        TokenError::Expired => Error::unauthorized("token has expired"),
        TokenError::Invalid | TokenError::Signing { .. } => {
            Error::unauthorized("token is invalid")
        }
    })?;
    Ok(AuthContext { principal })
}

impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(verify_request(req))
    }
}

/// Login request body for `POST /api/auth/login`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.email, &value.password)
    }
}

/// Refresh request body for `POST /api/auth/refresh-token`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub access_token: String,
}

/// Bearer token issued by login and refresh.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub access_token: String,
    #[schema(value_type = String, format = DateTime)]
    pub expires_at: DateTime<Utc>,
}

impl From<IssuedToken> for TokenResponse {
    fn from(issued: IssuedToken) -> Self {
        Self {
            access_token: issued.access_token,
            expires_at: issued.expires_at,
        }
    }
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::Email(_) => {
            Error::invalid_request("email must be a valid mail address")
                .with_details(json!({ "field": "email", "code": "invalid_email" }))
        }
        LoginValidationError::EmptyPassword => Error::invalid_request("password must not be empty")
            .with_details(json!({ "field": "password", "code": "empty_password" })),
    }
}

/// Authenticate with mail address and password.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = TokenResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<TokenResponse>> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_login_validation_error)?;
    let issued = state.authenticator.login(&credentials).await?;
    Ok(web::Json(TokenResponse::from(issued)))
}

/// Exchange a possibly expired token for a fresh one.
#[utoipa::path(
    post,
    path = "/api/auth/refresh-token",
    request_body = RefreshRequest,
    responses(
        (status = 200, description = "Token refreshed", body = TokenResponse),
        (status = 400, description = "Invalid token", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "refreshToken",
    security([])
)]
#[post("/auth/refresh-token")]
pub async fn refresh_token(
    state: web::Data<HttpState>,
    payload: web::Json<RefreshRequest>,
) -> ApiResult<web::Json<TokenResponse>> {
    let issued = state.authenticator.refresh(&payload.access_token).await?;
    Ok(web::Json(TokenResponse::from(issued)))
}
