//! Vendor API handlers.
//!
//! ```text
//! GET    /api/vendor
//! GET    /api/vendor/{id}
//! POST   /api/vendor
//! PUT    /api/vendor/{id}
//! DELETE /api/vendor/{id}
//! ```
//!
//! Reads serve the with-children shape. Writes validate the payload into a
//! [`VendorDraft`] before anything touches a port, and deletes are reserved
//! for administrators.

use actix_web::http::header;
use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{Error, Role, Vendor, VendorDraft, VendorValidationError, VendorWithChildren};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::require_matching_ids;

/// Vendor fields accepted on create.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VendorCreateRequest {
    pub name: String,
    pub name2: Option<String>,
    pub address1: String,
    pub address2: Option<String>,
    pub zip: Option<String>,
    pub country: String,
    pub city: Option<String>,
    pub mail: String,
    pub phone: String,
    pub notes: Option<String>,
}

impl TryFrom<VendorCreateRequest> for VendorDraft {
    type Error = VendorValidationError;

    fn try_from(value: VendorCreateRequest) -> Result<Self, Self::Error> {
        VendorDraft::builder(
            value.name,
            value.address1,
            value.country,
            value.mail,
            value.phone,
        )
        .name2(value.name2)
        .address2(value.address2)
        .zip(value.zip)
        .city(value.city)
        .notes(value.notes)
        .build()
    }
}

/// Full vendor record expected on update, including the revision the client
/// last read.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VendorUpdateRequest {
    pub id: Uuid,
    pub name: String,
    pub name2: Option<String>,
    pub address1: String,
    pub address2: Option<String>,
    pub zip: Option<String>,
    pub country: String,
    pub city: Option<String>,
    pub mail: String,
    pub phone: String,
    pub notes: Option<String>,
    pub revision: u32,
}

impl TryFrom<VendorUpdateRequest> for VendorDraft {
    type Error = VendorValidationError;

    fn try_from(value: VendorUpdateRequest) -> Result<Self, Self::Error> {
        VendorDraft::builder(
            value.name,
            value.address1,
            value.country,
            value.mail,
            value.phone,
        )
        .name2(value.name2)
        .address2(value.address2)
        .zip(value.zip)
        .city(value.city)
        .notes(value.notes)
        .build()
    }
}

fn map_vendor_validation_error(err: VendorValidationError) -> Error {
    let (field, code) = match &err {
        VendorValidationError::EmptyName => ("name", "empty_name"),
        VendorValidationError::EmptyAddress => ("address1", "empty_address"),
        VendorValidationError::EmptyCountry => ("country", "empty_country"),
        VendorValidationError::EmptyMail => ("mail", "empty_mail"),
        VendorValidationError::Phone(_) => ("phone", "invalid_phone"),
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field, "code": code }))
}

/// List every vendor with its bank accounts and contact persons.
#[utoipa::path(
    get,
    path = "/api/vendor",
    responses(
        (status = 200, description = "Vendors", body = [VendorWithChildren]),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["vendors"],
    operation_id = "listVendors"
)]
#[get("/vendor")]
pub async fn list_vendors(
    _auth: AuthContext,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<VendorWithChildren>>> {
    Ok(web::Json(state.vendors_query.list_vendors().await?))
}

/// Fetch a single vendor with its children.
#[utoipa::path(
    get,
    path = "/api/vendor/{id}",
    params(("id" = Uuid, Path, description = "Vendor identifier")),
    responses(
        (status = 200, description = "Vendor", body = VendorWithChildren),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["vendors"],
    operation_id = "getVendor"
)]
#[get("/vendor/{id}")]
pub async fn get_vendor(
    _auth: AuthContext,
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<VendorWithChildren>> {
    let vendor = state.vendors_query.get_vendor(path.into_inner()).await?;
    Ok(web::Json(vendor))
}

/// Create a vendor.
#[utoipa::path(
    post,
    path = "/api/vendor",
    request_body = VendorCreateRequest,
    responses(
        (
            status = 201,
            description = "Vendor created",
            body = Vendor,
            headers(("Location" = String, description = "URL of the created vendor"))
        ),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["vendors"],
    operation_id = "createVendor"
)]
#[post("/vendor")]
pub async fn create_vendor(
    auth: AuthContext,
    state: web::Data<HttpState>,
    payload: web::Json<VendorCreateRequest>,
) -> ApiResult<HttpResponse> {
    auth.require_any_role(&[Role::Admin, Role::Manager])?;
    let draft = VendorDraft::try_from(payload.into_inner()).map_err(map_vendor_validation_error)?;
    let vendor = state.vendors.create_vendor(draft).await?;
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/api/vendor/{}", vendor.id)))
        .json(vendor))
}

/// Replace a vendor's mutable fields.
///
/// The body carries the full record; its `id` must match the path and its
/// `revision` must match the stored revision.
#[utoipa::path(
    put,
    path = "/api/vendor/{id}",
    params(("id" = Uuid, Path, description = "Vendor identifier")),
    request_body = VendorUpdateRequest,
    responses(
        (status = 204, description = "Vendor updated"),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 409, description = "Revision conflict", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["vendors"],
    operation_id = "updateVendor"
)]
#[put("/vendor/{id}")]
pub async fn update_vendor(
    auth: AuthContext,
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
    payload: web::Json<VendorUpdateRequest>,
) -> ApiResult<HttpResponse> {
    auth.require_any_role(&[Role::Admin, Role::Manager])?;
    let id = path.into_inner();
    let body = payload.into_inner();
    require_matching_ids(id, body.id)?;
    let expected_revision = body.revision;
    let draft = VendorDraft::try_from(body).map_err(map_vendor_validation_error)?;
    state
        .vendors
        .update_vendor(id, draft, expected_revision)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Delete a vendor together with its bank accounts and contact persons.
#[utoipa::path(
    delete,
    path = "/api/vendor/{id}",
    params(("id" = Uuid, Path, description = "Vendor identifier")),
    responses(
        (status = 204, description = "Vendor deleted"),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["vendors"],
    operation_id = "deleteVendor"
)]
#[delete("/vendor/{id}")]
pub async fn delete_vendor(
    auth: AuthContext,
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    auth.require_any_role(&[Role::Admin])?;
    state.vendors.delete_vendor(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
