//! Contact person API handlers.
//!
//! ```text
//! GET    /api/contactperson
//! GET    /api/contactperson/{id}
//! POST   /api/contactperson
//! PUT    /api/contactperson/{id}
//! DELETE /api/contactperson/{id}
//! ```
//!
//! Reads serve the person paired with its owning vendor. Only the phone
//! number carries a format rule.

use actix_web::http::header;
use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    ContactPerson, ContactPersonDraft, ContactPersonValidationError, ContactPersonWithVendor,
    Error, Role,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::require_matching_ids;

/// Contact person fields accepted on create.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactPersonCreateRequest {
    pub vendor_id: Uuid,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: String,
    pub mail: Option<String>,
}

impl TryFrom<ContactPersonCreateRequest> for ContactPersonDraft {
    type Error = ContactPersonValidationError;

    fn try_from(value: ContactPersonCreateRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(
            value.vendor_id,
            value.first_name,
            value.last_name,
            &value.phone,
            value.mail,
        )
    }
}

/// Full contact person record expected on update, including the revision the
/// client last read.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactPersonUpdateRequest {
    pub id: Uuid,
    pub vendor_id: Uuid,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: String,
    pub mail: Option<String>,
    pub revision: u32,
}

impl TryFrom<ContactPersonUpdateRequest> for ContactPersonDraft {
    type Error = ContactPersonValidationError;

    fn try_from(value: ContactPersonUpdateRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(
            value.vendor_id,
            value.first_name,
            value.last_name,
            &value.phone,
            value.mail,
        )
    }
}

fn map_contact_person_validation_error(err: ContactPersonValidationError) -> Error {
    let (field, code) = match &err {
        ContactPersonValidationError::Phone(_) => ("phone", "invalid_phone"),
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field, "code": code }))
}

/// List every contact person with its owning vendor.
#[utoipa::path(
    get,
    path = "/api/contactperson",
    responses(
        (status = 200, description = "Contact persons", body = [ContactPersonWithVendor]),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["contact-persons"],
    operation_id = "listContactPersons"
)]
#[get("/contactperson")]
pub async fn list_contact_persons(
    _auth: AuthContext,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<ContactPersonWithVendor>>> {
    Ok(web::Json(
        state.contact_persons_query.list_contact_persons().await?,
    ))
}

/// Fetch a single contact person with its owning vendor.
#[utoipa::path(
    get,
    path = "/api/contactperson/{id}",
    params(("id" = Uuid, Path, description = "Contact person identifier")),
    responses(
        (status = 200, description = "Contact person", body = ContactPersonWithVendor),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["contact-persons"],
    operation_id = "getContactPerson"
)]
#[get("/contactperson/{id}")]
pub async fn get_contact_person(
    _auth: AuthContext,
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<ContactPersonWithVendor>> {
    let person = state
        .contact_persons_query
        .get_contact_person(path.into_inner())
        .await?;
    Ok(web::Json(person))
}

/// Create a contact person under an existing vendor.
#[utoipa::path(
    post,
    path = "/api/contactperson",
    request_body = ContactPersonCreateRequest,
    responses(
        (
            status = 201,
            description = "Contact person created",
            body = ContactPerson,
            headers(("Location" = String, description = "URL of the created contact person"))
        ),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Vendor not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["contact-persons"],
    operation_id = "createContactPerson"
)]
#[post("/contactperson")]
pub async fn create_contact_person(
    auth: AuthContext,
    state: web::Data<HttpState>,
    payload: web::Json<ContactPersonCreateRequest>,
) -> ApiResult<HttpResponse> {
    auth.require_any_role(&[Role::Admin, Role::Manager])?;
    let draft = ContactPersonDraft::try_from(payload.into_inner())
        .map_err(map_contact_person_validation_error)?;
    let person = state.contact_persons.create_contact_person(draft).await?;
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/api/contactperson/{}", person.id)))
        .json(person))
}

/// Replace a contact person's mutable fields.
///
/// The body carries the full record; its `id` must match the path and its
/// `revision` must match the stored revision.
#[utoipa::path(
    put,
    path = "/api/contactperson/{id}",
    params(("id" = Uuid, Path, description = "Contact person identifier")),
    request_body = ContactPersonUpdateRequest,
    responses(
        (status = 204, description = "Contact person updated"),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 409, description = "Revision conflict", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["contact-persons"],
    operation_id = "updateContactPerson"
)]
#[put("/contactperson/{id}")]
pub async fn update_contact_person(
    auth: AuthContext,
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
    payload: web::Json<ContactPersonUpdateRequest>,
) -> ApiResult<HttpResponse> {
    auth.require_any_role(&[Role::Admin, Role::Manager])?;
    let id = path.into_inner();
    let body = payload.into_inner();
    require_matching_ids(id, body.id)?;
    let expected_revision = body.revision;
    let draft =
        ContactPersonDraft::try_from(body).map_err(map_contact_person_validation_error)?;
    state
        .contact_persons
        .update_contact_person(id, draft, expected_revision)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Delete a contact person.
#[utoipa::path(
    delete,
    path = "/api/contactperson/{id}",
    params(("id" = Uuid, Path, description = "Contact person identifier")),
    responses(
        (status = 204, description = "Contact person deleted"),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["contact-persons"],
    operation_id = "deleteContactPerson"
)]
#[delete("/contactperson/{id}")]
pub async fn delete_contact_person(
    auth: AuthContext,
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    auth.require_any_role(&[Role::Admin])?;
    state
        .contact_persons
        .delete_contact_person(path.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
