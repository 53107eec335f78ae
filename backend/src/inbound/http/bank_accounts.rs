//! Bank account API handlers.
//!
//! ```text
//! GET    /api/bankaccount
//! GET    /api/bankaccount/{id}
//! POST   /api/bankaccount
//! PUT    /api/bankaccount/{id}
//! DELETE /api/bankaccount/{id}
//! ```
//!
//! Reads serve the account paired with its owning vendor. Creating or moving
//! an account under a vendor that does not exist fails with not-found.

use actix_web::http::header;
use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    BankAccount, BankAccountDraft, BankAccountValidationError, BankAccountWithVendor, Error, Role,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::require_matching_ids;

/// Bank account fields accepted on create.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BankAccountCreateRequest {
    pub vendor_id: Uuid,
    pub name: String,
    pub iban: String,
    pub bic: String,
}

impl TryFrom<BankAccountCreateRequest> for BankAccountDraft {
    type Error = BankAccountValidationError;

    fn try_from(value: BankAccountCreateRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(value.vendor_id, &value.name, &value.iban, &value.bic)
    }
}

/// Full bank account record expected on update, including the revision the
/// client last read.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BankAccountUpdateRequest {
    pub id: Uuid,
    pub vendor_id: Uuid,
    pub name: String,
    pub iban: String,
    pub bic: String,
    pub revision: u32,
}

impl TryFrom<BankAccountUpdateRequest> for BankAccountDraft {
    type Error = BankAccountValidationError;

    fn try_from(value: BankAccountUpdateRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(value.vendor_id, &value.name, &value.iban, &value.bic)
    }
}

fn map_bank_account_validation_error(err: BankAccountValidationError) -> Error {
    let (field, code) = match &err {
        BankAccountValidationError::EmptyName => ("name", "empty_name"),
        BankAccountValidationError::Iban(_) => ("iban", "invalid_iban"),
        BankAccountValidationError::Bic(_) => ("bic", "invalid_bic"),
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field, "code": code }))
}

/// List every bank account with its owning vendor.
#[utoipa::path(
    get,
    path = "/api/bankaccount",
    responses(
        (status = 200, description = "Bank accounts", body = [BankAccountWithVendor]),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["bank-accounts"],
    operation_id = "listBankAccounts"
)]
#[get("/bankaccount")]
pub async fn list_bank_accounts(
    _auth: AuthContext,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<BankAccountWithVendor>>> {
    Ok(web::Json(state.bank_accounts_query.list_bank_accounts().await?))
}

/// Fetch a single bank account with its owning vendor.
#[utoipa::path(
    get,
    path = "/api/bankaccount/{id}",
    params(("id" = Uuid, Path, description = "Bank account identifier")),
    responses(
        (status = 200, description = "Bank account", body = BankAccountWithVendor),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["bank-accounts"],
    operation_id = "getBankAccount"
)]
#[get("/bankaccount/{id}")]
pub async fn get_bank_account(
    _auth: AuthContext,
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<BankAccountWithVendor>> {
    let account = state
        .bank_accounts_query
        .get_bank_account(path.into_inner())
        .await?;
    Ok(web::Json(account))
}

/// Create a bank account under an existing vendor.
#[utoipa::path(
    post,
    path = "/api/bankaccount",
    request_body = BankAccountCreateRequest,
    responses(
        (
            status = 201,
            description = "Bank account created",
            body = BankAccount,
            headers(("Location" = String, description = "URL of the created bank account"))
        ),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Vendor not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["bank-accounts"],
    operation_id = "createBankAccount"
)]
#[post("/bankaccount")]
pub async fn create_bank_account(
    auth: AuthContext,
    state: web::Data<HttpState>,
    payload: web::Json<BankAccountCreateRequest>,
) -> ApiResult<HttpResponse> {
    auth.require_any_role(&[Role::Admin, Role::Manager])?;
    let draft = BankAccountDraft::try_from(payload.into_inner())
        .map_err(map_bank_account_validation_error)?;
    let account = state.bank_accounts.create_bank_account(draft).await?;
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/api/bankaccount/{}", account.id)))
        .json(account))
}

/// Replace a bank account's mutable fields.
///
/// The body carries the full record; its `id` must match the path and its
/// `revision` must match the stored revision.
#[utoipa::path(
    put,
    path = "/api/bankaccount/{id}",
    params(("id" = Uuid, Path, description = "Bank account identifier")),
    request_body = BankAccountUpdateRequest,
    responses(
        (status = 204, description = "Bank account updated"),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 409, description = "Revision conflict", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["bank-accounts"],
    operation_id = "updateBankAccount"
)]
#[put("/bankaccount/{id}")]
pub async fn update_bank_account(
    auth: AuthContext,
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
    payload: web::Json<BankAccountUpdateRequest>,
) -> ApiResult<HttpResponse> {
    auth.require_any_role(&[Role::Admin, Role::Manager])?;
    let id = path.into_inner();
    let body = payload.into_inner();
    require_matching_ids(id, body.id)?;
    let expected_revision = body.revision;
    let draft =
        BankAccountDraft::try_from(body).map_err(map_bank_account_validation_error)?;
    state
        .bank_accounts
        .update_bank_account(id, draft, expected_revision)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Delete a bank account.
#[utoipa::path(
    delete,
    path = "/api/bankaccount/{id}",
    params(("id" = Uuid, Path, description = "Bank account identifier")),
    responses(
        (status = 204, description = "Bank account deleted"),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["bank-accounts"],
    operation_id = "deleteBankAccount"
)]
#[delete("/bankaccount/{id}")]
pub async fn delete_bank_account(
    auth: AuthContext,
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    auth.require_any_role(&[Role::Admin])?;
    state.bank_accounts.delete_bank_account(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{App, test as actix_test, web};
    use rstest::rstest;
    use serde_json::Value;

    use super::*;
    use crate::domain::ports::MockBankAccountsCommand;
    use crate::inbound::http::test_utils::{bearer_for, fixture_state};

    fn test_app(
        state: HttpState,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new().app_data(web::Data::new(state)).service(
            web::scope("/api")
                .service(list_bank_accounts)
                .service(get_bank_account)
                .service(create_bank_account)
                .service(update_bank_account)
                .service(delete_bank_account),
        )
    }

    fn sample_create_json(vendor_id: Uuid) -> Value {
        serde_json::json!({
            "vendorId": vendor_id,
            "name": "Operating account",
            "iban": "DE89 3704 0044 0532 0130 00",
            "bic": "DEUTDEFF",
        })
    }

    #[actix_web::test]
    async fn create_returns_created_with_location_and_normalised_iban() {
        let app = actix_test::init_service(test_app(fixture_state())).await;

        let request = actix_test::TestRequest::post()
            .uri("/api/bankaccount")
            .insert_header(("Authorization", bearer_for(&[Role::Manager])))
            .set_json(sample_create_json(Uuid::new_v4()))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), actix_web::http::StatusCode::CREATED);

        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(ToOwned::to_owned)
            .expect("Location header");
        let body: Value = actix_test::read_body_json(response).await;
        let id = body.get("id").and_then(Value::as_str).expect("id present");
        assert_eq!(location, format!("/api/bankaccount/{id}"));
        assert_eq!(
            body.get("iban").and_then(Value::as_str),
            Some("DE89370400440532013000")
        );
    }

    #[rstest]
    #[case::bad_checksum("DE00370400440532013000", "iban", "invalid_iban")]
    #[case::bad_bic_shape("DEUT", "bic", "invalid_bic")]
    #[actix_web::test]
    async fn create_maps_validation_failures_to_bad_request(
        #[case] value: &str,
        #[case] field: &str,
        #[case] detail_code: &str,
    ) {
        let app = actix_test::init_service(test_app(fixture_state())).await;

        let mut payload = sample_create_json(Uuid::new_v4());
        payload[field] = Value::from(value);
        let request = actix_test::TestRequest::post()
            .uri("/api/bankaccount")
            .insert_header(("Authorization", bearer_for(&[Role::Admin])))
            .set_json(payload)
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), actix_web::http::StatusCode::BAD_REQUEST);

        let body: Value = actix_test::read_body_json(response).await;
        let details = body.get("details").expect("details present");
        assert_eq!(details.get("field").and_then(Value::as_str), Some(field));
        assert_eq!(
            details.get("code").and_then(Value::as_str),
            Some(detail_code)
        );
    }

    #[actix_web::test]
    async fn create_surfaces_a_missing_vendor_as_not_found() {
        let vendor_id = Uuid::new_v4();
        let mut bank_accounts = MockBankAccountsCommand::new();
        bank_accounts
            .expect_create_bank_account()
            .times(1)
            .returning(move |_| Err(Error::not_found(format!("vendor {vendor_id} not found"))));
        let mut state = fixture_state();
        state.bank_accounts = Arc::new(bank_accounts);
        let app = actix_test::init_service(test_app(state)).await;

        let request = actix_test::TestRequest::post()
            .uri("/api/bankaccount")
            .insert_header(("Authorization", bearer_for(&[Role::Admin])))
            .set_json(sample_create_json(vendor_id))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), actix_web::http::StatusCode::NOT_FOUND);

        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body.get("code").and_then(Value::as_str), Some("not_found"));
    }

    #[actix_web::test]
    async fn get_maps_a_missing_account_to_not_found() {
        let app = actix_test::init_service(test_app(fixture_state())).await;

        let request = actix_test::TestRequest::get()
            .uri(&format!("/api/bankaccount/{}", Uuid::new_v4()))
            .insert_header(("Authorization", bearer_for(&[])))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), actix_web::http::StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn update_requires_the_body_id_to_match_the_path() {
        let app = actix_test::init_service(test_app(fixture_state())).await;

        let mut payload = sample_create_json(Uuid::new_v4());
        payload["id"] = Value::from(Uuid::new_v4().to_string());
        payload["revision"] = Value::from(1);
        let request = actix_test::TestRequest::put()
            .uri(&format!("/api/bankaccount/{}", Uuid::new_v4()))
            .insert_header(("Authorization", bearer_for(&[Role::Manager])))
            .set_json(payload)
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), actix_web::http::StatusCode::BAD_REQUEST);

        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            body.pointer("/details/code").and_then(Value::as_str),
            Some("id_mismatch")
        );
    }

    #[actix_web::test]
    async fn update_accepts_a_matching_full_record() {
        let app = actix_test::init_service(test_app(fixture_state())).await;
        let id = Uuid::new_v4();

        let mut payload = sample_create_json(Uuid::new_v4());
        payload["id"] = Value::from(id.to_string());
        payload["revision"] = Value::from(2);
        let request = actix_test::TestRequest::put()
            .uri(&format!("/api/bankaccount/{id}"))
            .insert_header(("Authorization", bearer_for(&[Role::Manager])))
            .set_json(payload)
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), actix_web::http::StatusCode::NO_CONTENT);
    }

    #[rstest]
    #[case::manager_is_forbidden(&[Role::Manager], actix_web::http::StatusCode::FORBIDDEN)]
    #[case::admin_deletes(&[Role::Admin], actix_web::http::StatusCode::NO_CONTENT)]
    #[actix_web::test]
    async fn delete_is_reserved_for_administrators(
        #[case] roles: &[Role],
        #[case] expected: actix_web::http::StatusCode,
    ) {
        let app = actix_test::init_service(test_app(fixture_state())).await;

        let request = actix_test::TestRequest::delete()
            .uri(&format!("/api/bankaccount/{}", Uuid::new_v4()))
            .insert_header(("Authorization", bearer_for(roles)))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), expected);
    }
}
