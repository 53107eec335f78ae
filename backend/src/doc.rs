//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: All HTTP endpoints from the inbound layer (auth, vendors,
//!   bank accounts, contact persons, users, health)
//! - **Schemas**: Domain read models and the request/response DTOs of the
//!   HTTP adapter
//! - **Security**: The bearer token scheme issued by the login endpoint
//!
//! The generated specification is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::ports::UserSummary;
use crate::domain::{
    BankAccount, BankAccountWithVendor, ContactPerson, ContactPersonWithVendor, Error, ErrorCode,
    Role, Vendor, VendorWithChildren,
};
use crate::inbound::http::auth::{LoginRequest, RefreshRequest, TokenResponse};
use crate::inbound::http::bank_accounts::{BankAccountCreateRequest, BankAccountUpdateRequest};
use crate::inbound::http::contact_persons::{
    ContactPersonCreateRequest, ContactPersonUpdateRequest,
};
use crate::inbound::http::users::UserCreateRequest;
use crate::inbound::http::vendors::{VendorCreateRequest, VendorUpdateRequest};

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BearerToken",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some(
                        "Access token issued by POST /api/auth/login.".to_owned(),
                    ))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Vendor master data API",
        description = "HTTP interface for managing vendors, their bank \
                       accounts and contact persons, and service accounts.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerToken" = [])),
    paths(
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::refresh_token,
        crate::inbound::http::vendors::list_vendors,
        crate::inbound::http::vendors::get_vendor,
        crate::inbound::http::vendors::create_vendor,
        crate::inbound::http::vendors::update_vendor,
        crate::inbound::http::vendors::delete_vendor,
        crate::inbound::http::bank_accounts::list_bank_accounts,
        crate::inbound::http::bank_accounts::get_bank_account,
        crate::inbound::http::bank_accounts::create_bank_account,
        crate::inbound::http::bank_accounts::update_bank_account,
        crate::inbound::http::bank_accounts::delete_bank_account,
        crate::inbound::http::contact_persons::list_contact_persons,
        crate::inbound::http::contact_persons::get_contact_person,
        crate::inbound::http::contact_persons::create_contact_person,
        crate::inbound::http::contact_persons::update_contact_person,
        crate::inbound::http::contact_persons::delete_contact_person,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        Role,
        Vendor,
        VendorWithChildren,
        BankAccount,
        BankAccountWithVendor,
        ContactPerson,
        ContactPersonWithVendor,
        UserSummary,
        LoginRequest,
        RefreshRequest,
        TokenResponse,
        VendorCreateRequest,
        VendorUpdateRequest,
        BankAccountCreateRequest,
        BankAccountUpdateRequest,
        ContactPersonCreateRequest,
        ContactPersonUpdateRequest,
        UserCreateRequest,
    )),
    tags(
        (name = "auth", description = "Token issue and refresh"),
        (name = "vendors", description = "Vendor records with their children"),
        (name = "bank-accounts", description = "Bank accounts attached to vendors"),
        (name = "contact-persons", description = "Contact persons attached to vendors"),
        (name = "users", description = "Service account administration"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying path registration and schema field structure.

    use super::*;
    use utoipa::OpenApi;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    /// Assert that an Object schema contains a field with the given name.
    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn openapi_registers_every_rest_path() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;

        for expected in [
            "/api/auth/login",
            "/api/auth/refresh-token",
            "/api/vendor",
            "/api/vendor/{id}",
            "/api/bankaccount",
            "/api/bankaccount/{id}",
            "/api/contactperson",
            "/api/contactperson/{id}",
            "/api/user",
            "/api/user/{id}",
            "/health/ready",
            "/health/live",
        ] {
            assert!(paths.contains_key(expected), "missing path '{expected}'");
        }
    }

    #[test]
    fn openapi_error_schema_has_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get("Error").expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
    }

    #[test]
    fn openapi_vendor_with_children_uses_camel_case_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let schema = schemas
            .get("VendorWithChildren")
            .expect("VendorWithChildren schema");

        assert_object_schema_has_field(schema, "vendor");
        assert_object_schema_has_field(schema, "bankAccounts");
        assert_object_schema_has_field(schema, "contactPersons");
    }

    #[test]
    fn openapi_declares_the_bearer_scheme() {
        let doc = ApiDoc::openapi();
        let components = doc.components.as_ref().expect("components");

        assert!(components.security_schemes.contains_key("BearerToken"));
    }
}
