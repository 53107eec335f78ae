//! Domain primitives, aggregates, and services.
//!
//! Purpose: define the strongly typed vendor master-data model used by the
//! API and persistence layers, the ports that bound the hexagon, and the
//! services that implement the driving ports. Types stay immutable after
//! construction and document their invariants and serde contracts in each
//! type's Rustdoc.
//!
//! Validation lives in the constructors: a `Vendor`, `BankAccount`, or
//! `ContactPerson` draft cannot exist with an invalid IBAN, BIC, phone
//! number, or mail address, so adapters never re-check field formats.

pub mod account;
pub mod auth;
mod auth_service;
pub mod bank_account;
mod bank_account_service;
pub mod contact_person;
mod contact_person_service;
pub mod error;
pub mod phone;
pub mod ports;
pub mod trace_id;
mod user_admin_service;
pub mod vendor;
mod vendor_service;

pub use self::account::{
    AccountValidationError, EmailAddress, NewUser, PASSWORD_MIN, ParseRoleError, Role, User,
};
pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::auth_service::AuthService;
pub use self::bank_account::{
    BankAccount, BankAccountDraft, BankAccountValidationError, BankAccountWithVendor, Bic,
    BicValidationError, IBAN_LEN_MAX, IBAN_LEN_MIN, Iban, IbanValidationError,
};
pub use self::bank_account_service::BankAccountService;
pub use self::contact_person::{
    ContactPerson, ContactPersonDraft, ContactPersonValidationError, ContactPersonWithVendor,
};
pub use self::contact_person_service::ContactPersonService;
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::phone::{PHONE_DIGITS_MAX, PHONE_DIGITS_MIN, PhoneNumber, PhoneValidationError};
pub use self::trace_id::TraceId;
pub use self::user_admin_service::UserAdminService;
pub use self::vendor::{
    Vendor, VendorDraft, VendorDraftBuilder, VendorValidationError, VendorWithChildren,
};
pub use self::vendor_service::VendorService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
