//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations exactly; Diesel uses them for
//! compile-time query validation and type-safe SQL generation. When a
//! migration changes the schema, update this file to match (or regenerate it
//! with `diesel print-schema`).

diesel::table! {
    /// Vendor master-data records.
    vendors (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Legal or trading name.
        name -> Varchar,
        /// Additional name line.
        name2 -> Nullable<Varchar>,
        /// First address line.
        address1 -> Varchar,
        /// Second address line.
        address2 -> Nullable<Varchar>,
        /// Postal code.
        zip -> Nullable<Varchar>,
        /// Country name or code.
        country -> Varchar,
        /// City.
        city -> Nullable<Varchar>,
        /// Mail address.
        mail -> Varchar,
        /// Normalised phone number.
        phone -> Varchar,
        /// Free-form notes.
        notes -> Nullable<Text>,
        /// Optimistic concurrency revision, starts at 1.
        revision -> Int4,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp (auto-updated by trigger).
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Bank accounts owned by vendors.
    ///
    /// The `vendor_id` foreign key carries `ON DELETE CASCADE`, so deleting a
    /// vendor removes its accounts.
    bank_accounts (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Owning vendor.
        vendor_id -> Uuid,
        /// Account holder or account label.
        name -> Varchar,
        /// Normalised account number.
        iban -> Varchar,
        /// Normalised bank identifier.
        bic -> Varchar,
        /// Optimistic concurrency revision, starts at 1.
        revision -> Int4,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp (auto-updated by trigger).
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Contact persons attached to vendors.
    ///
    /// The `vendor_id` foreign key carries `ON DELETE CASCADE`, so deleting a
    /// vendor removes its contact persons.
    contact_persons (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Owning vendor.
        vendor_id -> Uuid,
        /// Given name.
        first_name -> Nullable<Varchar>,
        /// Family name.
        last_name -> Nullable<Varchar>,
        /// Normalised phone number.
        phone -> Varchar,
        /// Mail address.
        mail -> Nullable<Varchar>,
        /// Optimistic concurrency revision, starts at 1.
        revision -> Int4,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp (auto-updated by trigger).
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Service accounts for the admin and manager surfaces.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Normalised login mail address, unique.
        email -> Varchar,
        /// Salted password hash in PHC string format.
        password_hash -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp (auto-updated by trigger).
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Fixed role catalogue, seeded by migration.
    roles (id) {
        /// Primary key: small serial identifier.
        id -> Int4,
        /// Role name, unique (`admin` or `manager`).
        name -> Varchar,
    }
}

diesel::table! {
    /// Role assignments joining users to roles.
    ///
    /// The `user_id` foreign key carries `ON DELETE CASCADE`, so deleting an
    /// account removes its assignments.
    user_roles (user_id, role_id) {
        /// Account holding the role.
        user_id -> Uuid,
        /// Role held by the account.
        role_id -> Int4,
    }
}

diesel::joinable!(bank_accounts -> vendors (vendor_id));
diesel::joinable!(contact_persons -> vendors (vendor_id));
diesel::joinable!(user_roles -> users (user_id));
diesel::joinable!(user_roles -> roles (role_id));

diesel::allow_tables_to_appear_in_same_query!(
    vendors,
    bank_accounts,
    contact_persons,
    users,
    roles,
    user_roles,
);
