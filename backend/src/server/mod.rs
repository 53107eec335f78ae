//! Server construction and middleware wiring.

mod bootstrap;
mod config;
mod state_builders;

pub use bootstrap::seed_bootstrap_admin;
pub use config::ServerConfig;

use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use diesel::{Connection, PgConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

use crate::Trace;
#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::inbound::http::health::{self, HealthState};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{auth, bank_accounts, contact_persons, users, vendors};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Apply any pending database migrations.
///
/// Runs on a short-lived synchronous connection before the async pool is
/// built, so the schema is in place by the time the first request arrives.
///
/// # Errors
/// Returns [`std::io::Error`] when the connection cannot be established or a
/// migration fails.
pub fn run_migrations(database_url: &str) -> std::io::Result<()> {
    let mut conn = PgConnection::establish(database_url).map_err(|err| {
        std::io::Error::other(format!("migration connection failed: {err}"))
    })?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| std::io::Error::other(format!("migrations failed: {err}")))?;
    for version in applied {
        info!(%version, "applied migration");
    }
    Ok(())
}

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
    } = deps;

    let api = web::scope("/api")
        .service(auth::login)
        .service(auth::refresh_token)
        .service(vendors::list_vendors)
        .service(vendors::get_vendor)
        .service(vendors::create_vendor)
        .service(vendors::update_vendor)
        .service(vendors::delete_vendor)
        .service(bank_accounts::list_bank_accounts)
        .service(bank_accounts::get_bank_account)
        .service(bank_accounts::create_bank_account)
        .service(bank_accounts::update_bank_account)
        .service(bank_accounts::delete_bank_account)
        .service(contact_persons::list_contact_persons)
        .service(contact_persons::get_contact_person)
        .service(contact_persons::create_contact_person)
        .service(contact_persons::update_contact_person)
        .service(contact_persons::delete_contact_person)
        .service(users::list_users)
        .service(users::create_user)
        .service(users::delete_user);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(health::ready)
        .service(health::live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Parameters
/// - `health_state`: shared readiness state updated once the server is initialised.
/// - `config`: pre-built [`ServerConfig`] with the signing key, binding, and optional backends.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket or starting the server fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config);
    let ServerConfig {
        signing_key: _,
        access_token_ttl: _,
        bind_addr,
        db_pool: _,
        snapshot_cache: _,
    } = config;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
