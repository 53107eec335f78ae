//! Server harness and shared world for REST surface behaviour tests.
//!
//! The harness owns a single-threaded Tokio runtime plus a `LocalSet` because
//! Actix uses `spawn_local` internally. The `WorldFixture` ensures the server
//! is stopped even if a test panics.

use std::cell::RefCell;
use std::net::TcpListener;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use actix_web::dev::ServerHandle;
use actix_web::{App, HttpServer, web};
use rstest::fixture;
use serde_json::Value;
use tokio::runtime::Runtime;
use tokio::task::LocalSet;
use uuid::Uuid;

use backend::Trace;
use backend::domain::Role;
use backend::domain::ports::{
    FixtureAuthenticator, FixtureBankAccountsCommand, FixtureBankAccountsQuery,
    FixtureContactPersonsCommand, FixtureContactPersonsQuery, FixtureUsersCommand,
    FixtureUsersQuery, FixtureVendorsCommand, FixtureVendorsQuery, Principal, TokenService,
};
use backend::inbound::http::state::{HttpState, HttpStatePorts};
use backend::inbound::http::{auth, bank_accounts, contact_persons, users, vendors};
use backend::outbound::security::JwtTokenService;

const SIGNING_KEY: &[u8] = b"rest-api-behaviour-signing-key-0123456789";

pub(crate) struct RestWorld {
    pub(crate) runtime: Runtime,
    pub(crate) local: LocalSet,
    pub(crate) base_url: String,
    pub(crate) server: ServerHandle,
    pub(crate) tokens: Arc<JwtTokenService>,
    pub(crate) bearer: Option<String>,
    pub(crate) last_status: Option<u16>,
    pub(crate) last_body: Option<Value>,
    pub(crate) last_trace_id: Option<String>,
    pub(crate) last_location: Option<String>,
}

pub(crate) type SharedWorld = Rc<RefCell<RestWorld>>;

pub(crate) struct WorldFixture {
    world: SharedWorld,
}

impl WorldFixture {
    pub(crate) fn world(&self) -> SharedWorld {
        self.world.clone()
    }
}

impl Drop for WorldFixture {
    fn drop(&mut self) {
        shutdown(self.world.clone());
    }
}

pub(crate) fn shutdown(world: SharedWorld) {
    // `LocalSet` must be driven on the thread that owns it, so we lock the
    // world while calling `block_on`. The future must not try to lock the
    // world.
    let ctx = world.borrow();
    let server = ctx.server.clone();
    ctx.local.block_on(&ctx.runtime, async move {
        server.stop(true).await;
    });
}

pub(crate) fn with_world_async<R, F>(world: &SharedWorld, operation: impl FnOnce(String) -> F) -> R
where
    F: std::future::Future<Output = R>,
{
    let ctx = world.borrow();
    let base_url = ctx.base_url.clone();
    ctx.local.block_on(&ctx.runtime, operation(base_url))
}

/// Mint an `Authorization` header value carrying the given roles, signed with
/// the server's key.
pub(crate) fn mint_bearer(world: &SharedWorld, roles: &[Role]) -> String {
    let ctx = world.borrow();
    let issued = ctx
        .tokens
        .issue(&Principal {
            user_id: Uuid::new_v4(),
            roles: roles.to_vec(),
        })
        .expect("token issuance");
    format!("Bearer {}", issued.access_token)
}

fn fixture_http_state(tokens: Arc<JwtTokenService>) -> HttpState {
    let tokens: Arc<dyn TokenService> = tokens;
    HttpState::new(HttpStatePorts {
        vendors_query: Arc::new(FixtureVendorsQuery),
        vendors: Arc::new(FixtureVendorsCommand),
        bank_accounts_query: Arc::new(FixtureBankAccountsQuery),
        bank_accounts: Arc::new(FixtureBankAccountsCommand),
        contact_persons_query: Arc::new(FixtureContactPersonsQuery),
        contact_persons: Arc::new(FixtureContactPersonsCommand),
        users_query: Arc::new(FixtureUsersQuery),
        users: Arc::new(FixtureUsersCommand),
        authenticator: Arc::new(FixtureAuthenticator::new(tokens.clone())),
        tokens,
    })
}

async fn spawn_rest_server(http_state: HttpState) -> Result<(String, ServerHandle), String> {
    let listener = TcpListener::bind("127.0.0.1:0").map_err(|err| err.to_string())?;
    let addr = listener.local_addr().map_err(|err| err.to_string())?;

    let http_data = web::Data::new(http_state);

    let server = HttpServer::new(move || {
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

        App::new()
            .app_data(http_data.clone())
            .wrap(Trace)
            .service(api)
    })
    .disable_signals()
    .workers(1)
    .listen(listener)
    .map_err(|err| err.to_string())?
    .run();

    let handle = server.handle();
    actix_web::rt::spawn(server);

    Ok((format!("http://{addr}"), handle))
}

fn create_runtime_and_local() -> (Runtime, LocalSet) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("tokio runtime");

    (runtime, LocalSet::new())
}

#[fixture]
pub(crate) fn world() -> WorldFixture {
    let (runtime, local) = create_runtime_and_local();
    let tokens = Arc::new(JwtTokenService::new(SIGNING_KEY, Duration::from_secs(900)));
    let http_state = fixture_http_state(tokens.clone());

    let (base_url, server) = local
        .block_on(&runtime, async { spawn_rest_server(http_state).await })
        .expect("server should start");

    let world = Rc::new(RefCell::new(RestWorld {
        runtime,
        local,
        base_url,
        server,
        tokens,
        bearer: None,
        last_status: None,
        last_body: None,
        last_trace_id: None,
        last_location: None,
    }));

    WorldFixture { world }
}
