//! Behaviour tests for the vendor REST surface.
//!
//! These scenarios confirm that bearer authentication, role enforcement, and
//! payload validation behave as documented when requests cross a real socket.
//
// rstest-bdd generates guard variables with double underscores, which trips
// the non_snake_case lint under -D warnings.
#![allow(non_snake_case)]

#[path = "rest_api_bdd/harness.rs"]
mod harness;

use actix_web::http::{Method, header};
use awc::Client;
use backend::domain::ports::{FIXTURE_LOGIN_EMAIL, FIXTURE_LOGIN_PASSWORD};
use backend::domain::{Role, TRACE_ID_HEADER};
use harness::{SharedWorld, WorldFixture, mint_bearer, with_world_async};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::{Value, json};

#[fixture]
fn world() -> WorldFixture {
    harness::world()
}

struct RequestSpec<'a> {
    method: Method,
    path: &'a str,
    payload: Option<Value>,
    label: &'a str,
}

fn record_response(
    world: &SharedWorld,
    status: u16,
    trace_id: Option<String>,
    location: Option<String>,
    body: Option<Value>,
) {
    let mut ctx = world.borrow_mut();
    ctx.last_status = Some(status);
    ctx.last_trace_id = trace_id;
    ctx.last_location = location;
    ctx.last_body = body;
}

fn perform_request(world: &SharedWorld, spec: RequestSpec<'_>) {
    let RequestSpec {
        method,
        path,
        payload,
        label,
    } = spec;
    let bearer = world.borrow().bearer.clone();
    let (status, trace_id, location, body) = with_world_async(world, |base_url| async move {
        let mut request = Client::default().request(method, format!("{base_url}{path}"));
        if let Some(bearer) = bearer {
            request = request.insert_header((header::AUTHORIZATION, bearer));
        }
        let mut response = match payload {
            Some(payload) => request.send_json(&payload).await.expect(label),
            None => request.send().await.expect(label),
        };
        let status = response.status().as_u16();
        let trace_id = response
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_owned());
        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_owned());
        let bytes = response.body().await.expect(label);
        let body = if bytes.is_empty() {
            None
        } else {
            Some(serde_json::from_slice(&bytes).expect(label))
        };
        (status, trace_id, location, body)
    });

    record_response(world, status, trace_id, location, body);
}

fn vendor_payload(name: &str) -> Value {
    json!({
        "name": name,
        "address1": "1 Market Square",
        "country": "IE",
        "mail": "orders@acme.test",
        "phone": "+35312345678",
    })
}

fn login_with(world: &SharedWorld, password: &str) {
    perform_request(
        world,
        RequestSpec {
            method: Method::POST,
            path: "/api/auth/login",
            payload: Some(json!({
                "email": FIXTURE_LOGIN_EMAIL,
                "password": password,
            })),
            label: "login request",
        },
    );
    let bearer = {
        let ctx = world.borrow();
        ctx.last_body
            .as_ref()
            .and_then(|body| body.get("accessToken"))
            .and_then(Value::as_str)
            .map(|token| format!("Bearer {token}"))
    };
    world.borrow_mut().bearer = bearer;
}

#[given("a running server backed by fixture ports")]
fn a_running_server_backed_by_fixture_ports(world: &WorldFixture) {
    let _ = world;
}

#[given("the client holds a manager token")]
fn the_client_holds_a_manager_token(world: &WorldFixture) {
    let shared = world.world();
    let bearer = mint_bearer(&shared, &[Role::Manager]);
    shared.borrow_mut().bearer = Some(bearer);
}

#[given("the client holds an administrator token")]
fn the_client_holds_an_administrator_token(world: &WorldFixture) {
    let shared = world.world();
    let bearer = mint_bearer(&shared, &[Role::Admin]);
    shared.borrow_mut().bearer = Some(bearer);
}

#[when("the client lists vendors without a token")]
fn the_client_lists_vendors_without_a_token(world: &WorldFixture) {
    let shared = world.world();
    shared.borrow_mut().bearer = None;
    perform_request(
        &shared,
        RequestSpec {
            method: Method::GET,
            path: "/api/vendor",
            payload: None,
            label: "vendor list request",
        },
    );
}

#[when("the client logs in with the fixture credentials")]
fn the_client_logs_in_with_the_fixture_credentials(world: &WorldFixture) {
    login_with(&world.world(), FIXTURE_LOGIN_PASSWORD);
}

#[when("the client logs in with a wrong password")]
fn the_client_logs_in_with_a_wrong_password(world: &WorldFixture) {
    login_with(&world.world(), "not-the-password");
}

#[when("the client lists vendors with the issued token")]
fn the_client_lists_vendors_with_the_issued_token(world: &WorldFixture) {
    perform_request(
        &world.world(),
        RequestSpec {
            method: Method::GET,
            path: "/api/vendor",
            payload: None,
            label: "vendor list request",
        },
    );
}

#[when("the client refreshes the issued token")]
fn the_client_refreshes_the_issued_token(world: &WorldFixture) {
    let shared = world.world();
    let access_token = {
        let ctx = shared.borrow();
        ctx.bearer
            .as_deref()
            .and_then(|bearer| bearer.strip_prefix("Bearer "))
            .expect("issued bearer")
            .to_owned()
    };
    perform_request(
        &shared,
        RequestSpec {
            method: Method::POST,
            path: "/api/auth/refresh-token",
            payload: Some(json!({ "accessToken": access_token })),
            label: "refresh request",
        },
    );
}

#[when("the client creates a valid vendor")]
fn the_client_creates_a_valid_vendor(world: &WorldFixture) {
    perform_request(
        &world.world(),
        RequestSpec {
            method: Method::POST,
            path: "/api/vendor",
            payload: Some(vendor_payload("Acme Supplies")),
            label: "vendor create request",
        },
    );
}

#[when("the client creates a vendor with a blank name")]
fn the_client_creates_a_vendor_with_a_blank_name(world: &WorldFixture) {
    perform_request(
        &world.world(),
        RequestSpec {
            method: Method::POST,
            path: "/api/vendor",
            payload: Some(vendor_payload("   ")),
            label: "vendor create request",
        },
    );
}

#[when("the client deletes a vendor")]
fn the_client_deletes_a_vendor(world: &WorldFixture) {
    perform_request(
        &world.world(),
        RequestSpec {
            method: Method::DELETE,
            path: "/api/vendor/3fa85f64-5717-4562-b3fc-2c963f66afa6",
            payload: None,
            label: "vendor delete request",
        },
    );
}

#[then("the response is unauthorised with a trace id")]
fn the_response_is_unauthorised_with_a_trace_id(world: &WorldFixture) {
    let ctx = world.world();
    let ctx = ctx.borrow();
    assert_eq!(ctx.last_status, Some(401));

    let trace_id = ctx.last_trace_id.as_deref().expect("trace id header");
    let body = ctx.last_body.as_ref().expect("error body");
    assert_eq!(body.get("traceId").and_then(Value::as_str), Some(trace_id));
    assert_eq!(
        body.get("code").and_then(Value::as_str),
        Some("unauthorized")
    );
}

#[then("the vendor list is empty")]
fn the_vendor_list_is_empty(world: &WorldFixture) {
    let ctx = world.world();
    let ctx = ctx.borrow();
    assert_eq!(ctx.last_status, Some(200));
    assert_eq!(ctx.last_body, Some(json!([])));
}

#[then("a fresh token is issued")]
fn a_fresh_token_is_issued(world: &WorldFixture) {
    let ctx = world.world();
    let ctx = ctx.borrow();
    assert_eq!(ctx.last_status, Some(200));

    let body = ctx.last_body.as_ref().expect("token body");
    let token = body
        .get("accessToken")
        .and_then(Value::as_str)
        .expect("access token");
    assert!(!token.is_empty());
}

#[then("the vendor is created with a location header")]
fn the_vendor_is_created_with_a_location_header(world: &WorldFixture) {
    let ctx = world.world();
    let ctx = ctx.borrow();
    assert_eq!(ctx.last_status, Some(201));

    let body = ctx.last_body.as_ref().expect("vendor body");
    assert_eq!(
        body.get("name").and_then(Value::as_str),
        Some("Acme Supplies")
    );
    let id = body.get("id").and_then(Value::as_str).expect("vendor id");
    assert_eq!(
        ctx.last_location.as_deref(),
        Some(format!("/api/vendor/{id}").as_str())
    );
}

#[then("the response is forbidden")]
fn the_response_is_forbidden(world: &WorldFixture) {
    let ctx = world.world();
    let ctx = ctx.borrow();
    assert_eq!(ctx.last_status, Some(403));

    let body = ctx.last_body.as_ref().expect("error body");
    assert_eq!(body.get("code").and_then(Value::as_str), Some("forbidden"));
}

#[then("the vendor is deleted")]
fn the_vendor_is_deleted(world: &WorldFixture) {
    let ctx = world.world();
    let ctx = ctx.borrow();
    assert_eq!(ctx.last_status, Some(204));
    assert!(ctx.last_body.is_none());
}

#[then("the response is a bad request naming the name field")]
fn the_response_is_a_bad_request_naming_the_name_field(world: &WorldFixture) {
    let ctx = world.world();
    let ctx = ctx.borrow();
    assert_eq!(ctx.last_status, Some(400));

    let body = ctx.last_body.as_ref().expect("error body");
    assert_eq!(
        body.get("code").and_then(Value::as_str),
        Some("invalid_request")
    );
    let details = body
        .get("details")
        .and_then(Value::as_object)
        .expect("details object");
    assert_eq!(details.get("field").and_then(Value::as_str), Some("name"));
    assert_eq!(
        details.get("code").and_then(Value::as_str),
        Some("empty_name")
    );
}

#[scenario(
    path = "tests/features/rest_api.feature",
    name = "Anonymous requests are rejected"
)]
fn anonymous_requests_are_rejected(world: WorldFixture) {
    drop(world);
}

#[scenario(
    path = "tests/features/rest_api.feature",
    name = "Login grants access to protected routes"
)]
fn login_grants_access_to_protected_routes(world: WorldFixture) {
    drop(world);
}

#[scenario(
    path = "tests/features/rest_api.feature",
    name = "Wrong credentials are rejected"
)]
fn wrong_credentials_are_rejected(world: WorldFixture) {
    drop(world);
}

#[scenario(path = "tests/features/rest_api.feature", name = "Tokens can be refreshed")]
fn tokens_can_be_refreshed(world: WorldFixture) {
    drop(world);
}

#[scenario(path = "tests/features/rest_api.feature", name = "Managers can create vendors")]
fn managers_can_create_vendors(world: WorldFixture) {
    drop(world);
}

#[scenario(
    path = "tests/features/rest_api.feature",
    name = "Managers cannot delete vendors"
)]
fn managers_cannot_delete_vendors(world: WorldFixture) {
    drop(world);
}

#[scenario(
    path = "tests/features/rest_api.feature",
    name = "Administrators can delete vendors"
)]
fn administrators_can_delete_vendors(world: WorldFixture) {
    drop(world);
}

#[scenario(
    path = "tests/features/rest_api.feature",
    name = "Invalid vendor payloads name the offending field"
)]
fn invalid_vendor_payloads_name_the_offending_field(world: WorldFixture) {
    drop(world);
}
