//! Assembles the Actix application: session cookie, trace ids, the `/api`
//! routes and the health probes.

mod config;
mod state_builders;

pub use config::{ExternalAdapters, ServerConfig};

use actix_session::config::{CookieContentSecurity, PersistentSession};
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::time::Duration;
use actix_web::dev::{Server, ServerHandle, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use learners_backend::Trace;
#[cfg(debug_assertions)]
use learners_backend::doc::ApiDoc;
use learners_backend::inbound::http;
use learners_backend::inbound::http::health::{HealthState, live, ready};
use learners_backend::inbound::http::session_config::SessionSettings;
use learners_backend::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use state_builders::build_http_state;
use tracing::{info, warn};

const SESSION_COOKIE: &str = "session";
const SESSION_TTL: Duration = Duration::hours(2);

/// Encrypted, HTTP-only cookie session expiring two hours after issue.
fn session_middleware(settings: &SessionSettings) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), settings.key.clone())
        .cookie_name(SESSION_COOKIE.to_owned())
        .cookie_path("/".to_owned())
        .cookie_secure(settings.cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(settings.same_site)
        .session_lifecycle(PersistentSession::default().session_ttl(SESSION_TTL))
        .build()
}

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    session: SessionSettings,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(session_middleware(&session))
        .wrap(Trace)
        .configure(http::configure)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Bind the HTTP server and flip the readiness probe once the listener is up.
///
/// Signal handling is left to [`drain_on`], which fails the liveness probe
/// before stopping the workers.
///
/// # Errors
/// Returns the [`std::io::Error`] raised when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let ServerConfig {
        session,
        bind_addr,
        upload_limit,
        adapters,
    } = config;
    let http_state = build_http_state(adapters, upload_limit);
    let probes = health_state.clone();

    let server = HttpServer::new(move || build_app(probes.clone(), http_state.clone(), session.clone()))
        .bind(bind_addr)?
        .disable_signals()
        .run();

    health_state.mark_ready();
    Ok(server)
}

/// Resolve on SIGINT, or SIGTERM on Unix.
pub async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {}
                    _ = terminate.recv() => {}
                }
                return;
            }
            Err(error) => warn!(%error, "SIGTERM handler unavailable"),
        }
    }
    if let Err(error) = tokio::signal::ctrl_c().await {
        warn!(%error, "SIGINT handler unavailable");
    }
}

/// Wait for `signal`, fail the liveness probe, then stop the server
/// gracefully.
pub async fn drain_on(
    signal: impl Future<Output = ()>,
    health_state: web::Data<HealthState>,
    handle: ServerHandle,
) {
    signal.await;
    info!("shutdown requested; draining connections");
    health_state.mark_unhealthy();
    handle.stop(true).await;
}

#[cfg(test)]
mod tests {
    //! Application assembly and shutdown.

    use std::sync::Arc;

    use actix_web::cookie::{Key, SameSite};
    use actix_web::http::StatusCode;
    use actix_web::test;
    use learners_backend::domain::TRACE_ID_HEADER;
    use learners_backend::test_support::{
        MemoryDatabase, MemoryFileStore, StubIdentityVerifier, memory_http_state,
    };

    use super::*;

    fn session() -> SessionSettings {
        SessionSettings {
            key: Key::generate(),
            cookie_secure: false,
            same_site: SameSite::Lax,
        }
    }

    fn http_state() -> web::Data<HttpState> {
        web::Data::new(memory_http_state(
            Arc::new(MemoryDatabase::new()),
            StubIdentityVerifier::default(),
            Arc::new(MemoryFileStore::default()),
        ))
    }

    #[actix_web::test]
    async fn app_factory_serves_probes_and_guards_the_api() {
        let health = web::Data::new(HealthState::new());
        let state = http_state();
        let settings = session();
        let factory = move || build_app(health.clone(), state.clone(), settings.clone());

        let app = test::init_service(factory()).await;
        let live_res = test::call_service(&app, test::TestRequest::get().uri("/health/live").to_request()).await;
        assert_eq!(live_res.status(), StatusCode::OK);

        let res = test::call_service(&app, test::TestRequest::get().uri("/api/students").to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert!(res.headers().contains_key(TRACE_ID_HEADER));
    }

    #[actix_web::test]
    async fn draining_fails_liveness_and_stops_the_server() {
        let health = web::Data::new(HealthState::new());
        let server = HttpServer::new(App::new)
            .bind(("127.0.0.1", 0))
            .expect("bind ephemeral port")
            .disable_signals()
            .run();
        let handle = server.handle();
        let running = actix_web::rt::spawn(server);

        drain_on(std::future::ready(()), health.clone(), handle).await;

        assert!(!health.is_alive());
        running
            .await
            .expect("server task")
            .expect("server stopped cleanly");
    }
}
