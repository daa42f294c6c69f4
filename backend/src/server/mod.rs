//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;
pub use state_builders::build_ports;

use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use command_center::Trace;
#[cfg(debug_assertions)]
use command_center::doc::ApiDoc;
use command_center::inbound::http::configure_api;
use command_center::inbound::http::health::{HealthState, live, ready};
use command_center::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

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

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .configure(configure_api)
        .service(ready)
        .service(live);

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
/// - `config`: pre-built [`ServerConfig`] holding the store, adapters and binding.
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
    let bind_addr = config.bind_addr();

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

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::test;
    use command_center::domain::FixtureStore;
    use mockable::DefaultClock;
    use rstest::rstest;

    fn deps() -> AppDependencies {
        let store = Arc::new(FixtureStore::seeded().expect("fixtures load"));
        let ports = build_ports(&Default::default()).expect("ports build");
        let config = ServerConfig::new(
            "127.0.0.1:0".parse().expect("socket addr"),
            store,
            ports,
            1_610_612_752,
            Arc::new(DefaultClock),
        );
        AppDependencies {
            health_state: web::Data::new(HealthState::new()),
            http_state: build_http_state(&config),
        }
    }

    #[rstest]
    #[actix_web::test]
    async fn app_serves_api_and_probes() {
        let deps = deps();
        deps.health_state.mark_ready();
        let app = test::init_service(build_app(deps)).await;

        let tasks = test::call_service(&app, test::TestRequest::get().uri("/api/tasks").to_request()).await;
        assert_eq!(tasks.status(), StatusCode::OK);
        assert!(tasks.headers().contains_key("trace-id"));

        let probe =
            test::call_service(&app, test::TestRequest::get().uri("/health/ready").to_request())
                .await;
        assert_eq!(probe.status(), StatusCode::OK);
    }

    #[rstest]
    #[actix_web::test]
    async fn sync_is_disabled_without_secret() {
        let app = test::init_service(build_app(deps())).await;
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/sync")
                .insert_header(("Authorization", "Bearer anything"))
                .set_payload("{}")
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
