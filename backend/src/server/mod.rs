//! Server construction and middleware wiring.

mod config;

pub use config::AppConfig;

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use diesel_migrations::{EmbeddedMigrations, embed_migrations};
use tracing::info;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use crate::api::error::{json_config, page_not_found};
use crate::api::users::{create_user, list_users, update_user};
#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::UsersService;
use crate::middleware::RequestTiming;
use crate::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Build the actix application: timing middleware, JSON extractor config,
/// the method-routed `/api/users` resource, and the no-match fallback.
pub fn build_app(
    service: UsersService,
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
        .app_data(web::Data::new(service))
        .app_data(json_config())
        .wrap(RequestTiming)
        .service(list_users)
        .service(create_user)
        .service(update_user)
        .default_service(web::route().to(page_not_found));

    #[cfg(debug_assertions)]
    let app =
        app.service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Run pending migrations, build the pool, and serve until shutdown.
///
/// # Errors
/// Returns an [`std::io::Error`] when the database is unreachable, the
/// migrations fail, or the listener cannot bind.
pub async fn run(config: AppConfig) -> std::io::Result<()> {
    run_migrations(&config.database_url)?;

    let pool_config =
        PoolConfig::new(&config.database_url).with_max_size(config.pool_max_size);
    let pool = DbPool::new(pool_config)
        .await
        .map_err(|err| std::io::Error::other(format!("pool construction failed: {err}")))?;

    let repository = Arc::new(DieselUserRepository::new(pool));
    let service = UsersService::new(repository);

    info!(bind_addr = %config.bind_addr, "starting HTTP server");
    HttpServer::new(move || build_app(service.clone()))
        .bind(config.bind_addr)?
        .run()
        .await
}

/// Apply pending migrations over a short-lived synchronous connection.
fn run_migrations(database_url: &str) -> std::io::Result<()> {
    use diesel::Connection;
    use diesel_migrations::MigrationHarness;

    let mut conn = diesel::PgConnection::establish(database_url)
        .map_err(|err| std::io::Error::other(format!("database connection failed: {err}")))?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| std::io::Error::other(format!("migrations failed: {err}")))?;
    if !applied.is_empty() {
        info!(count = applied.len(), "applied pending migrations");
    }
    Ok(())
}
