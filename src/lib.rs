pub mod application;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod schema;
pub mod state;

use actix_web::{error, middleware::Logger, web, App, HttpServer, ResponseError};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use config::Config;
pub use db::{create_pool, DbPool};
pub use state::AppState;

use errors::AppError;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::phones::list_phones,
        handlers::phones::get_phone,
        handlers::orders::place_order,
        handlers::orders::get_order,
        handlers::orders::list_orders,
        handlers::chat::chat,
    ),
    components(schemas(
        handlers::phones::PhoneResponse,
        handlers::phones::PhoneListResponse,
        handlers::orders::PlaceOrderRequest,
        handlers::orders::PlaceOrderResponse,
        handlers::orders::OrderResponse,
        handlers::orders::ListOrdersResponse,
        handlers::chat::ChatRequest,
        handlers::chat::HistoryEntry,
        handlers::chat::ChatResponse,
    )),
    tags(
        (name = "phones", description = "Catalog of phones"),
        (name = "orders", description = "Order placement"),
        (name = "chat", description = "Shopping assistant"),
    )
)]
pub struct ApiDoc;

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut conn = pool.get()?;
    conn.run_pending_migrations(MIGRATIONS)?;
    Ok(())
}

/// Register routes and request-body handling on an actix `App`.
///
/// Unparseable JSON bodies are answered as validation failures, in the chat
/// envelope on `/chat`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        let response = AppError::BadRequest(format!("Invalid request body: {err}")).error_response();
        error::InternalError::from_response(err, response).into()
    }))
    .route("/phones", web::get().to(handlers::phones::list_phones))
    .route("/phones/{id}", web::get().to(handlers::phones::get_phone))
    .service(
        web::scope("/orders")
            .route("", web::post().to(handlers::orders::place_order))
            .route("", web::get().to(handlers::orders::list_orders))
            .route("/{id}", web::get().to(handlers::orders::get_order)),
    )
    .service(
        web::resource("/chat")
            .app_data(web::JsonConfig::default().error_handler(|err, _req| {
                let response = AppError::chat_body(err.to_string()).error_response();
                error::InternalError::from_response(err, response).into()
            }))
            .route(web::post().to(handlers::chat::chat)),
    );
}

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    state: AppState,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    let state = web::Data::new(state);
    Ok(HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Logger::default())
            .configure(configure)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
    })
    .bind((host.to_string(), port))?
    .run())
}
