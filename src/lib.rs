#[cfg(feature = "server")]
use actix_cors::Cors;
#[cfg(feature = "server")]
use actix_web::{App, HttpServer, middleware, web};

#[cfg(feature = "data")]
pub mod db;
#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "data")]
pub mod pagination;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "data")]
pub mod schema;
#[cfg(feature = "server")]
pub mod services;

/// Registers extractor configuration, every route and the 404 fallback.
///
/// The repository must be supplied separately as `web::Data<DieselRepository>`.
#[cfg(feature = "server")]
pub fn configure_app(cfg: &mut web::ServiceConfig) {
    use crate::routes::customers::{
        count_customers, create_customer, delete_customer, list_customers, show_customer,
        update_customer,
    };
    use crate::routes::errors::{json_error_handler, query_error_handler};
    use crate::routes::main::{health, index, not_found};

    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .service(health)
        .service(index)
        .service(
            web::scope("/api")
                .service(count_customers)
                .service(list_customers)
                .service(show_customer)
                .service(create_customer)
                .service(update_customer)
                .service(delete_customer),
        )
        .default_service(web::route().to(not_found));
}

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
#[cfg(feature = "server")]
pub async fn run(server_config: crate::models::config::ServerConfig) -> std::io::Result<()> {
    use crate::db::{establish_connection_pool, run_migrations};
    use crate::repository::DieselRepository;

    // Establish Diesel connection pool for the SQLite database.
    let pool = establish_connection_pool(&server_config.database_url).map_err(|e| {
        std::io::Error::other(format!("Failed to establish database connection: {e}"))
    })?;

    run_migrations(&pool)
        .map_err(|e| std::io::Error::other(format!("Failed to run migrations: {e}")))?;

    let repo = DieselRepository::new(pool);

    let bind_address = (server_config.address.clone(), server_config.port);
    log::info!(
        "Starting server at http://{}:{}",
        server_config.address,
        server_config.port
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(middleware::Logger::default().exclude("/health"))
            .app_data(web::Data::new(repo.clone()))
            .configure(configure_app)
    })
    .bind(bind_address)?
    .run()
    .await
}
