mod config;
mod doc;
mod dtos;
mod error;
mod routes;
mod state;
mod utils;

use crate::{config::Config, state::AppState, utils::shutdown::shutdown_signal};
use database::db::create_connection;
use log::info;
use migration::{Migrator, MigratorTrait};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = Config::from_env().expect("Invalid configuration");

    let db = create_connection(&config.database_url)
        .await
        .expect("Failed to connect to database");

    if config.run_migrations {
        Migrator::up(&db, None)
            .await
            .expect("Failed to apply migrations");
        info!("Migrations applied");
    }

    let app = routes::create_router(AppState { db });

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .expect("Failed to bind listener");
    info!("Running axum on http://{}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}
