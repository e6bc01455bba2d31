use std::{env, time::Duration};

use cinema_booking::{http, schema, CinemaStore};
use dotenvy::dotenv;
use sea_orm::{ConnectOptions, Database};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .init();

    dotenv().ok();

    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".to_owned());
    let force_sync = env::var("FORCE_SCHEMA_SYNC")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    let mut opt = ConnectOptions::new(database_url);
    opt.max_connections(10)
        .min_connections(2)
        .connect_timeout(Duration::from_secs(10))
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(10))
        .max_lifetime(Duration::from_secs(10 * 60));

    let db = Database::connect(opt).await?;
    info!("connected to database");

    // Must complete before the listener opens; synchronization is not safe
    // to run concurrently with request handling.
    schema::synchronize(&db, force_sync).await?;

    let app = http::router(CinemaStore::new(db));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("server starting on http://{bind_addr}");
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
