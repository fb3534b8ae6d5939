//! Problem tracker server: loads settings, prepares the database, serves the API.

use problem_tracker::{app, connect, ensure_tables, logging, seed_examples, AppState, ProblemStore, Settings};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::from_env()?;
    logging::init();

    let pool = connect(&settings.database_url, settings.max_connections).await?;
    ensure_tables(&pool).await?;
    if settings.seed_data {
        let today = chrono::Local::now().date_naive();
        let inserted = seed_examples(&pool, today).await?;
        tracing::info!(inserted, "example problems seeded");
    }

    let state = AppState::new(ProblemStore::new(pool));
    let router = app(state, settings.max_body_bytes);

    let listener = TcpListener::bind(settings.bind_addr()).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}
