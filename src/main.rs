use clap::Parser;
use pantry_search::{
    api::{handlers::AppState, routes},
    cli::{commands, Cli, Commands},
    config::Settings,
    db, Error, Result,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if it exists
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,pantry_search=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let settings = Settings::from_env()?;
    settings.validate()?;

    match cli.command {
        Commands::Serve { port, host } => {
            serve(settings, port, host).await?;
        }
        Commands::Migrate => {
            migrate(settings).await?;
        }
        Commands::Seed { file } => {
            let pool = open_database(&settings).await?;
            commands::seed_and_report(&pool, &file).await?;
        }
        Commands::Search { ingredients, limit } => {
            let pool = open_database(&settings).await?;
            commands::search(&pool, &settings.search, ingredients, limit).await?;
        }
        Commands::Bench { runs } => {
            let pool = open_database(&settings).await?;
            commands::bench_and_report(&pool, &settings.search, runs).await?;
        }
    }

    Ok(())
}

async fn open_database(settings: &Settings) -> Result<db::DbPool> {
    let pool = db::init_pool_with_config(&settings.database).await?;
    db::run_migrations(&pool).await?;
    Ok(pool)
}

async fn serve(mut settings: Settings, port: Option<u16>, host: Option<String>) -> Result<()> {
    // Override settings with CLI arguments
    if let Some(port) = port {
        settings.server.port = port;
    }
    if let Some(host) = host {
        settings.server.host = host;
    }

    info!("Starting recipe search server");
    info!("Database: {}", settings.database.url);
    info!("Server: {}:{}", settings.server.host, settings.server.port);

    let pool = db::init_pool_with_config(&settings.database).await?;
    info!(
        "Database connection established (max_connections: {}, min_connections: {})",
        settings.database.max_connections, settings.database.min_connections
    );

    db::run_migrations(&pool).await?;
    info!("Database migrations completed");

    let total = db::recipes::count_all_recipes(&pool).await?;
    info!("{} recipes available for search", total);

    let state = AppState::new(pool, settings.clone());
    let app = routes::create_router(state, &settings);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| Error::Internal(format!("Failed to bind to {addr}: {e}")))?;

    println!("\n========================================");
    println!("Pantry Search Server");
    println!("========================================");
    println!("Address: http://{addr}");
    println!("Recipes: {total}");
    println!("\nAPI Endpoints:");
    println!("  GET  /api/recipes/search?ingredients[]=...&limit=...");
    println!("  GET  /api/recipes/:id");
    println!("  GET  /api/stats");
    println!("  GET  /health");
    println!("  GET  /ready");
    println!("\nPress Ctrl+C to stop");
    println!("========================================\n");

    info!("Server listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .await
    .map_err(|e| Error::Internal(format!("Server error: {e}")))?;

    info!("Shutting down...");
    Ok(())
}

async fn migrate(settings: Settings) -> Result<()> {
    info!("Running database migrations");

    let pool = db::init_pool_with_config(&settings.database).await?;
    db::run_migrations(&pool).await?;

    println!("✓ Database migrations completed successfully");
    Ok(())
}
