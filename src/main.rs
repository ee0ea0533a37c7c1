use anyhow::Context;
use dotenv::dotenv;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod app;
mod app_state;
mod availability;
mod config;
mod db;
mod error;
mod identity;
mod mailer;
mod middleware;
mod modules;

use app_state::AppState;
use mailer::Mailer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=debug", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenv().ok();

    let env = config::init().context("Failed to load configuration")?.clone();

    let db = db::init_pool()
        .await
        .context("Failed to initialize database")?;

    let mailer = Mailer::from_config(env.mailer.as_ref());
    let state = AppState::new(db, env, mailer);

    let app = app::create_router(state);

    let addr = config::get().server_addr();
    info!("{} listening on {}", config::get().app.name, addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .await
        .context("Failed to serve application")?;

    Ok(())
}
