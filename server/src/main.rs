use anyhow::Context;
use clap::Parser;
use todo_server::config::Config;
use todo_server::{app, lifecycle, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = Config::parse();
    config.check_templates();

    let store = config
        .open_store()
        .await
        .context("failed to open the todo store")?;
    let state = AppState::new(store, config.template_dir.clone());

    let listener = lifecycle::bind(config.listen_addr).await?;
    lifecycle::serve(
        listener,
        app(state, config.request_timeout()),
        lifecycle::shutdown_signal(),
        config.shutdown_grace(),
    )
    .await?;

    tracing::info!("server successfully shut down");
    Ok(())
}
