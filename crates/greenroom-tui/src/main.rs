mod input;
mod runtime;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use greenroom_core::api::{ChatApi, RestApi};
use greenroom_core::config::FeedConfig;
use greenroom_core::session::Session;
use greenroom_core::transport::{spawn_transport, SsePush};
use greenroom_core::{FeedEngine, FeedEvent};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::warn;

/// Terminal client for a greenroom chat room.
#[derive(Parser, Debug)]
#[command(name = "greenroom-tui", version, about)]
struct Args {
    /// Chat server base URL
    #[arg(long, default_value = "http://localhost:8080")]
    server: String,

    /// Room to join
    #[arg(long)]
    room: String,

    /// Bearer token (falls back to GREENROOM_TOKEN)
    #[arg(long)]
    token: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let token = match args.token {
        Some(token) => token,
        None => std::env::var("GREENROOM_TOKEN")
            .context("no token: pass --token or set GREENROOM_TOKEN")?,
    };

    init_logging()?;

    // Restore the terminal before printing a panic, or it is unreadable
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = ui::terminal::restore();
        default_hook(info);
    }));

    let config = FeedConfig::new(args.server, args.room);
    let api = RestApi::new(config.server_url.clone(), token.clone());
    let push = SsePush::new(config.server_url.clone(), token.clone());

    let (feed_tx, feed_rx) = mpsc::channel::<FeedEvent>(256);

    // Initial full fetch. A failure is not fatal; the poll fallback will
    // fill the feed in once the server is reachable.
    let initial = match api.fetch_messages(&config.room_id).await {
        Ok(messages) => messages,
        Err(err) => {
            warn!(error = %err, "initial fetch failed, starting empty");
            Vec::new()
        }
    };

    let mut app = ui::App::new(
        FeedEngine::with_page_size(Session::new(token), config.page_size),
        api.clone(),
        config.room_id.clone(),
        feed_tx.clone(),
    );
    let effects = app.engine.join(initial);
    app.apply_effects(effects);

    let transport = spawn_transport(Arc::new(api), push, config, feed_tx);

    let mut terminal = ui::terminal::init()?;
    let result = runtime::run_app(&mut terminal, &mut app, feed_rx).await;

    transport.abort();
    app.engine.leave();
    ui::terminal::restore()?;
    result
}

/// File-based logging, enabled only via GREENROOM_LOG_FILE. Logging to
/// stderr would corrupt the alternate screen.
fn init_logging() -> Result<()> {
    if let Ok(path) = std::env::var("GREENROOM_LOG_FILE") {
        let file = std::fs::File::create(&path)
            .with_context(|| format!("failed to create log file {path}"))?;
        tracing_subscriber::fmt()
            .with_writer(Arc::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "info".into()),
            )
            .init();
    }
    Ok(())
}
