mod app_context;
mod commands;
mod config;
mod console;
mod jobs;
mod monitor;
mod sink;

use teloxide::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::app_context::AppContext;
use crate::commands::answer_text;
use crate::config::load_config;
use crate::jobs::start_background_jobs;

fn init_json_logging() {
    if let Err(error) = tracing_log::LogTracer::init() {
        eprintln!(
            "logging bridge initialization failed (continuing with existing logger): {}",
            error
        );
    }

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // Diagnostics go to stderr; the console mode owns stdout for its JSON
    // samples.
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .json()
        .with_current_span(false)
        .with_span_list(false)
        .finish();

    if let Err(error) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("global logger initialization failed: {}", error);
    }
}

#[tokio::main]
async fn main() {
    init_json_logging();

    let config = match load_config() {
        Ok(config) => config,
        Err(error) => {
            log::error!("Configuration error: {}", error);
            std::process::exit(1);
        }
    };

    if std::env::args().nth(1).as_deref() == Some("console") {
        console::run(config).await;
        return;
    }

    let token = match config.require_token() {
        Ok(token) => token.to_string(),
        Err(error) => {
            log::error!("Configuration error: {}", error);
            std::process::exit(1);
        }
    };

    log::info!("Live metrics bot is starting...");
    let bot = Bot::new(token);

    let own_id = match bot.get_me().await {
        Ok(me) => me.user.id,
        Err(error) => {
            log::error!("failed to reach the chat platform: {}", error);
            std::process::exit(1);
        }
    };

    let app_context = AppContext::new(config);
    let monitor_handle = start_background_jobs(bot.clone(), app_context.clone());

    // repl installs its own Ctrl-C handler and returns on interruption.
    teloxide::repl(bot, move |bot: Bot, msg: Message| async move {
        answer_text(bot, msg, own_id).await
    })
    .await;

    app_context.shutdown.notify_one();
    if let Err(error) = monitor_handle.await {
        log::warn!("monitor task ended abnormally: {}", error);
    }
    log::info!("Monitoring stopped");
}
