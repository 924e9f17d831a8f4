#![deny(clippy::implicit_return)]
#![allow(clippy::needless_return)]

mod application;
mod configuration;
mod domain;
mod infrastructure;

use std::env;
use std::io;
use std::process;
use std::time::Duration;

use anyhow::Context;
use anyhow::Error;
use anyhow::Result;
use tokio::sync::mpsc;
use tokio::task;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Layer;
use yansi::Paint;

use crate::application::chat;
use crate::application::cli;
use crate::application::cli::Mode;
use crate::application::server;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Action;
use crate::domain::models::BackendBox;
use crate::domain::models::Event;
use crate::domain::services::actions::ActionsService;
use crate::domain::services::clipboard::ClipboardService;
use crate::domain::services::GenerationProxy;
use crate::domain::services::Preview;
use crate::infrastructure::backends::openai::OpenAI;
use crate::infrastructure::proxy_client::ProxyClient;

fn handle_error(err: Error) {
    eprintln!(
        "{}",
        Paint::red(format!(
            "Oh no! ComponentLab has failed with the following app version and error.\n\nVersion: {}\nCommit: {}\nError: {:#}",
            env!("CARGO_PKG_VERSION"),
            option_env!("VERGEN_GIT_DESCRIBE").unwrap_or("unknown"),
            err
        ))
    );

    let backtrace = err.backtrace();
    if backtrace.to_string() == "disabled backtrace" {
        let args = env::args().collect::<Vec<String>>().join(" ");
        eprintln!("\nRunning the following can help explain further what the issue is:");
        eprintln!("\nRUST_BACKTRACE=1 {args}");
    } else {
        eprintln!("\n{}", backtrace);
    }

    process::exit(1);
}

fn init_tracing() -> Option<WorkerGuard> {
    let filter = || {
        return EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| return EnvFilter::new("componentlab=info"));
    };

    let stderr_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_filter(filter());

    let mut guard = None;
    let file_layer = env::var("COMPONENTLAB_LOG_DIR").ok().map(|dir| {
        let file_appender = tracing_appender::rolling::never(dir, "debug.log");
        let (writer, worker_guard) = tracing_appender::non_blocking(file_appender);
        guard = Some(worker_guard);

        return fmt::layer()
            .json()
            .with_writer(writer)
            .with_filter(EnvFilter::new("componentlab=debug"));
    });

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .init();

    return guard;
}

async fn run_server() -> Result<()> {
    let port = Config::get_u64(ConfigKey::Port)?;
    let port = u16::try_from(port).with_context(|| {
        return format!("Port {port} is out of range");
    })?;

    let token = Config::get(ConfigKey::OpenAiToken);
    let backend: Option<BackendBox> = if token.is_empty() {
        tracing::warn!(
            "OPENAI_API_KEY is not set. The /generate endpoint will fail until it is configured."
        );
        None
    } else {
        let openai: BackendBox = Box::new(
            OpenAI::new(
                &Config::get(ConfigKey::OpenAiURL),
                &token,
                &Config::get(ConfigKey::Model),
            )
            .with_timeouts(
                Duration::from_millis(Config::get_u64(ConfigKey::UpstreamTimeout)?),
                Duration::from_millis(Config::get_u64(ConfigKey::BackendHealthCheckTimeout)?),
            ),
        );
        Some(openai)
    };

    let proxy = GenerationProxy::new(backend);
    if proxy.is_configured() {
        if let Err(err) = proxy.health_check().await {
            tracing::warn!(error = %err, "Upstream health check failed, generations may fail");
        }
    }

    return server::start(port, proxy).await;
}

async fn run_chat() -> Result<()> {
    // Leave the server room to report its own upstream timeout first.
    let timeout = Duration::from_millis(Config::get_u64(ConfigKey::UpstreamTimeout)?)
        + Duration::from_secs(5);
    let client = ProxyClient::new(&Config::get(ConfigKey::ServerURL), timeout);

    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
    let (event_tx, event_rx) = mpsc::unbounded_channel::<Event>();

    let mut background_futures = task::JoinSet::new();
    let actions_client = client.clone();
    background_futures.spawn(async move {
        return ActionsService::start(
            actions_client,
            Preview::default(),
            event_tx,
            &mut action_rx,
        )
        .await;
    });

    if let Err(clipboard_err) = ClipboardService::healthcheck() {
        tracing::warn!(err = ?clipboard_err, "Clipboard service is unable to start");
    } else {
        background_futures.spawn(async move {
            return ClipboardService::start().await;
        });
    }

    let res = tokio::select!(
        res = background_futures.join_next() => match res {
            Some(Ok(res)) => res,
            Some(Err(err)) => Err(err.into()),
            None => Ok(()),
        },
        res = chat::start(&client, action_tx, event_rx) => res,
    );

    return res;
}

#[tokio::main]
async fn main() {
    std::panic::set_hook(Box::new(|panic_info| {
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));

    let guard = init_tracing();

    let res = match cli::parse().await {
        Ok(Some(Mode::Serve)) => run_server().await,
        Ok(Some(Mode::Chat)) => run_chat().await,
        Ok(None) => Ok(()),
        Err(err) => Err(err),
    };

    drop(guard);
    if let Err(err) = res {
        handle_error(err);
    }

    process::exit(0);
}
