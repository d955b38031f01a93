mod app;
mod cover_cache;
mod style;
mod subscription;
mod theme;
mod widgets;
mod window_state;

use std::path::PathBuf;

use animetrends_api::AnimeTrendsClient;
use animetrends_core::config::{AppConfig, BASE_URL_ENV};
use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "animetrends=debug";

/// Browse top-ranked anime and get recommendations for any title.
#[derive(Debug, Parser)]
#[command(name = "animetrends", version, about)]
struct Cli {
    /// Base URL of the AnimeTrends service.
    #[arg(long, env = BASE_URL_ENV)]
    base_url: Option<String>,

    /// Read configuration from this file instead of the user config.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log to stderr only.
    #[arg(long)]
    no_log_file: bool,
}

fn main() -> iced::Result {
    let cli = Cli::parse();
    let _log_guard = init_logging(!cli.no_log_file);

    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    }
    .unwrap_or_else(|e| {
        eprintln!("animetrends: {e}");
        std::process::exit(2);
    });
    config.apply_base_url_override(cli.base_url);

    let client = config
        .validate()
        .map_err(|e| e.to_string())
        .and_then(|()| {
            AnimeTrendsClient::with_timeout(&config.service.base_url, config.request_timeout())
                .map_err(|e| e.to_string())
        })
        .unwrap_or_else(|e| {
            eprintln!("animetrends: {e}");
            std::process::exit(2);
        });
    tracing::info!(base_url = %client.base_url(), "Starting AnimeTrends");

    let ws = window_state::WindowState::load();
    let mut win = iced::window::Settings {
        size: ws.size(),
        min_size: Some(iced::Size::new(480.0, 360.0)),
        ..Default::default()
    };

    if let Some(pos) = ws.position() {
        win.position = iced::window::Position::Specific(pos);
    } else {
        win.position = iced::window::Position::Centered;
    }

    iced::application(
        move || app::AnimeTrends::new(config.clone(), client.clone()),
        app::AnimeTrends::update,
        app::AnimeTrends::view,
    )
    .title(app::AnimeTrends::title)
    .subscription(app::AnimeTrends::subscription)
    .theme(app::AnimeTrends::theme)
    .font(lucide_icons::LUCIDE_FONT_BYTES)
    .window(win)
    .run()
}

/// Stderr logging plus, unless disabled, a daily log file in the data dir.
///
/// `RUST_LOG` overrides the default filter. The returned guard must live
/// until exit so buffered file output is flushed.
fn init_logging(to_file: bool) -> Option<WorkerGuard> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let stderr = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    if !to_file {
        tracing_subscriber::registry().with(filter).with(stderr).init();
        return None;
    }

    let appender = tracing_appender::rolling::daily(
        AppConfig::data_dir().join("logs"),
        "animetrends.log",
    );
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::registry()
        .with(filter)
        .with(stderr)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer),
        )
        .init();
    Some(guard)
}
