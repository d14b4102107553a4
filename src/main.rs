//! AskAI - Select text, press a key, read the answer
//!
//! Floating always-on-top overlay driven entirely by global hotkeys.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use iced::application;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use askai::config::Config;
use askai::gui::AskaiApp;
use askai::hotkey::HotkeyRouter;
use askai::llm::{GeminiClient, LlmClient};
use askai::models::ModelRotation;
use askai::overlay;
use askai::query::QueryOrchestrator;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Setup logging
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("💬 AskAI v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = Config::load()?;

    let rotation = Arc::new(Mutex::new(ModelRotation::new(config.models.clone())?));
    let llm: Arc<dyn LlmClient> = Arc::new(GeminiClient::new(&config));
    let orchestrator = Arc::new(QueryOrchestrator::new(Arc::clone(&rotation), llm));

    // The UI queue: the hotkey listener and query workers enqueue, the
    // overlay's event loop is the only consumer.
    let (event_tx, event_rx) = tokio::sync::mpsc::unbounded_channel();

    let settle = Duration::from_millis(config.settle_ms);
    HotkeyRouter::new(orchestrator, event_tx, settle).start()?;

    info!("✅ AskAI ready");
    info!("   ⬆ Select some text and press Up Arrow to ask");
    info!("   ⬇ Down Arrow shows/hides the overlay");
    info!("   ➡ Right Arrow toggles ghost mode");
    info!("   ⬅ Left Arrow cycles models");

    application("AskAI", AskaiApp::update, AskaiApp::view)
        .theme(AskaiApp::theme)
        .subscription(AskaiApp::subscription)
        .window(window_settings())
        .run_with(move || AskaiApp::new(rotation, event_rx))?;

    Ok(())
}

/// Borderless always-on-top surface near the bottom-right of the screen
fn window_settings() -> iced::window::Settings {
    iced::window::Settings {
        size: iced::Size::new(overlay::WINDOW_WIDTH, overlay::WINDOW_HEIGHT),
        position: iced::window::Position::SpecificWith(|window, monitor| {
            iced::Point::new(
                monitor.width - window.width - overlay::WINDOW_MARGIN_RIGHT,
                monitor.height - window.height - overlay::WINDOW_MARGIN_BOTTOM,
            )
        }),
        resizable: false,
        decorations: false,
        transparent: true,
        level: iced::window::Level::AlwaysOnTop,
        ..Default::default()
    }
}
