use qchat::adapters::{FileCredentialsProvider, ReqwestHttpClient};
use qchat::app::App;
use qchat::cli::{command_and_config, run_cli_command};
use qchat::logging;
use qchat::terminal::{setup_panic_hook, TerminalManager};
use qchat::ui;

use color_eyre::Result;
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use ratatui::{backend::Backend, Terminal};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

/// UI tick, drives the spinner and redraws while streaming
const TICK: Duration = Duration::from_millis(16);

fn main() -> Result<()> {
    let (command, config) = command_and_config(std::env::args())?;

    // Version, help and logout run without the TUI
    if let Some(result) = run_cli_command(&command, &config) {
        return result;
    }

    color_eyre::install()?;

    match logging::init(&config.log_dir()) {
        Ok(path) => info!("Logging to {}", path.display()),
        Err(e) => eprintln!("Warning: logging disabled: {}", e),
    }
    info!("Starting qchat {} against {}", qchat::cli::VERSION, config.api_url);

    // Setup panic hook to ensure terminal cleanup on panic
    setup_panic_hook();

    let runtime = tokio::runtime::Runtime::new()?;

    let http = Arc::new(ReqwestHttpClient::from_config(&config)?);
    let credentials = Arc::new(FileCredentialsProvider::new(config.home_dir()));
    let mut app = App::new(&config, http, credentials);

    let mut term_manager = TerminalManager::new()?;

    // Spawned requests need the runtime entered
    let result = runtime.block_on(async {
        app.restore_session().await;
        run_app(term_manager.terminal(), &mut app).await
    });

    term_manager.restore()?;
    if let Err(e) = &result {
        error!("UI loop failed: {:?}", e);
    }
    info!("Exiting");
    result
}

async fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    let mut event_stream = EventStream::new();

    // Take the message receiver from the app (we need ownership for select!)
    let Some(mut message_rx) = app.message_rx.take() else {
        return Ok(());
    };

    loop {
        // Draw the UI only when needed (dirty flag or streaming)
        if app.needs_redraw || app.is_streaming() {
            terminal.draw(|f| ui::render(f, app))?;
            app.needs_redraw = false;
        }

        tokio::select! {
            _ = tokio::time::sleep(TICK) => {
                app.tick();
            }

            Some(message) = message_rx.recv() => {
                app.handle_message(message);
            }

            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        app.handle_key(key);
                    }
                    Some(Ok(Event::Paste(text))) => app.handle_paste(&text),
                    Some(Ok(Event::Resize(_, _))) => app.mark_dirty(),
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        error!("Terminal event error: {}", e);
                        return Err(e.into());
                    }
                    // Input closed
                    None => app.quit(),
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
