use color_eyre::Result;
use ratatui::{backend::CrosstermBackend, Terminal};
use reelspot_tui::{
    api::{MovieSearch, OmdbTransport},
    app::{App, SearchRequest},
    config::Config,
    events::{Event, EventHandler},
    location, logging, ui,
};
use std::{io, sync::Arc};
use tokio::sync::mpsc::UnboundedSender;
use tracing::info;

type Search = MovieSearch<OmdbTransport>;

#[tokio::main]
async fn main() -> Result<()> {
    // Instrumentation and safety
    let _log_guard = logging::initialize_logging("logs");
    color_eyre::install()?;
    install_panic_hook();

    let config = Config::load();
    let search = Arc::new(MovieSearch::new(OmdbTransport::new(&config.api)?));

    // Ready terminal and state
    let mut terminal = setup_terminal()?;
    let mut app = App::new();
    let mut events = EventHandler::new(config.ui.tick_rate_ms);

    // Location flow: one permission request, one read
    let location_tx = events.tx.clone();
    let provider = location::provider_from_config(&config.location);
    tokio::spawn(async move {
        let result = location::acquire_location(provider.as_ref()).await;
        let _ = location_tx.send(Event::LocationResolved(result));
    });

    // Main loop
    while !app.should_quit {
        terminal.draw(|f| ui::render(f, &app))?;

        match events.next().await {
            Some(event) => {
                if let Some(request) = app.handle_event(event) {
                    spawn_search(search.clone(), request, events.tx.clone());
                }
            }
            None => break,
        }
    }

    restore_terminal(terminal)?;
    info!("Shut down cleanly.");
    Ok(())
}

/// Runs one search in the background; the result comes back as an event.
fn spawn_search(search: Arc<Search>, request: SearchRequest, tx: UnboundedSender<Event>) {
    tokio::spawn(async move {
        let result = search.search(&request.title).await;
        let _ = tx.send(Event::SearchFinished {
            seq: request.seq,
            result,
        });
    });
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    crossterm::terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, crossterm::terminal::EnterAlternateScreen, crossterm::cursor::Hide)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(mut terminal: Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    crossterm::terminal::disable_raw_mode()?;
    crossterm::execute!(terminal.backend_mut(), crossterm::terminal::LeaveAlternateScreen, crossterm::cursor::Show)?;
    Ok(())
}

fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Force terminal cleanup!
        crossterm::terminal::disable_raw_mode().ok();
        crossterm::execute!(std::io::stdout(), crossterm::terminal::LeaveAlternateScreen, crossterm::cursor::Show).ok();
        original_hook(panic_info);
    }));
}
