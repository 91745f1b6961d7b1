//! Main TUI runner - entry point and event loop

use blogsmith_app::Engine;
use blogsmith_client::BlogApi;
use blogsmith_core::prelude::*;

use crate::render::{self, ViewCache};
use crate::{event, terminal};

/// Run the TUI until the user quits.
///
/// The terminal is restored on every exit path, including errors from the
/// loop itself.
pub async fn run<A>(mut engine: Engine<A>) -> Result<()>
where
    A: BlogApi + Send + Sync + 'static,
{
    let mut term = terminal::init()?;

    info!(
        "Blogsmith TUI starting against {}",
        engine.state.settings.api.base_url
    );
    engine.start();

    let result = run_loop(&mut term, &mut engine);

    engine.shutdown();
    ratatui::restore();
    result
}

/// Main event loop
fn run_loop<A>(terminal: &mut ratatui::DefaultTerminal, engine: &mut Engine<A>) -> Result<()>
where
    A: BlogApi + Send + Sync + 'static,
{
    let mut cache = ViewCache::new();

    while !engine.should_quit() {
        // Results from background tasks and the signal handler
        engine.drain_pending_messages();

        terminal
            .draw(|frame| render::view(frame, &mut engine.state, &mut cache))
            .context("Failed to draw frame")?;

        if let Some(message) = event::poll().context("Failed to read terminal input")? {
            engine.process_message(message);
        }
    }

    debug!("Event loop finished");
    Ok(())
}
