//! Headless mode runner - one generation without the TUI

use std::io::Write;
use std::path::{Path, PathBuf};

use tokio::sync::broadcast::{self, error::TryRecvError};

use blogsmith_app::config::Settings;
use blogsmith_app::form::TextField;
use blogsmith_app::{Engine, EngineEvent, MarkdownExport, Message};
use blogsmith_client::BlogApi;
use blogsmith_core::prelude::*;

use super::HeadlessEvent;

/// What to generate and where to put it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlessRequest {
    pub topic: String,
    /// `YYYY-MM-DD`; today when absent
    pub as_of: Option<String>,
    /// Export directory; the configured one when absent
    pub output: Option<PathBuf>,
}

/// Run one generation, export the markdown and report events to `out`.
///
/// Returns the path of the exported file.
pub async fn run_headless<A, W>(
    api: A,
    settings: Settings,
    request: HeadlessRequest,
    out: &mut W,
) -> Result<PathBuf>
where
    A: BlogApi + Send + Sync + 'static,
    W: Write,
{
    info!("═══════════════════════════════════════════════════════");
    info!("Blogsmith starting in HEADLESS mode");
    info!("Backend: {}", settings.api.base_url);
    info!("═══════════════════════════════════════════════════════");

    let output_dir = request
        .output
        .clone()
        .unwrap_or_else(|| settings.export.resolve_directory());

    let mut engine = Engine::new(api, settings);
    engine.state.form.topic = TextField::new(request.topic.as_str());
    if let Some(as_of) = &request.as_of {
        engine.state.form.as_of = TextField::new(as_of.as_str());
    }

    // The TUI reports validation errors as notifications; here they end the run
    if let Err(e) = engine.state.form.validate() {
        HeadlessEvent::error(e.to_string()).emit(out);
        return Err(e);
    }

    let mut events = engine.subscribe();
    engine.process_message(Message::Submit);

    let outcome = loop {
        if let Some(outcome) = forward_events(&mut events, &engine, &output_dir, out) {
            break outcome;
        }

        if engine.should_quit() {
            info!("Quit requested before the generation finished");
            HeadlessEvent::error("Interrupted").emit(out);
            break Err(Error::generation("Interrupted"));
        }

        match engine.msg_rx.recv().await {
            Some(msg) => engine.process_message(msg),
            None => {
                info!("Message channel closed");
                break Err(Error::ChannelClosed);
            }
        }
    };

    engine.shutdown();
    info!("Blogsmith headless mode exiting");
    outcome
}

/// Emit NDJSON for pending engine events.
///
/// Returns the outcome once the generation has finished either way.
fn forward_events<A, W>(
    events: &mut broadcast::Receiver<EngineEvent>,
    engine: &Engine<A>,
    output_dir: &Path,
    out: &mut W,
) -> Option<Result<PathBuf>>
where
    A: BlogApi + Send + Sync + 'static,
    W: Write,
{
    loop {
        let event = match events.try_recv() {
            Ok(event) => event,
            Err(TryRecvError::Lagged(skipped)) => {
                warn!("Headless event receiver lagged by {} events", skipped);
                continue;
            }
            Err(TryRecvError::Empty | TryRecvError::Closed) => return None,
        };
        debug!("Engine event: {}", event.event_type());

        match event {
            EngineEvent::GenerationStarted { topic, as_of } => {
                HeadlessEvent::generation_started(&topic, &as_of).emit(out);
            }
            EngineEvent::GenerationCompleted {
                title,
                evidence_count,
                task_count,
            } => {
                let outcome = export_result(engine, output_dir);
                match &outcome {
                    Ok(path) => HeadlessEvent::generation_completed(
                        path.display().to_string(),
                        title,
                        evidence_count,
                        task_count,
                    )
                    .emit(out),
                    Err(e) => HeadlessEvent::error(e.to_string()).emit(out),
                }
                return Some(outcome);
            }
            EngineEvent::GenerationFailed { message } => {
                HeadlessEvent::error(message.as_str()).emit(out);
                return Some(Err(Error::generation(message)));
            }
            _ => {}
        }
    }
}

fn export_result<A>(engine: &Engine<A>, output_dir: &Path) -> Result<PathBuf>
where
    A: BlogApi + Send + Sync + 'static,
{
    let result = engine
        .state
        .current_result
        .as_ref()
        .ok_or_else(|| Error::generation("Generation finished without a result"))?;
    MarkdownExport::from_result(result).write_to(output_dir)
}
