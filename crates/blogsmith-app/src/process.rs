//! Message processing: runs the TEA update loop and dispatches actions

use std::sync::Arc;

use blogsmith_client::BlogApi;
use tokio::sync::mpsc;

use crate::actions::handle_action;
use crate::export::Clipboard;
use crate::handler;
use crate::message::Message;
use crate::state::AppState;

/// Process a message through the TEA update function, following up
/// messages until the chain ends
pub fn process_message<A>(
    state: &mut AppState,
    message: Message,
    msg_tx: &mpsc::Sender<Message>,
    api: &Arc<A>,
    clipboard: &mut dyn Clipboard,
) where
    A: BlogApi + Send + Sync + 'static,
{
    let tick_interval = state.settings.progress.tick_interval();

    let mut msg = Some(message);
    while let Some(m) = msg {
        let result = handler::update(state, m);

        if let Some(action) = result.action {
            handle_action(action, msg_tx.clone(), api, clipboard, tick_interval);
        }

        // Continue with follow-up message
        msg = result.message;
    }
}
