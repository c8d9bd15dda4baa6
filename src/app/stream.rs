//! Chat turn submission and cancellation.

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::sse::{CancelHandle, StreamCallbacks, StreamOptions};

use super::{App, AppMessage};

/// Forwards stream callbacks to the UI loop
struct ChannelCallbacks {
    conversation_id: String,
    tx: mpsc::UnboundedSender<AppMessage>,
}

impl StreamCallbacks for ChannelCallbacks {
    fn on_data(&mut self, accumulated: &str) {
        let _ = self.tx.send(AppMessage::StreamData {
            conversation_id: self.conversation_id.clone(),
            accumulated: accumulated.to_string(),
        });
    }

    fn on_error(&mut self, message: &str) {
        let _ = self.tx.send(AppMessage::StreamError {
            conversation_id: self.conversation_id.clone(),
            error: message.to_string(),
        });
    }

    // Completion is reported with the final state in `StreamFinished`
    fn on_complete(&mut self) {}
}

impl App {
    fn stream_options(&self, handle: &CancelHandle) -> StreamOptions {
        let options = StreamOptions::new().with_cancel(handle.token());
        match self.stream_idle_timeout {
            Some(timeout) => options.with_idle_timeout(timeout),
            None => options,
        }
    }

    /// Send the input line as a chat turn in the active conversation.
    ///
    /// Blank input is ignored. A second send while the conversation is
    /// still streaming is refused.
    pub fn send_message(&mut self) {
        if self.is_streaming() {
            self.set_status("Please wait for the current response to finish.");
            return;
        }
        let Some((conversation_id, text)) = self.chat.begin_send(&self.input) else {
            return;
        };
        self.input.clear();
        self.scroll_offset = 0;
        self.status = None;
        self.mark_dirty();

        let handle = CancelHandle::new();
        let options = self.stream_options(&handle);
        self.active_streams.insert(conversation_id.clone(), handle);

        info!("Sending message in {}", conversation_id);
        let client = self.chat_api.clone();
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            let mut callbacks = ChannelCallbacks {
                conversation_id: conversation_id.clone(),
                tx: tx.clone(),
            };
            let state = client
                .stream_chat_response(&conversation_id, &text, &mut callbacks, options)
                .await;
            let _ = tx.send(AppMessage::StreamFinished {
                conversation_id,
                state,
            });
        });
    }

    /// Cancel the turn streaming in the active conversation.
    ///
    /// Returns false when nothing was streaming.
    pub fn cancel_active_stream(&mut self) -> bool {
        let Some(id) = self.chat.active_id.clone() else {
            return false;
        };
        match self.active_streams.get(&id) {
            Some(handle) => {
                debug!("Cancelling stream for {}", id);
                handle.cancel();
                true
            }
            None => false,
        }
    }

    pub(crate) fn cancel_all_streams(&mut self) {
        for (id, handle) in self.active_streams.drain() {
            debug!("Cancelling stream for {}", id);
            handle.cancel();
        }
    }

    pub(crate) fn stream_finished(&mut self, conversation_id: &str) {
        self.active_streams.remove(conversation_id);
    }
}
