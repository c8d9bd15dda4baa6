//! Conversation list, active conversation and its messages.

use std::collections::HashMap;

use crate::models::{Conversation, Message, MessageStatus};
use crate::sse::SessionState;

/// In-place rename of a sidebar entry
#[derive(Debug, Clone, PartialEq)]
pub struct RenameState {
    pub conversation_id: String,
    pub title: String,
}

/// Assistant reply of a turn that is still streaming.
///
/// Kept outside the message list so the reply survives switching to
/// another conversation and back.
#[derive(Debug, Clone)]
struct StreamingTurn {
    local_id: String,
    content: String,
    status: MessageStatus,
}

impl StreamingTurn {
    fn to_message(&self, conversation_id: &str) -> Message {
        let mut message = Message::assistant_placeholder(conversation_id);
        message.id = self.local_id.clone();
        message.content = self.content.clone();
        message.status = self.status.clone();
        message
    }
}

/// View state behind the sidebar and chat view.
///
/// Conversations are kept newest first. Messages belong to the active
/// conversation only and are replaced whenever it changes.
#[derive(Debug, Clone, Default)]
pub struct ChatState {
    pub conversations: Vec<Conversation>,
    /// Highlighted sidebar row
    pub selected: usize,
    pub active_id: Option<String>,
    pub messages: Vec<Message>,
    /// True between activating a conversation and its messages arriving
    pub loading_messages: bool,
    pub renaming: Option<RenameState>,
    /// conversation id -> assistant reply being streamed
    streaming: HashMap<String, StreamingTurn>,
}

impl ChatState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the conversation list, sorted by last update, newest first
    pub fn set_conversations(&mut self, mut conversations: Vec<Conversation>) {
        conversations.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        self.conversations = conversations;
        self.clamp_selection();
        if let Some(id) = &self.active_id {
            if let Some(index) = self.index_of(id) {
                self.selected = index;
            }
        }
    }

    /// Put a freshly created conversation first and make it active
    pub fn add_conversation(&mut self, conversation: Conversation) {
        let id = conversation.id.clone();
        self.conversations.retain(|c| c.id != id);
        self.conversations.insert(0, conversation);
        self.selected = 0;
        self.activate(&id);
    }

    pub fn active_conversation(&self) -> Option<&Conversation> {
        let id = self.active_id.as_deref()?;
        self.conversations.iter().find(|c| c.id == id)
    }

    pub fn selected_conversation(&self) -> Option<&Conversation> {
        self.conversations.get(self.selected)
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.conversations.iter().position(|c| c.id == id)
    }

    fn clamp_selection(&mut self) {
        if self.conversations.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.conversations.len() {
            self.selected = self.conversations.len() - 1;
        }
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.conversations.len() {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Make `id` the active conversation.
    ///
    /// Returns true when messages need to be fetched. Re-activating the
    /// current conversation is a no-op.
    pub fn activate(&mut self, id: &str) -> bool {
        if self.active_id.as_deref() == Some(id) {
            return false;
        }
        self.active_id = Some(id.to_string());
        if let Some(index) = self.index_of(id) {
            self.selected = index;
        }
        self.messages.clear();
        self.loading_messages = true;
        true
    }

    /// Activate the highlighted sidebar row
    pub fn activate_selected(&mut self) -> Option<String> {
        let id = self.selected_conversation()?.id.clone();
        self.activate(&id).then_some(id)
    }

    /// Store fetched messages if `conversation_id` is still active
    pub fn set_messages(&mut self, conversation_id: &str, messages: Vec<Message>) {
        if self.active_id.as_deref() != Some(conversation_id) {
            return;
        }
        self.messages = messages;
        self.loading_messages = false;
        // A turn still streaming keeps what it has received so far
        if let Some(turn) = self.streaming.get(conversation_id) {
            self.messages.push(turn.to_message(conversation_id));
        }
    }

    /// Loading failed; show whatever is there
    pub fn messages_failed(&mut self, conversation_id: &str) {
        if self.active_id.as_deref() == Some(conversation_id) {
            self.loading_messages = false;
        }
    }

    pub fn apply_rename(&mut self, id: &str, title: &str) {
        if let Some(conversation) = self.conversations.iter_mut().find(|c| c.id == id) {
            conversation.title = title.to_string();
        }
    }

    /// Drop a conversation. Clears the chat view if it was active.
    pub fn remove_conversation(&mut self, id: &str) {
        self.conversations.retain(|c| c.id != id);
        self.streaming.remove(id);
        if self.active_id.as_deref() == Some(id) {
            self.active_id = None;
            self.messages.clear();
            self.loading_messages = false;
        }
        if self
            .renaming
            .as_ref()
            .is_some_and(|r| r.conversation_id == id)
        {
            self.renaming = None;
        }
        self.clamp_selection();
    }

    pub fn is_streaming(&self, conversation_id: &str) -> bool {
        self.streaming.contains_key(conversation_id)
    }

    pub fn active_is_streaming(&self) -> bool {
        self.active_id
            .as_deref()
            .is_some_and(|id| self.is_streaming(id))
    }

    /// Start a chat turn in the active conversation.
    ///
    /// Adds the user message and an empty assistant message. Returns the
    /// conversation id and trimmed text, or `None` when the input is blank,
    /// nothing is active, or a turn is already streaming there.
    pub fn begin_send(&mut self, input: &str) -> Option<(String, String)> {
        let text = input.trim();
        if text.is_empty() {
            return None;
        }
        let id = self.active_id.clone()?;
        if self.is_streaming(&id) {
            return None;
        }

        let assistant = Message::assistant_placeholder(&id);
        self.streaming.insert(
            id.clone(),
            StreamingTurn {
                local_id: assistant.id.clone(),
                content: assistant.content.clone(),
                status: assistant.status.clone(),
            },
        );
        self.messages.push(Message::optimistic_user(&id, text));
        self.messages.push(assistant);
        Some((id, text.to_string()))
    }

    /// Update the streamed reply and mirror it into the view when active
    fn update_turn(
        &mut self,
        conversation_id: &str,
        content: String,
        status: Option<MessageStatus>,
    ) {
        let Some(turn) = self.streaming.get_mut(conversation_id) else {
            return;
        };
        turn.content = content;
        if let Some(status) = status {
            turn.status = status;
        }
        if self.active_id.as_deref() != Some(conversation_id) {
            return;
        }
        let turn = turn.clone();
        if let Some(message) = self.messages.iter_mut().find(|m| m.id == turn.local_id) {
            message.content = turn.content;
            message.status = turn.status;
        }
    }

    /// Replace the streamed assistant content with the accumulated text
    pub fn apply_stream_data(&mut self, conversation_id: &str, accumulated: &str) {
        self.update_turn(conversation_id, accumulated.to_string(), None);
    }

    /// Show an error in place of the streamed assistant content
    pub fn apply_stream_error(&mut self, conversation_id: &str, error: &str) {
        self.update_turn(
            conversation_id,
            format!("Error: {}", error),
            Some(MessageStatus::Error),
        );
    }

    /// End a chat turn.
    ///
    /// Returns true when the turn completed and `conversation_id` is active,
    /// meaning messages should be reloaded from the server.
    pub fn finish_stream(&mut self, conversation_id: &str, state: SessionState) -> bool {
        let turn = self.streaming.remove(conversation_id);
        let is_active = self.active_id.as_deref() == Some(conversation_id);

        if state != SessionState::Completed && is_active {
            if let Some(message) = turn
                .as_ref()
                .and_then(|turn| self.messages.iter_mut().find(|m| m.id == turn.local_id))
            {
                if message.status == MessageStatus::Pending {
                    message.status = MessageStatus::Error;
                }
            }
        }

        state == SessionState::Completed && is_active
    }

    pub fn start_rename(&mut self) -> bool {
        let Some(conversation) = self.selected_conversation() else {
            return false;
        };
        self.renaming = Some(RenameState {
            conversation_id: conversation.id.clone(),
            title: conversation.display_title().to_string(),
        });
        true
    }

    /// Finish an in-place rename; `None` when nothing changes
    pub fn commit_rename(&mut self) -> Option<(String, String)> {
        let rename = self.renaming.take()?;
        let title = rename.title.trim().to_string();
        if title.is_empty() {
            return None;
        }
        let unchanged = self
            .conversations
            .iter()
            .any(|c| c.id == rename.conversation_id && c.title == title);
        if unchanged {
            return None;
        }
        Some((rename.conversation_id, title))
    }

    pub fn cancel_rename(&mut self) {
        self.renaming = None;
    }

    /// Forget everything, e.g. on logout
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MessageRole;
    use chrono::{Duration, Utc};

    fn conversation(id: &str, minutes_ago: i64) -> Conversation {
        let at = Utc::now() - Duration::minutes(minutes_ago);
        Conversation {
            id: id.to_string(),
            title: String::new(),
            user_id: "u".to_string(),
            created_at: at,
            updated_at: at,
            document_id: None,
        }
    }

    fn state_with_active(id: &str) -> ChatState {
        let mut state = ChatState::new();
        state.set_conversations(vec![conversation(id, 0)]);
        state.activate(id);
        state.set_messages(id, Vec::new());
        state
    }

    #[test]
    fn test_conversations_sorted_newest_first() {
        let mut state = ChatState::new();
        state.set_conversations(vec![
            conversation("old", 30),
            conversation("new", 1),
            conversation("mid", 10),
        ]);
        let ids: Vec<_> = state.conversations.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "mid", "old"]);
    }

    #[test]
    fn test_add_conversation_goes_first_and_activates() {
        let mut state = ChatState::new();
        state.set_conversations(vec![conversation("a", 5)]);
        state.add_conversation(conversation("b", 60));

        assert_eq!(state.conversations[0].id, "b");
        assert_eq!(state.active_id.as_deref(), Some("b"));
        assert_eq!(state.selected, 0);
        assert!(state.loading_messages);
    }

    #[test]
    fn test_activate_same_is_noop() {
        let mut state = state_with_active("a");
        assert!(!state.activate("a"));
        assert!(!state.loading_messages);
    }

    #[test]
    fn test_stale_messages_ignored() {
        let mut state = ChatState::new();
        state.set_conversations(vec![conversation("a", 1), conversation("b", 2)]);
        state.activate("a");
        state.activate("b");

        state.set_messages("a", vec![Message::optimistic_user("a", "old")]);
        assert!(state.messages.is_empty());
        assert!(state.loading_messages);
    }

    #[test]
    fn test_send_flow_replaces_content() {
        let mut state = state_with_active("a");

        let (id, text) = state.begin_send("  hello  ").unwrap();
        assert_eq!(id, "a");
        assert_eq!(text, "hello");
        assert_eq!(state.messages.len(), 2);
        assert_eq!(state.messages[0].role, MessageRole::User);
        assert_eq!(state.messages[0].content, "hello");
        assert!(state.active_is_streaming());

        state.apply_stream_data("a", "Hel");
        state.apply_stream_data("a", "Hello");
        assert_eq!(state.messages[1].content, "Hello");

        assert!(state.finish_stream("a", SessionState::Completed));
        assert!(!state.active_is_streaming());
    }

    #[test]
    fn test_send_rejected() {
        let mut state = ChatState::new();
        assert!(state.begin_send("hi").is_none());

        let mut state = state_with_active("a");
        assert!(state.begin_send("   ").is_none());
        assert!(state.begin_send("one").is_some());
        assert!(state.begin_send("two").is_none());
        assert_eq!(state.messages.len(), 2);
    }

    #[test]
    fn test_stream_error_shown() {
        let mut state = state_with_active("a");
        state.begin_send("hi").unwrap();
        state.apply_stream_data("a", "partial");
        state.apply_stream_error("a", "rate limited");

        assert_eq!(state.messages[1].content, "Error: rate limited");
        assert_eq!(state.messages[1].status, MessageStatus::Error);
        assert!(!state.finish_stream("a", SessionState::Errored));
    }

    #[test]
    fn test_reload_during_stream_keeps_placeholder() {
        let mut state = state_with_active("a");
        state.begin_send("hi").unwrap();

        state.set_messages("a", vec![Message::optimistic_user("a", "hi")]);
        assert_eq!(state.messages.len(), 2);
        state.apply_stream_data("a", "Hi there");
        assert_eq!(state.messages[1].content, "Hi there");
    }

    #[test]
    fn test_switching_back_restores_streamed_reply() {
        let mut state = ChatState::new();
        state.set_conversations(vec![conversation("a", 1), conversation("b", 2)]);
        state.activate("a");
        state.set_messages("a", Vec::new());
        state.begin_send("hi").unwrap();
        state.apply_stream_data("a", "Drink");

        state.activate("b");
        state.set_messages("b", Vec::new());
        // Frames keep arriving while another conversation is shown
        state.apply_stream_data("a", "Drink water");

        state.activate("a");
        state.set_messages("a", vec![Message::optimistic_user("a", "hi")]);
        assert_eq!(state.messages.len(), 2);
        assert_eq!(state.messages[1].content, "Drink water");
        assert_eq!(state.messages[1].status, MessageStatus::Pending);

        state.activate("b");
        state.apply_stream_error("a", "rate limited");
        state.activate("a");
        state.set_messages("a", Vec::new());
        assert_eq!(state.messages[0].content, "Error: rate limited");
        assert_eq!(state.messages[0].status, MessageStatus::Error);
    }

    #[test]
    fn test_remove_active_clears_view() {
        let mut state = state_with_active("a");
        state.begin_send("hi").unwrap();
        state.remove_conversation("a");

        assert!(state.active_id.is_none());
        assert!(state.messages.is_empty());
        assert!(state.conversations.is_empty());
        assert!(!state.is_streaming("a"));
    }

    #[test]
    fn test_rename_flow() {
        let mut state = state_with_active("a");
        assert!(state.start_rename());
        assert_eq!(state.renaming.as_ref().unwrap().title, "New conversation");

        state.renaming.as_mut().unwrap().title = " Sleep ".to_string();
        let (id, title) = state.commit_rename().unwrap();
        assert_eq!((id.as_str(), title.as_str()), ("a", "Sleep"));

        state.apply_rename("a", "Sleep");
        assert_eq!(state.conversations[0].display_title(), "Sleep");

        state.start_rename();
        assert!(state.commit_rename().is_none());
    }
}
