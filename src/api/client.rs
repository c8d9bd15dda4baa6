//! Conversation endpoints and the chat stream.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::api::request::{json_headers, send, send_json};
use crate::api::ApiError;
use crate::models::{
    ChatRequest, Conversation, ConversationWithMessages, Message, RenameConversationRequest,
};
use crate::sse::{
    decode_stream, drive_callbacks, EventStream, SessionState, StreamCallbacks, StreamOptions,
};
use crate::traits::{Headers, HttpClient, Method};

/// Client for `/chat/*`. Every call needs a token.
#[derive(Clone)]
pub struct ChatApiClient {
    http: Arc<dyn HttpClient>,
    base_url: String,
    token: Option<String>,
}

impl ChatApiClient {
    pub fn new(http: Arc<dyn HttpClient>, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn headers(&self) -> Result<Headers, ApiError> {
        match self.token.as_deref() {
            Some(token) => Ok(json_headers(Some(token))),
            None => Err(ApiError::Unauthorized),
        }
    }

    /// `GET /chat`
    pub async fn list_conversations(&self) -> Result<Vec<Conversation>, ApiError> {
        let headers = self.headers()?;
        let conversations: Vec<Conversation> = send_json(
            self.http.as_ref(),
            Method::Get,
            &self.url("/chat"),
            None,
            &headers,
        )
        .await?;
        debug!("Fetched {} conversations", conversations.len());
        Ok(conversations)
    }

    /// `POST /chat` with no body
    pub async fn create_conversation(&self) -> Result<Conversation, ApiError> {
        let headers = self.headers()?;
        let conversation: Conversation = send_json(
            self.http.as_ref(),
            Method::Post,
            &self.url("/chat"),
            None,
            &headers,
        )
        .await?;
        info!("Created conversation {}", conversation.id);
        Ok(conversation)
    }

    /// `PATCH /chat/{id}/rename`
    ///
    /// Returns the updated conversation when the server echoes one back.
    pub async fn rename_conversation(
        &self,
        id: &str,
        title: &str,
    ) -> Result<Option<Conversation>, ApiError> {
        let headers = self.headers()?;
        let body = serde_json::to_string(&RenameConversationRequest {
            title: title.to_string(),
        })?;
        let response = send(
            self.http.as_ref(),
            Method::Patch,
            &self.url(&format!("/chat/{}/rename", id)),
            Some(&body),
            &headers,
        )
        .await?;
        info!("Renamed conversation {}", id);
        Ok(response.json::<Conversation>().ok())
    }

    /// `DELETE /chat/{id}`
    pub async fn delete_conversation(&self, id: &str) -> Result<(), ApiError> {
        let headers = self.headers()?;
        send(
            self.http.as_ref(),
            Method::Delete,
            &self.url(&format!("/chat/{}", id)),
            None,
            &headers,
        )
        .await?;
        info!("Deleted conversation {}", id);
        Ok(())
    }

    /// `GET /chat/{id}`, keeping only the messages
    pub async fn get_messages(&self, id: &str) -> Result<Vec<Message>, ApiError> {
        let headers = self.headers()?;
        let detail: ConversationWithMessages = send_json(
            self.http.as_ref(),
            Method::Get,
            &self.url(&format!("/chat/{}", id)),
            None,
            &headers,
        )
        .await?;
        debug!("Fetched {} messages for {}", detail.messages.len(), id);
        Ok(detail.messages)
    }

    /// `POST /chat/{id}/stream`
    ///
    /// Fails before any event if the request cannot be sent or the server
    /// answers with a non-2xx status.
    pub async fn stream_chat(
        &self,
        id: &str,
        message: &str,
        options: StreamOptions,
    ) -> Result<EventStream, ApiError> {
        let mut headers = self.headers()?;
        headers.insert("Accept".to_string(), "text/event-stream".to_string());
        let body = serde_json::to_string(&ChatRequest::new(message))?;
        let url = self.url(&format!("/chat/{}/stream", id));

        debug!("POST {} (stream)", url);
        let bytes = self.http.post_stream(&url, &body, &headers).await?;
        Ok(decode_stream(bytes, options))
    }

    /// Stream a chat turn into `callbacks`.
    ///
    /// A failure to start the stream is reported through `on_error` once.
    pub async fn stream_chat_response<C>(
        &self,
        id: &str,
        message: &str,
        callbacks: &mut C,
        options: StreamOptions,
    ) -> SessionState
    where
        C: StreamCallbacks + ?Sized,
    {
        match self.stream_chat(id, message, options).await {
            Ok(stream) => {
                let state = drive_callbacks(stream, callbacks).await;
                debug!("Chat stream for {} ended: {:?}", id, state);
                state
            }
            Err(err) => {
                warn!("Chat stream for {} failed to start [{}]: {}", id, err.error_code(), err);
                callbacks.on_error(&err.to_string());
                SessionState::Errored
            }
        }
    }
}

impl std::fmt::Debug for ChatApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatApiClient")
            .field("base_url", &self.base_url)
            .field("has_token", &self.token.is_some())
            .finish()
    }
}
