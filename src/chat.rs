//! Conversational session manager for the shop concierge.

use std::sync::Mutex as StdMutex;

use tracing::{debug, warn};
use uuid::Uuid;

use crate::api::{Content, ContentPart, GenerateContentRequest};
use crate::client::{GatewayError, ProviderApi};
use crate::language::Language;
use crate::model::{Turn, TurnRole};
use crate::options::ModelCatalog;

/// A multi-turn chat session bound to one language.
///
/// The turn log is append-only and owned by this session. Changing language
/// is [`reconfigure`](Self::reconfigure): the old session is discarded and a
/// fresh one starts with a new welcome turn.
pub struct ChatSession<C> {
    client: C,
    model: String,
    language: Language,
    session_id: Uuid,
    // Short-lock turn log; never held across an await.
    turns: StdMutex<Vec<Turn>>,
    // Single-flight guard: a second send while one is outstanding is refused.
    flight: tokio::sync::Mutex<()>,
}

impl<C: ProviderApi> ChatSession<C> {
    pub fn new(client: C, language: Language, models: &ModelCatalog) -> Self {
        Self::with_model(client, language, models.chat.clone())
    }

    fn with_model(client: C, language: Language, model: String) -> Self {
        let session_id = Uuid::new_v4();
        debug!(%session_id, language = %language, "chat session created");
        Self {
            client,
            model,
            language,
            session_id,
            turns: StdMutex::new(vec![Turn::assistant(language.chat_welcome())]),
            flight: tokio::sync::Mutex::new(()),
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Snapshot of the visible turn log, welcome turn included.
    pub fn turns(&self) -> Vec<Turn> {
        self.turns.lock().expect("turn log poisoned").clone()
    }

    /// Send one user turn and append the assistant's reply.
    ///
    /// Transport failures and empty replies become the localized fallback
    /// turn instead of an error; the conversation always continues.
    pub async fn send(&self, text: &str) -> Result<String, GatewayError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(GatewayError::InvalidInput(
                "chat message is empty".to_string(),
            ));
        }

        let _guard = self
            .flight
            .try_lock()
            .map_err(|_| GatewayError::Busy("chat session"))?;

        self.push(Turn::user(trimmed));
        let request = GenerateContentRequest {
            system_instruction: Some(Content::system(persona(self.language))),
            ..GenerateContentRequest::new(self.upstream_contents())
        };

        let reply = match self.client.generate(&self.model, request).await {
            Ok(response) => {
                let text = response.text();
                if text.trim().is_empty() {
                    warn!(session_id = %self.session_id, "empty reply, falling back to canned turn");
                    self.language.chat_fallback().to_string()
                } else {
                    text
                }
            }
            Err(err) => {
                warn!(session_id = %self.session_id, error = %err, "chat turn failed, falling back to canned turn");
                self.language.chat_fallback().to_string()
            }
        };

        self.push(Turn::assistant(reply.clone()));
        Ok(reply)
    }

    /// Replace this session with a fresh one in another language. The turn
    /// log resets to a single welcome turn; prior turns are gone.
    pub fn reconfigure(self, language: Language) -> Self {
        debug!(session_id = %self.session_id, from = %self.language, to = %language, "chat session replaced");
        Self::with_model(self.client, language, self.model)
    }

    fn push(&self, turn: Turn) {
        self.turns.lock().expect("turn log poisoned").push(turn);
    }

    /// Provider context for the next turn. The synthesized welcome turn is
    /// presentation-only and never goes upstream.
    fn upstream_contents(&self) -> Vec<Content> {
        self.turns
            .lock()
            .expect("turn log poisoned")
            .iter()
            .skip(1)
            .map(|turn| {
                let parts = vec![ContentPart::text(turn.text.clone())];
                match turn.role {
                    TurnRole::User => Content::user(parts),
                    TurnRole::Assistant => Content::model(parts),
                }
            })
            .collect()
    }
}

fn persona(language: Language) -> String {
    format!(
        "You are the friendly AI assistant for 'The G-Burg Cut', a premium barbershop located in Gaithersburg, Maryland.\n\
         Your job is to answer questions about our shop, our services (Haircuts, Beard Trims, Fades, etc.), and general grooming tips.\n\
         Our location is 123 Main St, Gaithersburg, MD 20878.\n\
         Be concise, professional, and slightly edgy/modern in your tone.\n\
         If users want to book, tell them to click the 'Book Now' button in the navbar.\n\
         ALWAYS respond in {}.",
        language.name()
    )
}
