use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::definitions::{AgentDefinition, FLASHCARD_AGENT, QUIZ_AGENT, ROOT_AGENT};
use crate::{
    Error, Result,
    llm::{ChatCompletionRequest, ChatMessage, LlmClient},
    session::SessionRegistry,
};

/// Which study material to generate, selecting the sub-agent and prompt
/// template. A closed enum: unknown kinds are rejected at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialKind {
    Flashcards,
    Quiz,
}

impl MaterialKind {
    pub fn instruction(&self, num_items: u32, content: &str) -> String {
        match self {
            Self::Flashcards => {
                format!("Create {num_items} flashcards from this educational content:\n\n{content}")
            }
            Self::Quiz => format!(
                "Create a quiz with {num_items} questions from this educational content:\n\n{content}"
            ),
        }
    }

    fn delegate(&self) -> &'static AgentDefinition {
        match self {
            Self::Flashcards => &FLASHCARD_AGENT,
            Self::Quiz => &QUIZ_AGENT,
        }
    }
}

impl fmt::Display for MaterialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flashcards => write!(f, "flashcards"),
            Self::Quiz => write!(f, "quiz"),
        }
    }
}

/// One textual fragment of an event's content.
#[derive(Debug, Clone)]
pub struct Part {
    pub text: Option<String>,
}

#[derive(Debug, Clone)]
pub struct EventContent {
    pub parts: Vec<Part>,
}

/// One item of an agent turn's response sequence. The terminal item carries
/// the completed reply.
#[derive(Debug, Clone)]
pub struct AgentEvent {
    pub author: String,
    pub content: Option<EventContent>,
    pub turn_complete: bool,
}

impl AgentEvent {
    pub fn is_final_response(&self) -> bool {
        self.turn_complete
    }

    /// All text fragments concatenated in order.
    pub fn text(&self) -> String {
        self.content
            .as_ref()
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|part| part.text.as_deref())
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Drives the agent pipeline: routes a turn from the root agent to the
/// matching specialist and performs the model round-trip under a session.
pub struct Runner {
    llm_client: Arc<dyn LlmClient>,
    sessions: Arc<SessionRegistry>,
    timeout: Duration,
}

impl Runner {
    pub fn new(
        llm_client: Arc<dyn LlmClient>,
        sessions: Arc<SessionRegistry>,
        timeout: Duration,
    ) -> Self {
        Self {
            llm_client,
            sessions,
            timeout,
        }
    }

    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    /// Runs one agent turn, yielding the response event sequence: a
    /// delegation event from the root agent followed by the specialist's
    /// terminal event.
    pub async fn run_turn(
        &self,
        session_id: &str,
        kind: MaterialKind,
        message: &str,
    ) -> Result<Vec<AgentEvent>> {
        let session = self.sessions.get_or_create(session_id)?;
        debug!(
            "Running {} turn for session {} (created {})",
            kind, session.session_id, session.created_at
        );

        let delegate = kind.delegate();
        debug!(
            "Root agent {} delegating to {} (model {})",
            ROOT_AGENT.name, delegate.name, delegate.model
        );
        let mut events = vec![AgentEvent {
            author: ROOT_AGENT.name.to_string(),
            content: None,
            turn_complete: false,
        }];

        let request = ChatCompletionRequest {
            model: String::new(),
            messages: vec![
                ChatMessage::system(delegate.instruction),
                ChatMessage::user(message),
            ],
            temperature: None,
            max_tokens: None,
        };

        let response = tokio::time::timeout(
            self.timeout,
            self.llm_client.create_chat_completion(request),
        )
        .await
        .map_err(|_| {
            warn!(
                "Agent call timed out after {:?} for session {}",
                self.timeout, session_id
            );
            Error::no_response(format!("agent call timed out after {:?}", self.timeout))
        })??;

        let parts: Vec<Part> = response
            .choices
            .iter()
            .map(|choice| Part {
                text: Some(choice.message.content.clone()),
            })
            .collect();

        events.push(AgentEvent {
            author: delegate.name.to_string(),
            content: Some(EventContent { parts }),
            turn_complete: true,
        });

        Ok(events)
    }

    /// Generates study materials: builds the instruction for `kind`, runs the
    /// turn, and returns the text of the last final response event. Fails
    /// with `NoResponse` when the pipeline completes without a usable reply.
    pub async fn generate(
        &self,
        content: &str,
        kind: MaterialKind,
        session_id: &str,
        num_items: u32,
    ) -> Result<String> {
        let message = kind.instruction(num_items, content);
        info!(
            "Generating {} ({} items) for session {}",
            kind, num_items, session_id
        );

        let events = self.run_turn(session_id, kind, &message).await?;

        let mut final_event = None;
        for event in events {
            if event.is_final_response() {
                final_event = Some(event);
            }
        }

        let Some(event) = final_event else {
            return Err(Error::no_response("no final response event from agent"));
        };

        let response_text = event.text();
        if response_text.is_empty() {
            return Err(Error::no_response("final response event had no content"));
        }

        debug!(
            "Agent {} produced {} chars of response text",
            event.author,
            response_text.len()
        );
        Ok(response_text)
    }
}
