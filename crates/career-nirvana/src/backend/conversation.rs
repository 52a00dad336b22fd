use super::{AiAnswer, AskRequest, BackendError, CareerBackend, ChatMessage, UserId};
use tracing::info;

/// Canned prompts offered in the ask dialog.
pub const SUGGESTED_QUESTIONS: [&str; 3] = [
    "What skills do I need to get started in this career?",
    "What is the typical career progression path?",
    "What are the challenges and rewards of this career?",
];

/// Chat history about one career. The backend is stateless, so every turn replays it.
#[derive(Debug, Clone)]
pub struct Conversation {
    job_id: String,
    history: Vec<ChatMessage>,
}

impl Conversation {
    pub fn new(job_id: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
            history: Vec::new(),
        }
    }

    /// Continues a conversation whose history the caller kept.
    pub fn resume(job_id: impl Into<String>, history: Vec<ChatMessage>) -> Self {
        Self {
            job_id: job_id.into(),
            history,
        }
    }

    pub fn into_history(self) -> Vec<ChatMessage> {
        self.history
    }

    pub fn job_id(&self) -> &str {
        &self.job_id
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    /// Sends `question` with the accumulated history. Blank questions are ignored and yield
    /// `Ok(None)`. A failed turn leaves the history as it was before the call.
    pub async fn ask<B>(
        &mut self,
        backend: &B,
        question: &str,
        user_id: Option<&UserId>,
    ) -> Result<Option<AiAnswer>, BackendError>
    where
        B: CareerBackend + ?Sized,
    {
        let question = question.trim();
        if question.is_empty() {
            return Ok(None);
        }

        self.history.push(ChatMessage::user(question));
        let request = AskRequest {
            job_id: self.job_id.clone(),
            question: Some(question.to_string()),
            history: self.history.clone(),
            user_id: user_id.cloned(),
        };

        match backend.ask_ai(request).await {
            Ok(answer) => {
                self.history
                    .push(ChatMessage::assistant(answer.response.clone()));
                info!(job_id = %self.job_id, turns = self.history.len(), "career question answered");
                Ok(Some(answer))
            }
            Err(err) => {
                self.history.pop();
                Err(err)
            }
        }
    }
}
