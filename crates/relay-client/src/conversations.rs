//! Conversation (execution log) endpoints.

use relay_core::entities::{ConversationTurn, NewTurn};
use relay_core::log::ConversationLog;

use crate::{BackendClient, error::ClientError, segment};

impl BackendClient {
    /// `GET /tasks/{id}/conversations`, in backend order.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails after retries or the
    /// response cannot be parsed.
    pub async fn list_conversations(
        &self,
        task_id: &str,
    ) -> Result<Vec<ConversationTurn>, ClientError> {
        self.get_json(
            &format!("/tasks/{}/conversations", segment(task_id)),
            &[],
            &format!("conversations of task {task_id}"),
        )
        .await
    }

    /// Fetch the turns and check they form a valid log.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Core`] when the backend returns turns out of
    /// order or belonging to another task.
    pub async fn load_log(&self, task_id: &str) -> Result<ConversationLog, ClientError> {
        let turns = self.list_conversations(task_id).await?;
        Ok(ConversationLog::from_turns(task_id, turns)?)
    }

    /// Append a turn (`POST /tasks/{id}/conversations`).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Core`] if the structured payload is invalid
    /// (e.g. `progress.current > total`); nothing is sent in that case.
    pub async fn append_conversation(
        &self,
        task_id: &str,
        turn: &NewTurn,
    ) -> Result<ConversationTurn, ClientError> {
        if let Some(content) = &turn.structured_content {
            content.validate()?;
        }
        self.post_json(
            &format!("/tasks/{}/conversations", segment(task_id)),
            turn,
            None,
            &format!("task {task_id}"),
        )
        .await
    }
}
