//! Task endpoints.

use relay_core::entities::{NewTask, Task};
use relay_core::poll::PollStep;

use crate::{BackendClient, error::ClientError, segment};

impl BackendClient {
    /// `GET /tasks?spaceId`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails after retries or the
    /// response cannot be parsed.
    pub async fn list_tasks(&self, space_id: &str) -> Result<Vec<Task>, ClientError> {
        self.get_json("/tasks", &[("spaceId", space_id)], "tasks").await
    }

    /// `GET /tasks/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] for an unknown task.
    pub async fn get_task(&self, task_id: &str) -> Result<Task, ClientError> {
        self.get_json(
            &format!("/tasks/{}", segment(task_id)),
            &[],
            &format!("task {task_id}"),
        )
        .await
    }

    /// Submit a freestanding task (`POST /tasks`).
    ///
    /// The submission is validated locally first, and the title is filled in
    /// from the description when absent. `idempotency_key` should stay the
    /// same when the caller re-sends the same form.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Core`] if validation fails; no request is sent
    /// in that case.
    pub async fn create_task(
        &self,
        submission: &NewTask,
        idempotency_key: &str,
    ) -> Result<Task, ClientError> {
        submission.validate()?;
        let body = NewTask {
            title: Some(submission.effective_title()),
            ..submission.clone()
        };
        self.post_json("/tasks", &body, Some(idempotency_key), "tasks")
            .await
    }

    /// Confirm a `pending_confirm` task (`POST /tasks/{id}/confirm`).
    ///
    /// # Errors
    ///
    /// Returns the mapped HTTP error; confirming a task in any other state
    /// comes back as a validation error.
    pub async fn confirm_task(&self, task_id: &str) -> Result<Task, ClientError> {
        let key = format!("confirm:{task_id}");
        self.post_json(
            &format!("/tasks/{}/confirm", segment(task_id)),
            &serde_json::json!({}),
            Some(&key),
            &format!("task {task_id}"),
        )
        .await
    }

    /// Poll until the agent finishes (`pending_confirm` or `completed`).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::PollExhausted`] when the task is still running
    /// after the configured number of checks.
    pub async fn wait_for_task(&self, task_id: &str) -> Result<Task, ClientError> {
        self.poll_until(&format!("task {task_id}"), || async move {
            let task = self.get_task(task_id).await?;
            Ok(if task.status.has_report() {
                PollStep::Ready(task)
            } else {
                PollStep::Pending
            })
        })
        .await
    }
}
