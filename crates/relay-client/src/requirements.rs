//! Requirement endpoints.

use relay_core::dispatch::DispatchRequest;
use relay_core::entities::{Requirement, Task, validate_git_repos};
use relay_core::window::DateWindow;

use crate::{BackendClient, error::ClientError, segment};

impl BackendClient {
    /// `GET /requirements?spaceId&startDate&endDate`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails after retries or the
    /// response cannot be parsed.
    pub async fn list_requirements(
        &self,
        space_id: &str,
        window: Option<&DateWindow>,
    ) -> Result<Vec<Requirement>, ClientError> {
        let start;
        let end;
        let mut query = vec![("spaceId", space_id)];
        if let Some(window) = window {
            start = window.start.to_string();
            end = window.end.to_string();
            query.push(("startDate", start.as_str()));
            query.push(("endDate", end.as_str()));
        }
        self.get_json("/requirements", &query, "requirements").await
    }

    /// Requirements still pending for `user_id`
    /// (`GET /tasks/pending-requirements/list`).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails after retries or the
    /// response cannot be parsed.
    pub async fn list_pending_requirements(
        &self,
        space_id: &str,
        user_id: &str,
    ) -> Result<Vec<Requirement>, ClientError> {
        self.get_json(
            "/tasks/pending-requirements/list",
            &[("spaceId", space_id), ("userId", user_id)],
            "pending requirements",
        )
        .await
    }

    /// Dispatch `requirement_id` for `request.user_id`.
    ///
    /// Git repos are validated before anything is sent. The request carries
    /// an `Idempotency-Key` of `dispatch:{requirementId}:{userId}` and is
    /// never retried automatically.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Core`] for invalid repos, and the mapped HTTP
    /// error otherwise (an already-dispatched assignee comes back as a
    /// validation error).
    pub async fn dispatch(
        &self,
        requirement_id: &str,
        request: &DispatchRequest,
    ) -> Result<Task, ClientError> {
        validate_git_repos(&request.git_repos)?;
        let key = request.idempotency_key(requirement_id);
        self.post_json(
            &format!("/requirements/{}/dispatch", segment(requirement_id)),
            request,
            Some(&key),
            &format!("requirement {requirement_id}"),
        )
        .await
    }
}
