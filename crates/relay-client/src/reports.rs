//! Delivery report endpoints.

use relay_core::entities::DeliveryReport;
use relay_core::poll::PollStep;
use relay_core::report::{CostRate, ReportAvailability, aggregate};

use crate::{BackendClient, error::ClientError, segment};

impl BackendClient {
    /// `GET /tasks/{id}/report`. A 404 means "not yet available" and is
    /// returned as `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] for any failure other than 404.
    pub async fn get_report(&self, task_id: &str) -> Result<Option<DeliveryReport>, ClientError> {
        match self
            .get_json(
                &format!("/tasks/{}/report", segment(task_id)),
                &[],
                &format!("report for task {task_id}"),
            )
            .await
        {
            Ok(report) => Ok(Some(report)),
            Err(ClientError::NotFound { .. }) => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Fetch the task and its report, and build the report view.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if either request fails.
    pub async fn report_availability(
        &self,
        task_id: &str,
        rate: &CostRate,
    ) -> Result<ReportAvailability, ClientError> {
        let task = self.get_task(task_id).await?;
        if !task.status.has_report() {
            return Ok(aggregate(task.status, None, rate));
        }
        let report = self.get_report(task_id).await?;
        Ok(aggregate(task.status, report.as_ref(), rate))
    }

    /// Poll until the report exists.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::PollExhausted`] when the report is still
    /// missing after the configured number of checks.
    pub async fn wait_for_report(&self, task_id: &str) -> Result<DeliveryReport, ClientError> {
        self.poll_until(&format!("report for task {task_id}"), || async move {
            Ok(match self.get_report(task_id).await? {
                Some(report) => PollStep::Ready(report),
                None => PollStep::Pending,
            })
        })
        .await
    }
}
