//! Task writes: create, patch, remove.
//!
//! Writes branch on the HTTP status first: a successful delete has no
//! body and a successful update's body differs from the error bodies, so
//! body-shape sniffing is reserved for telling the two failure encodings
//! apart once a non-success status is already known.

use anyhow::Result;
use reqwest::StatusCode;
use taskly_core::errors::{failure_from_bytes, CreateBody};
use taskly_core::{QueryKey, Task, TaskCreate, TaskPatch, TenantId};

use crate::api::TaskApi;

impl TaskApi {
    /// Create a task in the tenant's collection.
    ///
    /// The body is inspected for the `success`-discriminated validation
    /// shape only, formatted and raised on match; otherwise it is the
    /// created task. On success the tenant's list key is invalidated.
    pub async fn create(&self, tenant: &TenantId, data: TaskCreate) -> Result<Task> {
        if let Some(delay) = self.options().create_delay {
            tokio::time::sleep(delay).await;
        }
        let body = self
            .http()
            .post(self.tasks_url(tenant))
            .json(&data)
            .send()
            .await?
            .json::<CreateBody<Task>>()
            .await?;
        let task = body.into_result()?;
        self.cache().invalidate(&QueryKey::task_list(tenant));
        Ok(task)
    }

    /// Partially update a task. Success is status 200 alone; any other
    /// status raises the body's `message` verbatim or, failing that, the
    /// formatter's output.
    pub async fn patch(&self, tenant: &TenantId, id: &str, data: TaskPatch) -> Result<Task> {
        let response = self
            .http()
            .patch(self.task_url(tenant, id))
            .json(&data)
            .send()
            .await?;
        if response.status() != StatusCode::OK {
            let bytes = response.bytes().await?;
            return Err(failure_from_bytes(&bytes).into());
        }
        let task = response.json::<Task>().await?;
        self.cache().invalidate(&QueryKey::task_list(tenant));
        self.cache().invalidate(&QueryKey::task(tenant, id));
        Ok(task)
    }

    /// Delete a task. Success is status 204 with no body; any other
    /// status goes through the same two-shape failure inspection as
    /// patch.
    pub async fn remove(&self, tenant: &TenantId, id: &str) -> Result<()> {
        let response = self.http().delete(self.task_url(tenant, id)).send().await?;
        if response.status() != StatusCode::NO_CONTENT {
            let bytes = response.bytes().await?;
            return Err(failure_from_bytes(&bytes).into());
        }
        self.cache().invalidate(&QueryKey::task_list(tenant));
        self.cache().invalidate(&QueryKey::task(tenant, id));
        Ok(())
    }
}
