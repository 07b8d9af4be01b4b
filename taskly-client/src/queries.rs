//! Task reads: collection and item lookups, keyed per tenant.

use anyhow::Result;
use taskly_auth::AuthSession;
use taskly_core::errors::ApiBody;
use taskly_core::{QueryKey, Task, TenantId};

use crate::api::TaskApi;

impl TaskApi {
    /// List the tenant's tasks.
    ///
    /// The body is taken verbatim as the task collection; anything else
    /// is a transport-level failure and propagates unmodified.
    pub async fn find(&self, tenant: &TenantId) -> Result<Vec<Task>> {
        let tasks = self
            .http()
            .get(self.tasks_url(tenant))
            .send()
            .await?
            .json::<Vec<Task>>()
            .await?;
        self.cache()
            .insert(QueryKey::task_list(tenant), serde_json::to_value(&tasks)?);
        Ok(tasks)
    }

    /// List the tenant's tasks, degrading to an empty collection while
    /// the session is unauthenticated. No request is issued in that case.
    pub async fn find_or_empty(
        &self,
        session: &AuthSession,
        tenant: &TenantId,
    ) -> Result<Vec<Task>> {
        if !session.is_authenticated() {
            return Ok(Vec::new());
        }
        self.find(tenant).await
    }

    /// Fetch one task.
    ///
    /// This route reports failures in-band, so the body is decoded as the
    /// failure/success union before being trusted as a task: a `message`
    /// body is raised verbatim, a `success`-discriminated body goes
    /// through the formatter, and only a body lacking both discriminators
    /// is returned (and cached) as the task.
    pub async fn get(&self, tenant: &TenantId, id: &str) -> Result<Task> {
        let body = self
            .http()
            .get(self.task_url(tenant, id))
            .send()
            .await?
            .json::<ApiBody<Task>>()
            .await?;
        let task = body.into_result()?;
        self.cache()
            .insert(QueryKey::task(tenant, id), serde_json::to_value(&task)?);
        Ok(task)
    }
}
