use std::sync::Arc;

use axum::extract::Path;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use taskly_auth::{AuthOptions, AuthSession, IdentityClient, InitOptions};
use taskly_client::{ClientOptions, ContextError, QueryCache, TaskApi, TenantStore};
use taskly_core::{QueryKey, TasklyConfig, TenantId};

struct StaticIdentity {
    authenticated: bool,
}

#[async_trait::async_trait]
impl IdentityClient for StaticIdentity {
    async fn check_sso(&self, _options: &InitOptions) -> anyhow::Result<bool> {
        Ok(self.authenticated)
    }

    async fn end_session(&self, _origin: &str) -> anyhow::Result<()> {
        Ok(())
    }
}

async fn session(authenticated: bool) -> AuthSession {
    let options = AuthOptions::from_config(&TasklyConfig::test_defaults().snapshot());
    let session = AuthSession::new(options, Arc::new(StaticIdentity { authenticated }));
    session.init(InitOptions::default()).await.unwrap();
    session
}

async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn tenant_json(id: &str, slug: &str) -> Value {
    json!({
        "id": id,
        "name": slug.to_uppercase(),
        "slug": slug,
        "plan": "free",
        "userRole": "owner",
    })
}

fn tenants_router() -> Router {
    Router::new()
        .route(
            "/tenants",
            get(|| async { Json(json!([tenant_json("1", "a"), tenant_json("2", "b")])) }),
        )
        .route(
            "/tenants/{tenant}/tasks",
            get(|Path(tenant): Path<String>| async move {
                Json(json!([{
                    "id": format!("{tenant}-task"),
                    "title": "something",
                    "completed": false,
                    "createdAt": "2026-05-01T12:00:00Z",
                }]))
            }),
        )
}

async fn loaded_store(hostname: &str) -> (TenantStore, TaskApi) {
    let cache = Arc::new(QueryCache::new());
    let api = TaskApi::new(ClientOptions::new(spawn(tenants_router()).await))
        .with_cache(Arc::clone(&cache));
    let store = TenantStore::new(cache);
    store.load(&session(true).await, &api, hostname).await;
    (store, api)
}

#[tokio::test]
async fn resolved_subdomain_selects_the_matching_tenant() {
    let (store, _api) = loaded_store("b.tasks.example.test").await;
    assert_eq!(store.current_tenant().unwrap().slug, "b");
}

#[tokio::test]
async fn unmatched_subdomain_falls_back_to_the_first_tenant() {
    let (store, _api) = loaded_store("z.tasks.example.test").await;
    assert_eq!(store.current_tenant().unwrap().slug, "a");
}

#[tokio::test]
async fn bare_hostname_falls_back_to_the_first_tenant() {
    let (store, _api) = loaded_store("localhost").await;
    assert_eq!(store.current_tenant().unwrap().slug, "a");
}

#[tokio::test]
async fn unauthenticated_sessions_never_touch_the_network() {
    // Nothing listens here; the calls must short-circuit before any
    // request is issued.
    let api = TaskApi::new(ClientOptions::new("http://127.0.0.1:9"));
    let store = TenantStore::new(api.cache());
    let session = session(false).await;

    store.load(&session, &api, "a.tasks.example.test").await;
    let snapshot = store.snapshot();
    assert!(!snapshot.loading);
    assert!(snapshot.tenants.is_empty());
    assert!(snapshot.current.is_none());

    let tasks = api
        .find_or_empty(&session, &TenantId::new("1"))
        .await
        .unwrap();
    assert!(tasks.is_empty());
}

#[tokio::test]
async fn tenant_fetch_failure_finishes_loading_with_last_known_state() {
    let router = Router::new().route(
        "/tenants",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let api = TaskApi::new(ClientOptions::new(spawn(router).await));
    let store = TenantStore::new(api.cache());

    store
        .load(&session(true).await, &api, "a.tasks.example.test")
        .await;

    let snapshot = store.snapshot();
    assert!(!snapshot.loading);
    assert!(snapshot.tenants.is_empty());
    let err = store.current_tenant().unwrap_err();
    assert_eq!(
        err.downcast_ref::<ContextError>(),
        Some(&ContextError::NoCurrentTenant)
    );
}

#[tokio::test]
async fn switching_tenants_drops_the_prior_tenants_cached_reads() {
    let (store, api) = loaded_store("a.tasks.example.test").await;
    let prior = store.current_tenant().unwrap();

    let tasks = api.find(&prior.id).await.unwrap();
    assert_eq!(tasks[0].id, "1-task");
    assert!(api.cache().get(&QueryKey::task_list(&prior.id)).is_some());

    store.switch_tenant("b");
    let current = store.current_tenant().unwrap();
    assert_eq!(current.slug, "b");
    assert!(api.cache().get(&QueryKey::task_list(&prior.id)).is_none());
}

#[tokio::test]
async fn switching_to_an_unknown_slug_changes_nothing() {
    let (store, api) = loaded_store("a.tasks.example.test").await;
    let prior = store.current_tenant().unwrap();
    api.find(&prior.id).await.unwrap();

    store.switch_tenant("nonexistent");

    assert_eq!(store.current_tenant().unwrap().slug, "a");
    assert!(api.cache().get(&QueryKey::task_list(&prior.id)).is_some());
}
