use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::{Serialize, de::DeserializeOwned};

use crate::{
    api::ApiClient,
    error::{AppError, AppResult},
    services::confirm::Approval,
};

/// One REST collection the client mirrors, e.g. `/api/products`.
pub trait Resource: DeserializeOwned + Clone + Send + Sync + 'static {
    /// Body sent on POST.
    type Create: Serialize + Send + Sync;
    /// Body sent on PUT. Fields left out must keep their server-side values.
    type Update: Serialize + Send + Sync;

    /// Path segment under the API root.
    const COLLECTION: &'static str;
    /// Singular noun used in user-facing messages.
    const NOUN: &'static str;

    fn id(&self) -> i64;
}

/// The `{list, create, update, remove}` surface a form or screen talks to.
#[async_trait]
pub trait Collection<R: Resource>: Send + Sync {
    async fn list(&self) -> AppResult<Arc<Vec<R>>>;
    async fn create(&self, payload: &R::Create) -> AppResult<()>;
    async fn update(&self, id: i64, payload: &R::Update) -> AppResult<()>;
    async fn remove(&self, id: i64, approval: Approval) -> AppResult<()>;
}

struct Snapshot<R> {
    // Sequence number of the list() call that produced `items`.
    seq: u64,
    items: Arc<Vec<R>>,
}

/// Client-side mirror of one collection.
///
/// The snapshot is only ever the verbatim body of the latest successful GET.
/// Every successful write is followed by a full reload; nothing is patched
/// locally.
pub struct EntityStore<R: Resource> {
    api: ApiClient,
    snapshot: RwLock<Snapshot<R>>,
    next_seq: AtomicU64,
}

impl<R: Resource> EntityStore<R> {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            snapshot: RwLock::new(Snapshot {
                seq: 0,
                items: Arc::new(Vec::new()),
            }),
            next_seq: AtomicU64::new(1),
        }
    }

    /// Last known snapshot. Never performs I/O.
    pub fn snapshot(&self) -> Arc<Vec<R>> {
        Arc::clone(&self.snapshot.read().items)
    }

    pub fn find(&self, id: i64) -> Option<R> {
        self.snapshot.read().items.iter().find(|e| e.id() == id).cloned()
    }

    fn item_path(id: i64) -> String {
        format!("{}/{}", R::COLLECTION, id)
    }

    fn mutation_error(verb: &str) -> AppError {
        AppError::Mutation(format!("Failed to {verb} {}", R::NOUN))
    }

    async fn fetch(&self) -> AppResult<Arc<Vec<R>>> {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        let items: Vec<R> = self.api.get_json(R::COLLECTION).await.map_err(|err| {
            tracing::warn!(collection = R::COLLECTION, error = %err, "load failed");
            AppError::Load(format!("Failed to load {}", R::COLLECTION))
        })?;
        let items = Arc::new(items);

        let mut guard = self.snapshot.write();
        // A slower, older read must not clobber a newer one.
        if seq > guard.seq {
            guard.seq = seq;
            guard.items = Arc::clone(&items);
            tracing::debug!(collection = R::COLLECTION, count = items.len(), "snapshot replaced");
        }
        Ok(Arc::clone(&guard.items))
    }
}

#[async_trait]
impl<R: Resource> Collection<R> for EntityStore<R> {
    async fn list(&self) -> AppResult<Arc<Vec<R>>> {
        self.fetch().await
    }

    async fn create(&self, payload: &R::Create) -> AppResult<()> {
        if let Err(err) = self.api.post_json(R::COLLECTION, payload).await {
            tracing::warn!(collection = R::COLLECTION, error = %err, "create failed");
            return Err(Self::mutation_error("save"));
        }
        self.fetch().await.map(|_| ())
    }

    async fn update(&self, id: i64, payload: &R::Update) -> AppResult<()> {
        if let Err(err) = self.api.put_json(&Self::item_path(id), payload).await {
            tracing::warn!(collection = R::COLLECTION, id, error = %err, "update failed");
            return Err(Self::mutation_error("save"));
        }
        self.fetch().await.map(|_| ())
    }

    async fn remove(&self, id: i64, _approval: Approval) -> AppResult<()> {
        if let Err(err) = self.api.delete(&Self::item_path(id)).await {
            tracing::warn!(collection = R::COLLECTION, id, error = %err, "delete failed");
            return Err(Self::mutation_error("delete"));
        }
        self.fetch().await.map(|_| ())
    }
}
