use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use indexmap::IndexMap;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument, warn};

// =============================================================================
// 1. THE ABSTRACTION (Traits with Hooks, Params, and Actions)
// =============================================================================

/// Trait that any domain entity must implement to be managed by [`ResourceActor`].
pub trait Entity: Clone + Send + Sync + 'static {
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;
    type CreateParams: Send + Debug;
    type Patch: Send + Debug;
    type Action: Send + Debug;
    type ActionResult: Send + Debug;
    type Error: std::error::Error + Clone + Send + Sync + 'static;

    /// Get the ID of the entity
    fn id(&self) -> &Self::Id;

    /// Construct the full Entity from the ID and creation params
    fn from_create_params(id: Self::Id, params: Self::CreateParams) -> Result<Self, Self::Error>;

    // --- Lifecycle Hooks ---

    fn on_create(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
    fn on_update(&mut self, patch: Self::Patch) -> Result<(), Self::Error>;

    // --- Action Handler ---

    /// Handle a custom domain-specific action.
    ///
    /// The actor runs this against a working copy and only stores the copy
    /// when it returns `Ok`, so an implementation may bail out halfway.
    fn handle_action(&mut self, action: Self::Action) -> Result<Self::ActionResult, Self::Error>;
}

/// Errors surfaced by the generic actor layer.
///
/// `Entity` wraps the domain error returned by a hook; the remaining variants
/// come from the actor itself or from the channel between client and actor.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FrameworkError<E> {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("{0}")]
    Entity(E),
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped")]
    ActorDropped,
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T, E> = oneshot::Sender<Result<T, FrameworkError<E>>>;

#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    Create {
        params: T::CreateParams,
        respond_to: Response<T::Id, T::Error>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>, T::Error>,
    },
    List {
        respond_to: Response<Vec<T>, T::Error>,
    },
    Update {
        id: T::Id,
        patch: T::Patch,
        respond_to: Response<T, T::Error>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult, T::Error>,
    },
    Shutdown,
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

/// Owns a keyed collection of entities and serves requests one at a time.
///
/// Entities are kept in insertion order; `List` returns them in that order.
pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: IndexMap<T::Id, T>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
}

impl<T: Entity> ResourceActor<T> {
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: IndexMap::new(),
            next_id_fn: Box::new(next_id_fn),
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    #[instrument(name = "resource_actor", skip(self), fields(entity = std::any::type_name::<T>()))]
    pub async fn run(mut self) {
        info!("ResourceActor starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    let _ = respond_to.send(self.handle_create(params));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { respond_to } => {
                    let items = self.store.values().cloned().collect();
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Update { id, patch, respond_to } => {
                    let _ = respond_to.send(self.handle_update(id, patch));
                }
                ResourceRequest::Action { id, action, respond_to } => {
                    let _ = respond_to.send(self.handle_action(id, action));
                }
                ResourceRequest::Shutdown => {
                    info!("ResourceActor shutting down");
                    break;
                }
            }
        }

        info!(stored = self.store.len(), "ResourceActor stopped");
    }

    fn handle_create(&mut self, params: T::CreateParams) -> Result<T::Id, FrameworkError<T::Error>> {
        let id = (self.next_id_fn)();
        let mut item = T::from_create_params(id.clone(), params).map_err(FrameworkError::Entity)?;
        item.on_create().map_err(FrameworkError::Entity)?;
        debug!(id = %id, "Entity created");
        self.store.insert(id.clone(), item);
        Ok(id)
    }

    fn handle_update(&mut self, id: T::Id, patch: T::Patch) -> Result<T, FrameworkError<T::Error>> {
        let item = self
            .store
            .get_mut(&id)
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;
        let mut draft = item.clone();
        draft.on_update(patch).map_err(FrameworkError::Entity)?;
        *item = draft;
        Ok(item.clone())
    }

    fn handle_action(
        &mut self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, FrameworkError<T::Error>> {
        let Some(item) = self.store.get_mut(&id) else {
            debug!(id = %id, "Action on unknown entity");
            return Err(FrameworkError::NotFound(id.to_string()));
        };
        let mut draft = item.clone();
        match draft.handle_action(action) {
            Ok(result) => {
                *item = draft;
                Ok(result)
            }
            Err(e) => {
                warn!(id = %id, error = %e, "Action rejected");
                Err(FrameworkError::Entity(e))
            }
        }
    }
}

/// Id generator producing `"{prefix}1"`, `"{prefix}2"`, ...
pub fn sequential_ids(prefix: &'static str) -> impl Fn() -> String + Send + Sync + 'static {
    let counter = Arc::new(AtomicU64::new(1));
    move || {
        let id = counter.fetch_add(1, Ordering::SeqCst);
        format!("{prefix}{id}")
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

// Manual impl: a derive would require `T: Clone` bounds on every associated type.
impl<T: Entity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: Entity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R, T::Error>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError<T::Error>> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn create(&self, params: T::CreateParams) -> Result<T::Id, FrameworkError<T::Error>> {
        self.request(|respond_to| ResourceRequest::Create { params, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError<T::Error>> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to })
            .await
    }

    pub async fn list(&self) -> Result<Vec<T>, FrameworkError<T::Error>> {
        self.request(|respond_to| ResourceRequest::List { respond_to })
            .await
    }

    pub async fn update(&self, id: T::Id, patch: T::Patch) -> Result<T, FrameworkError<T::Error>> {
        self.request(|respond_to| ResourceRequest::Update { id, patch, respond_to })
            .await
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, FrameworkError<T::Error>> {
        self.request(|respond_to| ResourceRequest::Action { id, action, respond_to })
            .await
    }

    pub async fn shutdown(&self) -> Result<(), FrameworkError<T::Error>> {
        self.sender
            .send(ResourceRequest::Shutdown)
            .await
            .map_err(|_| FrameworkError::ActorClosed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Error)]
    #[error("tally overflow at {0}")]
    struct TallyError(u32);

    #[derive(Clone, Debug, PartialEq)]
    struct Tally {
        id: String,
        label: String,
        count: u32,
        history: Vec<u32>,
    }

    #[derive(Debug)]
    enum TallyAction {
        /// Bumps the count, recording each step; fails when passing `limit`.
        BumpBy { steps: u32, limit: u32 },
    }

    impl Entity for Tally {
        type Id = String;
        type CreateParams = String;
        type Patch = String;
        type Action = TallyAction;
        type ActionResult = u32;
        type Error = TallyError;

        fn id(&self) -> &String {
            &self.id
        }

        fn from_create_params(id: String, label: String) -> Result<Self, TallyError> {
            Ok(Self { id, label, count: 0, history: Vec::new() })
        }

        fn on_update(&mut self, label: String) -> Result<(), TallyError> {
            self.label = label;
            Ok(())
        }

        fn handle_action(&mut self, action: TallyAction) -> Result<u32, TallyError> {
            match action {
                TallyAction::BumpBy { steps, limit } => {
                    for _ in 0..steps {
                        self.count += 1;
                        self.history.push(self.count);
                        if self.count > limit {
                            return Err(TallyError(self.count));
                        }
                    }
                    Ok(self.count)
                }
            }
        }
    }

    fn start() -> ResourceClient<Tally> {
        let (actor, client) = ResourceActor::new(8, sequential_ids("tally-"));
        tokio::spawn(actor.run());
        client
    }

    #[tokio::test]
    async fn test_list_preserves_insertion_order() {
        let client = start();
        for label in ["zeta", "alpha", "mid"] {
            client.create(label.to_string()).await.unwrap();
        }

        let labels: Vec<String> = client.list().await.unwrap().into_iter().map(|t| t.label).collect();
        assert_eq!(labels, vec!["zeta", "alpha", "mid"]);

        let ids: Vec<String> = client.list().await.unwrap().iter().map(|t| t.id().clone()).collect();
        assert_eq!(ids, vec!["tally-1", "tally-2", "tally-3"]);
    }

    #[tokio::test]
    async fn test_failed_action_leaves_entity_untouched() {
        let client = start();
        let id = client.create("t".to_string()).await.unwrap();

        assert_eq!(client.perform_action(id.clone(), TallyAction::BumpBy { steps: 2, limit: 5 }).await, Ok(2));

        let err = client
            .perform_action(id.clone(), TallyAction::BumpBy { steps: 10, limit: 5 })
            .await
            .unwrap_err();
        assert_eq!(err, FrameworkError::Entity(TallyError(6)));

        let tally = client.get(id).await.unwrap().unwrap();
        assert_eq!(tally.count, 2);
        assert_eq!(tally.history, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_unknown_ids_report_not_found() {
        let client = start();

        assert_eq!(client.get("nope".to_string()).await, Ok(None));
        assert_eq!(
            client.update("nope".to_string(), "x".to_string()).await,
            Err(FrameworkError::NotFound("nope".to_string()))
        );
        assert_eq!(
            client
                .perform_action("nope".to_string(), TallyAction::BumpBy { steps: 1, limit: 1 })
                .await,
            Err(FrameworkError::NotFound("nope".to_string()))
        );
    }

    #[tokio::test]
    async fn test_shutdown_closes_actor() {
        let (actor, client) = ResourceActor::<Tally>::new(8, sequential_ids("tally-"));
        let handle = tokio::spawn(actor.run());

        client.shutdown().await.unwrap();
        handle.await.unwrap();

        assert_eq!(client.list().await, Err(FrameworkError::ActorClosed));
    }
}
