use crate::{
    api::{ApiClient, ApiError},
    model::Resource,
};
use std::rc::Rc;
use yew::{Callback, Reducible};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Fetch,
    Create,
    Update,
    Delete,
    DeleteMany,
}

impl Operation {
    /// Shown when the server gives no usable message.
    pub fn fallback(self) -> &'static str {
        match self {
            Operation::Fetch => "Erreur chargement",
            Operation::Create => "Erreur création",
            Operation::Update => "Erreur mise à jour",
            Operation::Delete => "Erreur suppression",
            Operation::DeleteMany => "Erreur suppression multiple",
        }
    }
}

/// Last fetched list of one entity.
#[derive(Debug, PartialEq)]
pub struct ResourceState<R> {
    pub items: Vec<R>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<R> Default for ResourceState<R> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum ResourceAction<R> {
    FetchStarted,
    Fetched(Vec<R>),
    Created(R),
    Updated(R),
    Deleted(i64),
    DeletedMany(Vec<i64>),
    Failed(Operation, String),
    ClearError,
}

impl<R> ResourceAction<R> {
    pub fn failed(operation: Operation, err: &ApiError) -> Self {
        ResourceAction::Failed(operation, err.message_or(operation.fallback()))
    }
}

impl<R: Resource> Reducible for ResourceState<R> {
    type Action = ResourceAction<R>;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut items = self.items.clone();
        let mut loading = self.loading;
        let mut error = self.error.clone();
        match action {
            ResourceAction::FetchStarted => {
                loading = true;
                error = None;
            }
            ResourceAction::Fetched(fetched) => {
                items = fetched;
                loading = false;
            }
            ResourceAction::Created(item) => items.insert(0, item),
            ResourceAction::Updated(item) => {
                if let Some(slot) = items.iter_mut().find(|slot| slot.id() == item.id()) {
                    *slot = item;
                }
            }
            ResourceAction::Deleted(id) => items.retain(|item| item.id() != id),
            ResourceAction::DeletedMany(ids) => items.retain(|item| !ids.contains(&item.id())),
            ResourceAction::Failed(operation, message) => {
                if operation == Operation::Fetch {
                    loading = false;
                }
                error = Some(message);
            }
            ResourceAction::ClearError => error = None,
        }
        Self {
            items,
            loading,
            error,
        }
        .into()
    }
}

pub async fn fetch_all<R: Resource>(api: &ApiClient, dispatch: &Callback<ResourceAction<R>>) {
    dispatch.emit(ResourceAction::FetchStarted);
    match api.list::<R>().await {
        Ok(items) => dispatch.emit(ResourceAction::Fetched(items)),
        Err(err) => {
            log::error!("Cannot list {} - {err:?}", R::ENDPOINT);
            dispatch.emit(ResourceAction::failed(Operation::Fetch, &err));
        }
    }
}

/// On failure the error message is returned as well, so a dialog can stay open.
pub async fn create<R: Resource>(
    api: &ApiClient,
    dispatch: &Callback<ResourceAction<R>>,
    payload: &R::Payload,
) -> Result<(), String> {
    match api.create::<R>(payload).await {
        Ok(created) => {
            dispatch.emit(ResourceAction::Created(created));
            Ok(())
        }
        Err(err) => Err(fail(dispatch, Operation::Create, &err)),
    }
}

pub async fn update<R: Resource>(
    api: &ApiClient,
    dispatch: &Callback<ResourceAction<R>>,
    id: i64,
    payload: &R::Payload,
) -> Result<(), String> {
    match api.update::<R>(id, payload).await {
        Ok(updated) => {
            dispatch.emit(ResourceAction::Updated(updated));
            Ok(())
        }
        Err(err) => Err(fail(dispatch, Operation::Update, &err)),
    }
}

pub async fn delete<R: Resource>(
    api: &ApiClient,
    dispatch: &Callback<ResourceAction<R>>,
    id: i64,
) -> Result<(), String> {
    match api.delete::<R>(id).await {
        Ok(()) => {
            dispatch.emit(ResourceAction::Deleted(id));
            Ok(())
        }
        Err(err) => Err(fail(dispatch, Operation::Delete, &err)),
    }
}

/// Some deletions may have gone through before the failure, so the list is fetched again.
pub async fn delete_many<R: Resource>(
    api: &ApiClient,
    dispatch: &Callback<ResourceAction<R>>,
    ids: Vec<i64>,
) -> Result<(), String> {
    match api.delete_many::<R>(&ids).await {
        Ok(()) => {
            dispatch.emit(ResourceAction::DeletedMany(ids));
            Ok(())
        }
        Err(err) => {
            fetch_all(api, dispatch).await;
            Err(fail(dispatch, Operation::DeleteMany, &err))
        }
    }
}

fn fail<R: Resource>(
    dispatch: &Callback<ResourceAction<R>>,
    operation: Operation,
    err: &ApiError,
) -> String {
    log::error!("{operation:?} on {} failed - {err:?}", R::ENDPOINT);
    let message = err.message_or(operation.fallback());
    dispatch.emit(ResourceAction::Failed(operation, message.clone()));
    message
}
