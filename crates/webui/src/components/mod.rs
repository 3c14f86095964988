pub mod commune_picker;
pub mod crud_page;
pub mod dashboard_page;
pub mod data_table;
pub mod dialog;
pub mod entity_form;
pub mod layout;
pub mod login_page;
pub mod notification;
pub mod percent_bar;
pub mod projects_grid;
pub mod projet_detail_page;
pub mod projets_page;
pub mod unauthorized;

use self::notification::use_notifier;
use crate::{
    api::ApiClient,
    model::{Lookup, Lookups, Resource},
    state::{AuthState, ResourceState, resource::fetch_all},
};
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

#[hook]
pub fn use_api() -> ApiClient {
    use_context::<ApiClient>().expect("ApiClient context is set by App")
}

#[hook]
pub fn use_auth() -> UseReducerHandle<AuthState> {
    use_context::<UseReducerHandle<AuthState>>().expect("AuthState context is set by App")
}

/// Turns a reducer handle into the callback the async operations report to.
pub fn dispatch_callback<T: Reducible + 'static>(handle: &UseReducerHandle<T>) -> Callback<T::Action> {
    let dispatcher = handle.dispatcher();
    Callback::from(move |action| dispatcher.dispatch(action))
}

/// List of `R`, fetched on mount and again whenever the session changes.
#[hook]
pub fn use_resource<R: Resource>() -> UseReducerHandle<ResourceState<R>> {
    let api = use_api();
    let state = use_reducer(ResourceState::<R>::default);
    {
        let dispatch = dispatch_callback(&state);
        use_effect_with(api, move |api| {
            let api = api.clone();
            spawn_local(async move { fetch_all(&api, &dispatch).await });
        });
    }
    state
}

/// Reference lists needed by a page, fetched concurrently. A list that fails
/// to load stays empty and is reported in a toast.
#[hook]
pub fn use_lookups(wanted: &'static [Lookup]) -> Rc<Lookups> {
    let api = use_api();
    let notifier = use_notifier();
    let lookups = use_state(|| Rc::new(Lookups::default()));
    {
        let lookups = lookups.clone();
        use_effect_with((api, wanted), move |(api, wanted)| {
            let wanted = *wanted;
            if wanted.is_empty() {
                return;
            }
            let api = api.clone();
            spawn_local(async move {
                let (fetched, failures) = api.lookups(wanted).await;
                for (kind, err) in failures {
                    log::error!("Cannot load {kind:?} - {err:?}");
                    notifier.error(err.message_or(&format!("Erreur chargement des {}", kind.label())));
                }
                lookups.set(Rc::new(fetched));
            });
        });
    }
    (*lookups).clone()
}
