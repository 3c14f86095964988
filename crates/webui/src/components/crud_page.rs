use super::{
    data_table::DataTable,
    dialog::{DeleteConfirm, Modal},
    dispatch_callback,
    entity_form::EntityForm,
    notification::use_notifier,
    use_api, use_lookups, use_resource,
};
use crate::{
    model::{Lookup, Lookups, Resource},
    state::resource,
    table::{TableAction, TableState},
};
use futures::future::LocalBoxFuture;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

const NO_LOOKUPS: &[Lookup] = &[];

#[derive(Clone, PartialEq)]
enum Dialog<R> {
    Add,
    Edit(R),
    Delete(R),
    DeleteMany(Vec<R>),
}

#[derive(Properties, PartialEq)]
pub struct CrudPageProps<R: Resource> {
    /// Extra filter controls shown before the search box.
    #[prop_or_default]
    pub toolbar: Html,
    /// Rows failing this predicate are hidden.
    #[prop_or_default]
    pub row_filter: Option<Callback<R, bool>>,
    /// Reference lists already fetched by the parent page.
    #[prop_or_default]
    pub lookups: Option<Rc<Lookups>>,
}

/// Searchable table of `R` with add, edit, delete and bulk delete dialogs.
#[function_component(CrudPage)]
pub fn crud_page<R: Resource>(
    CrudPageProps {
        toolbar,
        row_filter,
        lookups,
    }: &CrudPageProps<R>,
) -> Html {
    let api = use_api();
    let notifier = use_notifier();
    let state = use_resource::<R>();
    let own_lookups = use_lookups(if lookups.is_some() { NO_LOOKUPS } else { R::LOOKUPS });
    let lookups = lookups.clone().unwrap_or(own_lookups);
    let table = use_reducer(TableState::default);
    let dialog = use_state(|| None::<Dialog<R>>);
    let busy = use_state(|| false);
    let dialog_error = use_state(|| None::<String>);

    let items: Rc<Vec<R>> = Rc::new(match row_filter {
        Some(keep) => state
            .items
            .iter()
            .filter(|item| keep.emit((*item).clone()))
            .cloned()
            .collect(),
        None => state.items.clone(),
    });
    let selected: Vec<R> = table
        .selected_items(&state.items)
        .into_iter()
        .cloned()
        .collect();

    let open = |next: Dialog<R>| {
        let dialog = dialog.clone();
        let dialog_error = dialog_error.clone();
        move || {
            dialog_error.set(None);
            dialog.set(Some(next.clone()));
        }
    };
    let close = {
        let dialog = dialog.clone();
        Callback::from(move |()| dialog.set(None))
    };

    // Runs a mutation; the dialog closes on success and shows the error otherwise.
    let run = {
        let dialog = dialog.clone();
        let busy = busy.clone();
        let dialog_error = dialog_error.clone();
        let notifier = notifier.clone();
        move |success: &'static str, operation: LocalBoxFuture<'static, Result<(), String>>| {
            let dialog = dialog.clone();
            let busy = busy.clone();
            let dialog_error = dialog_error.clone();
            let notifier = notifier.clone();
            busy.set(true);
            spawn_local(async move {
                match operation.await {
                    Ok(()) => {
                        dialog.set(None);
                        notifier.success(success);
                    }
                    Err(message) => {
                        notifier.error(message.clone());
                        dialog_error.set(Some(message));
                    }
                }
                busy.set(false);
            });
        }
    };

    let on_create = {
        let api = api.clone();
        let dispatch = dispatch_callback(&state);
        let run = run.clone();
        Callback::from(move |payload: R::Payload| {
            let api = api.clone();
            let dispatch = dispatch.clone();
            run(
                "Enregistré avec succès",
                Box::pin(async move { resource::create::<R>(&api, &dispatch, &payload).await }),
            );
        })
    };
    let on_update = |id: i64| {
        let api = api.clone();
        let dispatch = dispatch_callback(&state);
        let run = run.clone();
        Callback::from(move |payload: R::Payload| {
            let api = api.clone();
            let dispatch = dispatch.clone();
            run(
                "Modifié avec succès",
                Box::pin(async move { resource::update::<R>(&api, &dispatch, id, &payload).await }),
            );
        })
    };
    let on_delete = |id: i64| {
        let api = api.clone();
        let dispatch = dispatch_callback(&state);
        let run = run.clone();
        Callback::from(move |()| {
            let api = api.clone();
            let dispatch = dispatch.clone();
            run(
                "Supprimé avec succès",
                Box::pin(async move { resource::delete::<R>(&api, &dispatch, id).await }),
            );
        })
    };
    let on_delete_many = |ids: Vec<i64>| {
        let api = api.clone();
        let dispatch = dispatch_callback(&state);
        let table = table.clone();
        let run = run.clone();
        Callback::from(move |()| {
            let api = api.clone();
            let dispatch = dispatch.clone();
            let table = table.clone();
            let ids = ids.clone();
            run(
                "Sélection supprimée",
                Box::pin(async move {
                    let deleted = resource::delete_many::<R>(&api, &dispatch, ids).await;
                    if deleted.is_ok() {
                        table.dispatch(TableAction::ClearSelection);
                    }
                    deleted
                }),
            );
        })
    };

    let on_search = {
        let table = table.clone();
        Callback::from(move |e: InputEvent| {
            let value = e.target_unchecked_into::<HtmlInputElement>().value();
            table.dispatch(TableAction::Search(value));
        })
    };
    let on_add = {
        let open = open(Dialog::Add);
        Callback::from(move |_: MouseEvent| open())
    };
    let on_delete_selection = {
        let open = open(Dialog::DeleteMany(selected.clone()));
        Callback::from(move |_: MouseEvent| open())
    };
    let on_edit_row = {
        let dialog = dialog.clone();
        let dialog_error = dialog_error.clone();
        Callback::from(move |row: R| {
            dialog_error.set(None);
            dialog.set(Some(Dialog::Edit(row)));
        })
    };
    let on_delete_row = {
        let dialog = dialog.clone();
        let dialog_error = dialog_error.clone();
        Callback::from(move |row: R| {
            dialog_error.set(None);
            dialog.set(Some(Dialog::Delete(row)));
        })
    };

    let error = dialog_error.as_ref().map(|e| AttrValue::from(e.clone()));
    let labels = R::LABELS;
    let modal = match &*dialog {
        None => html! {},
        Some(Dialog::Add) => html! {
            <Modal title={labels.add} on_close={close.clone()} busy={*busy}>
                <EntityForm<R> lookups={lookups.clone()} busy={*busy} {error}
                    on_submit={on_create} on_cancel={close.clone()} />
            </Modal>
        },
        Some(Dialog::Edit(row)) => html! {
            <Modal title={labels.edit} on_close={close.clone()} busy={*busy}>
                <EntityForm<R> current={Some(row.clone())} lookups={lookups.clone()} busy={*busy} {error}
                    on_submit={on_update(row.id())} on_cancel={close.clone()} />
            </Modal>
        },
        Some(Dialog::Delete(row)) => html! {
            <Modal title={labels.delete} on_close={close.clone()} busy={*busy}>
                <DeleteConfirm subject={labels.the_one} names={vec![row.display_name()]}
                    busy={*busy} {error} on_confirm={on_delete(row.id())} on_cancel={close.clone()} />
            </Modal>
        },
        Some(Dialog::DeleteMany(rows)) => html! {
            <Modal title="Supprimer la sélection" on_close={close.clone()} busy={*busy}>
                <DeleteConfirm subject={labels.the_many}
                    names={rows.iter().map(|row| row.display_name()).collect::<Vec<_>>()}
                    busy={*busy} {error}
                    on_confirm={on_delete_many(rows.iter().map(|row| row.id()).collect())}
                    on_cancel={close.clone()} />
            </Modal>
        },
    };

    html! {
        <div class="card">
            <div class="card-header">
                <h2>{ labels.title }</h2>
                <div class="toolbar">
                    { toolbar.clone() }
                    <input class="search" type="search" placeholder="Rechercher…"
                        value={table.search.clone()} oninput={on_search} />
                    if !selected.is_empty() {
                        <button class="button-danger" onclick={on_delete_selection}>
                            { format!("Supprimer la sélection ({})", selected.len()) }
                        </button>
                    }
                    <button class="button-primary" onclick={on_add}>{"Ajouter"}</button>
                </div>
            </div>
            if let Some(error) = &state.error {
                if dialog.is_none() {
                    <div class="alert-error">{ error }</div>
                }
            }
            <DataTable<R> {items} {lookups} table={table.clone()} loading={state.loading}
                on_edit={on_edit_row} on_delete={on_delete_row} />
            { modal }
        </div>
    }
}
