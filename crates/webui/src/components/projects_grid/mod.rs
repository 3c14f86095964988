//! Card view of the projects, filtered by exercice, agency, month and communes.

pub mod card;
pub mod filters;

use self::{card::ProjetCard, filters::GridFiltersBar};
use super::{dispatch_callback, use_api, use_auth, use_lookups, use_resource};
use crate::{
    model::{Lookup, Projet},
    state::{
        GridFilters, GridState,
        grid::{QueryKey, filter_projects, query_projects},
        resource::fetch_all,
    },
};
use chrono::Datelike;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

/// Regional users are pinned to their agency and never pick one.
const GRID_LOOKUPS: &[Lookup] = &[
    Lookup::Exercices,
    Lookup::Communes,
    Lookup::Departements,
    Lookup::Entreprises,
];
const NATIONAL_GRID_LOOKUPS: &[Lookup] = &[
    Lookup::Exercices,
    Lookup::Communes,
    Lookup::Departements,
    Lookup::Agences,
    Lookup::Entreprises,
];

#[function_component(ProjectsGrid)]
pub fn projects_grid() -> Html {
    let api = use_api();
    let auth = use_auth();
    let user = auth.user().cloned().unwrap_or_default();
    let projets = use_resource::<Projet>();
    let lookups = use_lookups(if user.is_national() {
        NATIONAL_GRID_LOOKUPS
    } else {
        GRID_LOOKUPS
    });
    let filters = {
        let user = user.clone();
        use_state(move || GridFilters::reset_for(&user))
    };
    let grid = use_reducer(GridState::default);
    let resets = use_state(|| 0_u32);
    let defaulted = use_mut_ref(|| false);

    {
        let filters = filters.clone();
        let user = user.clone();
        use_effect_with(lookups.clone(), move |lookups| {
            if !*defaulted.borrow() && !lookups.exercices.is_empty() {
                *defaulted.borrow_mut() = true;
                let year = chrono::Local::now().year();
                filters.set(GridFilters {
                    search: filters.search.clone(),
                    ..GridFilters::initial(&user, &lookups.exercices, year)
                });
            }
        });
    }

    let references_loaded = !lookups.exercices.is_empty() && !lookups.communes.is_empty();
    let key = QueryKey {
        query: filters.server_query(&user, references_loaded),
        resets: *resets,
    };
    {
        let dispatch = dispatch_callback(&grid);
        use_effect_with((key, api.clone()), move |(key, api)| {
            let query = key.query;
            let api = api.clone();
            spawn_local(async move { query_projects(&api, query, &dispatch).await });
        });
    }

    let on_change = {
        let filters = filters.clone();
        Callback::from(move |next| filters.set(next))
    };
    // The query effect runs again after a reset even when the defaults give
    // the same query as before.
    let on_reset = {
        let filters = filters.clone();
        let resets = resets.clone();
        let lookups = lookups.clone();
        let dispatch = dispatch_callback(&projets);
        let user = user.clone();
        Callback::from(move |()| {
            let year = chrono::Local::now().year();
            filters.set(GridFilters::initial(&user, &lookups.exercices, year));
            resets.set(resets.wrapping_add(1));
            let api = api.clone();
            let dispatch = dispatch.clone();
            spawn_local(async move { fetch_all(&api, &dispatch).await });
        })
    };

    let shown = filter_projects(grid.source(&projets.items), &filters, &lookups);
    let loading = grid.loading || projets.loading;

    html! {
        <div class="projects-grid-page">
            <div class="card-header">
                <h2>{"Projets"}</h2>
                <span class="count">{ format!("{} projet(s)", shown.len()) }</span>
            </div>
            <GridFiltersBar filters={(*filters).clone()} {user} lookups={lookups.clone()}
                {on_change} {on_reset} />
            if let Some(error) = &grid.error {
                <div class="alert-error">{ error }</div>
            }
            if loading {
                <p class="empty">{"Chargement…"}</p>
            } else if shown.is_empty() {
                <p class="empty">{"Aucun projet."}</p>
            } else {
                <div class="projects-grid">
                    { for shown.into_iter().map(|projet| html! {
                        <ProjetCard key={projet.id} projet={projet.clone()} lookups={lookups.clone()} />
                    }) }
                </div>
            }
        </div>
    }
}
