use crate::{
    components::commune_picker::CommuneMultiSelect,
    model::{Lookups, User},
    state::grid::{GridFilters, MONTHS},
};
use std::rc::Rc;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct GridFiltersBarProps {
    pub filters: GridFilters,
    pub user: User,
    pub lookups: Rc<Lookups>,
    pub on_change: Callback<GridFilters>,
    pub on_reset: Callback<()>,
}

fn selected_id(e: &Event) -> Option<i64> {
    e.target_unchecked_into::<HtmlSelectElement>()
        .value()
        .parse()
        .ok()
}

#[function_component(GridFiltersBar)]
pub fn grid_filters_bar(
    GridFiltersBarProps {
        filters,
        user,
        lookups,
        on_change,
        on_reset,
    }: &GridFiltersBarProps,
) -> Html {
    // Every control emits a copy of the filters with one field changed.
    let update = |apply: fn(&mut GridFilters, &Event)| {
        let filters = filters.clone();
        on_change.reform(move |e: Event| {
            let mut next = filters.clone();
            apply(&mut next, &e);
            next
        })
    };
    let on_exercice = update(|f, e| f.exercice = selected_id(e));
    let on_agence = update(|f, e| f.agence = selected_id(e));
    let on_month = update(|f, e| {
        f.month = selected_id(e).and_then(|month| u32::try_from(month).ok());
    });
    let on_search = {
        let filters = filters.clone();
        on_change.reform(move |e: InputEvent| GridFilters {
            search: e.target_unchecked_into::<HtmlInputElement>().value(),
            ..filters.clone()
        })
    };
    let on_toggle = {
        let filters = filters.clone();
        on_change.reform(move |id| {
            let mut next = filters.clone();
            next.toggle_commune(id);
            next
        })
    };
    let on_set = {
        let filters = filters.clone();
        on_change.reform(move |ids: Vec<i64>| {
            let mut next = filters.clone();
            if ids.is_empty() {
                next.communes.clear();
            } else {
                next.select_communes(ids);
            }
            next
        })
    };
    let communes = Rc::new(lookups.communes.clone());

    html! {
        <div class="grid-filters">
            <input class="search" type="search" placeholder="Rechercher un projet…"
                value={filters.search.clone()} oninput={on_search} />
            <select class="filter" onchange={on_exercice}>
                <option value="" selected={filters.exercice.is_none()}>{"Tous les exercices"}</option>
                { for lookups.exercices.iter().map(|exercice| html! {
                    <option key={exercice.id} value={exercice.id.to_string()}
                        selected={filters.exercice == Some(exercice.id)}>
                        { exercice.annee }
                    </option>
                }) }
            </select>
            if user.is_national() {
                <select class="filter" onchange={on_agence}>
                    <option value="" selected={filters.agence.is_none()}>{"Toutes les agences"}</option>
                    { for lookups.agences.iter().map(|agence| html! {
                        <option key={agence.id} value={agence.id.to_string()}
                            selected={filters.agence == Some(agence.id)}>
                            { &agence.nom }
                        </option>
                    }) }
                </select>
            } else {
                <input class="filter" id="agence" disabled={true}
                    value={user.agence.clone().unwrap_or_default()} />
            }
            <select class="filter" onchange={on_month}>
                <option value="" selected={filters.month.is_none()}>{"Tous les mois"}</option>
                { for (1..).zip(MONTHS).map(|(month, label): (u32, _)| html! {
                    <option key={month} value={month.to_string()} selected={filters.month == Some(month)}>
                        { label }
                    </option>
                }) }
            </select>
            <CommuneMultiSelect {communes} selected={filters.communes.clone()} {on_toggle} {on_set} />
            <button type="button" class="button-outline" onclick={on_reset.reform(|_: MouseEvent| ())}>
                {"Réinitialiser"}
            </button>
        </div>
    }
}
