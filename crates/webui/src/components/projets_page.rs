use super::{commune_picker::CommuneSelect, crud_page::CrudPage, use_lookups};
use crate::{
    model::{Projet, Resource, projet::ProjetScope},
    state::grid::current_exercice,
};
use chrono::Datelike;
use std::rc::Rc;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

/// Project table, filtered by exercice (current year by default) and commune.
#[function_component(ProjetsPage)]
pub fn projets_page() -> Html {
    let lookups = use_lookups(Projet::LOOKUPS);
    let scope = use_state(ProjetScope::default);
    let defaulted = use_mut_ref(|| false);

    {
        let scope = scope.clone();
        use_effect_with(lookups.clone(), move |lookups| {
            // Applied once, so that "all exercices" can be chosen afterwards.
            if !*defaulted.borrow() && !lookups.exercices.is_empty() {
                *defaulted.borrow_mut() = true;
                let year = chrono::Local::now().year();
                scope.set(ProjetScope {
                    exercice: current_exercice(&lookups.exercices, year),
                    ..*scope
                });
            }
        });
    }

    let on_exercice = {
        let scope = scope.clone();
        Callback::from(move |e: Event| {
            let exercice = e
                .target_unchecked_into::<HtmlSelectElement>()
                .value()
                .parse()
                .ok();
            scope.set(ProjetScope { exercice, ..*scope });
        })
    };
    let on_commune = {
        let scope = scope.clone();
        Callback::from(move |commune| scope.set(ProjetScope { commune, ..*scope }))
    };
    let row_filter = {
        let scope = *scope;
        Callback::from(move |projet: Projet| scope.matches(&projet))
    };
    let communes = Rc::new(lookups.communes.clone());

    let toolbar = html! {
        <>
            <select class="filter" onchange={on_exercice}>
                <option value="" selected={scope.exercice.is_none()}>{"Tous les exercices"}</option>
                { for lookups.exercices.iter().map(|exercice| html! {
                    <option key={exercice.id} value={exercice.id.to_string()}
                        selected={scope.exercice == Some(exercice.id)}>
                        { exercice.annee }
                    </option>
                }) }
            </select>
            <CommuneSelect {communes} selected={scope.commune} on_change={on_commune} />
        </>
    };

    html! {
        <CrudPage<Projet> {toolbar} row_filter={Some(row_filter)} lookups={Some(lookups)} />
    }
}
