use crate::model::Commune;
use hashbrown::HashSet;
use std::rc::Rc;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

fn visible<'a>(communes: &'a [Commune], query: &str) -> Vec<&'a Commune> {
    let query = query.trim().to_lowercase();
    communes
        .iter()
        .filter(|commune| query.is_empty() || commune.nom.to_lowercase().contains(&query))
        .collect()
}

#[hook]
fn use_query() -> (UseStateHandle<String>, Callback<InputEvent>) {
    let query = use_state(String::new);
    let oninput = {
        let query = query.clone();
        Callback::from(move |e: InputEvent| {
            query.set(e.target_unchecked_into::<HtmlInputElement>().value());
        })
    };
    (query, oninput)
}

#[derive(Properties, PartialEq)]
pub struct CommuneSelectProps {
    pub communes: Rc<Vec<Commune>>,
    pub selected: Option<i64>,
    pub on_change: Callback<Option<i64>>,
}

/// Single commune choice with a search box; `None` means all communes.
#[function_component(CommuneSelect)]
pub fn commune_select(
    CommuneSelectProps {
        communes,
        selected,
        on_change,
    }: &CommuneSelectProps,
) -> Html {
    let (query, oninput) = use_query();
    let onchange = on_change.reform(|e: Event| {
        e.target_unchecked_into::<HtmlSelectElement>()
            .value()
            .parse::<i64>()
            .ok()
    });
    let shown = visible(communes, &query);

    html! {
        <div class="commune-select">
            <input type="search" placeholder="Rechercher une commune…"
                value={(*query).clone()} {oninput} />
            <select {onchange}>
                <option value="" selected={selected.is_none()}>{"-- Toutes les communes --"}</option>
                { for shown.into_iter().map(|commune| html! {
                    <option key={commune.id} value={commune.id.to_string()}
                        selected={*selected == Some(commune.id)}>
                        { &commune.nom }
                    </option>
                }) }
            </select>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct CommuneMultiSelectProps {
    pub communes: Rc<Vec<Commune>>,
    pub selected: HashSet<i64>,
    pub on_toggle: Callback<i64>,
    /// Adds the shown communes on "select all"; an empty list clears the selection.
    pub on_set: Callback<Vec<i64>>,
}

/// Dropdown of checkboxes; the badge counts the selected communes.
#[function_component(CommuneMultiSelect)]
pub fn commune_multi_select(
    CommuneMultiSelectProps {
        communes,
        selected,
        on_toggle,
        on_set,
    }: &CommuneMultiSelectProps,
) -> Html {
    let open = use_state(|| false);
    let (query, oninput) = use_query();
    let shown = visible(communes, &query);

    let toggle_open = {
        let open = open.clone();
        Callback::from(move |_: MouseEvent| open.set(!*open))
    };
    let select_all = {
        let ids: Vec<i64> = shown.iter().map(|commune| commune.id).collect();
        on_set.reform(move |_: MouseEvent| ids.clone())
    };
    let clear = on_set.reform(|_: MouseEvent| Vec::new());
    let label = if selected.is_empty() {
        "Toutes les communes".to_string()
    } else {
        format!("Communes ({})", selected.len())
    };

    html! {
        <div class="commune-multi">
            <button type="button" class="button-outline" onclick={toggle_open}>
                { label }
                if !selected.is_empty() {
                    <span class="badge">{ selected.len() }</span>
                }
            </button>
            if *open {
                <div class="commune-multi-menu">
                    <input type="search" placeholder="Rechercher une commune…"
                        value={(*query).clone()} {oninput} />
                    <div class="commune-multi-actions">
                        <button type="button" class="button-link" onclick={select_all}>{"Tout sélectionner"}</button>
                        <button type="button" class="button-link" onclick={clear}>{"Vider"}</button>
                    </div>
                    <ul>
                        { for shown.into_iter().map(|commune| {
                            let id = commune.id;
                            let onchange = on_toggle.reform(move |_: Event| id);
                            html! {
                                <li key={id}>
                                    <label>
                                        <input type="checkbox" checked={selected.contains(&id)} {onchange} />
                                        { &commune.nom }
                                    </label>
                                </li>
                            }
                        }) }
                    </ul>
                </div>
            }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Ref;

    fn commune(id: i64, nom: &str) -> Commune {
        Commune {
            id,
            nom: nom.to_string(),
            departement: Ref::Id(1),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn search_is_case_insensitive() {
        let communes = vec![commune(1, "Douala 1er"), commune(2, "Yaoundé 3e"), commune(3, "Edéa")];
        let names: Vec<_> = visible(&communes, " dOUA ").iter().map(|c| c.id).collect();
        assert_eq!(names, vec![1]);
        assert_eq!(visible(&communes, "").len(), 3);
    }
}
