use crate::{
    app::Route,
    components::percent_bar::PercentBar,
    model::{Lookups, Projet},
    util::format::{fmt_date, fmt_money},
};
use std::rc::Rc;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ProjetCardProps {
    pub projet: Projet,
    pub lookups: Rc<Lookups>,
}

#[function_component(ProjetCard)]
pub fn projet_card(ProjetCardProps { projet, lookups }: &ProjetCardProps) -> Html {
    let navigator = use_navigator();
    let onclick = {
        let id = projet.id;
        Callback::from(move |_: MouseEvent| {
            if let Some(navigator) = &navigator {
                navigator.push(&Route::ProjetDetail { id });
            }
        })
    };
    let name = |value: Option<&String>| value.cloned().unwrap_or_else(|| "—".to_string());
    let period = match (&projet.date_debut, &projet.date_fin) {
        (Some(start), Some(end)) => format!("{} → {}", fmt_date(start), fmt_date(end)),
        (Some(start), None) => format!("Depuis le {}", fmt_date(start)),
        (None, Some(end)) => format!("Jusqu'au {}", fmt_date(end)),
        (None, None) => "—".to_string(),
    };

    html! {
        <div class="projet-card" {onclick} role="link">
            <div class="projet-card-header">
                <h3>{ &projet.libelle }</h3>
                if let Some(type_) = &projet.type_ {
                    <span class="badge">{ type_ }</span>
                }
            </div>
            <dl>
                <dt>{"Localisation"}</dt>
                <dd>{ format!(
                    "{} · {}",
                    name(projet.agence(lookups).map(|a| &a.nom)),
                    name(projet.commune(lookups).map(|c| &c.nom)),
                ) }</dd>
                <dt>{"Entreprise"}</dt>
                <dd>{ name(projet.entreprise(lookups).map(|e| &e.nom)) }</dd>
                <dt>{"Montant HT"}</dt>
                <dd>{ projet.montant_ht.map(fmt_money).unwrap_or_else(|| "—".to_string()) }</dd>
                <dt>{"Période"}</dt>
                <dd>{ period }</dd>
            </dl>
            <div class="projet-card-progress">
                <span>{"Financement"}</span>
                <PercentBar value={projet.payment_percent} tone={classes!("tone-payment")} />
                <span>{"Avancement"}</span>
                <PercentBar value={projet.progress} tone={classes!("tone-progress")} />
                <span>{"Délai consommé"}</span>
                <PercentBar value={projet.time_consumed_percent} tone={classes!("tone-time")} />
            </div>
        </div>
    }
}
