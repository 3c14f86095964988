use super::{percent_bar::PercentBar, use_api, use_lookups};
use crate::{
    api::{ApiClient, ApiError},
    app::Route,
    model::{Lookup, Lot, Projet, Visite},
    util::format::{fmt_date, fmt_money, fmt_percent, to_pct},
};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

const DETAIL_LOOKUPS: &[Lookup] = &[
    Lookup::Communes,
    Lookup::Departements,
    Lookup::Agences,
    Lookup::Entreprises,
    Lookup::Exercices,
];

#[derive(Clone, PartialEq)]
struct ProjetDetail {
    projet: Projet,
    lots: Vec<Lot>,
    visites: Vec<Visite>,
}

#[derive(Clone, PartialEq)]
enum Loading {
    Pending,
    Failed(String),
    Done(Box<ProjetDetail>),
}

async fn load(api: &ApiClient, id: i64) -> Result<ProjetDetail, ApiError> {
    let (projet, lots, visites) = futures::try_join!(
        api.get::<Projet>(id),
        api.list::<Lot>(),
        api.list::<Visite>()
    )?;
    Ok(ProjetDetail {
        projet,
        lots: lots.into_iter().filter(|lot| lot.projet == Some(id)).collect(),
        visites: visites
            .into_iter()
            .filter(|visite| visite.projet_id() == Some(id))
            .collect(),
    })
}

#[derive(Properties, PartialEq)]
pub struct ProjetDetailPageProps {
    pub id: i64,
}

#[function_component(ProjetDetailPage)]
pub fn projet_detail_page(ProjetDetailPageProps { id }: &ProjetDetailPageProps) -> Html {
    let api = use_api();
    let lookups = use_lookups(DETAIL_LOOKUPS);
    let loading = use_state(|| Loading::Pending);
    {
        let loading = loading.clone();
        use_effect_with((*id, api), move |(id, api)| {
            let (id, api) = (*id, api.clone());
            loading.set(Loading::Pending);
            spawn_local(async move {
                match load(&api, id).await {
                    Ok(detail) => loading.set(Loading::Done(Box::new(detail))),
                    Err(err) => {
                        log::error!("Cannot load project {id} - {err:?}");
                        loading.set(Loading::Failed(err.message_or("Erreur chargement")));
                    }
                }
            });
        });
    }

    let back = html! {
        <Link<Route> to={Route::ProjectsGrid} classes="button-link">{"← Retour aux projets"}</Link<Route>>
    };
    let detail = match &*loading {
        Loading::Pending => return html! { <div class="card">{ back }<p class="empty">{"Chargement…"}</p></div> },
        Loading::Failed(error) => {
            return html! { <div class="card">{ back }<div class="alert-error">{ error }</div></div> };
        }
        Loading::Done(detail) => detail,
    };
    let projet = &detail.projet;
    let text = |value: Option<&String>| value.cloned().unwrap_or_else(|| "—".to_string());
    let date = |value: &Option<String>| value.as_deref().map_or_else(|| "—".to_string(), fmt_date);

    html! {
        <div class="card projet-detail">
            { back }
            <h2>{ &projet.libelle }</h2>
            <dl class="detail-grid">
                <dt>{"Type"}</dt><dd>{ text(projet.type_.as_ref()) }</dd>
                <dt>{"N° convention"}</dt><dd>{ text(projet.numero_convention.as_ref()) }</dd>
                <dt>{"Exercice"}</dt>
                <dd>{ projet.exercice(&lookups).map_or_else(|| "—".to_string(), |e| e.annee.to_string()) }</dd>
                <dt>{"Commune"}</dt><dd>{ text(projet.commune(&lookups).map(|c| &c.nom)) }</dd>
                <dt>{"Département"}</dt><dd>{ text(projet.departement(&lookups).map(|d| &d.nom)) }</dd>
                <dt>{"Agence"}</dt><dd>{ text(projet.agence(&lookups).map(|a| &a.nom)) }</dd>
                <dt>{"Entreprise"}</dt><dd>{ text(projet.entreprise(&lookups).map(|e| &e.nom)) }</dd>
                <dt>{"Montant HT"}</dt>
                <dd>{ projet.montant_ht.map_or_else(|| "—".to_string(), fmt_money) }</dd>
                <dt>{"Durée"}</dt>
                <dd>{ projet.duree.map_or_else(|| "—".to_string(), |d| format!("{d} mois")) }</dd>
                <dt>{"Date début"}</dt><dd>{ date(&projet.date_debut) }</dd>
                <dt>{"Date fin"}</dt><dd>{ date(&projet.date_fin) }</dd>
                <dt>{"Statut"}</dt><dd>{ text(projet.status.as_ref()) }</dd>
            </dl>
            <div class="projet-card-progress">
                <span>{"Financement"}</span>
                <PercentBar value={projet.payment_percent} tone={classes!("tone-payment")} />
                <span>{"Avancement"}</span>
                <PercentBar value={projet.progress} tone={classes!("tone-progress")} />
                <span>{"Délai consommé"}</span>
                <PercentBar value={projet.time_consumed_percent} tone={classes!("tone-time")} />
            </div>

            <h3>{ format!("Lots ({})", detail.lots.len()) }</h3>
            if detail.lots.is_empty() {
                <p class="empty">{"Aucun lot."}</p>
            } else {
                <table class="data-table">
                    <thead><tr><th>{"Nom"}</th><th>{"Statut"}</th><th>{"Montant"}</th><th>{"Pourcentage"}</th></tr></thead>
                    <tbody>
                        { for detail.lots.iter().map(|lot| html! {
                            <tr key={lot.id}>
                                <td>{ &lot.nom }</td>
                                <td>{ lot.statut.to_string() }</td>
                                <td class="numeric">{ lot.montant.map(fmt_money).unwrap_or_default() }</td>
                                <td class="numeric">{ fmt_percent(to_pct(lot.pourcentage)) }</td>
                            </tr>
                        }) }
                    </tbody>
                </table>
            }

            <h3>{ format!("Visites ({})", detail.visites.len()) }</h3>
            if detail.visites.is_empty() {
                <p class="empty">{"Aucune visite."}</p>
            } else {
                <table class="data-table">
                    <thead><tr><th>{"Date"}</th><th>{"Paiement"}</th><th>{"Observation"}</th></tr></thead>
                    <tbody>
                        { for detail.visites.iter().map(|visite| html! {
                            <tr key={visite.id}>
                                <td>{ date(&visite.date) }</td>
                                <td><PercentBar value={visite.payment_percent} /></td>
                                <td>{ visite.observation.clone().unwrap_or_default() }</td>
                            </tr>
                        }) }
                    </tbody>
                </table>
            }
        </div>
    }
}
