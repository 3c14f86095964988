use crate::app::Route;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(Unauthorized)]
pub fn unauthorized() -> Html {
    html! {
        <div class="card unauthorized">
            <h2>{"Accès refusé"}</h2>
            <p>{"Vous n'avez pas les droits nécessaires pour consulter cette page."}</p>
            <Link<Route> to={Route::Dashboard} classes="button-primary">{"Retour au tableau de bord"}</Link<Route>>
        </div>
    }
}
