use super::{use_api, use_auth};
use crate::{app::Route, nav::menu::role_dashboard, state::AuthAction};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

const LOGIN_FAILED: &str = "Échec de connexion";

#[function_component(LoginPage)]
pub fn login_page() -> Html {
    let api = use_api();
    let auth = use_auth();
    let navigator = use_navigator();
    let username = use_state(String::new);
    let password = use_state(String::new);
    let busy = use_state(|| false);
    let error = use_state(|| None::<String>);

    if let Some(user) = auth.user() {
        return html! { <Redirect<Route> to={role_dashboard(user).unwrap_or(Route::Dashboard)} /> };
    }

    let bind = |field: &UseStateHandle<String>| {
        let field = field.clone();
        Callback::from(move |e: InputEvent| {
            field.set(e.target_unchecked_into::<HtmlInputElement>().value());
        })
    };
    let onsubmit = {
        let (username, password) = (username.clone(), password.clone());
        let (busy, error) = (busy.clone(), error.clone());
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *busy {
                return;
            }
            let (username, password) = ((*username).clone(), (*password).clone());
            if username.trim().is_empty() || password.is_empty() {
                error.set(Some("Nom d'utilisateur et mot de passe requis".to_string()));
                return;
            }
            busy.set(true);
            error.set(None);
            let (api, auth, navigator) = (api.clone(), auth.clone(), navigator.clone());
            let (busy, error) = (busy.clone(), error.clone());
            spawn_local(async move {
                match api.login(username.trim(), &password).await {
                    Ok(session) => {
                        log::debug!("Signed in as {}", session.user.username);
                        let target = role_dashboard(&session.user).unwrap_or(Route::Dashboard);
                        auth.dispatch(AuthAction::LoggedIn(session));
                        if let Some(navigator) = navigator {
                            navigator.push(&target);
                        }
                    }
                    Err(err) => {
                        log::warn!("Login failed - {err:?}");
                        error.set(Some(err.message_or(LOGIN_FAILED)));
                    }
                }
                busy.set(false);
            });
        })
    };

    html! {
        <div class="login-page">
            <form class="login-card" {onsubmit}>
                <h1>{"FEICOM"}</h1>
                <p class="subtitle">{"Suivi des projets"}</p>
                <div class="form-field">
                    <label for="username">{"Nom d'utilisateur"}</label>
                    <input id="username" autocomplete="username" value={(*username).clone()}
                        oninput={bind(&username)} disabled={*busy} />
                </div>
                <div class="form-field">
                    <label for="password">{"Mot de passe"}</label>
                    <input id="password" type="password" autocomplete="current-password"
                        value={(*password).clone()} oninput={bind(&password)} disabled={*busy} />
                </div>
                if let Some(message) = &*error {
                    <p class="form-error">{ message }</p>
                }
                <button type="submit" class="button-primary" disabled={*busy}>
                    { if *busy { "Connexion..." } else { "Se connecter" } }
                </button>
            </form>
        </div>
    }
}
