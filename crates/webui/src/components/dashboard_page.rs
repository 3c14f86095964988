use super::use_auth;
use crate::{
    app::Route,
    model::{Role, User},
    nav::menu::{MenuEntry, menu_for},
};
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq)]
pub struct DashboardPageProps {
    /// Role whose dashboard is shown; `None` for the common one.
    #[prop_or_default]
    pub role: Option<Role>,
}

fn title(role: Option<Role>) -> &'static str {
    match role {
        Some(Role::National) => "Tableau de bord national",
        Some(Role::Regional) => "Tableau de bord régional",
        Some(Role::Unknown) | None => "Tableau de bord",
    }
}

fn quick_links(user: &User) -> Html {
    let links = menu_for(user).into_iter().flat_map(|section| section.entries).flat_map(
        |entry| match entry {
            MenuEntry::Link { label, route, .. } => vec![(label, route)],
            MenuEntry::Group { links, .. } => links
                .into_iter()
                .map(|link| (link.label, link.route))
                .collect(),
        },
    );
    html! {
        <div class="quick-links">
            { for links.filter(|(_, route)| *route != Route::Dashboard).map(|(label, route)| html! {
                <Link<Route> to={route} classes="quick-link">{ label }</Link<Route>>
            }) }
        </div>
    }
}

#[function_component(DashboardPage)]
pub fn dashboard_page(DashboardPageProps { role }: &DashboardPageProps) -> Html {
    let auth = use_auth();
    let Some(user) = auth.user() else {
        return html! { <Redirect<Route> to={Route::Login} /> };
    };
    let or_dash = |value: Option<String>| value.unwrap_or_else(|| "—".to_string());

    html! {
        <div class="card dashboard">
            <h2>{ title(*role) }</h2>
            <dl class="detail-grid">
                <dt>{"Utilisateur"}</dt><dd>{ &user.username }</dd>
                <dt>{"Email"}</dt><dd>{ or_dash(user.email.clone()) }</dd>
                <dt>{"Rôle"}</dt><dd>{ or_dash(user.role.map(|role| role.to_string())) }</dd>
                <dt>{"Agence"}</dt><dd>{ or_dash(user.agence.clone()) }</dd>
            </dl>
            <h3>{"Accès rapide"}</h3>
            { quick_links(user) }
        </div>
    }
}
