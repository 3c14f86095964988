use super::use_auth;
use crate::{
    app::Route,
    model::User,
    nav::menu::{MenuEntry, MenuLink, menu_for},
    state::AuthAction,
};
use chrono::Datelike;
use hashbrown::HashSet;
use yew::prelude::*;
use yew_router::prelude::*;
use yewprint::Icon;

#[function_component(Header)]
fn header() -> Html {
    let auth = use_auth();
    let navigator = use_navigator();
    let logout = {
        let auth = auth.clone();
        Callback::from(move |_: MouseEvent| {
            auth.dispatch(AuthAction::LoggedOut);
            if let Some(navigator) = &navigator {
                navigator.push(&Route::Login);
            }
        })
    };
    html! {
        <header class="app-header">
            <Link<Route> to={Route::Dashboard} classes="brand">{"FEICOM"}</Link<Route>>
            if let Some(user) = auth.user() {
                <div class="app-header-user">
                    <span class="username">{ &user.username }</span>
                    if let Some(role) = user.role {
                        <span class="badge">{ role.to_string() }</span>
                    }
                    <button class="button-outline" onclick={logout}>
                        <Icon icon={Icon::LogOut} />
                        {" Déconnexion"}
                    </button>
                </div>
            }
        </header>
    }
}

#[derive(Properties, PartialEq)]
struct SidebarProps {
    user: User,
}

#[function_component(Sidebar)]
fn sidebar(SidebarProps { user }: &SidebarProps) -> Html {
    let current = use_route::<Route>();
    let open_groups = use_state(HashSet::<&'static str>::new);
    let menu = menu_for(user);

    let item = |label: &'static str, route: &Route| {
        let class = classes!("menu-link", (current.as_ref() == Some(route)).then_some("active"));
        html! {
            <li key={label}>
                <Link<Route> to={route.clone()} classes={class}>{ label }</Link<Route>>
            </li>
        }
    };
    let entry = |entry: &MenuEntry| match entry {
        MenuEntry::Link { label, route, .. } => {
            let class = classes!("menu-link", (current.as_ref() == Some(route)).then_some("active"));
            html! {
                <li key={*label}>
                    <Link<Route> to={route.clone()} classes={class}>
                        <Icon icon={entry.icon()} />
                        { format!(" {label}") }
                    </Link<Route>>
                </li>
            }
        }
        MenuEntry::Group { label, links, .. } => {
            let label = *label;
            let is_open = open_groups.contains(label);
            let toggle = {
                let open_groups = open_groups.clone();
                Callback::from(move |_: MouseEvent| {
                    let mut next = (*open_groups).clone();
                    if !next.remove(label) {
                        next.insert(label);
                    }
                    open_groups.set(next);
                })
            };
            html! {
                <li key={label} class="menu-group">
                    <button class="menu-group-toggle" onclick={toggle}>
                        <Icon icon={entry.icon()} />
                        { format!(" {label}") }
                        <Icon icon={if is_open { Icon::ChevronDown } else { Icon::ChevronRight }} />
                    </button>
                    if is_open {
                        <ul class="submenu">
                            { for links.iter().map(|MenuLink { label, route }| item(*label, route)) }
                        </ul>
                    }
                </li>
            }
        }
    };

    html! {
        <nav class="sidebar">
            { for menu.iter().map(|section| html! {
                <div class="menu-section" key={section.title}>
                    <p class="menu-section-title">{ section.title }</p>
                    <ul>{ for section.entries.iter().map(&entry) }</ul>
                </div>
            }) }
        </nav>
    }
}

#[function_component(Footer)]
fn footer() -> Html {
    let year = chrono::Local::now().year();
    html! {
        <footer class="app-footer">{ format!("© {year} FEICOM - Suivi des projets") }</footer>
    }
}

#[derive(Properties, PartialEq)]
pub struct LayoutProps {
    pub children: Html,
}

/// Chrome around the pages of a signed-in user.
#[function_component(Layout)]
pub fn layout(LayoutProps { children }: &LayoutProps) -> Html {
    let auth = use_auth();
    html! {
        <div class="app-shell">
            <Header />
            <div class="app-body">
                if let Some(user) = auth.user() {
                    <Sidebar user={user.clone()} />
                }
                <main class="app-main">{ children.clone() }</main>
            </div>
            <Footer />
        </div>
    }
}
