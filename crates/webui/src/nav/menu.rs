use super::{Access, Guard, check};
use crate::{
    app::Route,
    model::{Role, User},
};
use yewprint::Icon;

#[derive(Clone, Debug, PartialEq)]
pub struct MenuLink {
    pub label: &'static str,
    pub route: Route,
}

#[derive(Clone, Debug, PartialEq)]
pub enum MenuEntry {
    Link {
        label: &'static str,
        icon: Icon,
        route: Route,
    },
    /// Collapsible group of links.
    Group {
        label: &'static str,
        icon: Icon,
        links: Vec<MenuLink>,
    },
}

impl MenuEntry {
    pub fn label(&self) -> &'static str {
        match self {
            MenuEntry::Link { label, .. } | MenuEntry::Group { label, .. } => label,
        }
    }

    /// `Icon` is not `Copy`; renderers get their own.
    pub fn icon(&self) -> Icon {
        match self {
            MenuEntry::Link { icon, .. } | MenuEntry::Group { icon, .. } => icon.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MenuSection {
    pub title: &'static str,
    pub entries: Vec<MenuEntry>,
}

fn link(label: &'static str, route: Route) -> MenuLink {
    MenuLink { label, route }
}

fn full_menu() -> Vec<MenuSection> {
    vec![
        MenuSection {
            title: "General",
            entries: vec![
                MenuEntry::Link {
                    label: "Dashboard",
                    icon: Icon::Dashboard,
                    route: Route::Dashboard,
                },
                MenuEntry::Group {
                    label: "Projects",
                    icon: Icon::Projects,
                    links: vec![
                        link("Grid View", Route::ProjectsGrid),
                        link("Table View", Route::Projets),
                    ],
                },
                MenuEntry::Link {
                    label: "Visit Reports",
                    icon: Icon::Clipboard,
                    route: Route::Visites,
                },
            ],
        },
        MenuSection {
            title: "Administration",
            entries: vec![MenuEntry::Group {
                label: "CRUD Operations",
                icon: Icon::Database,
                links: vec![
                    link("Départements", Route::Departements),
                    link("Agences", Route::Agences),
                    link("Communes", Route::Communes),
                    link("Entreprises", Route::Entreprises),
                    link("Lots", Route::Lots),
                    link("Todos", Route::Todos),
                    link("Exercise", Route::Exercices),
                ],
            }],
        },
    ]
}

/// Menu entries `user` is allowed to open. Empty groups and sections are dropped.
pub fn menu_for(user: &User) -> Vec<MenuSection> {
    let allowed = |route: &Route| check(route.access(), Some(user)) == Guard::Allow;
    full_menu()
        .into_iter()
        .filter_map(|section| {
            let entries: Vec<MenuEntry> = section
                .entries
                .into_iter()
                .filter_map(|entry| match entry {
                    MenuEntry::Link { ref route, .. } => allowed(route).then_some(entry),
                    MenuEntry::Group { label, icon, links } => {
                        let links: Vec<MenuLink> =
                            links.into_iter().filter(|l| allowed(&l.route)).collect();
                        (!links.is_empty()).then_some(MenuEntry::Group { label, icon, links })
                    }
                })
                .collect();
            (!entries.is_empty()).then_some(MenuSection {
                title: section.title,
                entries,
            })
        })
        .collect()
}

/// Role-specific dashboard of `user`, if any.
pub fn role_dashboard(user: &User) -> Option<Route> {
    match user.role? {
        Role::National => Some(Route::NationalDashboard),
        Role::Regional => Some(Route::RegionalDashboard),
        Role::Unknown => None,
    }
}
