//! Filters and data source of the project grid.
//!
//! The grid shows the result of `filters/projects/…` when the filters are
//! precise enough for a server query, and the full project list otherwise.
//! Commune and text filters are always applied locally on top.

use crate::{
    api::{ApiClient, ProjectsQuery},
    model::{Exercice, Lookups, Projet, User},
};
use hashbrown::HashSet;
use std::rc::Rc;
use yew::{Callback, Reducible};

pub const MONTHS: [&str; 12] = [
    "Janvier",
    "Février",
    "Mars",
    "Avril",
    "Mai",
    "Juin",
    "Juillet",
    "Août",
    "Septembre",
    "Octobre",
    "Novembre",
    "Décembre",
];

const QUERY_ERROR: &str = "Erreur chargement filtres";

/// Id of the exercice whose year is `year`.
pub fn current_exercice(exercices: &[Exercice], year: i32) -> Option<i64> {
    exercices
        .iter()
        .find(|exercice| exercice.annee == year)
        .map(|exercice| exercice.id)
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GridFilters {
    pub exercice: Option<i64>,
    /// Only editable by national users.
    pub agence: Option<i64>,
    /// 1-12, filters on the start date server side.
    pub month: Option<u32>,
    pub communes: HashSet<i64>,
    pub search: String,
}

impl GridFilters {
    /// Defaults for `user`: regional users are pinned to their agency.
    pub fn reset_for(user: &User) -> Self {
        Self {
            agence: if user.is_national() {
                None
            } else {
                user.agence_id
            },
            ..Self::default()
        }
    }

    /// Defaults plus the exercice of the current year, when it exists.
    pub fn initial(user: &User, exercices: &[Exercice], year: i32) -> Self {
        Self {
            exercice: current_exercice(exercices, year),
            ..Self::reset_for(user)
        }
    }

    pub fn effective_agence(&self, user: &User) -> Option<i64> {
        if user.is_national() {
            self.agence
        } else {
            user.agence_id
        }
    }

    /// The server query, once the filters and the reference lists allow one.
    pub fn server_query(&self, user: &User, references_loaded: bool) -> Option<ProjectsQuery> {
        if !references_loaded {
            return None;
        }
        Some(ProjectsQuery {
            exercice: self.exercice?,
            agence: self.effective_agence(user)?,
            month: self.month.filter(|month| (1..=12).contains(month)),
        })
    }

    pub fn toggle_commune(&mut self, id: i64) {
        if !self.communes.remove(&id) {
            self.communes.insert(id);
        }
    }

    pub fn select_communes(&mut self, ids: impl IntoIterator<Item = i64>) {
        self.communes.extend(ids);
    }

    pub fn matches(&self, projet: &Projet, lookups: &Lookups) -> bool {
        if !self.communes.is_empty()
            && !projet
                .commune_id()
                .is_some_and(|commune| self.communes.contains(&commune))
        {
            return false;
        }
        let query = self.search.trim().to_lowercase();
        query.is_empty()
            || projet
                .grid_haystack(lookups)
                .join(" ")
                .to_lowercase()
                .contains(&query)
    }
}

/// What the grid's query runs on. `resets` counts the resets, so that a
/// reset sends the query again even when the filters give the same one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QueryKey {
    pub query: Option<ProjectsQuery>,
    pub resets: u32,
}

/// Projects of `source` passing the local filters.
pub fn filter_projects<'a>(
    source: &'a [Projet],
    filters: &GridFilters,
    lookups: &Lookups,
) -> Vec<&'a Projet> {
    source
        .iter()
        .filter(|projet| filters.matches(projet, lookups))
        .collect()
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GridState {
    pub loading: bool,
    pub error: Option<String>,
    /// `Some` when the last query was answered by the server.
    pub server_items: Option<Vec<Projet>>,
}

impl GridState {
    pub fn from_server(&self) -> bool {
        self.server_items.is_some()
    }

    pub fn source<'a>(&'a self, local: &'a [Projet]) -> &'a [Projet] {
        self.server_items.as_deref().unwrap_or(local)
    }
}

#[derive(Debug)]
pub enum GridAction {
    Querying,
    Loaded(Vec<Projet>),
    Failed(String),
    /// Back to the full local list.
    UseLocal,
}

impl Reducible for GridState {
    type Action = GridAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            GridAction::Querying => GridState {
                loading: true,
                ..GridState::default()
            },
            GridAction::Loaded(items) => GridState {
                server_items: Some(items),
                ..GridState::default()
            },
            GridAction::Failed(error) => GridState {
                error: Some(error),
                ..GridState::default()
            },
            GridAction::UseLocal => GridState::default(),
        }
        .into()
    }
}

pub async fn query_projects(
    api: &ApiClient,
    query: Option<ProjectsQuery>,
    dispatch: &Callback<GridAction>,
) {
    let Some(query) = query else {
        dispatch.emit(GridAction::UseLocal);
        return;
    };
    dispatch.emit(GridAction::Querying);
    match api.projects_by_filters(&query).await {
        Ok(items) => dispatch.emit(GridAction::Loaded(items)),
        Err(err) => {
            log::error!("Cannot filter projects with {query:?} - {err:?}");
            dispatch.emit(GridAction::Failed(err.message_or(QUERY_ERROR)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Role;
    use assert_matches::assert_matches;

    fn national() -> User {
        User {
            username: "admin".into(),
            role: Some(Role::National),
            ..User::default()
        }
    }

    fn regional(agence_id: i64) -> User {
        User {
            username: "ouest".into(),
            role: Some(Role::Regional),
            agence: Some("Ouest".into()),
            agence_id: Some(agence_id),
            ..User::default()
        }
    }

    fn exercices() -> Vec<Exercice> {
        serde_json::from_str(
            r#"[{"id": 1, "annee": 2024, "budget": 1}, {"id": 2, "annee": 2025, "budget": 1}]"#,
        )
        .unwrap()
    }

    fn projets() -> Vec<Projet> {
        serde_json::from_str(
            r#"[
                {"id": 1, "libelle": "Marché couvert", "commune": {"id": 5, "nom": "Dschang", "departement": 3},
                 "entreprise": {"id": 4, "nom": "BTP Sarl"}, "numero_convention": "CV-01"},
                {"id": 2, "libelle": "Forage", "commune": 6},
                {"id": 3, "libelle": "Route rurale"}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn regional_user_is_pinned_to_agence() {
        let filters = GridFilters::initial(&regional(7), &exercices(), 2025);
        assert_eq!(filters.agence, Some(7));
        assert_eq!(filters.exercice, Some(2));
        assert_eq!(GridFilters::initial(&national(), &exercices(), 2030).exercice, None);
    }

    #[test]
    fn regional_query_ignores_chosen_agence() {
        let filters = GridFilters {
            exercice: Some(2),
            agence: Some(99),
            ..GridFilters::default()
        };
        assert_eq!(
            filters.server_query(&regional(7), true),
            Some(ProjectsQuery {
                exercice: 2,
                agence: 7,
                month: None
            })
        );
    }

    #[test]
    fn national_query_needs_an_agence() {
        let mut filters = GridFilters {
            exercice: Some(2),
            ..GridFilters::default()
        };
        assert_eq!(filters.server_query(&national(), true), None);
        filters.agence = Some(3);
        filters.month = Some(4);
        assert_eq!(
            filters.server_query(&national(), true).map(|q| q.path()),
            Some("filters/projects/2/3/4/".to_string())
        );
    }

    #[test]
    fn no_query_before_references_are_loaded() {
        let filters = GridFilters::initial(&regional(7), &exercices(), 2025);
        assert_eq!(filters.server_query(&regional(7), false), None);
        assert!(filters.server_query(&regional(7), true).is_some());
    }

    #[test]
    fn commune_set_filters_by_parent_id() {
        let projets = projets();
        let lookups = Lookups::default();
        let mut filters = GridFilters::default();
        assert_eq!(filter_projects(&projets, &filters, &lookups).len(), 3);
        filters.toggle_commune(5);
        filters.toggle_commune(6);
        assert_eq!(filter_projects(&projets, &filters, &lookups).len(), 2);
        filters.toggle_commune(6);
        let shown = filter_projects(&projets, &filters, &lookups);
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].id, 1);
    }

    #[test]
    fn search_covers_company_and_convention() {
        let projets = projets();
        let lookups = Lookups::default();
        for query in ["btp", "cv-01", "DSCHANG", "  marché "] {
            let filters = GridFilters {
                search: query.into(),
                ..GridFilters::default()
            };
            let shown = filter_projects(&projets, &filters, &lookups);
            assert_eq!(shown.len(), 1, "query {query:?}");
        }
    }

    #[test]
    fn source_falls_back_to_local_list() {
        let local = projets();
        let state = Rc::new(GridState::default());
        assert_eq!(state.source(&local).len(), 3);

        let state = state.reduce(GridAction::Querying);
        assert!(state.loading);
        assert_eq!(state.source(&local).len(), 3);

        let state = state.reduce(GridAction::Loaded(vec![local[1].clone()]));
        assert!(state.from_server());
        assert_eq!(state.source(&local).len(), 1);

        let state = state.reduce(GridAction::UseLocal);
        assert!(!state.from_server());
        assert_eq!(state.source(&local).len(), 3);
    }

    #[test]
    fn failed_query_shows_local_list_with_error() {
        let state = Rc::new(GridState::default())
            .reduce(GridAction::Querying)
            .reduce(GridAction::Failed("boom".into()));
        assert_matches!(state.error.as_deref(), Some("boom"));
        assert!(!state.loading);
        assert!(state.server_items.is_none());
    }

    #[test]
    fn reset_keeps_regional_agence_only() {
        let mut filters = GridFilters::initial(&regional(7), &exercices(), 2025);
        filters.month = Some(3);
        filters.search = "x".into();
        filters.select_communes([1, 2]);
        let reset = GridFilters::reset_for(&regional(7));
        assert_eq!(reset.agence, Some(7));
        assert!(reset.communes.is_empty());
        assert_eq!(reset.month, None);
        assert_eq!(GridFilters::reset_for(&national()).agence, None);
    }

    #[test]
    fn reset_requeries_even_when_query_is_unchanged() {
        let user = regional(7);
        let mut filters = GridFilters::initial(&user, &exercices(), 2025);
        let before = QueryKey {
            query: filters.server_query(&user, true),
            resets: 0,
        };
        filters.search = "forage".into();
        filters.select_communes([5]);

        let reset = GridFilters::initial(&user, &exercices(), 2025);
        let after = QueryKey {
            query: reset.server_query(&user, true),
            resets: before.resets.wrapping_add(1),
        };
        assert_eq!(after.query, before.query);
        assert_eq!(
            after.query,
            Some(ProjectsQuery {
                exercice: 2,
                agence: 7,
                month: None
            })
        );
        assert_ne!(after, before);
    }
}
