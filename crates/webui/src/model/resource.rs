//! The contract every CRUD entity implements so the generic table, form and
//! state container can drive it.

use super::{Agence, Commune, Departement, Entreprise, Exercice, Identified, Lot, Projet};
use crate::{
    forms::{Field, FormError, FormValues},
    util::format::{fmt_date, fmt_money, fmt_percent, to_pct},
};
use serde::{Serialize, de::DeserializeOwned};
use std::cmp::Ordering;

pub trait Resource: Identified + Clone + PartialEq + DeserializeOwned + 'static {
    /// Body sent on create and update.
    type Payload: Serialize + Clone + PartialEq + 'static;

    /// Collection path relative to the API prefix, with trailing slash.
    const ENDPOINT: &'static str;
    const LABELS: Labels;
    /// Reference lists needed to render rows and forms.
    const LOOKUPS: &'static [Lookup] = &[];

    fn columns() -> &'static [Column];

    fn cell(&self, column: usize, lookups: &Lookups) -> Cell;

    /// Shown in delete confirmations.
    fn display_name(&self) -> String;

    /// Values matched by the table search box.
    fn haystack(&self, lookups: &Lookups) -> Vec<String>;

    fn matches(&self, query: &str, lookups: &Lookups) -> bool {
        let query = query.trim().to_lowercase();
        query.is_empty()
            || self
                .haystack(lookups)
                .iter()
                .any(|value| value.to_lowercase().contains(&query))
    }

    fn form_fields(current: Option<&Self>, lookups: &Lookups) -> Vec<Field>;

    fn payload(values: &FormValues) -> Result<Self::Payload, FormError>;
}

/// French wording of the CRUD screens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Labels {
    pub title: &'static str,
    pub add: &'static str,
    pub edit: &'static str,
    pub delete: &'static str,
    /// "l’agence suivante"
    pub the_one: &'static str,
    /// "les agences suivantes"
    pub the_many: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Column {
    pub title: &'static str,
    pub sortable: bool,
}

impl Column {
    pub const fn sortable(title: &'static str) -> Self {
        Self {
            title,
            sortable: true,
        }
    }

    pub const fn plain(title: &'static str) -> Self {
        Self {
            title,
            sortable: false,
        }
    }
}

/// Typed table cell; formatting and sort order follow the type.
#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    Text(Option<String>),
    Number(Option<f64>),
    Money(Option<f64>),
    Percent(Option<f64>),
    Date(Option<String>),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(Some(value.into()))
    }

    pub fn display(&self) -> String {
        match self {
            Cell::Text(value) => value.clone().unwrap_or_else(|| "—".to_string()),
            Cell::Number(value) => value.map(|n| n.to_string()).unwrap_or_default(),
            Cell::Money(value) => value.map(fmt_money).unwrap_or_default(),
            Cell::Percent(value) => fmt_percent(to_pct(*value)),
            Cell::Date(value) => value.as_deref().map(fmt_date).unwrap_or_default(),
        }
    }

    /// Missing values first, numbers numerically, text case-insensitively.
    pub fn compare(&self, other: &Cell) -> Ordering {
        match (self.sort_number(), other.sort_number()) {
            (Some(a), Some(b)) => a.total_cmp(&b),
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (None, None) => self.sort_text().cmp(&other.sort_text()),
        }
    }

    fn sort_number(&self) -> Option<f64> {
        match self {
            Cell::Number(value) | Cell::Money(value) | Cell::Percent(value) => *value,
            Cell::Text(_) | Cell::Date(_) => None,
        }
    }

    fn sort_text(&self) -> String {
        match self {
            Cell::Text(value) | Cell::Date(value) => {
                value.as_deref().unwrap_or_default().to_lowercase()
            }
            Cell::Number(_) | Cell::Money(_) | Cell::Percent(_) => String::new(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Lookup {
    Agences,
    Departements,
    Communes,
    Entreprises,
    Exercices,
    Lots,
    Projets,
}

impl Lookup {
    /// Plural French name, as used in messages.
    pub fn label(self) -> &'static str {
        match self {
            Lookup::Agences => "agences",
            Lookup::Departements => "départements",
            Lookup::Communes => "communes",
            Lookup::Entreprises => "entreprises",
            Lookup::Exercices => "exercices",
            Lookup::Lots => "lots",
            Lookup::Projets => "projets",
        }
    }
}

/// Reference lists fetched alongside a page.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Lookups {
    pub agences: Vec<Agence>,
    pub departements: Vec<Departement>,
    pub communes: Vec<Commune>,
    pub entreprises: Vec<Entreprise>,
    pub exercices: Vec<Exercice>,
    pub lots: Vec<Lot>,
    pub projets: Vec<Projet>,
}

impl Lookups {
    pub fn agence_name(&self, commune: &Commune) -> Option<String> {
        commune
            .departement
            .resolve(&self.departements)
            .and_then(|departement| departement.agence.resolve(&self.agences))
            .map(|agence| agence.nom.clone())
    }

    pub fn departement_name(&self, commune: &Commune) -> Option<String> {
        commune
            .departement
            .resolve(&self.departements)
            .map(|departement| departement.nom.clone())
    }
}
