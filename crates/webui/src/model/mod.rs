//! Entities exposed by the FEICOM REST API.

use serde::Deserialize;

pub mod agence;
pub mod commune;
pub mod departement;
pub mod entreprise;
pub mod exercice;
pub mod lot;
pub mod projet;
pub mod resource;
pub mod session;
pub mod todo;
pub mod visite;

pub use agence::Agence;
pub use commune::Commune;
pub use departement::Departement;
pub use entreprise::Entreprise;
pub use exercice::Exercice;
pub use lot::{Lot, Statut};
pub use projet::Projet;
pub use resource::{Cell, Column, Labels, Lookup, Lookups, Resource};
pub use session::{Role, Session, User};
pub use todo::Todo;
pub use visite::Visite;

pub trait Identified {
    fn id(&self) -> i64;
}

/// Foreign key as sent by the server: either the bare id or the nested object.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Ref<T> {
    Id(i64),
    Expanded(Box<T>),
}

impl<T: Identified> Ref<T> {
    pub fn id(&self) -> i64 {
        match self {
            Ref::Id(id) => *id,
            Ref::Expanded(value) => value.id(),
        }
    }

    pub fn expanded(&self) -> Option<&T> {
        match self {
            Ref::Expanded(value) => Some(value),
            Ref::Id(_) => None,
        }
    }

    /// The nested object, or the matching entry of an already fetched list.
    pub fn resolve<'a>(&'a self, known: &'a [T]) -> Option<&'a T> {
        match self {
            Ref::Expanded(value) => Some(value),
            Ref::Id(id) => known.iter().find(|item| item.id() == *id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ref_accepts_id_or_object() {
        let by_id: Ref<Agence> = serde_json::from_str("7").unwrap();
        assert_eq!(by_id.id(), 7);
        assert!(by_id.expanded().is_none());

        let nested: Ref<Agence> =
            serde_json::from_str(r#"{"id": 3, "nom": "Littoral", "code": "LT"}"#).unwrap();
        assert_eq!(nested.id(), 3);
        assert_eq!(nested.expanded().unwrap().nom, "Littoral");
    }

    #[test]
    fn ref_resolves_against_known_list() {
        let known: Vec<Agence> = serde_json::from_str(
            r#"[{"id": 1, "nom": "Centre", "code": "CE"}, {"id": 2, "nom": "Ouest", "code": "OU"}]"#,
        )
        .unwrap();
        assert_eq!(Ref::<Agence>::Id(2).resolve(&known).unwrap().nom, "Ouest");
        assert!(Ref::<Agence>::Id(9).resolve(&known).is_none());
    }
}
