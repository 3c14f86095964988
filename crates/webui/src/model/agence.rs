use super::{Cell, Column, Identified, Labels, Lookups, Resource};
use crate::forms::{Field, FieldKind, FormError, FormValues};
use serde::{Deserialize, Serialize};

/// Regional agency, top of the administrative hierarchy.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Agence {
    pub id: i64,
    pub nom: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AgencePayload {
    pub nom: String,
    pub code: String,
}

impl Identified for Agence {
    fn id(&self) -> i64 {
        self.id
    }
}

const COLUMNS: &[Column] = &[Column::sortable("Nom"), Column::sortable("Code")];

impl Resource for Agence {
    type Payload = AgencePayload;

    const ENDPOINT: &'static str = "agences/";
    const LABELS: Labels = Labels {
        title: "Gestion des Agences",
        add: "Ajouter une Agence",
        edit: "Modifier l’Agence",
        delete: "Supprimer l’Agence",
        the_one: "l’agence suivante",
        the_many: "les agences suivantes",
    };

    fn columns() -> &'static [Column] {
        COLUMNS
    }

    fn cell(&self, column: usize, _lookups: &Lookups) -> Cell {
        match column {
            0 => Cell::text(&self.nom),
            _ => Cell::text(&self.code),
        }
    }

    fn display_name(&self) -> String {
        self.nom.clone()
    }

    fn haystack(&self, _lookups: &Lookups) -> Vec<String> {
        vec![self.nom.clone(), self.code.clone()]
    }

    fn form_fields(current: Option<&Self>, _lookups: &Lookups) -> Vec<Field> {
        vec![
            Field::new("nom", "Nom", FieldKind::Text)
                .required()
                .value_opt(current.map(|a| &a.nom)),
            Field::new("code", "Code", FieldKind::Text)
                .required()
                .value_opt(current.map(|a| &a.code)),
        ]
    }

    fn payload(values: &FormValues) -> Result<AgencePayload, FormError> {
        Ok(AgencePayload {
            nom: values.required("nom", "Nom")?,
            code: values.required("code", "Code")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_matches_name_or_code() {
        let agence = Agence {
            id: 1,
            nom: "Littoral".to_string(),
            code: "LT".to_string(),
            created_at: None,
            updated_at: None,
        };
        let lookups = Lookups::default();
        assert!(agence.matches("litt", &lookups));
        assert!(agence.matches(" lt ", &lookups));
        assert!(agence.matches("", &lookups));
        assert!(!agence.matches("ouest", &lookups));
    }

    #[test]
    fn edit_form_is_prefilled() {
        let agence = Agence {
            id: 4,
            nom: "Centre".to_string(),
            code: "CE".to_string(),
            created_at: None,
            updated_at: None,
        };
        let values = FormValues::from_fields(&Agence::form_fields(
            Some(&agence),
            &Lookups::default(),
        ));
        assert_eq!(
            Agence::payload(&values).unwrap(),
            AgencePayload {
                nom: "Centre".to_string(),
                code: "CE".to_string()
            }
        );
    }
}
