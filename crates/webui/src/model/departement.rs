use super::{Agence, Cell, Column, Identified, Labels, Lookup, Lookups, Ref, Resource};
use crate::forms::{Choice, Field, FieldKind, FormError, FormValues};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Departement {
    pub id: i64,
    pub nom: String,
    pub agence: Ref<Agence>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// The API expects `{nom, agence: <id>}`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DepartementPayload {
    pub nom: String,
    pub agence: i64,
}

impl Identified for Departement {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Departement {
    pub fn agence<'a>(&'a self, lookups: &'a Lookups) -> Option<&'a Agence> {
        self.agence.resolve(&lookups.agences)
    }
}

const COLUMNS: &[Column] = &[Column::sortable("Département"), Column::sortable("Agence")];

impl Resource for Departement {
    type Payload = DepartementPayload;

    const ENDPOINT: &'static str = "departements/";
    const LABELS: Labels = Labels {
        title: "Gestion des Départements",
        add: "Ajouter un Département",
        edit: "Modifier le Département",
        delete: "Supprimer le Département",
        the_one: "le département suivant",
        the_many: "les départements suivants",
    };
    const LOOKUPS: &'static [Lookup] = &[Lookup::Agences];

    fn columns() -> &'static [Column] {
        COLUMNS
    }

    fn cell(&self, column: usize, lookups: &Lookups) -> Cell {
        match column {
            0 => Cell::text(&self.nom),
            _ => Cell::Text(self.agence(lookups).map(|a| a.nom.clone())),
        }
    }

    fn display_name(&self) -> String {
        self.nom.clone()
    }

    fn haystack(&self, lookups: &Lookups) -> Vec<String> {
        let mut values = vec![self.nom.clone()];
        if let Some(agence) = self.agence(lookups) {
            values.push(agence.nom.clone());
            values.push(agence.code.clone());
        }
        values
    }

    fn form_fields(current: Option<&Self>, lookups: &Lookups) -> Vec<Field> {
        let agences = Choice::from_items(&lookups.agences, |a| a.id, |a| a.nom.clone());
        vec![
            Field::new("nom", "Nom", FieldKind::Text)
                .required()
                .value_opt(current.map(|d| &d.nom)),
            Field::new("agence", "Agence", FieldKind::Select(agences))
                .required()
                .value_opt(current.map(|d| d.agence.id())),
        ]
    }

    fn payload(values: &FormValues) -> Result<DepartementPayload, FormError> {
        Ok(DepartementPayload {
            nom: values.required("nom", "Nom")?,
            agence: values.int("agence", "Agence")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookups() -> Lookups {
        Lookups {
            agences: serde_json::from_str(r#"[{"id": 2, "nom": "Ouest", "code": "OU"}]"#).unwrap(),
            ..Lookups::default()
        }
    }

    #[test]
    fn agence_name_resolved_from_lookups() {
        let departement: Departement =
            serde_json::from_str(r#"{"id": 10, "nom": "Mifi", "agence": 2}"#).unwrap();
        let lookups = lookups();
        assert_eq!(departement.cell(1, &lookups), Cell::text("Ouest"));
        assert!(departement.matches("ou", &lookups));
    }

    #[test]
    fn payload_sends_agence_id() {
        let mut values = FormValues::default();
        values.set("nom", "Mifi");
        values.set("agence", "2");
        let payload = Departement::payload(&values).unwrap();
        assert_eq!(
            serde_json::to_value(payload).unwrap(),
            serde_json::json!({"nom": "Mifi", "agence": 2})
        );
    }

    #[test]
    fn missing_agence_is_rejected() {
        let mut values = FormValues::default();
        values.set("nom", "Mifi");
        assert_eq!(
            Departement::payload(&values),
            Err(FormError::Missing("Agence"))
        );
    }
}
