use super::{Cell, Column, Departement, Identified, Labels, Lookup, Lookups, Ref, Resource};
use crate::forms::{Choice, Field, FieldKind, FormError, FormValues};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Commune {
    pub id: i64,
    pub nom: String,
    pub departement: Ref<Departement>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CommunePayload {
    pub nom: String,
    pub departement: i64,
}

impl Identified for Commune {
    fn id(&self) -> i64 {
        self.id
    }
}

const COLUMNS: &[Column] = &[Column::sortable("Commune"), Column::sortable("Département")];

impl Resource for Commune {
    type Payload = CommunePayload;

    const ENDPOINT: &'static str = "communes/";
    const LABELS: Labels = Labels {
        title: "Gestion des Communes",
        add: "Ajouter une Commune",
        edit: "Modifier la Commune",
        delete: "Supprimer la Commune",
        the_one: "la commune suivante",
        the_many: "les communes suivantes",
    };
    const LOOKUPS: &'static [Lookup] = &[Lookup::Departements];

    fn columns() -> &'static [Column] {
        COLUMNS
    }

    fn cell(&self, column: usize, lookups: &Lookups) -> Cell {
        match column {
            0 => Cell::text(&self.nom),
            _ => Cell::Text(lookups.departement_name(self)),
        }
    }

    fn display_name(&self) -> String {
        self.nom.clone()
    }

    fn haystack(&self, lookups: &Lookups) -> Vec<String> {
        let mut values = vec![self.nom.clone()];
        values.extend(lookups.departement_name(self));
        values
    }

    fn form_fields(current: Option<&Self>, lookups: &Lookups) -> Vec<Field> {
        let departements =
            Choice::from_items(&lookups.departements, |d| d.id, |d| d.nom.clone());
        vec![
            Field::new("nom", "Nom", FieldKind::Text)
                .required()
                .value_opt(current.map(|c| &c.nom)),
            Field::new("departement", "Département", FieldKind::Select(departements))
                .required()
                .value_opt(current.map(|c| c.departement.id())),
        ]
    }

    fn payload(values: &FormValues) -> Result<CommunePayload, FormError> {
        Ok(CommunePayload {
            nom: values.required("nom", "Nom")?,
            departement: values.int("departement", "Département")?,
        })
    }
}
