use super::{Cell, Column, Identified, Labels, Lookups, Resource};
use crate::forms::{Field, FieldKind, FormError, FormValues};
use serde::{Deserialize, Serialize};

/// Contractor company carrying out projects.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Entreprise {
    pub id: i64,
    pub nom: String,
    #[serde(default)]
    pub rcc: Option<String>,
    #[serde(default)]
    pub niu: Option<String>,
    #[serde(default)]
    pub promoteur: Option<String>,
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub siege_social: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EntreprisePayload {
    pub nom: String,
    pub rcc: String,
    pub niu: String,
    pub promoteur: String,
    pub contact: String,
    pub email: String,
    pub siege_social: String,
}

impl Identified for Entreprise {
    fn id(&self) -> i64 {
        self.id
    }
}

const COLUMNS: &[Column] = &[
    Column::sortable("Nom"),
    Column::sortable("RCC"),
    Column::sortable("NIU"),
    Column::sortable("Promoteur"),
    Column::sortable("Contact"),
    Column::sortable("Email"),
    Column::sortable("Siège social"),
    Column::sortable("Créé le"),
    Column::sortable("Mis à jour"),
];

impl Resource for Entreprise {
    type Payload = EntreprisePayload;

    const ENDPOINT: &'static str = "entreprises/";
    const LABELS: Labels = Labels {
        title: "Gestion des Entreprises",
        add: "Ajouter une Entreprise",
        edit: "Modifier l’Entreprise",
        delete: "Supprimer l’Entreprise",
        the_one: "l’entreprise suivante",
        the_many: "les entreprises suivantes",
    };

    fn columns() -> &'static [Column] {
        COLUMNS
    }

    fn cell(&self, column: usize, _lookups: &Lookups) -> Cell {
        match column {
            0 => Cell::text(&self.nom),
            1 => Cell::Text(self.rcc.clone()),
            2 => Cell::Text(self.niu.clone()),
            3 => Cell::Text(self.promoteur.clone()),
            4 => Cell::Text(self.contact.clone()),
            5 => Cell::Text(self.email.clone()),
            6 => Cell::Text(self.siege_social.clone()),
            7 => Cell::Date(self.created_at.clone()),
            _ => Cell::Date(self.updated_at.clone()),
        }
    }

    fn display_name(&self) -> String {
        self.nom.clone()
    }

    fn haystack(&self, _lookups: &Lookups) -> Vec<String> {
        [
            &self.rcc,
            &self.niu,
            &self.promoteur,
            &self.contact,
            &self.email,
            &self.siege_social,
        ]
        .into_iter()
        .flatten()
        .cloned()
        .chain(std::iter::once(self.nom.clone()))
        .collect()
    }

    fn form_fields(current: Option<&Self>, _lookups: &Lookups) -> Vec<Field> {
        let text = |name, label, value: Option<&Option<String>>| {
            Field::new(name, label, FieldKind::Text).value_opt(value.and_then(Option::as_ref))
        };
        vec![
            Field::new("nom", "Nom", FieldKind::Text)
                .required()
                .value_opt(current.map(|e| &e.nom)),
            text("rcc", "RCC", current.map(|e| &e.rcc)),
            text("niu", "NIU", current.map(|e| &e.niu)),
            text("promoteur", "Promoteur", current.map(|e| &e.promoteur)),
            text("contact", "Contact", current.map(|e| &e.contact)),
            Field::new("email", "Email", FieldKind::Email)
                .value_opt(current.and_then(|e| e.email.as_ref())),
            text("siege_social", "Siège social", current.map(|e| &e.siege_social)),
        ]
    }

    fn payload(values: &FormValues) -> Result<EntreprisePayload, FormError> {
        Ok(EntreprisePayload {
            nom: values.required("nom", "Nom")?,
            rcc: values.text("rcc"),
            niu: values.text("niu"),
            promoteur: values.text("promoteur"),
            contact: values.text("contact"),
            email: values.text("email"),
            siege_social: values.text("siege_social"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_covers_every_text_field() {
        let entreprise: Entreprise = serde_json::from_str(
            r#"{"id": 1, "nom": "BTP Sarl", "niu": "M0123", "siege_social": "Yaoundé", "email": null}"#,
        )
        .unwrap();
        let lookups = Lookups::default();
        assert!(entreprise.matches("m012", &lookups));
        assert!(entreprise.matches("yaound", &lookups));
        assert!(entreprise.matches("sarl", &lookups));
        assert!(!entreprise.matches("garoua", &lookups));
    }

    #[test]
    fn only_nom_is_required() {
        let mut values = FormValues::default();
        values.set("nom", "BTP Sarl");
        let payload = Entreprise::payload(&values).unwrap();
        assert_eq!(payload.nom, "BTP Sarl");
        assert_eq!(payload.siege_social, "");
    }
}
