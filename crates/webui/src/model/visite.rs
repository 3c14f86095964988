use super::{Cell, Column, Identified, Labels, Lookup, Lookups, Projet, Ref, Resource};
use crate::forms::{Field, FieldKind, FormError, FormValues};
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, PickFirst, serde_as};

/// Site visit report on a project.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Visite {
    pub id: i64,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub projet: Option<Ref<Projet>>,
    #[serde(default)]
    pub observation: Option<String>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub payment_percent: Option<f64>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Blank optional fields are left out of the body.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VisitePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projet: Option<i64>,
    pub observation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_percent: Option<f64>,
}

impl Identified for Visite {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Visite {
    pub fn projet_id(&self) -> Option<i64> {
        self.projet.as_ref().map(Ref::id)
    }

    pub fn projet<'a>(&'a self, lookups: &'a Lookups) -> Option<&'a Projet> {
        self.projet.as_ref()?.resolve(&lookups.projets)
    }

    fn date_only(&self) -> Option<String> {
        self.date
            .as_deref()
            .and_then(|date| date.split('T').next())
            .map(str::to_string)
    }
}

const COLUMNS: &[Column] = &[
    Column::sortable("Date"),
    Column::sortable("Agence"),
    Column::sortable("Commune"),
    Column::sortable("Projet"),
    Column::sortable("Paiement"),
    Column::plain("Observation"),
];

impl Resource for Visite {
    type Payload = VisitePayload;

    const ENDPOINT: &'static str = "visites/";
    const LABELS: Labels = Labels {
        title: "Rapports de visite",
        add: "Ajouter une Visite",
        edit: "Modifier la Visite",
        delete: "Supprimer la Visite",
        the_one: "la visite suivante",
        the_many: "les visites suivantes",
    };
    const LOOKUPS: &'static [Lookup] = &[
        Lookup::Projets,
        Lookup::Communes,
        Lookup::Departements,
        Lookup::Agences,
    ];

    fn columns() -> &'static [Column] {
        COLUMNS
    }

    fn cell(&self, column: usize, lookups: &Lookups) -> Cell {
        let projet = self.projet(lookups);
        match column {
            0 => Cell::Date(self.date.clone()),
            1 => Cell::Text(projet.and_then(|p| p.agence(lookups)).map(|a| a.nom.clone())),
            2 => Cell::Text(projet.and_then(|p| p.commune(lookups)).map(|c| c.nom.clone())),
            3 => Cell::Text(projet.map(|p| p.libelle.clone())),
            4 => Cell::Percent(self.payment_percent),
            _ => Cell::Text(self.observation.clone().filter(|o| !o.is_empty())),
        }
    }

    fn display_name(&self) -> String {
        let date = self.date_only().unwrap_or_else(|| "—".to_string());
        match self.projet.as_ref() {
            Some(Ref::Expanded(projet)) => format!("{date} — {}", projet.libelle),
            Some(Ref::Id(id)) => format!("{date} — projet #{id}"),
            None => date,
        }
    }

    fn haystack(&self, lookups: &Lookups) -> Vec<String> {
        let mut values: Vec<String> = [&self.observation, &self.date]
            .into_iter()
            .flatten()
            .cloned()
            .collect();
        if let Some(projet) = self.projet(lookups) {
            values.push(projet.libelle.clone());
            values.extend(projet.commune(lookups).map(|c| c.nom.clone()));
            values.extend(projet.agence(lookups).map(|a| a.nom.clone()));
        }
        values
    }

    fn form_fields(current: Option<&Self>, _lookups: &Lookups) -> Vec<Field> {
        vec![
            Field::new("date", "Date", FieldKind::Date)
                .value_opt(current.and_then(Visite::date_only)),
            Field::new("projet", "ID Projet", FieldKind::Number)
                .value_opt(current.and_then(Visite::projet_id)),
            Field::new("observation", "Observation", FieldKind::TextArea)
                .value_opt(current.and_then(|v| v.observation.as_ref())),
            Field::new("payment_percent", "Paiement (%)", FieldKind::Number)
                .value_opt(current.and_then(|v| v.payment_percent)),
        ]
    }

    fn payload(values: &FormValues) -> Result<VisitePayload, FormError> {
        Ok(VisitePayload {
            date: values.optional("date"),
            projet: values.opt_int("projet", "ID Projet")?,
            observation: values.text("observation"),
            payment_percent: values.opt_number("payment_percent", "Paiement (%)")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_project_fills_location_columns() {
        let visite: Visite = serde_json::from_str(
            r#"{"id": 3, "date": "2025-03-10T09:00:00Z", "observation": "RAS",
                "payment_percent": "20.00",
                "projet": {"id": 12, "libelle": "Marché",
                    "commune": {"id": 5, "nom": "Dschang",
                        "departement": {"id": 3, "nom": "Menoua",
                            "agence": {"id": 2, "nom": "Ouest"}}}}}"#,
        )
        .unwrap();
        let lookups = Lookups::default();
        assert_eq!(visite.cell(1, &lookups), Cell::text("Ouest"));
        assert_eq!(visite.cell(2, &lookups), Cell::text("Dschang"));
        assert_eq!(visite.cell(3, &lookups), Cell::text("Marché"));
        assert_eq!(visite.projet_id(), Some(12));
        assert!(visite.matches("dsch", &lookups));
        assert_eq!(visite.display_name(), "2025-03-10 — Marché");
    }

    #[test]
    fn blank_optional_fields_are_omitted() {
        let mut values = FormValues::default();
        values.set("observation", "Chantier arrêté");
        let payload = Visite::payload(&values).unwrap();
        assert_eq!(
            serde_json::to_value(payload).unwrap(),
            serde_json::json!({"observation": "Chantier arrêté"})
        );
    }

    #[test]
    fn edit_form_keeps_date_part_only() {
        let visite: Visite =
            serde_json::from_str(r#"{"id": 3, "date": "2025-03-10T09:00:00Z", "projet": 12}"#)
                .unwrap();
        let values = FormValues::from_fields(&Visite::form_fields(Some(&visite), &Lookups::default()));
        assert_eq!(values.get("date"), "2025-03-10");
        assert_eq!(values.get("projet"), "12");
    }
}
