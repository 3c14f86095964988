use super::{Cell, Column, Identified, Labels, Lookups, Resource};
use crate::forms::{Choice, Field, FieldKind, FormError, FormValues};
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, PickFirst, serde_as};
use strum::IntoEnumIterator as _;

/// Progress state shared by lots and todos.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Deserialize,
    Serialize,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
)]
pub enum Statut {
    #[default]
    #[serde(rename = "NOT STARTED")]
    #[strum(serialize = "NOT STARTED")]
    NotStarted,
    #[serde(rename = "STARTED")]
    #[strum(serialize = "STARTED")]
    Started,
    #[serde(rename = "IN PROGRESS")]
    #[strum(serialize = "IN PROGRESS")]
    InProgress,
    #[serde(rename = "PAUSED")]
    #[strum(serialize = "PAUSED")]
    Paused,
    #[serde(rename = "DONE")]
    #[strum(serialize = "DONE")]
    Done,
    /// Any value this client does not know about.
    #[serde(other)]
    #[strum(serialize = "AUTRE")]
    Other,
}

impl Statut {
    pub fn choices() -> Vec<Choice> {
        Statut::iter()
            .filter(|statut| *statut != Statut::Other)
            .map(|statut| Choice::new(statut, statut.to_string()))
            .collect()
    }

    pub fn from_form(values: &FormValues) -> Result<Statut, FormError> {
        let value = values.required("statut", "Statut")?;
        value
            .parse::<Statut>()
            .ok()
            .filter(|statut| *statut != Statut::Other)
            .ok_or(FormError::Invalid {
                field: "Statut",
                value,
            })
    }
}

/// Sub-contract of a project.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Lot {
    pub id: i64,
    pub nom: String,
    #[serde(default)]
    pub statut: Statut,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub montant: Option<f64>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub pourcentage: Option<f64>,
    /// Project id.
    #[serde(default)]
    pub projet: Option<i64>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LotPayload {
    pub nom: String,
    pub statut: Statut,
    pub montant: String,
    pub pourcentage: String,
    pub projet: Option<i64>,
}

impl Identified for Lot {
    fn id(&self) -> i64 {
        self.id
    }
}

const COLUMNS: &[Column] = &[
    Column::sortable("Nom"),
    Column::sortable("Statut"),
    Column::sortable("Montant"),
    Column::sortable("Pourcentage"),
    Column::sortable("Projet (ID)"),
    Column::sortable("Créé le"),
    Column::sortable("MAJ le"),
];

impl Resource for Lot {
    type Payload = LotPayload;

    const ENDPOINT: &'static str = "lots/";
    const LABELS: Labels = Labels {
        title: "Gestion des Lots",
        add: "Ajouter un Lot",
        edit: "Modifier le Lot",
        delete: "Supprimer le Lot",
        the_one: "le lot suivant",
        the_many: "les lots suivants",
    };

    fn columns() -> &'static [Column] {
        COLUMNS
    }

    #[allow(clippy::cast_precision_loss)]
    fn cell(&self, column: usize, _lookups: &Lookups) -> Cell {
        match column {
            0 => Cell::text(&self.nom),
            1 => Cell::text(self.statut.to_string()),
            2 => Cell::Money(self.montant),
            3 => Cell::Percent(Some(self.pourcentage.unwrap_or_default())),
            4 => Cell::Number(self.projet.map(|id| id as f64)),
            5 => Cell::Date(self.created_at.clone()),
            _ => Cell::Date(self.updated_at.clone()),
        }
    }

    fn display_name(&self) -> String {
        self.nom.clone()
    }

    fn haystack(&self, _lookups: &Lookups) -> Vec<String> {
        let mut values = vec![self.nom.clone(), self.statut.to_string()];
        values.extend(self.montant.map(|v| v.to_string()));
        values.extend(self.pourcentage.map(|v| v.to_string()));
        values.extend(self.projet.map(|v| v.to_string()));
        values
    }

    fn form_fields(current: Option<&Self>, _lookups: &Lookups) -> Vec<Field> {
        vec![
            Field::new("nom", "Nom du lot", FieldKind::Text)
                .required()
                .value_opt(current.map(|l| &l.nom)),
            Field::new("statut", "Statut", FieldKind::Select(Statut::choices()))
                .required()
                .value(current.map(|l| l.statut).unwrap_or_default()),
            Field::new("montant", "Montant (XAF)", FieldKind::Number)
                .required()
                .value_opt(current.and_then(|l| l.montant)),
            Field::new("pourcentage", "Pourcentage", FieldKind::Number)
                .required()
                .value_opt(current.and_then(|l| l.pourcentage)),
            Field::new("projet", "ID Projet", FieldKind::Number)
                .value_opt(current.and_then(|l| l.projet)),
        ]
    }

    fn payload(values: &FormValues) -> Result<LotPayload, FormError> {
        Ok(LotPayload {
            nom: values.required("nom", "Nom du lot")?,
            statut: Statut::from_form(values)?,
            montant: values.decimal("montant", "Montant (XAF)")?,
            pourcentage: values.decimal("pourcentage", "Pourcentage")?,
            projet: values.opt_int("projet", "ID Projet")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statut_round_trips_server_spelling() {
        let statut: Statut = serde_json::from_str(r#""IN PROGRESS""#).unwrap();
        assert_eq!(statut, Statut::InProgress);
        assert_eq!(serde_json::to_string(&Statut::NotStarted).unwrap(), r#""NOT STARTED""#);
        assert_eq!("DONE".parse::<Statut>().unwrap(), Statut::Done);
    }

    #[test]
    fn unknown_statut_is_kept_as_other() {
        let lot: Lot =
            serde_json::from_str(r#"{"id": 1, "nom": "Gros oeuvre", "statut": "ARCHIVED"}"#)
                .unwrap();
        assert_eq!(lot.statut, Statut::Other);
        assert_eq!(lot.montant, None);
        assert_eq!(lot.projet, None);
    }

    #[test]
    fn choices_exclude_other() {
        let choices = Statut::choices();
        assert_eq!(choices.len(), 5);
        assert_eq!(choices[0].value, "NOT STARTED");
    }

    #[test]
    fn new_lot_defaults_to_not_started_without_project() {
        let mut values = FormValues::from_fields(&Lot::form_fields(None, &Lookups::default()));
        values.set("nom", "Voirie");
        values.set("montant", "1000");
        values.set("pourcentage", "0");
        let payload = Lot::payload(&values).unwrap();
        assert_eq!(payload.statut, Statut::NotStarted);
        assert_eq!(payload.projet, None);
        assert_eq!(
            serde_json::to_value(&payload).unwrap()["projet"],
            serde_json::Value::Null
        );
    }
}
