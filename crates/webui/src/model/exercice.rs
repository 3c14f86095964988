use super::{Cell, Column, Identified, Labels, Lookups, Resource};
use crate::forms::{Field, FieldKind, FormError, FormValues};
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, PickFirst, serde_as};

/// Fiscal year with its budget and consumption figures.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Exercice {
    pub id: i64,
    pub annee: i32,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub budget: f64,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub taux_consomme: Option<f64>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub pourcentage_consomme: Option<f64>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ExercicePayload {
    pub annee: i32,
    pub budget: String,
    pub taux_consomme: String,
    pub pourcentage_consomme: String,
}

impl Identified for Exercice {
    fn id(&self) -> i64 {
        self.id
    }
}

const COLUMNS: &[Column] = &[
    Column::sortable("Année"),
    Column::sortable("Budget"),
    Column::sortable("Taux consommé"),
    Column::sortable("Pourcentage consommé"),
    Column::sortable("Créé le"),
    Column::sortable("MAJ le"),
];

impl Resource for Exercice {
    type Payload = ExercicePayload;

    const ENDPOINT: &'static str = "exercices/";
    const LABELS: Labels = Labels {
        title: "Gestion des Exercices",
        add: "Ajouter un Exercice",
        edit: "Modifier l’Exercice",
        delete: "Supprimer l’Exercice",
        the_one: "l’exercice suivant",
        the_many: "les exercices suivants",
    };

    fn columns() -> &'static [Column] {
        COLUMNS
    }

    fn cell(&self, column: usize, _lookups: &Lookups) -> Cell {
        match column {
            0 => Cell::Number(Some(f64::from(self.annee))),
            1 => Cell::Money(Some(self.budget)),
            2 => Cell::Percent(self.taux_consomme),
            3 => Cell::Percent(self.pourcentage_consomme),
            4 => Cell::Date(self.created_at.clone()),
            _ => Cell::Date(self.updated_at.clone()),
        }
    }

    fn display_name(&self) -> String {
        self.annee.to_string()
    }

    fn haystack(&self, _lookups: &Lookups) -> Vec<String> {
        let mut values = vec![self.annee.to_string(), self.budget.to_string()];
        values.extend(self.taux_consomme.map(|v| v.to_string()));
        values.extend(self.pourcentage_consomme.map(|v| v.to_string()));
        values
    }

    fn form_fields(current: Option<&Self>, _lookups: &Lookups) -> Vec<Field> {
        vec![
            Field::new("annee", "Année", FieldKind::Number)
                .required()
                .value_opt(current.map(|e| e.annee)),
            Field::new("budget", "Budget (XAF)", FieldKind::Number)
                .required()
                .value_opt(current.map(|e| e.budget)),
            Field::new("taux_consomme", "Taux consommé", FieldKind::Number)
                .required()
                .value_opt(current.and_then(|e| e.taux_consomme)),
            Field::new(
                "pourcentage_consomme",
                "Pourcentage consommé",
                FieldKind::Number,
            )
            .required()
            .value_opt(current.and_then(|e| e.pourcentage_consomme)),
        ]
    }

    fn payload(values: &FormValues) -> Result<ExercicePayload, FormError> {
        let annee = values.int("annee", "Année")?;
        Ok(ExercicePayload {
            annee: i32::try_from(annee).map_err(|_| FormError::Invalid {
                field: "Année",
                value: annee.to_string(),
            })?,
            budget: values.decimal("budget", "Budget (XAF)")?,
            taux_consomme: values.decimal("taux_consomme", "Taux consommé")?,
            pourcentage_consomme: values
                .decimal("pourcentage_consomme", "Pourcentage consommé")?,
        })
    }
}
