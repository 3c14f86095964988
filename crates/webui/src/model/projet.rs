use super::{
    Agence, Cell, Column, Commune, Departement, Entreprise, Exercice, Identified, Labels, Lookup,
    Lookups, Ref, Resource,
};
use crate::forms::{Choice, Field, FieldKind, FormError, FormValues};
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, PickFirst, serde_as};

pub const PROJET_TYPES: [&str; 2] = ["INFRA", "ETUDE"];

/// Funded project of a commune, carried out by a company during an exercice.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Projet {
    pub id: i64,
    pub libelle: String,
    #[serde(default)]
    pub duree: Option<i64>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub montant_ht: Option<f64>,
    #[serde(default, rename = "type")]
    pub type_: Option<String>,
    #[serde(default)]
    pub numero_convention: Option<String>,
    #[serde(default)]
    pub date_debut: Option<String>,
    #[serde(default)]
    pub date_fin: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub entreprise: Option<Ref<Entreprise>>,
    #[serde(default)]
    pub commune: Option<Ref<Commune>>,
    #[serde(default)]
    pub exercice: Option<Ref<Exercice>>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub payment_percent: Option<f64>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub progress: Option<f64>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub time_consumed_percent: Option<f64>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProjetPayload {
    pub libelle: String,
    pub duree: i64,
    pub montant_ht: f64,
    #[serde(rename = "type")]
    pub type_: String,
    pub numero_convention: String,
    pub date_debut: String,
    pub date_fin: String,
    pub entreprise: i64,
    pub commune: i64,
    pub exercice: i64,
}

impl Identified for Projet {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Projet {
    pub fn commune_id(&self) -> Option<i64> {
        self.commune.as_ref().map(Ref::id)
    }

    pub fn exercice_id(&self) -> Option<i64> {
        self.exercice.as_ref().map(Ref::id)
    }

    pub fn entreprise<'a>(&'a self, lookups: &'a Lookups) -> Option<&'a Entreprise> {
        self.entreprise.as_ref()?.resolve(&lookups.entreprises)
    }

    pub fn commune<'a>(&'a self, lookups: &'a Lookups) -> Option<&'a Commune> {
        self.commune.as_ref()?.resolve(&lookups.communes)
    }

    pub fn departement<'a>(&'a self, lookups: &'a Lookups) -> Option<&'a Departement> {
        self.commune(lookups)?
            .departement
            .resolve(&lookups.departements)
    }

    pub fn agence<'a>(&'a self, lookups: &'a Lookups) -> Option<&'a Agence> {
        self.departement(lookups)?.agence.resolve(&lookups.agences)
    }

    pub fn exercice<'a>(&'a self, lookups: &'a Lookups) -> Option<&'a Exercice> {
        self.exercice.as_ref()?.resolve(&lookups.exercices)
    }

    /// Values matched by the project grid search box.
    pub fn grid_haystack(&self, lookups: &Lookups) -> Vec<String> {
        let mut values = vec![self.libelle.clone()];
        values.extend(self.entreprise(lookups).map(|e| e.nom.clone()));
        values.extend(self.commune(lookups).map(|c| c.nom.clone()));
        values.extend(self.agence(lookups).map(|a| a.nom.clone()));
        values.extend(
            [
                &self.numero_convention,
                &self.type_,
                &self.date_debut,
                &self.date_fin,
            ]
            .into_iter()
            .flatten()
            .cloned(),
        );
        values.extend(self.montant_ht.map(|v| v.to_string()));
        values
    }
}

/// Exercice and commune filters of the project table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProjetScope {
    pub exercice: Option<i64>,
    pub commune: Option<i64>,
}

impl ProjetScope {
    pub fn matches(&self, projet: &Projet) -> bool {
        self.exercice
            .is_none_or(|exercice| projet.exercice_id() == Some(exercice))
            && self
                .commune
                .is_none_or(|commune| projet.commune_id() == Some(commune))
    }
}

const COLUMNS: &[Column] = &[
    Column::sortable("Libellé"),
    Column::sortable("Durée"),
    Column::sortable("Montant HT"),
    Column::sortable("Date début"),
    Column::sortable("Date fin"),
    Column::sortable("Agence"),
    Column::sortable("Entreprise"),
    Column::sortable("Financement"),
    Column::sortable("Avancement"),
];

impl Resource for Projet {
    type Payload = ProjetPayload;

    const ENDPOINT: &'static str = "projets/";
    const LABELS: Labels = Labels {
        title: "Projets",
        add: "Ajouter un projet",
        edit: "Modifier le projet",
        delete: "Supprimer le projet",
        the_one: "le projet suivant",
        the_many: "ces projets",
    };
    const LOOKUPS: &'static [Lookup] = &[
        Lookup::Entreprises,
        Lookup::Communes,
        Lookup::Exercices,
        Lookup::Departements,
        Lookup::Agences,
    ];

    fn columns() -> &'static [Column] {
        COLUMNS
    }

    #[allow(clippy::cast_precision_loss)]
    fn cell(&self, column: usize, lookups: &Lookups) -> Cell {
        match column {
            0 => Cell::text(&self.libelle),
            1 => Cell::Number(self.duree.map(|d| d as f64)),
            2 => Cell::Money(self.montant_ht),
            3 => Cell::Date(self.date_debut.clone()),
            4 => Cell::Date(self.date_fin.clone()),
            5 => Cell::Text(self.agence(lookups).map(|a| a.nom.clone())),
            6 => Cell::Text(self.entreprise(lookups).map(|e| e.nom.clone())),
            7 => Cell::Percent(self.payment_percent),
            _ => Cell::Percent(self.progress),
        }
    }

    fn display_name(&self) -> String {
        self.libelle.clone()
    }

    fn haystack(&self, lookups: &Lookups) -> Vec<String> {
        let mut values = vec![self.libelle.clone()];
        values.extend(
            [
                &self.type_,
                &self.numero_convention,
                &self.date_debut,
                &self.date_fin,
                &self.status,
            ]
            .into_iter()
            .flatten()
            .cloned(),
        );
        values.extend(
            [
                self.montant_ht,
                self.progress,
                self.payment_percent,
                self.time_consumed_percent,
            ]
            .into_iter()
            .flatten()
            .map(|v| v.to_string()),
        );
        values.extend(self.entreprise(lookups).map(|e| e.nom.clone()));
        values.extend(self.commune(lookups).map(|c| c.nom.clone()));
        values.extend(self.departement(lookups).map(|d| d.nom.clone()));
        values.extend(self.agence(lookups).map(|a| a.nom.clone()));
        if let Some(exercice) = self.exercice(lookups) {
            values.push(exercice.annee.to_string());
            values.push(exercice.budget.to_string());
        }
        values
    }

    fn form_fields(current: Option<&Self>, lookups: &Lookups) -> Vec<Field> {
        let types = PROJET_TYPES.iter().map(|t| Choice::new(t, *t)).collect();
        let entreprises = Choice::from_items(
            &lookups.entreprises,
            |e| e.id,
            |e| format!("{} - {}", e.id, e.nom),
        );
        let communes = Choice::from_items(
            &lookups.communes,
            |c| c.id,
            |c| format!("{} - {}", c.id, c.nom),
        );
        let exercices = Choice::from_items(
            &lookups.exercices,
            |x| x.id,
            |x| format!("{} - {}", x.id, x.annee),
        );
        vec![
            Field::new("libelle", "Libellé", FieldKind::Text)
                .required()
                .value_opt(current.map(|p| &p.libelle)),
            Field::new("duree", "Durée", FieldKind::Number)
                .required()
                .value_opt(current.and_then(|p| p.duree)),
            Field::new("montant_ht", "Montant HT", FieldKind::Number)
                .required()
                .value_opt(current.and_then(|p| p.montant_ht)),
            Field::new("type", "Type", FieldKind::Select(types))
                .required()
                .value_opt(current.and_then(|p| p.type_.as_ref())),
            Field::new("numero_convention", "Numéro de convention", FieldKind::Text)
                .required()
                .value_opt(current.and_then(|p| p.numero_convention.as_ref())),
            Field::new("date_debut", "Début", FieldKind::Date)
                .required()
                .value_opt(current.and_then(|p| p.date_debut.as_deref()).map(date_part)),
            Field::new("date_fin", "Fin", FieldKind::Date)
                .required()
                .value_opt(current.and_then(|p| p.date_fin.as_deref()).map(date_part)),
            Field::new("entreprise", "Entreprise", FieldKind::Select(entreprises))
                .required()
                .value_opt(current.and_then(|p| p.entreprise.as_ref()).map(Ref::id)),
            Field::new("commune", "Commune", FieldKind::Select(communes))
                .required()
                .value_opt(current.and_then(Projet::commune_id)),
            Field::new("exercice", "Exercice", FieldKind::Select(exercices))
                .required()
                .value_opt(current.and_then(Projet::exercice_id)),
        ]
    }

    fn payload(values: &FormValues) -> Result<ProjetPayload, FormError> {
        Ok(ProjetPayload {
            libelle: values.required("libelle", "Libellé")?,
            duree: values.int("duree", "Durée")?,
            montant_ht: values.number("montant_ht", "Montant HT")?,
            type_: values.required("type", "Type")?,
            numero_convention: values.required("numero_convention", "Numéro de convention")?,
            date_debut: values.required("date_debut", "Début")?,
            date_fin: values.required("date_fin", "Fin")?,
            entreprise: values.int("entreprise", "Entreprise")?,
            commune: values.int("commune", "Commune")?,
            exercice: values.int("exercice", "Exercice")?,
        })
    }
}

/// `<input type="date">` only accepts `YYYY-MM-DD`.
fn date_part(value: &str) -> &str {
    value.split('T').next().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NESTED: &str = r#"{
        "id": 12,
        "libelle": "Construction marché",
        "duree": 6,
        "montant_ht": "25000000.00",
        "type": "INFRA",
        "numero_convention": "CV-2025-01",
        "date_debut": "2025-02-01",
        "date_fin": "2025-08-01",
        "entreprise": {"id": 4, "nom": "BTP Sarl"},
        "commune": {"id": 5, "nom": "Dschang",
            "departement": {"id": 3, "nom": "Menoua",
                "agence": {"id": 2, "nom": "Ouest", "code": "OU"}}},
        "exercice": {"id": 1, "annee": 2025, "budget": "1000"},
        "payment_percent": 30,
        "progress": "45.5"
    }"#;

    fn nested() -> Projet {
        serde_json::from_str(NESTED).unwrap()
    }

    #[test]
    fn nested_parents_resolve_without_lookups() {
        let projet = nested();
        let lookups = Lookups::default();
        assert_eq!(projet.agence(&lookups).unwrap().nom, "Ouest");
        assert_eq!(projet.cell(6, &lookups), Cell::text("BTP Sarl"));
        assert_eq!(projet.montant_ht, Some(25_000_000.0));
        assert_eq!(projet.progress, Some(45.5));
        assert_eq!(projet.commune_id(), Some(5));
    }

    #[test]
    fn ids_resolve_through_lookups() {
        let projet: Projet = serde_json::from_str(
            r#"{"id": 1, "libelle": "Forage", "commune": 5, "entreprise": 4, "exercice": 1}"#,
        )
        .unwrap();
        let lookups = Lookups {
            communes: serde_json::from_str(r#"[{"id": 5, "nom": "Dschang", "departement": 3}]"#)
                .unwrap(),
            departements: serde_json::from_str(r#"[{"id": 3, "nom": "Menoua", "agence": 2}]"#)
                .unwrap(),
            agences: serde_json::from_str(r#"[{"id": 2, "nom": "Ouest", "code": "OU"}]"#)
                .unwrap(),
            ..Lookups::default()
        };
        assert_eq!(projet.agence(&lookups).unwrap().nom, "Ouest");
        assert!(projet.matches("menoua", &lookups));
        assert!(projet.entreprise(&lookups).is_none());
    }

    #[test]
    fn grid_search_covers_company_and_convention() {
        let projet = nested();
        let haystack = projet.grid_haystack(&Lookups::default());
        assert!(haystack.contains(&"BTP Sarl".to_string()));
        assert!(haystack.contains(&"CV-2025-01".to_string()));
        assert!(haystack.contains(&"Ouest".to_string()));
    }

    #[test]
    fn scope_filters_by_exercice_and_commune() {
        let projet = nested();
        assert!(ProjetScope::default().matches(&projet));
        assert!(
            ProjetScope {
                exercice: Some(1),
                commune: Some(5)
            }
            .matches(&projet)
        );
        assert!(
            !ProjetScope {
                exercice: Some(2),
                commune: None
            }
            .matches(&projet)
        );
    }

    #[test]
    fn edit_form_prefills_parent_ids() {
        let projet = nested();
        let values = FormValues::from_fields(&Projet::form_fields(Some(&projet), &Lookups::default()));
        assert_eq!(values.get("entreprise"), "4");
        assert_eq!(values.get("commune"), "5");
        assert_eq!(values.get("type"), "INFRA");
        let payload = Projet::payload(&values).unwrap();
        assert_eq!(
            serde_json::to_value(payload).unwrap(),
            serde_json::json!({
                "libelle": "Construction marché",
                "duree": 6,
                "montant_ht": 25_000_000.0,
                "type": "INFRA",
                "numero_convention": "CV-2025-01",
                "date_debut": "2025-02-01",
                "date_fin": "2025-08-01",
                "entreprise": 4,
                "commune": 5,
                "exercice": 1
            })
        );
    }
}
