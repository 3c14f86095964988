use super::{Cell, Column, Identified, Labels, Lookup, Lookups, Lot, Ref, Resource, Statut};
use crate::forms::{Choice, Field, FieldKind, FormError, FormValues};
use serde::{Deserialize, Serialize};

/// Task tracked under a lot.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Todo {
    pub id: i64,
    pub nom: String,
    #[serde(default)]
    pub statut: Statut,
    #[serde(default)]
    pub lot: Option<Ref<Lot>>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TodoPayload {
    pub nom: String,
    pub statut: Statut,
    pub lot: i64,
}

impl Identified for Todo {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Todo {
    /// Name of the parent lot, `Lot #<id>` when the lot list does not know it.
    pub fn lot_name(&self, lookups: &Lookups) -> Option<String> {
        let lot = self.lot.as_ref()?;
        Some(
            lot.resolve(&lookups.lots)
                .map_or_else(|| format!("Lot #{}", lot.id()), |l| l.nom.clone()),
        )
    }
}

const COLUMNS: &[Column] = &[
    Column::sortable("Nom"),
    Column::sortable("Statut"),
    Column::sortable("Lot"),
    Column::sortable("Créé le"),
    Column::sortable("MAJ le"),
];

impl Resource for Todo {
    type Payload = TodoPayload;

    const ENDPOINT: &'static str = "todos/";
    const LABELS: Labels = Labels {
        title: "Gestion des Todos",
        add: "Ajouter un Todo",
        edit: "Modifier le Todo",
        delete: "Supprimer le Todo",
        the_one: "le todo suivant",
        the_many: "les todos suivants",
    };
    const LOOKUPS: &'static [Lookup] = &[Lookup::Lots];

    fn columns() -> &'static [Column] {
        COLUMNS
    }

    fn cell(&self, column: usize, lookups: &Lookups) -> Cell {
        match column {
            0 => Cell::text(&self.nom),
            1 => Cell::text(self.statut.to_string()),
            2 => Cell::Text(self.lot_name(lookups)),
            3 => Cell::Date(self.created_at.clone()),
            _ => Cell::Date(self.updated_at.clone()),
        }
    }

    fn display_name(&self) -> String {
        self.nom.clone()
    }

    fn haystack(&self, lookups: &Lookups) -> Vec<String> {
        let mut values = vec![self.nom.clone(), self.statut.to_string()];
        values.extend(self.lot_name(lookups));
        values
    }

    fn form_fields(current: Option<&Self>, lookups: &Lookups) -> Vec<Field> {
        let lots = Choice::from_items(&lookups.lots, |l| l.id, |l| l.nom.clone());
        vec![
            Field::new("nom", "Nom", FieldKind::Text)
                .required()
                .value_opt(current.map(|t| &t.nom)),
            Field::new("statut", "Statut", FieldKind::Select(Statut::choices()))
                .required()
                .value(current.map(|t| t.statut).unwrap_or_default()),
            Field::new("lot", "Lot", FieldKind::Select(lots))
                .required()
                .value_opt(current.and_then(|t| t.lot.as_ref()).map(Ref::id)),
        ]
    }

    fn payload(values: &FormValues) -> Result<TodoPayload, FormError> {
        Ok(TodoPayload {
            nom: values.required("nom", "Nom")?,
            statut: Statut::from_form(values)?,
            lot: values.int("lot", "Lot")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lot_name_falls_back_to_id() {
        let todo: Todo =
            serde_json::from_str(r#"{"id": 1, "nom": "Coffrage", "statut": "DONE", "lot": 8}"#)
                .unwrap();
        assert_eq!(todo.cell(2, &Lookups::default()), Cell::text("Lot #8"));

        let lookups = Lookups {
            lots: serde_json::from_str(r#"[{"id": 8, "nom": "Gros oeuvre"}]"#).unwrap(),
            ..Lookups::default()
        };
        assert_eq!(todo.cell(2, &lookups), Cell::text("Gros oeuvre"));
        assert!(todo.matches("gros", &lookups));
        assert!(todo.matches("done", &lookups));
    }

    #[test]
    fn lot_is_required() {
        let mut values = FormValues::from_fields(&Todo::form_fields(None, &Lookups::default()));
        values.set("nom", "Coffrage");
        assert_eq!(Todo::payload(&values), Err(FormError::Missing("Lot")));
        values.set("lot", "8");
        assert_eq!(
            serde_json::to_value(Todo::payload(&values).unwrap()).unwrap(),
            serde_json::json!({"nom": "Coffrage", "statut": "NOT STARTED", "lot": 8})
        );
    }
}
