//! Declarative entity forms: field descriptions and the values typed into them.

use indexmap::IndexMap;
use std::rc::Rc;
use yew::Reducible;

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum FormError {
    #[error("Le champ « {0} » est obligatoire")]
    Missing(&'static str),
    #[error("Valeur invalide pour « {field} » : {value}")]
    Invalid { field: &'static str, value: String },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Choice {
    pub value: String,
    pub label: String,
}

impl Choice {
    pub fn new(value: impl ToString, label: impl Into<String>) -> Self {
        Self {
            value: value.to_string(),
            label: label.into(),
        }
    }

    /// Options over a fetched reference list.
    pub fn from_items<T>(
        items: &[T],
        value: impl Fn(&T) -> i64,
        label: impl Fn(&T) -> String,
    ) -> Vec<Choice> {
        items
            .iter()
            .map(|item| Choice::new(value(item), label(item)))
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum FieldKind {
    Text,
    Email,
    Number,
    Date,
    TextArea,
    Select(Vec<Choice>),
}

impl FieldKind {
    pub fn input_type(&self) -> &'static str {
        match self {
            FieldKind::Email => "email",
            FieldKind::Number => "number",
            FieldKind::Date => "date",
            FieldKind::Text | FieldKind::TextArea | FieldKind::Select(_) => "text",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    /// Initial value.
    pub value: String,
}

impl Field {
    pub fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: false,
            value: String::new(),
        }
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub fn value(mut self, value: impl ToString) -> Self {
        self.value = value.to_string();
        self
    }

    #[must_use]
    pub fn value_opt<T: ToString>(self, value: Option<T>) -> Self {
        match value {
            Some(value) => self.value(value),
            None => self,
        }
    }
}

/// Current text of every field, keyed by field name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormValues(IndexMap<&'static str, String>);

impl FormValues {
    pub fn from_fields(fields: &[Field]) -> Self {
        Self(
            fields
                .iter()
                .map(|field| (field.name, field.value.clone()))
                .collect(),
        )
    }

    pub fn set(&mut self, name: &'static str, value: impl Into<String>) {
        self.0.insert(name, value.into());
    }

    pub fn get(&self, name: &str) -> &str {
        self.0.get(name).map_or("", String::as_str)
    }

    pub fn text(&self, name: &str) -> String {
        self.get(name).to_string()
    }

    pub fn optional(&self, name: &str) -> Option<String> {
        let value = self.get(name).trim();
        (!value.is_empty()).then(|| value.to_string())
    }

    pub fn required(&self, name: &str, label: &'static str) -> Result<String, FormError> {
        self.optional(name).ok_or(FormError::Missing(label))
    }

    pub fn int(&self, name: &str, label: &'static str) -> Result<i64, FormError> {
        self.opt_int(name, label)?.ok_or(FormError::Missing(label))
    }

    pub fn opt_int(&self, name: &str, label: &'static str) -> Result<Option<i64>, FormError> {
        self.optional(name)
            .map(|value| {
                value.parse().map_err(|_| FormError::Invalid {
                    field: label,
                    value,
                })
            })
            .transpose()
    }

    pub fn number(&self, name: &str, label: &'static str) -> Result<f64, FormError> {
        self.opt_number(name, label)?
            .ok_or(FormError::Missing(label))
    }

    /// Accepts both `12.5` and `12,5`.
    pub fn opt_number(&self, name: &str, label: &'static str) -> Result<Option<f64>, FormError> {
        self.optional(name)
            .map(|value| {
                value
                    .replace(',', ".")
                    .parse::<f64>()
                    .ok()
                    .filter(|n| n.is_finite())
                    .ok_or(FormError::Invalid {
                        field: label,
                        value,
                    })
            })
            .transpose()
    }

    /// Decimal sent to the server as a string, the way Django decimal fields expect it.
    pub fn decimal(&self, name: &str, label: &'static str) -> Result<String, FormError> {
        self.number(name, label).map(|n| n.to_string())
    }
}

impl Reducible for FormValues {
    type Action = (&'static str, String);

    fn reduce(self: Rc<Self>, (name, value): Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        next.set(name, value);
        next.into()
    }
}
