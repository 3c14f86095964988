use crate::{
    forms::{Field, FieldKind, FormValues},
    model::{Lookups, Resource},
};
use std::rc::Rc;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct EntityFormProps<R: Resource> {
    /// Row being edited; `None` for a creation.
    #[prop_or_default]
    pub current: Option<R>,
    pub lookups: Rc<Lookups>,
    pub busy: bool,
    /// Error returned by the server for the last submission.
    #[prop_or_default]
    pub error: Option<AttrValue>,
    pub on_submit: Callback<R::Payload>,
    pub on_cancel: Callback<()>,
}

/// Form built from `R::form_fields`, validated locally before `on_submit` fires.
#[function_component(EntityForm)]
pub fn entity_form<R: Resource>(
    EntityFormProps {
        current,
        lookups,
        busy,
        error,
        on_submit,
        on_cancel,
    }: &EntityFormProps<R>,
) -> Html {
    let fields = use_memo((current.clone(), lookups.clone()), |(current, lookups)| {
        R::form_fields(current.as_ref(), lookups)
    });
    let values = {
        let fields = fields.clone();
        use_reducer(move || FormValues::from_fields(&fields))
    };
    let invalid = use_state(|| None::<String>);

    let onsubmit = {
        let values = values.clone();
        let invalid = invalid.clone();
        let on_submit = on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            match R::payload(&values) {
                Ok(payload) => {
                    invalid.set(None);
                    on_submit.emit(payload);
                }
                Err(err) => invalid.set(Some(err.to_string())),
            }
        })
    };

    let shown_error: Option<AttrValue> = invalid
        .as_ref()
        .map(|message| AttrValue::from(message.clone()))
        .or_else(|| error.clone());

    html! {
        <form class="entity-form" {onsubmit} novalidate={true}>
            { for fields.iter().map(|field| render_field(field, values.get(field.name), &values.dispatcher())) }
            if let Some(message) = shown_error {
                <p class="form-error">{ message }</p>
            }
            <div class="modal-footer">
                <button type="button" class="button-outline"
                    onclick={on_cancel.reform(|_: MouseEvent| ())} disabled={*busy}>
                    {"Annuler"}
                </button>
                <button type="submit" class="button-primary" disabled={*busy}>
                    { if *busy { "Enregistrement..." } else { "Valider" } }
                </button>
            </div>
        </form>
    }
}

fn render_field(field: &Field, value: &str, dispatcher: &UseReducerDispatcher<FormValues>) -> Html {
    let name = field.name;
    let id = format!("field-{name}");
    let input = match &field.kind {
        FieldKind::Select(choices) => {
            let dispatcher = dispatcher.clone();
            let onchange = Callback::from(move |e: Event| {
                let value = e.target_unchecked_into::<HtmlSelectElement>().value();
                dispatcher.dispatch((name, value));
            });
            html! {
                <select id={id.clone()} {onchange} required={field.required}>
                    <option value="" selected={value.is_empty()} disabled={field.required}>
                        {"Sélectionnez"}
                    </option>
                    { for choices.iter().map(|choice| html! {
                        <option value={choice.value.clone()} selected={choice.value == value}>
                            { &choice.label }
                        </option>
                    }) }
                </select>
            }
        }
        FieldKind::TextArea => {
            let dispatcher = dispatcher.clone();
            let oninput = Callback::from(move |e: InputEvent| {
                let value = e.target_unchecked_into::<HtmlTextAreaElement>().value();
                dispatcher.dispatch((name, value));
            });
            html! {
                <textarea id={id.clone()} rows="4" value={value.to_string()} {oninput}
                    required={field.required} />
            }
        }
        kind => {
            let dispatcher = dispatcher.clone();
            let oninput = Callback::from(move |e: InputEvent| {
                let value = e.target_unchecked_into::<HtmlInputElement>().value();
                dispatcher.dispatch((name, value));
            });
            html! {
                <input id={id.clone()} type={kind.input_type()} value={value.to_string()} {oninput}
                    step={matches!(kind, FieldKind::Number).then_some("any")}
                    required={field.required} />
            }
        }
    };
    html! {
        <div class="form-field" key={name}>
            <label for={id}>
                { field.label }
                if field.required { <span class="required">{" *"}</span> }
            </label>
            { input }
        </div>
    }
}
