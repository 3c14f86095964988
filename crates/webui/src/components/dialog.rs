use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ModalProps {
    pub title: AttrValue,
    pub on_close: Callback<()>,
    /// Closing is refused while a request is in flight.
    #[prop_or_default]
    pub busy: bool,
    pub children: Children,
}

#[function_component(Modal)]
pub fn modal(
    ModalProps {
        title,
        on_close,
        busy,
        children,
    }: &ModalProps,
) -> Html {
    let close = {
        let on_close = on_close.clone();
        let busy = *busy;
        Callback::from(move |_: MouseEvent| {
            if !busy {
                on_close.emit(());
            }
        })
    };
    html! {
        <div class="modal-backdrop" onclick={close.clone()}>
            <div class="modal" role="dialog" aria-modal="true"
                onclick={Callback::from(|e: MouseEvent| e.stop_propagation())}>
                <div class="modal-header">
                    <h3>{ title }</h3>
                    <button class="modal-close" onclick={close} disabled={*busy} aria-label="Fermer">{"×"}</button>
                </div>
                <div class="modal-body">
                    { children.clone() }
                </div>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct DeleteConfirmProps {
    /// "la commune suivante" or "les communes suivantes".
    pub subject: AttrValue,
    pub names: Vec<String>,
    pub busy: bool,
    #[prop_or_default]
    pub error: Option<AttrValue>,
    pub on_confirm: Callback<()>,
    pub on_cancel: Callback<()>,
}

#[function_component(DeleteConfirm)]
pub fn delete_confirm(
    DeleteConfirmProps {
        subject,
        names,
        busy,
        error,
        on_confirm,
        on_cancel,
    }: &DeleteConfirmProps,
) -> Html {
    html! {
        <div class="delete-confirm">
            <p>{ format!("Voulez-vous vraiment supprimer {subject} ?") }</p>
            <p><b>{ names.join(", ") }</b></p>
            if let Some(error) = error {
                <p class="form-error">{ error }</p>
            }
            <div class="modal-footer">
                <button class="button-outline" onclick={on_cancel.reform(|_: MouseEvent| ())} disabled={*busy}>
                    {"Annuler"}
                </button>
                <button class="button-danger" onclick={on_confirm.reform(|_: MouseEvent| ())} disabled={*busy}>
                    { if *busy { "Suppression..." } else { "Supprimer" } }
                </button>
            </div>
        </div>
    }
}
