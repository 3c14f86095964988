//! Toasts confirming mutations and reporting failures.
//!
//! ```rust,ignore
//! let notifier = use_notifier();
//! notifier.success("Agence créée");
//! notifier.error(err.message_or("Erreur création"));
//! ```

use gloo::timers::callback::Timeout;
use std::{cell::Cell, rc::Rc};
use yew::prelude::*;

const AUTO_DISMISS_MS: u32 = 4000;
const FADE_OUT_MS: u32 = 300;

type ToastId = u32;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
}

impl ToastLevel {
    fn css_class(self) -> &'static str {
        match self {
            ToastLevel::Success => "toast-success",
            ToastLevel::Error => "toast-error",
        }
    }

    fn icon(self) -> &'static str {
        match self {
            ToastLevel::Success => "✓",
            ToastLevel::Error => "✕",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
struct Toast {
    id: ToastId,
    level: ToastLevel,
    message: String,
    fading_out: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
struct Toasts {
    shown: Vec<Toast>,
}

enum ToastAction {
    Push(ToastId, ToastLevel, String),
    FadeOut(ToastId),
    Remove(ToastId),
}

impl Reducible for Toasts {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            ToastAction::Push(id, level, message) => next.shown.push(Toast {
                id,
                level,
                message,
                fading_out: false,
            }),
            ToastAction::FadeOut(id) => {
                if let Some(toast) = next.shown.iter_mut().find(|toast| toast.id == id) {
                    toast.fading_out = true;
                }
            }
            ToastAction::Remove(id) => next.shown.retain(|toast| toast.id != id),
        }
        next.into()
    }
}

/// Handle given to pages through the context.
#[derive(Clone, PartialEq)]
pub struct Notifier {
    dispatcher: UseReducerDispatcher<Toasts>,
    next_id: Rc<Cell<ToastId>>,
}

impl Notifier {
    pub fn success(&self, message: impl Into<String>) {
        self.push(ToastLevel::Success, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(ToastLevel::Error, message.into());
    }

    fn push(&self, level: ToastLevel, message: String) {
        let id = self.next_id.get();
        self.next_id.set(id.wrapping_add(1));
        self.dispatcher.dispatch(ToastAction::Push(id, level, message));
        dismiss_later(self.dispatcher.clone(), id, AUTO_DISMISS_MS);
    }
}

fn dismiss_later(dispatcher: UseReducerDispatcher<Toasts>, id: ToastId, after_ms: u32) {
    Timeout::new(after_ms, move || {
        dispatcher.dispatch(ToastAction::FadeOut(id));
        Timeout::new(FADE_OUT_MS, move || dispatcher.dispatch(ToastAction::Remove(id))).forget();
    })
    .forget();
}

#[hook]
pub fn use_notifier() -> Notifier {
    use_context::<Notifier>().expect("Notifier context is set by NotificationProvider")
}

#[derive(Properties, PartialEq)]
pub struct NotificationProviderProps {
    pub children: Children,
}

#[function_component(NotificationProvider)]
pub fn notification_provider(props: &NotificationProviderProps) -> Html {
    let toasts = use_reducer(Toasts::default);
    let next_id = use_memo((), |()| Cell::new(0));
    let notifier = Notifier {
        dispatcher: toasts.dispatcher(),
        next_id,
    };
    let on_dismiss = {
        let dispatcher = toasts.dispatcher();
        Callback::from(move |id| dismiss_later(dispatcher.clone(), id, 0))
    };

    html! {
        <ContextProvider<Notifier> context={notifier}>
            { props.children.clone() }
            if !toasts.shown.is_empty() {
                <div class="toast-container">
                    { for toasts.shown.iter().map(|toast| {
                        let id = toast.id;
                        let onclick = on_dismiss.reform(move |_: MouseEvent| id);
                        let class = classes!(
                            "toast",
                            toast.level.css_class(),
                            toast.fading_out.then_some("toast-fading-out")
                        );
                        html! {
                            <div {class} key={id}>
                                <span class="toast-icon">{ toast.level.icon() }</span>
                                <span class="toast-message">{ &toast.message }</span>
                                <button class="toast-dismiss" {onclick} aria-label="Fermer">{"×"}</button>
                            </div>
                        }
                    }) }
                </div>
            }
        </ContextProvider<Notifier>>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toasts_fade_before_removal() {
        let toasts = Rc::new(Toasts::default())
            .reduce(ToastAction::Push(0, ToastLevel::Success, "ok".into()))
            .reduce(ToastAction::Push(1, ToastLevel::Error, "ko".into()));
        let toasts = toasts.reduce(ToastAction::FadeOut(0));
        assert!(toasts.shown[0].fading_out);
        assert!(!toasts.shown[1].fading_out);
        let toasts = toasts.reduce(ToastAction::Remove(0));
        assert_eq!(toasts.shown.len(), 1);
        assert_eq!(toasts.shown[0].message, "ko");
    }
}
