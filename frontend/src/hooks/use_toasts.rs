use std::rc::Rc;

use gloo::timers::callback::Timeout;
use shared::notify::Notification;
use yew::prelude::*;

use crate::components::toast::ToastStack;
use crate::services::logging::Logger;

/// How long a toast stays up unless dismissed
const TOAST_TIMEOUT_MS: u32 = 4_000;

#[derive(Clone, PartialEq)]
pub struct Toast {
    pub id: u32,
    pub notification: Notification,
}

#[derive(Clone, PartialEq, Default)]
pub struct ToastList {
    pub toasts: Vec<Toast>,
}

pub enum ToastAction {
    Push(Toast),
    Dismiss(u32),
}

impl Reducible for ToastList {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut toasts = self.toasts.clone();
        match action {
            ToastAction::Push(toast) => toasts.push(toast),
            ToastAction::Dismiss(id) => toasts.retain(|toast| toast.id != id),
        }
        Rc::new(Self { toasts })
    }
}

#[derive(Clone, PartialEq)]
pub struct ToastContext {
    pub toasts: Vec<Toast>,
    pub push: Callback<Notification>,
    pub dismiss: Callback<u32>,
}

#[derive(Properties, PartialEq)]
pub struct ToastProviderProps {
    #[prop_or_default]
    pub children: Html,
}

#[function_component(ToastProvider)]
pub fn toast_provider(props: &ToastProviderProps) -> Html {
    let list = use_reducer(ToastList::default);
    let next_id = use_mut_ref(|| 0u32);

    let dismiss = {
        let dispatcher = list.dispatcher();
        use_callback((), move |id: u32, _| dispatcher.dispatch(ToastAction::Dismiss(id)))
    };

    let push = {
        let dispatcher = list.dispatcher();
        use_callback((), move |notification: Notification, _| {
            let id = {
                let mut next = next_id.borrow_mut();
                *next += 1;
                *next
            };
            if notification.is_error() {
                Logger::warn_with_component("toast", &notification.message);
            }
            dispatcher.dispatch(ToastAction::Push(Toast { id, notification }));

            let dispatcher = dispatcher.clone();
            Timeout::new(TOAST_TIMEOUT_MS, move || dispatcher.dispatch(ToastAction::Dismiss(id))).forget();
        })
    };

    let context = ToastContext {
        toasts: list.toasts.clone(),
        push,
        dismiss: dismiss.clone(),
    };

    html! {
        <ContextProvider<ToastContext> context={context}>
            { props.children.clone() }
            <ToastStack toasts={list.toasts.clone()} on_dismiss={dismiss} />
        </ContextProvider<ToastContext>>
    }
}

/// Raise toasts from anywhere under `ToastProvider`
#[hook]
pub fn use_toasts() -> Callback<Notification> {
    match use_context::<ToastContext>() {
        Some(context) => context.push,
        None => {
            Logger::error_with_component("toast", "use_toasts called outside ToastProvider");
            Callback::from(|notification: Notification| {
                log::info!("{}", notification.message);
            })
        }
    }
}
