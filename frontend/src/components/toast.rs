use yew::prelude::*;

use crate::hooks::use_toasts::Toast;

#[derive(Properties, PartialEq)]
pub struct ToastStackProps {
    pub toasts: Vec<Toast>,
    pub on_dismiss: Callback<u32>,
}

#[function_component(ToastStack)]
pub fn toast_stack(props: &ToastStackProps) -> Html {
    if props.toasts.is_empty() {
        return html! {};
    }

    html! {
        <div class="toast-stack" role="status">
            {for props.toasts.iter().map(|toast| {
                let on_dismiss = {
                    let on_dismiss = props.on_dismiss.clone();
                    let id = toast.id;
                    Callback::from(move |_: MouseEvent| on_dismiss.emit(id))
                };
                html! {
                    <div key={toast.id} class={classes!("toast", toast.notification.kind.css_class())}>
                        <span class="toast-message">{&toast.notification.message}</span>
                        <button class="toast-close" onclick={on_dismiss} aria-label="Dismiss">{"×"}</button>
                    </div>
                }
            })}
        </div>
    }
}
