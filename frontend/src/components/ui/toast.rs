use shared::NotificationKind;
use uuid::Uuid;
use yew::prelude::*;

use crate::hooks::use_toasts::Toast;

#[derive(Properties, PartialEq)]
pub struct ToastListProps {
    pub toasts: Vec<Toast>,
    pub on_dismiss: Callback<Uuid>,
}

#[function_component(ToastList)]
pub fn toast_list(props: &ToastListProps) -> Html {
    html! {
        <div class="toast-container">
            {for props.toasts.iter().map(|toast| {
                let kind = match toast.notification.kind {
                    NotificationKind::Success => "toast success",
                    NotificationKind::Error => "toast error",
                    NotificationKind::Info => "toast info",
                };
                let onclick = {
                    let on_dismiss = props.on_dismiss.clone();
                    let id = toast.id;
                    Callback::from(move |_: MouseEvent| on_dismiss.emit(id))
                };

                html! {
                    <div key={toast.id.to_string()} class={kind} role="status">
                        <span class="toast-message">{&toast.notification.message}</span>
                        <button type="button" class="toast-close" {onclick}>{"×"}</button>
                    </div>
                }
            })}
        </div>
    }
}
