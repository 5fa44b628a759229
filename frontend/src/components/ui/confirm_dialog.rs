use web_sys::MouseEvent;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ConfirmDialogProps {
    pub is_open: bool,
    pub title: AttrValue,
    pub message: AttrValue,
    #[prop_or(AttrValue::Static("Delete"))]
    pub confirm_label: AttrValue,
    #[prop_or_default]
    pub busy: bool,
    pub on_confirm: Callback<()>,
    pub on_cancel: Callback<()>,
}

#[function_component(ConfirmDialog)]
pub fn confirm_dialog(props: &ConfirmDialogProps) -> Html {
    let on_backdrop_click = {
        let on_cancel = props.on_cancel.clone();
        let busy = props.busy;
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            if !busy {
                on_cancel.emit(());
            }
        })
    };

    let on_modal_click = Callback::from(|e: MouseEvent| {
        e.stop_propagation();
    });

    let on_confirm_click = {
        let on_confirm = props.on_confirm.clone();
        Callback::from(move |_: MouseEvent| on_confirm.emit(()))
    };

    let on_cancel_click = {
        let on_cancel = props.on_cancel.clone();
        Callback::from(move |_: MouseEvent| on_cancel.emit(()))
    };

    if !props.is_open {
        return html! {};
    }

    html! {
        <div class="modal-backdrop" onclick={on_backdrop_click}>
            <div class="modal confirm-dialog" onclick={on_modal_click}>
                <h3 class="modal-title">{props.title.clone()}</h3>
                <p class="modal-message">{props.message.clone()}</p>
                <div class="modal-buttons">
                    <button
                        type="button"
                        class="btn btn-secondary"
                        onclick={on_cancel_click}
                        disabled={props.busy}
                    >
                        {"Cancel"}
                    </button>
                    <button
                        type="button"
                        class="btn btn-danger"
                        onclick={on_confirm_click}
                        disabled={props.busy}
                    >
                        {if props.busy { AttrValue::Static("Working...") } else { props.confirm_label.clone() }}
                    </button>
                </div>
            </div>
        </div>
    }
}
