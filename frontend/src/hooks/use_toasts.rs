use std::rc::Rc;

use gloo::timers::future::TimeoutFuture;
use shared::Notification;
use uuid::Uuid;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: Uuid,
    pub notification: Notification,
}

pub enum ToastAction {
    Push(Toast),
    Dismiss(Uuid),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ToastList {
    pub toasts: Vec<Toast>,
}

impl Reducible for ToastList {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut toasts = self.toasts.clone();
        match action {
            ToastAction::Push(toast) => toasts.push(toast),
            ToastAction::Dismiss(id) => toasts.retain(|toast| toast.id != id),
        }
        Rc::new(ToastList { toasts })
    }
}

pub struct UseToastsResult {
    pub toasts: Vec<Toast>,
    pub notify: Callback<Notification>,
    pub dismiss: Callback<Uuid>,
}

/// Transient notifications; each one dismisses itself after `duration_ms`.
#[hook]
pub fn use_toasts(duration_ms: u32) -> UseToastsResult {
    let list = use_reducer(ToastList::default);

    let notify = {
        let dispatcher = list.dispatcher();
        use_callback(duration_ms, move |notification: Notification, duration_ms| {
            let id = Uuid::new_v4();
            dispatcher.dispatch(ToastAction::Push(Toast { id, notification }));

            let dispatcher = dispatcher.clone();
            let duration_ms = *duration_ms;
            spawn_local(async move {
                TimeoutFuture::new(duration_ms).await;
                dispatcher.dispatch(ToastAction::Dismiss(id));
            });
        })
    };

    let dismiss = {
        let dispatcher = list.dispatcher();
        use_callback((), move |id: Uuid, _| {
            dispatcher.dispatch(ToastAction::Dismiss(id));
        })
    };

    UseToastsResult {
        toasts: list.toasts.clone(),
        notify,
        dismiss,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_push_and_dismiss() {
        let first = Toast {
            id: Uuid::new_v4(),
            notification: Notification::success("Class deleted"),
        };
        let second = Toast {
            id: Uuid::new_v4(),
            notification: Notification::error("Failed to delete teacher"),
        };

        let list = Rc::new(ToastList::default())
            .reduce(ToastAction::Push(first.clone()))
            .reduce(ToastAction::Push(second.clone()));
        assert_eq!(list.toasts.len(), 2);

        let list = list.reduce(ToastAction::Dismiss(first.id));
        assert_eq!(list.toasts, vec![second]);
    }
}
