use std::rc::Rc;

use shared::{ApiResult, ClassName, ClassTiming, Notification, SchoolApi, Teacher};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::logging::Logger;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReferenceLists {
    pub classes: Vec<ClassName>,
    pub times: Vec<ClassTiming>,
    pub teachers: Vec<Teacher>,
    /// Lists still being fetched
    pub pending: u8,
}

impl ReferenceLists {
    pub fn loading(&self) -> bool {
        self.pending > 0
    }
}

fn settle<T>(
    result: ApiResult<Vec<T>>,
    noun: &str,
    handle: &UseStateHandle<Vec<T>>,
    on_notify: &Callback<Notification>,
) {
    match result {
        Ok(items) => handle.set(items),
        Err(e) => {
            Logger::error_with_component(
                "reference-lists-hook",
                &format!("Failed to load {}: {}", noun, e),
            );
            on_notify.emit(Notification::error(format!("Failed to load {}: {}", noun, e)));
        }
    }
}

/// Classes, time slots and teachers, fetched concurrently on mount. Each
/// list fills in as soon as its own response arrives.
#[hook]
pub fn use_reference_lists(api: &SchoolApi, on_notify: &Callback<Notification>) -> ReferenceLists {
    let classes = use_state(Vec::<ClassName>::new);
    let times = use_state(Vec::<ClassTiming>::new);
    let teachers = use_state(Vec::<Teacher>::new);
    let pending = use_reducer(|| PendingCount(3));

    {
        let api = api.clone();
        let on_notify = on_notify.clone();
        let classes = classes.clone();
        let times = times.clone();
        let teachers = teachers.clone();
        let pending = pending.dispatcher();

        use_effect_with((), move |_| {
            {
                let api = api.clone();
                let on_notify = on_notify.clone();
                let pending = pending.clone();
                spawn_local(async move {
                    settle(api.classes.get().await, "classes", &classes, &on_notify);
                    pending.dispatch(());
                });
            }
            {
                let api = api.clone();
                let on_notify = on_notify.clone();
                let pending = pending.clone();
                spawn_local(async move {
                    settle(api.timings.get().await, "class times", &times, &on_notify);
                    pending.dispatch(());
                });
            }
            spawn_local(async move {
                settle(api.teachers.get().await, "teachers", &teachers, &on_notify);
                pending.dispatch(());
            });
            || ()
        });
    }

    ReferenceLists {
        classes: (*classes).clone(),
        times: (*times).clone(),
        teachers: (*teachers).clone(),
        pending: pending.0,
    }
}

/// Counts down as each fetch settles.
#[derive(PartialEq)]
struct PendingCount(u8);

impl Reducible for PendingCount {
    type Action = ();

    fn reduce(self: Rc<Self>, _action: ()) -> Rc<Self> {
        Rc::new(PendingCount(self.0.saturating_sub(1)))
    }
}
