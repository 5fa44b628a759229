use std::rc::Rc;

use async_trait::async_trait;
use shared::{
    ApiResult, AttendanceRecord, ClassName, ClassTiming, ExpenseRecord, FeeRecord, IncomeRecord,
    ListView, Notification, SchoolApi, Searchable, Student, Teacher,
};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::logging::Logger;

/// A backend collection shown as a searchable, paginated table with a
/// delete action per row.
#[async_trait(?Send)]
pub trait TableResource: Searchable + Clone + PartialEq + 'static {
    /// Singular noun used in notifications ("class", "student", ...)
    const NOUN: &'static str;

    async fn fetch(api: &SchoolApi) -> ApiResult<Vec<Self>>;

    async fn remove(api: &SchoolApi, id: i64) -> ApiResult<()>;
}

#[async_trait(?Send)]
impl TableResource for ClassName {
    const NOUN: &'static str = "class";

    async fn fetch(api: &SchoolApi) -> ApiResult<Vec<Self>> {
        api.classes.get().await
    }

    async fn remove(api: &SchoolApi, id: i64) -> ApiResult<()> {
        api.classes.delete(id).await
    }
}

#[async_trait(?Send)]
impl TableResource for ClassTiming {
    const NOUN: &'static str = "class time";

    async fn fetch(api: &SchoolApi) -> ApiResult<Vec<Self>> {
        api.timings.get().await
    }

    async fn remove(api: &SchoolApi, id: i64) -> ApiResult<()> {
        api.timings.delete(id).await
    }
}

#[async_trait(?Send)]
impl TableResource for Teacher {
    const NOUN: &'static str = "teacher";

    async fn fetch(api: &SchoolApi) -> ApiResult<Vec<Self>> {
        api.teachers.get().await
    }

    async fn remove(api: &SchoolApi, id: i64) -> ApiResult<()> {
        api.teachers.delete(id).await
    }
}

#[async_trait(?Send)]
impl TableResource for Student {
    const NOUN: &'static str = "student";

    async fn fetch(api: &SchoolApi) -> ApiResult<Vec<Self>> {
        api.students.get().await
    }

    async fn remove(api: &SchoolApi, id: i64) -> ApiResult<()> {
        api.students.delete(id).await
    }
}

#[async_trait(?Send)]
impl TableResource for AttendanceRecord {
    const NOUN: &'static str = "attendance record";

    async fn fetch(api: &SchoolApi) -> ApiResult<Vec<Self>> {
        api.attendance.get().await
    }

    async fn remove(api: &SchoolApi, id: i64) -> ApiResult<()> {
        api.attendance.delete(id).await
    }
}

#[async_trait(?Send)]
impl TableResource for FeeRecord {
    const NOUN: &'static str = "fee";

    async fn fetch(api: &SchoolApi) -> ApiResult<Vec<Self>> {
        api.fees.get().await
    }

    async fn remove(api: &SchoolApi, id: i64) -> ApiResult<()> {
        api.fees.delete(id).await
    }
}

#[async_trait(?Send)]
impl TableResource for IncomeRecord {
    const NOUN: &'static str = "income";

    async fn fetch(api: &SchoolApi) -> ApiResult<Vec<Self>> {
        api.income.get().await
    }

    async fn remove(api: &SchoolApi, id: i64) -> ApiResult<()> {
        api.income.delete(id).await
    }
}

#[async_trait(?Send)]
impl TableResource for ExpenseRecord {
    const NOUN: &'static str = "expense";

    async fn fetch(api: &SchoolApi) -> ApiResult<Vec<Self>> {
        api.expenses.get().await
    }

    async fn remove(api: &SchoolApi, id: i64) -> ApiResult<()> {
        api.expenses.delete(id).await
    }
}

pub enum TableAction<T> {
    SetItems(Vec<T>),
    SetQuery(String),
    NextPage,
    PreviousPage,
    Remove(i64),
    Replace(T),
}

#[derive(Clone, PartialEq)]
pub struct TableView<T>(pub ListView<T>);

impl<T: Searchable + Clone> Reducible for TableView<T> {
    type Action = TableAction<T>;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut view = self.0.clone();
        match action {
            TableAction::SetItems(items) => view.set_items(items),
            TableAction::SetQuery(query) => view.set_query(query),
            TableAction::NextPage => view.next_page(),
            TableAction::PreviousPage => view.previous_page(),
            TableAction::Remove(id) => {
                view.remove(id);
            }
            TableAction::Replace(item) => {
                if let Some(row) = view.find_mut(item.row_id()) {
                    *row = item;
                }
            }
        }
        Rc::new(TableView(view))
    }
}

#[derive(Clone, PartialEq)]
pub struct ResourceTableState<T> {
    pub view: ListView<T>,
    pub loading: bool,
    /// Row awaiting delete confirmation
    pub pending_delete: Option<i64>,
    pub deleting: bool,
}

pub struct UseResourceTableResult<T> {
    pub state: ResourceTableState<T>,
    pub actions: ResourceTableActions<T>,
}

#[derive(Clone, PartialEq)]
pub struct ResourceTableActions<T> {
    pub refresh: Callback<()>,
    pub on_search: Callback<String>,
    pub next_page: Callback<()>,
    pub previous_page: Callback<()>,
    /// Ask for confirmation before deleting a row
    pub request_delete: Callback<i64>,
    pub cancel_delete: Callback<()>,
    pub confirm_delete: Callback<()>,
    /// Swap in an updated row without re-fetching
    pub replace: Callback<T>,
    /// Show rows fetched elsewhere, e.g. one category's records
    pub set_items: Callback<Vec<T>>,
}

#[hook]
pub fn use_resource_table<T>(
    api: &SchoolApi,
    page_size: usize,
    on_notify: &Callback<Notification>,
) -> UseResourceTableResult<T>
where
    T: TableResource,
{
    let view = use_reducer(|| TableView(ListView::<T>::with_page_size(Vec::new(), page_size)));
    let loading = use_state(|| true);
    let pending_delete = use_state(|| None::<i64>);
    let deleting = use_state(|| false);

    let refresh = {
        let api = api.clone();
        let dispatcher = view.dispatcher();
        let loading = loading.clone();
        let on_notify = on_notify.clone();

        use_callback((), move |_: (), _| {
            let api = api.clone();
            let dispatcher = dispatcher.clone();
            let loading = loading.clone();
            let on_notify = on_notify.clone();

            spawn_local(async move {
                loading.set(true);

                match T::fetch(&api).await {
                    Ok(items) => dispatcher.dispatch(TableAction::SetItems(items)),
                    Err(e) => {
                        Logger::error_with_component(
                            "resource-table-hook",
                            &format!("Failed to load {} list: {}", T::NOUN, e),
                        );
                        on_notify.emit(Notification::error(format!(
                            "Failed to load {} list: {}",
                            T::NOUN,
                            e
                        )));
                    }
                }

                loading.set(false);
            });
        })
    };

    {
        let refresh = refresh.clone();
        use_effect_with((), move |_| {
            refresh.emit(());
            || ()
        });
    }

    let on_search = {
        let dispatcher = view.dispatcher();
        use_callback((), move |query: String, _| {
            dispatcher.dispatch(TableAction::SetQuery(query));
        })
    };

    let next_page = {
        let dispatcher = view.dispatcher();
        use_callback((), move |_: (), _| dispatcher.dispatch(TableAction::NextPage))
    };

    let previous_page = {
        let dispatcher = view.dispatcher();
        use_callback((), move |_: (), _| dispatcher.dispatch(TableAction::PreviousPage))
    };

    let request_delete = {
        let pending_delete = pending_delete.clone();
        use_callback((), move |id: i64, _| pending_delete.set(Some(id)))
    };

    let cancel_delete = {
        let pending_delete = pending_delete.clone();
        use_callback((), move |_: (), _| pending_delete.set(None))
    };

    let confirm_delete = {
        let api = api.clone();
        let dispatcher = view.dispatcher();
        let pending_delete = pending_delete.clone();
        let deleting = deleting.clone();
        let on_notify = on_notify.clone();

        use_callback(*pending_delete, move |_: (), target| {
            let Some(id) = *target else {
                return;
            };
            let api = api.clone();
            let dispatcher = dispatcher.clone();
            let pending_delete = pending_delete.clone();
            let deleting = deleting.clone();
            let on_notify = on_notify.clone();

            spawn_local(async move {
                deleting.set(true);

                let result = T::remove(&api, id).await;
                if result.is_ok() {
                    dispatcher.dispatch(TableAction::Remove(id));
                }
                on_notify.emit(Notification::for_result(
                    &result,
                    &format!("Deleted {}", T::NOUN),
                    &format!("Failed to delete {}", T::NOUN),
                ));

                deleting.set(false);
                pending_delete.set(None);
            });
        })
    };

    let replace = {
        let dispatcher = view.dispatcher();
        use_callback((), move |item: T, _| dispatcher.dispatch(TableAction::Replace(item)))
    };

    let set_items = {
        let dispatcher = view.dispatcher();
        use_callback((), move |items: Vec<T>, _| dispatcher.dispatch(TableAction::SetItems(items)))
    };

    UseResourceTableResult {
        state: ResourceTableState {
            view: view.0.clone(),
            loading: *loading,
            pending_delete: *pending_delete,
            deleting: *deleting,
        },
        actions: ResourceTableActions {
            refresh,
            on_search,
            next_page,
            previous_page,
            request_delete,
            cancel_delete,
            confirm_delete,
            replace,
            set_items,
        },
    }
}
