use async_trait::async_trait;
use shared::{
    ApiResult, CategoryCascade, ClassName, ExpenseCategory, ExpenseRecord, IncomeCategory,
    IncomeRecord, Notification, ReferenceEntity, SchoolApi, StudentFeeStatus,
};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::logging::Logger;

/// Records narrowed down by one upstream choice (a category or a class).
#[async_trait(?Send)]
pub trait CategoryRecords: Clone + PartialEq + 'static {
    type Category: ReferenceEntity + Clone + PartialEq + 'static;
    /// Extra parameters sent with every records request
    type Filter: Clone + PartialEq + 'static;

    const NOUN: &'static str;

    async fn fetch_categories(api: &SchoolApi) -> ApiResult<Vec<Self::Category>>;

    async fn fetch_records(api: &SchoolApi, key: i64, filter: &Self::Filter)
        -> ApiResult<Vec<Self>>;
}

#[async_trait(?Send)]
impl CategoryRecords for IncomeRecord {
    type Category = IncomeCategory;
    type Filter = ();

    const NOUN: &'static str = "income";

    async fn fetch_categories(api: &SchoolApi) -> ApiResult<Vec<IncomeCategory>> {
        api.income.get_categories().await
    }

    async fn fetch_records(api: &SchoolApi, key: i64, _filter: &()) -> ApiResult<Vec<Self>> {
        api.income.get_by_category(key).await
    }
}

#[async_trait(?Send)]
impl CategoryRecords for ExpenseRecord {
    type Category = ExpenseCategory;
    type Filter = ();

    const NOUN: &'static str = "expenses";

    async fn fetch_categories(api: &SchoolApi) -> ApiResult<Vec<ExpenseCategory>> {
        api.expenses.get_categories().await
    }

    async fn fetch_records(api: &SchoolApi, key: i64, _filter: &()) -> ApiResult<Vec<Self>> {
        api.expenses.get_by_category(key).await
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FeePeriod {
    pub month: String,
    pub year: i32,
}

#[async_trait(?Send)]
impl CategoryRecords for StudentFeeStatus {
    type Category = ClassName;
    type Filter = FeePeriod;

    const NOUN: &'static str = "fee status";

    async fn fetch_categories(api: &SchoolApi) -> ApiResult<Vec<ClassName>> {
        api.classes.get().await
    }

    async fn fetch_records(
        api: &SchoolApi,
        key: i64,
        filter: &FeePeriod,
    ) -> ApiResult<Vec<Self>> {
        api.fees.class_fee_status(key, &filter.month, filter.year).await
    }
}

#[derive(Clone, PartialEq)]
pub struct CategoryFilterState<R: CategoryRecords> {
    pub categories: Vec<R::Category>,
    pub selected: Option<i64>,
    /// `None` until records for the selection have arrived
    pub records: Option<Vec<R>>,
    pub loading: bool,
}

pub struct UseCategoryFilterResult<R: CategoryRecords> {
    pub state: CategoryFilterState<R>,
    pub on_select: Callback<Option<i64>>,
    pub reload: Callback<()>,
}

/// Pick a category, then load its records. A response for an earlier
/// selection is dropped when it arrives late.
#[hook]
pub fn use_category_filter<R>(
    api: &SchoolApi,
    filter: &R::Filter,
    on_notify: &Callback<Notification>,
) -> UseCategoryFilterResult<R>
where
    R: CategoryRecords,
{
    let categories = use_state(Vec::<R::Category>::new);
    let cascade = use_mut_ref(CategoryCascade::<R>::new);
    let update = use_force_update();

    {
        let api = api.clone();
        let categories = categories.clone();
        let on_notify = on_notify.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match R::fetch_categories(&api).await {
                    Ok(items) => categories.set(items),
                    Err(e) => on_notify.emit(Notification::error(format!(
                        "Failed to load {} categories: {}",
                        R::NOUN,
                        e
                    ))),
                }
            });
            || ()
        });
    }

    let reload = {
        let api = api.clone();
        let cascade = cascade.clone();
        let update = update.clone();
        let on_notify = on_notify.clone();
        use_callback(filter.clone(), move |_: (), filter| {
            let Ok(ticket) = cascade.borrow_mut().request() else {
                return;
            };
            update.force_update();

            let api = api.clone();
            let filter = filter.clone();
            let cascade = cascade.clone();
            let update = update.clone();
            let on_notify = on_notify.clone();
            spawn_local(async move {
                let result = R::fetch_records(&api, ticket.key(), &filter).await;
                let failure = match result {
                    Ok(records) => {
                        if let Err(e) = cascade.borrow_mut().loaded(ticket, records) {
                            Logger::debug_with_component(
                                "category-filter-hook",
                                &format!("Dropped {} for {}: {}", R::NOUN, ticket.key(), e),
                            );
                        }
                        None
                    }
                    Err(e) => {
                        cascade.borrow_mut().failed(ticket);
                        Some(e)
                    }
                };
                update.force_update();

                if let Some(e) = failure {
                    on_notify.emit(Notification::error(format!(
                        "Failed to load {}: {}",
                        R::NOUN,
                        e
                    )));
                }
            });
        })
    };

    let on_select = {
        let cascade = cascade.clone();
        let update = update.clone();
        let reload = reload.clone();
        use_callback(reload, move |key: Option<i64>, reload| {
            let selected = match key {
                Some(key) => {
                    cascade.borrow_mut().select(key);
                    true
                }
                None => {
                    cascade.borrow_mut().clear();
                    false
                }
            };
            update.force_update();

            if selected {
                reload.emit(());
            }
        })
    };

    let state = {
        let cascade = cascade.borrow();
        CategoryFilterState {
            categories: (*categories).clone(),
            selected: cascade.selected_key(),
            records: cascade.items().map(|items| items.to_vec()),
            loading: cascade.is_loading(),
        }
    };

    UseCategoryFilterResult {
        state,
        on_select,
        reload,
    }
}
