use async_trait::async_trait;
use chrono::NaiveDate;
use shared::{
    ApiResult, AttendanceSummaryReport, CategorySummaryReport, FeeCollectionSummary,
    IncomeExpenseSummary, Notification, SchoolApi, StudentSummaryReport,
};
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::logging::Logger;

/// A dashboard report that is fetched again whenever its query changes.
#[async_trait(?Send)]
pub trait SummaryReport: Clone + PartialEq + 'static {
    type Query: Clone + PartialEq + 'static;

    fn noun(query: &Self::Query) -> &'static str;

    async fn fetch(api: &SchoolApi, query: &Self::Query) -> ApiResult<Self>;
}

#[async_trait(?Send)]
impl SummaryReport for StudentSummaryReport {
    type Query = NaiveDate;

    fn noun(_: &NaiveDate) -> &'static str {
        "student summary"
    }

    async fn fetch(api: &SchoolApi, date: &NaiveDate) -> ApiResult<Self> {
        api.dashboard.student_summary(*date).await
    }
}

#[async_trait(?Send)]
impl SummaryReport for AttendanceSummaryReport {
    type Query = ();

    fn noun(_: &()) -> &'static str {
        "attendance summary"
    }

    async fn fetch(api: &SchoolApi, _: &()) -> ApiResult<Self> {
        api.dashboard.attendance_summary().await
    }
}

#[async_trait(?Send)]
impl SummaryReport for IncomeExpenseSummary {
    type Query = i32;

    fn noun(_: &i32) -> &'static str {
        "income and expense summary"
    }

    async fn fetch(api: &SchoolApi, year: &i32) -> ApiResult<Self> {
        api.dashboard.income_expense_summary(*year).await
    }
}

#[async_trait(?Send)]
impl SummaryReport for FeeCollectionSummary {
    type Query = i32;

    fn noun(_: &i32) -> &'static str {
        "fee summary"
    }

    async fn fetch(api: &SchoolApi, year: &i32) -> ApiResult<Self> {
        api.dashboard.fee_summary(*year).await
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ledger {
    Income,
    Expense,
}

/// Category totals for one ledger; `month: None` covers the whole year.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CategoryQuery {
    pub ledger: Ledger,
    pub year: i32,
    pub month: Option<u32>,
}

#[async_trait(?Send)]
impl SummaryReport for CategorySummaryReport {
    type Query = CategoryQuery;

    fn noun(query: &CategoryQuery) -> &'static str {
        match query.ledger {
            Ledger::Income => "income summary",
            Ledger::Expense => "expense summary",
        }
    }

    async fn fetch(api: &SchoolApi, query: &CategoryQuery) -> ApiResult<Self> {
        match query.ledger {
            Ledger::Income => api.dashboard.income_summary(query.year, query.month).await,
            Ledger::Expense => api.dashboard.expense_summary(query.year, query.month).await,
        }
    }
}

#[derive(Clone, PartialEq)]
pub struct SummaryState<R> {
    /// Last report that arrived; kept while a new query is loading
    pub report: Option<R>,
    pub loading: bool,
}

/// Load `R` for `query`, reloading when it changes. A response for a
/// query that has since changed is dropped.
#[hook]
pub fn use_summary<R: SummaryReport>(
    api: &SchoolApi,
    query: &R::Query,
    on_notify: &Callback<Notification>,
) -> SummaryState<R> {
    let report = use_state(|| None::<R>);
    let loading = use_state(|| true);

    {
        let api = api.clone();
        let report = report.clone();
        let loading = loading.clone();
        let on_notify = on_notify.clone();
        use_effect_with(query.clone(), move |query| {
            let current = Rc::new(Cell::new(true));
            loading.set(true);

            let query = query.clone();
            let still_current = current.clone();
            spawn_local(async move {
                let result = R::fetch(&api, &query).await;
                if !still_current.get() {
                    Logger::debug_with_component(
                        "summary-hook",
                        &format!("Dropped stale {}", R::noun(&query)),
                    );
                    return;
                }
                match result {
                    Ok(fresh) => report.set(Some(fresh)),
                    Err(e) => on_notify.emit(Notification::error(format!(
                        "Failed to load {}: {}",
                        R::noun(&query),
                        e
                    ))),
                }
                loading.set(false);
            });

            move || current.set(false)
        });
    }

    SummaryState {
        report: (*report).clone(),
        loading: *loading,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_category_noun_follows_ledger() {
        let income = CategoryQuery {
            ledger: Ledger::Income,
            year: 2025,
            month: None,
        };
        let expense = CategoryQuery {
            ledger: Ledger::Expense,
            ..income
        };

        assert_eq!(CategorySummaryReport::noun(&income), "income summary");
        assert_eq!(CategorySummaryReport::noun(&expense), "expense summary");
        assert_ne!(income, expense);
    }
}
