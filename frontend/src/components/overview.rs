use chrono::{Datelike, NaiveDate};
use shared::{
    bar_percent, max_magnitude, AttendanceSummaryReport, CategorySummaryReport,
    FeeCollectionSummary, IncomeExpenseSummary, Notification, SchoolApi, StudentSummaryReport,
};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use super::ui::Loader;
use crate::hooks::use_summary::{use_summary, CategoryQuery, Ledger};

const MONTH_ABBR: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Short month name for a 1-based month number.
fn month_label(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|index| MONTH_ABBR.get(index as usize))
        .copied()
        .unwrap_or("?")
}

fn amount(value: f64) -> String {
    format!("Rs {:.2}", value)
}

/// `""` means every month.
fn parse_month(value: &str) -> Option<u32> {
    value.parse::<u32>().ok().filter(|month| (1..=12).contains(month))
}

fn bar_rows<'a>(rows: impl IntoIterator<Item = (&'a str, f64)>) -> Html {
    let rows: Vec<(&str, f64)> = rows.into_iter().collect();
    let max = max_magnitude(rows.iter().map(|(_, value)| *value));
    html! {
        <div class="bar-list">
            {for rows.into_iter().map(|(label, value)| html! {
                <div class={classes!("bar-row", (value < 0.0).then_some("negative"))}>
                    <span class="bar-label">{label}</span>
                    <span class="bar" style={format!("width: {}%", bar_percent(value, max))}></span>
                    <span class="bar-value">{amount(value)}</span>
                </div>
            })}
        </div>
    }
}

fn stat(label: &str, value: impl ToString) -> Html {
    html! {
        <div class="stat-card">
            <span class="stat-label">{label}</span>
            <span class="stat-value">{value.to_string()}</span>
        </div>
    }
}

fn card<R>(title: &str, report: Option<&R>, loading: bool, body: impl FnOnce(&R) -> Html) -> Html {
    html! {
        <div class="summary-card">
            <h2>{title}</h2>
            {match (report, loading) {
                (Some(report), _) => body(report),
                (None, true) => html! { <Loader /> },
                (None, false) => html! { <div class="empty-state">{"No data available"}</div> },
            }}
        </div>
    }
}

fn student_card(date: NaiveDate, report: Option<&StudentSummaryReport>, loading: bool) -> Html {
    card(&format!("Students on {}", date), report, loading, |report| {
        let summary = &report.summary;
        html! {
            <div class="stat-grid">
                {stat("Total", summary.total_students)}
                {stat("Present", summary.present)}
                {stat("Absent", summary.absent)}
                {stat("Late", summary.late)}
                {stat("Sick", summary.sick)}
                {stat("Leave", summary.leave)}
                {stat("Unmarked", summary.unmarked())}
                {stat(
                    "Attendance",
                    summary
                        .attendance_rate()
                        .map(|rate| format!("{:.1}%", rate))
                        .unwrap_or_else(|| "-".to_string()),
                )}
            </div>
        }
    })
}

fn attendance_card(report: Option<&AttendanceSummaryReport>, loading: bool) -> Html {
    card("Today's Attendance by Class", report, loading, |report| {
        if report.summary.is_empty() {
            return html! { <div class="empty-state">{"No attendance marked today"}</div> };
        }
        let statuses = report.statuses();
        html! {
            <table class="data-table">
                <thead>
                    <tr>
                        <th>{"Class"}</th>
                        {for statuses.iter().map(|status| html! { <th>{*status}</th> })}
                        <th>{"Total"}</th>
                    </tr>
                </thead>
                <tbody>
                    {for report.summary.iter().map(|class| html! {
                        <tr key={class.class_name.clone()}>
                            <td>{&class.class_name}</td>
                            {for statuses.iter().map(|status| html! { <td>{class.count(status)}</td> })}
                            <td>{class.total()}</td>
                        </tr>
                    })}
                </tbody>
            </table>
        }
    })
}

fn finance_card(year: i32, report: Option<&IncomeExpenseSummary>, loading: bool) -> Html {
    card(&format!("Income vs Expenses {}", year), report, loading, |report| {
        html! {
            <>
                <div class="stat-grid">
                    {stat("Total Income", amount(report.totals.income))}
                    {stat("Total Expense", amount(report.totals.expense))}
                    {stat(if report.totals.profit < 0.0 { "Net Loss" } else { "Net Profit" }, amount(report.totals.profit))}
                </div>
                {bar_rows(report.active_months().map(|(month, balance)| (month_label(month), balance.profit)))}
            </>
        }
    })
}

fn fee_card(year: i32, report: Option<&FeeCollectionSummary>, loading: bool) -> Html {
    card(&format!("Fee Collection {}", year), report, loading, |report| {
        html! {
            <>
                <div class="stat-grid">{stat("Total Fee Collection", amount(report.total))}</div>
                {bar_rows(report.monthly_data.iter().map(|(month, total)| (month_label(*month), *total)))}
            </>
        }
    })
}

fn category_card(
    title: &str,
    report: Option<&CategorySummaryReport>,
    loading: bool,
    on_month_change: Callback<Event>,
) -> Html {
    html! {
        <div class="summary-section">
            <select class="month-filter" onchange={on_month_change}>
                <option value="">{"All months"}</option>
                {for (1..=12u32).map(|month| html! {
                    <option value={month.to_string()}>{month_label(month)}</option>
                })}
            </select>
            {card(title, report, loading, |report| html! {
                <>
                    <div class="stat-grid">{stat("Total", amount(report.total))}</div>
                    {bar_rows(report.ranked())}
                </>
            })}
        </div>
    }
}

fn month_select_callback(target: UseStateHandle<Option<u32>>) -> Callback<Event> {
    Callback::from(move |e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        target.set(parse_month(&select.value()));
    })
}

#[derive(Properties, PartialEq)]
pub struct OverviewProps {
    pub api: SchoolApi,
    pub on_notify: Callback<Notification>,
}

/// School-wide figures: attendance for a day, this year's money.
#[function_component(Overview)]
pub fn overview(props: &OverviewProps) -> Html {
    let today = chrono::Local::now().date_naive();
    let date = use_state(|| today);
    let year = use_state(|| today.year());
    let income_month = use_state(|| None::<u32>);
    let expense_month = use_state(|| None::<u32>);

    let students = use_summary::<StudentSummaryReport>(&props.api, &*date, &props.on_notify);
    let attendance = use_summary::<AttendanceSummaryReport>(&props.api, &(), &props.on_notify);
    let finances = use_summary::<IncomeExpenseSummary>(&props.api, &*year, &props.on_notify);
    let fees = use_summary::<FeeCollectionSummary>(&props.api, &*year, &props.on_notify);
    let income = use_summary::<CategorySummaryReport>(
        &props.api,
        &CategoryQuery {
            ledger: Ledger::Income,
            year: *year,
            month: *income_month,
        },
        &props.on_notify,
    );
    let expenses = use_summary::<CategorySummaryReport>(
        &props.api,
        &CategoryQuery {
            ledger: Ledger::Expense,
            year: *year,
            month: *expense_month,
        },
        &props.on_notify,
    );

    let on_date_change = {
        let date = date.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            if let Ok(picked) = NaiveDate::parse_from_str(&input.value(), "%Y-%m-%d") {
                date.set(picked);
            }
        })
    };

    let on_year_change = {
        let year = year.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            if let Ok(picked) = input.value().trim().parse::<i32>() {
                year.set(picked);
            }
        })
    };

    html! {
        <div class="overview-page">
            <div class="filter-row">
                <div class="form-group">
                    <label for="overview-date">{"Attendance date"}</label>
                    <input
                        id="overview-date"
                        type="date"
                        value={date.format("%Y-%m-%d").to_string()}
                        onchange={on_date_change}
                    />
                </div>
                <div class="form-group">
                    <label for="overview-year">{"Year"}</label>
                    <input
                        id="overview-year"
                        type="number"
                        value={year.to_string()}
                        onchange={on_year_change}
                    />
                </div>
            </div>

            <div class="summary-grid">
                {student_card(*date, students.report.as_ref(), students.loading)}
                {attendance_card(attendance.report.as_ref(), attendance.loading)}
                {finance_card(*year, finances.report.as_ref(), finances.loading)}
                {fee_card(*year, fees.report.as_ref(), fees.loading)}
                {category_card(
                    "Income by Category",
                    income.report.as_ref(),
                    income.loading,
                    month_select_callback(income_month.clone()),
                )}
                {category_card(
                    "Expenses by Category",
                    expenses.report.as_ref(),
                    expenses.loading,
                    month_select_callback(expense_month.clone()),
                )}
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_month_label_bounds() {
        assert_eq!(month_label(1), "Jan");
        assert_eq!(month_label(12), "Dec");
        assert_eq!(month_label(0), "?");
        assert_eq!(month_label(13), "?");
    }

    #[wasm_bindgen_test]
    fn test_parse_month_blank_means_all() {
        assert_eq!(parse_month(""), None);
        assert_eq!(parse_month("3"), Some(3));
        assert_eq!(parse_month("13"), None);
    }

    #[wasm_bindgen_test]
    fn test_amount_format() {
        assert_eq!(amount(1500.0), "Rs 1500.00");
        assert_eq!(amount(-800.5), "Rs -800.50");
    }
}
