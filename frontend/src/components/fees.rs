use chrono::Datelike;
use shared::{FeeRecord, FeeStatus, StudentFeeStatus};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use super::resource_table::{delete_button, table_frame, PageProps};
use super::ui::{options_from, Loader, ReferenceSelect};
use crate::hooks::use_category_filter::{use_category_filter, FeePeriod};
use crate::hooks::use_resource_table::use_resource_table;

const MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

fn status_class(status: FeeStatus) -> &'static str {
    match status {
        FeeStatus::Paid => "badge paid",
        FeeStatus::Unpaid => "badge unpaid",
    }
}

fn current_period() -> FeePeriod {
    let today = chrono::Local::now().date_naive();
    FeePeriod {
        month: MONTHS[today.month0() as usize].to_string(),
        year: today.year(),
    }
}

/// Paid/unpaid status of every student in one class for one month.
#[function_component(ClassFeeStatus)]
pub fn class_fee_status(props: &PageProps) -> Html {
    let period = use_state(current_period);
    let filter = use_category_filter::<StudentFeeStatus>(&props.api, &*period, &props.on_notify);

    // Same class, new period: fetch again
    {
        let reload = filter.reload.clone();
        use_effect_with((*period).clone(), move |_| {
            reload.emit(());
            || ()
        });
    }

    let on_month_change = {
        let period = period.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            period.set(FeePeriod {
                month: select.value(),
                year: period.year,
            });
        })
    };

    let on_year_change = {
        let period = period.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            if let Ok(year) = input.value().trim().parse::<i32>() {
                period.set(FeePeriod {
                    month: period.month.clone(),
                    year,
                });
            }
        })
    };

    let state = &filter.state;
    html! {
        <section class="fee-status-section">
            <h2>{"Class Fee Status"}</h2>
            <div class="filter-row">
                <ReferenceSelect
                    id="fee-class"
                    label="Class"
                    options={options_from(&state.categories)}
                    selected={state.selected}
                    on_change={filter.on_select.clone()}
                />
                <div class="form-group">
                    <label for="fee-month">{"Month"}</label>
                    <select id="fee-month" onchange={on_month_change}>
                        {for MONTHS.iter().map(|month| html! {
                            <option value={*month} selected={period.month == *month}>{*month}</option>
                        })}
                    </select>
                </div>
                <div class="form-group">
                    <label for="fee-year">{"Year"}</label>
                    <input
                        id="fee-year"
                        type="number"
                        value={period.year.to_string()}
                        onchange={on_year_change}
                    />
                </div>
            </div>

            {match (&state.records, state.loading) {
                (_, true) => html! { <Loader label="Loading fee status..." /> },
                (None, false) => html! {
                    <div class="empty-state">{"Select a class to see who has paid"}</div>
                },
                (Some(rows), false) if rows.is_empty() => html! {
                    <div class="empty-state">{"No students found in this class"}</div>
                },
                (Some(rows), false) => html! {
                    <table class="data-table">
                        <thead>
                            <tr>
                                <th>{"Student"}</th>
                                <th>{"Father Name"}</th>
                                <th>{"Status"}</th>
                            </tr>
                        </thead>
                        <tbody>
                            {for rows.iter().map(|row| html! {
                                <tr key={row.student_id}>
                                    <td>{&row.student_name}</td>
                                    <td>{row.father_name.clone().unwrap_or_default()}</td>
                                    <td><span class={status_class(row.status)}>{row.status.to_string()}</span></td>
                                </tr>
                            })}
                        </tbody>
                    </table>
                },
            }}
        </section>
    }
}

#[function_component(FeeTable)]
pub fn fee_table(props: &PageProps) -> Html {
    let table = use_resource_table::<FeeRecord>(&props.api, props.page_size, &props.on_notify);

    let rows = html! {
        {for table.state.view.page().into_iter().map(|fee| html! {
            <tr key={fee.fee_id}>
                <td>{fee.student_name.clone().unwrap_or_default()}</td>
                <td>{fee.father_name.clone().unwrap_or_default()}</td>
                <td>{fee.class_name.clone().unwrap_or_default()}</td>
                <td>{format!("{:.2}", fee.amount)}</td>
                <td>{format!("{} {}", fee.month, fee.year)}</td>
                <td><span class={status_class(fee.status)}>{fee.status.to_string()}</span></td>
                <td>{delete_button(&table, fee.fee_id)}</td>
            </tr>
        })}
    };

    table_frame(
        "Fees",
        &["Student", "Father Name", "Class", "Amount", "Period", "Status"],
        &table,
        rows,
    )
}

#[function_component(FeesPage)]
pub fn fees_page(props: &PageProps) -> Html {
    html! {
        <div class="fees-page">
            <ClassFeeStatus ..props.clone() />
            <FeeTable ..props.clone() />
        </div>
    }
}
