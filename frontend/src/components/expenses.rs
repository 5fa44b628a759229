use shared::ExpenseRecord;
use yew::prelude::*;

use super::resource_table::{delete_button, table_frame, PageProps};
use super::ui::{options_from, Loader, ReferenceSelect};
use crate::hooks::use_category_filter::use_category_filter;
use crate::hooks::use_resource_table::use_resource_table;

#[function_component(ExpensesPage)]
pub fn expenses_page(props: &PageProps) -> Html {
    let table = use_resource_table::<ExpenseRecord>(&props.api, props.page_size, &props.on_notify);
    let filter = use_category_filter::<ExpenseRecord>(&props.api, &(), &props.on_notify);

    {
        let set_items = table.actions.set_items.clone();
        use_effect_with(filter.state.records.clone(), move |records| {
            if let Some(records) = records {
                set_items.emit(records.clone());
            }
            || ()
        });
    }

    // "All categories" goes back to the full list
    let on_category = {
        let on_select = filter.on_select.clone();
        let refresh = table.actions.refresh.clone();
        Callback::from(move |key: Option<i64>| {
            on_select.emit(key);
            if key.is_none() {
                refresh.emit(());
            }
        })
    };

    let total: f64 = table.state.view.filtered().iter().map(|r| r.amount).sum();

    let rows = html! {
        {for table.state.view.page().into_iter().map(|expense| html! {
            <tr key={expense.id}>
                <td>{expense.receipt_number.map(|n| n.to_string()).unwrap_or_default()}</td>
                <td>{&expense.date}</td>
                <td>{&expense.category}</td>
                <td>{&expense.to_whom}</td>
                <td>{expense.description.clone().unwrap_or_default()}</td>
                <td class="amount negative">{format!("{:.2}", expense.amount)}</td>
                <td>{delete_button(&table, expense.id)}</td>
            </tr>
        })}
    };

    html! {
        <div class="expenses-page">
            <div class="filter-row">
                <ReferenceSelect
                    id="expense-category"
                    label="Category"
                    placeholder="All categories"
                    options={options_from(&filter.state.categories)}
                    selected={filter.state.selected}
                    on_change={on_category}
                />
                <div class="summary">{format!("Total spent: {:.2}", total)}</div>
            </div>
            {if filter.state.loading {
                html! { <Loader label="Loading category..." /> }
            } else { html! {} }}
            {table_frame(
                "Expenses",
                &["Receipt", "Date", "Category", "Paid To", "Description", "Amount"],
                &table,
                rows,
            )}
        </div>
    }
}
