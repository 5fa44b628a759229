use shared::IncomeRecord;
use yew::prelude::*;

use super::resource_table::{delete_button, table_frame, PageProps};
use super::ui::{options_from, Loader, ReferenceSelect};
use crate::hooks::use_category_filter::use_category_filter;
use crate::hooks::use_resource_table::use_resource_table;

#[function_component(IncomePage)]
pub fn income_page(props: &PageProps) -> Html {
    let table = use_resource_table::<IncomeRecord>(&props.api, props.page_size, &props.on_notify);
    let filter = use_category_filter::<IncomeRecord>(&props.api, &(), &props.on_notify);

    // Show the selected category's records in the table
    {
        let set_items = table.actions.set_items.clone();
        use_effect_with(filter.state.records.clone(), move |records| {
            if let Some(records) = records {
                set_items.emit(records.clone());
            }
            || ()
        });
    }

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
        {for table.state.view.page().into_iter().map(|income| html! {
            <tr key={income.id}>
                <td>{income.receipt_number.map(|n| n.to_string()).unwrap_or_default()}</td>
                <td>{&income.date}</td>
                <td>{&income.category}</td>
                <td>{&income.source}</td>
                <td>{income.description.clone().unwrap_or_default()}</td>
                <td>{income.contact.clone().unwrap_or_default()}</td>
                <td>{format!("{:.2}", income.amount)}</td>
                <td>{delete_button(&table, income.id)}</td>
            </tr>
        })}
    };

    html! {
        <div class="income-page">
            <div class="filter-row">
                <ReferenceSelect
                    id="income-category"
                    label="Category"
                    placeholder="All categories"
                    options={options_from(&filter.state.categories)}
                    selected={filter.state.selected}
                    on_change={on_category}
                />
                <div class="summary">{format!("Total: {:.2}", total)}</div>
            </div>
            {if filter.state.loading {
                html! { <Loader label="Loading category..." /> }
            } else { html! {} }}
            {table_frame(
                "Income",
                &["Receipt", "Date", "Category", "Source", "Description", "Contact", "Amount"],
                &table,
                rows,
            )}
        </div>
    }
}
