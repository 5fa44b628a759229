use shared::{Notification, SchoolApi};
use yew::prelude::*;

use super::ui::{ConfirmDialog, Loader, Pagination, SearchBox};
use crate::hooks::use_resource_table::{TableResource, UseResourceTableResult};

/// Props shared by every dashboard page.
#[derive(Properties, PartialEq, Clone)]
pub struct PageProps {
    pub api: SchoolApi,
    pub page_size: usize,
    pub on_notify: Callback<Notification>,
}

/// Search box, table, pagination and the delete confirmation around `rows`.
pub fn table_frame<T: TableResource>(
    title: &str,
    headers: &[&str],
    table: &UseResourceTableResult<T>,
    rows: Html,
) -> Html {
    let state = &table.state;
    let actions = &table.actions;
    let (first, last, total) = state.view.range();

    html! {
        <section class="table-section">
            <div class="table-header">
                <h2>{title}</h2>
                <SearchBox
                    value={state.view.query().to_string()}
                    on_search={actions.on_search.clone()}
                />
            </div>

            {if state.loading {
                html! { <Loader label={format!("Loading {} list...", T::NOUN)} /> }
            } else if state.view.filtered_count() == 0 {
                html! { <div class="empty-state">{format!("No {} records found", T::NOUN)}</div> }
            } else {
                html! {
                    <div class="table-container">
                        <table class="data-table">
                            <thead>
                                <tr>
                                    {for headers.iter().map(|header| html! { <th>{*header}</th> })}
                                    <th>{"Actions"}</th>
                                </tr>
                            </thead>
                            <tbody>{rows}</tbody>
                        </table>
                    </div>
                }
            }}

            <Pagination
                range_label={format!("Showing {} to {} of {}", first, last, total)}
                page={state.view.page_index()}
                page_count={state.view.page_count()}
                can_previous={state.view.can_previous()}
                can_next={state.view.can_next()}
                on_previous={actions.previous_page.clone()}
                on_next={actions.next_page.clone()}
            />

            <ConfirmDialog
                is_open={state.pending_delete.is_some()}
                title={format!("Delete {}", T::NOUN)}
                message={format!("Are you sure you want to delete this {}? This cannot be undone.", T::NOUN)}
                busy={state.deleting}
                on_confirm={actions.confirm_delete.clone()}
                on_cancel={actions.cancel_delete.clone()}
            />
        </section>
    }
}

pub fn delete_button<T: TableResource>(table: &UseResourceTableResult<T>, id: i64) -> Html {
    let onclick = {
        let request_delete = table.actions.request_delete.clone();
        Callback::from(move |_: MouseEvent| request_delete.emit(id))
    };

    html! {
        <button type="button" class="btn btn-danger btn-small" {onclick}>{"Delete"}</button>
    }
}
